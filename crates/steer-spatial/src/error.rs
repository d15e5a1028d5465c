//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `steer-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("non-finite position for {0}")]
    NonFinitePosition(steer_core::Body),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
