//! Framework error type.
//!
//! Sub-crates define their own error enums; `steer-sim` folds
//! `SteerError` into its `Config` variant at build time.

use thiserror::Error;

/// Errors raised by `steer-core` itself.
#[derive(Debug, Error)]
pub enum SteerError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `steer-core` operations.
pub type SteerResult<T> = Result<T, SteerError>;
