use steer_behavior::BehaviorError;
use steer_core::{AgentId, ObstacleId, ProfileId};
use steer_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("{0} is not in the profile table")]
    UnknownProfile(ProfileId),

    #[error("{0} does not exist or was already removed")]
    AgentNotFound(AgentId),

    #[error("{0} does not exist")]
    ObstacleNotFound(ObstacleId),

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("spatial index error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type SimResult<T> = Result<T, SimError>;
