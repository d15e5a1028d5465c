//! Initial state for one agent.

use steer_core::{Layer, ProfileId, Quat, Vec3};

/// Everything needed to place a new agent in the world.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSpec {
    pub position: Vec3,
    pub rotation: Quat,
    pub profile:  ProfileId,
    pub layer:    Layer,
}

impl AgentSpec {
    /// An agent at `position` facing `+X` on layer 0.
    pub fn at(position: Vec3, profile: ProfileId) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            profile,
            layer: Layer::default(),
        }
    }

    pub fn facing(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn on_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }
}
