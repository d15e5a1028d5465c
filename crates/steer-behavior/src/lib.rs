//! `steer-behavior`: the steering composer and everything it consumes.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`profile`]   | `SteeringProfile`, `SteeringWeights`, `BehaviorFlags`, `AvoidanceFalloff`, `TargetResponse`, `ProfileTable` |
//! | [`neighbors`] | `NeighborSet`, `NeighborCache` (interval-refreshed query results) |
//! | [`rules`]     | Pure sub-behaviours: alignment, cohesion, separation, avoidance, attraction, containment, inertia, jitter |
//! | [`composer`]  | `SteeringComposer`, `AgentPose`, `SteeringTerms`, `SteeringOutput` |
//! | [`context`]   | `SteerContext`: time step and scene anchors for one tick     |
//! | [`loader`]    | `load_profiles_csv`, `load_profiles_reader`                   |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                          |
//!
//! # Per-tick flow
//!
//! 1. If the agent's [`NeighborCache`] is due, re-query the spatial index
//!    (the only place a query happens).
//! 2. [`SteeringComposer::compose`] sums the enabled sub-behaviours, turns
//!    the sum into a fixed-speed step, and slews the orientation toward it.
//!
//! Steering never fails: empty neighbourhoods, absent anchors, and zero
//! vectors all resolve to neutral contributions.

pub mod composer;
pub mod context;
pub mod error;
pub mod loader;
pub mod neighbors;
pub mod profile;
pub mod rules;


pub use composer::{AgentPose, SteeringComposer, SteeringOutput, SteeringTerms};
pub use context::SteerContext;
pub use error::{BehaviorError, BehaviorResult};
pub use loader::{load_profiles_csv, load_profiles_reader};
pub use neighbors::{NeighborCache, NeighborSet};
pub use profile::{
    AvoidanceFalloff, BehaviorFlags, ProfileTable, SteeringProfile, SteeringWeights, TargetResponse,
};
