//! `steer-core`: foundational types for the `rust_steer` framework.
//!
//! This crate is a dependency of every other `steer-*` crate.  It has no
//! `steer-*` dependencies and few external ones (`glam`, `rand`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `ObstacleId`, `ProfileId`, `Body`          |
//! | [`layer`]       | `Layer`, `LayerMask`                                  |
//! | [`math`]        | `Vec3`/`Quat` re-exports, `clamp01`, rotation helpers |
//! | [`time`]        | `Tick`, `Clock`, `SimClock`, `SimConfig`              |
//! | [`rng`]         | `AgentRng` (per-agent), `SimRng` (global)             |
//! | [`error`]       | `SteerError`, `SteerResult`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod ids;
pub mod layer;
pub mod math;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{SteerError, SteerResult};
pub use ids::{AgentId, Body, ObstacleId, ProfileId};
pub use layer::{Layer, LayerMask};
pub use math::{Quat, Vec3};
pub use rng::{AgentRng, SimRng};
pub use time::{Clock, SimClock, SimConfig, Tick};
