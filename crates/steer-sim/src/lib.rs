//! `steer-sim`: tick loop orchestrator for the rust_steer framework.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Index    : rebuild the spatial index from live agents + obstacles.
//!   ② Steering : per live agent: refresh its neighbour cache if due,
//!                 then compose one step (parallel with `parallel`).
//!   ③ Apply    : write positions and rotations in ascending AgentId order.
//!   ④ Observe  : on_tick_end, and on_snapshot every output interval.
//!   ⑤ Advance  : the clock moves one tick.
//! ```
//!
//! Every agent reads the same index snapshot, so the order in which agents
//! are steered never changes the result.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the steering phase on Rayon's thread pool.        |
//!
//! Trajectories do not depend on the thread count; run
//! `cargo test -p steer-sim --features parallel` to check it.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use steer_agent::{AgentSpec, AgentStoreBuilder};
//! use steer_behavior::{ProfileTable, SteeringProfile};
//! use steer_sim::{NoopObserver, SimBuilder};
//! use steer_spatial::RTreeIndex;
//!
//! let mut profiles = ProfileTable::new();
//! let boid = profiles.push(SteeringProfile::named("boid"))?;
//! let (store, rngs) = AgentStoreBuilder::new(config.seed)
//!     .agent(AgentSpec::at(Vec3::ZERO, boid))
//!     .build();
//! let mut sim = SimBuilder::new(config, store, rngs, profiles, RTreeIndex::new())
//!     .space_origin(Vec3::ZERO)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod score;
pub mod sim;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use score::{RemovalCause, Scoreboard};
pub use sim::{Obstacle, Sim};
