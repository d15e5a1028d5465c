//! `steer-agent`: Structure-of-Arrays agent storage for the `rust_steer` framework.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`store`]   | `AgentStore` (SoA arrays), `AgentRngs` (per-agent RNG)    |
//! | [`spec`]    | `AgentSpec`: initial state of one agent                  |
//! | [`builder`] | `AgentStoreBuilder` (fluent construction)                 |
//!
//! Agent slots are append-only: despawning flags a slot dead and its
//! `AgentId` is never handed out again, so ids stay valid indices into
//! every per-agent array for the whole run.

pub mod builder;
pub mod spec;
pub mod store;

#[cfg(test)]
mod tests;

pub use builder::AgentStoreBuilder;
pub use spec::AgentSpec;
pub use store::{AgentRngs, AgentStore};
