//! Fluent builder for constructing `AgentStore` + `AgentRngs` in one step.
//!
//! # Usage
//!
//! ```rust
//! use steer_agent::{AgentSpec, AgentStoreBuilder};
//! use steer_core::{ProfileId, Vec3};
//!
//! let (store, rngs) = AgentStoreBuilder::new(/*seed=*/ 42)
//!     .agent(AgentSpec::at(Vec3::ZERO, ProfileId(0)))
//!     .agent(AgentSpec::at(Vec3::new(2.0, 0.0, 0.0), ProfileId(0)))
//!     .build();
//!
//! assert_eq!(store.count, 2);
//! assert_eq!(rngs.len(),  2);
//! ```

use crate::{AgentRngs, AgentSpec, AgentStore};

/// Fluent builder for [`AgentStore`] + [`AgentRngs`].
pub struct AgentStoreBuilder {
    seed:   u64,
    agents: Vec<AgentSpec>,
}

impl AgentStoreBuilder {
    /// Create an empty builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self { seed, agents: Vec::new() }
    }

    /// Pre-allocate for `n` agents.
    pub fn with_capacity(mut self, n: usize) -> Self {
        self.agents.reserve(n);
        self
    }

    /// Append one agent.  Agents receive ids in insertion order.
    pub fn agent(mut self, spec: AgentSpec) -> Self {
        self.agents.push(spec);
        self
    }

    /// Append many agents.
    pub fn agents<I: IntoIterator<Item = AgentSpec>>(mut self, specs: I) -> Self {
        self.agents.extend(specs);
        self
    }

    /// Construct `AgentStore` and `AgentRngs`.
    ///
    /// Every agent is spawned at time 0.
    pub fn build(self) -> (AgentStore, AgentRngs) {
        let mut store = AgentStore::with_capacity(self.agents.len());
        let mut rngs = AgentRngs::new(self.seed);
        for spec in self.agents {
            store.spawn(&mut rngs, spec, 0.0);
        }
        (store, rngs)
    }
}
