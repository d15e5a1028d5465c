//! Fluent builder for constructing a [`Sim`].

use steer_agent::{AgentRngs, AgentStore};
use steer_behavior::{NeighborCache, ProfileTable};
use steer_core::{SimConfig, Vec3};
use steer_spatial::SpatialIndex;

use crate::{Obstacle, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<I>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: step size, total ticks, seed, …
/// - [`AgentStore`] + [`AgentRngs`]: from [`steer_agent::AgentStoreBuilder`]
/// - [`ProfileTable`]: every agent's profile must be in it
/// - `I: SpatialIndex`: e.g. [`steer_spatial::RTreeIndex`]
///
/// # Optional inputs (have defaults)
///
/// | Method               | Default        |
/// |----------------------|----------------|
/// | `.space_origin(p)`   | no containment |
/// | `.target(p)`         | no target      |
/// | `.obstacle(o)`       | no obstacles   |
pub struct SimBuilder<I: SpatialIndex> {
    config:       SimConfig,
    agents:       AgentStore,
    rngs:         AgentRngs,
    profiles:     ProfileTable,
    index:        I,
    obstacles:    Vec<Obstacle>,
    space_origin: Option<Vec3>,
    target:       Option<Vec3>,
}

impl<I: SpatialIndex> SimBuilder<I> {
    /// Create a builder with all required inputs.
    pub fn new(
        config:   SimConfig,
        agents:   AgentStore,
        rngs:     AgentRngs,
        profiles: ProfileTable,
        index:    I,
    ) -> Self {
        Self {
            config,
            agents,
            rngs,
            profiles,
            index,
            obstacles:    Vec::new(),
            space_origin: None,
            target:       None,
        }
    }

    /// Centre of the free space; enables containment for profiles that use it.
    pub fn space_origin(mut self, origin: Vec3) -> Self {
        self.space_origin = Some(origin);
        self
    }

    /// Scene target that profiles with a `TargetResponse` react to.
    pub fn target(mut self, target: Vec3) -> Self {
        self.target = Some(target);
        self
    }

    /// Add one static body.  Obstacles receive ids in insertion order.
    pub fn obstacle(mut self, obstacle: Obstacle) -> Self {
        self.obstacles.push(obstacle);
        self
    }

    pub fn obstacles<T: IntoIterator<Item = Obstacle>>(mut self, obstacles: T) -> Self {
        self.obstacles.extend(obstacles);
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<I>> {
        self.config.validate().map_err(|e| SimError::Config(e.to_string()))?;

        let agent_count = self.agents.count;
        if self.rngs.len() != agent_count {
            return Err(SimError::AgentCountMismatch {
                expected: agent_count,
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }
        if let Some(&missing) = self.agents.profile.iter().find(|p| !self.profiles.contains(**p)) {
            return Err(SimError::UnknownProfile(missing));
        }
        if u32::try_from(self.obstacles.len()).is_err() {
            return Err(SimError::Config("too many obstacles".into()));
        }

        // Every initial agent is due for a refresh at its spawn time.
        let caches = self.agents.spawned_at.iter().map(|&t| NeighborCache::new(t)).collect();

        #[cfg(feature = "parallel")]
        let pool = match self.config.num_threads {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .build()
                    .map_err(|e| SimError::Config(format!("thread pool: {e}")))?,
            ),
            None => None,
        };

        Ok(Sim {
            clock:        self.config.make_clock(),
            config:       self.config,
            agents:       self.agents,
            rngs:         self.rngs,
            profiles:     self.profiles,
            caches,
            obstacles:    self.obstacles,
            space_origin: self.space_origin,
            target:       self.target,
            index:        self.index,
            #[cfg(feature = "parallel")]
            pool,
        })
    }
}
