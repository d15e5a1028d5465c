//! The `Sim` struct and its tick loop.

use log::{debug, info, warn};

use steer_agent::{AgentRngs, AgentSpec, AgentStore};
use steer_behavior::{AgentPose, NeighborCache, ProfileTable, SteerContext, SteeringComposer};
use steer_core::{
    AgentId, AgentRng, Body, Clock, Layer, ObstacleId, Quat, SimClock, SimConfig, Tick, Vec3,
};
use steer_spatial::{BodyEntry, SpatialIndex};

use crate::{RemovalCause, SimError, SimObserver, SimResult, TickStats};

// ── Obstacle ──────────────────────────────────────────────────────────────────

/// A non-steering body: walls, pickups, the player.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub position: Vec3,
    pub layer:    Layer,
}

impl Obstacle {
    pub fn new(position: Vec3, layer: Layer) -> Self {
        Obstacle { position, layer }
    }
}

// ── Per-agent steering result ─────────────────────────────────────────────────

/// Produced in the (potentially parallel) steering phase and written back in
/// the sequential apply phase.
struct Step {
    position:  Vec3,
    rotation:  Quat,
    refreshed: bool,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<I: SpatialIndex> {
    /// Global configuration (step size, total ticks, seed, …).
    pub config: SimConfig,

    /// Fixed-step clock.
    pub clock: SimClock,

    /// Agent state (SoA arrays).  Read-only during the steering phase.
    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    /// Steering profiles, indexed by `ProfileId`.
    pub profiles: ProfileTable,

    /// Per-agent neighbour caches, parallel to `agents`.
    pub caches: Vec<NeighborCache>,

    /// Static bodies, indexed by `ObstacleId`.
    pub obstacles: Vec<Obstacle>,

    /// Centre of the free space (containment anchor).
    pub space_origin: Option<Vec3>,

    /// Scene target profiles may react to.
    pub target: Option<Vec3>,

    /// Rebuilt at the start of every tick.
    pub index: I,

    #[cfg(feature = "parallel")]
    pub(crate) pool: Option<rayon::ThreadPool>,
}

impl<I: SpatialIndex> Sim<I> {
    // ── Running ───────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let end = self.config.end_tick();
        if self.clock.current_tick >= end {
            warn!("run called at {} but the run ends at {end}; nothing to do", self.clock.current_tick);
        } else {
            info!(
                "running {} → {end} with {} live agents ({} profiles, {} obstacles)",
                self.clock.current_tick,
                self.agents.live_count(),
                self.profiles.len(),
                self.obstacles.len(),
            );
        }

        while self.clock.current_tick < end {
            self.step(observer)?;
        }

        info!("run finished at {} with {} live agents", self.clock, self.agents.live_count());
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process one tick, notify `observer`, and advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickStats> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let stats = self.process_tick(now)?;
        observer.on_tick_end(&stats);

        let interval = self.config.output_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, stats.time_secs, &self.agents);
        }

        self.clock.advance();
        Ok(stats)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Add an agent at the current simulation time.
    ///
    /// Its neighbour cache is due immediately, so it steers with fresh
    /// neighbours on the next tick.
    pub fn spawn_agent(&mut self, spec: AgentSpec) -> SimResult<AgentId> {
        if !self.profiles.contains(spec.profile) {
            return Err(SimError::UnknownProfile(spec.profile));
        }
        let now = self.clock.elapsed_secs();
        let id = self.agents.spawn(&mut self.rngs, spec, now);
        self.caches.push(NeighborCache::new(now));
        Ok(id)
    }

    /// Remove a live agent and report it to `observer`.
    ///
    /// # Errors
    /// [`SimError::AgentNotFound`] if `agent` does not exist or was already
    /// removed.
    pub fn remove_agent<O: SimObserver>(
        &mut self,
        agent:    AgentId,
        cause:    RemovalCause,
        observer: &mut O,
    ) -> SimResult<()> {
        if !self.agents.despawn(agent) {
            return Err(SimError::AgentNotFound(agent));
        }
        self.caches[agent.index()] = NeighborCache::default();

        let score_value = self
            .profiles
            .get(self.agents.profile[agent.index()])
            .map_or(0, |p| p.score_value);
        observer.on_agent_removed(self.clock.current_tick, agent, cause, score_value);
        Ok(())
    }

    // ── Scene ─────────────────────────────────────────────────────────────

    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> SimResult<ObstacleId> {
        let id = ObstacleId::try_from(self.obstacles.len())
            .map_err(|_| SimError::Config("too many obstacles".into()))?;
        self.obstacles.push(obstacle);
        Ok(id)
    }

    /// Move an obstacle; agents see the new position from the next tick.
    pub fn set_obstacle_position(&mut self, id: ObstacleId, position: Vec3) -> SimResult<()> {
        let obstacle = self.obstacles.get_mut(id.index()).ok_or(SimError::ObstacleNotFound(id))?;
        obstacle.position = position;
        Ok(())
    }

    pub fn set_target(&mut self, target: Option<Vec3>) {
        self.target = target;
    }

    pub fn set_space_origin(&mut self, origin: Option<Vec3>) {
        self.space_origin = origin;
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick(&mut self, now: Tick) -> SimResult<TickStats> {
        // ── Phase 1: rebuild the spatial index ────────────────────────────
        self.index.rebuild(self.body_entries())?;

        // ── Phase 2: steering (produce) ───────────────────────────────────
        let ctx = SteerContext::new(self.clock.secs_at(now), self.clock.delta_secs())
            .with_origin(self.space_origin)
            .with_target(self.target);
        let steps = self.compute_steps(&ctx);

        // ── Phase 3: apply (consume) ──────────────────────────────────────
        //
        // Ascending AgentId order; the steering phase only read shared state,
        // so the result does not depend on how it was scheduled.
        let mut refreshed = 0;
        for (i, step) in steps.into_iter().enumerate() {
            if let Some(step) = step {
                self.agents.position[i] = step.position;
                self.agents.rotation[i] = step.rotation;
                refreshed += usize::from(step.refreshed);
            }
        }

        if refreshed > 0 {
            debug!("{now}: {refreshed} agents refreshed their neighbour caches");
        }

        Ok(TickStats {
            tick:             now,
            time_secs:        ctx.now,
            live_agents:      self.agents.live_count(),
            refreshed_agents: refreshed,
        })
    }

    /// Snapshot of every live agent and every obstacle for the index.
    fn body_entries(&self) -> Vec<BodyEntry> {
        let agents = &self.agents;
        let live = agents.live_ids().map(|id| BodyEntry {
            body:     Body::Agent(id),
            position: agents.position[id.index()],
            forward:  agents.forward(id),
            layer:    agents.layer[id.index()],
        });
        let obstacles = self.obstacles.iter().enumerate().map(|(i, o)| BodyEntry {
            body:     Body::Obstacle(ObstacleId(i as u32)),
            position: o.position,
            forward:  Vec3::ZERO,
            layer:    o.layer,
        });
        live.chain(obstacles).collect()
    }

    /// Steer every live agent.  Dead slots yield `None`.
    ///
    /// With the `parallel` Cargo feature this runs on Rayon's thread pool
    /// (the configured one if `num_threads` was set).
    fn compute_steps(&mut self, ctx: &SteerContext) -> Vec<Option<Step>> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let agents   = &self.agents;
        let profiles = &self.profiles;
        let index    = &self.index;
        let rngs     = &mut self.rngs.inner;
        let caches   = &mut self.caches;

        #[cfg(not(feature = "parallel"))]
        {
            rngs.iter_mut()
                .zip(caches.iter_mut())
                .enumerate()
                .map(|(i, (rng, cache))| steer_agent(i, agents, profiles, index, ctx, rng, cache))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let mut run = || -> Vec<Option<Step>> {
                rngs.par_iter_mut()
                    .zip(caches.par_iter_mut())
                    .enumerate()
                    .map(|(i, (rng, cache))| steer_agent(i, agents, profiles, index, ctx, rng, cache))
                    .collect()
            };
            match &self.pool {
                Some(pool) => pool.install(run),
                None       => run(),
            }
        }
    }
}

/// Refresh (if due) and compose for one agent slot.
fn steer_agent<I: SpatialIndex>(
    i:        usize,
    agents:   &AgentStore,
    profiles: &ProfileTable,
    index:    &I,
    ctx:      &SteerContext,
    rng:      &mut AgentRng,
    cache:    &mut NeighborCache,
) -> Option<Step> {
    if !agents.alive[i] {
        return None;
    }
    let profile = profiles.get(agents.profile[i])?;
    let position = agents.position[i];
    let body = Body::Agent(AgentId(i as u32));

    let refreshed = cache.refresh_if_due(body, position, profile, index, ctx.now);

    let pose = AgentPose::new(position, agents.rotation[i]).with_avoid_sign(agents.avoid_sign[i]);
    let out = SteeringComposer::new(profile).compose(&pose, cache, ctx, rng);
    Some(Step { position: out.position, rotation: out.rotation, refreshed })
}
