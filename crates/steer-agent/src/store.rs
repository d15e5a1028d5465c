//! Core agent storage: `AgentStore` (SoA data) and `AgentRngs` (per-agent RNG).
//!
//! # Why two structs?
//!
//! The steering phase needs `&mut AgentRngs` (exclusive access to each
//! agent's RNG) and `&AgentStore` (shared read access to every pose)
//! simultaneously.  Keeping RNGs in a separate struct lets both borrows
//! coexist:
//!
//! ```ignore
//! // steer-sim steering phase (simplified):
//! let store: &AgentStore = &sim.store;
//! let outputs = sim.rngs.inner
//!     .par_iter_mut()
//!     .enumerate()
//!     .map(|(i, rng)| steer(AgentId(i as u32), store, rng))
//!     .collect::<Vec<_>>();
//! ```

use log::debug;
use steer_core::math::forward;
use steer_core::{AgentId, AgentRng, Layer, ProfileId, Quat, Vec3};

use crate::AgentSpec;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG state, separated from [`AgentStore`] to enable
/// simultaneous `&mut AgentRngs` + `&AgentStore` borrows.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
    global_seed: u64,
}

impl AgentRngs {
    pub(crate) fn new(global_seed: u64) -> Self {
        Self { inner: Vec::new(), global_seed }
    }

    /// Seed the RNG for the next agent slot.
    pub(crate) fn push(&mut self, agent: AgentId) {
        debug_assert_eq!(agent.index(), self.inner.len());
        self.inner.push(AgentRng::new(self.global_seed, agent));
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn global_seed(&self) -> u64 {
        self.global_seed
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all agent state.
///
/// Every `Vec` field has exactly `count` elements; the `AgentId` value is the
/// index into all of them:
///
/// ```ignore
/// let pos = store.position[agent.index()];  // O(1), cache-friendly
/// ```
///
/// Dead slots keep their last pose so output written after a despawn still
/// refers to a sensible location.
pub struct AgentStore {
    /// Number of agent slots (live and dead).  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// World position.
    pub position: Vec<Vec3>,

    /// Orientation; forward is `rotation * +X`.
    pub rotation: Vec<Quat>,

    /// Index into the simulation's profile table.
    pub profile: Vec<ProfileId>,

    /// Physics layer the agent is indexed under.
    pub layer: Vec<Layer>,

    /// `false` once the agent has been despawned.
    pub alive: Vec<bool>,

    /// Direction (±1) this agent swerves when avoiding; drawn once at spawn
    /// so colliding agents break symmetry consistently.
    pub avoid_sign: Vec<f32>,

    /// Simulation time (seconds) at which the agent spawned.
    pub spawned_at: Vec<f32>,

    live: usize,
}

impl AgentStore {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            count:      0,
            position:   Vec::with_capacity(n),
            rotation:   Vec::with_capacity(n),
            profile:    Vec::with_capacity(n),
            layer:      Vec::with_capacity(n),
            alive:      Vec::with_capacity(n),
            avoid_sign: Vec::with_capacity(n),
            spawned_at: Vec::with_capacity(n),
            live:       0,
        }
    }

    /// `true` if there are no agent slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of agents that have not been despawned.
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// `true` if `agent` exists and is alive.
    #[inline]
    pub fn is_alive(&self, agent: AgentId) -> bool {
        self.alive.get(agent.index()).copied().unwrap_or(false)
    }

    /// Iterator over all `AgentId`s (live and dead) in ascending order.
    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.count as u32).map(AgentId)
    }

    /// Iterator over live `AgentId`s in ascending order.
    pub fn live_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.agent_ids().filter(|a| self.alive[a.index()])
    }

    /// World-space forward vector of `agent`.
    #[inline]
    pub fn forward(&self, agent: AgentId) -> Vec3 {
        forward(self.rotation[agent.index()])
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Append a new agent and seed its RNG.  Returns the new id.
    pub fn spawn(&mut self, rngs: &mut AgentRngs, spec: AgentSpec, now: f32) -> AgentId {
        let id = AgentId(self.count as u32);
        rngs.push(id);
        let sign = rngs.get_mut(id).sign();

        self.position.push(spec.position);
        self.rotation.push(spec.rotation.normalize());
        self.profile.push(spec.profile);
        self.layer.push(spec.layer);
        self.alive.push(true);
        self.avoid_sign.push(sign);
        self.spawned_at.push(now);

        self.count += 1;
        self.live += 1;
        debug!("spawned {id} at {} with {}", spec.position, spec.profile);
        id
    }

    /// Mark `agent` dead.  Returns `false` if it was unknown or already dead.
    pub fn despawn(&mut self, agent: AgentId) -> bool {
        match self.alive.get_mut(agent.index()) {
            Some(alive) if *alive => {
                *alive = false;
                self.live -= 1;
                debug!("despawned {agent}");
                true
            }
            _ => false,
        }
    }
}
