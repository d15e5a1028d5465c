//! Interval-refreshed neighbourhood caches.
//!
//! Spatial queries are the expensive part of steering, so each agent keeps
//! the results of its last query and re-queries only every
//! `refresh_interval` seconds.  Between refreshes the composer reads the
//! cached neighbour poses and hit positions as they were at refresh time.

use log::trace;

use steer_core::{AgentId, Body, Vec3};
use steer_spatial::{Hit, SpatialQuery};

use crate::SteeringProfile;

// ── NeighborSet ───────────────────────────────────────────────────────────────

/// One cached neighbour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Neighbor {
    pub id:       AgentId,
    pub position: Vec3,
    pub forward:  Vec3,
}

/// Nearby agents used for flocking.  Never contains the owning agent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NeighborSet {
    neighbors: Vec<Neighbor>,
}

impl NeighborSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the agent hits of `hits`, skipping `owner` and obstacles.
    pub fn from_hits(owner: Body, hits: &[Hit]) -> Self {
        let mut set = NeighborSet::new();
        set.fill(owner, hits);
        set
    }

    fn fill(&mut self, owner: Body, hits: &[Hit]) {
        self.neighbors.clear();
        self.neighbors.extend(hits.iter().filter(|h| h.body != owner).filter_map(|h| {
            h.body.agent().map(|id| Neighbor { id, position: h.position, forward: h.forward })
        }));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Neighbor] {
        &self.neighbors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Neighbor> {
        self.neighbors.iter()
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.neighbors.iter().any(|n| n.id == id)
    }
}

impl FromIterator<Neighbor> for NeighborSet {
    fn from_iter<T: IntoIterator<Item = Neighbor>>(iter: T) -> Self {
        NeighborSet { neighbors: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a NeighborSet {
    type Item = &'a Neighbor;
    type IntoIter = std::slice::Iter<'a, Neighbor>;

    fn into_iter(self) -> Self::IntoIter {
        self.neighbors.iter()
    }
}

// ── NeighborCache ─────────────────────────────────────────────────────────────

/// Everything one agent learned from its last round of spatial queries.
///
/// Queries are issued only for enabled behaviours; the caches of disabled
/// behaviours stay empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NeighborCache {
    pub neighbors: NeighborSet,
    /// Positions of bodies on the avoid layers within `avoid_radius`.
    pub avoid:     Vec<Vec3>,
    /// Positions of bodies on the attract layers within `attract_radius`.
    pub attract:   Vec<Vec3>,
    /// Simulation time (seconds) at which the next refresh is due.
    pub next_refresh: f32,
    scratch: Vec<Hit>,
}

impl NeighborCache {
    /// An empty cache that becomes due at `first_refresh`.
    pub fn new(first_refresh: f32) -> Self {
        NeighborCache { next_refresh: first_refresh, ..Self::default() }
    }

    #[inline]
    pub fn is_due(&self, now: f32) -> bool {
        now >= self.next_refresh
    }

    /// Refresh if due.  Returns `true` if a refresh happened.
    pub fn refresh_if_due<Q: SpatialQuery + ?Sized>(
        &mut self,
        owner:    Body,
        position: Vec3,
        profile:  &SteeringProfile,
        query:    &Q,
        now:      f32,
    ) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.refresh(owner, position, profile, query, now);
        true
    }

    /// Rebuild every cache from scratch and schedule the next refresh.
    pub fn refresh<Q: SpatialQuery + ?Sized>(
        &mut self,
        owner:    Body,
        position: Vec3,
        profile:  &SteeringProfile,
        query:    &Q,
        now:      f32,
    ) {
        let w = &profile.weights;
        let mut hits = std::mem::take(&mut self.scratch);

        hits.clear();
        if profile.flags.flocking {
            query.query_into(position, w.neighbor_radius, profile.neighbor_layers, &mut hits);
        }
        self.neighbors.fill(owner, &hits);

        hits.clear();
        if profile.flags.avoidance {
            query.query_into(position, w.avoid_radius, profile.avoid_layers, &mut hits);
        }
        positions_into(owner, &hits, &mut self.avoid);

        hits.clear();
        if profile.flags.attraction {
            query.query_into(position, w.attract_radius, profile.attract_layers, &mut hits);
        }
        positions_into(owner, &hits, &mut self.attract);

        hits.clear();
        self.scratch = hits;
        self.next_refresh = now + profile.refresh_interval;

        trace!(
            "{owner} refreshed at {now:.3}s: {} neighbours, {} avoid, {} attract",
            self.neighbors.len(),
            self.avoid.len(),
            self.attract.len(),
        );
    }
}

fn positions_into(owner: Body, hits: &[Hit], out: &mut Vec<Vec3>) {
    out.clear();
    out.extend(hits.iter().filter(|h| h.body != owner).map(|h| h.position));
}
