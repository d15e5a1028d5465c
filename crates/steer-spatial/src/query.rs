//! The query seam between steering code and whatever indexes the world.

use steer_core::{Body, Layer, LayerMask, Vec3};

use crate::SpatialResult;

/// One body as stored in an index.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BodyEntry {
    pub body:     Body,
    pub position: Vec3,
    /// Unit forward vector.  Static obstacles use `Vec3::ZERO`.
    pub forward:  Vec3,
    pub layer:    Layer,
}

/// One query result.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hit {
    pub body:     Body,
    pub position: Vec3,
    pub forward:  Vec3,
}

impl From<&BodyEntry> for Hit {
    #[inline]
    fn from(e: &BodyEntry) -> Self {
        Hit { body: e.body, position: e.position, forward: e.forward }
    }
}

/// Radius query over a set of bodies.
///
/// Returns every body whose distance to `center` is `<= radius` and whose
/// layer is in `mask`.  Results carry no ordering guarantee and the querying
/// body is **not** excluded: callers filter themselves out.
pub trait SpatialQuery {
    fn query(&self, center: Vec3, radius: f32, mask: LayerMask) -> Vec<Hit> {
        let mut out = Vec::new();
        self.query_into(center, radius, mask, &mut out);
        out
    }

    /// Append results to `out` (not cleared) so callers can reuse buffers.
    fn query_into(&self, center: Vec3, radius: f32, mask: LayerMask, out: &mut Vec<Hit>);
}

/// A [`SpatialQuery`] that can be rebuilt from a fresh snapshot of bodies.
///
/// The simulation rebuilds its index once per tick, before any agent moves,
/// so every agent queries the same snapshot.
pub trait SpatialIndex: SpatialQuery + Send + Sync + 'static {
    /// Replace the indexed contents with `entries`.
    ///
    /// # Errors
    /// [`SpatialError::NonFinitePosition`][crate::SpatialError::NonFinitePosition]
    /// if any entry has a NaN or infinite coordinate.  The previous contents
    /// are kept in that case.
    fn rebuild(&mut self, entries: Vec<BodyEntry>) -> SpatialResult<()>;

    /// Number of indexed bodies.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Shared entry validation used by every index implementation.
pub(crate) fn check_entries(entries: &[BodyEntry]) -> SpatialResult<()> {
    match entries.iter().find(|e| !e.position.is_finite()) {
        Some(e) => Err(crate::SpatialError::NonFinitePosition(e.body)),
        None    => Ok(()),
    }
}

/// `true` if `radius` is usable for a query.  Invalid radii match nothing.
#[inline]
pub(crate) fn radius_ok(radius: f32) -> bool {
    radius.is_finite() && radius >= 0.0
}
