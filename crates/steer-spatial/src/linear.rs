//! Brute-force index: O(n) per query, zero build cost.

use steer_core::{LayerMask, Vec3};

use crate::query::{check_entries, radius_ok};
use crate::{BodyEntry, Hit, SpatialIndex, SpatialQuery, SpatialResult};

/// Scans every entry on each query.  Beats the R-tree below a few dozen
/// bodies and serves as the reference implementation in tests.
#[derive(Default, Clone, Debug)]
pub struct LinearIndex {
    entries: Vec<BodyEntry>,
}

impl LinearIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build directly from a set of entries.
    pub fn from_entries(entries: Vec<BodyEntry>) -> SpatialResult<Self> {
        let mut index = Self::new();
        index.rebuild(entries)?;
        Ok(index)
    }
}

impl SpatialQuery for LinearIndex {
    fn query_into(&self, center: Vec3, radius: f32, mask: LayerMask, out: &mut Vec<Hit>) {
        if !radius_ok(radius) || mask.is_empty() {
            return;
        }
        let r2 = radius * radius;
        out.extend(
            self.entries
                .iter()
                .filter(|e| mask.contains(e.layer) && e.position.distance_squared(center) <= r2)
                .map(Hit::from),
        );
    }
}

impl SpatialIndex for LinearIndex {
    fn rebuild(&mut self, entries: Vec<BodyEntry>) -> SpatialResult<()> {
        check_entries(&entries)?;
        self.entries = entries;
        Ok(())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
