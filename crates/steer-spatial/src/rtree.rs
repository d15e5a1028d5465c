//! R-tree index backed by `rstar`.
//!
//! The tree is bulk-loaded from scratch on every [`rebuild`][SpatialIndex::rebuild]:
//! O(N log N), and faster than incremental updates when every agent moves
//! every tick.  Queries walk only the nodes whose bounding boxes intersect
//! the query sphere.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use steer_core::{LayerMask, Vec3};

use crate::query::{check_entries, radius_ok};
use crate::{BodyEntry, Hit, SpatialIndex, SpatialQuery, SpatialResult};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the tree: a 3-D point plus the full body record.
#[derive(Clone, Debug)]
struct TreeEntry {
    point: [f32; 3],
    entry: BodyEntry,
}

impl RTreeObject for TreeEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for TreeEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── RTreeIndex ────────────────────────────────────────────────────────────────

/// Spatial index for medium and large populations.
#[derive(Default)]
pub struct RTreeIndex {
    tree: RTree<TreeEntry>,
}

impl RTreeIndex {
    pub fn new() -> Self {
        Self { tree: RTree::new() }
    }

    /// Build directly from a set of entries.
    pub fn from_entries(entries: Vec<BodyEntry>) -> SpatialResult<Self> {
        let mut index = Self::new();
        index.rebuild(entries)?;
        Ok(index)
    }

    /// The body nearest to `point` on any layer in `mask`, if one exists.
    pub fn nearest(&self, point: Vec3, mask: LayerMask) -> Option<Hit> {
        self.tree
            .nearest_neighbor_iter(&point.to_array())
            .find(|t| mask.contains(t.entry.layer))
            .map(|t| Hit::from(&t.entry))
    }
}

impl SpatialQuery for RTreeIndex {
    fn query_into(&self, center: Vec3, radius: f32, mask: LayerMask, out: &mut Vec<Hit>) {
        if !radius_ok(radius) || mask.is_empty() {
            return;
        }
        out.extend(
            self.tree
                .locate_within_distance(center.to_array(), radius * radius)
                .filter(|t| mask.contains(t.entry.layer))
                .map(|t| Hit::from(&t.entry)),
        );
    }
}

impl SpatialIndex for RTreeIndex {
    fn rebuild(&mut self, entries: Vec<BodyEntry>) -> SpatialResult<()> {
        check_entries(&entries)?;
        let items: Vec<TreeEntry> = entries
            .into_iter()
            .map(|entry| TreeEntry { point: entry.position.to_array(), entry })
            .collect();
        self.tree = RTree::bulk_load(items);
        Ok(())
    }

    fn len(&self) -> usize {
        self.tree.size()
    }
}
