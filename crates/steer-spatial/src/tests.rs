//! Unit tests for steer-spatial.
//!
//! Every test runs against both index implementations.

#[cfg(test)]
mod helpers {
    use steer_core::{AgentId, Body, Layer, ObstacleId, Vec3};

    use crate::BodyEntry;

    pub const AGENTS: Layer = Layer(0);
    pub const WALLS: Layer = Layer(1);

    pub fn agent(i: u32, x: f32, y: f32) -> BodyEntry {
        BodyEntry {
            body:     Body::Agent(AgentId(i)),
            position: Vec3::new(x, y, 0.0),
            forward:  Vec3::X,
            layer:    AGENTS,
        }
    }

    pub fn wall(i: u32, x: f32, y: f32) -> BodyEntry {
        BodyEntry {
            body:     Body::Obstacle(ObstacleId(i)),
            position: Vec3::new(x, y, 0.0),
            forward:  Vec3::ZERO,
            layer:    WALLS,
        }
    }

    /// Five agents on the x axis at 0, 1, 2, 3, 10 and one wall at (0, 2).
    pub fn scene() -> Vec<BodyEntry> {
        vec![
            agent(0, 0.0, 0.0),
            agent(1, 1.0, 0.0),
            agent(2, 2.0, 0.0),
            agent(3, 3.0, 0.0),
            agent(4, 10.0, 0.0),
            wall(0, 0.0, 2.0),
        ]
    }

    pub fn sorted_bodies(hits: &[crate::Hit]) -> Vec<Body> {
        let mut b: Vec<Body> = hits.iter().map(|h| h.body).collect();
        b.sort();
        b
    }
}

#[cfg(test)]
mod query_tests {
    use steer_core::{AgentId, Body, LayerMask, ObstacleId, Vec3};

    use super::helpers::*;
    use crate::{LinearIndex, RTreeIndex, SpatialIndex, SpatialQuery};

    fn indexes() -> Vec<Box<dyn SpatialIndex>> {
        vec![
            Box::new(LinearIndex::from_entries(scene()).unwrap()),
            Box::new(RTreeIndex::from_entries(scene()).unwrap()),
        ]
    }

    #[test]
    fn radius_is_inclusive() {
        for idx in indexes() {
            let hits = idx.query(Vec3::ZERO, 2.0, AGENTS.mask());
            assert_eq!(
                sorted_bodies(&hits),
                vec![Body::Agent(AgentId(0)), Body::Agent(AgentId(1)), Body::Agent(AgentId(2))]
            );
        }
    }

    #[test]
    fn querying_body_is_not_excluded() {
        for idx in indexes() {
            let hits = idx.query(Vec3::new(10.0, 0.0, 0.0), 0.5, LayerMask::ALL);
            assert_eq!(sorted_bodies(&hits), vec![Body::Agent(AgentId(4))]);
        }
    }

    #[test]
    fn layer_filter_applies() {
        for idx in indexes() {
            let walls = idx.query(Vec3::ZERO, 5.0, WALLS.mask());
            assert_eq!(sorted_bodies(&walls), vec![Body::Obstacle(ObstacleId(0))]);

            let both = idx.query(Vec3::ZERO, 2.0, AGENTS.mask() | WALLS.mask());
            assert_eq!(both.len(), 4);
        }
    }

    #[test]
    fn empty_mask_or_bad_radius_matches_nothing() {
        for idx in indexes() {
            assert!(idx.query(Vec3::ZERO, 100.0, LayerMask::NONE).is_empty());
            assert!(idx.query(Vec3::ZERO, -1.0, LayerMask::ALL).is_empty());
            assert!(idx.query(Vec3::ZERO, f32::NAN, LayerMask::ALL).is_empty());
        }
    }

    #[test]
    fn hits_carry_position_and_heading() {
        for idx in indexes() {
            let hits = idx.query(Vec3::new(1.0, 0.0, 0.0), 0.1, AGENTS.mask());
            assert_eq!(hits.len(), 1);
            assert_eq!(hits[0].position, Vec3::new(1.0, 0.0, 0.0));
            assert_eq!(hits[0].forward, Vec3::X);
        }
    }

    #[test]
    fn query_into_appends() {
        let idx = LinearIndex::from_entries(scene()).unwrap();
        let mut out = Vec::new();
        idx.query_into(Vec3::ZERO, 0.5, AGENTS.mask(), &mut out);
        idx.query_into(Vec3::new(3.0, 0.0, 0.0), 0.5, AGENTS.mask(), &mut out);
        assert_eq!(out.len(), 2);
    }
}

#[cfg(test)]
mod rebuild_tests {
    use steer_core::{LayerMask, Vec3};

    use super::helpers::*;
    use crate::{LinearIndex, RTreeIndex, SpatialError, SpatialIndex, SpatialQuery};

    #[test]
    fn rebuild_replaces_contents() {
        let mut idx = RTreeIndex::from_entries(scene()).unwrap();
        assert_eq!(idx.len(), 6);
        idx.rebuild(vec![agent(9, 50.0, 50.0)]).unwrap();
        assert_eq!(idx.len(), 1);
        assert!(idx.query(Vec3::ZERO, 5.0, LayerMask::ALL).is_empty());
    }

    #[test]
    fn non_finite_position_rejected_and_contents_kept() {
        let mut idx = LinearIndex::from_entries(scene()).unwrap();
        let bad = agent(7, f32::INFINITY, 0.0);
        let err = idx.rebuild(vec![agent(8, 0.0, 0.0), bad]).unwrap_err();
        assert!(matches!(err, SpatialError::NonFinitePosition(_)));
        assert_eq!(idx.len(), 6);
    }

    #[test]
    fn empty_index() {
        let idx = RTreeIndex::new();
        assert!(idx.is_empty());
        assert!(idx.query(Vec3::ZERO, 10.0, LayerMask::ALL).is_empty());
        assert!(idx.nearest(Vec3::ZERO, LayerMask::ALL).is_none());
    }

    #[test]
    fn nearest_respects_mask() {
        let idx = RTreeIndex::from_entries(scene()).unwrap();
        let hit = idx.nearest(Vec3::new(0.0, 1.9, 0.0), AGENTS.mask()).unwrap();
        assert_eq!(hit.position, Vec3::ZERO);
        let wall_hit = idx.nearest(Vec3::new(9.0, 0.0, 0.0), WALLS.mask()).unwrap();
        assert_eq!(wall_hit.position, Vec3::new(0.0, 2.0, 0.0));
    }
}
