//! Unit tests for steer-agent.

#[cfg(test)]
mod builder {
    use steer_core::{AgentId, Layer, ProfileId, Quat, Vec3};

    use crate::{AgentSpec, AgentStoreBuilder};

    #[test]
    fn build_empty() {
        let (store, rngs) = AgentStoreBuilder::new(0).build();
        assert!(store.is_empty());
        assert!(rngs.is_empty());
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn build_preserves_order_and_fields() {
        let a = AgentSpec::at(Vec3::new(1.0, 2.0, 0.0), ProfileId(0));
        let b = AgentSpec::at(Vec3::new(-4.0, 0.5, 0.0), ProfileId(1))
            .facing(Quat::from_rotation_z(1.0))
            .on_layer(Layer(3));
        let (store, rngs) = AgentStoreBuilder::new(7).agent(a).agent(b).build();

        assert_eq!(store.count, 2);
        assert_eq!(rngs.len(), 2);
        assert_eq!(store.position[0], Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(store.profile[1], ProfileId(1));
        assert_eq!(store.layer[1], Layer(3));
        assert_eq!(store.live_ids().collect::<Vec<_>>(), vec![AgentId(0), AgentId(1)]);
    }

    #[test]
    fn all_arrays_same_length() {
        let specs = (0..25).map(|i| AgentSpec::at(Vec3::splat(i as f32), ProfileId(0)));
        let (store, _rngs) = AgentStoreBuilder::new(1).with_capacity(25).agents(specs).build();
        let n = store.count;
        assert_eq!(store.position.len(), n);
        assert_eq!(store.rotation.len(), n);
        assert_eq!(store.profile.len(), n);
        assert_eq!(store.layer.len(), n);
        assert_eq!(store.alive.len(), n);
        assert_eq!(store.avoid_sign.len(), n);
        assert_eq!(store.spawned_at.len(), n);
    }

    #[test]
    fn avoid_signs_are_unit_and_deterministic() {
        let specs = || (0..16).map(|_| AgentSpec::at(Vec3::ZERO, ProfileId(0)));
        let (s1, _) = AgentStoreBuilder::new(99).agents(specs()).build();
        let (s2, _) = AgentStoreBuilder::new(99).agents(specs()).build();
        assert_eq!(s1.avoid_sign, s2.avoid_sign);
        assert!(s1.avoid_sign.iter().all(|&s| s == 1.0 || s == -1.0));
    }
}

#[cfg(test)]
mod lifecycle {
    use steer_core::{AgentId, ProfileId, Quat, Vec3};

    use crate::{AgentSpec, AgentStoreBuilder};

    #[test]
    fn spawn_appends_with_next_id() {
        let (mut store, mut rngs) = AgentStoreBuilder::new(3)
            .agent(AgentSpec::at(Vec3::ZERO, ProfileId(0)))
            .build();
        let id = store.spawn(&mut rngs, AgentSpec::at(Vec3::X, ProfileId(0)), 4.5);
        assert_eq!(id, AgentId(1));
        assert_eq!(store.spawned_at[1], 4.5);
        assert_eq!(rngs.len(), 2);
        assert_eq!(store.live_count(), 2);
    }

    #[test]
    fn despawn_flags_slot_and_keeps_pose() {
        let (mut store, _rngs) = AgentStoreBuilder::new(3)
            .agent(AgentSpec::at(Vec3::new(5.0, 5.0, 0.0), ProfileId(0)))
            .agent(AgentSpec::at(Vec3::ZERO, ProfileId(0)))
            .build();
        assert!(store.despawn(AgentId(0)));
        assert!(!store.is_alive(AgentId(0)));
        assert_eq!(store.position[0], Vec3::new(5.0, 5.0, 0.0));
        assert_eq!(store.live_count(), 1);
        assert_eq!(store.count, 2);
        assert_eq!(store.live_ids().collect::<Vec<_>>(), vec![AgentId(1)]);
    }

    #[test]
    fn despawn_twice_or_unknown_is_rejected() {
        let (mut store, _rngs) = AgentStoreBuilder::new(3)
            .agent(AgentSpec::at(Vec3::ZERO, ProfileId(0)))
            .build();
        assert!(store.despawn(AgentId(0)));
        assert!(!store.despawn(AgentId(0)));
        assert!(!store.despawn(AgentId(12)));
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn forward_follows_rotation() {
        let (store, _rngs) = AgentStoreBuilder::new(3)
            .agent(
                AgentSpec::at(Vec3::ZERO, ProfileId(0))
                    .facing(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2)),
            )
            .build();
        assert!((store.forward(AgentId(0)) - Vec3::Y).length() < 1e-6);
    }
}
