//! Unit tests for steer-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, Body, ObstacleId, ProfileId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(ProfileId::INVALID.0, u16::MAX);
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn profile_id_rejects_overflow() {
        assert!(ProfileId::try_from(70_000usize).is_err());
    }

    #[test]
    fn body_agent_accessor() {
        assert_eq!(Body::Agent(AgentId(3)).agent(), Some(AgentId(3)));
        assert_eq!(Body::Obstacle(ObstacleId(3)).agent(), None);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(Body::Obstacle(ObstacleId(2)).to_string(), "ObstacleId(2)");
    }
}

#[cfg(test)]
mod layer {
    use crate::{Layer, LayerMask};

    #[test]
    fn mask_membership() {
        let mask = LayerMask::of(&[Layer(0), Layer(3)]);
        assert_eq!(mask, LayerMask(0b1001));
        assert!(mask.contains(Layer(3)));
        assert!(!mask.contains(Layer(1)));
    }

    #[test]
    fn out_of_range_layer_is_never_matched() {
        assert_eq!(Layer(40).mask(), LayerMask::NONE);
        assert!(!LayerMask::ALL.contains(Layer(40)));
    }

    #[test]
    fn empty_mask() {
        assert!(LayerMask::NONE.is_empty());
        assert!(!LayerMask::ALL.is_empty());
    }
}

#[cfg(test)]
mod math {
    use std::f32::consts::{FRAC_PI_2, PI};

    use crate::math::{
        angle_between, clamp01, flatten, forward, look_rotation, rotate_in_plane, rotate_towards,
    };
    use crate::{Quat, Vec3};

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn clamp01_bounds() {
        assert_eq!(clamp01(-2.0), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(7.0), 1.0);
        assert_eq!(clamp01(f32::NAN), 0.0);
    }

    #[test]
    fn identity_faces_plus_x() {
        assert!(close(forward(Quat::IDENTITY), Vec3::X));
    }

    #[test]
    fn planar_look_is_pure_yaw() {
        let q = look_rotation(Vec3::new(0.0, 3.0, 5.0), true).unwrap();
        assert!(close(forward(q), Vec3::Y));
        assert!(close(q * Vec3::Z, Vec3::Z));
    }

    #[test]
    fn look_at_zero_is_none() {
        assert!(look_rotation(Vec3::ZERO, false).is_none());
        assert!(look_rotation(Vec3::new(0.0, 0.0, 2.0), true).is_none());
    }

    #[test]
    fn spatial_look_faces_direction() {
        let q = look_rotation(Vec3::new(0.0, 0.0, -4.0), false).unwrap();
        assert!(close(forward(q), Vec3::NEG_Z));
    }

    #[test]
    fn rotate_in_plane_quarter_turn() {
        assert!(close(rotate_in_plane(Vec3::X, 90.0), Vec3::Y));
        assert!(close(rotate_in_plane(Vec3::X, -90.0), Vec3::NEG_Y));
    }

    #[test]
    fn flatten_drops_z() {
        assert_eq!(flatten(Vec3::new(1.0, 2.0, 3.0)), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn rotate_towards_is_bounded() {
        let from = Quat::IDENTITY;
        let to = Quat::from_rotation_z(PI * 0.75);
        let step = rotate_towards(from, to, 0.1);
        assert!((angle_between(from, step) - 0.1).abs() < 1e-4);
    }

    #[test]
    fn rotate_towards_snaps_when_within_reach() {
        let from = Quat::IDENTITY;
        let to = Quat::from_rotation_z(0.05);
        assert_eq!(rotate_towards(from, to, FRAC_PI_2), to);
    }

    #[test]
    fn rotate_towards_zero_budget_is_noop() {
        let from = Quat::from_rotation_z(1.0);
        assert_eq!(rotate_towards(from, Quat::IDENTITY, 0.0), from);
    }
}

#[cfg(test)]
mod time {
    use crate::{Clock, SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
    }

    #[test]
    fn clock_elapsed_is_tick_times_dt() {
        let mut clock = SimClock::new(0.25);
        assert_eq!(clock.elapsed_secs(), 0.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_secs(), 0.5);
        assert_eq!(clock.delta_secs(), 0.25);
    }

    #[test]
    fn ticks_for_secs_rounds_up() {
        let clock = SimClock::new(0.1);
        assert_eq!(clock.ticks_for_secs(0.25), 3);
        assert_eq!(SimClock::new(0.0).ticks_for_secs(1.0), 0);
    }

    #[test]
    fn sim_config_validation() {
        let mut cfg = SimConfig {
            dt_secs:               1.0 / 60.0,
            total_ticks:           600,
            seed:                  42,
            num_threads:           None,
            output_interval_ticks: 60,
        };
        assert_eq!(cfg.end_tick(), Tick(600));
        assert!(cfg.validate().is_ok());
        cfg.dt_secs = 0.0;
        assert!(cfg.validate().is_err());
        cfg.dt_secs = f32::NAN;
        assert!(cfg.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            let a: f32 = r1.random();
            let b: f32 = r2.random();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        let a: u64 = r0.random();
        let b: u64 = r1.random();
        assert_ne!(a, b, "seeds for adjacent agents should diverge");
    }

    #[test]
    fn sign_is_unit() {
        let mut rng = AgentRng::new(9, AgentId(4));
        for _ in 0..100 {
            let s = rng.sign();
            assert!(s == 1.0 || s == -1.0);
        }
    }

    #[test]
    fn sim_rng_range() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let v = rng.gen_range(-1.0f32..1.0);
            assert!((-1.0..1.0).contains(&v));
        }
    }
}
