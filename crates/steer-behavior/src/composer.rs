//! The steering composer: sums sub-behaviours into one step per tick.

use steer_core::math::{flatten, forward, look_rotation, rotate_towards};
use steer_core::{AgentRng, Quat, Vec3};

use crate::rules;
use crate::{NeighborCache, SteerContext, SteeringProfile, TargetResponse};

/// The parts of an agent the composer reads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AgentPose {
    pub position: Vec3,
    pub rotation: Quat,
    /// `±1`, drawn once at spawn; mirrors the avoidance jitter angle.
    pub avoid_sign: f32,
}

impl AgentPose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        AgentPose { position, rotation, avoid_sign: 1.0 }
    }

    pub fn with_avoid_sign(mut self, sign: f32) -> Self {
        self.avoid_sign = sign;
        self
    }
}

/// Each sub-behaviour's contribution for one tick.  Disabled behaviours
/// are `Vec3::ZERO`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SteeringTerms {
    pub flock:       Vec3,
    pub avoidance:   Vec3,
    pub attraction:  Vec3,
    pub containment: Vec3,
    pub target:      Vec3,
    pub inertia:     Vec3,
}

impl SteeringTerms {
    pub fn sum(&self) -> Vec3 {
        self.flock + self.avoidance + self.attraction + self.containment + self.target + self.inertia
    }
}

/// Result of one composition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SteeringOutput {
    /// Displacement for this tick: `move_speed * dt` long unless the sum
    /// was zero (or flattened to zero).
    pub movement: Vec3,
    pub position: Vec3,
    pub rotation: Quat,
}

/// Steers agents of one profile.
///
/// Cheap to construct; steer-sim builds one per agent per tick.
#[derive(Copy, Clone, Debug)]
pub struct SteeringComposer<'p> {
    profile: &'p SteeringProfile,
}

impl<'p> SteeringComposer<'p> {
    pub fn new(profile: &'p SteeringProfile) -> Self {
        SteeringComposer { profile }
    }

    #[inline]
    pub fn profile(&self) -> &'p SteeringProfile {
        self.profile
    }

    /// Evaluate every enabled sub-behaviour from the cached neighbourhood.
    ///
    /// RNG draws happen in a fixed order: the avoidance angle (only when
    /// avoidance is on, the angle non-zero and the avoidance sum non-zero),
    /// then the two jitter components.
    pub fn terms(
        &self,
        pose:  &AgentPose,
        cache: &NeighborCache,
        ctx:   &SteerContext,
        rng:   &mut AgentRng,
    ) -> SteeringTerms {
        let p = self.profile;
        let w = &p.weights;
        let pos = pose.position;
        let target = ctx.target.filter(|_| p.target != TargetResponse::Ignore);
        let mut terms = SteeringTerms::default();

        if p.flags.flocking {
            terms.flock = rules::flock(pos, &cache.neighbors, w);
        }

        if p.flags.avoidance {
            let extra = target.filter(|_| p.target == TargetResponse::Avoid);
            let hits = cache.avoid.iter().copied().chain(extra);
            let push = rules::avoidance(pos, hits, w.avoid_radius, w.avoid_weight, p.falloff);
            terms.avoidance = rules::angled(push, w.avoid_angle_deg, pose.avoid_sign, rng);
        }

        if p.flags.attraction {
            let extra = target.filter(|_| p.target == TargetResponse::Attract);
            let hits = cache.attract.iter().copied().chain(extra);
            terms.attraction = rules::attraction(pos, hits, w.attract_radius, w.attract_weight);
        }

        if p.flags.containment {
            terms.containment = rules::containment(pos, ctx.origin, w.free_radius, w.bounce_weight);
        }

        if let (Some(t), TargetResponse::KeepRange) = (target, p.target) {
            terms.target = rules::keep_range(pos, t, w.target_range);
        }

        terms.inertia = rules::inertia_jitter(forward(pose.rotation), w, rng);
        terms
    }

    /// Compose one tick of movement and rotation.
    pub fn compose(
        &self,
        pose:  &AgentPose,
        cache: &NeighborCache,
        ctx:   &SteerContext,
        rng:   &mut AgentRng,
    ) -> SteeringOutput {
        let terms = self.terms(pose, cache, ctx, rng);
        self.apply(pose, terms.sum(), ctx.dt)
    }

    /// Turn a raw steering sum into a step and a bounded rotation.
    pub fn apply(&self, pose: &AgentPose, direction: Vec3, dt: f32) -> SteeringOutput {
        let p = self.profile;
        let mut movement = direction.normalize_or_zero() * (p.move_speed * dt);
        if p.planar {
            movement = flatten(movement);
        }

        let rotation = match look_rotation(movement, p.planar) {
            Some(facing) if movement != Vec3::ZERO => {
                rotate_towards(pose.rotation, facing, p.turn_rate_deg.to_radians() * dt)
            }
            _ => pose.rotation,
        };

        SteeringOutput { movement, position: pose.position + movement, rotation }
    }
}
