//! The individual sub-behaviours.
//!
//! Every function here is pure apart from the RNG draws in
//! [`jitter`] and [`angled`].  None of them fail: empty inputs, zero
//! directions, and absent anchors produce `Vec3::ZERO`.

use steer_core::math::{clamp01, rotate_in_plane};
use steer_core::{AgentRng, Vec3};

use crate::{AvoidanceFalloff, NeighborSet, SteeringWeights};

/// Squared distances below this are treated as this for separation.
pub const MIN_SEPARATION_SQ: f32 = 1e-4;

/// Range of the random scale applied to the avoidance jitter angle.
pub const ANGLE_JITTER: std::ops::RangeInclusive<f32> = 0.8..=1.2;

/// Step toward the target while farther than `target_range`.
pub const KEEP_RANGE_APPROACH: f32 = 0.1;

// ── Flocking ──────────────────────────────────────────────────────────────────

/// Mean of the neighbours' forward vectors.
pub fn alignment(neighbors: &NeighborSet) -> Vec3 {
    if neighbors.is_empty() {
        return Vec3::ZERO;
    }
    let sum: Vec3 = neighbors.iter().map(|n| n.forward).sum();
    sum / neighbors.len() as f32
}

/// Vector from `position` to the neighbours' centroid.
pub fn cohesion(position: Vec3, neighbors: &NeighborSet) -> Vec3 {
    if neighbors.is_empty() {
        return Vec3::ZERO;
    }
    let sum: Vec3 = neighbors.iter().map(|n| n.position).sum();
    sum / neighbors.len() as f32 - position
}

/// Inverse-square push away from neighbours strictly inside `radius`.
pub fn separation(position: Vec3, neighbors: &NeighborSet, radius: f32) -> Vec3 {
    let mut push = Vec3::ZERO;
    for n in neighbors {
        let offset = n.position - position;
        let dist_sq = offset.length_squared();
        if dist_sq < radius * radius {
            push -= offset / dist_sq.max(MIN_SEPARATION_SQ);
        }
    }
    push
}

/// Weighted sum of alignment, cohesion and separation.
pub fn flock(position: Vec3, neighbors: &NeighborSet, w: &SteeringWeights) -> Vec3 {
    alignment(neighbors) * w.alignment_weight
        + cohesion(position, neighbors) * w.cohesion_weight
        + separation(position, neighbors, w.separation_radius) * w.separation_weight
}

// ── Obstacles and attractors ──────────────────────────────────────────────────

/// Push away from every hit inside `radius`, scaled by `falloff`.
pub fn avoidance<I>(
    position: Vec3,
    hits:     I,
    radius:   f32,
    weight:   f32,
    falloff:  AvoidanceFalloff,
) -> Vec3
where
    I: IntoIterator<Item = Vec3>,
{
    let mut push = Vec3::ZERO;
    for hit in hits {
        let offset = hit - position;
        let dist = offset.length();
        if dist > radius {
            continue;
        }
        if let Some(dir) = offset.try_normalize() {
            push -= dir * falloff.weight(dist, radius, weight);
        }
    }
    push
}

/// Pull toward every hit inside `radius`, stronger when closer.
pub fn attraction<I>(position: Vec3, hits: I, radius: f32, weight: f32) -> Vec3
where
    I: IntoIterator<Item = Vec3>,
{
    let mut pull = Vec3::ZERO;
    for hit in hits {
        let offset = hit - position;
        let dist = offset.length();
        if dist > radius {
            continue;
        }
        if let Some(dir) = offset.try_normalize() {
            pull += dir * clamp01((radius - dist) / radius) * weight;
        }
    }
    pull
}

/// Hold `range` from `target`: back off proportionally when inside it,
/// creep in at a fixed rate when outside.
pub fn keep_range(position: Vec3, target: Vec3, range: f32) -> Vec3 {
    let offset = target - position;
    let Some(dir) = offset.try_normalize() else {
        return Vec3::ZERO;
    };
    let scale = offset.length() - range;
    dir * if scale > 0.0 { KEEP_RANGE_APPROACH } else { scale }
}

/// Pull back toward `origin` once farther than `free_radius`.
///
/// The pull grows linearly from 0 at `free_radius` to `bounce_weight` at
/// twice that distance.
pub fn containment(position: Vec3, origin: Option<Vec3>, free_radius: f32, bounce_weight: f32) -> Vec3 {
    let Some(origin) = origin else {
        return Vec3::ZERO;
    };
    let offset = origin - position;
    let dist = offset.length();
    if dist <= free_radius {
        return Vec3::ZERO;
    }
    offset.normalize_or_zero() * clamp01((dist - free_radius) / free_radius) * bounce_weight
}

// ── Randomness ────────────────────────────────────────────────────────────────

/// Random in-plane unit direction scaled by `random_factor`.
///
/// Always draws two values so the agent's RNG stream does not depend on
/// the factor.
pub fn jitter(rng: &mut AgentRng, random_factor: f32) -> Vec3 {
    let x = rng.gen_range(-1.0f32..=1.0);
    let y = rng.gen_range(-1.0f32..=1.0);
    Vec3::new(x, y, 0.0).normalize_or_zero() * random_factor
}

/// `inertia * forward + jitter`.
pub fn inertia_jitter(forward: Vec3, w: &SteeringWeights, rng: &mut AgentRng) -> Vec3 {
    forward * w.inertia + jitter(rng, w.random_factor)
}

/// Rotate `v` in the plane by `angle_deg * U(0.8, 1.2) * sign`.
///
/// No draw happens for a zero angle or a zero vector.
pub fn angled(v: Vec3, angle_deg: f32, sign: f32, rng: &mut AgentRng) -> Vec3 {
    if angle_deg == 0.0 || v == Vec3::ZERO {
        return v;
    }
    rotate_in_plane(v, angle_deg * rng.gen_range(ANGLE_JITTER) * sign)
}
