//! Vector and rotation helpers on top of `glam`.
//!
//! Conventions used throughout the framework:
//!
//! - An agent's **forward** direction is its rotation applied to `+X`.
//! - The simulation plane for 2D movement is `XY`; its normal is `+Z`.
//! - Angles crossing API boundaries are in **degrees**, matching how
//!   designers author turn rates and jitter angles.

pub use glam::{Quat, Vec3};

/// Local forward axis of every agent.
pub const FORWARD: Vec3 = Vec3::X;

/// Normal of the 2D simulation plane.
pub const PLANE_NORMAL: Vec3 = Vec3::Z;

/// Clamp `v` into `[0, 1]`.  NaN maps to 0.
#[inline]
pub fn clamp01(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}

/// World-space forward vector for `rotation`.
#[inline]
pub fn forward(rotation: Quat) -> Vec3 {
    rotation * FORWARD
}

/// Drop the component along the plane normal.
#[inline]
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, v.y, 0.0)
}

/// Rotate `v` about the plane normal by `degrees` (counter-clockwise).
#[inline]
pub fn rotate_in_plane(v: Vec3, degrees: f32) -> Vec3 {
    Quat::from_rotation_z(degrees.to_radians()) * v
}

/// Rotation whose forward axis points along `direction`.
///
/// In `planar` mode the result is a pure yaw about `+Z` (the out-of-plane
/// component of `direction` is ignored).  Returns `None` for a zero (or
/// planar-degenerate) direction: there is nothing to face.
pub fn look_rotation(direction: Vec3, planar: bool) -> Option<Quat> {
    if planar {
        let d = flatten(direction);
        if d == Vec3::ZERO {
            return None;
        }
        Some(Quat::from_rotation_z(d.y.atan2(d.x)))
    } else {
        let d = direction.try_normalize()?;
        Some(Quat::from_rotation_arc(FORWARD, d))
    }
}

/// Shortest-arc angle between two unit rotations, in radians.
#[inline]
pub fn angle_between(a: Quat, b: Quat) -> f32 {
    2.0 * a.dot(b).abs().min(1.0).acos()
}

/// Slew `from` toward `to` by at most `max_radians`.
///
/// Returns `to` when it is already within reach, `from` when the budget is
/// zero or negative.  Always travels the shortest arc.
pub fn rotate_towards(from: Quat, to: Quat, max_radians: f32) -> Quat {
    if max_radians <= 0.0 {
        return from;
    }
    let angle = angle_between(from, to);
    if angle <= max_radians {
        return to;
    }
    let mut delta = to * from.conjugate();
    if delta.w < 0.0 {
        delta = -delta;
    }
    let Some(axis) = Vec3::new(delta.x, delta.y, delta.z).try_normalize() else {
        return to;
    };
    (Quat::from_axis_angle(axis, max_radians) * from).normalize()
}
