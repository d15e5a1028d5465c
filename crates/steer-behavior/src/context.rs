//! Per-tick inputs shared by every agent's steering call.

use steer_core::{Clock, Vec3};

/// Time step and scene anchors for one tick.
///
/// Built once per tick by steer-sim and shared immutably across all agents.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SteerContext {
    /// Seconds since the start of the run.
    pub now: f32,

    /// Step duration in seconds.
    pub dt: f32,

    /// Centre of the free space agents are contained to.  `None` disables
    /// containment for everyone.
    pub origin: Option<Vec3>,

    /// Scene target that profiles may avoid or seek
    /// (see [`TargetResponse`][crate::TargetResponse]).
    pub target: Option<Vec3>,
}

impl SteerContext {
    pub fn new(now: f32, dt: f32) -> Self {
        Self { now, dt, origin: None, target: None }
    }

    /// Read `now` and `dt` from any [`Clock`].
    pub fn from_clock<C: Clock + ?Sized>(clock: &C) -> Self {
        Self::new(clock.elapsed_secs(), clock.delta_secs())
    }

    pub fn with_origin(mut self, origin: Option<Vec3>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_target(mut self, target: Option<Vec3>) -> Self {
        self.target = target;
        self
    }
}
