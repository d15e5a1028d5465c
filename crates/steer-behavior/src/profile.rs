//! Steering profiles: the tagged configuration shared by every agent of a
//! type.
//!
//! A profile is immutable once the simulation is built.  Every agent stores
//! a [`ProfileId`] into the simulation's [`ProfileTable`].

use std::fmt;
use std::str::FromStr;

use steer_core::math::clamp01;
use steer_core::{LayerMask, ProfileId};

use crate::{BehaviorError, BehaviorResult};

// ── AvoidanceFalloff ──────────────────────────────────────────────────────────

/// How an avoid hit's influence decays with distance.
///
/// Both variants start from the proximity `p = clamp01((r − d) / r)`:
///
/// | Variant       | Weight                               |
/// |---------------|--------------------------------------|
/// | `Linear`      | `p * w`                              |
/// | `Logarithmic` | `clamp(ln(p + 1) * w, 0, 1)`         |
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum AvoidanceFalloff {
    #[default]
    Linear,
    Logarithmic,
}

impl AvoidanceFalloff {
    /// Weight of one avoid hit at `distance` inside a radius of `radius`.
    pub fn weight(self, distance: f32, radius: f32, avoid_weight: f32) -> f32 {
        let proximity = clamp01((radius - distance) / radius);
        match self {
            AvoidanceFalloff::Linear => proximity * avoid_weight,
            AvoidanceFalloff::Logarithmic => {
                let w = (proximity + 1.0).ln() * avoid_weight;
                if w.is_nan() { 0.0 } else { w.clamp(0.0, 1.0) }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AvoidanceFalloff::Linear      => "linear",
            AvoidanceFalloff::Logarithmic => "log",
        }
    }
}

impl FromStr for AvoidanceFalloff {
    type Err = BehaviorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "linear"              => Ok(AvoidanceFalloff::Linear),
            "log" | "logarithmic" => Ok(AvoidanceFalloff::Logarithmic),
            other => Err(BehaviorError::Parse(format!(
                "invalid falloff {other:?}: expected \"linear\" or \"log\""
            ))),
        }
    }
}

impl fmt::Display for AvoidanceFalloff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TargetResponse ────────────────────────────────────────────────────────────

/// How agents of a profile react to the scene target, when one is set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum TargetResponse {
    /// The target is invisible to this profile.
    #[default]
    Ignore,
    /// The target counts as one more avoid hit (needs `avoidance`).
    Avoid,
    /// The target counts as one more attract hit (needs `attraction`).
    Attract,
    /// Back away while closer than `target_range`, drift in slowly otherwise.
    KeepRange,
}

impl TargetResponse {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetResponse::Ignore    => "ignore",
            TargetResponse::Avoid     => "avoid",
            TargetResponse::Attract   => "attract",
            TargetResponse::KeepRange => "keep_range",
        }
    }
}

impl FromStr for TargetResponse {
    type Err = BehaviorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "ignore" => Ok(TargetResponse::Ignore),
            "avoid"       => Ok(TargetResponse::Avoid),
            "attract"     => Ok(TargetResponse::Attract),
            "keep_range"  => Ok(TargetResponse::KeepRange),
            other => Err(BehaviorError::Parse(format!(
                "invalid target response {other:?}: expected \"ignore\", \"avoid\", \
                 \"attract\", or \"keep_range\""
            ))),
        }
    }
}

impl fmt::Display for TargetResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── BehaviorFlags ─────────────────────────────────────────────────────────────

/// Which sub-behaviours contribute to the steering sum.
///
/// Inertia and jitter are always on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BehaviorFlags {
    pub flocking:    bool,
    pub avoidance:   bool,
    pub attraction:  bool,
    pub containment: bool,
}

impl BehaviorFlags {
    pub const NONE: BehaviorFlags = BehaviorFlags {
        flocking:    false,
        avoidance:   false,
        attraction:  false,
        containment: false,
    };
}

impl Default for BehaviorFlags {
    /// Flocking, avoidance and containment on; attraction off.
    fn default() -> Self {
        BehaviorFlags { flocking: true, avoidance: true, attraction: false, containment: true }
    }
}

// ── SteeringWeights ───────────────────────────────────────────────────────────

/// Radii and scalar weights of every sub-behaviour.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SteeringWeights {
    pub neighbor_radius:   f32,
    /// Neighbours strictly closer than this push the agent away.
    pub separation_radius: f32,
    pub alignment_weight:  f32,
    pub cohesion_weight:   f32,
    pub separation_weight: f32,

    pub avoid_radius:    f32,
    pub avoid_weight:    f32,
    /// Jitter angle applied to the summed avoidance vector.  `0` disables it.
    pub avoid_angle_deg: f32,

    pub attract_radius: f32,
    pub attract_weight: f32,

    /// Distance from the space origin before containment pulls back.
    pub free_radius:   f32,
    pub bounce_weight: f32,

    /// Distance kept from the target under [`TargetResponse::KeepRange`].
    pub target_range: f32,

    pub inertia:       f32,
    pub random_factor: f32,
}

impl Default for SteeringWeights {
    fn default() -> Self {
        SteeringWeights {
            neighbor_radius:   3.0,
            separation_radius: 2.0,
            alignment_weight:  2.0,
            cohesion_weight:   0.5,
            separation_weight: 1.0,
            avoid_radius:      12.0,
            avoid_weight:      1.0,
            avoid_angle_deg:   0.0,
            attract_radius:    20.0,
            attract_weight:    1.0,
            free_radius:       20.0,
            bounce_weight:     10.0,
            target_range:      3.0,
            inertia:           1.0,
            random_factor:     0.1,
        }
    }
}

// ── SteeringProfile ───────────────────────────────────────────────────────────

/// Everything the composer needs to steer one type of agent.
#[derive(Clone, Debug, PartialEq)]
pub struct SteeringProfile {
    pub name:     String,
    pub flags:    BehaviorFlags,
    pub weights:  SteeringWeights,
    pub falloff:  AvoidanceFalloff,
    pub target:   TargetResponse,

    /// Distance per second.
    pub move_speed:       f32,
    /// Maximum turn rate in degrees per second.
    pub turn_rate_deg:    f32,
    /// Seconds between neighbour cache refreshes.
    pub refresh_interval: f32,

    pub neighbor_layers: LayerMask,
    pub avoid_layers:    LayerMask,
    pub attract_layers:  LayerMask,

    /// Keep movement in the XY plane and rotate only about `+Z`.
    pub planar: bool,

    /// Points awarded when an agent of this profile is defeated.
    pub score_value: u32,
}

impl SteeringProfile {
    /// A profile with default weights and the given name.
    pub fn named(name: impl Into<String>) -> Self {
        SteeringProfile { name: name.into(), ..Self::default() }
    }

    pub fn with_flags(mut self, flags: BehaviorFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_weights(mut self, weights: SteeringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_falloff(mut self, falloff: AvoidanceFalloff) -> Self {
        self.falloff = falloff;
        self
    }

    pub fn with_target(mut self, target: TargetResponse) -> Self {
        self.target = target;
        self
    }

    /// Reject configurations the composer cannot steer with.
    ///
    /// Radii only need to be positive when the behaviour that uses them is
    /// enabled; every number must be finite regardless.
    pub fn validate(&self) -> BehaviorResult<()> {
        let w = &self.weights;
        let numbers = [
            ("neighbor_radius",   w.neighbor_radius),
            ("separation_radius", w.separation_radius),
            ("alignment_weight",  w.alignment_weight),
            ("cohesion_weight",   w.cohesion_weight),
            ("separation_weight", w.separation_weight),
            ("avoid_radius",      w.avoid_radius),
            ("avoid_weight",      w.avoid_weight),
            ("avoid_angle_deg",   w.avoid_angle_deg),
            ("attract_radius",    w.attract_radius),
            ("attract_weight",    w.attract_weight),
            ("free_radius",       w.free_radius),
            ("bounce_weight",     w.bounce_weight),
            ("target_range",      w.target_range),
            ("inertia",           w.inertia),
            ("random_factor",     w.random_factor),
            ("move_speed",        self.move_speed),
            ("turn_rate_deg",     self.turn_rate_deg),
            ("refresh_interval",  self.refresh_interval),
        ];
        if let Some((field, v)) = numbers.iter().find(|(_, v)| !v.is_finite()) {
            return Err(self.invalid(format!("{field} must be finite, got {v}")));
        }

        let mut positive = vec![("refresh_interval", self.refresh_interval)];
        if self.flags.flocking {
            positive.push(("neighbor_radius", w.neighbor_radius));
        }
        if self.flags.avoidance {
            positive.push(("avoid_radius", w.avoid_radius));
        }
        if self.flags.attraction {
            positive.push(("attract_radius", w.attract_radius));
        }
        if self.flags.containment {
            positive.push(("free_radius", w.free_radius));
        }
        if let Some((field, v)) = positive.iter().find(|(_, v)| *v <= 0.0) {
            return Err(self.invalid(format!("{field} must be > 0, got {v}")));
        }

        let non_negative = [
            ("separation_radius", w.separation_radius),
            ("neighbor_radius",   w.neighbor_radius),
            ("avoid_radius",      w.avoid_radius),
            ("attract_radius",    w.attract_radius),
            ("free_radius",       w.free_radius),
            ("target_range",      w.target_range),
            ("move_speed",        self.move_speed),
            ("turn_rate_deg",     self.turn_rate_deg),
        ];
        if let Some((field, v)) = non_negative.iter().find(|(_, v)| *v < 0.0) {
            return Err(self.invalid(format!("{field} must be >= 0, got {v}")));
        }

        Ok(())
    }

    fn invalid(&self, msg: String) -> BehaviorError {
        BehaviorError::Config(format!("profile {:?}: {msg}", self.name))
    }
}

impl Default for SteeringProfile {
    fn default() -> Self {
        SteeringProfile {
            name:             String::from("default"),
            flags:            BehaviorFlags::default(),
            weights:          SteeringWeights::default(),
            falloff:          AvoidanceFalloff::default(),
            target:           TargetResponse::default(),
            move_speed:       6.0,
            turn_rate_deg:    90.0,
            refresh_interval: 0.2,
            neighbor_layers:  LayerMask::ALL,
            avoid_layers:     LayerMask::NONE,
            attract_layers:   LayerMask::NONE,
            planar:           true,
            score_value:      5,
        }
    }
}

// ── ProfileTable ──────────────────────────────────────────────────────────────

/// Profiles indexed by [`ProfileId`], in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileTable {
    profiles: Vec<SteeringProfile>,
}

impl ProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate every profile and build a table from them.
    pub fn from_profiles(profiles: Vec<SteeringProfile>) -> BehaviorResult<Self> {
        for p in &profiles {
            p.validate()?;
        }
        if profiles.len() > u16::MAX as usize {
            return Err(BehaviorError::Config(format!(
                "{} profiles exceed the ProfileId range",
                profiles.len()
            )));
        }
        Ok(ProfileTable { profiles })
    }

    /// Validate and append `profile`, returning its id.
    pub fn push(&mut self, profile: SteeringProfile) -> BehaviorResult<ProfileId> {
        profile.validate()?;
        let id = ProfileId::try_from(self.profiles.len())
            .ok()
            .filter(|id| *id != ProfileId::INVALID)
            .ok_or_else(|| BehaviorError::Config("profile table is full".into()))?;
        self.profiles.push(profile);
        Ok(id)
    }

    #[inline]
    pub fn get(&self, id: ProfileId) -> Option<&SteeringProfile> {
        self.profiles.get(id.index())
    }

    /// Id of the first profile called `name`.
    pub fn id_of(&self, name: &str) -> Option<ProfileId> {
        self.profiles
            .iter()
            .position(|p| p.name == name)
            .and_then(|i| ProfileId::try_from(i).ok())
    }

    #[inline]
    pub fn contains(&self, id: ProfileId) -> bool {
        id.index() < self.profiles.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProfileId, &SteeringProfile)> {
        self.profiles.iter().enumerate().map(|(i, p)| (ProfileId(i as u16), p))
    }
}
