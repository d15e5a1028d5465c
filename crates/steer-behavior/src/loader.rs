//! CSV steering-profile loader.
//!
//! # CSV format
//!
//! One row per profile; row order defines the [`ProfileId`][steer_core::ProfileId]
//! (first row is `ProfileId(0)`).
//!
//! ```csv
//! name,flocking,avoidance,attraction,containment,neighbor_radius,separation_radius,alignment_weight,cohesion_weight,separation_weight,avoid_radius,avoid_weight,avoid_angle_deg,falloff,attract_radius,attract_weight,free_radius,bounce_weight,target,target_range,inertia,random_factor,move_speed,turn_rate_deg,refresh_interval,neighbor_layers,avoid_layers,attract_layers,planar,score_value
//! dark,true,true,false,true,3,2,2,0.5,1,12,1,0,linear,20,1,20,10,ignore,3,1,0.1,6,90,0.2,1,6,0,true,5
//! hunter,true,true,true,true,3,2,2,0.5,1,12,1,45,log,20,1,20,10,attract,3,1,0.1,7,120,0.2,2,4,1,true,10
//! ```
//!
//! | Column      | Values                                               |
//! |-------------|------------------------------------------------------|
//! | booleans    | `true` / `false`                                     |
//! | `falloff`   | `linear` / `log`                                     |
//! | `target`    | `ignore` / `avoid` / `attract` / `keep_range`        |
//! | `*_layers`  | `u32` bitmask, bit *n* = layer *n*                   |
//!
//! Every row is validated with [`SteeringProfile::validate`].

use std::io::Read;
use std::path::Path;

use log::debug;
use serde::Deserialize;

use steer_core::LayerMask;

use crate::{
    AvoidanceFalloff, BehaviorError, BehaviorFlags, BehaviorResult, SteeringProfile,
    SteeringWeights, TargetResponse,
};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ProfileRecord {
    name:              String,
    flocking:          bool,
    avoidance:         bool,
    attraction:        bool,
    containment:       bool,
    neighbor_radius:   f32,
    separation_radius: f32,
    alignment_weight:  f32,
    cohesion_weight:   f32,
    separation_weight: f32,
    avoid_radius:      f32,
    avoid_weight:      f32,
    avoid_angle_deg:   f32,
    falloff:           String,
    attract_radius:    f32,
    attract_weight:    f32,
    free_radius:       f32,
    bounce_weight:     f32,
    target:            String,
    target_range:      f32,
    inertia:           f32,
    random_factor:     f32,
    move_speed:        f32,
    turn_rate_deg:     f32,
    refresh_interval:  f32,
    neighbor_layers:   u32,
    avoid_layers:      u32,
    attract_layers:    u32,
    planar:            bool,
    score_value:       u32,
}

impl ProfileRecord {
    fn into_profile(self) -> BehaviorResult<SteeringProfile> {
        let falloff = self.falloff.parse::<AvoidanceFalloff>().map_err(|e| in_row(&self.name, e))?;
        let target = self.target.parse::<TargetResponse>().map_err(|e| in_row(&self.name, e))?;
        Ok(SteeringProfile {
            flags: BehaviorFlags {
                flocking:    self.flocking,
                avoidance:   self.avoidance,
                attraction:  self.attraction,
                containment: self.containment,
            },
            weights: SteeringWeights {
                neighbor_radius:   self.neighbor_radius,
                separation_radius: self.separation_radius,
                alignment_weight:  self.alignment_weight,
                cohesion_weight:   self.cohesion_weight,
                separation_weight: self.separation_weight,
                avoid_radius:      self.avoid_radius,
                avoid_weight:      self.avoid_weight,
                avoid_angle_deg:   self.avoid_angle_deg,
                attract_radius:    self.attract_radius,
                attract_weight:    self.attract_weight,
                free_radius:       self.free_radius,
                bounce_weight:     self.bounce_weight,
                target_range:      self.target_range,
                inertia:           self.inertia,
                random_factor:     self.random_factor,
            },
            falloff,
            target,
            move_speed:       self.move_speed,
            turn_rate_deg:    self.turn_rate_deg,
            refresh_interval: self.refresh_interval,
            neighbor_layers:  LayerMask(self.neighbor_layers),
            avoid_layers:     LayerMask(self.avoid_layers),
            attract_layers:   LayerMask(self.attract_layers),
            planar:           self.planar,
            score_value:      self.score_value,
            name:             self.name,
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load and validate steering profiles from a CSV file.
pub fn load_profiles_csv(path: &Path) -> BehaviorResult<Vec<SteeringProfile>> {
    let file = std::fs::File::open(path).map_err(BehaviorError::Io)?;
    let profiles = load_profiles_reader(file)?;
    debug!("loaded {} steering profiles from {}", profiles.len(), path.display());
    Ok(profiles)
}

/// Like [`load_profiles_csv`] but accepts any `Read` source.
pub fn load_profiles_reader<R: Read>(reader: R) -> BehaviorResult<Vec<SteeringProfile>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut profiles = Vec::new();

    for (row, result) in csv_reader.deserialize::<ProfileRecord>().enumerate() {
        let record = result.map_err(|e| BehaviorError::Parse(format!("row {}: {e}", row + 1)))?;
        let profile = record.into_profile()?;
        profile.validate()?;
        profiles.push(profile);
    }

    Ok(profiles)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn in_row(name: &str, err: BehaviorError) -> BehaviorError {
    match err {
        BehaviorError::Parse(msg) => BehaviorError::Parse(format!("profile {name:?}: {msg}")),
        other => other,
    }
}
