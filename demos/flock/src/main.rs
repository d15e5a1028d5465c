//! flock: smallest runnable scene for the rust_steer framework.
//!
//! Three kinds of agents share one arena:
//!
//! - **dark** boids flock together and steer clear of the player;
//! - **light** boids flock and try to hold a fixed distance from the player;
//! - **hunters** flock loosely and chase the player and light boids.
//!
//! The player circles the arena and defeats the nearest agent in reach once
//! a second.  Output lands in `output/flock/`.
//!
//! ```text
//! cargo run -p flock                    # built-in config
//! cargo run -p flock -- config.json     # SimConfig from JSON
//! STEER_LOG=debug cargo run -p flock    # per-tick refresh counts
//! ```

use std::f32::consts::TAU;
use std::io::Cursor;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use steer_agent::{AgentSpec, AgentStoreBuilder};
use steer_behavior::{ProfileTable, load_profiles_reader};
use steer_core::math::look_rotation;
use steer_core::{AgentId, Clock, Layer, LayerMask, ObstacleId, ProfileId, SimConfig, SimRng, Vec3};
use steer_output::{CsvWriter, SimOutputObserver};
use steer_sim::{Obstacle, RemovalCause, Scoreboard, Sim, SimBuilder, SimObserver, TickStats};
use steer_spatial::RTreeIndex;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:           u64 = 42;
const DARK_COUNT:     u32 = 40;
const LIGHT_COUNT:    u32 = 20;
const HUNTER_COUNT:   u32 = 6;
const ARENA_RADIUS:   f32 = 20.0;
const PLAYER_ORBIT:   f32 = 12.0;
/// Seconds per player lap.
const PLAYER_PERIOD:  f32 = 20.0;
const SHOT_RANGE:     f32 = 4.0;
const SHOT_EVERY:     u64 = 60;
const PROGRESS_EVERY: u64 = 300;

const DARK:   Layer = Layer(0);
const LIGHT:  Layer = Layer(1);
const PLAYER: Layer = Layer(2);
const HUNTER: Layer = Layer(3);

// ── Profiles CSV ──────────────────────────────────────────────────────────────

// Masks: 1 = dark, 2 = light, 4 = player, 8 = hunter.
const PROFILES_CSV: &str = "\
name,flocking,avoidance,attraction,containment,neighbor_radius,separation_radius,alignment_weight,cohesion_weight,separation_weight,avoid_radius,avoid_weight,avoid_angle_deg,falloff,attract_radius,attract_weight,free_radius,bounce_weight,target,target_range,inertia,random_factor,move_speed,turn_rate_deg,refresh_interval,neighbor_layers,avoid_layers,attract_layers,planar,score_value\n\
dark,true,true,false,true,3,2,2,0.5,1,12,1,45,linear,20,1,20,10,avoid,3,1,0.1,6,90,0.2,1,8,0,true,5\n\
light,true,false,false,true,3,2,2,0.5,1,12,1,0,linear,20,1,20,10,keep_range,3,1,0.1,6,90,0.2,2,0,0,true,10\n\
hunter,true,true,true,true,4,2,1,0.25,1.5,6,1,0,log,15,1,20,10,attract,3,1,0.05,7,120,0.2,8,8,2,true,25\n\
";

// ── Progress observer ─────────────────────────────────────────────────────────

struct Progress {
    every: u64,
}

impl SimObserver for Progress {
    fn on_tick_end(&mut self, stats: &TickStats) {
        if stats.tick.0.is_multiple_of(self.every) {
            info!(
                "{} ({:.1}s): {} live, {} refreshed",
                stats.tick, stats.time_secs, stats.live_agents, stats.refreshed_agents
            );
        }
    }
}

// ── Scene ─────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SimConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parsing {path}"))
        }
        None => Ok(SimConfig {
            dt_secs:               1.0 / 60.0,
            total_ticks:           60 * 60,
            seed:                  SEED,
            num_threads:           None,
            output_interval_ticks: 30,
        }),
    }
}

/// Agents scattered uniformly over the arena disc, facing random directions.
fn scatter(rng: &mut SimRng, n: u32, profile: ProfileId, layer: Layer) -> Vec<AgentSpec> {
    (0..n)
        .map(|_| {
            let r = ARENA_RADIUS * rng.random::<f32>().sqrt();
            let a = rng.gen_range(0.0..TAU);
            let heading = rng.gen_range(0.0..TAU);
            let spec = AgentSpec::at(Vec3::new(r * a.cos(), r * a.sin(), 0.0), profile).on_layer(layer);
            match look_rotation(Vec3::new(heading.cos(), heading.sin(), 0.0), true) {
                Some(q) => spec.facing(q),
                None    => spec,
            }
        })
        .collect()
}

fn player_position(time_secs: f32) -> Vec3 {
    let a = TAU * time_secs / PLAYER_PERIOD;
    Vec3::new(PLAYER_ORBIT * a.cos(), PLAYER_ORBIT * a.sin(), 0.0)
}

/// Nearest agent within `SHOT_RANGE` of `from`, as of the last index rebuild.
fn nearest_in_range(sim: &Sim<RTreeIndex>, from: Vec3) -> Option<AgentId> {
    let agents = LayerMask::of(&[DARK, LIGHT, HUNTER]);
    let hit = sim.index.nearest(from, agents)?;
    let id = hit.body.agent()?;
    (hit.position.distance(from) <= SHOT_RANGE && sim.agents.is_alive(id)).then_some(id)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("STEER_LOG", "info"))
        .target(env_logger::Target::Stdout)
        .init();

    // 1. Config and profiles.
    let config = load_config()?;
    let profiles = ProfileTable::from_profiles(load_profiles_reader(Cursor::new(PROFILES_CSV))?)?;
    let id = |name: &str| profiles.id_of(name).with_context(|| format!("missing profile {name:?}"));
    let (dark, light, hunter) = (id("dark")?, id("light")?, id("hunter")?);

    // 2. Agents.
    let mut rng = SimRng::new(config.seed);
    let specs = [
        scatter(&mut rng, DARK_COUNT, dark, DARK),
        scatter(&mut rng, LIGHT_COUNT, light, LIGHT),
        scatter(&mut rng, HUNTER_COUNT, hunter, HUNTER),
    ];
    let (store, rngs) = AgentStoreBuilder::new(config.seed)
        .with_capacity(specs.iter().map(Vec::len).sum())
        .agents(specs.into_iter().flatten())
        .build();

    // 3. Sim: the player is both an obstacle and the scene target.
    let start = player_position(0.0);
    let mut sim = SimBuilder::new(config, store, rngs, profiles, RTreeIndex::new())
        .space_origin(Vec3::ZERO)
        .target(start)
        .obstacle(Obstacle::new(start, PLAYER))
        .build()?;
    let player = ObstacleId(0);

    // 4. Observers.
    let out_dir = Path::new("output/flock");
    std::fs::create_dir_all(out_dir)?;
    let output = SimOutputObserver::new(CsvWriter::new(out_dir)?);
    let mut observers = (Scoreboard::new(), (output, Progress { every: PROGRESS_EVERY }));

    // 5. Run, moving the player between ticks.
    let t0 = Instant::now();
    let end = sim.config.end_tick();
    info!("flock: {} agents, {} ticks, seed {}", sim.agents.live_count(), end.0, sim.config.seed);

    while sim.clock.current_tick < end {
        let p = player_position(sim.clock.elapsed_secs());
        sim.set_obstacle_position(player, p)?;
        sim.set_target(Some(p));

        sim.step(&mut observers)?;

        if sim.clock.current_tick.0.is_multiple_of(SHOT_EVERY) {
            if let Some(victim) = nearest_in_range(&sim, p) {
                sim.remove_agent(victim, RemovalCause::Defeated, &mut observers)?;
            }
        }
    }
    observers.0.finish();
    observers.on_sim_end(sim.clock.current_tick);
    let elapsed = t0.elapsed();

    // 6. Summary.
    let (board, (mut output, _)) = observers;
    if let Some(e) = output.take_error() {
        eprintln!("output error: {e}");
    }
    println!("Simulation complete in {:.3} s ({})", elapsed.as_secs_f64(), sim.clock);
    println!("  score    : {}", board.score());
    println!("  defeated : {}", board.defeated());
    println!("  alive    : {}", sim.agents.live_count());
    println!();

    println!("{:<10} {:>6} {:>9}", "Profile", "Alive", "Mean |r|");
    println!("{}", "-".repeat(27));
    for (pid, profile) in sim.profiles.iter() {
        let radii: Vec<f32> = sim
            .agents
            .live_ids()
            .filter(|a| sim.agents.profile[a.index()] == pid)
            .map(|a| sim.agents.position[a.index()].length())
            .collect();
        let mean = if radii.is_empty() { 0.0 } else { radii.iter().sum::<f32>() / radii.len() as f32 };
        println!("{:<10} {:>6} {:>9.2}", profile.name, radii.len(), mean);
    }

    Ok(())
}
