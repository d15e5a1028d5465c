//! Simulation observer trait for progress reporting, scoring, and output.

use steer_agent::AgentStore;
use steer_core::{AgentId, Tick};

use crate::RemovalCause;

/// Per-tick counters handed to [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TickStats {
    pub tick:             Tick,
    /// Simulation time at the start of the tick.
    pub time_secs:        f32,
    pub live_agents:      usize,
    /// Agents whose neighbour cache was refreshed this tick.
    pub refreshed_agents: usize,
}

/// Callbacks invoked by [`Sim`][crate::Sim] at key points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, stats: &TickStats) {
///         if stats.tick.0 % self.interval == 0 {
///             println!("{}: {} live agents", stats.tick, stats.live_agents);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the apply phase of each tick.
    fn on_tick_end(&mut self, _stats: &TickStats) {}

    /// Called every `config.output_interval_ticks` ticks with the agent state
    /// as it stands after that tick's apply phase.
    fn on_snapshot(&mut self, _tick: Tick, _time_secs: f32, _agents: &AgentStore) {}

    /// Called by [`Sim::remove_agent`][crate::Sim::remove_agent].
    ///
    /// `score_value` is the removed agent's profile score; whether it counts
    /// depends on `cause` and is up to the observer.
    fn on_agent_removed(
        &mut self,
        _tick:        Tick,
        _agent:       AgentId,
        _cause:       RemovalCause,
        _score_value: u32,
    ) {}

    /// Called once after the final tick of [`Sim::run`][crate::Sim::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

impl<O: SimObserver + ?Sized> SimObserver for &mut O {
    fn on_tick_start(&mut self, tick: Tick) {
        (**self).on_tick_start(tick);
    }

    fn on_tick_end(&mut self, stats: &TickStats) {
        (**self).on_tick_end(stats);
    }

    fn on_snapshot(&mut self, tick: Tick, time_secs: f32, agents: &AgentStore) {
        (**self).on_snapshot(tick, time_secs, agents);
    }

    fn on_agent_removed(&mut self, tick: Tick, agent: AgentId, cause: RemovalCause, score_value: u32) {
        (**self).on_agent_removed(tick, agent, cause, score_value);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        (**self).on_sim_end(final_tick);
    }
}

/// Fan every callback out to both observers, first `A` then `B`.
impl<A: SimObserver, B: SimObserver> SimObserver for (A, B) {
    fn on_tick_start(&mut self, tick: Tick) {
        self.0.on_tick_start(tick);
        self.1.on_tick_start(tick);
    }

    fn on_tick_end(&mut self, stats: &TickStats) {
        self.0.on_tick_end(stats);
        self.1.on_tick_end(stats);
    }

    fn on_snapshot(&mut self, tick: Tick, time_secs: f32, agents: &AgentStore) {
        self.0.on_snapshot(tick, time_secs, agents);
        self.1.on_snapshot(tick, time_secs, agents);
    }

    fn on_agent_removed(&mut self, tick: Tick, agent: AgentId, cause: RemovalCause, score_value: u32) {
        self.0.on_agent_removed(tick, agent, cause, score_value);
        self.1.on_agent_removed(tick, agent, cause, score_value);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.0.on_sim_end(final_tick);
        self.1.on_sim_end(final_tick);
    }
}
