//! `SimOutputObserver<W>`: bridges `SimObserver` to an `OutputWriter`.

use steer_agent::AgentStore;
use steer_core::{AgentId, Tick};
use steer_sim::{RemovalCause, SimObserver, TickStats};

use crate::row::{AgentSnapshotRow, RemovalRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes agent snapshots, tick summaries, and
/// removals to any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer outside of `on_sim_end` (e.g. after `run_ticks`).
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, stats: &TickStats) {
        let row = TickSummaryRow {
            tick:             stats.tick.0,
            time_secs:        stats.time_secs,
            live_agents:      stats.live_agents as u64,
            refreshed_agents: stats.refreshed_agents as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, time_secs: f32, agents: &AgentStore) {
        let rows: Vec<AgentSnapshotRow> = agents
            .live_ids()
            .map(|id| AgentSnapshotRow {
                agent_id: id.0,
                tick:     tick.0,
                time_secs,
                position: agents.position[id.index()].to_array(),
                forward:  agents.forward(id).to_array(),
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_agent_removed(&mut self, tick: Tick, agent: AgentId, cause: RemovalCause, score_value: u32) {
        let row = RemovalRow {
            tick:     tick.0,
            agent_id: agent.0,
            cause:    match cause {
                RemovalCause::Defeated  => "defeated",
                RemovalCause::Despawned => "despawned",
            },
            score_value,
        };
        let result = self.writer.write_removal(&row);
        self.store_err(result);
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
