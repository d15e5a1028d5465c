//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`
//! - `removals.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;
use log::debug;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, RemovalRow, TickSummaryRow};

pub const SNAPSHOT_HEADER: [&str; 9] =
    ["agent_id", "tick", "time_secs", "x", "y", "z", "forward_x", "forward_y", "forward_z"];
pub const SUMMARY_HEADER: [&str; 4] = ["tick", "time_secs", "live_agents", "refreshed_agents"];
pub const REMOVAL_HEADER: [&str; 4] = ["tick", "agent_id", "cause", "score_value"];

/// Writes simulation output to three CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    removals:  Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        let mut removals = Writer::from_path(dir.join("removals.csv"))?;
        removals.write_record(REMOVAL_HEADER)?;

        debug!("writing CSV output to {}", dir.display());
        Ok(Self { snapshots, summaries, removals, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            let [x, y, z] = row.position;
            let [fx, fy, fz] = row.forward;
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.time_secs.to_string(),
                x.to_string(),
                y.to_string(),
                z.to_string(),
                fx.to_string(),
                fy.to_string(),
                fz.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time_secs.to_string(),
            row.live_agents.to_string(),
            row.refreshed_agents.to_string(),
        ])?;
        Ok(())
    }

    fn write_removal(&mut self, row: &RemovalRow) -> OutputResult<()> {
        self.removals.write_record(&[
            row.tick.to_string(),
            row.agent_id.to_string(),
            row.cause.to_string(),
            row.score_value.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.removals.flush()?;
        Ok(())
    }
}
