//! Integration tests for steer-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{AgentSnapshotRow, RemovalRow, TickSummaryRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    fn snap_row(agent_id: u32, tick: u64) -> AgentSnapshotRow {
        AgentSnapshotRow {
            agent_id,
            tick,
            time_secs: tick as f32 * 0.5,
            position:  [agent_id as f32, 2.0, 0.0],
            forward:   [1.0, 0.0, 0.0],
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("agent_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
        assert!(dir.path().join("removals.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(dir.path().join("agent_snapshots.csv")),
            ["agent_id", "tick", "time_secs", "x", "y", "z", "forward_x", "forward_y", "forward_z"]
        );
        assert_eq!(
            headers(dir.path().join("tick_summaries.csv")),
            ["tick", "time_secs", "live_agents", "refreshed_agents"]
        );
        assert_eq!(
            headers(dir.path().join("removals.csv")),
            ["tick", "agent_id", "cause", "score_value"]
        );
    }

    #[test]
    fn snapshot_values_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 4), snap_row(3, 4)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let records: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[1][0], "3");
        assert_eq!(&records[1][1], "4");
        assert_eq!(records[1][2].parse::<f32>().unwrap(), 2.0);
        assert_eq!(records[1][3].parse::<f32>().unwrap(), 3.0);
        assert_eq!(records[1][6].parse::<f32>().unwrap(), 1.0);
    }

    #[test]
    fn summary_and_removal_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        for tick in 0..3 {
            w.write_tick_summary(&TickSummaryRow {
                tick,
                time_secs:        tick as f32,
                live_agents:      10,
                refreshed_agents: tick,
            })
            .unwrap();
        }
        w.write_removal(&RemovalRow { tick: 2, agent_id: 7, cause: "defeated", score_value: 5 }).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        assert_eq!(rdr.records().count(), 3);

        let mut rdr = csv::Reader::from_path(dir.path().join("removals.csv")).unwrap();
        let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].iter().collect::<Vec<_>>(), ["2", "7", "defeated", "5"]);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("does/not/exist")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use steer_agent::{AgentSpec, AgentStoreBuilder};
    use steer_behavior::{ProfileTable, SteeringProfile};
    use steer_core::{AgentId, ProfileId, SimConfig, Vec3};
    use steer_sim::{RemovalCause, SimBuilder};
    use steer_spatial::LinearIndex;

    use crate::{CsvWriter, OutputError, OutputResult, OutputWriter, SimOutputObserver};
    use crate::row::{AgentSnapshotRow, RemovalRow, TickSummaryRow};

    fn sim(agents: u32, total_ticks: u64, interval: u64) -> steer_sim::Sim<LinearIndex> {
        let config = SimConfig {
            dt_secs:               0.1,
            total_ticks,
            seed:                  1,
            num_threads:           Some(1),
            output_interval_ticks: interval,
        };
        let specs = (0..agents).map(|i| AgentSpec::at(Vec3::new(i as f32 * 2.0, 0.0, 0.0), ProfileId(0)));
        let (store, rngs) = AgentStoreBuilder::new(1).agents(specs).build();
        let profiles = ProfileTable::from_profiles(vec![SteeringProfile::named("boid")]).unwrap();
        SimBuilder::new(config, store, rngs, profiles, LinearIndex::new()).build().unwrap()
    }

    fn count_rows(path: std::path::PathBuf) -> usize {
        csv::Reader::from_path(path).unwrap().records().count()
    }

    #[test]
    fn row_counts_follow_interval() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = sim(3, 10, 5);
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        // Snapshots at ticks 0 and 5, three agents each.
        assert_eq!(count_rows(dir.path().join("agent_snapshots.csv")), 6);
        assert_eq!(count_rows(dir.path().join("tick_summaries.csv")), 10);
    }

    #[test]
    fn snapshots_skip_removed_agents() {
        let dir = tempfile::tempdir().unwrap();
        let mut sim = sim(3, 2, 1);
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.remove_agent(AgentId(1), RemovalCause::Defeated, &mut obs).unwrap();
        sim.run(&mut obs).unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("agent_snapshots.csv")).unwrap();
        let ids: Vec<String> = rdr.records().map(|r| r.unwrap()[0].to_owned()).collect();
        assert_eq!(ids, ["0", "2", "0", "2"]);
        assert_eq!(count_rows(dir.path().join("removals.csv")), 1);
    }

    /// Fails every write after the first `ok` calls.
    struct FlakyWriter {
        ok: usize,
    }

    impl FlakyWriter {
        fn tick(&mut self) -> OutputResult<()> {
            if self.ok == 0 {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.ok -= 1;
            Ok(())
        }
    }

    impl OutputWriter for FlakyWriter {
        fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
            self.tick()
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.tick()
        }
        fn write_removal(&mut self, _row: &RemovalRow) -> OutputResult<()> {
            self.tick()
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut sim = sim(2, 5, 1);
        let mut obs = SimOutputObserver::new(FlakyWriter { ok: 1 });
        sim.run(&mut obs).unwrap();
        let err = obs.take_error().expect("writer failed");
        assert!(err.to_string().contains("disk full"));
        assert!(obs.take_error().is_none());
    }
}
