//! Tests for farm-output.

#[cfg(test)]
mod csv_tests {
    use farm_core::StatsSnapshot;
    use tempfile::TempDir;

    use crate::csv::{StatsCsvWriter, FILE_NAME};
    use crate::row::StatsRow;
    use crate::writer::StatsWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row(elapsed_ms: u64, cakes: u64) -> StatsRow {
        let stats = StatsSnapshot { eggs_laid: 9, cakes_produced: cakes, cakes_sold: cakes / 2, ..StatsSnapshot::default() };
        StatsRow { elapsed_ms, stats }
    }

    #[test]
    fn header_lists_every_counter() {
        let dir = tmp();
        let mut w = StatsCsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join(FILE_NAME)).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers.len(), 14);
        assert_eq!(headers[0], "elapsed_ms");
        assert_eq!(headers[1], "eggs_laid");
        assert_eq!(headers[13], "cakes_sold");
    }

    #[test]
    fn rows_in_header_order() {
        let dir = tmp();
        let mut w = StatsCsvWriter::new(dir.path()).unwrap();
        w.write_row(&row(1_000, 6)).unwrap();
        w.write_row(&row(2_000, 12)).unwrap();
        assert_eq!(w.rows(), 2);
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(w.path()).unwrap();
        let records: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][0], "1000");
        assert_eq!(&records[0][1], "9"); // eggs_laid
        assert_eq!(&records[1][12], "12"); // cakes_produced
        assert_eq!(&records[1][13], "6"); // cakes_sold
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let w = StatsCsvWriter::new(&nested).unwrap();
        assert!(nested.join(FILE_NAME).exists());
        assert_eq!(w.rows(), 0);
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = StatsCsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use std::time::Duration;

    use farm_core::{FarmConfig, StatsSnapshot, Timing};
    use farm_sim::{FarmBuilder, FarmObserver};

    use crate::csv::StatsCsvWriter;
    use crate::{OutputError, OutputResult, StatsCsvObserver, StatsRow, StatsWriter};

    /// In-memory writer that can be told to fail.
    #[derive(Default)]
    struct Recorder {
        rows:     Vec<StatsRow>,
        finished: u32,
        fail:     bool,
    }

    impl StatsWriter for Recorder {
        fn write_row(&mut self, row: &StatsRow) -> OutputResult<()> {
            if self.fail {
                return Err(OutputError::Io(std::io::Error::other("disk full")));
            }
            self.rows.push(*row);
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished += 1;
            Ok(())
        }
    }

    #[test]
    fn samples_then_final_row() {
        let mut obs = StatsCsvObserver::new(Recorder::default());
        obs.on_start(&FarmConfig::default());
        let s = StatsSnapshot { cakes_sold: 3, ..StatsSnapshot::default() };
        obs.on_stats(Duration::from_millis(1_000), &s);
        obs.on_stop(&StatsSnapshot { cakes_sold: 4, ..s });

        assert!(obs.take_error().is_none());
        let rec = obs.into_writer();
        assert_eq!(rec.rows.len(), 2);
        assert_eq!(rec.rows[0].elapsed_ms, 1_000);
        assert_eq!(rec.rows[1].stats.cakes_sold, 4);
        assert_eq!(rec.finished, 1);
    }

    #[test]
    fn first_error_is_kept() {
        let mut obs = StatsCsvObserver::new(Recorder { fail: true, ..Recorder::default() });
        obs.on_stats(Duration::from_millis(10), &StatsSnapshot::default());
        obs.on_stats(Duration::from_millis(20), &StatsSnapshot::default());
        assert!(matches!(obs.take_error(), Some(OutputError::Io(_))));
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn farm_run_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = FarmConfig { timing: Timing::default().accelerated(1_000), ..FarmConfig::default() };
        config.timing.stats_log_ms = 20;

        let writer = StatsCsvWriter::new(dir.path()).unwrap();
        let farm = FarmBuilder::new(config).build().unwrap();
        let report = farm.run_for(Duration::from_millis(300), StatsCsvObserver::new(writer)).unwrap();

        let mut obs = report.observer;
        assert!(obs.take_error().is_none());
        let writer = obs.into_writer();
        assert!(writer.rows() >= 2);

        let mut rdr = csv::Reader::from_path(writer.path()).unwrap();
        let last = rdr.records().map(|r| r.unwrap()).last().unwrap();
        assert_eq!(&last[1], report.stats.eggs_laid.to_string().as_str());
        assert_eq!(&last[13], report.stats.cakes_sold.to_string().as_str());
    }
}
