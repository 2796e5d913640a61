//! `StatsCsvObserver<W>`: bridges `FarmObserver` to a `StatsWriter`.

use std::time::{Duration, Instant};

use log::warn;

use farm_core::{FarmConfig, StatsSnapshot};
use farm_sim::FarmObserver;

use crate::row::StatsRow;
use crate::writer::StatsWriter;
use crate::{OutputError, OutputResult, StatsCsvWriter};

/// A [`FarmObserver`] that writes one row per statistics tick and a final
/// row when the farm stops.
///
/// Errors from the writer are stored because observer methods have no
/// return value.  After the run, check with [`take_error`](Self::take_error).
pub struct StatsCsvObserver<W: StatsWriter = StatsCsvWriter> {
    writer:     W,
    started:    Option<Instant>,
    last_error: Option<OutputError>,
}

impl<W: StatsWriter> StatsCsvObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, started: None, last_error: None }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn write(&mut self, elapsed: Duration, stats: &StatsSnapshot) {
        let row = StatsRow { elapsed_ms: elapsed.as_millis() as u64, stats: *stats };
        let result = self.writer.write_row(&row);
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!("statistics output failed: {e}");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: StatsWriter> FarmObserver for StatsCsvObserver<W> {
    fn on_start(&mut self, _config: &FarmConfig) {
        self.started = Some(Instant::now());
    }

    fn on_stats(&mut self, elapsed: Duration, stats: &StatsSnapshot) {
        self.write(elapsed, stats);
    }

    fn on_stop(&mut self, stats: &StatsSnapshot) {
        let elapsed = self.started.map(|t| t.elapsed()).unwrap_or_default();
        self.write(elapsed, stats);
        let result = self.writer.finish();
        self.store_err(result);
    }
}
