//! Plain data row written by output backends.

use farm_core::{Counter, StatsSnapshot};

/// One statistics sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsRow {
    /// Milliseconds since the refresh thread started.
    pub elapsed_ms: u64,
    pub stats:      StatsSnapshot,
}

impl StatsRow {
    /// Column names, `elapsed_ms` first and then every counter.
    pub fn header() -> Vec<&'static str> {
        std::iter::once("elapsed_ms").chain(Counter::ALL.iter().map(|c| c.as_str())).collect()
    }

    /// Field values in [`header`](Self::header) order.
    pub fn fields(&self) -> Vec<String> {
        std::iter::once(self.elapsed_ms)
            .chain(Counter::ALL.iter().map(|&c| self.stats.get(c)))
            .map(|v| v.to_string())
            .collect()
    }
}
