//! `farm-output`: statistics output for the farm simulation.
//!
//! | Type               | Role                                                               |
//! |--------------------|--------------------------------------------------------------------|
//! | [`StatsRow`]       | One sample: elapsed time plus the full counter block               |
//! | [`StatsWriter`]    | Backend trait                                                      |
//! | [`StatsCsvWriter`] | CSV backend writing `farm_stats.csv`                               |
//! | [`StatsCsvObserver`] | `FarmObserver` that samples on every stats tick and once at stop |
//!
//! # Usage
//!
//! ```rust,ignore
//! use farm_output::{StatsCsvObserver, StatsCsvWriter};
//!
//! let writer = StatsCsvWriter::new(Path::new("./output"))?;
//! let report = farm.run_for(Duration::from_secs(30), StatsCsvObserver::new(writer))?;
//! let mut obs = report.observer;
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use crate::csv::StatsCsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::StatsCsvObserver;
pub use row::StatsRow;
pub use writer::StatsWriter;
