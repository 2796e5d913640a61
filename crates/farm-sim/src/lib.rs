//! `farm-sim`: builds a farm from a [`FarmConfig`][farm_core::FarmConfig]
//! and runs it.
//!
//! # Lifecycle
//!
//! ```text
//! FarmBuilder::new(config)
//!   .build()          validate, publish scenery, place every mover
//!   → Farm
//!   .start(observer)  one thread per actor + one display-refresh thread
//!   → RunningFarm
//!   .shutdown()       trigger, join actors, stop refresh, final snapshot
//!   → FarmReport
//! ```
//!
//! The refresh thread calls [`FarmObserver::redisplay`] roughly every
//! `refresh_ms` with the registry locked, and [`FarmObserver::on_stats`]
//! every `stats_log_ms`.  It is stopped only after every actor has been
//! joined, so the observer's `on_stop` sees the final counters.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use farm_core::FarmConfig;
//! use farm_sim::{FarmBuilder, NoopObserver};
//!
//! let farm = FarmBuilder::new(FarmConfig::default()).build()?;
//! let report = farm.run_for(Duration::from_secs(10), NoopObserver)?;
//! println!("{}", report.stats);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod refresh;
pub mod sim;


pub use builder::FarmBuilder;
pub use error::{SimError, SimResult};
pub use observer::{FarmObserver, NoopObserver};
pub use sim::{Farm, FarmReport, RunningFarm};
