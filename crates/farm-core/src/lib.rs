//! `farm-core`: foundational types for the farm economy simulation.
//!
//! This crate is a dependency of every other `farm-*` crate.  It has no
//! `farm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`ids`]       | `EntityId`, `NestId`                                         |
//! | [`geo`]       | `Point`, `Size`, `Rect`, `Bounds`, overlap tests             |
//! | [`kind`]      | `EntityKind`, `Layer`                                        |
//! | [`rng`]       | `RandomSource`, `ActorRng` (per-actor), `SequenceRng`        |
//! | [`shutdown`]  | `Shutdown`: process-wide cancellation + interruptible sleep  |
//! | [`stats`]     | `Statistics` (atomic counters), `StatsSnapshot`              |
//! | [`config`]    | `FarmConfig`, `Timing`, `Capacities`, `Population`, `Layout` |
//! | [`error`]     | `FarmError`, `FarmResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod kind;
pub mod rng;
pub mod shutdown;
pub mod stats;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{Capacities, FarmConfig, Layout, MovementConfig, Population, Timing};
pub use error::{FarmError, FarmResult};
pub use geo::{Bounds, Point, Rect, Size};
pub use ids::{EntityId, NestId};
pub use kind::{EntityKind, Layer};
pub use rng::{ActorRng, RandomSource, SequenceRng};
pub use shutdown::Shutdown;
pub use stats::{Counter, Statistics, StatsSnapshot};
