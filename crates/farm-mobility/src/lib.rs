//! `farm-mobility`: moves layer-2 entities across the scene one step at a
//! time without ever overlapping another mover.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                       |
//! |------------|----------------------------------------------------------------|
//! | [`state`]  | `Direction`, `Gait`, `MoveState`, `StepOutcome`                |
//! | [`guard`]  | `StepGuard` hook (road intersection), `Unguarded`              |
//! | [`engine`] | `MobilityEngine`: tick loop, fallback ladder, stuck budget     |
//! | [`error`]  | `MobilityError`, `MobilityResult<T>`                           |
//!
//! # Movement model (fixed-cadence steps)
//!
//! Every tick the engine proposes a move of at most `gait.step` pixels per
//! axis toward the target and commits it through
//! [`SpatialRegistry::try_place`][farm_spatial::SpatialRegistry::try_place].
//! When the direct step is blocked it degrades through:
//!
//! 1. axis-only steps (x alone, then y alone),
//! 2. sidesteps that keep progress on one axis,
//! 3. a committed wander in a random compass direction that has
//!    `wander_lookahead` clear steps ahead; once it completes, its direction
//!    becomes an escape heading that fallback steps may not reverse until a
//!    direct step succeeds,
//! 4. `Unreachable` once the tick budget (proportional to the initial
//!    distance, clamped to `[stuck_min_ticks, stuck_max_ticks]`) is spent
//!    without getting any closer.
//!
//! The engine sleeps between ticks through the shared
//! [`Shutdown`][farm_core::Shutdown] handle, never while holding a lock.

pub mod engine;
pub mod error;
pub mod guard;
pub mod state;

#[cfg(test)]
mod tests;

pub use engine::MobilityEngine;
pub use error::{MobilityError, MobilityResult};
pub use guard::{StepGuard, Unguarded};
pub use state::{Direction, Gait, MoveState, StepOutcome, Wander};
