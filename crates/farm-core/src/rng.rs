//! Seedable random sources for actor decisions.
//!
//! # Determinism strategy
//!
//! Each actor gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (entity_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive entity IDs uniformly across the seed space.
//! Actors never share RNG state, so no lock is needed around decisions.
//!
//! Actors are generic over [`RandomSource`] rather than tied to `ActorRng`,
//! so tests can inject a [`SequenceRng`] and script exact outcomes (which
//! nest a chicken flees to, how many cakes a child wants, …).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::EntityId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── RandomSource ──────────────────────────────────────────────────────────────

/// The randomness an actor is allowed to consume.
///
/// Every randomized decision point goes through one of these methods, which
/// makes the decision stream replaceable in tests.
pub trait RandomSource: Send {
    /// Uniform integer in `lo..=hi`.  Returns `lo` if `hi < lo`.
    fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64;

    /// `true` with probability `p` (clamped to [0, 1]).
    fn chance(&mut self, p: f64) -> bool;

    /// Uniform index in `0..len`.  Returns 0 for `len == 0`.
    fn pick_index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.range_inclusive(0, len as i64 - 1) as usize
    }

    /// Shuffle a mutable slice in-place (Fisher-Yates over `pick_index`).
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.pick_index(i + 1);
            slice.swap(i, j);
        }
    }
}

// ── ActorRng ──────────────────────────────────────────────────────────────────

/// Per-actor RNG backed by `SmallRng`.
///
/// The type is `Send` but deliberately not shared: each actor thread owns
/// exactly one.
pub struct ActorRng(SmallRng);

impl ActorRng {
    /// Seed deterministically from the run's global seed and the actor's
    /// entity ID.
    pub fn new(global_seed: u64, entity: EntityId) -> Self {
        let seed = global_seed ^ (entity.0 as u64).wrapping_mul(MIXING_CONSTANT);
        ActorRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }
}

impl RandomSource for ActorRng {
    #[inline]
    fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.0.gen_range(lo..=hi)
    }

    #[inline]
    fn chance(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.0);
    }
}

// ── SequenceRng ───────────────────────────────────────────────────────────────

/// A scripted random source that replays a fixed list of values, cycling.
///
/// Each draw consumes one value `v`:
///
/// - `range_inclusive(lo, hi)` returns `lo + v.rem_euclid(hi - lo + 1)`, so
///   scripting `v = 2` for a `1..=6` draw yields `3`.
/// - `chance(p)` returns `false` for `p <= 0`, `true` for `p >= 1`, otherwise
///   `v != 0`.
///
/// An empty script behaves as if it contained a single `0`.
#[derive(Clone, Debug, Default)]
pub struct SequenceRng {
    values: Vec<i64>,
    cursor: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<i64>>) -> Self {
        Self { values: values.into(), cursor: 0 }
    }

    /// Number of values consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }

    fn next_value(&mut self) -> i64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}

impl RandomSource for SequenceRng {
    fn range_inclusive(&mut self, lo: i64, hi: i64) -> i64 {
        let v = self.next_value();
        if hi <= lo {
            return lo;
        }
        lo + v.rem_euclid(hi - lo + 1)
    }

    fn chance(&mut self, p: f64) -> bool {
        let v = self.next_value();
        if p <= 0.0 {
            false
        } else if p >= 1.0 {
            true
        } else {
            v != 0
        }
    }
}
