//! Global statistics block.
//!
//! Write-mostly monotonic counters, bumped by actors and read by the display
//! refresh.  Each counter is an independent `AtomicU64` with relaxed
//! ordering: a snapshot is not a consistent cut across counters, only
//! eventually up to date, which is all a renderer needs.

use std::sync::atomic::{AtomicU64, Ordering};

/// One named counter in the statistics block.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Counter {
    /// Eggs laid into nests by chickens.
    EggsLaid,
    /// Eggs drained from nests by the farmer.
    EggsCollected,
    /// Eggs taken from the barn pool by the egg truck.
    EggsLoaded,
    /// Eggs unloaded into bakery storage.
    EggsDelivered,
    /// Eggs consumed by the oven.
    EggsUsed,
    ButterProduced,
    ButterUsed,
    FlourProduced,
    FlourUsed,
    SugarProduced,
    SugarUsed,
    CakesProduced,
    CakesSold,
}

impl Counter {
    pub const COUNT: usize = 13;

    /// Every counter, in snapshot / CSV column order.
    pub const ALL: [Counter; Counter::COUNT] = [
        Counter::EggsLaid,
        Counter::EggsCollected,
        Counter::EggsLoaded,
        Counter::EggsDelivered,
        Counter::EggsUsed,
        Counter::ButterProduced,
        Counter::ButterUsed,
        Counter::FlourProduced,
        Counter::FlourUsed,
        Counter::SugarProduced,
        Counter::SugarUsed,
        Counter::CakesProduced,
        Counter::CakesSold,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Counter::EggsLaid       => "eggs_laid",
            Counter::EggsCollected  => "eggs_collected",
            Counter::EggsLoaded     => "eggs_loaded",
            Counter::EggsDelivered  => "eggs_delivered",
            Counter::EggsUsed       => "eggs_used",
            Counter::ButterProduced => "butter_produced",
            Counter::ButterUsed     => "butter_used",
            Counter::FlourProduced  => "flour_produced",
            Counter::FlourUsed      => "flour_used",
            Counter::SugarProduced  => "sugar_produced",
            Counter::SugarUsed      => "sugar_used",
            Counter::CakesProduced  => "cakes_produced",
            Counter::CakesSold      => "cakes_sold",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Statistics ────────────────────────────────────────────────────────────────

/// The shared counter block.  Wrap in an `Arc` and hand a clone to each actor.
#[derive(Debug, Default)]
pub struct Statistics {
    counters: [AtomicU64; Counter::COUNT],
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `n` to `counter`.
    #[inline]
    pub fn add(&self, counter: Counter, n: u64) {
        self.counters[counter.slot()].fetch_add(n, Ordering::Relaxed);
    }

    #[inline]
    pub fn get(&self, counter: Counter) -> u64 {
        self.counters[counter.slot()].load(Ordering::Relaxed)
    }

    /// Copy every counter into a plain struct.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            eggs_laid:       self.get(Counter::EggsLaid),
            eggs_collected:  self.get(Counter::EggsCollected),
            eggs_loaded:     self.get(Counter::EggsLoaded),
            eggs_delivered:  self.get(Counter::EggsDelivered),
            eggs_used:       self.get(Counter::EggsUsed),
            butter_produced: self.get(Counter::ButterProduced),
            butter_used:     self.get(Counter::ButterUsed),
            flour_produced:  self.get(Counter::FlourProduced),
            flour_used:      self.get(Counter::FlourUsed),
            sugar_produced:  self.get(Counter::SugarProduced),
            sugar_used:      self.get(Counter::SugarUsed),
            cakes_produced:  self.get(Counter::CakesProduced),
            cakes_sold:      self.get(Counter::CakesSold),
        }
    }
}

// ── StatsSnapshot ─────────────────────────────────────────────────────────────

/// A point-in-time copy of [`Statistics`], handed to renderers and writers.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatsSnapshot {
    pub eggs_laid:       u64,
    pub eggs_collected:  u64,
    pub eggs_loaded:     u64,
    pub eggs_delivered:  u64,
    pub eggs_used:       u64,
    pub butter_produced: u64,
    pub butter_used:     u64,
    pub flour_produced:  u64,
    pub flour_used:      u64,
    pub sugar_produced:  u64,
    pub sugar_used:      u64,
    pub cakes_produced:  u64,
    pub cakes_sold:      u64,
}

impl StatsSnapshot {
    /// Value of one counter by name.
    pub fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::EggsLaid       => self.eggs_laid,
            Counter::EggsCollected  => self.eggs_collected,
            Counter::EggsLoaded     => self.eggs_loaded,
            Counter::EggsDelivered  => self.eggs_delivered,
            Counter::EggsUsed       => self.eggs_used,
            Counter::ButterProduced => self.butter_produced,
            Counter::ButterUsed     => self.butter_used,
            Counter::FlourProduced  => self.flour_produced,
            Counter::FlourUsed      => self.flour_used,
            Counter::SugarProduced  => self.sugar_produced,
            Counter::SugarUsed      => self.sugar_used,
            Counter::CakesProduced  => self.cakes_produced,
            Counter::CakesSold      => self.cakes_sold,
        }
    }

    /// `true` if the egg pipeline never consumed more than its upstream stage
    /// supplied (laid ≥ collected ≥ loaded ≥ delivered ≥ used).
    pub fn egg_flow_conserved(&self) -> bool {
        self.eggs_laid >= self.eggs_collected
            && self.eggs_collected >= self.eggs_loaded
            && self.eggs_loaded >= self.eggs_delivered
            && self.eggs_delivered >= self.eggs_used
    }
}

impl std::fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "eggs laid={} collected={} used={} | butter {}/{} | flour {}/{} | sugar {}/{} | cakes produced={} sold={}",
            self.eggs_laid,
            self.eggs_collected,
            self.eggs_used,
            self.butter_used,
            self.butter_produced,
            self.flour_used,
            self.flour_produced,
            self.sugar_used,
            self.sugar_produced,
            self.cakes_produced,
            self.cakes_sold,
        )
    }
}
