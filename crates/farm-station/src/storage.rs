//! Bakery ingredient storage.

use std::fmt;

use farm_core::Shutdown;

use crate::{Monitor, StationError, StationResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Ingredient {
    Eggs,
    Butter,
    Flour,
    Sugar,
}

impl Ingredient {
    pub const ALL: [Ingredient; 4] = [Ingredient::Eggs, Ingredient::Butter, Ingredient::Flour, Ingredient::Sugar];
}

/// One amount per ingredient.  Used for storage levels, deliveries, and
/// bake debits alike.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Pantry {
    pub eggs:   u32,
    pub butter: u32,
    pub flour:  u32,
    pub sugar:  u32,
}

impl Pantry {
    /// The same amount of every ingredient.
    pub const fn uniform(n: u32) -> Self {
        Self { eggs: n, butter: n, flour: n, sugar: n }
    }

    pub const fn eggs_and_butter(n: u32) -> Self {
        Self { eggs: n, butter: n, flour: 0, sugar: 0 }
    }

    pub const fn flour_and_sugar(n: u32) -> Self {
        Self { eggs: 0, butter: 0, flour: n, sugar: n }
    }

    pub fn get(&self, ingredient: Ingredient) -> u32 {
        match ingredient {
            Ingredient::Eggs   => self.eggs,
            Ingredient::Butter => self.butter,
            Ingredient::Flour  => self.flour,
            Ingredient::Sugar  => self.sugar,
        }
    }

    fn slot(&mut self, ingredient: Ingredient) -> &mut u32 {
        match ingredient {
            Ingredient::Eggs   => &mut self.eggs,
            Ingredient::Butter => &mut self.butter,
            Ingredient::Flour  => &mut self.flour,
            Ingredient::Sugar  => &mut self.sugar,
        }
    }

    /// Largest single amount.
    pub fn max(&self) -> u32 {
        Ingredient::ALL.iter().map(|&i| self.get(i)).max().unwrap_or(0)
    }

    /// Every ingredient of `delivery` fits on top of `self` without any
    /// counter exceeding `cap`.
    pub fn has_room(&self, delivery: &Pantry, cap: u32) -> bool {
        Ingredient::ALL.iter().all(|&i| self.get(i) + delivery.get(i) <= cap)
    }

    /// At least `batch` of every ingredient is present.
    pub fn can_bake(&self, batch: u32) -> bool {
        Ingredient::ALL.iter().all(|&i| self.get(i) >= batch)
    }

    fn add(&mut self, other: &Pantry) {
        for i in Ingredient::ALL {
            *self.slot(i) += other.get(i);
        }
    }

    fn sub(&mut self, other: &Pantry) {
        for i in Ingredient::ALL {
            *self.slot(i) -= other.get(i);
        }
    }
}

impl fmt::Display for Pantry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "eggs={} butter={} flour={} sugar={}", self.eggs, self.butter, self.flour, self.sugar)
    }
}

/// Ingredient store between the trucks and the oven.  Every counter is
/// bounded by the same `cap`.
pub struct BakeryStorage {
    cap:    u32,
    pantry: Monitor<Pantry>,
}

impl BakeryStorage {
    pub fn new(cap: u32, shutdown: Shutdown, poll_ms: u64) -> Self {
        Self { cap, pantry: Monitor::new(Pantry::default(), shutdown, poll_ms) }
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.cap
    }

    /// Block until every ingredient of `delivery` fits, then add all of
    /// them at once.
    pub fn unload(&self, delivery: Pantry) -> StationResult<()> {
        if delivery.max() > self.cap {
            return Err(StationError::ExceedsCapacity {
                station:   "bakery storage",
                requested: delivery.max(),
                capacity:  self.cap,
            });
        }
        let cap = self.cap;
        self.pantry.wait_and_update(|p| p.has_room(&delivery, cap), |p| p.add(&delivery))
    }

    /// Block until `batch` of every ingredient is present, then debit them
    /// all at once.  Returns the debited amounts.
    pub fn take_for_bake(&self, batch: u32) -> StationResult<Pantry> {
        if batch > self.cap {
            return Err(StationError::ExceedsCapacity {
                station:   "bakery storage",
                requested: batch,
                capacity:  self.cap,
            });
        }
        let debit = Pantry::uniform(batch);
        self.pantry.wait_and_update(
            |p| p.can_bake(batch),
            |p| {
                p.sub(&debit);
                debit
            },
        )
    }

    pub fn level(&self) -> Pantry {
        self.pantry.snapshot()
    }
}
