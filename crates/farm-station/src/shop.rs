//! The shop counter: one child transacts at a time.

use farm_core::{EntityId, Point, Shutdown};

use crate::{Monitor, StationResult};

pub struct ShopCounter {
    entrance: Point,
    occupant: Monitor<Option<EntityId>>,
}

impl ShopCounter {
    pub fn new(entrance: Point, shutdown: Shutdown, poll_ms: u64) -> Self {
        Self { entrance, occupant: Monitor::new(None, shutdown, poll_ms) }
    }

    #[inline]
    pub fn entrance(&self) -> Point {
        self.entrance
    }

    /// Block until the counter is free and take it.
    pub fn enter(&self, child: EntityId) -> StationResult<CounterPermit<'_>> {
        self.occupant.wait_and_update(Option::is_none, |o| *o = Some(child))?;
        Ok(CounterPermit { shop: self, child })
    }

    pub fn occupant(&self) -> Option<EntityId> {
        self.occupant.snapshot()
    }
}

pub struct CounterPermit<'a> {
    shop:  &'a ShopCounter,
    child: EntityId,
}

impl Drop for CounterPermit<'_> {
    fn drop(&mut self) {
        let child = self.child;
        self.shop.occupant.update(|o| {
            if *o == Some(child) {
                *o = None;
            }
        });
    }
}
