//! Bakery cake stock.
//!
//! The oven reserves shelf space before it takes any ingredients, so a
//! bake never starts unless its cakes are guaranteed to fit.  Reserved
//! space counts against the capacity exactly like cakes on the shelf.

use std::time::Duration;

use farm_core::Shutdown;

use crate::{Monitor, StationError, StationResult};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Shelf {
    pub cakes:    u32,
    pub reserved: u32,
}

impl Shelf {
    /// `n` more cakes fit once every open reservation is fulfilled.
    #[inline]
    pub fn has_room(&self, n: u32, cap: u32) -> bool {
        self.cakes + self.reserved + n <= cap
    }

    #[inline]
    pub fn can_sell(&self, n: u32) -> bool {
        self.cakes >= n
    }
}

pub struct BakeryStock {
    cap:   u32,
    shelf: Monitor<Shelf>,
}

impl BakeryStock {
    pub fn new(cap: u32, shutdown: Shutdown, poll_ms: u64) -> Self {
        Self { cap, shelf: Monitor::new(Shelf::default(), shutdown, poll_ms) }
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.cap
    }

    fn check_fits(&self, n: u32) -> StationResult<()> {
        if n > self.cap {
            return Err(StationError::ExceedsCapacity { station: "bakery stock", requested: n, capacity: self.cap });
        }
        Ok(())
    }

    /// Block until `n` cakes fit, then hold that space.
    pub fn reserve(&self, n: u32) -> StationResult<StockReservation<'_>> {
        self.check_fits(n)?;
        let cap = self.cap;
        self.shelf.wait_and_update(|s| s.has_room(n, cap), |s| s.reserved += n)?;
        Ok(StockReservation { stock: self, cakes: n, open: true })
    }

    /// Block until at least `n` cakes are on the shelf, then take them.
    pub fn sell(&self, n: u32) -> StationResult<()> {
        self.check_fits(n)?;
        self.shelf.wait_and_update(|s| s.can_sell(n), |s| s.cakes -= n)
    }

    /// [`sell`](Self::sell) that waits at most `limit`.  Returns whether
    /// the cakes were taken.
    pub fn sell_within(&self, n: u32, limit: Duration) -> StationResult<bool> {
        self.check_fits(n)?;
        let sold = self.shelf.wait_and_update_within(|s| s.can_sell(n), limit, |s| s.cakes -= n)?;
        Ok(sold.is_some())
    }

    pub fn cakes(&self) -> u32 {
        self.shelf.read(|s| s.cakes)
    }

    pub fn shelf(&self) -> Shelf {
        self.shelf.snapshot()
    }
}

/// Shelf space held for one bake.  Dropping it unfulfilled gives the space
/// back.
pub struct StockReservation<'a> {
    stock: &'a BakeryStock,
    cakes: u32,
    open:  bool,
}

impl StockReservation<'_> {
    #[inline]
    pub fn cakes(&self) -> u32 {
        self.cakes
    }

    /// Turn the reserved space into cakes on the shelf.
    pub fn fulfil(mut self) {
        let n = self.cakes;
        self.stock.shelf.update(|s| {
            s.reserved -= n;
            s.cakes += n;
        });
        self.open = false;
    }
}

impl Drop for StockReservation<'_> {
    fn drop(&mut self) {
        if self.open {
            let n = self.cakes;
            self.stock.shelf.update(|s| s.reserved -= n);
        }
    }
}
