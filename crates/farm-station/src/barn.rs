//! Barn egg pool: filled by the farmer, drained in batches by the egg truck.

use farm_core::Shutdown;

use crate::{Monitor, StationResult};

pub struct Barn {
    eggs: Monitor<u32>,
}

impl Barn {
    pub fn new(shutdown: Shutdown, poll_ms: u64) -> Self {
        Self { eggs: Monitor::new(0, shutdown, poll_ms) }
    }

    pub fn deposit(&self, eggs: u32) {
        self.eggs.update(|pool| *pool += eggs);
    }

    /// Block until the pool holds at least `batch` eggs, then remove
    /// exactly `batch`.
    pub fn take_batch(&self, batch: u32) -> StationResult<u32> {
        self.eggs.wait_and_update(
            |pool| *pool >= batch,
            |pool| {
                *pool -= batch;
                batch
            },
        )
    }

    pub fn eggs(&self) -> u32 {
        self.eggs.snapshot()
    }
}
