//! The single oven: `Idle → Claimed → Baking → Idle`.
//!
//! A tender claims the oven before gathering ingredients; the oven only
//! reports `Baking` once the ingredients are actually in.

use farm_core::{EntityId, Shutdown};

use crate::{Monitor, StationResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OvenState {
    Idle,
    Claimed(EntityId),
    Baking(EntityId),
}

impl OvenState {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, OvenState::Idle)
    }

    #[inline]
    pub fn is_baking(&self) -> bool {
        matches!(self, OvenState::Baking(_))
    }
}

pub struct Oven {
    state: Monitor<OvenState>,
}

impl Oven {
    pub fn new(shutdown: Shutdown, poll_ms: u64) -> Self {
        Self { state: Monitor::new(OvenState::Idle, shutdown, poll_ms) }
    }

    /// Block until the oven is idle and claim it for `tender`.
    pub fn claim(&self, tender: EntityId) -> StationResult<OvenPermit<'_>> {
        self.state.wait_and_update(OvenState::is_idle, |s| *s = OvenState::Claimed(tender))?;
        Ok(OvenPermit { oven: self, tender })
    }

    pub fn state(&self) -> OvenState {
        self.state.snapshot()
    }
}

/// Exclusive use of the oven.  Dropping it returns the oven to `Idle`.
pub struct OvenPermit<'a> {
    oven:   &'a Oven,
    tender: EntityId,
}

impl OvenPermit<'_> {
    /// Ingredients are in: the bake has started.
    pub fn begin_baking(&self) {
        let tender = self.tender;
        self.oven.state.update(|s| *s = OvenState::Baking(tender));
    }
}

impl Drop for OvenPermit<'_> {
    fn drop(&mut self) {
        self.oven.state.update(|s| *s = OvenState::Idle);
    }
}
