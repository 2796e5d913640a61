//! The single-slot road crossing.

use log::trace;

use farm_core::{EntityId, Point, Rect, Shutdown};

use crate::{Monitor, StationResult};

/// A square of road that at most one truck may occupy.  Independent of the
/// spatial registry: a truck needs both the crossing and a free rectangle.
pub struct Intersection {
    region:   Rect,
    occupant: Monitor<Option<EntityId>>,
}

impl Intersection {
    pub fn new(region: Rect, shutdown: Shutdown, poll_ms: u64) -> Self {
        Self { region, occupant: Monitor::new(None, shutdown, poll_ms) }
    }

    #[inline]
    pub fn region(&self) -> &Rect {
        &self.region
    }

    /// `true` if a truck centered at `p` is inside the crossing.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.region.contains_point(p)
    }

    /// Block until the crossing is free and take it.
    pub fn enter(&self, truck: EntityId) -> StationResult<CrossingPermit<'_>> {
        self.occupant.wait_and_update(Option::is_none, |o| *o = Some(truck))?;
        trace!("{truck} holds the crossing");
        Ok(CrossingPermit { intersection: self, truck })
    }

    pub fn occupant(&self) -> Option<EntityId> {
        self.occupant.snapshot()
    }
}

pub struct CrossingPermit<'a> {
    intersection: &'a Intersection,
    truck:        EntityId,
}

impl CrossingPermit<'_> {
    #[inline]
    pub fn truck(&self) -> EntityId {
        self.truck
    }
}

impl Drop for CrossingPermit<'_> {
    fn drop(&mut self) {
        let truck = self.truck;
        self.intersection.occupant.update(|o| {
            if *o == Some(truck) {
                *o = None;
            }
        });
        trace!("{truck} left the crossing");
    }
}
