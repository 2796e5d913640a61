//! The road crossing expressed as a [`StepGuard`].

use log::debug;

use farm_core::{EntityId, Rect};
use farm_mobility::{MobilityError, MobilityResult, StepGuard};
use farm_station::{CrossingPermit, Intersection};

/// Takes the crossing before the first step whose center lies inside it and
/// gives it back after the first step that leaves it again.
///
/// The permit is held across ticks, so a truck blocked inside the crossing
/// keeps everyone else out until it has cleared the region.
pub struct IntersectionGuard<'a> {
    crossing: &'a Intersection,
    truck:    EntityId,
    permit:   Option<CrossingPermit<'a>>,
    entered:  bool,
}

impl<'a> IntersectionGuard<'a> {
    pub fn new(crossing: &'a Intersection, truck: EntityId) -> Self {
        Self { crossing, truck, permit: None, entered: false }
    }

    #[inline]
    pub fn holds_crossing(&self) -> bool {
        self.permit.is_some()
    }

    /// Drop a permit taken for a step that was never committed.
    pub fn release_if_outside(&mut self, body: &Rect) {
        if self.permit.is_some() && !self.crossing.contains(body.center) {
            debug!("{} backs off the crossing", self.truck);
            self.permit = None;
            self.entered = false;
        }
    }
}

impl StepGuard for IntersectionGuard<'_> {
    fn before_step(&mut self, _from: &Rect, to: &Rect) -> MobilityResult<()> {
        if self.permit.is_none() && self.crossing.contains(to.center) {
            let permit = self.crossing.enter(self.truck).map_err(|_| MobilityError::ShuttingDown)?;
            self.permit = Some(permit);
        }
        Ok(())
    }

    fn after_step(&mut self, now: &Rect) {
        let inside = self.crossing.contains(now.center);
        if inside {
            self.entered = true;
        } else if self.entered {
            self.permit = None;
            self.entered = false;
        }
    }
}
