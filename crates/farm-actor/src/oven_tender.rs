//! The oven tender.  Never moves.

use log::info;

use farm_core::{Counter, EntityId};

use crate::{Actor, ActorContext, ActorResult};

/// Bakes whenever the shelf has room for a full yield.
///
/// The order inside a cycle keeps every wait on a single station lock:
/// claim the oven, reserve shelf space, then wait for ingredients.  A
/// reservation dropped by shutdown gives its space back.
pub struct OvenTender {
    ctx: ActorContext,
    id:  EntityId,
}

impl OvenTender {
    pub fn new(ctx: ActorContext, id: EntityId) -> Self {
        Self { ctx, id }
    }

    #[inline]
    pub fn id(&self) -> EntityId {
        self.id
    }
}

impl Actor for OvenTender {
    fn label(&self) -> String {
        format!("oven-{}", self.id.0)
    }

    fn cycle(&mut self) -> ActorResult<()> {
        let caps = &self.ctx.config.capacities;
        let stations = &self.ctx.stations;

        let permit = stations.oven.claim(self.id)?;
        let reservation = stations.stock.reserve(caps.bake_yield)?;
        let used = stations.storage.take_for_bake(caps.bake_batch)?;
        self.ctx.count(Counter::EggsUsed, used.eggs);
        self.ctx.count(Counter::ButterUsed, used.butter);
        self.ctx.count(Counter::FlourUsed, used.flour);
        self.ctx.count(Counter::SugarUsed, used.sugar);

        permit.begin_baking();
        self.ctx.sleep_ms(self.ctx.config.timing.bake_ms)?;

        let cakes = reservation.cakes();
        reservation.fulfil();
        self.ctx.count(Counter::CakesProduced, cakes);
        info!("{} baked {cakes} cakes", self.id);
        drop(permit);
        Ok(())
    }
}
