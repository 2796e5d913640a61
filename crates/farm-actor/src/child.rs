//! Children: walk to the shop, buy a few cakes, go home, rest.

use std::time::Duration;

use log::{debug, info, warn};

use farm_core::{Counter, Point, RandomSource};
use farm_spatial::Entity;

use crate::{Actor, ActorContext, ActorResult};

pub struct Child<R> {
    ctx:  ActorContext,
    body: Entity,
    rng:  R,
    rest: Point,
}

impl<R: RandomSource> Child<R> {
    pub fn new(ctx: ActorContext, body: Entity, rest: Point, rng: R) -> Self {
        Self { ctx, body, rng, rest }
    }

    #[inline]
    pub fn body(&self) -> &Entity {
        &self.body
    }

    fn go_home(&mut self) -> ActorResult<()> {
        let stroll = self.ctx.stroll();
        self.ctx.go(&mut self.body, self.rest, stroll, &mut self.rng)?;
        self.ctx.sleep_ms(self.ctx.config.timing.child_pause_ms)
    }
}

impl<R: RandomSource> Actor for Child<R> {
    fn label(&self) -> String {
        format!("child-{}", self.body.id.0)
    }

    fn cycle(&mut self) -> ActorResult<()> {
        let max = self.ctx.config.capacities.max_cakes_per_child;
        let want = self.rng.range_inclusive(1, i64::from(max)) as u32;

        let shop = &self.ctx.stations.shop;
        let gait = self.ctx.stroll().with_tolerance(self.ctx.config.layout.shop_tolerance);
        if !self.ctx.go(&mut self.body, shop.entrance(), gait, &mut self.rng)? {
            debug!("{} could not reach the shop", self.body.id);
            return self.go_home();
        }

        // Nobody else can buy while this child holds the counter, so a shelf
        // short of `want` may never change; the wait is bounded.
        let patience = Duration::from_millis(self.ctx.config.timing.shop_wait_ms);
        let sold = {
            let _counter = shop.enter(self.body.id)?;
            self.ctx.stations.stock.sell_within(want, patience)?
        };
        if sold {
            self.ctx.count(Counter::CakesSold, want);
            info!("{} bought {want} cakes", self.body.id);
        } else {
            warn!("{} gave up waiting for {want} cakes", self.body.id);
        }

        self.go_home()
    }
}
