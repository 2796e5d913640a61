//! The farmer: empties full nests in turn and carries the eggs to the barn.

use std::sync::Arc;

use log::{debug, info};

use farm_core::{Counter, Point, RandomSource};
use farm_spatial::Entity;

use crate::{Actor, ActorContext, ActorResult};

pub struct Farmer<R> {
    ctx:  ActorContext,
    body: Entity,
    rng:  R,
    next: usize,
    rest: Point,
}

impl<R: RandomSource> Farmer<R> {
    pub fn new(ctx: ActorContext, body: Entity, rng: R) -> Self {
        let rest = ctx.config.layout.farmer_rest;
        Self { ctx, body, rng, next: 0, rest }
    }

    #[inline]
    pub fn next_nest(&self) -> usize {
        self.next
    }

    #[inline]
    pub fn body(&self) -> &Entity {
        &self.body
    }
}

impl<R: RandomSource> Actor for Farmer<R> {
    fn label(&self) -> String {
        format!("farmer-{}", self.body.id.0)
    }

    fn cycle(&mut self) -> ActorResult<()> {
        let nests = &self.ctx.stations.nests;
        let nest = Arc::clone(&nests[self.next]);
        self.next = (self.next + 1) % nests.len();

        let walk = self.ctx.walk();
        let spot = self.ctx.config.layout.collect_spot(nest.position());
        if !self.ctx.go(&mut self.body, spot, walk, &mut self.rng)? {
            debug!("{} skips nest {}", self.body.id, nest.id().0);
            return Ok(());
        }

        let haul = nest.collect()?;
        let registry = self.ctx.registry();
        for icon in &haul.icons {
            registry.remove(*icon);
        }
        self.ctx.count(Counter::EggsCollected, haul.eggs);
        info!("{} collected {} eggs from nest {}", self.body.id, haul.eggs, nest.id().0);

        self.ctx.go_persistently(&mut self.body, self.rest, walk, &mut self.rng)?;
        self.ctx.stations.barn.deposit(haul.eggs);
        self.ctx.sleep_ms(self.ctx.config.timing.farmer_rest_ms)
    }
}
