//! Cows graze.  They only exist to get in everyone's way.

use farm_core::{Point, RandomSource, Rect};
use farm_spatial::Entity;

use crate::{Actor, ActorContext, ActorResult};

pub struct Cow<R> {
    ctx:     ActorContext,
    body:    Entity,
    rng:     R,
    pasture: Rect,
}

impl<R: RandomSource> Cow<R> {
    pub fn new(ctx: ActorContext, body: Entity, rng: R) -> Self {
        let pasture = ctx.config.layout.pasture;
        Self { ctx, body, rng, pasture }
    }

    #[inline]
    pub fn body(&self) -> &Entity {
        &self.body
    }

    /// Uniform point inside the pasture.
    fn pick_spot(&mut self) -> Point {
        let p = &self.pasture;
        let x = self.rng.range_inclusive(i64::from(p.left()), i64::from(p.right())) as i32;
        let y = self.rng.range_inclusive(i64::from(p.bottom()), i64::from(p.top())) as i32;
        Point::new(x, y)
    }
}

impl<R: RandomSource> Actor for Cow<R> {
    fn label(&self) -> String {
        format!("cow-{}", self.body.id.0)
    }

    fn cycle(&mut self) -> ActorResult<()> {
        let spot = self.pick_spot();
        let stroll = self.ctx.stroll();
        self.ctx.go(&mut self.body, spot, stroll, &mut self.rng)?;
        self.ctx.sleep_ms(self.ctx.config.timing.cow_pause_ms)
    }
}
