//! Chickens: pick a nest, lay one or two eggs, roost, repeat.
//!
//! A chicken never waits at a nest.  If the nest it walked to is full or
//! occupied (or the walk itself fails) it immediately picks a different
//! nest, uniformly among the others.

use std::sync::Arc;

use log::debug;

use farm_core::{Counter, EntityKind, Layer, Point, RandomSource};
use farm_spatial::Entity;
use farm_station::Nest;

use crate::{Actor, ActorContext, ActorResult};

/// Horizontal spacing of egg icons on a nest.
const ICON_SPACING: i32 = 20;

pub struct Chicken<R> {
    ctx:   ActorContext,
    body:  Entity,
    rng:   R,
    roost: Point,
    nest:  usize,
}

impl<R: RandomSource> Chicken<R> {
    pub fn new(ctx: ActorContext, body: Entity, roost: Point, first_nest: usize, rng: R) -> Self {
        let nest = first_nest % ctx.stations.nests.len().max(1);
        Self { ctx, body, rng, roost, nest }
    }

    /// Index of the nest the chicken is heading for next.
    #[inline]
    pub fn target_nest(&self) -> usize {
        self.nest
    }

    #[inline]
    pub fn body(&self) -> &Entity {
        &self.body
    }

    /// Switch to a nest other than the current one.
    fn relocate(&mut self) {
        let n = self.ctx.stations.nests.len();
        if n > 1 {
            let k = self.rng.pick_index(n - 1);
            self.nest = if k >= self.nest { k + 1 } else { k };
        }
    }

    /// Where the `slot`-th egg icon of a nest is drawn.
    fn icon_spot(nest: Point, slot: u32) -> Point {
        nest.offset((slot as i32 - 1) * ICON_SPACING, 0)
    }

    fn sit_and_lay(&mut self, nest: &Nest) -> ActorResult<bool> {
        let Some(permit) = nest.try_sit(self.body.id) else {
            return Ok(false);
        };
        let walk = self.ctx.walk();
        if !self.ctx.go(&mut self.body, nest.position(), walk, &mut self.rng)? {
            return Ok(false);
        }

        let caps = &self.ctx.config.capacities;
        let wanted = self.rng.range_inclusive(i64::from(caps.lay_min), i64::from(caps.lay_max)) as u32;
        let count = wanted.min(permit.room());
        let timing = &self.ctx.config.timing;
        let (lo, hi) = (timing.lay_min_ms, timing.lay_max_ms);
        for _ in 0..count {
            self.ctx.sleep_between(&mut self.rng, lo, hi)?;
            let slot = nest.snapshot().eggs;
            let icon = self.ctx.icons.next_id();
            if !permit.lay(icon) {
                break;
            }
            self.ctx.registry().publish(Entity::new(icon, EntityKind::Egg, Self::icon_spot(nest.position(), slot), Layer::Icon));
            self.ctx.count(Counter::EggsLaid, 1);
        }
        debug!("{} laid in nest {}", self.body.id, nest.id().0);
        Ok(true)
    }
}

impl<R: RandomSource> Actor for Chicken<R> {
    fn label(&self) -> String {
        format!("chicken-{}", self.body.id.0)
    }

    fn cycle(&mut self) -> ActorResult<()> {
        let nest = Arc::clone(&self.ctx.stations.nests[self.nest]);
        let approach = self.ctx.config.layout.approach_spot(nest.position());
        let walk = self.ctx.walk();

        if !self.ctx.go(&mut self.body, approach, walk, &mut self.rng)? {
            self.relocate();
            return Ok(());
        }
        if !self.sit_and_lay(&nest)? {
            debug!("{} turned away from nest {}", self.body.id, nest.id().0);
            self.relocate();
            return Ok(());
        }

        self.ctx.go(&mut self.body, self.roost, walk, &mut self.rng)?;
        self.relocate();
        Ok(())
    }
}
