//! Delivery trucks: load at home, cross to the bakery, unload, drive back.

use log::{debug, info};

use farm_core::{Counter, Point, RandomSource};
use farm_mobility::MobilityError;
use farm_spatial::Entity;
use farm_station::Pantry;

use crate::{Actor, ActorContext, ActorResult, IntersectionGuard};

/// What a truck carries, and where it comes from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cargo {
    /// Eggs drained from the barn pool, plus butter made on the spot.
    EggsAndButter,
    /// Flour and sugar with no upstream constraint.
    FlourAndSugar,
}

impl Cargo {
    pub fn as_str(self) -> &'static str {
        match self {
            Cargo::EggsAndButter => "egg",
            Cargo::FlourAndSugar => "flour",
        }
    }
}

pub struct Truck<R> {
    ctx:   ActorContext,
    body:  Entity,
    rng:   R,
    cargo: Cargo,
    /// Home first, bakery dock last.
    road:  Vec<Point>,
}

impl<R: RandomSource> Truck<R> {
    pub fn new(ctx: ActorContext, body: Entity, cargo: Cargo, rng: R) -> Self {
        let road = match cargo {
            Cargo::EggsAndButter => ctx.config.layout.egg_road.clone(),
            Cargo::FlourAndSugar => ctx.config.layout.flour_road.clone(),
        };
        Self { ctx, body, rng, cargo, road }
    }

    #[inline]
    pub fn cargo(&self) -> Cargo {
        self.cargo
    }

    #[inline]
    pub fn body(&self) -> &Entity {
        &self.body
    }

    /// Fill up at home.  Only the egg truck can block here.
    fn load(&self) -> ActorResult<Pantry> {
        let caps = &self.ctx.config.capacities;
        let delivery = match self.cargo {
            Cargo::EggsAndButter => {
                let eggs = self.ctx.stations.barn.take_batch(caps.barn_batch)?;
                self.ctx.count(Counter::EggsLoaded, eggs);
                self.ctx.count(Counter::ButterProduced, caps.truck_batch);
                Pantry { eggs, butter: caps.truck_batch, flour: 0, sugar: 0 }
            }
            Cargo::FlourAndSugar => {
                self.ctx.count(Counter::FlourProduced, caps.truck_batch);
                self.ctx.count(Counter::SugarProduced, caps.truck_batch);
                Pantry::flour_and_sugar(caps.truck_batch)
            }
        };
        self.ctx.sleep_ms(self.ctx.config.timing.load_ms)?;
        Ok(delivery)
    }

    /// Visit `waypoints` in order, taking the crossing on the way.  A
    /// waypoint declared unreachable is retried from wherever the truck
    /// stopped.
    fn drive(&mut self, waypoints: &[Point]) -> ActorResult<()> {
        let crossing = &*self.ctx.stations.intersection;
        let mut guard = IntersectionGuard::new(crossing, self.body.id);
        let walk = self.ctx.walk();
        for &waypoint in waypoints {
            loop {
                match self.ctx.engine.move_to_guarded(&mut self.body, waypoint, walk, &mut self.rng, &mut guard) {
                    Ok(()) => break,
                    Err(MobilityError::Unreachable { .. }) => {
                        debug!("{} retries {waypoint}", self.body.id);
                        guard.release_if_outside(&self.body.rect);
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        Ok(())
    }
}

impl<R: RandomSource> Actor for Truck<R> {
    fn label(&self) -> String {
        format!("{}-truck-{}", self.cargo.as_str(), self.body.id.0)
    }

    fn cycle(&mut self) -> ActorResult<()> {
        let delivery = self.load()?;

        let outbound: Vec<Point> = self.road.iter().skip(1).copied().collect();
        self.drive(&outbound)?;

        self.ctx.stations.storage.unload(delivery)?;
        self.ctx.count(Counter::EggsDelivered, delivery.eggs);
        info!("{} unloaded {delivery}", self.body.id);
        self.ctx.sleep_ms(self.ctx.config.timing.unload_ms)?;

        let inbound: Vec<Point> = self.road.iter().rev().skip(1).copied().collect();
        self.drive(&inbound)
    }
}
