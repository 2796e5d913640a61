//! Everything an actor is handed at construction.

use std::sync::Arc;

use log::debug;

use farm_core::{Counter, FarmConfig, Point, RandomSource, Shutdown, Statistics};
use farm_mobility::{Gait, MobilityEngine, MobilityError};
use farm_spatial::{Entity, EntityIdPool, SpatialRegistry};
use farm_station::Stations;

use crate::ActorResult;

/// Shared handles injected into every actor.  Cheap to clone.
#[derive(Clone)]
pub struct ActorContext {
    pub config:   Arc<FarmConfig>,
    pub engine:   MobilityEngine,
    pub stations: Stations,
    pub stats:    Arc<Statistics>,
    pub icons:    Arc<EntityIdPool>,
    pub shutdown: Shutdown,
}

impl ActorContext {
    /// Wire a context from a validated configuration.
    pub fn new(
        config:   Arc<FarmConfig>,
        registry: Arc<SpatialRegistry>,
        stations: Stations,
        stats:    Arc<Statistics>,
        shutdown: Shutdown,
    ) -> Self {
        let engine = MobilityEngine::new(
            registry,
            config.layout.bounds,
            config.movement.clone(),
            &config.timing,
            shutdown.clone(),
        );
        Self { config, engine, stations, stats, icons: Arc::new(EntityIdPool::default()), shutdown }
    }

    /// Draw egg icon ids from `icons` instead of the default pool.
    pub fn with_icons(mut self, icons: Arc<EntityIdPool>) -> Self {
        self.icons = icons;
        self
    }

    #[inline]
    pub fn registry(&self) -> &Arc<SpatialRegistry> {
        self.engine.registry()
    }

    #[inline]
    pub fn walk(&self) -> Gait {
        Gait::walk(&self.config.movement)
    }

    #[inline]
    pub fn stroll(&self) -> Gait {
        Gait::stroll(&self.config.movement)
    }

    #[inline]
    pub fn count(&self, counter: Counter, n: u32) {
        self.stats.add(counter, u64::from(n));
    }

    /// Interruptible sleep.
    pub fn sleep_ms(&self, ms: u64) -> ActorResult<()> {
        Ok(self.shutdown.sleep_ms(ms)?)
    }

    /// Sleep for a uniformly drawn duration in `lo..=hi` milliseconds.
    pub fn sleep_between<R: RandomSource>(&self, rng: &mut R, lo: u64, hi: u64) -> ActorResult<()> {
        let ms = rng.range_inclusive(lo as i64, hi as i64) as u64;
        self.sleep_ms(ms)
    }

    /// Move `body` toward `target`.  `Ok(false)` means the target was
    /// declared unreachable; the caller picks its fallback.
    pub fn go<R: RandomSource>(&self, body: &mut Entity, target: Point, gait: Gait, rng: &mut R) -> ActorResult<bool> {
        match self.engine.move_to(body, target, gait, rng) {
            Ok(()) => Ok(true),
            Err(MobilityError::Unreachable { .. }) => {
                debug!("{} gives up on {target}", body.id);
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Move `body` to `target`, re-planning after every unreachable verdict
    /// until it arrives or shutdown is requested.
    pub fn go_persistently<R: RandomSource>(
        &self,
        body:   &mut Entity,
        target: Point,
        gait:   Gait,
        rng:    &mut R,
    ) -> ActorResult<()> {
        while !self.go(body, target, gait, rng)? {}
        Ok(())
    }
}
