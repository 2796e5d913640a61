//! The display-refresh task.

use std::sync::Arc;
use std::time::{Duration, Instant};

use log::info;

use farm_core::{FarmConfig, Shutdown, Statistics};
use farm_spatial::SpatialRegistry;

use crate::FarmObserver;

/// Periodic snapshot of the registry and statistics handed to an observer.
/// Never mutates simulation state.
pub struct RefreshTask<O> {
    config:   Arc<FarmConfig>,
    registry: Arc<SpatialRegistry>,
    stats:    Arc<Statistics>,
    stop:     Shutdown,
    observer: O,
}

impl<O: FarmObserver> RefreshTask<O> {
    pub fn new(
        config:   Arc<FarmConfig>,
        registry: Arc<SpatialRegistry>,
        stats:    Arc<Statistics>,
        stop:     Shutdown,
        observer: O,
    ) -> Self {
        Self { config, registry, stats, stop, observer }
    }

    /// Draw frames until `stop` is triggered, then hand the observer back.
    pub fn run(mut self) -> O {
        let started = Instant::now();
        let log_every = Duration::from_millis(self.config.timing.stats_log_ms);
        let mut last_log = started;
        self.observer.on_start(&self.config);

        loop {
            self.frame();
            if last_log.elapsed() >= log_every {
                let snapshot = self.stats.snapshot();
                info!("{snapshot}");
                self.observer.on_stats(started.elapsed(), &snapshot);
                last_log = Instant::now();
            }
            if self.stop.sleep_ms(self.config.timing.refresh_ms).is_err() {
                break;
            }
        }

        self.frame();
        self.observer.on_stop(&self.stats.snapshot());
        self.observer
    }

    fn frame(&mut self) {
        let snapshot = self.stats.snapshot();
        let observer = &mut self.observer;
        self.registry.render(|view| observer.redisplay(view, &snapshot));
    }
}
