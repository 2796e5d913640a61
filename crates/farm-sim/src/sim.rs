//! `Farm` (built, not running) and `RunningFarm` (threads live).

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use log::{error, info, warn};

use farm_actor::{Actor, ActorContext, ActorResult};
use farm_core::{FarmConfig, Shutdown, Statistics, StatsSnapshot};
use farm_spatial::SpatialRegistry;
use farm_station::{StationLevels, Stations};

use crate::refresh::RefreshTask;
use crate::{FarmObserver, SimError, SimResult};

// ── Farm ──────────────────────────────────────────────────────────────────────

/// A fully placed farm whose actors have not started yet.
///
/// Create via [`FarmBuilder`][crate::FarmBuilder].
pub struct Farm {
    ctx:    ActorContext,
    actors: Vec<Box<dyn Actor>>,
}

impl Farm {
    pub(crate) fn new(ctx: ActorContext, actors: Vec<Box<dyn Actor>>) -> Self {
        Self { ctx, actors }
    }

    pub fn config(&self) -> &FarmConfig {
        &self.ctx.config
    }

    pub fn registry(&self) -> &Arc<SpatialRegistry> {
        self.ctx.registry()
    }

    pub fn stations(&self) -> &Stations {
        &self.ctx.stations
    }

    pub fn statistics(&self) -> &Arc<Statistics> {
        &self.ctx.stats
    }

    /// A handle that stops the farm once it is running.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.ctx.shutdown.clone()
    }

    /// Thread names, one per actor, in spawn order.
    pub fn labels(&self) -> Vec<String> {
        self.actors.iter().map(|a| a.label()).collect()
    }

    /// Spawn one thread per actor plus the display-refresh thread.
    ///
    /// If any spawn fails, the threads already started are stopped and
    /// joined before the error is returned.
    pub fn start<O: FarmObserver + 'static>(self, observer: O) -> SimResult<RunningFarm<O>> {
        let refresh_stop = Shutdown::new();
        let task = RefreshTask::new(
            Arc::clone(&self.ctx.config),
            Arc::clone(self.ctx.registry()),
            Arc::clone(&self.ctx.stats),
            refresh_stop.clone(),
            observer,
        );

        let mut running = RunningFarm {
            ctx:          self.ctx,
            actors:       Vec::with_capacity(self.actors.len()),
            refresh:      None,
            refresh_stop,
            started:      Instant::now(),
        };

        let refresh = thread::Builder::new()
            .name("refresh".into())
            .spawn(move || task.run())
            .map_err(|source| SimError::Spawn { label: "refresh".into(), source })?;
        running.refresh = Some(refresh);

        for mut actor in self.actors {
            let label = actor.label();
            let spawned = thread::Builder::new().name(label.clone()).spawn(move || actor.run());
            match spawned {
                Ok(handle) => running.actors.push((label, handle)),
                Err(source) => {
                    error!("could not spawn {label}: {source}");
                    running.stop_all();
                    return Err(SimError::Spawn { label, source });
                }
            }
        }
        info!("farm started with {} actor threads", running.actors.len());
        Ok(running)
    }

    /// Start, let the farm run for `duration`, then shut it down.
    pub fn run_for<O: FarmObserver + 'static>(self, duration: Duration, observer: O) -> SimResult<FarmReport<O>> {
        let running = self.start(observer)?;
        // A pre-raised shutdown handle ends the run early.
        let _ = running.ctx.shutdown.sleep(duration);
        running.shutdown()
    }
}

// ── RunningFarm ───────────────────────────────────────────────────────────────

/// A farm whose threads are live.  Dropping it without calling
/// [`shutdown`](Self::shutdown) raises the shutdown flag and detaches the
/// threads.
pub struct RunningFarm<O: FarmObserver + 'static> {
    ctx:          ActorContext,
    actors:       Vec<(String, JoinHandle<ActorResult<()>>)>,
    refresh:      Option<JoinHandle<O>>,
    refresh_stop: Shutdown,
    started:      Instant,
}

/// What a run leaves behind.
pub struct FarmReport<O> {
    /// Counters after every actor stopped.
    pub stats:    StatsSnapshot,
    /// Station levels after every actor stopped.
    pub levels:   StationLevels,
    pub elapsed:  Duration,
    pub observer: O,
}

impl<O: FarmObserver + 'static> RunningFarm<O> {
    pub fn config(&self) -> &FarmConfig {
        &self.ctx.config
    }

    pub fn registry(&self) -> &Arc<SpatialRegistry> {
        self.ctx.registry()
    }

    pub fn stations(&self) -> &Stations {
        &self.ctx.stations
    }

    /// Live counters.  Not a consistent cut.
    pub fn stats(&self) -> StatsSnapshot {
        self.ctx.stats.snapshot()
    }

    pub fn levels(&self) -> StationLevels {
        self.ctx.stations.levels()
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Number of actor threads that have not returned.
    pub fn live_actors(&self) -> usize {
        self.actors.iter().filter(|(_, h)| !h.is_finished()).count()
    }

    /// Poll the counters every `refresh_ms` until `done` holds or `limit`
    /// elapses.  Returns whether `done` held.
    pub fn wait_for(&self, limit: Duration, mut done: impl FnMut(&StatsSnapshot) -> bool) -> bool {
        let deadline = Instant::now() + limit;
        let poll = Duration::from_millis(self.ctx.config.timing.refresh_ms.max(1));
        loop {
            if done(&self.stats()) {
                return true;
            }
            if Instant::now() >= deadline || self.ctx.shutdown.sleep(poll).is_err() {
                return done(&self.stats());
            }
        }
    }

    /// Raise the shutdown flag, join every actor, then stop the refresh
    /// thread.
    ///
    /// Every thread is joined even if some fail; the first failure is
    /// returned.
    pub fn shutdown(mut self) -> SimResult<FarmReport<O>> {
        info!("shutting down after {:?}", self.started.elapsed());
        self.ctx.shutdown.trigger();

        let mut first_err: Option<SimError> = None;
        for (label, handle) in std::mem::take(&mut self.actors) {
            let outcome = match handle.join() {
                Ok(Ok(())) => continue,
                Ok(Err(source)) => SimError::ActorFailed { label, source },
                Err(_) => SimError::ActorPanicked(label),
            };
            warn!("{outcome}");
            if first_err.is_none() {
                first_err = Some(outcome);
            }
        }

        self.refresh_stop.trigger();
        let observer = match self.refresh.take().map(JoinHandle::join) {
            Some(Ok(observer)) => observer,
            Some(Err(_)) | None => return Err(SimError::ActorPanicked("refresh".into())),
        };
        if let Some(e) = first_err {
            return Err(e);
        }

        let report = FarmReport {
            stats:   self.ctx.stats.snapshot(),
            levels:  self.ctx.stations.levels(),
            elapsed: self.started.elapsed(),
            observer,
        };
        info!("final: {}", report.stats);
        Ok(report)
    }

    /// Stop and join whatever is running, discarding outcomes.
    fn stop_all(&mut self) {
        self.ctx.shutdown.trigger();
        for (_, handle) in std::mem::take(&mut self.actors) {
            let _ = handle.join();
        }
        self.refresh_stop.trigger();
        if let Some(refresh) = self.refresh.take() {
            let _ = refresh.join();
        }
    }
}

impl<O: FarmObserver + 'static> Drop for RunningFarm<O> {
    fn drop(&mut self) {
        self.ctx.shutdown.trigger();
        self.refresh_stop.trigger();
    }
}
