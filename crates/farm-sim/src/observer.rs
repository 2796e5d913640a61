//! The redisplay collaborator.

use std::time::Duration;

use farm_core::{FarmConfig, StatsSnapshot};
use farm_spatial::RegistryView;

/// Callbacks invoked by the display-refresh thread.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  The observer is moved onto the
/// refresh thread and handed back in the [`FarmReport`][crate::FarmReport].
///
/// # Example: frame counter
///
/// ```rust,ignore
/// struct Frames(u64);
///
/// impl FarmObserver for Frames {
///     fn redisplay(&mut self, _view: &RegistryView<'_>, _stats: &StatsSnapshot) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait FarmObserver: Send {
    /// Called once on the refresh thread before the first frame.
    fn on_start(&mut self, _config: &FarmConfig) {}

    /// Draw one frame.  The registry lock is held for the whole call, so
    /// implementations must not block.
    fn redisplay(&mut self, _view: &RegistryView<'_>, _stats: &StatsSnapshot) {}

    /// Called every `stats_log_ms` with the time since start.
    fn on_stats(&mut self, _elapsed: Duration, _stats: &StatsSnapshot) {}

    /// Called once after every actor has stopped.
    fn on_stop(&mut self, _stats: &StatsSnapshot) {}
}

/// A [`FarmObserver`] that does nothing.
pub struct NoopObserver;

impl FarmObserver for NoopObserver {}
