//! Process-wide cancellation.
//!
//! [`Shutdown`] is a cheaply clonable handle around one flag.  Once raised it
//! never clears.  Two things observe it:
//!
//! 1. Every station wait predicate (via `farm-station`'s `Monitor`), which
//!    re-checks the flag on every wake and on every poll timeout.
//! 2. Every fixed-duration sleep in an actor loop, through
//!    [`Shutdown::sleep`], which parks on a condition variable instead of
//!    `thread::sleep` so that raising the flag wakes sleepers immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::{FarmError, FarmResult};

struct Signal {
    raised: AtomicBool,
    lock:   Mutex<()>,
    wake:   Condvar,
}

/// Shared shutdown flag with interruptible sleep.
#[derive(Clone)]
pub struct Shutdown {
    inner: Arc<Signal>,
}

impl Shutdown {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Signal {
                raised: AtomicBool::new(false),
                lock:   Mutex::new(()),
                wake:   Condvar::new(),
            }),
        }
    }

    /// Raise the flag and wake every thread parked in [`sleep`](Self::sleep).
    pub fn trigger(&self) {
        let _guard = self.inner.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.inner.raised.store(true, Ordering::SeqCst);
        self.inner.wake.notify_all();
    }

    #[inline]
    pub fn is_triggered(&self) -> bool {
        self.inner.raised.load(Ordering::SeqCst)
    }

    /// `Err(ShuttingDown)` once the flag is raised, `Ok(())` otherwise.
    #[inline]
    pub fn check(&self) -> FarmResult<()> {
        if self.is_triggered() {
            Err(FarmError::ShuttingDown)
        } else {
            Ok(())
        }
    }

    /// Sleep for `duration` unless shutdown is raised first.
    ///
    /// Returns `Err(ShuttingDown)` if the flag is (or becomes) raised; the
    /// remaining time is not slept.  Never holds any lock other than its own.
    pub fn sleep(&self, duration: Duration) -> FarmResult<()> {
        self.check()?;
        if duration.is_zero() {
            return Ok(());
        }
        let deadline = Instant::now() + duration;
        let mut guard = self.inner.lock.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if self.is_triggered() {
                return Err(FarmError::ShuttingDown);
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(());
            }
            guard = self
                .inner
                .wake
                .wait_timeout(guard, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
    }

    /// [`sleep`](Self::sleep) for a whole number of milliseconds.
    #[inline]
    pub fn sleep_ms(&self, ms: u64) -> FarmResult<()> {
        self.sleep(Duration::from_millis(ms))
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Shutdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shutdown").field("triggered", &self.is_triggered()).finish()
    }
}
