//! Wait-on-predicate over a `Mutex` + `Condvar` pair.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use farm_core::Shutdown;

use crate::{StationError, StationResult};

/// A piece of shared state with its own lock and wake-up signal.
///
/// All waits are bounded by `poll`: a waiter wakes at least that often to
/// re-check its predicate and the shutdown flag, so a shutdown raised
/// without a matching `notify_all` is still noticed within one poll cycle.
///
/// Lock poisoning is ignored.  Every critical section in this crate leaves
/// its state consistent before it can panic.
pub struct Monitor<T> {
    state:    Mutex<T>,
    signal:   Condvar,
    shutdown: Shutdown,
    poll:     Duration,
}

impl<T> Monitor<T> {
    pub fn new(state: T, shutdown: Shutdown, poll_ms: u64) -> Self {
        Self {
            state: Mutex::new(state),
            signal: Condvar::new(),
            shutdown,
            poll: Duration::from_millis(poll_ms.max(1)),
        }
    }

    #[inline]
    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until `ready` holds and return the guard with the lock held.
    pub fn wait_until(&self, mut ready: impl FnMut(&T) -> bool) -> StationResult<MutexGuard<'_, T>> {
        let mut guard = self.lock();
        loop {
            if self.shutdown.is_triggered() {
                return Err(StationError::ShuttingDown);
            }
            if ready(&guard) {
                return Ok(guard);
            }
            let (next, _) = self
                .signal
                .wait_timeout(guard, self.poll)
                .unwrap_or_else(PoisonError::into_inner);
            guard = next;
        }
    }

    /// [`wait_until`](Self::wait_until) that gives up after `limit`.
    ///
    /// `Ok(None)` means the predicate never held in time; the lock is not
    /// held on return.
    pub fn wait_until_within(
        &self,
        mut ready: impl FnMut(&T) -> bool,
        limit:     Duration,
    ) -> StationResult<Option<MutexGuard<'_, T>>> {
        let deadline = Instant::now() + limit;
        let mut guard = self.lock();
        loop {
            if self.shutdown.is_triggered() {
                return Err(StationError::ShuttingDown);
            }
            if ready(&guard) {
                return Ok(Some(guard));
            }
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() {
                return Ok(None);
            }
            let (next, _) = self
                .signal
                .wait_timeout(guard, left.min(self.poll))
                .unwrap_or_else(PoisonError::into_inner);
            guard = next;
        }
    }

    /// Wait for `ready`, apply `change`, release, and wake every waiter.
    pub fn wait_and_update<R>(
        &self,
        ready:  impl FnMut(&T) -> bool,
        change: impl FnOnce(&mut T) -> R,
    ) -> StationResult<R> {
        let mut guard = self.wait_until(ready)?;
        let out = change(&mut guard);
        drop(guard);
        self.signal.notify_all();
        Ok(out)
    }

    /// Time-boxed [`wait_and_update`](Self::wait_and_update).  `Ok(None)`
    /// leaves the state untouched.
    pub fn wait_and_update_within<R>(
        &self,
        ready:  impl FnMut(&T) -> bool,
        limit:  Duration,
        change: impl FnOnce(&mut T) -> R,
    ) -> StationResult<Option<R>> {
        let Some(mut guard) = self.wait_until_within(ready, limit)? else {
            return Ok(None);
        };
        let out = change(&mut guard);
        drop(guard);
        self.signal.notify_all();
        Ok(Some(out))
    }

    /// Apply `change` unconditionally and wake every waiter.
    pub fn update<R>(&self, change: impl FnOnce(&mut T) -> R) -> R {
        let out = change(&mut self.lock());
        self.signal.notify_all();
        out
    }

    /// Read without waking anyone.
    pub fn read<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.lock())
    }

    #[inline]
    pub fn notify_all(&self) {
        self.signal.notify_all();
    }

    #[inline]
    pub fn shutdown(&self) -> &Shutdown {
        &self.shutdown
    }
}

impl<T: Clone> Monitor<T> {
    pub fn snapshot(&self) -> T {
        self.lock().clone()
    }
}
