//! Monotonic allocation of entity ids for things created at run time
//! (egg icons).  Ids are never recycled, so a removed icon's id cannot
//! alias a live one.

use std::sync::atomic::{AtomicU32, Ordering};

use farm_core::EntityId;

/// Thread-safe id counter.  Share through an `Arc`.
#[derive(Debug)]
pub struct EntityIdPool {
    next: AtomicU32,
}

impl EntityIdPool {
    /// Pool whose first id is `first`.
    pub fn starting_at(first: u32) -> Self {
        Self { next: AtomicU32::new(first) }
    }

    /// Take the next unused id.
    #[inline]
    pub fn next_id(&self) -> EntityId {
        EntityId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for EntityIdPool {
    /// Transient ids start at 1000, clear of every layout-assigned id.
    fn default() -> Self {
        Self::starting_at(1_000)
    }
}
