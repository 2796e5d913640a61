//! Nest station.
//!
//! A nest moves through `Empty → Filling → Full` with an orthogonal sitter
//! slot.  A chicken may only start sitting when the nest has room and no
//! other sitter; the farmer may only drain a nest that is full and
//! unoccupied.  Both rules are the named predicates on [`NestState`].

use log::debug;

use farm_core::{EntityId, NestId, Point, Shutdown};

use crate::{Monitor, StationResult};

/// The lock-protected part of a nest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NestState {
    pub eggs:     u32,
    pub capacity: u32,
    pub sitter:   Option<EntityId>,
    /// Registry ids of the egg icons shown on the nest, oldest first.
    pub icons:    Vec<EntityId>,
}

impl NestState {
    pub fn new(capacity: u32) -> Self {
        Self { eggs: 0, capacity, sitter: None, icons: Vec::with_capacity(capacity as usize) }
    }

    /// A new chicken may begin sitting.
    #[inline]
    pub fn can_sit(&self) -> bool {
        self.eggs < self.capacity && self.sitter.is_none()
    }

    /// The farmer may drain the nest.
    #[inline]
    pub fn ready_for_collection(&self) -> bool {
        self.eggs == self.capacity && self.sitter.is_none()
    }

    #[inline]
    pub fn room(&self) -> u32 {
        self.capacity.saturating_sub(self.eggs)
    }
}

/// What a farmer takes away from a nest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collection {
    pub eggs:  u32,
    pub icons: Vec<EntityId>,
}

pub struct Nest {
    id:       NestId,
    position: Point,
    state:    Monitor<NestState>,
}

impl Nest {
    pub fn new(id: NestId, position: Point, capacity: u32, shutdown: Shutdown, poll_ms: u64) -> Self {
        Self { id, position, state: Monitor::new(NestState::new(capacity), shutdown, poll_ms) }
    }

    #[inline]
    pub fn id(&self) -> NestId {
        self.id
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn snapshot(&self) -> NestState {
        self.state.snapshot()
    }

    /// Claim the sitter slot without waiting.  `None` if the nest is full
    /// or already occupied; the chicken is expected to go elsewhere.
    pub fn try_sit(&self, chicken: EntityId) -> Option<SitPermit<'_>> {
        let mut state = self.state.lock();
        if !state.can_sit() {
            return None;
        }
        state.sitter = Some(chicken);
        debug!("{chicken} sits on nest {}", self.id.0);
        Some(SitPermit { nest: self, chicken })
    }

    /// Block until the nest is full and unoccupied, then drain it.
    pub fn collect(&self) -> StationResult<Collection> {
        self.state.wait_and_update(NestState::ready_for_collection, |state| {
            let eggs = std::mem::take(&mut state.eggs);
            Collection { eggs, icons: std::mem::take(&mut state.icons) }
        })
    }
}

/// Exclusive right to lay in one nest.  Dropping it frees the nest.
pub struct SitPermit<'a> {
    nest:    &'a Nest,
    chicken: EntityId,
}

impl SitPermit<'_> {
    #[inline]
    pub fn nest(&self) -> &Nest {
        self.nest
    }

    /// Remaining room in the nest.
    pub fn room(&self) -> u32 {
        self.nest.state.read(NestState::room)
    }

    /// Add one egg shown by `icon`.  Returns `false` (and records nothing)
    /// if the nest is already full.
    pub fn lay(&self, icon: EntityId) -> bool {
        self.nest.state.update(|state| {
            if state.eggs >= state.capacity {
                return false;
            }
            state.eggs += 1;
            state.icons.push(icon);
            true
        })
    }
}

impl Drop for SitPermit<'_> {
    fn drop(&mut self) {
        let chicken = self.chicken;
        self.nest.state.update(|state| {
            if state.sitter == Some(chicken) {
                state.sitter = None;
            }
        });
    }
}
