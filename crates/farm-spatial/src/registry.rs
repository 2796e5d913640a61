//! The shared spatial registry.
//!
//! # Structure
//!
//! `RegistryState` keeps every entity twice:
//!
//! - `entities` maps `EntityId → Entity` and is the source of truth for
//!   lookups and rendering.
//! - `index` is an `rstar` R-tree of the collidable (layer 2) rectangles
//!   only, keyed by their corner envelopes.  Collision queries ask the tree
//!   for envelope intersections and then apply the strict interior-overlap
//!   rule, since `rstar` treats touching envelopes as intersecting.
//!
//! Both live behind one `Mutex`, so every operation below is atomic with
//! respect to every other.  [`SpatialRegistry::try_place`] in particular
//! checks and commits under a single acquisition, which is what keeps two
//! movers from claiming the same free square.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::debug;
use rstar::{RTree, RTreeObject, AABB};

use farm_core::{Bounds, EntityId, EntityKind, Layer, Point, Rect, Size};

use crate::entity::Entity;
use crate::error::{SpatialError, SpatialResult};

#[cfg(feature = "fx-hash")]
type IdMap<V> = rustc_hash::FxHashMap<EntityId, V>;
#[cfg(not(feature = "fx-hash"))]
type IdMap<V> = std::collections::HashMap<EntityId, V>;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
struct IndexedRect {
    id:    EntityId,
    lower: [i32; 2],
    upper: [i32; 2],
}

impl IndexedRect {
    fn of(entity: &Entity) -> Self {
        let (lower, upper) = entity.rect.corners();
        Self { id: entity.id, lower, upper }
    }
}

impl RTreeObject for IndexedRect {
    type Envelope = AABB<[i32; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.lower, self.upper)
    }
}

// ── State ─────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct RegistryState {
    entities: IdMap<Entity>,
    index:    RTree<IndexedRect>,
}

impl RegistryState {
    /// First collidable entity other than `excluding` whose rectangle
    /// overlaps `rect`.
    fn first_blocker(&self, rect: &Rect, excluding: EntityId) -> Option<EntityId> {
        let (lower, upper) = rect.corners();
        let envelope = AABB::from_corners(lower, upper);
        self.index
            .locate_in_envelope_intersecting(&envelope)
            .filter(|hit| hit.id != excluding)
            .filter_map(|hit| self.entities.get(&hit.id))
            .find(|other| other.rect.overlaps(rect))
            .map(|other| other.id)
    }

    fn insert(&mut self, entity: Entity) -> Option<Entity> {
        let previous = self.take(entity.id);
        if entity.collides() {
            self.index.insert(IndexedRect::of(&entity));
        }
        self.entities.insert(entity.id, entity);
        previous
    }

    fn take(&mut self, id: EntityId) -> Option<Entity> {
        let previous = self.entities.remove(&id)?;
        if previous.collides() {
            self.index.remove(&IndexedRect::of(&previous));
        }
        Some(previous)
    }
}

// ── SpatialRegistry ───────────────────────────────────────────────────────────

/// Thread-safe registry of every entity on the scene.  Share via `Arc`.
#[derive(Default)]
pub struct SpatialRegistry {
    state: Mutex<RegistryState>,
}

impl SpatialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert or overwrite `entity` without a collision check.
    ///
    /// Used for scenery, icons, and removal-free bookkeeping.  Returns the
    /// previous record for the same id, if any.
    pub fn publish(&self, entity: Entity) -> Option<Entity> {
        self.lock().insert(entity)
    }

    /// Upsert by components; the form the rendering side of the scene
    /// speaks.
    pub fn update_position(
        &self,
        id: EntityId,
        kind: EntityKind,
        center: Point,
        size: Size,
        layer: Layer,
    ) -> Option<Entity> {
        self.publish(Entity::with_size(id, kind, center, size, layer))
    }

    /// Remove `id`.  Removing an absent id is a no-op returning `None`.
    pub fn remove(&self, id: EntityId) -> Option<Entity> {
        self.lock().take(id)
    }

    /// `true` if `rect` overlaps no collidable entity other than `excluding`.
    pub fn can_occupy(&self, rect: &Rect, excluding: EntityId) -> bool {
        self.lock().first_blocker(rect, excluding).is_none()
    }

    /// Check and commit in one step.
    ///
    /// A collidable `entity` is published only if its rectangle is free;
    /// non-colliding entities are always published.  Returns whether the
    /// registry now holds `entity`.
    pub fn try_place(&self, entity: Entity) -> bool {
        let mut state = self.lock();
        if entity.collides() && state.first_blocker(&entity.rect, entity.id).is_some() {
            return false;
        }
        state.insert(entity);
        true
    }

    /// Like [`try_place`](Self::try_place) but names the blocker.
    pub fn place(&self, entity: Entity) -> SpatialResult<()> {
        let mut state = self.lock();
        if entity.collides() {
            if let Some(by) = state.first_blocker(&entity.rect, entity.id) {
                debug!("{} refused at {}: blocked by {by}", entity.id, entity.center());
                return Err(SpatialError::Blocked { id: entity.id, by });
            }
        }
        state.insert(entity);
        Ok(())
    }

    /// Initial placement: `entity` must fit inside `bounds` and, if
    /// collidable, onto a free rectangle.
    pub fn place_within(&self, entity: Entity, bounds: &Bounds) -> SpatialResult<()> {
        if entity.collides() && !bounds.contains(&entity.rect) {
            debug!("{} refused at {}: outside the scene", entity.id, entity.center());
            return Err(SpatialError::OutOfBounds { id: entity.id, rect: entity.rect });
        }
        self.place(entity)
    }

    /// Copy of the current record for `id`.
    pub fn get(&self, id: EntityId) -> SpatialResult<Entity> {
        self.lock().entities.get(&id).copied().ok_or(SpatialError::EntityNotFound(id))
    }

    pub fn len(&self) -> usize {
        self.lock().entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every entity, sorted by layer and then id (draw order).
    pub fn snapshot(&self) -> Vec<Entity> {
        self.render(|view| view.draw_order())
    }

    /// Run `draw` against a consistent view of the registry.
    ///
    /// The registry lock is held for the whole call; `draw` must not call
    /// back into the registry or block.
    pub fn render<R>(&self, draw: impl FnOnce(&RegistryView<'_>) -> R) -> R {
        let state = self.lock();
        draw(&RegistryView { entities: &state.entities })
    }
}

// ── RegistryView ──────────────────────────────────────────────────────────────

/// Read-only borrow of the registry contents, valid inside
/// [`SpatialRegistry::render`].
pub struct RegistryView<'a> {
    entities: &'a IdMap<Entity>,
}

impl RegistryView<'_> {
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Entities in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &Entity> {
        self.entities.values().filter(move |e| e.layer == layer)
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.values().filter(|e| e.kind == kind).count()
    }

    /// Copies sorted by `(layer, id)`: scenery first, then icons, then movers.
    pub fn draw_order(&self) -> Vec<Entity> {
        let mut out: Vec<Entity> = self.entities.values().copied().collect();
        out.sort_unstable_by_key(|e| (e.layer, e.id));
        out
    }

    /// Every pair of collidable entities whose interiors intersect.  Empty
    /// whenever the registry is used through `try_place`.
    pub fn collisions(&self) -> Vec<(EntityId, EntityId)> {
        let movers: Vec<&Entity> = self.on_layer(Layer::Mobile).collect();
        let mut pairs = Vec::new();
        for (i, a) in movers.iter().enumerate() {
            for b in &movers[i + 1..] {
                if a.rect.overlaps(&b.rect) {
                    pairs.push((a.id.min(b.id), a.id.max(b.id)));
                }
            }
        }
        pairs
    }
}
