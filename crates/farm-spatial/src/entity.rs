//! The registry record for one scene entity.

use farm_core::{EntityId, EntityKind, Layer, Point, Rect, Size};

/// One entry of the spatial registry.
///
/// Actors own their `Entity` value and republish it after every committed
/// step; the registry keeps a copy.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    pub id:    EntityId,
    pub kind:  EntityKind,
    pub rect:  Rect,
    pub layer: Layer,
}

impl Entity {
    /// An entity of `kind` at `center` with the kind's default sprite size.
    pub fn new(id: EntityId, kind: EntityKind, center: Point, layer: Layer) -> Self {
        Self::with_size(id, kind, center, kind.default_size(), layer)
    }

    pub fn with_size(id: EntityId, kind: EntityKind, center: Point, size: Size, layer: Layer) -> Self {
        Self { id, kind, rect: Rect::new(center, size), layer }
    }

    /// A collidable entity of `kind` at `center`.
    #[inline]
    pub fn mobile(id: EntityId, kind: EntityKind, center: Point) -> Self {
        Self::new(id, kind, center, Layer::Mobile)
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.rect.center
    }

    /// Copy of `self` recentred on `center`.
    #[inline]
    pub fn moved_to(&self, center: Point) -> Self {
        Self { rect: self.rect.moved_to(center), ..*self }
    }

    #[inline]
    pub fn collides(&self) -> bool {
        self.layer.collides()
    }
}
