//! Entity kind and layer tags shared by the registry, actors, and renderers.

/// Rendering / collision category of a registry entry.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Layer {
    /// Static scenery (barns, nests, bakery).  Never collides.
    Scenery = 0,
    /// Small display-only icon (eggs in a nest).  Never collides.
    Icon = 1,
    /// Mobile collidable entity.  Must never overlap another `Mobile` entry.
    Mobile = 2,
}

impl Layer {
    /// The numeric layer as used by renderers (0, 1, 2).
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// `true` only for the layer that participates in collision checks.
    #[inline]
    pub fn collides(self) -> bool {
        matches!(self, Layer::Mobile)
    }
}

/// What an entity depicts.  Renderers pick a texture from this.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EntityKind {
    Chicken,
    Cow,
    Farmer,
    Truck,
    Child,
    Egg,
    Nest,
    Barn,
    Bakery,
}

impl EntityKind {
    /// Human-readable label, also used as the texture name.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Chicken => "chicken",
            EntityKind::Cow     => "cow",
            EntityKind::Farmer  => "farmer",
            EntityKind::Truck   => "truck",
            EntityKind::Child   => "child",
            EntityKind::Egg     => "egg",
            EntityKind::Nest    => "nest",
            EntityKind::Barn    => "barn",
            EntityKind::Bakery  => "bakery",
        }
    }

    /// `true` for kinds that move under their own thread of control.
    #[inline]
    pub fn is_mobile(self) -> bool {
        matches!(
            self,
            EntityKind::Chicken | EntityKind::Cow | EntityKind::Farmer | EntityKind::Truck | EntityKind::Child
        )
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EntityKind {
    /// Sprite size used when an actor or the builder creates an entity of
    /// this kind.
    pub fn default_size(self) -> crate::Size {
        use crate::Size;
        match self {
            EntityKind::Chicken => Size::new(60, 60),
            EntityKind::Cow     => Size::new(60, 60),
            EntityKind::Farmer  => Size::new(30, 60),
            EntityKind::Truck   => Size::new(80, 60),
            EntityKind::Child   => Size::new(30, 60),
            EntityKind::Egg     => Size::new(10, 20),
            EntityKind::Nest    => Size::new(80, 60),
            EntityKind::Barn    => Size::new(100, 100),
            EntityKind::Bakery  => Size::new(220, 160),
        }
    }
}
