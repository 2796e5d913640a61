//! Ids for registry entries and nests.
//!
//! Layout code writes scenery ids by hand (`EntityId(10)`), so the inner
//! integer is public.  Icon ids handed out at runtime come from
//! `farm_spatial::EntityIdPool`.

use std::fmt;

/// Newtype over an unsigned integer, printed as `tag#n`, with an `INVALID`
/// default.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) as $tag:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Largest value of the inner type; never allocated.
            pub const INVALID: $name = $name(<$inner>::MAX);

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "#{}"), self.0)
            }
        }
    };
}

typed_id! {
    /// Identity of one entry in the spatial registry.  Stable for the
    /// entity's lifetime; never reused while the entity is live.
    pub struct EntityId(u32) as "entity";
}

typed_id! {
    /// Index of a nest station (0-based, dense).
    pub struct NestId(u16) as "nest";
}
