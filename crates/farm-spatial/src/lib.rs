//! `farm-spatial`: the shared registry of every entity on the scene.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                            |
//! |--------------|---------------------------------------------------------------------|
//! | [`entity`]   | `Entity`: id, kind, rectangle, layer                                |
//! | [`registry`] | `SpatialRegistry` (R-tree + id map behind one lock), `RegistryView` |
//! | [`pool`]     | `EntityIdPool`: monotonic id allocation for transient icons         |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                                  |
//!
//! # Locking
//!
//! The registry has exactly one `Mutex`.  Collision queries, publishes,
//! removals, and the redraw callback all take it, so a renderer always sees
//! an atomic view.  It is the innermost lock of the simulation: callers may
//! hold a station lock while publishing an icon, but nothing blocks or
//! sleeps while holding the registry lock.
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                    |
//! |-----------|-----------------------------------------------------------|
//! | `fx-hash` | FxHash for the id map instead of SipHash.                 |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `Entity`.            |

pub mod entity;
pub mod error;
pub mod pool;
pub mod registry;

#[cfg(test)]
mod tests;

pub use entity::Entity;
pub use error::{SpatialError, SpatialResult};
pub use pool::EntityIdPool;
pub use registry::{RegistryView, SpatialRegistry};
