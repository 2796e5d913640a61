//! `farm-station`: every shared, bounded resource the actors hand goods
//! through.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                   |
//! |------------------|------------------------------------------------------------|
//! | [`monitor`]      | `Monitor<T>`: mutex + condvar with wait-on-predicate       |
//! | [`nest`]         | `Nest`, `NestState`, `SitPermit`, `Collection`             |
//! | [`barn`]         | `Barn`: the egg pool between farmer and egg truck          |
//! | [`storage`]      | `BakeryStorage`, `Pantry`, `Ingredient`                    |
//! | [`stock`]        | `BakeryStock`, `Shelf`, `StockReservation`                 |
//! | [`oven`]         | `Oven`, `OvenState`, `OvenPermit`                          |
//! | [`intersection`] | `Intersection`, `CrossingPermit`                           |
//! | [`shop`]         | `ShopCounter`, `CounterPermit`                             |
//! | [`stations`]     | `Stations` bundle, `StationLevels` snapshot                |
//! | [`error`]        | `StationError`, `StationResult<T>`                         |
//!
//! # Locking discipline
//!
//! Each station owns exactly one `Monitor`.  No method of this crate holds
//! two station locks at once, and no method sleeps with a lock held except
//! inside `Condvar::wait_timeout`, which releases it.  Every blocking wait
//! re-checks the shared [`Shutdown`][farm_core::Shutdown] flag at least once
//! per `poll_ms` and returns `Err(ShuttingDown)` once it is raised.
//!
//! Exclusive occupancy (nest sitter, oven, crossing, shop counter) is
//! expressed as RAII permits: dropping the permit releases the slot and
//! wakes waiters, so an actor that bails out early through `?` can never
//! leave a station locked.

pub mod barn;
pub mod error;
pub mod intersection;
pub mod monitor;
pub mod nest;
pub mod oven;
pub mod shop;
pub mod stations;
pub mod stock;
pub mod storage;


pub use barn::Barn;
pub use error::{StationError, StationResult};
pub use intersection::{CrossingPermit, Intersection};
pub use monitor::Monitor;
pub use nest::{Collection, Nest, NestState, SitPermit};
pub use oven::{Oven, OvenPermit, OvenState};
pub use shop::{CounterPermit, ShopCounter};
pub use stations::{StationLevels, Stations};
pub use stock::{BakeryStock, Shelf, StockReservation};
pub use storage::{BakeryStorage, Ingredient, Pantry};
