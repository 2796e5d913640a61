//! `farm-actor`: one behavioural loop per actor kind.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`actor`]       | `Actor` trait: `cycle` once, `run` until shutdown          |
//! | [`context`]     | `ActorContext`: engine, stations, statistics, icon ids     |
//! | [`chicken`]     | `Chicken`: find a free nest, lay, roost                    |
//! | [`farmer`]      | `Farmer`: round-robin nest collection into the barn        |
//! | [`truck`]       | `Truck`, `Cargo`: barn/mill to bakery and back             |
//! | [`crossing`]    | `IntersectionGuard`: road crossing as a `StepGuard`        |
//! | [`oven_tender`] | `OvenTender`: reserve, take ingredients, bake              |
//! | [`child`]       | `Child`: walk to the shop, buy, rest                       |
//! | [`cow`]         | `Cow`: graze inside the pasture                            |
//! | [`error`]       | `ActorError`, `ActorResult<T>`                             |
//!
//! # Ownership
//!
//! Every actor owns its body (`Entity`), its random source, and a clone of
//! the [`ActorContext`].  Nothing is shared except through the stations and
//! the spatial registry, so each actor can be moved onto its own thread.
//!
//! Actors are generic over [`RandomSource`][farm_core::RandomSource]; the
//! simulation passes an `ActorRng`, tests pass a scripted `SequenceRng`.

pub mod actor;
pub mod chicken;
pub mod child;
pub mod context;
pub mod cow;
pub mod crossing;
pub mod error;
pub mod farmer;
pub mod oven_tender;
pub mod truck;


pub use actor::Actor;
pub use chicken::Chicken;
pub use child::Child;
pub use context::ActorContext;
pub use cow::Cow;
pub use crossing::IntersectionGuard;
pub use error::{ActorError, ActorResult};
pub use farmer::Farmer;
pub use oven_tender::OvenTender;
pub use truck::{Cargo, Truck};
