//! Spatial-subsystem error type.

use thiserror::Error;

use farm_core::{EntityId, Rect};

/// Errors produced by `farm-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("{id} cannot be placed: overlaps {by}")]
    Blocked { id: EntityId, by: EntityId },

    #[error("{id} at {rect} lies outside the scene bounds")]
    OutOfBounds { id: EntityId, rect: Rect },

    #[error("{0} not found in registry")]
    EntityNotFound(EntityId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
