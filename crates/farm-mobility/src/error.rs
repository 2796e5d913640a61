use farm_core::Point;
use farm_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("shutdown requested")]
    ShuttingDown,

    #[error("{target} unreachable after {ticks} ticks without progress")]
    Unreachable { target: Point, ticks: u32 },

    #[error("spatial registry: {0}")]
    Spatial(#[from] SpatialError),
}

impl MobilityError {
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        matches!(self, MobilityError::ShuttingDown)
    }
}

pub type MobilityResult<T> = Result<T, MobilityError>;
