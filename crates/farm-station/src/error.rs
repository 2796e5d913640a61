use farm_core::NestId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StationError {
    #[error("shutdown requested")]
    ShuttingDown,

    #[error("{station}: request of {requested} can never fit capacity {capacity}")]
    ExceedsCapacity { station: &'static str, requested: u32, capacity: u32 },

    #[error("no nest with id {0}")]
    UnknownNest(NestId),
}

impl StationError {
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        matches!(self, StationError::ShuttingDown)
    }
}

pub type StationResult<T> = Result<T, StationError>;
