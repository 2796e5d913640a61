use farm_core::FarmError;
use farm_mobility::MobilityError;
use farm_spatial::SpatialError;
use farm_station::StationError;
use thiserror::Error;

/// Errors an actor loop can end with.
///
/// Every subsystem's shutdown variant collapses into
/// [`ActorError::ShuttingDown`], which [`Actor::run`][crate::Actor::run]
/// treats as a clean exit.
#[derive(Debug, Error)]
pub enum ActorError {
    #[error("shutdown requested")]
    ShuttingDown,

    #[error("movement: {0}")]
    Mobility(MobilityError),

    #[error("station: {0}")]
    Station(StationError),

    #[error("spatial registry: {0}")]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Core(FarmError),
}

impl ActorError {
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        matches!(self, ActorError::ShuttingDown)
    }
}

impl From<MobilityError> for ActorError {
    fn from(e: MobilityError) -> Self {
        if e.is_shutdown() { ActorError::ShuttingDown } else { ActorError::Mobility(e) }
    }
}

impl From<StationError> for ActorError {
    fn from(e: StationError) -> Self {
        if e.is_shutdown() { ActorError::ShuttingDown } else { ActorError::Station(e) }
    }
}

impl From<FarmError> for ActorError {
    fn from(e: FarmError) -> Self {
        if e.is_shutdown() { ActorError::ShuttingDown } else { ActorError::Core(e) }
    }
}

pub type ActorResult<T> = Result<T, ActorError>;
