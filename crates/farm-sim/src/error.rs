use farm_actor::ActorError;
use farm_core::FarmError;
use farm_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("farm configuration error: {0}")]
    Config(#[from] FarmError),

    #[error("initial placement failed: {0}")]
    Placement(#[from] SpatialError),

    #[error("could not spawn a thread for {label}: {source}")]
    Spawn {
        label:  String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} panicked")]
    ActorPanicked(String),

    #[error("{label} stopped: {source}")]
    ActorFailed {
        label:  String,
        #[source]
        source: ActorError,
    },
}

pub type SimResult<T> = Result<T, SimError>;
