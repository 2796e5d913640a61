//! Framework error type.
//!
//! Sub-crates define their own error enums and convert `FarmError` into one
//! of their variants via `From`.  The only core failure that crosses every
//! crate boundary is [`FarmError::ShuttingDown`], which every blocking wait
//! and interruptible sleep returns once the shutdown flag is raised.

use thiserror::Error;

/// The top-level error type for `farm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum FarmError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("simulation is shutting down")]
    ShuttingDown,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FarmError {
    /// `true` for the cancellation signal, which callers treat as a clean exit.
    #[inline]
    pub fn is_shutdown(&self) -> bool {
        matches!(self, FarmError::ShuttingDown)
    }
}

/// Shorthand result type for all `farm-*` crates.
pub type FarmResult<T> = Result<T, FarmError>;
