//! The `StatsWriter` trait implemented by statistics backends.

use crate::{OutputResult, StatsRow};

pub trait StatsWriter: Send {
    fn write_row(&mut self, row: &StatsRow) -> OutputResult<()>;

    /// Flush and close.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
