//! The `Actor` trait.

use log::debug;

use crate::ActorResult;

/// An independently scheduled behavioural loop.
///
/// Implementors provide [`cycle`](Self::cycle), one full pass of their
/// loop (one sitting, one collection, one delivery, one purchase, …).  The
/// simulation calls [`run`](Self::run) on a dedicated thread.
pub trait Actor: Send {
    /// Short name for logs and thread names, e.g. `chicken-3`.
    fn label(&self) -> String;

    fn cycle(&mut self) -> ActorResult<()>;

    /// Repeat `cycle` until shutdown.  Shutdown is a clean exit; any other
    /// error ends the loop and is returned.
    fn run(&mut self) -> ActorResult<()> {
        debug!("{} started", self.label());
        loop {
            match self.cycle() {
                Ok(()) => {}
                Err(e) if e.is_shutdown() => {
                    debug!("{} stopped", self.label());
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }
}
