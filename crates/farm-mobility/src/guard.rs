//! Hook run around every committed step.

use farm_core::Rect;

use crate::MobilityResult;

/// Extra admission control layered on top of the registry collision check.
///
/// The engine calls [`before_step`](Self::before_step) with the candidate
/// rectangle before trying to commit it; the guard may block (and must
/// then honour shutdown by returning `Err(ShuttingDown)`).  After a commit
/// succeeds, [`after_step`](Self::after_step) sees the new rectangle.
pub trait StepGuard {
    fn before_step(&mut self, from: &Rect, to: &Rect) -> MobilityResult<()>;

    fn after_step(&mut self, now: &Rect);
}

/// No extra admission control.
#[derive(Copy, Clone, Debug, Default)]
pub struct Unguarded;

impl StepGuard for Unguarded {
    #[inline]
    fn before_step(&mut self, _from: &Rect, _to: &Rect) -> MobilityResult<()> {
        Ok(())
    }

    #[inline]
    fn after_step(&mut self, _now: &Rect) {}
}
