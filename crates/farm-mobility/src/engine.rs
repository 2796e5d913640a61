//! The movement engine: one tick at a time toward a target point.

use std::sync::Arc;

use log::{trace, warn};

use farm_core::{Bounds, MovementConfig, Point, RandomSource, Shutdown, Timing};
use farm_spatial::{Entity, SpatialRegistry};

use crate::guard::{StepGuard, Unguarded};
use crate::state::{Direction, Gait, MoveState, StepOutcome, Wander};
use crate::{MobilityError, MobilityResult};

/// Moves entities through the shared [`SpatialRegistry`].
///
/// Cheap to clone; every actor thread holds its own copy.  The engine owns
/// no per-entity state: callers own their `Entity` value and the engine
/// rewrites it on every committed step.
#[derive(Clone)]
pub struct MobilityEngine {
    registry:       Arc<SpatialRegistry>,
    bounds:         Bounds,
    movement:       MovementConfig,
    step_ms:        u64,
    wander_step_ms: u64,
    shutdown:       Shutdown,
}

impl MobilityEngine {
    pub fn new(
        registry: Arc<SpatialRegistry>,
        bounds:   Bounds,
        movement: MovementConfig,
        timing:   &Timing,
        shutdown: Shutdown,
    ) -> Self {
        Self {
            registry,
            bounds,
            movement,
            step_ms: timing.step_ms,
            wander_step_ms: timing.wander_step_ms,
            shutdown,
        }
    }

    #[inline]
    pub fn registry(&self) -> &Arc<SpatialRegistry> {
        &self.registry
    }

    #[inline]
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    #[inline]
    pub fn movement(&self) -> &MovementConfig {
        &self.movement
    }

    /// Tick allowance for a journey of `distance` pixels at `step` pixels
    /// per tick.
    pub fn stuck_budget(&self, distance: f32, step: i32) -> u32 {
        let m = &self.movement;
        let steps = (distance / step.max(1) as f32).ceil() as u32;
        steps
            .saturating_mul(m.stuck_ticks_per_step)
            .clamp(m.stuck_min_ticks, m.stuck_max_ticks)
    }

    /// Fresh state for a journey of `body` to `target`.  The target is
    /// clamped so that `body` fits inside the bounds there.
    pub fn plan(&self, body: &Entity, target: Point, gait: Gait) -> MoveState {
        let target = self.bounds.clamp_center(target, body.rect.size);
        let distance = body.center().distance(target);
        MoveState::new(target, distance, self.stuck_budget(distance, gait.step))
    }

    // ── Journeys ──────────────────────────────────────────────────────────

    /// Walk `body` to within `gait.tolerance` of `target`.
    pub fn move_to<R: RandomSource>(
        &self,
        body:   &mut Entity,
        target: Point,
        gait:   Gait,
        rng:    &mut R,
    ) -> MobilityResult<()> {
        self.move_to_guarded(body, target, gait, rng, &mut Unguarded)
    }

    /// [`move_to`](Self::move_to) with `guard` consulted before every step.
    ///
    /// Returns `Unreachable` once the stuck budget is spent and
    /// `ShuttingDown` as soon as shutdown is noticed.
    pub fn move_to_guarded<R: RandomSource, G: StepGuard>(
        &self,
        body:   &mut Entity,
        target: Point,
        gait:   Gait,
        rng:    &mut R,
        guard:  &mut G,
    ) -> MobilityResult<()> {
        let mut state = self.plan(body, target, gait);
        loop {
            self.check_shutdown()?;
            let outcome = self.step_toward(body, &mut state, gait, rng, guard)?;
            if outcome == StepOutcome::Arrived {
                return Ok(());
            }
            state.record_distance(body.center().distance(state.target));
            if state.exhausted() {
                warn!(
                    "{} stuck at {} heading for {} ({} ticks)",
                    body.id, body.center(), state.target, state.stuck_ticks
                );
                return Err(MobilityError::Unreachable { target: state.target, ticks: state.stuck_ticks });
            }
            let pause = if outcome == StepOutcome::Wandering { self.wander_step_ms } else { self.step_ms };
            self.pause(pause)?;
        }
    }

    /// Visit `waypoints` in order with one guard spanning the whole route.
    pub fn follow<R: RandomSource, G: StepGuard>(
        &self,
        body:      &mut Entity,
        waypoints: &[Point],
        gait:      Gait,
        rng:       &mut R,
        guard:     &mut G,
    ) -> MobilityResult<()> {
        for &waypoint in waypoints {
            self.move_to_guarded(body, waypoint, gait, rng, guard)?;
        }
        Ok(())
    }

    // ── One tick ──────────────────────────────────────────────────────────

    /// Run the fallback ladder once.  Does not sleep.
    pub fn step_toward<R: RandomSource, G: StepGuard>(
        &self,
        body:  &mut Entity,
        state: &mut MoveState,
        gait:  Gait,
        rng:   &mut R,
        guard: &mut G,
    ) -> MobilityResult<StepOutcome> {
        let target = state.target;
        if body.center().near(target, gait.tolerance) {
            state.wander = None;
            return Ok(StepOutcome::Arrived);
        }

        if let Some(wander) = state.wander {
            let (dx, dy) = wander.direction.delta(gait.step);
            if self.try_commit(body, dx, dy, guard)? {
                if wander.remaining > 1 {
                    state.wander = Some(Wander { remaining: wander.remaining - 1, ..wander });
                } else {
                    state.wander = None;
                    state.heading = Some(wander.direction);
                }
                return Ok(StepOutcome::Wandering);
            }
            state.wander = None;
            state.heading = None;
        }

        let dx = (target.x - body.center().x).clamp(-gait.step, gait.step);
        let dy = (target.y - body.center().y).clamp(-gait.step, gait.step);

        if (dx, dy) != (0, 0) && self.try_commit(body, dx, dy, guard)? {
            state.blocked_ticks = 0;
            state.heading = None;
            trace!("{} -> {}", body.id, body.center());
            return Ok(StepOutcome::Moved);
        }
        for (cx, cy) in fallbacks(dx, dy, gait.step, state.heading) {
            if self.try_commit(body, cx, cy, guard)? {
                state.blocked_ticks = 0;
                trace!("{} ~> {}", body.id, body.center());
                return Ok(StepOutcome::Sidestepped);
            }
        }

        state.blocked_ticks += 1;
        if state.blocked_ticks >= self.movement.wander_after {
            state.wander = self.choose_wander(body, gait.step, rng);
            if let Some(w) = state.wander {
                trace!("{} wandering {:?}", body.id, w.direction);
                state.blocked_ticks = 0;
            }
        }
        Ok(StepOutcome::Blocked)
    }

    /// First direction, in random order, with `wander_lookahead` clear
    /// steps ahead of `body`.
    pub fn choose_wander<R: RandomSource>(&self, body: &Entity, step: i32, rng: &mut R) -> Option<Wander> {
        let mut directions = Direction::ALL;
        rng.shuffle(&mut directions);
        let lookahead = self.movement.wander_lookahead as i32;
        directions
            .into_iter()
            .find(|dir| {
                let (dx, dy) = dir.delta(step);
                (1..=lookahead).all(|k| {
                    let probe = body.rect.shifted(dx * k, dy * k);
                    self.bounds.contains(&probe) && self.registry.can_occupy(&probe, body.id)
                })
            })
            .map(|direction| Wander { direction, remaining: self.movement.wander_run })
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Bounds check, guard admission, then atomic check-and-publish.
    fn try_commit<G: StepGuard>(&self, body: &mut Entity, dx: i32, dy: i32, guard: &mut G) -> MobilityResult<bool> {
        let moved = Entity { rect: body.rect.shifted(dx, dy), ..*body };
        if !self.bounds.contains(&moved.rect) {
            return Ok(false);
        }
        guard.before_step(&body.rect, &moved.rect)?;
        if !self.registry.try_place(moved) {
            return Ok(false);
        }
        *body = moved;
        guard.after_step(&body.rect);
        Ok(true)
    }

    fn check_shutdown(&self) -> MobilityResult<()> {
        if self.shutdown.is_triggered() { Err(MobilityError::ShuttingDown) } else { Ok(()) }
    }

    fn pause(&self, ms: u64) -> MobilityResult<()> {
        self.shutdown.sleep_ms(ms).map_err(|_| MobilityError::ShuttingDown)
    }
}

/// Fallback deltas in ladder order: axis-only, sidesteps, then the escape
/// heading.  The direct step, zero moves, duplicates, and anything that
/// reverses `heading` on either axis are dropped.
pub(crate) fn fallbacks(dx: i32, dy: i32, step: i32, heading: Option<Direction>) -> Vec<(i32, i32)> {
    let (hx, hy) = heading.map_or((0, 0), Direction::signs);
    let mut out: Vec<(i32, i32)> = Vec::with_capacity(7);
    let mut push = |c: (i32, i32)| {
        let reverses = c.0 * hx < 0 || c.1 * hy < 0;
        if c != (0, 0) && c != (dx, dy) && !reverses && !out.contains(&c) {
            out.push(c);
        }
    };
    if dx != 0 && dy != 0 {
        push((dx, 0));
        push((0, dy));
    }
    if dx != 0 {
        push((dx, step));
        push((dx, -step));
    }
    if dy != 0 {
        push((step, dy));
        push((-step, dy));
    }
    if let Some(h) = heading {
        push(h.delta(step));
    }
    out
}
