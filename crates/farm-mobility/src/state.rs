//! Per-journey movement state.

use farm_core::{MovementConfig, Point};

// ── Direction ─────────────────────────────────────────────────────────────────

/// The eight compass directions a wander may commit to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// Per-axis delta of one step of `step` pixels.  North is `+y`.
    pub fn delta(self, step: i32) -> (i32, i32) {
        let (sx, sy) = self.signs();
        (sx * step, sy * step)
    }

    /// Unit delta.
    pub fn signs(self) -> (i32, i32) {
        match self {
            Direction::North     => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East      => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South     => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West      => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }
}

// ── Gait ──────────────────────────────────────────────────────────────────────

/// How an entity moves: pixels per tick and arrival tolerance per axis.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Gait {
    pub step:      i32,
    pub tolerance: i32,
}

impl Gait {
    pub const fn new(step: i32, tolerance: i32) -> Self {
        Self { step, tolerance }
    }

    /// Chickens, the farmer, and trucks.
    pub fn walk(cfg: &MovementConfig) -> Self {
        Self::new(cfg.step, cfg.tolerance)
    }

    /// Children and cows.
    pub fn stroll(cfg: &MovementConfig) -> Self {
        Self::new(cfg.slow_step, cfg.tolerance)
    }

    /// Same step, wider arrival tolerance.
    pub fn with_tolerance(self, tolerance: i32) -> Self {
        Self { tolerance, ..self }
    }
}

// ── MoveState ─────────────────────────────────────────────────────────────────

/// A wander in progress: keep walking `direction` for `remaining` steps.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Wander {
    pub direction: Direction,
    pub remaining: u32,
}

/// Bookkeeping for one `move_to` call.
///
/// `stuck_ticks` counts ticks since the distance to the target last reached
/// a new minimum; it is what the unreachable budget is measured against.
/// `blocked_ticks` counts consecutive ticks on which no candidate step
/// could be committed and triggers the wander fallback.  `heading` is the
/// direction of the last completed wander: until a direct step succeeds
/// again, fallback steps may not reverse it.
#[derive(Clone, Debug, PartialEq)]
pub struct MoveState {
    pub target:        Point,
    pub best_distance: f32,
    pub stuck_ticks:   u32,
    pub blocked_ticks: u32,
    pub budget:        u32,
    pub wander:        Option<Wander>,
    pub heading:       Option<Direction>,
}

impl MoveState {
    pub fn new(target: Point, distance: f32, budget: u32) -> Self {
        Self {
            target,
            best_distance: distance,
            stuck_ticks:   0,
            blocked_ticks: 0,
            budget,
            wander:        None,
            heading:       None,
        }
    }

    /// Record the distance after a tick.  Returns `true` if it was a new best.
    pub fn record_distance(&mut self, distance: f32) -> bool {
        if distance < self.best_distance {
            self.best_distance = distance;
            self.stuck_ticks = 0;
            true
        } else {
            self.stuck_ticks += 1;
            false
        }
    }

    #[inline]
    pub fn exhausted(&self) -> bool {
        self.stuck_ticks > self.budget
    }

    #[inline]
    pub fn is_wandering(&self) -> bool {
        self.wander.is_some()
    }
}

/// Result of a single tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Already within tolerance of the target; nothing moved.
    Arrived,
    /// The direct step was committed.
    Moved,
    /// An axis-only step, sidestep, or heading step was committed.
    Sidestepped,
    /// A wander step was committed.
    Wandering,
    /// Nothing could be committed this tick.
    Blocked,
}
