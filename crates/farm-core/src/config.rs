//! Simulation configuration.
//!
//! [`FarmConfig`] gathers every tunable of a run: population counts, station
//! capacities and batch sizes, timing cadences, movement parameters, and the
//! scene layout.  `Default` reproduces the reference farm; the demo binary
//! can overlay a JSON file on top of it (feature `serde`, every section is
//! `#[serde(default)]` so partial files work).
//!
//! Timing values are plain milliseconds.  Tests shrink them with
//! [`Timing::accelerated`] so whole pipelines run in well under a second.

use crate::{Bounds, FarmError, FarmResult, Point, Rect, Size};

// ── Population ────────────────────────────────────────────────────────────────

/// How many actors of each kind to spawn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Population {
    pub chickens: usize,
    pub cows:     usize,
    pub children: usize,
}

impl Default for Population {
    fn default() -> Self {
        Self { chickens: 3, cows: 2, children: 5 }
    }
}

// ── Capacities ────────────────────────────────────────────────────────────────

/// Station capacities and the fixed batch sizes moved between them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Capacities {
    /// Eggs a nest holds before it is full.
    pub nest: u32,
    /// Per-ingredient cap of bakery storage.
    pub storage: u32,
    /// Finished-cake cap of bakery stock.
    pub stock: u32,
    /// Eggs the egg truck takes from the barn per trip.
    pub barn_batch: u32,
    /// Units of each good a truck unloads per trip.
    pub truck_batch: u32,
    /// Units of each ingredient one bake consumes.
    pub bake_batch: u32,
    /// Cakes one bake yields.
    pub bake_yield: u32,
    /// Eggs a chicken lays per sitting, inclusive range.
    pub lay_min: u32,
    pub lay_max: u32,
    /// Largest order a child places (orders are uniform in `1..=max`).
    pub max_cakes_per_child: u32,
}

impl Default for Capacities {
    fn default() -> Self {
        Self {
            nest:                3,
            storage:             6,
            stock:               6,
            barn_batch:          3,
            truck_batch:         3,
            bake_batch:          2,
            bake_yield:          3,
            lay_min:             1,
            lay_max:             2,
            max_cakes_per_child: 6,
        }
    }
}

// ── Timing ────────────────────────────────────────────────────────────────────

/// Every fixed sleep in the simulation, in milliseconds.
///
/// Sleeps never hold a lock and are interrupted by shutdown.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Timing {
    /// One fine movement tick.
    pub step_ms:        u64,
    /// One collision-avoidance wander tick.
    pub wander_step_ms: u64,
    /// Interval between two eggs of one sitting, inclusive range.
    pub lay_min_ms:     u64,
    pub lay_max_ms:     u64,
    pub bake_ms:        u64,
    pub load_ms:        u64,
    pub unload_ms:      u64,
    pub child_pause_ms: u64,
    /// Longest a child stands at the counter waiting for its order before
    /// giving up the counter and walking away.
    pub shop_wait_ms:   u64,
    pub farmer_rest_ms: u64,
    pub cow_pause_ms:   u64,
    /// Display refresh cadence.
    pub refresh_ms:     u64,
    /// Upper bound on how long a station wait sleeps before re-checking
    /// its predicate and the shutdown flag.
    pub poll_ms:        u64,
    /// How often the refresh task logs a statistics line.
    pub stats_log_ms:   u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            step_ms:        50,
            wander_step_ms: 100,
            lay_min_ms:     400,
            lay_max_ms:     500,
            bake_ms:        2_000,
            load_ms:        500,
            unload_ms:      500,
            child_pause_ms: 1_000,
            shop_wait_ms:   3_000,
            farmer_rest_ms: 200,
            cow_pause_ms:   1_000,
            refresh_ms:     100,
            poll_ms:        50,
            stats_log_ms:   1_000,
        }
    }
}

impl Timing {
    /// Every duration divided by `factor` (never below 1 ms).
    ///
    /// The ratios between cadences are kept, so relative ordering of events
    /// (a bake spans many movement ticks, …) survives acceleration.
    pub fn accelerated(&self, factor: u64) -> Self {
        let f = factor.max(1);
        let s = |ms: u64| (ms / f).max(1);
        Self {
            step_ms:        s(self.step_ms),
            wander_step_ms: s(self.wander_step_ms),
            lay_min_ms:     s(self.lay_min_ms),
            lay_max_ms:     s(self.lay_max_ms),
            bake_ms:        s(self.bake_ms),
            load_ms:        s(self.load_ms),
            unload_ms:      s(self.unload_ms),
            child_pause_ms: s(self.child_pause_ms),
            shop_wait_ms:   s(self.shop_wait_ms),
            farmer_rest_ms: s(self.farmer_rest_ms),
            cow_pause_ms:   s(self.cow_pause_ms),
            refresh_ms:     s(self.refresh_ms),
            poll_ms:        s(self.poll_ms),
            stats_log_ms:   s(self.stats_log_ms),
        }
    }
}

// ── MovementConfig ────────────────────────────────────────────────────────────

/// Parameters of the step-wise movement engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MovementConfig {
    /// Per-tick step of chickens, the farmer, and trucks.
    pub step:            i32,
    /// Per-tick step of children and cows.
    pub slow_step:       i32,
    /// Arrival tolerance per axis, in pixels.
    pub tolerance:       i32,
    /// Consecutive blocked ticks before the wander fallback kicks in.
    pub wander_after:    u32,
    /// Clear steps a wander direction must have ahead of it.
    pub wander_lookahead: u32,
    /// Steps walked once a wander direction is chosen.
    pub wander_run:      u32,
    /// Stuck budget per step of initial distance.
    pub stuck_ticks_per_step: u32,
    /// Clamp of the stuck budget.
    pub stuck_min_ticks: u32,
    pub stuck_max_ticks: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            step:                 4,
            slow_step:            2,
            tolerance:            4,
            wander_after:         5,
            wander_lookahead:     10,
            wander_run:           10,
            stuck_ticks_per_step: 3,
            stuck_min_ticks:      200,
            stuck_max_ticks:      1_500,
        }
    }
}

// ── Layout ────────────────────────────────────────────────────────────────────

/// Where everything sits on a 900 × 600 scene.
///
/// Roads are polylines from a truck's home to its bakery dock; the truck
/// drives `road[1..]` outbound and the reverse back.  Both roads pass the
/// center of `intersection`, which is sized so that a truck waiting at its
/// edge never overlaps a truck crossing on the other road.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Layout {
    /// Usable area for mobile entities.
    pub bounds:         Bounds,
    /// Nest centers.  A sitting chicken stands exactly here.
    pub nests:          Vec<Point>,
    /// Offset from a nest center to the spot where a chicken asks to sit.
    pub nest_approach:  Point,
    /// Offset from a nest center to the spot the farmer collects from.
    pub nest_collect:   Point,
    /// Where chickens go after laying, one per chicken (cycled).
    pub chicken_roosts: Vec<Point>,
    pub egg_barn:       Point,
    pub flour_barn:     Point,
    pub bakery:         Point,
    pub egg_road:       Vec<Point>,
    pub flour_road:     Vec<Point>,
    /// The single-slot road crossing.
    pub intersection:   Rect,
    /// Farmer's resting spot and egg drop-off for the barn pool.
    pub farmer_rest:    Point,
    pub shop_entrance:  Point,
    /// How close a child must get to the entrance to count as arrived.
    pub shop_tolerance: i32,
    /// Resting spots, one per child (cycled).
    pub child_rests:    Vec<Point>,
    /// Cows graze inside this rectangle.
    pub pasture:        Rect,
    pub cow_starts:     Vec<Point>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            bounds:         Bounds::with_margin(900, 600, 30),
            nests:          vec![Point::new(120, 100), Point::new(220, 100), Point::new(320, 100)],
            nest_approach:  Point::new(0, 80),
            nest_collect:   Point::new(-50, 60),
            chicken_roosts: vec![Point::new(90, 240), Point::new(190, 240), Point::new(290, 240)],
            egg_barn:       Point::new(100, 300),
            flour_barn:     Point::new(400, 520),
            bakery:         Point::new(720, 120),
            egg_road:       vec![Point::new(100, 300), Point::new(400, 300), Point::new(650, 300)],
            flour_road:     vec![
                Point::new(400, 520),
                Point::new(400, 300),
                Point::new(400, 120),
                Point::new(540, 120),
            ],
            intersection:   Rect::new(Point::new(400, 300), Size::new(180, 180)),
            farmer_rest:    Point::new(180, 380),
            shop_entrance:  Point::new(800, 260),
            shop_tolerance: 40,
            child_rests:    (0..5).map(|i| Point::new(560 + 60 * i, 470)).collect(),
            pasture:        Rect::new(Point::new(190, 490), Size::new(220, 80)),
            cow_starts:     vec![Point::new(100, 470), Point::new(230, 510)],
        }
    }
}

impl Layout {
    /// Where a chicken stands to ask the nest at `nest` for a seat.
    #[inline]
    pub fn approach_spot(&self, nest: Point) -> Point {
        nest.offset(self.nest_approach.x, self.nest_approach.y)
    }

    /// Where the farmer stands to empty the nest at `nest`.
    #[inline]
    pub fn collect_spot(&self, nest: Point) -> Point {
        nest.offset(self.nest_collect.x, self.nest_collect.y)
    }
}

// ── FarmConfig ────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FarmConfig {
    /// Master RNG seed.  Each actor derives its own stream from it.
    pub seed:       u64,
    pub population: Population,
    pub capacities: Capacities,
    pub timing:     Timing,
    pub movement:   MovementConfig,
    pub layout:     Layout,
}

impl FarmConfig {
    /// Reject configurations under which some station could never make
    /// progress (a batch larger than the buffer it must fit in, …).
    pub fn validate(&self) -> FarmResult<()> {
        let c = &self.capacities;
        let bad = |msg: String| Err(FarmError::Config(msg));

        if c.nest == 0 || c.storage == 0 || c.stock == 0 {
            return bad("nest, storage and stock capacities must be positive".into());
        }
        if c.lay_min == 0 || c.lay_min > c.lay_max {
            return bad(format!("lay range {}..={} is empty or starts at zero", c.lay_min, c.lay_max));
        }
        if c.barn_batch == 0 || c.truck_batch == 0 || c.bake_batch == 0 || c.bake_yield == 0 {
            return bad("batch sizes must be positive".into());
        }
        if c.truck_batch > c.storage || c.barn_batch > c.storage {
            return bad(format!(
                "truck batch {} / barn batch {} exceeds storage capacity {}",
                c.truck_batch, c.barn_batch, c.storage
            ));
        }
        if c.bake_batch > c.storage {
            return bad(format!("bake batch {} exceeds storage capacity {}", c.bake_batch, c.storage));
        }
        if c.bake_yield > c.stock {
            return bad(format!("bake yield {} exceeds stock capacity {}", c.bake_yield, c.stock));
        }
        if c.max_cakes_per_child == 0 || c.max_cakes_per_child > c.stock {
            return bad(format!(
                "child order limit {} must be in 1..={}",
                c.max_cakes_per_child, c.stock
            ));
        }

        let l = &self.layout;
        if l.nests.is_empty() {
            return bad("layout must declare at least one nest".into());
        }
        if l.chicken_roosts.is_empty() || l.child_rests.is_empty() {
            return bad("layout must declare chicken roosts and child resting spots".into());
        }
        if self.population.cows > 0 && l.cow_starts.is_empty() {
            return bad("cows need at least one start position".into());
        }
        if l.egg_road.len() < 2 || l.flour_road.len() < 2 {
            return bad("each road needs a home and at least one waypoint".into());
        }

        let m = &self.movement;
        if m.step <= 0 || m.slow_step <= 0 || m.tolerance < 0 {
            return bad("movement steps must be positive".into());
        }
        if m.stuck_min_ticks == 0 || m.stuck_min_ticks > m.stuck_max_ticks {
            return bad("stuck bounds must satisfy 0 < min <= max".into());
        }
        if self.timing.lay_min_ms > self.timing.lay_max_ms {
            return bad("lay interval range is empty".into());
        }
        Ok(())
    }
}
