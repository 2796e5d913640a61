//! Unit tests for farm-mobility.
//!
//! Every test builds its own registry with hand-placed blockers and runs
//! the engine with 1 ms ticks.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use farm_core::{Bounds, EntityId, EntityKind, MovementConfig, Point, Shutdown, Timing};
    use farm_spatial::{Entity, SpatialRegistry};

    use crate::{Gait, MobilityEngine};

    pub fn chicken(id: u32, x: i32, y: i32) -> Entity {
        Entity::mobile(EntityId(id), EntityKind::Chicken, Point::new(x, y))
    }

    pub fn engine_with(movement: MovementConfig) -> (MobilityEngine, Arc<SpatialRegistry>, Shutdown) {
        let registry = Arc::new(SpatialRegistry::new());
        let shutdown = Shutdown::new();
        let timing = Timing::default().accelerated(1_000);
        let engine = MobilityEngine::new(
            Arc::clone(&registry),
            Bounds::default(),
            movement,
            &timing,
            shutdown.clone(),
        );
        (engine, registry, shutdown)
    }

    pub fn engine() -> (MobilityEngine, Arc<SpatialRegistry>, Shutdown) {
        engine_with(MovementConfig::default())
    }

    pub fn gait() -> Gait {
        Gait::new(4, 4)
    }
}

#[cfg(test)]
mod ladder {
    use crate::Direction;
    use crate::engine::fallbacks;

    #[test]
    fn diagonal_order() {
        assert_eq!(fallbacks(4, 4, 4, None), vec![(4, 0), (0, 4), (4, -4), (-4, 4)]);
    }

    #[test]
    fn horizontal_has_sidesteps() {
        assert_eq!(fallbacks(4, 0, 4, None), vec![(4, 4), (4, -4)]);
    }

    #[test]
    fn short_final_step_keeps_its_length() {
        assert_eq!(fallbacks(0, -2, 4, None), vec![(4, -2), (-4, -2)]);
    }

    #[test]
    fn heading_drops_reversals_and_joins_last() {
        assert_eq!(
            fallbacks(4, -4, 4, Some(Direction::North)),
            vec![(4, 0), (4, 4), (0, 4)]
        );
    }

    #[test]
    fn zero_delta_yields_nothing() {
        assert!(fallbacks(0, 0, 4, None).is_empty());
    }

    #[test]
    fn delta_scales_signs() {
        assert_eq!(Direction::SouthWest.delta(3), (-3, -3));
        assert_eq!(Direction::North.signs(), (0, 1));
    }
}

#[cfg(test)]
mod stepping {
    use farm_core::{MovementConfig, Point, SequenceRng};

    use super::helpers::{chicken, engine, engine_with, gait};
    use crate::{Direction, StepOutcome, Unguarded};

    #[test]
    fn direct_step_is_clamped_to_step() {
        let (engine, registry, _) = engine();
        let mut body = chicken(1, 100, 100);
        registry.publish(body);
        let mut state = engine.plan(&body, Point::new(300, 102), gait());
        let mut rng = SequenceRng::default();
        let out = engine.step_toward(&mut body, &mut state, gait(), &mut rng, &mut Unguarded).unwrap();
        assert_eq!(out, StepOutcome::Moved);
        assert_eq!(body.center(), Point::new(104, 102));
        assert_eq!(registry.get(body.id).unwrap().center(), Point::new(104, 102));
    }

    #[test]
    fn blocked_diagonal_falls_back_to_axis() {
        let (engine, registry, _) = engine();
        let mut body = chicken(1, 100, 100);
        registry.publish(body);
        // Overlaps (104,104) but only touches (104,100).
        registry.publish(chicken(2, 100, 163));
        let mut state = engine.plan(&body, Point::new(200, 200), gait());
        let mut rng = SequenceRng::default();
        let out = engine.step_toward(&mut body, &mut state, gait(), &mut rng, &mut Unguarded).unwrap();
        assert_eq!(out, StepOutcome::Sidestepped);
        assert_eq!(body.center(), Point::new(104, 100));
    }

    #[test]
    fn fully_blocked_tick_enters_wander() {
        let movement = MovementConfig { wander_after: 2, ..MovementConfig::default() };
        let (engine, registry, _) = engine_with(movement);
        let mut body = chicken(1, 100, 100);
        registry.publish(body);
        registry.publish(chicken(2, 161, 100));
        let mut state = engine.plan(&body, Point::new(300, 100), gait());
        let mut rng = SequenceRng::new([0, 3, 1, 5, 2, 0, 4]);

        for _ in 0..2 {
            let out = engine.step_toward(&mut body, &mut state, gait(), &mut rng, &mut Unguarded).unwrap();
            assert_eq!(out, StepOutcome::Blocked);
        }
        assert_eq!(body.center(), Point::new(100, 100));
        let wander = state.wander.expect("wander chosen after two blocked ticks");
        assert!(!matches!(
            wander.direction,
            Direction::NorthEast | Direction::East | Direction::SouthEast
        ));
        assert_eq!(wander.remaining, 10);

        let out = engine.step_toward(&mut body, &mut state, gait(), &mut rng, &mut Unguarded).unwrap();
        assert_eq!(out, StepOutcome::Wandering);
        assert_eq!(state.wander.map(|w| w.remaining), Some(9));
        assert!(registry.render(|view| view.collisions()).is_empty());
    }

    #[test]
    fn wander_needs_full_lookahead() {
        let (engine, registry, _) = engine();
        let body = chicken(1, 400, 300);
        registry.publish(body);
        // Ring of blockers with a 20 px gap: one step in any direction is
        // clear, ten are not.
        for (i, (dx, dy)) in [(80, 0), (-80, 0), (0, 80), (0, -80), (80, 80), (-80, 80), (80, -80), (-80, -80)]
            .into_iter()
            .enumerate()
        {
            registry.publish(chicken(10 + i as u32, 400 + dx, 300 + dy));
        }
        let mut rng = SequenceRng::default();
        assert!(engine.choose_wander(&body, 4, &mut rng).is_none());
    }

    #[test]
    fn arrived_within_tolerance() {
        let (engine, registry, _) = engine();
        let mut body = chicken(1, 100, 100);
        registry.publish(body);
        let mut state = engine.plan(&body, Point::new(103, 97), gait());
        let mut rng = SequenceRng::default();
        let out = engine.step_toward(&mut body, &mut state, gait(), &mut rng, &mut Unguarded).unwrap();
        assert_eq!(out, StepOutcome::Arrived);
        assert_eq!(body.center(), Point::new(100, 100));
    }

    #[test]
    fn out_of_bounds_step_is_refused() {
        let (engine, registry, _) = engine();
        // Left edge exactly on the 30 px margin.
        let mut body = chicken(1, 60, 300);
        registry.publish(body);
        let mut state = engine.plan(&body, Point::new(60, 400), gait());
        state.target = Point::new(0, 300);
        let mut rng = SequenceRng::default();
        let out = engine.step_toward(&mut body, &mut state, gait(), &mut rng, &mut Unguarded).unwrap();
        // (-4,0) leaves the bounds; the sidesteps (-4,±4) do too.
        assert_eq!(out, StepOutcome::Blocked);
        assert_eq!(body.center(), Point::new(60, 300));
    }
}

#[cfg(test)]
mod journeys {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;

    use farm_core::{MovementConfig, Point, Rect, SequenceRng};

    use super::helpers::{chicken, engine, engine_with, gait};
    use crate::{Gait, MobilityError, MobilityResult, StepGuard};

    #[test]
    fn free_path_arrives() {
        let (engine, registry, _) = engine();
        let mut body = chicken(1, 100, 100);
        registry.publish(body);
        let mut rng = SequenceRng::default();
        engine.move_to(&mut body, Point::new(200, 160), gait(), &mut rng).unwrap();
        assert!(body.center().near(Point::new(200, 160), 4));
        assert_eq!(registry.get(body.id).unwrap(), body);
    }

    #[test]
    fn target_outside_bounds_is_clamped() {
        let (engine, registry, _) = engine();
        let mut body = chicken(1, 100, 100);
        registry.publish(body);
        let mut rng = SequenceRng::default();
        engine.move_to(&mut body, Point::new(-500, -500), gait(), &mut rng).unwrap();
        assert!(body.center().near(Point::new(60, 60), 4));
    }

    /// The default script shuffles South to the front of the clear
    /// directions; the escape heading then carries the mover below the
    /// obstacle instead of letting it slide back behind it.
    #[test]
    fn detours_around_obstacle() {
        let (engine, registry, _) = engine();
        let mut body = chicken(1, 100, 300);
        registry.publish(body);
        registry.publish(chicken(2, 250, 300));
        let mut rng = SequenceRng::default();
        engine.move_to(&mut body, Point::new(400, 300), gait(), &mut rng).unwrap();
        assert!(body.center().near(Point::new(400, 300), 4));
        assert!(registry.render(|view| view.collisions()).is_empty());
    }

    #[test]
    fn boxed_in_is_unreachable() {
        let movement = MovementConfig { stuck_min_ticks: 5, stuck_max_ticks: 5, ..MovementConfig::default() };
        let (engine, registry, _) = engine_with(movement);
        let mut body = chicken(1, 300, 300);
        registry.publish(body);
        let mut id = 10;
        for dx in [-60, 0, 60] {
            for dy in [-60, 0, 60] {
                if (dx, dy) != (0, 0) {
                    registry.publish(chicken(id, 300 + dx, 300 + dy));
                    id += 1;
                }
            }
        }
        let mut rng = SequenceRng::default();
        let err = engine.move_to(&mut body, Point::new(600, 300), gait(), &mut rng).unwrap_err();
        assert!(matches!(err, MobilityError::Unreachable { ticks: 6, .. }), "{err:?}");
        assert_eq!(body.center(), Point::new(300, 300));
    }

    #[test]
    fn shutdown_stops_journey() {
        let (engine, registry, shutdown) = engine();
        let mut body = chicken(1, 100, 100);
        registry.publish(body);
        shutdown.trigger();
        let mut rng = SequenceRng::default();
        let err = engine.move_to(&mut body, Point::new(800, 500), gait(), &mut rng).unwrap_err();
        assert!(err.is_shutdown());
    }

    #[test]
    fn follow_visits_every_waypoint() {
        struct Trail(Vec<Point>);
        impl StepGuard for Trail {
            fn before_step(&mut self, _from: &Rect, _to: &Rect) -> MobilityResult<()> {
                Ok(())
            }
            fn after_step(&mut self, now: &Rect) {
                self.0.push(now.center);
            }
        }

        let (engine, registry, _) = engine();
        let mut body = chicken(1, 100, 100);
        registry.publish(body);
        let mut rng = SequenceRng::default();
        let mut trail = Trail(Vec::new());
        let route = [Point::new(200, 100), Point::new(200, 200)];
        let exact = Gait::new(4, 0);
        engine.follow(&mut body, &route, exact, &mut rng, &mut trail).unwrap();
        assert!(trail.0.contains(&Point::new(200, 100)));
        assert_eq!(trail.0.last(), Some(&Point::new(200, 200)));
    }

    #[test]
    fn guard_error_aborts_without_moving() {
        struct Closed;
        impl StepGuard for Closed {
            fn before_step(&mut self, _from: &Rect, _to: &Rect) -> MobilityResult<()> {
                Err(MobilityError::ShuttingDown)
            }
            fn after_step(&mut self, _now: &Rect) {}
        }

        let (engine, registry, _) = engine();
        let mut body = chicken(1, 100, 100);
        registry.publish(body);
        let mut rng = SequenceRng::default();
        let err = engine
            .move_to_guarded(&mut body, Point::new(200, 100), gait(), &mut rng, &mut Closed)
            .unwrap_err();
        assert!(err.is_shutdown());
        assert_eq!(registry.get(body.id).unwrap().center(), Point::new(100, 100));
    }

    /// Two movers swap places through a shared corridor while a third
    /// thread samples the registry.  No sample may show an overlap.
    #[test]
    fn crossing_movers_never_overlap() {
        let (engine, registry, _) = engine();
        let a = chicken(1, 200, 300);
        let b = chicken(2, 600, 300);
        registry.publish(a);
        registry.publish(b);

        let done = Arc::new(AtomicBool::new(false));
        let sampler = {
            let registry = Arc::clone(&registry);
            let done = Arc::clone(&done);
            thread::spawn(move || {
                let mut worst = 0;
                while !done.load(Ordering::Relaxed) {
                    worst = worst.max(registry.render(|view| view.collisions().len()));
                    thread::yield_now();
                }
                worst
            })
        };

        let movers: Vec<_> = [(a, Point::new(600, 300), 7), (b, Point::new(200, 300), 11)]
            .into_iter()
            .map(|(mut body, target, seed)| {
                let engine = engine.clone();
                thread::spawn(move || {
                    let mut rng = SequenceRng::new([seed, 2, 5, 1, 6, 3, 0, 4]);
                    let _ = engine.move_to(&mut body, target, gait(), &mut rng);
                })
            })
            .collect();
        for m in movers {
            m.join().unwrap();
        }
        done.store(true, Ordering::Relaxed);
        assert_eq!(sampler.join().unwrap(), 0);
    }
}
