//! Unit tests for farm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{EntityId, NestId};

    #[test]
    fn index_is_the_inner_value() {
        assert_eq!(EntityId(42).index(), 42);
        assert_eq!(NestId(2).index(), 2);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(EntityId::INVALID.0, u32::MAX);
        assert_eq!(NestId::INVALID.0, u16::MAX);
        assert_eq!(NestId::default(), NestId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(EntityId(7).to_string(), "entity#7");
        assert_eq!(NestId(1).to_string(), "nest#1");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Bounds, Point, Rect, Size};

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn edges_from_center() {
        let r = rect(100, 50, 60, 20);
        assert_eq!((r.left(), r.right()), (70, 130));
        assert_eq!((r.bottom(), r.top()), (40, 60));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = rect(100, 100, 60, 60);
        let b = rect(160, 100, 60, 60);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));

        let c = rect(100, 160, 60, 60);
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn one_pixel_intrusion_overlaps() {
        let a = rect(100, 100, 60, 60);
        let b = rect(159, 100, 60, 60);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn containment_overlaps() {
        let big = rect(0, 0, 100, 100);
        let small = rect(5, 5, 10, 10);
        assert!(big.overlaps(&small));
        assert!(small.overlaps(&big));
    }

    #[test]
    fn bounds_contains_and_clamps() {
        let b = Bounds::with_margin(900, 600, 30);
        assert!(b.contains(&rect(60, 60, 60, 60)));
        assert!(!b.contains(&rect(59, 60, 60, 60)));
        assert!(!b.contains(&rect(60, 541, 60, 60)));

        let size = Size::new(60, 60);
        assert_eq!(b.clamp_center(Point::new(0, 0), size), Point::new(60, 60));
        assert_eq!(b.clamp_center(Point::new(1000, 1000), size), Point::new(840, 540));
        assert_eq!(b.clamp_center(Point::new(400, 300), size), Point::new(400, 300));
    }

    #[test]
    fn near_is_per_axis() {
        let p = Point::new(10, 10);
        assert!(p.near(Point::new(14, 6), 4));
        assert!(!p.near(Point::new(15, 10), 4));
    }
}

#[cfg(test)]
mod rng {
    use crate::{ActorRng, EntityId, RandomSource, SequenceRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = ActorRng::new(12345, EntityId(0));
        let mut r2 = ActorRng::new(12345, EntityId(0));
        for _ in 0..100 {
            assert_eq!(r1.range_inclusive(0, 1_000_000), r2.range_inclusive(0, 1_000_000));
        }
    }

    #[test]
    fn different_actors_differ() {
        let mut r0 = ActorRng::new(1, EntityId(0));
        let mut r1 = ActorRng::new(1, EntityId(1));
        let a: Vec<i64> = (0..8).map(|_| r0.range_inclusive(0, i64::MAX - 1)).collect();
        let b: Vec<i64> = (0..8).map(|_| r1.range_inclusive(0, i64::MAX - 1)).collect();
        assert_ne!(a, b, "seeds for adjacent actors should diverge");
    }

    #[test]
    fn range_in_bounds() {
        let mut rng = ActorRng::new(0, EntityId(0));
        for _ in 0..1000 {
            let v = rng.range_inclusive(1, 6);
            assert!((1..=6).contains(&v));
        }
        assert_eq!(rng.range_inclusive(5, 5), 5);
        assert_eq!(rng.range_inclusive(5, 2), 5);
    }

    #[test]
    fn chance_extremes() {
        let mut rng = ActorRng::new(0, EntityId(0));
        assert!(!rng.chance(0.0));
        assert!(rng.chance(1.0));
    }

    #[test]
    fn sequence_maps_into_range_and_cycles() {
        let mut rng = SequenceRng::new(vec![0, 2, 7]);
        assert_eq!(rng.range_inclusive(1, 6), 1);
        assert_eq!(rng.range_inclusive(1, 6), 3);
        assert_eq!(rng.range_inclusive(1, 6), 2); // 7 mod 6 = 1
        assert_eq!(rng.range_inclusive(1, 6), 1); // wrapped to 0
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn sequence_pick_and_chance() {
        let mut rng = SequenceRng::new(vec![1, 0]);
        assert_eq!(rng.pick_index(3), 1);
        assert_eq!(rng.pick_index(3), 0);
        assert!(rng.chance(0.5));
        assert!(!rng.chance(0.5));
        assert_eq!(rng.pick_index(0), 0);
    }

    #[test]
    fn shuffle_keeps_elements() {
        let mut rng = SequenceRng::new(vec![3, 1, 4, 1, 5]);
        let mut v = [1, 2, 3, 4, 5, 6, 7, 8];
        rng.shuffle(&mut v);
        let mut sorted = v;
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7, 8]);
    }
}

#[cfg(test)]
mod shutdown {
    use std::thread;
    use std::time::{Duration, Instant};

    use crate::Shutdown;

    #[test]
    fn sleep_completes_without_trigger() {
        let s = Shutdown::new();
        assert!(s.sleep_ms(5).is_ok());
        assert!(!s.is_triggered());
    }

    #[test]
    fn trigger_interrupts_long_sleep() {
        let s = Shutdown::new();
        let sleeper = s.clone();
        let start = Instant::now();
        let handle = thread::spawn(move || sleeper.sleep(Duration::from_secs(30)));
        thread::sleep(Duration::from_millis(20));
        s.trigger();
        let result = handle.join().unwrap();
        assert!(result.unwrap_err().is_shutdown());
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn sleep_after_trigger_fails_immediately() {
        let s = Shutdown::new();
        s.trigger();
        assert!(s.check().is_err());
        assert!(s.sleep_ms(0).is_err());
    }
}

#[cfg(test)]
mod stats {
    use crate::stats::Counter;
    use crate::Statistics;

    #[test]
    fn add_and_snapshot() {
        let stats = Statistics::new();
        stats.add(Counter::EggsLaid, 3);
        stats.add(Counter::EggsLaid, 2);
        stats.add(Counter::CakesSold, 4);
        let snap = stats.snapshot();
        assert_eq!(snap.eggs_laid, 5);
        assert_eq!(snap.cakes_sold, 4);
        assert_eq!(snap.get(Counter::EggsLaid), 5);
        assert_eq!(snap.flour_used, 0);
    }

    #[test]
    fn counter_names_are_unique() {
        let mut names: Vec<_> = Counter::ALL.iter().map(|c| c.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), Counter::COUNT);
    }

    #[test]
    fn egg_flow_conservation() {
        let stats = Statistics::new();
        stats.add(Counter::EggsLaid, 9);
        stats.add(Counter::EggsCollected, 6);
        stats.add(Counter::EggsLoaded, 6);
        stats.add(Counter::EggsDelivered, 3);
        stats.add(Counter::EggsUsed, 2);
        assert!(stats.snapshot().egg_flow_conserved());

        stats.add(Counter::EggsUsed, 5);
        assert!(!stats.snapshot().egg_flow_conserved());
    }
}

#[cfg(test)]
mod config {
    use crate::{FarmConfig, Timing};

    #[test]
    fn default_is_valid() {
        FarmConfig::default().validate().unwrap();
    }

    #[test]
    fn batch_larger_than_storage_rejected() {
        let mut cfg = FarmConfig::default();
        cfg.capacities.truck_batch = 7;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn child_order_above_stock_rejected() {
        let mut cfg = FarmConfig::default();
        cfg.capacities.max_cakes_per_child = 7;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn empty_nests_rejected() {
        let mut cfg = FarmConfig::default();
        cfg.layout.nests.clear();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn accelerated_timing_keeps_floor() {
        let t = Timing::default().accelerated(100);
        assert_eq!(t.step_ms, 1);
        assert_eq!(t.bake_ms, 20);
        assert_eq!(t.shop_wait_ms, 30);
        assert_eq!(Timing::default().accelerated(0), Timing::default());
    }
}
