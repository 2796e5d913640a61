//! Unit tests for farm-spatial.

#[cfg(test)]
mod helpers {
    use farm_core::{EntityId, EntityKind, Point};

    use crate::Entity;

    /// A 60 × 60 chicken on layer 2.
    pub fn chicken(id: u32, x: i32, y: i32) -> Entity {
        Entity::mobile(EntityId(id), EntityKind::Chicken, Point::new(x, y))
    }
}

#[cfg(test)]
mod registry {
    use std::sync::Arc;
    use std::thread;

    use farm_core::{EntityId, EntityKind, Layer, Point, Size};

    use super::helpers::chicken;
    use crate::{Entity, SpatialError, SpatialRegistry};

    #[test]
    fn publish_is_upsert() {
        let reg = SpatialRegistry::new();
        assert!(reg.publish(chicken(1, 100, 100)).is_none());
        let prev = reg.publish(chicken(1, 140, 100)).unwrap();
        assert_eq!(prev.center(), Point::new(100, 100));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get(EntityId(1)).unwrap().center(), Point::new(140, 100));
    }

    #[test]
    fn remove_absent_is_noop() {
        let reg = SpatialRegistry::new();
        assert!(reg.remove(EntityId(9)).is_none());
        assert!(reg.is_empty());
        assert!(matches!(reg.get(EntityId(9)), Err(SpatialError::EntityNotFound(_))));
    }

    #[test]
    fn touching_neighbours_may_coexist() {
        let reg = SpatialRegistry::new();
        assert!(reg.try_place(chicken(1, 100, 100)));
        assert!(reg.try_place(chicken(2, 160, 100)));
        assert!(!reg.try_place(chicken(3, 159, 159)));
    }

    #[test]
    fn self_is_excluded_from_collision() {
        let reg = SpatialRegistry::new();
        reg.publish(chicken(1, 100, 100));
        // Moving one pixel overlaps the old rectangle of the same id only.
        assert!(reg.try_place(chicken(1, 101, 100)));
        assert!(reg.can_occupy(&chicken(1, 102, 100).rect, EntityId(1)));
        assert!(!reg.can_occupy(&chicken(2, 102, 100).rect, EntityId(2)));
    }

    #[test]
    fn place_names_blocker() {
        let reg = SpatialRegistry::new();
        reg.publish(chicken(1, 100, 100));
        match reg.place(chicken(2, 120, 120)) {
            Err(SpatialError::Blocked { id, by }) => {
                assert_eq!(id, EntityId(2));
                assert_eq!(by, EntityId(1));
            }
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn scenery_and_icons_never_block() {
        let reg = SpatialRegistry::new();
        reg.publish(Entity::new(EntityId(10), EntityKind::Barn, Point::new(100, 100), Layer::Scenery));
        reg.publish(Entity::new(EntityId(1000), EntityKind::Egg, Point::new(100, 100), Layer::Icon));
        assert!(reg.try_place(chicken(1, 100, 100)));
        // Icons may sit on top of a mover as well.
        assert!(reg.try_place(Entity::new(EntityId(1001), EntityKind::Egg, Point::new(100, 100), Layer::Icon)));
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn removed_mover_frees_its_square() {
        let reg = SpatialRegistry::new();
        reg.publish(chicken(1, 100, 100));
        assert!(!reg.try_place(chicken(2, 100, 100)));
        reg.remove(EntityId(1));
        assert!(reg.try_place(chicken(2, 100, 100)));
    }

    #[test]
    fn layer_change_updates_index() {
        let reg = SpatialRegistry::new();
        reg.update_position(EntityId(1), EntityKind::Chicken, Point::new(100, 100), Size::new(60, 60), Layer::Mobile);
        assert!(!reg.can_occupy(&chicken(2, 100, 100).rect, EntityId(2)));
        reg.update_position(EntityId(1), EntityKind::Chicken, Point::new(100, 100), Size::new(60, 60), Layer::Scenery);
        assert!(reg.can_occupy(&chicken(2, 100, 100).rect, EntityId(2)));
    }

    #[test]
    fn draw_order_is_layer_then_id() {
        let reg = SpatialRegistry::new();
        reg.publish(chicken(5, 500, 500));
        reg.publish(Entity::new(EntityId(1000), EntityKind::Egg, Point::new(0, 0), Layer::Icon));
        reg.publish(Entity::new(EntityId(20), EntityKind::Nest, Point::new(0, 0), Layer::Scenery));
        reg.publish(chicken(2, 100, 100));
        let ids: Vec<u32> = reg.snapshot().iter().map(|e| e.id.0).collect();
        assert_eq!(ids, vec![20, 1000, 2, 5]);
    }

    #[test]
    fn render_sees_consistent_view() {
        let reg = SpatialRegistry::new();
        reg.publish(chicken(1, 100, 100));
        reg.publish(chicken(2, 300, 100));
        let (movers, chickens, overlaps) = reg.render(|view| {
            (view.on_layer(Layer::Mobile).count(), view.count_kind(EntityKind::Chicken), view.collisions())
        });
        assert_eq!((movers, chickens), (2, 2));
        assert!(overlaps.is_empty());
    }

    #[test]
    fn collisions_reports_forced_overlap() {
        let reg = SpatialRegistry::new();
        reg.publish(chicken(2, 100, 100));
        reg.publish(chicken(1, 110, 100));
        let pairs = reg.render(|view| view.collisions());
        assert_eq!(pairs, vec![(EntityId(1), EntityId(2))]);
    }

    /// Many threads race for the same square; exactly one wins.
    #[test]
    fn try_place_is_atomic_under_contention() {
        let reg = Arc::new(SpatialRegistry::new());
        let handles: Vec<_> = (1..=16)
            .map(|i| {
                let reg = Arc::clone(&reg);
                thread::spawn(move || reg.try_place(chicken(i, 400, 300)))
            })
            .collect();
        let winners = handles.into_iter().map(|h| h.join().unwrap()).filter(|won| *won).count();
        assert_eq!(winners, 1);
        assert!(reg.render(|view| view.collisions()).is_empty());
    }
}

#[cfg(test)]
mod pool {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use farm_core::EntityId;

    use crate::EntityIdPool;

    #[test]
    fn default_starts_at_thousand() {
        let pool = EntityIdPool::default();
        assert_eq!(pool.next_id(), EntityId(1_000));
        assert_eq!(pool.next_id(), EntityId(1_001));
    }

    #[test]
    fn concurrent_ids_are_unique() {
        let pool = Arc::new(EntityIdPool::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pool = Arc::clone(&pool);
                thread::spawn(move || (0..100).map(|_| pool.next_id()).collect::<Vec<_>>())
            })
            .collect();
        let all: HashSet<EntityId> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        assert_eq!(all.len(), 400);
    }
}

#[cfg(test)]
mod placement {
    use farm_core::{Bounds, EntityId};

    use super::helpers::chicken;
    use crate::{SpatialError, SpatialRegistry};

    #[test]
    fn place_within_rejects_out_of_bounds() {
        let reg = SpatialRegistry::new();
        let bounds = Bounds::default();
        assert!(matches!(
            reg.place_within(chicken(1, 40, 300), &bounds),
            Err(SpatialError::OutOfBounds { id: EntityId(1), .. })
        ));
        assert!(reg.place_within(chicken(1, 60, 300), &bounds).is_ok());
        assert_eq!(reg.len(), 1);
    }
}
