//! Fluent builder for constructing a [`Farm`].

use std::sync::Arc;

use log::info;

use farm_actor::{Actor, ActorContext, Cargo, Chicken, Child, Cow, Farmer, OvenTender, Truck};
use farm_core::{ActorRng, EntityId, EntityKind, FarmConfig, Layer, Point, Shutdown, Statistics};
use farm_spatial::{Entity, EntityIdPool, SpatialRegistry};
use farm_station::Stations;

use crate::{Farm, SimResult};

/// Egg icons are numbered from here unless the layout already uses more ids.
const FIRST_ICON_ID: u32 = 1_000;

/// One placed mover and the loop it will run.
enum Role {
    Chicken { roost: Point, nest: usize },
    Farmer,
    Truck(Cargo),
    Child { rest: Point },
    Cow,
}

/// Fluent builder for [`Farm`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                    |
/// |-------------------|----------------------------|
/// | `.registry(r)`    | A fresh `SpatialRegistry`  |
/// | `.statistics(s)`  | A zeroed `Statistics`      |
/// | `.shutdown(s)`    | A fresh `Shutdown`         |
///
/// Sharing the registry or the statistics block lets a caller render or
/// sample them from outside the farm's own refresh thread.
pub struct FarmBuilder {
    config:   FarmConfig,
    registry: Option<Arc<SpatialRegistry>>,
    stats:    Option<Arc<Statistics>>,
    shutdown: Option<Shutdown>,
}

impl FarmBuilder {
    pub fn new(config: FarmConfig) -> Self {
        Self { config, registry: None, stats: None, shutdown: None }
    }

    pub fn registry(mut self, registry: Arc<SpatialRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn statistics(mut self, stats: Arc<Statistics>) -> Self {
        self.stats = Some(stats);
        self
    }

    /// Use an externally owned shutdown signal, e.g. one wired to Ctrl-C.
    pub fn shutdown(mut self, shutdown: Shutdown) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Validate the configuration, publish the scenery, place every mover,
    /// and return a farm ready to start.
    ///
    /// Fails with `SimError::Config` for an invalid configuration and with
    /// `SimError::Placement` if two movers would start overlapping or a
    /// mover would start outside the scene bounds.
    pub fn build(self) -> SimResult<Farm> {
        let config = self.config;
        config.validate()?;

        let registry = self.registry.unwrap_or_default();
        let stats = self.stats.unwrap_or_default();
        let shutdown = self.shutdown.unwrap_or_default();
        let ids = EntityIdPool::starting_at(1);

        // ── Scenery ───────────────────────────────────────────────────────
        let layout = &config.layout;
        let mut scenery: Vec<(EntityKind, Point)> = layout.nests.iter().map(|&p| (EntityKind::Nest, p)).collect();
        scenery.push((EntityKind::Barn, layout.egg_barn));
        scenery.push((EntityKind::Barn, layout.flour_barn));
        scenery.push((EntityKind::Bakery, layout.bakery));
        for (kind, at) in scenery {
            registry.publish(Entity::new(ids.next_id(), kind, at, Layer::Scenery));
        }

        // ── Movers ────────────────────────────────────────────────────────
        let pop = &config.population;
        let mut roles: Vec<(Role, Point)> = Vec::new();
        for i in 0..pop.chickens {
            let roost = layout.chicken_roosts[i % layout.chicken_roosts.len()];
            roles.push((Role::Chicken { roost, nest: i % layout.nests.len() }, roost));
        }
        roles.push((Role::Farmer, layout.farmer_rest));
        roles.push((Role::Truck(Cargo::EggsAndButter), layout.egg_road[0]));
        roles.push((Role::Truck(Cargo::FlourAndSugar), layout.flour_road[0]));
        for i in 0..pop.children {
            let rest = layout.child_rests[i % layout.child_rests.len()];
            roles.push((Role::Child { rest }, rest));
        }
        for i in 0..pop.cows {
            roles.push((Role::Cow, layout.cow_starts[i % layout.cow_starts.len()]));
        }

        let mut placed: Vec<(Role, Entity)> = Vec::with_capacity(roles.len());
        for (role, at) in roles {
            let kind = match role {
                Role::Chicken { .. } => EntityKind::Chicken,
                Role::Farmer => EntityKind::Farmer,
                Role::Truck(_) => EntityKind::Truck,
                Role::Child { .. } => EntityKind::Child,
                Role::Cow => EntityKind::Cow,
            };
            let body = Entity::mobile(ids.next_id(), kind, at);
            registry.place_within(body, &layout.bounds)?;
            placed.push((role, body));
        }
        let oven_id = ids.next_id();
        let icons = EntityIdPool::starting_at(ids.next_id().0.max(FIRST_ICON_ID));

        // ── Actors ────────────────────────────────────────────────────────
        let seed = config.seed;
        let stations = Stations::new(&config, &shutdown);
        let ctx = ActorContext::new(Arc::new(config), registry, stations, stats, shutdown)
            .with_icons(Arc::new(icons));

        let rng = |id: EntityId| ActorRng::new(seed, id);
        let mut actors: Vec<Box<dyn Actor>> = Vec::with_capacity(placed.len() + 1);
        for (role, body) in placed {
            let c = ctx.clone();
            let actor: Box<dyn Actor> = match role {
                Role::Chicken { roost, nest } => Box::new(Chicken::new(c, body, roost, nest, rng(body.id))),
                Role::Farmer => Box::new(Farmer::new(c, body, rng(body.id))),
                Role::Truck(cargo) => Box::new(Truck::new(c, body, cargo, rng(body.id))),
                Role::Child { rest } => Box::new(Child::new(c, body, rest, rng(body.id))),
                Role::Cow => Box::new(Cow::new(c, body, rng(body.id))),
            };
            actors.push(actor);
        }
        actors.push(Box::new(OvenTender::new(ctx.clone(), oven_id)));

        info!(
            "farm built: {} actors, {} registry entries, seed {seed}",
            actors.len(),
            ctx.registry().len()
        );
        Ok(Farm::new(ctx, actors))
    }
}
