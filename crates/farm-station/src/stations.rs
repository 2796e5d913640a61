//! The full set of stations, built once from the configuration and handed
//! to every actor by cloning the `Arc`s.

use std::sync::Arc;

use farm_core::{FarmConfig, NestId, Shutdown};

use crate::{
    Barn, BakeryStock, BakeryStorage, Intersection, Nest, Oven, OvenState, Pantry, Shelf, ShopCounter,
    StationError, StationResult,
};

#[derive(Clone)]
pub struct Stations {
    pub nests:        Vec<Arc<Nest>>,
    pub barn:         Arc<Barn>,
    pub storage:      Arc<BakeryStorage>,
    pub stock:        Arc<BakeryStock>,
    pub oven:         Arc<Oven>,
    pub intersection: Arc<Intersection>,
    pub shop:         Arc<ShopCounter>,
}

impl Stations {
    pub fn new(config: &FarmConfig, shutdown: &Shutdown) -> Self {
        let caps = &config.capacities;
        let layout = &config.layout;
        let poll = config.timing.poll_ms;
        let nests = layout
            .nests
            .iter()
            .enumerate()
            .map(|(i, &p)| Arc::new(Nest::new(NestId(i as u16), p, caps.nest, shutdown.clone(), poll)))
            .collect();
        Self {
            nests,
            barn: Arc::new(Barn::new(shutdown.clone(), poll)),
            storage: Arc::new(BakeryStorage::new(caps.storage, shutdown.clone(), poll)),
            stock: Arc::new(BakeryStock::new(caps.stock, shutdown.clone(), poll)),
            oven: Arc::new(Oven::new(shutdown.clone(), poll)),
            intersection: Arc::new(Intersection::new(layout.intersection, shutdown.clone(), poll)),
            shop: Arc::new(ShopCounter::new(layout.shop_entrance, shutdown.clone(), poll)),
        }
    }

    pub fn nest(&self, id: NestId) -> StationResult<&Arc<Nest>> {
        self.nests.get(id.index()).ok_or(StationError::UnknownNest(id))
    }

    /// Every bounded counter, each read under its own lock.  The fields are
    /// individually consistent but not a single atomic cut.
    pub fn levels(&self) -> StationLevels {
        StationLevels {
            nest_eggs: self.nests.iter().map(|n| n.snapshot().eggs).collect(),
            barn_eggs: self.barn.eggs(),
            pantry:    self.storage.level(),
            shelf:     self.stock.shelf(),
            oven:      self.oven.state(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StationLevels {
    pub nest_eggs: Vec<u32>,
    pub barn_eggs: u32,
    pub pantry:    Pantry,
    pub shelf:     Shelf,
    pub oven:      OvenState,
}

impl StationLevels {
    /// `true` if every bounded counter is within its capacity.
    pub fn within(&self, config: &FarmConfig) -> bool {
        let caps = &config.capacities;
        self.nest_eggs.iter().all(|&e| e <= caps.nest)
            && self.pantry.max() <= caps.storage
            && self.shelf.cakes + self.shelf.reserved <= caps.stock
    }
}
