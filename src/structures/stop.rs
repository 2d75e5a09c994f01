use std::collections::{BTreeSet, HashMap};
use std::fmt::Display;

use crate::structures::{BusId, LatLng};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StopId(pub u32);

impl Display for StopId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone)]
pub struct Stop {
    pub name: String,
    pub position: LatLng,
    pub buses: BTreeSet<BusId>,
}

/// Name-deduplicating stop registry. A stop is created on first reference,
/// with [`LatLng::ZERO`] until an explicit definition qualifies it.
#[derive(Debug, Default)]
pub struct StopRegistry {
    stops: Vec<Stop>,
    by_name: HashMap<String, StopId>,
}

impl StopRegistry {
    pub fn new() -> StopRegistry {
        StopRegistry::default()
    }

    pub fn add_or_get(&mut self, name: &str) -> StopId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }
        let id = StopId(self.stops.len() as u32);
        self.stops.push(Stop {
            name: name.to_string(),
            position: LatLng::ZERO,
            buses: BTreeSet::new(),
        });
        self.by_name.insert(name.to_string(), id);
        id
    }

    /// Sets the stop's coordinate, overwriting the placeholder or any
    /// earlier explicit definition.
    pub fn qualify(&mut self, id: StopId, position: LatLng) {
        self.stops[id.0 as usize].position = position;
    }

    pub fn record_bus(&mut self, stop: StopId, bus: BusId) {
        self.stops[stop.0 as usize].buses.insert(bus);
    }

    pub fn try_find(&self, name: &str) -> Option<StopId> {
        self.by_name.get(name).copied()
    }

    /// Ids handed out by this registry are dense; `id` must come from it.
    pub fn get(&self, id: StopId) -> &Stop {
        &self.stops[id.0 as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (StopId, &Stop)> {
        self.stops
            .iter()
            .enumerate()
            .map(|(i, stop)| (StopId(i as u32), stop))
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
