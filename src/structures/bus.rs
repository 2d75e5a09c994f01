use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use crate::structures::StopId;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BusId(pub u32);

impl Display for BusId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A named route. Circular routes store the terminal stop repeating the
/// origin, so the stored sequence is already the traversal sequence;
/// non-circular routes are traversed forward then backward.
#[derive(Debug, Clone)]
pub struct Bus {
    pub name: String,
    pub stops: Vec<StopId>,
    pub circular: bool,
}

impl Bus {
    /// Number of stops visited over a full traversal of the route.
    pub fn stop_count(&self) -> usize {
        if self.circular {
            self.stops.len()
        } else {
            2 * self.stops.len() - 1
        }
    }

    pub fn unique_stop_count(&self) -> usize {
        self.stops.iter().collect::<HashSet<_>>().len()
    }

    /// The full stop sequence in traversal order.
    pub fn traversal(&self) -> Vec<StopId> {
        if self.circular {
            return self.stops.clone();
        }
        let mut order = self.stops.clone();
        order.extend(self.stops.iter().rev().skip(1));
        order
    }
}

/// Bus registry and route-by-name index. Every `add` assigns the next
/// sequential id; a reused name points the index at the newest id.
#[derive(Debug, Default)]
pub struct BusRegistry {
    buses: Vec<Bus>,
    by_name: HashMap<String, BusId>,
}

impl BusRegistry {
    pub fn new() -> BusRegistry {
        BusRegistry::default()
    }

    pub fn add(&mut self, bus: Bus) -> BusId {
        let id = BusId(self.buses.len() as u32);
        self.by_name.insert(bus.name.clone(), id);
        self.buses.push(bus);
        id
    }

    pub fn try_find(&self, name: &str) -> Option<BusId> {
        self.by_name.get(name).copied()
    }

    /// Ids handed out by this registry are dense; `id` must come from it.
    pub fn get(&self, id: BusId) -> &Bus {
        &self.buses[id.0 as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (BusId, &Bus)> {
        self.buses
            .iter()
            .enumerate()
            .map(|(i, bus)| (BusId(i as u32), bus))
    }

    pub fn len(&self) -> usize {
        self.buses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus(name: &str, stops: &[u32], circular: bool) -> Bus {
        Bus {
            name: name.to_string(),
            stops: stops.iter().map(|&s| StopId(s)).collect(),
            circular,
        }
    }

    #[test]
    fn linear_route_traverses_forward_then_backward() {
        let b = bus("750", &[0, 1, 2], false);

        assert_eq!(b.stop_count(), 5);
        assert_eq!(b.unique_stop_count(), 3);
        assert_eq!(
            b.traversal(),
            vec![StopId(0), StopId(1), StopId(2), StopId(1), StopId(0)]
        );
    }

    #[test]
    fn circular_route_traverses_as_stored() {
        let b = bus("256", &[0, 1, 2, 3, 4, 0], true);

        assert_eq!(b.stop_count(), 6);
        assert_eq!(b.unique_stop_count(), 5);
        assert_eq!(b.traversal(), b.stops);
    }

    #[test]
    fn registry_assigns_sequential_ids_and_keeps_the_newest_name() {
        let mut buses = BusRegistry::new();

        let first = buses.add(bus("256", &[0, 1, 0], true));
        let second = buses.add(bus("256", &[2, 3, 2], true));

        assert_eq!(first, BusId(0));
        assert_eq!(second, BusId(1));
        assert_eq!(buses.len(), 2);
        assert_eq!(buses.try_find("256"), Some(second));
        assert_eq!(buses.try_find("750"), None);
    }
}
