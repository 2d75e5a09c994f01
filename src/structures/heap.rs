use std::collections::HashMap;
use std::hash::Hash;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HeapError {
    #[error("priority queue is full (capacity {0})")]
    CapacityExceeded(usize),
    #[error("pop from an empty priority queue")]
    Underflow,
    #[error("priority update for an item not in the queue")]
    UnknownItem,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    MinFirst,
    MaxFirst,
}

#[derive(Debug)]
struct Slot<K> {
    key: K,
    priority: f64,
}

/// Fixed-capacity binary heap over hashable item keys with `f64`
/// priorities, configured at construction to surface the minimum or the
/// maximum first. An item→position map keeps priority lookup O(1);
/// every heap swap goes through [`Self::swap`], which updates the map for
/// both slots in the same step. Keys must be unique.
#[derive(Debug)]
pub struct IndexedPriorityQueue<K> {
    order: Order,
    slots: Vec<Slot<K>>,
    positions: HashMap<K, usize>,
    capacity: usize,
}

impl<K: Hash + Eq + Clone> IndexedPriorityQueue<K> {
    pub fn min(capacity: usize) -> IndexedPriorityQueue<K> {
        IndexedPriorityQueue::with_order(Order::MinFirst, capacity)
    }

    pub fn max(capacity: usize) -> IndexedPriorityQueue<K> {
        IndexedPriorityQueue::with_order(Order::MaxFirst, capacity)
    }

    fn with_order(order: Order, capacity: usize) -> IndexedPriorityQueue<K> {
        IndexedPriorityQueue {
            order,
            slots: Vec::with_capacity(capacity),
            positions: HashMap::with_capacity(capacity),
            capacity,
        }
    }

    pub fn insert(&mut self, key: K, priority: f64) -> Result<(), HeapError> {
        if self.slots.len() == self.capacity {
            return Err(HeapError::CapacityExceeded(self.capacity));
        }
        debug_assert!(!self.positions.contains_key(&key));

        let position = self.slots.len();
        self.positions.insert(key.clone(), position);
        self.slots.push(Slot { key, priority });
        self.sift_up(position);
        Ok(())
    }

    /// Extracts the configured extremum.
    pub fn pop(&mut self) -> Result<(K, f64), HeapError> {
        if self.slots.is_empty() {
            return Err(HeapError::Underflow);
        }
        let last = self.slots.len() - 1;
        self.swap(0, last);
        let Some(slot) = self.slots.pop() else {
            return Err(HeapError::Underflow);
        };
        self.positions.remove(&slot.key);
        if !self.slots.is_empty() {
            self.sift_down(0);
        }
        Ok((slot.key, slot.priority))
    }

    pub fn peek(&self) -> Option<(&K, f64)> {
        self.slots.first().map(|slot| (&slot.key, slot.priority))
    }

    /// Re-prioritizes an item in place; works for both decrease- and
    /// increase-key.
    pub fn update_priority(&mut self, key: &K, priority: f64) -> Result<(), HeapError> {
        let &position = self.positions.get(key).ok_or(HeapError::UnknownItem)?;
        self.slots[position].priority = priority;
        let position = self.sift_up(position);
        self.sift_down(position);
        Ok(())
    }

    pub fn priority(&self, key: &K) -> Option<f64> {
        self.positions
            .get(key)
            .map(|&position| self.slots[position].priority)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    fn outranks(&self, a: f64, b: f64) -> bool {
        match self.order {
            Order::MinFirst => a < b,
            Order::MaxFirst => a > b,
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.slots.swap(a, b);
        self.positions.insert(self.slots[a].key.clone(), a);
        self.positions.insert(self.slots[b].key.clone(), b);
    }

    fn sift_up(&mut self, mut position: usize) -> usize {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.outranks(self.slots[position].priority, self.slots[parent].priority) {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
        position
    }

    fn sift_down(&mut self, mut position: usize) {
        loop {
            let mut best = position;
            for child in [2 * position + 1, 2 * position + 2] {
                if child < self.slots.len()
                    && self.outranks(self.slots[child].priority, self.slots[best].priority)
                {
                    best = child;
                }
            }
            if best == position {
                return;
            }
            self.swap(position, best);
            position = best;
        }
    }
}
