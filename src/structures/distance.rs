use std::collections::HashMap;

use thiserror::Error;

use crate::structures::StopId;

#[derive(Debug, Error, PartialEq)]
pub enum DistanceError {
    #[error("duplicate explicit road distance from stop {from} to stop {to}")]
    DuplicateExplicit { from: StopId, to: StopId },
    #[error("no road distance recorded from stop {from} to stop {to}")]
    Missing { from: StopId, to: StopId },
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    meters: f64,
    implicit: bool,
}

/// Directed pairwise road distances. An explicit entry comes straight from
/// a stop definition; an implicit one mirrors the reverse explicit entry
/// and stands until an explicit entry for the same ordered pair arrives.
#[derive(Debug, Default)]
pub struct DistanceTable {
    entries: HashMap<(StopId, StopId), Entry>,
}

impl DistanceTable {
    pub fn new() -> DistanceTable {
        DistanceTable::default()
    }

    /// Registers the road distances listed on a stop definition: one
    /// explicit entry per `(from, other)` pair and an implicit mirror for
    /// `(other, from)` unless an explicit mirror already exists.
    pub fn add_distances(
        &mut self,
        from: StopId,
        pairs: &[(StopId, f64)],
    ) -> Result<(), DistanceError> {
        for &(to, meters) in pairs {
            self.insert(from, to, meters, false)?;
            self.insert(to, from, meters, true)?;
        }
        Ok(())
    }

    fn insert(
        &mut self,
        from: StopId,
        to: StopId,
        meters: f64,
        implicit: bool,
    ) -> Result<(), DistanceError> {
        match self.entries.get(&(from, to)) {
            None => {
                self.entries.insert((from, to), Entry { meters, implicit });
            }
            // An implicit arrival never displaces anything: explicit
            // entries outrank it and the first implicit one wins.
            Some(_) if implicit => {}
            Some(existing) if existing.implicit => {
                self.entries.insert(
                    (from, to),
                    Entry {
                        meters,
                        implicit: false,
                    },
                );
            }
            Some(_) => return Err(DistanceError::DuplicateExplicit { from, to }),
        }
        Ok(())
    }

    /// Callers must only query pairs they populated; a miss is a contract
    /// violation, not a recoverable condition.
    pub fn get(&self, from: StopId, to: StopId) -> Result<f64, DistanceError> {
        self.entries
            .get(&(from, to))
            .map(|entry| entry.meters)
            .ok_or(DistanceError::Missing { from, to })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
