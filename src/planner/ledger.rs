//! Capacity ledger: per-(flight, day) reservations with checkpoint/rollback.
//!
//! The ledger is the only state mutated during a route search. Backtracking
//! correctness is structural: every reservation pushes an undo entry, and a
//! failed search frame rolls back to the checkpoint taken on entry, so a
//! `plan()` call that returns no route leaves the ledger exactly as it found
//! it.

use crate::model::FlightId;
use std::collections::HashMap;

/// Marker for a ledger state; rolling back to it releases every reservation
/// made after it was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// Tracks committed quantity per (flight template, departure day).
///
/// Entries are created lazily on first reservation. The central invariant is
/// that a committed quantity never exceeds the flight's per-instance
/// capacity; [`reserve`](CapacityLedger::reserve) is the only mutation path
/// and enforces it with an atomic check-then-reserve.
#[derive(Debug, Clone, Default)]
pub struct CapacityLedger {
    committed: HashMap<(FlightId, u32), u32>,
    undo_log: Vec<(FlightId, u32, u32)>,
}

impl CapacityLedger {
    pub fn new() -> CapacityLedger {
        CapacityLedger::default()
    }

    /// Quantity already committed on the given flight instance.
    pub fn reserved(&self, flight: FlightId, day: u32) -> u32 {
        self.committed.get(&(flight, day)).copied().unwrap_or(0)
    }

    /// Attempts to reserve `quantity` on the flight instance, given the
    /// template's `capacity`. Returns `false` (and changes nothing) when the
    /// reservation would overflow the instance.
    pub fn reserve(&mut self, flight: FlightId, day: u32, quantity: u32, capacity: u32) -> bool {
        let used = self.committed.entry((flight, day)).or_insert(0);
        if *used + quantity > capacity {
            return false;
        }
        *used += quantity;
        self.undo_log.push((flight, day, quantity));
        true
    }

    /// Takes a checkpoint of the current reservation state.
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.undo_log.len())
    }

    /// Releases every reservation made after `checkpoint` was taken,
    /// newest first.
    pub fn rollback_to(&mut self, checkpoint: Checkpoint) {
        while self.undo_log.len() > checkpoint.0 {
            let (flight, day, quantity) = self.undo_log.pop().expect("undo log underflow");
            let used = self
                .committed
                .get_mut(&(flight, day))
                .expect("undo entry without a committed entry");
            debug_assert!(*used >= quantity, "rollback below zero");
            *used -= quantity;
        }
    }

    /// Clears all reservations. Called between optimizer runs.
    pub fn reset(&mut self) {
        self.committed.clear();
        self.undo_log.clear();
    }

    /// Iterates over non-zero reservations, for reporting.
    pub fn iter(&self) -> impl Iterator<Item = (FlightId, u32, u32)> + '_ {
        self.committed
            .iter()
            .filter(|(_, &q)| q > 0)
            .map(|(&(flight, day), &q)| (flight, day, q))
    }

    /// Total committed quantity across all flight instances.
    pub fn total_committed(&self) -> u64 {
        self.committed.values().map(|&q| q as u64).sum()
    }
}
