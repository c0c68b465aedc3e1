//! # Slot Manager
//!
//! Owns the record table: per-slot TID, per-slot cached source string, the
//! tombstone bitmap, the free list, and the insert/update/delete counters.
//! Drives threshold-triggered compaction.
//!
//! ## Slot lifecycle
//!
//! A slot is `Live`, `Tombstoned`, or `Free`; the three states partition
//! `0..high_water_mark`. `Free` slots live on [`SlotTable`]'s
//! stack-discipline free list and are handed back out by
//! [`SlotTable::allocate`] before the high-water mark is ever advanced.
//!
//! Deletion is lazy: [`SlotTable::mark_deleted`] tombstones a slot without
//! touching the positional or length indexes — those are cleaned up in
//! bulk by [`SlotTable::compact`] once `tombstone_count` crosses the
//! configured threshold. This keeps delete O(1) at the cost of bounded
//! staleness in the bitmaps, which callers compensate for by ANDNOT-ing
//! the tombstone set out of every query result before it is returned.

#[cfg(test)]
mod tests;

use thiserror::Error;
use tracing::{debug, trace};

use crate::bitmap::CompressedBitmap;
use crate::tid::Tid;

/// Errors raised by the slot manager.
#[derive(Debug, Error)]
pub enum SlotError {
    /// Allocating one more slot would require the high-water mark to
    /// exceed `u32::MAX`. Fatal; already-inserted records remain
    /// consistent.
    #[error("slot capacity exhausted: cannot allocate beyond u32::MAX slots")]
    CapacityExhausted,
}

/// One row of the record table.
#[derive(Debug, Clone)]
struct Record {
    tid: Tid,
    /// Cached source string, consulted only by the rescan-on-reload path.
    /// `None` once a slot is tombstoned-and-compacted or still free.
    cached: Option<Vec<u8>>,
}

/// Aggregate mutation counters exposed via [`crate::index::BiscuitIndex::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotCounters {
    pub inserts: u64,
    pub updates: u64,
    pub deletes: u64,
    pub tombstone_count: usize,
}

/// The record table plus tombstone set and free list.
#[derive(Debug, Default)]
pub struct SlotTable {
    records: Vec<Option<Record>>,
    /// `live[s]` iff slot `s` is currently `Live` (not tombstoned, not
    /// free). The `Tombstoned` / `Free` split is carried by
    /// `tombstones` and `free_list` instead of a third per-slot state,
    /// since a slot becomes reusable the instant it is tombstoned.
    live: Vec<bool>,
    tombstones: CompressedBitmap,
    free_list: Vec<u32>,
    counters: SlotCounters,
}

/// Outcome of [`SlotTable::allocate`]: whether the returned slot reuses a
/// previously-freed slot number (and therefore still carries stale
/// positional/length-index imprints the caller must strip first).
pub struct Allocation {
    pub slot: u32,
    pub reincarnated: Option<ReincarnatedSlot>,
}

/// The prior occupant's data, handed back so the caller can remove its
/// imprint from the positional and length indexes before writing new
/// data into the same slot number.
pub struct ReincarnatedSlot {
    pub cached_string: Vec<u8>,
}

impl SlotTable {
    pub fn new() -> Self {
        SlotTable::default()
    }

    pub fn high_water_mark(&self) -> u32 {
        self.records.len() as u32
    }

    pub fn counters(&self) -> SlotCounters {
        self.counters
    }

    pub fn tombstones(&self) -> &CompressedBitmap {
        &self.tombstones
    }

    /// Allocates a slot number: pops the free list if non-empty, otherwise
    /// advances the high-water mark. Returns the prior occupant's cached
    /// string when reusing a slot that still holds stale data, so the
    /// caller can strip its imprint from the positional/length indexes
    /// before writing the new record.
    pub fn allocate(&mut self) -> Result<Allocation, SlotError> {
        if let Some(slot) = self.free_list.pop() {
            let idx = slot as usize;
            let reincarnated = self.records[idx]
                .take()
                .and_then(|r| r.cached)
                .map(|cached_string| ReincarnatedSlot { cached_string });
            self.live[idx] = true;
            if self.tombstones.remove(slot) {
                self.counters.tombstone_count = self.tombstones.count() as usize;
            }
            trace!(slot, reincarnated = reincarnated.is_some(), "allocated from free list");
            return Ok(Allocation { slot, reincarnated });
        }

        let slot = self.records.len();
        if slot > u32::MAX as usize {
            return Err(SlotError::CapacityExhausted);
        }
        self.records.push(None);
        self.live.push(true);
        trace!(slot, "allocated new slot");
        Ok(Allocation {
            slot: slot as u32,
            reincarnated: None,
        })
    }

    /// Writes the TID and cached string for a freshly-allocated (or
    /// reincarnated) slot.
    pub fn write(&mut self, slot: u32, tid: Tid, cached: Vec<u8>) {
        self.records[slot as usize] = Some(Record {
            tid,
            cached: Some(cached),
        });
        self.counters.inserts += 1;
    }

    pub fn tid(&self, slot: u32) -> Option<Tid> {
        self.records.get(slot as usize)?.as_ref().map(|r| r.tid)
    }

    pub fn cached_string(&self, slot: u32) -> Option<&[u8]> {
        self.records.get(slot as usize)?.as_ref()?.cached.as_deref()
    }

    pub fn is_live(&self, slot: u32) -> bool {
        self.live.get(slot as usize).copied().unwrap_or(false)
    }

    /// Iterates every currently-live slot's TID, in ascending slot order.
    pub fn live_slots(&self) -> impl Iterator<Item = (u32, Tid)> + '_ {
        self.live
            .iter()
            .zip(self.records.iter())
            .enumerate()
            .filter_map(|(slot, (is_live, record))| {
                if *is_live {
                    record.as_ref().map(|r| (slot as u32, r.tid))
                } else {
                    None
                }
            })
    }

    /// Marks `slot` deleted: tombstones it and pushes it onto the free
    /// list. Does not touch the positional or length indexes (lazy
    /// deletion) — those are cleaned up in bulk by [`SlotTable::compact`].
    /// A no-op if the slot is not currently live.
    pub fn mark_deleted(&mut self, slot: u32) -> bool {
        let idx = slot as usize;
        if !self.live.get(idx).copied().unwrap_or(false) {
            return false;
        }
        self.live[idx] = false;
        self.tombstones.add(slot);
        self.free_list.push(slot);
        self.counters.deletes += 1;
        self.counters.tombstone_count = self.tombstones.count() as usize;
        trace!(slot, "marked deleted");
        true
    }

    /// Whether the tombstone count has crossed `threshold` and compaction
    /// should run.
    pub fn needs_compaction(&self, threshold: usize) -> bool {
        self.counters.tombstone_count >= threshold
    }

    /// Releases every tombstoned slot's cached string and clears the
    /// tombstone set. The caller is responsible for applying the same
    /// tombstone bitmap as an ANDNOT to the positional and length
    /// indexes — see [`crate::index::BiscuitIndex::compact`] — before
    /// calling this, so the two stay consistent.
    pub fn compact(&mut self) {
        if self.tombstones.is_empty() {
            debug!("compact: no tombstones, nothing to do");
            return;
        }
        let removed = self.tombstones.count();
        for slot in self.tombstones.iter_sorted() {
            if let Some(rec) = self.records.get_mut(slot as usize) {
                *rec = None;
            }
        }
        self.tombstones = CompressedBitmap::new();
        self.counters.tombstone_count = 0;
        debug!(removed, "compaction complete");
    }
}
