//! # Index
//!
//! [`BiscuitIndex`] is the public entry point: it wires the slot manager,
//! the positional index, and the length index into a single handle behind
//! an `Arc<RwLock<_>>` — a cheap-to-clone handle over a lock-guarded inner
//! struct.
//!
//! ## Concurrency
//!
//! Every write takes the write guard; every read (`begin_scan`, `stats`)
//! takes the read guard. There is no finer-grained locking: contention is
//! expected to be low relative to a host's own row-level locking, and a
//! single lock keeps the ANDNOT-tombstone-subtraction-then-compact
//! sequence trivially atomic with respect to concurrent scans.
//!
//! ## Why positional/length storage is eager, not lazily unioned
//!
//! See the module docs of [`crate::length`]; the same space/query tradeoff
//! applies to every write path in this module.

#[cfg(test)]
mod tests;

use std::sync::{Arc, RwLock};

use tracing::{debug, info, trace};

use crate::config::IndexConfig;
use crate::error::IndexError;
use crate::length::LengthIndex;
use crate::pattern::{ParsedPattern, evaluate};
use crate::positional::PositionalIndex;
use crate::slots::SlotTable;
use crate::tid::Tid;

/// Statistics returned by [`BiscuitIndex::bulk_delete`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeleteStats {
    /// Number of slots tombstoned by this call.
    pub tuples_removed: usize,
}

struct IndexInner {
    slots: SlotTable,
    positional: PositionalIndex,
    length: LengthIndex,
    config: IndexConfig,
}

impl IndexInner {
    /// Removes `slot`'s positional/length imprint for the string it was
    /// last written with. Used both when reincarnating a free-list slot
    /// and when compacting out a tombstoned one would otherwise leave
    /// the index pointing at a string the slot no longer holds.
    fn strip_imprint(&mut self, slot: u32, value: &[u8]) {
        for (p, &c) in value.iter().enumerate() {
            self.positional.remove_char(slot, c, p, value.len());
        }
        self.length.remove(slot, value.len());
    }

    fn imprint(&mut self, slot: u32, value: &[u8]) {
        for (p, &c) in value.iter().enumerate() {
            self.positional.add_char(slot, c, p, value.len());
        }
        self.length.add(slot, value.len());
    }

    /// Applies the current tombstone set to the positional and length
    /// indexes, then releases the slot table's own bookkeeping. The two
    /// steps run under a single write guard, so no scan ever observes the
    /// tombstone set applied to one but not the other.
    fn compact(&mut self) {
        let tombstones = self.slots.tombstones().copy();
        if tombstones.is_empty() {
            return;
        }
        self.positional.subtract_tombstones(&tombstones);
        self.length.subtract_tombstones(&tombstones);
        self.slots.compact();
        info!(removed = tombstones.count(), "index compaction complete");
    }
}

/// A position-indexed compressed-bitmap index over a single text column.
///
/// Thread-safe — cloning shares the same underlying state via the
/// internal `Arc<RwLock<_>>`.
pub struct BiscuitIndex {
    inner: Arc<RwLock<IndexInner>>,
}

impl Clone for BiscuitIndex {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl BiscuitIndex {
    /// Builds a fresh index over `records`, a host-supplied iterator of
    /// `(Tid, value)` pairs. `value` of `None` is a SQL NULL: it is
    /// skipped (`LIKE` against NULL is never true, so it never needs a
    /// slot). Returns the index and the number of slots actually
    /// populated.
    ///
    /// This folds the two-pass "size then populate" approach described
    /// for the length arrays into a single pass: [`LengthIndex`] resizes
    /// its arrays lazily as longer records are observed, so a dedicated
    /// sizing pass buys nothing here.
    pub fn build(
        records: impl IntoIterator<Item = (Tid, Option<Vec<u8>>)>,
        config: IndexConfig,
    ) -> Result<(Self, usize), IndexError> {
        let index = BiscuitIndex {
            inner: Arc::new(RwLock::new(IndexInner {
                slots: SlotTable::new(),
                positional: PositionalIndex::new(),
                length: LengthIndex::new(),
                config,
            })),
        };

        let mut populated = 0;
        for (tid, value) in records {
            if index.insert(value, tid)? {
                populated += 1;
            }
        }
        info!(populated, "index build complete");
        Ok((index, populated))
    }

    fn lock_read(&self) -> Result<std::sync::RwLockReadGuard<'_, IndexInner>, IndexError> {
        self.inner
            .read()
            .map_err(|_| IndexError::Internal("RwLock poisoned".into()))
    }

    fn lock_write(&self) -> Result<std::sync::RwLockWriteGuard<'_, IndexInner>, IndexError> {
        self.inner
            .write()
            .map_err(|_| IndexError::Internal("RwLock poisoned".into()))
    }

    /// Inserts a value for `tid`. There is no distinct "update" operation:
    /// a host updating a row's indexed value deletes the old TID and
    /// inserts the new one. A `None` value is a no-op that still
    /// succeeds, since NULLs never need indexing. Values longer than
    /// `config.max_record_len` are truncated before indexing.
    ///
    /// Returns `Ok(true)` if a slot was populated, `Ok(false)` for the
    /// NULL no-op.
    pub fn insert(&self, value: Option<Vec<u8>>, tid: Tid) -> Result<bool, IndexError> {
        let Some(mut value) = value else {
            trace!("insert: NULL value, no-op");
            return Ok(false);
        };
        let mut inner = self.lock_write()?;
        if value.len() > inner.config.max_record_len {
            value.truncate(inner.config.max_record_len);
        }

        let allocation = inner.slots.allocate()?;
        if let Some(reincarnated) = allocation.reincarnated {
            inner.strip_imprint(allocation.slot, &reincarnated.cached_string);
        }
        inner.imprint(allocation.slot, &value);
        inner.slots.write(allocation.slot, tid, value);
        trace!(slot = allocation.slot, "insert complete");
        Ok(true)
    }

    /// Tombstones every currently-live slot for which `should_delete`
    /// returns `true`, then compacts if the tombstone count has crossed
    /// `config.tombstone_cleanup_threshold`.
    pub fn bulk_delete(&self, mut should_delete: impl FnMut(Tid) -> bool) -> Result<DeleteStats, IndexError> {
        let mut inner = self.lock_write()?;
        let to_delete: Vec<u32> = inner
            .slots
            .live_slots()
            .filter(|(_, tid)| should_delete(*tid))
            .map(|(slot, _)| slot)
            .collect();

        let mut tuples_removed = 0;
        for slot in to_delete {
            if inner.slots.mark_deleted(slot) {
                tuples_removed += 1;
            }
        }

        let threshold = inner.config.tombstone_cleanup_threshold;
        if inner.slots.needs_compaction(threshold) {
            inner.compact();
        }
        debug!(tuples_removed, "bulk_delete complete");
        Ok(DeleteStats { tuples_removed })
    }

    /// Evaluates `pattern` and returns a [`Scan`] over the matching TIDs,
    /// sorted `(block, offset)` ascending. The tombstone set is subtracted
    /// from the raw match set exactly once, here, rather than at every
    /// intermediate bitmap the pattern engine produces.
    pub fn begin_scan(&self, pattern: &[u8]) -> Result<Scan, IndexError> {
        let inner = self.lock_read()?;
        let parsed = ParsedPattern::parse(pattern);
        let mut matched = evaluate(&parsed, &inner.positional, &inner.length);
        matched.andnot_inplace(inner.slots.tombstones());

        let mut tids: Vec<Tid> = matched
            .iter_sorted()
            .filter_map(|slot| inner.slots.tid(slot))
            .collect();
        tids.sort_unstable();
        trace!(matched = tids.len(), "begin_scan complete");
        Ok(Scan { tids, next: 0 })
    }

    /// A free-form, human-readable summary of mutation counters and
    /// size-related facts a host cost model might need. Not a stable wire
    /// format — callers that need structured access should read the
    /// counters directly rather than parse this string.
    pub fn stats(&self) -> Result<String, IndexError> {
        let inner = self.lock_read()?;
        let counters = inner.slots.counters();
        Ok(format!(
            "high_water_mark={} max_len_observed={} inserts={} updates={} deletes={} tombstone_count={}",
            inner.slots.high_water_mark(),
            inner.length.max_len_observed(),
            counters.inserts,
            counters.updates,
            counters.deletes,
            counters.tombstone_count,
        ))
    }

    /// Forces a compaction pass regardless of the configured threshold.
    /// Mainly useful for hosts that want to reclaim space on an explicit
    /// maintenance window rather than waiting for the next mutation to
    /// cross the threshold.
    pub fn compact(&self) -> Result<(), IndexError> {
        let mut inner = self.lock_write()?;
        inner.compact();
        Ok(())
    }
}

/// An iterator-like handle over a scan's matching TIDs, already sorted.
///
/// Not a true `Iterator` impl: [`Scan::next_tid`] borrows nothing from the
/// index, so a scan can safely outlive the guard that produced it (the
/// match set was fully materialized in [`BiscuitIndex::begin_scan`]).
pub struct Scan {
    tids: Vec<Tid>,
    next: usize,
}

impl Scan {
    /// Returns the next matching TID, or `None` once exhausted.
    pub fn next_tid(&mut self) -> Option<Tid> {
        let tid = self.tids.get(self.next).copied();
        if tid.is_some() {
            self.next += 1;
        }
        tid
    }

    /// The full matching TID set, independent of the [`Scan::next_tid`]
    /// cursor — calling this before, after, or interleaved with
    /// `next_tid` calls always returns the same slice.
    pub fn all_tids(&self) -> &[Tid] {
        &self.tids
    }

    /// Total number of matching TIDs this scan will yield, independent of
    /// how many have already been consumed via [`Scan::next_tid`].
    pub fn len(&self) -> usize {
        self.tids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tids.is_empty()
    }
}
