//! # Length Index
//!
//! Two dense arrays of [`CompressedBitmap`], indexed by string length:
//! `equals[L]` holds slots whose length is exactly `L`; `at_least[L]`
//! holds slots whose length is `>= L`. Queried directly by the pattern
//! engine's exact/prefix/suffix fast paths and used as the initial
//! candidate filter for the recursive multi-segment matcher.
//!
//! ## Space/query tradeoff
//!
//! `at_least` stores every length bound eagerly rather than computing it
//! on demand as a union of `equals` buckets. For the ≤256-byte records
//! this crate targets that's at most 257 bitmap memberships per record,
//! which is cheap, and it keeps every length-bounded lookup O(1) instead
//! of O(max_len) unions per query.

#[cfg(test)]
mod tests;

use crate::bitmap::CompressedBitmap;

/// `equals[L]` / `at_least[L]` pair, growable as longer records arrive.
#[derive(Clone, Debug, Default)]
pub struct LengthIndex {
    equals: Vec<CompressedBitmap>,
    at_least: Vec<CompressedBitmap>,
    max_len_observed: usize,
}

impl LengthIndex {
    pub fn new() -> Self {
        LengthIndex::default()
    }

    /// The longest record length ever observed (`max_len_observed`).
    pub fn max_len_observed(&self) -> usize {
        self.max_len_observed
    }

    fn ensure_capacity(&mut self, len: usize) {
        if len >= self.equals.len() {
            self.equals.resize(len + 1, CompressedBitmap::new());
        }
        if len >= self.at_least.len() {
            self.at_least.resize(len + 1, CompressedBitmap::new());
        }
        if len > self.max_len_observed {
            self.max_len_observed = len;
        }
    }

    /// Records that `slot` has length `len`: adds to `equals[len]` and to
    /// every `at_least[k]` for `k in 0..=len`.
    pub fn add(&mut self, slot: u32, len: usize) {
        self.ensure_capacity(len);
        self.equals[len].add(slot);
        for k in 0..=len {
            self.at_least[k].add(slot);
        }
    }

    /// Reverses [`LengthIndex::add`] for `slot` at `len` — used when
    /// reincarnating a popped slot. Does not shrink the arrays back down;
    /// `max_len_observed` never needs to decrease.
    pub fn remove(&mut self, slot: u32, len: usize) {
        if let Some(bitmap) = self.equals.get_mut(len) {
            bitmap.remove(slot);
        }
        for k in 0..=len.min(self.at_least.len().saturating_sub(1)) {
            self.at_least[k].remove(slot);
        }
    }

    /// `L_eq[len]`, or an empty bitmap if `len` has never been observed.
    pub fn equals_get(&self, len: usize) -> Option<&CompressedBitmap> {
        self.equals.get(len)
    }

    /// `L_ge[len]`. Lengths beyond `max_len_observed` vacuously match
    /// nothing, so this returns `None` rather than a bitmap for those.
    pub fn at_least_get(&self, len: usize) -> Option<&CompressedBitmap> {
        self.at_least.get(len)
    }

    /// Applies `tombstones` (an ANDNOT) to every length bucket in place,
    /// as part of compaction.
    pub fn subtract_tombstones(&mut self, tombstones: &CompressedBitmap) {
        for bitmap in self.equals.iter_mut().chain(self.at_least.iter_mut()) {
            bitmap.andnot_inplace(tombstones);
        }
    }
}
