//! # biscuit-index
//!
//! A position-indexed, compressed-bitmap engine for accelerating
//! `LIKE`-style wildcard matching over short text records. Built to sit
//! behind a host query planner as a secondary index on a single text
//! column: it never touches the planner, the table's other columns, or
//! disk — it trades memory for turning a pattern match into bitmap set
//! algebra over a handful of byte/position lookups.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                        BiscuitIndex                             │
//! │  ┌─────────────┐   ┌────────────────┐   ┌─────────────────────┐│
//! │  │  SlotTable   │   │ PositionalIndex │   │     LengthIndex     ││
//! │  │  TIDs, free  │   │  forward F[c][p]│   │  equals[L] /        ││
//! │  │  list,       │   │  reverse R[c][o]│   │  at_least[L]        ││
//! │  │  tombstones  │   │                 │   │                     ││
//! │  └──────┬───────┘   └────────┬────────┘   └──────────┬──────────┘│
//! │         │ compact            │ andnot_inplace         │          │
//! │         └────────────────────┴─────────────┬──────────┘          │
//! │                                            │                     │
//! │  ┌─────────────────────────────────────────▼─────────────────┐   │
//! │  │        pattern::evaluate (recursive windowed matcher)      │   │
//! │  └──────────────────────────────────────────────────────────┘   │
//! └───────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every bitmap in the system — positional entries, length buckets, the
//! tombstone set, and every intermediate match result — is a
//! [`bitmap::CompressedBitmap`]: a hybrid array/bitmap container keyed by
//! 16-bit chunk, the same representation family as production roaring
//! bitmaps, built from scratch here rather than pulled in as a dependency.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`index`] | Public entry point — build, insert, bulk_delete, scan, compact |
//! | [`bitmap`] | Compressed bitmap of `u32` slot numbers |
//! | [`positional`] | Forward/reverse `(byte, position) -> bitmap` maps |
//! | [`length`] | Length-bucketed bitmaps (`equals`, `at_least`) |
//! | [`slots`] | Slot/TID table, free list, tombstones, compaction |
//! | [`pattern`] | `LIKE` pattern parsing and evaluation |
//! | [`config`] | Init-time tunables |
//! | [`error`] | Error taxonomy |
//! | [`tid`] | The opaque tuple identifier type |
//!
//! ## Key Features
//!
//! - **No false negatives, no scan of cached strings** — every match is
//!   resolved entirely from bitmap set algebra; a record's source string
//!   is consulted only transiently, during insert, to compute its
//!   positional/length imprint.
//! - **Lazy deletion with threshold-triggered compaction** — deletes are
//!   O(1) tombstone-and-free-list operations; the positional and length
//!   indexes are cleaned up in bulk once the tombstone count crosses
//!   [`config::IndexConfig::tombstone_cleanup_threshold`].
//! - **Slot reincarnation** — freed slot numbers are reused before the
//!   high-water mark ever advances, with the prior occupant's imprint
//!   stripped out before the new one is written.
//! - **Single-writer-friendly, multi-reader-safe** — one `Arc<RwLock<_>>`
//!   guards all mutable state; `begin_scan` takes only a read lock.
//!
//! ## Quick Start
//!
//! ```rust
//! use biscuit_index::config::IndexConfig;
//! use biscuit_index::index::BiscuitIndex;
//! use biscuit_index::tid::Tid;
//!
//! let records = vec![
//!     (Tid::new(0, 0), Some(b"admin".to_vec())),
//!     (Tid::new(0, 1), Some(b"administrator".to_vec())),
//!     (Tid::new(0, 2), Some(b"user_admin".to_vec())),
//! ];
//!
//! let (index, populated) = BiscuitIndex::build(records, IndexConfig::default()).unwrap();
//! assert_eq!(populated, 3);
//!
//! let scan = index.begin_scan(b"admin%").unwrap();
//! assert_eq!(scan.all_tids(), vec![Tid::new(0, 0), Tid::new(0, 1)]);
//!
//! index.bulk_delete(|tid| tid.offset == 1).unwrap();
//! let scan = index.begin_scan(b"admin%").unwrap();
//! assert_eq!(scan.all_tids(), vec![Tid::new(0, 0)]);
//! ```

#![allow(dead_code)]

pub mod bitmap;
pub mod config;
pub mod error;
pub mod index;
pub mod length;
pub mod pattern;
pub mod positional;
pub mod slots;
pub mod tid;
