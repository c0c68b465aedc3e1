//! # Configuration
//!
//! [`IndexConfig`] is the init-time tunable surface for a
//! [`crate::index::BiscuitIndex`]. There is no CLI or env-var parsing at
//! the core level; a host integration layer owns translating its own
//! configuration surface into an `IndexConfig` and passes it to
//! [`crate::index::BiscuitIndex::build`].

/// Recommended tombstone count that triggers compaction.
pub const DEFAULT_TOMBSTONE_CLEANUP_THRESHOLD: usize = 1000;

/// Records are truncated to this many bytes on ingest.
pub const DEFAULT_MAX_RECORD_LEN: usize = 256;

/// Init-time configuration for a [`crate::index::BiscuitIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexConfig {
    /// Tombstone count that triggers compaction.
    pub tombstone_cleanup_threshold: usize,

    /// Ingested strings longer than this are truncated.
    pub max_record_len: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            tombstone_cleanup_threshold: DEFAULT_TOMBSTONE_CLEANUP_THRESHOLD,
            max_record_len: DEFAULT_MAX_RECORD_LEN,
        }
    }
}
