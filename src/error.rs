//! # Error Taxonomy
//!
//! Each component that can fail exposes its own `thiserror`-derived error
//! enum; [`IndexError`] is the top-level type the public API returns,
//! wrapping component errors with `#[from]` plus an `Internal` variant for
//! invariant violations.

use thiserror::Error;

use crate::slots::SlotError;

/// Errors returned by [`crate::index::BiscuitIndex`] operations.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Error originating from the slot manager.
    #[error("slot error: {0}")]
    Slot(#[from] SlotError),

    /// The host attempted to build an index over more than one column.
    #[error("invalid construction: {0}")]
    InvalidConstruction(String),

    /// Internal invariant violation (poisoned lock, unexpected state).
    #[error("internal error: {0}")]
    Internal(String),
}
