//! Error types for storage, persisted stores, configuration and the wheel.
//!
//! None of these reach the user as a dialog: stores log and fall back to
//! in-memory state, routes render a short inline fragment.

use thiserror::Error;

/// Failures of the key-value backend (the localStorage mirror).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend could not read a key.
    #[error("failed to read {key}: {reason}")]
    Read { key: String, reason: String },

    /// The backend refused a write.
    #[error("failed to write {key}: {reason}")]
    Write { key: String, reason: String },

    /// A write would push the mirror past its size limit.
    #[error("storage quota exceeded writing {key}: {needed} bytes (limit: {limit})")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },
}

/// Failures while loading or persisting a store's blob.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The stored blob exists but does not parse.
    #[error("malformed data under {key}: {source}")]
    Malformed {
        key: String,
        source: serde_json::Error,
    },

    /// The restore payload from the JS bridge is not a `{key: string}` object.
    #[error("invalid restore payload: {0}")]
    Restore(#[source] serde_json::Error),
}

/// Invalid [`WheelConfig`](crate::config::WheelConfig) overrides.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid wheel config: {0}")]
    Parse(#[from] serde_json::Error),

    /// At least one extra revolution keeps successive targets strictly increasing.
    #[error("extra_revolutions must be at least 1")]
    NoExtraRevolutions,

    #[error("spin_duration_ms must be positive")]
    ZeroDuration,

    #[error("pointer_angle must be finite, got {0}")]
    PointerAngle(f64),
}

/// Draw preconditions violated by the item list.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WheelError {
    /// Empty list, or every weight is zero.
    #[error("no items with positive weight to draw from")]
    EmptySelectionPool,

    #[error("item {index} has invalid weight {weight}")]
    InvalidWeight { index: usize, weight: f64 },
}
