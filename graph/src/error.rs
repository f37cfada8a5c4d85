//! Error types for reference tracking.

use thiserror::Error;

/// Errors that can occur while tracking or resolving references.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("reference table full: capacity {capacity}")]
    CapacityExceeded { capacity: usize },
    #[error("unknown reference: {0}")]
    UnknownReference(u32),
    #[error("reference already registered: {0}")]
    DuplicateReference(u32),
    #[error("reference reserved but not registered: {0}")]
    PendingReference(u32),
    #[error("codec error: {0}")]
    Codec(#[from] tessera_codec::Error),
}
