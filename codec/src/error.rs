//! Error types for codec operations

use crate::registry::Primitive;
use thiserror::Error;

/// Error type for codec operations.
///
/// Every variant produced while reading carries the byte offset at which the
/// failing read started so callers can report where a payload went wrong.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("out of bounds at {position}: requested {requested} bytes, {remaining} remaining")]
    OutOfBounds {
        position: usize,
        requested: usize,
        remaining: usize,
    },
    #[error("invalid format at {position}: {reason}")]
    InvalidFormat {
        position: usize,
        reason: &'static str,
    },
    #[error("unknown type code {code:#04x} at {position}")]
    UnknownType { code: u8, position: usize },
    #[error("extra data found: {0} bytes")]
    ExtraData(usize),
    #[error("invalid length {length} at {position}")]
    InvalidLength { position: usize, length: usize },
    #[error("invalid bool {value:#04x} at {position}")]
    InvalidBool { position: usize, value: u8 },
    #[error("enum backed by non-integer type {0:?}")]
    InvalidEnum(Primitive),
}

impl Error {
    /// Returns the byte offset associated with the error, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::OutOfBounds { position, .. }
            | Error::InvalidFormat { position, .. }
            | Error::UnknownType { position, .. }
            | Error::InvalidLength { position, .. }
            | Error::InvalidBool { position, .. } => Some(*position),
            Error::ExtraData(_) | Error::InvalidEnum(_) => None,
        }
    }
}
