//! Error types for JSON lexing and building.

use crate::TokenKind;
use thiserror::Error;

/// The lexical fault behind an [Error::InvalidFormat].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("unexpected character {0:?}")]
    InvalidCharacter(char),
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    #[error("unterminated string")]
    UnterminatedString,
    #[error("unterminated comment")]
    UnterminatedComment,
    #[error("invalid escape \\{0}")]
    InvalidEscape(char),
    #[error("\\u must be followed by four hex digits")]
    InvalidUnicodeEscape,
    #[error("unescaped control character in string")]
    ControlCharacter,
    #[error("leading zero in number")]
    LeadingZero,
    #[error("expected digit")]
    ExpectedDigit,
    #[error("invalid literal")]
    InvalidLiteral,
    #[error("expected ':' after property name")]
    ExpectedNameSeparator,
    #[error("invalid UTF-8")]
    InvalidUtf8,
    #[error("invalid UTF-16")]
    InvalidUtf16,
}

/// Errors that can occur while lexing or building JSON.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("{kind} at line {line}, column {column} (offset {position})")]
    InvalidFormat {
        position: usize,
        line: usize,
        column: usize,
        kind: SyntaxError,
    },
    #[error("expected {expected} token, found {found}")]
    WrongTokenType {
        expected: &'static str,
        found: TokenKind,
    },
    #[error("number at offset {position} does not fit in {target}")]
    NumberOutOfRange {
        position: usize,
        target: &'static str,
    },
    #[error("nesting deeper than {max} at offset {position}")]
    DepthExceeded { position: usize, max: usize },
    #[error("non-finite number not allowed")]
    NonFiniteNumber,
    #[error("capacity exceeded: requested {requested} bytes, max {max}")]
    CapacityExceeded { requested: usize, max: usize },
}

impl Error {
    /// Returns the byte offset associated with the error, if any.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::InvalidFormat { position, .. }
            | Error::NumberOutOfRange { position, .. }
            | Error::DepthExceeded { position, .. } => Some(*position),
            _ => None,
        }
    }
}
