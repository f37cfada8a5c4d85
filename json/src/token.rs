use std::{fmt, ops::Range};

/// Kinds of token produced by the [crate::Lexer].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// No token has been read yet.
    None,
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    PropertyName,
    String,
    Number,
    True,
    False,
    Null,
    /// `:` between a property name and its value. Only emitted when
    /// [crate::LexerOptions::emit_name_separators] is set.
    NameSeparator,
    /// `,` between values or members.
    ValueSeparator,
    EndOfDocument,
}

impl TokenKind {
    /// Whether the token is a complete value or the start of one.
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            TokenKind::StartObject
                | TokenKind::StartArray
                | TokenKind::String
                | TokenKind::Number
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// The current token: its kind, byte range in the source, and nesting depth.
///
/// For strings and property names the span covers the content between the quotes, still
/// escaped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
    pub depth: usize,
}

impl Default for Token {
    fn default() -> Self {
        Self {
            kind: TokenKind::None,
            span: 0..0,
            depth: 0,
        }
    }
}
