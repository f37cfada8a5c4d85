/// Lexer configuration.
///
/// Every extension is off by default so that accepted input stays interoperable with other RFC 8259
/// consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LexerOptions {
    /// Skip `//` line comments and `/* */` block comments between tokens.
    pub allow_comments: bool,
    /// Accept `NaN`, `Infinity` and `-Infinity` as number tokens.
    pub allow_nan: bool,
    /// Emit a [crate::TokenKind::NameSeparator] token for each `:`.
    pub emit_name_separators: bool,
    /// Maximum nesting of objects and arrays.
    pub max_depth: usize,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            allow_comments: false,
            allow_nan: false,
            emit_name_separators: false,
            max_depth: 64,
        }
    }
}
