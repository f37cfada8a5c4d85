//! Forward-only JSON tokenizer.
//!
//! The [Lexer] borrows its source and produces one [Token] per [Lexer::read]. It validates
//! structure as it goes (balanced brackets, separators, a single root value) so that a caller
//! driving it never observes a token sequence that could not come from well-formed JSON.

use crate::{escape, Error, LexerOptions, SyntaxError, Token, TokenKind};
use rust_decimal::Decimal;
use std::{borrow::Cow, ops::Range};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Container {
    Object,
    Array,
}

/// What the lexer accepts next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// The root value.
    Start,
    /// A property name or `}`.
    ObjectStart,
    /// A value or `]`.
    ArrayStart,
    /// A value, after `:` or after `,` inside an array.
    Value,
    /// A property name, after `,` inside an object.
    PropertyName,
    /// The `:` following a property name.
    NameSeparator,
    /// `,`, a closing bracket, or the end of the document.
    AfterValue,
    End,
}

const BOM: &str = "\u{FEFF}";

/// Returns the 1-based line and column (in characters) of a byte offset.
fn locate(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source.as_bytes()[..offset];
    let line = before.iter().filter(|b| **b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|b| *b == b'\n')
        .map_or(0, |index| index + 1);
    let column = source
        .get(line_start..offset)
        .map_or(offset - line_start, |text| text.chars().count());
    (line, column + 1)
}

fn syntax_error(source: &str, position: usize, kind: SyntaxError) -> Error {
    let (line, column) = locate(source, position);
    Error::InvalidFormat {
        position,
        line,
        column,
        kind,
    }
}

fn skip_digits(bytes: &[u8], mut index: usize) -> usize {
    while matches!(bytes.get(index), Some(b'0'..=b'9')) {
        index += 1;
    }
    index
}

/// Decodes UTF-16 code units (e.g. from a wide-string source) so they can be lexed.
///
/// An unpaired surrogate fails with [SyntaxError::InvalidUtf16], positioned at its code unit
/// index.
pub fn decode_utf16(units: &[u16]) -> Result<String, Error> {
    let mut out = String::with_capacity(units.len());
    let mut index = 0;
    for result in char::decode_utf16(units.iter().copied()) {
        match result {
            Ok(c) => {
                index += c.len_utf16();
                out.push(c);
            }
            Err(_) => {
                let (line, column) = locate(&out, out.len());
                return Err(Error::InvalidFormat {
                    position: index,
                    line,
                    column,
                    kind: SyntaxError::InvalidUtf16,
                });
            }
        }
    }
    Ok(out)
}

/// A cursor that turns JSON text into a stream of [Token]s.
///
/// # Examples
///
/// ```
/// use tessera_json::{Lexer, LexerOptions, TokenKind};
///
/// let mut lexer = Lexer::new(r#"{"id": 7}"#, LexerOptions::default());
/// assert!(lexer.read().unwrap());
/// assert_eq!(lexer.token_kind(), TokenKind::StartObject);
/// assert!(lexer.read().unwrap());
/// assert_eq!(lexer.get_string().unwrap(), "id");
/// assert!(lexer.read().unwrap());
/// assert_eq!(lexer.get_i32().unwrap(), 7);
/// ```
#[derive(Clone, Debug)]
pub struct Lexer<'a> {
    source: &'a str,
    options: LexerOptions,
    position: usize,
    token: Token,
    stack: Vec<Container>,
    state: State,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer over `source`. A leading byte order mark is skipped.
    pub fn new(source: &'a str, options: LexerOptions) -> Self {
        let position = if source.starts_with(BOM) { BOM.len() } else { 0 };
        Self {
            source,
            options,
            position,
            token: Token::default(),
            stack: Vec::new(),
            state: State::Start,
        }
    }

    /// Creates a lexer over UTF-8 bytes, failing if they are not valid UTF-8.
    pub fn from_utf8(bytes: &'a [u8], options: LexerOptions) -> Result<Self, Error> {
        match std::str::from_utf8(bytes) {
            Ok(source) => Ok(Self::new(source, options)),
            Err(err) => {
                let valid = err.valid_up_to();
                let prefix = std::str::from_utf8(&bytes[..valid]).unwrap_or_default();
                Err(syntax_error(prefix, valid, SyntaxError::InvalidUtf8))
            }
        }
    }

    /// The text being lexed.
    pub fn source(&self) -> &'a str {
        self.source
    }

    /// The current token.
    pub fn token(&self) -> &Token {
        &self.token
    }

    pub fn token_kind(&self) -> TokenKind {
        self.token.kind
    }

    /// Byte range of the current token. Strings and property names exclude their quotes.
    pub fn token_span(&self) -> Range<usize> {
        self.token.span.clone()
    }

    /// Number of objects and arrays currently open.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Byte offset just past the current token.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the 1-based line and column of a byte offset in the source.
    pub fn line_column(&self, offset: usize) -> (usize, usize) {
        locate(self.source, offset)
    }

    fn syntax(&self, position: usize, kind: SyntaxError) -> Error {
        syntax_error(self.source, position, kind)
    }

    fn char_at(&self, position: usize) -> char {
        self.source
            .get(position..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    fn unexpected(&self, position: usize) -> Error {
        self.syntax(position, SyntaxError::InvalidCharacter(self.char_at(position)))
    }

    fn set_token(&mut self, kind: TokenKind, span: Range<usize>, depth: usize) {
        self.token = Token { kind, span, depth };
    }

    /// Advances to the next token.
    ///
    /// Returns `false` once the root value has been fully read, leaving the current token as
    /// [TokenKind::EndOfDocument]. Input ending anywhere else is an error.
    pub fn read(&mut self) -> Result<bool, Error> {
        if self.state == State::End {
            return Ok(false);
        }
        loop {
            self.skip_trivia()?;
            let Some(&byte) = self.source.as_bytes().get(self.position) else {
                return self.read_end();
            };
            match self.state {
                State::Start | State::Value => self.read_value(byte)?,
                State::ArrayStart if byte == b']' => self.end_container(Container::Array)?,
                State::ArrayStart => self.read_value(byte)?,
                State::ObjectStart if byte == b'}' => self.end_container(Container::Object)?,
                State::ObjectStart | State::PropertyName => self.read_property_name(byte)?,
                State::NameSeparator => {
                    if byte != b':' {
                        return Err(self.syntax(self.position, SyntaxError::ExpectedNameSeparator));
                    }
                    let start = self.position;
                    self.position += 1;
                    self.state = State::Value;
                    if !self.options.emit_name_separators {
                        continue;
                    }
                    self.set_token(TokenKind::NameSeparator, start..start + 1, self.stack.len());
                }
                State::AfterValue => match (byte, self.stack.last().copied()) {
                    (b',', Some(container)) => {
                        let start = self.position;
                        self.position += 1;
                        self.state = match container {
                            Container::Object => State::PropertyName,
                            Container::Array => State::Value,
                        };
                        self.set_token(TokenKind::ValueSeparator, start..start + 1, self.stack.len());
                    }
                    (b'}', _) => self.end_container(Container::Object)?,
                    (b']', _) => self.end_container(Container::Array)?,
                    _ => return Err(self.unexpected(self.position)),
                },
                State::End => return Ok(false),
            }
            return Ok(true);
        }
    }

    fn read_end(&mut self) -> Result<bool, Error> {
        if self.state != State::AfterValue || !self.stack.is_empty() {
            return Err(self.syntax(self.position, SyntaxError::UnexpectedEndOfInput));
        }
        self.state = State::End;
        self.set_token(TokenKind::EndOfDocument, self.position..self.position, 0);
        Ok(false)
    }

    fn skip_trivia(&mut self) -> Result<(), Error> {
        let bytes = self.source.as_bytes();
        loop {
            match bytes.get(self.position) {
                Some(b' ' | b'\t' | b'\n' | b'\r') => self.position += 1,
                Some(b'/') if self.options.allow_comments => match bytes.get(self.position + 1) {
                    Some(b'/') => {
                        self.position = match self.source[self.position..].find('\n') {
                            Some(offset) => self.position + offset + 1,
                            None => self.source.len(),
                        };
                    }
                    Some(b'*') => match self.source[self.position + 2..].find("*/") {
                        Some(offset) => self.position += 2 + offset + 2,
                        None => {
                            return Err(self.syntax(self.position, SyntaxError::UnterminatedComment))
                        }
                    },
                    _ => return Err(self.unexpected(self.position)),
                },
                _ => return Ok(()),
            }
        }
    }

    fn read_value(&mut self, byte: u8) -> Result<(), Error> {
        let depth = self.stack.len();
        let (kind, span) = match byte {
            b'{' => return self.start_container(Container::Object),
            b'[' => return self.start_container(Container::Array),
            b'"' => (TokenKind::String, self.scan_string()?),
            b'-' | b'0'..=b'9' => (TokenKind::Number, self.scan_number()?),
            b't' => (TokenKind::True, self.scan_literal("true")?),
            b'f' => (TokenKind::False, self.scan_literal("false")?),
            b'n' => (TokenKind::Null, self.scan_literal("null")?),
            b'N' if self.options.allow_nan => (TokenKind::Number, self.scan_literal("NaN")?),
            b'I' if self.options.allow_nan => (TokenKind::Number, self.scan_literal("Infinity")?),
            _ => return Err(self.unexpected(self.position)),
        };
        self.set_token(kind, span, depth);
        self.state = State::AfterValue;
        Ok(())
    }

    fn read_property_name(&mut self, byte: u8) -> Result<(), Error> {
        if byte != b'"' {
            return Err(self.unexpected(self.position));
        }
        let span = self.scan_string()?;
        self.set_token(TokenKind::PropertyName, span, self.stack.len());
        self.state = State::NameSeparator;
        Ok(())
    }

    fn start_container(&mut self, container: Container) -> Result<(), Error> {
        let depth = self.stack.len();
        if depth >= self.options.max_depth {
            return Err(Error::DepthExceeded {
                position: self.position,
                max: self.options.max_depth,
            });
        }
        let start = self.position;
        self.position += 1;
        self.stack.push(container);
        let (kind, state) = match container {
            Container::Object => (TokenKind::StartObject, State::ObjectStart),
            Container::Array => (TokenKind::StartArray, State::ArrayStart),
        };
        self.set_token(kind, start..start + 1, depth);
        self.state = state;
        Ok(())
    }

    fn end_container(&mut self, container: Container) -> Result<(), Error> {
        let start = self.position;
        if self.stack.last() != Some(&container) {
            return Err(self.unexpected(start));
        }
        self.stack.pop();
        self.position += 1;
        let kind = match container {
            Container::Object => TokenKind::EndObject,
            Container::Array => TokenKind::EndArray,
        };
        self.set_token(kind, start..start + 1, self.stack.len());
        self.state = State::AfterValue;
        Ok(())
    }

    /// Scans a string starting at the opening quote, returning the span of its content.
    fn scan_string(&mut self) -> Result<Range<usize>, Error> {
        let bytes = self.source.as_bytes();
        let open = self.position;
        let start = open + 1;
        let mut index = start;
        loop {
            let Some(&byte) = bytes.get(index) else {
                return Err(self.syntax(open, SyntaxError::UnterminatedString));
            };
            match byte {
                b'"' => {
                    self.position = index + 1;
                    return Ok(start..index);
                }
                b'\\' => match bytes.get(index + 1) {
                    Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => index += 2,
                    Some(b'u') => {
                        if escape::parse_hex4(&bytes[index + 2..]).is_none() {
                            return Err(self.syntax(index, SyntaxError::InvalidUnicodeEscape));
                        }
                        index += 6;
                    }
                    Some(_) => {
                        let escaped = self.char_at(index + 1);
                        return Err(self.syntax(index, SyntaxError::InvalidEscape(escaped)));
                    }
                    None => return Err(self.syntax(open, SyntaxError::UnterminatedString)),
                },
                0x00..=0x1F => return Err(self.syntax(index, SyntaxError::ControlCharacter)),
                _ => index += 1,
            }
        }
    }

    fn scan_number(&mut self) -> Result<Range<usize>, Error> {
        let bytes = self.source.as_bytes();
        let start = self.position;
        let mut index = start;
        if bytes.get(index) == Some(&b'-') {
            index += 1;
            if self.options.allow_nan && bytes.get(index) == Some(&b'I') {
                self.position = index;
                let rest = self.scan_literal("Infinity")?;
                return Ok(start..rest.end);
            }
        }
        match bytes.get(index) {
            Some(b'0') => {
                index += 1;
                if matches!(bytes.get(index), Some(b'0'..=b'9')) {
                    return Err(self.syntax(index - 1, SyntaxError::LeadingZero));
                }
            }
            Some(b'1'..=b'9') => index = skip_digits(bytes, index),
            _ => return Err(self.syntax(index, SyntaxError::ExpectedDigit)),
        }
        if bytes.get(index) == Some(&b'.') {
            index += 1;
            let end = skip_digits(bytes, index);
            if end == index {
                return Err(self.syntax(index, SyntaxError::ExpectedDigit));
            }
            index = end;
        }
        if matches!(bytes.get(index), Some(b'e' | b'E')) {
            index += 1;
            if matches!(bytes.get(index), Some(b'+' | b'-')) {
                index += 1;
            }
            let end = skip_digits(bytes, index);
            if end == index {
                return Err(self.syntax(index, SyntaxError::ExpectedDigit));
            }
            index = end;
        }
        self.position = index;
        Ok(start..index)
    }

    fn scan_literal(&mut self, literal: &'static str) -> Result<Range<usize>, Error> {
        let start = self.position;
        if !self.source.as_bytes()[start..].starts_with(literal.as_bytes()) {
            return Err(self.syntax(start, SyntaxError::InvalidLiteral));
        }
        self.position += literal.len();
        Ok(start..self.position)
    }

    /// Consumes the value the current token begins.
    ///
    /// On a property name the following value is skipped too. On `{` or `[` every token up to the
    /// matching close is consumed. Any other token is already a complete value and nothing moves.
    pub fn skip(&mut self) -> Result<(), Error> {
        if self.token.kind == TokenKind::PropertyName {
            self.read()?;
            if self.token.kind == TokenKind::NameSeparator {
                self.read()?;
            }
        }
        if !matches!(
            self.token.kind,
            TokenKind::StartObject | TokenKind::StartArray
        ) {
            return Ok(());
        }
        let depth = self.token.depth;
        loop {
            if !self.read()? {
                return Err(self.syntax(self.position, SyntaxError::UnexpectedEndOfInput));
            }
            if matches!(self.token.kind, TokenKind::EndObject | TokenKind::EndArray)
                && self.token.depth == depth
            {
                return Ok(());
            }
        }
    }

    fn expect_kind(&self, expected: &'static str, kinds: &[TokenKind]) -> Result<(), Error> {
        if kinds.contains(&self.token.kind) {
            return Ok(());
        }
        Err(Error::WrongTokenType {
            expected,
            found: self.token.kind,
        })
    }

    /// The source text of the current token, still escaped for strings.
    pub fn get_raw(&self) -> &'a str {
        &self.source[self.token.span.clone()]
    }

    /// The unescaped value of a string or property name.
    ///
    /// Borrows from the source when the token contains no escapes.
    pub fn get_string(&self) -> Result<Cow<'a, str>, Error> {
        self.expect_kind("string", &[TokenKind::String, TokenKind::PropertyName])?;
        Ok(escape::unescape(self.get_raw()))
    }

    pub fn get_boolean(&self) -> Result<bool, Error> {
        match self.token.kind {
            TokenKind::True => Ok(true),
            TokenKind::False => Ok(false),
            found => Err(Error::WrongTokenType {
                expected: "boolean",
                found,
            }),
        }
    }

    fn number(&self) -> Result<&'a str, Error> {
        self.expect_kind("number", &[TokenKind::Number])?;
        Ok(self.get_raw())
    }

    fn out_of_range(&self, target: &'static str) -> Error {
        Error::NumberOutOfRange {
            position: self.token.span.start,
            target,
        }
    }

    pub fn get_f64(&self) -> Result<f64, Error> {
        let raw = self.number()?;
        match raw {
            "NaN" => return Ok(f64::NAN),
            "Infinity" => return Ok(f64::INFINITY),
            "-Infinity" => return Ok(f64::NEG_INFINITY),
            _ => {}
        }
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(self.out_of_range("f64")),
        }
    }

    pub fn get_f32(&self) -> Result<f32, Error> {
        let raw = self.number()?;
        match raw {
            "NaN" => return Ok(f32::NAN),
            "Infinity" => return Ok(f32::INFINITY),
            "-Infinity" => return Ok(f32::NEG_INFINITY),
            _ => {}
        }
        match raw.parse::<f32>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(self.out_of_range("f32")),
        }
    }

    /// Reads the current number as a [Decimal], rounding digits beyond its 28-digit scale.
    pub fn get_decimal(&self) -> Result<Decimal, Error> {
        let raw = self.number()?;
        if matches!(raw, "NaN" | "Infinity" | "-Infinity") {
            return Err(Error::NonFiniteNumber);
        }
        let parsed = if raw.contains(['e', 'E']) {
            Decimal::from_scientific(raw)
        } else {
            raw.parse::<Decimal>()
        };
        parsed.map_err(|_| self.out_of_range("decimal"))
    }
}

macro_rules! integer_accessors {
    ($($method:ident => $type:ty),* $(,)?) => {
        impl<'a> Lexer<'a> {
            $(
                #[doc = concat!("Reads the current number as `", stringify!($type), "`.")]
                ///
                /// Fractions, exponents and values outside the type's range are
                /// [Error::NumberOutOfRange].
                pub fn $method(&self) -> Result<$type, Error> {
                    let raw = self.number()?;
                    raw.parse::<$type>()
                        .map_err(|_| self.out_of_range(stringify!($type)))
                }
            )*
        }
    };
}

integer_accessors! {
    get_i32 => i32,
    get_i64 => i64,
    get_u32 => u32,
    get_u64 => u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn kinds(source: &str, options: LexerOptions) -> Result<Vec<TokenKind>, Error> {
        let mut lexer = Lexer::new(source, options);
        let mut kinds = Vec::new();
        while lexer.read()? {
            kinds.push(lexer.token_kind());
        }
        kinds.push(lexer.token_kind());
        Ok(kinds)
    }

    fn syntax_kind(source: &str, options: LexerOptions) -> SyntaxError {
        match kinds(source, options) {
            Err(Error::InvalidFormat { kind, .. }) => kind,
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn test_scalar_roots() {
        use TokenKind::*;
        let options = LexerOptions::default();
        assert_eq!(kinds("true", options).unwrap(), [True, EndOfDocument]);
        assert_eq!(kinds(" -1.5e3 ", options).unwrap(), [Number, EndOfDocument]);
        assert_eq!(kinds("\"x\"", options).unwrap(), [String, EndOfDocument]);
        assert_eq!(kinds("null", options).unwrap(), [Null, EndOfDocument]);
    }

    #[test]
    fn test_nested() {
        use TokenKind::*;
        let got = kinds(r#"[{"a":[]},{},false]"#, LexerOptions::default()).unwrap();
        assert_eq!(
            got,
            [
                StartArray,
                StartObject,
                PropertyName,
                StartArray,
                EndArray,
                EndObject,
                ValueSeparator,
                StartObject,
                EndObject,
                ValueSeparator,
                False,
                EndArray,
                EndOfDocument,
            ]
        );
    }

    #[test]
    fn test_depths() {
        let mut lexer = Lexer::new(r#"{"a":[1]}"#, LexerOptions::default());
        let mut seen = Vec::new();
        while lexer.read().unwrap() {
            seen.push((lexer.token_kind(), lexer.token().depth, lexer.depth()));
        }
        assert_eq!(
            seen,
            [
                (TokenKind::StartObject, 0, 1),
                (TokenKind::PropertyName, 1, 1),
                (TokenKind::StartArray, 1, 2),
                (TokenKind::Number, 2, 2),
                (TokenKind::EndArray, 1, 1),
                (TokenKind::EndObject, 0, 0),
            ]
        );
    }

    #[test_case("" => SyntaxError::UnexpectedEndOfInput; "empty")]
    #[test_case("[1," => SyntaxError::UnexpectedEndOfInput; "open array")]
    #[test_case("[1,]" => SyntaxError::InvalidCharacter(']'); "trailing comma in array")]
    #[test_case(r#"{"a":1,}"# => SyntaxError::InvalidCharacter('}'); "trailing comma in object")]
    #[test_case("[1}" => SyntaxError::InvalidCharacter('}'); "mismatched close")]
    #[test_case("1 2" => SyntaxError::InvalidCharacter('2'); "trailing content")]
    #[test_case("1,2" => SyntaxError::InvalidCharacter(','); "comma at root")]
    #[test_case(r#"{"a" 1}"# => SyntaxError::ExpectedNameSeparator; "missing colon")]
    #[test_case("{1:2}" => SyntaxError::InvalidCharacter('1'); "non-string name")]
    #[test_case("\"abc" => SyntaxError::UnterminatedString; "unterminated")]
    #[test_case(r#""\x""# => SyntaxError::InvalidEscape('x'); "bad escape")]
    #[test_case(r#""\u12G4""# => SyntaxError::InvalidUnicodeEscape; "bad hex")]
    #[test_case(r#""\u12""# => SyntaxError::InvalidUnicodeEscape; "short hex")]
    #[test_case("\"a\nb\"" => SyntaxError::ControlCharacter; "raw newline")]
    #[test_case("01" => SyntaxError::LeadingZero; "leading zero")]
    #[test_case("-" => SyntaxError::ExpectedDigit; "bare minus")]
    #[test_case("1." => SyntaxError::ExpectedDigit; "no fraction digits")]
    #[test_case("1e+" => SyntaxError::ExpectedDigit; "no exponent digits")]
    #[test_case(".5" => SyntaxError::InvalidCharacter('.'); "no integer part")]
    #[test_case("tru" => SyntaxError::InvalidLiteral; "short literal")]
    #[test_case("nul1" => SyntaxError::InvalidLiteral; "wrong literal")]
    #[test_case("NaN" => SyntaxError::InvalidCharacter('N'); "nan disabled")]
    #[test_case("-Infinity" => SyntaxError::ExpectedDigit; "infinity disabled")]
    #[test_case("// c\n1" => SyntaxError::InvalidCharacter('/'); "comments disabled")]
    fn test_rejects(source: &str) -> SyntaxError {
        syntax_kind(source, LexerOptions::default())
    }

    #[test]
    fn test_error_position() {
        let err = kinds("[\n  1,\n  x]", LexerOptions::default()).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidFormat {
                position: 9,
                line: 3,
                column: 3,
                kind: SyntaxError::InvalidCharacter('x'),
            }
        );
        assert_eq!(err.position(), Some(9));
    }

    #[test]
    fn test_error_column_counts_chars() {
        let err = kinds("[\"é\", ?]", LexerOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFormat {
                position: 7,
                line: 1,
                column: 7,
                ..
            }
        ));
    }

    #[test]
    fn test_comments() {
        use TokenKind::*;
        let options = LexerOptions {
            allow_comments: true,
            ..Default::default()
        };
        let source = "// head\n[1, /* mid */ 2] // tail";
        assert_eq!(
            kinds(source, options).unwrap(),
            [StartArray, Number, ValueSeparator, Number, EndArray, EndOfDocument]
        );
        assert_eq!(
            syntax_kind("[1 /* open", options),
            SyntaxError::UnterminatedComment
        );
        assert_eq!(syntax_kind("/ 1", options), SyntaxError::InvalidCharacter('/'));
    }

    #[test]
    fn test_position_after_comment() {
        let options = LexerOptions {
            allow_comments: true,
            ..Default::default()
        };
        let mut lexer = Lexer::new("/* skip */ [ @ ]", options);
        assert!(lexer.read().unwrap());
        assert_eq!(lexer.token_span(), 11..12);
        let err = lexer.read().unwrap_err();
        assert_eq!(err.position(), Some(13));
    }

    #[test]
    fn test_position_after_escapes() {
        let source = r#"["a\"bAé", ?]"#;
        let mut lexer = Lexer::new(source, LexerOptions::default());
        assert!(lexer.read().unwrap());
        assert!(lexer.read().unwrap());
        assert_eq!(lexer.token_span(), 2..14);
        assert_eq!(lexer.get_string().unwrap(), "a\"bAé");
        assert!(lexer.read().unwrap());
        assert_eq!(lexer.token_kind(), TokenKind::ValueSeparator);
        assert_eq!(
            lexer.read(),
            Err(Error::InvalidFormat {
                position: 17,
                line: 1,
                column: 17,
                kind: SyntaxError::InvalidCharacter('?'),
            })
        );
    }

    #[test]
    fn test_named_floats() {
        let options = LexerOptions {
            allow_nan: true,
            ..Default::default()
        };
        let mut lexer = Lexer::new("[NaN, Infinity, -Infinity]", options);
        lexer.read().unwrap();
        lexer.read().unwrap();
        assert!(lexer.get_f64().unwrap().is_nan());
        assert_eq!(lexer.get_decimal(), Err(Error::NonFiniteNumber));
        lexer.read().unwrap();
        lexer.read().unwrap();
        assert_eq!(lexer.get_f32().unwrap(), f32::INFINITY);
        lexer.read().unwrap();
        lexer.read().unwrap();
        assert_eq!(lexer.get_raw(), "-Infinity");
        assert_eq!(lexer.get_f64().unwrap(), f64::NEG_INFINITY);
        assert!(matches!(
            lexer.get_i64(),
            Err(Error::NumberOutOfRange { target: "i64", .. })
        ));
    }

    #[test]
    fn test_name_separator_tokens() {
        use TokenKind::*;
        let options = LexerOptions {
            emit_name_separators: true,
            ..Default::default()
        };
        assert_eq!(
            kinds(r#"{"a": 1}"#, options).unwrap(),
            [StartObject, PropertyName, NameSeparator, Number, EndObject, EndOfDocument]
        );
    }

    #[test]
    fn test_max_depth() {
        let options = LexerOptions {
            max_depth: 2,
            ..Default::default()
        };
        assert!(kinds("[[1]]", options).is_ok());
        assert_eq!(
            kinds("[[[1]]]", options),
            Err(Error::DepthExceeded { position: 2, max: 2 })
        );
    }

    #[test]
    fn test_numbers() {
        let mut lexer = Lexer::new(
            "[2147483648, -0, 1.5e2, 18446744073709551615, 0.1, 1e400]",
            LexerOptions::default(),
        );
        lexer.read().unwrap();

        lexer.read().unwrap();
        assert!(matches!(
            lexer.get_i32(),
            Err(Error::NumberOutOfRange {
                position: 1,
                target: "i32"
            })
        ));
        assert_eq!(lexer.get_i64().unwrap(), 2_147_483_648);
        assert_eq!(lexer.get_u32().unwrap(), 2_147_483_648);

        lexer.read().unwrap();
        lexer.read().unwrap();
        assert_eq!(lexer.get_i32().unwrap(), 0);
        assert!(lexer.get_u64().is_err());

        lexer.read().unwrap();
        lexer.read().unwrap();
        assert_eq!(lexer.get_f64().unwrap(), 150.0);
        assert_eq!(lexer.get_decimal().unwrap(), Decimal::new(150, 0));
        assert!(lexer.get_i32().is_err());

        lexer.read().unwrap();
        lexer.read().unwrap();
        assert_eq!(lexer.get_u64().unwrap(), u64::MAX);

        lexer.read().unwrap();
        lexer.read().unwrap();
        assert_eq!(lexer.get_decimal().unwrap(), Decimal::new(1, 1));
        assert_eq!(lexer.get_f32().unwrap(), 0.1f32);

        lexer.read().unwrap();
        lexer.read().unwrap();
        assert!(matches!(
            lexer.get_f64(),
            Err(Error::NumberOutOfRange { target: "f64", .. })
        ));
    }

    #[test]
    fn test_wrong_token_type() {
        let mut lexer = Lexer::new(r#"["s", true]"#, LexerOptions::default());
        lexer.read().unwrap();
        assert_eq!(
            lexer.get_string(),
            Err(Error::WrongTokenType {
                expected: "string",
                found: TokenKind::StartArray
            })
        );
        lexer.read().unwrap();
        assert!(matches!(
            lexer.get_boolean(),
            Err(Error::WrongTokenType {
                expected: "boolean",
                ..
            })
        ));
        assert!(matches!(
            lexer.get_f64(),
            Err(Error::WrongTokenType {
                expected: "number",
                found: TokenKind::String
            })
        ));
        lexer.read().unwrap();
        lexer.read().unwrap();
        assert!(lexer.get_boolean().unwrap());
    }

    #[test]
    fn test_get_string_borrows() {
        let mut lexer = Lexer::new(r#"["plain", "esc\naped"]"#, LexerOptions::default());
        lexer.read().unwrap();
        lexer.read().unwrap();
        assert!(matches!(lexer.get_string().unwrap(), Cow::Borrowed("plain")));
        lexer.read().unwrap();
        lexer.read().unwrap();
        assert_eq!(lexer.get_raw(), "esc\\naped");
        assert_eq!(lexer.get_string().unwrap(), "esc\naped");
    }

    #[test]
    fn test_skip() {
        let source = r#"{"skip": {"x": [1, {"y": 2}]}, "keep": 3, "flat": 4}"#;
        let mut lexer = Lexer::new(source, LexerOptions::default());
        lexer.read().unwrap();
        lexer.read().unwrap();
        assert_eq!(lexer.get_string().unwrap(), "skip");
        lexer.skip().unwrap();
        assert_eq!(lexer.token_kind(), TokenKind::EndObject);
        assert_eq!(lexer.depth(), 1);
        lexer.read().unwrap();
        lexer.read().unwrap();
        assert_eq!(lexer.get_string().unwrap(), "keep");
        lexer.read().unwrap();
        assert_eq!(lexer.get_i32().unwrap(), 3);

        lexer.read().unwrap();
        lexer.read().unwrap();
        lexer.skip().unwrap();
        assert_eq!(lexer.token_kind(), TokenKind::Number);
        lexer.read().unwrap();
        assert_eq!(lexer.token_kind(), TokenKind::EndObject);
        assert!(!lexer.read().unwrap());
    }

    #[test]
    fn test_skip_with_separators() {
        let options = LexerOptions {
            emit_name_separators: true,
            ..Default::default()
        };
        let mut lexer = Lexer::new(r#"{"a": [1, 2], "b": 0}"#, options);
        lexer.read().unwrap();
        lexer.read().unwrap();
        lexer.skip().unwrap();
        assert_eq!(lexer.token_kind(), TokenKind::EndArray);
        lexer.read().unwrap();
        lexer.read().unwrap();
        assert_eq!(lexer.get_string().unwrap(), "b");
    }

    #[test]
    fn test_skip_truncated() {
        let mut lexer = Lexer::new("[[1, 2]", LexerOptions::default());
        lexer.read().unwrap();
        assert!(matches!(
            lexer.skip(),
            Err(Error::InvalidFormat {
                kind: SyntaxError::UnexpectedEndOfInput,
                ..
            })
        ));
    }

    #[test]
    fn test_read_after_end() {
        let mut lexer = Lexer::new("[]", LexerOptions::default());
        assert!(lexer.read().unwrap());
        assert!(lexer.read().unwrap());
        assert!(!lexer.read().unwrap());
        assert!(!lexer.read().unwrap());
        assert_eq!(lexer.token_kind(), TokenKind::EndOfDocument);
    }

    #[test]
    fn test_bom() {
        let mut lexer = Lexer::new("\u{FEFF}1", LexerOptions::default());
        assert!(lexer.read().unwrap());
        assert_eq!(lexer.token_span(), 3..4);
    }

    #[test]
    fn test_from_utf8() {
        let lexer = Lexer::from_utf8(b"[1]", LexerOptions::default()).unwrap();
        assert_eq!(lexer.source(), "[1]");
        let err = Lexer::from_utf8(b"[\"a\xFF\"]", LexerOptions::default()).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidFormat {
                position: 3,
                line: 1,
                column: 4,
                kind: SyntaxError::InvalidUtf8,
            }
        );
    }

    #[test]
    fn test_decode_utf16() {
        let units: Vec<u16> = "{\"k\":\"🦀\"}".encode_utf16().collect();
        let text = decode_utf16(&units).unwrap();
        let mut lexer = Lexer::new(&text, LexerOptions::default());
        lexer.read().unwrap();
        lexer.read().unwrap();
        lexer.read().unwrap();
        assert_eq!(lexer.get_string().unwrap(), "🦀");

        let err = decode_utf16(&[0x61, 0xD800, 0x62]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidFormat {
                position: 1,
                kind: SyntaxError::InvalidUtf16,
                ..
            }
        ));
    }
}
