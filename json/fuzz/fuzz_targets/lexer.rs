#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessera_json::{escape, escape_with, unescape, EscapeMode, Lexer, LexerOptions, TokenKind};

#[derive(Arbitrary, Debug)]
struct Input {
    source: Vec<u8>,
    allow_comments: bool,
    allow_nan: bool,
    emit_name_separators: bool,
    max_depth: u8,
    text: String,
}

fn lex(input: &Input) {
    let options = LexerOptions {
        allow_comments: input.allow_comments,
        allow_nan: input.allow_nan,
        emit_name_separators: input.emit_name_separators,
        max_depth: input.max_depth as usize,
    };
    let Ok(mut lexer) = Lexer::from_utf8(&input.source, options) else {
        return;
    };
    let mut opened = 0usize;
    loop {
        match lexer.read() {
            Ok(true) => {}
            Ok(false) => {
                assert_eq!(lexer.token_kind(), TokenKind::EndOfDocument);
                assert_eq!(lexer.depth(), 0);
                return;
            }
            Err(err) => {
                if let Some(position) = err.position() {
                    assert!(position <= input.source.len());
                }
                return;
            }
        }
        let span = lexer.token_span();
        assert!(span.start <= span.end && span.end <= lexer.position());
        assert!(lexer.depth() <= options.max_depth);
        match lexer.token_kind() {
            TokenKind::StartObject | TokenKind::StartArray => opened += 1,
            TokenKind::EndObject | TokenKind::EndArray => opened -= 1,
            TokenKind::String | TokenKind::PropertyName => {
                let _ = lexer.get_string().unwrap();
            }
            TokenKind::Number => {
                let _ = lexer.get_f64();
                let _ = lexer.get_i64();
                let _ = lexer.get_decimal();
            }
            _ => {}
        }
        assert_eq!(opened, lexer.depth());
    }
}

fn escapes(text: &str) {
    assert_eq!(unescape(&escape::escape(text)), text);
    let ascii = escape_with(text, EscapeMode::AsciiOnly);
    assert!(ascii.is_ascii());
    assert_eq!(unescape(&ascii), text);
}

fuzz_target!(|input: Input| {
    lex(&input);
    escapes(&input.text);
});
