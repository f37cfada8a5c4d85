//! Lexes whole documents and round-trips builder output through the lexer.

use std::sync::Once;
use tessera_json::{
    BufferPool, BuilderOptions, Error, Lexer, LexerOptions, NamingPolicy, SyntaxError,
    TextBuilder, TokenKind,
};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

/// A token kind with its decoded text, for strings, names and numbers.
#[derive(Debug, PartialEq)]
enum Seen {
    Kind(TokenKind),
    Name(String),
    Str(String),
    Number(String),
}

fn tokens(source: &str, options: LexerOptions) -> Result<Vec<Seen>, Error> {
    let mut lexer = Lexer::new(source, options);
    let mut seen = Vec::new();
    loop {
        let more = lexer.read()?;
        seen.push(match lexer.token_kind() {
            TokenKind::PropertyName => Seen::Name(lexer.get_string()?.into_owned()),
            TokenKind::String => Seen::Str(lexer.get_string()?.into_owned()),
            TokenKind::Number => Seen::Number(lexer.get_raw().to_owned()),
            kind => Seen::Kind(kind),
        });
        if !more {
            return Ok(seen);
        }
    }
}

#[test]
fn test_escaped_member_sequence() {
    let seen = tokens(r#"{"name":"Jo\"hn","age":30}"#, LexerOptions::default()).unwrap();
    assert_eq!(
        seen,
        [
            Seen::Kind(TokenKind::StartObject),
            Seen::Name("name".into()),
            Seen::Str("Jo\"hn".into()),
            Seen::Kind(TokenKind::ValueSeparator),
            Seen::Name("age".into()),
            Seen::Number("30".into()),
            Seen::Kind(TokenKind::EndObject),
            Seen::Kind(TokenKind::EndOfDocument),
        ]
    );
}

#[test]
fn test_config_document() {
    let source = r#"
        // service settings
        {
            "service": "ingest",
            "replicas": 3,
            /* per-region overrides */
            "regions": [
                {"id": "eu-west", "weight": 0.25, "enabled": true},
                {"id": "us-east", "weight": 7.5e-1, "enabled": false, "note": null}
            ],
            "limits": {"max_depth": 64, "ratio": -1.0E+2}
        }
    "#;
    let options = LexerOptions {
        allow_comments: true,
        ..Default::default()
    };
    let mut lexer = Lexer::new(source, options);
    let mut weights = Vec::new();
    let mut ids = Vec::new();
    let mut max_depth = 0;
    while lexer.read().unwrap() {
        max_depth = max_depth.max(lexer.depth());
        if lexer.token_kind() != TokenKind::PropertyName {
            continue;
        }
        match lexer.get_string().unwrap().as_ref() {
            "id" => {
                lexer.read().unwrap();
                ids.push(lexer.get_string().unwrap().into_owned());
            }
            "weight" => {
                lexer.read().unwrap();
                weights.push(lexer.get_f64().unwrap());
            }
            "replicas" => {
                lexer.read().unwrap();
                assert_eq!(lexer.get_i32().unwrap(), 3);
            }
            "limits" => lexer.skip().unwrap(),
            _ => {}
        }
    }
    assert_eq!(ids, ["eu-west", "us-east"]);
    assert_eq!(weights, [0.25, 0.75]);
    assert_eq!(max_depth, 3);
    assert_eq!(lexer.token_kind(), TokenKind::EndOfDocument);
}

#[test]
fn test_error_reports_line() {
    let source = "{\n  \"a\": 1,\n  \"b\": tru\n}";
    match tokens(source, LexerOptions::default()) {
        Err(Error::InvalidFormat {
            line, column, kind, ..
        }) => {
            assert_eq!((line, column), (3, 8));
            assert_eq!(kind, SyntaxError::InvalidLiteral);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn test_every_prefix_of_document_fails() {
    let source = r#"{"k": [1, "two", {"three": 3.0}], "n": null}"#;
    assert!(tokens(source, LexerOptions::default()).is_ok());
    for end in 0..source.len() {
        let prefix = &source[..end];
        assert!(
            tokens(prefix, LexerOptions::default()).is_err(),
            "prefix {prefix:?} accepted"
        );
    }
}

#[test]
fn test_builder_output_lexes_back() {
    init_tracing();
    let pool = BufferPool::default();
    let options = BuilderOptions {
        naming: NamingPolicy::CamelCase,
        force_ascii: true,
        initial_capacity: 8,
        ..Default::default()
    };
    let mut builder = TextBuilder::with_pool(options, &pool);
    let names = ["first_name", "favorite_emoji", "lucky_numbers"];
    let values = ["Zoë", "🦀", ""];

    builder.begin_object().unwrap();
    for (index, (name, value)) in names.iter().zip(values).enumerate() {
        if index > 0 {
            builder.append_value_separator().unwrap();
        }
        builder.append_property_name(name).unwrap();
        if value.is_empty() {
            builder.begin_array().unwrap();
            builder.append_i64(-1).unwrap();
            builder.append_value_separator().unwrap();
            builder.append_f32(0.1).unwrap();
            builder.end_array().unwrap();
        } else {
            builder.append_string(value).unwrap();
        }
    }
    builder.end_object().unwrap();
    let text = builder.finish();
    assert!(text.is_ascii());

    let seen = tokens(&text, LexerOptions::default()).unwrap();
    assert_eq!(
        seen,
        [
            Seen::Kind(TokenKind::StartObject),
            Seen::Name("firstName".into()),
            Seen::Str("Zoë".into()),
            Seen::Kind(TokenKind::ValueSeparator),
            Seen::Name("favoriteEmoji".into()),
            Seen::Str("🦀".into()),
            Seen::Kind(TokenKind::ValueSeparator),
            Seen::Name("luckyNumbers".into()),
            Seen::Kind(TokenKind::StartArray),
            Seen::Number("-1".into()),
            Seen::Kind(TokenKind::ValueSeparator),
            Seen::Number("0.1".into()),
            Seen::Kind(TokenKind::EndArray),
            Seen::Kind(TokenKind::EndObject),
            Seen::Kind(TokenKind::EndOfDocument),
        ]
    );
    assert!(pool.idle() > 0);
}

#[test]
fn test_utf16_source() {
    let units: Vec<u16> = r#"["α", {"β": [true]}]"#.encode_utf16().collect();
    let text = tessera_json::decode_utf16(&units).unwrap();
    let seen = tokens(&text, LexerOptions::default()).unwrap();
    assert_eq!(seen[1], Seen::Str("α".into()));
    assert_eq!(seen[4], Seen::Name("β".into()));
    assert_eq!(seen.len(), 11);
}
