//! Read and write JSON text.
//!
//! # Overview
//!
//! - [Lexer]: a forward-only cursor that turns borrowed JSON text into one [Token] at a time,
//!   validating structure as it goes. Comments and `NaN`/`Infinity` are opt-in via
//!   [LexerOptions] and off by default.
//! - [escape](escape::escape) and [unescape]: RFC 8259 string escaping, inverse of each other.
//! - [TextBuilder]: an append-only output buffer with direct number formatting and
//!   [NamingPolicy]-driven property names, optionally drawing its storage from a [BufferPool].
//!
//! # Example
//!
//! ```
//! use tessera_json::{BuilderOptions, Lexer, LexerOptions, TextBuilder, TokenKind};
//!
//! let mut builder = TextBuilder::new(BuilderOptions::default());
//! builder.begin_array().unwrap();
//! builder.append_string("a\nb").unwrap();
//! builder.append_value_separator().unwrap();
//! builder.append_f64(0.5).unwrap();
//! builder.end_array().unwrap();
//! let text = builder.finish();
//! assert_eq!(text, r#"["a\nb",0.5]"#);
//!
//! let mut lexer = Lexer::new(&text, LexerOptions::default());
//! let mut kinds = Vec::new();
//! while lexer.read().unwrap() {
//!     kinds.push(lexer.token_kind());
//! }
//! assert_eq!(
//!     kinds,
//!     [
//!         TokenKind::StartArray,
//!         TokenKind::String,
//!         TokenKind::ValueSeparator,
//!         TokenKind::Number,
//!         TokenKind::EndArray,
//!     ]
//! );
//! ```

mod builder;
pub mod error;
pub mod escape;
mod lexer;
mod naming;
mod options;
mod pool;
mod token;

pub use builder::{BuilderOptions, TextBuilder};
pub use error::{Error, SyntaxError};
pub use escape::{escape_with, unescape, EscapeMode};
pub use lexer::{decode_utf16, Lexer};
pub use naming::NamingPolicy;
pub use options::LexerOptions;
pub use pool::{BufferPool, BufferPoolConfig, PooledBuffer};
pub use token::{Token, TokenKind};
