//! Serialize values to a compact binary wire format.
//!
//! # Overview
//!
//! A binary codec designed to efficiently and safely:
//! - Encode values as a one-byte type tag plus a tag-dependent payload
//! - Decode untrusted input without ever reading past the end of the buffer
//!
//! The [Decoder] is a bounds-checked cursor over a borrowed byte slice and the [Encoder] mirrors
//! each of its reads with a write. Fixed-width values are little-endian, lengths and ids are
//! [varint]s, and strings are prefixed with their UTF-8 byte count (a negative count is `null`).
//!
//! The [registry] resolves a [TypeDesc] to its [TypeCode]: concrete types have a registered tag,
//! while containers, enums, tuples and composites resolve to shape codes whose element types the
//! caller encodes separately.
//!
//! # Supported Types
//!
//! Natively supports:
//! - Primitives: `u8`..`u128`, `i8`..`i128`, `f32`, `f64`, `bool`
//! - `String`, `Bytes`, `Vec<T>`, `Option<T>`, tuples, fixed-size arrays `[T; N]`
//! - `uuid::Uuid` and `rust_decimal::Decimal`
//!
//! User-defined types implement [Write], [EncodeSize] and [Read].
//!
//! # Example
//!
//! ```
//! use tessera_codec::{
//!     Decode, Decoder, Encode, EncodeSize, Encoder, Error, RangeCfg, Read, Write,
//! };
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Item {
//!     id: u64,
//!     label: String,
//!     weight: Option<f32>,
//! }
//!
//! impl Write for Item {
//!     fn write(&self, encoder: &mut Encoder) {
//!         self.id.write(encoder);
//!         self.label.write(encoder);
//!         self.weight.write(encoder);
//!     }
//! }
//!
//! impl EncodeSize for Item {
//!     fn encode_size(&self) -> usize {
//!         self.id.encode_size() + self.label.encode_size() + self.weight.encode_size()
//!     }
//! }
//!
//! impl Read for Item {
//!     type Cfg = RangeCfg<usize>;
//!
//!     fn read_cfg(decoder: &mut Decoder<'_>, label: &Self::Cfg) -> Result<Self, Error> {
//!         let id = u64::read_cfg(decoder, &())?;
//!         let label = String::read_cfg(decoder, label)?;
//!         let weight = Option::<f32>::read_cfg(decoder, &())?;
//!         Ok(Self { id, label, weight })
//!     }
//! }
//!
//! let item = Item { id: 7, label: "widget".into(), weight: Some(1.5) };
//! let encoded = item.encode();
//! let decoded = Item::decode_cfg(&encoded, &RangeCfg::at_most(64)).unwrap();
//! assert_eq!(item, decoded);
//! ```

pub mod code;
pub mod codec;
pub mod config;
pub mod decoder;
pub mod describe;
pub mod encoder;
pub mod error;
pub mod registry;
pub mod types;
pub mod varint;

// Re-export main types and traits
pub use code::TypeCode;
pub use codec::*;
pub use config::RangeCfg;
pub use decoder::Decoder;
pub use describe::Described;
pub use encoder::Encoder;
pub use error::Error;
pub use registry::{
    code_of, fixed_size_of, is_known_type, is_unmanaged, type_of, CollectionShape, CompositeKind,
    FieldDesc, Primitive, TupleKind, TypeDesc,
};
