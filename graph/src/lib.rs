//! Track shared and cyclic references while encoding object graphs.
//!
//! # Overview
//!
//! Encoding a graph in which objects are shared (or point back at themselves) requires writing
//! each object once and replacing later occurrences with an id. This crate provides the tables
//! that assign and resolve those ids:
//!
//! - [ReferenceWriter] assigns ids to objects by *identity* (address and type), so two distinct
//!   objects with equal content get different ids.
//! - [ReferenceReader] resolves ids back to decoded objects. Ids are reserved before an object is
//!   built and the object is registered before its fields are read, so self-references resolve to
//!   the in-progress instance.
//! - [InternTable] deduplicates strings by *value*, so equal content shares one id.
//!
//! The tables live for exactly one encode or decode call. [WriteSession] and [ReadSession] bundle
//! them with the binary codec.
//!
//! # Capacity
//!
//! Reference tables fail with [Error::CapacityExceeded] once [TrackerConfig::max_references] ids
//! are in use. The intern table instead stops interning at [InternConfig::max_entries] and strings
//! are written inline from then on.

mod config;
mod error;
mod identity;
mod intern;
mod reader;
pub mod session;
mod writer;

pub use config::{InternConfig, TrackerConfig};
pub use error::Error;
pub use identity::{Identity, ObjectKey};
pub use intern::InternTable;
pub use reader::{ReferenceReader, Slot};
pub use session::{ObjectStart, ReadSession, WriteSession};
pub use writer::ReferenceWriter;
