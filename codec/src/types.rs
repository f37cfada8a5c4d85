//! Codec implementations for common types

pub mod primitives;
pub mod special;
pub mod text;
pub mod tuple;
pub mod vec;
