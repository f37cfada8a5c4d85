//! Core codec traits and implementations

use crate::{Decoder, Encoder, Error};
use bytes::Bytes;

/// Trait for types with a known, fixed encoded size.
///
/// Implementing this trait signifies that the encoded representation of this type *always* has the
/// same byte length, regardless of the specific value.
///
/// This automatically provides an implementation of [`EncodeSize`].
pub trait FixedSize {
    /// The size of the encoded value (in bytes).
    const SIZE: usize;
}

/// Trait for types that can provide their encoded size in bytes.
///
/// This must be implemented by all encodable types. For types implementing [`FixedSize`], this
/// trait is implemented automatically. For variable-size types, this trait must be implemented
/// manually.
pub trait EncodeSize {
    /// Returns the encoded size of this value (in bytes).
    fn encode_size(&self) -> usize;
}

// Automatically implement `EncodeSize` for types that implement `FixedSize`.
impl<T: FixedSize> EncodeSize for T {
    fn encode_size(&self) -> usize {
        Self::SIZE
    }
}

/// Trait for types that can be written to an [Encoder].
pub trait Write {
    /// Writes the binary representation of `self` to the encoder.
    fn write(&self, encoder: &mut Encoder);
}

/// Trait for types that can be read from a [Decoder].
///
/// The `Cfg` associated type allows for configuration during the read process. For example, it can
/// be used to bound the lengths of strings and collections read from untrusted input. Use `()` for
/// types that do not require configuration.
pub trait Read: Sized {
    /// The `Cfg` type parameter allows for configuration during the read process.
    type Cfg: Clone;

    /// Reads a value using the provided configuration, consuming the necessary bytes.
    fn read_cfg(decoder: &mut Decoder<'_>, cfg: &Self::Cfg) -> Result<Self, Error>;
}

/// Trait combining [Write] and [EncodeSize] for types that can be fully encoded.
pub trait Encode: Write + EncodeSize {
    /// Encodes `self` into a new [Bytes] buffer.
    ///
    /// # Panics
    ///
    /// Panics if `write` does not write exactly `encode_size()` bytes. This indicates a bug in the
    /// type's implementation.
    fn encode(&self) -> Bytes {
        let len = self.encode_size();
        let mut encoder = Encoder::with_capacity(len);
        self.write(&mut encoder);
        assert_eq!(encoder.len(), len, "write() did not write expected bytes");
        encoder.freeze()
    }
}

// Automatically implement `Encode` for types that implement `Write` and `EncodeSize`.
impl<T: Write + EncodeSize> Encode for T {}

/// Trait for types that can be decoded from a byte slice, ensuring it is fully consumed.
pub trait Decode: Read {
    /// Decodes a value from `data` using the provided configuration.
    ///
    /// Fails with [Error::ExtraData] if bytes remain after reading.
    fn decode_cfg(data: &[u8], cfg: &Self::Cfg) -> Result<Self, Error> {
        let mut decoder = Decoder::new(data);
        let result = Self::read_cfg(&mut decoder, cfg)?;
        let remaining = decoder.remaining();
        if remaining > 0 {
            return Err(Error::ExtraData(remaining));
        }
        Ok(result)
    }
}

// Automatically implement `Decode` for types that implement `Read`.
impl<T: Read> Decode for T {}

/// Trait for types that can be encoded and decoded.
pub trait Codec: Encode + Decode {}

// Automatically implement `Codec` for types that implement `Encode` and `Decode`.
impl<T: Encode + Decode> Codec for T {}

/// Extension trait providing an ergonomic read method for types requiring no configuration.
pub trait ReadExt: Read<Cfg = ()> {
    /// Reads a value using the default `()` config.
    fn read(decoder: &mut Decoder<'_>) -> Result<Self, Error> {
        <Self as Read>::read_cfg(decoder, &())
    }
}

// Automatically implement `ReadExt` for types that implement `Read` with no config.
impl<T: Read<Cfg = ()>> ReadExt for T {}

/// Extension trait providing an ergonomic decode method for types requiring no configuration.
pub trait DecodeExt: Decode<Cfg = ()> {
    /// Decodes a value using the default `()` config.
    fn decode(data: &[u8]) -> Result<Self, Error> {
        <Self as Decode>::decode_cfg(data, &())
    }
}

// Automatically implement `DecodeExt` for types that implement `Decode` with no config.
impl<T: Decode<Cfg = ()>> DecodeExt for T {}
