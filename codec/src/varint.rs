//! Variable-length integer encoding and decoding
//!
//! Each byte uses:
//! - 7 bits for the value
//! - 1 "continuation" bit to indicate if more bytes follow
//!
//! Signed integers are first mapped to unsigned integers with ZigZag encoding so that values of
//! equal magnitude cost the same number of bytes regardless of sign.
//!
//! `usize` and `isize` are omitted to prevent behavior from depending on the target architecture.

use crate::{Decoder, EncodeSize, Encoder, Error, Read, Write};
use bytes::BufMut;
use std::ops::{BitOrAssign, Shl, ShrAssign};

const BITS_PER_BYTE: usize = 8;
const DATA_BITS_PER_BYTE: usize = 7;
const DATA_BITS_MASK: u8 = 0x7F;
const CONTINUATION_BIT_MASK: u8 = 0x80;

/// A trait for unsigned integers that can be varint encoded.
pub trait UInt:
    Copy
    + From<u8>
    + Sized
    + ShrAssign<usize>
    + Shl<usize, Output = Self>
    + BitOrAssign<Self>
    + PartialOrd
{
    /// Returns the number of leading zeros in the integer.
    fn leading_zeros(self) -> u32;

    /// Returns the least significant byte of the integer.
    fn as_u8(self) -> u8;
}

// Implements the `UInt` trait for all unsigned integer types.
macro_rules! impl_uint {
    ($type:ty) => {
        impl UInt for $type {
            #[inline]
            fn leading_zeros(self) -> u32 {
                self.leading_zeros()
            }

            #[inline]
            fn as_u8(self) -> u8 {
                self as u8
            }
        }
    };
}
impl_uint!(u8);
impl_uint!(u16);
impl_uint!(u32);
impl_uint!(u64);
impl_uint!(u128);

/// A trait for signed integers that can be converted to and from unsigned integers of the
/// equivalent size.
///
/// When converted to unsigned integers, the encoding is done using ZigZag encoding, which moves the
/// sign bit to the least significant bit (shifting all other bits to the left by one). This allows
/// for more efficient encoding of numbers that are close to zero, even if they are negative.
pub trait SInt<UEq: UInt> {
    /// Converts the signed integer to an unsigned integer using ZigZag encoding.
    fn as_zigzag(&self) -> UEq;

    /// Converts a (ZigZag'ed) unsigned integer back to a signed integer.
    fn un_zigzag(value: UEq) -> Self;
}

// Implements the `SInt` trait for all signed integer types.
macro_rules! impl_sint {
    ($type:ty, $utype:ty) => {
        impl SInt<$utype> for $type {
            #[inline]
            fn as_zigzag(&self) -> $utype {
                let shr = std::mem::size_of::<$utype>() * 8 - 1;
                ((self << 1) ^ (self >> shr)) as $utype
            }
            #[inline]
            fn un_zigzag(value: $utype) -> Self {
                ((value >> 1) as $type) ^ (-((value & 1) as $type))
            }
        }
    };
}
impl_sint!(i8, u8);
impl_sint!(i16, u16);
impl_sint!(i32, u32);
impl_sint!(i64, u64);
impl_sint!(i128, u128);

/// Reasons a byte sequence is not a valid varint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// The sequence ended while the continuation bit was still set. Carries the number of bytes
    /// inspected, so the caller knows how many more it would have needed.
    Truncated(usize),
    /// The sequence sets bits beyond the width of the target type, which includes a continuation
    /// chain longer than [`max_size`] allows.
    Overflow,
}

/// Returns the maximum number of bytes a varint of type `T` can occupy (10 for `u64`).
pub const fn max_size<T: UInt>() -> usize {
    (std::mem::size_of::<T>() * BITS_PER_BYTE).div_ceil(DATA_BITS_PER_BYTE)
}

/// Encodes an unsigned integer as a varint.
pub fn write<T: UInt>(value: T, buf: &mut impl BufMut) {
    let continuation_threshold = T::from(CONTINUATION_BIT_MASK);
    if value < continuation_threshold {
        // Fast path for small values (common case for lengths).
        // `as_u8()` does not truncate the value or leave a continuation bit.
        buf.put_u8(value.as_u8());
        return;
    }

    let mut val = value;
    while val >= continuation_threshold {
        buf.put_u8((val.as_u8()) | CONTINUATION_BIT_MASK);
        val >>= 7;
    }
    buf.put_u8(val.as_u8());
}

/// Decodes an unsigned integer from the front of `bytes`.
///
/// Returns the value and the number of bytes it occupied. Nothing is consumed: the caller decides
/// whether to advance.
pub fn decode<T: UInt>(bytes: &[u8]) -> Result<(T, usize), Malformed> {
    let max_bits = std::mem::size_of::<T>() * BITS_PER_BYTE;
    let mut result: T = T::from(0);
    let mut shift = 0;

    for (index, &byte) in bytes.iter().enumerate() {
        // If this must be the last byte, check for overflow (i.e. set bits beyond the size of T).
        // Because the continuation bit is the most-significant bit, this check also rejects a
        // continuation chain that runs past the maximum width.
        let remaining_bits = max_bits - shift;
        if remaining_bits <= DATA_BITS_PER_BYTE {
            let relevant_bits = BITS_PER_BYTE - byte.leading_zeros() as usize;
            if relevant_bits > remaining_bits {
                return Err(Malformed::Overflow);
            }
        }

        // Write the 7 bits of data to the result.
        result |= T::from(byte & DATA_BITS_MASK) << shift;

        // If the continuation bit is not set, return.
        if byte & CONTINUATION_BIT_MASK == 0 {
            return Ok((result, index + 1));
        }

        // Each byte has 7 bits of data.
        shift += DATA_BITS_PER_BYTE;
    }
    Err(Malformed::Truncated(bytes.len()))
}

/// Calculates the number of bytes needed to encode an unsigned integer as a varint.
pub fn size<T: UInt>(value: T) -> usize {
    let total_bits = std::mem::size_of::<T>() * 8;
    let leading_zeros = value.leading_zeros() as usize;
    let data_bits = total_bits - leading_zeros;
    usize::max(1, data_bits.div_ceil(DATA_BITS_PER_BYTE))
}

/// Encodes a signed integer as a varint using ZigZag encoding.
pub fn write_signed<U: UInt, S: SInt<U>>(value: S, buf: &mut impl BufMut) {
    write(value.as_zigzag(), buf);
}

/// Decodes a ZigZag-encoded signed integer from the front of `bytes`.
pub fn decode_signed<U: UInt, S: SInt<U>>(bytes: &[u8]) -> Result<(S, usize), Malformed> {
    let (value, len) = decode::<U>(bytes)?;
    Ok((S::un_zigzag(value), len))
}

/// Calculates the number of bytes needed to encode a signed integer as a varint.
pub fn size_signed<U: UInt, S: SInt<U>>(value: S) -> usize {
    size(value.as_zigzag())
}

/// An ergonomic wrapper to allow for encoding and decoding of primitive unsigned integers as
/// varints rather than the default fixed-width integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UVar<T: UInt>(pub T);

impl<T: UInt> Write for UVar<T> {
    fn write(&self, encoder: &mut Encoder) {
        encoder.write_var(self.0);
    }
}

impl<T: UInt> Read for UVar<T> {
    type Cfg = ();

    fn read_cfg(decoder: &mut Decoder<'_>, _: &()) -> Result<Self, Error> {
        decoder.read_var::<T>().map(UVar)
    }
}

impl<T: UInt> EncodeSize for UVar<T> {
    fn encode_size(&self) -> usize {
        size(self.0)
    }
}

/// The signed counterpart of [`UVar`], stored with ZigZag encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SVar<S>(pub S);

macro_rules! impl_svar {
    ($type:ty, $utype:ty) => {
        impl Write for SVar<$type> {
            fn write(&self, encoder: &mut Encoder) {
                encoder.write_var_signed::<$utype, $type>(self.0);
            }
        }

        impl Read for SVar<$type> {
            type Cfg = ();

            fn read_cfg(decoder: &mut Decoder<'_>, _: &()) -> Result<Self, Error> {
                decoder.read_var_signed::<$utype, $type>().map(SVar)
            }
        }

        impl EncodeSize for SVar<$type> {
            fn encode_size(&self) -> usize {
                size_signed::<$utype, $type>(self.0)
            }
        }
    };
}
impl_svar!(i16, u16);
impl_svar!(i32, u32);
impl_svar!(i64, u64);
impl_svar!(i128, u128);
