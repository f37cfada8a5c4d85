//! Codec implementations for Rust primitive types.
//!
//! # Fixed-size vs Variable-size
//!
//! Integers, floats and `bool` have a compile-time constant `SIZE` and are written little-endian.
//! `usize` has no impl: lengths go through [Encoder::write_length] and [Decoder::read_length],
//! which bound them with a [RangeCfg](crate::RangeCfg).

use crate::{Decoder, EncodeSize, Encoder, Error, FixedSize, Read, Write};

macro_rules! impl_numeric {
    ($type:ty, $read_method:ident, $write_method:ident) => {
        impl Write for $type {
            #[inline]
            fn write(&self, encoder: &mut Encoder) {
                encoder.$write_method(*self);
            }
        }

        impl Read for $type {
            type Cfg = ();

            #[inline]
            fn read_cfg(decoder: &mut Decoder<'_>, _: &()) -> Result<Self, Error> {
                decoder.$read_method()
            }
        }

        impl FixedSize for $type {
            const SIZE: usize = std::mem::size_of::<$type>();
        }
    };
}

impl_numeric!(u8, read_u8, write_u8);
impl_numeric!(u16, read_u16, write_u16);
impl_numeric!(u32, read_u32, write_u32);
impl_numeric!(u64, read_u64, write_u64);
impl_numeric!(u128, read_u128, write_u128);
impl_numeric!(i8, read_i8, write_i8);
impl_numeric!(i16, read_i16, write_i16);
impl_numeric!(i32, read_i32, write_i32);
impl_numeric!(i64, read_i64, write_i64);
impl_numeric!(i128, read_i128, write_i128);
impl_numeric!(f32, read_f32, write_f32);
impl_numeric!(f64, read_f64, write_f64);
impl_numeric!(bool, read_bool, write_bool);

impl<T: Write, const N: usize> Write for [T; N] {
    #[inline]
    fn write(&self, encoder: &mut Encoder) {
        for item in self {
            item.write(encoder);
        }
    }
}

impl<T: Read, const N: usize> Read for [T; N] {
    type Cfg = T::Cfg;

    fn read_cfg(decoder: &mut Decoder<'_>, cfg: &Self::Cfg) -> Result<Self, Error> {
        let position = decoder.position();
        let mut items = Vec::with_capacity(N);
        for _ in 0..N {
            items.push(T::read_cfg(decoder, cfg)?);
        }
        items.try_into().map_err(|items: Vec<T>| Error::InvalidLength {
            position,
            length: items.len(),
        })
    }
}

impl<T: FixedSize, const N: usize> FixedSize for [T; N] {
    const SIZE: usize = T::SIZE * N;
}

// Option implementation
impl<T: Write> Write for Option<T> {
    #[inline]
    fn write(&self, encoder: &mut Encoder) {
        encoder.write_bool(self.is_some());
        if let Some(inner) = self {
            inner.write(encoder);
        }
    }
}

impl<T: EncodeSize> EncodeSize for Option<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        match self {
            Some(inner) => 1 + inner.encode_size(),
            None => 1,
        }
    }
}

impl<T: Read> Read for Option<T> {
    type Cfg = T::Cfg;

    #[inline]
    fn read_cfg(decoder: &mut Decoder<'_>, cfg: &Self::Cfg) -> Result<Self, Error> {
        if decoder.read_bool()? {
            Ok(Some(T::read_cfg(decoder, cfg)?))
        } else {
            Ok(None)
        }
    }
}
