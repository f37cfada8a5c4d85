//! Bounds-checked cursor over an encoded byte view.
//!
//! Every read checks that the requested bytes exist before touching them and
//! leaves the cursor where it was when it fails.

use crate::{
    code::TypeCode,
    varint::{self, Malformed, SInt, UInt},
    Error, RangeCfg,
};
use bytes::Buf;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Maximum scale a serialized [Decimal] may carry.
const DECIMAL_MAX_SCALE: u8 = 28;

/// Reads values from a borrowed byte slice, advancing a position as it goes.
///
/// Multi-byte fixed-width values are little-endian.
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    position: usize,
}

macro_rules! impl_read_fixed {
    ($($method:ident => $type:ty),* $(,)?) => {
        $(
            #[doc = concat!("Reads a little-endian `", stringify!($type), "`.")]
            #[inline]
            pub fn $method(&mut self) -> Result<$type, Error> {
                let bytes = self.take_array::<{ std::mem::size_of::<$type>() }>()?;
                Ok(<$type>::from_le_bytes(bytes))
            }
        )*
    };
}

macro_rules! impl_read_var {
    ($($method:ident => $type:ty),* $(,)?) => {
        $(
            #[doc = concat!("Reads a var-int encoded `", stringify!($type), "`.")]
            #[inline]
            pub fn $method(&mut self) -> Result<$type, Error> {
                self.read_var::<$type>()
            }
        )*
    };
}

macro_rules! impl_read_var_signed {
    ($($method:ident => $type:ty, $utype:ty),* $(,)?) => {
        $(
            #[doc = concat!("Reads a zig-zag var-int encoded `", stringify!($type), "`.")]
            #[inline]
            pub fn $method(&mut self) -> Result<$type, Error> {
                self.read_var_signed::<$utype, $type>()
            }
        )*
    };
}

impl<'a> Decoder<'a> {
    /// Creates a decoder positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Creates a decoder positioned at `position`.
    ///
    /// Fails with [Error::OutOfBounds] if `position` is past the end of `data`.
    pub fn at(data: &'a [u8], position: usize) -> Result<Self, Error> {
        let mut decoder = Self::new(data);
        decoder.seek(position)?;
        Ok(decoder)
    }

    /// Current offset into the underlying data.
    #[inline]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to read.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// Whether every byte has been consumed.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.position == self.data.len()
    }

    /// Total length of the underlying data.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the underlying data is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the current position so it can later be restored with [Self::seek].
    #[inline]
    pub fn checkpoint(&self) -> usize {
        self.position
    }

    /// Moves the cursor to an absolute position.
    pub fn seek(&mut self, position: usize) -> Result<(), Error> {
        if position > self.data.len() {
            return Err(Error::OutOfBounds {
                position: self.position,
                requested: position - self.position,
                remaining: self.remaining(),
            });
        }
        self.position = position;
        Ok(())
    }

    /// Advances the cursor by `n` bytes without reading them.
    pub fn skip(&mut self, n: usize) -> Result<(), Error> {
        self.ensure(n)?;
        self.position += n;
        Ok(())
    }

    /// Runs `f`, rewinding to the starting position if it fails.
    pub fn atomically<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let checkpoint = self.position;
        let result = f(self);
        if result.is_err() {
            self.position = checkpoint;
        }
        result
    }

    #[inline]
    fn ensure(&self, requested: usize) -> Result<(), Error> {
        let remaining = self.remaining();
        if requested > remaining {
            return Err(Error::OutOfBounds {
                position: self.position,
                requested,
                remaining,
            });
        }
        Ok(())
    }

    #[inline]
    fn take(&mut self, n: usize) -> Result<&'a [u8], Error> {
        self.ensure(n)?;
        let start = self.position;
        self.position += n;
        Ok(&self.data[start..start + n])
    }

    #[inline]
    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        let bytes = self.take(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    // ---------- Peeks ----------

    /// Returns the next byte without advancing.
    pub fn peek_byte(&self) -> Result<u8, Error> {
        self.ensure(1)?;
        Ok(self.data[self.position])
    }

    /// Returns the next `n` bytes without advancing.
    pub fn peek(&self, n: usize) -> Result<&'a [u8], Error> {
        self.ensure(n)?;
        Ok(&self.data[self.position..self.position + n])
    }

    /// Returns the next type tag without advancing.
    pub fn peek_type_code(&self) -> Result<TypeCode, Error> {
        let code = self.peek_byte()?;
        TypeCode::try_from(code).map_err(|_| Error::UnknownType {
            code,
            position: self.position,
        })
    }

    // ---------- Fixed-width ----------

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> Result<u8, Error> {
        let byte = self.peek_byte()?;
        self.position += 1;
        Ok(byte)
    }

    /// Reads a single signed byte.
    #[inline]
    pub fn read_i8(&mut self) -> Result<i8, Error> {
        self.read_u8().map(|b| b as i8)
    }

    /// Reads a boolean, accepting only `0` and `1`.
    pub fn read_bool(&mut self) -> Result<bool, Error> {
        let position = self.position;
        match self.peek_byte()? {
            0 => {
                self.position += 1;
                Ok(false)
            }
            1 => {
                self.position += 1;
                Ok(true)
            }
            value => Err(Error::InvalidBool { position, value }),
        }
    }

    impl_read_fixed!(
        read_u16 => u16,
        read_i16 => i16,
        read_u32 => u32,
        read_i32 => i32,
        read_u64 => u64,
        read_i64 => i64,
        read_u128 => u128,
        read_i128 => i128,
        read_f32 => f32,
        read_f64 => f64,
    );

    /// Reads a UTF-16 code unit.
    #[inline]
    pub fn read_char(&mut self) -> Result<u16, Error> {
        self.read_u16()
    }

    /// Reads a 128-bit decimal in its 16-byte serialized form.
    pub fn read_decimal(&mut self) -> Result<Decimal, Error> {
        let position = self.position;
        let bytes = self.peek(16)?;
        // Flags word: bytes 0-1 unused, byte 2 scale, byte 3 sign in the high bit.
        if bytes[0] != 0 || bytes[1] != 0 || bytes[3] & 0x7F != 0 {
            return Err(Error::InvalidFormat {
                position,
                reason: "decimal flags",
            });
        }
        if bytes[2] > DECIMAL_MAX_SCALE {
            return Err(Error::InvalidFormat {
                position,
                reason: "decimal scale",
            });
        }
        let bytes = self.take_array::<16>()?;
        Ok(Decimal::deserialize(bytes))
    }

    /// Reads a GUID in mixed-endian field order.
    pub fn read_guid(&mut self) -> Result<Uuid, Error> {
        let bytes = self.take_array::<16>()?;
        Ok(Uuid::from_bytes_le(bytes))
    }

    // ---------- Var-ints ----------

    /// Reads an unsigned var-int of width `T`.
    pub fn read_var<T: UInt>(&mut self) -> Result<T, Error> {
        let position = self.position;
        match varint::decode::<T>(&self.data[position..]) {
            Ok((value, len)) => {
                self.position += len;
                Ok(value)
            }
            Err(Malformed::Truncated(seen)) => Err(Error::OutOfBounds {
                position,
                requested: seen + 1,
                remaining: seen,
            }),
            Err(Malformed::Overflow) => Err(Error::InvalidFormat {
                position,
                reason: "varint overflow",
            }),
        }
    }

    /// Reads a zig-zag encoded signed var-int.
    pub fn read_var_signed<U: UInt, S: SInt<U>>(&mut self) -> Result<S, Error> {
        self.read_var::<U>().map(S::un_zigzag)
    }

    impl_read_var!(
        read_var_u16 => u16,
        read_var_u32 => u32,
        read_var_u64 => u64,
        read_var_u128 => u128,
    );

    impl_read_var_signed!(
        read_var_i16 => i16, u16,
        read_var_i32 => i32, u32,
        read_var_i64 => i64, u64,
        read_var_i128 => i128, u128,
    );

    // ---------- Length-prefixed ----------

    /// Reads a signed var-int length prefix.
    ///
    /// A negative length is the `null` sentinel and yields `None`. Lengths outside `range` fail
    /// with [Error::InvalidLength]. Nothing is consumed on failure.
    pub fn read_length(&mut self, range: &RangeCfg<usize>) -> Result<Option<usize>, Error> {
        self.atomically(|decoder| {
            let position = decoder.position;
            let raw = decoder.read_var_i32()?;
            if raw < 0 {
                return Ok(None);
            }
            let length = raw as usize;
            if !range.contains(&length) {
                return Err(Error::InvalidLength { position, length });
            }
            Ok(Some(length))
        })
    }

    /// Reads a length-prefixed UTF-8 string without copying.
    ///
    /// The cursor advances by the prefix plus the UTF-8 byte count.
    pub fn read_str(&mut self) -> Result<Option<&'a str>, Error> {
        self.read_str_cfg(&RangeCfg::from(..))
    }

    /// Like [Self::read_str], rejecting byte lengths outside `range`.
    pub fn read_str_cfg(&mut self, range: &RangeCfg<usize>) -> Result<Option<&'a str>, Error> {
        self.atomically(|decoder| {
            let Some(length) = decoder.read_length(range)? else {
                return Ok(None);
            };
            let position = decoder.position;
            let bytes = decoder.take(length)?;
            std::str::from_utf8(bytes)
                .map(Some)
                .map_err(|_| Error::InvalidFormat {
                    position,
                    reason: "invalid utf-8",
                })
        })
    }

    /// Reads a length-prefixed UTF-8 string into an owned [String].
    pub fn read_string(&mut self) -> Result<Option<String>, Error> {
        self.read_str().map(|s| s.map(str::to_owned))
    }

    /// Reads a length-prefixed byte block without copying.
    pub fn read_bytes(&mut self) -> Result<Option<&'a [u8]>, Error> {
        self.read_bytes_cfg(&RangeCfg::from(..))
    }

    /// Like [Self::read_bytes], rejecting lengths outside `range`.
    pub fn read_bytes_cfg(&mut self, range: &RangeCfg<usize>) -> Result<Option<&'a [u8]>, Error> {
        self.atomically(|decoder| match decoder.read_length(range)? {
            Some(length) => decoder.take(length).map(Some),
            None => Ok(None),
        })
    }

    /// Reads exactly `n` unprefixed bytes without copying.
    pub fn read_raw(&mut self, n: usize) -> Result<&'a [u8], Error> {
        self.take(n)
    }

    /// Fills `dst` with the next `dst.len()` bytes.
    pub fn read_bytes_into(&mut self, dst: &mut [u8]) -> Result<(), Error> {
        let bytes = self.take(dst.len())?;
        dst.copy_from_slice(bytes);
        Ok(())
    }

    // ---------- Tags ----------

    /// Reads a type tag, failing with [Error::UnknownType] for unassigned codes.
    pub fn read_type_code(&mut self) -> Result<TypeCode, Error> {
        let code = self.peek_type_code()?;
        self.position += 1;
        Ok(code)
    }

    /// Reads a type tag and checks it is `expected`.
    pub fn expect_type_code(&mut self, expected: TypeCode) -> Result<(), Error> {
        let position = self.position;
        let code = self.peek_type_code()?;
        if code != expected {
            return Err(Error::UnknownType {
                code: code as u8,
                position,
            });
        }
        self.position += 1;
        Ok(())
    }
}

impl Buf for Decoder<'_> {
    fn remaining(&self) -> usize {
        Decoder::remaining(self)
    }

    fn chunk(&self) -> &[u8] {
        &self.data[self.position..]
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= Decoder::remaining(self),
            "cannot advance past the end of the decoder"
        );
        self.position += cnt;
    }
}
