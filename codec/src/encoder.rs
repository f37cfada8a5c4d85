//! Growable writer mirroring every [crate::Decoder] read.

use crate::{
    code::TypeCode,
    varint::{self, SInt, UInt},
};
use bytes::{BufMut, Bytes, BytesMut};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Length prefix written for a `null` string or byte block.
pub const NULL_LENGTH: i32 = -1;

/// Appends encoded values to a [BytesMut].
///
/// Multi-byte fixed-width values are little-endian. Writes never fail; lengths that cannot be
/// represented on the wire panic, as they indicate a caller bug rather than bad input.
#[derive(Debug, Default, Clone)]
pub struct Encoder {
    buf: BytesMut,
}

macro_rules! impl_write_fixed {
    ($($method:ident => $type:ty, $put:ident),* $(,)?) => {
        $(
            #[doc = concat!("Writes a little-endian `", stringify!($type), "`.")]
            #[inline]
            pub fn $method(&mut self, value: $type) {
                self.buf.$put(value);
            }
        )*
    };
}

macro_rules! impl_write_var {
    ($($method:ident => $type:ty),* $(,)?) => {
        $(
            #[doc = concat!("Writes a var-int encoded `", stringify!($type), "`.")]
            #[inline]
            pub fn $method(&mut self, value: $type) {
                self.write_var(value);
            }
        )*
    };
}

macro_rules! impl_write_var_signed {
    ($($method:ident => $type:ty, $utype:ty),* $(,)?) => {
        $(
            #[doc = concat!("Writes a zig-zag var-int encoded `", stringify!($type), "`.")]
            #[inline]
            pub fn $method(&mut self, value: $type) {
                self.write_var_signed::<$utype, $type>(value);
            }
        )*
    };
}

impl Encoder {
    /// Creates an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty encoder with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The bytes written so far.
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Discards everything written, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Mutable access to the underlying buffer, for [BufMut]-based writers.
    pub fn buffer_mut(&mut self) -> &mut BytesMut {
        &mut self.buf
    }

    /// Converts the written bytes into an immutable [Bytes].
    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    /// Returns the underlying buffer.
    pub fn into_inner(self) -> BytesMut {
        self.buf
    }

    // ---------- Fixed-width ----------

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    /// Writes a single signed byte.
    #[inline]
    pub fn write_i8(&mut self, value: i8) {
        self.buf.put_i8(value);
    }

    /// Writes a boolean as `0` or `1`.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.buf.put_u8(u8::from(value));
    }

    impl_write_fixed!(
        write_u16 => u16, put_u16_le,
        write_i16 => i16, put_i16_le,
        write_u32 => u32, put_u32_le,
        write_i32 => i32, put_i32_le,
        write_u64 => u64, put_u64_le,
        write_i64 => i64, put_i64_le,
        write_u128 => u128, put_u128_le,
        write_i128 => i128, put_i128_le,
        write_f32 => f32, put_f32_le,
        write_f64 => f64, put_f64_le,
    );

    /// Writes a UTF-16 code unit.
    #[inline]
    pub fn write_char(&mut self, value: u16) {
        self.write_u16(value);
    }

    /// Writes a 128-bit decimal in its 16-byte serialized form.
    pub fn write_decimal(&mut self, value: Decimal) {
        self.buf.put_slice(&value.serialize());
    }

    /// Writes a GUID in mixed-endian field order.
    pub fn write_guid(&mut self, value: Uuid) {
        self.buf.put_slice(&value.to_bytes_le());
    }

    // ---------- Var-ints ----------

    /// Writes an unsigned var-int of width `T`.
    #[inline]
    pub fn write_var<T: UInt>(&mut self, value: T) {
        varint::write(value, &mut self.buf);
    }

    /// Writes a zig-zag encoded signed var-int.
    #[inline]
    pub fn write_var_signed<U: UInt, S: SInt<U>>(&mut self, value: S) {
        varint::write_signed(value, &mut self.buf);
    }

    impl_write_var!(
        write_var_u16 => u16,
        write_var_u32 => u32,
        write_var_u64 => u64,
        write_var_u128 => u128,
    );

    impl_write_var_signed!(
        write_var_i16 => i16, u16,
        write_var_i32 => i32, u32,
        write_var_i64 => i64, u64,
        write_var_i128 => i128, u128,
    );

    // ---------- Length-prefixed ----------

    /// Writes a signed var-int length prefix, or the `null` sentinel for `None`.
    ///
    /// Panics if `length` does not fit in an `i32`.
    pub fn write_length(&mut self, length: Option<usize>) {
        let raw = match length {
            Some(length) => i32::try_from(length).expect("length does not fit in i32"),
            None => NULL_LENGTH,
        };
        self.write_var_i32(raw);
    }

    /// Writes a length-prefixed UTF-8 string. The prefix counts bytes, not characters.
    pub fn write_str(&mut self, value: Option<&str>) {
        self.write_bytes(value.map(str::as_bytes));
    }

    /// Writes a length-prefixed byte block.
    pub fn write_bytes(&mut self, value: Option<&[u8]>) {
        self.write_length(value.map(<[u8]>::len));
        if let Some(bytes) = value {
            self.buf.put_slice(bytes);
        }
    }

    /// Writes bytes with no prefix.
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.put_slice(bytes);
    }

    // ---------- Tags ----------

    /// Writes a type tag.
    #[inline]
    pub fn write_type_code(&mut self, code: TypeCode) {
        self.buf.put_u8(code as u8);
    }

    /// Writes the [TypeCode::Null] marker.
    pub fn write_null(&mut self) {
        self.write_type_code(TypeCode::Null);
    }

    /// Writes a back-reference to an already written object.
    pub fn write_reference(&mut self, id: u32) {
        self.write_type_code(TypeCode::Reference);
        self.write_var_u32(id);
    }

    /// Writes a back-reference to an already written string.
    pub fn write_interned(&mut self, id: u32) {
        self.write_type_code(TypeCode::InternedString);
        self.write_var_u32(id);
    }
}

/// Encoded size of a length prefix, matching [Encoder::write_length].
pub fn length_size(length: Option<usize>) -> usize {
    let raw = match length {
        Some(length) => i32::try_from(length).expect("length does not fit in i32"),
        None => NULL_LENGTH,
    };
    varint::size_signed::<u32, i32>(raw)
}
