//! Append-only JSON text output.

use crate::{escape, BufferPool, EscapeMode, Error, NamingPolicy, PooledBuffer};
use rust_decimal::Decimal;
use tracing::trace;

/// Configuration for a [TextBuilder].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuilderOptions {
    /// Applied to every name passed to [TextBuilder::append_property_name].
    pub naming: NamingPolicy,
    /// Escape every non-ASCII character as `\uXXXX`.
    pub force_ascii: bool,
    /// Write non-finite floats as `NaN`, `Infinity` and `-Infinity` instead of failing.
    pub allow_named_floats: bool,
    /// Hard limit on the length of the output, in bytes.
    pub max_capacity: usize,
    /// Capacity of the first buffer.
    pub initial_capacity: usize,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            naming: NamingPolicy::Preserve,
            force_ascii: false,
            allow_named_floats: false,
            max_capacity: 1 << 30,
            initial_capacity: 256,
        }
    }
}

/// A growable buffer of JSON text.
///
/// The builder writes exactly what it is asked to: callers place separators and keep containers
/// balanced. Growth doubles the buffer up to [BuilderOptions::max_capacity]; an append that would
/// pass that limit fails with [Error::CapacityExceeded] and leaves the output untouched.
///
/// # Examples
///
/// ```
/// use tessera_json::{BuilderOptions, NamingPolicy, TextBuilder};
///
/// let options = BuilderOptions {
///     naming: NamingPolicy::CamelCase,
///     ..Default::default()
/// };
/// let mut builder = TextBuilder::new(options);
/// builder.begin_object().unwrap();
/// builder.append_property_name("user_id").unwrap();
/// builder.append_u64(42).unwrap();
/// builder.end_object().unwrap();
/// assert_eq!(builder.finish(), r#"{"userId":42}"#);
/// ```
#[derive(Debug)]
pub struct TextBuilder {
    buf: PooledBuffer,
    pool: Option<BufferPool>,
    options: BuilderOptions,
}

impl TextBuilder {
    /// Creates a builder backed by plain heap buffers.
    pub fn new(options: BuilderOptions) -> Self {
        let initial = options.initial_capacity.min(options.max_capacity);
        Self {
            buf: PooledBuffer::unpooled(initial),
            pool: None,
            options,
        }
    }

    /// Creates a builder that draws its buffers from `pool` and returns them when done.
    pub fn with_pool(options: BuilderOptions, pool: &BufferPool) -> Self {
        let initial = options.initial_capacity.min(options.max_capacity);
        Self {
            buf: pool.acquire(initial),
            pool: Some(pool.clone()),
            options,
        }
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// Length of the output so far, in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Capacity of the current buffer.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Discards the output, keeping the buffer.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// The output so far.
    pub fn as_str(&self) -> &str {
        // SAFETY: every append writes a complete UTF-8 sequence taken from a `&str` or ASCII.
        unsafe { std::str::from_utf8_unchecked(&self.buf) }
    }

    /// Returns the output, releasing the buffer.
    pub fn finish(self) -> String {
        self.as_str().to_owned()
    }

    fn reserve(&mut self, additional: usize) -> Result<(), Error> {
        let max = self.options.max_capacity;
        let required = self.buf.len().saturating_add(additional);
        if required > max {
            return Err(Error::CapacityExceeded {
                requested: required,
                max,
            });
        }
        let capacity = self.buf.capacity();
        if required <= capacity {
            return Ok(());
        }
        let target = capacity.saturating_mul(2).max(required).min(max);
        trace!(old = capacity, new = target, "growing text buffer");
        let mut next = match &self.pool {
            Some(pool) => pool.acquire(target),
            None => PooledBuffer::unpooled(target),
        };
        next.extend_from_slice(&self.buf);
        self.buf = next;
        Ok(())
    }

    /// Appends `text` unchanged.
    pub fn append_raw(&mut self, text: &str) -> Result<(), Error> {
        self.reserve(text.len())?;
        self.buf.extend_from_slice(text.as_bytes());
        Ok(())
    }

    fn append_byte(&mut self, byte: u8) -> Result<(), Error> {
        self.reserve(1)?;
        self.buf.push(byte);
        Ok(())
    }

    pub fn append_null(&mut self) -> Result<(), Error> {
        self.append_raw("null")
    }

    pub fn append_bool(&mut self, value: bool) -> Result<(), Error> {
        self.append_raw(if value { "true" } else { "false" })
    }

    fn escape_mode(&self) -> EscapeMode {
        if self.options.force_ascii {
            EscapeMode::AsciiOnly
        } else {
            EscapeMode::Minimal
        }
    }

    fn append_quoted(&mut self, value: &str, trailer: &str) -> Result<(), Error> {
        let escaped = escape::escape_with(value, self.escape_mode());
        self.reserve(escaped.len() + 2 + trailer.len())?;
        self.buf.push(b'"');
        self.buf.extend_from_slice(escaped.as_bytes());
        self.buf.push(b'"');
        self.buf.extend_from_slice(trailer.as_bytes());
        Ok(())
    }

    /// Appends `value` as a quoted, escaped JSON string.
    pub fn append_string(&mut self, value: &str) -> Result<(), Error> {
        self.append_quoted(value, "")
    }

    /// Appends `"name":`, with `name` transformed by the naming policy.
    pub fn append_property_name(&mut self, name: &str) -> Result<(), Error> {
        let name = self.options.naming.apply(name);
        self.append_quoted(&name, ":")
    }

    pub fn append_i32(&mut self, value: i32) -> Result<(), Error> {
        self.append_raw(itoa::Buffer::new().format(value))
    }

    pub fn append_i64(&mut self, value: i64) -> Result<(), Error> {
        self.append_raw(itoa::Buffer::new().format(value))
    }

    pub fn append_u32(&mut self, value: u32) -> Result<(), Error> {
        self.append_raw(itoa::Buffer::new().format(value))
    }

    pub fn append_u64(&mut self, value: u64) -> Result<(), Error> {
        self.append_raw(itoa::Buffer::new().format(value))
    }

    fn append_named_float(&mut self, is_nan: bool, positive: bool) -> Result<(), Error> {
        if !self.options.allow_named_floats {
            return Err(Error::NonFiniteNumber);
        }
        let text = match (is_nan, positive) {
            (true, _) => "NaN",
            (false, true) => "Infinity",
            (false, false) => "-Infinity",
        };
        self.append_raw(text)
    }

    /// Appends the shortest text that parses back to exactly `value`.
    pub fn append_f32(&mut self, value: f32) -> Result<(), Error> {
        if !value.is_finite() {
            return self.append_named_float(value.is_nan(), value > 0.0);
        }
        self.append_raw(ryu::Buffer::new().format_finite(value))
    }

    /// Appends the shortest text that parses back to exactly `value`.
    pub fn append_f64(&mut self, value: f64) -> Result<(), Error> {
        if !value.is_finite() {
            return self.append_named_float(value.is_nan(), value > 0.0);
        }
        self.append_raw(ryu::Buffer::new().format_finite(value))
    }

    pub fn append_decimal(&mut self, value: Decimal) -> Result<(), Error> {
        self.append_raw(&value.to_string())
    }

    pub fn begin_object(&mut self) -> Result<(), Error> {
        self.append_byte(b'{')
    }

    pub fn end_object(&mut self) -> Result<(), Error> {
        self.append_byte(b'}')
    }

    pub fn begin_array(&mut self) -> Result<(), Error> {
        self.append_byte(b'[')
    }

    pub fn end_array(&mut self) -> Result<(), Error> {
        self.append_byte(b']')
    }

    pub fn append_value_separator(&mut self) -> Result<(), Error> {
        self.append_byte(b',')
    }
}
