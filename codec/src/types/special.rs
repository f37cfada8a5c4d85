//! Codec implementations for GUIDs and 128-bit decimals.

use crate::{Decoder, Encoder, Error, FixedSize, Read, Write};
use rust_decimal::Decimal;
use uuid::Uuid;

impl Write for Uuid {
    #[inline]
    fn write(&self, encoder: &mut Encoder) {
        encoder.write_guid(*self);
    }
}

impl Read for Uuid {
    type Cfg = ();

    #[inline]
    fn read_cfg(decoder: &mut Decoder<'_>, _: &()) -> Result<Self, Error> {
        decoder.read_guid()
    }
}

impl FixedSize for Uuid {
    const SIZE: usize = 16;
}

impl Write for Decimal {
    #[inline]
    fn write(&self, encoder: &mut Encoder) {
        encoder.write_decimal(*self);
    }
}

impl Read for Decimal {
    type Cfg = ();

    #[inline]
    fn read_cfg(decoder: &mut Decoder<'_>, _: &()) -> Result<Self, Error> {
        decoder.read_decimal()
    }
}

impl FixedSize for Decimal {
    const SIZE: usize = 16;
}
