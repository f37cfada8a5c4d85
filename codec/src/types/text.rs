//! Codec implementations for strings and byte blocks.
//!
//! Both are prefixed with a signed var-int byte count. The negative `null` sentinel is rejected
//! here; callers that need a nullable payload use [crate::Decoder::read_str] directly or wrap the
//! value in an [Option].

use crate::{encoder::length_size, Decoder, EncodeSize, Encoder, Error, RangeCfg, Read, Write};
use bytes::Bytes;

impl Write for String {
    #[inline]
    fn write(&self, encoder: &mut Encoder) {
        encoder.write_str(Some(self));
    }
}

impl EncodeSize for String {
    #[inline]
    fn encode_size(&self) -> usize {
        length_size(Some(self.len())) + self.len()
    }
}

impl Read for String {
    type Cfg = RangeCfg<usize>;

    fn read_cfg(decoder: &mut Decoder<'_>, range: &Self::Cfg) -> Result<Self, Error> {
        let position = decoder.position();
        match decoder.read_str_cfg(range)? {
            Some(value) => Ok(value.to_owned()),
            None => {
                decoder.seek(position)?;
                Err(Error::InvalidFormat {
                    position,
                    reason: "unexpected null string",
                })
            }
        }
    }
}

impl Write for Bytes {
    #[inline]
    fn write(&self, encoder: &mut Encoder) {
        encoder.write_bytes(Some(self));
    }
}

impl EncodeSize for Bytes {
    #[inline]
    fn encode_size(&self) -> usize {
        length_size(Some(self.len())) + self.len()
    }
}

impl Read for Bytes {
    type Cfg = RangeCfg<usize>;

    fn read_cfg(decoder: &mut Decoder<'_>, range: &Self::Cfg) -> Result<Self, Error> {
        let position = decoder.position();
        match decoder.read_bytes_cfg(range)? {
            Some(value) => Ok(Bytes::copy_from_slice(value)),
            None => {
                decoder.seek(position)?;
                Err(Error::InvalidFormat {
                    position,
                    reason: "unexpected null bytes",
                })
            }
        }
    }
}
