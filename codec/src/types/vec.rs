//! Codec implementation for [Vec].
//!
//! The element count is written as a signed var-int, matching the string convention.

use crate::{encoder::length_size, Decoder, EncodeSize, Encoder, Error, RangeCfg, Read, Write};

impl<T: Write> Write for Vec<T> {
    #[inline]
    fn write(&self, encoder: &mut Encoder) {
        encoder.write_length(Some(self.len()));
        for item in self {
            item.write(encoder);
        }
    }
}

impl<T: EncodeSize> EncodeSize for Vec<T> {
    #[inline]
    fn encode_size(&self) -> usize {
        length_size(Some(self.len())) + self.iter().map(EncodeSize::encode_size).sum::<usize>()
    }
}

impl<T: Read> Read for Vec<T> {
    type Cfg = (RangeCfg<usize>, T::Cfg);

    fn read_cfg(decoder: &mut Decoder<'_>, (range, cfg): &Self::Cfg) -> Result<Self, Error> {
        let position = decoder.position();
        let Some(len) = decoder.read_length(range)? else {
            decoder.seek(position)?;
            return Err(Error::InvalidFormat {
                position,
                reason: "unexpected null collection",
            });
        };
        // The prefix is untrusted, so preallocate no more than the input could hold.
        let mut vec = Vec::with_capacity(len.min(decoder.remaining()));
        for _ in 0..len {
            vec.push(T::read_cfg(decoder, cfg)?);
        }
        Ok(vec)
    }
}
