//! Codec implementations for tuples.

use crate::{Decoder, EncodeSize, Encoder, Error, Read, Write};
use paste::paste;

// Each element is read with its own configuration.
macro_rules! impl_codec_for_tuple {
    ($($index:literal),*) => {
        paste! {
            impl<$( [<T $index>]: EncodeSize ),*> EncodeSize for ( $( [<T $index>], )* ) {
                #[inline]
                fn encode_size(&self) -> usize {
                    0 $( + self.$index.encode_size() )*
                }
            }

            impl<$( [<T $index>]: Write ),*> Write for ( $( [<T $index>], )* ) {
                #[inline]
                fn write(&self, encoder: &mut Encoder) {
                    $( self.$index.write(encoder); )*
                }
            }

            impl<$( [<T $index>]: Read ),*> Read for ( $( [<T $index>], )* ) {
                type Cfg = ( $( [<T $index>]::Cfg, )* );

                #[inline]
                fn read_cfg(decoder: &mut Decoder<'_>, cfg: &Self::Cfg) -> Result<Self, Error> {
                    Ok(( $( [<T $index>]::read_cfg(decoder, &cfg.$index)?, )* ))
                }
            }
        }
    };
}

impl_codec_for_tuple!(0);
impl_codec_for_tuple!(0, 1);
impl_codec_for_tuple!(0, 1, 2);
impl_codec_for_tuple!(0, 1, 2, 3);
impl_codec_for_tuple!(0, 1, 2, 3, 4);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_codec_for_tuple!(0, 1, 2, 3, 4, 5, 6, 7);

#[cfg(test)]
mod tests {
    use crate::{Decode, Encode, RangeCfg};

    #[test]
    fn test_tuple() {
        let tuple_values = [(1u16, None), (1u16, Some(2u32))];
        for value in tuple_values {
            let encoded = value.encode();
            let decoded = <(u16, Option<u32>)>::decode_cfg(&encoded, &((), ())).unwrap();
            assert_eq!(value, decoded);
        }
    }

    #[test]
    fn test_mixed_configs() {
        let value = (7u8, "seven".to_string(), true);
        let encoded = value.encode();
        let cfg = ((), RangeCfg::at_most(8), ());
        assert_eq!(<(u8, String, bool)>::decode_cfg(&encoded, &cfg).unwrap(), value);
    }
}
