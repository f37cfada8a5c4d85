#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessera_codec::{Decoder, Encoder, Error};

#[derive(Arbitrary, Debug)]
enum Op {
    U8,
    U32,
    I64,
    F64,
    Bool,
    Char,
    Decimal,
    Guid,
    VarU32,
    VarI64,
    Str,
    Bytes,
    Raw(u16),
    Skip(u16),
    Seek(u16),
    PeekTypeCode,
    TypeCode,
}

#[derive(Arbitrary, Debug)]
struct Input {
    data: Vec<u8>,
    ops: Vec<Op>,
    unsigned: u64,
    signed: i64,
}

// Reads never panic, never overrun, and leave the cursor untouched on failure.
fn apply(decoder: &mut Decoder<'_>, op: &Op) {
    let before = decoder.position();
    let result: Result<(), Error> = match op {
        Op::U8 => decoder.read_u8().map(drop),
        Op::U32 => decoder.read_u32().map(drop),
        Op::I64 => decoder.read_i64().map(drop),
        Op::F64 => decoder.read_f64().map(drop),
        Op::Bool => decoder.read_bool().map(drop),
        Op::Char => decoder.read_char().map(drop),
        Op::Decimal => decoder.read_decimal().map(drop),
        Op::Guid => decoder.read_guid().map(drop),
        Op::VarU32 => decoder.read_var_u32().map(drop),
        Op::VarI64 => decoder.read_var_i64().map(drop),
        Op::Str => decoder.read_str().map(drop),
        Op::Bytes => decoder.read_bytes().map(drop),
        Op::Raw(n) => decoder.read_raw(*n as usize).map(drop),
        Op::Skip(n) => decoder.skip(*n as usize),
        Op::Seek(n) => decoder.seek(*n as usize),
        Op::PeekTypeCode => {
            let result = decoder.peek_type_code().map(drop);
            assert_eq!(decoder.position(), before);
            result
        }
        Op::TypeCode => decoder.read_type_code().map(drop),
    };
    assert!(decoder.position() <= decoder.len());
    if result.is_err() {
        assert_eq!(decoder.position(), before);
    }
}

fn fuzz(input: Input) {
    let mut decoder = Decoder::new(&input.data);
    for op in &input.ops {
        apply(&mut decoder, op);
    }

    let mut encoder = Encoder::new();
    encoder.write_var_u64(input.unsigned);
    encoder.write_var_i64(input.signed);
    let encoded = encoder.freeze();
    let mut decoder = Decoder::new(&encoded);
    assert_eq!(decoder.read_var_u64().unwrap(), input.unsigned);
    assert_eq!(decoder.read_var_i64().unwrap(), input.signed);
    assert!(decoder.is_end());
}

fuzz_target!(|input: Input| {
    fuzz(input);
});
