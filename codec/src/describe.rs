//! Structural descriptions of standard Rust types.

use crate::registry::{CollectionShape, Primitive, TupleKind, TypeDesc};
use bytes::Bytes;
use paste::paste;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap, HashMap, HashSet, LinkedList, VecDeque};
use uuid::Uuid;

/// Types that can describe their own structure.
///
/// User composites implement this by listing their fields, which keeps member enumeration
/// explicit and resolvable at compile time.
pub trait Described {
    fn describe() -> TypeDesc;
}

macro_rules! impl_described_primitive {
    ($($type:ty => $primitive:ident),* $(,)?) => {
        $(
            impl Described for $type {
                fn describe() -> TypeDesc {
                    TypeDesc::Primitive(Primitive::$primitive)
                }
            }
        )*
    };
}

impl_described_primitive!(
    bool => Bool,
    i8 => I8,
    u8 => U8,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    i128 => I128,
    u128 => U128,
    f32 => F32,
    f64 => F64,
    Decimal => Decimal,
    Uuid => Guid,
    String => String,
    Bytes => Bytes,
);

impl<T: Described> Described for Option<T> {
    fn describe() -> TypeDesc {
        TypeDesc::nullable(T::describe())
    }
}

impl<T: Described, const N: usize> Described for [T; N] {
    fn describe() -> TypeDesc {
        TypeDesc::array(T::describe(), 1)
    }
}

macro_rules! impl_described_collection {
    ($($type:ident<$($param:ident),+> => $shape:ident),* $(,)?) => {
        $(
            impl<$($param: Described),+> Described for $type<$($param),+> {
                fn describe() -> TypeDesc {
                    TypeDesc::collection(
                        CollectionShape::$shape,
                        vec![$($param::describe()),+],
                    )
                }
            }
        )*
    };
}

impl_described_collection!(
    Vec<T> => List,
    VecDeque<T> => Queue,
    BinaryHeap<T> => Queue,
    LinkedList<T> => LinkedList,
    HashSet<T> => HashSet,
    BTreeSet<T> => SortedSet,
    HashMap<K, V> => Dictionary,
    BTreeMap<K, V> => SortedDictionary,
);

macro_rules! impl_described_tuple {
    ($($index:literal),*) => {
        paste! {
            impl<$( [<T $index>]: Described ),*> Described for ( $( [<T $index>], )* ) {
                fn describe() -> TypeDesc {
                    TypeDesc::Tuple {
                        kind: TupleKind::Value,
                        elements: vec![$( [<T $index>]::describe() ),*],
                    }
                }
            }
        }
    };
}

impl_described_tuple!(0);
impl_described_tuple!(0, 1);
impl_described_tuple!(0, 1, 2);
impl_described_tuple!(0, 1, 2, 3);
impl_described_tuple!(0, 1, 2, 3, 4);
impl_described_tuple!(0, 1, 2, 3, 4, 5);
impl_described_tuple!(0, 1, 2, 3, 4, 5, 6);
impl_described_tuple!(0, 1, 2, 3, 4, 5, 6, 7);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        code::TypeCode,
        registry::{code_of, is_unmanaged, FieldDesc},
    };

    fn code<T: Described>() -> TypeCode {
        code_of(&T::describe())
    }

    #[test]
    fn test_standard_types() {
        assert_eq!(code::<i32>(), TypeCode::Int32);
        assert_eq!(code::<Uuid>(), TypeCode::Guid);
        assert_eq!(code::<Bytes>(), TypeCode::ByteArray);
        assert_eq!(code::<Option<u8>>(), TypeCode::Nullable);
        assert_eq!(code::<[u16; 4]>(), TypeCode::Array);
        assert_eq!(code::<Vec<String>>(), TypeCode::List);
        assert_eq!(code::<VecDeque<u8>>(), TypeCode::Queue);
        assert_eq!(code::<BinaryHeap<u8>>(), TypeCode::Queue);
        assert_eq!(code::<HashMap<String, i64>>(), TypeCode::Dictionary);
        assert_eq!(code::<BTreeMap<String, i64>>(), TypeCode::SortedDictionary);
        assert_eq!(code::<BTreeSet<u32>>(), TypeCode::SortedSet);
        assert_eq!(code::<(u8, String)>(), TypeCode::ValueTuple);
    }

    #[test]
    fn test_collection_arguments() {
        assert_eq!(
            HashMap::<String, Vec<u8>>::describe(),
            TypeDesc::collection(
                CollectionShape::Dictionary,
                vec![
                    String::describe(),
                    TypeDesc::collection(CollectionShape::List, vec![u8::describe()]),
                ],
            )
        );
    }

    struct Sample {
        _id: Uuid,
        _weights: (f32, f64),
    }

    impl Described for Sample {
        fn describe() -> TypeDesc {
            TypeDesc::structure(
                "Sample",
                vec![
                    FieldDesc::new("id", Uuid::describe()),
                    FieldDesc::new("weights", <(f32, f64)>::describe()),
                ],
            )
        }
    }

    #[test]
    fn test_user_composite() {
        assert_eq!(code::<Sample>(), TypeCode::Struct);
        assert!(is_unmanaged(&Sample::describe()));
        assert!(!is_unmanaged(&Option::<String>::describe()));
    }
}
