//! One-byte wire tags.
//!
//! Codes 1 to 31 name concrete types, codes 32 to 63 name shapes whose element types are encoded
//! separately. `Null` (0) and the codes from 64 are markers that replace a payload.

use std::fmt;

macro_rules! type_codes {
    ($($(#[$doc:meta])* $name:ident = $value:literal => $size:expr),* $(,)?) => {
        /// A wire tag identifying a concrete type, a shape, or a marker.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[repr(u8)]
        pub enum TypeCode {
            $($(#[$doc])* $name = $value,)*
        }

        impl TypeCode {
            /// Every assigned code, in ascending order.
            pub const ALL: &'static [TypeCode] = &[$(TypeCode::$name,)*];

            /// Payload width in bytes for fixed-width codes, `None` when variable.
            pub const fn fixed_size(self) -> Option<usize> {
                match self {
                    $(TypeCode::$name => $size,)*
                }
            }

            /// Name of the code, for diagnostics.
            pub const fn name(self) -> &'static str {
                match self {
                    $(TypeCode::$name => stringify!($name),)*
                }
            }
        }

        impl TryFrom<u8> for TypeCode {
            type Error = u8;

            fn try_from(value: u8) -> Result<Self, u8> {
                match value {
                    $($value => Ok(TypeCode::$name),)*
                    other => Err(other),
                }
            }
        }
    };
}

type_codes! {
    /// Absent value. Carries no payload.
    Null = 0 => Some(0),
    Boolean = 1 => Some(1),
    SByte = 2 => Some(1),
    Byte = 3 => Some(1),
    Int16 = 4 => Some(2),
    UInt16 = 5 => Some(2),
    Int32 = 6 => Some(4),
    UInt32 = 7 => Some(4),
    Int64 = 8 => Some(8),
    UInt64 = 9 => Some(8),
    Int128 = 10 => Some(16),
    UInt128 = 11 => Some(16),
    Single = 12 => Some(4),
    Double = 13 => Some(8),
    Decimal = 14 => Some(16),
    /// A UTF-16 code unit.
    Char = 15 => Some(2),
    Guid = 16 => Some(16),
    String = 17 => None,
    ByteArray = 18 => None,

    /// Optional value. The inner type follows.
    Nullable = 32 => None,
    /// Enumeration. The underlying integer follows.
    Enum = 33 => None,
    /// Single-dimension array.
    Array = 34 => None,
    /// Array with more than one dimension.
    MultiArray = 35 => None,
    List = 36 => None,
    Dictionary = 37 => None,
    HashSet = 38 => None,
    Queue = 39 => None,
    Stack = 40 => None,
    LinkedList = 41 => None,
    SortedDictionary = 42 => None,
    SortedSet = 43 => None,
    SortedList = 44 => None,
    /// Tuple with reference semantics.
    Tuple = 45 => None,
    /// Tuple with value semantics.
    ValueTuple = 46 => None,
    /// Any other reference type.
    Object = 47 => None,
    /// Any other value type.
    Struct = 48 => None,

    /// Back-reference to an already written object. A var-int id follows.
    Reference = 64 => None,
    /// Back-reference to an already written string. A var-int id follows.
    InternedString = 65 => None,
}

const SHAPE_START: u8 = 32;
const MARKER_START: u8 = 64;

impl TypeCode {
    /// Whether the code names a concrete, statically registered type.
    pub const fn is_concrete(self) -> bool {
        let value = self as u8;
        value != TypeCode::Null as u8 && value < SHAPE_START
    }

    /// Whether the code names a shape shared by many closed types.
    pub const fn is_shape(self) -> bool {
        let value = self as u8;
        value >= SHAPE_START && value < MARKER_START
    }

    /// Whether the code replaces a payload with a back-reference or null.
    pub const fn is_marker(self) -> bool {
        matches!(
            self,
            TypeCode::Null | TypeCode::Reference | TypeCode::InternedString
        )
    }
}

impl From<TypeCode> for u8 {
    fn from(code: TypeCode) -> Self {
        code as u8
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:#04x})", self.name(), *self as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_byte_round_trip() {
        for &code in TypeCode::ALL {
            assert_eq!(TypeCode::try_from(u8::from(code)), Ok(code));
        }
        let assigned = TypeCode::ALL.len();
        let rejected = (0..=u8::MAX)
            .filter(|value| TypeCode::try_from(*value).is_err())
            .count();
        assert_eq!(assigned + rejected, 256);
    }

    #[test]
    fn test_codes_are_sorted_and_unique() {
        assert!(TypeCode::ALL.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test_case(TypeCode::Int32 => Some(4))]
    #[test_case(TypeCode::Decimal => Some(16))]
    #[test_case(TypeCode::Char => Some(2))]
    #[test_case(TypeCode::Null => Some(0))]
    #[test_case(TypeCode::String => None)]
    #[test_case(TypeCode::List => None)]
    fn test_fixed_size(code: TypeCode) -> Option<usize> {
        code.fixed_size()
    }

    #[test]
    fn test_categories() {
        assert!(TypeCode::Guid.is_concrete());
        assert!(!TypeCode::Guid.is_shape());
        assert!(TypeCode::Dictionary.is_shape());
        assert!(TypeCode::Struct.is_shape());
        assert!(!TypeCode::Reference.is_shape());
        assert!(TypeCode::Reference.is_marker());
        assert!(TypeCode::Null.is_marker());
        assert!(!TypeCode::Enum.is_marker());
        assert!(!TypeCode::Null.is_concrete());
    }

    #[test]
    fn test_each_code_has_one_category() {
        for &code in TypeCode::ALL {
            let categories = [code.is_concrete(), code.is_shape(), code.is_marker()];
            assert_eq!(categories.iter().filter(|&&hit| hit).count(), 1, "{code}");
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(TypeCode::Int32.to_string(), "Int32 (0x06)");
    }
}
