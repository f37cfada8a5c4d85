//! Resolution between type descriptions and wire tags.
//!
//! Types are described explicitly with [TypeDesc] (see [crate::Described] for the descriptions of
//! standard Rust types). [code_of] walks a fixed priority chain of rules and the first rule that
//! matches decides the tag; the last rule matches every composite, so every description yields
//! exactly one tag.

use crate::{code::TypeCode, Error};

/// Concrete types with a statically registered tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Bool,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    I128,
    U128,
    F32,
    F64,
    Decimal,
    /// A UTF-16 code unit.
    Char,
    Guid,
    String,
    Bytes,
}

impl Primitive {
    /// The tag registered for this type.
    pub const fn code(self) -> TypeCode {
        match self {
            Primitive::Bool => TypeCode::Boolean,
            Primitive::I8 => TypeCode::SByte,
            Primitive::U8 => TypeCode::Byte,
            Primitive::I16 => TypeCode::Int16,
            Primitive::U16 => TypeCode::UInt16,
            Primitive::I32 => TypeCode::Int32,
            Primitive::U32 => TypeCode::UInt32,
            Primitive::I64 => TypeCode::Int64,
            Primitive::U64 => TypeCode::UInt64,
            Primitive::I128 => TypeCode::Int128,
            Primitive::U128 => TypeCode::UInt128,
            Primitive::F32 => TypeCode::Single,
            Primitive::F64 => TypeCode::Double,
            Primitive::Decimal => TypeCode::Decimal,
            Primitive::Char => TypeCode::Char,
            Primitive::Guid => TypeCode::Guid,
            Primitive::String => TypeCode::String,
            Primitive::Bytes => TypeCode::ByteArray,
        }
    }

    /// The type registered for a tag, if the tag names a concrete type.
    pub const fn from_code(code: TypeCode) -> Option<Self> {
        Some(match code {
            TypeCode::Boolean => Primitive::Bool,
            TypeCode::SByte => Primitive::I8,
            TypeCode::Byte => Primitive::U8,
            TypeCode::Int16 => Primitive::I16,
            TypeCode::UInt16 => Primitive::U16,
            TypeCode::Int32 => Primitive::I32,
            TypeCode::UInt32 => Primitive::U32,
            TypeCode::Int64 => Primitive::I64,
            TypeCode::UInt64 => Primitive::U64,
            TypeCode::Int128 => Primitive::I128,
            TypeCode::UInt128 => Primitive::U128,
            TypeCode::Single => Primitive::F32,
            TypeCode::Double => Primitive::F64,
            TypeCode::Decimal => Primitive::Decimal,
            TypeCode::Char => Primitive::Char,
            TypeCode::Guid => Primitive::Guid,
            TypeCode::String => Primitive::String,
            TypeCode::ByteArray => Primitive::Bytes,
            _ => return None,
        })
    }

    /// Whether values of this type are a fixed run of bytes with no indirection.
    pub const fn is_blittable(self) -> bool {
        !matches!(self, Primitive::String | Primitive::Bytes)
    }

    /// Whether this type may back an enumeration.
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Primitive::I8
                | Primitive::U8
                | Primitive::I16
                | Primitive::U16
                | Primitive::I32
                | Primitive::U32
                | Primitive::I64
                | Primitive::U64
        )
    }
}

/// Generic collection shapes, matched by shape rather than element type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CollectionShape {
    List,
    Dictionary,
    HashSet,
    Queue,
    Stack,
    LinkedList,
    SortedDictionary,
    SortedSet,
    SortedList,
}

impl CollectionShape {
    /// The shape tag for this collection.
    pub const fn code(self) -> TypeCode {
        match self {
            CollectionShape::List => TypeCode::List,
            CollectionShape::Dictionary => TypeCode::Dictionary,
            CollectionShape::HashSet => TypeCode::HashSet,
            CollectionShape::Queue => TypeCode::Queue,
            CollectionShape::Stack => TypeCode::Stack,
            CollectionShape::LinkedList => TypeCode::LinkedList,
            CollectionShape::SortedDictionary => TypeCode::SortedDictionary,
            CollectionShape::SortedSet => TypeCode::SortedSet,
            CollectionShape::SortedList => TypeCode::SortedList,
        }
    }
}

/// Whether a tuple is shared by reference or copied by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TupleKind {
    Reference,
    Value,
}

/// Whether a composite is shared by reference or copied by value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompositeKind {
    Class,
    Struct,
}

/// A named member of a composite.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldDesc {
    pub name: String,
    pub ty: TypeDesc,
}

impl FieldDesc {
    pub fn new(name: impl Into<String>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Structural description of a runtime type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDesc {
    Primitive(Primitive),
    Nullable(Box<TypeDesc>),
    Enum {
        name: String,
        underlying: Primitive,
    },
    Array {
        element: Box<TypeDesc>,
        rank: u8,
    },
    Collection {
        shape: CollectionShape,
        arguments: Vec<TypeDesc>,
    },
    Tuple {
        kind: TupleKind,
        elements: Vec<TypeDesc>,
    },
    Composite {
        name: String,
        kind: CompositeKind,
        fields: Vec<FieldDesc>,
    },
}

impl TypeDesc {
    pub fn nullable(inner: TypeDesc) -> Self {
        TypeDesc::Nullable(Box::new(inner))
    }

    pub fn array(element: TypeDesc, rank: u8) -> Self {
        TypeDesc::Array {
            element: Box::new(element),
            rank,
        }
    }

    pub fn collection(shape: CollectionShape, arguments: Vec<TypeDesc>) -> Self {
        TypeDesc::Collection { shape, arguments }
    }

    /// Describes an enumeration, failing unless `underlying` is an integer type.
    pub fn enumeration(name: impl Into<String>, underlying: Primitive) -> Result<Self, Error> {
        if !underlying.is_integer() {
            return Err(Error::InvalidEnum(underlying));
        }
        Ok(TypeDesc::Enum {
            name: name.into(),
            underlying,
        })
    }

    pub fn class(name: impl Into<String>, fields: Vec<FieldDesc>) -> Self {
        TypeDesc::Composite {
            name: name.into(),
            kind: CompositeKind::Class,
            fields,
        }
    }

    pub fn structure(name: impl Into<String>, fields: Vec<FieldDesc>) -> Self {
        TypeDesc::Composite {
            name: name.into(),
            kind: CompositeKind::Struct,
            fields,
        }
    }
}

type Rule = fn(&TypeDesc) -> Option<TypeCode>;

/// Resolution rules, highest priority first.
const RULES: &[Rule] = &[
    primitive_rule,
    nullable_rule,
    enum_rule,
    array_rule,
    shape_rule,
];

fn primitive_rule(desc: &TypeDesc) -> Option<TypeCode> {
    match desc {
        TypeDesc::Primitive(primitive) => Some(primitive.code()),
        _ => None,
    }
}

fn nullable_rule(desc: &TypeDesc) -> Option<TypeCode> {
    matches!(desc, TypeDesc::Nullable(_)).then_some(TypeCode::Nullable)
}

fn enum_rule(desc: &TypeDesc) -> Option<TypeCode> {
    matches!(desc, TypeDesc::Enum { .. }).then_some(TypeCode::Enum)
}

fn array_rule(desc: &TypeDesc) -> Option<TypeCode> {
    match desc {
        TypeDesc::Array { rank: 0 | 1, .. } => Some(TypeCode::Array),
        TypeDesc::Array { .. } => Some(TypeCode::MultiArray),
        _ => None,
    }
}

fn shape_rule(desc: &TypeDesc) -> Option<TypeCode> {
    match desc {
        TypeDesc::Collection { shape, .. } => Some(shape.code()),
        TypeDesc::Tuple {
            kind: TupleKind::Reference,
            ..
        } => Some(TypeCode::Tuple),
        TypeDesc::Tuple {
            kind: TupleKind::Value,
            ..
        } => Some(TypeCode::ValueTuple),
        _ => None,
    }
}

fn composite_fallback(desc: &TypeDesc) -> TypeCode {
    match desc {
        TypeDesc::Composite {
            kind: CompositeKind::Struct,
            ..
        } => TypeCode::Struct,
        _ => TypeCode::Object,
    }
}

/// Returns the wire tag for a type.
pub fn code_of(desc: &TypeDesc) -> TypeCode {
    RULES
        .iter()
        .find_map(|rule| rule(desc))
        .unwrap_or_else(|| composite_fallback(desc))
}

/// Returns the type registered for a tag.
///
/// Only concrete tags map back to a single type; shapes and markers return `None`.
pub fn type_of(code: TypeCode) -> Option<TypeDesc> {
    Primitive::from_code(code).map(TypeDesc::Primitive)
}

/// Whether a type resolves to a concrete registered tag rather than a shape.
pub fn is_known_type(desc: &TypeDesc) -> bool {
    code_of(desc).is_concrete()
}

/// Payload width for fixed-width tags.
pub fn fixed_size_of(code: TypeCode) -> Option<usize> {
    code.fixed_size()
}

/// Whether values of a type can be copied as a raw byte block.
///
/// Holds for blittable primitives, enums, and value types (structs, value tuples and nullables)
/// whose every member is itself unmanaged.
pub fn is_unmanaged(desc: &TypeDesc) -> bool {
    match desc {
        TypeDesc::Primitive(primitive) => primitive.is_blittable(),
        TypeDesc::Enum { .. } => true,
        TypeDesc::Nullable(inner) => is_unmanaged(inner),
        TypeDesc::Tuple {
            kind: TupleKind::Value,
            elements,
        } => elements.iter().all(is_unmanaged),
        TypeDesc::Composite {
            kind: CompositeKind::Struct,
            fields,
            ..
        } => fields.iter().all(|field| is_unmanaged(&field.ty)),
        TypeDesc::Tuple {
            kind: TupleKind::Reference,
            ..
        }
        | TypeDesc::Array { .. }
        | TypeDesc::Collection { .. }
        | TypeDesc::Composite {
            kind: CompositeKind::Class,
            ..
        } => false,
    }
}
