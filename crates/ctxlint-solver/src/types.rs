//! Type representation.
//!
//! Types are interned: structurally equal types share one `TypeId`, so
//! equality is an integer comparison. Named types are the exception; each
//! declaration gets its own identity and its underlying type is filled in
//! after the name exists, which lets recursive types refer to themselves.

use bitflags::bitflags;
use ctxlint_parser::NodeIndex;
use serde::Serialize;

/// Interned type handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TypeId(pub u32);

impl TypeId {
    /// The type of expressions whose type cannot be determined.
    pub const INVALID: TypeId = TypeId(0);

    pub const BOOL: TypeId = TypeId(1);
    pub const INT: TypeId = TypeId(2);
    pub const INT8: TypeId = TypeId(3);
    pub const INT16: TypeId = TypeId(4);
    pub const INT32: TypeId = TypeId(5);
    pub const INT64: TypeId = TypeId(6);
    pub const UINT: TypeId = TypeId(7);
    pub const UINT8: TypeId = TypeId(8);
    pub const UINT16: TypeId = TypeId(9);
    pub const UINT32: TypeId = TypeId(10);
    pub const UINT64: TypeId = TypeId(11);
    pub const UINTPTR: TypeId = TypeId(12);
    pub const FLOAT32: TypeId = TypeId(13);
    pub const FLOAT64: TypeId = TypeId(14);
    pub const COMPLEX64: TypeId = TypeId(15);
    pub const COMPLEX128: TypeId = TypeId(16);
    pub const STRING: TypeId = TypeId(17);

    pub const UNTYPED_BOOL: TypeId = TypeId(18);
    pub const UNTYPED_INT: TypeId = TypeId(19);
    pub const UNTYPED_RUNE: TypeId = TypeId(20);
    pub const UNTYPED_FLOAT: TypeId = TypeId(21);
    pub const UNTYPED_COMPLEX: TypeId = TypeId(22);
    pub const UNTYPED_STRING: TypeId = TypeId(23);
    pub const UNTYPED_NIL: TypeId = TypeId(24);

    /// `byte`, identical to `uint8` but displayed under its own name.
    pub const BYTE: TypeId = TypeId(25);
    /// `rune`, identical to `int32` but displayed under its own name.
    pub const RUNE: TypeId = TypeId(26);

    /// `interface{}` (and `any`).
    pub const EMPTY_INTERFACE: TypeId = TypeId(27);
    /// The result of a call that returns nothing.
    pub const VOID: TypeId = TypeId(28);
    /// The predeclared `error` interface.
    pub const ERROR: TypeId = TypeId(29);

    #[inline]
    pub fn is_invalid(self) -> bool {
        self == TypeId::INVALID
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UntypedBool,
    UntypedInt,
    UntypedRune,
    UntypedFloat,
    UntypedComplex,
    UntypedString,
    UntypedNil,
    Byte,
    Rune,
}

bitflags! {
    /// Properties of basic types.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BasicInfo: u16 {
        const IS_BOOLEAN = 1 << 0;
        const IS_INTEGER = 1 << 1;
        const IS_UNSIGNED = 1 << 2;
        const IS_FLOAT = 1 << 3;
        const IS_COMPLEX = 1 << 4;
        const IS_STRING = 1 << 5;
        const IS_UNTYPED = 1 << 6;

        const IS_ORDERED = Self::IS_INTEGER.bits() | Self::IS_FLOAT.bits() | Self::IS_STRING.bits();
        const IS_NUMERIC = Self::IS_INTEGER.bits() | Self::IS_FLOAT.bits() | Self::IS_COMPLEX.bits();
        const IS_CONST_TYPE = Self::IS_BOOLEAN.bits() | Self::IS_NUMERIC.bits() | Self::IS_STRING.bits();
    }
}

impl BasicKind {
    pub fn info(self) -> BasicInfo {
        use BasicKind::*;
        match self {
            Bool => BasicInfo::IS_BOOLEAN,
            Int | Int8 | Int16 | Int32 | Int64 | Rune => BasicInfo::IS_INTEGER,
            Uint | Uint8 | Uint16 | Uint32 | Uint64 | Uintptr | Byte => {
                BasicInfo::IS_INTEGER | BasicInfo::IS_UNSIGNED
            }
            Float32 | Float64 => BasicInfo::IS_FLOAT,
            Complex64 | Complex128 => BasicInfo::IS_COMPLEX,
            String => BasicInfo::IS_STRING,
            UntypedBool => BasicInfo::IS_BOOLEAN | BasicInfo::IS_UNTYPED,
            UntypedInt | UntypedRune => BasicInfo::IS_INTEGER | BasicInfo::IS_UNTYPED,
            UntypedFloat => BasicInfo::IS_FLOAT | BasicInfo::IS_UNTYPED,
            UntypedComplex => BasicInfo::IS_COMPLEX | BasicInfo::IS_UNTYPED,
            UntypedString => BasicInfo::IS_STRING | BasicInfo::IS_UNTYPED,
            UntypedNil => BasicInfo::IS_UNTYPED,
        }
    }

    pub fn name(self) -> &'static str {
        use BasicKind::*;
        match self {
            Bool => "bool",
            Int => "int",
            Int8 => "int8",
            Int16 => "int16",
            Int32 => "int32",
            Int64 => "int64",
            Uint => "uint",
            Uint8 => "uint8",
            Uint16 => "uint16",
            Uint32 => "uint32",
            Uint64 => "uint64",
            Uintptr => "uintptr",
            Float32 => "float32",
            Float64 => "float64",
            Complex64 => "complex64",
            Complex128 => "complex128",
            String => "string",
            UntypedBool => "untyped bool",
            UntypedInt => "untyped int",
            UntypedRune => "untyped rune",
            UntypedFloat => "untyped float",
            UntypedComplex => "untyped complex",
            UntypedString => "untyped string",
            UntypedNil => "untyped nil",
            Byte => "byte",
            Rune => "rune",
        }
    }

    /// Rank among untyped numeric kinds; a mixed untyped operation takes the
    /// kind of the higher rank.
    pub(crate) fn untyped_rank(self) -> u8 {
        match self {
            BasicKind::UntypedInt => 1,
            BasicKind::UntypedRune => 2,
            BasicKind::UntypedFloat => 3,
            BasicKind::UntypedComplex => 4,
            _ => 0,
        }
    }
}

/// Index of a named type in the interner's side table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct NamedId(pub u32);

#[derive(Clone, Debug, Serialize)]
pub struct NamedType {
    pub name: String,
    /// Declaring package name; `None` for predeclared types.
    pub package: Option<String>,
    /// `TYPE_SPEC` node; NONE for predeclared types.
    pub declaration: NodeIndex,
    /// INVALID until resolved.
    pub underlying: TypeId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ChanDir {
    Both,
    SendOnly,
    RecvOnly,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct FieldInfo {
    pub name: String,
    pub type_id: TypeId,
    pub embedded: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MethodInfo {
    pub name: String,
    /// Signature without receiver.
    pub type_id: TypeId,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct FunctionShape {
    pub params: Vec<TypeId>,
    pub results: Vec<TypeId>,
    /// The last parameter is `...T`; it is stored as `[]T`.
    pub variadic: bool,
}

/// Structural type key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TypeKey {
    Invalid,
    Basic(BasicKind),
    Named(NamedId),
    Pointer(TypeId),
    Slice(TypeId),
    /// Length is `None` when it is not a literal constant.
    Array(Option<u64>, TypeId),
    Map(TypeId, TypeId),
    Chan(ChanDir, TypeId),
    Struct(Vec<FieldInfo>),
    Interface(Vec<MethodInfo>),
    Function(FunctionShape),
    /// Multiple results of a call; empty for calls without results.
    Tuple(Vec<TypeId>),
}
