//! Type interning.

use ctxlint_parser::NodeIndex;
use rustc_hash::FxHashMap;

use crate::format::TypeFormatter;
use crate::types::{
    BasicInfo, BasicKind, ChanDir, FieldInfo, FunctionShape, MethodInfo, NamedId, NamedType,
    TypeId, TypeKey,
};

/// Basic kinds in `TypeId` order, starting at `TypeId::BOOL`.
const BASIC_KINDS: [BasicKind; 26] = [
    BasicKind::Bool,
    BasicKind::Int,
    BasicKind::Int8,
    BasicKind::Int16,
    BasicKind::Int32,
    BasicKind::Int64,
    BasicKind::Uint,
    BasicKind::Uint8,
    BasicKind::Uint16,
    BasicKind::Uint32,
    BasicKind::Uint64,
    BasicKind::Uintptr,
    BasicKind::Float32,
    BasicKind::Float64,
    BasicKind::Complex64,
    BasicKind::Complex128,
    BasicKind::String,
    BasicKind::UntypedBool,
    BasicKind::UntypedInt,
    BasicKind::UntypedRune,
    BasicKind::UntypedFloat,
    BasicKind::UntypedComplex,
    BasicKind::UntypedString,
    BasicKind::UntypedNil,
    BasicKind::Byte,
    BasicKind::Rune,
];

/// Owns every type of one file.
#[derive(Clone, Debug)]
pub struct TypeInterner {
    types: Vec<TypeKey>,
    map: FxHashMap<TypeKey, TypeId>,
    named: Vec<NamedType>,
}

impl TypeInterner {
    pub fn new() -> TypeInterner {
        let mut interner = TypeInterner {
            types: Vec::with_capacity(64),
            map: FxHashMap::default(),
            named: Vec::new(),
        };
        interner.intern(TypeKey::Invalid);
        for kind in BASIC_KINDS {
            interner.intern(TypeKey::Basic(kind));
        }
        interner.intern(TypeKey::Interface(Vec::new()));
        interner.intern(TypeKey::Tuple(Vec::new()));

        let error = interner.declare_named("error", None, NodeIndex::NONE);
        debug_assert_eq!(error, TypeId::ERROR);
        let error_method = interner.function(FunctionShape {
            params: Vec::new(),
            results: vec![TypeId::STRING],
            variadic: false,
        });
        let error_interface = interner.interface(vec![MethodInfo {
            name: "Error".to_string(),
            type_id: error_method,
        }]);
        interner.set_underlying(TypeId::ERROR, error_interface);
        interner
    }

    pub fn intern(&mut self, key: TypeKey) -> TypeId {
        if let Some(&id) = self.map.get(&key) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(key.clone());
        self.map.insert(key, id);
        id
    }

    pub fn lookup(&self, id: TypeId) -> Option<&TypeKey> {
        self.types.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // =========================================================================
    // Constructors
    // =========================================================================

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeKey::Pointer(elem))
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        self.intern(TypeKey::Slice(elem))
    }

    pub fn array(&mut self, len: Option<u64>, elem: TypeId) -> TypeId {
        self.intern(TypeKey::Array(len, elem))
    }

    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.intern(TypeKey::Map(key, value))
    }

    pub fn chan(&mut self, dir: ChanDir, elem: TypeId) -> TypeId {
        self.intern(TypeKey::Chan(dir, elem))
    }

    pub fn structure(&mut self, fields: Vec<FieldInfo>) -> TypeId {
        self.intern(TypeKey::Struct(fields))
    }

    pub fn interface(&mut self, methods: Vec<MethodInfo>) -> TypeId {
        if methods.is_empty() {
            return TypeId::EMPTY_INTERFACE;
        }
        self.intern(TypeKey::Interface(methods))
    }

    pub fn function(&mut self, shape: FunctionShape) -> TypeId {
        self.intern(TypeKey::Function(shape))
    }

    /// A single result stays itself; zero results is `VOID`.
    pub fn tuple(&mut self, elems: Vec<TypeId>) -> TypeId {
        match elems.len() {
            0 => TypeId::VOID,
            1 => elems[0],
            _ => self.intern(TypeKey::Tuple(elems)),
        }
    }

    /// A fresh named type. Every call creates a distinct type.
    pub fn declare_named(&mut self, name: &str, package: Option<&str>, declaration: NodeIndex) -> TypeId {
        let named_id = NamedId(self.named.len() as u32);
        self.named.push(NamedType {
            name: name.to_string(),
            package: package.map(str::to_string),
            declaration,
            underlying: TypeId::INVALID,
        });
        self.intern(TypeKey::Named(named_id))
    }

    pub fn set_underlying(&mut self, named: TypeId, underlying: TypeId) {
        let underlying = self.underlying(underlying);
        if let Some(TypeKey::Named(named_id)) = self.types.get(named.0 as usize)
            && let Some(info) = self.named.get_mut(named_id.0 as usize)
        {
            info.underlying = underlying;
        }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn named_info(&self, id: TypeId) -> Option<&NamedType> {
        match self.lookup(id)? {
            TypeKey::Named(named_id) => self.named.get(named_id.0 as usize),
            _ => None,
        }
    }

    /// The underlying type: named types resolve to their definition, every
    /// other type is its own underlying type.
    pub fn underlying(&self, id: TypeId) -> TypeId {
        match self.named_info(id) {
            Some(info) => info.underlying,
            None => id,
        }
    }

    pub fn basic_kind(&self, id: TypeId) -> Option<BasicKind> {
        match self.lookup(self.underlying(id))? {
            TypeKey::Basic(kind) => Some(*kind),
            _ => None,
        }
    }

    /// `BasicInfo` of the underlying type; empty for non-basic types.
    pub fn basic_info(&self, id: TypeId) -> BasicInfo {
        self.basic_kind(id).map_or(BasicInfo::empty(), BasicKind::info)
    }

    /// True when the underlying type is a string kind, typed or untyped.
    pub fn is_string_like(&self, id: TypeId) -> bool {
        self.basic_info(id).contains(BasicInfo::IS_STRING)
    }

    pub fn is_untyped(&self, id: TypeId) -> bool {
        matches!(self.lookup(id), Some(TypeKey::Basic(kind)) if kind.info().contains(BasicInfo::IS_UNTYPED))
    }

    /// The type an untyped constant takes when nothing else constrains it.
    /// `untyped nil` has no default and is returned unchanged.
    pub fn default_type(&self, id: TypeId) -> TypeId {
        match self.lookup(id) {
            Some(TypeKey::Basic(kind)) => match kind {
                BasicKind::UntypedBool => TypeId::BOOL,
                BasicKind::UntypedInt => TypeId::INT,
                BasicKind::UntypedRune => TypeId::RUNE,
                BasicKind::UntypedFloat => TypeId::FLOAT64,
                BasicKind::UntypedComplex => TypeId::COMPLEX128,
                BasicKind::UntypedString => TypeId::STRING,
                _ => id,
            },
            _ => id,
        }
    }

    /// Element type of a pointer, or `None`.
    pub fn pointer_elem(&self, id: TypeId) -> Option<TypeId> {
        match self.lookup(self.underlying(id))? {
            TypeKey::Pointer(elem) => Some(*elem),
            _ => None,
        }
    }

    pub fn function_shape(&self, id: TypeId) -> Option<&FunctionShape> {
        match self.lookup(self.underlying(id))? {
            TypeKey::Function(shape) => Some(shape),
            _ => None,
        }
    }

    /// Display name as written in diagnostics (`int`, `pkg.T`, `[]string`).
    pub fn display(&self, id: TypeId) -> String {
        TypeFormatter::new(self).format(id)
    }
}

impl Default for TypeInterner {
    fn default() -> Self {
        TypeInterner::new()
    }
}
