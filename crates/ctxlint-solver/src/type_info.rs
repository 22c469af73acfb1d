//! Evaluation results for one file.

use ctxlint_parser::NodeIndex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::intern::TypeInterner;
use crate::types::TypeId;

/// Expression types of one file, plus the interner that owns them.
#[derive(Clone, Debug)]
pub struct TypeInfo {
    interner: TypeInterner,
    types: FxHashMap<u32, TypeId>,
    type_exprs: FxHashSet<u32>,
}

impl TypeInfo {
    pub(crate) fn new(
        interner: TypeInterner,
        mut types: FxHashMap<u32, TypeId>,
        type_exprs: FxHashSet<u32>,
    ) -> TypeInfo {
        types.retain(|_, ty| !ty.is_invalid());
        TypeInfo {
            interner,
            types,
            type_exprs,
        }
    }

    /// Type of an expression as an argument sees it: untyped constants take
    /// their default type (`untyped nil` stays as is). `INVALID` when
    /// unknown.
    pub fn type_of(&self, expr: NodeIndex) -> TypeId {
        self.raw_type_of(expr)
            .map_or(TypeId::INVALID, |ty| self.interner.default_type(ty))
    }

    /// Recorded type, untyped kinds included.
    pub fn raw_type_of(&self, expr: NodeIndex) -> Option<TypeId> {
        self.types.get(&expr.0).copied()
    }

    pub fn is_type_expression(&self, expr: NodeIndex) -> bool {
        self.type_exprs.contains(&expr.0)
    }

    pub fn is_string_like(&self, ty: TypeId) -> bool {
        self.interner.is_string_like(ty)
    }

    pub fn display(&self, ty: TypeId) -> String {
        self.interner.display(ty)
    }

    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    /// Number of expressions with a known type.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
