//! The type queries the checker needs.

use ctxlint_parser::NodeIndex;
use ctxlint_solver::{TypeId, TypeInfo};

pub trait TypeOracle {
    /// Type of `expr` as passed to a variadic parameter; `TypeId::INVALID`
    /// when it cannot be determined.
    fn type_of(&self, expr: NodeIndex) -> TypeId;

    /// Whether the underlying type of `ty` is a string kind.
    fn is_string_like(&self, ty: TypeId) -> bool;

    fn display(&self, ty: TypeId) -> String;
}

impl TypeOracle for TypeInfo {
    fn type_of(&self, expr: NodeIndex) -> TypeId {
        TypeInfo::type_of(self, expr)
    }

    fn is_string_like(&self, ty: TypeId) -> bool {
        TypeInfo::is_string_like(self, ty)
    }

    fn display(&self, ty: TypeId) -> String {
        TypeInfo::display(self, ty)
    }
}
