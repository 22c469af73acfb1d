//! Go types for ctxlint.
//!
//! - `types` - `TypeId`, `TypeKey`, `BasicKind` and `BasicInfo` flags
//! - `intern` - `TypeInterner`, which deduplicates structural types
//! - `format` - Go-syntax display of types for diagnostics
//! - `evaluate` - `TypeEvaluator`, computing the type of every expression
//!   of a bound file into a `TypeInfo`
//!
//! Types are per file. Declarations of other packages are not loaded, so
//! anything reached through an import evaluates to `TypeId::INVALID`, apart
//! from a short table of standard-library members (`well_known`).

pub mod types;
pub use types::{
    BasicInfo, BasicKind, ChanDir, FieldInfo, FunctionShape, MethodInfo, NamedId, NamedType,
    TypeId, TypeKey,
};

mod intern;
pub use intern::TypeInterner;

mod format;
pub use format::TypeFormatter;

mod evaluate;
mod evaluate_types;
mod expression_ops;
mod well_known;
pub use evaluate::{MAX_EVALUATION_DEPTH, TypeEvaluator, predeclared_type};
pub use evaluate_types::parse_int_literal;

mod type_info;
pub use type_info::TypeInfo;

use ctxlint_binder::BinderState;
use ctxlint_parser::{NodeArena, NodeIndex};

/// Evaluate the types of every expression of a parsed and bound file.
pub fn evaluate_file(arena: &NodeArena, binder: &BinderState, root: NodeIndex) -> TypeInfo {
    TypeEvaluator::new(arena, binder, root).evaluate_file()
}

#[cfg(test)]
#[path = "tests/intern_tests.rs"]
mod intern_tests;

#[cfg(test)]
#[path = "tests/evaluate_tests.rs"]
mod evaluate_tests;
