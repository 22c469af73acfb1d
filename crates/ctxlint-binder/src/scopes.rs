use ctxlint_parser::NodeIndex;
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::symbols::SymbolId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ScopeId(pub u32);

impl ScopeId {
    pub const NONE: ScopeId = ScopeId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScopeKind {
    Universe,
    Package,
    /// Imports of one file.
    File,
    /// Receiver, parameters, results and the outermost body block.
    Function,
    /// Explicit blocks and the implicit blocks of `if`, `for`, `switch`
    /// and case clauses.
    Block,
}

#[derive(Clone, Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: ScopeId,
    /// Node that opened the scope; NONE for universe and package.
    pub node: NodeIndex,
    pub table: FxHashMap<String, SymbolId>,
}

impl Scope {
    pub fn new(kind: ScopeKind, parent: ScopeId, node: NodeIndex) -> Self {
        Scope {
            kind,
            parent,
            node,
            table: FxHashMap::default(),
        }
    }
}

/// Predeclared types of the universe block.
pub const PREDECLARED_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

pub const PREDECLARED_CONSTS: &[&str] = &["true", "false", "iota"];

pub const PREDECLARED_FUNCS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];
