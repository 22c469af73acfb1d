use ctxlint_parser::NodeIndex;
use serde::Serialize;

use crate::scopes::ScopeId;

/// Index of a symbol in its `SymbolArena`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == u32::MAX
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SymbolKind {
    Const,
    Var,
    Type,
    Func,
    /// Receiver, parameter or named result.
    Param,
    /// Type parameter of a generic function, method or type.
    TypeParam,
    /// An imported package visible under a local name.
    PackageName,
    /// Predeclared function (`len`, `append`, ...).
    Builtin,
    /// The predeclared `nil`.
    Nil,
}

#[derive(Clone, Debug, Serialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    /// Declaring identifier (the import spec for an implicitly named
    /// import); NONE for predeclared symbols.
    pub declaration: NodeIndex,
    /// Enclosing declaration: `VALUE_SPEC`, `ASSIGN_STATEMENT`,
    /// `RANGE_STATEMENT`, `TYPE_SPEC`, `FUNCTION_DECLARATION`, `PARAMETER`,
    /// `IMPORT_SPEC` or a type-switch `SWITCH_STATEMENT`.
    pub decl_node: NodeIndex,
    /// Position of the name within the declaration's name list.
    pub decl_position: u32,
    pub scope: ScopeId,
    /// Import path for `PackageName` symbols.
    pub import_path: Option<String>,
}

impl Symbol {
    pub fn is_predeclared(&self) -> bool {
        self.declaration.is_none()
    }
}

#[derive(Clone, Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        SymbolArena::default()
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    #[inline]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        if id.is_none() {
            None
        } else {
            self.symbols.get(id.0 as usize)
        }
    }

    pub(crate) fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        if id.is_none() {
            None
        } else {
            self.symbols.get_mut(id.0 as usize)
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, symbol)| (SymbolId(i as u32), symbol))
    }
}
