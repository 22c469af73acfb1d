//! Binder state: scopes, symbols and identifier resolution results.

use ctxlint_parser::NodeIndex;
use rustc_hash::FxHashMap;
use tracing::trace;

use crate::scopes::{PREDECLARED_CONSTS, PREDECLARED_FUNCS, PREDECLARED_TYPES, Scope, ScopeId, ScopeKind};
use crate::symbols::{Symbol, SymbolArena, SymbolId, SymbolKind};

/// Counts gathered while binding one file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolutionStats {
    pub resolved: u32,
    pub unresolved: u32,
}

pub struct BinderState {
    pub symbols: SymbolArena,
    pub scopes: Vec<Scope>,
    /// Identifier node -> symbol, for declarations and uses alike.
    pub node_symbols: FxHashMap<u32, SymbolId>,
    /// Scope-opening node -> scope.
    pub node_scopes: FxHashMap<u32, ScopeId>,
    pub(crate) current_scope: ScopeId,
    pub(crate) universe: ScopeId,
    pub(crate) package_scope: ScopeId,
    pub(crate) file_scope: ScopeId,
    pub(crate) stats: ResolutionStats,
}

impl BinderState {
    pub fn new() -> BinderState {
        let mut binder = BinderState {
            symbols: SymbolArena::new(),
            scopes: Vec::new(),
            node_symbols: FxHashMap::default(),
            node_scopes: FxHashMap::default(),
            current_scope: ScopeId::NONE,
            universe: ScopeId::NONE,
            package_scope: ScopeId::NONE,
            file_scope: ScopeId::NONE,
            stats: ResolutionStats::default(),
        };
        binder.universe = binder.push_scope(ScopeKind::Universe, ScopeId::NONE, NodeIndex::NONE);
        binder.declare_predeclared();
        binder.package_scope = binder.push_scope(ScopeKind::Package, binder.universe, NodeIndex::NONE);
        binder.current_scope = binder.package_scope;
        binder
    }

    fn declare_predeclared(&mut self) {
        let groups: [(&[&str], SymbolKind); 3] = [
            (PREDECLARED_TYPES, SymbolKind::Type),
            (PREDECLARED_CONSTS, SymbolKind::Const),
            (PREDECLARED_FUNCS, SymbolKind::Builtin),
        ];
        for (names, kind) in groups {
            for &name in names {
                self.insert_symbol(self.universe, name, kind, NodeIndex::NONE, NodeIndex::NONE, 0);
            }
        }
        self.insert_symbol(self.universe, "nil", SymbolKind::Nil, NodeIndex::NONE, NodeIndex::NONE, 0);
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get_symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id)
    }

    /// Symbol an identifier node declares or refers to.
    pub fn get_node_symbol(&self, node: NodeIndex) -> Option<SymbolId> {
        self.node_symbols.get(&node.0).copied()
    }

    /// Resolve an identifier node straight to its symbol.
    pub fn resolve(&self, ident: NodeIndex) -> Option<&Symbol> {
        self.get_node_symbol(ident).and_then(|id| self.get_symbol(id))
    }

    pub fn get_node_scope(&self, node: NodeIndex) -> Option<ScopeId> {
        self.node_scopes.get(&node.0).copied()
    }

    pub fn get_scope(&self, id: ScopeId) -> Option<&Scope> {
        if id.is_none() {
            None
        } else {
            self.scopes.get(id.0 as usize)
        }
    }

    pub fn package_scope(&self) -> ScopeId {
        self.package_scope
    }

    pub fn file_scope(&self) -> ScopeId {
        self.file_scope
    }

    pub fn universe_scope(&self) -> ScopeId {
        self.universe
    }

    /// Look `name` up starting at `scope` and walking outwards.
    pub fn lookup_from(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut current = scope;
        while let Some(s) = self.get_scope(current) {
            if let Some(&id) = s.table.get(name) {
                return Some(id);
            }
            current = s.parent;
        }
        None
    }

    /// A predeclared symbol by name (`int`, `string`, `nil`, ...).
    pub fn get_universe_symbol(&self, name: &str) -> Option<SymbolId> {
        self.get_scope(self.universe)
            .and_then(|s| s.table.get(name).copied())
    }

    /// Package-level declaration by name.
    pub fn get_package_symbol(&self, name: &str) -> Option<SymbolId> {
        self.get_scope(self.package_scope)
            .and_then(|s| s.table.get(name).copied())
    }

    /// Imported packages of the file, in declaration order.
    pub fn imports(&self) -> impl Iterator<Item = &Symbol> {
        let mut imports: Vec<&Symbol> = self
            .get_scope(self.file_scope)
            .into_iter()
            .flat_map(|s| s.table.values())
            .filter_map(|&id| self.get_symbol(id))
            .filter(|s| s.kind == SymbolKind::PackageName)
            .collect();
        imports.sort_by_key(|s| s.decl_node);
        imports.into_iter()
    }

    pub fn get_resolution_stats(&self) -> ResolutionStats {
        self.stats
    }

    // =========================================================================
    // Scope management
    // =========================================================================

    pub(crate) fn push_scope(&mut self, kind: ScopeKind, parent: ScopeId, node: NodeIndex) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope::new(kind, parent, node));
        if node.is_some() {
            self.node_scopes.insert(node.0, id);
        }
        id
    }

    pub(crate) fn enter_scope(&mut self, kind: ScopeKind, node: NodeIndex) {
        self.current_scope = self.push_scope(kind, self.current_scope, node);
    }

    pub(crate) fn exit_scope(&mut self) {
        if let Some(scope) = self.get_scope(self.current_scope) {
            self.current_scope = scope.parent;
        }
    }

    fn insert_symbol(
        &mut self,
        scope: ScopeId,
        name: &str,
        kind: SymbolKind,
        declaration: NodeIndex,
        decl_node: NodeIndex,
        decl_position: u32,
    ) -> SymbolId {
        let id = self.symbols.alloc(Symbol {
            name: name.to_string(),
            kind,
            declaration,
            decl_node,
            decl_position,
            scope,
            import_path: None,
        });
        if let Some(s) = self.scopes.get_mut(scope.0 as usize) {
            s.table.insert(name.to_string(), id);
        }
        id
    }

    /// Declare `name` (the text of identifier `ident`) in the current scope.
    /// The blank identifier is never declared.
    pub(crate) fn declare(
        &mut self,
        name: &str,
        ident: NodeIndex,
        kind: SymbolKind,
        decl_node: NodeIndex,
        decl_position: u32,
    ) -> Option<SymbolId> {
        self.declare_in(self.current_scope, name, ident, kind, decl_node, decl_position)
    }

    pub(crate) fn declare_in(
        &mut self,
        scope: ScopeId,
        name: &str,
        ident: NodeIndex,
        kind: SymbolKind,
        decl_node: NodeIndex,
        decl_position: u32,
    ) -> Option<SymbolId> {
        if name == "_" {
            return None;
        }
        let id = self.insert_symbol(scope, name, kind, ident, decl_node, decl_position);
        self.node_symbols.insert(ident.0, id);
        trace!(name, ?kind, scope = scope.0, "declared symbol");
        Some(id)
    }

    pub(crate) fn set_import_path(&mut self, id: SymbolId, path: String) {
        if let Some(symbol) = self.symbols_mut(id) {
            symbol.import_path = Some(path);
        }
    }

    fn symbols_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id)
    }

    pub(crate) fn declared_in_current(&self, name: &str) -> Option<SymbolId> {
        self.get_scope(self.current_scope)
            .and_then(|s| s.table.get(name).copied())
    }

    /// Record the symbol an identifier use refers to.
    pub(crate) fn record_use(&mut self, ident: NodeIndex, name: &str) {
        if name == "_" {
            return;
        }
        match self.lookup_from(self.current_scope, name) {
            Some(id) => {
                self.node_symbols.insert(ident.0, id);
                self.stats.resolved += 1;
            }
            None => {
                self.stats.unresolved += 1;
            }
        }
    }
}

impl Default for BinderState {
    fn default() -> Self {
        BinderState::new()
    }
}
