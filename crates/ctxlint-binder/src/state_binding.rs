//! The binding pass: declares symbols and resolves identifier uses.
//!
//! Package-level names are declared before any body is visited, so uses may
//! precede declarations at package level. Inside functions a name becomes
//! visible after its declaring statement, matching Go's scoping rules.

use ctxlint_parser::parser::node::{FunctionData, NodeArena};
use ctxlint_parser::parser::syntax_kind_ext;
use ctxlint_parser::{NodeIndex, NodeList};
use ctxlint_scanner::SyntaxKind;
use tracing::{debug, debug_span};

use crate::scopes::ScopeKind;
use crate::state::BinderState;
use crate::symbols::SymbolKind;

impl BinderState {
    /// Bind one parsed file. A binder holds exactly one file.
    pub fn bind_source_file(&mut self, arena: &NodeArena, root: NodeIndex) {
        let Some(file) = arena.get(root).and_then(|n| arena.get_source_file(n)) else {
            return;
        };
        let _span = debug_span!("bind_source_file", file = %file.file_name).entered();

        self.file_scope = self.push_scope(ScopeKind::File, self.package_scope, root);

        for decl in file.declarations.iter() {
            self.declare_top_level(arena, decl);
        }
        for spec in file.imports.iter() {
            self.bind_import_spec(arena, spec);
        }

        self.current_scope = self.file_scope;
        for decl in file.declarations.iter() {
            self.bind_top_level_body(arena, decl);
        }
        self.current_scope = self.package_scope;

        debug!(
            symbols = self.symbols.len(),
            scopes = self.scopes.len(),
            resolved = self.stats.resolved,
            unresolved = self.stats.unresolved,
            "bound source file"
        );
    }

    // =========================================================================
    // Package level
    // =========================================================================

    fn declare_top_level(&mut self, arena: &NodeArena, decl: NodeIndex) {
        let Some(node) = arena.get(decl) else {
            return;
        };
        let package = self.package_scope;
        match node.kind {
            syntax_kind_ext::GEN_DECL => {
                let Some(data) = arena.get_gen_decl(node) else {
                    return;
                };
                let keyword = node.flags;
                for spec in data.specs.iter() {
                    if keyword == SyntaxKind::TypeKeyword as u16 {
                        if let Some(type_spec) = arena.get(spec).and_then(|n| arena.get_type_spec(n))
                            && let Some(name) = arena.identifier_text(type_spec.name)
                        {
                            self.declare_in(package, name, type_spec.name, SymbolKind::Type, spec, 0);
                        }
                    } else if keyword != SyntaxKind::ImportKeyword as u16 {
                        let kind = if keyword == SyntaxKind::ConstKeyword as u16 {
                            SymbolKind::Const
                        } else {
                            SymbolKind::Var
                        };
                        self.declare_value_spec_names(arena, spec, kind, Some(package));
                    }
                }
            }
            syntax_kind_ext::FUNCTION_DECLARATION => {
                let Some(func) = arena.get_function(node) else {
                    return;
                };
                if func.receiver.is_none()
                    && let Some(name) = arena.identifier_text(func.name)
                    && name != "init"
                {
                    self.declare_in(package, name, func.name, SymbolKind::Func, decl, 0);
                }
            }
            _ => {}
        }
    }

    fn bind_import_spec(&mut self, arena: &NodeArena, spec: NodeIndex) {
        let Some(data) = arena.get(spec).and_then(|n| arena.get_import_spec(n)) else {
            return;
        };
        let Some(path) = arena
            .get(data.path)
            .and_then(|n| arena.get_literal(n))
            .map(|lit| unquote_import_path(&lit.text))
        else {
            return;
        };

        let (local, ident) = match arena.identifier_text(data.name) {
            // Blank and dot imports introduce no package name.
            Some("_" | ".") => return,
            Some(name) => (name.to_string(), data.name),
            None => (default_package_name(&path).to_string(), spec),
        };
        let file = self.file_scope;
        if let Some(id) = self.declare_in(file, &local, ident, SymbolKind::PackageName, spec, 0) {
            self.set_import_path(id, path);
        }
    }

    fn bind_top_level_body(&mut self, arena: &NodeArena, decl: NodeIndex) {
        let Some(node) = arena.get(decl) else {
            return;
        };
        match node.kind {
            syntax_kind_ext::GEN_DECL => {
                if node.flags == SyntaxKind::ImportKeyword as u16 {
                    return;
                }
                if let Some(data) = arena.get_gen_decl(node) {
                    for spec in data.specs.iter() {
                        self.bind_spec_body(arena, spec);
                    }
                }
            }
            syntax_kind_ext::FUNCTION_DECLARATION => {
                if let Some(func) = arena.get_function(node) {
                    self.bind_function(arena, decl, func);
                }
            }
            _ => {}
        }
    }

    /// Types and initializers of a spec; names are handled by the caller.
    fn bind_spec_body(&mut self, arena: &NodeArena, spec: NodeIndex) {
        let Some(node) = arena.get(spec) else {
            return;
        };
        if let Some(value_spec) = arena.get_value_spec(node) {
            self.bind_node(arena, value_spec.type_node);
            self.bind_list(arena, &value_spec.values);
        } else if let Some(type_spec) = arena.get_type_spec(node) {
            if type_spec.type_params.is_empty() {
                self.bind_node(arena, type_spec.type_node);
            } else {
                self.enter_scope(ScopeKind::Block, spec);
                self.bind_type_params(arena, &type_spec.type_params);
                self.bind_node(arena, type_spec.type_node);
                self.exit_scope();
            }
        }
    }

    fn declare_value_spec_names(
        &mut self,
        arena: &NodeArena,
        spec: NodeIndex,
        kind: SymbolKind,
        scope: Option<crate::ScopeId>,
    ) {
        let Some(value_spec) = arena.get(spec).and_then(|n| arena.get_value_spec(n)) else {
            return;
        };
        let scope = scope.unwrap_or(self.current_scope);
        for (position, name) in value_spec.names.iter().enumerate() {
            if let Some(text) = arena.identifier_text(name) {
                self.declare_in(scope, text, name, kind, spec, position as u32);
            }
        }
    }

    // =========================================================================
    // Functions
    // =========================================================================

    fn bind_function(&mut self, arena: &NodeArena, idx: NodeIndex, func: &FunctionData) {
        self.enter_scope(ScopeKind::Function, idx);
        self.declare_receiver_type_params(arena, func.receiver);
        self.bind_type_params(arena, &func.type_params);

        let params: Vec<NodeIndex> = std::iter::once(func.receiver)
            .filter(|r| r.is_some())
            .chain(func.parameters.iter())
            .chain(func.results.iter())
            .collect();

        for &param in &params {
            if let Some(data) = arena.get(param).and_then(|n| arena.get_parameter(n)) {
                self.bind_node(arena, data.type_node);
            }
        }
        for &param in &params {
            if let Some(data) = arena.get(param).and_then(|n| arena.get_parameter(n)) {
                for (position, name) in data.names.iter().enumerate() {
                    if let Some(text) = arena.identifier_text(name) {
                        self.declare(text, name, SymbolKind::Param, param, position as u32);
                    }
                }
            }
        }

        if let Some(body) = arena.get(func.body)
            && let Some(block) = arena.get_list(body)
        {
            // The outermost body block shares the function scope.
            self.node_scopes.insert(func.body.0, self.current_scope);
            self.bind_list(arena, &block.list);
        }

        self.exit_scope();
    }

    /// Declare type parameters in the current scope, then resolve their
    /// constraints, which may refer to each other.
    fn bind_type_params(&mut self, arena: &NodeArena, type_params: &NodeList) {
        for param in type_params.iter() {
            if let Some(data) = arena.get(param).and_then(|n| arena.get_parameter(n)) {
                for (position, name) in data.names.iter().enumerate() {
                    if let Some(text) = arena.identifier_text(name) {
                        self.declare(text, name, SymbolKind::TypeParam, param, position as u32);
                    }
                }
            }
        }
        for param in type_params.iter() {
            if let Some(data) = arena.get(param).and_then(|n| arena.get_parameter(n)) {
                self.bind_node(arena, data.type_node);
            }
        }
    }

    /// `func (l *List[K, V])` names the type parameters `K` and `V` for the
    /// method.
    fn declare_receiver_type_params(&mut self, arena: &NodeArena, receiver: NodeIndex) {
        let Some(data) = arena.get(receiver).and_then(|n| arena.get_parameter(n)) else {
            return;
        };
        let mut current = data.type_node;
        while let Some(node) = arena.get(current)
            && node.kind == syntax_kind_ext::POINTER_TYPE
            && let Some(wrapped) = arena.get_wrapped(node)
        {
            current = wrapped.expression;
        }
        let Some(node) = arena.get(current) else {
            return;
        };
        let names: Vec<NodeIndex> = if let Some(index) = arena.get_index_expr(node)
            && node.kind == syntax_kind_ext::INDEX_EXPRESSION
        {
            vec![index.index]
        } else if let Some(list) = arena.get_index_list(node) {
            list.indices.iter().collect()
        } else {
            return;
        };
        for (position, name) in names.into_iter().enumerate() {
            if let Some(text) = arena.identifier_text(name) {
                self.declare(text, name, SymbolKind::TypeParam, receiver, position as u32);
            }
        }
    }

    fn bind_signature_types(&mut self, arena: &NodeArena, func: &FunctionData) {
        for param in func.parameters.iter().chain(func.results.iter()) {
            if let Some(data) = arena.get(param).and_then(|n| arena.get_parameter(n)) {
                self.bind_node(arena, data.type_node);
            }
        }
    }

    // =========================================================================
    // Statements and expressions
    // =========================================================================

    fn bind_list(&mut self, arena: &NodeArena, list: &NodeList) {
        for child in list.iter() {
            self.bind_node(arena, child);
        }
    }

    pub(crate) fn bind_node(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else {
            return;
        };

        match node.kind {
            syntax_kind_ext::IDENTIFIER => {
                if let Some(text) = arena.identifier_text(idx) {
                    self.record_use(idx, text);
                }
            }
            syntax_kind_ext::BASIC_LITERAL | syntax_kind_ext::BRANCH_STATEMENT => {}
            syntax_kind_ext::SELECTOR_EXPRESSION => {
                // The selected name is a field, method or package member.
                if let Some(data) = arena.get_selector_expr(node) {
                    self.bind_node(arena, data.expression);
                }
            }
            syntax_kind_ext::FUNCTION_LITERAL => {
                if let Some(func) = arena.get_function(node) {
                    self.bind_function(arena, idx, func);
                }
            }
            syntax_kind_ext::FUNCTION_TYPE => {
                if let Some(func) = arena.get_function(node) {
                    self.bind_signature_types(arena, func);
                }
            }
            syntax_kind_ext::PARAMETER | syntax_kind_ext::FIELD => {
                if let Some(data) = arena.get_parameter(node) {
                    self.bind_node(arena, data.type_node);
                }
            }
            syntax_kind_ext::BLOCK => {
                if let Some(block) = arena.get_list(node) {
                    self.enter_scope(ScopeKind::Block, idx);
                    self.bind_list(arena, &block.list);
                    self.exit_scope();
                }
            }
            syntax_kind_ext::ASSIGN_STATEMENT => self.bind_assignment(arena, idx),
            syntax_kind_ext::DECL_STATEMENT => {
                if let Some(wrapped) = arena.get_wrapped(node) {
                    self.bind_local_declaration(arena, wrapped.expression);
                }
            }
            syntax_kind_ext::IF_STATEMENT => {
                if let Some(data) = arena.get_if_statement(node) {
                    self.enter_scope(ScopeKind::Block, idx);
                    self.bind_node(arena, data.init);
                    self.bind_node(arena, data.condition);
                    self.bind_node(arena, data.then_block);
                    self.bind_node(arena, data.else_statement);
                    self.exit_scope();
                }
            }
            syntax_kind_ext::FOR_STATEMENT => {
                if let Some(data) = arena.get_loop(node) {
                    self.enter_scope(ScopeKind::Block, idx);
                    self.bind_node(arena, data.init);
                    self.bind_node(arena, data.condition);
                    self.bind_node(arena, data.post);
                    self.bind_node(arena, data.body);
                    self.exit_scope();
                }
            }
            syntax_kind_ext::RANGE_STATEMENT => {
                if let Some(data) = arena.get_range_statement(node) {
                    self.enter_scope(ScopeKind::Block, idx);
                    self.bind_node(arena, data.expression);
                    if data.is_define {
                        for (position, target) in [data.key, data.value].into_iter().enumerate() {
                            if let Some(text) = arena.identifier_text(target) {
                                self.declare(text, target, SymbolKind::Var, idx, position as u32);
                            }
                        }
                    } else {
                        self.bind_node(arena, data.key);
                        self.bind_node(arena, data.value);
                    }
                    self.bind_node(arena, data.body);
                    self.exit_scope();
                }
            }
            syntax_kind_ext::SWITCH_STATEMENT => self.bind_switch(arena, idx),
            syntax_kind_ext::SELECT_STATEMENT => {
                if let Some(data) = arena.get_switch(node) {
                    for clause in data.clauses.iter() {
                        self.bind_case_clause(arena, clause, None);
                    }
                }
            }
            syntax_kind_ext::LABELED_STATEMENT => {
                if let Some(data) = arena.get_labeled(node) {
                    self.bind_node(arena, data.statement);
                }
            }
            _ => {
                arena.for_each_child(idx, |child| self.bind_node(arena, child));
            }
        }
    }

    /// `:=` declares every new non-blank name on the left after the right side
    /// has been resolved; names already declared in the same scope are reused.
    fn bind_assignment(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(data) = arena.get(idx).and_then(|n| arena.get_assignment(n)) else {
            return;
        };
        self.bind_list(arena, &data.right);

        if data.operator != SyntaxKind::ColonEqualsToken as u16 {
            self.bind_list(arena, &data.left);
            return;
        }
        for (position, target) in data.left.iter().enumerate() {
            match arena.identifier_text(target) {
                Some("_") => {}
                Some(text) => {
                    if let Some(existing) = self.declared_in_current(text) {
                        self.node_symbols.insert(target.0, existing);
                    } else {
                        self.declare(text, target, SymbolKind::Var, idx, position as u32);
                    }
                }
                None => self.bind_node(arena, target),
            }
        }
    }

    fn bind_local_declaration(&mut self, arena: &NodeArena, decl: NodeIndex) {
        let Some(node) = arena.get(decl) else {
            return;
        };
        let Some(data) = arena.get_gen_decl(node) else {
            return;
        };
        let keyword = node.flags;
        for spec in data.specs.iter() {
            if keyword == SyntaxKind::TypeKeyword as u16 {
                // Declared first so the type may refer to itself.
                if let Some(type_spec) = arena.get(spec).and_then(|n| arena.get_type_spec(n))
                    && let Some(name) = arena.identifier_text(type_spec.name)
                {
                    self.declare(name, type_spec.name, SymbolKind::Type, spec, 0);
                }
                self.bind_spec_body(arena, spec);
            } else {
                let kind = if keyword == SyntaxKind::ConstKeyword as u16 {
                    SymbolKind::Const
                } else {
                    SymbolKind::Var
                };
                self.bind_spec_body(arena, spec);
                self.declare_value_spec_names(arena, spec, kind, None);
            }
        }
    }

    fn bind_switch(&mut self, arena: &NodeArena, idx: NodeIndex) {
        let Some(node) = arena.get(idx) else {
            return;
        };
        let Some(data) = arena.get_switch(node) else {
            return;
        };
        self.enter_scope(ScopeKind::Block, idx);
        self.bind_node(arena, data.init);

        // `switch v := x.(type)` binds `v` anew in every clause.
        let mut guard_binding = None;
        match arena.get(data.tag) {
            Some(tag) if tag.kind == syntax_kind_ext::ASSIGN_STATEMENT => {
                if let Some(assign) = arena.get_assignment(tag) {
                    self.bind_list(arena, &assign.right);
                    guard_binding = assign.left.first();
                }
            }
            _ => self.bind_node(arena, data.tag),
        }

        for clause in data.clauses.iter() {
            self.bind_case_clause(arena, clause, guard_binding.map(|ident| (ident, idx)));
        }
        self.exit_scope();
    }

    fn bind_case_clause(
        &mut self,
        arena: &NodeArena,
        clause: NodeIndex,
        guard_binding: Option<(NodeIndex, NodeIndex)>,
    ) {
        let Some(data) = arena.get(clause).and_then(|n| arena.get_case_clause(n)) else {
            return;
        };
        self.enter_scope(ScopeKind::Block, clause);
        self.bind_list(arena, &data.expressions);
        if let Some((ident, switch)) = guard_binding
            && let Some(text) = arena.identifier_text(ident)
        {
            self.declare(text, ident, SymbolKind::Var, switch, 0);
        }
        self.bind_list(arena, &data.body);
        self.exit_scope();
    }
}

/// Strip the quotes of an import path literal.
fn unquote_import_path(literal: &str) -> String {
    literal
        .trim_start_matches(['"', '`'])
        .trim_end_matches(['"', '`'])
        .to_string()
}

/// Conventional package name for an import path: its last element, ignoring
/// a trailing major-version element such as `/v2`.
pub fn default_package_name(path: &str) -> &str {
    let mut parts = path.rsplit('/');
    let last = parts.next().unwrap_or(path);
    let is_version = last.len() > 1
        && last.starts_with('v')
        && last[1..].bytes().all(|b| b.is_ascii_digit());
    if is_version {
        parts.next().unwrap_or(last)
    } else {
        last
    }
}
