//! Expression type evaluation.
//!
//! `TypeEvaluator` computes the type of every expression in one file from
//! the syntax tree and the binder's resolution results. Results are memoized
//! per node and per symbol, so evaluating a whole file is linear in its size.
//!
//! Only the current file is visible: identifiers imported from other
//! packages evaluate to `TypeId::INVALID` unless `well_known` lists them.

use ctxlint_binder::{BinderState, ScopeId, SymbolId, SymbolKind};
use ctxlint_parser::parser::node::NodeArena;
use ctxlint_parser::parser::syntax_kind_ext;
use ctxlint_parser::NodeIndex;
use ctxlint_scanner::SyntaxKind;
use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, debug_span, trace};

use crate::intern::TypeInterner;
use crate::type_info::TypeInfo;
use crate::types::{TypeId, TypeKey};

/// Nesting limit for a single evaluation chain.
pub const MAX_EVALUATION_DEPTH: u32 = 500;

pub struct TypeEvaluator<'a> {
    pub(crate) arena: &'a NodeArena,
    pub(crate) binder: &'a BinderState,
    pub(crate) interner: TypeInterner,
    root: NodeIndex,
    /// Package clause name; qualifies local named types.
    pub(crate) package: Option<String>,
    expr_types: FxHashMap<u32, TypeId>,
    /// Expressions that denote a type rather than a value.
    pub(crate) type_exprs: FxHashSet<u32>,
    symbol_types: FxHashMap<SymbolId, TypeId>,
    resolving: FxHashSet<SymbolId>,
    /// `TYPE_SPEC` node -> declared type.
    pub(crate) named_types: FxHashMap<u32, TypeId>,
    /// Receiver base type symbol -> method name -> `FUNCTION_DECLARATION`.
    pub(crate) methods: FxHashMap<SymbolId, IndexMap<String, NodeIndex>>,
    /// Named types created for standard-library members, by table entry.
    pub(crate) stdlib_types: FxHashMap<usize, TypeId>,
    depth: u32,
}

impl<'a> TypeEvaluator<'a> {
    pub fn new(arena: &'a NodeArena, binder: &'a BinderState, root: NodeIndex) -> Self {
        let file = arena.get(root).and_then(|n| arena.get_source_file(n));
        let package = file
            .and_then(|f| arena.identifier_text(f.package_name))
            .filter(|name| *name != "_")
            .map(str::to_string);

        let mut evaluator = TypeEvaluator {
            arena,
            binder,
            interner: TypeInterner::new(),
            root,
            package,
            expr_types: FxHashMap::default(),
            type_exprs: FxHashSet::default(),
            symbol_types: FxHashMap::default(),
            resolving: FxHashSet::default(),
            named_types: FxHashMap::default(),
            methods: FxHashMap::default(),
            stdlib_types: FxHashMap::default(),
            depth: 0,
        };
        if let Some(file) = file {
            for decl in file.declarations.iter() {
                evaluator.index_method(decl);
            }
        }
        evaluator
    }

    fn index_method(&mut self, decl: NodeIndex) {
        let arena = self.arena;
        let Some(node) = arena.get(decl) else {
            return;
        };
        if node.kind != syntax_kind_ext::FUNCTION_DECLARATION {
            return;
        }
        let Some(func) = arena.get_function(node) else {
            return;
        };
        let Some(receiver) = arena.get(func.receiver).and_then(|n| arena.get_parameter(n)) else {
            return;
        };
        let Some(name) = arena.identifier_text(func.name) else {
            return;
        };
        let mut base = arena.skip_parens(receiver.type_node);
        if arena.kind_of(base) == Some(syntax_kind_ext::POINTER_TYPE)
            && let Some(wrapped) = arena.get(base).and_then(|n| arena.get_wrapped(n))
        {
            base = arena.skip_parens(wrapped.expression);
        }
        if let Some(symbol) = self.binder.get_node_symbol(base) {
            self.methods
                .entry(symbol)
                .or_default()
                .insert(name.to_string(), decl);
        }
    }

    /// Evaluate every expression of the file.
    pub fn evaluate_file(mut self) -> TypeInfo {
        let _span = debug_span!("evaluate_file", package = ?self.package).entered();
        let arena = self.arena;
        for idx in arena.preorder(self.root) {
            if arena.kind_of(idx).is_some_and(is_expression_kind) {
                self.type_of_expression(idx);
            }
        }
        debug!(
            types = self.interner.len(),
            expressions = self.expr_types.len(),
            "evaluated file"
        );
        TypeInfo::new(self.interner, self.expr_types, self.type_exprs)
    }

    pub fn interner(&self) -> &TypeInterner {
        &self.interner
    }

    /// Type of an expression; `INVALID` when it cannot be determined.
    /// Untyped constants keep their untyped kind here.
    pub fn type_of_expression(&mut self, idx: NodeIndex) -> TypeId {
        if let Some(&ty) = self.expr_types.get(&idx.0) {
            return ty;
        }
        if self.depth >= MAX_EVALUATION_DEPTH {
            trace!(node = idx.0, "evaluation depth exceeded");
            return TypeId::INVALID;
        }
        self.depth += 1;
        let ty = self.compute_expression_type(idx);
        self.depth -= 1;
        self.expr_types.insert(idx.0, ty);
        ty
    }

    /// True if `idx` names a type (`int`, `T`, `[]byte`, `(*T)`).
    pub fn denotes_type(&mut self, idx: NodeIndex) -> bool {
        self.type_of_expression(idx);
        self.type_exprs.contains(&idx.0)
    }

    fn compute_expression_type(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let Some(node) = arena.get(idx) else {
            return TypeId::INVALID;
        };
        match node.kind {
            syntax_kind_ext::IDENTIFIER => self.type_of_identifier(idx),
            syntax_kind_ext::BASIC_LITERAL => literal_type(node.flags),
            syntax_kind_ext::PAREN_EXPRESSION => {
                let Some(inner) = arena.get_wrapped(node).map(|w| w.expression) else {
                    return TypeId::INVALID;
                };
                let ty = self.type_of_expression(inner);
                if self.type_exprs.contains(&inner.0) {
                    self.type_exprs.insert(idx.0);
                }
                ty
            }
            syntax_kind_ext::SELECTOR_EXPRESSION => self.type_of_selector(idx),
            syntax_kind_ext::CALL_EXPRESSION => self.type_of_call(idx),
            syntax_kind_ext::INDEX_EXPRESSION => self.type_of_index(idx),
            syntax_kind_ext::SLICE_EXPRESSION => self.type_of_slice(idx),
            syntax_kind_ext::TYPE_ASSERTION => match arena.get_index_expr(node) {
                Some(data) if data.index.is_some() => self.resolve_type(data.index),
                _ => TypeId::INVALID,
            },
            syntax_kind_ext::UNARY_EXPRESSION => self.type_of_unary(idx),
            syntax_kind_ext::BINARY_EXPRESSION => self.type_of_binary(idx),
            syntax_kind_ext::COMPOSITE_LITERAL => self.type_of_composite_literal(idx),
            syntax_kind_ext::FUNCTION_LITERAL => match arena.get_function(node) {
                Some(func) => self.signature_type(func),
                None => TypeId::INVALID,
            },
            syntax_kind_ext::ARRAY_TYPE
            | syntax_kind_ext::MAP_TYPE
            | syntax_kind_ext::POINTER_TYPE
            | syntax_kind_ext::CHAN_TYPE
            | syntax_kind_ext::FUNCTION_TYPE
            | syntax_kind_ext::STRUCT_TYPE
            | syntax_kind_ext::INTERFACE_TYPE => {
                self.type_exprs.insert(idx.0);
                self.resolve_type(idx)
            }
            _ => TypeId::INVALID,
        }
    }

    // =========================================================================
    // Identifiers and symbols
    // =========================================================================

    fn type_of_identifier(&mut self, idx: NodeIndex) -> TypeId {
        let binder = self.binder;
        let Some(symbol_id) = binder.get_node_symbol(idx) else {
            return TypeId::INVALID;
        };
        let Some(symbol) = binder.get_symbol(symbol_id) else {
            return TypeId::INVALID;
        };
        match symbol.kind {
            SymbolKind::Type => {
                self.type_exprs.insert(idx.0);
                self.type_of_type_symbol(symbol_id)
            }
            // Instantiated per call site; left unknown.
            SymbolKind::TypeParam => {
                self.type_exprs.insert(idx.0);
                TypeId::INVALID
            }
            SymbolKind::Nil => TypeId::UNTYPED_NIL,
            SymbolKind::Builtin | SymbolKind::PackageName => TypeId::INVALID,
            SymbolKind::Const | SymbolKind::Var | SymbolKind::Func | SymbolKind::Param => {
                self.type_of_symbol(symbol_id)
            }
        }
    }

    /// The type a type name denotes. Local declarations go through the
    /// named-type table so recursive types resolve to themselves.
    pub(crate) fn type_of_type_symbol(&mut self, symbol_id: SymbolId) -> TypeId {
        let binder = self.binder;
        let Some(symbol) = binder.get_symbol(symbol_id) else {
            return TypeId::INVALID;
        };
        if symbol.is_predeclared() {
            return predeclared_type(&symbol.name);
        }
        if self.arena.kind_of(symbol.decl_node) == Some(syntax_kind_ext::TYPE_SPEC) {
            return self.named_type_for_spec(symbol.decl_node);
        }
        TypeId::INVALID
    }

    /// Type of the value a symbol denotes.
    pub fn type_of_symbol(&mut self, symbol_id: SymbolId) -> TypeId {
        if let Some(&ty) = self.symbol_types.get(&symbol_id) {
            return ty;
        }
        if !self.resolving.insert(symbol_id) {
            // Initialization cycle.
            return TypeId::INVALID;
        }
        let ty = self.compute_symbol_type(symbol_id);
        self.resolving.remove(&symbol_id);
        self.symbol_types.insert(symbol_id, ty);
        ty
    }

    fn compute_symbol_type(&mut self, symbol_id: SymbolId) -> TypeId {
        let arena = self.arena;
        let binder = self.binder;
        let Some(symbol) = binder.get_symbol(symbol_id) else {
            return TypeId::INVALID;
        };
        if symbol.is_predeclared() {
            return match symbol.name.as_str() {
                "true" | "false" => TypeId::UNTYPED_BOOL,
                "iota" => TypeId::UNTYPED_INT,
                name if symbol.kind == SymbolKind::Type => predeclared_type(name),
                _ => TypeId::INVALID,
            };
        }

        let decl = symbol.decl_node;
        let position = symbol.decl_position as usize;
        match (symbol.kind, arena.kind_of(decl)) {
            (SymbolKind::Type, _) => self.type_of_type_symbol(symbol_id),
            (SymbolKind::Func, Some(syntax_kind_ext::FUNCTION_DECLARATION)) => {
                match arena.get(decl).and_then(|n| arena.get_function(n)) {
                    Some(func) => self.signature_type(func),
                    None => TypeId::INVALID,
                }
            }
            (SymbolKind::Param, Some(syntax_kind_ext::PARAMETER)) => {
                match arena.get(decl).and_then(|n| arena.get_parameter(n)) {
                    Some(param) => {
                        let ty = self.resolve_type(param.type_node);
                        if param.is_variadic {
                            self.interner.slice(ty)
                        } else {
                            ty
                        }
                    }
                    None => TypeId::INVALID,
                }
            }
            (SymbolKind::Const, Some(syntax_kind_ext::VALUE_SPEC)) => {
                self.value_spec_type(decl, position, true)
            }
            (SymbolKind::Var, Some(syntax_kind_ext::VALUE_SPEC)) => {
                self.value_spec_type(decl, position, false)
            }
            (SymbolKind::Var, Some(syntax_kind_ext::ASSIGN_STATEMENT)) => {
                self.short_var_type(decl, position)
            }
            (SymbolKind::Var, Some(syntax_kind_ext::RANGE_STATEMENT)) => {
                self.range_variable_type(decl, position)
            }
            (SymbolKind::Var, Some(syntax_kind_ext::SWITCH_STATEMENT)) => {
                self.type_switch_variable_type(decl, symbol.scope)
            }
            _ => TypeId::INVALID,
        }
    }

    /// `const`/`var` spec name at `position`. Constants keep untyped kinds,
    /// variables take the default type.
    fn value_spec_type(&mut self, spec: NodeIndex, position: usize, is_const: bool) -> TypeId {
        let arena = self.arena;
        let Some(data) = arena.get(spec).and_then(|n| arena.get_value_spec(n)) else {
            return TypeId::INVALID;
        };
        if data.type_node.is_some() {
            return self.resolve_type(data.type_node);
        }
        let ty = if !data.values.is_empty() {
            self.initializer_type(&data.values.nodes, data.names.len(), position)
        } else if is_const {
            // Implicit repetition of the previous spec's type and values.
            match self.previous_const_spec(spec) {
                Some(previous) => return self.value_spec_type(previous, position, true),
                None => TypeId::INVALID,
            }
        } else {
            TypeId::INVALID
        };
        if is_const {
            ty
        } else {
            self.interner.default_type(ty)
        }
    }

    /// Nearest earlier spec in the same `const` group with a type or values.
    fn previous_const_spec(&self, spec: NodeIndex) -> Option<NodeIndex> {
        let arena = self.arena;
        let group = arena.parent_of(spec);
        let decl = arena.get(group).and_then(|n| arena.get_gen_decl(n))?;
        let position = decl.specs.nodes.iter().position(|&s| s == spec)?;
        decl.specs.nodes[..position].iter().rev().copied().find(|&s| {
            arena
                .get(s)
                .and_then(|n| arena.get_value_spec(n))
                .is_some_and(|v| v.type_node.is_some() || !v.values.is_empty())
        })
    }

    /// Type of the value assigned to name `position` of `names` by
    /// `values`, for both `n = n` and `n = 1` (multi-value) forms.
    fn initializer_type(&mut self, values: &[NodeIndex], names: usize, position: usize) -> TypeId {
        if values.len() == names {
            return values
                .get(position)
                .map_or(TypeId::INVALID, |&value| self.type_of_expression(value));
        }
        match values {
            [single] => self.multi_value_element(*single, position),
            _ => TypeId::INVALID,
        }
    }

    fn short_var_type(&mut self, assign: NodeIndex, position: usize) -> TypeId {
        let arena = self.arena;
        let Some(data) = arena.get(assign).and_then(|n| arena.get_assignment(n)) else {
            return TypeId::INVALID;
        };
        let ty = self.initializer_type(&data.right.nodes, data.left.len(), position);
        self.interner.default_type(ty)
    }

    /// Element `position` of a multi-valued expression: a call returning
    /// several results, or a comma-ok form (`m[k]`, `x.(T)`, `<-ch`).
    fn multi_value_element(&mut self, expr: NodeIndex, position: usize) -> TypeId {
        let arena = self.arena;
        let inner = arena.skip_parens(expr);
        let ty = self.type_of_expression(inner);
        if let Some(TypeKey::Tuple(elems)) = self.interner.lookup(ty) {
            return elems.get(position).copied().unwrap_or(TypeId::INVALID);
        }
        let comma_ok = match arena.get(inner) {
            Some(node) if node.kind == syntax_kind_ext::INDEX_EXPRESSION => true,
            Some(node) if node.kind == syntax_kind_ext::TYPE_ASSERTION => true,
            Some(node) if node.kind == syntax_kind_ext::UNARY_EXPRESSION => arena
                .get_unary_expr(node)
                .is_some_and(|u| u.operator == SyntaxKind::LessThanMinusToken as u16),
            _ => false,
        };
        match position {
            0 if comma_ok => ty,
            1 if comma_ok => TypeId::UNTYPED_BOOL,
            _ => TypeId::INVALID,
        }
    }

    fn range_variable_type(&mut self, range: NodeIndex, position: usize) -> TypeId {
        let arena = self.arena;
        let Some(data) = arena.get(range).and_then(|n| arena.get_range_statement(n)) else {
            return TypeId::INVALID;
        };
        let ranged = self.type_of_expression(data.expression);
        let mut under = self.interner.underlying(ranged);
        if let Some(elem) = self.interner.pointer_elem(under)
            && matches!(self.interner.lookup(self.interner.underlying(elem)), Some(TypeKey::Array(..)))
        {
            under = self.interner.underlying(elem);
        }
        let (key, value) = match self.interner.lookup(under) {
            Some(TypeKey::Slice(elem)) | Some(TypeKey::Array(_, elem)) => (TypeId::INT, *elem),
            Some(TypeKey::Map(k, v)) => (*k, *v),
            Some(TypeKey::Chan(_, elem)) => (*elem, TypeId::INVALID),
            Some(TypeKey::Basic(_)) if self.interner.is_string_like(under) => {
                (TypeId::INT, TypeId::RUNE)
            }
            // Range over an integer (Go 1.22).
            Some(TypeKey::Basic(_)) => (self.interner.default_type(ranged), TypeId::INVALID),
            _ => (TypeId::INVALID, TypeId::INVALID),
        };
        match position {
            0 => key,
            1 => value,
            _ => TypeId::INVALID,
        }
    }

    /// `switch v := x.(type)`: in a clause listing exactly one type, `v`
    /// has that type; otherwise it has the type of `x`.
    fn type_switch_variable_type(&mut self, switch: NodeIndex, scope: ScopeId) -> TypeId {
        let arena = self.arena;
        let Some(data) = arena.get(switch).and_then(|n| arena.get_switch(n)) else {
            return TypeId::INVALID;
        };
        let guarded = arena
            .get(data.tag)
            .and_then(|n| arena.get_assignment(n))
            .and_then(|assign| assign.right.first())
            .and_then(|assertion| arena.get(assertion))
            .and_then(|n| arena.get_index_expr(n))
            .map(|assertion| assertion.expression);
        let guarded_type = match guarded {
            Some(expr) => self.type_of_expression(expr),
            None => TypeId::INVALID,
        };

        let clause = self
            .binder
            .get_scope(scope)
            .map(|s| s.node)
            .and_then(|node| arena.get(node))
            .and_then(|n| arena.get_case_clause(n));
        match clause.map(|c| c.expressions.nodes.as_slice()) {
            Some([single]) if arena.identifier_text(*single) != Some("nil") => {
                self.resolve_type(*single)
            }
            _ => guarded_type,
        }
    }
}

fn is_expression_kind(kind: u16) -> bool {
    matches!(
        kind,
        syntax_kind_ext::IDENTIFIER
            | syntax_kind_ext::BASIC_LITERAL
            | syntax_kind_ext::SELECTOR_EXPRESSION
            | syntax_kind_ext::CALL_EXPRESSION
            | syntax_kind_ext::INDEX_EXPRESSION
            | syntax_kind_ext::SLICE_EXPRESSION
            | syntax_kind_ext::UNARY_EXPRESSION
            | syntax_kind_ext::BINARY_EXPRESSION
            | syntax_kind_ext::PAREN_EXPRESSION
            | syntax_kind_ext::COMPOSITE_LITERAL
            | syntax_kind_ext::FUNCTION_LITERAL
            | syntax_kind_ext::TYPE_ASSERTION
    )
}

/// Untyped kind of a literal; the literal's token kind is in `Node::flags`.
fn literal_type(token: u16) -> TypeId {
    match SyntaxKind::from_u16(token) {
        Some(SyntaxKind::IntLiteral) => TypeId::UNTYPED_INT,
        Some(SyntaxKind::FloatLiteral) => TypeId::UNTYPED_FLOAT,
        Some(SyntaxKind::ImaginaryLiteral) => TypeId::UNTYPED_COMPLEX,
        Some(SyntaxKind::RuneLiteral) => TypeId::UNTYPED_RUNE,
        Some(SyntaxKind::StringLiteral | SyntaxKind::RawStringLiteral) => TypeId::UNTYPED_STRING,
        _ => TypeId::INVALID,
    }
}

/// Predeclared type names of the universe block.
pub fn predeclared_type(name: &str) -> TypeId {
    match name {
        "bool" => TypeId::BOOL,
        "int" => TypeId::INT,
        "int8" => TypeId::INT8,
        "int16" => TypeId::INT16,
        "int32" => TypeId::INT32,
        "int64" => TypeId::INT64,
        "uint" => TypeId::UINT,
        "uint8" => TypeId::UINT8,
        "uint16" => TypeId::UINT16,
        "uint32" => TypeId::UINT32,
        "uint64" => TypeId::UINT64,
        "uintptr" => TypeId::UINTPTR,
        "float32" => TypeId::FLOAT32,
        "float64" => TypeId::FLOAT64,
        "complex64" => TypeId::COMPLEX64,
        "complex128" => TypeId::COMPLEX128,
        "string" => TypeId::STRING,
        "byte" => TypeId::BYTE,
        "rune" => TypeId::RUNE,
        "error" => TypeId::ERROR,
        "any" => TypeId::EMPTY_INTERFACE,
        _ => TypeId::INVALID,
    }
}
