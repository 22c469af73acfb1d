//! Typing rules for operators, calls, selectors and literals.

use ctxlint_binder::SymbolKind;
use ctxlint_parser::parser::syntax_kind_ext;
use ctxlint_parser::NodeIndex;
use ctxlint_scanner::SyntaxKind;

use crate::evaluate::TypeEvaluator;
use crate::types::{BasicInfo, TypeId, TypeKey};
use crate::well_known::Qualified;

/// Depth limit when searching embedded struct fields.
const MAX_EMBEDDING_DEPTH: u32 = 8;

impl<'a> TypeEvaluator<'a> {
    // =========================================================================
    // Selectors
    // =========================================================================

    pub(crate) fn type_of_selector(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let Some(data) = arena.get(idx).and_then(|n| arena.get_selector_expr(n)) else {
            return TypeId::INVALID;
        };
        let Some(name) = arena.identifier_text(data.name) else {
            return TypeId::INVALID;
        };
        if self
            .binder
            .resolve(data.expression)
            .is_some_and(|s| s.kind == SymbolKind::PackageName)
        {
            // Members of other packages are not visible beyond the table.
            return match self.stdlib_member(data.expression, name) {
                Some(Qualified::Type(ty)) => {
                    self.type_exprs.insert(idx.0);
                    ty
                }
                Some(Qualified::Value(ty)) => ty,
                None => TypeId::INVALID,
            };
        }

        let base = self.type_of_expression(data.expression);
        if self.type_exprs.contains(&data.expression.0) {
            // Method expression `T.M`: the receiver becomes the first parameter.
            let Some(method) = self.lookup_member(base, name, 0) else {
                return TypeId::INVALID;
            };
            let Some(mut shape) = self.interner.function_shape(method).cloned() else {
                return TypeId::INVALID;
            };
            shape.params.insert(0, base);
            return self.interner.function(shape);
        }
        self.lookup_member(base, name, 0).unwrap_or(TypeId::INVALID)
    }

    /// Field or method `name` of a value of type `ty`, looking through one
    /// pointer indirection and into embedded fields.
    pub fn lookup_member(&mut self, ty: TypeId, name: &str, depth: u32) -> Option<TypeId> {
        if ty.is_invalid() || depth > MAX_EMBEDDING_DEPTH {
            return None;
        }
        let named = if self.interner.named_info(ty).is_some() {
            Some(ty)
        } else {
            self.interner
                .pointer_elem(ty)
                .filter(|&elem| self.interner.named_info(elem).is_some())
        };
        if let Some(named) = named
            && let Some(method) = self.method_type(named, name)
        {
            return Some(method);
        }

        let mut base = named.unwrap_or(ty);
        if named.is_none()
            && let Some(elem) = self.interner.pointer_elem(ty)
        {
            base = elem;
        }
        let underlying = self.interner.underlying(base);
        match self.interner.lookup(underlying).cloned() {
            Some(TypeKey::Struct(fields)) => {
                if let Some(field) = fields.iter().find(|f| f.name == name) {
                    return Some(field.type_id);
                }
                fields
                    .iter()
                    .filter(|f| f.embedded)
                    .find_map(|f| self.lookup_member(f.type_id, name, depth + 1))
            }
            Some(TypeKey::Interface(methods)) => methods
                .iter()
                .find(|m| m.name == name)
                .map(|m| m.type_id),
            _ => None,
        }
    }

    /// Signature of method `name` declared on the named type `named`.
    fn method_type(&mut self, named: TypeId, name: &str) -> Option<TypeId> {
        let arena = self.arena;
        let declaration = self.interner.named_info(named)?.declaration;
        let type_name = arena
            .get(declaration)
            .and_then(|n| arena.get_type_spec(n))?
            .name;
        let symbol = self.binder.get_node_symbol(type_name)?;
        let decl = *self.methods.get(&symbol)?.get(name)?;
        let func = arena.get(decl).and_then(|n| arena.get_function(n))?;
        Some(self.signature_type(func))
    }

    // =========================================================================
    // Calls
    // =========================================================================

    pub(crate) fn type_of_call(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let Some(data) = arena.get(idx).and_then(|n| arena.get_call_expr(n)) else {
            return TypeId::INVALID;
        };
        let callee_type = self.type_of_expression(data.expression);
        if self.type_exprs.contains(&data.expression.0) {
            // Conversion `T(x)`.
            return callee_type;
        }

        let binder = self.binder;
        let callee = arena.skip_parens(data.expression);
        if let Some(symbol) = binder.resolve(callee)
            && symbol.kind == SymbolKind::Builtin
        {
            return self.builtin_call_type(&symbol.name, &data.arguments.nodes);
        }

        match self.interner.function_shape(callee_type) {
            Some(shape) => {
                let results = shape.results.clone();
                self.interner.tuple(results)
            }
            None => TypeId::INVALID,
        }
    }

    fn builtin_call_type(&mut self, name: &str, args: &[NodeIndex]) -> TypeId {
        match name {
            "len" | "cap" | "copy" => TypeId::INT,
            "append" => match args.first() {
                Some(&first) => {
                    let ty = self.type_of_expression(first);
                    self.interner.default_type(ty)
                }
                None => TypeId::INVALID,
            },
            "make" => match args.first() {
                Some(&first) => self.resolve_type(first),
                None => TypeId::INVALID,
            },
            "new" => match args.first() {
                Some(&first) => {
                    let elem = self.resolve_type(first);
                    self.interner.pointer(elem)
                }
                None => TypeId::INVALID,
            },
            "complex" => {
                let all_untyped = args.iter().all(|&arg| {
                    let ty = self.type_of_expression(arg);
                    self.interner.is_untyped(ty)
                });
                if all_untyped {
                    TypeId::UNTYPED_COMPLEX
                } else {
                    TypeId::COMPLEX128
                }
            }
            "real" | "imag" => match args.first().map(|&arg| self.type_of_expression(arg)) {
                Some(TypeId::COMPLEX64) => TypeId::FLOAT32,
                Some(ty) if self.interner.is_untyped(ty) => TypeId::UNTYPED_FLOAT,
                Some(_) => TypeId::FLOAT64,
                None => TypeId::INVALID,
            },
            "min" | "max" => {
                let mut result = TypeId::INVALID;
                for (i, &arg) in args.iter().enumerate() {
                    let ty = self.type_of_expression(arg);
                    result = if i == 0 {
                        ty
                    } else {
                        self.arithmetic_result(result, ty)
                    };
                }
                result
            }
            "recover" => TypeId::EMPTY_INTERFACE,
            _ => TypeId::VOID,
        }
    }

    // =========================================================================
    // Index and slice
    // =========================================================================

    pub(crate) fn type_of_index(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let Some(data) = arena.get(idx).and_then(|n| arena.get_index_expr(n)) else {
            return TypeId::INVALID;
        };
        let base = self.type_of_expression(data.expression);
        if self.type_exprs.contains(&data.expression.0) {
            // Instantiation of a generic type.
            self.type_exprs.insert(idx.0);
            return TypeId::INVALID;
        }
        if self.interner.is_string_like(base) {
            return TypeId::BYTE;
        }
        let underlying = self.array_or_pointee(base);
        match self.interner.lookup(underlying) {
            Some(TypeKey::Slice(elem)) | Some(TypeKey::Array(_, elem)) => *elem,
            Some(TypeKey::Map(_, value)) => *value,
            _ => TypeId::INVALID,
        }
    }

    pub(crate) fn type_of_slice(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let Some(data) = arena.get(idx).and_then(|n| arena.get_slice_expr(n)) else {
            return TypeId::INVALID;
        };
        let base = self.type_of_expression(data.expression);
        if self.interner.is_string_like(base) {
            return self.interner.default_type(base);
        }
        let underlying = self.array_or_pointee(base);
        let array_elem = match self.interner.lookup(underlying) {
            Some(TypeKey::Slice(_)) => return base,
            Some(TypeKey::Array(_, elem)) => *elem,
            _ => return TypeId::INVALID,
        };
        self.interner.slice(array_elem)
    }

    /// Underlying type, looking through a pointer to an array.
    fn array_or_pointee(&self, ty: TypeId) -> TypeId {
        let underlying = self.interner.underlying(ty);
        if let Some(elem) = self.interner.pointer_elem(underlying) {
            let pointee = self.interner.underlying(elem);
            if matches!(self.interner.lookup(pointee), Some(TypeKey::Array(..))) {
                return pointee;
            }
        }
        underlying
    }

    // =========================================================================
    // Operators
    // =========================================================================

    pub(crate) fn type_of_unary(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let Some(data) = arena.get(idx).and_then(|n| arena.get_unary_expr(n)) else {
            return TypeId::INVALID;
        };
        let operand = self.type_of_expression(data.operand);
        match SyntaxKind::from_u16(data.operator) {
            Some(SyntaxKind::AmpersandToken) => self.interner.pointer(operand),
            Some(SyntaxKind::AsteriskToken) => {
                if self.type_exprs.contains(&data.operand.0) {
                    self.type_exprs.insert(idx.0);
                    self.interner.pointer(operand)
                } else {
                    self.interner.pointer_elem(operand).unwrap_or(TypeId::INVALID)
                }
            }
            Some(SyntaxKind::LessThanMinusToken) => {
                match self.interner.lookup(self.interner.underlying(operand)) {
                    Some(TypeKey::Chan(_, elem)) => *elem,
                    _ => TypeId::INVALID,
                }
            }
            Some(
                SyntaxKind::ExclamationToken
                | SyntaxKind::MinusToken
                | SyntaxKind::PlusToken
                | SyntaxKind::CaretToken,
            ) => operand,
            _ => TypeId::INVALID,
        }
    }

    pub(crate) fn type_of_binary(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let Some(data) = arena.get(idx).and_then(|n| arena.get_binary_expr(n)) else {
            return TypeId::INVALID;
        };
        let left = self.type_of_expression(data.left);
        let right = self.type_of_expression(data.right);
        match SyntaxKind::from_u16(data.operator) {
            Some(
                SyntaxKind::EqualsEqualsToken
                | SyntaxKind::ExclamationEqualsToken
                | SyntaxKind::LessThanToken
                | SyntaxKind::LessThanEqualsToken
                | SyntaxKind::GreaterThanToken
                | SyntaxKind::GreaterThanEqualsToken,
            ) => TypeId::UNTYPED_BOOL,
            Some(SyntaxKind::LessThanLessThanToken | SyntaxKind::GreaterThanGreaterThanToken) => left,
            _ => self.arithmetic_result(left, right),
        }
    }

    /// Result of a binary operation on operands of matching types: a typed
    /// operand wins over an untyped one; two untyped numeric operands yield
    /// the larger untyped kind.
    pub(crate) fn arithmetic_result(&self, left: TypeId, right: TypeId) -> TypeId {
        if left.is_invalid() || right.is_invalid() {
            return TypeId::INVALID;
        }
        let left_untyped = self.interner.is_untyped(left);
        let right_untyped = self.interner.is_untyped(right);
        match (left_untyped, right_untyped) {
            (false, _) => left,
            (true, false) => right,
            (true, true) => {
                let (Some(l), Some(r)) = (self.interner.basic_kind(left), self.interner.basic_kind(right))
                else {
                    return TypeId::INVALID;
                };
                let numeric = BasicInfo::IS_NUMERIC;
                if l.info().intersects(numeric) && r.info().intersects(numeric) {
                    if r.untyped_rank() > l.untyped_rank() { right } else { left }
                } else {
                    left
                }
            }
        }
    }

    // =========================================================================
    // Composite literals
    // =========================================================================

    pub(crate) fn type_of_composite_literal(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let Some(data) = arena.get(idx).and_then(|n| arena.get_composite_literal(n)) else {
            return TypeId::INVALID;
        };
        if data.type_node.is_none() {
            return self.elided_literal_type(idx);
        }
        // `[...]T{...}` takes its length from the elements.
        if let Some(array) = arena
            .get(data.type_node)
            .filter(|n| n.kind == syntax_kind_ext::ARRAY_TYPE)
            .and_then(|n| arena.get_index_expr(n))
            && arena.identifier_text(array.index) == Some("...")
        {
            let elem = self.resolve_type(array.expression);
            return self.interner.array(Some(data.elements.len() as u64), elem);
        }
        self.resolve_type(data.type_node)
    }

    /// Element literal with its type elided (`[]T{{...}}`): the element,
    /// key or value type of the enclosing literal.
    fn elided_literal_type(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let parent = arena.parent_of(idx);
        let (outer, is_key) = match arena.get(parent) {
            Some(node) if node.kind == syntax_kind_ext::KEY_VALUE_EXPRESSION => {
                let is_key = arena.get_binary_expr(node).is_some_and(|kv| kv.left == idx);
                (arena.parent_of(parent), is_key)
            }
            _ => (parent, false),
        };
        if arena.kind_of(outer) != Some(syntax_kind_ext::COMPOSITE_LITERAL) {
            return TypeId::INVALID;
        }
        let outer_type = self.type_of_expression(outer);
        match self.interner.lookup(self.interner.underlying(outer_type)) {
            Some(TypeKey::Slice(elem)) | Some(TypeKey::Array(_, elem)) => *elem,
            Some(TypeKey::Map(key, value)) => {
                if is_key {
                    *key
                } else {
                    *value
                }
            }
            _ => TypeId::INVALID,
        }
    }
}
