//! Type expressions: turning `[]T`, `map[K]V`, `struct{...}` and named
//! types into interned `TypeId`s.

use ctxlint_binder::SymbolKind;
use ctxlint_parser::parser::node::FunctionData;
use ctxlint_parser::parser::{node_flags, syntax_kind_ext};
use ctxlint_parser::{NodeIndex, NodeList};
use ctxlint_scanner::SyntaxKind;
use smallvec::SmallVec;

use crate::evaluate::TypeEvaluator;
use crate::types::{ChanDir, FieldInfo, FunctionShape, MethodInfo, TypeId, TypeKey};
use crate::well_known::Qualified;

impl<'a> TypeEvaluator<'a> {
    /// The type denoted by a type expression.
    pub fn resolve_type(&mut self, idx: NodeIndex) -> TypeId {
        let arena = self.arena;
        let Some(node) = arena.get(idx) else {
            return TypeId::INVALID;
        };
        match node.kind {
            syntax_kind_ext::IDENTIFIER => {
                let binder = self.binder;
                match binder.get_node_symbol(idx) {
                    Some(symbol_id)
                        if binder
                            .get_symbol(symbol_id)
                            .is_some_and(|s| s.kind == SymbolKind::Type) =>
                    {
                        self.type_of_type_symbol(symbol_id)
                    }
                    _ => TypeId::INVALID,
                }
            }
            syntax_kind_ext::PAREN_EXPRESSION => match arena.get_wrapped(node) {
                Some(wrapped) => self.resolve_type(wrapped.expression),
                None => TypeId::INVALID,
            },
            syntax_kind_ext::POINTER_TYPE => match arena.get_wrapped(node) {
                Some(wrapped) => {
                    let elem = self.resolve_type(wrapped.expression);
                    self.interner.pointer(elem)
                }
                None => TypeId::INVALID,
            },
            // `*T` parsed in expression position, as in `(*T)(x)`.
            syntax_kind_ext::UNARY_EXPRESSION => match arena.get_unary_expr(node) {
                Some(unary) if unary.operator == SyntaxKind::AsteriskToken as u16 => {
                    let elem = self.resolve_type(unary.operand);
                    self.interner.pointer(elem)
                }
                _ => TypeId::INVALID,
            },
            syntax_kind_ext::ARRAY_TYPE => match arena.get_index_expr(node) {
                Some(data) => {
                    let elem = self.resolve_type(data.expression);
                    if data.index.is_none() {
                        self.interner.slice(elem)
                    } else {
                        let len = self.array_length(data.index);
                        self.interner.array(len, elem)
                    }
                }
                None => TypeId::INVALID,
            },
            syntax_kind_ext::MAP_TYPE => match arena.get_index_expr(node) {
                Some(data) => {
                    let key = self.resolve_type(data.index);
                    let value = self.resolve_type(data.expression);
                    self.interner.map(key, value)
                }
                None => TypeId::INVALID,
            },
            syntax_kind_ext::CHAN_TYPE => match arena.get_wrapped(node) {
                Some(wrapped) => {
                    let dir = if node.flags & node_flags::CHAN_SEND != 0 {
                        ChanDir::SendOnly
                    } else if node.flags & node_flags::CHAN_RECV != 0 {
                        ChanDir::RecvOnly
                    } else {
                        ChanDir::Both
                    };
                    let elem = self.resolve_type(wrapped.expression);
                    self.interner.chan(dir, elem)
                }
                None => TypeId::INVALID,
            },
            syntax_kind_ext::FUNCTION_TYPE => match arena.get_function(node) {
                Some(func) => self.signature_type(func),
                None => TypeId::INVALID,
            },
            syntax_kind_ext::STRUCT_TYPE => match arena.get_list(node) {
                Some(list) => self.struct_type(&list.list),
                None => TypeId::INVALID,
            },
            syntax_kind_ext::INTERFACE_TYPE => match arena.get_list(node) {
                Some(list) => self.interface_type(&list.list),
                None => TypeId::INVALID,
            },
            syntax_kind_ext::SELECTOR_EXPRESSION => {
                let Some(data) = arena.get_selector_expr(node) else {
                    return TypeId::INVALID;
                };
                match arena.identifier_text(data.name) {
                    Some(name) => match self.stdlib_member(data.expression, name) {
                        Some(Qualified::Type(ty)) => ty,
                        _ => TypeId::INVALID,
                    },
                    None => TypeId::INVALID,
                }
            }
            _ => TypeId::INVALID,
        }
    }

    /// The type declared by a `TYPE_SPEC`. The named type is registered
    /// before its definition is resolved.
    pub(crate) fn named_type_for_spec(&mut self, spec: NodeIndex) -> TypeId {
        if let Some(&ty) = self.named_types.get(&spec.0) {
            return ty;
        }
        let arena = self.arena;
        let Some(data) = arena.get(spec).and_then(|n| arena.get_type_spec(n)) else {
            return TypeId::INVALID;
        };
        if data.is_alias {
            self.named_types.insert(spec.0, TypeId::INVALID);
            let ty = self.resolve_type(data.type_node);
            self.named_types.insert(spec.0, ty);
            return ty;
        }
        let name = arena.identifier_text(data.name).unwrap_or("_");
        let package = self.package.clone();
        let named = self.interner.declare_named(name, package.as_deref(), spec);
        self.named_types.insert(spec.0, named);
        let underlying = self.resolve_type(data.type_node);
        self.interner.set_underlying(named, underlying);
        named
    }

    /// Function type of a signature, without receiver.
    pub(crate) fn signature_type(&mut self, func: &FunctionData) -> TypeId {
        let (params, variadic) = self.parameter_types(&func.parameters);
        let (results, _) = self.parameter_types(&func.results);
        self.interner.function(FunctionShape {
            params: params.into_vec(),
            results: results.into_vec(),
            variadic,
        })
    }

    /// One type per declared name (or per unnamed parameter).
    fn parameter_types(&mut self, list: &NodeList) -> (SmallVec<[TypeId; 4]>, bool) {
        let arena = self.arena;
        let mut types = SmallVec::new();
        let mut variadic = false;
        for param in list.iter() {
            let Some(data) = arena.get(param).and_then(|n| arena.get_parameter(n)) else {
                continue;
            };
            let mut ty = self.resolve_type(data.type_node);
            if data.is_variadic {
                ty = self.interner.slice(ty);
                variadic = true;
            }
            for _ in 0..data.names.len().max(1) {
                types.push(ty);
            }
        }
        (types, variadic)
    }

    fn struct_type(&mut self, fields: &NodeList) -> TypeId {
        let arena = self.arena;
        let mut infos = Vec::with_capacity(fields.len());
        for field in fields.iter() {
            let Some(data) = arena.get(field).and_then(|n| arena.get_parameter(n)) else {
                continue;
            };
            let ty = self.resolve_type(data.type_node);
            if data.names.is_empty() {
                infos.push(FieldInfo {
                    name: self.embedded_field_name(data.type_node),
                    type_id: ty,
                    embedded: true,
                });
            } else {
                for name in data.names.iter() {
                    infos.push(FieldInfo {
                        name: arena.identifier_text(name).unwrap_or("_").to_string(),
                        type_id: ty,
                        embedded: false,
                    });
                }
            }
        }
        self.interner.structure(infos)
    }

    /// `T`, `*T` and `pkg.T` embed a field named `T`.
    fn embedded_field_name(&self, type_node: NodeIndex) -> String {
        let arena = self.arena;
        let mut current = type_node;
        loop {
            let Some(node) = arena.get(current) else {
                return String::new();
            };
            match node.kind {
                syntax_kind_ext::IDENTIFIER => {
                    return arena.identifier_text(current).unwrap_or_default().to_string();
                }
                syntax_kind_ext::SELECTOR_EXPRESSION => {
                    return arena
                        .get_selector_expr(node)
                        .and_then(|s| arena.identifier_text(s.name))
                        .unwrap_or_default()
                        .to_string();
                }
                syntax_kind_ext::POINTER_TYPE | syntax_kind_ext::PAREN_EXPRESSION => {
                    match arena.get_wrapped(node) {
                        Some(wrapped) => current = wrapped.expression,
                        None => return String::new(),
                    }
                }
                _ => return String::new(),
            }
        }
    }

    /// Method set of an interface; embedded interfaces are flattened and
    /// methods are kept sorted by name.
    fn interface_type(&mut self, elements: &NodeList) -> TypeId {
        let arena = self.arena;
        let mut methods: Vec<MethodInfo> = Vec::new();
        for element in elements.iter() {
            let Some(data) = arena.get(element).and_then(|n| arena.get_parameter(n)) else {
                continue;
            };
            if let Some(name) = data.names.first() {
                let type_id = self.resolve_type(data.type_node);
                methods.push(MethodInfo {
                    name: arena.identifier_text(name).unwrap_or("_").to_string(),
                    type_id,
                });
                continue;
            }
            let embedded = self.resolve_type(data.type_node);
            let underlying = self.interner.underlying(embedded);
            if let Some(TypeKey::Interface(inner)) = self.interner.lookup(underlying) {
                methods.extend(inner.iter().cloned());
            }
        }
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods.dedup_by(|a, b| a.name == b.name);
        self.interner.interface(methods)
    }

    /// Length of an array type when written as an integer literal.
    fn array_length(&self, idx: NodeIndex) -> Option<u64> {
        let arena = self.arena;
        let node = arena.get(idx)?;
        if node.kind != syntax_kind_ext::BASIC_LITERAL
            || node.flags != SyntaxKind::IntLiteral as u16
        {
            return None;
        }
        parse_int_literal(&arena.get_literal(node)?.text)
    }
}

/// Value of a Go integer literal (`42`, `0x2A`, `0o52`, `052`, `0b101010`,
/// with optional `_` separators).
pub fn parse_int_literal(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|&c| c != '_').collect();
    let lower = digits.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        u64::from_str_radix(oct, 8).ok()
    } else if lower.len() > 1 && lower.starts_with('0') {
        u64::from_str_radix(&lower[1..], 8).ok()
    } else {
        lower.parse().ok()
    }
}
