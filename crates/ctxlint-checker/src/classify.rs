//! Deciding whether a call goes to the watched API.
//!
//! Only one hop of indirection is followed: a local variable initialized
//! directly from a constructor call. Values passed through parameters,
//! fields or further assignments are out of scope.

use ctxlint_binder::{SymbolId, SymbolKind};
use ctxlint_parser::NodeIndex;
use ctxlint_parser::parser::syntax_kind_ext;
use ctxlint_scanner::SyntaxKind;
use tracing::trace;

use crate::state::CheckerState;

/// How the receiver of `<receiver>.<method>(...)` relates to the watched API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallClass {
    /// `pkg.Method(...)`.
    DirectPackageCall,
    /// `x.Method(...)` after `x := pkg.New()`.
    BoundVariableCall,
    /// `pkg.New().Method(...)`.
    ChainedConstructorCall,
    OutOfScope,
}

impl CallClass {
    pub fn is_watched(self) -> bool {
        self != CallClass::OutOfScope
    }
}

impl<'a> CheckerState<'a> {
    pub fn classify(&mut self, receiver: NodeIndex) -> CallClass {
        let arena = self.file.arena;
        let Some(node) = arena.get(receiver) else {
            return CallClass::OutOfScope;
        };
        match node.kind {
            syntax_kind_ext::IDENTIFIER => {
                if self.is_package_ident(receiver) {
                    return CallClass::DirectPackageCall;
                }
                match self.file.binder.get_node_symbol(receiver) {
                    Some(symbol) if self.is_bound_value(symbol) => CallClass::BoundVariableCall,
                    _ => CallClass::OutOfScope,
                }
            }
            syntax_kind_ext::CALL_EXPRESSION if self.is_constructor_call(receiver) => {
                CallClass::ChainedConstructorCall
            }
            _ => CallClass::OutOfScope,
        }
    }

    /// An identifier naming the watched package, not shadowed by a local.
    pub(crate) fn is_package_ident(&self, idx: NodeIndex) -> bool {
        if self.file.arena.identifier_text(idx) != Some(self.alias.as_str()) {
            return false;
        }
        match self.file.binder.resolve(idx) {
            Some(symbol) => symbol.kind == SymbolKind::PackageName,
            None => true,
        }
    }

    /// `pkg.Ctor(...)` for one of the watched constructors.
    pub(crate) fn is_constructor_call(&self, idx: NodeIndex) -> bool {
        let arena = self.file.arena;
        let Some(call) = arena.get(idx).and_then(|n| arena.get_call_expr(n)) else {
            return false;
        };
        let Some(selector) = arena
            .get(call.expression)
            .and_then(|n| arena.get_selector_expr(n))
        else {
            return false;
        };
        let Some(name) = arena.identifier_text(selector.name) else {
            return false;
        };
        self.api.is_constructor(name) && self.is_package_ident(selector.expression)
    }

    fn is_bound_value(&mut self, symbol: SymbolId) -> bool {
        if let Some(&bound) = self.bound_values.get(&symbol) {
            return bound;
        }
        let bound = self.compute_bound_value(symbol);
        trace!(symbol = symbol.0, bound, "bound value");
        self.bound_values.insert(symbol, bound);
        bound
    }

    /// `x := pkg.Ctor()`, with `x` bound positionally to the call.
    fn compute_bound_value(&self, symbol: SymbolId) -> bool {
        let arena = self.file.arena;
        let Some(symbol) = self.file.binder.get_symbol(symbol) else {
            return false;
        };
        if symbol.kind != SymbolKind::Var {
            return false;
        }
        let Some(assign) = arena
            .get(symbol.decl_node)
            .and_then(|n| arena.get_assignment(n))
        else {
            return false;
        };
        if assign.operator != SyntaxKind::ColonEqualsToken as u16
            || assign.left.len() != assign.right.len()
        {
            return false;
        }
        assign
            .right
            .nodes
            .get(symbol.decl_position as usize)
            .is_some_and(|&rhs| self.is_constructor_call(rhs))
    }
}
