//! Name binder for ctxlint.
//!
//! Builds lexical scopes over a parsed Go file and resolves every identifier
//! in expression or type position to the symbol it denotes.
//!
//! - `symbols` - `Symbol`, `SymbolId`, `SymbolKind` and the `SymbolArena`
//! - `scopes` - `Scope`, `ScopeId`, `ScopeKind` and the universe block
//! - `state` - `BinderState`, the per-file binding pass and its queries

pub mod symbols;
pub use symbols::{Symbol, SymbolArena, SymbolId, SymbolKind};

pub mod scopes;
pub use scopes::{Scope, ScopeId, ScopeKind};

mod state;
pub use state::{BinderState, ResolutionStats};
mod state_binding;
pub use state_binding::default_package_name;
