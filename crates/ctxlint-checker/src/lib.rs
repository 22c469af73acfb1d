//! Structured-context checking of calls to a watched Go API.
//!
//! This crate is organized into several submodules:
//! - `api` - `WatchedApi` descriptions and the built-in analyzers
//! - `config` - JSON analyzer configuration and the `AnalyzerSet` registry
//! - `target` - resolving the watched package's local name in a file
//! - `classify` - `CallClass`, deciding which calls reach the watched API
//! - `extract` - selecting the context arguments of a call
//! - `validate` - parity and key-type checks
//! - `reporter` - `DiagnosticSink` and message construction
//!
//! A file is checked with [`analyze`], given its syntax tree, bindings and a
//! [`TypeOracle`] for argument types.

pub mod api;
pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod oracle;
pub mod reporter;
pub mod state;
pub mod target;
mod validate;

pub use api::{ContextRule, WatchedApi, builtin_analyzers, logcheck, serrorscheck};
pub use classify::CallClass;
pub use config::{AnalyzerSet, ConfigError, ConfigFile};
pub use context::SourceFile;
pub use error::CheckError;
pub use extract::{Extraction, extract_context};
pub use oracle::TypeOracle;
pub use reporter::DiagnosticSink;
pub use state::{CheckerState, analyze, analyze_into};
pub use target::resolve_alias;

#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
