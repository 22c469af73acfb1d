//! ctxlint checks the structured-context arguments of Go logging and error
//! calls.
//!
//! - `program` - the per-file pipeline and the parallel driver
//! - `analysistest` - the `// want` fixture harness
//! - `tracing_config` - `CTXLINT_LOG` subscriber setup
//!
//! The front end lives in the `ctxlint-scanner`, `ctxlint-parser`,
//! `ctxlint-binder` and `ctxlint-solver` crates; the analysis engine in
//! `ctxlint-checker`.

pub mod analysistest;
pub mod program;
pub mod tracing_config;

pub use ctxlint_checker::{
    AnalyzerSet, CheckError, ConfigError, ContextRule, WatchedApi, builtin_analyzers, logcheck,
    serrorscheck,
};
pub use ctxlint_common::{Diagnostic, LineMap};
pub use program::{
    CheckStats, FileReport, PARSER_SOURCE, check_source, check_sources, check_sources_with_stats,
};
