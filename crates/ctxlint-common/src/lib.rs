//! Common types and utilities for ctxlint.
//!
//! This crate provides foundational types used across all ctxlint crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Source spans (`Span`)
//! - Position/line-map types for line/column source locations
//! - Go-style string quoting used in diagnostic messages

// Diagnostic types, codes and message templates
pub mod diagnostics;
pub use diagnostics::{
    Diagnostic, DiagnosticCategory, diagnostic_codes, diagnostic_messages, format_message,
};

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Position/LineMap types for line/column source locations
pub mod position;
pub use position::{LineMap, Position};

// `%q`-compatible quoting
pub mod quote;
pub use quote::go_quote;

#[cfg(test)]
#[path = "../tests/common_tests.rs"]
mod common_tests;
