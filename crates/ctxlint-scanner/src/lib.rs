//! Go scanner/tokenizer for ctxlint.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine, including Go's automatic
//!   semicolon insertion

pub mod syntax_kind;
pub use syntax_kind::*;

pub mod scanner;
pub use scanner::{ScannerDiagnostic, ScannerState};

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod scanner_tests;
