//! Go parser and syntax tree for ctxlint.
//!
//! - `parser` - `ParserState`, the thin-node `NodeArena` and node kinds
//! - `printer` - renders nodes back to their source text for diagnostics

pub mod parser;
pub use parser::{NodeArena, NodeIndex, NodeList, ParseDiagnostic, ParserState};

pub mod printer;
pub use printer::{Printer, RenderError};
