use ctxlint_parser::RenderError;
use thiserror::Error;

/// Faults that stop the analysis of a file.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error("{file}: cannot render source for a diagnostic")]
    Render {
        file: String,
        #[source]
        source: RenderError,
    },
    #[error("{file}: node {node} has no source span")]
    MissingSpan { file: String, node: u32 },
}
