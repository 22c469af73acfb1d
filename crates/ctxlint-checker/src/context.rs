//! The per-file inputs of a check.

use ctxlint_binder::BinderState;
use ctxlint_parser::{NodeArena, NodeIndex};

/// A parsed and bound source file.
#[derive(Clone, Copy)]
pub struct SourceFile<'a> {
    pub file_name: &'a str,
    pub source: &'a str,
    pub arena: &'a NodeArena,
    pub binder: &'a BinderState,
    /// The `SOURCE_FILE` node.
    pub root: NodeIndex,
}

impl<'a> SourceFile<'a> {
    pub fn new(
        file_name: &'a str,
        source: &'a str,
        arena: &'a NodeArena,
        binder: &'a BinderState,
        root: NodeIndex,
    ) -> Self {
        SourceFile {
            file_name,
            source,
            arena,
            binder,
            root,
        }
    }
}
