//! Source-text rendering of syntax nodes.
//!
//! Diagnostics quote the code they point at exactly as written, so rendering
//! returns the node's source span rather than a re-formatted tree.

use thiserror::Error;

use crate::parser::base::NodeIndex;
use crate::parser::node::NodeArena;
use crate::parser::syntax_kind_ext;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("node {0:?} does not exist in the arena")]
    InvalidNode(NodeIndex),
    #[error("node {index:?} spans {start}..{end}, outside the {len}-byte source")]
    SpanOutOfBounds {
        index: NodeIndex,
        start: u32,
        end: u32,
        len: usize,
    },
    #[error("cannot render malformed node at offset {0}")]
    Malformed(u32),
}

pub struct Printer<'a> {
    arena: &'a NodeArena,
    source: &'a str,
}

impl<'a> Printer<'a> {
    pub fn new(arena: &'a NodeArena, source: &'a str) -> Self {
        Printer { arena, source }
    }

    /// Source text of `index`.
    pub fn render(&self, index: NodeIndex) -> Result<String, RenderError> {
        let node = self
            .arena
            .get(index)
            .ok_or(RenderError::InvalidNode(index))?;
        if matches!(
            node.kind,
            syntax_kind_ext::BAD_EXPRESSION | syntax_kind_ext::BAD_STATEMENT
        ) {
            return Err(RenderError::Malformed(node.pos));
        }
        self.source
            .get(node.pos as usize..node.end as usize)
            .map(str::to_string)
            .ok_or(RenderError::SpanOutOfBounds {
                index,
                start: node.pos,
                end: node.end,
                len: self.source.len(),
            })
    }

    /// `[a,b,c]` with each element rendered from source.
    pub fn render_list(&self, nodes: &[NodeIndex]) -> Result<String, RenderError> {
        let mut out = String::from("[");
        for (i, &node) in nodes.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            out.push_str(&self.render(node)?);
        }
        out.push(']');
        Ok(out)
    }
}
