//! Line/column positions for reporting.
//!
//! Offsets are bytes. Lines and columns are 1-based when displayed, matching
//! the `file:line:col` convention of Go tooling; `Position` itself stores the
//! 0-based line and the 0-based byte column.

use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    /// 1-based `(line, column)` pair for display.
    pub fn one_based(&self) -> (u32, u32) {
        (self.line + 1, self.character + 1)
    }
}

/// Starting offset of every line in a source text.
#[derive(Clone, Debug, Default)]
pub struct LineMap {
    /// Starting offset of each line (line_starts[0] is always 0)
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map from source text.
    pub fn build(source: &str) -> Self {
        let mut line_starts = vec![0u32];
        line_starts.extend(memchr::memchr_iter(b'\n', source.as_bytes()).map(|i| (i + 1) as u32));
        LineMap { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a Position (0-based line, byte column).
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert_point) => insert_point.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        Position {
            line: line as u32,
            character: offset.saturating_sub(line_start),
        }
    }

    /// Byte range of a 0-based line, without its trailing newline.
    pub fn line_range(&self, line: usize, source: &str) -> Option<(usize, usize)> {
        let start = *self.line_starts.get(line)? as usize;
        let mut end = self
            .line_starts
            .get(line + 1)
            .map_or(source.len(), |next| (*next as usize).saturating_sub(1));
        if end > start && source.as_bytes().get(end - 1) == Some(&b'\r') {
            end -= 1;
        }
        Some((start, end.max(start)))
    }
}
