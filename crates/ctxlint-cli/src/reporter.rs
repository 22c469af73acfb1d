use colored::Colorize;
use ctxlint_common::{Diagnostic, DiagnosticCategory, LineMap};
use serde::Serialize;
use std::collections::HashMap;

struct SourceText {
    text: String,
    line_map: LineMap,
}

/// Renders diagnostics as `file:line:col: message` with a source snippet,
/// or as JSON.
pub struct Reporter {
    color: bool,
    sources: HashMap<String, SourceText>,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    #[serde(flatten)]
    diagnostic: &'a Diagnostic,
    line: u32,
    column: u32,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    diagnostics: Vec<JsonDiagnostic<'a>>,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter {
            color,
            sources: HashMap::new(),
        }
    }

    pub fn add_source(&mut self, file: &str, text: &str) {
        self.sources.insert(
            file.to_string(),
            SourceText {
                text: text.to_string(),
                line_map: LineMap::build(text),
            },
        );
    }

    pub fn render(&self, diagnostics: &[Diagnostic]) -> String {
        let mut out = String::new();
        for (index, diagnostic) in diagnostics.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            out.push_str(&self.format_diagnostic(diagnostic));
        }
        out
    }

    pub fn render_json(&self, diagnostics: &[Diagnostic]) -> serde_json::Result<String> {
        let diagnostics = diagnostics
            .iter()
            .map(|diagnostic| {
                let (line, column) = self
                    .position_for(&diagnostic.file, diagnostic.start)
                    .unwrap_or((0, 0));
                JsonDiagnostic {
                    diagnostic,
                    line,
                    column,
                }
            })
            .collect();
        serde_json::to_string_pretty(&JsonReport { diagnostics })
    }

    pub fn format_diagnostic(&self, diagnostic: &Diagnostic) -> String {
        let mut output = match self.position_for(&diagnostic.file, diagnostic.start) {
            Some((line, column)) => format!("{}:{line}:{column}", diagnostic.file),
            None if !diagnostic.file.is_empty() => diagnostic.file.clone(),
            None => "<unknown>".to_string(),
        };
        if self.color {
            output = output.bold().to_string();
        }

        output.push_str(": ");
        output.push_str(&self.format_category(diagnostic.category));
        output.push_str(": ");
        output.push_str(&diagnostic.message_text);
        if !diagnostic.source.is_empty() {
            let source = format!("({})", diagnostic.source);
            output.push(' ');
            if self.color {
                output.push_str(&source.dimmed().to_string());
            } else {
                output.push_str(&source);
            }
        }

        if let Some(snippet) =
            self.format_snippet(&diagnostic.file, diagnostic.start, diagnostic.length)
        {
            output.push_str(&snippet);
        }
        output
    }

    /// The offending line with the span underlined:
    ///
    /// ```text
    ///    12       log.Info("msg", "key")
    ///             ~~~~~~~~~~~~~~~~~~~~~~
    /// ```
    fn format_snippet(&self, file: &str, start: u32, length: u32) -> Option<String> {
        if length == 0 {
            return None;
        }
        let source = self.sources.get(file)?;
        let position = source.line_map.offset_to_position(start);
        let (line_start, line_end) = source
            .line_map
            .line_range(position.line as usize, &source.text)?;
        let line_text = source.text.get(line_start..line_end)?;

        let span_start = position.character as usize;
        let span_end = (start as usize + length as usize).min(line_end) - line_start;
        let mut underline = String::new();
        for (offset, ch) in line_text.char_indices() {
            if offset >= span_end {
                break;
            }
            let mark = if offset < span_start { ' ' } else { '~' };
            // Tabs expand to 4 columns
            let width = if ch == '\t' { 4 } else { 1 };
            underline.extend(std::iter::repeat_n(mark, width));
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!(
            "\n  {:>3}   {}\n        {}",
            position.line + 1,
            line_text.replace('\t', "    "),
            underline
        ))
    }

    fn position_for(&self, file: &str, offset: u32) -> Option<(u32, u32)> {
        let source = self.sources.get(file)?;
        Some(source.line_map.offset_to_position(offset).one_based())
    }

    fn format_category(&self, category: DiagnosticCategory) -> String {
        let label = category.as_str();
        if !self.color {
            return label.to_string();
        }
        match category {
            DiagnosticCategory::Error => label.red().bold().to_string(),
            DiagnosticCategory::Warning => label.yellow().bold().to_string(),
            _ => label.cyan().to_string(),
        }
    }
}

/// `Found N diagnostics in M files.`
pub fn summary(diagnostic_count: usize, file_count: usize) -> String {
    let plural = |n: usize, word: &str| {
        if n == 1 {
            format!("{n} {word}")
        } else {
            format!("{n} {word}s")
        }
    };
    format!(
        "Found {} in {}.",
        plural(diagnostic_count, "diagnostic"),
        plural(file_count, "file")
    )
}
