//! The per-file pipeline (parse, bind, evaluate, check) and its parallel
//! driver.

use std::sync::Arc;

use ctxlint_binder::BinderState;
use ctxlint_checker::{CheckError, SourceFile, WatchedApi, analyze};
use ctxlint_common::Diagnostic;
use ctxlint_parser::ParserState;
use rayon::prelude::*;
use tracing::{debug, info_span, warn};

/// Source name reported on syntax errors.
pub const PARSER_SOURCE: &str = "parser";

/// Result of checking one file.
#[derive(Clone, Debug, Default)]
pub struct FileReport {
    pub file_name: String,
    /// Syntax errors. A file with syntax errors is not analyzed.
    pub parse_diagnostics: Vec<Diagnostic>,
    /// Analyzer diagnostics ordered by position.
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn has_errors(&self) -> bool {
        !self.parse_diagnostics.is_empty()
    }

    /// Syntax errors followed by analyzer diagnostics.
    pub fn all_diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.parse_diagnostics.iter().chain(&self.diagnostics)
    }
}

/// Summary of a batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CheckStats {
    pub file_count: usize,
    pub total_bytes: usize,
    pub diagnostic_count: usize,
    pub syntax_error_count: usize,
    /// Files whose analysis aborted with a `CheckError`.
    pub failed_files: usize,
}

/// Parse, bind and type one file, then run every analyzer over it.
pub fn check_source(
    file_name: &str,
    text: &str,
    analyzers: &[Arc<WatchedApi>],
) -> Result<FileReport, CheckError> {
    let span = info_span!("check_source", file = file_name, bytes = text.len());
    let _enter = span.enter();

    let mut parser = ParserState::new(file_name.to_string(), text);
    let root = parser.parse_source_file();
    let parse_diagnostics: Vec<Diagnostic> = parser
        .get_diagnostics()
        .iter()
        .map(|d| {
            Diagnostic::error(file_name, d.start, d.length, d.message.clone(), d.code)
                .with_source(PARSER_SOURCE)
        })
        .collect();
    if !parse_diagnostics.is_empty() {
        debug!(count = parse_diagnostics.len(), "syntax errors, skipping analysis");
        return Ok(FileReport {
            file_name: file_name.to_string(),
            parse_diagnostics,
            diagnostics: Vec::new(),
        });
    }
    let arena = parser.into_arena();

    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    let types = ctxlint_solver::evaluate_file(&arena, &binder, root);

    let file = SourceFile::new(file_name, text, &arena, &binder, root);
    let mut diagnostics = Vec::new();
    for api in analyzers {
        diagnostics.extend(analyze(file, &types, api)?);
    }
    diagnostics.sort_by_key(|d| d.start);

    Ok(FileReport {
        file_name: file_name.to_string(),
        parse_diagnostics,
        diagnostics,
    })
}

/// Check `(file_name, text)` pairs in parallel. Results keep input order.
pub fn check_sources(
    files: &[(String, String)],
    analyzers: &[Arc<WatchedApi>],
) -> Vec<Result<FileReport, CheckError>> {
    files
        .par_iter()
        .map(|(name, text)| check_source(name, text, analyzers))
        .collect()
}

/// `check_sources` plus a summary of the run.
pub fn check_sources_with_stats(
    files: &[(String, String)],
    analyzers: &[Arc<WatchedApi>],
) -> (Vec<Result<FileReport, CheckError>>, CheckStats) {
    let results = check_sources(files, analyzers);
    let mut stats = CheckStats {
        file_count: files.len(),
        total_bytes: files.iter().map(|(_, text)| text.len()).sum(),
        ..CheckStats::default()
    };
    for result in &results {
        match result {
            Ok(report) => {
                stats.diagnostic_count += report.diagnostics.len();
                stats.syntax_error_count += report.parse_diagnostics.len();
            }
            Err(err) => {
                warn!(error = %err, "file analysis aborted");
                stats.failed_files += 1;
            }
        }
    }
    (results, stats)
}
