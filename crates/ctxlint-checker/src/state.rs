//! Per-file checker state and the analysis entry points.

use ctxlint_binder::SymbolId;
use ctxlint_common::Diagnostic;
use ctxlint_parser::parser::syntax_kind_ext;
use ctxlint_parser::{NodeIndex, Printer, RenderError};
use rustc_hash::FxHashMap;
use tracing::{debug, debug_span, trace};

use crate::api::WatchedApi;
use crate::classify::CallClass;
use crate::context::SourceFile;
use crate::error::CheckError;
use crate::extract::{Extraction, extract_context};
use crate::oracle::TypeOracle;
use crate::reporter::DiagnosticSink;
use crate::target::resolve_alias;

pub struct CheckerState<'a> {
    pub(crate) file: SourceFile<'a>,
    pub(crate) oracle: &'a dyn TypeOracle,
    pub(crate) api: &'a WatchedApi,
    pub(crate) printer: Printer<'a>,
    /// Local name of the watched package.
    pub(crate) alias: String,
    /// Memoized answers to "was this variable initialized by a constructor".
    pub(crate) bound_values: FxHashMap<SymbolId, bool>,
    pub(crate) sink: &'a mut dyn DiagnosticSink,
}

impl<'a> CheckerState<'a> {
    pub fn new(
        file: SourceFile<'a>,
        oracle: &'a dyn TypeOracle,
        api: &'a WatchedApi,
        alias: String,
        sink: &'a mut dyn DiagnosticSink,
    ) -> Self {
        CheckerState {
            file,
            oracle,
            api,
            printer: Printer::new(file.arena, file.source),
            alias,
            bound_values: FxHashMap::default(),
            sink,
        }
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// Check every call expression of the file.
    pub fn check_source_file(&mut self) -> Result<(), CheckError> {
        let arena = self.file.arena;
        for idx in arena.preorder(self.file.root) {
            if arena.kind_of(idx) == Some(syntax_kind_ext::CALL_EXPRESSION) {
                self.check_call(idx)?;
            }
        }
        Ok(())
    }

    pub fn check_call(&mut self, idx: NodeIndex) -> Result<(), CheckError> {
        let arena = self.file.arena;
        let Some(call) = arena.get(idx).and_then(|n| arena.get_call_expr(n)) else {
            return Ok(());
        };
        let Some(selector) = arena
            .get(call.expression)
            .and_then(|n| arena.get_selector_expr(n))
        else {
            return Ok(());
        };
        let Some(method) = arena.identifier_text(selector.name) else {
            return Ok(());
        };
        let api = self.api;
        let Some(rule) = api.rule(method) else {
            return Ok(());
        };

        let class = self.classify(selector.expression);
        if class == CallClass::OutOfScope {
            return Ok(());
        }
        debug!(method, ?class, pos = arena.get(idx).map_or(0, |n| n.pos), "watched call");

        match extract_context(&call.arguments.nodes, call.has_ellipsis(), rule) {
            Extraction::Context(context) => self.check_context(idx, context),
            Extraction::MissingContext => self.report_missing_context(idx),
            skipped => {
                trace!(method, ?skipped, "no context to check");
                Ok(())
            }
        }
    }

    pub(crate) fn render(&self, idx: NodeIndex) -> Result<String, CheckError> {
        self.printer.render(idx).map_err(|e| self.render_error(e))
    }

    pub(crate) fn render_error(&self, source: RenderError) -> CheckError {
        CheckError::Render {
            file: self.file.file_name.to_string(),
            source,
        }
    }
}

/// Check one file against one analyzer, reporting into `sink` in source
/// traversal order. Files that do not import the watched package are
/// skipped.
pub fn analyze_into(
    file: SourceFile<'_>,
    oracle: &dyn TypeOracle,
    api: &WatchedApi,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), CheckError> {
    let span = debug_span!("check_file", file = file.file_name, analyzer = %api.name);
    let _enter = span.enter();

    let Some(alias) = resolve_alias(file.arena, file.root, api) else {
        debug!(import_path = %api.import_path, "watched package not imported, skipping file");
        return Ok(());
    };
    trace!(alias = %alias, "watched package alias");
    CheckerState::new(file, oracle, api, alias, sink).check_source_file()
}

/// Diagnostics of one file for one analyzer, ordered by position.
pub fn analyze(
    file: SourceFile<'_>,
    oracle: &dyn TypeOracle,
    api: &WatchedApi,
) -> Result<Vec<Diagnostic>, CheckError> {
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    analyze_into(file, oracle, api, &mut diagnostics)?;
    diagnostics.sort_by_key(|d| d.start);
    Ok(diagnostics)
}
