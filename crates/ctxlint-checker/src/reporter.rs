//! Diagnostic emission.

use ctxlint_common::{
    Diagnostic, diagnostic_codes, diagnostic_messages, format_message, go_quote,
};
use ctxlint_parser::NodeIndex;
use tracing::warn;

use crate::error::CheckError;
use crate::state::CheckerState;

/// Receives diagnostics as they are produced.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<'a> CheckerState<'a> {
    // =========================================================================
    // Context violations
    // =========================================================================

    /// Odd number of context arguments, reported at the first of them.
    pub(crate) fn report_odd_context(
        &mut self,
        call: NodeIndex,
        context: &[NodeIndex],
    ) -> Result<(), CheckError> {
        let Some(&first) = context.first() else {
            return Ok(());
        };
        let len = context.len().to_string();
        let ctx = self.printer.render_list(context).map_err(|e| self.render_error(e))?;
        let message = format_message(diagnostic_messages::CONTEXT_SHOULD_BE_EVEN, &[&len, &ctx]);
        let message = self.with_rendered_call(message, call)?;
        self.error_at_node(first, message, diagnostic_codes::CONTEXT_SHOULD_BE_EVEN)
    }

    pub(crate) fn report_non_string_key(
        &mut self,
        call: NodeIndex,
        key: NodeIndex,
        type_name: &str,
    ) -> Result<(), CheckError> {
        let name = self.render(key)?;
        let message = format_message(
            diagnostic_messages::KEY_SHOULD_BE_STRING,
            &[&go_quote(type_name), &go_quote(&name)],
        );
        let message = self.with_rendered_call(message, call)?;
        self.error_at_node(key, message, diagnostic_codes::KEY_SHOULD_BE_STRING)
    }

    pub(crate) fn report_missing_context(&mut self, call: NodeIndex) -> Result<(), CheckError> {
        let rendered = self.render(call)?;
        let message = format_message(diagnostic_messages::SHOULD_HAVE_CONTEXT, &[&rendered]);
        self.error_at_node(call, message, diagnostic_codes::SHOULD_HAVE_CONTEXT)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn with_rendered_call(&self, message: String, call: NodeIndex) -> Result<String, CheckError> {
        if !self.api.render_call {
            return Ok(message);
        }
        let rendered = self.render(call)?;
        Ok(format!("{message} expr={}", go_quote(&rendered)))
    }

    pub(crate) fn error_at_node(
        &mut self,
        idx: NodeIndex,
        message: String,
        code: u32,
    ) -> Result<(), CheckError> {
        let Some((start, end)) = self.file.arena.span_of(idx) else {
            warn!(file = self.file.file_name, node = idx.0, code, "diagnostic node has no span");
            return Err(CheckError::MissingSpan {
                file: self.file.file_name.to_string(),
                node: idx.0,
            });
        };
        let diagnostic = Diagnostic::error(
            self.file.file_name,
            start,
            end.saturating_sub(start),
            message,
            code,
        )
        .with_source(self.api.name.as_str());
        self.sink.report(diagnostic);
        Ok(())
    }
}
