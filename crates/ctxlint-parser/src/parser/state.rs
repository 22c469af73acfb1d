//! Parser state and token-level helpers.
//!
//! `ParserState` drives a `ScannerState` one token at a time and builds the
//! `NodeArena` bottom-up. The grammar itself lives in the `state_*` modules:
//! declarations and types, statements, and expressions.

use std::sync::Arc;

use ctxlint_common::diagnostics::{Diagnostic, diagnostic_codes, diagnostic_messages, format_message};
use ctxlint_scanner::{ScannerState, SyntaxKind, token_description};
use tracing::{debug, trace};

use super::base::{NodeIndex, NodeList};
use super::node::{NodeArena, SourceFileData};
use super::syntax_kind_ext;

/// Nesting limit for recursive descent; deeper input is reported and cut off.
pub(crate) const MAX_RECURSION_DEPTH: u32 = 1000;

/// A syntax error found while parsing (scanner errors included).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseDiagnostic {
    pub start: u32,
    pub length: u32,
    pub message: String,
    pub code: u32,
}

pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub arena: NodeArena,
    file_name: String,
    pub(crate) current_token: SyntaxKind,
    parse_diagnostics: Vec<ParseDiagnostic>,
    /// `< 0` inside control clauses, where `T{` opens a block instead of a
    /// composite literal; `>= 0` elsewhere.
    pub(crate) expr_level: i32,
    recursion_depth: u32,
    prev_token_end: u32,
}

impl ParserState {
    pub fn new(file_name: String, source_text: impl Into<Arc<str>>) -> ParserState {
        ParserState {
            scanner: ScannerState::new(source_text),
            arena: NodeArena::new(),
            file_name,
            current_token: SyntaxKind::Unknown,
            parse_diagnostics: Vec::new(),
            expr_level: 0,
            recursion_depth: 0,
            prev_token_end: 0,
        }
    }

    pub fn get_file_name(&self) -> &str {
        &self.file_name
    }

    pub fn get_arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn get_diagnostics(&self) -> &[ParseDiagnostic] {
        &self.parse_diagnostics
    }

    /// Syntax errors as engine diagnostics tagged with the file name.
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        self.parse_diagnostics
            .iter()
            .map(|d| {
                Diagnostic::error(self.file_name.clone(), d.start, d.length, d.message.clone(), d.code)
                    .with_source("parser")
            })
            .collect()
    }

    // =========================================================================
    // Entry point
    // =========================================================================

    /// Parse a whole file and return its `SOURCE_FILE` node.
    pub fn parse_source_file(&mut self) -> NodeIndex {
        self.next_token();

        let package_name = if self.is_token(SyntaxKind::PackageKeyword) {
            self.next_token();
            let name = self.parse_identifier();
            self.expect_semicolon();
            name
        } else {
            self.error_at_current(
                diagnostic_codes::EXPECTED_PACKAGE_CLAUSE,
                diagnostic_messages::EXPECTED_PACKAGE_CLAUSE,
            );
            NodeIndex::NONE
        };

        let mut imports = Vec::new();
        let mut declarations = Vec::new();
        while self.is_token(SyntaxKind::ImportKeyword) {
            let decl = self.parse_gen_decl(SyntaxKind::ImportKeyword);
            self.collect_import_specs(decl, &mut imports);
            declarations.push(decl);
            self.expect_semicolon();
        }

        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.scanner.get_token_pos();
            if let Some(decl) = self.parse_top_level_declaration() {
                if self.arena.get(decl).is_some_and(|n| {
                    n.kind == syntax_kind_ext::GEN_DECL && n.flags == SyntaxKind::ImportKeyword as u16
                }) {
                    self.collect_import_specs(decl, &mut imports);
                }
                declarations.push(decl);
            }
            if self.scanner.get_token_pos() == before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.next_token();
            }
        }

        for diag in self.scanner.take_scanner_diagnostics() {
            self.parse_diagnostics.push(ParseDiagnostic {
                start: diag.pos as u32,
                length: diag.length as u32,
                message: diag.message,
                code: diag.code,
            });
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);

        let text = self.scanner.source_text_arc();
        let end = text.len() as u32;
        debug!(
            file = %self.file_name,
            nodes = self.arena.len(),
            errors = self.parse_diagnostics.len(),
            "parsed source file"
        );
        self.arena.add_source_file(
            0,
            end,
            SourceFileData {
                file_name: self.file_name.clone(),
                text,
                package_name,
                imports: NodeList::from_vec(imports),
                declarations: NodeList::from_vec(declarations),
            },
        )
    }

    fn collect_import_specs(&self, decl: NodeIndex, out: &mut Vec<NodeIndex>) {
        if let Some(node) = self.arena.get(decl)
            && let Some(data) = self.arena.get_gen_decl(node)
        {
            out.extend(data.specs.iter());
        }
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    #[inline]
    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.get_token_pos() as u32
    }

    #[inline]
    pub(crate) fn token_end(&self) -> u32 {
        self.scanner.get_token_end() as u32
    }

    /// End offset of the last consumed non-implicit token.
    #[inline]
    pub(crate) fn prev_end(&self) -> u32 {
        self.prev_token_end
    }

    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        if !self.scanner.is_implicit_semicolon() {
            self.prev_token_end = self.token_end();
        }
        self.current_token = self.scanner.scan();
        trace!(token = ?self.current_token, pos = self.token_pos(), "next token");
        self.current_token
    }

    /// Run `scan` over the upcoming tokens, then rewind to the current one.
    /// `scan` must not add nodes or report diagnostics.
    pub(crate) fn look_ahead<T>(&mut self, scan: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.snapshot();
        let (token, prev_end) = (self.current_token, self.prev_token_end);
        let result = scan(self);
        self.scanner.restore(snapshot);
        self.current_token = token;
        self.prev_token_end = prev_end;
        result
    }

    /// Consume `kind` or report it as missing. Returns whether it was present.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            self.error_expected(token_description(kind));
            false
        }
    }

    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Statement terminator. `;` may be omitted before a closing `)` or `}`.
    pub(crate) fn expect_semicolon(&mut self) {
        match self.current_token {
            SyntaxKind::SemicolonToken => {
                self.next_token();
            }
            SyntaxKind::CloseParenToken | SyntaxKind::CloseBraceToken | SyntaxKind::EndOfFileToken => {}
            _ => {
                self.error_expected("';'");
                self.skip_to_statement_end();
            }
        }
    }

    /// Skip tokens up to and including the next `;`, stopping early at `}`.
    pub(crate) fn skip_to_statement_end(&mut self) {
        loop {
            match self.current_token {
                SyntaxKind::EndOfFileToken | SyntaxKind::CloseBraceToken => return,
                SyntaxKind::SemicolonToken => {
                    self.next_token();
                    return;
                }
                _ => {
                    self.next_token();
                }
            }
        }
    }

    /// Identifier at the current token, or a zero-width `_` placeholder.
    pub(crate) fn parse_identifier(&mut self) -> NodeIndex {
        if self.is_token(SyntaxKind::Identifier) {
            let (pos, end) = (self.token_pos(), self.token_end());
            let text = self.scanner.get_token_text().to_string();
            self.next_token();
            self.arena.add_identifier(pos, end, text)
        } else {
            self.error_expected("identifier");
            let pos = self.token_pos();
            self.arena.add_identifier(pos, pos, "_")
        }
    }

    /// Description of the current token for "found ..." messages.
    fn current_description(&self) -> String {
        match self.current_token {
            SyntaxKind::SemicolonToken if self.scanner.is_implicit_semicolon() => "newline".to_string(),
            SyntaxKind::Identifier => format!("identifier {}", self.scanner.get_token_text()),
            kind if ctxlint_scanner::token_is_literal(kind) => {
                format!("literal {}", self.scanner.get_token_text())
            }
            kind => token_description(kind).to_string(),
        }
    }

    // =========================================================================
    // Error reporting
    // =========================================================================

    /// Record an error; only the first error at a given position is kept.
    pub(crate) fn error_at(&mut self, start: u32, length: u32, code: u32, message: String) {
        if self.parse_diagnostics.last().is_some_and(|d| d.start == start) {
            return;
        }
        debug!(file = %self.file_name, start, code, %message, "syntax error");
        self.parse_diagnostics.push(ParseDiagnostic {
            start,
            length,
            message,
            code,
        });
    }

    pub(crate) fn error_expected(&mut self, what: &str) {
        let found = self.current_description();
        let message = format_message(diagnostic_messages::EXPECTED_TOKEN, &[what, &found]);
        let (pos, end) = (self.token_pos(), self.token_end());
        self.error_at(pos, end - pos, diagnostic_codes::EXPECTED_TOKEN, message);
    }

    /// Report `template` (one `{0}` slot for the found token) at the current token.
    pub(crate) fn error_at_current(&mut self, code: u32, template: &str) {
        let found = self.current_description();
        let message = format_message(template, &[&found]);
        let (pos, end) = (self.token_pos(), self.token_end());
        self.error_at(pos, end - pos, code, message);
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Returns false (and reports once) when nesting is too deep to continue.
    pub(crate) fn enter_recursion(&mut self) -> bool {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            self.error_at_current(
                diagnostic_codes::EXPECTED_EXPRESSION,
                diagnostic_messages::EXPECTED_EXPRESSION,
            );
            return false;
        }
        self.recursion_depth += 1;
        true
    }

    pub(crate) fn exit_recursion(&mut self) {
        self.recursion_depth = self.recursion_depth.saturating_sub(1);
    }
}
