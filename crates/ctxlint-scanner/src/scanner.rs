//! Scanner state machine.
//!
//! Produces one token per `scan()` call. Positions are byte offsets into the
//! source text. Comments are trivia and never surface as tokens; a newline
//! (or a comment spanning one, or EOF) after a statement-ending token yields
//! an implicit `SemicolonToken` exactly as the Go lexer does.

use std::sync::Arc;

use ctxlint_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};

use crate::syntax_kind::{SyntaxKind, text_to_keyword, token_ends_statement};

/// A lexical error found while scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: String,
    pub code: u32,
}

/// Saved scanner position for speculative look-ahead.
#[derive(Clone, Copy, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_end: usize,
    insert_semi: bool,
    implicit_semicolon: bool,
    diagnostic_count: usize,
}

pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_end: usize,
    /// Whether a newline at the current point ends the statement.
    insert_semi: bool,
    /// Whether the current `SemicolonToken` was inserted automatically.
    implicit_semicolon: bool,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        ScannerState {
            text: text.into(),
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_end: 0,
            insert_semi: false,
            implicit_semicolon: false,
            diagnostics: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn source_text_arc(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    #[inline]
    pub fn get_token(&self) -> SyntaxKind {
        self.token
    }

    #[inline]
    pub fn get_token_pos(&self) -> usize {
        self.token_start
    }

    #[inline]
    pub fn get_token_end(&self) -> usize {
        self.token_end
    }

    /// Raw source text of the current token.
    pub fn get_token_text(&self) -> &str {
        &self.text[self.token_start..self.token_end]
    }

    /// Whether the current semicolon was inserted at a newline or EOF.
    pub fn is_implicit_semicolon(&self) -> bool {
        self.token == SyntaxKind::SemicolonToken && self.implicit_semicolon
    }

    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    pub fn take_scanner_diagnostics(&mut self) -> Vec<ScannerDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            token_end: self.token_end,
            insert_semi: self.insert_semi,
            implicit_semicolon: self.implicit_semicolon,
            diagnostic_count: self.diagnostics.len(),
        }
    }

    pub fn restore(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.token_end = snapshot.token_end;
        self.insert_semi = snapshot.insert_semi;
        self.implicit_semicolon = snapshot.implicit_semicolon;
        self.diagnostics.truncate(snapshot.diagnostic_count);
    }

    // =========================================================================
    // Scanning
    // =========================================================================

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.implicit_semicolon = false;
        if let Some(kind) = self.skip_trivia() {
            return kind;
        }

        self.token_start = self.pos;
        let kind = match self.peek_byte(0) {
            None => SyntaxKind::EndOfFileToken,
            Some(b'"') => self.scan_string(),
            Some(b'`') => self.scan_raw_string(),
            Some(b'\'') => self.scan_rune(),
            Some(b'0'..=b'9') => self.scan_number(),
            Some(b'.') if matches!(self.peek_byte(1), Some(b'0'..=b'9')) => self.scan_number(),
            Some(b) if b.is_ascii() && !is_ascii_identifier_start(b) => self.scan_punctuation(),
            Some(_) => self.scan_identifier_or_invalid(),
        };
        self.token = kind;
        self.token_end = self.pos;
        self.insert_semi = token_ends_statement(kind);
        kind
    }

    /// Skip whitespace and comments. Returns `Some` when a newline, EOF or a
    /// multi-line comment produced an implicit semicolon.
    fn skip_trivia(&mut self) -> Option<SyntaxKind> {
        loop {
            match self.peek_byte(0) {
                Some(b' ' | b'\t' | b'\r') => self.pos += 1,
                Some(b'\n') => {
                    if self.insert_semi {
                        return Some(self.implicit_semicolon_at(self.pos, self.pos + 1));
                    }
                    self.pos += 1;
                }
                Some(b'/') if self.peek_byte(1) == Some(b'/') => {
                    let rest = &self.text.as_bytes()[self.pos..];
                    let len = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
                    self.pos += len;
                }
                Some(b'/') if self.peek_byte(1) == Some(b'*') => {
                    let start = self.pos;
                    let body = &self.text[start + 2..];
                    match body.find("*/") {
                        Some(close) => {
                            let has_newline = body[..close].contains('\n');
                            let end = start + 2 + close + 2;
                            if has_newline && self.insert_semi {
                                return Some(self.implicit_semicolon_at(start, end));
                            }
                            self.pos = end;
                        }
                        None => {
                            self.error(
                                start,
                                self.text.len() - start,
                                diagnostic_messages::UNTERMINATED_COMMENT.to_string(),
                                diagnostic_codes::UNTERMINATED_COMMENT,
                            );
                            self.pos = self.text.len();
                        }
                    }
                }
                None => {
                    if self.insert_semi {
                        return Some(self.implicit_semicolon_at(self.pos, self.pos));
                    }
                    return None;
                }
                Some(_) => return None,
            }
        }
    }

    fn implicit_semicolon_at(&mut self, start: usize, end: usize) -> SyntaxKind {
        self.token_start = start;
        self.pos = end;
        self.token_end = end;
        self.token = SyntaxKind::SemicolonToken;
        self.insert_semi = false;
        self.implicit_semicolon = true;
        SyntaxKind::SemicolonToken
    }

    fn scan_identifier_or_invalid(&mut self) -> SyntaxKind {
        let start = self.pos;
        let Some(first) = self.peek_char() else {
            return SyntaxKind::EndOfFileToken;
        };
        if !is_identifier_start(first) {
            self.pos += first.len_utf8();
            self.error(
                start,
                first.len_utf8(),
                format_message(diagnostic_messages::INVALID_CHARACTER, &[&format!("{first:?}")]),
                diagnostic_codes::INVALID_CHARACTER,
            );
            return SyntaxKind::Unknown;
        }
        while let Some(ch) = self.peek_char() {
            if !is_identifier_part(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        text_to_keyword(&self.text[start..self.pos]).unwrap_or(SyntaxKind::Identifier)
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let mut kind = SyntaxKind::IntLiteral;
        let radix_prefix = if self.peek_byte(0) == Some(b'0') {
            self.peek_byte(1).map(|b| b.to_ascii_lowercase())
        } else {
            None
        };

        match radix_prefix {
            Some(b'x') => {
                self.pos += 2;
                self.eat_while(|b| b.is_ascii_hexdigit() || b == b'_');
                if self.peek_byte(0) == Some(b'.') {
                    kind = SyntaxKind::FloatLiteral;
                    self.pos += 1;
                    self.eat_while(|b| b.is_ascii_hexdigit() || b == b'_');
                }
                if matches!(self.peek_byte(0), Some(b'p' | b'P')) {
                    kind = SyntaxKind::FloatLiteral;
                    self.scan_exponent();
                }
            }
            Some(b'b' | b'o') => {
                self.pos += 2;
                self.eat_while(|b| b.is_ascii_digit() || b == b'_');
            }
            _ => {
                self.eat_while(|b| b.is_ascii_digit() || b == b'_');
                if self.peek_byte(0) == Some(b'.') {
                    kind = SyntaxKind::FloatLiteral;
                    self.pos += 1;
                    self.eat_while(|b| b.is_ascii_digit() || b == b'_');
                }
                if matches!(self.peek_byte(0), Some(b'e' | b'E')) {
                    kind = SyntaxKind::FloatLiteral;
                    self.scan_exponent();
                }
            }
        }

        if self.peek_byte(0) == Some(b'i') {
            self.pos += 1;
            kind = SyntaxKind::ImaginaryLiteral;
        }
        kind
    }

    fn scan_exponent(&mut self) {
        self.pos += 1;
        if matches!(self.peek_byte(0), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        self.eat_while(|b| b.is_ascii_digit() || b == b'_');
    }

    fn scan_string(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        if self.scan_quoted(b'"') {
            return SyntaxKind::StringLiteral;
        }
        self.error(
            start,
            self.pos - start,
            diagnostic_messages::UNTERMINATED_STRING_LITERAL.to_string(),
            diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        );
        SyntaxKind::StringLiteral
    }

    fn scan_rune(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        if self.scan_quoted(b'\'') {
            return SyntaxKind::RuneLiteral;
        }
        self.error(
            start,
            self.pos - start,
            diagnostic_messages::UNTERMINATED_RUNE_LITERAL.to_string(),
            diagnostic_codes::UNTERMINATED_RUNE_LITERAL,
        );
        SyntaxKind::RuneLiteral
    }

    /// Consume an interpreted literal body up to and including `quote`.
    /// Returns false when a newline or EOF is hit first.
    fn scan_quoted(&mut self, quote: u8) -> bool {
        while let Some(b) = self.peek_byte(0) {
            match b {
                b'\n' => return false,
                b'\\' => {
                    self.pos += 1;
                    if let Some(ch) = self.peek_char()
                        && ch != '\n'
                    {
                        self.pos += ch.len_utf8();
                    }
                }
                b if b == quote => {
                    self.pos += 1;
                    return true;
                }
                _ => {
                    let width = self.peek_char().map_or(1, char::len_utf8);
                    self.pos += width;
                }
            }
        }
        false
    }

    fn scan_raw_string(&mut self) -> SyntaxKind {
        let start = self.pos;
        match self.text[start + 1..].find('`') {
            Some(close) => self.pos = start + 1 + close + 1,
            None => {
                self.pos = self.text.len();
                self.error(
                    start,
                    self.pos - start,
                    diagnostic_messages::UNTERMINATED_RAW_STRING_LITERAL.to_string(),
                    diagnostic_codes::UNTERMINATED_RAW_STRING_LITERAL,
                );
            }
        }
        SyntaxKind::RawStringLiteral
    }

    fn scan_punctuation(&mut self) -> SyntaxKind {
        use SyntaxKind::*;

        let b0 = self.peek_byte(0).unwrap_or(0);
        let b1 = self.peek_byte(1).unwrap_or(0);
        let b2 = self.peek_byte(2).unwrap_or(0);

        let (kind, width) = match (b0, b1, b2) {
            (b'.', b'.', b'.') => (DotDotDotToken, 3),
            (b'<', b'<', b'=') => (LessThanLessThanEqualsToken, 3),
            (b'>', b'>', b'=') => (GreaterThanGreaterThanEqualsToken, 3),
            (b'&', b'^', b'=') => (AmpersandCaretEqualsToken, 3),
            (b':', b'=', _) => (ColonEqualsToken, 2),
            (b'=', b'=', _) => (EqualsEqualsToken, 2),
            (b'!', b'=', _) => (ExclamationEqualsToken, 2),
            (b'<', b'=', _) => (LessThanEqualsToken, 2),
            (b'>', b'=', _) => (GreaterThanEqualsToken, 2),
            (b'<', b'-', _) => (LessThanMinusToken, 2),
            (b'<', b'<', _) => (LessThanLessThanToken, 2),
            (b'>', b'>', _) => (GreaterThanGreaterThanToken, 2),
            (b'&', b'^', _) => (AmpersandCaretToken, 2),
            (b'&', b'&', _) => (AmpersandAmpersandToken, 2),
            (b'|', b'|', _) => (BarBarToken, 2),
            (b'+', b'+', _) => (PlusPlusToken, 2),
            (b'-', b'-', _) => (MinusMinusToken, 2),
            (b'+', b'=', _) => (PlusEqualsToken, 2),
            (b'-', b'=', _) => (MinusEqualsToken, 2),
            (b'*', b'=', _) => (AsteriskEqualsToken, 2),
            (b'/', b'=', _) => (SlashEqualsToken, 2),
            (b'%', b'=', _) => (PercentEqualsToken, 2),
            (b'&', b'=', _) => (AmpersandEqualsToken, 2),
            (b'|', b'=', _) => (BarEqualsToken, 2),
            (b'^', b'=', _) => (CaretEqualsToken, 2),
            (b'(', _, _) => (OpenParenToken, 1),
            (b')', _, _) => (CloseParenToken, 1),
            (b'[', _, _) => (OpenBracketToken, 1),
            (b']', _, _) => (CloseBracketToken, 1),
            (b'{', _, _) => (OpenBraceToken, 1),
            (b'}', _, _) => (CloseBraceToken, 1),
            (b',', _, _) => (CommaToken, 1),
            (b'.', _, _) => (DotToken, 1),
            (b';', _, _) => (SemicolonToken, 1),
            (b':', _, _) => (ColonToken, 1),
            (b'=', _, _) => (EqualsToken, 1),
            (b'!', _, _) => (ExclamationToken, 1),
            (b'<', _, _) => (LessThanToken, 1),
            (b'>', _, _) => (GreaterThanToken, 1),
            (b'+', _, _) => (PlusToken, 1),
            (b'-', _, _) => (MinusToken, 1),
            (b'*', _, _) => (AsteriskToken, 1),
            (b'/', _, _) => (SlashToken, 1),
            (b'%', _, _) => (PercentToken, 1),
            (b'&', _, _) => (AmpersandToken, 1),
            (b'|', _, _) => (BarToken, 1),
            (b'^', _, _) => (CaretToken, 1),
            (b'~', _, _) => (TildeToken, 1),
            _ => {
                let start = self.pos;
                self.pos += 1;
                self.error(
                    start,
                    1,
                    format_message(
                        diagnostic_messages::INVALID_CHARACTER,
                        &[&format!("{:?}", char::from(b0))],
                    ),
                    diagnostic_codes::INVALID_CHARACTER,
                );
                return Unknown;
            }
        };
        self.pos += width;
        kind
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[inline]
    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.pos + offset).copied()
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.text.get(self.pos..)?.chars().next()
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek_byte(0) {
            if !pred(b) {
                break;
            }
            self.pos += 1;
        }
    }

    fn error(&mut self, pos: usize, length: usize, message: String, code: u32) {
        self.diagnostics.push(ScannerDiagnostic {
            pos,
            length,
            message,
            code,
        });
    }
}

#[inline]
fn is_ascii_identifier_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_identifier_part(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
