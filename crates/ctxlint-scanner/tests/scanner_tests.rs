//! Tests for scanner.rs

use crate::*;

fn scan_all(source: &str) -> Vec<(SyntaxKind, String)> {
    let mut scanner = ScannerState::new(source);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push((kind, scanner.get_token_text().to_string()));
    }
    tokens
}

fn kinds(source: &str) -> Vec<SyntaxKind> {
    scan_all(source).into_iter().map(|(kind, _)| kind).collect()
}

#[test]
fn test_token_is_keyword() {
    assert!(token_is_keyword(SyntaxKind::BreakKeyword));
    assert!(token_is_keyword(SyntaxKind::VarKeyword));
    assert!(!token_is_keyword(SyntaxKind::Identifier));
    assert!(!token_is_keyword(SyntaxKind::OpenBraceToken));
}

#[test]
fn test_keyword_round_trip() {
    assert_eq!(keyword_to_text(SyntaxKind::FuncKeyword), Some("func"));
    assert_eq!(text_to_keyword("import"), Some(SyntaxKind::ImportKeyword));
    assert_eq!(text_to_keyword("Import"), None);
    assert_eq!(punctuation_to_text(SyntaxKind::ColonEqualsToken), Some(":="));
}

#[test]
fn test_from_u16_covers_every_token() {
    assert_eq!(SyntaxKind::from_u16(0), Some(SyntaxKind::Unknown));
    assert_eq!(
        SyntaxKind::from_u16(SyntaxKind::LAST_TOKEN as u16),
        Some(SyntaxKind::VarKeyword)
    );
    assert_eq!(SyntaxKind::from_u16(SyntaxKind::LAST_TOKEN as u16 + 1), None);
}

#[test]
fn test_call_expression_tokens() {
    let tokens = scan_all(r#"log.Info("message", "key", value)"#);
    let texts: Vec<&str> = tokens.iter().map(|(_, text)| text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "log", ".", "Info", "(", "\"message\"", ",", "\"key\"", ",", "value", ")", ""
        ]
    );
    assert_eq!(tokens[4].0, SyntaxKind::StringLiteral);
    // EOF after `)` inserts a semicolon.
    assert_eq!(tokens.last().map(|t| t.0), Some(SyntaxKind::SemicolonToken));
}

#[test]
fn test_semicolon_insertion_after_newline() {
    assert_eq!(
        kinds("x := 1\ny++\n"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::ColonEqualsToken,
            SyntaxKind::IntLiteral,
            SyntaxKind::SemicolonToken,
            SyntaxKind::Identifier,
            SyntaxKind::PlusPlusToken,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn test_no_semicolon_after_operator_or_open_brace() {
    assert_eq!(
        kinds("f(a,\n b)\n"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::OpenParenToken,
            SyntaxKind::Identifier,
            SyntaxKind::CommaToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenToken,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn test_line_comment_acts_as_newline() {
    let mut scanner = ScannerState::new("return // done\n}");
    assert_eq!(scanner.scan(), SyntaxKind::ReturnKeyword);
    assert_eq!(scanner.scan(), SyntaxKind::SemicolonToken);
    assert!(scanner.is_implicit_semicolon());
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
}

#[test]
fn test_multiline_block_comment_inserts_semicolon() {
    assert_eq!(
        kinds("a /* x\n y */ b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::SemicolonToken,
            SyntaxKind::Identifier,
            SyntaxKind::SemicolonToken,
        ]
    );
    assert_eq!(
        kinds("a /* inline */ + b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::PlusToken,
            SyntaxKind::Identifier,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn test_number_literals() {
    let tokens = scan_all("1 0x1F 0b101 0o17 1.5 .5 1e9 0x1p-2 3i 1_000");
    let kinds: Vec<SyntaxKind> = tokens.iter().map(|t| t.0).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxKind::IntLiteral,
            SyntaxKind::IntLiteral,
            SyntaxKind::IntLiteral,
            SyntaxKind::IntLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::FloatLiteral,
            SyntaxKind::ImaginaryLiteral,
            SyntaxKind::IntLiteral,
            SyntaxKind::SemicolonToken,
        ]
    );
    assert_eq!(tokens[9].1, "1_000");
}

#[test]
fn test_string_rune_and_raw_literals() {
    let tokens = scan_all("\"a\\\"b\" 'x' '\\n' `raw\nline`");
    assert_eq!(tokens[0], (SyntaxKind::StringLiteral, "\"a\\\"b\"".to_string()));
    assert_eq!(tokens[1], (SyntaxKind::RuneLiteral, "'x'".to_string()));
    assert_eq!(tokens[2], (SyntaxKind::RuneLiteral, "'\\n'".to_string()));
    assert_eq!(tokens[3], (SyntaxKind::RawStringLiteral, "`raw\nline`".to_string()));
}

#[test]
fn test_unterminated_string_reports_diagnostic() {
    let mut scanner = ScannerState::new("\"abc\nx");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    let diags = scanner.get_scanner_diagnostics();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].message, "string literal not terminated");
}

#[test]
fn test_invalid_character_reports_diagnostic() {
    let mut scanner = ScannerState::new("a # b");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::Unknown);
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_scanner_diagnostics().len(), 1);
}

#[test]
fn test_unicode_identifiers() {
    let tokens = scan_all("héllo := 1");
    assert_eq!(tokens[0], (SyntaxKind::Identifier, "héllo".to_string()));
}

#[test]
fn test_longest_match_operators() {
    assert_eq!(
        kinds("a &^= b ... <-c"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::AmpersandCaretEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::LessThanMinusToken,
            SyntaxKind::Identifier,
            SyntaxKind::SemicolonToken,
        ]
    );
}

#[test]
fn test_snapshot_restore() {
    let mut scanner = ScannerState::new("a b c");
    scanner.scan();
    let snapshot = scanner.snapshot();
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.get_token_text(), "b");
    scanner.scan();
    scanner.restore(snapshot);
    assert_eq!(scanner.get_token_text(), "a");
    scanner.scan();
    assert_eq!(scanner.get_token_text(), "b");
}

#[test]
fn test_binary_precedence_follows_go() {
    assert!(binary_precedence(SyntaxKind::AsteriskToken) > binary_precedence(SyntaxKind::PlusToken));
    assert!(binary_precedence(SyntaxKind::PlusToken) > binary_precedence(SyntaxKind::EqualsEqualsToken));
    assert!(
        binary_precedence(SyntaxKind::AmpersandAmpersandToken)
            > binary_precedence(SyntaxKind::BarBarToken)
    );
    assert_eq!(binary_precedence(SyntaxKind::CommaToken), 0);
}
