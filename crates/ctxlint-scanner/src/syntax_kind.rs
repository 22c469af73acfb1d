//! Token kinds produced by the scanner.
//!
//! Node kinds that exist only in the syntax tree live in the parser's
//! `syntax_kind_ext` module and start after `SyntaxKind::LAST_TOKEN`.

use serde::Serialize;

#[repr(u16)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum SyntaxKind {
    Unknown = 0,
    EndOfFileToken,

    // Literals
    Identifier,
    IntLiteral,
    FloatLiteral,
    ImaginaryLiteral,
    RuneLiteral,
    StringLiteral,
    RawStringLiteral,

    // Punctuation
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    OpenBraceToken,
    CloseBraceToken,
    CommaToken,
    DotToken,
    DotDotDotToken,
    SemicolonToken,
    ColonToken,
    ColonEqualsToken,
    EqualsToken,
    EqualsEqualsToken,
    ExclamationToken,
    ExclamationEqualsToken,
    LessThanToken,
    LessThanEqualsToken,
    GreaterThanToken,
    GreaterThanEqualsToken,
    LessThanMinusToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    PercentToken,
    AmpersandToken,
    BarToken,
    CaretToken,
    TildeToken,
    LessThanLessThanToken,
    GreaterThanGreaterThanToken,
    AmpersandCaretToken,
    AmpersandAmpersandToken,
    BarBarToken,
    PlusPlusToken,
    MinusMinusToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PercentEqualsToken,
    AmpersandEqualsToken,
    BarEqualsToken,
    CaretEqualsToken,
    LessThanLessThanEqualsToken,
    GreaterThanGreaterThanEqualsToken,
    AmpersandCaretEqualsToken,

    // Keywords
    BreakKeyword,
    CaseKeyword,
    ChanKeyword,
    ConstKeyword,
    ContinueKeyword,
    DefaultKeyword,
    DeferKeyword,
    ElseKeyword,
    FallthroughKeyword,
    ForKeyword,
    FuncKeyword,
    GoKeyword,
    GotoKeyword,
    IfKeyword,
    ImportKeyword,
    InterfaceKeyword,
    MapKeyword,
    PackageKeyword,
    RangeKeyword,
    ReturnKeyword,
    SelectKeyword,
    StructKeyword,
    SwitchKeyword,
    TypeKeyword,
    VarKeyword,
}

impl SyntaxKind {
    pub const FIRST_KEYWORD: SyntaxKind = SyntaxKind::BreakKeyword;
    pub const LAST_KEYWORD: SyntaxKind = SyntaxKind::VarKeyword;
    pub const FIRST_PUNCTUATION: SyntaxKind = SyntaxKind::OpenParenToken;
    pub const LAST_PUNCTUATION: SyntaxKind = SyntaxKind::AmpersandCaretEqualsToken;
    pub const LAST_TOKEN: SyntaxKind = SyntaxKind::VarKeyword;

    /// Convert a raw `u16` kind back into a token kind, if it is one.
    pub fn from_u16(value: u16) -> Option<SyntaxKind> {
        ALL_TOKENS.get(value as usize).copied()
    }
}

const ALL_TOKENS: &[SyntaxKind] = {
    use SyntaxKind::*;
    &[
        Unknown,
        EndOfFileToken,
        Identifier,
        IntLiteral,
        FloatLiteral,
        ImaginaryLiteral,
        RuneLiteral,
        StringLiteral,
        RawStringLiteral,
        OpenParenToken,
        CloseParenToken,
        OpenBracketToken,
        CloseBracketToken,
        OpenBraceToken,
        CloseBraceToken,
        CommaToken,
        DotToken,
        DotDotDotToken,
        SemicolonToken,
        ColonToken,
        ColonEqualsToken,
        EqualsToken,
        EqualsEqualsToken,
        ExclamationToken,
        ExclamationEqualsToken,
        LessThanToken,
        LessThanEqualsToken,
        GreaterThanToken,
        GreaterThanEqualsToken,
        LessThanMinusToken,
        PlusToken,
        MinusToken,
        AsteriskToken,
        SlashToken,
        PercentToken,
        AmpersandToken,
        BarToken,
        CaretToken,
        TildeToken,
        LessThanLessThanToken,
        GreaterThanGreaterThanToken,
        AmpersandCaretToken,
        AmpersandAmpersandToken,
        BarBarToken,
        PlusPlusToken,
        MinusMinusToken,
        PlusEqualsToken,
        MinusEqualsToken,
        AsteriskEqualsToken,
        SlashEqualsToken,
        PercentEqualsToken,
        AmpersandEqualsToken,
        BarEqualsToken,
        CaretEqualsToken,
        LessThanLessThanEqualsToken,
        GreaterThanGreaterThanEqualsToken,
        AmpersandCaretEqualsToken,
        BreakKeyword,
        CaseKeyword,
        ChanKeyword,
        ConstKeyword,
        ContinueKeyword,
        DefaultKeyword,
        DeferKeyword,
        ElseKeyword,
        FallthroughKeyword,
        ForKeyword,
        FuncKeyword,
        GoKeyword,
        GotoKeyword,
        IfKeyword,
        ImportKeyword,
        InterfaceKeyword,
        MapKeyword,
        PackageKeyword,
        RangeKeyword,
        ReturnKeyword,
        SelectKeyword,
        StructKeyword,
        SwitchKeyword,
        TypeKeyword,
        VarKeyword,
    ]
};

pub fn token_is_keyword(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::FIRST_KEYWORD && kind <= SyntaxKind::LAST_KEYWORD
}

pub fn token_is_punctuation(kind: SyntaxKind) -> bool {
    kind >= SyntaxKind::FIRST_PUNCTUATION && kind <= SyntaxKind::LAST_PUNCTUATION
}

pub fn token_is_literal(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::IntLiteral
            | SyntaxKind::FloatLiteral
            | SyntaxKind::ImaginaryLiteral
            | SyntaxKind::RuneLiteral
            | SyntaxKind::StringLiteral
            | SyntaxKind::RawStringLiteral
    )
}

pub fn token_is_string_literal(kind: SyntaxKind) -> bool {
    matches!(kind, SyntaxKind::StringLiteral | SyntaxKind::RawStringLiteral)
}

pub fn token_is_assignment_operator(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::EqualsToken
            | SyntaxKind::ColonEqualsToken
            | SyntaxKind::PlusEqualsToken
            | SyntaxKind::MinusEqualsToken
            | SyntaxKind::AsteriskEqualsToken
            | SyntaxKind::SlashEqualsToken
            | SyntaxKind::PercentEqualsToken
            | SyntaxKind::AmpersandEqualsToken
            | SyntaxKind::BarEqualsToken
            | SyntaxKind::CaretEqualsToken
            | SyntaxKind::LessThanLessThanEqualsToken
            | SyntaxKind::GreaterThanGreaterThanEqualsToken
            | SyntaxKind::AmpersandCaretEqualsToken
    )
}

/// Whether a newline after `kind` triggers automatic semicolon insertion.
pub fn token_ends_statement(kind: SyntaxKind) -> bool {
    token_is_literal(kind)
        || matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::BreakKeyword
                | SyntaxKind::ContinueKeyword
                | SyntaxKind::FallthroughKeyword
                | SyntaxKind::ReturnKeyword
                | SyntaxKind::PlusPlusToken
                | SyntaxKind::MinusMinusToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                | SyntaxKind::CloseBraceToken
        )
}

/// Binary operator precedence (Go spec); 0 for non-binary tokens.
pub fn binary_precedence(kind: SyntaxKind) -> u8 {
    match kind {
        SyntaxKind::BarBarToken => 1,
        SyntaxKind::AmpersandAmpersandToken => 2,
        SyntaxKind::EqualsEqualsToken
        | SyntaxKind::ExclamationEqualsToken
        | SyntaxKind::LessThanToken
        | SyntaxKind::LessThanEqualsToken
        | SyntaxKind::GreaterThanToken
        | SyntaxKind::GreaterThanEqualsToken => 3,
        SyntaxKind::PlusToken | SyntaxKind::MinusToken | SyntaxKind::BarToken | SyntaxKind::CaretToken => {
            4
        }
        SyntaxKind::AsteriskToken
        | SyntaxKind::SlashToken
        | SyntaxKind::PercentToken
        | SyntaxKind::LessThanLessThanToken
        | SyntaxKind::GreaterThanGreaterThanToken
        | SyntaxKind::AmpersandToken
        | SyntaxKind::AmpersandCaretToken => 5,
        _ => 0,
    }
}

pub fn text_to_keyword(text: &str) -> Option<SyntaxKind> {
    let kind = match text {
        "break" => SyntaxKind::BreakKeyword,
        "case" => SyntaxKind::CaseKeyword,
        "chan" => SyntaxKind::ChanKeyword,
        "const" => SyntaxKind::ConstKeyword,
        "continue" => SyntaxKind::ContinueKeyword,
        "default" => SyntaxKind::DefaultKeyword,
        "defer" => SyntaxKind::DeferKeyword,
        "else" => SyntaxKind::ElseKeyword,
        "fallthrough" => SyntaxKind::FallthroughKeyword,
        "for" => SyntaxKind::ForKeyword,
        "func" => SyntaxKind::FuncKeyword,
        "go" => SyntaxKind::GoKeyword,
        "goto" => SyntaxKind::GotoKeyword,
        "if" => SyntaxKind::IfKeyword,
        "import" => SyntaxKind::ImportKeyword,
        "interface" => SyntaxKind::InterfaceKeyword,
        "map" => SyntaxKind::MapKeyword,
        "package" => SyntaxKind::PackageKeyword,
        "range" => SyntaxKind::RangeKeyword,
        "return" => SyntaxKind::ReturnKeyword,
        "select" => SyntaxKind::SelectKeyword,
        "struct" => SyntaxKind::StructKeyword,
        "switch" => SyntaxKind::SwitchKeyword,
        "type" => SyntaxKind::TypeKeyword,
        "var" => SyntaxKind::VarKeyword,
        _ => return None,
    };
    Some(kind)
}

pub fn keyword_to_text(kind: SyntaxKind) -> Option<&'static str> {
    let text = match kind {
        SyntaxKind::BreakKeyword => "break",
        SyntaxKind::CaseKeyword => "case",
        SyntaxKind::ChanKeyword => "chan",
        SyntaxKind::ConstKeyword => "const",
        SyntaxKind::ContinueKeyword => "continue",
        SyntaxKind::DefaultKeyword => "default",
        SyntaxKind::DeferKeyword => "defer",
        SyntaxKind::ElseKeyword => "else",
        SyntaxKind::FallthroughKeyword => "fallthrough",
        SyntaxKind::ForKeyword => "for",
        SyntaxKind::FuncKeyword => "func",
        SyntaxKind::GoKeyword => "go",
        SyntaxKind::GotoKeyword => "goto",
        SyntaxKind::IfKeyword => "if",
        SyntaxKind::ImportKeyword => "import",
        SyntaxKind::InterfaceKeyword => "interface",
        SyntaxKind::MapKeyword => "map",
        SyntaxKind::PackageKeyword => "package",
        SyntaxKind::RangeKeyword => "range",
        SyntaxKind::ReturnKeyword => "return",
        SyntaxKind::SelectKeyword => "select",
        SyntaxKind::StructKeyword => "struct",
        SyntaxKind::SwitchKeyword => "switch",
        SyntaxKind::TypeKeyword => "type",
        SyntaxKind::VarKeyword => "var",
        _ => return None,
    };
    Some(text)
}

pub fn punctuation_to_text(kind: SyntaxKind) -> Option<&'static str> {
    let text = match kind {
        SyntaxKind::OpenParenToken => "(",
        SyntaxKind::CloseParenToken => ")",
        SyntaxKind::OpenBracketToken => "[",
        SyntaxKind::CloseBracketToken => "]",
        SyntaxKind::OpenBraceToken => "{",
        SyntaxKind::CloseBraceToken => "}",
        SyntaxKind::CommaToken => ",",
        SyntaxKind::DotToken => ".",
        SyntaxKind::DotDotDotToken => "...",
        SyntaxKind::SemicolonToken => ";",
        SyntaxKind::ColonToken => ":",
        SyntaxKind::ColonEqualsToken => ":=",
        SyntaxKind::EqualsToken => "=",
        SyntaxKind::EqualsEqualsToken => "==",
        SyntaxKind::ExclamationToken => "!",
        SyntaxKind::ExclamationEqualsToken => "!=",
        SyntaxKind::LessThanToken => "<",
        SyntaxKind::LessThanEqualsToken => "<=",
        SyntaxKind::GreaterThanToken => ">",
        SyntaxKind::GreaterThanEqualsToken => ">=",
        SyntaxKind::LessThanMinusToken => "<-",
        SyntaxKind::PlusToken => "+",
        SyntaxKind::MinusToken => "-",
        SyntaxKind::AsteriskToken => "*",
        SyntaxKind::SlashToken => "/",
        SyntaxKind::PercentToken => "%",
        SyntaxKind::AmpersandToken => "&",
        SyntaxKind::BarToken => "|",
        SyntaxKind::CaretToken => "^",
        SyntaxKind::TildeToken => "~",
        SyntaxKind::LessThanLessThanToken => "<<",
        SyntaxKind::GreaterThanGreaterThanToken => ">>",
        SyntaxKind::AmpersandCaretToken => "&^",
        SyntaxKind::AmpersandAmpersandToken => "&&",
        SyntaxKind::BarBarToken => "||",
        SyntaxKind::PlusPlusToken => "++",
        SyntaxKind::MinusMinusToken => "--",
        SyntaxKind::PlusEqualsToken => "+=",
        SyntaxKind::MinusEqualsToken => "-=",
        SyntaxKind::AsteriskEqualsToken => "*=",
        SyntaxKind::SlashEqualsToken => "/=",
        SyntaxKind::PercentEqualsToken => "%=",
        SyntaxKind::AmpersandEqualsToken => "&=",
        SyntaxKind::BarEqualsToken => "|=",
        SyntaxKind::CaretEqualsToken => "^=",
        SyntaxKind::LessThanLessThanEqualsToken => "<<=",
        SyntaxKind::GreaterThanGreaterThanEqualsToken => ">>=",
        SyntaxKind::AmpersandCaretEqualsToken => "&^=",
        _ => return None,
    };
    Some(text)
}

/// Human-readable token description for parse errors.
pub fn token_description(kind: SyntaxKind) -> &'static str {
    if let Some(text) = keyword_to_text(kind).or_else(|| punctuation_to_text(kind)) {
        return text;
    }
    match kind {
        SyntaxKind::EndOfFileToken => "EOF",
        SyntaxKind::Identifier => "identifier",
        SyntaxKind::IntLiteral
        | SyntaxKind::FloatLiteral
        | SyntaxKind::ImaginaryLiteral
        | SyntaxKind::RuneLiteral
        | SyntaxKind::StringLiteral
        | SyntaxKind::RawStringLiteral => "literal",
        _ => "unknown token",
    }
}
