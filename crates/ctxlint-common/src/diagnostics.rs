//! Diagnostic types and message lookup.
//!
//! Message templates use `{0}`, `{1}`, ... placeholders filled in by
//! [`format_message`]. The context-check messages are matched verbatim by
//! existing fixtures, so their text must not drift.

use serde::Serialize;

// =============================================================================
// Diagnostic Types
// =============================================================================

/// Diagnostic category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DiagnosticCategory {
    Warning = 0,
    Error = 1,
    Suggestion = 2,
    Message = 3,
}

impl DiagnosticCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCategory::Warning => "warning",
            DiagnosticCategory::Error => "error",
            DiagnosticCategory::Suggestion => "suggestion",
            DiagnosticCategory::Message => "message",
        }
    }
}

/// A positioned diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub file: String,
    pub start: u32,
    pub length: u32,
    pub message_text: String,
    pub category: DiagnosticCategory,
    pub code: u32,
    /// Name of the analyzer (or front-end phase) that produced this diagnostic.
    pub source: String,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    #[must_use]
    pub fn error(
        file: impl Into<String>,
        start: u32,
        length: u32,
        message: impl Into<String>,
        code: u32,
    ) -> Self {
        Self {
            file: file.into(),
            start,
            length,
            message_text: message.into(),
            category: DiagnosticCategory::Error,
            code,
            source: String::new(),
        }
    }

    /// Tag this diagnostic with the name of the producing analyzer.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }
}

/// Format a diagnostic message by replacing {0}, {1}, etc. with arguments.
///
/// Placeholders are substituted in a single pass, so argument text that
/// itself looks like `{1}` is copied through untouched.
#[must_use]
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let substituted = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            args.get(index).map(|arg| (*arg, close))
        });
        match substituted {
            Some((arg, close)) => {
                result.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// A diagnostic message definition with code, category, and message template.
#[derive(Clone, Copy, Debug)]
pub struct DiagnosticMessage {
    pub code: u32,
    pub category: DiagnosticCategory,
    pub message: &'static str,
}

pub mod diagnostic_codes {
    // Scanner / parser (1xxx)
    pub const INVALID_CHARACTER: u32 = 1001;
    pub const UNTERMINATED_STRING_LITERAL: u32 = 1002;
    pub const UNTERMINATED_RAW_STRING_LITERAL: u32 = 1003;
    pub const UNTERMINATED_RUNE_LITERAL: u32 = 1004;
    pub const UNTERMINATED_COMMENT: u32 = 1005;
    pub const EXPECTED_TOKEN: u32 = 1010;
    pub const EXPECTED_EXPRESSION: u32 = 1011;
    pub const EXPECTED_TYPE: u32 = 1012;
    pub const EXPECTED_DECLARATION: u32 = 1013;
    pub const EXPECTED_STATEMENT: u32 = 1014;
    pub const EXPECTED_PACKAGE_CLAUSE: u32 = 1015;

    // Context checks (9xxx)
    pub const CONTEXT_SHOULD_BE_EVEN: u32 = 9001;
    pub const KEY_SHOULD_BE_STRING: u32 = 9002;
    pub const SHOULD_HAVE_CONTEXT: u32 = 9003;
}

pub mod diagnostic_messages {
    pub const INVALID_CHARACTER: &str = "invalid character {0}";
    pub const UNTERMINATED_STRING_LITERAL: &str = "string literal not terminated";
    pub const UNTERMINATED_RAW_STRING_LITERAL: &str = "raw string literal not terminated";
    pub const UNTERMINATED_RUNE_LITERAL: &str = "rune literal not terminated";
    pub const UNTERMINATED_COMMENT: &str = "comment not terminated";
    pub const EXPECTED_TOKEN: &str = "expected {0}, found {1}";
    pub const EXPECTED_EXPRESSION: &str = "expected expression, found {0}";
    pub const EXPECTED_TYPE: &str = "expected type, found {0}";
    pub const EXPECTED_DECLARATION: &str = "expected declaration, found {0}";
    pub const EXPECTED_STATEMENT: &str = "expected statement, found {0}";
    pub const EXPECTED_PACKAGE_CLAUSE: &str = "expected 'package', found {0}";

    pub const CONTEXT_SHOULD_BE_EVEN: &str = "context should be even: len={0} ctx={1}";
    pub const KEY_SHOULD_BE_STRING: &str = "key should be string: type={0} name={1}";
    pub const SHOULD_HAVE_CONTEXT: &str = "should have context: {0}";
}

pub static DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    DiagnosticMessage {
        code: diagnostic_codes::INVALID_CHARACTER,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::INVALID_CHARACTER,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_STRING_LITERAL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_RAW_STRING_LITERAL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_RAW_STRING_LITERAL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_RUNE_LITERAL,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_RUNE_LITERAL,
    },
    DiagnosticMessage {
        code: diagnostic_codes::UNTERMINATED_COMMENT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::UNTERMINATED_COMMENT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_TOKEN,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_TOKEN,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_EXPRESSION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_EXPRESSION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_TYPE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_TYPE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_DECLARATION,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_DECLARATION,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_STATEMENT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_STATEMENT,
    },
    DiagnosticMessage {
        code: diagnostic_codes::EXPECTED_PACKAGE_CLAUSE,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::EXPECTED_PACKAGE_CLAUSE,
    },
    DiagnosticMessage {
        code: diagnostic_codes::CONTEXT_SHOULD_BE_EVEN,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::CONTEXT_SHOULD_BE_EVEN,
    },
    DiagnosticMessage {
        code: diagnostic_codes::KEY_SHOULD_BE_STRING,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::KEY_SHOULD_BE_STRING,
    },
    DiagnosticMessage {
        code: diagnostic_codes::SHOULD_HAVE_CONTEXT,
        category: DiagnosticCategory::Error,
        message: diagnostic_messages::SHOULD_HAVE_CONTEXT,
    },
];

/// Look up a diagnostic message definition by code.
#[must_use]
pub fn get_diagnostic_message(code: u32) -> Option<&'static DiagnosticMessage> {
    DIAGNOSTIC_MESSAGES.iter().find(|m| m.code == code)
}

/// Get the message template for a diagnostic code.
#[must_use]
pub fn get_message_template(code: u32) -> Option<&'static str> {
    get_diagnostic_message(code).map(|m| m.message)
}
