use ctxlint_common::Diagnostic;

use super::reporter::{Reporter, summary};

const SOURCE: &str = "package p\n\nfunc f() {\n\tlog.Info(\"msg\", \"key\")\n}\n";

fn parity_diagnostic() -> Diagnostic {
    let start = SOURCE.find("log.Info").expect("call in source") as u32;
    let length = "log.Info(\"msg\", \"key\")".len() as u32;
    Diagnostic::error("p.go", start, length, "context should be even: len=1", 9001)
        .with_source("logcheck")
}

fn plain_reporter() -> Reporter {
    let mut reporter = Reporter::new(false);
    reporter.add_source("p.go", SOURCE);
    reporter
}

#[test]
fn formats_location_category_and_source() {
    let reporter = plain_reporter();
    let text = reporter.format_diagnostic(&parity_diagnostic());
    let first = text.lines().next().expect("header line");
    assert_eq!(
        first,
        "p.go:4:2: error: context should be even: len=1 (logcheck)"
    );
}

#[test]
fn snippet_underlines_the_span() {
    let reporter = plain_reporter();
    let text = reporter.format_diagnostic(&parity_diagnostic());
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "    4       log.Info(\"msg\", \"key\")");
    // The tab before the call expands to four blanks.
    assert_eq!(lines[2], format!("        {}{}", " ".repeat(4), "~".repeat(22)));
}

#[test]
fn unknown_file_falls_back_to_the_name() {
    let reporter = Reporter::new(false);
    let diagnostic = Diagnostic::error("other.go", 3, 1, "boom", 1);
    assert_eq!(reporter.format_diagnostic(&diagnostic), "other.go: error: boom");
}

#[test]
fn render_separates_diagnostics_by_newline() {
    let reporter = plain_reporter();
    let diagnostics = vec![parity_diagnostic(), parity_diagnostic()];
    let rendered = reporter.render(&diagnostics);
    assert_eq!(rendered.matches("p.go:4:2:").count(), 2);
    assert_eq!(rendered.lines().count(), 6);
}

#[test]
fn json_includes_line_and_column() {
    let reporter = plain_reporter();
    let json = reporter
        .render_json(&[parity_diagnostic()])
        .expect("serializable");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");
    let first = &value["diagnostics"][0];
    assert_eq!(first["file"], "p.go");
    assert_eq!(first["line"], 4);
    assert_eq!(first["column"], 2);
    assert_eq!(first["code"], 9001);
    assert_eq!(first["source"], "logcheck");
    assert_eq!(first["message_text"], "context should be even: len=1");
}

#[test]
fn summary_pluralizes() {
    assert_eq!(summary(1, 1), "Found 1 diagnostic in 1 file.");
    assert_eq!(summary(3, 2), "Found 3 diagnostics in 2 files.");
}
