//! Runs the analyzers over the `testdata/src` fixture packages and checks
//! the reported diagnostics against their `// want` comments.

use std::path::PathBuf;

use ctxlint::analysistest::{self, FixtureReport, compare, parse_expectations};
use ctxlint::{Diagnostic, logcheck, serrorscheck};

fn testdata_src() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata").join("src")
}

fn assert_clean(report: &FixtureReport) {
    assert!(
        report.is_clean(),
        "unexpected diagnostics:\n{}\nunmatched expectations:\n{}",
        report.unexpected.join("\n"),
        report.unmatched.join("\n")
    );
}

#[test]
fn test_logcheck_fixtures() {
    let report = analysistest::run(&testdata_src(), &logcheck(), &["logcheck/fail", "logcheck/named"])
        .expect("fixtures should load");
    assert_clean(&report);
    assert_eq!(report.files, 2);
    assert_eq!(report.matched, 21);
}

#[test]
fn test_serrorscheck_fixtures() {
    let report = analysistest::run(
        &testdata_src(),
        &serrorscheck(),
        &["serrorscheck/fail", "serrorscheck/named"],
    )
    .expect("fixtures should load");
    assert_clean(&report);
    assert_eq!(report.files, 2);
    assert_eq!(report.matched, 12);
}

#[test]
fn test_analyzers_ignore_each_others_fixtures() {
    let report = analysistest::run(&testdata_src(), &serrorscheck(), &["logcheck/fail"])
        .expect("fixtures should load");
    assert!(report.unexpected.is_empty());
    assert_eq!(report.matched, 0);
    assert!(!report.unmatched.is_empty());
}

#[test]
fn test_want_comment_parsing() {
    let source = "package p\n\nfunc f() {\n\tg() // want `a\\(b\\)` \"c \\\"d\\\"\"\n}\n";
    let expectations = parse_expectations("p.go", source).expect("valid patterns");
    assert_eq!(expectations.len(), 2);
    assert!(expectations.iter().all(|e| e.line == 4));
    assert!(expectations[0].pattern.is_match("a(b)"));
    assert!(expectations[1].pattern.is_match(r#"c "d""#));

    assert!(parse_expectations("p.go", "x // want `(`\n").is_err());
    assert!(parse_expectations("p.go", "x // want nothing\n").is_err());
}

#[test]
fn test_compare_reports_both_directions() {
    let source = "line one\nline two // want `expected`\n";
    let expectations = parse_expectations("p.go", source).expect("valid patterns");
    let stray = Diagnostic::error("p.go", 0, 4, "stray", 9001);
    let report = compare("p.go", source, expectations, &[stray]);
    assert_eq!(report.unexpected, vec!["p.go:1: stray"]);
    assert_eq!(report.unmatched, vec!["p.go:2: no diagnostic matching `expected`"]);
    assert_eq!(report.matched, 0);
}

#[test]
fn test_expectations_are_consumed_once() {
    let source = "x // want `dup`\n";
    let expectations = parse_expectations("p.go", source).expect("valid patterns");
    let first = Diagnostic::error("p.go", 0, 1, "dup", 9001);
    let second = Diagnostic::error("p.go", 0, 1, "dup", 9001);
    let report = compare("p.go", source, expectations, &[first, second]);
    assert_eq!(report.matched, 1);
    assert_eq!(report.unexpected, vec!["p.go:1: dup"]);
}
