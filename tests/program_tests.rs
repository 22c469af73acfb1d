//! End-to-end pipeline: parse, bind, evaluate and check.

use ctxlint::{
    PARSER_SOURCE, builtin_analyzers, check_source, check_sources, check_sources_with_stats,
    logcheck,
};

const LOGGING: &str = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f() {
	log.Info("m", "k")
}
"#;

const ERRORS: &str = r#"package p

import "github.com/scionproto/scion/go/lib/serrors"

func f(err error) error {
	return serrors.WithCtx(err)
}
"#;

const BOTH: &str = r#"package p

import (
	"github.com/scionproto/scion/go/lib/log"
	"github.com/scionproto/scion/go/lib/serrors"
)

func f(err error) error {
	log.Info("m", 1, "v")
	return serrors.New("m", "k")
}
"#;

#[test]
fn test_check_source_runs_every_analyzer() {
    let report = check_source("both.go", BOTH, &builtin_analyzers()).expect("check succeeds");
    assert!(!report.has_errors());
    let sources: Vec<&str> = report.diagnostics.iter().map(|d| d.source.as_str()).collect();
    assert_eq!(sources, vec!["logcheck", "serrorscheck"]);
    assert!(report.diagnostics.windows(2).all(|w| w[0].start <= w[1].start));
}

#[test]
fn test_syntax_errors_skip_analysis() {
    let source = "package p\n\nimport \"github.com/scionproto/scion/go/lib/log\"\n\nfunc f() {\n\tlog.Info(\"m\", \"k\"\n}\n";
    let report = check_source("broken.go", source, &builtin_analyzers()).expect("check succeeds");
    assert!(report.has_errors());
    assert!(report.diagnostics.is_empty());
    assert!(report.parse_diagnostics.iter().all(|d| d.source == PARSER_SOURCE));
    assert_eq!(report.all_diagnostics().count(), report.parse_diagnostics.len());
}

#[test]
fn test_generic_code_is_analyzed() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

type Set[K comparable] map[K]struct{}

func Keys[K comparable, V any](m map[K]V) []K { return nil }

func f() {
	_ = Keys[string, int](nil)
	log.Info("m", "k")
}
"#;
    let report = check_source("generic.go", source, &[logcheck()]).expect("check succeeds");
    assert!(report.parse_diagnostics.is_empty(), "{:?}", report.parse_diagnostics);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0].message_text.starts_with("context should be even: len=1"));
}

#[test]
fn test_parallel_results_keep_input_order() {
    let files: Vec<(String, String)> = (0..16)
        .map(|i| {
            let text = if i % 2 == 0 { LOGGING } else { ERRORS };
            (format!("file{i}.go"), text.to_string())
        })
        .collect();
    let results = check_sources(&files, &builtin_analyzers());
    assert_eq!(results.len(), files.len());
    for (i, result) in results.iter().enumerate() {
        let report = result.as_ref().expect("check succeeds");
        assert_eq!(report.file_name, format!("file{i}.go"));
        assert_eq!(report.diagnostics.len(), 1);
        let expected = if i % 2 == 0 { "logcheck" } else { "serrorscheck" };
        assert_eq!(report.diagnostics[0].source, expected);
    }
}

#[test]
fn test_stats_summarize_the_run() {
    let files = vec![
        ("a.go".to_string(), LOGGING.to_string()),
        ("b.go".to_string(), BOTH.to_string()),
        ("c.go".to_string(), "package p\n\nfunc f() {\n".to_string()),
    ];
    let (results, stats) = check_sources_with_stats(&files, &[logcheck()]);
    assert_eq!(results.len(), 3);
    assert_eq!(stats.file_count, 3);
    assert_eq!(stats.total_bytes, files.iter().map(|(_, t)| t.len()).sum::<usize>());
    assert_eq!(stats.diagnostic_count, 2);
    assert!(stats.syntax_error_count > 0);
    assert_eq!(stats.failed_files, 0);
}

#[test]
fn test_repeated_runs_are_identical() {
    let analyzers = builtin_analyzers();
    let first = check_source("both.go", BOTH, &analyzers).expect("check succeeds");
    let second = check_source("both.go", BOTH, &analyzers).expect("check succeeds");
    assert_eq!(first.diagnostics, second.diagnostics);
}
