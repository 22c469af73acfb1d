//! Driver tests over temporary Go trees.

use clap::Parser;
use ctxlint_cli::args::CliArgs;
use ctxlint_cli::driver::{EXIT_CLEAN, EXIT_DIAGNOSTICS, run};
use ctxlint_cli::sources::{SourceFilter, discover};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const BAD_LOG: &str = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f() {
	log.Info("m", "k")
}
"#;

const BAD_SERRORS: &str = r#"package p

import "github.com/scionproto/scion/go/lib/serrors"

func g(err error) error {
	return serrors.WithCtx(err)
}
"#;

const CLEAN: &str = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func h(n int) {
	log.Debug("m", "n", n)
}
"#;

fn write(dir: &Path, relative: &str, text: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(&path, text).expect("write source");
    path
}

fn tree() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "a/log.go", BAD_LOG);
    write(dir.path(), "a/errs.go", BAD_SERRORS);
    write(dir.path(), "b/clean.go", CLEAN);
    write(dir.path(), "b/notes.txt", "not go");
    write(dir.path(), "vendor/dep/dep.go", BAD_LOG);
    write(dir.path(), "testdata/src/x.go", BAD_LOG);
    write(dir.path(), ".hidden/h.go", BAD_LOG);
    dir
}

fn parse(args: &[&str]) -> CliArgs {
    let mut argv = vec!["ctxlint"];
    argv.extend_from_slice(args);
    CliArgs::try_parse_from(argv).expect("args parse")
}

fn run_with(args: &[&str]) -> (i32, String, String) {
    let args = parse(args);
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(&args, &mut out, &mut err).expect("run succeeds");
    (
        code,
        String::from_utf8(out).expect("utf-8 stdout"),
        String::from_utf8(err).expect("utf-8 stderr"),
    )
}

fn no_filter() -> SourceFilter {
    SourceFilter::new(&[]).expect("empty filter")
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn test_discover_skips_vendor_testdata_and_hidden_dirs() {
    let dir = tree();
    let files = discover(&[dir.path().to_path_buf()], &no_filter()).expect("discover");
    let names: Vec<String> = files
        .iter()
        .map(|p| {
            p.strip_prefix(dir.path())
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect();
    assert_eq!(names, vec!["a/errs.go", "a/log.go", "b/clean.go"]);
}

#[test]
fn test_discover_enters_skipped_dir_named_explicitly() {
    let dir = tree();
    let files = discover(&[dir.path().join("testdata")], &no_filter()).expect("discover");
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("testdata/src/x.go"));
}

#[test]
fn test_discover_keeps_explicit_files_and_dedups() {
    let dir = tree();
    let file = dir.path().join("a/log.go");
    let files = discover(&[file.clone(), dir.path().join("a")], &no_filter()).expect("discover");
    assert_eq!(files.len(), 2);
    assert_eq!(files.iter().filter(|p| **p == file).count(), 1);
}

#[test]
fn test_discover_applies_excludes() {
    let dir = tree();
    let filter = SourceFilter::new(&["errs.go".to_string()]).expect("filter");
    let files = discover(&[dir.path().join("a")], &filter).expect("discover");
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with("log.go"));

    let filter = SourceFilter::new(&["**/b/**".to_string()]).expect("filter");
    let files = discover(&[dir.path().to_path_buf()], &filter).expect("discover");
    assert!(files.iter().all(|p| !p.ends_with("clean.go")));
}

#[test]
fn test_invalid_exclude_is_an_error() {
    assert!(SourceFilter::new(&["a[".to_string()]).is_err());
}

#[test]
fn test_missing_path_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let missing = dir.path().join("nope");
    assert!(discover(&[missing], &no_filter()).is_err());
}

// =============================================================================
// Driver
// =============================================================================

#[test]
fn test_run_reports_sorted_diagnostics() {
    let dir = tree();
    let root = dir.path().to_string_lossy().into_owned();
    let (code, out, err) = run_with(&["--color", "never", &root]);
    assert_eq!(code, EXIT_DIAGNOSTICS);

    let headers: Vec<&str> = out.lines().filter(|l| l.contains(": error: ")).collect();
    assert_eq!(headers.len(), 2);
    assert!(headers[0].contains("errs.go:6:9: error: should have context"));
    assert!(headers[0].ends_with("(serrorscheck)"));
    assert!(headers[1].contains("log.go:6:16: error: context should be even: len=1"));
    assert!(headers[1].ends_with("(logcheck)"));
    assert_eq!(err.trim(), "Found 2 diagnostics in 2 files.");
}

#[test]
fn test_run_selects_checkers() {
    let dir = tree();
    let root = dir.path().to_string_lossy().into_owned();
    let (code, out, _) = run_with(&["--color", "never", "--checker", "logcheck", &root]);
    assert_eq!(code, EXIT_DIAGNOSTICS);
    assert!(out.contains("(logcheck)"));
    assert!(!out.contains("(serrorscheck)"));
}

#[test]
fn test_run_clean_tree_exits_zero() {
    let dir = tree();
    let clean = dir.path().join("b").to_string_lossy().into_owned();
    let (code, out, err) = run_with(&[&clean]);
    assert_eq!(code, EXIT_CLEAN);
    assert!(out.is_empty());
    assert!(err.is_empty());
}

#[test]
fn test_run_without_go_files() {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path().to_string_lossy().into_owned();
    let (code, out, err) = run_with(&[&root]);
    assert_eq!(code, EXIT_CLEAN);
    assert!(out.is_empty());
    assert!(err.contains("no Go files"));
}

#[test]
fn test_run_json_output() {
    let dir = tree();
    let root = dir.path().join("a").to_string_lossy().into_owned();
    let (code, out, _) = run_with(&["--format", "json", "-j", "2", &root]);
    assert_eq!(code, EXIT_DIAGNOSTICS);

    let value: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    let diagnostics = value["diagnostics"].as_array().expect("array");
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0]["source"], "serrorscheck");
    assert_eq!(diagnostics[0]["code"], 9003);
    assert_eq!(diagnostics[1]["source"], "logcheck");
    assert_eq!(diagnostics[1]["line"], 6);
    assert_eq!(diagnostics[1]["column"], 16);
}

#[test]
fn test_run_json_output_when_clean() {
    let dir = tree();
    let clean = dir.path().join("b").to_string_lossy().into_owned();
    let (code, out, _) = run_with(&["--format", "json", &clean]);
    assert_eq!(code, EXIT_CLEAN);
    let value: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    assert_eq!(value["diagnostics"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_run_reports_syntax_errors() {
    let dir = TempDir::new().expect("temp dir");
    write(dir.path(), "broken.go", "package p\n\nfunc f() {\n\tg(\n}\n");
    let root = dir.path().to_string_lossy().into_owned();
    let (code, out, _) = run_with(&["--color", "never", &root]);
    assert_eq!(code, EXIT_DIAGNOSTICS);
    assert!(out.contains("(parser)"));
}

#[test]
fn test_list_checkers() {
    let (code, out, _) = run_with(&["--list-checkers"]);
    assert_eq!(code, EXIT_CLEAN);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "logcheck\treports invalid log calls",
            "serrorscheck\treports invalid serrors calls"
        ]
    );
}

// =============================================================================
// Configuration
// =============================================================================

const CUSTOM_CONFIG: &str = r#"{
  "analyzers": [
    {
      "name": "zapcheck",
      "doc": "reports invalid zap calls",
      "import_path": "example.com/zap",
      "entries": { "Infow": { "min_args": 2, "context_start": 1 } },
      "constructors": [],
      "render_call": false
    }
  ]
}"#;

const ZAP_USE: &str = r#"package p

import "example.com/zap"

func z() {
	zap.Infow("m", 1, 2)
}
"#;

#[test]
fn test_config_adds_analyzer() {
    let dir = TempDir::new().expect("temp dir");
    let config = write(dir.path(), "ctxlint.json", CUSTOM_CONFIG);
    let src = write(dir.path(), "src/z.go", ZAP_USE);
    let config = config.to_string_lossy().into_owned();
    let src = src.to_string_lossy().into_owned();

    let (code, out, _) = run_with(&["--list-checkers", "--config", &config]);
    assert_eq!(code, EXIT_CLEAN);
    assert!(out.lines().any(|l| l == "zapcheck\treports invalid zap calls"));

    let (code, out, _) = run_with(&[
        "--color", "never", "--config", &config, "--checker", "zapcheck", &src,
    ]);
    assert_eq!(code, EXIT_DIAGNOSTICS);
    assert!(out.contains("key should be string: type=\"int\" name=\"1\" (zapcheck)"));
}

#[test]
fn test_unknown_checker_is_an_error() {
    let args = parse(&["--checker", "nope"]);
    let err = run(&args, &mut Vec::new(), &mut Vec::new()).expect_err("unknown checker");
    assert!(format!("{err:#}").contains("nope"));
}

#[test]
fn test_invalid_config_is_an_error() {
    let dir = TempDir::new().expect("temp dir");
    let config = write(dir.path(), "bad.json", "{\"analyzers\": [{\"name\": \"\"}]}");
    let args = parse(&["--config", &config.to_string_lossy()]);
    let err = run(&args, &mut Vec::new(), &mut Vec::new()).expect_err("bad config");
    assert!(format!("{err:#}").contains("failed to load configuration"));
}
