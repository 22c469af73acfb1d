use clap::Parser;
use std::path::PathBuf;

use super::args::{CliArgs, ColorChoice, OutputFormat};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["ctxlint"]).expect("default args should parse");

    assert!(args.paths.is_empty());
    assert!(args.checkers.is_empty());
    assert!(args.exclude.is_empty());
    assert!(args.config.is_none());
    assert!(!args.list_checkers);
    assert_eq!(args.format, OutputFormat::Text);
    assert_eq!(args.color, ColorChoice::Auto);
    assert_eq!(args.jobs, None);
    assert_eq!(args.input_paths(), vec![PathBuf::from(".")]);
}

#[test]
fn parses_common_flags() {
    let args = CliArgs::try_parse_from([
        "ctxlint",
        "--checker",
        "logcheck",
        "--checker",
        "serrorscheck",
        "--exclude",
        "*_test.go",
        "--config",
        "ctxlint.json",
        "--format",
        "JSON",
        "--color",
        "never",
        "-j",
        "4",
        "pkg/a",
        "pkg/b/file.go",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.checkers, vec!["logcheck", "serrorscheck"]);
    assert_eq!(args.exclude, vec!["*_test.go"]);
    assert_eq!(args.config.as_deref(), Some(std::path::Path::new("ctxlint.json")));
    assert_eq!(args.format, OutputFormat::Json);
    assert_eq!(args.color, ColorChoice::Never);
    assert_eq!(args.jobs, Some(4));
    assert_eq!(
        args.input_paths(),
        vec![PathBuf::from("pkg/a"), PathBuf::from("pkg/b/file.go")]
    );
}

#[test]
fn rejects_zero_jobs() {
    assert!(CliArgs::try_parse_from(["ctxlint", "--jobs", "0"]).is_err());
}

#[test]
fn rejects_unknown_format() {
    assert!(CliArgs::try_parse_from(["ctxlint", "--format", "xml"]).is_err());
}

#[test]
fn color_choice_follows_terminal_only_in_auto() {
    assert!(ColorChoice::Auto.enabled(true));
    assert!(!ColorChoice::Auto.enabled(false));
    assert!(ColorChoice::Always.enabled(false));
    assert!(!ColorChoice::Never.enabled(true));
}
