use ctxlint_binder::BinderState;
use ctxlint_common::{Diagnostic, diagnostic_codes};
use ctxlint_parser::{NodeArena, NodeIndex, ParserState};
use ctxlint_solver::{TypeInfo, evaluate_file};

use crate::{CheckError, CheckerState, SourceFile, logcheck};

const SOURCE: &str = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f() {
	log.Info("m", "key")
}
"#;

fn parse_and_bind() -> (NodeArena, BinderState, NodeIndex) {
    let mut parser = ParserState::new("spanless.go".to_string(), SOURCE);
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    (arena, binder, root)
}

#[test]
fn node_outside_the_arena_is_an_error() {
    let (arena, binder, root) = parse_and_bind();
    let info: TypeInfo = evaluate_file(&arena, &binder, root);
    let api = logcheck();
    let file = SourceFile::new("spanless.go", SOURCE, &arena, &binder, root);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut state = CheckerState::new(file, &info, &api, "log".to_string(), &mut diagnostics);

    let missing = NodeIndex(arena.len() as u32 + 5);
    let err = state
        .error_at_node(missing, "lost".to_string(), diagnostic_codes::CONTEXT_SHOULD_BE_EVEN)
        .expect_err("a node without a span cannot carry a diagnostic");
    assert_eq!(
        err,
        CheckError::MissingSpan {
            file: "spanless.go".to_string(),
            node: missing.0,
        }
    );
    assert_eq!(err.to_string(), format!("spanless.go: node {} has no source span", missing.0));
    drop(state);
    assert!(diagnostics.is_empty());
}

#[test]
fn spanned_node_reports_at_its_range() {
    let (arena, binder, root) = parse_and_bind();
    let info = evaluate_file(&arena, &binder, root);
    let api = logcheck();
    let file = SourceFile::new("spanless.go", SOURCE, &arena, &binder, root);
    let mut diagnostics: Vec<Diagnostic> = Vec::new();
    let mut state = CheckerState::new(file, &info, &api, "log".to_string(), &mut diagnostics);

    state
        .error_at_node(root, "whole file".to_string(), diagnostic_codes::SHOULD_HAVE_CONTEXT)
        .expect("the root spans the file");
    drop(state);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].start, 0);
    assert_eq!(diagnostics[0].length as usize, SOURCE.len());
    assert_eq!(diagnostics[0].source, "logcheck");
}
