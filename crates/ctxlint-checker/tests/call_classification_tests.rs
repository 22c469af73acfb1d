//! Which calls reach the watched API: direct, bound, chained, and the forms
//! that are deliberately left alone.

use ctxlint_binder::BinderState;
use ctxlint_checker::{
    CallClass, CheckerState, SourceFile, WatchedApi, analyze, logcheck, resolve_alias,
};
use ctxlint_common::Diagnostic;
use ctxlint_parser::parser::syntax_kind_ext;
use ctxlint_parser::{ParserState, Printer};
use ctxlint_solver::evaluate_file;

/// Every `<receiver>.<method>(...)` call with its classification.
fn classify_calls(source: &str) -> Vec<(String, CallClass)> {
    let mut parser = ParserState::new("test.go".to_string(), source);
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    let info = evaluate_file(&arena, &binder, root);

    let api = logcheck();
    let alias = resolve_alias(&arena, root, &api).expect("watched package imported");
    let file = SourceFile::new("test.go", source, &arena, &binder, root);
    let mut sink: Vec<Diagnostic> = Vec::new();
    let mut state = CheckerState::new(file, &info, &api, alias, &mut sink);
    let printer = Printer::new(&arena, source);

    let mut classes = Vec::new();
    for idx in arena.preorder(root) {
        if arena.kind_of(idx) != Some(syntax_kind_ext::CALL_EXPRESSION) {
            continue;
        }
        let Some(call) = arena.get(idx).and_then(|n| arena.get_call_expr(n)) else {
            continue;
        };
        let Some(selector) = arena
            .get(call.expression)
            .and_then(|n| arena.get_selector_expr(n))
        else {
            continue;
        };
        let text = printer.render(idx).expect("renderable call");
        classes.push((text, state.classify(selector.expression)));
    }
    classes
}

fn class_of(classes: &[(String, CallClass)], call: &str) -> CallClass {
    classes
        .iter()
        .find(|(text, _)| text == call)
        .map(|(_, class)| *class)
        .unwrap_or_else(|| panic!("no call `{call}` in {classes:?}"))
}

fn diagnostics_for(api: &WatchedApi, source: &str) -> Vec<Diagnostic> {
    let mut parser = ParserState::new("test.go".to_string(), source);
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    let info = evaluate_file(&arena, &binder, root);
    let file = SourceFile::new("test.go", source, &arena, &binder, root);
    analyze(file, &info, api).expect("analysis should succeed")
}

#[test]
fn test_direct_bound_and_chained_calls() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f(ctx interface{}) {
	log.Info("direct", "k")
	logger := log.New("a", "b")
	logger.Info("bound", "k")
	fromCtx := log.FromCtx(ctx)
	fromCtx.Debug("bound", "k")
	log.Root().Warn("chained", "k")
}
"#;
    let classes = classify_calls(source);
    assert_eq!(class_of(&classes, r#"log.Info("direct", "k")"#), CallClass::DirectPackageCall);
    assert_eq!(class_of(&classes, r#"logger.Info("bound", "k")"#), CallClass::BoundVariableCall);
    assert_eq!(class_of(&classes, r#"fromCtx.Debug("bound", "k")"#), CallClass::BoundVariableCall);
    assert_eq!(
        class_of(&classes, r#"log.Root().Warn("chained", "k")"#),
        CallClass::ChainedConstructorCall
    );
    assert_eq!(class_of(&classes, r#"log.Root()"#), CallClass::DirectPackageCall);

    let diagnostics = diagnostics_for(&logcheck(), source);
    assert_eq!(diagnostics.len(), 4);
}

#[test]
fn test_forms_outside_the_one_hop_boundary() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

type holder struct {
	l interface{}
}

func other() interface{} { return nil }

func f(param interface{}, h holder, ls []interface{}) {
	var declared = log.New()
	declared.Info("var spec", "k")
	param.Info("parameter", "k")
	h.l.Info("field", "k")
	ls[0].Info("index", "k")
	indirect := log.New()
	copied := indirect
	copied.Info("two hops", "k")
	plain := other()
	plain.Info("not a constructor", "k")
	log.Other().Info("not a constructor", "k")
}
"#;
    let classes = classify_calls(source);
    for call in [
        r#"declared.Info("var spec", "k")"#,
        r#"param.Info("parameter", "k")"#,
        r#"h.l.Info("field", "k")"#,
        r#"ls[0].Info("index", "k")"#,
        r#"copied.Info("two hops", "k")"#,
        r#"plain.Info("not a constructor", "k")"#,
        r#"log.Other().Info("not a constructor", "k")"#,
    ] {
        assert_eq!(class_of(&classes, call), CallClass::OutOfScope, "{call}");
    }
    assert!(diagnostics_for(&logcheck(), source).is_empty());
}

#[test]
fn test_multi_assignment_binds_positionally() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func pair() (interface{}, error) { return nil, nil }

func f() {
	n, l := 1, log.New()
	l.Info("positional", "k")
	a, b := pair()
	a.Info("unpacked", "k")
	_ = n
	_ = b
}
"#;
    let classes = classify_calls(source);
    assert_eq!(class_of(&classes, r#"l.Info("positional", "k")"#), CallClass::BoundVariableCall);
    assert_eq!(class_of(&classes, r#"a.Info("unpacked", "k")"#), CallClass::OutOfScope);
}

#[test]
fn test_shadowed_package_name_is_out_of_scope() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

type fake struct{}

func (x fake) Info(msg string, ctx ...interface{}) {}

func f() {
	log.Info("package", "k")
	{
		log := fake{}
		log.Info("shadowed", "k")
	}
}
"#;
    let classes = classify_calls(source);
    assert_eq!(class_of(&classes, r#"log.Info("package", "k")"#), CallClass::DirectPackageCall);
    assert_eq!(class_of(&classes, r#"log.Info("shadowed", "k")"#), CallClass::OutOfScope);
}

#[test]
fn test_renamed_imports() {
    let source = r#"package p

import (
	log "example.com/fake/slog"

	slog "github.com/scionproto/scion/go/lib/log"
)

func f() {
	log.Info("look-alike", "k")
	slog.Info("renamed", "k")
}
"#;
    let diagnostics = diagnostics_for(&logcheck(), source);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].message_text.contains(r#"slog.Info(\"renamed\", \"k\")"#));
}

#[test]
fn test_alias_resolution() {
    let alias_of = |source: &str| {
        let mut parser = ParserState::new("test.go".to_string(), source);
        let root = parser.parse_source_file();
        let arena = parser.into_arena();
        resolve_alias(&arena, root, &logcheck())
    };

    assert_eq!(
        alias_of("package p\n\nimport \"github.com/scionproto/scion/go/lib/log\"\n").as_deref(),
        Some("log")
    );
    assert_eq!(
        alias_of("package p\n\nimport l \"github.com/scionproto/scion/go/lib/log\"\n").as_deref(),
        Some("l")
    );
    assert_eq!(
        alias_of("package p\n\nimport _ \"github.com/scionproto/scion/go/lib/log\"\n"),
        None
    );
    assert_eq!(
        alias_of("package p\n\nimport . \"github.com/scionproto/scion/go/lib/log\"\n"),
        None
    );
    assert_eq!(alias_of("package p\n\nimport \"log\"\n"), None);
    assert_eq!(
        alias_of(
            "package p\n\nimport (\n\ta \"github.com/scionproto/scion/go/lib/log\"\n\tb \"github.com/scionproto/scion/go/lib/log\"\n)\n"
        )
        .as_deref(),
        Some("b")
    );
}

#[test]
fn test_dot_import_disables_checking() {
    let source = r#"package p

import . "github.com/scionproto/scion/go/lib/log"

func f() {
	Info("m", "k")
}
"#;
    assert!(diagnostics_for(&logcheck(), source).is_empty());
}
