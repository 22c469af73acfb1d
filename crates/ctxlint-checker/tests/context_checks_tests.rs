//! Parity, key-type and missing-context diagnostics.

use ctxlint_binder::BinderState;
use ctxlint_checker::{
    CheckError, SourceFile, TypeOracle, WatchedApi, analyze, logcheck, serrorscheck,
};
use ctxlint_common::{Diagnostic, diagnostic_codes};
use ctxlint_parser::{NodeIndex, ParserState};
use ctxlint_solver::{TypeId, evaluate_file};

fn check_with(api: &WatchedApi, source: &str) -> Vec<Diagnostic> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut parser = ParserState::new("test.go".to_string(), source);
    let root = parser.parse_source_file();
    assert!(
        parser.get_diagnostics().is_empty(),
        "unexpected parse errors: {:?}",
        parser.get_diagnostics()
    );
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    let info = evaluate_file(&arena, &binder, root);
    let file = SourceFile::new("test.go", source, &arena, &binder, root);
    analyze(file, &info, api).expect("analysis should succeed")
}

fn messages(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics.iter().map(|d| d.message_text.clone()).collect()
}

fn spanned<'s>(source: &'s str, diagnostic: &Diagnostic) -> &'s str {
    let start = diagnostic.start as usize;
    &source[start..start + diagnostic.length as usize]
}

#[test]
fn test_single_dangling_key() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f() {
	log.Info("m", "key")
}
"#;
    let diagnostics = check_with(&logcheck(), source);
    assert_eq!(
        messages(&diagnostics),
        vec![r#"context should be even: len=1 ctx=["key"] expr="log.Info(\"m\", \"key\")""#]
    );
    assert_eq!(diagnostics[0].code, diagnostic_codes::CONTEXT_SHOULD_BE_EVEN);
    assert_eq!(diagnostics[0].source, "logcheck");
    assert_eq!(diagnostics[0].file, "test.go");
    assert_eq!(spanned(source, &diagnostics[0]), r#""key""#);
}

#[test]
fn test_odd_context_with_string_keys() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f(v int) {
	log.Info("m", "key", v, "key")
}
"#;
    assert_eq!(
        messages(&check_with(&logcheck(), source)),
        vec![r#"context should be even: len=3 ctx=["key",v,"key"] expr="log.Info(\"m\", \"key\", v, \"key\")""#]
    );
}

#[test]
fn test_non_string_key() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f() {
	v := 1
	log.Info("m", v, v)
}
"#;
    let diagnostics = check_with(&logcheck(), source);
    assert_eq!(
        messages(&diagnostics),
        vec![r#"key should be string: type="int" name="v" expr="log.Info(\"m\", v, v)""#]
    );
    assert_eq!(diagnostics[0].code, diagnostic_codes::KEY_SHOULD_BE_STRING);
    assert_eq!(spanned(source, &diagnostics[0]), "v");
}

#[test]
fn test_every_leveled_method_is_checked() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f() {
	log.Trace("m", "a")
	log.Debug("m", "a")
	log.Info("m", "a")
	log.Warn("m", "a")
	log.Error("m", "a")
	log.Crit("m", "a")
}
"#;
    assert_eq!(check_with(&logcheck(), source).len(), 6);
}

#[test]
fn test_valid_calls_produce_nothing() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

type key string

const typed key = "k"

const untyped = "k"

func f(s string) {
	log.Info("m")
	log.Info("m", "a", 1)
	log.Info("m", s, 1, typed, 2.5, untyped, nil)
	log.Info("m", key("k"), []int{1})
	log.SetLevel(1, 2)
}
"#;
    assert!(check_with(&logcheck(), source).is_empty());
}

#[test]
fn test_multiple_diagnostics_are_ordered_by_position() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f() {
	log.Debug("m", 1, 2, 3.5)
	log.Info("m", "k")
}
"#;
    let diagnostics = check_with(&logcheck(), source);
    let codes: Vec<u32> = diagnostics.iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![
            diagnostic_codes::CONTEXT_SHOULD_BE_EVEN,
            diagnostic_codes::KEY_SHOULD_BE_STRING,
            diagnostic_codes::KEY_SHOULD_BE_STRING,
            diagnostic_codes::CONTEXT_SHOULD_BE_EVEN,
        ]
    );
    assert!(diagnostics[2].message_text.starts_with(r#"key should be string: type="float64" name="3.5""#));
    assert!(diagnostics.windows(2).all(|w| w[0].start <= w[1].start));
}

#[test]
fn test_spread_calls_are_skipped() {
    let source = r#"package p

import (
	"github.com/scionproto/scion/go/lib/log"
	"github.com/scionproto/scion/go/lib/serrors"
)

func f(err error, ctx ...interface{}) {
	log.Info("m", ctx...)
	serrors.WithCtx(err, ctx...)
	serrors.Wrap("m", err, ctx...)
}
"#;
    assert!(check_with(&logcheck(), source).is_empty());
    assert!(check_with(&serrorscheck(), source).is_empty());
}

#[test]
fn test_unknown_key_types_are_accepted() {
    let source = r#"package p

import (
	"fmt"

	"github.com/scionproto/scion/go/lib/log"
)

func f() {
	log.Info("m", fmt.Sprint(1), 1, undefined, 2)
}
"#;
    assert!(check_with(&logcheck(), source).is_empty());
}

#[test]
fn test_serrors_messages_have_no_expression_suffix() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/serrors"

var errBase = serrors.New("base")

func f() error {
	_ = serrors.New("m", 1, "v")
	_ = serrors.Wrap("m", errBase, "k")
	_ = serrors.WrapStr("m", errBase)
	return serrors.WithCtx(errBase, "k", 1)
}
"#;
    assert_eq!(
        messages(&check_with(&serrorscheck(), source)),
        vec![
            r#"key should be string: type="int" name="1""#,
            r#"context should be even: len=1 ctx=["k"]"#,
        ]
    );
}

#[test]
fn test_with_ctx_requires_context() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/serrors"

func f(err error) error {
	return serrors.WithCtx(err)
}
"#;
    let diagnostics = check_with(&serrorscheck(), source);
    assert_eq!(
        messages(&diagnostics),
        vec!["should have context: serrors.WithCtx(err)"]
    );
    assert_eq!(diagnostics[0].code, diagnostic_codes::SHOULD_HAVE_CONTEXT);
    assert_eq!(spanned(source, &diagnostics[0]), "serrors.WithCtx(err)");
}

#[test]
fn test_named_key_types_display_with_package() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/serrors"

type key int

type multiKey key

func f(err error) error {
	return serrors.WithCtx(err, key(1), 2, multiKey(3), 4)
}
"#;
    assert_eq!(
        messages(&check_with(&serrorscheck(), source)),
        vec![
            r#"key should be string: type="p.key" name="key(1)""#,
            r#"key should be string: type="p.multiKey" name="multiKey(3)""#,
        ]
    );
}

#[test]
fn test_files_without_the_import_are_skipped() {
    let source = r#"package p

import log "example.com/other/log"

func f() {
	log.Info("m", "key")
}
"#;
    assert!(check_with(&logcheck(), source).is_empty());
}

#[test]
fn test_analysis_is_idempotent() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f() {
	log.Info("m", 1, "a", 2.5)
}
"#;
    let first = check_with(&logcheck(), source);
    let second = check_with(&logcheck(), source);
    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

/// Knows nothing about any expression.
struct BlindOracle;

impl TypeOracle for BlindOracle {
    fn type_of(&self, _expr: NodeIndex) -> TypeId {
        TypeId::INVALID
    }

    fn is_string_like(&self, _ty: TypeId) -> bool {
        false
    }

    fn display(&self, _ty: TypeId) -> String {
        "invalid type".to_string()
    }
}

#[test]
fn test_oracle_without_types_still_checks_parity() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f() {
	log.Info("m", 1, 2, 3)
}
"#;
    let mut parser = ParserState::new("test.go".to_string(), source);
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    let file = SourceFile::new("test.go", source, &arena, &binder, root);

    let diagnostics = analyze(file, &BlindOracle, &logcheck()).expect("analysis should succeed");
    assert_eq!(
        messages(&diagnostics),
        vec![r#"context should be even: len=3 ctx=[1,2,3] expr="log.Info(\"m\", 1, 2, 3)""#]
    );
}

#[test]
fn test_render_failure_aborts_the_file() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f() {
	log.Info("m", "key")
}
"#;
    let mut parser = ParserState::new("broken.go".to_string(), source);
    let root = parser.parse_source_file();
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    let info = evaluate_file(&arena, &binder, root);

    // Spans of the call now fall outside the text handed to the renderer.
    let truncated = &source[..source.find("log.Info").expect("call present")];
    let file = SourceFile::new("broken.go", truncated, &arena, &binder, root);
    let err = analyze(file, &info, &logcheck()).expect_err("rendering should fail");
    let CheckError::Render { file, .. } = err else {
        panic!("expected a render error, got {err:?}");
    };
    assert_eq!(file, "broken.go");
}

#[test]
fn test_generic_declarations_do_not_hide_calls() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func g[T any](v T) T { return v }

func f() {
	log.Info("m", "k")
}
"#;
    assert_eq!(
        messages(&check_with(&logcheck(), source)),
        vec![r#"context should be even: len=1 ctx=["k"] expr="log.Info(\"m\", \"k\")""#]
    );
}

#[test]
fn test_type_parameter_keys_are_unknown() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

type Pair[K comparable, V any] struct {
	key   K
	value V
}

func (p Pair[K, V]) Log() {
	log.Info("pair", p.key, p.value)
}

func show[K comparable](k K, n int) {
	log.Info("m", k, n)
	log.Info("m", n, k)
}
"#;
    assert_eq!(
        messages(&check_with(&logcheck(), source)),
        vec![r#"key should be string: type="int" name="n" expr="log.Info(\"m\", n, k)""#]
    );
}

#[test]
fn test_interface_error_and_nil_keys() {
    let source = r#"package p

import "github.com/scionproto/scion/go/lib/log"

func f(err error, v interface{}) {
	log.Info("m", err, 1, v, 2, nil, 3)
}
"#;
    let expr = r#"expr="log.Info(\"m\", err, 1, v, 2, nil, 3)""#;
    assert_eq!(
        messages(&check_with(&logcheck(), source)),
        vec![
            format!(r#"key should be string: type="error" name="err" {expr}"#),
            format!(r#"key should be string: type="interface{{}}" name="v" {expr}"#),
            format!(r#"key should be string: type="untyped nil" name="nil" {expr}"#),
        ]
    );
}

#[test]
fn test_well_known_stdlib_key_types() {
    let source = r#"package p

import (
	"context"
	"errors"
	"fmt"
	"time"

	"github.com/scionproto/scion/go/lib/serrors"
)

func f(ctx context.Context, d time.Duration) error {
	return serrors.WithCtx(errors.New("base"),
		ctx, 1,
		d, 2,
		fmt.Errorf("x %d", 3), 4,
		time.Duration(5), 6,
		fmt.Sprint(7), 8)
}
"#;
    assert_eq!(
        messages(&check_with(&serrorscheck(), source)),
        vec![
            r#"key should be string: type="context.Context" name="ctx""#,
            r#"key should be string: type="time.Duration" name="d""#,
            r#"key should be string: type="error" name="fmt.Errorf(\"x %d\", 3)""#,
            r#"key should be string: type="time.Duration" name="time.Duration(5)""#,
        ]
    );
}

#[test]
fn test_lookalike_stdlib_imports_stay_unknown() {
    let source = r#"package p

import (
	context "example.com/context"

	"github.com/scionproto/scion/go/lib/log"
)

func f(ctx context.Context) {
	log.Info("m", ctx, 1)
}
"#;
    assert!(check_with(&logcheck(), source).is_empty());
}

#[test]
fn test_context_value_as_key() {
    let source = r#"package p

import (
	"context"

	"github.com/scionproto/scion/go/lib/log"
)

func f(ctx context.Context) {
	log.Info("m", ctx, 1)
}
"#;
    let diagnostics = check_with(&logcheck(), source);
    assert_eq!(
        messages(&diagnostics),
        vec![r#"key should be string: type="context.Context" name="ctx" expr="log.Info(\"m\", ctx, 1)""#]
    );
    assert_eq!(spanned(source, &diagnostics[0]), "ctx");
}
