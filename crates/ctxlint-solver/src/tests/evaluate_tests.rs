use super::*;
use ctxlint_binder::BinderState;
use ctxlint_parser::parser::syntax_kind_ext;
use ctxlint_parser::ParserState;

/// Display names of the arguments of every call to `g`, in source order.
fn g_argument_types(source: &str) -> Vec<String> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let mut parser = ParserState::new("test.go".to_string(), source);
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    let info = evaluate_file(&arena, &binder, root);

    let mut types = Vec::new();
    for idx in arena.preorder(root) {
        let Some(node) = arena.get(idx) else {
            continue;
        };
        if node.kind != syntax_kind_ext::CALL_EXPRESSION {
            continue;
        }
        let Some(call) = arena.get_call_expr(node) else {
            continue;
        };
        if arena.identifier_text(call.expression) != Some("g") {
            continue;
        }
        for arg in call.arguments.iter() {
            types.push(info.display(info.type_of(arg)));
        }
    }
    types
}

#[test]
fn test_literal_arguments_take_default_types() {
    let source = r#"package p

func f() {
	g("s", `raw`, 1, 0x1F, 1.5, 'r', 2i, true, nil)
}
"#;
    assert_eq!(
        g_argument_types(source),
        vec![
            "string",
            "string",
            "int",
            "int",
            "float64",
            "rune",
            "complex128",
            "bool",
            "untyped nil"
        ]
    );
}

#[test]
fn test_named_string_type() {
    let source = r#"package p

type key string

const k key = "a"

const plain = "b"

func f() {
	g(k, plain, key("c"))
}
"#;
    assert_eq!(g_argument_types(source), vec!["p.key", "string", "p.key"]);
}

#[test]
fn test_short_var_declarations() {
    let source = r#"package p

func f() {
	x := 1
	s := "a" + "b"
	var y int64 = 2
	z := y * 3
	w := 3 * y
	ok := x > 0
	g(x, s, y, z, w, ok)
}
"#;
    assert_eq!(
        g_argument_types(source),
        vec!["int", "string", "int64", "int64", "int64", "bool"]
    );
}

#[test]
fn test_fields_and_methods() {
    let source = r#"package p

type T struct {
	name string
	n    int
}

func (t *T) Name() string { return t.name }

func (t T) Count() int { return t.n }

func f(t *T, v T) {
	g(t.name, t.n, t.Name(), v.Count(), v.name)
}
"#;
    assert_eq!(
        g_argument_types(source),
        vec!["string", "int", "string", "int", "string"]
    );
}

#[test]
fn test_multi_value_call() {
    let source = r#"package p

func two() (string, error) { return "", nil }

func f() {
	a, err := two()
	g(a, err)
}
"#;
    assert_eq!(g_argument_types(source), vec!["string", "error"]);
}

#[test]
fn test_const_iota_repetition() {
    let source = r#"package p

type Level int

const (
	A Level = iota
	B
	C
)

const (
	X = iota
	Y
)

func f() {
	g(C, Y)
}
"#;
    assert_eq!(g_argument_types(source), vec!["p.Level", "int"]);
}

#[test]
fn test_conversions() {
    let source = r#"package p

type T struct{}

func f() {
	b := []byte("x")
	g(string(b), []byte("x"), int32(1), (*T)(nil))
}
"#;
    assert_eq!(
        g_argument_types(source),
        vec!["string", "[]byte", "int32", "*p.T"]
    );
}

#[test]
fn test_range_variables() {
    let source = r#"package p

func f(m map[string]bool) {
	for i, s := range []string{"a"} {
		g(i, s)
	}
	for k, v := range m {
		g(k, v)
	}
	for i, r := range "abc" {
		g(i, r)
	}
}
"#;
    assert_eq!(
        g_argument_types(source),
        vec!["int", "string", "string", "bool", "int", "rune"]
    );
}

#[test]
fn test_type_switch_variable() {
    let source = r#"package p

func f(x interface{}) {
	switch v := x.(type) {
	case string:
		g(v)
	case int, bool:
		g(v)
	default:
		g(v)
	}
}
"#;
    assert_eq!(
        g_argument_types(source),
        vec!["string", "interface{}", "interface{}"]
    );
}

#[test]
fn test_builtins_index_and_composites() {
    let source = r#"package p

type T struct{}

func f(s string) {
	m := map[string]int{}
	xs := make([]string, 0)
	g(m["a"], len(m), &T{}, xs[0], s[1], s[1:], new(int), append(xs, "b"))
}
"#;
    assert_eq!(
        g_argument_types(source),
        vec!["int", "int", "*p.T", "string", "byte", "string", "*int", "[]string"]
    );
}

#[test]
fn test_imported_members_are_invalid() {
    let source = r#"package p

import "fmt"

func f() {
	g(fmt.Sprint(1), fmt.Sprint)
}
"#;
    assert_eq!(g_argument_types(source), vec!["invalid type", "invalid type"]);
}

#[test]
fn test_stdlib_table_members() {
    let source = r#"package p

import (
	"context"
	"errors"
	"fmt"
	"time"
)

func f(ctx context.Context, d time.Duration) {
	g(ctx, d, time.Duration(1), errors.New("e"), fmt.Errorf("%d", 1), fmt.Errorf, time.Second)
}
"#;
    assert_eq!(
        g_argument_types(source),
        vec![
            "context.Context",
            "time.Duration",
            "time.Duration",
            "error",
            "error",
            "func(string, ...interface{}) error",
            "invalid type",
        ]
    );
}

#[test]
fn test_type_parameters_and_instantiations_are_invalid() {
    let source = r#"package p

type Box[T any] struct{ v T }

func id[T any](v T) T { return v }

func f[S ~string](s S, n int) {
	b := Box[int]{}
	g(s, id(n), id[int](n), b, b.v, n)
}
"#;
    assert_eq!(
        g_argument_types(source),
        vec!["invalid type", "invalid type", "invalid type", "invalid type", "invalid type", "int"]
    );
}

#[test]
fn test_recursive_and_embedded_types() {
    let source = r#"package p

type List struct {
	next *List
	v    int
}

type Base struct{ id string }

type Derived struct {
	Base
	extra float64
}

func f(l List, d Derived) {
	g(l.next.v, d.id, d.Base, l.next)
}
"#;
    assert_eq!(
        g_argument_types(source),
        vec!["int", "string", "p.Base", "*p.List"]
    );
}

#[test]
fn test_function_literals_and_variadics() {
    let source = r#"package p

func f(prefix string, rest ...string) {
	h := func(a int) string { return prefix }
	g(h(1), rest, h)
}
"#;
    assert_eq!(
        g_argument_types(source),
        vec!["string", "[]string", "func(int) string"]
    );
}

#[test]
fn test_comma_ok_forms() {
    let source = r#"package p

func f(m map[string]int, x interface{}, ch chan string) {
	v, ok := m["a"]
	s, isString := x.(string)
	msg, open := <-ch
	g(v, ok, s, isString, msg, open)
}
"#;
    assert_eq!(
        g_argument_types(source),
        vec!["int", "bool", "string", "bool", "string", "bool"]
    );
}

#[test]
fn test_shadowed_and_unresolved_identifiers() {
    let source = r#"package p

func f() {
	string := 3
	g(string, undefined)
}
"#;
    assert_eq!(g_argument_types(source), vec!["int", "invalid type"]);
}
