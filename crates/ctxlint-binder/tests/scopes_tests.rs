//! Tests for scope construction and identifier resolution.

use ctxlint_binder::{BinderState, ScopeKind, Symbol, SymbolKind, default_package_name};
use ctxlint_parser::parser::syntax_kind_ext;
use ctxlint_parser::{NodeArena, NodeIndex, ParserState};

fn bind(source: &str) -> (NodeArena, BinderState, NodeIndex) {
    let mut parser = ParserState::new("test.go".to_string(), source);
    let root = parser.parse_source_file();
    assert!(parser.get_diagnostics().is_empty(), "{:?}", parser.get_diagnostics());
    let arena = parser.into_arena();
    let mut binder = BinderState::new();
    binder.bind_source_file(&arena, root);
    (arena, binder, root)
}

/// Identifier nodes with the given text, in source order.
fn idents(arena: &NodeArena, root: NodeIndex, text: &str) -> Vec<NodeIndex> {
    arena
        .preorder(root)
        .filter(|&i| {
            arena.kind_of(i) == Some(syntax_kind_ext::IDENTIFIER) && arena.identifier_text(i) == Some(text)
        })
        .collect()
}

fn resolved<'a>(binder: &'a BinderState, ident: NodeIndex) -> &'a Symbol {
    binder.resolve(ident).expect("identifier should resolve")
}

#[test]
fn test_import_names() {
    let source = r#"package p

import (
	"github.com/scionproto/scion/go/lib/log"
	errs "github.com/scionproto/scion/go/lib/serrors"
	_ "embed"
	. "strings"
	"gopkg.in/yaml.v3"
	"example.com/mod/v2"
)
"#;
    let (_, binder, _) = bind(source);
    let imports: Vec<(&str, Option<&str>)> = binder
        .imports()
        .map(|s| (s.name.as_str(), s.import_path.as_deref()))
        .collect();
    assert_eq!(
        imports,
        vec![
            ("log", Some("github.com/scionproto/scion/go/lib/log")),
            ("errs", Some("github.com/scionproto/scion/go/lib/serrors")),
            ("yaml.v3", Some("gopkg.in/yaml.v3")),
            ("mod", Some("example.com/mod/v2")),
        ]
    );
}

#[test]
fn test_default_package_name() {
    assert_eq!(default_package_name("github.com/scionproto/scion/go/lib/log"), "log");
    assert_eq!(default_package_name("fmt"), "fmt");
    assert_eq!(default_package_name("example.com/mod/v2"), "mod");
    assert_eq!(default_package_name("example.com/v"), "v");
}

#[test]
fn test_package_ident_resolves_to_import() {
    let source = "package p\nimport \"github.com/scionproto/scion/go/lib/log\"\nfunc f() { log.Info(\"m\") }\n";
    let (arena, binder, root) = bind(source);
    let uses = idents(&arena, root, "log");
    let symbol = resolved(&binder, uses[0]);
    assert_eq!(symbol.kind, SymbolKind::PackageName);
}

#[test]
fn test_local_variable_shadows_import() {
    let source = "package p\nimport \"github.com/scionproto/scion/go/lib/log\"\nfunc f() {\n\tlog := 1\n\t_ = log\n}\n";
    let (arena, binder, root) = bind(source);
    let uses = idents(&arena, root, "log");
    assert_eq!(uses.len(), 2);
    let symbol = resolved(&binder, uses[1]);
    assert_eq!(symbol.kind, SymbolKind::Var);
    assert_eq!(symbol.declaration, uses[0]);
}

#[test]
fn test_short_var_decl_records_declaring_statement() {
    let source = "package p\nfunc f() {\n\ta, logger := 1, log.New()\n\tlogger.Info(\"m\")\n\t_ = a\n}\n";
    let (arena, binder, root) = bind(source);
    let uses = idents(&arena, root, "logger");
    let symbol = resolved(&binder, uses[1]);
    assert_eq!(symbol.kind, SymbolKind::Var);
    assert_eq!(symbol.decl_position, 1);
    assert_eq!(
        arena.kind_of(symbol.decl_node),
        Some(syntax_kind_ext::ASSIGN_STATEMENT)
    );
}

#[test]
fn test_short_var_decl_rhs_sees_outer_binding() {
    let source = "package p\nvar x = \"outer\"\nfunc f() {\n\tx := x\n\t_ = x\n}\n";
    let (arena, binder, root) = bind(source);
    let uses = idents(&arena, root, "x");
    // [package decl, local decl, rhs use, later use]
    assert_eq!(uses.len(), 4);
    let rhs = resolved(&binder, uses[2]);
    assert_eq!(rhs.declaration, uses[0]);
    let later = resolved(&binder, uses[3]);
    assert_eq!(later.declaration, uses[1]);
}

#[test]
fn test_redeclaration_in_same_scope_reuses_symbol() {
    let source = "package p\nfunc f() {\n\ta, err := g()\n\tb, err := g()\n\t_, _, _ = a, b, err\n}\n";
    let (arena, binder, root) = bind(source);
    let errs = idents(&arena, root, "err");
    let first = binder.get_node_symbol(errs[0]);
    let second = binder.get_node_symbol(errs[1]);
    assert!(first.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_package_level_uses_before_declaration() {
    let source = "package p\nfunc f() string { return name }\nconst name = \"n\"\ntype key string\nvar k key\n";
    let (arena, binder, root) = bind(source);
    let name_use = idents(&arena, root, "name")[0];
    assert_eq!(resolved(&binder, name_use).kind, SymbolKind::Const);
    let key_use = idents(&arena, root, "key")[1];
    assert_eq!(resolved(&binder, key_use).kind, SymbolKind::Type);
    assert!(binder.get_package_symbol("f").is_some());
}

#[test]
fn test_parameters_and_predeclared() {
    let source = "package p\nfunc f(v int, s string) { _ = len(s) + v }\n";
    let (arena, binder, root) = bind(source);
    let v_use = idents(&arena, root, "v")[1];
    assert_eq!(resolved(&binder, v_use).kind, SymbolKind::Param);
    let int_use = idents(&arena, root, "int")[0];
    let int_symbol = resolved(&binder, int_use);
    assert!(int_symbol.is_predeclared());
    assert_eq!(int_symbol.kind, SymbolKind::Type);
    let len_use = idents(&arena, root, "len")[0];
    assert_eq!(resolved(&binder, len_use).kind, SymbolKind::Builtin);
}

#[test]
fn test_block_scopes_end_at_closing_brace() {
    let source = "package p\nvar v = 1\nfunc f() {\n\tif v := 2; v > 1 {\n\t\t_ = v\n\t}\n\t_ = v\n}\n";
    let (arena, binder, root) = bind(source);
    let uses = idents(&arena, root, "v");
    let inner = resolved(&binder, uses[3]);
    assert_eq!(inner.declaration, uses[1]);
    let after = resolved(&binder, uses[4]);
    assert_eq!(after.declaration, uses[0]);
    let scope = binder.get_scope(inner.scope).unwrap();
    assert_eq!(scope.kind, ScopeKind::Block);
}

#[test]
fn test_range_and_type_switch_bindings() {
    let source = "package p\nfunc f(xs []int, x interface{}) {\n\tfor i, n := range xs {\n\t\t_, _ = i, n\n\t}\n\tswitch t := x.(type) {\n\tcase string:\n\t\t_ = t\n\t}\n}\n";
    let (arena, binder, root) = bind(source);
    let n_use = idents(&arena, root, "n")[1];
    let n = resolved(&binder, n_use);
    assert_eq!(n.decl_position, 1);
    assert_eq!(arena.kind_of(n.decl_node), Some(syntax_kind_ext::RANGE_STATEMENT));

    let t_use = idents(&arena, root, "t")[1];
    let t = resolved(&binder, t_use);
    assert_eq!(arena.kind_of(t.decl_node), Some(syntax_kind_ext::SWITCH_STATEMENT));
    let clause_scope = binder.get_scope(t.scope).unwrap();
    assert_eq!(arena.kind_of(clause_scope.node), Some(syntax_kind_ext::CASE_CLAUSE));
}

#[test]
fn test_selector_names_are_not_resolved() {
    let source = "package p\nvar Info = 1\nfunc f() { log.Info(\"m\") }\n";
    let (arena, binder, root) = bind(source);
    let info_uses = idents(&arena, root, "Info");
    assert_eq!(info_uses.len(), 2);
    assert!(binder.get_node_symbol(info_uses[1]).is_none());
    // `log` is not imported here.
    let log_use = idents(&arena, root, "log")[0];
    assert!(binder.get_node_symbol(log_use).is_none());
    assert!(binder.get_resolution_stats().unresolved >= 1);
}

#[test]
fn test_function_literal_parameters_are_scoped() {
    let source = "package p\nfunc f() {\n\tg := func(msg string) { _ = msg }\n\t_ = g\n}\n";
    let (arena, binder, root) = bind(source);
    let msg_use = idents(&arena, root, "msg")[1];
    let msg = resolved(&binder, msg_use);
    assert_eq!(msg.kind, SymbolKind::Param);
    let scope = binder.get_scope(msg.scope).unwrap();
    assert_eq!(scope.kind, ScopeKind::Function);
    assert_eq!(
        arena.kind_of(scope.node),
        Some(syntax_kind_ext::FUNCTION_LITERAL)
    );
}
