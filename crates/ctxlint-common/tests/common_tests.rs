use super::diagnostics::{diagnostic_codes, diagnostic_messages, get_message_template};
use super::*;

#[test]
fn format_message_fills_placeholders_in_order() {
    let text = format_message(diagnostic_messages::CONTEXT_SHOULD_BE_EVEN, &["1", "[\"key\"]"]);
    assert_eq!(text, "context should be even: len=1 ctx=[\"key\"]");
}

#[test]
fn format_message_does_not_expand_placeholders_inside_arguments() {
    let text = format_message("{0} and {1}", &["{1}", "b"]);
    assert_eq!(text, "{1} and b");
}

#[test]
fn format_message_keeps_unknown_placeholders() {
    assert_eq!(format_message("a {x} {3}", &["z"]), "a {x} {3}");
}

#[test]
fn message_templates_are_registered() {
    assert_eq!(
        get_message_template(diagnostic_codes::SHOULD_HAVE_CONTEXT),
        Some("should have context: {0}")
    );
    assert!(get_message_template(4242).is_none());
}

#[test]
fn code_and_message_tables_are_reachable_from_the_crate_root() {
    use crate::{diagnostic_codes as root_codes, diagnostic_messages as root_messages};

    assert_eq!(root_codes::KEY_SHOULD_BE_STRING, diagnostic_codes::KEY_SHOULD_BE_STRING);
    assert_eq!(
        get_message_template(root_codes::CONTEXT_SHOULD_BE_EVEN),
        Some(root_messages::CONTEXT_SHOULD_BE_EVEN)
    );
}

#[test]
fn go_quote_escapes_quotes_and_controls() {
    assert_eq!(go_quote("value"), "\"value\"");
    assert_eq!(go_quote("\"key\""), "\"\\\"key\\\"\"");
    assert_eq!(go_quote("a\nb\\"), "\"a\\nb\\\\\"");
    assert_eq!(go_quote("\u{1}"), "\"\\x01\"");
    assert_eq!(go_quote("héllo"), "\"héllo\"");
}

#[test]
fn line_map_maps_offsets_to_lines() {
    let source = "package a\n\nfunc f() {}\n";
    let map = LineMap::build(source);
    assert_eq!(map.line_count(), 4);
    assert_eq!(map.offset_to_position(0), Position { line: 0, character: 0 });
    let func_offset = source.find("func").unwrap() as u32;
    assert_eq!(map.offset_to_position(func_offset).one_based(), (3, 1));
    assert_eq!(map.line_range(2, source), Some((11, 22)));
}

#[test]
fn span_slices_and_covers() {
    let span = Span::new(2, 5);
    assert_eq!(span.slice("abcdefg"), Some("cde"));
    assert_eq!(span.len(), 3);
    assert_eq!(span.cover(Span::new(4, 9)), Span::new(2, 9));
    assert!(Span::new(3, 40).slice("short").is_none());
}

#[test]
fn diagnostic_serializes_with_source() {
    let diag = Diagnostic::error("a.go", 3, 4, "msg", 9001).with_source("logcheck");
    let json = serde_json::to_value(&diag).unwrap();
    assert_eq!(json["source"], "logcheck");
    assert_eq!(json["category"], "Error");
}
