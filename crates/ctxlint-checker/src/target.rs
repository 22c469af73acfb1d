//! Finding the local name of the watched package in a file.

use ctxlint_parser::{NodeArena, NodeIndex};

use crate::api::WatchedApi;

/// Local name under which `api`'s package is imported by the file at `root`.
///
/// An explicit import name wins over the conventional one. When the package
/// is imported more than once the last import counts; blank and dot imports
/// leave no usable name.
pub fn resolve_alias(arena: &NodeArena, root: NodeIndex, api: &WatchedApi) -> Option<String> {
    let file = arena.get(root).and_then(|n| arena.get_source_file(n))?;
    let mut alias = None;
    for spec in file.imports.iter() {
        let Some(data) = arena.get(spec).and_then(|n| arena.get_import_spec(n)) else {
            continue;
        };
        let Some(literal) = arena.get(data.path).and_then(|n| arena.get_literal(n)) else {
            continue;
        };
        if import_path(&literal.text) != api.import_path {
            continue;
        }
        alias = match arena.identifier_text(data.name) {
            Some("_" | ".") => None,
            Some(name) => Some(name.to_string()),
            None => Some(api.conventional_name().to_string()),
        };
    }
    alias
}

fn import_path(literal: &str) -> &str {
    literal
        .trim_start_matches(['"', '`'])
        .trim_end_matches(['"', '`'])
}
