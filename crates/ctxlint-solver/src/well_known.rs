//! A few standard-library members typed without loading their packages.
//!
//! Everything else reached through an import stays `TypeId::INVALID`.

use ctxlint_binder::{SymbolKind, default_package_name};
use ctxlint_parser::NodeIndex;

use crate::evaluate::TypeEvaluator;
use crate::types::{FunctionShape, TypeId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Member {
    /// A named type with this underlying type.
    Type(TypeId),
    /// `func(string, ...any) error` style constructors.
    ErrorConstructor { variadic: bool },
}

/// `(import path, member name, member)`.
const STDLIB_MEMBERS: &[(&str, &str, Member)] = &[
    ("context", "Context", Member::Type(TypeId::EMPTY_INTERFACE)),
    ("time", "Duration", Member::Type(TypeId::INT64)),
    ("errors", "New", Member::ErrorConstructor { variadic: false }),
    ("fmt", "Errorf", Member::ErrorConstructor { variadic: true }),
];

fn lookup(import_path: &str, name: &str) -> Option<(usize, Member)> {
    STDLIB_MEMBERS
        .iter()
        .position(|&(path, member, _)| path == import_path && member == name)
        .map(|i| (i, STDLIB_MEMBERS[i].2))
}

/// What a qualified identifier `pkg.Name` denotes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Qualified {
    Type(TypeId),
    Value(TypeId),
}

impl<'a> TypeEvaluator<'a> {
    /// `pkg.name` where `qualifier` resolves to an import listed in the table.
    pub(crate) fn stdlib_member(&mut self, qualifier: NodeIndex, name: &str) -> Option<Qualified> {
        let binder = self.binder;
        let symbol = binder
            .resolve(qualifier)
            .filter(|s| s.kind == SymbolKind::PackageName)?;
        let path = symbol.import_path.as_deref()?;
        let (entry, member) = lookup(path, name)?;
        Some(match member {
            Member::Type(underlying) => {
                if let Some(&ty) = self.stdlib_types.get(&entry) {
                    return Some(Qualified::Type(ty));
                }
                let package = default_package_name(path);
                let named = self.interner.declare_named(name, Some(package), NodeIndex::NONE);
                self.interner.set_underlying(named, underlying);
                self.stdlib_types.insert(entry, named);
                Qualified::Type(named)
            }
            Member::ErrorConstructor { variadic } => {
                let mut params = vec![TypeId::STRING];
                if variadic {
                    params.push(self.interner.slice(TypeId::EMPTY_INTERFACE));
                }
                Qualified::Value(self.interner.function(FunctionShape {
                    params,
                    results: vec![TypeId::ERROR],
                    variadic,
                }))
            }
        })
    }
}
