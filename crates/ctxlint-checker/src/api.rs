//! Watched API descriptions.
//!
//! A `WatchedApi` is the data that turns the generic context checker into a
//! concrete analyzer: which package to watch, which of its functions take a
//! trailing key/value context and where that context starts, and which
//! functions construct values whose methods take one too.

use std::sync::Arc;

use ctxlint_binder::default_package_name;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Argument layout of one entry function.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextRule {
    /// Calls with fewer arguments are not checked.
    pub min_args: usize,
    /// Index of the first context argument.
    pub context_start: usize,
    /// Report calls that pass no context at all.
    #[serde(default)]
    pub requires_context: bool,
}

impl ContextRule {
    pub const fn new(min_args: usize, context_start: usize) -> Self {
        ContextRule {
            min_args,
            context_start,
            requires_context: false,
        }
    }

    #[must_use]
    pub const fn requiring_context(mut self) -> Self {
        self.requires_context = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedApi {
    pub name: String,
    #[serde(default)]
    pub doc: String,
    pub import_path: String,
    /// Name the package is visible under when imported without a rename.
    /// Defaults to the last element of `import_path`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    pub entries: IndexMap<String, ContextRule>,
    #[serde(default)]
    pub constructors: Vec<String>,
    /// Append ` expr="<call>"` to parity and key-type messages.
    #[serde(default)]
    pub render_call: bool,
}

impl WatchedApi {
    pub fn conventional_name(&self) -> &str {
        self.package_name
            .as_deref()
            .unwrap_or_else(|| default_package_name(&self.import_path))
    }

    pub fn rule(&self, function: &str) -> Option<&ContextRule> {
        self.entries.get(function)
    }

    pub fn is_constructor(&self, function: &str) -> bool {
        self.constructors.iter().any(|c| c == function)
    }

    /// Check the invariants every analyzer relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if self.import_path.trim().is_empty() {
            return Err(ConfigError::EmptyImportPath {
                analyzer: self.name.clone(),
            });
        }
        if self.package_name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ConfigError::EmptyPackageName {
                analyzer: self.name.clone(),
            });
        }
        for (entry, rule) in &self.entries {
            if entry.trim().is_empty() {
                return Err(ConfigError::EmptyEntryName {
                    analyzer: self.name.clone(),
                });
            }
            if rule.context_start < 1 {
                return Err(ConfigError::ContextStartTooSmall {
                    analyzer: self.name.clone(),
                    entry: entry.clone(),
                });
            }
            if rule.min_args < rule.context_start {
                return Err(ConfigError::MinArgsBelowContextStart {
                    analyzer: self.name.clone(),
                    entry: entry.clone(),
                    min_args: rule.min_args,
                    context_start: rule.context_start,
                });
            }
        }
        if self.constructors.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigError::EmptyConstructorName {
                analyzer: self.name.clone(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Built-in analyzers
// =============================================================================

pub const LOG_IMPORT_PATH: &str = "github.com/scionproto/scion/go/lib/log";
pub const SERRORS_IMPORT_PATH: &str = "github.com/scionproto/scion/go/lib/serrors";

static LOGCHECK: Lazy<Arc<WatchedApi>> = Lazy::new(|| {
    let entries = ["Trace", "Debug", "Info", "Warn", "Error", "Crit"]
        .into_iter()
        .map(|level| (level.to_string(), ContextRule::new(2, 1)))
        .collect();
    Arc::new(WatchedApi {
        name: "logcheck".to_string(),
        doc: "reports invalid log calls".to_string(),
        import_path: LOG_IMPORT_PATH.to_string(),
        package_name: None,
        entries,
        constructors: ["FromCtx", "New", "Root"].map(String::from).to_vec(),
        render_call: true,
    })
});

static SERRORSCHECK: Lazy<Arc<WatchedApi>> = Lazy::new(|| {
    let entries = IndexMap::from([
        ("New".to_string(), ContextRule::new(2, 1)),
        ("WithCtx".to_string(), ContextRule::new(2, 1).requiring_context()),
        ("Wrap".to_string(), ContextRule::new(3, 2)),
        ("WrapStr".to_string(), ContextRule::new(3, 2)),
    ]);
    Arc::new(WatchedApi {
        name: "serrorscheck".to_string(),
        doc: "reports invalid serrors calls".to_string(),
        import_path: SERRORS_IMPORT_PATH.to_string(),
        package_name: None,
        entries,
        constructors: Vec::new(),
        render_call: false,
    })
});

/// Leveled methods of the logging package, on the package and on loggers.
pub fn logcheck() -> Arc<WatchedApi> {
    Arc::clone(&LOGCHECK)
}

/// Factory and wrapping functions of the error package.
pub fn serrorscheck() -> Arc<WatchedApi> {
    Arc::clone(&SERRORSCHECK)
}

pub fn builtin_analyzers() -> Vec<Arc<WatchedApi>> {
    vec![logcheck(), serrorscheck()]
}
