//! Analyzer configuration files.
//!
//! ```json
//! {
//!   "analyzers": [
//!     {
//!       "name": "ctxcheck",
//!       "import_path": "example.com/ctx",
//!       "entries": { "With": { "min_args": 2, "context_start": 1 } },
//!       "constructors": ["New"],
//!       "render_call": true
//!     }
//!   ]
//! }
//! ```
//!
//! Configured analyzers are merged over the built-in ones by name.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::api::{WatchedApi, builtin_analyzers};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config JSON")]
    Parse(#[from] serde_json::Error),
    #[error("analyzer name must not be empty")]
    EmptyName,
    #[error("analyzer `{analyzer}`: import_path must not be empty")]
    EmptyImportPath { analyzer: String },
    #[error("analyzer `{analyzer}`: package_name must not be empty when given")]
    EmptyPackageName { analyzer: String },
    #[error("analyzer `{analyzer}`: entry function names must not be empty")]
    EmptyEntryName { analyzer: String },
    #[error("analyzer `{analyzer}`: constructor names must not be empty")]
    EmptyConstructorName { analyzer: String },
    #[error("analyzer `{analyzer}`, entry `{entry}`: context_start must be at least 1")]
    ContextStartTooSmall { analyzer: String, entry: String },
    #[error(
        "analyzer `{analyzer}`, entry `{entry}`: min_args ({min_args}) is below context_start ({context_start})"
    )]
    MinArgsBelowContextStart {
        analyzer: String,
        entry: String,
        min_args: usize,
        context_start: usize,
    },
    #[error("unknown analyzer `{0}`")]
    UnknownAnalyzer(String),
}

/// On-disk shape of a configuration file.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub analyzers: Vec<WatchedApi>,
}

/// The analyzers available to a run, in registration order.
#[derive(Clone, Debug)]
pub struct AnalyzerSet {
    analyzers: IndexMap<String, Arc<WatchedApi>>,
}

impl AnalyzerSet {
    pub fn builtin() -> Self {
        let analyzers = builtin_analyzers()
            .into_iter()
            .map(|api| (api.name.clone(), api))
            .collect();
        AnalyzerSet { analyzers }
    }

    /// Built-in analyzers with the configured ones added or replaced.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: ConfigFile = serde_json::from_str(text)?;
        let mut set = AnalyzerSet::builtin();
        set.merge(config)?;
        Ok(set)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loading analyzer config");
        AnalyzerSet::from_json_str(&text)
    }

    pub fn merge(&mut self, config: ConfigFile) -> Result<(), ConfigError> {
        for api in config.analyzers {
            api.validate()?;
            if self.analyzers.contains_key(&api.name) {
                debug!(analyzer = %api.name, "configured analyzer replaces an existing one");
            }
            self.analyzers.insert(api.name.clone(), Arc::new(api));
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<WatchedApi>> {
        self.analyzers.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<WatchedApi>> {
        self.analyzers.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.analyzers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.analyzers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.analyzers.is_empty()
    }

    /// The named analyzers, or all of them when `names` is empty.
    pub fn select(&self, names: &[String]) -> Result<Vec<Arc<WatchedApi>>, ConfigError> {
        if names.is_empty() {
            return Ok(self.iter().cloned().collect());
        }
        names
            .iter()
            .map(|name| {
                self.get(name)
                    .cloned()
                    .ok_or_else(|| ConfigError::UnknownAnalyzer(name.clone()))
            })
            .collect()
    }
}

impl Default for AnalyzerSet {
    fn default() -> Self {
        AnalyzerSet::builtin()
    }
}
