//! Fixture harness for analyzers.
//!
//! A fixture package is a directory of `.go` files whose expected
//! diagnostics are written next to the offending code:
//!
//! ```go
//! log.Info("msg", "key") // want `context should be even: len=1`
//! ```
//!
//! Each `want` comment holds one or more back-quoted or double-quoted
//! regular expressions. Every diagnostic reported on a line must match an
//! expectation of that line, and every expectation must be matched by a
//! diagnostic; each expectation is consumed at most once.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use ctxlint_checker::{CheckError, WatchedApi};
use ctxlint_common::{Diagnostic, LineMap};
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

use crate::program::check_source;

static WANT_COMMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"//\s*want\s+(.*)$").expect("valid want regex"));

static WANT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"`([^`]*)`|"((?:[^"\\]|\\.)*)""#).expect("valid pattern regex")
});

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{file}:{line}: invalid want pattern")]
    Pattern {
        file: String,
        line: u32,
        #[source]
        source: regex::Error,
    },
    #[error("{file}:{line}: `want` comment without a pattern")]
    EmptyWant { file: String, line: u32 },
    #[error(transparent)]
    Check(#[from] CheckError),
}

/// One expected diagnostic.
#[derive(Clone, Debug)]
pub struct Expectation {
    /// 1-based line.
    pub line: u32,
    pub pattern: Regex,
}

/// `want` expectations of a source file, in source order.
pub fn parse_expectations(file: &str, source: &str) -> Result<Vec<Expectation>, FixtureError> {
    let mut expectations = Vec::new();
    for (index, text) in source.lines().enumerate() {
        let line = index as u32 + 1;
        let Some(comment) = WANT_COMMENT.captures(text).and_then(|c| c.get(1)) else {
            continue;
        };
        let before = expectations.len();
        for pattern in WANT_PATTERN.captures_iter(comment.as_str()) {
            let raw = match (pattern.get(1), pattern.get(2)) {
                (Some(raw), _) => raw.as_str().to_string(),
                (None, Some(quoted)) => unescape(quoted.as_str()),
                (None, None) => continue,
            };
            let pattern = Regex::new(&raw).map_err(|source| FixtureError::Pattern {
                file: file.to_string(),
                line,
                source,
            })?;
            expectations.push(Expectation { line, pattern });
        }
        if expectations.len() == before {
            return Err(FixtureError::EmptyWant {
                file: file.to_string(),
                line,
            });
        }
    }
    Ok(expectations)
}

/// Undo the escapes of a double-quoted pattern.
fn unescape(quoted: &str) -> String {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}

/// Differences between reported and expected diagnostics.
#[derive(Clone, Debug, Default)]
pub struct FixtureReport {
    pub files: usize,
    pub matched: usize,
    /// `file:line: message` of diagnostics no expectation accounts for.
    pub unexpected: Vec<String>,
    /// `file:line: pattern` of expectations no diagnostic matched.
    pub unmatched: Vec<String>,
}

impl FixtureReport {
    pub fn is_clean(&self) -> bool {
        self.unexpected.is_empty() && self.unmatched.is_empty()
    }

    fn merge(&mut self, other: FixtureReport) {
        self.files += other.files;
        self.matched += other.matched;
        self.unexpected.extend(other.unexpected);
        self.unmatched.extend(other.unmatched);
    }
}

/// Match `diagnostics` of one file against its expectations.
pub fn compare(
    file: &str,
    source: &str,
    expectations: Vec<Expectation>,
    diagnostics: &[Diagnostic],
) -> FixtureReport {
    let lines = LineMap::build(source);
    let mut pending: Vec<Option<Expectation>> = expectations.into_iter().map(Some).collect();
    let mut report = FixtureReport {
        files: 1,
        ..FixtureReport::default()
    };

    for diagnostic in diagnostics {
        let (line, _) = lines.offset_to_position(diagnostic.start).one_based();
        let slot = pending.iter_mut().find(|slot| {
            slot.as_ref().is_some_and(|e| {
                e.line == line && e.pattern.is_match(&diagnostic.message_text)
            })
        });
        match slot {
            Some(slot) => {
                *slot = None;
                report.matched += 1;
            }
            None => report
                .unexpected
                .push(format!("{file}:{line}: {}", diagnostic.message_text)),
        }
    }
    for expectation in pending.into_iter().flatten() {
        report.unmatched.push(format!(
            "{file}:{}: no diagnostic matching `{}`",
            expectation.line,
            expectation.pattern.as_str()
        ));
    }
    report
}

/// Run `api` over each fixture package (a directory under `src_dir`) and
/// compare the results with the `want` comments.
pub fn run(
    src_dir: &Path,
    api: &Arc<WatchedApi>,
    packages: &[&str],
) -> Result<FixtureReport, FixtureError> {
    let analyzers = [Arc::clone(api)];
    let mut report = FixtureReport::default();
    for package in packages {
        let dir = src_dir.join(package);
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| FixtureError::Io {
                path: dir.clone(),
                source: e.into(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "go") {
                continue;
            }
            let source = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let name = format!(
                "{package}/{}",
                path.file_name().map_or_else(String::new, |n| n.to_string_lossy().into_owned())
            );
            debug!(file = %name, analyzer = %api.name, "checking fixture");

            let expectations = parse_expectations(&name, &source)?;
            let file_report = check_source(&name, &source, &analyzers)?;
            let reported: Vec<Diagnostic> = file_report.all_diagnostics().cloned().collect();
            report.merge(compare(&name, &source, expectations, &reported));
        }
    }
    Ok(report)
}
