//! Runs the analyzers selected on the command line and reports the results.

use anyhow::{Context, Result};
use ctxlint::{AnalyzerSet, Diagnostic, FileReport, check_sources};
use std::io::{IsTerminal, Write};
use tracing::{debug, info};

use crate::args::{CliArgs, OutputFormat};
use crate::reporter::{Reporter, summary};
use crate::sources::{SourceFilter, discover, read_sources};

pub const EXIT_CLEAN: i32 = 0;
pub const EXIT_DIAGNOSTICS: i32 = 1;
/// Usage, configuration or internal error.
pub const EXIT_FAILURE: i32 = 2;

/// Built-in analyzers, extended by `--config` when given.
pub fn load_analyzers(args: &CliArgs) -> Result<AnalyzerSet> {
    match &args.config {
        Some(path) => AnalyzerSet::load(path)
            .with_context(|| format!("failed to load configuration {}", path.display())),
        None => Ok(AnalyzerSet::builtin()),
    }
}

/// Check every discovered file, write the report to `out` and a summary to
/// `err`, and return the exit code.
pub fn run(args: &CliArgs, out: &mut dyn Write, err: &mut dyn Write) -> Result<i32> {
    let analyzers = load_analyzers(args)?;
    if args.list_checkers {
        for api in analyzers.iter() {
            writeln!(out, "{}\t{}", api.name, api.doc)?;
        }
        return Ok(EXIT_CLEAN);
    }
    let selected = analyzers
        .select(&args.checkers)
        .context("invalid --checker")?;

    let filter = SourceFilter::new(&args.exclude)?;
    let files = discover(&args.input_paths(), &filter)?;
    if files.is_empty() {
        writeln!(err, "no Go files to check")?;
        return Ok(EXIT_CLEAN);
    }
    let sources = read_sources(&files)?;
    info!(files = sources.len(), analyzers = selected.len(), "checking");

    let results = match args.jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(usize::from(jobs))
                .build()
                .context("failed to start worker pool")?;
            pool.install(|| check_sources(&sources, &selected))
        }
        None => check_sources(&sources, &selected),
    };
    let reports = results
        .into_iter()
        .collect::<Result<Vec<FileReport>, _>>()
        .context("analysis failed")?;

    let mut diagnostics: Vec<Diagnostic> = reports
        .iter()
        .flat_map(|report| report.all_diagnostics().cloned())
        .collect();
    diagnostics.sort_by(|a, b| a.file.cmp(&b.file).then(a.start.cmp(&b.start)));
    debug!(count = diagnostics.len(), "collected diagnostics");

    let color = args.color.enabled(std::io::stdout().is_terminal());
    colored::control::set_override(color);
    let mut reporter = Reporter::new(color);
    for (name, text) in &sources {
        reporter.add_source(name, text);
    }

    match args.format {
        OutputFormat::Text => {
            if !diagnostics.is_empty() {
                writeln!(out, "{}", reporter.render(&diagnostics))?;
                writeln!(err, "{}", summary(diagnostics.len(), files_with_diagnostics(&reports)))?;
            }
        }
        OutputFormat::Json => {
            let json = reporter
                .render_json(&diagnostics)
                .context("failed to serialize diagnostics")?;
            writeln!(out, "{json}")?;
        }
    }

    Ok(if diagnostics.is_empty() {
        EXIT_CLEAN
    } else {
        EXIT_DIAGNOSTICS
    })
}

fn files_with_diagnostics(reports: &[FileReport]) -> usize {
    reports
        .iter()
        .filter(|report| report.all_diagnostics().next().is_some())
        .count()
}
