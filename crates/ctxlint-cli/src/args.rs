use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the ctxlint binary.
#[derive(Parser, Debug)]
#[command(
    name = "ctxlint",
    version,
    about = "Checks structured-context arguments of Go logging and error calls"
)]
pub struct CliArgs {
    // ==================== Inputs ====================
    /// Go files or directories to check. Defaults to the current directory.
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Skip files whose path matches this glob. May be repeated.
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    // ==================== Analyzers ====================
    /// Run only the named analyzer. May be repeated; all analyzers run by default.
    #[arg(long = "checker", value_name = "NAME")]
    pub checkers: Vec<String>,

    /// JSON file adding or replacing analyzers.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Print the available analyzers and exit.
    #[arg(long = "list-checkers")]
    pub list_checkers: bool,

    // ==================== Output ====================
    /// Diagnostic output format.
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to color text output.
    #[arg(long, value_enum, ignore_case = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    // ==================== Execution ====================
    /// Number of files checked in parallel. Defaults to the number of CPUs.
    #[arg(short = 'j', long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub jobs: Option<u16>,
}

impl CliArgs {
    /// Paths to check, with the current directory standing in for none.
    pub fn input_paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.paths.clone()
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Auto => is_terminal,
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}
