#![allow(clippy::print_stderr)]

use clap::Parser;
use ctxlint_cli::args::CliArgs;
use ctxlint_cli::driver::{self, EXIT_FAILURE};

fn main() {
    // Installs a subscriber only when CTXLINT_LOG or RUST_LOG is set.
    ctxlint::tracing_config::init_tracing();

    // clap exits with status 2 on usage errors.
    let args = CliArgs::parse();
    let result = driver::run(
        &args,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    );
    let code = match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
