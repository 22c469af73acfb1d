//! Command-line support for the `ctxlint` binary.

pub mod args;
pub mod driver;
pub mod reporter;
pub mod sources;

#[cfg(test)]
#[path = "tests/args_tests.rs"]
mod args_tests;
#[cfg(test)]
#[path = "tests/reporter_tests.rs"]
mod reporter_tests;
