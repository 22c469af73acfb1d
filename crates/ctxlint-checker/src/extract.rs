//! Selecting the context arguments of a call.

use ctxlint_parser::NodeIndex;

use crate::api::ContextRule;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Extraction<'n> {
    /// `f(args...)`; the arguments are not known individually.
    Spread,
    /// The rule requires context and none was passed.
    MissingContext,
    TooFewArguments,
    Context(&'n [NodeIndex]),
}

/// Apply `rule` to the arguments of a call.
pub fn extract_context<'n>(args: &'n [NodeIndex], spread: bool, rule: &ContextRule) -> Extraction<'n> {
    if spread {
        return Extraction::Spread;
    }
    if rule.requires_context && args.len() <= rule.context_start {
        return Extraction::MissingContext;
    }
    if args.len() < rule.min_args {
        return Extraction::TooFewArguments;
    }
    match args.get(rule.context_start..) {
        Some(context) => Extraction::Context(context),
        None => Extraction::TooFewArguments,
    }
}
