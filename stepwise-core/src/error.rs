//! User-facing diagnostics for failed requests.

use ariadne::Fmt;
use stepwise_attrs::ErrorKind;
use stepwise_error::{ErrorKind, EXPR};

/// The input was empty, or contained only whitespace.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "input must be a non-empty string",
    labels = ["there is nothing to solve here"],
    help = format!("enter an equation such as {} or an expression such as {}", "5x+3=0".fg(EXPR), "2x+4x".fg(EXPR)),
)]
pub struct InvalidInput;

/// The solver rejected the input, or failed to run, on both attempts.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the solver could not process this input: {}", message),
    labels = [format!("processed as {}", normalized.fg(EXPR))],
    help = suggestion,
)]
pub struct SolverFailed {
    /// The error reported on the first attempt.
    pub message: String,

    /// The normalized text given to the solver.
    pub normalized: String,

    /// What the user can do about it.
    pub suggestion: String,
}

/// The solver succeeded, but produced no steps.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = message,
    labels = ["the solver has nothing to do here"],
    help = suggestion,
)]
pub struct EmptyResult {
    /// The message describing the outcome.
    pub message: String,

    /// What the outcome most likely means.
    pub suggestion: String,
}
