//! The solver adapter, which ties normalization, solving and step extraction together.

use crate::{
    envelope::{Envelope, FailureKind},
    extract::StepExtractor,
    kind::InputKind,
    normalize::normalize,
    solver::{RawStep, Solver, SolverError},
};
use log::{debug, info};

/// The message of an [`FailureKind::InvalidInput`] failure.
pub const INVALID_INPUT_MESSAGE: &str = "Input must be a non-empty string";

/// The suggestion attached to a [`FailureKind::SolverError`] failure.
pub const NOTATION_SUGGESTION: &str =
    "Try standard notation, e.g. `2x+3=7`, `sqrt(x+5)=3` or `x^2-4`, using `*` for multiplication and `/` for division";

/// The message of an [`FailureKind::EmptyResult`] failure.
pub const EMPTY_RESULT_MESSAGE: &str = "No steps generated";

/// The suggestion attached to an [`FailureKind::EmptyResult`] failure.
pub const EMPTY_RESULT_SUGGESTION: &str = "The input may already be in its simplest form";

/// Removes all whitespace from the given text.
fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Processes raw user input into an [`Envelope`], using the given [`Solver`].
///
/// Each call to [`StepSolver::solve`] is independent; a [`StepSolver`] holds no state that
/// changes between calls, and can be shared between threads if its solver can.
#[derive(Debug)]
pub struct StepSolver<S> {
    solver: S,
    extractor: StepExtractor,
    retry: bool,
}

impl<S: Solver> StepSolver<S> {
    /// Creates an adapter around the given solver, with the standard step extractor and the retry
    /// enabled.
    pub fn new(solver: S) -> Self {
        Self {
            solver,
            extractor: StepExtractor::standard(),
            retry: true,
        }
    }

    /// Replaces the step extractor.
    pub fn with_extractor(mut self, extractor: StepExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Enables or disables the whitespace-stripped retry.
    pub fn with_retry(mut self, retry: bool) -> Self {
        self.retry = retry;
        self
    }

    /// The solver used by this adapter.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Invokes the solver, retrying once with whitespace removed if the first attempt fails.
    ///
    /// If both attempts fail, the error of the first attempt is returned.
    fn invoke(&self, kind: InputKind, normalized: &str) -> Result<Vec<RawStep>, SolverError> {
        debug!("solving {} `{}`", kind, normalized);
        let first = match self.solver.run(kind, normalized) {
            Ok(steps) => return Ok(steps),
            Err(err) => err,
        };

        if !self.retry {
            return Err(first);
        }

        let stripped = strip_whitespace(normalized);
        info!("solver failed on `{}` ({}), retrying as `{}`", normalized, first, stripped);
        self.solver.run(kind, &stripped).map_err(|retry_err| {
            debug!("retry failed: {}", retry_err);
            first
        })
    }

    /// Normalizes, classifies and solves the given input.
    ///
    /// Every failure is captured in the returned [`Envelope`].
    pub fn solve(&self, raw: &str) -> Envelope {
        if raw.trim().is_empty() {
            return Envelope::failure(
                raw,
                raw,
                InputKind::Expression,
                FailureKind::InvalidInput,
                INVALID_INPUT_MESSAGE,
                None,
            );
        }

        let normalized = normalize(raw);
        let kind = InputKind::classify(&normalized);

        match self.invoke(kind, &normalized) {
            Ok(raw_steps) if raw_steps.is_empty() => Envelope::failure(
                raw,
                normalized,
                kind,
                FailureKind::EmptyResult,
                EMPTY_RESULT_MESSAGE,
                Some(EMPTY_RESULT_SUGGESTION.to_string()),
            ),
            Ok(raw_steps) => {
                let steps = self.extractor.extract(&raw_steps, kind);
                Envelope::success(raw, normalized, kind, steps)
            },
            Err(err) => Envelope::failure(
                raw,
                normalized,
                kind,
                FailureKind::SolverError,
                err.to_string(),
                Some(NOTATION_SUGGESTION.to_string()),
            ),
        }
    }
}
