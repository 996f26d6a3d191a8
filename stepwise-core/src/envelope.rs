//! The single result structure handed to every consumer of the pipeline.

use crate::{
    error::{EmptyResult, InvalidInput, SolverFailed},
    extract::Step,
    kind::InputKind,
};
use serde::Serialize;
use stepwise_error::Error;

/// Why a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// The input was not usable; the solver was not invoked.
    InvalidInput,

    /// The solver failed on the normalized input, and on the retry.
    SolverError,

    /// The solver succeeded, but generated no steps.
    EmptyResult,
}

/// A successfully solved or simplified input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Success {
    /// The input as given by the user.
    pub input: String,

    /// The input after normalization.
    pub normalized_input: String,

    /// Whether the input was solved as an equation or simplified as an expression.
    pub kind: InputKind,

    /// The number of steps.
    pub step_count: usize,

    /// The steps, in the order the solver took them.
    pub steps: Vec<Step>,
}

/// An input that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    /// The input as given by the user.
    pub input: String,

    /// The input after normalization.
    pub normalized_input: String,

    /// Whether the input would be solved as an equation or simplified as an expression.
    pub kind: InputKind,

    /// Why the request failed.
    pub error: FailureKind,

    /// A message describing the failure.
    pub error_message: String,

    /// What the user can do about the failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

/// The outcome of processing one input. Exactly one variant is populated.
///
/// Both variants carry the original input and its normalized form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
    Success(Success),
    Failure(Failure),
}

impl Envelope {
    /// Builds a successful envelope.
    pub fn success(
        input: impl Into<String>,
        normalized_input: impl Into<String>,
        kind: InputKind,
        steps: Vec<Step>,
    ) -> Self {
        Self::Success(Success {
            input: input.into(),
            normalized_input: normalized_input.into(),
            kind,
            step_count: steps.len(),
            steps,
        })
    }

    /// Builds a failed envelope.
    pub fn failure(
        input: impl Into<String>,
        normalized_input: impl Into<String>,
        kind: InputKind,
        error: FailureKind,
        error_message: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self::Failure(Failure {
            input: input.into(),
            normalized_input: normalized_input.into(),
            kind,
            error,
            error_message: error_message.into(),
            suggestion,
        })
    }

    /// Returns true if this is a [`Envelope::Success`].
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The input as given by the user.
    pub fn input(&self) -> &str {
        match self {
            Self::Success(s) => &s.input,
            Self::Failure(f) => &f.input,
        }
    }

    /// The input after normalization.
    pub fn normalized_input(&self) -> &str {
        match self {
            Self::Success(s) => &s.normalized_input,
            Self::Failure(f) => &f.normalized_input,
        }
    }

    /// The kind of the input.
    pub fn kind(&self) -> InputKind {
        match self {
            Self::Success(s) => s.kind,
            Self::Failure(f) => f.kind,
        }
    }

    /// The steps, if the request succeeded.
    pub fn steps(&self) -> Option<&[Step]> {
        match self {
            Self::Success(s) => Some(&s.steps),
            Self::Failure(_) => None,
        }
    }

    /// The state after the last step, if the request succeeded.
    pub fn final_state(&self) -> Option<&str> {
        self.steps()?.last().map(|step| step.after.as_str())
    }

    /// The failure, if the request failed.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success(_) => None,
            Self::Failure(f) => Some(f.error),
        }
    }

    /// Converts a failure into a diagnostic that highlights the input. Returns [`None`] for a
    /// success.
    pub fn to_error(&self) -> Option<Error> {
        let Self::Failure(failure) = self else {
            return None;
        };

        // ariadne counts characters, not bytes
        let spans = vec![0..failure.input.chars().count()];
        let suggestion = failure.suggestion.clone().unwrap_or_default();
        Some(match failure.error {
            FailureKind::InvalidInput => Error::new(spans, InvalidInput),
            FailureKind::SolverError => Error::new(spans, SolverFailed {
                message: failure.error_message.clone(),
                normalized: failure.normalized_input.clone(),
                suggestion,
            }),
            FailureKind::EmptyResult => Error::new(spans, EmptyResult {
                message: failure.error_message.clone(),
                suggestion,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn failure_json() {
        let envelope = Envelope::failure(
            "2+2",
            "2+2",
            InputKind::Expression,
            FailureKind::EmptyResult,
            "No steps generated",
            Some("The input may already be in its simplest form".to_string()),
        );

        assert_eq!(serde_json::to_value(&envelope).unwrap(), json!({
            "status": "failure",
            "input": "2+2",
            "normalizedInput": "2+2",
            "kind": "expression",
            "error": "EmptyResult",
            "errorMessage": "No steps generated",
            "suggestion": "The input may already be in its simplest form",
        }));
    }

    #[test]
    fn success_json() {
        let envelope = Envelope::success("x=1", "x=1", InputKind::Equation, vec![]);
        assert_eq!(serde_json::to_value(&envelope).unwrap(), json!({
            "status": "success",
            "input": "x=1",
            "normalizedInput": "x=1",
            "kind": "equation",
            "stepCount": 0,
            "steps": [],
        }));
    }

    #[test]
    fn accessors() {
        let envelope = Envelope::failure(r"\sqrt{", "sqrt{", InputKind::Expression, FailureKind::SolverError, "oops", None);
        assert!(!envelope.is_success());
        assert_eq!(envelope.input(), r"\sqrt{");
        assert_eq!(envelope.normalized_input(), "sqrt{");
        assert_eq!(envelope.failure_kind(), Some(FailureKind::SolverError));
        assert_eq!(envelope.steps(), None);
        assert_eq!(envelope.final_state(), None);
    }

    #[test]
    fn error_message() {
        let envelope = Envelope::failure("x+", "x+", InputKind::Expression, FailureKind::SolverError, "unexpected end", None);
        let err = envelope.to_error().unwrap();
        assert_eq!(err.to_string(), "the solver could not process this input: unexpected end");
        assert_eq!(err.spans, vec![0..2]);

        assert!(Envelope::success("x", "x", InputKind::Expression, vec![]).to_error().is_none());
    }

    #[test]
    fn non_ascii_report_keeps_label() {
        let envelope = Envelope::failure("x²+√4=9", "x²+√4=9", InputKind::Equation, FailureKind::SolverError, "unexpected character", None);
        let err = envelope.to_error().unwrap();
        assert_eq!(err.spans, vec![0..7]);

        let mut buf = Vec::new();
        err.write_report("input", envelope.input(), &mut buf).unwrap();
        let report = String::from_utf8(strip_ansi_escapes::strip(buf)).unwrap();
        assert!(report.contains("processed as x²+√4=9"), "{}", report);
    }
}
