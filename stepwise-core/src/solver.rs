//! The capability boundary to the external symbolic solver.
//!
//! The solver is anything that implements [`Solver`]. The production implementation runs an
//! external process (see [`crate::bridge`]); tests substitute a deterministic fake.

use crate::kind::InputKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, sync::Arc, time::Duration};
use thiserror::Error;

/// An error reported by the solver, or by the transport used to reach it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolverError {
    /// The solver process could not be started.
    #[error("failed to start solver `{program}`: {reason}")]
    Spawn {
        /// The program that was run.
        program: String,

        /// Why it failed to start.
        reason: String,
    },

    /// The solver did not finish within the allotted time.
    #[error("solver timed out after {} seconds", .0.as_secs_f64())]
    Timeout(Duration),

    /// The solver rejected the input, or failed to parse it.
    #[error("{0}")]
    Rejected(String),

    /// The running solver process could not be monitored.
    #[error("lost track of solver process: {0}")]
    Wait(String),

    /// The solver's output could not be understood.
    #[error("invalid output from solver: {0}")]
    Malformed(String),
}

/// One representation of an algebraic state, as given by the solver.
///
/// A solver may offer several string forms of the same state; the step extractor picks the most
/// reliable one (see [`crate::repr`]). A state given as a plain JSON string is treated as its
/// `display` form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "StateRepr")]
pub struct RawState {
    /// Output of the solver's dedicated render-to-string capability.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rendered: Option<String>,

    /// Output of the solver's generic string conversion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Any other fields attached to the state.
    #[serde(flatten)]
    pub auxiliary: BTreeMap<String, Value>,
}

impl RawState {
    /// Creates a state that only has a rendered form.
    pub fn rendered(text: impl Into<String>) -> Self {
        Self { rendered: Some(text.into()), ..Default::default() }
    }

    /// Creates a state that only has a generic string form.
    pub fn display(text: impl Into<String>) -> Self {
        Self { display: Some(text.into()), ..Default::default() }
    }

    /// Adds an auxiliary field to the state.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.auxiliary.insert(key.into(), value.into());
        self
    }

    /// Returns the auxiliary field with the given name, if it is a string.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.auxiliary.get(key).and_then(Value::as_str)
    }

    /// Unconditionally converts the state to a string: the first string form present, in the
    /// order rendered, display, auxiliary fields, regardless of its quality. Returns an empty
    /// string if the state has no string form at all.
    pub fn coerce(&self) -> String {
        self.rendered.as_deref()
            .or(self.display.as_deref())
            .or_else(|| self.auxiliary.values().find_map(Value::as_str))
            .unwrap_or_default()
            .to_string()
    }
}

/// Wire shape of a [`RawState`].
#[derive(Deserialize)]
#[serde(untagged)]
enum StateRepr {
    Text(String),
    Fields {
        #[serde(default)]
        rendered: Option<String>,
        #[serde(default)]
        display: Option<String>,
        #[serde(flatten)]
        auxiliary: BTreeMap<String, Value>,
    },
}

impl From<StateRepr> for RawState {
    fn from(repr: StateRepr) -> Self {
        match repr {
            StateRepr::Text(text) => Self::display(text),
            StateRepr::Fields { rendered, display, auxiliary } => Self { rendered, display, auxiliary },
        }
    }
}

/// A single step, in the solver's native shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStep {
    /// The solver's tag for the kind of transformation applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_type: Option<String>,

    /// The state before the step.
    #[serde(default, alias = "oldNode", alias = "oldEquation")]
    pub old_state: RawState,

    /// The state after the step.
    #[serde(default, alias = "newNode", alias = "newEquation")]
    pub new_state: RawState,

    /// Nested steps that make up this step, if the solver reported any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substeps: Option<Vec<RawStep>>,
}

impl RawStep {
    /// Creates a step between two states.
    pub fn new(change_type: impl Into<String>, old_state: RawState, new_state: RawState) -> Self {
        Self {
            change_type: Some(change_type.into()),
            old_state,
            new_state,
            substeps: None,
        }
    }

    /// Attaches nested steps to this step.
    pub fn with_substeps(mut self, substeps: Vec<RawStep>) -> Self {
        self.substeps = Some(substeps);
        self
    }
}

/// A symbolic solver capable of producing step-by-step solutions.
///
/// Implementations must not hold state that is shared between calls in a way that breaks when
/// called from several threads at once.
pub trait Solver: Send + Sync {
    /// Solves the given equation, returning the steps taken.
    fn solve_equation(&self, text: &str) -> Result<Vec<RawStep>, SolverError>;

    /// Simplifies the given expression, returning the steps taken.
    fn simplify_expression(&self, text: &str) -> Result<Vec<RawStep>, SolverError>;

    /// Calls the operation matching the given kind of input.
    fn run(&self, kind: InputKind, text: &str) -> Result<Vec<RawStep>, SolverError> {
        match kind {
            InputKind::Equation => self.solve_equation(text),
            InputKind::Expression => self.simplify_expression(text),
        }
    }
}

impl<S: Solver + ?Sized> Solver for &S {
    fn solve_equation(&self, text: &str) -> Result<Vec<RawStep>, SolverError> {
        (**self).solve_equation(text)
    }

    fn simplify_expression(&self, text: &str) -> Result<Vec<RawStep>, SolverError> {
        (**self).simplify_expression(text)
    }
}

impl<S: Solver + ?Sized> Solver for Box<S> {
    fn solve_equation(&self, text: &str) -> Result<Vec<RawStep>, SolverError> {
        (**self).solve_equation(text)
    }

    fn simplify_expression(&self, text: &str) -> Result<Vec<RawStep>, SolverError> {
        (**self).simplify_expression(text)
    }
}

impl<S: Solver + ?Sized> Solver for Arc<S> {
    fn solve_equation(&self, text: &str) -> Result<Vec<RawStep>, SolverError> {
        (**self).solve_equation(text)
    }

    fn simplify_expression(&self, text: &str) -> Result<Vec<RawStep>, SolverError> {
        (**self).simplify_expression(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn deserialize_step() {
        let step: RawStep = serde_json::from_value(json!({
            "changeType": "SUBTRACT_FROM_BOTH_SIDES",
            "oldEquation": { "rendered": "5x + 3 = 0", "display": "[object Object]" },
            "newEquation": "5x + 3 - 3 = 0 - 3",
            "substeps": [],
        })).unwrap();

        assert_eq!(step.change_type.as_deref(), Some("SUBTRACT_FROM_BOTH_SIDES"));
        assert_eq!(step.old_state.rendered.as_deref(), Some("5x + 3 = 0"));
        assert_eq!(step.new_state, RawState::display("5x + 3 - 3 = 0 - 3"));
        assert_eq!(step.substeps, Some(vec![]));
    }

    #[test]
    fn deserialize_auxiliary_fields() {
        let state: RawState = serde_json::from_value(json!({ "ascii": "x = -3/5", "depth": 2 })).unwrap();
        assert_eq!(state.rendered, None);
        assert_eq!(state.field("ascii"), Some("x = -3/5"));
        assert_eq!(state.field("depth"), None);
    }

    #[test]
    fn missing_fields_default() {
        let step: RawStep = serde_json::from_value(json!({})).unwrap();
        assert_eq!(step, RawStep::default());
    }

    #[test]
    fn coerce_order() {
        let state = RawState::display("[object Object]").with_field("ascii", "x");
        assert_eq!(state.coerce(), "[object Object]");
        assert_eq!(RawState::default().with_field("ascii", "x").coerce(), "x");
        assert_eq!(RawState::default().coerce(), "");
    }
}
