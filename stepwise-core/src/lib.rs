//! Input normalization and step extraction for step-by-step algebra solvers.
//!
//! This crate sits between a user typing an equation or expression (possibly in LaTeX notation)
//! and an external symbolic solver that knows how to solve it one step at a time. It is
//! responsible for:
//!
//! - rewriting the user's notation into the plain form the solver accepts ([`normalize`]),
//! - deciding whether the input is an equation or an expression ([`InputKind`]),
//! - calling the solver, with a single whitespace-stripped retry ([`StepSolver`]),
//! - reshaping the solver's native steps into uniform records ([`StepExtractor`]),
//! - wrapping the outcome into a single [`Envelope`].
//!
//! The solver itself is any implementation of the [`Solver`] trait. [`SubprocessSolver`] runs an
//! external program; see the [`bridge`] module for its protocol.
//!
//! ```
//! use stepwise_core::{Envelope, InputKind, RawState, RawStep, Solver, SolverError, StepSolver};
//!
//! /// A solver that already knows the answer.
//! struct Oracle;
//!
//! impl Solver for Oracle {
//!     fn solve_equation(&self, _: &str) -> Result<Vec<RawStep>, SolverError> {
//!         Ok(vec![
//!             RawStep::new("SUBTRACT_FROM_BOTH_SIDES", RawState::rendered("5x + 3 = 0"), RawState::rendered("5x = -3")),
//!             RawStep::new("DIVIDE_FROM_BOTH_SIDES", RawState::rendered("5x = -3"), RawState::rendered("x = -3/5")),
//!         ])
//!     }
//!
//!     fn simplify_expression(&self, _: &str) -> Result<Vec<RawStep>, SolverError> {
//!         Ok(vec![])
//!     }
//! }
//!
//! let envelope = StepSolver::new(Oracle).solve("5x+3=0");
//! assert_eq!(envelope.kind(), InputKind::Equation);
//! assert_eq!(envelope.final_state(), Some("x = -3/5"));
//!
//! // `2+2` has no equality sign, and the solver has nothing to do
//! let envelope = StepSolver::new(Oracle).solve("2+2");
//! assert!(matches!(envelope, Envelope::Failure(_)));
//! ```

pub mod adapter;
pub mod bridge;
pub mod describe;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod kind;
pub mod normalize;
pub mod repr;
pub mod solver;

pub use adapter::StepSolver;
pub use bridge::{SolverConfig, SubprocessSolver};
pub use describe::Descriptions;
pub use envelope::{Envelope, Failure, FailureKind, Success};
pub use extract::{ExtractionAnomaly, Step, StepExtractor};
pub use kind::InputKind;
pub use normalize::normalize;
pub use repr::{ReprChain, ReprStrategy};
pub use solver::{RawState, RawStep, Solver, SolverError};
