//! Conversion of the solver's native steps into uniform [`Step`] records.

use crate::{
    describe::{Descriptions, UNKNOWN_KIND},
    kind::InputKind,
    repr::ReprChain,
    solver::{RawState, RawStep},
};
use log::warn;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Which state of a step a representation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Before,
    After,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::After => f.write_str("after"),
        }
    }
}

/// No usable string form could be found for one side of a step.
///
/// This is not fatal: the step is still produced, with the unconditional string conversion of the
/// state in place of a proper representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionAnomaly {
    /// The side of the step that is affected.
    pub side: Side,

    /// The text that was used instead.
    pub fallback: String,
}

/// One algebraic transformation, as handed to printers and renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// The 1-based position of this step in the solution.
    pub index: usize,

    /// The state before the step.
    pub before: String,

    /// The state after the step.
    pub after: String,

    /// The solver's tag for the transformation, or `"unknown"`.
    pub transform_kind: String,

    /// A short human-readable description of the transformation.
    pub description: String,

    /// Whether the solver reported nested steps for this step.
    pub has_substeps: bool,

    /// The number of nested steps.
    pub substep_count: usize,

    /// Problems encountered while extracting this step.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub anomalies: Vec<ExtractionAnomaly>,
}

/// Converts raw solver steps into [`Step`]s.
#[derive(Debug)]
pub struct StepExtractor {
    descriptions: Descriptions,
    chain: ReprChain,
}

impl StepExtractor {
    /// Creates an extractor using the given description table and representation chain.
    pub fn new(descriptions: Descriptions, chain: ReprChain) -> Self {
        Self { descriptions, chain }
    }

    /// Creates an extractor with the standard description table and representation chain.
    pub fn standard() -> Self {
        Self::new(Descriptions::standard(), ReprChain::standard())
    }

    /// The description table used by this extractor.
    pub fn descriptions(&self) -> &Descriptions {
        &self.descriptions
    }

    /// Converts the given steps, in order. The output has the same length as the input.
    pub fn extract(&self, raw_steps: &[RawStep], kind: InputKind) -> Vec<Step> {
        raw_steps.iter()
            .enumerate()
            .map(|(i, raw)| self.extract_one(i + 1, raw, kind))
            .collect()
    }

    fn extract_one(&self, index: usize, raw: &RawStep, kind: InputKind) -> Step {
        let mut anomalies = Vec::new();
        let mut resolve = |side: Side, state: &RawState| {
            let resolved = self.chain.resolve(state);
            if resolved.is_fallback() {
                warn!("{} step {}: no usable {} representation, using {:?}", kind, index, side, resolved.text);
                anomalies.push(ExtractionAnomaly { side, fallback: resolved.text.clone() });
            }
            resolved.text
        };

        let before = resolve(Side::Before, &raw.old_state);
        let after = resolve(Side::After, &raw.new_state);
        let substep_count = raw.substeps.as_ref().map(Vec::len).unwrap_or(0);

        Step {
            index,
            before,
            after,
            transform_kind: raw.change_type.clone().unwrap_or_else(|| UNKNOWN_KIND.to_string()),
            description: self.descriptions.describe(raw.change_type.as_deref()),
            has_substeps: substep_count > 0,
            substep_count,
            anomalies,
        }
    }
}

impl Default for StepExtractor {
    fn default() -> Self {
        Self::standard()
    }
}
