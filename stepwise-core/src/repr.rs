//! Selection of the string form of an algebraic state.
//!
//! A [`RawState`] may carry several string forms of varying quality. A [`ReprChain`] tries an
//! ordered list of [`ReprStrategy`]s and keeps the first result that is not degenerate.

use crate::solver::RawState;

/// The text a solver produces when it fails to convert an object to a string.
pub const PLACEHOLDER: &str = "[object Object]";

/// Returns true if the given text is useless as a representation of a state: blank, or the
/// failed-conversion [`PLACEHOLDER`].
pub fn is_degenerate(text: &str) -> bool {
    let text = text.trim();
    text.is_empty() || text == PLACEHOLDER
}

/// A way of obtaining a string form of a [`RawState`].
pub trait ReprStrategy: Send + Sync {
    /// A short name for the strategy, used in log records.
    fn name(&self) -> &'static str;

    /// Returns the string form this strategy would use, if the state has one.
    fn candidate<'a>(&self, state: &'a RawState) -> Option<&'a str>;
}

/// Uses the solver's dedicated render-to-string output.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rendered;

impl ReprStrategy for Rendered {
    fn name(&self) -> &'static str {
        "rendered"
    }

    fn candidate<'a>(&self, state: &'a RawState) -> Option<&'a str> {
        state.rendered.as_deref()
    }
}

/// Uses the solver's generic string conversion.
#[derive(Debug, Clone, Copy, Default)]
pub struct Display;

impl ReprStrategy for Display {
    fn name(&self) -> &'static str {
        "display"
    }

    fn candidate<'a>(&self, state: &'a RawState) -> Option<&'a str> {
        state.display.as_deref()
    }
}

/// Uses the first recognized auxiliary field that holds a non-degenerate string.
#[derive(Debug, Clone, Copy)]
pub struct Auxiliary {
    /// The recognized field names, in order of preference.
    pub keys: &'static [&'static str],
}

impl Auxiliary {
    /// Field names commonly attached to states by solvers.
    pub const KNOWN_KEYS: &'static [&'static str] = &["ascii", "text", "value", "expression"];
}

impl Default for Auxiliary {
    fn default() -> Self {
        Self { keys: Self::KNOWN_KEYS }
    }
}

impl ReprStrategy for Auxiliary {
    fn name(&self) -> &'static str {
        "auxiliary"
    }

    fn candidate<'a>(&self, state: &'a RawState) -> Option<&'a str> {
        self.keys.iter()
            .filter_map(|key| state.field(key))
            .find(|text| !is_degenerate(text))
    }
}

/// The string form chosen for a state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// The chosen text.
    pub text: String,

    /// The name of the strategy that produced it, or [`None`] if every strategy degraded and the
    /// text is the result of [`RawState::coerce`].
    pub strategy: Option<&'static str>,
}

impl Resolved {
    /// Returns true if no strategy produced a usable representation.
    pub fn is_fallback(&self) -> bool {
        self.strategy.is_none()
    }
}

/// An ordered list of strategies, tried in sequence.
pub struct ReprChain {
    strategies: Vec<Box<dyn ReprStrategy>>,
}

impl ReprChain {
    /// Creates a chain from the given strategies.
    pub fn new(strategies: Vec<Box<dyn ReprStrategy>>) -> Self {
        Self { strategies }
    }

    /// The standard chain: [`Rendered`], then [`Display`], then [`Auxiliary`].
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(Rendered),
            Box::new(Display),
            Box::new(Auxiliary::default()),
        ])
    }

    /// Picks the string form of the given state.
    pub fn resolve(&self, state: &RawState) -> Resolved {
        self.strategies.iter()
            .find_map(|strategy| {
                strategy.candidate(state)
                    .filter(|text| !is_degenerate(text))
                    .map(|text| Resolved { text: text.to_string(), strategy: Some(strategy.name()) })
            })
            .unwrap_or_else(|| Resolved { text: state.coerce(), strategy: None })
    }
}

impl Default for ReprChain {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ReprChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.strategies.iter().map(|strategy| strategy.name()))
            .finish()
    }
}
