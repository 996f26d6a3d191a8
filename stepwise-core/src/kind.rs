use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// The kind of input given to the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    /// The input contains an equality sign, and is solved for its variable.
    Equation,

    /// The input has no equality sign, and is simplified.
    Expression,
}

impl InputKind {
    /// Classifies normalized input by the presence of an equality sign.
    pub fn classify(normalized: &str) -> Self {
        if normalized.contains('=') {
            Self::Equation
        } else {
            Self::Expression
        }
    }

    /// The name of the solver mode that handles this kind of input.
    pub fn mode(self) -> &'static str {
        match self {
            Self::Equation => "equation",
            Self::Expression => "expression",
        }
    }
}

impl Display for InputKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.mode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify() {
        assert_eq!(InputKind::classify("5x+3=0"), InputKind::Equation);
        assert_eq!(InputKind::classify("x=="), InputKind::Equation);
        assert_eq!(InputKind::classify("2+2"), InputKind::Expression);
        assert_eq!(InputKind::classify(""), InputKind::Expression);
    }
}
