//! Human-readable descriptions of transformation kinds.

use std::collections::HashMap;

/// The transformation kind used when the solver does not tag a step.
pub const UNKNOWN_KIND: &str = "unknown";

/// Known transformation tags of the `mathsteps` solver, and their descriptions.
const STANDARD: &[(&str, &str)] = &[
    // equations
    ("ADD_TO_BOTH_SIDES", "add the same value to both sides"),
    ("SUBTRACT_FROM_BOTH_SIDES", "subtract the same value from both sides"),
    ("MULTIPLY_TO_BOTH_SIDES", "multiply both sides by the same value"),
    ("DIVIDE_FROM_BOTH_SIDES", "divide both sides to isolate the variable"),
    ("MULTIPLY_BOTH_SIDES_BY_INVERSE_FRACTION", "multiply both sides by the inverse fraction"),
    ("MULTIPLY_BOTH_SIDES_BY_NEGATIVE_ONE", "multiply both sides by -1"),
    ("SWAP_SIDES", "swap the two sides"),
    ("SIMPLIFY_LEFT_SIDE", "simplify the left side"),
    ("SIMPLIFY_RIGHT_SIDE", "simplify the right side"),
    ("FIND_ROOTS", "find the roots"),
    ("STATEMENT_IS_TRUE", "the statement is always true"),
    ("STATEMENT_IS_FALSE", "the statement is never true"),
    // arithmetic
    ("SIMPLIFY_ARITHMETIC", "evaluate the arithmetic"),
    ("SIMPLIFY_SIGNS", "simplify the signs"),
    ("RESOLVE_DOUBLE_MINUS", "resolve the double negative"),
    ("CANCEL_MINUSES", "cancel the negatives"),
    ("CANCEL_TERMS", "cancel opposite terms"),
    ("REMOVE_ADDING_ZERO", "remove the added zero"),
    ("REMOVE_MULTIPLYING_BY_ONE", "remove the multiplication by 1"),
    ("REMOVE_MULTIPLYING_BY_NEGATIVE_ONE", "replace multiplication by -1 with negation"),
    ("MULTIPLY_BY_ZERO", "multiply by zero"),
    ("DIVISION_BY_ONE", "remove the division by 1"),
    ("DIVISION_BY_NEGATIVE_ONE", "replace division by -1 with negation"),
    ("REMOVE_EXPONENT_BY_ONE", "remove the exponent of 1"),
    ("REDUCE_EXPONENT_BY_ZERO", "anything to the power of zero is 1"),
    ("REMOVE_UNNECESSARY_PARENS", "remove unnecessary parentheses"),
    // like terms
    ("COLLECT_AND_COMBINE_LIKE_TERMS", "combine like terms"),
    ("COLLECT_LIKE_TERMS", "group like terms together"),
    ("ADD_POLYNOMIAL_TERMS", "add the like terms"),
    ("MULTIPLY_POLYNOMIAL_TERMS", "multiply the like terms"),
    ("GROUP_COEFFICIENTS", "group the coefficients"),
    ("ADD_COEFFICIENT_OF_ONE", "write the implicit coefficient of 1"),
    ("ADD_EXPONENT_OF_ONE", "write the implicit exponent of 1"),
    ("ADD_EXPONENTS", "add the exponents"),
    ("MULTIPLY_COEFFICIENTS", "multiply the coefficients"),
    ("REARRANGE_COEFF", "move the coefficient to the front"),
    // distribution
    ("DISTRIBUTE", "distribute"),
    ("DISTRIBUTE_NEGATIVE_ONE", "distribute the negative sign"),
    ("EXPAND_EXPONENT", "expand the power"),
    // fractions
    ("ADD_FRACTIONS", "add the fractions"),
    ("ADD_NUMERATORS", "add the numerators"),
    ("COMBINE_NUMERATORS", "combine the numerators"),
    ("COMMON_DENOMINATOR", "rewrite with a common denominator"),
    ("CONVERT_INTEGER_TO_FRACTION", "write the integer as a fraction"),
    ("MULTIPLY_FRACTIONS", "multiply the fractions"),
    ("MULTIPLY_NUMERATORS", "multiply the numerators"),
    ("MULTIPLY_DENOMINATORS", "multiply the denominators"),
    ("SIMPLIFY_FRACTION", "simplify the fraction"),
    ("CANCEL_GCD", "cancel the greatest common divisor"),
    ("BREAK_UP_FRACTION", "split the fraction"),
    ("REDUCE_ZERO_NUMERATOR", "a fraction with a zero numerator is zero"),
    // roots and factoring
    ("NTH_ROOT_VALUE", "evaluate the root"),
    ("CANCEL_EXPONENT_AND_ROOT", "cancel the root against the exponent"),
    ("FACTOR_SYMBOL", "factor out the variable"),
    ("FACTOR_DIFFERENCE_OF_SQUARES", "factor the difference of squares"),
    ("FACTOR_PERFECT_SQUARE", "factor the perfect square"),
    ("FACTOR_SUM_PRODUCT_RULE", "factor using the sum-product rule"),
];

/// An immutable table mapping transformation tags to short human-readable descriptions.
///
/// The table is built once, by [`Descriptions::standard`] or from custom entries, and passed
/// explicitly to the step extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Descriptions {
    table: HashMap<String, String>,
}

impl Descriptions {
    /// Creates a table containing only the given entries.
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
        where K: Into<String>, V: Into<String>,
    {
        Self {
            table: entries.into_iter()
                .map(|(tag, phrase)| (tag.into(), phrase.into()))
                .collect(),
        }
    }

    /// The table of descriptions for the tags emitted by `mathsteps`.
    pub fn standard() -> Self {
        Self::new(STANDARD.iter().copied())
    }

    /// Returns a copy of this table with the given entry added or replaced.
    pub fn with(mut self, tag: impl Into<String>, phrase: impl Into<String>) -> Self {
        self.table.insert(tag.into(), phrase.into());
        self
    }

    /// Returns the number of known tags.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns true if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the description of the given tag.
    ///
    /// Unrecognized tags are described as `apply {tag}`, and a missing tag as
    /// `apply transformation`.
    pub fn describe(&self, tag: Option<&str>) -> String {
        match tag {
            Some(tag) => self.table.get(tag)
                .cloned()
                .unwrap_or_else(|| format!("apply {}", tag)),
            None => "apply transformation".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags() {
        let descriptions = Descriptions::standard();
        assert_eq!(descriptions.describe(Some("COLLECT_AND_COMBINE_LIKE_TERMS")), "combine like terms");
        assert_eq!(descriptions.describe(Some("DIVIDE_FROM_BOTH_SIDES")), "divide both sides to isolate the variable");
    }

    #[test]
    fn unknown_and_missing_tags() {
        let descriptions = Descriptions::standard();
        assert_eq!(descriptions.describe(Some("REWRITE_AS_LOG")), "apply REWRITE_AS_LOG");
        assert_eq!(descriptions.describe(None), "apply transformation");
    }

    #[test]
    fn no_duplicate_tags() {
        assert_eq!(Descriptions::standard().len(), STANDARD.len());
    }

    #[test]
    fn substitute_table() {
        let descriptions = Descriptions::new([("FOO", "do foo")]);
        assert_eq!(descriptions.describe(Some("FOO")), "do foo");
        assert_eq!(descriptions.describe(Some("SWAP_SIDES")), "apply SWAP_SIDES");

        let descriptions = descriptions.with("SWAP_SIDES", "flip it");
        assert_eq!(descriptions.describe(Some("SWAP_SIDES")), "flip it");
    }
}
