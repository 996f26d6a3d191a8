//! Rewriting of LaTeX-style notation into the plain-ASCII form accepted by the solver.
//!
//! The rewrite rules are applied in a fixed order:
//!
//! 1. `\sqrt(…)` and `\sqrt{…}` become `sqrt(…)`.
//! 2. `\frac{A}{B}` becomes `(A)/(B)`.
//! 3. `\cdot` and `\times` become `*`.
//! 4. `\div` becomes `/`.
//! 5. Every remaining backslash is removed.
//!
//! Rules 1 and 2 only match brackets whose content has no brackets of the same kind, so they are
//! repeated until neither applies; this resolves nested forms such as `\sqrt{\frac{a}{b}}` from
//! the inside out. Constructs that never match (e.g. an unclosed `\sqrt{x`) pass through
//! unchanged, apart from losing their backslash in rule 5.
//!
//! Every rewrite rule requires a backslash to match, and rule 5 removes all of them, so
//! [`normalize`] is idempotent.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// `\sqrt(x)` or `\sqrt{x}`, where `x` contains no bracket of the same kind.
static SQRT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\sqrt\s*(?:\(([^()]*)\)|\{([^{}]*)\})").expect("valid regex literal")
});

/// `\frac{a}{b}`, where `a` and `b` contain no braces.
static FRAC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\frac\s*\{([^{}]*)\}\s*\{([^{}]*)\}").expect("valid regex literal")
});

/// `\cdot` and `\times`.
static MUL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(?:cdot|times)").expect("valid regex literal"));

/// `\div`.
static DIV: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\div").expect("valid regex literal"));

/// Applies the root and fraction rules once. Returns [`None`] if neither rule matched.
fn rewrite_brackets(input: &str) -> Option<String> {
    let roots = SQRT.replace_all(input, "sqrt($1$2)");
    let fracs = match FRAC.replace_all(&roots, "($1)/($2)") {
        Cow::Borrowed(_) => None,
        Cow::Owned(s) => Some(s),
    };

    match (roots, fracs) {
        (_, Some(s)) => Some(s),
        (Cow::Owned(s), None) => Some(s),
        (Cow::Borrowed(_), None) => None,
    }
}

/// Normalizes the given input into the plain form accepted by the solver.
///
/// The returned string never contains a backslash. Empty input is returned unchanged.
///
/// ```
/// use stepwise_core::normalize;
///
/// assert_eq!(normalize(r"\sqrt{x+5}-2=\sqrt{7-x}+3"), "sqrt(x+5)-2=sqrt(7-x)+3");
/// assert_eq!(normalize(r"\frac{a}{b}"), "(a)/(b)");
/// assert_eq!(normalize(r"3 \cdot x \div 2"), "3 * x / 2");
/// ```
pub fn normalize(raw: &str) -> String {
    if !raw.contains('\\') {
        return raw.to_string();
    }

    let mut current = raw.to_string();
    while let Some(next) = rewrite_brackets(&current) {
        current = next;
    }

    let current = MUL.replace_all(&current, "*");
    let current = DIV.replace_all(&current, "/");
    current.replace('\\', "")
}
