//! Single-pass validator for a small rule-expression language.
//!
//! Expressions are built from booleans, unsigned integers with separate sign
//! tokens, single-quoted strings, `$` variables, `./` paths, function calls,
//! parenthesized groups, comma-separated arguments, and the operators `==`,
//! `||`, `&&`, ` or `, ` OR `, ` and `, ` AND `. Scanning and grammar checks
//! happen in one forward pass; nothing is parsed into a tree or evaluated.

pub mod automaton;
pub mod cursor;
pub mod error;
pub mod paren;
pub mod recognize;
pub mod token;
pub mod validation;

pub use error::{SyntaxError, ValidatorError};
pub use token::{Token, TokenCategory};
pub use validation::{
    is_valid_expression, validate_expression, validate_file, validate_lines, LineReport,
    Validation,
};

#[cfg(test)]
mod tests {
    use super::is_valid_expression;

    #[test]
    fn exposes_verdict_and_message() {
        let ok = is_valid_expression("f(1)");
        assert!(ok.is_valid());
        assert!(ok.message().is_none());

        let bad = is_valid_expression("f(1,)");
        assert!(!bad.is_valid());
        assert_eq!(
            bad.message().as_deref(),
            Some("parse error at [column 4]: unexpected \")\"")
        );
        assert_eq!(bad.column(), Some(4));
    }
}
