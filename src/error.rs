//! Error definitions for expression validation.

use thiserror::Error;

use crate::token::TokenCategory;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// First grammar violation found while scanning an expression.
///
/// Every variant renders as `parse error at [column N]: <reason>`, where the
/// column is the 0-based character offset at which the offending attempt began.
pub enum SyntaxError {
    /// A lexeme was recognized but its category is not permitted here.
    #[error("parse error at [column {column}]: unexpected {found}")]
    UnexpectedToken { column: usize, found: TokenCategory },
    /// No recognizer matched the character at `column`.
    #[error("parse error at [column {column}]: unknown character")]
    UnknownCharacter { column: usize, found: char },
    /// A backslash inside a string literal is followed by an unsupported sequence.
    #[error("parse error at [column {column}]: Illegal escape sequence: '\\{sequence}'")]
    IllegalEscape { column: usize, sequence: String },
    /// Parenthesis depth did not return to zero.
    #[error("parse error at [column {column}]: unmatched \"()\"")]
    UnmatchedParentheses { column: usize },
    /// Input ended where an operand or closing token was still required.
    #[error("parse error at [column {column}]: unexpected end of expression")]
    UnexpectedEnd { column: usize },
}

impl SyntaxError {
    pub fn column(&self) -> usize {
        match self {
            SyntaxError::UnexpectedToken { column, .. }
            | SyntaxError::UnknownCharacter { column, .. }
            | SyntaxError::IllegalEscape { column, .. }
            | SyntaxError::UnmatchedParentheses { column }
            | SyntaxError::UnexpectedEnd { column } => *column,
        }
    }

    /// Message text without the `parse error at [column N]: ` prefix.
    pub fn reason(&self) -> String {
        let full = self.to_string();
        match full.split_once("]: ") {
            Some((_, reason)) => reason.to_string(),
            None => full,
        }
    }
}

#[derive(Debug, Error)]
/// Top-level error type for APIs that touch more than a single expression.
pub enum ValidatorError {
    /// Expression rejected by the grammar.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Filesystem I/O error while reading a rule file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Holds the first failure of a scan; later failures are dropped.
#[derive(Debug, Default)]
pub struct ErrorReporter {
    first: Option<SyntaxError>,
}

impl ErrorReporter {
    pub fn record(&mut self, error: SyntaxError) {
        if self.first.is_none() {
            self.first = Some(error);
        }
    }

    pub fn has_failed(&self) -> bool {
        self.first.is_some()
    }

    pub fn into_result(self) -> Result<(), SyntaxError> {
        match self.first {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
