//! Public entry points and result types.

use std::path::Path;

use log::debug;
use serde::Serialize;

use crate::automaton::ScanState;
use crate::error::{SyntaxError, ValidatorError};

/// Outcome of validating one expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    success: bool,
    error: Option<SyntaxError>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.success
    }

    /// First violation, if the expression was rejected.
    pub fn error(&self) -> Option<&SyntaxError> {
        self.error.as_ref()
    }

    /// `parse error at [column N]: <reason>` for rejected expressions.
    pub fn message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    pub fn column(&self) -> Option<usize> {
        self.error.as_ref().map(SyntaxError::column)
    }
}

impl From<Result<(), SyntaxError>> for Validation {
    fn from(result: Result<(), SyntaxError>) -> Self {
        match result {
            Ok(()) => Validation {
                success: true,
                error: None,
            },
            Err(err) => Validation {
                success: false,
                error: Some(err),
            },
        }
    }
}

/// Validates `input` and returns the verdict with the failure reason, if any.
pub fn is_valid_expression(input: &str) -> Validation {
    validate_expression(input).into()
}

/// Validates `input`, returning the first syntax error.
pub fn validate_expression(input: &str) -> Result<(), SyntaxError> {
    let result = ScanState::new(input).run();
    match &result {
        Ok(()) => debug!("expression accepted: {input:?}"),
        Err(err) => debug!("expression rejected: {input:?}: {err}"),
    }
    result
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Verdict for one line of a rule file.
pub struct LineReport {
    /// 1-based line number.
    pub line: usize,
    pub expression: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LineReport {
    pub fn new(line: usize, expression: &str) -> Self {
        let verdict = is_valid_expression(expression);
        Self {
            line,
            expression: expression.to_string(),
            valid: verdict.is_valid(),
            column: verdict.column(),
            message: verdict.message(),
        }
    }
}

/// Validates one expression per line, skipping blank lines and `#` comments.
///
/// Lines are validated as written, without trimming.
pub fn validate_lines(text: &str) -> Vec<LineReport> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !is_ignorable(line))
        .map(|(idx, line)| LineReport::new(idx + 1, line))
        .collect()
}

/// Reads a rule file and validates it with [`validate_lines`].
pub fn validate_file(path: &Path) -> Result<Vec<LineReport>, ValidatorError> {
    let text = std::fs::read_to_string(path)?;
    let reports = validate_lines(&text);
    debug!(
        "validated {} expression(s) from {}",
        reports.len(),
        path.display()
    );
    Ok(reports)
}

fn is_ignorable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}
