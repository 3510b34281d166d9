//! Grammar automaton fused with the scanner.
//!
//! A single forward pass: at each position the highest-priority lexeme is
//! recognized, checked against the permitted-set, consumed, and the next
//! permitted-set is derived from its category. No tokens are retained.

use log::trace;

use crate::cursor::Cursor;
use crate::error::{ErrorReporter, SyntaxError};
use crate::paren::ParenTracker;
use crate::recognize::next_lexeme;
use crate::token::{Expect, PermittedSet, Token, TokenCategory};

/// Permitted at the start of an expression.
pub const START: PermittedSet = PermittedSet::of(&[
    Expect::Function,
    Expect::Number,
    Expect::String,
    Expect::LeftParen,
    Expect::Sign,
    Expect::Boolean,
    Expect::Variable,
]);

const AFTER_OPERATOR: PermittedSet = PermittedSet::of(&[
    Expect::Function,
    Expect::Number,
    Expect::String,
    Expect::LeftParen,
    Expect::Sign,
    Expect::Boolean,
]);

const AFTER_NEGATIVE_SIGN: PermittedSet = PermittedSet::of(&[Expect::Number, Expect::LeftParen]);

const AFTER_POSITIVE_SIGN: PermittedSet = PermittedSet::of(&[
    Expect::Number,
    Expect::String,
    Expect::LeftParen,
    Expect::Sign,
]);

const AFTER_NUMBER: PermittedSet = PermittedSet::of(&[
    Expect::Operator,
    Expect::RightParen,
    Expect::Comma,
    Expect::PositiveSign,
]);

const AFTER_STRING: PermittedSet = PermittedSet::of(&[
    Expect::Operator,
    Expect::RightParen,
    Expect::Sign,
    Expect::Comma,
]);

const AFTER_BOOLEAN: PermittedSet =
    PermittedSet::of(&[Expect::Operator, Expect::RightParen, Expect::Comma]);

const AFTER_FUNCTION: PermittedSet = PermittedSet::of(&[Expect::LeftParen, Expect::FunctionCall]);

const AFTER_GROUP_OPEN: PermittedSet = PermittedSet::of(&[
    Expect::Boolean,
    Expect::Function,
    Expect::LeftParen,
    Expect::Number,
    Expect::String,
    Expect::Sign,
]);

const AFTER_CALL_OPEN: PermittedSet = PermittedSet::of(&[
    Expect::Boolean,
    Expect::Function,
    Expect::LeftParen,
    Expect::Number,
    Expect::Path,
    Expect::RightParen,
    Expect::String,
    Expect::Variable,
    Expect::Sign,
]);

const AFTER_RIGHT_PAREN: PermittedSet = PermittedSet::of(&[
    Expect::Operator,
    Expect::LeftParen,
    Expect::RightParen,
    Expect::Comma,
    Expect::FunctionCall,
    Expect::Sign,
]);

const AFTER_COMMA: PermittedSet = PermittedSet::of(&[
    Expect::Number,
    Expect::String,
    Expect::LeftParen,
    Expect::Function,
    Expect::Sign,
    Expect::Boolean,
    Expect::Variable,
    Expect::Path,
]);

const AFTER_OPERAND_REFERENCE: PermittedSet =
    PermittedSet::of(&[Expect::Comma, Expect::RightParen]);

/// Mutable state of one validation call, built fresh per input.
#[derive(Debug)]
pub struct ScanState {
    cursor: Cursor,
    permitted: PermittedSet,
    parens: ParenTracker,
    last_significant: Option<TokenCategory>,
    reporter: ErrorReporter,
}

impl ScanState {
    pub fn new(input: &str) -> Self {
        Self {
            cursor: Cursor::new(input),
            permitted: START,
            parens: ParenTracker::default(),
            last_significant: None,
            reporter: ErrorReporter::default(),
        }
    }

    /// Scans to the end of input or the first failure, then checks closure.
    pub fn run(mut self) -> Result<(), SyntaxError> {
        while !self.cursor.at_end() && !self.reporter.has_failed() {
            if let Err(err) = self.step() {
                self.reporter.record(err);
            }
        }
        if !self.reporter.has_failed() {
            if let Err(err) = self.finish() {
                self.reporter.record(err);
            }
        }
        self.reporter.into_result()
    }

    /// Recognizes, admits, and consumes one lexeme.
    pub fn step(&mut self) -> Result<(), SyntaxError> {
        let column = self.cursor.position();
        let Some(lexeme) = next_lexeme(&self.cursor)? else {
            let found = self.cursor.peek_char(0).unwrap_or_default();
            return Err(SyntaxError::UnknownCharacter { column, found });
        };

        let category = lexeme.token.category();
        if !self.permitted.admits(category) {
            return Err(SyntaxError::UnexpectedToken {
                column,
                found: category,
            });
        }

        self.cursor.advance(lexeme.len);
        self.accept(&lexeme.token);
        if category != TokenCategory::Whitespace {
            trace!(
                "accepted {category:?} at column {column}; permitted {}",
                self.permitted
            );
        }
        Ok(())
    }

    fn accept(&mut self, token: &Token) {
        let next = match token {
            Token::Whitespace => return,
            Token::Operator(_) => AFTER_OPERATOR,
            Token::NegativeSign => AFTER_NEGATIVE_SIGN,
            Token::PositiveSign => AFTER_POSITIVE_SIGN,
            Token::Number(_) => AFTER_NUMBER,
            Token::String(_) => AFTER_STRING,
            Token::Boolean(_) => AFTER_BOOLEAN,
            Token::Function(_) => AFTER_FUNCTION,
            Token::LeftParen => {
                self.parens.open();
                if self.permitted.contains(Expect::FunctionCall) {
                    AFTER_CALL_OPEN
                } else {
                    AFTER_GROUP_OPEN
                }
            }
            Token::RightParen => {
                self.parens.close();
                AFTER_RIGHT_PAREN
            }
            Token::Comma => AFTER_COMMA,
            Token::Variable(_) | Token::Path(_) => AFTER_OPERAND_REFERENCE,
        };
        self.permitted = next;
        self.last_significant = Some(token.category());
    }

    fn finish(&self) -> Result<(), SyntaxError> {
        let column = self.cursor.char_count();
        if !self.parens.is_balanced() {
            return Err(SyntaxError::UnmatchedParentheses { column });
        }
        match self.last_significant {
            Some(category) if category.closes_operand() => Ok(()),
            _ => Err(SyntaxError::UnexpectedEnd { column }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Result<(), SyntaxError> {
        ScanState::new(input).run()
    }

    #[test]
    fn whitespace_leaves_permitted_set_unchanged() {
        let mut state = ScanState::new("1 ");
        state.step().unwrap();
        let after_number = state.permitted;
        state.step().unwrap();
        assert_eq!(state.permitted, after_number);
    }

    #[test]
    fn function_name_marks_next_paren_as_call() {
        let mut state = ScanState::new("f (");
        state.step().unwrap();
        state.step().unwrap();
        state.step().unwrap();
        assert_eq!(state.permitted, AFTER_CALL_OPEN);
    }

    #[test]
    fn grouping_paren_does_not_admit_references() {
        let mut state = ScanState::new("(");
        state.step().unwrap();
        assert!(!state.permitted.contains(Expect::Path));
        assert!(!state.permitted.contains(Expect::Variable));
        assert!(!state.permitted.contains(Expect::RightParen));
    }

    #[test]
    fn first_failure_stops_the_scan() {
        let err = scan("1 = = )").unwrap_err();
        assert_eq!(
            err,
            SyntaxError::UnknownCharacter {
                column: 2,
                found: '='
            }
        );
    }

    #[test]
    fn unmatched_is_reported_before_incompleteness() {
        assert_eq!(
            scan("f(").unwrap_err(),
            SyntaxError::UnmatchedParentheses { column: 2 }
        );
    }

    #[test]
    fn plus_after_number_is_a_positive_sign() {
        let mut state = ScanState::new("1+");
        state.step().unwrap();
        state.step().unwrap();
        assert_eq!(state.permitted, AFTER_POSITIVE_SIGN);
        assert_eq!(
            scan("1-2").unwrap_err(),
            SyntaxError::UnexpectedToken {
                column: 1,
                found: TokenCategory::NegativeSign
            }
        );
    }

    #[test]
    fn dangling_function_name_is_incomplete() {
        assert_eq!(
            scan("foo").unwrap_err(),
            SyntaxError::UnexpectedEnd { column: 3 }
        );
    }
}
