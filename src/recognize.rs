//! One match routine per token category.
//!
//! Recognizers only look ahead through the cursor; they never move it. A
//! match reports the decoded token plus the number of characters it spans,
//! and the caller decides whether to consume them.

use std::sync::OnceLock;

use regex::Regex;

use crate::cursor::Cursor;
use crate::error::SyntaxError;
use crate::token::{Operator, Token};

const BOOLEAN_LITERALS: [&str; 4] = ["true", "TRUE", "false", "FALSE"];

const SYMBOL_OPERATORS: [Operator; 3] = [Operator::Eq, Operator::OrOr, Operator::AndAnd];

const WORD_OPERATORS: [Operator; 4] = [
    Operator::Or,
    Operator::OrUpper,
    Operator::And,
    Operator::AndUpper,
];

#[derive(Debug, Clone, PartialEq, Eq)]
/// A successful match at the cursor.
pub struct Lexeme {
    pub token: Token,
    /// Number of characters the lexeme spans.
    pub len: usize,
}

impl Lexeme {
    fn new(token: Token, len: usize) -> Self {
        Self { token, len }
    }
}

pub type RecognizeResult = Result<Option<Lexeme>, SyntaxError>;

/// Signature shared by every recognizer.
pub type Recognizer = fn(&Cursor) -> RecognizeResult;

/// Recognizers in priority order; the first match wins.
pub const PRIORITY: [Recognizer; 12] = [
    recognize_operator,
    recognize_sign,
    recognize_number,
    recognize_string,
    recognize_boolean,
    recognize_function,
    recognize_left_paren,
    recognize_right_paren,
    recognize_comma,
    recognize_variable,
    recognize_path,
    recognize_whitespace,
];

/// Highest-priority lexeme at the cursor, without any grammar check.
///
/// Returns `Ok(None)` when no recognizer matches. Errors only come from
/// string literals with an illegal escape sequence.
pub fn next_lexeme(cursor: &Cursor) -> RecognizeResult {
    for recognize in PRIORITY {
        if let Some(lexeme) = recognize(cursor)? {
            return Ok(Some(lexeme));
        }
    }
    Ok(None)
}

/// `==`, `||`, `&&`, or a word operator with one space on each side.
pub fn recognize_operator(cursor: &Cursor) -> RecognizeResult {
    for op in SYMBOL_OPERATORS {
        if cursor.starts_with(op.spelling()) {
            return Ok(Some(Lexeme::new(Token::Operator(op), 2)));
        }
    }

    if cursor.peek_char(0) != Some(' ') {
        return Ok(None);
    }
    for op in WORD_OPERATORS {
        let spelling = op.spelling();
        let len = spelling.chars().count();
        // Requires at least one character after the trailing space.
        if cursor.position() + len < cursor.char_count() && cursor.starts_with(spelling) {
            return Ok(Some(Lexeme::new(Token::Operator(op), len)));
        }
    }
    Ok(None)
}

/// A bare `+` or `-`.
pub fn recognize_sign(cursor: &Cursor) -> RecognizeResult {
    let token = match cursor.peek_char(0) {
        Some('+') => Token::PositiveSign,
        Some('-') => Token::NegativeSign,
        _ => return Ok(None),
    };
    Ok(Some(Lexeme::new(token, 1)))
}

/// One or more ASCII digits.
pub fn recognize_number(cursor: &Cursor) -> RecognizeResult {
    let len = cursor.run_length(0, |c| c.is_ascii_digit());
    if len == 0 {
        return Ok(None);
    }
    let magnitude = cursor
        .slice(0, len)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .fold(0u64, |acc, d| acc.saturating_mul(10).saturating_add(u64::from(d)));
    Ok(Some(Lexeme::new(Token::Number(magnitude), len)))
}

/// Single-quoted string literal.
///
/// A quote closes the literal unless the previously buffered raw character is
/// a backslash. That rule also swallows the quote after a literal trailing
/// `\\`, so `'a\\'` is unterminated.
pub fn recognize_string(cursor: &Cursor) -> RecognizeResult {
    if cursor.peek_char(0) != Some('\'') {
        return Ok(None);
    }
    let start = cursor.position();
    let mut raw: Vec<char> = Vec::new();
    let mut offset = 1;
    while let Some(c) = cursor.peek_char(offset) {
        if c == '\'' && raw.last() != Some(&'\\') {
            let text = unescape(&raw, start)?;
            return Ok(Some(Lexeme::new(Token::String(text), offset + 1)));
        }
        raw.push(c);
        offset += 1;
    }
    Ok(None)
}

/// Decodes escape sequences in the raw body of a string literal.
///
/// `start` is the column of the opening quote; error columns point at the
/// backslash of the offending sequence.
fn unescape(raw: &[char], start: usize) -> Result<String, SyntaxError> {
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        let c = raw[i];
        if c != '\\' {
            out.push(c);
            i += 1;
            continue;
        }

        let column = start + 1 + i;
        let Some(&esc) = raw.get(i + 1) else {
            return Err(SyntaxError::IllegalEscape {
                column,
                sequence: String::new(),
            });
        };
        match esc {
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            '/' => out.push('/'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'u' => {
                let hex: String = raw.iter().skip(i + 2).take(4).collect();
                let well_formed =
                    hex.chars().count() == 4 && hex.chars().all(|h| h.is_ascii_hexdigit());
                let decoded = well_formed
                    .then(|| u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32))
                    .flatten();
                let Some(ch) = decoded else {
                    return Err(SyntaxError::IllegalEscape {
                        column,
                        sequence: format!("u{hex}"),
                    });
                };
                out.push(ch);
                i += 4;
            }
            other => {
                return Err(SyntaxError::IllegalEscape {
                    column,
                    sequence: other.to_string(),
                });
            }
        }
        i += 2;
    }
    Ok(out)
}

/// Exact, case-sensitive `true`, `TRUE`, `false`, or `FALSE`.
pub fn recognize_boolean(cursor: &Cursor) -> RecognizeResult {
    for literal in BOOLEAN_LITERALS {
        if cursor.starts_with(literal) {
            return Ok(Some(Lexeme::new(
                Token::Boolean(literal.to_string()),
                literal.len(),
            )));
        }
    }
    Ok(None)
}

/// Greedy `[A-Za-z0-9_]+` that must not start with a digit.
pub fn recognize_function(cursor: &Cursor) -> RecognizeResult {
    let len = cursor.run_length(0, |c| c.is_ascii_alphanumeric() || c == '_');
    if len == 0 {
        return Ok(None);
    }
    let name = cursor.slice(0, len);
    if !function_name_regex().is_match(&name) {
        return Ok(None);
    }
    Ok(Some(Lexeme::new(Token::Function(name), len)))
}

pub fn recognize_left_paren(cursor: &Cursor) -> RecognizeResult {
    Ok(single(cursor, '(', Token::LeftParen))
}

pub fn recognize_right_paren(cursor: &Cursor) -> RecognizeResult {
    Ok(single(cursor, ')', Token::RightParen))
}

pub fn recognize_comma(cursor: &Cursor) -> RecognizeResult {
    Ok(single(cursor, ',', Token::Comma))
}

/// `$` followed by one or more ASCII letters.
pub fn recognize_variable(cursor: &Cursor) -> RecognizeResult {
    if cursor.peek_char(0) != Some('$') {
        return Ok(None);
    }
    let letters = cursor.run_length(1, |c| c.is_ascii_alphabetic());
    if letters == 0 {
        return Ok(None);
    }
    let len = letters + 1;
    Ok(Some(Lexeme::new(Token::Variable(cursor.slice(0, len)), len)))
}

/// `./` followed by `/`-separated non-empty segments.
///
/// Consumption stops only at `(`, `)`, `,` or end of input; the consumed text
/// must then form one or more `/segment` groups after the leading dot.
pub fn recognize_path(cursor: &Cursor) -> RecognizeResult {
    if !cursor.starts_with("./") {
        return Ok(None);
    }
    let len = 2 + cursor.run_length(2, |c| !matches!(c, '(' | ')' | ','));
    let text = cursor.slice(0, len);
    if !path_regex().is_match(&text) {
        return Ok(None);
    }
    Ok(Some(Lexeme::new(Token::Path(text), len)))
}

/// A single space, tab, newline, or carriage return.
pub fn recognize_whitespace(cursor: &Cursor) -> RecognizeResult {
    match cursor.peek_char(0) {
        Some(' ' | '\t' | '\n' | '\r') => Ok(Some(Lexeme::new(Token::Whitespace, 1))),
        _ => Ok(None),
    }
}

fn single(cursor: &Cursor, expected: char, token: Token) -> Option<Lexeme> {
    (cursor.peek_char(0) == Some(expected)).then(|| Lexeme::new(token, 1))
}

fn function_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("valid regex"))
}

fn path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\.(/[^/(),]+)+$").expect("valid regex"))
}
