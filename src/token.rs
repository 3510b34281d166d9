//! Token categories, token payloads, and the permitted-set.

use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Category assigned to each recognized lexeme.
pub enum TokenCategory {
    Boolean,
    Number,
    String,
    Variable,
    Path,
    Function,
    Operator,
    LeftParen,
    RightParen,
    Comma,
    PositiveSign,
    NegativeSign,
    Whitespace,
}

impl TokenCategory {
    /// Permitted-set member that admits this category, `None` for whitespace.
    pub fn admitted_by(self) -> Option<Expect> {
        Some(match self {
            TokenCategory::Boolean => Expect::Boolean,
            TokenCategory::Number => Expect::Number,
            TokenCategory::String => Expect::String,
            TokenCategory::Variable => Expect::Variable,
            TokenCategory::Path => Expect::Path,
            TokenCategory::Function => Expect::Function,
            TokenCategory::Operator => Expect::Operator,
            TokenCategory::LeftParen => Expect::LeftParen,
            TokenCategory::RightParen => Expect::RightParen,
            TokenCategory::Comma => Expect::Comma,
            TokenCategory::PositiveSign | TokenCategory::NegativeSign => Expect::Sign,
            TokenCategory::Whitespace => return None,
        })
    }

    /// Whether an expression may end right after this category.
    pub fn closes_operand(self) -> bool {
        matches!(
            self,
            TokenCategory::Number
                | TokenCategory::String
                | TokenCategory::Boolean
                | TokenCategory::RightParen
                | TokenCategory::Variable
                | TokenCategory::Path
        )
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenCategory::Boolean => "boolean",
            TokenCategory::Number => "number",
            TokenCategory::String => "string",
            TokenCategory::Variable => "variable",
            TokenCategory::Path => "path",
            TokenCategory::Function => "function",
            TokenCategory::Operator => "operator",
            TokenCategory::LeftParen => "\"(\"",
            TokenCategory::RightParen => "\")\"",
            TokenCategory::Comma => "\",\"",
            TokenCategory::PositiveSign | TokenCategory::NegativeSign => "sign",
            TokenCategory::Whitespace => "whitespace",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A recognized lexeme with its decoded payload.
pub enum Token {
    /// Literal text as written (`true`, `TRUE`, `false`, `FALSE`).
    Boolean(String),
    /// Unsigned magnitude; signs are separate tokens.
    Number(u64),
    /// Unescaped string contents.
    String(String),
    /// Raw `$name` text.
    Variable(String),
    /// Raw `./seg/seg` text.
    Path(String),
    /// Function identifier.
    Function(String),
    Operator(Operator),
    LeftParen,
    RightParen,
    Comma,
    PositiveSign,
    NegativeSign,
    Whitespace,
}

impl Token {
    pub fn category(&self) -> TokenCategory {
        match self {
            Token::Boolean(_) => TokenCategory::Boolean,
            Token::Number(_) => TokenCategory::Number,
            Token::String(_) => TokenCategory::String,
            Token::Variable(_) => TokenCategory::Variable,
            Token::Path(_) => TokenCategory::Path,
            Token::Function(_) => TokenCategory::Function,
            Token::Operator(_) => TokenCategory::Operator,
            Token::LeftParen => TokenCategory::LeftParen,
            Token::RightParen => TokenCategory::RightParen,
            Token::Comma => TokenCategory::Comma,
            Token::PositiveSign => TokenCategory::PositiveSign,
            Token::NegativeSign => TokenCategory::NegativeSign,
            Token::Whitespace => TokenCategory::Whitespace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Comparison and boolean operators.
pub enum Operator {
    /// `==`
    Eq,
    /// `||`
    OrOr,
    /// `&&`
    AndAnd,
    /// ` or `
    Or,
    /// ` OR `
    OrUpper,
    /// ` and `
    And,
    /// ` AND `
    AndUpper,
}

impl Operator {
    /// Source spelling, including the boundary spaces of word operators.
    pub fn spelling(self) -> &'static str {
        match self {
            Operator::Eq => "==",
            Operator::OrOr => "||",
            Operator::AndAnd => "&&",
            Operator::Or => " or ",
            Operator::OrUpper => " OR ",
            Operator::And => " and ",
            Operator::AndUpper => " AND ",
        }
    }
}

const EXPECT_COUNT: usize = 13;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Members of a permitted-set.
///
/// `Sign` admits both sign categories; `PositiveSign` admits only `+`.
/// `FunctionCall` is the call-admissible marker: it admits nothing by itself
/// but makes the next `(` a call paren.
pub enum Expect {
    Operator,
    Variable,
    Function,
    FunctionCall,
    Number,
    String,
    LeftParen,
    RightParen,
    Comma,
    Sign,
    Boolean,
    Path,
    PositiveSign,
}

impl Expect {
    pub const ALL: [Expect; EXPECT_COUNT] = [
        Expect::Operator,
        Expect::Variable,
        Expect::Function,
        Expect::FunctionCall,
        Expect::Number,
        Expect::String,
        Expect::LeftParen,
        Expect::RightParen,
        Expect::Comma,
        Expect::Sign,
        Expect::Boolean,
        Expect::Path,
        Expect::PositiveSign,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Set of token categories legal at the current scan position.
pub struct PermittedSet([bool; EXPECT_COUNT]);

impl PermittedSet {
    pub const fn of(members: &[Expect]) -> Self {
        let mut flags = [false; EXPECT_COUNT];
        let mut i = 0;
        while i < members.len() {
            flags[members[i] as usize] = true;
            i += 1;
        }
        Self(flags)
    }

    pub fn contains(&self, member: Expect) -> bool {
        self.0[member as usize]
    }

    /// Whether a lexeme of `category` may appear here.
    pub fn admits(&self, category: TokenCategory) -> bool {
        if category == TokenCategory::PositiveSign && self.contains(Expect::PositiveSign) {
            return true;
        }
        match category.admitted_by() {
            Some(member) => self.contains(member),
            None => true,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Expect> + '_ {
        Expect::ALL.into_iter().filter(|m| self.contains(*m))
    }
}

impl fmt::Display for PermittedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|m| format!("{m:?}")).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::{Expect, PermittedSet, TokenCategory};

    #[test]
    fn sign_member_admits_both_sign_categories() {
        let set = PermittedSet::of(&[Expect::Sign]);
        assert!(set.admits(TokenCategory::PositiveSign));
        assert!(set.admits(TokenCategory::NegativeSign));
        assert!(!set.admits(TokenCategory::Number));
    }

    #[test]
    fn positive_sign_member_admits_plus_only() {
        let set = PermittedSet::of(&[Expect::PositiveSign]);
        assert!(set.admits(TokenCategory::PositiveSign));
        assert!(!set.admits(TokenCategory::NegativeSign));
    }

    #[test]
    fn whitespace_is_always_admitted() {
        assert!(PermittedSet::default().admits(TokenCategory::Whitespace));
    }

    #[test]
    fn displays_members_in_declaration_order() {
        let set = PermittedSet::of(&[Expect::RightParen, Expect::Comma]);
        assert_eq!(set.to_string(), "{RightParen, Comma}");
    }
}
