//! Forward-only read position over expression text.

/// Owns the input as characters so that every offset is a character column.
#[derive(Debug, Clone)]
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Current 0-based character column.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total input length in characters.
    pub fn char_count(&self) -> usize {
        self.chars.len()
    }

    pub fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// Character `offset` places ahead of the read position, `None` past the end.
    pub fn peek_char(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    /// Moves forward by `n` characters, clamped to the end of input.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.chars.len());
    }

    /// View of the input from an absolute column to the end.
    pub fn remaining_from(&self, pos: usize) -> &[char] {
        let start = pos.min(self.chars.len());
        &self.chars[start..]
    }

    /// True when `literal` appears verbatim at the read position.
    pub fn starts_with(&self, literal: &str) -> bool {
        let rest = self.remaining_from(self.pos);
        let mut count = 0;
        for (idx, expected) in literal.chars().enumerate() {
            if rest.get(idx) != Some(&expected) {
                return false;
            }
            count += 1;
        }
        count > 0
    }

    /// Counts consecutive characters from `offset` ahead that satisfy `pred`.
    pub fn run_length(&self, offset: usize, pred: impl Fn(char) -> bool) -> usize {
        self.remaining_from(self.pos + offset)
            .iter()
            .take_while(|c| pred(**c))
            .count()
    }

    /// Collects `len` characters starting `offset` places ahead.
    pub fn slice(&self, offset: usize, len: usize) -> String {
        self.remaining_from(self.pos + offset)
            .iter()
            .take(len)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;

    #[test]
    fn peeks_relative_to_position_and_returns_none_past_end() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.peek_char(0), Some('a'));
        assert_eq!(cursor.peek_char(1), Some('b'));
        assert_eq!(cursor.peek_char(2), None);

        cursor.advance(1);
        assert_eq!(cursor.peek_char(0), Some('b'));
        assert_eq!(cursor.remaining_from(0), &['a', 'b']);
    }

    #[test]
    fn advance_never_passes_end() {
        let mut cursor = Cursor::new("xyz");
        cursor.advance(10);
        assert!(cursor.at_end());
        assert_eq!(cursor.position(), 3);
        assert!(cursor.remaining_from(7).is_empty());
    }

    #[test]
    fn columns_count_characters_not_bytes() {
        let mut cursor = Cursor::new("é(");
        assert_eq!(cursor.char_count(), 2);
        cursor.advance(1);
        assert_eq!(cursor.peek_char(0), Some('('));
    }

    #[test]
    fn starts_with_and_run_length() {
        let cursor = Cursor::new(" and 1");
        assert!(cursor.starts_with(" and "));
        assert!(!cursor.starts_with(" or "));
        assert!(!cursor.starts_with(""));
        assert_eq!(cursor.run_length(1, |c| c.is_ascii_alphabetic()), 3);
        assert_eq!(cursor.slice(1, 3), "and");
    }
}
