//! Parenthesis depth tracking.

/// Nesting depth of accepted parentheses.
///
/// Whether a `(` opens a call is decided by the permitted-set, not here.
#[derive(Debug, Default, Clone)]
pub struct ParenTracker {
    depth: i64,
    underflowed: bool,
}

impl ParenTracker {
    /// Records an accepted `(`.
    pub fn open(&mut self) {
        self.depth += 1;
    }

    /// Records an accepted `)`.
    pub fn close(&mut self) {
        self.depth -= 1;
        if self.depth < 0 {
            self.underflowed = true;
        }
    }

    /// Depth is back to zero and never went negative along the way.
    pub fn is_balanced(&self) -> bool {
        self.depth == 0 && !self.underflowed
    }
}
