//! Scan position used by the markup parser.

/// A byte offset into the source text.
///
/// Grammar rules that may fail take a [`Cursor::copy`], advance the copy, and
/// only [`Cursor::commit`] it back once the whole rule has matched. A failed
/// attempt therefore leaves the caller's position untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pos: usize,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(pos: usize) -> Self {
        Self { pos }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Duplicates the position for a speculative parse.
    pub fn copy(&self) -> Self {
        *self
    }

    /// Adopts the position reached by a successful speculative parse.
    pub fn commit(&mut self, attempt: Cursor) {
        self.pos = attempt.pos;
    }

    pub fn advance(&mut self, bytes: usize) {
        self.pos += bytes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_does_not_move_original() {
        let original = Cursor::at(3);
        let mut attempt = original.copy();
        attempt.advance(5);
        assert_eq!(original.pos(), 3);
        assert_eq!(attempt.pos(), 8);
    }

    #[test]
    fn test_commit_adopts_attempt_position() {
        let mut original = Cursor::new();
        let mut attempt = original.copy();
        attempt.advance(4);
        original.commit(attempt);
        assert_eq!(original.pos(), 4);
    }
}
