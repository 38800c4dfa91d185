//! Markable character reader over in-memory source text

/// Sequential reader over the characters of a source string.
///
/// The position never leaves `0..=len`. Reading at the end returns `None`
/// without moving the position.
#[derive(Debug, Clone)]
pub struct CharacterCursor {
    chars: Vec<char>,
    position: usize,
    marked_position: usize,
}

impl CharacterCursor {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            position: 0,
            marked_position: 0,
        }
    }

    /// Next character, or `None` at end of input
    pub fn read(&mut self) -> Option<char> {
        let ch = self.chars.get(self.position).copied()?;
        self.position += 1;
        Some(ch)
    }

    /// Next character without consuming it
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.position).copied()
    }

    /// True while at least one character remains
    pub fn ready(&self) -> bool {
        self.position < self.chars.len()
    }

    /// Advance by up to `n` characters, stopping at the end. Returns the
    /// number actually skipped.
    pub fn skip(&mut self, n: usize) -> usize {
        let skipped = n.min(self.chars.len() - self.position);
        self.position += skipped;
        skipped
    }

    /// Remember the current position for a later `reset`
    pub fn mark(&mut self) {
        self.marked_position = self.position;
    }

    /// Return to the last marked position (the start if never marked)
    pub fn reset(&mut self) {
        self.position = self.marked_position.min(self.chars.len());
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}
