/// Accumulator for the lexeme of the token being scanned.
///
/// Empty means no token is pending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenBuffer {
    text: String,
}

impl TokenBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
    }

    /// Move the lexeme out, leaving the buffer empty
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_take() {
        let mut buffer = TokenBuffer::new();
        assert!(buffer.is_empty());

        buffer.push('a');
        buffer.push('1');
        assert_eq!(buffer.as_str(), "a1");

        assert_eq!(buffer.take(), "a1");
        assert!(buffer.is_empty());
        assert_eq!(buffer.as_str(), "");
    }
}
