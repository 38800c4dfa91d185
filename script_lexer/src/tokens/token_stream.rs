//! Positioned token reader for parser consumption
//!
//! The stream is a finished token sequence plus a cursor. Reading past the
//! end yields `None`; moving the cursor outside `0..=len` is rejected.

use crate::logging::codes::{self, Code};
use crate::tokens::token::{Token, TokenKind};

/// Errors raised by cursor movement and expectation checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenStreamError {
    #[error("Position {requested} is out of range for a stream of {len} tokens")]
    PositionOutOfRange { requested: usize, len: usize },

    #[error("Expected {expected}, found {found} '{text}' at token {position}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        text: String,
        position: usize,
    },

    #[error("Expected {expected}, but reached end of input")]
    UnexpectedEndOfStream { expected: TokenKind },
}

impl TokenStreamError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::PositionOutOfRange { .. } => codes::token_stream::POSITION_OUT_OF_RANGE,
            Self::UnexpectedToken { .. } => codes::token_stream::UNEXPECTED_TOKEN,
            Self::UnexpectedEndOfStream { .. } => codes::token_stream::UNEXPECTED_END_OF_STREAM,
        }
    }
}

/// Sequential access to a token sequence with one-token lookahead and
/// arbitrary repositioning
pub trait TokenReader {
    /// Token at the cursor, advancing past it. `None` at the end.
    fn read(&mut self) -> Option<&Token>;

    /// Token at the cursor without advancing
    fn peek(&self) -> Option<&Token>;

    /// Step back one token, saturating at 0
    fn unread(&mut self);

    /// Current cursor position
    fn position(&self) -> usize;

    /// Move the cursor to `position`, which must lie in `0..=len`
    fn set_position(&mut self, position: usize) -> Result<(), TokenStreamError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Peek `n` tokens past the cursor (`peek_ahead(0)` equals `peek()`)
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.position
            .checked_add(n)
            .and_then(|index| self.tokens.get(index))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn remaining_count(&self) -> usize {
        self.tokens.len().saturating_sub(self.position)
    }

    /// The whole sequence, independent of the cursor
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    // === PARSER INTEGRATION ===

    /// True if the token at the cursor has `kind`
    pub fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().map(|token| token.is(kind)).unwrap_or(false)
    }

    /// Advance if the token at the cursor has `kind`
    pub fn advance_if_kind(&mut self, kind: TokenKind) -> bool {
        if self.check_kind(kind) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or report what was found instead.
    /// The cursor does not move on error.
    pub fn expect_kind(&mut self, kind: TokenKind) -> Result<Token, TokenStreamError> {
        match self.tokens.get(self.position) {
            Some(token) if token.is(kind) => {
                self.position += 1;
                Ok(token.clone())
            }
            Some(token) => Err(TokenStreamError::UnexpectedToken {
                expected: kind,
                found: token.kind,
                text: token.text.clone(),
                position: self.position,
            }),
            None => Err(TokenStreamError::UnexpectedEndOfStream { expected: kind }),
        }
    }

    /// Short description of the cursor state for debugging
    pub fn diagnostic(&self) -> String {
        let current = self
            .peek()
            .map(|token| format!("{} '{}'", token.kind, token.text))
            .unwrap_or_else(|| "<EOF>".to_string());

        format!(
            "TokenStream(pos: {}/{}, current: {})",
            self.position,
            self.tokens.len(),
            current
        )
    }
}

impl TokenReader for TokenStream {
    fn read(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position)?;
        self.position += 1;
        Some(token)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn unread(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) -> Result<(), TokenStreamError> {
        if position > self.tokens.len() {
            crate::log_debug!("Rejected stream reposition",
                "requested" => position,
                "len" => self.tokens.len()
            );
            return Err(TokenStreamError::PositionOutOfRange {
                requested: position,
                len: self.tokens.len(),
            });
        }
        self.position = position;
        Ok(())
    }
}

impl From<Vec<Token>> for TokenStream {
    fn from(tokens: Vec<Token>) -> Self {
        Self::new(tokens)
    }
}
