//! Token model for the scripting language
//!
//! A token pairs a closed [`TokenKind`] with the exact lexeme that produced
//! it. Tokens are immutable once emitted by the scanner.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of token categories produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TokenKind {
    /// Letter followed by letters/digits that is not a keyword
    Identifier,
    /// Unsigned decimal integer
    IntLiteral,
    /// The `int` keyword
    Int,
    /// `=`
    Assignment,
    /// `>`
    #[serde(rename = "GT")]
    Gt,
    /// `>=`
    #[serde(rename = "GE")]
    Ge,
}

impl TokenKind {
    pub const ALL: [TokenKind; 6] = [
        TokenKind::Identifier,
        TokenKind::IntLiteral,
        TokenKind::Int,
        TokenKind::Assignment,
        TokenKind::Gt,
        TokenKind::Ge,
    ];

    /// Name used in output and serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::IntLiteral => "IntLiteral",
            TokenKind::Int => "Int",
            TokenKind::Assignment => "Assignment",
            TokenKind::Gt => "GT",
            TokenKind::Ge => "GE",
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(self, TokenKind::Int)
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, TokenKind::Assignment | TokenKind::Gt | TokenKind::Ge)
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, TokenKind::IntLiteral)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified lexeme
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}", self.kind, self.text)
    }
}
