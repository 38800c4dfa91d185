//! Reserved words and the prefix matcher that drives speculative keyword
//! scanning

use crate::tokens::TokenKind;

/// Reserved words and the token kind each one produces
pub const KEYWORDS: &[(&str, TokenKind)] = &[("int", TokenKind::Int)];

/// Token kind for `text` if it is exactly a keyword
pub fn keyword_kind(text: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(word, _)| *word == text)
        .map(|(_, kind)| *kind)
}

/// True if some keyword begins with `ch`
pub fn starts_keyword(ch: char) -> bool {
    KEYWORDS.iter().any(|(word, _)| word.starts_with(ch))
}

/// True if `prefix` followed by `ch` is still a prefix of some keyword
pub fn extends_prefix(prefix: &str, ch: char) -> bool {
    KEYWORDS.iter().any(|(word, _)| {
        word.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            == Some(ch)
    })
}
