//! Character classification predicates used by the scanner.
//! Only ASCII letters and digits take part in identifiers and literals.

pub fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic()
}

pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

pub fn is_alphanumeric(ch: char) -> bool {
    is_alpha(ch) || is_digit(ch)
}

/// Whitespace that separates tokens silently
pub fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}
