//! Lexical analysis for the scripting language
//!
//! Source text is read one character at a time through a
//! [`CharacterCursor`] and fed to a deterministic automaton ([`dfa`]) that
//! assembles tokens with maximal munch. Unrecognized characters are dropped
//! and reported as diagnostics; default tokenization never fails.

pub mod analyzer;
pub mod buffer;
pub mod classify;
pub mod cursor;
pub mod dfa;
pub mod keywords;

use crate::config::runtime::LexicalPreferences;
use crate::tokens::{Token, TokenKind, TokenStream};

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics, LexicalOutput};
pub use buffer::TokenBuffer;
pub use classify::{is_alpha, is_alphanumeric, is_blank, is_digit};
pub use cursor::CharacterCursor;
pub use dfa::{flush, init_token, transition, DfaState, LexicalDiagnostic, ScannerContext};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize `code`. Pure and total: unrecognized characters are dropped.
pub fn tokenize(code: &str) -> Vec<Token> {
    let ctx = ScannerContext::new().with_reporting(false);
    let (tokens, _, _) = analyzer::scan(code, ctx).into_parts();
    tokens
}

/// Tokenize `code` into a stream positioned at the first token
pub fn tokenize_stream(code: &str) -> TokenStream {
    TokenStream::new(tokenize(code))
}

/// Tokenize `code`, failing on the first unrecognized non-blank character
pub fn tokenize_strict(code: &str) -> Result<Vec<Token>, LexerError> {
    let (tokens, diagnostics, _) = analyzer::scan(code, ScannerContext::new()).into_parts();
    match diagnostics.first() {
        Some(diagnostic) => Err(LexerError::from(diagnostic)),
        None => Ok(tokens),
    }
}

/// Tokenize `code` and return tokens together with diagnostics
pub fn tokenize_with_diagnostics(code: &str) -> LexicalOutput {
    let (tokens, diagnostics, suppressed_diagnostics) =
        analyzer::scan(code, ScannerContext::new()).into_parts();
    LexicalOutput {
        tokens,
        diagnostics,
        suppressed_diagnostics,
    }
}

/// Create a new lexical analyzer with default preferences
pub fn create_analyzer() -> LexicalAnalyzer {
    LexicalAnalyzer::new()
}

/// Create analyzer with custom runtime preferences
pub fn create_analyzer_with_preferences(preferences: LexicalPreferences) -> LexicalAnalyzer {
    LexicalAnalyzer::with_preferences(preferences)
}

// ============================================================================
// ANALYSIS HELPERS
// ============================================================================

/// Token distribution summary
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TokenCounts {
    pub total: usize,
    pub keywords: usize,
    pub identifiers: usize,
    pub literals: usize,
    pub operators: usize,
}

impl TokenCounts {
    /// True if any names or values were scanned
    pub fn has_content(&self) -> bool {
        self.keywords > 0 || self.identifiers > 0 || self.literals > 0
    }
}

pub fn get_token_counts(tokens: &[Token]) -> TokenCounts {
    let mut counts = TokenCounts::default();

    for token in tokens {
        counts.total += 1;
        match token.kind {
            TokenKind::Int => counts.keywords += 1,
            TokenKind::Identifier => counts.identifiers += 1,
            TokenKind::IntLiteral => counts.literals += 1,
            TokenKind::Assignment | TokenKind::Gt | TokenKind::Ge => counts.operators += 1,
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenReader;
    use assert_matches::assert_matches;

    fn kinds_and_text(tokens: &[Token]) -> Vec<(TokenKind, &str)> {
        tokens.iter().map(|t| (t.kind, t.text.as_str())).collect()
    }

    #[test]
    fn test_declaration() {
        let tokens = tokenize("int age = 45;");
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::Int, "int"),
                (TokenKind::Identifier, "age"),
                (TokenKind::Assignment, "="),
                (TokenKind::IntLiteral, "45"),
            ]
        );
    }

    #[test]
    fn test_keyword_prefix_identifier() {
        let tokens = tokenize("integer = 3");
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::Identifier, "integer"),
                (TokenKind::Assignment, "="),
                (TokenKind::IntLiteral, "3"),
            ]
        );
    }

    #[test]
    fn test_partial_keyword_prefixes() {
        let tokens = tokenize("i in int");
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::Identifier, "i"),
                (TokenKind::Identifier, "in"),
                (TokenKind::Int, "int"),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize_stream("").is_empty());
        assert_eq!(tokenize_strict(""), Ok(vec![]));
    }

    #[test]
    fn test_only_unrecognized_characters() {
        assert!(tokenize(";;;").is_empty());

        let output = tokenize_with_diagnostics(";;;");
        assert!(output.tokens.is_empty());
        assert_eq!(output.diagnostics.len(), 3);
        assert_eq!(output.diagnostics[2].position().column, 3);
    }

    #[test]
    fn test_greater_or_equal() {
        let tokens = tokenize("a>=b");
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::Identifier, "a"),
                (TokenKind::Ge, ">="),
                (TokenKind::Identifier, "b"),
            ]
        );
    }

    #[test]
    fn test_greater_than() {
        let tokens = tokenize("x > 1");
        assert_eq!(
            kinds_and_text(&tokens),
            vec![
                (TokenKind::Identifier, "x"),
                (TokenKind::Gt, ">"),
                (TokenKind::IntLiteral, "1"),
            ]
        );
    }

    #[test]
    fn test_keyword_adjacent_to_punctuation() {
        assert_eq!(
            kinds_and_text(&tokenize("int;int=int>")),
            vec![
                (TokenKind::Int, "int"),
                (TokenKind::Int, "int"),
                (TokenKind::Assignment, "="),
                (TokenKind::Int, "int"),
                (TokenKind::Gt, ">"),
            ]
        );
    }

    #[test]
    fn test_adjacent_literal_and_identifier() {
        assert_eq!(
            kinds_and_text(&tokenize("12ab")),
            vec![(TokenKind::IntLiteral, "12"), (TokenKind::Identifier, "ab")]
        );
    }

    #[test]
    fn test_operators_do_not_merge() {
        assert_eq!(
            kinds_and_text(&tokenize("==>>=")),
            vec![
                (TokenKind::Assignment, "="),
                (TokenKind::Assignment, "="),
                (TokenKind::Gt, ">"),
                (TokenKind::Ge, ">="),
            ]
        );
    }

    #[test]
    fn test_non_ascii_letters_are_dropped() {
        let output = tokenize_with_diagnostics("aéb");
        assert_eq!(
            kinds_and_text(&output.tokens),
            vec![(TokenKind::Identifier, "a"), (TokenKind::Identifier, "b")]
        );
        assert_matches!(
            output.diagnostics.as_slice(),
            [LexicalDiagnostic::UnrecognizedCharacter { character: 'é', .. }]
        );
    }

    #[test]
    fn test_tokenize_strict_reports_first_character() {
        assert_matches!(
            tokenize_strict("a = 1;\nb @ 2"),
            Err(LexerError::UnrecognizedCharacter {
                character: ';',
                line: 1,
                column: 6
            })
        );
        assert_eq!(tokenize_strict("a >= 1").map(|t| t.len()), Ok(3));
    }

    #[test]
    fn test_idempotence() {
        for input in ["int age = 45;", "i in int", "a>=b", "x\t=\r\n7", ""] {
            assert_eq!(tokenize(input), tokenize(input));
        }
    }

    #[test]
    fn test_maximal_munch() {
        let inputs = [
            "int age = 45;",
            "integer = 3",
            "i in int",
            "a>=b",
            "int;int>=x1 99y",
            "inx int0 in2t >>=",
        ];

        for input in inputs {
            let mut offset = 0;
            for token in tokenize(input) {
                let start = offset + input[offset..].find(&token.text).unwrap();
                offset = start + token.text.len();
                let next = input[offset..].chars().next();

                let extends = match token.kind {
                    TokenKind::Identifier | TokenKind::Int => {
                        next.map(is_alphanumeric).unwrap_or(false)
                    }
                    TokenKind::IntLiteral => next.map(is_digit).unwrap_or(false),
                    TokenKind::Gt => next == Some('='),
                    TokenKind::Assignment | TokenKind::Ge => false,
                };
                assert!(
                    !extends,
                    "{:?} in {:?} could be extended by {:?}",
                    token, input, next
                );
            }
        }
    }

    #[test]
    fn test_lexemes_are_well_formed() {
        for token in tokenize("int a1 = 007 >= b2c; i in integer > 3") {
            assert!(!token.text.is_empty());
            match token.kind {
                TokenKind::Identifier => {
                    assert!(token.text.starts_with(is_alpha));
                    assert!(token.text.chars().all(is_alphanumeric));
                    assert!(keywords::keyword_kind(&token.text).is_none());
                }
                TokenKind::IntLiteral => assert!(token.text.chars().all(is_digit)),
                TokenKind::Int => assert_eq!(token.text, "int"),
                TokenKind::Assignment => assert_eq!(token.text, "="),
                TokenKind::Gt => assert_eq!(token.text, ">"),
                TokenKind::Ge => assert_eq!(token.text, ">="),
            }
        }
    }

    #[test]
    fn test_no_character_lost_or_duplicated() {
        let input = "int a=1;b>=c\n>d 42";
        let kept: String = input
            .chars()
            .filter(|ch| is_alphanumeric(*ch) || *ch == '=' || *ch == '>')
            .collect();
        let emitted: String = tokenize(input).iter().map(|t| t.text.as_str()).collect();
        assert_eq!(emitted, kept);
    }

    #[test]
    fn test_stream_round_trip() {
        let tokens = tokenize("int age = 45;");
        let mut stream = tokenize_stream("int age = 45;");

        let mut read = Vec::new();
        while let Some(token) = stream.read() {
            read.push(token.clone());
        }
        assert_eq!(read, tokens);

        stream.unread();
        assert_eq!(stream.peek(), tokens.last());
    }

    #[test]
    fn test_get_token_counts() {
        let counts = get_token_counts(&tokenize("int age = 45; age >= 7"));
        assert_eq!(
            counts,
            TokenCounts {
                total: 7,
                keywords: 1,
                identifiers: 2,
                literals: 2,
                operators: 2,
            }
        );
        assert!(counts.has_content());
        assert!(!get_token_counts(&[]).has_content());
    }

    #[test]
    fn test_create_analyzer_with_preferences() {
        let analyzer = create_analyzer_with_preferences(LexicalPreferences {
            collect_detailed_metrics: false,
            ..Default::default()
        });
        assert!(!analyzer.preferences().collect_detailed_metrics);
        assert_eq!(create_analyzer().metrics().total_tokens, 0);
    }
}
