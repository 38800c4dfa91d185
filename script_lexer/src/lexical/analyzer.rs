//! Lexical analyzer driving the DFA over a character cursor
//!
//! The free functions in [`crate::lexical`] cover the pure entry points; the
//! [`LexicalAnalyzer`] adds runtime preferences, metrics and logging.

use super::cursor::CharacterCursor;
use super::dfa::{flush, LexicalDiagnostic, ScannerContext};
use crate::config::compile_time::lexical::MAX_DIAGNOSTICS;
use crate::config::runtime::LexicalPreferences;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::{log_debug, log_success, log_warning};
use std::collections::BTreeMap;

/// Lexical analysis errors (strict mode only)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Unrecognized character: {character:?} at line {line}, column {column}")]
    UnrecognizedCharacter {
        character: char,
        line: u32,
        column: u32,
    },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::UnrecognizedCharacter { .. } => codes::lexical::UNRECOGNIZED_CHARACTER,
        }
    }
}

impl From<&LexicalDiagnostic> for LexerError {
    fn from(diagnostic: &LexicalDiagnostic) -> Self {
        match diagnostic {
            LexicalDiagnostic::UnrecognizedCharacter {
                character,
                position,
            } => LexerError::UnrecognizedCharacter {
                character: *character,
                line: position.line,
                column: position.column,
            },
        }
    }
}

/// Run the scanner over `source` to completion
pub(crate) fn scan(source: &str, mut ctx: ScannerContext) -> ScannerContext {
    let mut cursor = CharacterCursor::new(source);
    while let Some(ch) = cursor.read() {
        ctx.feed(ch);
    }
    flush(&mut ctx);
    ctx
}

/// Tokens plus the diagnostics collected while producing them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexicalOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<LexicalDiagnostic>,
    /// Diagnostics dropped after `MAX_DIAGNOSTICS` was reached
    pub suppressed_diagnostics: usize,
}

impl LexicalOutput {
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// First diagnostic as a strict-mode error
    pub fn first_error(&self) -> Option<LexerError> {
        self.diagnostics.first().map(LexerError::from)
    }

    pub fn into_stream(self) -> TokenStream {
        TokenStream::new(self.tokens)
    }
}

/// Lexical analysis metrics
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub keyword_tokens: usize,
    pub identifier_tokens: usize,
    pub literal_tokens: usize,
    pub operator_tokens: usize,
    pub unrecognized_chars: usize,
    pub max_lexeme_length: usize,
    pub chars_scanned: usize,

    /// Per-kind counts, only when detailed metrics are enabled
    pub kind_counts: BTreeMap<TokenKind, usize>,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;
        self.max_lexeme_length = self.max_lexeme_length.max(token.text.chars().count());

        let kind = token.kind;
        if kind.is_keyword() {
            self.keyword_tokens += 1;
        } else if kind.is_operator() {
            self.operator_tokens += 1;
        } else if kind.is_literal() {
            self.literal_tokens += 1;
        } else {
            self.identifier_tokens += 1;
        }

        if preferences.collect_detailed_metrics {
            *self.kind_counts.entry(kind).or_insert(0) += 1;
        }
    }

    pub(crate) fn record_unrecognized(&mut self, count: usize) {
        self.unrecognized_chars += count;
    }
}

/// Configurable lexical analyzer with logging integration
pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Tokenize `source`, collecting diagnostics and metrics
    pub fn analyze(&mut self, source: &str) -> LexicalOutput {
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting lexical analysis",
            "char_count" => source.chars().count(),
            "max_diagnostics" => MAX_DIAGNOSTICS
        );

        let ctx = ScannerContext::new().with_reporting(self.preferences.report_unrecognized_characters);
        let (tokens, diagnostics, suppressed_diagnostics) = scan(source, ctx).into_parts();

        self.metrics.chars_scanned = source.chars().count();
        for token in &tokens {
            self.metrics.record_token(token, &self.preferences);
        }
        self.metrics
            .record_unrecognized(diagnostics.len() + suppressed_diagnostics);

        if self.preferences.log_unrecognized_characters {
            for diagnostic in &diagnostics {
                self.log_diagnostic(diagnostic);
            }
        }

        if suppressed_diagnostics > 0 {
            log_warning!(code = codes::lexical::DIAGNOSTIC_LIMIT_REACHED,
                "Diagnostic limit reached",
                "limit" => MAX_DIAGNOSTICS,
                "suppressed" => suppressed_diagnostics
            );
        }

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed",
            "token_count" => self.metrics.total_tokens,
            "keywords" => self.metrics.keyword_tokens,
            "identifiers" => self.metrics.identifier_tokens,
            "literals" => self.metrics.literal_tokens,
            "operators" => self.metrics.operator_tokens,
            "unrecognized_chars" => self.metrics.unrecognized_chars
        );

        LexicalOutput {
            tokens,
            diagnostics,
            suppressed_diagnostics,
        }
    }

    /// Tokenize `source`, failing on the first unrecognized character
    pub fn analyze_strict(&mut self, source: &str) -> Result<LexicalOutput, LexerError> {
        let reporting = self.preferences.report_unrecognized_characters;
        self.preferences.report_unrecognized_characters = true;
        let output = self.analyze(source);
        self.preferences.report_unrecognized_characters = reporting;

        match output.first_error() {
            Some(error) => Err(error),
            None => Ok(output),
        }
    }

    /// Tokenize a loaded source file, tagging log events with its path
    pub fn tokenize_file_result(&mut self, file_result: &FileProcessingResult) -> LexicalOutput {
        crate::logging::with_file_context(file_result.metadata.path.clone(), || {
            log_debug!("Tokenizing file",
                "size_bytes" => file_result.metadata.size,
                "lines" => file_result.metadata.line_count
            );
            self.analyze(&file_result.source)
        })
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }

    fn log_diagnostic(&self, diagnostic: &LexicalDiagnostic) {
        let position = diagnostic.position();
        if self.preferences.include_position_in_errors {
            log_warning!(code = diagnostic.error_code(), &diagnostic.to_string(),
                "line" => position.line,
                "column" => position.column
            );
        } else {
            log_warning!(code = diagnostic.error_code(), "Unrecognized character dropped");
        }
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;
    use assert_matches::assert_matches;

    fn preferences() -> LexicalPreferences {
        LexicalPreferences {
            report_unrecognized_characters: true,
            log_unrecognized_characters: false,
            collect_detailed_metrics: true,
            include_position_in_errors: true,
        }
    }

    #[test]
    fn test_analyze_collects_metrics() {
        let mut analyzer = LexicalAnalyzer::with_preferences(preferences());
        let output = analyzer.analyze("int age = 45;\nage >= 7");

        assert_eq!(output.tokens.len(), 7);
        assert_eq!(output.diagnostics.len(), 1);

        let metrics = analyzer.metrics();
        assert_eq!(metrics.total_tokens, 7);
        assert_eq!(metrics.keyword_tokens, 1);
        assert_eq!(metrics.identifier_tokens, 2);
        assert_eq!(metrics.literal_tokens, 2);
        assert_eq!(metrics.operator_tokens, 2);
        assert_eq!(metrics.unrecognized_chars, 1);
        assert_eq!(metrics.max_lexeme_length, 3);
        assert_eq!(metrics.chars_scanned, 22);
        assert_eq!(metrics.kind_counts.get(&TokenKind::Ge), Some(&1));
    }

    #[test]
    fn test_detailed_metrics_disabled() {
        let mut analyzer = LexicalAnalyzer::with_preferences(LexicalPreferences {
            collect_detailed_metrics: false,
            ..preferences()
        });
        analyzer.analyze("a = 1");

        assert_eq!(analyzer.metrics().total_tokens, 3);
        assert!(analyzer.metrics().kind_counts.is_empty());
    }

    #[test]
    fn test_reporting_disabled_keeps_tokens() {
        let mut analyzer = LexicalAnalyzer::with_preferences(LexicalPreferences {
            report_unrecognized_characters: false,
            ..preferences()
        });
        let output = analyzer.analyze("a;b");

        assert_eq!(output.tokens.len(), 2);
        assert!(!output.has_diagnostics());
    }

    #[test]
    fn test_analyze_strict() {
        let mut analyzer = LexicalAnalyzer::with_preferences(LexicalPreferences {
            report_unrecognized_characters: false,
            ..preferences()
        });

        let error = analyzer.analyze_strict("int x = 1;\ny = 2;").unwrap_err();
        assert_eq!(
            error,
            LexerError::UnrecognizedCharacter {
                character: ';',
                line: 1,
                column: 10
            }
        );
        assert_eq!(error.error_code(), codes::lexical::UNRECOGNIZED_CHARACTER);
        assert!(!analyzer.preferences().report_unrecognized_characters);

        let output = analyzer.analyze_strict("int x = 1").unwrap();
        assert_eq!(output.tokens.len(), 4);
    }

    #[test]
    fn test_output_first_error_and_stream() {
        let output = LexicalAnalyzer::new().analyze("a # b");
        assert_matches!(
            output.first_error(),
            Some(LexerError::UnrecognizedCharacter { character: '#', .. })
        );
        assert_eq!(
            output.diagnostics[0].position(),
            Position::new(2, 1, 3)
        );

        let stream = output.into_stream();
        assert_eq!(stream.len(), 2);
    }

    #[test]
    fn test_lexer_error_display() {
        let error = LexerError::UnrecognizedCharacter {
            character: '@',
            line: 3,
            column: 4,
        };
        assert_eq!(
            error.to_string(),
            "Unrecognized character: '@' at line 3, column 4"
        );
    }
}
