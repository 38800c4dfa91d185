//! DFA scanner core
//!
//! One character is applied per [`transition`]. A token is closed lazily by
//! the first character that cannot extend it; that character is then
//! dispatched by [`init_token`] as the start of the next token, so no input
//! character is ever lost or consumed twice.

use super::buffer::TokenBuffer;
use super::classify::{is_alpha, is_alphanumeric, is_blank, is_digit};
use super::keywords;
use crate::config::compile_time::lexical::MAX_DIAGNOSTICS;
use crate::logging::codes::{self, Code};
use crate::tokens::{Token, TokenKind};
use crate::utils::{Position, Span};
use serde::Serialize;
use std::fmt;

/// Scanner automaton states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DfaState {
    /// No token pending
    #[default]
    Initial,
    Id,
    /// Buffer holds the first `matched` characters of at least one keyword
    KeywordPrefix {
        matched: usize,
    },
    IntLiteral,
    Gt,
    Ge,
    Assignment,
}

/// Non-fatal findings recorded while scanning
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LexicalDiagnostic {
    /// A non-blank character that starts no token and was dropped
    UnrecognizedCharacter { character: char, position: Position },
}

impl LexicalDiagnostic {
    pub fn error_code(&self) -> Code {
        match self {
            Self::UnrecognizedCharacter { .. } => codes::lexical::UNRECOGNIZED_CHARACTER,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Self::UnrecognizedCharacter { position, .. } => *position,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::UnrecognizedCharacter {
                character,
                position,
            } => Span::of_char(*position, *character),
        }
    }
}

impl fmt::Display for LexicalDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnrecognizedCharacter {
                character,
                position,
            } => write!(
                f,
                "unrecognized character {:?} at line {}, column {}",
                character, position.line, position.column
            ),
        }
    }
}

/// Scan state for one tokenize call
#[derive(Debug, Clone)]
pub struct ScannerContext {
    state: DfaState,
    buffer: TokenBuffer,
    pending: Option<TokenKind>,
    tokens: Vec<Token>,
    diagnostics: Vec<LexicalDiagnostic>,
    suppressed_diagnostics: usize,
    report_unrecognized: bool,
    /// Position of the character currently being processed
    position: Position,
}

impl Default for ScannerContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ScannerContext {
    pub fn new() -> Self {
        Self {
            state: DfaState::Initial,
            buffer: TokenBuffer::new(),
            pending: None,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
            suppressed_diagnostics: 0,
            report_unrecognized: true,
            position: Position::start(),
        }
    }

    /// Enable or disable recording of unrecognized-character diagnostics
    pub fn with_reporting(mut self, enabled: bool) -> Self {
        self.report_unrecognized = enabled;
        self
    }

    /// Apply `ch` and move the source position past it
    pub fn feed(&mut self, ch: char) {
        transition(self, ch);
        self.position = self.position.advance(ch);
    }

    pub fn state(&self) -> DfaState {
        self.state
    }

    /// Lexeme scanned so far for the pending token
    pub fn pending_text(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn pending_kind(&self) -> Option<TokenKind> {
        self.pending
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn diagnostics(&self) -> &[LexicalDiagnostic] {
        &self.diagnostics
    }

    /// Diagnostics dropped after the configured limit was reached
    pub fn suppressed_diagnostics(&self) -> usize {
        self.suppressed_diagnostics
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn into_parts(self) -> (Vec<Token>, Vec<LexicalDiagnostic>, usize) {
        (self.tokens, self.diagnostics, self.suppressed_diagnostics)
    }

    fn begin(&mut self, kind: TokenKind, ch: char) {
        self.pending = Some(kind);
        self.buffer.push(ch);
    }

    fn emit_pending(&mut self) {
        let kind = self.pending.take();
        if self.buffer.is_empty() {
            return;
        }
        let text = self.buffer.take();
        if let Some(kind) = kind {
            self.tokens.push(Token { kind, text });
        }
    }

    fn record_unrecognized(&mut self, character: char) {
        if !self.report_unrecognized {
            return;
        }
        if self.diagnostics.len() >= MAX_DIAGNOSTICS {
            self.suppressed_diagnostics += 1;
            return;
        }
        self.diagnostics.push(LexicalDiagnostic::UnrecognizedCharacter {
            character,
            position: self.position,
        });
    }
}

/// Advance the automaton by one character
pub fn transition(ctx: &mut ScannerContext, ch: char) {
    let next = match ctx.state {
        DfaState::Initial => init_token(ctx, ch),
        DfaState::Id => {
            if is_alphanumeric(ch) {
                ctx.buffer.push(ch);
                DfaState::Id
            } else {
                init_token(ctx, ch)
            }
        }
        DfaState::KeywordPrefix { matched } => keyword_prefix_step(ctx, matched, ch),
        DfaState::IntLiteral => {
            if is_digit(ch) {
                ctx.buffer.push(ch);
                DfaState::IntLiteral
            } else {
                init_token(ctx, ch)
            }
        }
        DfaState::Gt => {
            if ch == '=' {
                ctx.pending = Some(TokenKind::Ge);
                ctx.buffer.push(ch);
                DfaState::Ge
            } else {
                init_token(ctx, ch)
            }
        }
        DfaState::Ge | DfaState::Assignment => init_token(ctx, ch),
    };
    ctx.state = next;
}

fn keyword_prefix_step(ctx: &mut ScannerContext, matched: usize, ch: char) -> DfaState {
    if keywords::extends_prefix(ctx.buffer.as_str(), ch) {
        ctx.buffer.push(ch);
        return DfaState::KeywordPrefix {
            matched: matched + 1,
        };
    }

    if is_alphanumeric(ch) {
        ctx.buffer.push(ch);
        return DfaState::Id;
    }

    if let Some(kind) = keywords::keyword_kind(ctx.buffer.as_str()) {
        ctx.pending = Some(kind);
    }
    init_token(ctx, ch)
}

/// Emit the pending token, if any, and start a new one at `ch`.
///
/// Blanks and characters that start no token are dropped and leave the
/// automaton in `Initial`; non-blank ones are recorded as diagnostics.
pub fn init_token(ctx: &mut ScannerContext, ch: char) -> DfaState {
    ctx.emit_pending();

    if is_alpha(ch) {
        ctx.begin(TokenKind::Identifier, ch);
        if keywords::starts_keyword(ch) {
            DfaState::KeywordPrefix { matched: 1 }
        } else {
            DfaState::Id
        }
    } else if is_digit(ch) {
        ctx.begin(TokenKind::IntLiteral, ch);
        DfaState::IntLiteral
    } else if ch == '=' {
        ctx.begin(TokenKind::Assignment, ch);
        DfaState::Assignment
    } else if ch == '>' {
        ctx.begin(TokenKind::Gt, ch);
        DfaState::Gt
    } else {
        if !is_blank(ch) {
            ctx.record_unrecognized(ch);
        }
        DfaState::Initial
    }
}

/// Close the pending token at end of input
pub fn flush(ctx: &mut ScannerContext) {
    if let DfaState::KeywordPrefix { .. } = ctx.state {
        if let Some(kind) = keywords::keyword_kind(ctx.buffer.as_str()) {
            ctx.pending = Some(kind);
        }
    }
    ctx.emit_pending();
    ctx.state = DfaState::Initial;
}
