//! Shared source-location types used by the lexer and its diagnostics

pub mod span;

pub use span::{Position, SourceMap, Span};
