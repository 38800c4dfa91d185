//! Source location tracking
//!
//! Positions are advanced one character at a time while scanning so that
//! diagnostics can point at the exact character that was dropped.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in source text with line, column, and byte offset.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset from start of input (0-based)
    pub offset: usize,
    /// Line number (1-based)
    pub line: u32,
    /// Column number (1-based)
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Offset 0, line 1, column 1
    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Position just after `ch`. Every character, tab included, is one column.
    pub fn advance(self, ch: char) -> Self {
        let offset = self.offset + ch.len_utf8();
        match ch {
            '\n' => Self::new(offset, self.line + 1, 1),
            _ => Self::new(offset, self.line, self.column + 1),
        }
    }

    /// Advance position by a string
    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, |pos, ch| pos.advance(ch))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source text from start (inclusive) to end (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(
            start.offset <= end.offset,
            "Span start must not be after end"
        );
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// Span covering the single character `ch` at `pos`
    pub fn of_char(pos: Position, ch: char) -> Self {
        Self {
            start: pos,
            end: pos.advance(ch),
        }
    }

    /// Create a single-column span
    pub fn single(pos: Position) -> Self {
        let end = Position {
            offset: pos.offset + 1,
            line: pos.line,
            column: pos.column + 1,
        };
        Self { start: pos, end }
    }

    /// Byte length of this span
    pub fn len(&self) -> usize {
        self.end.offset - self.start.offset
    }

    pub fn is_empty(&self) -> bool {
        self.start.offset == self.end.offset
    }

    /// Get the source text for this span from the input
    pub fn slice<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start.offset..self.end.offset]
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// A source map that tracks line starts for position lookup and error
/// rendering
#[derive(Debug, Clone)]
pub struct SourceMap {
    pub source: String,
    /// Byte offsets of line starts
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: String) -> Self {
        let mut line_starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(offset + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Get a line of text by line number (1-based), without its terminator
    pub fn get_line(&self, line_num: u32) -> Option<&str> {
        let line_idx = (line_num as usize).checked_sub(1)?;
        let start = *self.line_starts.get(line_idx)?;
        let end = self
            .line_starts
            .get(line_idx + 1)
            .map(|next| next - 1)
            .unwrap_or(self.source.len());

        Some(self.source[start..end].trim_end_matches('\r'))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Format an error message with source context
    pub fn format_error(&self, span: &Span, message: &str) -> String {
        let mut result = String::new();

        result.push_str(&format!("error: {}\n", message));
        result.push_str(&format!(
            "  --> {}:{}\n",
            span.start.line, span.start.column
        ));

        if let Some(line) = self.get_line(span.start.line) {
            let line_num_str = span.start.line.to_string();
            let padding = " ".repeat(line_num_str.len());

            result.push_str(&format!("{} |\n", padding));
            result.push_str(&format!("{} | {}\n", line_num_str, line));

            let span_len = if span.start.line == span.end.line {
                span.end.column.saturating_sub(span.start.column) as usize
            } else {
                1
            };

            // Tabs are echoed so the caret lines up under the printed line
            let lead: String = line
                .chars()
                .take(span.start.column.saturating_sub(1) as usize)
                .map(|ch| if ch == '\t' { '\t' } else { ' ' })
                .collect();

            result.push_str(&format!(
                "{} | {}{}\n",
                padding,
                lead,
                "^".repeat(span_len.max(1))
            ));
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance() {
        let pos = Position::start().advance('a');
        assert_eq!(pos, Position::new(1, 1, 2));

        let pos = pos.advance('\n');
        assert_eq!(pos, Position::new(2, 2, 1));

        let pos = pos.advance('\t');
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_position_advance_multibyte() {
        let pos = Position::start().advance('é');
        assert_eq!(pos.offset, 2);
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_span_of_char() {
        let pos = Position::start().advance_str("int ");
        let span = Span::of_char(pos, ';');
        assert_eq!(span.len(), 1);
        assert_eq!(span.slice("int ;"), ";");
        assert_eq!(span.to_string(), "1:5-6");
    }

    #[test]
    fn test_source_map_lines() {
        let map = SourceMap::new("int a = 1;\r\nb >= 2\n".to_string());
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.get_line(1), Some("int a = 1;"));
        assert_eq!(map.get_line(2), Some("b >= 2"));
        assert_eq!(map.get_line(3), Some(""));
        assert_eq!(map.get_line(0), None);
        assert_eq!(map.get_line(4), None);
    }

    #[test]
    fn test_format_error_after_tab() {
        let map = SourceMap::new("a\t;".to_string());
        let pos = Position::start().advance_str("a\t");
        let rendered = map.format_error(&Span::of_char(pos, ';'), "unrecognized character ';'");

        assert!(rendered.contains("--> 1:3"));
        assert!(rendered.contains("1 | a\t;\n"));
        assert!(rendered.ends_with("  |  \t^\n"));
    }

    #[test]
    fn test_format_error() {
        let map = SourceMap::new("int a = 4#5;".to_string());
        let pos = Position::start().advance_str("int a = 4");
        let rendered = map.format_error(&Span::of_char(pos, '#'), "unrecognized character '#'");

        assert!(rendered.starts_with("error: unrecognized character '#'"));
        assert!(rendered.contains("--> 1:10"));
        assert!(rendered.contains("1 | int a = 4#5;"));
        assert!(rendered.ends_with(&format!("  | {}^\n", " ".repeat(9))));
    }
}
