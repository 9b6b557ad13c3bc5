//! Parse error types

use crate::span::Span;
use thiserror::Error;

/// Pattern parse error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Unexpected token
    #[error("unexpected token '{found}' at {}:{}, expected {expected}", span.start_line, span.start_column)]
    UnexpectedToken {
        found: String,
        expected: String,
        span: Span,
    },

    /// Unexpected end of input
    #[error("unexpected end of pattern at {}:{}, expected {expected}", span.start_line, span.start_column)]
    UnexpectedEof { expected: String, span: Span },

    /// Invalid escape sequence
    #[error("invalid escape sequence '{sequence}' at {}:{}", span.start_line, span.start_column)]
    InvalidEscape { sequence: String, span: Span },

    /// Unterminated string
    #[error("unterminated string literal starting at {}:{}", span.start_line, span.start_column)]
    UnterminatedString { span: Span },

    /// Invalid number literal
    #[error("invalid number literal '{literal}' at {}:{}", span.start_line, span.start_column)]
    InvalidNumber { literal: String, span: Span },

    /// Same field named twice in one record pattern
    #[error("duplicate field '{name}' in record pattern at {}:{}", span.start_line, span.start_column)]
    DuplicateField { name: String, span: Span },

    /// Lexer error
    #[error("unrecognized token at {}:{}", span.start_line, span.start_column)]
    LexerError { span: Span },
}

impl ParseError {
    pub fn span(&self) -> &Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::UnexpectedEof { span, .. }
            | ParseError::InvalidEscape { span, .. }
            | ParseError::UnterminatedString { span }
            | ParseError::InvalidNumber { span, .. }
            | ParseError::DuplicateField { span, .. }
            | ParseError::LexerError { span } => span,
        }
    }

    pub fn unexpected_token(
        found: impl Into<String>,
        expected: impl Into<String>,
        span: Span,
    ) -> Self {
        ParseError::UnexpectedToken {
            found: found.into(),
            expected: expected.into(),
            span,
        }
    }

    pub fn unexpected_eof(expected: impl Into<String>, span: Span) -> Self {
        ParseError::UnexpectedEof {
            expected: expected.into(),
            span,
        }
    }

    /// Format the error with a caret line under the offending source text
    pub fn format_with_context(&self, source: &str) -> String {
        let span = self.span();
        let Some(line) = source.lines().nth(span.start_line.saturating_sub(1)) else {
            return self.to_string();
        };
        let col = span.start_column.saturating_sub(1);
        let width = if span.start_line == span.end_line {
            span.end_column.saturating_sub(span.start_column).max(1)
        } else {
            1
        };
        let marker = "^".repeat(width.min(line.len().saturating_sub(col)).max(1));

        format!(
            "{}\n  {} | {}\n  {} | {}{}",
            self,
            span.start_line,
            line,
            " ".repeat(span.start_line.to_string().len()),
            " ".repeat(col),
            marker
        )
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::SourceMap;

    #[test]
    fn test_format_with_context_points_at_column() {
        let source = "(x Int, ?)";
        let span = SourceMap::new(source).span(8, 9);
        let err = ParseError::LexerError { span };

        let formatted = err.format_with_context(source);
        assert!(formatted.starts_with("unrecognized token at 1:9"));
        assert!(formatted.ends_with("  1 | (x Int, ?)\n    |         ^"));
    }
}
