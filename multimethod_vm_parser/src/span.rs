//! Span information for source locations
//!
//! Tracks byte offsets plus 1-indexed line/column pairs so that pattern
//! errors can point at the offending text.

use serde::{Deserialize, Serialize};

/// A region of pattern source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset start (0-indexed)
    pub start: usize,
    /// Byte offset end (exclusive)
    pub end: usize,
    /// Line number (1-indexed)
    pub start_line: usize,
    /// Line number (1-indexed)
    pub end_line: usize,
    /// Column (1-indexed, in bytes)
    pub start_column: usize,
    /// Column (1-indexed, in bytes)
    pub end_column: usize,
}

impl Span {
    /// Merge two spans into one that covers both
    pub fn merge(&self, other: &Span) -> Span {
        let (start_line, start_column) = if self.start <= other.start {
            (self.start_line, self.start_column)
        } else {
            (other.start_line, other.start_column)
        };
        let (end_line, end_column) = if self.end >= other.end {
            (self.end_line, self.end_column)
        } else {
            (other.end_line, other.end_column)
        };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            start_line,
            end_line,
            start_column,
            end_column,
        }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Line start table used to turn byte offsets into line/column pairs
#[derive(Debug, Clone)]
pub struct SourceMap {
    line_starts: Vec<usize>,
}

impl SourceMap {
    pub fn new(source: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, c) in source.char_indices() {
            if c == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Get the 1-indexed line and column for a byte offset
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(line) => line.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        (line + 1, offset - line_start + 1)
    }

    /// Create a span with line/column information
    pub fn span(&self, start: usize, end: usize) -> Span {
        let (start_line, start_column) = self.line_col(start);
        let (end_line, end_column) = self.line_col(end);
        Span {
            start,
            end,
            start_line,
            end_line,
            start_column,
            end_column,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col_across_lines() {
        let map = SourceMap::new("(a: x,\n b: y)");

        assert_eq!(map.line_col(0), (1, 1));
        assert_eq!(map.line_col(6), (1, 7));
        assert_eq!(map.line_col(7), (2, 1));
        assert_eq!(map.line_col(8), (2, 2));
    }

    #[test]
    fn test_span_merge_keeps_outer_positions() {
        let map = SourceMap::new("left, right");
        let merged = map.span(0, 4).merge(&map.span(6, 11));

        assert_eq!(merged.start, 0);
        assert_eq!(merged.end, 11);
        assert_eq!(merged.start_column, 1);
        assert_eq!(merged.end_column, 12);
        assert_eq!(merged.len(), 11);
    }
}
