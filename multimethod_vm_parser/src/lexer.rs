//! Lexer for pattern source text
//!
//! Wraps the logos-generated lexer, adding span line/column tracking and
//! string literal scanning.

use logos::Logos;

use crate::error::{ParseError, ParseResult};
use crate::span::{SourceMap, Span};
use crate::token::Token;

/// A token with its span
#[derive(Debug, Clone)]
pub struct SpannedToken<'a> {
    pub token: Token,
    pub span: Span,
    pub text: &'a str,
}

impl<'a> SpannedToken<'a> {
    pub fn new(token: Token, span: Span, text: &'a str) -> Self {
        Self { token, span, text }
    }
}

/// Pattern lexer
pub struct Lexer<'a> {
    source: &'a str,
    inner: logos::Lexer<'a, Token>,
    source_map: SourceMap,
    /// Peeked token (for lookahead)
    peeked: Option<ParseResult<SpannedToken<'a>>>,
}

impl std::fmt::Debug for Lexer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("position", &self.inner.span().end)
            .field("len", &self.source.len())
            .finish()
    }
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            inner: Token::lexer(source),
            source_map: SourceMap::new(source),
            peeked: None,
        }
    }

    pub fn source_map(&self) -> &SourceMap {
        &self.source_map
    }

    /// Span covering the end of input, used for EOF errors
    pub fn eof_span(&self) -> Span {
        self.source_map.span(self.source.len(), self.source.len())
    }

    /// Peek at the next token without consuming it
    pub fn peek(&mut self) -> Option<&ParseResult<SpannedToken<'a>>> {
        if self.peeked.is_none() {
            self.peeked = self.next_token_internal();
        }
        self.peeked.as_ref()
    }

    /// Get the next token
    pub fn next_token(&mut self) -> Option<ParseResult<SpannedToken<'a>>> {
        if let Some(peeked) = self.peeked.take() {
            return Some(peeked);
        }
        self.next_token_internal()
    }

    fn next_token_internal(&mut self) -> Option<ParseResult<SpannedToken<'a>>> {
        let result = self.inner.next()?;
        let range = self.inner.span();

        match result {
            Ok(Token::DoubleQuote) => match self.scan_string_to_close(range.end) {
                Ok(string_end) => {
                    self.inner.bump(string_end - range.end);
                    let span = self.source_map.span(range.start, string_end);
                    let text = &self.source[range.start..string_end];
                    Some(Ok(SpannedToken::new(Token::DoubleQuote, span, text)))
                }
                Err(e) => {
                    // Nothing after an unterminated string can be tokenized sensibly.
                    self.inner.bump(self.source.len() - range.end);
                    Some(Err(e))
                }
            },
            Ok(token) => {
                let span = self.source_map.span(range.start, range.end);
                Some(Ok(SpannedToken::new(token, span, &self.source[range])))
            }
            Err(()) => {
                let span = self.source_map.span(range.start, range.end);
                Some(Err(ParseError::LexerError { span }))
            }
        }
    }

    /// Scan string content to find the byte offset just past the closing quote.
    fn scan_string_to_close(&self, start: usize) -> ParseResult<usize> {
        let bytes = self.source.as_bytes();
        let mut pos = start;

        while pos < bytes.len() {
            match memchr::memchr2(b'\\', b'"', &bytes[pos..]) {
                None => break,
                Some(offset) => {
                    pos += offset;
                    if bytes[pos] == b'\\' {
                        pos += 2;
                        continue;
                    }
                    return Ok(pos + 1);
                }
            }
        }

        Err(ParseError::UnterminatedString {
            span: self.source_map.span(start - 1, bytes.len()),
        })
    }
}

/// Tokenize pattern source text
pub fn tokenize(source: &str) -> Vec<ParseResult<SpannedToken<'_>>> {
    let mut lexer = Lexer::new(source);
    std::iter::from_fn(|| lexer.next_token()).collect()
}
