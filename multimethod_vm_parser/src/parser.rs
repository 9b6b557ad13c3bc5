//! Recursive descent parser for pattern syntax
//!
//! ```text
//! composite  := FIELD variable (',' FIELD variable)*
//!             | variable (',' variable)*
//! variable   := NAME [annotation]        (lowercase or '_' names)
//!             | value
//! annotation := NAME                     (capitalized: a type test)
//!             | '(' composite ')'
//! value      := '(' composite ')' | '(' ')' | literal | NAME
//! ```
//!
//! Lowercase names bind variables; capitalized names are expressions. A
//! capitalized name on its own is therefore a value pattern that matches the
//! class object itself, while `_ Int` tests the argument's class.

use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, SpannedToken};
use crate::span::Span;
use crate::syntax::{ExprSyntax, PatternSyntax, PatternSyntaxKind};
use crate::token::Token;

/// Pattern parser
#[derive(Debug)]
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// Current token (not yet consumed)
    current: Option<SpannedToken<'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> ParseResult<Self> {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token().transpose()?;
        Ok(Self { lexer, current })
    }

    /// Parse a complete pattern; trailing tokens are an error.
    pub fn parse(mut self) -> ParseResult<PatternSyntax> {
        let pattern = self.parse_composite()?;
        if let Some(token) = &self.current {
            return Err(ParseError::unexpected_token(
                token.text,
                "end of pattern",
                token.span,
            ));
        }
        Ok(pattern)
    }

    // ==================== Token Management ====================

    fn advance(&mut self) -> ParseResult<Option<SpannedToken<'a>>> {
        let next = self.lexer.next_token().transpose()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn check(&self, expected: Token) -> bool {
        self.current
            .as_ref()
            .is_some_and(|t| t.token == expected)
    }

    fn match_token(&mut self, expected: Token) -> ParseResult<bool> {
        if self.check(expected) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, expected: Token) -> ParseResult<SpannedToken<'a>> {
        match self.advance()? {
            Some(token) if token.token == expected => Ok(token),
            Some(token) => Err(ParseError::unexpected_token(
                token.text,
                expected.describe(),
                token.span,
            )),
            None => Err(ParseError::unexpected_eof(
                expected.describe(),
                self.lexer.eof_span(),
            )),
        }
    }

    fn error_here(&self, expected: &str) -> ParseError {
        match &self.current {
            Some(token) => ParseError::unexpected_token(token.text, expected, token.span),
            None => ParseError::unexpected_eof(expected, self.lexer.eof_span()),
        }
    }

    /// True if the current token is a name that binds a variable
    fn at_binding_name(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|t| t.token == Token::Name && is_binding_name(t.text))
    }

    /// True if the current token is a capitalized name
    fn at_class_name(&self) -> bool {
        self.current
            .as_ref()
            .is_some_and(|t| t.token == Token::Name && !is_binding_name(t.text))
    }

    // ==================== Grammar ====================

    fn parse_composite(&mut self) -> ParseResult<PatternSyntax> {
        if self.check(Token::Field) {
            return self.parse_record();
        }

        let first = self.parse_variable()?;
        if !self.check(Token::Comma) {
            return Ok(first);
        }

        let mut span = first.span;
        let mut elements = vec![first];
        while self.match_token(Token::Comma)? {
            let element = self.parse_variable()?;
            span = span.merge(&element.span);
            elements.push(element);
        }
        Ok(PatternSyntax::new(PatternSyntaxKind::Tuple(elements), span))
    }

    fn parse_record(&mut self) -> ParseResult<PatternSyntax> {
        let mut fields: Vec<(String, PatternSyntax)> = Vec::new();
        let mut span: Option<Span> = None;

        loop {
            let label = self.expect(Token::Field)?;
            let name = label.text.trim_end_matches(':').to_string();
            if fields.iter().any(|(existing, _)| *existing == name) {
                return Err(ParseError::DuplicateField {
                    name,
                    span: label.span,
                });
            }
            let pattern = self.parse_variable()?;
            let field_span = label.span.merge(&pattern.span);
            span = Some(span.map_or(field_span, |s| s.merge(&field_span)));
            fields.push((name, pattern));

            if !self.match_token(Token::Comma)? {
                break;
            }
        }

        Ok(PatternSyntax::new(
            PatternSyntaxKind::Record(fields),
            span.unwrap_or_default(),
        ))
    }

    fn parse_variable(&mut self) -> ParseResult<PatternSyntax> {
        if !self.at_binding_name() {
            return self.parse_value();
        }

        let Some(name_token) = self.advance()? else {
            return Err(ParseError::unexpected_eof("name", self.lexer.eof_span()));
        };
        let annotation = self.parse_annotation()?;

        // `_` discards the binding, leaving just the annotation (if any).
        if name_token.text == "_" {
            return Ok(match annotation {
                Some(inner) => {
                    let span = name_token.span.merge(&inner.span);
                    PatternSyntax::new(inner.kind, span)
                }
                None => PatternSyntax::new(PatternSyntaxKind::Wildcard, name_token.span),
            });
        }

        let span = annotation
            .as_ref()
            .map_or(name_token.span, |inner| name_token.span.merge(&inner.span));
        Ok(PatternSyntax::new(
            PatternSyntaxKind::Variable {
                name: name_token.text.to_string(),
                inner: annotation.map(Box::new),
            },
            span,
        ))
    }

    fn parse_annotation(&mut self) -> ParseResult<Option<PatternSyntax>> {
        if self.at_class_name() {
            let Some(class) = self.advance()? else {
                return Ok(None);
            };
            return Ok(Some(PatternSyntax::new(
                PatternSyntaxKind::TypeTest(ExprSyntax::Name(class.text.to_string())),
                class.span,
            )));
        }

        if self.check(Token::LParen) {
            return self.parse_parenthesized().map(Some);
        }

        Ok(None)
    }

    fn parse_parenthesized(&mut self) -> ParseResult<PatternSyntax> {
        let open = self.expect(Token::LParen)?;
        if self.check(Token::RParen) {
            let close = self.expect(Token::RParen)?;
            return Ok(PatternSyntax::new(
                PatternSyntaxKind::Value(ExprSyntax::Nothing),
                open.span.merge(&close.span),
            ));
        }

        let inner = self.parse_composite()?;
        let close = self.expect(Token::RParen)?;
        Ok(PatternSyntax::new(inner.kind, open.span.merge(&close.span)))
    }

    fn parse_value(&mut self) -> ParseResult<PatternSyntax> {
        if self.check(Token::LParen) {
            return self.parse_parenthesized();
        }

        let (expr, span) = self.parse_literal()?;
        Ok(PatternSyntax::new(PatternSyntaxKind::Value(expr), span))
    }

    fn parse_literal(&mut self) -> ParseResult<(ExprSyntax, Span)> {
        let Some(token) = self.current.clone() else {
            return Err(self.error_here("pattern"));
        };

        let expr = match token.token {
            Token::True => ExprSyntax::Bool(true),
            Token::False => ExprSyntax::Bool(false),
            Token::Nothing => ExprSyntax::Nothing,
            Token::Int => parse_int(token.text, &token)?,
            Token::Float => parse_float(token.text, &token)?,
            Token::DoubleQuote => ExprSyntax::Str(unescape(&token)?),
            Token::Name => ExprSyntax::Name(token.text.to_string()),
            Token::Minus => {
                self.advance()?;
                let Some(number) = self.current.clone() else {
                    return Err(self.error_here("number"));
                };
                let negated = format!("-{}", number.text);
                let expr = match number.token {
                    Token::Int => parse_int(&negated, &number)?,
                    Token::Float => parse_float(&negated, &number)?,
                    _ => return Err(self.error_here("number")),
                };
                self.advance()?;
                return Ok((expr, token.span.merge(&number.span)));
            }
            _ => return Err(self.error_here("pattern")),
        };

        self.advance()?;
        Ok((expr, token.span))
    }
}

/// Lowercase names and names starting with `_` bind variables
fn is_binding_name(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|c| c == '_' || c.is_ascii_lowercase())
}

fn parse_int(text: &str, token: &SpannedToken<'_>) -> ParseResult<ExprSyntax> {
    text.parse::<i64>()
        .map(ExprSyntax::Int)
        .map_err(|_| ParseError::InvalidNumber {
            literal: text.to_string(),
            span: token.span,
        })
}

fn parse_float(text: &str, token: &SpannedToken<'_>) -> ParseResult<ExprSyntax> {
    text.parse::<f64>()
        .map(ExprSyntax::Float)
        .map_err(|_| ParseError::InvalidNumber {
            literal: text.to_string(),
            span: token.span,
        })
}

fn unescape(token: &SpannedToken<'_>) -> ParseResult<String> {
    let body = &token.text[1..token.text.len() - 1];
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            other => {
                return Err(ParseError::InvalidEscape {
                    sequence: other.map_or_else(|| "\\".to_string(), |c| format!("\\{}", c)),
                    span: token.span,
                })
            }
        }
    }

    Ok(out)
}
