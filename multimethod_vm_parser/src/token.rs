//! Token definitions for the pattern lexer

use logos::Logos;

/// Pattern tokens
///
/// String literals are recognised by their opening quote only; the lexer
/// wrapper scans to the closing quote itself so escapes are handled in one
/// place.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // ==================== Keywords ====================
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("nothing")]
    Nothing,

    // ==================== Delimiters ====================
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token("-")]
    Minus,
    #[token("\"")]
    DoubleQuote,

    // ==================== Names ====================
    /// A record field label, including its trailing colon (`name:`)
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*:")]
    Field,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Name,

    // ==================== Numbers ====================
    #[regex(r"[0-9]+\.[0-9]+")]
    Float,
    #[regex(r"[0-9]+")]
    Int,
}

impl Token {
    /// Human-readable description used in "expected ..." messages
    pub fn describe(&self) -> &'static str {
        match self {
            Token::True => "'true'",
            Token::False => "'false'",
            Token::Nothing => "'nothing'",
            Token::LParen => "'('",
            Token::RParen => "')'",
            Token::Comma => "','",
            Token::Minus => "'-'",
            Token::DoubleQuote => "string literal",
            Token::Field => "field label",
            Token::Name => "name",
            Token::Float => "float literal",
            Token::Int => "integer literal",
        }
    }
}
