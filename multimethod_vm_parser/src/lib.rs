//! multimethod_vm_parser
//!
//! Parser for the pattern syntax used to declare multimethod signatures,
//! e.g. when registering native functions.
//!
//! # Example
//!
//! ```
//! use multimethod_vm_parser::{parse_pattern, PatternSyntaxKind};
//!
//! let pattern = parse_pattern("(left Int, right Int)").unwrap();
//! assert!(matches!(pattern.kind, PatternSyntaxKind::Tuple(_)));
//! assert_eq!(pattern.to_string(), "(left Int, right Int)");
//! ```

pub mod error;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod syntax;
pub mod token;

// Re-exports
pub use error::{ParseError, ParseResult};
pub use lexer::{tokenize, Lexer, SpannedToken};
pub use parser::Parser;
pub use span::{SourceMap, Span};
pub use syntax::{ExprSyntax, PatternSyntax, PatternSyntaxKind};
pub use token::Token;

/// Parse pattern source text into a syntax tree
pub fn parse_pattern(source: &str) -> ParseResult<PatternSyntax> {
    Parser::new(source)?.parse()
}

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
