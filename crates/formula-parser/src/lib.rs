// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Hand-written recursive descent parser for formulas
//!
//! Turns the token stream of [`formula_lexer`] into the untyped
//! [`formula_ast::Program`], reporting every malformed statement.

pub mod parser;

pub use parser::{ParseError, ParseErrorKind, parse_expr, parse_program};

// Re-export lexer
pub use formula_lexer::Token;
