//! Hand-written recursive descent parser for formulas.
//!
//! ## Architecture
//!
//! - `stream`: TokenStream wrapper with lookahead
//! - `error`: ParseError
//! - `expr`: Expression parser using Pratt parsing
//! - `stmt`: Statements and per-statement error recovery

mod error;
mod expr;
mod stmt;
mod stream;

pub use error::{ParseError, ParseErrorKind};
use stream::TokenStream;

use formula_ast::{Expr, Program};
use formula_lexer::Token;
use std::ops::Range;

/// Parse a token sequence with byte spans into a program.
///
/// Parsing never stops at the first error: a failed statement is skipped up
/// to the next `;` and the remaining statements are still parsed. The
/// returned program holds every statement that parsed cleanly.
pub fn parse_program(tokens: &[(Token, Range<usize>)], file_id: u16) -> (Program, Vec<ParseError>) {
    let mut stream = TokenStream::new(tokens, file_id);
    let (program, errors) = stmt::parse_program(&mut stream);
    tracing::debug!(
        statements = program.body.len(),
        errors = errors.len(),
        "parsed program"
    );
    (program, errors)
}

/// Parse a token sequence with byte spans into a single expression.
pub fn parse_expr(tokens: &[(Token, Range<usize>)], file_id: u16) -> Result<Expr, ParseError> {
    let mut stream = TokenStream::new(tokens, file_id);
    let expr = expr::parse_expr(&mut stream)?;
    if !stream.at_end() {
        return Err(ParseError::unexpected_token(
            stream.peek(),
            "after expression",
            stream.current_span(),
        ));
    }
    Ok(expr)
}
