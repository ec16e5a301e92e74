//! Statement parser.
//!
//! A program is a `;`-separated list of statements. A statement is either an
//! assignment `a = expr` / `a, b = expr` or a bare expression.

use super::expr::parse_expr;
use super::{ParseError, TokenStream};
use formula_ast::{Program, Stmt, StmtKind, Target};
use formula_lexer::Token;

/// Parse every statement, recovering at the next `;` after an error.
pub fn parse_program(stream: &mut TokenStream) -> (Program, Vec<ParseError>) {
    let mut program = Program::default();
    let mut errors = Vec::new();

    while !stream.at_end() {
        if stream.check(&Token::Semicolon) {
            stream.advance();
            continue;
        }
        match parse_statement(stream) {
            Ok(stmt) => {
                program.body.push(stmt);
                if stream.check(&Token::Semicolon) {
                    stream.advance();
                }
            }
            Err(err) => {
                errors.push(err);
                stream.synchronize();
            }
        }
    }

    (program, errors)
}

fn parse_statement(stream: &mut TokenStream) -> Result<Stmt, ParseError> {
    let start = stream.current_pos();

    let kind = if is_assignment(stream) {
        let targets = parse_targets(stream)?;
        stream.expect(Token::Eq)?;
        let value = parse_expr(stream)?;
        StmtKind::Assign { targets, value }
    } else {
        StmtKind::Expr(parse_expr(stream)?)
    };

    if !stream.at_end() && !stream.check(&Token::Semicolon) {
        return Err(ParseError::unexpected_token(
            stream.peek(),
            "after statement, expected ';'",
            stream.current_span(),
        ));
    }

    Ok(Stmt {
        kind,
        span: stream.span_from(start),
    })
}

/// Lookahead for `name (, name)* =`.
fn is_assignment(stream: &TokenStream) -> bool {
    let mut n = 0;
    loop {
        if !matches!(stream.peek_nth(n), Some(Token::Ident(_))) {
            return false;
        }
        match stream.peek_nth(n + 1) {
            Some(Token::Comma) => n += 2,
            Some(Token::Eq) => return true,
            _ => return false,
        }
    }
}

fn parse_targets(stream: &mut TokenStream) -> Result<Vec<Target>, ParseError> {
    let mut targets = Vec::new();
    loop {
        let span = stream.current_span();
        match stream.advance() {
            Some(Token::Ident(name)) => targets.push(Target {
                name: name.to_string(),
                span,
            }),
            other => return Err(ParseError::unexpected_token(other, "as assignment target", span)),
        }
        if !stream.check(&Token::Comma) {
            return Ok(targets);
        }
        stream.advance();
    }
}
