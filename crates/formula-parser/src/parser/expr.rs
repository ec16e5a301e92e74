//! Expression parser using Pratt parsing (precedence climbing).
//!
//! ## Precedence Levels (lowest to highest)
//!
//! 1. `or` - left associative
//! 2. `and` - left associative
//! 3. `not` - prefix
//! 4. `==`, `!=`, `<`, `<=`, `>`, `>=` (Comparison) - left associative
//! 5. `+`, `-` (Addition) - left associative
//! 6. `*`, `/`, `%` (Multiplication) - left associative
//! 7. Unary `-` - prefix
//! 8. `^` (Power) - right associative
//! 9. Calls `f(args)`, parentheses and vector literals `(x, y, z)`

use super::{ParseError, TokenStream};
use formula_ast::foundation::Value;
use formula_ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use formula_lexer::Token;

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assoc {
    Left,
    Right,
}

/// Get binary operator metadata (precedence, associativity, and operator enum).
///
/// Higher precedence binds tighter.
fn binary_op_info(token: &Token) -> Option<(u8, Assoc, BinaryOp)> {
    match token {
        Token::Or => Some((10, Assoc::Left, BinaryOp::Or)),
        Token::And => Some((20, Assoc::Left, BinaryOp::And)),
        Token::EqEq => Some((30, Assoc::Left, BinaryOp::Eq)),
        Token::BangEq => Some((30, Assoc::Left, BinaryOp::Ne)),
        Token::Lt => Some((30, Assoc::Left, BinaryOp::Lt)),
        Token::LtEq => Some((30, Assoc::Left, BinaryOp::Le)),
        Token::Gt => Some((30, Assoc::Left, BinaryOp::Gt)),
        Token::GtEq => Some((30, Assoc::Left, BinaryOp::Ge)),
        Token::Plus => Some((40, Assoc::Left, BinaryOp::Add)),
        Token::Minus => Some((40, Assoc::Left, BinaryOp::Sub)),
        Token::Star => Some((50, Assoc::Left, BinaryOp::Mul)),
        Token::Slash => Some((50, Assoc::Left, BinaryOp::Div)),
        Token::Percent => Some((50, Assoc::Left, BinaryOp::Mod)),
        Token::Caret => Some((60, Assoc::Right, BinaryOp::Pow)),
        _ => None,
    }
}

/// Operand precedence of prefix operators.
fn unary_op_info(token: &Token) -> Option<(u8, UnaryOp)> {
    match token {
        Token::Not => Some((25, UnaryOp::Not)),
        Token::Minus => Some((55, UnaryOp::Neg)),
        _ => None,
    }
}

/// Parse an expression.
pub fn parse_expr(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    parse_pratt(stream, 0)
}

fn parse_pratt(stream: &mut TokenStream, min_prec: u8) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let mut left = parse_prefix(stream)?;

    while let Some((prec, assoc, op)) = stream.peek().and_then(binary_op_info) {
        if prec < min_prec {
            break;
        }
        stream.advance();

        let next_prec = if assoc == Assoc::Left { prec + 1 } else { prec };
        let right = parse_pratt(stream, next_prec)?;

        left = Expr::new(
            ExprKind::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            stream.span_from(start),
        );
    }

    Ok(left)
}

fn parse_prefix(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let Some((prec, op)) = stream.peek().and_then(unary_op_info) else {
        return parse_atom(stream);
    };
    let start = stream.current_pos();
    stream.advance();

    let operand = parse_pratt(stream, prec)?;
    Ok(Expr::new(
        ExprKind::Unary {
            op,
            operand: Box::new(operand),
        },
        stream.span_from(start),
    ))
}

/// Parse atomic expressions (literals, names, calls, parentheses).
fn parse_atom(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    let span = stream.current_span();

    let literal = match stream.peek() {
        Some(Token::True) => Value::Bool(true),
        Some(Token::False) => Value::Bool(false),
        Some(Token::Integer(n)) => Value::Int(*n),
        Some(Token::Float(x)) => Value::Float(*x),
        Some(Token::Ident(name)) => {
            stream.advance();
            if stream.check(&Token::LParen) {
                let args = parse_call_args(stream)?;
                return Ok(Expr::new(
                    ExprKind::Call {
                        name: name.to_string(),
                        args,
                    },
                    stream.span_from(start),
                ));
            }
            return Ok(Expr::new(ExprKind::Name(name.to_string()), span));
        }
        Some(Token::LParen) => return parse_parenthesized(stream),
        other => return Err(ParseError::unexpected_token(other, "in expression", span)),
    };

    stream.advance();
    Ok(Expr::new(ExprKind::Literal(literal), span))
}

/// Parse function call arguments.
fn parse_call_args(stream: &mut TokenStream) -> Result<Vec<Expr>, ParseError> {
    stream.expect(Token::LParen)?;

    let mut args = Vec::new();
    while !stream.check(&Token::RParen) {
        args.push(parse_expr(stream)?);

        if !stream.check(&Token::RParen) {
            stream.expect(Token::Comma)?;
        }
    }

    stream.expect(Token::RParen)?;
    Ok(args)
}

/// Parse `(expr)` or the vector literal `(x, y, z)`.
fn parse_parenthesized(stream: &mut TokenStream) -> Result<Expr, ParseError> {
    let start = stream.current_pos();
    stream.expect(Token::LParen)?;
    if stream.check(&Token::RParen) {
        stream.advance();
        return Err(ParseError::invalid_syntax(
            "empty parentheses",
            stream.span_from(start),
        ));
    }

    let first = parse_expr(stream)?;
    if !stream.check(&Token::Comma) {
        stream.expect(Token::RParen)?;
        return Ok(first);
    }

    let mut components = vec![first];
    while stream.check(&Token::Comma) {
        stream.advance();
        components.push(parse_expr(stream)?);
    }
    stream.expect(Token::RParen)?;

    Ok(Expr::new(
        ExprKind::Vector(components),
        stream.span_from(start),
    ))
}
