// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for formulas.
//!
//! Tokenization uses logos. Whitespace and `#` line comments are skipped.
//!
//! # Examples
//!
//! ```
//! # use formula_lexer::Token;
//! # use logos::Logos;
//! let tokens: Vec<Token> = Token::lexer("y = sin(x) * 2; # wave")
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(tokens.len(), 9);
//! ```

use logos::Logos;
use std::rc::Rc;

/// Formula token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace
#[logos(skip r"#[^\n]*")] // Skip # comments
pub enum Token {
    // === Keywords ===
    /// Keyword `true`
    #[token("true")]
    True,
    /// Keyword `false`
    #[token("false")]
    False,
    /// Keyword `and`
    #[token("and")]
    And,
    /// Keyword `or`
    #[token("or")]
    Or,
    /// Keyword `not`, also spelled `!`
    #[token("not")]
    #[token("!")]
    Not,

    // === Operators ===
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `^`
    #[token("^")]
    Caret,
    /// `==`
    #[token("==")]
    EqEq,
    /// `!=`
    #[token("!=")]
    BangEq,
    /// `<`
    #[token("<")]
    Lt,
    /// `<=`
    #[token("<=")]
    LtEq,
    /// `>`
    #[token(">")]
    Gt,
    /// `>=`
    #[token(">=")]
    GtEq,
    /// `=`
    #[token("=")]
    Eq,

    // === Delimiters ===
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,

    // === Literals ===
    /// Integer literal (e.g., 42, 0, 1000)
    ///
    /// Values that overflow `i64` are lexing errors.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Integer(i64),

    /// Float literal (e.g., 3.14, .5, 1e-3)
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok())]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", |lex| lex.slice().parse::<f64>().ok())]
    Float(f64),

    /// Identifier (e.g., x, sin, tex_coords)
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| Rc::from(lex.slice()))]
    Ident(Rc<str>),
}

impl Token {
    /// Printable name for error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Integer(_) | Token::Float(_) => format!("number '{self}'"),
            Token::Ident(_) => format!("identifier '{self}'"),
            _ => format!("'{self}'"),
        }
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Token::Integer(n) => return write!(f, "{}", n),
            Token::Float(x) => return write!(f, "{}", x),
            Token::Ident(id) => return write!(f, "{}", id),
            Token::True => "true",
            Token::False => "false",
            Token::And => "and",
            Token::Or => "or",
            Token::Not => "not",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Star => "*",
            Token::Slash => "/",
            Token::Percent => "%",
            Token::Caret => "^",
            Token::EqEq => "==",
            Token::BangEq => "!=",
            Token::Lt => "<",
            Token::LtEq => "<=",
            Token::Gt => ">",
            Token::GtEq => ">=",
            Token::Eq => "=",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::LParen => "(",
            Token::RParen => ")",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test helper: lex source and filter out errors.
    fn lex(source: &str) -> Vec<Token> {
        Token::lexer(source)
            .filter_map(|result| result.ok())
            .collect()
    }

    fn ident(s: &str) -> Token {
        Token::Ident(Rc::from(s))
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            lex("true false and or not android"),
            vec![
                Token::True,
                Token::False,
                Token::And,
                Token::Or,
                Token::Not,
                ident("android"),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            lex("42 2.5 .5 1. 1e3"),
            vec![
                Token::Integer(42),
                Token::Float(2.5),
                Token::Float(0.5),
                Token::Float(1.0),
                Token::Float(1000.0),
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            lex("<= < == = != ! >= >"),
            vec![
                Token::LtEq,
                Token::Lt,
                Token::EqEq,
                Token::Eq,
                Token::BangEq,
                Token::Not,
                Token::GtEq,
                Token::Gt,
            ]
        );
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            lex("x = 1 # set x\n# whole line\ny"),
            vec![ident("x"), Token::Eq, Token::Integer(1), ident("y")]
        );
    }

    #[test]
    fn test_lexer_error_detection() {
        let results: Vec<_> = Token::lexer("x @ 1").collect();
        assert_eq!(results.len(), 3);
        assert!(results[1].is_err());
    }

    #[test]
    fn test_integer_overflow_is_an_error() {
        let results: Vec<_> = Token::lexer("99999999999999999999").collect();
        assert!(results[0].is_err());
    }

    #[test]
    fn test_display_round_trips_source_text() {
        let source = "a = (1, 2.5, b) ^ 2 != c";
        let rendered: Vec<String> = lex(source).iter().map(Token::to_string).collect();
        assert_eq!(
            rendered,
            vec!["a", "=", "(", "1", ",", "2.5", ",", "b", ")", "^", "2", "!=", "c"]
        );
        assert_eq!(Token::Ident(Rc::from("x")).describe(), "identifier 'x'");
    }
}
