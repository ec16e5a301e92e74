//! Token stream wrapper for hand-written parser.

use formula_ast::foundation::Span;
use formula_lexer::Token;
use std::ops::Range;

/// Token stream with lookahead and position tracking.
///
/// Each token is paired with its byte span from the source, enabling
/// accurate error message locations.
pub struct TokenStream<'src> {
    tokens: &'src [(Token, Range<usize>)],
    pos: usize,
    file_id: u16,
}

impl<'src> TokenStream<'src> {
    /// Create a new token stream from tokens with their byte spans.
    pub fn new(tokens: &'src [(Token, Range<usize>)], file_id: u16) -> Self {
        Self {
            tokens,
            pos: 0,
            file_id,
        }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&self) -> Option<&'src Token> {
        self.tokens.get(self.pos).map(|(tok, _)| tok)
    }

    /// Peek at the nth token ahead without consuming.
    pub fn peek_nth(&self, n: usize) -> Option<&'src Token> {
        self.tokens.get(self.pos + n).map(|(tok, _)| tok)
    }

    /// Advance to the next token and return the current one.
    pub fn advance(&mut self) -> Option<&'src Token> {
        let token = self.tokens.get(self.pos).map(|(tok, _)| tok);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Check if the current token matches the expected token.
    pub fn check(&self, expected: &Token) -> bool {
        matches!(self.peek(), Some(t) if std::mem::discriminant(t) == std::mem::discriminant(expected))
    }

    /// Expect a specific token and advance if it matches.
    pub fn expect(&mut self, expected: Token) -> Result<Span, super::ParseError> {
        if self.check(&expected) {
            let start = self.pos;
            self.advance();
            Ok(self.span_from(start))
        } else {
            Err(super::ParseError::expected_token(
                &expected,
                self.peek(),
                self.current_span(),
            ))
        }
    }

    /// Check if we've reached the end of the token stream.
    pub fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Get the current position in the token stream.
    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// Span from the token at `start` to the last consumed token.
    pub fn span_from(&self, start: usize) -> Span {
        let start_byte = self
            .tokens
            .get(start)
            .map_or_else(|| self.eof_offset(), |(_, span)| span.start);
        let end_byte = match self.pos.checked_sub(1).and_then(|last| self.tokens.get(last)) {
            Some((_, span)) if self.pos > start => span.end,
            _ => start_byte,
        };
        Span::new(self.file_id, start_byte as u32, end_byte as u32)
    }

    /// Span of the current token, or an empty span at end of input.
    pub fn current_span(&self) -> Span {
        match self.tokens.get(self.pos) {
            Some((_, span)) => Span::new(self.file_id, span.start as u32, span.end as u32),
            None => {
                let eof = self.eof_offset() as u32;
                Span::new(self.file_id, eof, eof)
            }
        }
    }

    /// Skip to just past the next `;` for error recovery.
    pub fn synchronize(&mut self) {
        while let Some(token) = self.advance() {
            if *token == Token::Semicolon {
                break;
            }
        }
    }

    fn eof_offset(&self) -> usize {
        self.tokens.last().map_or(0, |(_, span)| span.end)
    }
}
