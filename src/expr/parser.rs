//! Recursive-descent parser for the prefix rule notation.

use super::lexer::{tokenize, Token, TokenKind};
use super::operator::{Operator, Slot};
use super::tree::Expr;
use super::value::Value;
use crate::core::{EleusisError, EleusisResult};

/// Parser over a token stream produced by [`tokenize`].
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Parse a complete expression; trailing tokens are an error.
    pub fn parse(input: &str) -> EleusisResult<Expr> {
        let tokens = tokenize(input)?;
        let mut parser = Self { tokens, pos: 0 };
        let expr = parser.parse_expr()?;
        match &parser.peek().kind {
            TokenKind::Eof => Ok(expr),
            TokenKind::CloseParen => Err(parser.error("unbalanced ')'")),
            other => Err(parser.error(&format!("unexpected {other} after expression"))),
        }
    }

    fn parse_expr(&mut self) -> EleusisResult<Expr> {
        let token = self.advance().clone();
        let name = match token.kind {
            TokenKind::Ident(name) => name,
            TokenKind::Eof => {
                return Err(malformed(token.offset, "unexpected end of input"));
            }
            other => return Err(malformed(token.offset, &format!("unexpected {other}"))),
        };

        if self.peek().kind == TokenKind::OpenParen {
            let op = Operator::from_name(&name)
                .ok_or_else(|| malformed(token.offset, &format!("unknown operator '{name}'")))?;
            self.advance();
            let args = self.parse_args(token.offset)?;
            return Expr::apply(op, args);
        }

        if let Some(slot) = Slot::from_name(&name) {
            return Ok(Expr::Slot(slot));
        }
        if let Some(value) = Value::parse_literal(&name) {
            return Ok(Expr::Literal(value));
        }
        if Operator::from_name(&name).is_some() {
            return Err(malformed(
                token.offset,
                &format!("operator '{name}' used without arguments"),
            ));
        }
        Err(malformed(token.offset, &format!("unknown atom '{name}'")))
    }

    /// Arguments after the opening parenthesis, through the closing one.
    fn parse_args(&mut self, open_offset: usize) -> EleusisResult<Vec<Expr>> {
        let mut args = Vec::new();
        loop {
            match self.peek().kind.clone() {
                TokenKind::CloseParen => {
                    self.advance();
                    return Ok(args);
                }
                TokenKind::Eof => {
                    return Err(malformed(open_offset, "unbalanced '(': missing ')'"));
                }
                TokenKind::Comma if !args.is_empty() => {
                    self.advance();
                    // A comma must be followed by another argument.
                    if matches!(self.peek().kind, TokenKind::CloseParen | TokenKind::Comma) {
                        return Err(self.error("expected argument after ','"));
                    }
                }
                TokenKind::Comma => return Err(self.error("expected argument before ','")),
                _ => args.push(self.parse_expr()?),
            }
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> &Token {
        let idx = self.pos.min(self.tokens.len() - 1);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    fn error(&self, message: &str) -> EleusisError {
        malformed(self.peek().offset, message)
    }
}

fn malformed(offset: usize, message: &str) -> EleusisError {
    EleusisError::MalformedExpression(format!("{message} at offset {offset}"))
}
