//! Lexer for the prefix rule notation.
//!
//! Grammar:
//!
//! ```text
//! expr  := atom | IDENT '(' args ')'
//! args  := expr ( ','? expr )*
//! atom  := IDENT          (slot name or literal)
//! IDENT := [A-Za-z0-9_]+
//! ```
//!
//! Whitespace and commas both separate arguments; parentheses are
//! significant.

use crate::core::{EleusisError, EleusisResult};

/// A token with its byte offset in the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Ident(String),
    OpenParen,
    CloseParen,
    Comma,
    Eof,
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ident(text) => write!(f, "'{text}'"),
            Self::OpenParen => write!(f, "'('"),
            Self::CloseParen => write!(f, "')'"),
            Self::Comma => write!(f, "','"),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// Split rule text into tokens, ending with a single `Eof`.
pub fn tokenize(input: &str) -> EleusisResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(offset, ch)) = chars.peek() {
        let kind = match ch {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            ',' => TokenKind::Comma,
            c if c.is_ascii_alphanumeric() || c == '_' => {
                let mut ident = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        ident.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Token {
                    kind: TokenKind::Ident(ident),
                    offset,
                });
                continue;
            }
            other => {
                return Err(EleusisError::MalformedExpression(format!(
                    "unexpected character '{other}' at offset {offset}"
                )))
            }
        };
        chars.next();
        tokens.push(Token { kind, offset });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        offset: input.len(),
    });
    Ok(tokens)
}
