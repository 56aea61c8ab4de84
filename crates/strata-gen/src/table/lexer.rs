//! Lexer for constructor signature cells.
//!
//! Produces span-based tokens without storing text; text is sliced from the
//! cell only when needed. Spans are cell-relative, the parser shifts them by
//! the cell's offset before reporting.
//!
//! ## Error handling
//!
//! Consecutive unrecognized characters coalesce into single `Garbage` tokens
//! rather than producing one error per character.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

/// Token kinds appearing in a constructor signature.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    /// Module qualifier separator. Must be defined before single Colon so
    /// `::` never lexes as two colons.
    #[token("::")]
    PathSep,

    #[token(":")]
    Colon,

    #[token("*")]
    Star,

    #[token("+")]
    Plus,

    #[token("?")]
    Question,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[ \t]+")]
    Whitespace,

    /// Consecutive unrecognized characters coalesced into one token.
    Garbage,
}

impl TokenKind {
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes a signature cell into a vector of span-based tokens.
///
/// Post-processes the Logos output to coalesce consecutive lexer errors into
/// single `Garbage` tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                // Flush accumulated error span before emitting valid token
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..end),
                    ));
                }

                let span = lexer.span();
                tokens.push(Token::new(kind, range_to_text_range(span)));
            }
            Some(Err(())) => {
                // Accumulate error span; will be flushed on next valid token or EOF
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        TokenKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Retrieves the text slice for a token. O(1) slice into the cell.
#[inline]
pub fn token_text<'src>(source: &'src str, token: &Token) -> &'src str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
