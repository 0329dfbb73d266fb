use crate::token::{Token, TokenKind};
use logos::Logos;

/// Splits source text into tokens. The result always ends with a single `Eof`.
#[must_use]
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut lexer = TokenKind::lexer(input);
    let mut tokens = Vec::new();

    while let Some(res) = lexer.next() {
        let slice = lexer.slice();
        let token = match res {
            Ok(TokenKind::String) => Token::new(TokenKind::String, &slice[1..slice.len() - 1]),
            Ok(kind) => Token::new(kind, slice),
            Err(()) => Token::new(TokenKind::Illegal, slice),
        };
        tokens.push(token);
    }
    tokens.push(Token::eof());

    tracing::trace!(count = tokens.len(), "tokenized input");
    tokens
}
