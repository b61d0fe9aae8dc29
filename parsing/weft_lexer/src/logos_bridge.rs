//! Lexing with a `logos` token enum.
//!
//! A derived [`Logos`] lexer is often the fastest way to tokenize; this
//! wraps one as a lexer parser so token-level grammars can run over it with
//! [`Parser::from`].

#[cfg(feature = "logging")]
use log::trace;
use logos::Logos;
use weft_core::{Parser, Token, TokenValue};

/// A lexer parser running the `logos` lexer for `L` over the rest of the input.
///
/// Skipped patterns (whitespace, comments) never become tokens. Text no
/// pattern matches is reported as unexpected at its position.
pub fn logos_tokenizer<L>() -> Parser<Vec<Token>>
where
    L: for<'s> Logos<'s, Source = str, Extras = ()> + TokenValue,
{
    Parser::new("logos lexer", |ctx| {
        let remaining = match ctx.remaining() {
            Some(remaining) => remaining,
            None => {
                ctx.abort("logos lexer used on token input");
                return None;
            }
        };
        let base = ctx.index();
        let mut lexer = L::lexer(remaining);
        let mut tokens = Vec::new();
        while let Some(next) = lexer.next() {
            let span = lexer.span();
            match next {
                Ok(value) => tokens.push(Token::new(base + span.start, span.len(), value)),
                Err(_) => {
                    ctx.advance(span.start);
                    ctx.unexpected(lexer.slice());
                    return None;
                }
            }
        }
        #[cfg(feature = "logging")]
        trace!("logos lexer produced {} tokens", tokens.len());
        ctx.advance(remaining.len());
        Some(tokens)
    })
}
