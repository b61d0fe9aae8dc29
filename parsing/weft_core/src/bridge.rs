//! Crossing from characters to tokens.
//!
//! A lexer is a character-level parser producing `Vec<Token>`. A
//! token-level parser is attached to it with [`Parser::from`] and runs in a
//! fresh context over those tokens; its error comes back translated to a
//! character offset.

use std::sync::Arc;

use log::trace;

use crate::combinators::primitives::eof;
use crate::context::ParseContext;
use crate::parser::Parser;
use crate::token::{Token, TokenValue};

/// Run `parser` in `nested` and fold the outcome back into `outer`
pub(crate) fn run_nested<T: 'static>(
    outer: &mut ParseContext<'_>,
    mut nested: ParseContext<'_>,
    parser: &Parser<T>,
) -> Option<T> {
    let result = parser.run(&mut nested);
    outer.absorb(&mut nested);
    if outer.is_aborted() {
        return None;
    }
    match result {
        Some(value) => {
            outer.add_steps(nested.step());
            Some(value)
        }
        None => {
            trace!(
                "nested parse failed at index {}: {}",
                nested.error_index(),
                nested.error_message()
            );
            outer.adopt_nested_failure(&nested);
            None
        }
    }
}

impl<T: TokenValue> Parser<T> {
    /// Wrap each result in a [`Token`] spanning the characters it consumed
    pub fn tokenize(self) -> Parser<Token> {
        let name = self.name().to_string();
        Parser::new(name, move |ctx| {
            let begin = ctx.index();
            let value = self.run(ctx)?;
            Some(Token::new(begin, ctx.index() - begin, value))
        })
    }
}

impl Parser<Arc<dyn TokenValue>> {
    /// [`Parser::tokenize`] for values that are already type-erased
    pub fn tokenize_shared(self) -> Parser<Token> {
        let name = self.name().to_string();
        Parser::new(name, move |ctx| {
            let begin = ctx.index();
            let value = self.run(ctx)?;
            Some(Token::from_shared(begin, ctx.index() - begin, value))
        })
    }
}

impl Parser<Token> {
    /// Tokens separated by, and optionally surrounded with, `delim`
    pub fn lexer<D: 'static>(self, delim: Parser<D>) -> Parser<Vec<Token>> {
        delim.clone().optional().next(self.sep_end_by(delim))
    }
}

impl<T: 'static> Parser<T> {
    /// Run this token-level parser over the tokens `lexer` produces.
    ///
    /// Every token must be consumed.
    pub fn from(self, lexer: Parser<Vec<Token>>) -> Parser<T> {
        let name = self.name().to_string();
        let parser = self.followed_by(eof());
        Parser::new(name, move |ctx| {
            let tokens = lexer.run(ctx)?;
            let nested = ctx.nested_tokens(&tokens);
            run_nested(ctx, nested, &parser)
        })
    }

    /// [`Parser::from`] with the lexer built from `tokenizer` and `delim`
    pub fn from_with<D: 'static>(self, tokenizer: Parser<Token>, delim: Parser<D>) -> Parser<T> {
        self.from(tokenizer.lexer(delim))
    }
}
