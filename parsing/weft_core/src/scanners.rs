//! Character-level scanners.
//!
//! Scanners read the characters of the context directly; running one on
//! token input aborts the parse.

use nom::branch::alt;
use nom::bytes::complete::{tag, take_while};
use nom::character::complete::{alpha1, char as nom_char, digit1, multispace1};
use nom::combinator::{opt, recognize};
use nom::sequence::pair;
use nom::IResult;

use crate::bridge::run_nested;
use crate::combinators::primitives::require_chars;
use crate::parser::Parser;

/// A `nom` recognizer over the unread characters
pub type Matcher = for<'i> fn(&'i str) -> IResult<&'i str, &'i str>;

/// One character satisfying `predicate`, reported as `name` when absent
pub fn satisfy<F>(name: impl Into<String>, predicate: F) -> Parser<char>
where
    F: Fn(char) -> bool + Send + Sync + 'static,
{
    let name: String = name.into();
    Parser::new(name.clone(), move |ctx| {
        let remaining = require_chars(ctx, &name)?;
        match remaining.chars().next() {
            Some(c) if predicate(c) => {
                ctx.advance(c.len_utf8());
                Some(c)
            }
            _ => {
                ctx.expected(name.clone());
                None
            }
        }
    })
}

/// Exactly the character `expected`
pub fn is_char(expected: char) -> Parser<char> {
    satisfy(expected.to_string(), move |c| c == expected)
}

/// Any one character
pub fn any_char() -> Parser<char> {
    satisfy("any character", |_| true)
}

/// The literal `text`, matched all or nothing
pub fn string(text: impl Into<String>) -> Parser<()> {
    let text: String = text.into();
    Parser::new(text.clone(), move |ctx| {
        let remaining = require_chars(ctx, &text)?;
        if remaining.starts_with(text.as_str()) {
            ctx.advance(text.len());
            return Some(());
        }
        ctx.expected(text.clone());
        None
    })
}

/// Whatever `matcher` recognizes, reported as `name` when it fails
pub fn pattern(name: impl Into<String>, matcher: Matcher) -> Parser<()> {
    let name: String = name.into();
    Parser::new(name.clone(), move |ctx| {
        let remaining = require_chars(ctx, &name)?;
        match matcher(remaining) {
            Ok((rest, _)) => {
                ctx.advance(remaining.len() - rest.len());
                Some(())
            }
            Err(_) => {
                ctx.expected(name.clone());
                None
            }
        }
    })
}

fn whitespace_run(input: &str) -> IResult<&str, &str> {
    multispace1(input)
}

fn identifier_text(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

fn integer_text(input: &str) -> IResult<&str, &str> {
    digit1(input)
}

fn decimal_text(input: &str) -> IResult<&str, &str> {
    recognize(pair(digit1, opt(pair(nom_char('.'), digit1))))(input)
}

/// One or more whitespace characters
pub fn whitespaces() -> Parser<()> {
    pattern("whitespaces", whitespace_run)
}

/// A letter or underscore followed by letters, digits and underscores
pub fn identifier() -> Parser<()> {
    pattern("identifier", identifier_text)
}

/// One or more decimal digits
pub fn integer() -> Parser<()> {
    pattern("integer", integer_text)
}

/// Digits with an optional fractional part
pub fn decimal() -> Parser<()> {
    pattern("decimal number", decimal_text)
}

/// Run `outer`, then run `inner` over exactly the characters `outer` consumed
pub fn nested<O, T>(outer: Parser<O>, inner: Parser<T>) -> Parser<T>
where
    O: 'static,
    T: 'static,
{
    let name = format!("{} within {}", inner.name(), outer.name());
    Parser::new(name, move |ctx| {
        if ctx.is_token_level() {
            ctx.abort("nested scanner used on token input");
            return None;
        }
        let from = ctx.at();
        outer.run(ctx)?;
        let scope = ctx.nested_chars(from, ctx.at());
        run_nested(ctx, scope, &inner)
    })
}

/// A block comment whose body may contain further comments.
///
/// Each of `open`, `close` and `commented` must consume input when it
/// matches; a zero-width match aborts the parse.
pub fn nestable_block_comment<A, B, C>(
    open: Parser<A>,
    close: Parser<B>,
    commented: Parser<C>,
) -> Parser<()>
where
    A: 'static,
    B: 'static,
    C: 'static,
{
    Parser::new("nestable block comment", move |ctx| {
        open.run(ctx)?;
        let mut level = 1usize;
        while level > 0 {
            let start = ctx.checkpoint();
            if close.run(ctx).is_some() {
                if ctx.at() == start.at {
                    ctx.abort(format!("closing delimiter {} matched empty input", close));
                    return None;
                }
                level -= 1;
                continue;
            }
            if ctx.is_aborted() || !ctx.still_there(start) {
                return None;
            }
            if open.run(ctx).is_some() {
                if ctx.at() == start.at {
                    ctx.abort(format!("opening delimiter {} matched empty input", open));
                    return None;
                }
                level += 1;
                continue;
            }
            if ctx.is_aborted() || !ctx.still_there(start) {
                return None;
            }
            if commented.run(ctx).is_some() {
                if ctx.at() == start.at {
                    ctx.abort(format!("comment body {} matched empty input", commented));
                    return None;
                }
                continue;
            }
            return None;
        }
        Some(())
    })
}

/// A nestable block comment delimited by literal strings
pub fn block_comment(open: &str, close: &str) -> Parser<()> {
    nestable_block_comment(string(open), string(close), any_char())
}
