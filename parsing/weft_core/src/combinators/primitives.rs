//! Leaf parsers that do not wrap another parser.

use std::sync::Arc;

use lazy_static::lazy_static;

use crate::context::ParseContext;
use crate::locator::Location;
use crate::parser::Parser;
use crate::token::{Token, TokenValue};

lazy_static! {
    static ref NEVER: Arc<str> = Arc::from("never");
    static ref ALWAYS: Parser<()> = Parser::new("always", |_| Some(()));
    static ref EOF: Parser<()> = Parser::new("EOF", |ctx| {
        if ctx.is_eof() {
            return Some(());
        }
        ctx.expected("EOF");
        None
    });
    static ref INDEX: Parser<usize> = Parser::new("index", |ctx| Some(ctx.index()));
    static ref LOCATION: Parser<Location> = Parser::new("location", |ctx| {
        match ctx.locator().locate(ctx.index()) {
            Ok(location) => Some(location),
            Err(error) => {
                ctx.abort(error.to_string());
                None
            }
        }
    });
    static ref ANY_TOKEN: Parser<Token> = token("any token", |token| Some(token.clone()));
}

/// Succeeds without consuming anything
pub fn always() -> Parser<()> {
    ALWAYS.clone()
}

/// Fails without consuming anything or recording an error.
///
/// Every instance shares one name and a stateless body, whatever `T` is.
pub fn never<T: 'static>() -> Parser<T> {
    Parser::new(Arc::clone(&NEVER), reject::<T>)
}

fn reject<T>(_: &mut ParseContext<'_>) -> Option<T> {
    None
}

/// Matches only at the end of input
pub fn eof() -> Parser<()> {
    EOF.clone()
}

/// The character offset of the current position
pub fn index() -> Parser<usize> {
    INDEX.clone()
}

/// Line and column of the current position
pub fn location() -> Parser<Location> {
    LOCATION.clone()
}

/// Any single token
pub fn any_token() -> Parser<Token> {
    ANY_TOKEN.clone()
}

/// Succeeds with a clone of `value` without consuming anything
pub fn constant<T>(value: T) -> Parser<T>
where
    T: Clone + Send + Sync + 'static,
{
    Parser::new("constant", move |_| Some(value.clone()))
}

/// Fails with a hard error carrying `message`
pub fn fail<T: 'static>(message: impl Into<String>) -> Parser<T> {
    let message: String = message.into();
    Parser::new(message.clone(), move |ctx| {
        ctx.fail(message.clone());
        None
    })
}

/// Fails reporting `label` as expected
pub fn expect<T: 'static>(label: impl Into<String>) -> Parser<T> {
    let label: String = label.into();
    Parser::new(label.clone(), move |ctx| {
        ctx.expected(label.clone());
        None
    })
}

/// Fails reporting `subject` as unexpected
pub fn unexpected<T: 'static>(subject: impl Into<String>) -> Parser<T> {
    let subject: String = subject.into();
    Parser::new(subject.clone(), move |ctx| {
        ctx.unexpected(subject.clone());
        None
    })
}

/// Consume one token if `recognize` maps it to a value.
///
/// On mismatch or at the end of the tokens `name` is reported as expected.
/// Only meaningful on token input; running it on characters aborts.
pub fn token<T, F>(name: impl Into<Arc<str>>, recognize: F) -> Parser<T>
where
    T: 'static,
    F: Fn(&Token) -> Option<T> + Send + Sync + 'static,
{
    let name: Arc<str> = name.into();
    Parser::new(Arc::clone(&name), move |ctx| {
        if !ctx.is_token_level() {
            ctx.abort(format!("token parser {} used on character input", name));
            return None;
        }
        let value = ctx.peek_token().and_then(&recognize);
        if value.is_some() {
            ctx.advance(1);
        } else {
            ctx.expected(name.as_ref());
        }
        value
    })
}

/// One token whose value equals `value`
pub fn token_eq(value: impl TokenValue) -> Parser<Token> {
    token_with_value(Arc::new(value))
}

/// One token whose value equals the shared `value`
pub fn token_with_value(value: Arc<dyn TokenValue>) -> Parser<Token> {
    let name = value.to_string();
    token(name, move |token| {
        token.has_value(value.as_ref()).then(|| token.clone())
    })
}

/// The unread characters of `ctx`; aborts on token input
pub(crate) fn require_chars<'a>(ctx: &mut ParseContext<'a>, name: &str) -> Option<&'a str> {
    let remaining = ctx.remaining();
    if remaining.is_none() {
        ctx.abort(format!("character scanner {} used on token input", name));
    }
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::or;
    use crate::scanners::is_char;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_singletons_are_shared() {
        assert!(always().same_as(&always()));
        assert!(eof().same_as(&eof()));
        assert!(index().same_as(&index()));
        let names = (never::<()>().name().as_ptr(), never::<String>().name().as_ptr());
        assert_eq!(names.0, names.1);
        assert_eq!(never::<()>().to_string(), "never");
    }

    #[test]
    fn test_constant_and_index() {
        assert_eq!(constant("foo").parse(""), Ok("foo"));
        let after_a = is_char('a').next(index());
        assert_eq!(after_a.parse("a"), Ok(1));
    }

    #[test]
    fn test_location_tracks_lines() {
        let parser = is_char('\n').next(is_char('a')).next(location());
        assert_eq!(parser.parse("\na"), Ok(Location::new(2, 2)));
    }

    #[test]
    fn test_never_against_never_reports_nothing() {
        let error = or(vec![never::<()>(), never()]).parse("x").unwrap_err();
        assert_eq!((error.line(), error.column()), (1, 1));
        assert_eq!(error.message(), "");
    }

    #[test]
    fn test_eof_expected_on_trailing_input() {
        let error = is_char('a').parse("ab").unwrap_err();
        assert_eq!(error.message(), "EOF expected, b encountered.");
        assert_eq!(error.column(), 2);
    }

    #[test]
    fn test_token_parser_on_characters_aborts() {
        let error = any_token().parse("x").unwrap_err();
        assert!(error.is_internal());
    }
}
