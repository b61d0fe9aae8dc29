//! The parser abstraction and its single-parser transformations.

use std::fmt;
use std::sync::Arc;

use crate::combinators::primitives::eof;
use crate::config::ParseConfig;
use crate::context::ParseContext;
use crate::error::ParseError;

type ParseFn<T> = dyn Fn(&mut ParseContext<'_>) -> Option<T> + Send + Sync;

/// An immutable, shareable parsing unit.
///
/// Running it either succeeds with `Some(value)` after consuming zero or more
/// units, or fails with `None` after recording an error in the context. A
/// failing parser may leave the position anywhere; the combinator that
/// called it decides whether and where to roll back.
pub struct Parser<T> {
    name: Arc<str>,
    parse: Arc<ParseFn<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            parse: Arc::clone(&self.parse),
        }
    }
}

impl<T> fmt::Debug for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T> fmt::Display for Parser<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl<T: 'static> Parser<T> {
    /// Wrap `parse` under a display `name`
    pub fn new<F>(name: impl Into<Arc<str>>, parse: F) -> Self
    where
        F: Fn(&mut ParseContext<'_>) -> Option<T> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            parse: Arc::new(parse),
        }
    }

    /// Run against `ctx`, tracking nesting depth
    pub fn run(&self, ctx: &mut ParseContext<'_>) -> Option<T> {
        if ctx.is_aborted() || !ctx.enter() {
            return None;
        }
        let result = (self.parse)(ctx);
        ctx.exit();
        result
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The same parser under another display name; errors are unaffected
    pub fn named(&self, name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            parse: Arc::clone(&self.parse),
        }
    }

    /// Whether both handles share one underlying parser
    pub fn same_as(&self, other: &Parser<T>) -> bool {
        Arc::ptr_eq(&self.parse, &other.parse)
    }

    /// Parse all of `source`, which must be fully consumed
    pub fn parse(&self, source: &str) -> Result<T, ParseError> {
        crate::parse(source, self)
    }

    pub fn parse_with(&self, source: &str, config: &ParseConfig) -> Result<T, ParseError> {
        crate::parse_with(source, self, config)
    }

    pub fn map<R, F>(self, f: F) -> Parser<R>
    where
        R: 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        let name = Arc::clone(&self.name);
        Parser::new(name, move |ctx| self.run(ctx).map(&f))
    }

    /// Replace the result with `value`
    pub fn retn<R>(self, value: R) -> Parser<R>
    where
        R: Clone + Send + Sync + 'static,
    {
        self.map(move |_| value.clone())
    }

    /// Pick the next parser from this one's result
    pub fn bind<R, F>(self, f: F) -> Parser<R>
    where
        R: 'static,
        F: Fn(T) -> Parser<R> + Send + Sync + 'static,
    {
        Parser::new("bind", move |ctx| {
            let value = self.run(ctx)?;
            f(value).run(ctx)
        })
    }

    /// Run `next` after this parser and keep its result
    pub fn next<R: 'static>(self, next: Parser<R>) -> Parser<R> {
        Parser::new("next", move |ctx| {
            self.run(ctx)?;
            next.run(ctx)
        })
    }

    /// Run `next` after this parser and keep this parser's result
    pub fn followed_by<U: 'static>(self, next: Parser<U>) -> Parser<T> {
        let name = Arc::clone(&self.name);
        Parser::new(name, move |ctx| {
            let value = self.run(ctx)?;
            next.run(ctx)?;
            Some(value)
        })
    }

    /// Succeed only when `other` does not match right after this parser
    pub fn not_followed_by<U: 'static>(self, other: Parser<U>) -> Parser<T> {
        self.followed_by(other.not())
    }

    pub fn between<O: 'static, C: 'static>(self, open: Parser<O>, close: Parser<C>) -> Parser<T> {
        open.next(self).followed_by(close)
    }

    /// Undo all consumption on failure and count a success as one step
    pub fn atomic(self) -> Parser<T> {
        let name = Arc::clone(&self.name);
        Parser::new(name, move |ctx| {
            let start = ctx.checkpoint();
            match self.run(ctx) {
                Some(value) => {
                    if ctx.at() == start.at {
                        ctx.restore(start);
                    } else {
                        ctx.set_step(start.step + 1);
                    }
                    Some(value)
                }
                None => {
                    ctx.restore(start);
                    None
                }
            }
        })
    }

    /// Report a failure that made no progress as `name expected`.
    ///
    /// Errors the wrapped parser recorded at or before its start position
    /// are replaced by the label; errors further in are kept.
    pub fn label(self, name: impl Into<String>) -> Parser<T> {
        let label: String = name.into();
        Parser::new(label.clone(), move |ctx| {
            let start = ctx.at();
            let before = ctx.error_state().clone();
            let result = self.run(ctx);
            if result.is_none() && !ctx.is_aborted() && ctx.error_state().at <= start {
                ctx.set_error_state(before);
                ctx.expected_at(start, label.clone());
            }
            result
        })
    }

    /// Zero or one match; fails if a partial match made progress
    pub fn optional(self) -> Parser<Option<T>> {
        let name = format!("{}?", self.name);
        Parser::new(name, move |ctx| {
            let start = ctx.checkpoint();
            match self.run(ctx) {
                Some(value) => Some(Some(value)),
                None if ctx.is_aborted() || ctx.progressed_since(start) => None,
                None => {
                    ctx.restore(start);
                    Some(None)
                }
            }
        })
    }

    /// Like [`Parser::optional`] with `default` in place of `None`
    pub fn or_else(self, default: T) -> Parser<T>
    where
        T: Clone + Send + Sync,
    {
        self.optional()
            .map(move |value| value.unwrap_or_else(|| default.clone()))
    }

    /// Negative lookahead reported as `unexpected NAME` with this parser's name
    pub fn not(self) -> Parser<()> {
        let name = self.name.to_string();
        self.not_named(name)
    }

    /// Negative lookahead reported as `unexpected NAME`.
    ///
    /// Never consumes input; errors of the lookahead are not recorded.
    pub fn not_named(self, name: impl Into<String>) -> Parser<()> {
        let name: String = name.into();
        Parser::new(format!("not {}", name), move |ctx| {
            let start = ctx.checkpoint();
            let matched = ctx.without_errors(|ctx| self.run(ctx).is_some());
            ctx.restore(start);
            if ctx.is_aborted() {
                return None;
            }
            if matched {
                ctx.unexpected(name.clone());
                return None;
            }
            Some(())
        })
    }

    /// Match without consuming
    pub fn peek(self) -> Parser<T> {
        let name = Arc::clone(&self.name);
        Parser::new(name, move |ctx| {
            let start = ctx.checkpoint();
            let value = self.run(ctx)?;
            ctx.restore(start);
            Some(value)
        })
    }

    /// The text this parser matched, on either level
    pub fn source(self) -> Parser<String> {
        let name = Arc::clone(&self.name);
        Parser::new(name, move |ctx| {
            let begin = ctx.index();
            self.run(ctx)?;
            let text = ctx.text().get(begin..ctx.index()).unwrap_or_default();
            Some(text.to_string())
        })
    }

    /// Require the end of input after this parser
    pub fn followed_by_eof(self) -> Parser<T> {
        self.followed_by(eof())
    }
}
