//! Repeating a parser.
//!
//! A repetition stops quietly when an attempt fails without taking a step;
//! an attempt that failed after taking a step fails the whole repetition so
//! the error it recorded is the one reported.

use crate::context::ParseContext;
use crate::parser::Parser;

fn repeat_into<T: 'static>(
    parser: &Parser<T>,
    count: usize,
    ctx: &mut ParseContext<'_>,
    sink: &mut impl FnMut(T),
) -> bool {
    for _ in 0..count {
        match parser.run(ctx) {
            Some(value) => sink(value),
            None => return false,
        }
    }
    true
}

fn at_most_into<T: 'static>(
    parser: &Parser<T>,
    max: usize,
    ctx: &mut ParseContext<'_>,
    sink: &mut impl FnMut(T),
) -> bool {
    for _ in 0..max {
        let attempt = ctx.checkpoint();
        match parser.run(ctx) {
            Some(value) => sink(value),
            None => return !ctx.is_aborted() && ctx.still_there(attempt),
        }
    }
    true
}

/// Repeat until failure, or until a success stops moving the position
fn many_into<T: 'static>(
    parser: &Parser<T>,
    ctx: &mut ParseContext<'_>,
    sink: &mut impl FnMut(T),
) -> bool {
    loop {
        let attempt = ctx.checkpoint();
        match parser.run(ctx) {
            Some(_) if ctx.at() == attempt.at => return true,
            Some(value) => sink(value),
            None => return !ctx.is_aborted() && ctx.still_there(attempt),
        }
    }
}

impl<T: 'static> Parser<T> {
    /// Exactly `count` matches
    pub fn repeat(self, count: usize) -> Parser<Vec<T>> {
        Parser::new(format!("{}{{{}}}", self.name(), count), move |ctx| {
            let mut values = Vec::new();
            let matched = repeat_into(&self, count, ctx, &mut |value| values.push(value));
            matched.then_some(values)
        })
    }

    /// Up to `max` matches
    pub fn at_most(self, max: usize) -> Parser<Vec<T>> {
        Parser::new(format!("{}{{0,{}}}", self.name(), max), move |ctx| {
            let mut values = Vec::new();
            let matched = at_most_into(&self, max, ctx, &mut |value| values.push(value));
            matched.then_some(values)
        })
    }

    /// Between `min` and `max` matches
    pub fn times(self, min: usize, max: usize) -> Parser<Vec<T>> {
        let extra = max.saturating_sub(min);
        Parser::new(format!("{}{{{},{}}}", self.name(), min, max), move |ctx| {
            let mut values = Vec::new();
            let mut push = |value| values.push(value);
            let matched = repeat_into(&self, min, ctx, &mut push)
                && at_most_into(&self, extra, ctx, &mut push);
            matched.then_some(values)
        })
    }

    /// Zero or more matches
    pub fn many(self) -> Parser<Vec<T>> {
        Parser::new(format!("{}*", self.name()), move |ctx| {
            let mut values = Vec::new();
            let matched = many_into(&self, ctx, &mut |value| values.push(value));
            matched.then_some(values)
        })
    }

    /// One or more matches
    pub fn many1(self) -> Parser<Vec<T>> {
        Parser::new(format!("{}+", self.name()), move |ctx| {
            let mut values = Vec::new();
            let mut push = |value| values.push(value);
            let matched =
                repeat_into(&self, 1, ctx, &mut push) && many_into(&self, ctx, &mut push);
            matched.then_some(values)
        })
    }

    /// [`Parser::many`] without collecting results
    pub fn skip_many(self) -> Parser<()> {
        Parser::new(format!("{}*", self.name()), move |ctx| {
            many_into(&self, ctx, &mut drop).then_some(())
        })
    }

    /// [`Parser::many1`] without collecting results
    pub fn skip_many1(self) -> Parser<()> {
        Parser::new(format!("{}+", self.name()), move |ctx| {
            let matched =
                repeat_into(&self, 1, ctx, &mut drop) && many_into(&self, ctx, &mut drop);
            matched.then_some(())
        })
    }

    /// [`Parser::times`] without collecting results
    pub fn skip_times(self, min: usize, max: usize) -> Parser<()> {
        let extra = max.saturating_sub(min);
        Parser::new(format!("{}{{{},{}}}", self.name(), min, max), move |ctx| {
            let matched = repeat_into(&self, min, ctx, &mut drop)
                && at_most_into(&self, extra, ctx, &mut drop);
            matched.then_some(())
        })
    }

    /// One or more matches separated by `delim`
    pub fn sep_by1<D: 'static>(self, delim: Parser<D>) -> Parser<Vec<T>> {
        let rest = delim.next(self.clone());
        Parser::new(format!("{}+", self.name()), move |ctx| {
            let mut values = vec![self.run(ctx)?];
            let matched = many_into(&rest, ctx, &mut |value| values.push(value));
            matched.then_some(values)
        })
    }

    /// Zero or more matches separated by `delim`
    pub fn sep_by<D: 'static>(self, delim: Parser<D>) -> Parser<Vec<T>> {
        self.sep_by1(delim).optional().map(Option::unwrap_or_default)
    }

    /// One or more matches separated and optionally terminated by `delim`
    pub fn sep_end_by1<D: 'static>(self, delim: Parser<D>) -> Parser<Vec<T>> {
        Parser::new(format!("{}+", self.name()), move |ctx| {
            let mut values = vec![self.run(ctx)?];
            loop {
                let before_delim = ctx.checkpoint();
                if delim.run(ctx).is_none() {
                    let stopped = !ctx.is_aborted() && ctx.still_there(before_delim);
                    return stopped.then_some(values);
                }
                let before_item = ctx.checkpoint();
                match self.run(ctx) {
                    None => {
                        let stopped = !ctx.is_aborted() && ctx.still_there(before_item);
                        return stopped.then_some(values);
                    }
                    Some(_) if ctx.at() == before_delim.at => return Some(values),
                    Some(value) => values.push(value),
                }
            }
        })
    }

    /// Zero or more matches separated and optionally terminated by `delim`
    pub fn sep_end_by<D: 'static>(self, delim: Parser<D>) -> Parser<Vec<T>> {
        self.sep_end_by1(delim).optional().map(Option::unwrap_or_default)
    }
}
