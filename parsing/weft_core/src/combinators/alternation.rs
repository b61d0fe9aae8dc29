//! Choosing between alternatives.
//!
//! `or` backtracks freely, `plus` commits to a branch once it made
//! progress, and the best-fit forms run every branch and keep the one that
//! stopped furthest (or nearest).

use crate::context::Checkpoint;
use crate::parser::Parser;

use super::primitives::never;

/// Try each alternative from the same start until one succeeds
pub fn or<T: 'static>(alternatives: Vec<Parser<T>>) -> Parser<T> {
    match alternatives.len() {
        0 => return never(),
        1 => return alternatives.into_iter().next().unwrap_or_else(never),
        _ => {}
    }
    Parser::new("or", move |ctx| {
        let start = ctx.checkpoint();
        for alternative in &alternatives {
            if let Some(value) = alternative.run(ctx) {
                return Some(value);
            }
            if ctx.is_aborted() {
                return None;
            }
            ctx.restore(start);
        }
        None
    })
}

/// Like [`or`], but an alternative that fails after consuming input and
/// taking a step ends the whole alternation
pub fn plus<T: 'static>(alternatives: Vec<Parser<T>>) -> Parser<T> {
    match alternatives.len() {
        0 => return never(),
        1 => return alternatives.into_iter().next().unwrap_or_else(never),
        _ => {}
    }
    Parser::new("plus", move |ctx| {
        let start = ctx.checkpoint();
        for alternative in &alternatives {
            if let Some(value) = alternative.run(ctx) {
                return Some(value);
            }
            if ctx.is_aborted() || ctx.progressed_since(start) {
                return None;
            }
            ctx.restore(start);
        }
        None
    })
}

/// Run every alternative and keep the one that consumed the most
pub fn longest<T: 'static>(alternatives: Vec<Parser<T>>) -> Parser<T> {
    best_fit("longest", alternatives, |candidate, best| candidate > best)
}

/// Run every alternative and keep the one that consumed the least
pub fn shortest<T: 'static>(alternatives: Vec<Parser<T>>) -> Parser<T> {
    best_fit("shortest", alternatives, |candidate, best| candidate < best)
}

/// [`longest`] of two alternatives
pub fn longer<T: 'static>(a: Parser<T>, b: Parser<T>) -> Parser<T> {
    longest(vec![a, b])
}

/// [`shortest`] of two alternatives
pub fn shorter<T: 'static>(a: Parser<T>, b: Parser<T>) -> Parser<T> {
    shortest(vec![a, b])
}

/// `prefer(candidate_at, best_at)` must be strict so ties keep the earlier branch
fn best_fit<T: 'static>(
    name: &'static str,
    alternatives: Vec<Parser<T>>,
    prefer: fn(usize, usize) -> bool,
) -> Parser<T> {
    if alternatives.is_empty() {
        return never();
    }
    Parser::new(name, move |ctx| {
        let start = ctx.checkpoint();
        let mut best: Option<(T, Checkpoint)> = None;
        for alternative in &alternatives {
            ctx.restore(start);
            match alternative.run(ctx) {
                Some(value) => {
                    let end = ctx.checkpoint();
                    match &best {
                        Some((_, best_end)) if !prefer(end.at, best_end.at) => {}
                        _ => best = Some((value, end)),
                    }
                }
                None if ctx.is_aborted() => return None,
                None => {}
            }
        }
        let (value, end) = best?;
        ctx.restore(end);
        Some(value)
    })
}

impl<T: 'static> Parser<T> {
    /// `or(self, other)`
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        or(vec![self, other])
    }

    /// `plus(self, other)`
    pub fn plus(self, other: Parser<T>) -> Parser<T> {
        plus(vec![self, other])
    }
}
