//! Running parsers one after another.
//!
//! Every form stops at the first failing step without running the rest.

use crate::parser::Parser;

/// Run `a` then `b` and combine both results
pub fn sequence2<A, B, R, F>(a: Parser<A>, b: Parser<B>, combine: F) -> Parser<R>
where
    A: 'static,
    B: 'static,
    R: 'static,
    F: Fn(A, B) -> R + Send + Sync + 'static,
{
    Parser::new("sequence", move |ctx| {
        let first = a.run(ctx)?;
        let second = b.run(ctx)?;
        Some(combine(first, second))
    })
}

/// Run three parsers in order and combine their results
pub fn sequence3<A, B, C, R, F>(a: Parser<A>, b: Parser<B>, c: Parser<C>, combine: F) -> Parser<R>
where
    A: 'static,
    B: 'static,
    C: 'static,
    R: 'static,
    F: Fn(A, B, C) -> R + Send + Sync + 'static,
{
    Parser::new("sequence", move |ctx| {
        let first = a.run(ctx)?;
        let second = b.run(ctx)?;
        let third = c.run(ctx)?;
        Some(combine(first, second, third))
    })
}

/// Run four parsers in order and combine their results
pub fn sequence4<A, B, C, D, R, F>(
    a: Parser<A>,
    b: Parser<B>,
    c: Parser<C>,
    d: Parser<D>,
    combine: F,
) -> Parser<R>
where
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    R: 'static,
    F: Fn(A, B, C, D) -> R + Send + Sync + 'static,
{
    Parser::new("sequence", move |ctx| {
        let first = a.run(ctx)?;
        let second = b.run(ctx)?;
        let third = c.run(ctx)?;
        let fourth = d.run(ctx)?;
        Some(combine(first, second, third, fourth))
    })
}

/// Run five parsers in order and combine their results
pub fn sequence5<A, B, C, D, E, R, F>(
    a: Parser<A>,
    b: Parser<B>,
    c: Parser<C>,
    d: Parser<D>,
    e: Parser<E>,
    combine: F,
) -> Parser<R>
where
    A: 'static,
    B: 'static,
    C: 'static,
    D: 'static,
    E: 'static,
    R: 'static,
    F: Fn(A, B, C, D, E) -> R + Send + Sync + 'static,
{
    Parser::new("sequence", move |ctx| {
        let first = a.run(ctx)?;
        let second = b.run(ctx)?;
        let third = c.run(ctx)?;
        let fourth = d.run(ctx)?;
        let fifth = e.run(ctx)?;
        Some(combine(first, second, third, fourth, fifth))
    })
}

/// The n-ary form over parsers of one result type
pub fn sequence<T, R, F>(parsers: Vec<Parser<T>>, combine: F) -> Parser<R>
where
    T: 'static,
    R: 'static,
    F: Fn(Vec<T>) -> R + Send + Sync + 'static,
{
    Parser::new("sequence", move |ctx| {
        let mut results = Vec::with_capacity(parsers.len());
        for parser in &parsers {
            results.push(parser.run(ctx)?);
        }
        Some(combine(results))
    })
}

/// All results in order
pub fn list<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    sequence(parsers, |results| results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanners::{is_char, string};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixed_arity_sequences() {
        let pair = sequence2(is_char('a'), is_char('b'), |a, b| format!("{a}{b}"));
        assert_eq!(pair.parse("ab"), Ok("ab".to_string()));

        let five = sequence5(
            is_char('1'),
            is_char('2'),
            is_char('3'),
            is_char('4'),
            is_char('5'),
            |a, b, c, d, e| [a, b, c, d, e].iter().collect::<String>(),
        );
        assert_eq!(five.parse("12345"), Ok("12345".to_string()));
    }

    #[test]
    fn test_sequence_stops_at_first_failure() {
        let parser = sequence3(is_char('a'), is_char('b'), string("never reached"), |_, _, _| ());
        let error = parser.parse("ax").unwrap_err();
        assert_eq!(error.message(), "b expected, x encountered.");
        assert_eq!(error.column(), 2);
    }

    #[test]
    fn test_list_collects_in_order() {
        let parser = list(vec![is_char('x'), is_char('y'), is_char('z')]);
        assert_eq!(parser.parse("xyz"), Ok(vec!['x', 'y', 'z']));
        let total = sequence(vec![is_char('1'), is_char('2')], |digits| digits.len());
        assert_eq!(total.parse("12"), Ok(2));
    }
}
