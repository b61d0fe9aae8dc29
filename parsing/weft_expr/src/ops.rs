//! Operator combinators for one precedence level.
//!
//! Each takes an operand parser and a parser producing the operator's
//! function, and returns a parser for the operand with those operators
//! applied.

use std::sync::Arc;

use weft_core::combinators::sequence2;
use weft_core::Parser;

/// A prefix or postfix operator's function
pub type UnaryOp<T> = Arc<dyn Fn(T) -> T + Send + Sync>;

/// An infix operator's function
pub type BinaryOp<T> = Arc<dyn Fn(T, T) -> T + Send + Sync>;

/// Wrap a closure as a [`UnaryOp`]
pub fn unary<T, F>(f: F) -> UnaryOp<T>
where
    F: Fn(T) -> T + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap a closure as a [`BinaryOp`]
pub fn binary<T, F>(f: F) -> BinaryOp<T>
where
    F: Fn(T, T) -> T + Send + Sync + 'static,
{
    Arc::new(f)
}

/// `op* p`; operators apply right to left, innermost first
pub fn prefix_ops<T: 'static>(operand: Parser<T>, op: Parser<UnaryOp<T>>) -> Parser<T> {
    sequence2(op.many(), operand, |ops, value| {
        ops.into_iter().rev().fold(value, |value, op| op(value))
    })
    .named("prefix")
}

/// `p op*`; operators apply left to right
pub fn postfix_ops<T: 'static>(operand: Parser<T>, op: Parser<UnaryOp<T>>) -> Parser<T> {
    sequence2(operand, op.many(), |value, ops| {
        ops.into_iter().fold(value, |value, op| op(value))
    })
    .named("postfix")
}

fn operator_and_operand<T: 'static>(
    op: Parser<BinaryOp<T>>,
    operand: Parser<T>,
) -> Parser<(BinaryOp<T>, T)> {
    sequence2(op, operand, |op, rhs| (op, rhs))
}

/// `p (op p)*`, folded from the left: `a - b - c` is `(a - b) - c`
pub fn infixl<T: 'static>(operand: Parser<T>, op: Parser<BinaryOp<T>>) -> Parser<T> {
    let rest = operator_and_operand(op, operand.clone()).many();
    sequence2(operand, rest, |first, rest| {
        rest.into_iter().fold(first, |lhs, (op, rhs)| op(lhs, rhs))
    })
    .named("infixl")
}

/// `p (op p)*`, folded from the right: `a ^ b ^ c` is `a ^ (b ^ c)`
pub fn infixr<T: 'static>(operand: Parser<T>, op: Parser<BinaryOp<T>>) -> Parser<T> {
    let rest = operator_and_operand(op, operand.clone()).many();
    sequence2(operand, rest, fold_right).named("infixr")
}

fn fold_right<T>(first: T, rest: Vec<(BinaryOp<T>, T)>) -> T {
    let mut pending = rest.into_iter().rev();
    let Some((mut op, mut acc)) = pending.next() else {
        return first;
    };
    for (left_op, lhs) in pending {
        acc = op(lhs, acc);
        op = left_op;
    }
    op(first, acc)
}

/// `p (op p)?`; a non-associative operator applies at most once
pub fn infixn<T: 'static>(operand: Parser<T>, op: Parser<BinaryOp<T>>) -> Parser<T> {
    let rest = operator_and_operand(op, operand.clone()).optional();
    sequence2(operand, rest, |lhs, rest| match rest {
        Some((op, rhs)) => op(lhs, rhs),
        None => lhs,
    })
    .named("infixn")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use weft_core::scanners::{integer, is_char};

    fn number() -> Parser<String> {
        integer().source()
    }

    fn show(symbol: char) -> Parser<BinaryOp<String>> {
        is_char(symbol).retn(binary(move |a: String, b: String| format!("({}{}{})", a, symbol, b)))
    }

    fn wrap(symbol: char) -> Parser<UnaryOp<String>> {
        is_char(symbol).retn(unary(move |a: String| format!("{}({})", symbol, a)))
    }

    #[test]
    fn test_infixl_groups_left() {
        let parser = infixl(number(), show('-'));
        assert_eq!(parser.parse("1-2-3"), Ok("((1-2)-3)".to_string()));
        assert_eq!(parser.parse("7"), Ok("7".to_string()));
    }

    #[test]
    fn test_infixr_groups_right() {
        let parser = infixr(number(), show('^'));
        assert_eq!(parser.parse("1^2^3"), Ok("(1^(2^3))".to_string()));
        assert_eq!(parser.parse("1^2"), Ok("(1^2)".to_string()));
        assert_eq!(parser.parse("1"), Ok("1".to_string()));
    }

    #[test]
    fn test_infixn_applies_once() {
        let parser = infixn(number(), show('.'));
        assert_eq!(parser.parse("2.3"), Ok("(2.3)".to_string()));
        let error = parser.parse("2.3.4").unwrap_err();
        assert_eq!((error.column(), error.message()), (4, "EOF expected, . encountered."));
    }

    #[test]
    fn test_unary_operator_order() {
        let prefix = prefix_ops(number(), wrap('~'));
        assert_eq!(prefix.parse("~~3"), Ok("~(~(3))".to_string()));
        let postfix = postfix_ops(number(), wrap('%'));
        assert_eq!(postfix.parse("3%%"), Ok("%(%(3))".to_string()));
    }

    #[test]
    fn test_dangling_operator_fails() {
        let parser = infixl(number(), show('+'));
        let error = parser.parse("1+").unwrap_err();
        assert_eq!((error.column(), error.message()), (3, "integer expected, EOF encountered."));
    }
}
