//! Precedence tables.

use std::cmp::{Ordering, Reverse};
use std::fmt;

use log::debug;
use weft_core::combinators::plus;
use weft_core::Parser;

use crate::ops::{infixl, infixn, infixr, postfix_ops, prefix_ops, BinaryOp, UnaryOp};

/// How operators at one precedence level combine.
///
/// The derived order (prefix first, right-associative last) decides the
/// nesting of operators that share a precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Associativity {
    Prefix,
    Postfix,
    Left,
    NonAssoc,
    Right,
}

impl fmt::Display for Associativity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Associativity::Prefix => "prefix",
            Associativity::Postfix => "postfix",
            Associativity::Left => "infixl",
            Associativity::NonAssoc => "infixn",
            Associativity::Right => "infixr",
        };
        f.write_str(name)
    }
}

enum OperatorParser<T> {
    Unary(Parser<UnaryOp<T>>),
    Binary(Parser<BinaryOp<T>>),
}

impl<T> Clone for OperatorParser<T> {
    fn clone(&self) -> Self {
        match self {
            OperatorParser::Unary(parser) => OperatorParser::Unary(parser.clone()),
            OperatorParser::Binary(parser) => OperatorParser::Binary(parser.clone()),
        }
    }
}

/// One table entry: an operator parser with its precedence and associativity.
///
/// Entries order by precedence, highest first, then by [`Associativity`].
pub struct Operator<T> {
    parser: OperatorParser<T>,
    precedence: i32,
    associativity: Associativity,
}

impl<T> Clone for Operator<T> {
    fn clone(&self) -> Self {
        Self {
            parser: self.parser.clone(),
            precedence: self.precedence,
            associativity: self.associativity,
        }
    }
}

impl<T> Operator<T> {
    /// Higher binds tighter
    pub fn precedence(&self) -> i32 {
        self.precedence
    }

    /// How the entry combines with its neighbours
    pub fn associativity(&self) -> Associativity {
        self.associativity
    }

    fn rank(&self) -> (Reverse<i32>, Associativity) {
        (Reverse(self.precedence), self.associativity)
    }

    fn same_level(&self, other: &Operator<T>) -> bool {
        self.rank() == other.rank()
    }
}

impl<T: 'static> fmt::Debug for Operator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parser = match &self.parser {
            OperatorParser::Unary(parser) => parser.name(),
            OperatorParser::Binary(parser) => parser.name(),
        };
        f.debug_struct("Operator")
            .field("parser", &parser)
            .field("precedence", &self.precedence)
            .field("associativity", &self.associativity)
            .finish()
    }
}

impl<T> PartialEq for Operator<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rank() == other.rank()
    }
}

impl<T> Eq for Operator<T> {}

impl<T> PartialOrd for Operator<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Operator<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

/// Collects operators, then builds an expression parser around an operand.
///
/// Higher precedence binds tighter. Operators sharing both precedence and
/// associativity form one level and are tried as alternatives.
pub struct OperatorTable<T> {
    operators: Vec<Operator<T>>,
}

impl<T> Default for OperatorTable<T> {
    fn default() -> Self {
        Self {
            operators: Vec::new(),
        }
    }
}

impl<T: 'static> OperatorTable<T> {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    fn add(mut self, parser: OperatorParser<T>, precedence: i32, associativity: Associativity) -> Self {
        self.operators.push(Operator {
            parser,
            precedence,
            associativity,
        });
        self
    }

    /// Prefix operator
    pub fn prefix(self, op: Parser<UnaryOp<T>>, precedence: i32) -> Self {
        self.add(OperatorParser::Unary(op), precedence, Associativity::Prefix)
    }

    /// Postfix operator
    pub fn postfix(self, op: Parser<UnaryOp<T>>, precedence: i32) -> Self {
        self.add(OperatorParser::Unary(op), precedence, Associativity::Postfix)
    }

    /// Left-associative infix operator
    pub fn infixl(self, op: Parser<BinaryOp<T>>, precedence: i32) -> Self {
        self.add(OperatorParser::Binary(op), precedence, Associativity::Left)
    }

    /// Right-associative infix operator
    pub fn infixr(self, op: Parser<BinaryOp<T>>, precedence: i32) -> Self {
        self.add(OperatorParser::Binary(op), precedence, Associativity::Right)
    }

    /// Non-associative infix operator
    pub fn infixn(self, op: Parser<BinaryOp<T>>, precedence: i32) -> Self {
        self.add(OperatorParser::Binary(op), precedence, Associativity::NonAssoc)
    }

    /// The entries in build order; ties keep the order they were added in
    pub fn operators(&self) -> Vec<Operator<T>> {
        let mut sorted = self.operators.clone();
        sorted.sort();
        sorted
    }

    /// An expression parser over `operand`.
    ///
    /// Levels wrap the operand from the highest precedence outward. An empty
    /// table returns `operand` itself.
    pub fn build(&self, operand: Parser<T>) -> Parser<T> {
        let sorted = self.operators();
        let mut expression = operand;
        for level in sorted.chunk_by(Operator::same_level) {
            let (precedence, associativity) = (level[0].precedence, level[0].associativity);
            debug!(
                "operator level {} {} with {} operator(s)",
                precedence,
                associativity,
                level.len()
            );
            expression = build_level(expression, level);
        }
        expression
    }
}

fn build_level<T: 'static>(operand: Parser<T>, level: &[Operator<T>]) -> Parser<T> {
    let associativity = level[0].associativity;
    match associativity {
        Associativity::Prefix => prefix_ops(operand, unary_choice(level)),
        Associativity::Postfix => postfix_ops(operand, unary_choice(level)),
        Associativity::Left => infixl(operand, binary_choice(level)),
        Associativity::NonAssoc => infixn(operand, binary_choice(level)),
        Associativity::Right => infixr(operand, binary_choice(level)),
    }
}

fn unary_choice<T: 'static>(level: &[Operator<T>]) -> Parser<UnaryOp<T>> {
    let parsers = level
        .iter()
        .filter_map(|operator| match &operator.parser {
            OperatorParser::Unary(parser) => Some(parser.clone()),
            OperatorParser::Binary(_) => None,
        })
        .collect();
    plus(parsers)
}

fn binary_choice<T: 'static>(level: &[Operator<T>]) -> Parser<BinaryOp<T>> {
    let parsers = level
        .iter()
        .filter_map(|operator| match &operator.parser {
            OperatorParser::Binary(parser) => Some(parser.clone()),
            OperatorParser::Unary(_) => None,
        })
        .collect();
    plus(parsers)
}
