use std::fmt;

use logos::Logos;
use pretty_assertions::assert_eq;
use weft_core::combinators::{token, token_eq, Reference};
use weft_core::scanners::{block_comment, integer, whitespaces};
use weft_core::{Parser, Token};
use weft_expr::{binary, unary, OperatorTable};
use weft_lexer::{logos_tokenizer, terminals, Case, Fragment, Tag};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"#[^\n]*")]
enum Calc {
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("(")]
    Open,
    #[token(")")]
    Close,
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    Number(i64),
}

impl fmt::Display for Calc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Calc::Plus => write!(f, "+"),
            Calc::Minus => write!(f, "-"),
            Calc::Star => write!(f, "*"),
            Calc::Open => write!(f, "("),
            Calc::Close => write!(f, ")"),
            Calc::Number(n) => write!(f, "{}", n),
        }
    }
}

fn calc_expression() -> Parser<i64> {
    let number = token("number", |token: &Token| match token.value_as::<Calc>() {
        Some(Calc::Number(n)) => Some(*n),
        _ => None,
    });
    let expression = Reference::new();
    let atom = number.or(expression
        .lazy()
        .between(token_eq(Calc::Open), token_eq(Calc::Close)));
    let parser = OperatorTable::new()
        .prefix(token_eq(Calc::Minus).retn(unary(|a: i64| -a)), 30)
        .infixl(token_eq(Calc::Star).retn(binary(|a: i64, b: i64| a * b)), 20)
        .infixl(token_eq(Calc::Plus).retn(binary(|a: i64, b: i64| a + b)), 10)
        .infixl(token_eq(Calc::Minus).retn(binary(|a: i64, b: i64| a - b)), 10)
        .build(atom);
    expression.set(parser.clone());
    parser.from(logos_tokenizer::<Calc>())
}

#[test]
fn test_logos_tokens_feed_operator_table() {
    let parser = calc_expression();
    assert_eq!(parser.parse("1 + 2 * 3"), Ok(7));
    assert_eq!(parser.parse("(1 + 2) * -3 # trailing note"), Ok(-9));
    assert_eq!(parser.parse("10 - 2 - 3"), Ok(5));
}

#[test]
fn test_logos_token_errors_resolve_lines() {
    let parser = calc_expression();
    let error = parser.parse("1 +\n  * 2").unwrap_err();
    assert_eq!((error.line(), error.column()), (2, 3));
    assert!(
        error.message().ends_with("expected, * encountered."),
        "{}",
        error
    );

    let error = parser.parse("(1 + 2").unwrap_err();
    assert_eq!((error.line(), error.column()), (1, 7));
    assert!(error.message().ends_with("EOF encountered."), "{}", error);
}

#[test]
fn test_logos_lex_error_is_not_internal() {
    let error = calc_expression().parse("1 + $").unwrap_err();
    assert!(!error.is_internal());
    assert_eq!((error.column(), error.message()), (5, "unexpected $."));
}

fn keyword_expression() -> Parser<i64> {
    let lexicon = terminals(&["+", "*", "(", ")"], &["plus", "times"], Case::Insensitive);
    let number_tokenizer = integer()
        .source()
        .map(|digits| Fragment::new(digits, Tag::Integer))
        .tokenize();
    let tokenizer = lexicon.tokenizer().or(number_tokenizer);
    let number = token("integer", |token: &Token| {
        token
            .value_as::<Fragment>()
            .filter(|fragment| fragment.tag() == Tag::Integer)
            .and_then(|fragment| fragment.text().parse::<i64>().ok())
    });
    let add = lexicon
        .tokens(&["+", "plus"])
        .expect("operator registered")
        .retn(binary(|a: i64, b: i64| a + b));
    let multiply = lexicon
        .tokens(&["*", "times"])
        .expect("operator registered")
        .retn(binary(|a: i64, b: i64| a * b));
    let expression = Reference::new();
    let open = lexicon.token("(").expect("operator registered");
    let close = lexicon.token(")").expect("operator registered");
    let atom = number.or(expression.lazy().between(open, close));
    let parser = OperatorTable::new()
        .infixl(multiply, 20)
        .infixl(add, 10)
        .build(atom);
    expression.set(parser.clone());
    let delim = whitespaces().or(block_comment("{", "}")).skip_many();
    parser.from_with(tokenizer, delim)
}

#[test]
fn test_keyword_operators_in_expressions() {
    let parser = keyword_expression();
    assert_eq!(parser.parse("2 PLUS 3 times 4"), Ok(14));
    assert_eq!(parser.parse("(2+3) {why not} * 4"), Ok(20));
    let error = parser.parse("2 plus minus").unwrap_err();
    assert_eq!(
        (error.column(), error.message()),
        (8, "integer or ( expected, minus encountered.")
    );
}
