//! Lexicons and tokenizers for weft grammars.
//!
//! A [`Lexicon`] names the reserved words of a language and carries the
//! tokenizer that recognizes them. [`terminals`] combines an operator
//! lexicon with a keyword lexicon the way most languages need; token-level
//! grammars then refer to words by name:
//!
//! ```
//! use weft_core::scanners::whitespaces;
//! use weft_lexer::{terminals, Case};
//!
//! let lexicon = terminals(&["+", "-"], &["foo", "bar"], Case::Sensitive);
//! let pair = lexicon.tokens(&["foo", "bar"]).unwrap().repeat(2);
//! let grammar = pair.from_with(lexicon.tokenizer(), whitespaces());
//! assert!(grammar.parse("foo bar").is_ok());
//! ```

#![warn(missing_docs)]

pub mod fragment;
pub mod keywords;
pub mod lexicon;
pub mod logos_bridge;

pub use fragment::{Fragment, Tag};
pub use keywords::{keywords, operators, unique, word_scanner, Case};
pub use lexicon::{Lexicon, LexiconError};
pub use logos_bridge::logos_tokenizer;

use fragment::identifier_fragment;

/// Operators and keywords in one lexicon; operators are tried first.
///
/// Words that are not keywords tokenize as identifier fragments.
pub fn terminals(ops: &[&str], keyword_names: &[&str], case: Case) -> Lexicon {
    let words = keywords(word_scanner(), keyword_names, case, identifier_fragment);
    operators(ops).union(&words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use env_logger::Builder;
    use log::LevelFilter;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use std::sync::Once;
    use weft_core::scanners::whitespaces;

    static INIT: Once = Once::new();

    /// Initialize the logger for tests
    pub fn init_test_logger() {
        INIT.call_once(|| {
            let _ = Builder::new()
                .filter_level(LevelFilter::Debug)
                .format(|buf, record| {
                    writeln!(
                        buf,
                        "[{}] {}: {}",
                        record.level(),
                        record.target(),
                        record.args()
                    )
                })
                .is_test(true)
                .try_init();
        });
    }

    fn sequence_of_chars(text: &str) -> weft_core::Parser<()> {
        let chars = text
            .chars()
            .map(|c| weft_core::scanners::is_char(c).retn(()))
            .collect();
        weft_core::combinators::sequence(chars, |_| ())
    }

    #[test]
    fn test_token_level_errors() {
        init_test_logger();
        let lexicon = terminals(&["+", "-"], &["foo", "bar", "baz"], Case::Sensitive);
        let foobar = lexicon
            .tokens(&["foo", "bar"])
            .unwrap()
            .repeat(2)
            .from_with(lexicon.tokenizer(), whitespaces());

        let error = foobar.parse("foo+").unwrap_err();
        assert_eq!(
            (error.line(), error.column(), error.message()),
            (1, 4, "foo or bar expected, + encountered.")
        );
        let error = foobar.parse("foo").unwrap_err();
        assert_eq!(
            (error.line(), error.column(), error.message()),
            (1, 4, "foo or bar expected, EOF encountered.")
        );

        let chars_first = sequence_of_chars("foox").retn(Vec::new()).or(foobar.clone());
        let error = chars_first.parse("foo baz").unwrap_err();
        assert_eq!(
            (error.column(), error.message()),
            (5, "foo or bar expected, baz encountered.")
        );
    }

    #[test]
    fn test_operators_take_precedence_over_words() {
        let lexicon = terminals(&["->", "-"], &["fn"], Case::Insensitive);
        let lexer = lexicon.tokenizer().lexer(whitespaces().optional());
        let tokens = lexer.parse("FN x -> -y").unwrap();
        let texts: Vec<String> = tokens.iter().map(|t| t.value().to_string()).collect();
        assert_eq!(texts, vec!["fn", "x", "->", "-", "y"]);
        assert!(tokens[0].has_value(&Fragment::reserved("fn")));
        assert!(tokens[1].has_value(&Fragment::identifier("x")));
    }

    #[test]
    fn test_retokenized_span_starts_at_first_word() {
        let lexicon = terminals(&["+", "-"], &["foo", "bar", "baz"], Case::Sensitive);
        let tokenizer = lexicon.tokenizer();
        let signed = tokenizer
            .clone()
            .next(tokenizer)
            .map(|token| token.shared_value())
            .tokenize_shared();
        let two = lexicon
            .tokens(&["foo", "bar"])
            .unwrap()
            .repeat(2)
            .from_with(signed, whitespaces());
        assert!(two.parse("+foo -bar").is_ok());
        let error = two.parse("+foo -baz").unwrap_err();
        assert_eq!(
            (error.column(), error.message()),
            (6, "foo or bar expected, baz encountered.")
        );
    }
}
