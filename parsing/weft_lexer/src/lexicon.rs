//! Named words and the tokenizer that recognizes them.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;
use weft_core::combinators::{list, never, plus, token_with_value};
use weft_core::{Parser, Token, TokenValue};

/// Looks up the token value registered under a word
pub type Words = Arc<dyn Fn(&str) -> Option<Arc<dyn TokenValue>> + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Misuse of a [`Lexicon`] while building a grammar
pub enum LexiconError {
    /// Grammar refers to a word the lexicon never registered
    #[error("token {0} unavailable")]
    UnknownWord(String),
}

/// A set of words (keywords, operators) and the tokenizer producing them.
///
/// Token-level grammars look words up by name with [`Lexicon::token`] and
/// [`Lexicon::phrase`]; the tokenizer feeds the lexer.
#[derive(Clone)]
pub struct Lexicon {
    words: Words,
    tokenizer: Parser<Token>,
}

impl fmt::Debug for Lexicon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexicon")
            .field("tokenizer", &self.tokenizer)
            .finish_non_exhaustive()
    }
}

impl Lexicon {
    /// A lexicon resolving names through `words` and lexing with `tokenizer`
    pub fn new<F>(words: F, tokenizer: Parser<Token>) -> Self
    where
        F: Fn(&str) -> Option<Arc<dyn TokenValue>> + Send + Sync + 'static,
    {
        Self {
            words: Arc::new(words),
            tokenizer,
        }
    }

    /// The character-level parser recognizing every managed word
    pub fn tokenizer(&self) -> Parser<Token> {
        self.tokenizer.clone()
    }

    /// The token value registered as `name`
    pub fn word(&self, name: &str) -> Result<Arc<dyn TokenValue>, LexiconError> {
        (self.words)(name).ok_or_else(|| LexiconError::UnknownWord(name.to_string()))
    }

    /// One token carrying the value of `name`
    pub fn token(&self, name: &str) -> Result<Parser<Token>, LexiconError> {
        Ok(token_with_value(self.word(name)?))
    }

    /// One token carrying the value of any of `names`
    pub fn tokens(&self, names: &[&str]) -> Result<Parser<Token>, LexiconError> {
        if names.is_empty() {
            return Ok(never());
        }
        let alternatives = names
            .iter()
            .map(|name| self.token(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(plus(alternatives))
    }

    /// The tokens of `names` in order, as one atomic step labelled by the phrase
    pub fn phrase(&self, names: &[&str]) -> Result<Parser<Vec<Token>>, LexiconError> {
        let words = names
            .iter()
            .map(|name| self.token(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(list(words).atomic().label(names.join(" ")))
    }

    /// Words of `self`, falling back to `other`; tokenizers tried in the same order
    pub fn union(&self, other: &Lexicon) -> Lexicon {
        let first = Arc::clone(&self.words);
        let fallback = Arc::clone(&other.words);
        Lexicon {
            words: Arc::new(move |name: &str| first(name).or_else(|| fallback(name))),
            tokenizer: plus(vec![self.tokenizer.clone(), other.tokenizer.clone()]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Fragment;
    use pretty_assertions::assert_eq;
    use weft_core::scanners::{identifier, whitespaces};

    fn constant_words(value: Option<&'static str>) -> Lexicon {
        let tokenizer = identifier().source().tokenize();
        Lexicon::new(
            move |_| value.map(|value| Arc::new(value.to_string()) as Arc<dyn TokenValue>),
            tokenizer,
        )
    }

    #[test]
    fn test_word_looks_up_value() {
        let lexicon = constant_words(Some("foo"));
        let word = lexicon.word("whatever").unwrap();
        assert!(word.same_value(&"foo".to_string()));
    }

    #[test]
    fn test_unknown_word_is_a_configuration_error() {
        let lexicon = constant_words(None);
        let error = lexicon.word("whatever").unwrap_err();
        assert_eq!(error, LexiconError::UnknownWord("whatever".to_string()));
        assert_eq!(error.to_string(), "token whatever unavailable");
        assert!(lexicon.token("whatever").is_err());
        assert!(lexicon.phrase(&["whatever"]).is_err());
    }

    #[test]
    fn test_tokenizer_is_shared() {
        let lexicon = constant_words(None);
        assert!(lexicon.tokenizer().same_as(&lexicon.tokenizer));
    }

    fn words(names: &'static [&'static str]) -> Lexicon {
        let tokenizer = identifier()
            .source()
            .map(Fragment::reserved)
            .tokenize();
        Lexicon::new(
            move |name| {
                names
                    .iter()
                    .any(|known| *known == name)
                    .then(|| Arc::new(Fragment::reserved(name)) as Arc<dyn TokenValue>)
            },
            tokenizer,
        )
    }

    #[test]
    fn test_phrase_reports_whole_phrase() {
        let lexicon = words(&["end", "if"]);
        let end_if = lexicon.phrase(&["end", "if"]).unwrap();
        let grammar = end_if.from_with(lexicon.tokenizer(), whitespaces());
        assert_eq!(grammar.parse("end  if").map(|tokens| tokens.len()), Ok(2));
        let error = grammar.parse("if end").unwrap_err();
        assert_eq!(
            (error.column(), error.message()),
            (1, "end if expected, if encountered.")
        );
        // past the first word the inner error stands
        let error = grammar.parse("end end").unwrap_err();
        assert_eq!(
            (error.column(), error.message()),
            (5, "if expected, end encountered.")
        );
    }

    #[test]
    fn test_tokens_of_no_names_never_match() {
        let lexicon = words(&["a"]);
        let nothing = lexicon.tokens(&[]).unwrap();
        let grammar = nothing.from_with(lexicon.tokenizer(), whitespaces());
        assert!(grammar.parse("a").is_err());
    }

    #[test]
    fn test_union_prefers_first_lexicon() {
        let first = constant_words(Some("first"));
        let second = constant_words(Some("second"));
        let union = first.union(&second);
        assert!(union.word("x").unwrap().same_value(&"first".to_string()));

        let empty = constant_words(None);
        let union = empty.union(&second);
        assert!(union.word("x").unwrap().same_value(&"second".to_string()));
        assert!(empty.union(&constant_words(None)).word("x").is_err());
    }
}
