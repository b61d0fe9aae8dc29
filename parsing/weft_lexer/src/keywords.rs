//! Keyword and operator lexicons.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use lazy_static::lazy_static;
use weft_core::combinators::longest;
use weft_core::scanners::{identifier, string};
use weft_core::{Parser, TokenValue};

use crate::fragment::Fragment;
use crate::lexicon::Lexicon;

lazy_static! {
    static ref WORD_SCANNER: Parser<String> = identifier().source();
}

/// The default scanner for keyword-like words: identifier text
pub fn word_scanner() -> Parser<String> {
    WORD_SCANNER.clone()
}

/// How keyword lookups treat letter case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Words match exactly
    Sensitive,
    /// Keywords match ignoring case and carry their lower-case spelling
    Insensitive,
}

impl Case {
    fn key(self, word: &str) -> String {
        match self {
            Case::Sensitive => word.to_string(),
            Case::Insensitive => word.to_lowercase(),
        }
    }
}

/// `names` without duplicates under `case`, in sorted key order.
///
/// Of several names sharing a key the first one listed is kept.
pub fn unique(case: Case, names: &[&str]) -> Vec<String> {
    let mut kept = BTreeMap::new();
    for name in names {
        kept.entry(case.key(name)).or_insert_with(|| name.to_string());
    }
    kept.into_values().collect()
}

/// A lexicon of reserved words.
///
/// `scanner` recognizes candidate words. Text naming a keyword becomes a
/// reserved [`Fragment`]; any other text goes through `fallback`, usually
/// [`identifier_fragment`](crate::fragment::identifier_fragment).
pub fn keywords<F, V>(scanner: Parser<String>, names: &[&str], case: Case, fallback: F) -> Lexicon
where
    F: Fn(&str) -> V + Send + Sync + 'static,
    V: TokenValue,
{
    let reserved: HashMap<String, Arc<dyn TokenValue>> = unique(case, names)
        .into_iter()
        .map(|name| {
            let value: Arc<dyn TokenValue> = Arc::new(Fragment::reserved(name.as_str()));
            (case.key(&name), value)
        })
        .collect();
    let reserved = Arc::new(reserved);

    let lookup = Arc::clone(&reserved);
    let tokenizer = scanner
        .map(move |text| match lookup.get(&case.key(&text)) {
            Some(value) => Arc::clone(value),
            None => Arc::new(fallback(&text)) as Arc<dyn TokenValue>,
        })
        .tokenize_shared()
        .named("keyword");

    Lexicon::new(move |name| reserved.get(&case.key(name)).cloned(), tokenizer)
}

/// A lexicon of operators, each recognized by the longest literal that matches
pub fn operators(ops: &[&str]) -> Lexicon {
    let names = unique(Case::Sensitive, ops);
    let values: HashMap<String, Arc<dyn TokenValue>> = names
        .iter()
        .map(|op| {
            let value: Arc<dyn TokenValue> = Arc::new(Fragment::reserved(op.as_str()));
            (op.clone(), value)
        })
        .collect();
    let scanners = names
        .iter()
        .map(|op| {
            let value = Arc::clone(&values[op]);
            string(op.as_str())
                .map(move |_| Arc::clone(&value))
                .tokenize_shared()
        })
        .collect();
    let tokenizer = longest(scanners).named("operator");
    Lexicon::new(move |name| values.get(name).cloned(), tokenizer)
}
