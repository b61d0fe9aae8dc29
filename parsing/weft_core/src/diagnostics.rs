//! Error tracking threaded through a parse: ranking, merging and rendering.

use std::fmt;

/// Category of a recoverable parse error, ordered by rank.
///
/// At one position a higher-ranked error replaces a lower-ranked one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum ErrorKind {
    /// No error recorded
    #[default]
    None,
    /// A named production was absent
    Expected,
    /// A negative match hit a disallowed input
    Unexpected,
    /// An author-specified hard error
    Failure,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::None => "none",
            ErrorKind::Expected => "expected",
            ErrorKind::Unexpected => "unexpected",
            ErrorKind::Failure => "failure",
        };
        f.write_str(name)
    }
}

/// The furthest, highest-ranked error seen so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ErrorState {
    pub kind: ErrorKind,
    /// Position in the units of the live source
    pub at: usize,
    /// Character offset matching `at`
    pub index: usize,
    /// Labels for `Expected`, or the single subject of the other kinds
    pub messages: Vec<String>,
    /// Explicit rendering of the input at the error, if already known
    pub encountered: Option<String>,
}

impl ErrorState {
    /// Merge an error raised at `at`.
    ///
    /// Further positions win outright. At the same position a higher rank
    /// replaces, equal `Expected` labels are unioned and any other equal-rank
    /// report keeps the first one seen.
    pub fn raise(&mut self, kind: ErrorKind, at: usize, index: usize, subject: String) {
        if at < self.at {
            return;
        }
        if at > self.at || kind > self.kind {
            *self = ErrorState {
                kind,
                at,
                index,
                messages: vec![subject],
                encountered: None,
            };
            return;
        }
        if kind == self.kind && kind == ErrorKind::Expected && !self.messages.contains(&subject) {
            self.messages.push(subject);
        }
    }

    /// Render the message shown to users, given what sits at the error position
    pub fn render(&self, encountered: &str) -> String {
        let encountered = self.encountered.as_deref().unwrap_or(encountered);
        match self.kind {
            ErrorKind::None => String::new(),
            ErrorKind::Expected => format!(
                "{} expected, {} encountered.",
                join_alternatives(&self.messages),
                encountered
            ),
            ErrorKind::Unexpected => format!("unexpected {}.", self.subject()),
            ErrorKind::Failure => self.subject().to_string(),
        }
    }

    fn subject(&self) -> &str {
        self.messages.first().map(String::as_str).unwrap_or_default()
    }
}

/// `a`, `a or b`, `a, b or c`
fn join_alternatives(labels: &[String]) -> String {
    match labels {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}
