//! The mutable record threaded through one parse.

use log::{error, trace};

use crate::diagnostics::{ErrorKind, ErrorState};
use crate::locator::SourceLocator;
use crate::token::Token;

/// What the live context reads from
#[derive(Debug, Clone, Copy)]
enum Units<'a> {
    /// Bytes of the top-level text
    Chars(&'a str),
    /// Tokens produced by a lexer run
    Tokens(&'a [Token]),
}

/// A saved `(step, at)` pair for backtracking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub step: usize,
    pub at: usize,
}

/// Non-recoverable failure raised when a combinator invariant is violated
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Abort {
    pub index: usize,
    pub message: String,
}

/// Parse state owned by exactly one run.
///
/// The same shape serves character and token input. A lexer bridge or a
/// nested scanner creates a fresh context over the recognized range and
/// copies its outcome back when it finishes.
#[derive(Debug)]
pub struct ParseContext<'a> {
    units: Units<'a>,
    /// Top-level text, also reachable from token input
    text: &'a str,
    /// Exclusive end of the readable units
    end: usize,
    /// Character offset reported once `at` reaches `end`
    eof_index: usize,
    at: usize,
    step: usize,
    error: ErrorState,
    suppress_errors: bool,
    locator: &'a SourceLocator<'a>,
    depth: usize,
    max_depth: usize,
    peak_depth: usize,
    abort: Option<Abort>,
}

impl<'a> ParseContext<'a> {
    /// A character-level context over the whole text of `locator`
    pub fn new(locator: &'a SourceLocator<'a>, max_depth: usize) -> Self {
        let text = locator.source();
        Self {
            units: Units::Chars(text),
            text,
            end: text.len(),
            eof_index: text.len(),
            at: 0,
            step: 0,
            error: ErrorState::default(),
            suppress_errors: false,
            locator,
            depth: 0,
            max_depth,
            peak_depth: 0,
            abort: None,
        }
    }

    /// A fresh character-level context over `from..to` of the same text
    pub(crate) fn nested_chars(&self, from: usize, to: usize) -> ParseContext<'a> {
        trace!("nested scan over {}..{}", from, to);
        ParseContext {
            units: Units::Chars(self.text),
            end: to,
            eof_index: to,
            at: from,
            ..self.fresh()
        }
    }

    /// A fresh token-level context over `tokens`, ending at the current index
    pub(crate) fn nested_tokens<'b>(&self, tokens: &'b [Token]) -> ParseContext<'b>
    where
        'a: 'b,
    {
        trace!("token-level parse over {} tokens", tokens.len());
        ParseContext {
            units: Units::Tokens(tokens),
            text: self.text,
            end: tokens.len(),
            eof_index: self.index(),
            at: 0,
            step: 0,
            error: ErrorState::default(),
            suppress_errors: self.suppress_errors,
            locator: self.locator,
            depth: self.depth,
            max_depth: self.max_depth,
            peak_depth: self.peak_depth,
            abort: None,
        }
    }

    fn fresh(&self) -> ParseContext<'a> {
        ParseContext {
            units: self.units,
            text: self.text,
            end: self.end,
            eof_index: self.eof_index,
            at: self.at,
            step: 0,
            error: ErrorState::default(),
            suppress_errors: self.suppress_errors,
            locator: self.locator,
            depth: self.depth,
            max_depth: self.max_depth,
            peak_depth: self.peak_depth,
            abort: None,
        }
    }

    /// Current position in units (characters or tokens)
    pub fn at(&self) -> usize {
        self.at
    }

    /// Progress counter; grows on every consuming success
    pub fn step(&self) -> usize {
        self.step
    }

    /// Character offset of the current position
    pub fn index(&self) -> usize {
        self.index_of(self.at)
    }

    fn index_of(&self, at: usize) -> usize {
        match self.units {
            Units::Chars(_) => at.min(self.end),
            Units::Tokens(tokens) if at < self.end => tokens[at].index(),
            Units::Tokens(_) => self.eof_index,
        }
    }

    /// Whether every unit has been consumed
    pub fn is_eof(&self) -> bool {
        self.at >= self.end
    }

    /// Whether the units are tokens rather than characters
    pub fn is_token_level(&self) -> bool {
        matches!(self.units, Units::Tokens(_))
    }

    /// The unread characters, or `None` on token input
    pub fn remaining(&self) -> Option<&'a str> {
        match self.units {
            Units::Chars(text) => Some(text.get(self.at..self.end).unwrap_or_default()),
            Units::Tokens(_) => None,
        }
    }

    /// The top-level text, available on both levels
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The token at the current position, if reading tokens and not at the end
    pub fn peek_token(&self) -> Option<&'a Token> {
        match self.units {
            Units::Tokens(tokens) if self.at < self.end => tokens.get(self.at),
            _ => None,
        }
    }

    /// Resolves character offsets of the top-level text
    pub fn locator(&self) -> &'a SourceLocator<'a> {
        self.locator
    }

    /// Consume `units`; a non-empty advance counts as one step
    pub fn advance(&mut self, units: usize) {
        if units > 0 {
            self.at += units;
            self.step += 1;
        }
    }

    /// Save the current `(step, at)` for a later [`Self::restore`]
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            step: self.step,
            at: self.at,
        }
    }

    /// Roll the position back to `checkpoint`; the recorded error stays
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.step = checkpoint.step;
        self.at = checkpoint.at;
    }

    pub(crate) fn set_step(&mut self, step: usize) {
        self.step = step;
    }

    /// Account for progress made inside a nested run
    pub(crate) fn add_steps(&mut self, steps: usize) {
        self.step += steps;
    }

    /// Roll back to `checkpoint` if no step was taken since; report whether it was
    pub(crate) fn still_there(&mut self, checkpoint: Checkpoint) -> bool {
        if self.step == checkpoint.step {
            self.at = checkpoint.at;
            return true;
        }
        false
    }

    /// Whether input was consumed and a step counted since `checkpoint`
    pub(crate) fn progressed_since(&self, checkpoint: Checkpoint) -> bool {
        self.at != checkpoint.at && self.step > checkpoint.step
    }

    /// Record that `label` was expected at the current position
    pub fn expected(&mut self, label: impl Into<String>) {
        self.raise(ErrorKind::Expected, label.into());
    }

    /// Record that `subject` was found where it is not allowed
    pub fn unexpected(&mut self, subject: impl Into<String>) {
        self.raise(ErrorKind::Unexpected, subject.into());
    }

    /// Record a hard failure with a fixed message
    pub fn fail(&mut self, message: impl Into<String>) {
        self.raise(ErrorKind::Failure, message.into());
    }

    fn raise(&mut self, kind: ErrorKind, subject: String) {
        self.raise_at(kind, self.at, subject);
    }

    pub(crate) fn expected_at(&mut self, at: usize, label: String) {
        self.raise_at(ErrorKind::Expected, at, label);
    }

    fn raise_at(&mut self, kind: ErrorKind, at: usize, subject: String) {
        if self.suppress_errors {
            return;
        }
        let index = self.index_of(at);
        self.error.raise(kind, at, index, subject);
    }

    /// Run `f` with error recording turned off
    pub fn without_errors<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let previous = std::mem::replace(&mut self.suppress_errors, true);
        let result = f(self);
        self.suppress_errors = previous;
        result
    }

    pub(crate) fn error_state(&self) -> &ErrorState {
        &self.error
    }

    pub(crate) fn set_error_state(&mut self, error: ErrorState) {
        self.error = error;
    }

    /// Severity of the error recorded so far
    pub fn error_kind(&self) -> ErrorKind {
        self.error.kind
    }

    /// Character offset of the recorded error
    pub fn error_index(&self) -> usize {
        self.error.index
    }

    /// The recorded error rendered for users
    pub fn error_message(&self) -> String {
        self.error.render(&self.describe(self.error.at))
    }

    /// What sits at unit position `at`, as shown in error messages
    pub(crate) fn describe(&self, at: usize) -> String {
        if at >= self.end {
            return "EOF".to_string();
        }
        match self.units {
            Units::Chars(text) => text
                .get(at..)
                .and_then(|rest| rest.chars().next())
                .map(String::from)
                .unwrap_or_else(|| "EOF".to_string()),
            Units::Tokens(tokens) => tokens
                .get(at)
                .map(ToString::to_string)
                .unwrap_or_else(|| "EOF".to_string()),
        }
    }

    /// Copy the outcome of a failed nested run into this context.
    ///
    /// The nested error overwrites ours: errors recorded here while lexing
    /// are false alarms once the lexer itself succeeded.
    pub(crate) fn adopt_nested_failure(&mut self, nested: &ParseContext<'_>) {
        let nested_error = nested.error_state();
        let index = nested_error.index;
        self.at = index;
        if self.suppress_errors {
            return;
        }
        let encountered = nested_error.encountered.clone().or_else(|| {
            (nested_error.at < nested.end).then(|| nested.describe(nested_error.at))
        });
        self.error = ErrorState {
            kind: nested_error.kind,
            at: index,
            index,
            messages: nested_error.messages.clone(),
            encountered,
        };
    }

    /// Carry depth bookkeeping and any abort back from a nested run
    pub(crate) fn absorb(&mut self, nested: &mut ParseContext<'_>) {
        self.peak_depth = self.peak_depth.max(nested.peak_depth);
        if self.abort.is_none() {
            self.abort = nested.abort.take();
        }
    }

    /// Stop the whole parse with a non-recoverable internal error
    pub fn abort(&mut self, message: impl Into<String>) {
        if self.abort.is_some() {
            return;
        }
        let message = message.into();
        let index = self.index();
        error!("parse aborted at index {}: {}", index, message);
        self.abort = Some(Abort { index, message });
    }

    pub fn is_aborted(&self) -> bool {
        self.abort.is_some()
    }

    pub(crate) fn take_abort(&mut self) -> Option<Abort> {
        self.abort.take()
    }

    /// Enter one level of parser nesting; aborts past the configured limit
    pub(crate) fn enter(&mut self) -> bool {
        if self.depth >= self.max_depth {
            let limit = self.max_depth;
            self.abort(format!("recursion depth limit of {} exceeded", limit));
            return false;
        }
        self.depth += 1;
        self.peak_depth = self.peak_depth.max(self.depth);
        true
    }

    pub(crate) fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Deepest parser nesting reached so far
    pub fn peak_depth(&self) -> usize {
        self.peak_depth
    }

    /// Nesting limit past which the parse aborts
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
