use thiserror::Error;

use crate::diagnostics::ErrorKind;
use crate::locator::Location;

/// Error type returned by a parse run
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A recoverable failure that survived to the top of the grammar
    #[error("{}{location}: {message}", module_prefix(.module))]
    Syntax {
        module: Option<String>,
        location: Location,
        index: usize,
        kind: ErrorKind,
        message: String,
    },

    /// A violated combinator invariant; never caught by alternation
    #[error("{}{location}: internal parser error: {message}", module_prefix(.module))]
    Internal {
        module: Option<String>,
        location: Location,
        index: usize,
        message: String,
    },
}

fn module_prefix(module: &Option<String>) -> String {
    module
        .as_ref()
        .map(|module| format!("{module}: "))
        .unwrap_or_default()
}

impl ParseError {
    pub fn location(&self) -> Location {
        match self {
            ParseError::Syntax { location, .. } | ParseError::Internal { location, .. } => {
                *location
            }
        }
    }

    pub fn line(&self) -> usize {
        self.location().line
    }

    pub fn column(&self) -> usize {
        self.location().column
    }

    /// Character offset of the error
    pub fn index(&self) -> usize {
        match self {
            ParseError::Syntax { index, .. } | ParseError::Internal { index, .. } => *index,
        }
    }

    /// The rendered message without the location prefix
    pub fn message(&self) -> &str {
        match self {
            ParseError::Syntax { message, .. } | ParseError::Internal { message, .. } => message,
        }
    }

    pub fn is_internal(&self) -> bool {
        matches!(self, ParseError::Internal { .. })
    }
}
