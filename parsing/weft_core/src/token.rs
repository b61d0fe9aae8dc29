//! Tokens produced by character-level tokenizers and consumed by token-level parsers.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A value that can ride inside a [`Token`].
///
/// Implemented for every `'static` type that can be displayed, compared and
/// shared across threads, so plain enums and strings work out of the box.
pub trait TokenValue: Any + fmt::Debug + fmt::Display + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    /// Value equality across erased token values
    fn same_value(&self, other: &dyn TokenValue) -> bool;
}

impl<T> TokenValue for T
where
    T: Any + fmt::Debug + fmt::Display + PartialEq + Send + Sync,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn same_value(&self, other: &dyn TokenValue) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| other == self)
    }
}

/// An immutable lexed unit: where it starts, how long it is and what it means
#[derive(Clone)]
pub struct Token {
    index: usize,
    length: usize,
    value: Arc<dyn TokenValue>,
}

impl Token {
    /// A token of `length` characters starting at `index`
    pub fn new(index: usize, length: usize, value: impl TokenValue) -> Self {
        Self::from_shared(index, length, Arc::new(value))
    }

    pub fn from_shared(index: usize, length: usize, value: Arc<dyn TokenValue>) -> Self {
        Self {
            index,
            length,
            value,
        }
    }

    /// Character offset of the first character
    pub fn index(&self) -> usize {
        self.index
    }

    /// Length of the recognized text in bytes
    pub fn length(&self) -> usize {
        self.length
    }

    pub fn value(&self) -> &dyn TokenValue {
        self.value.as_ref()
    }

    pub fn shared_value(&self) -> Arc<dyn TokenValue> {
        Arc::clone(&self.value)
    }

    /// Downcast the value to a concrete type
    pub fn value_as<V: Any>(&self) -> Option<&V> {
        self.value.as_ref().as_any().downcast_ref::<V>()
    }

    /// Whether this token carries a value equal to `value`
    pub fn has_value(&self, value: &dyn TokenValue) -> bool {
        self.value.as_ref().same_value(value)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.length == other.length && self.has_value(other.value())
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("index", &self.index)
            .field("length", &self.length)
            .field("value", &self.value)
            .finish()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.value.as_ref(), f)
    }
}
