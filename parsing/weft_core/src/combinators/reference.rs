use std::sync::{Arc, PoisonError, RwLock};

use crate::parser::Parser;

const UNINITIALIZED: &str = "Uninitialized lazy parser reference";

/// A late-bound slot for recursive grammars.
///
/// Hand out [`Reference::lazy`] while building the grammar, then fill the
/// slot with [`Reference::set`] once the real parser exists.
pub struct Reference<T> {
    slot: Arc<RwLock<Option<Parser<T>>>>,
}

impl<T> Clone for Reference<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T: 'static> Default for Reference<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Reference<T> {
    /// An empty slot
    pub fn new() -> Self {
        Self {
            slot: Arc::new(RwLock::new(None)),
        }
    }

    /// The parser currently in the slot
    pub fn get(&self) -> Option<Parser<T>> {
        read_slot(&self.slot)
    }

    /// Fill the slot, replacing whatever it held
    pub fn set(&self, parser: Parser<T>) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(parser);
    }

    /// A parser that delegates to whatever the slot holds when it runs
    pub fn lazy(&self) -> Parser<T> {
        let slot = Arc::clone(&self.slot);
        Parser::new("lazy", move |ctx| match read_slot(&slot) {
            Some(parser) => parser.run(ctx),
            None => {
                ctx.fail(UNINITIALIZED);
                None
            }
        })
    }
}

// Every write replaces the whole slot, so a poisoned lock still holds a usable parser.
fn read_slot<T>(slot: &RwLock<Option<Parser<T>>>) -> Option<Parser<T>> {
    slot.read().unwrap_or_else(PoisonError::into_inner).clone()
}
