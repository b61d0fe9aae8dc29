//! Combinators that build new parsers out of existing ones.

pub mod alternation;
pub mod primitives;
pub mod reference;
pub mod repetition;
pub mod sequence;

pub use alternation::{longer, longest, or, plus, shorter, shortest};
pub use primitives::{
    always, any_token, constant, eof, expect, fail, index, location, never, token, token_eq,
    token_with_value, unexpected,
};
pub use reference::Reference;
pub use sequence::{list, sequence, sequence2, sequence3, sequence4, sequence5};
