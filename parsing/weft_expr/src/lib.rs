//! Expression parsers from operator-precedence tables.
//!
//! Register operators with an [`OperatorTable`], then [`OperatorTable::build`]
//! an expression parser around the operand parser:
//!
//! ```
//! use weft_core::scanners::{integer, is_char};
//! use weft_expr::{binary, OperatorTable};
//!
//! let number = integer().source().map(|digits| digits.parse::<i64>().unwrap_or(0));
//! let expression = OperatorTable::new()
//!     .infixl(is_char('+').retn(binary(|a: i64, b: i64| a + b)), 10)
//!     .infixl(is_char('*').retn(binary(|a: i64, b: i64| a * b)), 20)
//!     .build(number);
//! assert_eq!(expression.parse("2+3*4").unwrap(), 14);
//! ```

pub mod ops;
pub mod table;

pub use ops::{binary, infixl, infixn, infixr, postfix_ops, prefix_ops, unary, BinaryOp, UnaryOp};
pub use table::{Associativity, Operator, OperatorTable};
