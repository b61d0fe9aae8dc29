//! Backtracking parser combinators.
//!
//! Grammars are built from small [`Parser`] values and run with [`parse`].
//! Character-level scanners can feed token-level grammars through
//! [`Parser::from`], and errors from either level are reported with a
//! resolved line and column.
//!
//! ```
//! use weft_core::scanners::{is_char, integer};
//!
//! let digits = integer().source().sep_by1(is_char(','));
//! assert_eq!(digits.parse("1,22").unwrap(), vec!["1", "22"]);
//! ```

pub mod bridge;
pub mod combinators;
pub mod config;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod locator;
pub mod parser;
pub mod scanners;
pub mod token;

use log::debug;

pub use combinators::Reference;
pub use config::ParseConfig;
pub use context::{Checkpoint, ParseContext};
pub use diagnostics::ErrorKind;
pub use error::ParseError;
pub use locator::{Location, SourceLocator};
pub use parser::Parser;
pub use token::{Token, TokenValue};

/// Parse all of `source` with the default configuration
pub fn parse<T: 'static>(source: &str, parser: &Parser<T>) -> Result<T, ParseError> {
    parse_with(source, parser, &ParseConfig::default())
}

/// Parse all of `source`; trailing input is an error
pub fn parse_with<T: 'static>(
    source: &str,
    parser: &Parser<T>,
    config: &ParseConfig,
) -> Result<T, ParseError> {
    debug!(
        "parsing {} bytes with {} (depth limit {})",
        source.len(),
        parser,
        config.max_depth
    );
    let locator = SourceLocator::new(source);
    let mut ctx = ParseContext::new(&locator, config.max_depth);
    let outcome = parser
        .run(&mut ctx)
        .and_then(|value| combinators::eof().run(&mut ctx).map(|_| value));

    let resolve = |index: usize| locator.locate(index.min(source.len())).unwrap_or_default();
    if let Some(abort) = ctx.take_abort() {
        return Err(ParseError::Internal {
            module: config.module.clone(),
            location: resolve(abort.index),
            index: abort.index,
            message: abort.message,
        });
    }
    debug!("parse finished, peak depth {}", ctx.peak_depth());
    match outcome {
        Some(value) => Ok(value),
        None => {
            let index = ctx.error_index();
            let message = ctx.error_message();
            debug!("parse failed at index {}: {}", index, message);
            Err(ParseError::Syntax {
                module: config.module.clone(),
                location: resolve(index),
                index,
                kind: ctx.error_kind(),
                message,
            })
        }
    }
}

#[cfg(test)]
static INIT: std::sync::Once = std::sync::Once::new();

/// Initialize the logger for tests
#[cfg(test)]
pub(crate) fn init_test_logger() {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

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
        log::info!("Test logger initialized");
    });
}
