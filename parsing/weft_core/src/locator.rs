//! Resolution of flat source offsets into line and column numbers.
//!
//! The locator memoizes every line break it walks past, so forward queries
//! (the common case while reporting errors for a left-to-right parse) cost
//! amortized O(1) and backward queries fall back to a binary search over the
//! recorded breaks.

use std::cell::RefCell;
use std::fmt;

use thiserror::Error;

const LINE_BREAK: char = '\n';

/// A 1-based line and column pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in characters, not bytes)
    pub column: usize,
}

impl Location {
    /// A position at 1-based `line` and `column`
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Returned when an offset past the end of the source is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} is out of bounds for a source of length {len}")]
pub struct IndexOutOfBounds {
    pub index: usize,
    pub len: usize,
}

#[derive(Debug, Default)]
struct Cursor {
    /// Offsets of every line break scanned so far, ascending
    line_breaks: Vec<usize>,
    /// First offset not yet scanned
    next_index: usize,
    /// Column index (0-based) of `next_index` on the current line
    next_column: usize,
}

/// Maps byte offsets of a source text to [`Location`]s.
///
/// Interior mutability keeps the cache private to one parse: a locator is
/// created per run and only ever borrowed by that run's contexts.
#[derive(Debug)]
pub struct SourceLocator<'s> {
    source: &'s str,
    line_origin: usize,
    column_origin: usize,
    cursor: RefCell<Cursor>,
}

impl<'s> SourceLocator<'s> {
    /// Create a locator whose first character sits at line 1, column 1
    pub fn new(source: &'s str) -> Self {
        Self::with_origin(source, 1, 1)
    }

    /// Create a locator whose first character sits at `line`, `column`
    pub fn with_origin(source: &'s str, line: usize, column: usize) -> Self {
        Self {
            source,
            line_origin: line,
            column_origin: column,
            cursor: RefCell::new(Cursor::default()),
        }
    }

    /// The text being located
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// Resolve `index`, scanning forward or looking up recorded breaks.
    ///
    /// `index == source.len()` is the end-of-input position and is valid.
    pub fn locate(&self, index: usize) -> Result<Location, IndexOutOfBounds> {
        if index < self.cursor.borrow().next_index {
            return Ok(self.lookup(index));
        }
        self.scan_to(index)
    }

    /// Resolve an already scanned offset by binary search over the breaks.
    ///
    /// Only valid below the cursor; later offsets go through [`Self::scan_to`].
    pub(crate) fn lookup(&self, index: usize) -> Location {
        let cursor = self.cursor.borrow();
        let line = binary_search(&cursor.line_breaks, index);
        if line == 0 {
            return self.location(0, self.column_span(0, index));
        }
        let previous_break = cursor.line_breaks[line - 1];
        self.location(line, self.column_span(previous_break + 1, index))
    }

    /// Advance the cursor up to and including `index`, recording breaks
    pub fn scan_to(&self, index: usize) -> Result<Location, IndexOutOfBounds> {
        let len = self.source.len();
        if index > len {
            return Err(IndexOutOfBounds { index, len });
        }
        let mut cursor = self.cursor.borrow_mut();
        if index < cursor.next_index {
            drop(cursor);
            return Ok(self.lookup(index));
        }

        let eof = index == len;
        let start = cursor.next_index;
        let mut column = cursor.next_column;
        let mut next_index = start;
        for (offset, ch) in self.source[start..].char_indices() {
            let at = start + offset;
            if at > index {
                break;
            }
            if ch == LINE_BREAK {
                cursor.line_breaks.push(at);
                column = 0;
            } else {
                column += 1;
            }
            next_index = at + ch.len_utf8();
        }
        cursor.next_index = if eof { len } else { next_index };
        cursor.next_column = column;

        let lines = cursor.line_breaks.len();
        if eof {
            return Ok(self.location(lines, column));
        }
        match (column, lines.checked_sub(1)) {
            // `index` itself is a line break: it belongs to the line it ends
            (0, Some(last_line)) => Ok(self.line_break_location(&cursor.line_breaks, last_line)),
            _ => Ok(self.location(lines, column.saturating_sub(1))),
        }
    }

    fn line_break_location(&self, line_breaks: &[usize], line: usize) -> Location {
        let line_start = match line {
            0 => 0,
            _ => line_breaks[line - 1] + 1,
        };
        self.location(line, self.column_span(line_start, line_breaks[line]))
    }

    fn location(&self, line: usize, column: usize) -> Location {
        let first_column = if line == 0 { self.column_origin } else { 1 };
        Location::new(self.line_origin + line, first_column + column)
    }

    /// Number of characters between two offsets
    fn column_span(&self, from: usize, to: usize) -> usize {
        match self.source.get(from..to) {
            Some(text) if !text.is_ascii() => text.chars().count(),
            _ => to.saturating_sub(from),
        }
    }
}

/// Index of `value` in `ascending`, or the index it would be inserted at.
pub fn binary_search(ascending: &[usize], value: usize) -> usize {
    ascending.partition_point(|&x| x < value)
}
