//! Source positions and ranges.
//!
//! A [`SourceRange`] names the file it belongs to and carries both ends as
//! full [`Pos`] values (line, column and byte offset), so diagnostics can be
//! rendered without re-scanning the source.

use std::fmt;
use std::sync::Arc;

/// A single position in a source file.
///
/// `line` and `column` are 1-based; `column` counts grapheme clusters.
/// `byte` is the 0-based byte offset from the start of the file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub line: u32,
    pub column: u32,
    pub byte: u32,
}

impl Pos {
    /// The first position of any file.
    pub const START: Pos = Pos {
        line: 1,
        column: 1,
        byte: 0,
    };

    #[inline]
    pub const fn new(line: u32, column: u32, byte: u32) -> Self {
        Pos { line, column, byte }
    }
}

/// A contiguous range of source text.
///
/// The filename is reference-counted: every token of one source unit shares
/// the same allocation, so cloning a range never copies the name.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SourceRange {
    pub filename: Arc<str>,
    pub start: Pos,
    pub end: Pos,
}

impl SourceRange {
    /// Create a new range.
    #[inline]
    pub fn new(filename: Arc<str>, start: Pos, end: Pos) -> Self {
        SourceRange {
            filename,
            start,
            end,
        }
    }

    /// Create a zero-width range at `pos`.
    #[inline]
    pub fn point(filename: Arc<str>, pos: Pos) -> Self {
        SourceRange {
            filename,
            start: pos,
            end: pos,
        }
    }

    /// Combine two ranges into the smallest range covering both.
    ///
    /// Takes the earlier start and the later end, compared by byte offset.
    /// The filename is taken from `a`.
    #[must_use]
    pub fn between(a: &SourceRange, b: &SourceRange) -> SourceRange {
        let start = if a.start.byte <= b.start.byte {
            a.start
        } else {
            b.start
        };
        let end = if a.end.byte >= b.end.byte { a.end } else { b.end };
        SourceRange {
            filename: Arc::clone(&a.filename),
            start,
            end,
        }
    }

    /// A zero-width range at the end of this one.
    #[must_use]
    pub fn end_point(&self) -> SourceRange {
        SourceRange::point(Arc::clone(&self.filename), self.end)
    }

    /// Length of the range in bytes.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end.byte.saturating_sub(self.start.byte)
    }

    /// Check if the range covers no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start.byte == self.end.byte
    }

    /// Check if a byte offset is within this range.
    #[inline]
    pub fn contains_offset(&self, offset: u32) -> bool {
        offset >= self.start.byte && offset < self.end.byte
    }

    /// Check if another range is fully contained within this one.
    #[inline]
    pub fn contains(&self, other: &SourceRange) -> bool {
        self.start.byte <= other.start.byte && other.end.byte <= self.end.byte
    }

    /// Convert to a byte `std::ops::Range`.
    #[inline]
    pub fn to_byte_range(&self) -> std::ops::Range<usize> {
        self.start.byte as usize..self.end.byte as usize
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(
                f,
                "{}:{},{}-{}",
                self.filename, self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(
                f,
                "{}:{},{}-{},{}",
                self.filename, self.start.line, self.start.column, self.end.line, self.end.column
            )
        }
    }
}
