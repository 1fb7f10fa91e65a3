//! Byte-offset spans into a diagnostic blob.

use std::{fmt, ops::Range};

/// A half-open byte range `start..end` into the original diagnostic blob.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a new span from a range.
    pub fn new(range: Range<usize>) -> Self {
        debug_assert!(range.start <= range.end, "span start after end");
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Get the start offset of the span
    pub fn start(&self) -> usize {
        self.start
    }

    /// Get the end offset of the span
    pub fn end(&self) -> usize {
        self.end
    }

    /// Get the length of the span
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the span as a `Range`, suitable for slicing the source.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Narrow the span so it excludes leading and trailing whitespace of
    /// `source[self]`.
    ///
    /// An all-whitespace span collapses to an empty span at its start.
    pub fn trim(&self, source: &str) -> Span {
        let text = &source[self.range()];
        let leading = text.len() - text.trim_start().len();
        let trimmed = text.trim();
        let start = self.start + leading;
        Self::new(start..start + trimmed.len())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Convert a UTF-8 byte offset in `source` to a UTF-16 code unit offset.
///
/// `byte_offset` must fall on a char boundary of `source`.
pub fn utf16_offset(source: &str, byte_offset: usize) -> usize {
    source[..byte_offset].encode_utf16().count()
}
