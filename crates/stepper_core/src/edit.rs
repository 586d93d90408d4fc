//! Byte range of an in-place text edit.

use crate::text::clamp_to_char_boundary;
use std::ops::Range;

/// The part of the field text a keystroke replaces, as a byte range.
///
/// The range is always normalized such that `start <= end`. Hosts may hand
/// in offsets that are stale or land inside a multi-byte character; they
/// are clamped when the edit is applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditRange {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl EditRange {
    /// Create a new edit range, normalized so `start <= end`.
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// Zero-width range: a pure insertion at `caret`.
    #[inline]
    pub fn at(caret: usize) -> Self {
        Self::new(caret, caret)
    }

    /// Range covering the whole of `text`.
    #[inline]
    pub fn all(text: &str) -> Self {
        Self::new(0, text.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Build the text that results from replacing this range of `text` with
    /// `replacement`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stepper_core::EditRange;
    ///
    /// assert_eq!(EditRange::at(1).apply("5", "0"), "50");
    /// assert_eq!(EditRange::new(0, 2).apply("190", "2"), "20");
    /// assert_eq!(EditRange::new(3, 99).apply("123", "4"), "1234");
    /// ```
    pub fn apply(&self, text: &str, replacement: &str) -> String {
        let start = clamp_to_char_boundary(text, self.start);
        let end = clamp_to_char_boundary(text, self.end).max(start);

        let mut out = String::with_capacity(text.len() - (end - start) + replacement.len());
        out.push_str(&text[..start]);
        out.push_str(replacement);
        out.push_str(&text[end..]);
        out
    }
}

impl From<Range<usize>> for EditRange {
    #[inline]
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reversed_offsets_are_swapped() {
        assert_eq!(EditRange::new(4, 1), EditRange { start: 1, end: 4 });
        assert_eq!(EditRange::new(4, 1).len(), 3);
    }

    #[test]
    fn insertion_is_empty() {
        assert!(EditRange::at(3).is_empty());
        assert!(!EditRange::from(1..2).is_empty());
    }

    #[test]
    fn apply_replaces_whole_text() {
        assert_eq!(EditRange::all("190").apply("190", ""), "");
        assert_eq!(EditRange::all("").apply("", "-"), "-");
    }

    #[test]
    fn apply_clamps_inside_multibyte_chars() {
        // Stale offsets pointing into '€' are pulled back to its start.
        assert_eq!(EditRange::new(2, 3).apply("1€2", "x"), "1x€2");
        assert_eq!(EditRange::new(1, 4).apply("1€2", ""), "12");
    }
}
