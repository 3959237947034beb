use serde::{Deserialize, Serialize};

/// A `{ start, length }` range into a text, measured in **UTF-16 code units**.
///
/// This is the only unit the locator understands. It matches the offsets most
/// search APIs (and the platform string types their clients use) hand out, so
/// hints can be compared against it without a conversion step.
///
/// Offsets coming from anywhere else (code points, UTF-8 bytes) must be
/// converted before they reach the locator; see [`crate::tweet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, Hash)]
pub struct TextRange {
    pub start: usize,
    pub length: usize,
}

impl TextRange {
    #[inline]
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Builds a range from a half-open `[start, end)` index pair.
    #[inline]
    pub fn from_bounds(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "TextRange start must be <= end");
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    /// Exclusive end offset, saturating at `usize::MAX`.
    #[inline]
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.length)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// True when `other` lies entirely inside `self`.
    #[inline]
    pub fn contains(&self, other: TextRange) -> bool {
        other.start >= self.start && other.end() <= self.end()
    }

    /// True when the two half-open ranges share at least one unit.
    #[inline]
    pub fn intersects(&self, other: TextRange) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Gap between the nearer ends of two ranges; 0 when they intersect.
    pub fn distance_from(&self, other: TextRange) -> usize {
        if self.intersects(other) {
            0
        } else if self.end() <= other.start {
            other.start - self.end()
        } else {
            self.start - other.end()
        }
    }

    /// Same start, different length.
    #[inline]
    pub fn with_length(self, length: usize) -> TextRange {
        TextRange {
            start: self.start,
            length,
        }
    }
}
