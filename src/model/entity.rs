use crate::locate::text::utf16_to_byte_offset;
use crate::model::TextRange;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// An entity the locator found in a text.
///
/// `keyword` is exactly the text covered by `range`. Values are only ever
/// built by the locator; there is no partially-resolved state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct ResolvedEntity {
    pub keyword: String,
    pub range: TextRange,
}

impl ResolvedEntity {
    pub(crate) fn new(keyword: String, range: TextRange) -> Self {
        Self { keyword, range }
    }

    /// The UTF-8 byte range of this entity inside `text`.
    ///
    /// `None` when either end falls inside a surrogate pair or past the end
    /// of `text` (i.e. `text` is not the string this entity was resolved in).
    pub fn byte_range(&self, text: &str) -> Option<Range<usize>> {
        let start = utf16_to_byte_offset(text, self.range.start)?;
        let end = utf16_to_byte_offset(text, self.range.end())?;
        Some(start..end)
    }
}

impl fmt::Display for ResolvedEntity {
    /// `keyword (first, last)` with an inclusive last offset.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {})",
            self.keyword,
            self.range.start,
            self.range.end().saturating_sub(1)
        )
    }
}
