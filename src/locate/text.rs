use crate::model::TextRange;

/// A text viewed as UTF-16 code units.
///
/// The locator does all of its arithmetic on this view so that hint offsets
/// and text offsets are always in the same unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utf16Text {
    units: Vec<u16>,
}

impl Utf16Text {
    pub fn new(text: &str) -> Self {
        Self {
            units: text.encode_utf16().collect(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The range covering the whole text.
    #[inline]
    pub fn bounds(&self) -> TextRange {
        TextRange::new(0, self.units.len())
    }

    /// Units covered by `range`, or `None` if it runs past the end.
    pub fn slice(&self, range: TextRange) -> Option<&[u16]> {
        self.units.get(range.start..range.end())
    }

    /// True when the units at `range` begin with `needle`.
    ///
    /// `range` must lie inside the text; the needle may be longer than the
    /// range, in which case this is false.
    pub fn range_starts_with(&self, range: TextRange, needle: &[u16]) -> bool {
        self.slice(range).is_some_and(|s| s.starts_with(needle))
    }

    /// First occurrence of `needle` at or after `from`.
    pub fn find_from(&self, needle: &[u16], from: usize) -> Option<TextRange> {
        if needle.is_empty() || from >= self.units.len() {
            return None;
        }
        self.units[from..]
            .windows(needle.len())
            .position(|w| w == needle)
            .map(|i| TextRange::new(from + i, needle.len()))
    }

    /// Decodes `range` back to a `String`. An unpaired surrogate at either
    /// edge of the range becomes U+FFFD.
    pub fn substring(&self, range: TextRange) -> Option<String> {
        self.slice(range).map(String::from_utf16_lossy)
    }
}

/// Encodes `s` into UTF-16 units.
pub fn encode(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

/// Maps a UTF-16 offset to a UTF-8 byte offset inside `text`.
///
/// `None` when the offset is past the end or lands between the two halves of
/// a surrogate pair.
pub fn utf16_to_byte_offset(text: &str, offset: usize) -> Option<usize> {
    let mut units = 0usize;
    for (byte, ch) in text.char_indices() {
        if units == offset {
            return Some(byte);
        }
        units += ch.len_utf16();
        if units > offset {
            return None;
        }
    }
    (units == offset).then_some(text.len())
}

/// Maps a code point offset to a UTF-16 offset inside `text`.
///
/// Offsets past the end keep counting one unit per missing code point, so a
/// hint that overshoots the text still overshoots it after conversion.
pub fn code_point_to_utf16_offset(text: &str, offset: usize) -> usize {
    let mut units = 0usize;
    let mut seen = 0usize;
    for ch in text.chars() {
        if seen == offset {
            return units;
        }
        units += ch.len_utf16();
        seen += 1;
    }
    units + (offset - seen)
}
