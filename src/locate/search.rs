//! The two search phases behind [`super::EntityLocator::resolve`].

use super::text::Utf16Text;
use crate::model::TextRange;

/// Offsets applied cumulatively to the probe position: +1, -2, +3, -4, ...
///
/// Starting at `s`, this visits `s, s+1, s-1, s+2, s-2, ...`.
#[derive(Debug, Clone, Copy, Default)]
struct Spiral {
    offset: isize,
}

impl Spiral {
    fn step(&mut self) -> isize {
        self.offset = if self.offset > 0 {
            -(self.offset + 1)
        } else {
            -(self.offset - 1)
        };
        self.offset
    }
}

/// Phase 1: probe ranges of `expected.length` around `expected.start`,
/// nearest first, and accept the first one that starts with `target`.
///
/// Gives up once a probe neither overlaps the text nor overlaps `expected`.
pub(crate) fn spiral_search(
    text: &Utf16Text,
    target: &[u16],
    expected: TextRange,
) -> Option<TextRange> {
    if target.is_empty() || expected.length == 0 || expected.length > text.len() {
        return None;
    }
    // every probe the walk can reach from here lies past the end of the text.
    if expected.start > text.len() + 2 * expected.length {
        return None;
    }

    let text_len = text.len() as isize;
    let len = expected.length as isize;
    let origin = expected.start as isize;

    let mut spiral = Spiral::default();
    let mut pos = origin;
    loop {
        let end = pos + len;
        let overlaps_text = pos < text_len && end > 0;
        let overlaps_expected = pos < origin + len && origin < end;
        if !overlaps_text && !overlaps_expected {
            return None;
        }

        if pos >= 0 && end <= text_len {
            let probe = TextRange::new(pos as usize, expected.length);
            if text.range_starts_with(probe, target) {
                return Some(probe);
            }
        }

        pos += spiral.step();
    }
}

/// Phase 2: the occurrence of `prefix` closest to `expected`, resized to
/// `expected.length`.
///
/// Occurrences are scanned left to right without overlap; a later
/// occurrence only wins on a strictly smaller distance.
pub(crate) fn nearest_prefix(
    text: &Utf16Text,
    prefix: &[u16],
    expected: TextRange,
) -> Option<TextRange> {
    let mut best: Option<(TextRange, usize)> = None;
    let mut from = 0usize;
    while let Some(found) = text.find_from(prefix, from) {
        let distance = found.distance_from(expected);
        if best.is_none_or(|(_, d)| distance < d) {
            best = Some((found, distance));
        }
        from = found.end();
    }

    let (found, _) = best?;
    let resized = found.with_length(expected.length);
    text.bounds().contains(resized).then_some(resized)
}
