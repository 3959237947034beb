//! Entity recovery from drifting index hints.
//!
//! Upstream APIs tag hashtags, URLs and mentions with `[start, end)` indices
//! that are often slightly wrong for the text we actually hold (stale
//! offsets, a different counting unit, HTML escaping). The locator treats
//! those indices as a starting point:
//!
//! 1. a spiral search around the hinted position for the full keyword, then
//! 2. a scan for the bare prefix anywhere in the text, keeping the
//!    occurrence nearest to the hint.
//!
//! A hint that neither phase can place is dropped. That is routine, not an
//! error, so nothing here returns `Result`.

mod search;
pub mod text;

use crate::model::{Diagnostic, EntityHint, ResolvedEntity, TextRange};
use search::{nearest_prefix, spiral_search};
use text::{Utf16Text, encode};

/// Why a hint did not resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Miss {
    InvalidHint,
    NoMatch,
}

/// Resolves hints against a single text.
///
/// The text is encoded to UTF-16 once, so build one locator per text and
/// reuse it for every hint of that text. A locator holds no mutable state:
/// it can be shared across threads and gives the same answer every time.
#[derive(Debug, Clone)]
pub struct EntityLocator {
    text: Utf16Text,
}

impl EntityLocator {
    pub fn new(text: &str) -> Self {
        Self {
            text: Utf16Text::new(text),
        }
    }

    pub fn text(&self) -> &Utf16Text {
        &self.text
    }

    /// Finds the range in the text that best matches `hint`.
    pub fn resolve(&self, hint: &EntityHint) -> Option<ResolvedEntity> {
        self.try_resolve(hint).ok()
    }

    /// Like [`Self::resolve`], but records a [`Diagnostic`] for a dropped hint.
    pub fn resolve_with_diagnostics(
        &self,
        hint: &EntityHint,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<ResolvedEntity> {
        match self.try_resolve(hint) {
            Ok(entity) => Some(entity),
            Err(Miss::InvalidHint) => {
                diagnostics.push(Diagnostic::invalid_hint(hint));
                None
            }
            Err(Miss::NoMatch) => {
                diagnostics.push(Diagnostic::no_match(hint));
                None
            }
        }
    }

    /// Resolves every hint independently, keeping successes in input order.
    pub fn resolve_all(&self, hints: &[EntityHint]) -> Vec<ResolvedEntity> {
        hints.iter().filter_map(|h| self.resolve(h)).collect()
    }

    pub fn resolve_all_with_diagnostics(
        &self,
        hints: &[EntityHint],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<ResolvedEntity> {
        hints
            .iter()
            .filter_map(|h| self.resolve_with_diagnostics(h, diagnostics))
            .collect()
    }

    fn try_resolve(&self, hint: &EntityHint) -> Result<ResolvedEntity, Miss> {
        if !hint.is_valid() {
            tracing::debug!(
                prefix = %hint.prefix,
                expected = ?hint.expected_range,
                "dropping unusable hint"
            );
            return Err(Miss::InvalidHint);
        }

        let expected = hint.expected_range;
        let target = encode(&hint.target());

        let range = match spiral_search(&self.text, &target, expected) {
            Some(r) => Some(r),
            None => nearest_prefix(&self.text, &encode(&hint.prefix), expected),
        };

        match range.and_then(|r| self.entity_at(r)) {
            Some(entity) => {
                if entity.range != expected {
                    tracing::trace!(
                        keyword = %entity.keyword,
                        expected = ?expected,
                        found = ?entity.range,
                        "corrected drifting hint"
                    );
                }
                Ok(entity)
            }
            None => {
                tracing::debug!(
                    prefix = %hint.prefix,
                    expected = ?expected,
                    text_len = self.text.len(),
                    "no keyword with prefix near hint"
                );
                Err(Miss::NoMatch)
            }
        }
    }

    fn entity_at(&self, range: TextRange) -> Option<ResolvedEntity> {
        let keyword = self.text.substring(range)?;
        Some(ResolvedEntity::new(keyword, range))
    }
}

/// One-shot form of [`EntityLocator::resolve`].
pub fn resolve(text: &str, hint: &EntityHint) -> Option<ResolvedEntity> {
    EntityLocator::new(text).resolve(hint)
}

/// One-shot form of [`EntityLocator::resolve_all`].
pub fn resolve_all(text: &str, hints: &[EntityHint]) -> Vec<ResolvedEntity> {
    EntityLocator::new(text).resolve_all(hints)
}
