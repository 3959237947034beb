use crate::model::TextRange;
use serde::{Deserialize, Serialize};

/// The entity categories a search API tags inside tweet text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Hashtag,
    Url,
    UserMention,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [EntityKind::Hashtag, EntityKind::Url, EntityKind::UserMention];

    /// The literal every entity of this kind starts with.
    pub fn prefix(self) -> &'static str {
        match self {
            EntityKind::Hashtag => "#",
            EntityKind::Url => "http",
            EntityKind::UserMention => "@",
        }
    }

    /// Key of this kind's list inside the API's `entities` object.
    pub fn entities_key(self) -> &'static str {
        match self {
            EntityKind::Hashtag => "hashtags",
            EntityKind::Url => "urls",
            EntityKind::UserMention => "user_mentions",
        }
    }
}

/// An upstream claim about where an entity sits in a text.
///
/// The claim is trusted approximately: `expected_range` may be off by a few
/// units, or measured in a different unit than the text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityHint {
    pub prefix: String,

    /// Keyword text as reported upstream, with or without `prefix`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub literal_text: Option<String>,

    pub expected_range: TextRange,
}

impl EntityHint {
    pub fn new(prefix: impl Into<String>, expected_range: TextRange) -> Self {
        Self {
            prefix: prefix.into(),
            literal_text: None,
            expected_range,
        }
    }

    pub fn with_literal(mut self, literal: impl Into<String>) -> Self {
        self.literal_text = Some(literal.into());
        self
    }

    /// Builds a hint from a raw `[start, end)` index pair.
    ///
    /// Returns `None` for pairs a locator could never use: fewer than two
    /// indices, a negative start, or `end <= start`. Only the first and last
    /// index are read.
    pub fn from_indices(prefix: &str, indices: &[i64], literal: Option<&str>) -> Option<Self> {
        let start = *indices.first()?;
        let end = *indices.last()?;
        if indices.len() < 2 || start < 0 || end <= start {
            return None;
        }
        Some(Self {
            prefix: prefix.to_string(),
            literal_text: literal.map(str::to_string),
            expected_range: TextRange::from_bounds(start as usize, end as usize),
        })
    }

    /// The string phase 1 looks for: the literal text forced to begin with
    /// the prefix, or the bare prefix when there is no literal.
    pub fn target(&self) -> String {
        match self.literal_text.as_deref() {
            Some(lit) if lit.starts_with(&self.prefix) => lit.to_string(),
            Some(lit) => format!("{}{}", self.prefix, lit),
            None => self.prefix.clone(),
        }
    }

    /// A hint with an empty prefix or zero length can never resolve.
    pub fn is_valid(&self) -> bool {
        !self.prefix.is_empty() && self.expected_range.length > 0
    }
}
