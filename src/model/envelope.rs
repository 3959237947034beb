use crate::model::Diagnostic;
use crate::tweet::TwitterTweet;
use serde::{Deserialize, Serialize};

/// Top-level JSON document written by `tweetspan resolve`.
///
/// Wraps the resolved tweets with metadata that makes the ranges
/// interpretable on their own (schema version, range encoding, source info).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFile {
    pub schema_version: u32,

    pub locator: LocatorInfo,

    /// How to interpret every `TextRange` in this file.
    pub range_encoding: RangeEncoding,

    pub source: SourceInfo,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,

    pub tweets: Vec<TwitterTweet>,
}

/// Identifies the program that produced the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocatorInfo {
    pub name: String,
    pub version: String,
}

impl Default for LocatorInfo {
    fn default() -> Self {
        Self {
            name: crate::model::LOCATOR_NAME.to_string(),
            version: crate::model::LOCATOR_VERSION.to_string(),
        }
    }
}

/// Captures how `TextRange` offsets should be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeEncoding {
    pub unit: RangeUnit,
    pub base: RangeBase,
}

impl Default for RangeEncoding {
    fn default() -> Self {
        Self {
            unit: RangeUnit::Utf16,
            base: RangeBase::RawText,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeUnit {
    /// UTF-16 code units.
    Utf16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangeBase {
    /// Offsets are measured against the tweet text exactly as received.
    RawText,
    /// Offsets are measured against the text after HTML entity decoding.
    DecodedText,
}

/// Information about the input the file was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Hex MD5 of the input bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5: Option<String>,

    pub byte_len: u64,
}

impl SourceInfo {
    pub fn for_bytes(path: Option<String>, bytes: &[u8]) -> Self {
        Self {
            path,
            md5: Some(format!("{:x}", md5::compute(bytes))),
            byte_len: bytes.len() as u64,
        }
    }
}
