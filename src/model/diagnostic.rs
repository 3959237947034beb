use crate::model::{EntityHint, TextRange};
use serde::{Deserialize, Serialize};

/// Severity level of a diagnostic emitted while decoding or locating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// The phase that produced the diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticPhase {
    Decode,
    Locate,
}

/// A structured record of something that was dropped along the way.
///
/// Diagnostics never abort processing; they only explain why a tweet or an
/// entity is missing from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<DiagnosticPhase>,

    /// A stable identifier like `locate.no_match`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Human readable message.
    pub message: String,

    /// The range this diagnostic refers to, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<TextRange>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

pub const CODE_INVALID_HINT: &str = "locate.invalid_hint";
pub const CODE_NO_MATCH: &str = "locate.no_match";
pub const CODE_DROPPED_TWEET: &str = "decode.dropped_tweet";
pub const CODE_DROPPED_MEDIA: &str = "decode.dropped_media";

impl Diagnostic {
    pub fn invalid_hint(hint: &EntityHint) -> Self {
        Self {
            severity: Severity::Info,
            phase: Some(DiagnosticPhase::Locate),
            code: Some(CODE_INVALID_HINT.to_string()),
            message: format!(
                "Unusable hint with prefix {:?} at {:?}",
                hint.prefix, hint.expected_range
            ),
            range: Some(hint.expected_range),
            notes: Vec::new(),
        }
    }

    pub fn no_match(hint: &EntityHint) -> Self {
        let mut notes = Vec::new();
        if let Some(lit) = &hint.literal_text {
            notes.push(format!("literal text: {lit:?}"));
        }
        Self {
            severity: Severity::Info,
            phase: Some(DiagnosticPhase::Locate),
            code: Some(CODE_NO_MATCH.to_string()),
            message: format!(
                "No keyword with prefix {:?} near {:?}",
                hint.prefix, hint.expected_range
            ),
            range: Some(hint.expected_range),
            notes,
        }
    }

    pub fn dropped(code: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            phase: Some(DiagnosticPhase::Decode),
            code: Some(code.to_string()),
            message: message.into(),
            range: None,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}
