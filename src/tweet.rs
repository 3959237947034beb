//! Decoding of search-API JSON into tweets with resolved entities.
//!
//! This is the edge between the API's record shape and the locator:
//! - required fields are checked here and incomplete records are dropped;
//! - raw `indices` pairs become [`EntityHint`]s, converted to UTF-16
//!   offsets when the API counted code points;
//! - HTML entities in the text are optionally decoded first.
//!
//! Accepted shapes: `{"statuses": [...]}`, a bare array of tweets, or a
//! single tweet object.

use crate::config::{HintUnit, LocatorOptions};
use crate::locate::EntityLocator;
use crate::locate::text::code_point_to_utf16_offset;
use crate::model::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;

pub const CODE_INVALID_INDICES: &str = "decode.invalid_indices";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterUser {
    pub screen_name: String,
    pub name: String,
    pub id: String,
    pub verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

impl fmt::Display for TwitterUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{} ({})", self.screen_name, self.name)?;
        if self.verified {
            write!(f, " ✅")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterMedia {
    pub url: String,
    /// Width over height of the `small` rendition.
    pub aspect_ratio: f64,
}

/// A decoded tweet. Every entity range indexes `text` in UTF-16 units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TwitterTweet {
    pub id: String,
    pub text: String,
    pub user: TwitterUser,
    /// RFC 3339 timestamp.
    pub created: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<TwitterMedia>,
    pub hashtags: Vec<ResolvedEntity>,
    pub urls: Vec<ResolvedEntity>,
    pub user_mentions: Vec<ResolvedEntity>,
}

impl TwitterTweet {
    pub fn entities(&self, kind: EntityKind) -> &[ResolvedEntity] {
        match kind {
            EntityKind::Hashtag => &self.hashtags,
            EntityKind::Url => &self.urls,
            EntityKind::UserMention => &self.user_mentions,
        }
    }
}

/// Tweets that survived decoding plus everything that was dropped on the way.
#[derive(Debug, Clone, Default)]
pub struct DecodeOutput {
    pub tweets: Vec<TwitterTweet>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Deserialize)]
struct RawTweet {
    id_str: Option<String>,
    text: Option<String>,
    full_text: Option<String>,
    created_at: Option<String>,
    user: Option<RawUser>,
    #[serde(default)]
    entities: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawUser {
    id_str: Option<String>,
    name: Option<String>,
    screen_name: Option<String>,
    #[serde(default)]
    verified: Option<bool>,
    #[serde(default)]
    profile_image_url: Option<String>,
}

/// Parses a search response and decodes every tweet in it.
pub fn decode_search_response(
    json: &str,
    opts: &LocatorOptions,
) -> serde_json::Result<DecodeOutput> {
    let root: Value = serde_json::from_str(json)?;
    Ok(decode_value(&root, opts))
}

pub fn decode_value(root: &Value, opts: &LocatorOptions) -> DecodeOutput {
    let mut out = DecodeOutput::default();

    let records: Vec<&Value> = match root {
        Value::Object(map) => match map.get("statuses") {
            Some(Value::Array(items)) => items.iter().collect(),
            _ => vec![root],
        },
        Value::Array(items) => items.iter().collect(),
        _ => {
            out.diagnostics.push(Diagnostic::dropped(
                CODE_DROPPED_TWEET,
                "Response is neither an object nor an array",
            ));
            Vec::new()
        }
    };

    for (i, record) in records.into_iter().enumerate() {
        if let Some(tweet) = decode_tweet(record, opts, &mut out.diagnostics) {
            out.tweets.push(tweet);
        } else {
            tracing::debug!(index = i, "dropping incomplete tweet record");
        }
    }
    out
}

/// Decodes one tweet record. Returns `None` (with a diagnostic) when any of
/// `id_str`, `text`, `created_at` or the user's `id_str`/`name`/`screen_name`
/// is missing or malformed.
pub fn decode_tweet(
    record: &Value,
    opts: &LocatorOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<TwitterTweet> {
    let raw: RawTweet = match RawTweet::deserialize(record) {
        Ok(raw) => raw,
        Err(e) => {
            diagnostics.push(Diagnostic::dropped(
                CODE_DROPPED_TWEET,
                format!("Malformed tweet record: {e}"),
            ));
            return None;
        }
    };

    let id = raw.id_str.clone();
    let dropped = |diagnostics: &mut Vec<Diagnostic>, reason: &str| {
        let mut d = Diagnostic::dropped(CODE_DROPPED_TWEET, format!("Tweet dropped: {reason}"));
        if let Some(id) = &id {
            d = d.with_note(format!("id_str: {id}"));
        }
        diagnostics.push(d);
    };

    let Some(user) = raw.user.and_then(decode_user) else {
        dropped(diagnostics, "missing or incomplete user");
        return None;
    };
    let Some(raw_text) = raw.full_text.or(raw.text) else {
        dropped(diagnostics, "missing text");
        return None;
    };
    let Some(created) = raw.created_at.as_deref().and_then(parse_twitter_date) else {
        dropped(diagnostics, "missing or unparseable created_at");
        return None;
    };
    let Some(id) = raw.id_str else {
        dropped(diagnostics, "missing id_str");
        return None;
    };

    let text = prepare_text(raw_text, opts);

    let entities = raw.entities.as_ref();
    let locator = EntityLocator::new(&text);
    let mut resolve = |kind: EntityKind| {
        let hints = hints_for(kind, entities, &text, opts.hint_unit, diagnostics);
        locator.resolve_all_with_diagnostics(&hints, diagnostics)
    };
    let hashtags = resolve(EntityKind::Hashtag);
    let urls = resolve(EntityKind::Url);
    let user_mentions = resolve(EntityKind::UserMention);

    let media = entities
        .and_then(|e| e.get("media"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|m| {
                    let media = decode_media(m);
                    if media.is_none() {
                        diagnostics.push(
                            Diagnostic::dropped(CODE_DROPPED_MEDIA, "Media item dropped")
                                .with_note(format!("tweet id_str: {id}")),
                        );
                    }
                    media
                })
                .collect()
        })
        .unwrap_or_default();

    Some(TwitterTweet {
        id,
        text,
        user,
        created,
        media,
        hashtags,
        urls,
        user_mentions,
    })
}

/// Builds locator hints for one entity kind from a tweet's `entities` object.
///
/// Items without a usable `indices` pair are skipped and reported.
pub fn hints_for(
    kind: EntityKind,
    entities: Option<&Value>,
    text: &str,
    unit: HintUnit,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<EntityHint> {
    let Some(items) = entities
        .and_then(|e| e.get(kind.entities_key()))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    let mut hints = Vec::with_capacity(items.len());
    for item in items {
        let raw_indices = item.get("indices");
        // a single non-integer element invalidates the whole pair.
        let indices: Vec<i64> = raw_indices
            .and_then(Value::as_array)
            .and_then(|a| a.iter().map(Value::as_i64).collect::<Option<Vec<_>>>())
            .unwrap_or_default();
        let literal = item.get("text").and_then(Value::as_str);

        match EntityHint::from_indices(kind.prefix(), &indices, literal) {
            Some(hint) => hints.push(hint_to_utf16(hint, text, unit)),
            None => diagnostics.push(
                Diagnostic::dropped(
                    CODE_INVALID_INDICES,
                    format!(
                        "Unusable {} indices {}",
                        kind.entities_key(),
                        raw_indices.unwrap_or(&Value::Null)
                    ),
                )
                .with_note(format!("prefix: {:?}", kind.prefix())),
            ),
        }
    }
    hints
}

/// Decodes HTML entities in `raw` when the options ask for it.
pub fn prepare_text(raw: String, opts: &LocatorOptions) -> String {
    if opts.decode_html_entities {
        html_escape::decode_html_entities(&raw).into_owned()
    } else {
        raw
    }
}

/// Rewrites the hint's range into UTF-16 offsets of `text` when the API
/// counted code points.
pub fn hint_to_utf16(mut hint: EntityHint, text: &str, unit: HintUnit) -> EntityHint {
    if unit == HintUnit::CodePoint {
        let r = hint.expected_range;
        let start = code_point_to_utf16_offset(text, r.start);
        let end = code_point_to_utf16_offset(text, r.end());
        hint.expected_range = TextRange::from_bounds(start, end);
    }
    hint
}

fn decode_user(raw: RawUser) -> Option<TwitterUser> {
    Some(TwitterUser {
        screen_name: raw.screen_name?,
        name: raw.name?,
        id: raw.id_str?,
        verified: raw.verified.unwrap_or(false),
        profile_image_url: raw.profile_image_url.filter(|u| !u.is_empty()),
    })
}

fn decode_media(item: &Value) -> Option<TwitterMedia> {
    let small = item.get("sizes")?.get("small")?;
    let width = small.get("w")?.as_f64().filter(|w| *w > 0.0)?;
    let height = small.get("h")?.as_f64().filter(|h| *h > 0.0)?;
    let url = item.get("media_url_https")?.as_str()?;
    Some(TwitterMedia {
        url: url.to_string(),
        aspect_ratio: width / height,
    })
}

/// Parses the API's `created_at` format (`Wed Nov 16 10:00:00 +0000 2022`)
/// into an RFC 3339 string.
pub fn parse_twitter_date(s: &str) -> Option<String> {
    let fmt = format_description!(
        "[weekday repr:short] [month repr:short] [day] [hour]:[minute]:[second] [offset_hour sign:mandatory][offset_minute] [year]"
    );
    let dt = OffsetDateTime::parse(s.trim(), &fmt).ok()?;
    dt.format(&Rfc3339).ok()
}

impl fmt::Display for TwitterTweet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} - {}", self.user, self.created)?;
        writeln!(f, "{}", self.text)?;
        for kind in EntityKind::ALL {
            let list: Vec<String> = self.entities(kind).iter().map(|e| e.to_string()).collect();
            if list.is_empty() {
                writeln!(f, "{}:", kind.entities_key())?;
            } else {
                writeln!(f, "{}: {}", kind.entities_key(), list.join(", "))?;
            }
        }
        write!(f, "id: {}", self.id)
    }
}
