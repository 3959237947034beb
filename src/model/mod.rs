//! Data records shared by the locator, the decoder and the output envelope.
//!
//! Every `TextRange` in this crate counts **UTF-16 code units** over the text
//! it was resolved in. Conversions to or from other units happen at the
//! decoding edge, never inside the locator.

mod diagnostic;
mod entity;
mod envelope;
mod hint;
mod range;

pub use diagnostic::*;
pub use entity::*;
pub use envelope::*;
pub use hint::*;
pub use range::*;

/// JSON schema version for the output envelope.
///
/// Bump this when making non-backwards-compatible changes to the JSON structure.
pub const SCHEMA_VERSION: u32 = 1;

/// The locator name stored in the JSON envelope.
pub const LOCATOR_NAME: &str = "tweetspan";

/// The locator version stored in the JSON envelope.
pub const LOCATOR_VERSION: &str = env!("CARGO_PKG_VERSION");
