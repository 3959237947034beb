//! Options controlling how raw records are turned into locator input.
//!
//! Options come from (lowest to highest precedence) built-in defaults, a
//! YAML file, and CLI flags.

use crate::error::{Error, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "tweetspan.yaml";

/// Unit the upstream API used for entity `indices`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum HintUnit {
    /// UTF-16 code units; passed to the locator as-is.
    #[default]
    Utf16,
    /// Unicode scalar values; converted to UTF-16 offsets before locating.
    CodePoint,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocatorOptions {
    pub hint_unit: HintUnit,

    /// Decode `&amp;`-style entities in tweet text before locating.
    ///
    /// Search APIs escape tweet text but compute entity indices over the
    /// unescaped form, so every `&amp;` before an entity shifts it by four.
    pub decode_html_entities: bool,

    /// Include decode/locate diagnostics in the output envelope.
    pub collect_diagnostics: bool,
}

impl LocatorOptions {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml_str(&text)
    }

    /// Loads `explicit` if given, else `tweetspan.yaml` in `dir` if it
    /// exists, else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate = dir.join(DEFAULT_CONFIG_FILE);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "loading config");
            return Self::load(&candidate);
        }
        Ok(Self::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        assert_eq!(LocatorOptions::from_yaml_str("").unwrap(), LocatorOptions::default());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let opts = LocatorOptions::from_yaml_str("hint_unit: code_point\n").unwrap();
        assert_eq!(opts.hint_unit, HintUnit::CodePoint);
        assert!(!opts.decode_html_entities);
        assert!(!opts.collect_diagnostics);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = LocatorOptions::from_yaml_str("hint_units: utf16\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)), "{err}");
    }

    #[test]
    fn discover_prefers_explicit_then_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            LocatorOptions::discover(None, dir.path()).unwrap(),
            LocatorOptions::default()
        );

        fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "decode_html_entities: true\n",
        )
        .unwrap();
        assert!(
            LocatorOptions::discover(None, dir.path())
                .unwrap()
                .decode_html_entities
        );

        let explicit = dir.path().join("other.yaml");
        fs::write(&explicit, "collect_diagnostics: true\n").unwrap();
        let opts = LocatorOptions::discover(Some(&explicit), dir.path()).unwrap();
        assert!(opts.collect_diagnostics);
        assert!(!opts.decode_html_entities);
    }
}
