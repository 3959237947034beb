pub mod config;
pub mod error;
pub mod locate;
pub mod model;
pub mod report;
pub mod tweet;

pub use config::LocatorOptions;
pub use error::{Error, Result};
pub use locate::EntityLocator;

use clap::ValueEnum;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use walkdir::WalkDir;

/// How a resolved file is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON envelope.
    #[default]
    Json,
    /// Plain-text summary, one block per tweet.
    Summary,
}

/// Decodes a search response held in memory and resolves its entities.
///
/// `path` is only recorded in the envelope.
pub fn resolve_bytes(
    bytes: &[u8],
    path: Option<&Path>,
    opts: &LocatorOptions,
) -> Result<model::ResolvedFile> {
    // if we ever encounter invalid UTF-8, fallback to lossy conversion
    let json = String::from_utf8_lossy(bytes);
    let decoded = tweet::decode_search_response(&json, opts)?;

    let base = if opts.decode_html_entities {
        model::RangeBase::DecodedText
    } else {
        model::RangeBase::RawText
    };

    Ok(model::ResolvedFile {
        schema_version: model::SCHEMA_VERSION,
        locator: model::LocatorInfo::default(),
        range_encoding: model::RangeEncoding {
            unit: model::RangeUnit::Utf16,
            base,
        },
        source: model::SourceInfo::for_bytes(
            path.map(|p| p.to_string_lossy().to_string()),
            bytes,
        ),
        diagnostics: if opts.collect_diagnostics {
            decoded.diagnostics
        } else {
            Vec::new()
        },
        tweets: decoded.tweets,
    })
}

/// Single file mode: read a search response from disk and resolve it.
pub fn resolve_file(input: &Path, opts: &LocatorOptions) -> Result<model::ResolvedFile> {
    let bytes = fs::read(input).map_err(|e| Error::io(input, e))?;
    resolve_bytes(&bytes, Some(input), opts)
}

pub fn render(file: &model::ResolvedFile, format: OutputFormat) -> Result<String> {
    match format {
        // prettify JSON so it's easy to inspect / diff.
        OutputFormat::Json => Ok(serde_json::to_string_pretty(file)?),
        OutputFormat::Summary => Ok(report::render_summary(file)),
    }
}

/// Single file mode: resolve `input`, then write the rendered result to
/// `output` when given. Returns the rendered text either way.
pub fn run(
    input: &Path,
    output: Option<&Path>,
    format: OutputFormat,
    opts: &LocatorOptions,
) -> Result<String> {
    let file = resolve_file(input, opts)?;
    let rendered = render(&file, format)?;

    if let Some(out_path) = output {
        if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(out_path, &rendered).map_err(|e| Error::io(out_path, e))?;
    }
    Ok(rendered)
}

/// Bulk mode: walk `in_root` for `.json` search responses and write one
/// resolved JSON envelope per input under `out_root`, mirroring the
/// directory layout. Returns the number of files written.
pub fn resolve_all_in_dirs(
    in_root: &Path,
    out_root: &Path,
    opts: &LocatorOptions,
) -> Result<usize> {
    let start_time = Instant::now();

    if !in_root.is_dir() {
        return Err(Error::MissingInput(in_root.to_path_buf()));
    }
    // compare resolved paths so `raw` and `raw/../raw` are the same directory.
    let in_root = fs::canonicalize(in_root).map_err(|e| Error::io(in_root, e))?;
    let out_root_abs = absolute_dir(out_root)?;
    if in_root == out_root_abs {
        return Err(Error::Config {
            key: "output_dir".to_string(),
            message: "must differ from the input directory".to_string(),
        });
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(&in_root) {
        let entry = entry?;
        let path = entry.path();
        // an output tree nested inside the input tree is not input.
        if entry.file_type().is_file()
            && path.extension().is_some_and(|ext| ext == "json")
            && !path.starts_with(&out_root_abs)
        {
            entries.push(entry);
        }
    }
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let total = entries.len();
    let mut count = 0;

    for entry in entries {
        let path = entry.path();
        // keep the same relative structure under out_root.
        let relative = path.strip_prefix(&in_root).unwrap_or(path);
        let out_path = out_root.join(relative);

        let file = resolve_file(path, opts)?;
        let json = render(&file, OutputFormat::Json)?;

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(&out_path, json).map_err(|e| Error::io(&out_path, e))?;

        count += 1;
        tracing::info!(
            "[{:>4}/{:>4}] [{:>8.3}s] Resolved {} tweets: {}",
            count,
            total,
            start_time.elapsed().as_secs_f64(),
            file.tweets.len(),
            out_path.display()
        );
    }

    let total_secs = start_time.elapsed().as_secs_f64();
    let avg_str = if count > 0 {
        format!("{:.3}s", total_secs / count as f64)
    } else {
        "-".to_string()
    };
    tracing::info!(
        "Done. Resolved {} files in {:.3}s (avg {}/file).",
        count,
        total_secs,
        avg_str
    );
    Ok(count)
}

/// Resolves `path` against the filesystem even when its tail does not exist
/// yet: the longest existing ancestor is canonicalized and the missing
/// components are appended lexically.
fn absolute_dir(path: &Path) -> Result<PathBuf> {
    let mut missing = Vec::new();
    let mut existing = path;
    let mut base = loop {
        let probe = if existing.as_os_str().is_empty() {
            Path::new(".")
        } else {
            existing
        };
        let err = match fs::canonicalize(probe) {
            Ok(found) => break found,
            Err(e) => e,
        };
        match (existing.parent(), existing.components().next_back()) {
            (Some(parent), Some(last)) => {
                missing.push(last);
                existing = parent;
            }
            _ => return Err(Error::io(path, err)),
        }
    };

    for component in missing.into_iter().rev() {
        match component {
            Component::ParentDir => {
                base.pop();
            }
            Component::CurDir => {}
            other => base.push(other),
        }
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_dir_resolves_aliases_of_missing_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        fs::create_dir(root.join("raw")).unwrap();

        let aliased = dir.path().join("raw").join("..").join("raw");
        assert_eq!(absolute_dir(&aliased).unwrap(), root.join("raw"));

        let fresh = dir.path().join("new").join("..").join("out").join(".");
        assert_eq!(absolute_dir(&fresh).unwrap(), root.join("out"));
    }
}
