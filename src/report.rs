//! Resolved file -> plain-text summary.
//!
//! One block per tweet, in the order the tweets were decoded:
//!
//! ```text
//! @ucddublin (UCD) ✅ - 2022-11-16T10:00:00Z
//! Check out #UCD today!
//! hashtags: #UCD (10, 13)
//! urls:
//! user_mentions:
//! id: 1592
//! ```

use crate::model::ResolvedFile;

pub fn render_summary(file: &ResolvedFile) -> String {
    let mut blocks: Vec<String> = file.tweets.iter().map(ToString::to_string).collect();

    if !file.diagnostics.is_empty() {
        let mut diag = String::from("diagnostics:");
        for d in &file.diagnostics {
            diag.push_str("\n  - ");
            if let Some(code) = &d.code {
                diag.push_str(&format!("[{code}] "));
            }
            diag.push_str(&d.message);
        }
        blocks.push(diag);
    }

    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LocatorOptions;
    use crate::model::*;
    use crate::tweet::decode_search_response;

    fn file_for(json: &str) -> ResolvedFile {
        let out = decode_search_response(json, &LocatorOptions::default()).unwrap();
        ResolvedFile {
            schema_version: SCHEMA_VERSION,
            locator: LocatorInfo::default(),
            range_encoding: RangeEncoding::default(),
            source: SourceInfo::for_bytes(None, json.as_bytes()),
            diagnostics: out.diagnostics,
            tweets: out.tweets,
        }
    }

    #[test]
    fn summary_lists_entities_with_inclusive_ranges() {
        let json = r##"{"statuses": [{
            "id_str": "1592",
            "text": "Check out #UCD today!",
            "created_at": "Wed Nov 16 10:00:00 +0000 2022",
            "user": {"id_str": "7", "name": "UCD", "screen_name": "ucddublin", "verified": true},
            "entities": {"hashtags": [{"indices": [10, 14], "text": "UCD"}]}
        }]}"##;

        let want = "@ucddublin (UCD) ✅ - 2022-11-16T10:00:00Z\n\
                    Check out #UCD today!\n\
                    hashtags: #UCD (10, 13)\n\
                    urls:\n\
                    user_mentions:\n\
                    id: 1592";
        assert_eq!(render_summary(&file_for(json)), want);
    }

    #[test]
    fn summary_keeps_tweet_text_verbatim() {
        // trailing spaces are part of the text the ranges index into.
        let json = r##"[{
            "id_str": "9",
            "text": "#UCD  \nnext line ",
            "created_at": "Wed Nov 16 10:00:00 +0000 2022",
            "user": {"id_str": "7", "name": "UCD", "screen_name": "ucddublin"},
            "entities": {"hashtags": [{"indices": [0, 4], "text": "UCD"}]}
        }]"##;

        let out = render_summary(&file_for(json));
        assert!(out.contains("\n#UCD  \nnext line \nhashtags: #UCD (0, 3)\nurls:\n"), "{out:?}");
    }

    #[test]
    fn summary_appends_diagnostics() {
        let json = r#"[{"id_str": "1", "text": "x"}]"#;
        let out = render_summary(&file_for(json));
        assert!(out.starts_with("diagnostics:\n  - [decode.dropped_tweet]"), "{out}");
    }
}
