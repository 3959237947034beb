use tweetspan::model::{EntityHint, TextRange};
use tweetspan::{EntityLocator, LocatorOptions};

#[test]
fn huge_offsets_do_not_overflow() {
    let locator = EntityLocator::new("tail #tag");
    for (start, length) in [
        (usize::MAX, 4),
        (usize::MAX - 1, usize::MAX),
        (0, usize::MAX),
        (isize::MAX as usize, 3),
    ] {
        let hint = EntityHint::new("#", TextRange::new(start, length));
        let _ = locator.resolve(&hint);
    }

    // a far-away start still finds the only hashtag through the fallback.
    let hint = EntityHint::new("#", TextRange::new(usize::MAX - 8, 4));
    let e = locator.resolve(&hint).expect("fallback");
    assert_eq!(e.range, TextRange::new(5, 4));
}

#[test]
fn empty_text_never_resolves() {
    let locator = EntityLocator::new("");
    for prefix in ["#", "@", "http"] {
        let hint = EntityHint::new(prefix, TextRange::new(0, 1));
        assert_eq!(locator.resolve(&hint), None);
    }
}

#[test]
fn range_splitting_a_surrogate_pair_is_lossy_not_fatal() {
    // "#" then "😀" (two units); a length-2 range cuts the pair in half.
    let locator = EntityLocator::new("#😀");
    let e = locator
        .resolve(&EntityHint::new("#", TextRange::new(0, 2)))
        .expect("resolved");
    assert_eq!(e.keyword, "#\u{FFFD}");
    assert_eq!(e.byte_range("#😀"), None);
}

#[test]
fn long_text_with_many_prefixes_stays_fast() {
    let text = "#".repeat(20_000);
    let locator = EntityLocator::new(&text);
    let hint = EntityHint::new("#", TextRange::new(19_000, 3)).with_literal("#zzz");

    // the spiral never matches "#zzz"; the fallback picks the occurrence at the hint.
    let e = locator.resolve(&hint).expect("resolved");
    assert_eq!(e.range, TextRange::new(19_000, 3));
}

#[test]
fn malformed_records_degrade_to_diagnostics() {
    let json = r#"{"statuses": [
        {"id_str": "1"},
        {"id_str": "2", "text": 7, "created_at": "x", "user": {}},
        [],
        null
    ]}"#;
    let opts = LocatorOptions {
        collect_diagnostics: true,
        ..LocatorOptions::default()
    };
    let file = tweetspan::resolve_bytes(json.as_bytes(), None, &opts).unwrap();
    assert!(file.tweets.is_empty());
    assert_eq!(file.diagnostics.len(), 4);
}
