use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;
use tweetspan::{Error, LocatorOptions, resolve_all_in_dirs};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("testdata")
        .join("search_ucd.json")
}

#[test]
fn aliased_output_directory_is_rejected_and_input_untouched() {
    let dir = tempdir().unwrap();
    let raw = dir.path().join("raw");
    fs::create_dir_all(&raw).unwrap();
    fs::copy(fixture(), raw.join("ucd.json")).unwrap();
    let before = fs::read(raw.join("ucd.json")).unwrap();

    for alias in [raw.join("..").join("raw"), raw.join("."), raw.clone()] {
        let err = resolve_all_in_dirs(&raw, &alias, &LocatorOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }), "{alias:?}: {err}");
    }
    assert_eq!(fs::read(raw.join("ucd.json")).unwrap(), before);
}

#[test]
fn aliased_nested_output_is_not_read_back_as_input() {
    let dir = tempdir().unwrap();
    let raw = dir.path().join("raw");
    fs::create_dir_all(&raw).unwrap();
    fs::copy(fixture(), raw.join("ucd.json")).unwrap();

    let out = raw.join("..").join("raw").join("resolved");
    let opts = LocatorOptions::default();
    assert_eq!(resolve_all_in_dirs(&raw, &out, &opts).unwrap(), 1);
    // a second run must not pick up resolved/ucd.json as a new input.
    assert_eq!(resolve_all_in_dirs(&raw, &out, &opts).unwrap(), 1);
    assert!(raw.join("resolved").join("ucd.json").is_file());
}
