//! AFL++ fuzz target for `tweetspan`.
//!
//! This binary is stdin-driven so it can be used with AFL++.
//! Build and run it via `cargo-afl`:
//!
//! ```bash
//! cargo install cargo-afl
//!
//! cargo afl build --release --features afl_fuzz --bin tweetspan_afl_locate
//!
//! mkdir -p fuzz/afl/out
//!
//! cargo afl fuzz \
//!   -i fuzz/afl/in \
//!   -o fuzz/afl/out \
//!   target/release/tweetspan_afl_locate
//! ```
//!
//! Input layout: byte 0 picks the prefix (and, when odd, whether the rest
//! is also fed to the JSON decoder), bytes 1..3 are the hint start (LE u16),
//! byte 3 is the hint length, and the remainder is the text.
//!
//! Rust panics normally unwind and exit with a non-crashing status code.
//! AFL++ only treats crashes as signals/aborts, so any unwind becomes
//! `abort()`.

use std::io::Read;

use tweetspan::model::{EntityHint, TextRange};
use tweetspan::{EntityLocator, LocatorOptions};

const MAX_INPUT_LEN: usize = 1_000_000;
const PREFIXES: [&str; 3] = ["#", "@", "http"];

fn check_entity(locator: &EntityLocator, hint: &EntityHint) {
    let Some(entity) = locator.resolve(hint) else {
        return;
    };

    let text = locator.text();
    assert!(
        text.bounds().contains(entity.range),
        "range out of bounds (len={}): {:?}",
        text.len(),
        entity.range
    );
    assert_eq!(
        entity.range.length, hint.expected_range.length,
        "resolved length differs from hint"
    );

    // the keyword starts with the prefix, or is a truncation of it when the
    // hint is shorter than the prefix.
    let units: Vec<u16> = entity.keyword.encode_utf16().collect();
    let prefix: Vec<u16> = hint.prefix.encode_utf16().collect();
    let n = prefix.len().min(entity.range.length);
    let slice = text.slice(entity.range).unwrap();
    assert_eq!(&slice[..n], &prefix[..n], "keyword does not start with prefix");
    if !units.contains(&0xFFFD) {
        assert_eq!(units.as_slice(), slice, "keyword differs from text at range");
    }

    // resolution is a pure function of its inputs.
    assert_eq!(locator.resolve(hint), Some(entity));
}

fn run_one_input(data: &[u8]) {
    if data.len() > MAX_INPUT_LEN || data.len() < 4 {
        return;
    }

    let prefix = PREFIXES[data[0] as usize % PREFIXES.len()];
    let start = u16::from_le_bytes([data[1], data[2]]) as usize;
    let length = data[3] as usize;
    let rest = &data[4..];

    let text = String::from_utf8_lossy(rest).to_string();
    let locator = EntityLocator::new(&text);

    let hint = EntityHint::new(prefix, TextRange::new(start, length));
    check_entity(&locator, &hint);
    check_entity(&locator, &hint.clone().with_literal(text.chars().take(8).collect::<String>()));

    if data[0] % 2 == 1 {
        // decoding arbitrary bytes must degrade to diagnostics, never panic.
        let _ = tweetspan::resolve_bytes(rest, None, &LocatorOptions::default());
    }
}

fn main() {
    let mut data = Vec::new();
    std::io::stdin().read_to_end(&mut data).unwrap();

    // convert any panic into an abort().
    if std::panic::catch_unwind(|| run_one_input(&data)).is_err() {
        std::process::abort();
    }
}
