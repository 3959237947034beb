//! Lightweight fuzz-style tests; no external fuzz harness required.

use tweetspan::EntityLocator;
use tweetspan::model::{EntityHint, ResolvedEntity, TextRange};

#[derive(Clone)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    fn gen_range(&mut self, hi: usize) -> usize {
        (self.next_u64() as usize) % hi
    }
}

fn gen_tweet_like(rng: &mut XorShift64, len: usize) -> String {
    // an alphabet dense in prefixes plus a few multi-unit characters, so both
    // phases and surrogate handling get exercised.
    const DICT: &[&str] = &[
        "a", "b", "c", "h", "t", "p", " ", " ", "#", "@", "http", "://", "é", "😀", "\n",
    ];
    let mut s = String::new();
    for _ in 0..len {
        s.push_str(DICT[rng.gen_range(DICT.len())]);
    }
    s
}

fn check_entity(locator: &EntityLocator, hint: &EntityHint, entity: &ResolvedEntity) {
    let text = locator.text();
    assert!(
        text.bounds().contains(entity.range),
        "range out of bounds (len={}): {:?}",
        text.len(),
        entity.range
    );
    assert_eq!(entity.range.length, hint.expected_range.length);

    let slice = text.slice(entity.range).unwrap();
    let prefix: Vec<u16> = hint.prefix.encode_utf16().collect();
    let n = prefix.len().min(slice.len());
    assert_eq!(&slice[..n], &prefix[..n], "{entity:?} for {hint:?}");
}

#[test]
fn fuzz_locate_random_hints_stay_in_bounds() {
    // keep cases bounded so this doesn't slow down normal `cargo test` too much.
    let mut rng = XorShift64::new(0xC0FFEE);
    let prefixes = ["#", "@", "http"];
    for _case in 0..2_000 {
        let len = rng.gen_range(120);
        let text = gen_tweet_like(&mut rng, len);
        let locator = EntityLocator::new(&text);
        let limit = locator.text().len() + 20;

        for _ in 0..4 {
            let prefix = prefixes[rng.gen_range(prefixes.len())];
            let start = rng.gen_range(limit);
            let length = rng.gen_range(12);
            let hint = EntityHint::new(prefix, TextRange::new(start, length));

            match locator.resolve(&hint) {
                Some(entity) => {
                    check_entity(&locator, &hint, &entity);
                    assert_eq!(locator.resolve(&hint), Some(entity));
                }
                None => {
                    // a miss with the prefix present means the nearest occurrence did not fit.
                    let units: Vec<u16> = prefix.encode_utf16().collect();
                    let absent = locator.text().find_from(&units, 0).is_none();
                    assert!(
                        length == 0 || absent || nearest_misfits(&locator, &units, hint.expected_range),
                        "unexpected miss for {hint:?} in {text:?}"
                    );
                }
            }
        }
    }
}

// the fallback keeps only the nearest prefix occurrence; when that one does
// not fit, a farther occurrence that would fit is still a legitimate miss.
fn nearest_misfits(locator: &EntityLocator, prefix: &[u16], expected: TextRange) -> bool {
    let text = locator.text();
    let mut from = 0;
    let mut best: Option<(TextRange, usize)> = None;
    while let Some(r) = text.find_from(prefix, from) {
        let d = r.distance_from(expected);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((r, d));
        }
        from = r.end();
    }
    best.is_some_and(|(r, _)| r.start + expected.length > text.len())
}

#[test]
fn fuzz_locate_planted_entities_are_recovered_under_drift() {
    let mut rng = XorShift64::new(0xBADC0DE);
    for _case in 0..1_000 {
        // filler without '#' so the planted hashtag is the only candidate.
        let left: String = (0..rng.gen_range(40)).map(|_| 'x').collect();
        let right: String = (0..rng.gen_range(40)).map(|_| 'y').collect();
        let tag = format!("#tag{}", rng.gen_range(1000));
        let text = format!("{left} {tag} {right}");

        let true_start = left.len() + 1;
        let drift = rng.gen_range(7) as isize - 3;
        let start = (true_start as isize + drift).max(0) as usize;
        let hint = EntityHint::new("#", TextRange::new(start, tag.len())).with_literal(&tag[1..]);

        let entity = EntityLocator::new(&text)
            .resolve(&hint)
            .unwrap_or_else(|| panic!("lost {tag} at drift {drift} in {text:?}"));
        assert_eq!(entity.range, TextRange::new(true_start, tag.len()));
        assert_eq!(entity.keyword, tag);
    }
}
