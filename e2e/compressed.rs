//! E2E Test Suite 04: Compressed wrapper
//!
//! Container ↔ compressed-form conversion: byte-exact round-trips over
//! randomized content, the shared header prefix, small-input refusal, and
//! persistence of the compressed image.

use std::borrow::Cow;

use packlist::{CompressedList, Endpoint, Error, PackList, Value};

/// Deterministic generator for stable "random" entry lengths and bytes.
struct XorShift(u64);

impl XorShift {
    fn next(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
}

fn random_strings(seed: u64, entries: usize, max_len: usize) -> PackList {
    let mut rng = XorShift(seed);
    let mut c = PackList::new();
    for _ in 0..entries {
        // Random lengths over low-entropy text, the shape the wrapper is
        // for; fully random bytes would rightly refuse to compress.
        let len = (rng.next() as usize) % max_len;
        let phase = (rng.next() % 26) as u8;
        let body: Vec<u8> = (0..len).map(|j| b'a' + ((j as u8 / 4 + phase) % 26)).collect();
        c.push(&Value::Bytes(Cow::Owned(body)), Endpoint::Tail).unwrap();
    }
    c
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: 500-entry round trip is byte-exact
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn five_hundred_random_entries_roundtrip() {
    let c = random_strings(0xDEAD_BEEF_CAFE_F00D, 500, 48);
    assert!(c.total_bytes() >= 64);
    let z = c.compress().unwrap();
    let back = z.decompress().unwrap();
    assert_eq!(back.as_bytes(), c.as_bytes());
    assert_eq!(back.count(), c.count());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: the two-field prefix is shared between both forms
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn compressed_header_mirrors_the_container_header() {
    let c = random_strings(7, 120, 32);
    let z = c.compress().unwrap();
    assert_eq!(&z.as_bytes()[..c.head()], &c.as_bytes()[..c.head()]);
    assert_eq!(z.uncompressed_bytes().unwrap(), c.total_bytes());
    assert_eq!(z.count().unwrap(), c.count());
    assert!(z.as_bytes().len() < c.total_bytes());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: small containers refuse to wrap
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn below_threshold_containers_report_not_compressible() {
    let mut c = PackList::new();
    assert_eq!(c.compress().err(), Some(Error::NotCompressible));
    c.push(&Value::from("tiny"), Endpoint::Tail).unwrap();
    assert_eq!(c.compress().err(), Some(Error::NotCompressible));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: the compressed image survives serialization itself
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn compressed_image_roundtrips_through_bytes() {
    let c = random_strings(42, 200, 40);
    let z = c.compress().unwrap();
    let wire = z.as_bytes().to_vec();
    let adopted = CompressedList::from_bytes(wire).unwrap();
    assert_eq!(adopted, z);
    assert_eq!(adopted.decompress().unwrap().as_bytes(), c.as_bytes());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: every container content class round-trips
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn mixed_content_roundtrip() {
    let mut c = PackList::new();
    let mut rng = XorShift(99);
    for i in 0..200u64 {
        match rng.next() % 5 {
            0 => c
                .push(&Value::Unsigned(rng.next() % 10_000), Endpoint::Tail)
                .unwrap(),
            1 => c
                .push(&Value::Signed(-((rng.next() % 1_000) as i64)), Endpoint::Tail)
                .unwrap(),
            2 => c
                .push(&Value::from(format!("item-{i}").as_str()), Endpoint::Tail)
                .unwrap(),
            3 => c.push(&Value::Float64(i as f64 / 3.0), Endpoint::Tail).unwrap(),
            _ => c.push(&Value::True, Endpoint::Tail).unwrap(),
        };
    }
    let z = c.compress().unwrap();
    let back = z.decompress().unwrap();
    assert_eq!(back.as_bytes(), c.as_bytes());
    let a: Vec<_> = c.iter().collect();
    let b: Vec<_> = back.iter().collect();
    assert_eq!(a, b);
}
