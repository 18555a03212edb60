//! E2E Test Suite 05: Persistence
//!
//! The image is the wire and disk format: memcpy, file write/read, and
//! re-adoption through `from_bytes` must reproduce the container exactly,
//! with no fixup pass.

use std::borrow::Cow;
use std::fs;
use std::io::Write;

use packlist::{Endpoint, Error, PackList, Value};

fn sample() -> PackList {
    let mut child = PackList::new();
    child.push(&Value::from("nested"), Endpoint::Tail).unwrap();
    child.push(&Value::Signed(-7), Endpoint::Tail).unwrap();

    let mut c = PackList::new();
    for i in 0..50u64 {
        c.push(&Value::Unsigned(i * 1_000), Endpoint::Tail).unwrap();
    }
    c.push(&Value::from("terminator"), Endpoint::Tail).unwrap();
    c.push(
        &Value::Nested(packlist::ContainerKind::Map, Cow::Borrowed(child.as_bytes())),
        Endpoint::Tail,
    )
    .unwrap();
    c.push(&Value::Null, Endpoint::Tail).unwrap();
    c
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: file round trip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn image_survives_a_file_roundtrip() {
    let c = sample();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("container.bin");
    let mut f = fs::File::create(&path).unwrap();
    f.write_all(c.as_bytes()).unwrap();
    f.sync_all().unwrap();
    drop(f);

    let bytes = fs::read(&path).unwrap();
    let back = PackList::from_bytes(bytes).unwrap();
    assert_eq!(back, c);
    let a: Vec<_> = c.iter().collect();
    let b: Vec<_> = back.iter().collect();
    assert_eq!(a, b);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: memcpy round trip
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn image_survives_a_plain_byte_copy() {
    let c = sample();
    let copied = c.as_bytes().to_vec();
    let back = PackList::from_bytes(copied).unwrap();
    assert_eq!(back.as_bytes(), c.as_bytes());

    // The adopted copy is independently mutable.
    let mut back = back;
    back.push(&Value::from("extra"), Endpoint::Tail).unwrap();
    assert_eq!(back.count(), c.count() + 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: adoption is a hard trust boundary
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn truncated_or_damaged_files_are_rejected() {
    let c = sample();
    let image = c.as_bytes().to_vec();

    // Truncation at every boundary short of the real length fails.
    for cut in [1usize, 2, image.len() / 2, image.len() - 1] {
        assert_eq!(
            PackList::from_bytes(image[..cut].to_vec()).err(),
            Some(Error::Corrupt),
            "cut {cut}"
        );
    }

    // A flipped count byte disagrees with the walk.
    let mut bad = image.clone();
    let count_at = c.head() - 1;
    bad[count_at] = bad[count_at].wrapping_add(1);
    assert_eq!(PackList::from_bytes(bad).err(), Some(Error::Corrupt));

    // Appended trailing garbage breaks the total-bytes invariant.
    let mut bad = image;
    bad.push(0);
    assert_eq!(PackList::from_bytes(bad).err(), Some(Error::Corrupt));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: an empty container is exactly two bytes on disk
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn empty_container_is_two_bytes_everywhere() {
    let c = PackList::new();
    assert_eq!(c.as_bytes(), &[2, 0]);
    let back = PackList::from_bytes(vec![2, 0]).unwrap();
    assert_eq!(back, c);
    assert!(back.is_empty());
}
