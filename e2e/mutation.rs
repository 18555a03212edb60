//! E2E Test Suite 02: Mutation engine
//!
//! Insert/replace/delete at arbitrary positions, self-aliasing sources,
//! header auto-resizing under mutation pressure, drain-mode bulk deletes,
//! and split/merge/split_range.

use std::borrow::Cow;

use packlist::{Endpoint, Error, PackList, Value};

fn strings(c: &PackList) -> Vec<String> {
    c.iter()
        .map(|v| match v {
            Value::Bytes(b) => String::from_utf8(b.into_owned()).unwrap(),
            other => format!("{other:?}"),
        })
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: self-aliasing insert
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn self_aliasing_insert_duplicates_entry_bytes() {
    let mut c = PackList::new();
    for s in ["x", "y", "z"] {
        c.push(&Value::from(s), Endpoint::Tail).unwrap();
    }
    let y = c.index(1).unwrap();
    c.insert_from(c.head(), y).unwrap();
    assert_eq!(strings(&c), ["y", "x", "y", "z"]);

    // The two copies are byte-identical entries.
    let a = c.index(0).unwrap();
    let b = c.index(2).unwrap();
    assert_eq!(c.get(a).unwrap(), c.get(b).unwrap());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: boundary-triggered header regrowth
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn header_grows_when_total_crosses_the_one_byte_ceiling() {
    let mut c = PackList::new();
    assert_eq!(c.head(), 2);

    // Each 1-byte string entry occupies 3 bytes.  20 entries reach a
    // 62-byte total, still inside the 1-byte total-field range.
    for i in 0..20u8 {
        c.push(
            &Value::Bytes(Cow::Borrowed(&[b'a' + (i % 26)])),
            Endpoint::Tail,
        )
        .unwrap();
        assert_eq!(c.head(), 2, "entry {i}");
    }
    assert_eq!(c.total_bytes(), 62);

    // The 21st entry pushes the total past 64: the total field needs two
    // bytes, and the total grows once more to cover the wider header.
    let d = c.push(&Value::Bytes(Cow::Borrowed(b"u")), Endpoint::Tail).unwrap();
    assert_eq!(d.header_delta, 1);
    assert_eq!(c.head(), 3);
    assert_eq!(c.total_bytes(), 66);
    assert_eq!(c.count(), 21);

    // Every prior entry is still readable.
    let got = strings(&c);
    for (i, s) in got.iter().take(20).enumerate() {
        assert_eq!(s.as_bytes(), &[b'a' + (i as u8 % 26)], "entry {i}");
    }
    assert_eq!(got[20], "u");
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: header shrinks back on delete
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn header_shrinks_when_the_total_drops_back() {
    let mut c = PackList::new();
    for i in 0..30u64 {
        c.push(&Value::Unsigned(i), Endpoint::Tail).unwrap();
    }
    assert_eq!(c.head(), 3);
    let pos = c.index(5).unwrap();
    let d = c.delete(pos, 25, false).unwrap();
    assert_eq!(d.header_delta, -1);
    assert_eq!(c.head(), 2);
    assert_eq!(c.count(), 5);
    let got: Vec<_> = c.iter().collect();
    assert_eq!(got, (0..5).map(Value::Unsigned).collect::<Vec<_>>());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: multi-entry insert in one call
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn insert_all_splices_a_run() {
    let mut c = PackList::new();
    c.push(&Value::from("head"), Endpoint::Tail).unwrap();
    c.push(&Value::from("tail"), Endpoint::Tail).unwrap();
    let at = c.index(1).unwrap();
    c.insert_all(at, &[Value::from("a"), Value::from("b"), Value::from("c")])
        .unwrap();
    assert_eq!(strings(&c), ["head", "a", "b", "c", "tail"]);
    assert_eq!(c.count(), 5);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: replace with offset keeps the shared prefix
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn replace_all_honours_the_skip_offset() {
    let mut c = PackList::new();
    for s in ["key", "old-a", "old-b"] {
        c.push(&Value::from(s), Endpoint::Tail).unwrap();
    }
    // The first input entry is declared already present; only the two
    // value entries after it are overwritten.
    c.replace_all(
        c.head(),
        &[Value::from("key"), Value::from("new-a"), Value::from("new-b")],
        1,
    )
    .unwrap();
    assert_eq!(strings(&c), ["key", "new-a", "new-b"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: drain-mode bulk delete
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn drain_deletes_produce_the_same_image() {
    let build = || {
        let mut c = PackList::new();
        for i in 0..200u64 {
            c.push(&Value::Unsigned(i * 7), Endpoint::Tail).unwrap();
        }
        c
    };
    let mut eager = build();
    let mut drained = build();
    for _ in 0..19 {
        let pos = eager.index(3).unwrap();
        eager.delete(pos, 10, false).unwrap();
        let pos = drained.index(3).unwrap();
        drained.delete(pos, 10, true).unwrap();
    }
    assert_eq!(eager.as_bytes(), drained.as_bytes());
    assert_eq!(eager.count(), 10);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: split_range carves out a sub-container
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn split_range_moves_entries_to_a_new_container() {
    let mut c = PackList::new();
    for s in ["a", "b", "c", "d", "e", "f"] {
        c.push(&Value::from(s), Endpoint::Tail).unwrap();
    }
    let carved = c.split_range(1, 3).unwrap();
    assert_eq!(strings(&carved), ["b", "c", "d"]);
    assert_eq!(strings(&c), ["a", "e", "f"]);
    // Negative index counts from the tail.
    let carved = c.split_range(-1, 1).unwrap();
    assert_eq!(strings(&carved), ["f"]);
    assert_eq!(strings(&c), ["a", "e"]);
    // delete_range is the drop-only sibling.
    c.delete_range(0, 1).unwrap();
    assert_eq!(strings(&c), ["e"]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: split at the middle and merge back
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn split_then_merge_restores_the_sequence() {
    let mut c = PackList::new();
    for i in 0..25u64 {
        c.push(&Value::Unsigned(i), Endpoint::Tail).unwrap();
    }
    let (left, right) = c.split(None).unwrap();
    assert_eq!((left.count(), right.count()), (12, 13));
    let merged = left.merge(right).unwrap();
    assert_eq!(merged.as_bytes(), c.as_bytes());

    // Split accepts a precomputed middle offset and gives the same cut.
    let mid = c.index(12).unwrap();
    let (l2, r2) = c.split(Some(mid)).unwrap();
    assert_eq!(l2.count(), 12);
    assert_eq!(r2.get(r2.head()).unwrap(), Value::Unsigned(12));
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 9: bad positions are rejected without mutation
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn invalid_arguments_leave_the_container_untouched() {
    let mut c = PackList::new();
    for s in ["one", "two"] {
        c.push(&Value::from(s), Endpoint::Tail).unwrap();
    }
    let snapshot = c.as_bytes().to_vec();

    // Position before the header, past the end, and a delete overrun.
    assert_eq!(c.insert(0, &Value::from("x")).err(), Some(Error::BadArgument));
    assert_eq!(
        c.insert(c.end() + 1, &Value::from("x")).err(),
        Some(Error::BadArgument)
    );
    assert_eq!(c.delete(c.head(), 3, false).err(), Some(Error::BadArgument));
    // Replacing at the end position (no entry there).
    assert_eq!(
        c.replace(c.end(), &Value::from("x")).err(),
        Some(Error::BadArgument)
    );

    assert_eq!(c.as_bytes(), &snapshot[..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 10: duplicate is an independent image
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn duplicate_detaches_from_the_original() {
    let mut c = PackList::new();
    c.push(&Value::from("shared"), Endpoint::Tail).unwrap();
    let mut d = c.duplicate();
    d.push(&Value::from("only-d"), Endpoint::Tail).unwrap();
    assert_eq!(c.count(), 1);
    assert_eq!(d.count(), 2);
    assert_eq!(strings(&c), ["shared"]);
    assert_eq!(strings(&d), ["shared", "only-d"]);
}
