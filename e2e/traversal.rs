//! E2E Test Suite 01: Construction and bidirectional traversal
//!
//! Exercises the container as a plain sequence: push/get/next/prev/index,
//! encoding-selector canonicalization, and the published string-length
//! and integer boundary widths.

use std::borrow::Cow;

use packlist::{Endpoint, PackList, Value};

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: bidirectional walk over mixed strings
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn bidirectional_walk() {
    let mut c = PackList::new();
    for s in ["hello", "foo", "quux", "1024"] {
        c.push(&Value::from(s), Endpoint::Tail).unwrap();
    }
    assert_eq!(c.count(), 4);

    assert_eq!(
        c.get(c.head()).unwrap(),
        Value::Bytes(Cow::Borrowed(b"hello"))
    );

    // Four nexts from the head reach the end exactly.
    let mut pos = c.head();
    for _ in 0..4 {
        pos = c.next(pos).expect("mid-walk position");
    }
    assert_eq!(pos, c.end());
    assert_eq!(c.next(pos), None);

    // The tail is the "1024" entry, and three prevs walk back to "hello".
    let tail = c.last().unwrap();
    assert_eq!(c.get(tail).unwrap(), Value::Bytes(Cow::Borrowed(b"1024")));
    let mut pos = tail;
    for _ in 0..3 {
        pos = c.prev(pos).expect("mid-walk position");
    }
    assert_eq!(pos, c.head());
    assert_eq!(c.prev(pos), None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: integer width compression
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn integer_compression() {
    let mut c = PackList::new();
    // Entry size = tag + payload + tag; the deltas prove the selector
    // chose 1-, 1-, and 2-byte payloads.
    let d = c.push(&Value::Signed(-1), Endpoint::Tail).unwrap();
    assert_eq!(d.bytes_delta, 3);
    let d = c.push(&Value::Unsigned(200), Endpoint::Tail).unwrap();
    assert_eq!(d.bytes_delta, 3);
    let d = c.push(&Value::Signed(-10_000), Endpoint::Tail).unwrap();
    assert_eq!(d.bytes_delta, 4);

    let got: Vec<_> = c.iter().collect();
    assert_eq!(
        got,
        vec![
            Value::Signed(-1),
            Value::Unsigned(200),
            Value::Signed(-10_000),
        ]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: string-length varint boundaries
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn string_length_boundaries_roundtrip() {
    // 64 → 65 is the 1-byte → 2-byte tag transition; 16 447 → 16 448 the
    // 2-byte → 3-byte one.  Entry size = 2 · tag_width + length.
    for (len, tag_width) in [
        (64usize, 1isize),
        (65, 2),
        (16_446, 2),
        (16_447, 2),
        (16_448, 3),
    ] {
        let body: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
        let mut c = PackList::new();
        let d = c
            .push(&Value::Bytes(Cow::Borrowed(&body)), Endpoint::Tail)
            .unwrap();
        assert_eq!(d.bytes_delta, len as isize + 2 * tag_width, "len {len}");
        assert_eq!(
            c.get(c.head()).unwrap(),
            Value::Bytes(Cow::Borrowed(&body[..])),
            "len {len}"
        );
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: signed minimum values
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn signed_minimums_encode_and_roundtrip() {
    let mut c = PackList::new();
    let minimums = [i8::MIN as i64, i16::MIN as i64, i32::MIN as i64, i64::MIN];
    for v in minimums {
        c.push(&Value::Signed(v), Endpoint::Tail).unwrap();
    }
    let got: Vec<_> = c.iter().collect();
    assert_eq!(got, minimums.map(Value::Signed).to_vec());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: float narrowing on the wire
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn floats_narrow_to_the_smallest_exact_width() {
    let mut c = PackList::new();
    // Both of these round-trip float16 exactly: 2-byte payload.
    let d = c.push(&Value::Float32(3.0), Endpoint::Tail).unwrap();
    assert_eq!(d.bytes_delta, 4);
    let d = c.push(&Value::Float32(0.578125), Endpoint::Tail).unwrap();
    assert_eq!(d.bytes_delta, 4);
    // A double that is exactly a float narrows one level; 1 + 2⁻²⁰ needs
    // more mantissa than either 16-bit form carries.
    let narrow = 1.0 + 2.0f64.powi(-20);
    let d = c.push(&Value::Float64(narrow), Endpoint::Tail).unwrap();
    assert_eq!(d.bytes_delta, 6);
    // A double past float32 range stays a full double.
    let d = c.push(&Value::Float64(1.5e40), Endpoint::Tail).unwrap();
    assert_eq!(d.bytes_delta, 10);

    let got: Vec<_> = c.iter().collect();
    assert_eq!(
        got,
        vec![
            Value::Float32(3.0),
            Value::Float32(0.578125),
            Value::Float32(narrow as f32),
            Value::Float64(1.5e40),
        ]
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: random access walks the nearer end
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn index_reaches_every_entry_from_both_ends() {
    let mut c = PackList::new();
    for i in 0..101u64 {
        c.push(&Value::Unsigned(i), Endpoint::Tail).unwrap();
    }
    for i in 0..101i64 {
        let pos = c.index(i).unwrap();
        assert_eq!(c.get(pos).unwrap(), Value::Unsigned(i as u64));
        let neg = c.index(i - 101).unwrap();
        assert_eq!(neg, pos, "index {i} vs {}", i - 101);
    }
    assert_eq!(c.index(101), None);
    assert_eq!(c.index(-102), None);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: forward and reverse iteration agree
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn reverse_iteration_mirrors_forward() {
    let mut c = PackList::new();
    for i in 0..30i64 {
        if i % 3 == 0 {
            c.push(&Value::Signed(-i), Endpoint::Tail).unwrap();
        } else {
            let s = format!("s{i}");
            c.push(&Value::Bytes(Cow::Owned(s.into_bytes())), Endpoint::Tail)
                .unwrap();
        }
    }
    let forward: Vec<_> = c.iter().collect();
    let mut reversed: Vec<_> = c.iter().rev().collect();
    reversed.reverse();
    assert_eq!(forward, reversed);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 8: the full value domain round-trips through one container
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn mixed_value_domain_roundtrip() {
    let nested = {
        let mut n = PackList::new();
        n.push(&Value::from("inner"), Endpoint::Tail).unwrap();
        n
    };
    let mut c = PackList::new();
    let inputs = vec![
        Value::Null,
        Value::True,
        Value::False,
        Value::Bytes(Cow::Borrowed(b"")),
        Value::Bytes(Cow::Borrowed(b"bytes")),
        Value::Signed(-42),
        Value::Unsigned(1 << 40),
        Value::Unsigned128(1u128 << 90),
        Value::Signed128(-(1i128 << 120)),
        Value::Float32(2.75),
        Value::Float64(1.0 + f64::EPSILON),
        Value::StringRef(77),
        Value::RefId(70_000),
        Value::Nested(
            packlist::ContainerKind::Tuple,
            Cow::Borrowed(nested.as_bytes()),
        ),
    ];
    for v in &inputs {
        c.push(v, Endpoint::Tail).unwrap();
    }
    let expected = vec![
        Value::Null,
        Value::True,
        Value::False,
        Value::Bytes(Cow::Borrowed(b"")),
        Value::Bytes(Cow::Borrowed(b"bytes")),
        Value::Signed(-42),
        Value::Unsigned(1 << 40),
        Value::Unsigned128(1u128 << 90),
        Value::Signed128(-(1i128 << 120)),
        Value::Float32(2.75),
        Value::Float64(1.0 + f64::EPSILON),
        Value::StringRef(77),
        Value::RefId(70_000),
        Value::Nested(
            packlist::ContainerKind::Tuple,
            Cow::Borrowed(nested.as_bytes()),
        ),
    ];
    let got: Vec<_> = c.iter().collect();
    assert_eq!(got, expected);

    // get_copy detaches from the buffer.
    let pos = c.index(4).unwrap();
    let owned = c.get_copy(pos).unwrap();
    assert_eq!(owned, Value::Bytes(Cow::Owned(b"bytes".to_vec())));
}
