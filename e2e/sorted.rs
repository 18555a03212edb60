//! E2E Test Suite 03: Sorted-mode overlay
//!
//! Binary search with a caller-held middle hint over key/value records,
//! duplicate keys under full-depth comparison, reference-key resolution
//! through an atom table, and hint maintenance across long mutation
//! sequences.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::HashMap;

use packlist::{
    sorted_delete, sorted_find, sorted_get, sorted_insert, sorted_insert_position, MiddleHint,
    PackList, StringTable, Value,
};

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: insert out of order, read back sorted
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn sorted_insert_and_find() {
    let mut c = PackList::new();
    let mut hint = MiddleHint::new(&c);
    for (k, v) in [("a", 1i64), ("c", 3), ("b", 2)] {
        let existed = sorted_insert(
            &mut c,
            2,
            1,
            &[Value::from(k), Value::Signed(v)],
            &mut hint,
            None,
        )
        .unwrap();
        assert!(!existed);
    }

    // Head-to-tail the flat sequence is a, 1, b, 2, c, 3.
    let flat: Vec<_> = c.iter().collect();
    assert_eq!(
        flat,
        vec![
            Value::from("a"),
            Value::Unsigned(1),
            Value::from("b"),
            Value::Unsigned(2),
            Value::from("c"),
            Value::Unsigned(3),
        ]
    );

    // find(b) lands on the key; next holds its value.
    let pos = sorted_find(&c, 2, 1, &[Value::from("b")], &hint, None)
        .unwrap()
        .expect("b is present");
    assert_eq!(c.get(pos).unwrap(), Value::from("b"));
    let vpos = c.next(pos).unwrap();
    assert_eq!(c.get(vpos).unwrap(), Value::Unsigned(2));

    assert_eq!(
        sorted_find(&c, 2, 1, &[Value::from("nope")], &hint, None).unwrap(),
        None
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: the hint always equals the middle recomputed from scratch
// ─────────────────────────────────────────────────────────────────────────────

/// Tiny deterministic generator so the sequence is stable across runs.
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

#[test]
fn middle_hint_survives_a_long_mutation_sequence() {
    let mut c = PackList::new();
    let mut hint = MiddleHint::new(&c);
    let mut rng = XorShift(0x9E37_79B9_7F4A_7C15);
    let mut live: Vec<u64> = Vec::new();

    for step in 0..400 {
        let roll = rng.next();
        let key = roll % 64;
        let kbytes = format!("key-{key:02}");
        if roll % 3 != 0 || live.is_empty() {
            let existed = sorted_insert(
                &mut c,
                2,
                1,
                &[Value::from(kbytes.as_str()), Value::Unsigned(roll)],
                &mut hint,
                None,
            )
            .unwrap();
            assert_eq!(existed, live.contains(&key), "step {step}");
            if !existed {
                live.push(key);
            }
        } else {
            let removed = sorted_delete(
                &mut c,
                2,
                1,
                &[Value::from(kbytes.as_str())],
                &mut hint,
                None,
            )
            .unwrap();
            assert_eq!(removed, live.contains(&key), "step {step}");
            live.retain(|&k| k != key);
        }

        let fresh = MiddleHint::recompute(&c, 2).unwrap();
        assert_eq!(hint.offset(), fresh.offset(), "step {step}");
        assert_eq!(c.count(), 2 * live.len() as u64, "step {step}");
    }

    // The surviving records are sorted by key.
    let keys: Vec<_> = c.iter().step_by(2).collect();
    for w in keys.windows(2) {
        let (Value::Bytes(a), Value::Bytes(b)) = (&w[0], &w[1]) else {
            panic!("keys must be byte strings");
        };
        assert_eq!(a.cmp(b), Ordering::Less);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: duplicate keys under full-depth comparison
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn duplicates_tie_break_on_values() {
    let mut c = PackList::new();
    let mut hint = MiddleHint::new(&c);
    for v in [5u64, 1, 3] {
        sorted_insert(
            &mut c,
            2,
            2,
            &[Value::from("dup"), Value::Unsigned(v)],
            &mut hint,
            None,
        )
        .unwrap();
    }
    let flat: Vec<_> = c.iter().collect();
    assert_eq!(
        flat,
        vec![
            Value::from("dup"),
            Value::Unsigned(1),
            Value::from("dup"),
            Value::Unsigned(3),
            Value::from("dup"),
            Value::Unsigned(5),
        ]
    );

    // Key-depth search bounds bracket the run of duplicates.
    let low = sorted_insert_position(&c, 2, 1, &[Value::from("dup")], &hint, None, false).unwrap();
    let high = sorted_insert_position(&c, 2, 1, &[Value::from("dup")], &hint, None, true).unwrap();
    assert_eq!(low, c.head());
    assert_eq!(high, c.end());
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: matched keys overwrite their value tail
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn insert_overwrites_values_for_existing_keys() {
    let mut c = PackList::new();
    let mut hint = MiddleHint::new(&c);
    // Arity 3: one key, two values.
    for (k, a, b) in [("u", 1i64, 2i64), ("w", 5, 6)] {
        sorted_insert(
            &mut c,
            3,
            1,
            &[Value::from(k), Value::Signed(a), Value::Signed(b)],
            &mut hint,
            None,
        )
        .unwrap();
    }
    let existed = sorted_insert(
        &mut c,
        3,
        1,
        &[Value::from("u"), Value::from("long-first"), Value::Signed(9)],
        &mut hint,
        None,
    )
    .unwrap();
    assert!(existed);
    assert_eq!(c.count(), 6);
    let flat: Vec<_> = c.iter().collect();
    assert_eq!(
        flat,
        vec![
            Value::from("u"),
            Value::from("long-first"),
            Value::Unsigned(9),
            Value::from("w"),
            Value::Unsigned(5),
            Value::Unsigned(6),
        ]
    );
    assert_eq!(
        MiddleHint::recompute(&c, 3).unwrap().offset(),
        hint.offset()
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: reference keys resolve through the atom table
// ─────────────────────────────────────────────────────────────────────────────

struct Atoms(HashMap<u64, Vec<u8>>);

impl StringTable for Atoms {
    fn resolve(&self, id: u64) -> Option<&[u8]> {
        self.0.get(&id).map(|v| v.as_slice())
    }
}

#[test]
fn reference_keys_sort_by_their_resolved_strings() {
    let atoms = Atoms(HashMap::from([
        (1u64, b"zebra".to_vec()),
        (2u64, b"aardvark".to_vec()),
        (3u64, b"lemur".to_vec()),
    ]));
    let mut c = PackList::new();
    let mut hint = MiddleHint::new(&c);
    for id in [1u64, 2, 3] {
        sorted_insert(
            &mut c,
            2,
            1,
            &[Value::StringRef(id), Value::Unsigned(id * 100)],
            &mut hint,
            Some(&atoms),
        )
        .unwrap();
    }
    let keys: Vec<_> = c.iter().step_by(2).collect();
    assert_eq!(
        keys,
        vec![Value::StringRef(2), Value::StringRef(3), Value::StringRef(1)]
    );

    // Lookup by resolved contents: a byte-string key finds the reference.
    let got = sorted_get(&c, 2, 1, &[Value::from("lemur")], &hint, Some(&atoms)).unwrap();
    assert_eq!(got, Value::Unsigned(300));
    assert_eq!(
        sorted_get(&c, 2, 1, &[Value::from("walrus")], &hint, Some(&atoms)).err(),
        Some(packlist::Error::NotFound)
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 6: arity-1 sets and delete semantics
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn arity_one_behaves_as_a_sorted_set() {
    let mut c = PackList::new();
    let mut hint = MiddleHint::new(&c);
    for v in [9u64, 2, 7, 4, 1, 8] {
        sorted_insert(&mut c, 1, 1, &[Value::Unsigned(v)], &mut hint, None).unwrap();
    }
    let flat: Vec<_> = c.iter().collect();
    assert_eq!(
        flat,
        [1u64, 2, 4, 7, 8, 9].map(Value::Unsigned).to_vec()
    );

    assert!(sorted_delete(&mut c, 1, 1, &[Value::Unsigned(4)], &mut hint, None).unwrap());
    // Deleting a missing key is a no-op that reports false.
    assert!(!sorted_delete(&mut c, 1, 1, &[Value::Unsigned(4)], &mut hint, None).unwrap());
    assert_eq!(c.count(), 5);
    assert_eq!(
        MiddleHint::recompute(&c, 1).unwrap().offset(),
        hint.offset()
    );
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 7: mixed-width keys keep a total order
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn numeric_keys_of_mixed_width_stay_ordered() {
    let mut c = PackList::new();
    let mut hint = MiddleHint::new(&c);
    let keys: [Value<'_>; 6] = [
        Value::Signed(-40_000),
        Value::Signed(-2),
        Value::Unsigned(3),
        Value::Float32(3.5),
        Value::Unsigned(70_000),
        Value::Unsigned128(1u128 << 80),
    ];
    // Insert in a scrambled order.
    for i in [3usize, 0, 5, 1, 4, 2] {
        sorted_insert(&mut c, 1, 1, &[keys[i].clone()], &mut hint, None).unwrap();
    }
    let flat: Vec<_> = c.iter().collect();
    let expect: Vec<Value<'_>> = vec![
        Value::Signed(-40_000),
        Value::Signed(-2),
        Value::Unsigned(3),
        Value::Float32(3.5),
        Value::Unsigned(70_000),
        Value::Unsigned128(1u128 << 80),
    ];
    assert_eq!(flat, expect);
    assert_eq!(
        sorted_find(&c, 1, 1, &[Value::Bytes(Cow::Borrowed(b"s"))], &hint, None).unwrap(),
        None
    );
}
