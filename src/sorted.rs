//! Sorted-mode overlay: binary search over logical entries of arity *k*
//! with a caller-held middle hint.
//!
//! The overlay adds no bytes to the container.  A *logical entry* is `k`
//! consecutive raw entries (a key/value pair is `k = 2`); the first
//! `depth` of them form the composite key the comparator sees.  With
//! `depth == k` the ordering is total over whole records, so records that
//! share a key but differ in value coexist — duplicate keys with
//! tie-breaking on values.  With `depth < k`, a matching key replaces the
//! record's value tail in place.
//!
//! The caller keeps a [`MiddleHint`] — the byte offset of logical entry
//! ⌊n/2⌋ — between calls.  Binary search starts its probe cursor there and
//! navigates probe-to-probe with `k · Δindex` constant-time steps, and
//! every mutation returns the byte deltas needed to slide the hint back
//! onto the true middle in O(1) plus at most one logical step.

use std::borrow::Cow;
use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::list::{MutationDelta, PackList};
use crate::value::Value;

/// Resolver for reference-encoded values: maps an interned-string ID to
/// the bytes it stands for, so reference entries order by contents rather
/// than by ID.
pub trait StringTable {
    fn resolve(&self, id: u64) -> Option<&[u8]>;
}

/// Byte offset of the first raw entry of the logical middle entry
/// (index ⌊n/2⌋).  Caller-held; kept current across mutations by the
/// overlay's own insert and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiddleHint {
    offset: usize,
}

impl MiddleHint {
    /// Hint for a container with no logical entries yet.
    pub fn new(list: &PackList) -> MiddleHint {
        MiddleHint {
            offset: list.head(),
        }
    }

    /// Recompute the middle from scratch by walking.
    pub fn recompute(list: &PackList, arity: usize) -> Result<MiddleHint> {
        let n = logical_count(list, arity)?;
        let mid_raw = (n / 2) * arity as u64;
        let mut offset = list.head();
        for _ in 0..mid_raw {
            offset = list.next(offset).ok_or(Error::Corrupt)?;
        }
        Ok(MiddleHint { offset })
    }

    /// The raw byte offset this hint points at.
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }
}

fn logical_count(list: &PackList, arity: usize) -> Result<u64> {
    if arity == 0 {
        return Err(Error::BadArgument);
    }
    let count = list.count();
    if count % arity as u64 != 0 {
        return Err(Error::BadArgument);
    }
    Ok(count / arity as u64)
}

// ─────────────────────────────────────────────────────────────────────────────
// The fixed comparator
// ─────────────────────────────────────────────────────────────────────────────

/// Type-class rank.  Classes order before anything inside a class does:
/// numerics < byte strings (reference values join this class when a
/// resolver knows them) < unresolved string references < reference IDs <
/// nested containers < false < true < null.
fn rank(v: &Value<'_>, atoms: Option<&dyn StringTable>) -> u8 {
    match v {
        Value::Signed(_)
        | Value::Unsigned(_)
        | Value::Signed128(_)
        | Value::Unsigned128(_)
        | Value::Float32(_)
        | Value::Float64(_)
        | Value::Pointer(_) => 0,
        Value::Bytes(_) | Value::VoidBytes(_) => 1,
        Value::StringRef(id) => match atoms.and_then(|a| a.resolve(*id)) {
            Some(_) => 1,
            None => 2,
        },
        Value::RefId(_) => 3,
        Value::Nested(..) => 4,
        Value::False => 5,
        Value::True => 6,
        Value::Null => 7,
    }
}

enum Num {
    Int(i128),
    Big(u128),
    Flt(f64),
}

fn num(v: &Value<'_>) -> Num {
    match v {
        Value::Signed(n) => Num::Int(*n as i128),
        Value::Unsigned(n) => Num::Int(*n as i128),
        Value::Pointer(n) => Num::Int(*n as i128),
        Value::Signed128(n) => Num::Int(*n),
        Value::Unsigned128(n) => match i128::try_from(*n) {
            Ok(i) => Num::Int(i),
            Err(_) => Num::Big(*n),
        },
        Value::Float32(f) => Num::Flt(*f as f64),
        Value::Float64(f) => Num::Flt(*f),
        // rank() routes every other variant away from the numeric class.
        _ => Num::Int(0),
    }
}

fn num_cmp(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (num(a), num(b)) {
        (Num::Int(x), Num::Int(y)) => x.cmp(&y),
        (Num::Big(x), Num::Big(y)) => x.cmp(&y),
        // A Big exceeds i128::MAX and therefore any Int.
        (Num::Int(_), Num::Big(_)) => Ordering::Less,
        (Num::Big(_), Num::Int(_)) => Ordering::Greater,
        (Num::Flt(x), Num::Flt(y)) => x.total_cmp(&y),
        // Integers above 2^53 round through f64 here; the order stays
        // total, merely coarser at the extremes.
        (Num::Int(x), Num::Flt(y)) => (x as f64).total_cmp(&y),
        (Num::Big(x), Num::Flt(y)) => (x as f64).total_cmp(&y),
        (Num::Flt(x), Num::Int(y)) => x.total_cmp(&(y as f64)),
        (Num::Flt(x), Num::Big(y)) => x.total_cmp(&(y as f64)),
    }
}

fn bytes_of<'v>(v: &'v Value<'_>, atoms: Option<&'v dyn StringTable>) -> Cow<'v, [u8]> {
    match v {
        Value::Bytes(b) => Cow::Borrowed(b.as_ref()),
        Value::VoidBytes(n) => Cow::Owned(vec![0; *n as usize]),
        Value::StringRef(id) => match atoms.and_then(|a| a.resolve(*id)) {
            Some(b) => Cow::Borrowed(b),
            None => Cow::Borrowed(&[][..]),
        },
        _ => Cow::Borrowed(&[][..]),
    }
}

/// The fixed type-aware total order used by every sorted-mode operation.
fn compare_values(a: &Value<'_>, b: &Value<'_>, atoms: Option<&dyn StringTable>) -> Ordering {
    let (ra, rb) = (rank(a, atoms), rank(b, atoms));
    if ra != rb {
        return ra.cmp(&rb);
    }
    match ra {
        0 => num_cmp(a, b),
        1 => bytes_of(a, atoms).cmp(&bytes_of(b, atoms)),
        2 | 3 => {
            let id = |v: &Value<'_>| match v {
                Value::StringRef(id) | Value::RefId(id) => *id,
                _ => 0,
            };
            id(a).cmp(&id(b))
        }
        4 => match (a, b) {
            (Value::Nested(ka, ia), Value::Nested(kb, ib)) => ka
                .tag_byte()
                .cmp(&kb.tag_byte())
                .then_with(|| ia.as_ref().cmp(ib.as_ref())),
            _ => Ordering::Equal,
        },
        // Singleton classes.
        _ => Ordering::Equal,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Binary search with a moving probe cursor
// ─────────────────────────────────────────────────────────────────────────────

struct Cursor {
    idx: u64,
    offset: usize,
}

/// Move the cursor to logical index `target` (which may be `n`, the end
/// position) with `arity` raw steps per logical step.
fn step_to(list: &PackList, cur: &mut Cursor, target: u64, arity: usize) -> Result<()> {
    while cur.idx < target {
        for _ in 0..arity {
            cur.offset = list.next(cur.offset).ok_or(Error::Corrupt)?;
        }
        cur.idx += 1;
    }
    while cur.idx > target {
        for _ in 0..arity {
            cur.offset = list.prev(cur.offset).ok_or(Error::Corrupt)?;
        }
        cur.idx -= 1;
    }
    Ok(())
}

/// Compare the logical entry at `offset` against the first `depth` key
/// values.  Returns the stored entry's ordering relative to the key.
fn compare_at(
    list: &PackList,
    offset: usize,
    key: &[Value<'_>],
    depth: usize,
    atoms: Option<&dyn StringTable>,
) -> Result<Ordering> {
    let mut pos = offset;
    for item in key.iter().take(depth) {
        let stored = list.get(pos)?;
        let ord = compare_values(&stored, item, atoms);
        if ord != Ordering::Equal {
            return Ok(ord);
        }
        pos = list.next(pos).ok_or(Error::Corrupt)?;
    }
    Ok(Ordering::Equal)
}

/// `[min, max)` binary search.  Returns `(index, offset, n)` of the first
/// logical entry not less than the key — or, in `highest` mode, the first
/// strictly greater, i.e. the slot just past the last equal run.
fn search(
    list: &PackList,
    arity: usize,
    depth: usize,
    key: &[Value<'_>],
    hint: &MiddleHint,
    atoms: Option<&dyn StringTable>,
    highest: bool,
) -> Result<(u64, usize, u64)> {
    if depth == 0 || depth > arity || key.len() < depth {
        return Err(Error::BadArgument);
    }
    let n = logical_count(list, arity)?;
    let mut cur = if n == 0 {
        Cursor {
            idx: 0,
            offset: list.head(),
        }
    } else if hint.offset >= list.head() && hint.offset < list.end() {
        Cursor {
            idx: n / 2,
            offset: hint.offset,
        }
    } else {
        // Stale hint; restart from the head.
        let mut c = Cursor {
            idx: 0,
            offset: list.head(),
        };
        step_to(list, &mut c, n / 2, arity)?;
        c
    };
    let (mut lo, mut hi) = (0u64, n);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        step_to(list, &mut cur, mid, arity)?;
        let go_right = match compare_at(list, cur.offset, key, depth, atoms)? {
            Ordering::Less => true,
            Ordering::Equal => highest,
            Ordering::Greater => false,
        };
        if go_right {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    step_to(list, &mut cur, lo, arity)?;
    Ok((lo, cur.offset, n))
}

// ─────────────────────────────────────────────────────────────────────────────
// Public operations
// ─────────────────────────────────────────────────────────────────────────────

/// Find the logical entry whose first `depth` values equal `key`.
/// Returns the byte offset of its first raw entry, or `None`.
pub fn find(
    list: &PackList,
    arity: usize,
    depth: usize,
    key: &[Value<'_>],
    hint: &MiddleHint,
    atoms: Option<&dyn StringTable>,
) -> Result<Option<usize>> {
    let (idx, offset, n) = search(list, arity, depth, key, hint, atoms, false)?;
    if idx < n && compare_at(list, offset, key, depth, atoms)? == Ordering::Equal {
        Ok(Some(offset))
    } else {
        Ok(None)
    }
}

/// Byte offset where a record with this key belongs.  `highest` places the
/// position after the last equal run instead of before the first.
pub fn insert_position(
    list: &PackList,
    arity: usize,
    depth: usize,
    key: &[Value<'_>],
    hint: &MiddleHint,
    atoms: Option<&dyn StringTable>,
    highest: bool,
) -> Result<usize> {
    search(list, arity, depth, key, hint, atoms, highest).map(|(_, offset, _)| offset)
}

/// Look up the record for `key` and return its first value entry (the
/// entry right after the key run), or the last key entry for `depth ==
/// arity`.  Missing keys are [`Error::NotFound`].
pub fn get(
    list: &PackList,
    arity: usize,
    depth: usize,
    key: &[Value<'_>],
    hint: &MiddleHint,
    atoms: Option<&dyn StringTable>,
) -> Result<Value<'static>> {
    let offset = find(list, arity, depth, key, hint, atoms)?.ok_or(Error::NotFound)?;
    let steps = if depth < arity { depth } else { arity - 1 };
    let mut pos = offset;
    for _ in 0..steps {
        pos = list.next(pos).ok_or(Error::Corrupt)?;
    }
    list.get_copy(pos)
}

/// Insert a full record of `arity` values at its sorted position,
/// maintaining the middle hint.  When a record with an equal key (first
/// `depth` values) already exists, its value tail is overwritten in place
/// instead.  Returns whether the key pre-existed.
pub fn insert(
    list: &mut PackList,
    arity: usize,
    depth: usize,
    values: &[Value<'_>],
    hint: &mut MiddleHint,
    atoms: Option<&dyn StringTable>,
) -> Result<bool> {
    if values.len() != arity {
        return Err(Error::BadArgument);
    }
    let (idx, offset, n) = search(list, arity, depth, values, hint, atoms, false)?;
    let existed =
        idx < n && compare_at(list, offset, values, depth, atoms)? == Ordering::Equal;
    if existed {
        if depth < arity {
            let delta = list.replace_all(offset, values, depth)?;
            // Count is unchanged, so the middle index is too; only byte
            // offsets may have shifted.  The overwrite starts strictly
            // inside the matched record, so a hint at the record's own
            // start never moves past it.
            let mut off = hint.offset as isize + delta.header_delta;
            if offset < hint.offset {
                off += delta.bytes_delta;
            }
            hint.offset = off as usize;
        }
        return Ok(true);
    }
    let delta = list.insert_all(offset, values)?;
    hint_after_insert(list, hint, arity, n, offset, delta)?;
    Ok(false)
}

/// Delete the record matching `key`, maintaining the middle hint.
/// Deleting a missing key is a no-op; the return value says whether a
/// record was removed.
pub fn delete(
    list: &mut PackList,
    arity: usize,
    depth: usize,
    key: &[Value<'_>],
    hint: &mut MiddleHint,
    atoms: Option<&dyn StringTable>,
) -> Result<bool> {
    let (idx, offset, n) = search(list, arity, depth, key, hint, atoms, false)?;
    if idx >= n || compare_at(list, offset, key, depth, atoms)? != Ordering::Equal {
        return Ok(false);
    }
    let delta = list.delete(offset, arity, false)?;
    hint_after_delete(list, hint, arity, n, idx, offset, delta)?;
    Ok(true)
}

// ─────────────────────────────────────────────────────────────────────────────
// Middle-hint maintenance
// ─────────────────────────────────────────────────────────────────────────────

fn step_logical(list: &PackList, offset: usize, arity: usize, forward: bool) -> Result<usize> {
    let mut pos = offset;
    for _ in 0..arity {
        pos = if forward {
            list.next(pos).ok_or(Error::Corrupt)?
        } else {
            list.prev(pos).ok_or(Error::Corrupt)?
        };
    }
    Ok(pos)
}

/// After inserting one logical entry at byte position `p` (old
/// coordinates) into a container of `n_old` logical entries: shift the
/// held offset by the header delta, add the inserted bytes when the
/// insertion was at or before the middle, then take the one logical
/// parity step.
fn hint_after_insert(
    list: &PackList,
    hint: &mut MiddleHint,
    arity: usize,
    n_old: u64,
    p: usize,
    delta: MutationDelta,
) -> Result<()> {
    if n_old == 0 {
        hint.offset = list.head();
        return Ok(());
    }
    let before = p <= hint.offset;
    let mut off = hint.offset as isize + delta.header_delta;
    if before {
        off += delta.bytes_delta;
    }
    let mut offset = off as usize;
    // The old middle entry now sits one index high (insertion before it)
    // or at its old index; the new middle is one higher only for odd
    // counts.  Net: even-and-before steps back, odd-and-after steps
    // forward, everything else stays.
    if n_old % 2 == 0 {
        if before {
            offset = step_logical(list, offset, arity, false)?;
        }
    } else if !before {
        offset = step_logical(list, offset, arity, true)?;
    }
    hint.offset = offset;
    Ok(())
}

/// Mirror of [`hint_after_insert`] for the removal of logical entry `i`
/// (byte position `p`, old coordinates).
fn hint_after_delete(
    list: &PackList,
    hint: &mut MiddleHint,
    arity: usize,
    n_old: u64,
    i: u64,
    p: usize,
    delta: MutationDelta,
) -> Result<()> {
    if n_old <= 1 {
        hint.offset = list.head();
        return Ok(());
    }
    let m = n_old / 2;
    let mut off = hint.offset as isize + delta.header_delta;
    if p < hint.offset {
        // Bytes before the middle were removed (bytes_delta is negative).
        // Deleting the middle itself leaves the offset pointing at the
        // successor that slid into its place.
        off += delta.bytes_delta;
    }
    let mut offset = off as usize;
    if n_old % 2 == 0 {
        if i >= m {
            offset = step_logical(list, offset, arity, false)?;
        }
    } else if i < m {
        offset = step_logical(list, offset, arity, true)?;
    }
    hint.offset = offset;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::Endpoint;
    use std::collections::HashMap;

    fn kv<'a>(k: &'a str, v: i64) -> [Value<'a>; 2] {
        [Value::from(k), Value::Signed(v)]
    }

    fn assert_hint_is_middle(list: &PackList, hint: &MiddleHint, arity: usize) {
        let fresh = MiddleHint::recompute(list, arity).unwrap();
        assert_eq!(hint.offset(), fresh.offset(), "hint drifted off the middle");
    }

    #[test]
    fn insert_keeps_records_sorted() {
        let mut c = PackList::new();
        let mut hint = MiddleHint::new(&c);
        for (k, v) in [("a", 1), ("c", 3), ("b", 2)] {
            let existed = insert(&mut c, 2, 1, &kv(k, v), &mut hint, None).unwrap();
            assert!(!existed);
            assert_hint_is_middle(&c, &hint, 2);
        }
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
    }

    #[test]
    fn find_returns_the_key_position() {
        let mut c = PackList::new();
        let mut hint = MiddleHint::new(&c);
        for (k, v) in [("a", 1), ("b", 2), ("c", 3)] {
            insert(&mut c, 2, 1, &kv(k, v), &mut hint, None).unwrap();
        }
        let pos = find(&c, 2, 1, &[Value::from("b")], &hint, None)
            .unwrap()
            .unwrap();
        assert_eq!(c.get(pos).unwrap(), Value::from("b"));
        let vpos = c.next(pos).unwrap();
        assert_eq!(c.get(vpos).unwrap(), Value::Unsigned(2));
        assert_eq!(find(&c, 2, 1, &[Value::from("q")], &hint, None).unwrap(), None);
        assert_eq!(
            get(&c, 2, 1, &[Value::from("c")], &hint, None).unwrap(),
            Value::Unsigned(3)
        );
        assert_eq!(
            get(&c, 2, 1, &[Value::from("zz")], &hint, None).err(),
            Some(Error::NotFound)
        );
    }

    #[test]
    fn matched_key_overwrites_the_value_tail() {
        let mut c = PackList::new();
        let mut hint = MiddleHint::new(&c);
        for (k, v) in [("a", 1), ("b", 2), ("c", 3)] {
            insert(&mut c, 2, 1, &kv(k, v), &mut hint, None).unwrap();
        }
        let existed = insert(&mut c, 2, 1, &kv("b", 20), &mut hint, None).unwrap();
        assert!(existed);
        assert_eq!(c.count(), 6);
        assert_hint_is_middle(&c, &hint, 2);
        assert_eq!(
            get(&c, 2, 1, &[Value::from("b")], &hint, None).unwrap(),
            Value::Unsigned(20)
        );
    }

    #[test]
    fn full_depth_allows_duplicate_keys_in_value_order() {
        let mut c = PackList::new();
        let mut hint = MiddleHint::new(&c);
        for v in [("a", 3), ("a", 1), ("b", 9), ("a", 2)] {
            insert(&mut c, 2, 2, &kv(v.0, v.1), &mut hint, None).unwrap();
            assert_hint_is_middle(&c, &hint, 2);
        }
        let flat: Vec<_> = c.iter().collect();
        assert_eq!(
            flat,
            vec![
                Value::from("a"),
                Value::Unsigned(1),
                Value::from("a"),
                Value::Unsigned(2),
                Value::from("a"),
                Value::Unsigned(3),
                Value::from("b"),
                Value::Unsigned(9),
            ]
        );
        // Re-inserting an identical record reports it as pre-existing.
        assert!(insert(&mut c, 2, 2, &kv("a", 2), &mut hint, None).unwrap());
        assert_eq!(c.count(), 8);
    }

    #[test]
    fn highest_insert_position_lands_after_the_equal_run() {
        let mut c = PackList::new();
        let mut hint = MiddleHint::new(&c);
        for v in [("a", 1), ("a", 2), ("b", 1)] {
            insert(&mut c, 2, 2, &kv(v.0, v.1), &mut hint, None).unwrap();
        }
        let lowest =
            insert_position(&c, 2, 1, &[Value::from("a")], &hint, None, false).unwrap();
        let highest =
            insert_position(&c, 2, 1, &[Value::from("a")], &hint, None, true).unwrap();
        assert_eq!(lowest, c.head());
        assert_eq!(c.get(highest).unwrap(), Value::from("b"));
    }

    #[test]
    fn delete_maintains_order_and_hint() {
        let mut c = PackList::new();
        let mut hint = MiddleHint::new(&c);
        let keys = ["a", "b", "c", "d", "e", "f", "g"];
        for (i, k) in keys.iter().enumerate() {
            insert(&mut c, 2, 1, &kv(k, i as i64), &mut hint, None).unwrap();
        }
        for k in ["d", "a", "g", "b"] {
            assert!(delete(&mut c, 2, 1, &[Value::from(k)], &mut hint, None).unwrap());
            assert_hint_is_middle(&c, &hint, 2);
        }
        assert!(!delete(&mut c, 2, 1, &[Value::from("zz")], &mut hint, None).unwrap());
        let flat: Vec<_> = c.iter().collect();
        assert_eq!(
            flat,
            vec![
                Value::from("c"),
                Value::Unsigned(2),
                Value::from("e"),
                Value::Unsigned(4),
                Value::from("f"),
                Value::Unsigned(5),
            ]
        );
    }

    #[test]
    fn sorted_pairs_stay_pairwise_ordered() {
        let mut c = PackList::new();
        let mut hint = MiddleHint::new(&c);
        let keys = [
            "whiskey", "alpha", "mike", "delta", "zulu", "echo", "kilo", "bravo", "tango",
            "india",
        ];
        for (i, k) in keys.iter().enumerate() {
            insert(&mut c, 2, 1, &kv(k, i as i64), &mut hint, None).unwrap();
            assert_hint_is_middle(&c, &hint, 2);
        }
        let flat: Vec<_> = c.iter().collect();
        for pair in flat.chunks(2).collect::<Vec<_>>().windows(2) {
            assert_eq!(
                compare_values(&pair[0][0], &pair[1][0], None),
                Ordering::Less
            );
        }
    }

    struct Atoms(HashMap<u64, &'static [u8]>);

    impl StringTable for Atoms {
        fn resolve(&self, id: u64) -> Option<&[u8]> {
            self.0.get(&id).copied()
        }
    }

    #[test]
    fn reference_keys_order_by_resolved_bytes() {
        let atoms = Atoms(HashMap::from([
            (10u64, &b"pear"[..]),
            (11u64, &b"apple"[..]),
            (12u64, &b"mango"[..]),
        ]));
        let mut c = PackList::new();
        let mut hint = MiddleHint::new(&c);
        for id in [10u64, 11, 12] {
            insert(
                &mut c,
                2,
                1,
                &[Value::StringRef(id), Value::Unsigned(id)],
                &mut hint,
                Some(&atoms),
            )
            .unwrap();
        }
        let flat: Vec<_> = c.iter().collect();
        // apple, mango, pear.
        assert_eq!(
            flat,
            vec![
                Value::StringRef(11),
                Value::Unsigned(11),
                Value::StringRef(12),
                Value::Unsigned(12),
                Value::StringRef(10),
                Value::Unsigned(10),
            ]
        );
        // A plain byte key compares against resolved references.
        let pos = insert_position(&c, 2, 1, &[Value::from("banana")], &hint, Some(&atoms), false)
            .unwrap();
        assert_eq!(c.get(pos).unwrap(), Value::StringRef(12));
    }

    #[test]
    fn comparator_orders_across_the_type_lattice() {
        let atoms: Option<&dyn StringTable> = None;
        let ordered: Vec<Value<'_>> = vec![
            Value::Float64(f64::NEG_INFINITY),
            Value::Signed(-10),
            Value::Unsigned(0),
            Value::Float32(0.5),
            Value::Unsigned(7),
            Value::Unsigned128(u128::MAX),
            Value::from(""),
            Value::from("abc"),
            Value::StringRef(4),
            Value::RefId(9),
            Value::Nested(
                crate::value::ContainerKind::List,
                std::borrow::Cow::Borrowed(&[2, 0][..]),
            ),
            Value::False,
            Value::True,
            Value::Null,
        ];
        for w in ordered.windows(2) {
            assert_eq!(
                compare_values(&w[0], &w[1], atoms),
                Ordering::Less,
                "{:?} < {:?}",
                w[0],
                w[1]
            );
        }
    }
}
