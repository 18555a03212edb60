//! The mutation engine: insert, replace, and delete share one splice path.
//!
//! Every mutation runs the same sequence — size the delta from the
//! encoding selector, resolve the new header width, resize, shift the
//! unaffected head and tail regions, then write the new entries into the
//! gap — and differs only in how many existing entries the gap swallows
//! (none for an insert).  All region shifts use overlap-safe copies, and
//! sources that live inside the buffer being mutated are tracked as byte
//! offsets and rebound after the shifts, so duplicating an entry into its
//! own container is exact.
//!
//! Allocator refusal is surfaced before any byte moves: on
//! [`Error::AllocFailure`] the caller observes no mutation.

use crate::entry;
use crate::error::{Error, Result};
use crate::list::{header, Endpoint, PackList};
use crate::value::{self, Encoding, Value};

/// Outcome of one mutation, in the units an overlay needs to keep its own
/// byte offsets (such as the sorted-mode middle hint) aligned: the net
/// data-region change and the header-width change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationDelta {
    /// Bytes inserted minus bytes removed in the data region.
    pub bytes_delta: isize,
    /// Header width change in bytes.
    pub header_delta: isize,
}

/// Where one planned entry's bytes come from.
enum Source<'a> {
    /// Freshly selected encoding; payload is scratch, zeros, or a slice
    /// from outside this container.
    Encoded(Encoding<'a>),
    /// Pre-packed entry bytes from outside this container.
    RawOut(&'a [u8]),
    /// Pre-packed entry bytes inside this container, in pre-move
    /// coordinates; rebound after the region shifts.
    RawIn { offset: usize },
    /// Entry bytes copied out up front because they lay inside the region
    /// being replaced.
    RawSnap(Vec<u8>),
}

/// One planned write: source, total byte length, and how many entries it
/// contributes (raw blocks can carry several).
struct Plan<'a> {
    src: Source<'a>,
    len: usize,
    entries: usize,
}

fn plan_values<'v>(values: &'v [Value<'_>]) -> Result<Vec<Plan<'v>>> {
    values
        .iter()
        .map(|v| {
            let enc = value::encode(v)?;
            Ok(Plan {
                len: enc.entry_len(),
                entries: 1,
                src: Source::Encoded(enc),
            })
        })
        .collect()
}

impl PackList {
    /// Append or prepend one value.
    pub fn push(&mut self, v: &Value<'_>, at: Endpoint) -> Result<MutationDelta> {
        let pos = match at {
            Endpoint::Head => self.head(),
            Endpoint::Tail => self.end(),
        };
        self.insert(pos, v)
    }

    /// Insert one value so that it becomes the entry at `pos`.
    pub fn insert(&mut self, pos: usize, v: &Value<'_>) -> Result<MutationDelta> {
        self.insert_all(pos, core::slice::from_ref(v))
    }

    /// Insert a run of values starting at `pos`.
    pub fn insert_all(&mut self, pos: usize, values: &[Value<'_>]) -> Result<MutationDelta> {
        let mut plans = plan_values(values)?;
        splice(self, pos, 0, &mut plans, false, None)
    }

    /// Duplicate the entry at `src_pos` so the copy becomes the entry at
    /// `pos`.  The source bytes are read as they were at call entry, even
    /// though the buffer reallocates and shifts underneath them.
    pub fn insert_from(&mut self, pos: usize, src_pos: usize) -> Result<MutationDelta> {
        let len = entry::len_forward(&self.buf, src_pos).map_err(|_| Error::BadArgument)?;
        let mut plans = [Plan {
            src: Source::RawIn { offset: src_pos },
            len,
            entries: 1,
        }];
        splice(self, pos, 0, &mut plans, false, None)
    }

    /// Replace the entry at `pos` with one value.
    pub fn replace(&mut self, pos: usize, v: &Value<'_>) -> Result<MutationDelta> {
        self.replace_all(pos, core::slice::from_ref(v), 0)
    }

    /// Replace a run of entries at `pos` with `values`, skipping the first
    /// `skip` inputs: those already exist unchanged at `pos`, so the
    /// overwrite starts `skip` entries past it.  This is the sorted-mode
    /// "key matched — overwrite only the values" shape.
    pub fn replace_all(
        &mut self,
        pos: usize,
        values: &[Value<'_>],
        skip: usize,
    ) -> Result<MutationDelta> {
        if skip > values.len() {
            return Err(Error::BadArgument);
        }
        let mut p = pos;
        for _ in 0..skip {
            if p >= self.end() {
                return Err(Error::BadArgument);
            }
            p += entry::len_forward(&self.buf, p).map_err(|_| Error::BadArgument)?;
        }
        let mut plans = plan_values(&values[skip..])?;
        splice(self, p, values.len() - skip, &mut plans, false, None)
    }

    /// Replace the entry at `pos` with a copy of the entry at `src_pos`
    /// from this same container.
    pub fn replace_from(&mut self, pos: usize, src_pos: usize) -> Result<MutationDelta> {
        let len = entry::len_forward(&self.buf, src_pos).map_err(|_| Error::BadArgument)?;
        let old = entry::len_forward(&self.buf, pos).map_err(|_| Error::BadArgument)?;
        // A source overlapping the replaced region would be overwritten
        // mid-write; snapshot it up front.  Disjoint sources stay in place
        // and are rebound after the shifts.
        let src = if src_pos + len <= pos || src_pos >= pos + old {
            Source::RawIn { offset: src_pos }
        } else {
            Source::RawSnap(self.buf[src_pos..src_pos + len].to_vec())
        };
        let mut plans = [Plan {
            src,
            len,
            entries: 1,
        }];
        splice(self, pos, 1, &mut plans, false, None)
    }

    /// Delete `n` entries starting at `pos`.  `drain` defers the shrinking
    /// reallocation, amortizing bulk deletes; the final image is identical
    /// either way.
    pub fn delete(&mut self, pos: usize, n: usize, drain: bool) -> Result<MutationDelta> {
        splice(self, pos, n, &mut [], drain, None)
    }

    /// Delete `n` entries starting at entry index `idx` (negative indexes
    /// from the tail).
    pub fn delete_range(&mut self, idx: i64, n: usize) -> Result<MutationDelta> {
        let pos = self.index(idx).ok_or(Error::BadArgument)?;
        self.delete(pos, n, false)
    }

    /// Delete `n` entries starting at entry index `idx`, returning them as
    /// a new container.
    pub fn split_range(&mut self, idx: i64, n: usize) -> Result<PackList> {
        let pos = self.index(idx).ok_or(Error::BadArgument)?;
        let mut collected = PackList::new();
        splice(self, pos, n, &mut [], false, Some(&mut collected))?;
        Ok(collected)
    }

    /// Splice a pre-packed run of `entries` entries onto one end.
    pub(crate) fn append_raw(
        &mut self,
        bytes: &[u8],
        entries: usize,
        at: Endpoint,
    ) -> Result<MutationDelta> {
        let pos = match at {
            Endpoint::Head => self.head(),
            Endpoint::Tail => self.end(),
        };
        let mut plans = [Plan {
            src: Source::RawOut(bytes),
            len: bytes.len(),
            entries,
        }];
        splice(self, pos, 0, &mut plans, false, None)
    }
}

/// The shared splice: remove `remove` entries at `pos`, write `plans` into
/// the gap.  State sequence per mutation: size the delta, snapshot
/// aliasing, grow or shrink with ordered region shifts, rebind in-buffer
/// sources, write, rewrite the header.
fn splice(
    list: &mut PackList,
    pos: usize,
    remove: usize,
    plans: &mut [Plan<'_>],
    drain: bool,
    collect: Option<&mut PackList>,
) -> Result<MutationDelta> {
    let h = list.header();
    let old_total = list.buf.len();
    let old_hw = h.width;
    if pos < old_hw || pos > old_total {
        return Err(Error::BadArgument);
    }
    if pos < old_total {
        // Best-effort entry-boundary check; a position inside a payload
        // that happens to decode is the caller's bug to keep.
        entry::len_forward(&list.buf, pos).map_err(|_| Error::BadArgument)?;
    }

    // Walk the region being removed.
    let mut region_end = pos;
    for _ in 0..remove {
        if region_end >= old_total {
            return Err(Error::BadArgument);
        }
        region_end += entry::len_forward(&list.buf, region_end)?;
    }

    let added: usize = plans.iter().map(|p| p.len).sum();
    let added_entries: usize = plans.iter().map(|p| p.entries).sum();
    let removed_bytes = region_end - pos;

    let old_data = old_total - old_hw;
    let new_data = old_data - removed_bytes + added;
    let new_count = h.count - remove as u64 + added_entries as u64;
    let (new_hw, new_total) = header::resolve(new_data, new_count);
    let hw_delta = new_hw as isize - old_hw as isize;
    let inner_delta = added as isize - removed_bytes as isize;

    // Reserve before anything observable happens, so allocator refusal
    // leaves the container untouched.
    if new_total > old_total {
        list.buf
            .try_reserve_exact(new_total - old_total)
            .map_err(|_| Error::AllocFailure)?;
    }

    // Hand the removed entries to the collector before they move.
    if let Some(col) = collect {
        col.append_raw(&list.buf[pos..region_end], remove, Endpoint::Tail)?;
    }

    if new_total > old_total {
        list.buf.resize(new_total, 0);
    }

    // Shift the tail and the pre-position head region to their final
    // offsets.  When the header grows, everything moves right: the tail
    // must go first so the head's rightward slide cannot overrun it.  When
    // the header shrinks, the head slides left first for the mirror reason.
    let tail_dst = (region_end as isize + hw_delta + inner_delta) as usize;
    if hw_delta >= 0 {
        list.buf.copy_within(region_end..old_total, tail_dst);
        if hw_delta > 0 {
            list.buf.copy_within(old_hw..pos, old_hw + hw_delta as usize);
        }
    } else {
        list.buf
            .copy_within(old_hw..pos, (old_hw as isize + hw_delta) as usize);
        list.buf.copy_within(region_end..old_total, tail_dst);
    }

    // Rebind in-buffer sources: the buffer, the position, and the source
    // may all have moved, but the recorded offset plus the shifts it
    // participated in locates the same bytes.
    for p in plans.iter_mut() {
        if let Source::RawIn { offset } = &mut p.src {
            if *offset >= region_end {
                *offset = (*offset as isize + hw_delta + inner_delta) as usize;
            } else {
                *offset = (*offset as isize + hw_delta) as usize;
            }
        }
    }

    if new_total < old_total {
        list.buf.truncate(new_total);
        if !drain {
            list.buf.shrink_to_fit();
        }
    }

    // Write the new entries into the gap.
    let mut at = (pos as isize + hw_delta) as usize;
    for p in plans.iter() {
        match &p.src {
            Source::Encoded(enc) => {
                entry::write_encoded(&mut list.buf, at, enc);
            }
            Source::RawOut(bytes) => list.buf[at..at + bytes.len()].copy_from_slice(bytes),
            Source::RawSnap(bytes) => list.buf[at..at + bytes.len()].copy_from_slice(bytes),
            Source::RawIn { offset } => list.buf.copy_within(*offset..*offset + p.len, at),
        }
        at += p.len;
    }

    header::write(&mut list.buf, new_total as u64, new_count)?;
    Ok(MutationDelta {
        bytes_delta: inner_delta,
        header_delta: hw_delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use std::borrow::Cow;

    fn values(c: &PackList) -> Vec<Value<'_>> {
        c.iter().collect()
    }

    #[test]
    fn push_both_ends() {
        let mut c = PackList::new();
        c.push(&Value::from("b"), Endpoint::Tail).unwrap();
        c.push(&Value::from("a"), Endpoint::Head).unwrap();
        c.push(&Value::from("c"), Endpoint::Tail).unwrap();
        assert_eq!(
            values(&c),
            vec![
                Value::Bytes(Cow::Borrowed(b"a")),
                Value::Bytes(Cow::Borrowed(b"b")),
                Value::Bytes(Cow::Borrowed(b"c")),
            ]
        );
        assert_eq!(c.count(), 3);
    }

    #[test]
    fn insert_in_the_middle() {
        let mut c = PackList::new();
        c.push(&Value::from(1i64), Endpoint::Tail).unwrap();
        c.push(&Value::from(3i64), Endpoint::Tail).unwrap();
        let second = c.index(1).unwrap();
        c.insert(second, &Value::from(2i64)).unwrap();
        assert_eq!(
            values(&c),
            vec![Value::Unsigned(1), Value::Unsigned(2), Value::Unsigned(3)]
        );
    }

    #[test]
    fn replace_grows_and_shrinks() {
        let mut c = PackList::new();
        c.push(&Value::from("short"), Endpoint::Tail).unwrap();
        c.push(&Value::from(9u64), Endpoint::Tail).unwrap();
        let first = c.head();
        let long = vec![b'x'; 100];
        c.replace(first, &Value::Bytes(Cow::Borrowed(&long))).unwrap();
        assert_eq!(values(&c)[0], Value::Bytes(Cow::Borrowed(&long[..])));
        assert_eq!(values(&c)[1], Value::Unsigned(9));
        let first = c.head();
        c.replace(first, &Value::from("s")).unwrap();
        assert_eq!(values(&c)[0], Value::Bytes(Cow::Borrowed(b"s")));
        assert_eq!(c.count(), 2);
    }

    #[test]
    fn replace_all_with_skip_overwrites_the_tail_only() {
        let mut c = PackList::new();
        for v in ["k", "v1", "v2"] {
            c.push(&Value::from(v), Endpoint::Tail).unwrap();
        }
        let head = c.head();
        c.replace_all(
            head,
            &[Value::from("k"), Value::from("w1"), Value::from("w2")],
            1,
        )
        .unwrap();
        assert_eq!(
            values(&c),
            vec![
                Value::Bytes(Cow::Borrowed(b"k")),
                Value::Bytes(Cow::Borrowed(b"w1")),
                Value::Bytes(Cow::Borrowed(b"w2")),
            ]
        );
    }

    #[test]
    fn delete_and_drain_yield_identical_images() {
        let build = || {
            let mut c = PackList::new();
            for i in 0..10u64 {
                c.push(&Value::Unsigned(i), Endpoint::Tail).unwrap();
            }
            c
        };
        let mut a = build();
        let mut b = build();
        let pos = a.index(2).unwrap();
        a.delete(pos, 5, false).unwrap();
        let pos = b.index(2).unwrap();
        b.delete(pos, 5, true).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_eq!(
            values(&a),
            vec![
                Value::Unsigned(0),
                Value::Unsigned(1),
                Value::Unsigned(7),
                Value::Unsigned(8),
                Value::Unsigned(9),
            ]
        );
    }

    #[test]
    fn delete_past_end_is_rejected_unchanged() {
        let mut c = PackList::new();
        c.push(&Value::from(1u64), Endpoint::Tail).unwrap();
        let snapshot = c.as_bytes().to_vec();
        assert_eq!(c.delete(c.head(), 2, false).err(), Some(Error::BadArgument));
        assert_eq!(c.as_bytes(), &snapshot[..]);
    }

    #[test]
    fn split_range_collects_the_removed_entries() {
        let mut c = PackList::new();
        for i in 0..6i64 {
            c.push(&Value::Signed(i), Endpoint::Tail).unwrap();
        }
        let mid = c.split_range(2, 3).unwrap();
        assert_eq!(
            values(&mid),
            vec![Value::Unsigned(2), Value::Unsigned(3), Value::Unsigned(4)]
        );
        assert_eq!(
            values(&c),
            vec![Value::Unsigned(0), Value::Unsigned(1), Value::Unsigned(5)]
        );
    }

    #[test]
    fn self_aliased_insert_copies_call_entry_bytes() {
        let mut c = PackList::new();
        for v in ["x", "y", "z"] {
            c.push(&Value::from(v), Endpoint::Tail).unwrap();
        }
        let y = c.index(1).unwrap();
        c.insert_from(c.head(), y).unwrap();
        assert_eq!(
            values(&c),
            vec![
                Value::Bytes(Cow::Borrowed(b"y")),
                Value::Bytes(Cow::Borrowed(b"x")),
                Value::Bytes(Cow::Borrowed(b"y")),
                Value::Bytes(Cow::Borrowed(b"z")),
            ]
        );
    }

    #[test]
    fn self_aliased_insert_survives_header_regrowth() {
        // Fill to just under the 1-byte total ceiling, then duplicate an
        // entry so the insert itself forces the header from 2 to 3 bytes.
        let mut c = PackList::new();
        for i in 0..20u8 {
            c.push(&Value::Bytes(Cow::Borrowed(&[b'a' + (i % 26)])), Endpoint::Tail)
                .unwrap();
        }
        assert_eq!(c.total_bytes(), 62);
        let last = c.last().unwrap();
        let delta = c.insert_from(c.head(), last).unwrap();
        assert_eq!(delta.header_delta, 1);
        assert_eq!(c.count(), 21);
        let got = values(&c);
        assert_eq!(got[0], Value::Bytes(Cow::Borrowed(b"t")));
        assert_eq!(got[20], Value::Bytes(Cow::Borrowed(b"t")));
    }

    #[test]
    fn replace_from_the_replaced_entry_itself() {
        let mut c = PackList::new();
        for v in ["aa", "bb", "cc"] {
            c.push(&Value::from(v), Endpoint::Tail).unwrap();
        }
        let second = c.index(1).unwrap();
        c.replace_from(second, second).unwrap();
        assert_eq!(
            values(&c),
            vec![
                Value::Bytes(Cow::Borrowed(b"aa")),
                Value::Bytes(Cow::Borrowed(b"bb")),
                Value::Bytes(Cow::Borrowed(b"cc")),
            ]
        );
        let third = c.index(2).unwrap();
        c.replace_from(c.head(), third).unwrap();
        assert_eq!(values(&c)[0], Value::Bytes(Cow::Borrowed(b"cc")));
    }

    #[test]
    fn mutation_delta_reports_header_and_byte_changes() {
        let mut c = PackList::new();
        let d = c.push(&Value::from("hi"), Endpoint::Tail).unwrap();
        assert_eq!((d.bytes_delta, d.header_delta), (4, 0));
        let pos = c.head();
        let d = c.delete(pos, 1, false).unwrap();
        assert_eq!((d.bytes_delta, d.header_delta), (-4, 0));
        assert_eq!(c.as_bytes(), &[2, 0]);
    }
}
