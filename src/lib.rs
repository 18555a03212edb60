//! packlist — a pointer-free, self-describing typed sequence container.
//!
//! A [`PackList`] packs heterogeneous typed values — byte strings, signed
//! and unsigned integers up to 128 bits, half/bfloat16/single/double
//! floats, interned-string pointers, reference IDs, nested containers, and
//! the true/false/null/empty singletons — into one contiguous byte buffer:
//!
//! ```text
//! [ total_bytes ] [ count ] [ entry_0 ] [ entry_1 ] … [ entry_{count-1} ]
//! ```
//!
//! Every entry carries its type tag at both ends, so the image walks in
//! O(1) per step from either direction with no side index, and the buffer
//! round-trips through memcpy, file I/O, and the wire without fixup.  One
//! reallocated buffer replaces N small allocations; entries stay
//! cache-dense.
//!
//! Positions are byte offsets ([`PackList::head`] .. [`PackList::end`]),
//! handed back by [`PackList::next`] / [`PackList::prev`] /
//! [`PackList::index`] and invalidated by any mutation.
//!
//! On top of the flat container sit two overlays:
//!
//! * **sorted mode** ([`sorted`]) — binary search over logical records of
//!   arity *k* with a caller-held [`MiddleHint`], duplicate keys via
//!   full-depth comparison, and O(1) hint maintenance across mutations;
//! * **compressed form** ([`CompressedList`], `compress` feature) — the
//!   same header with the data region behind an LZ4 block.
//!
//! The container is single-owner: no locks, no background work, no
//! suspension.  Wrap it in external synchronization to share it.

pub mod config;
mod entry;
pub mod error;
pub mod list;
pub mod sorted;
pub mod value;
pub mod varint;

#[cfg(feature = "compress")]
pub mod compressed;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level re-exports for the common API surface
// ─────────────────────────────────────────────────────────────────────────────

/// Error kind shared by every operation.
pub use error::{Error, Result};

/// The container, its mutation delta record, push endpoints, and iterator.
pub use list::{Endpoint, Iter, MutationDelta, PackList};

/// Typed values and the nested-container kind flag.
pub use value::{ContainerKind, Value};

/// Sorted-mode overlay state and the reference-value resolver.
pub use sorted::{MiddleHint, StringTable};

/// Sorted-mode operations over logical records of arity *k*.
pub use sorted::{
    delete as sorted_delete, find as sorted_find, get as sorted_get, insert as sorted_insert,
    insert_position as sorted_insert_position,
};

/// The LZ4-wrapped form.
#[cfg(feature = "compress")]
pub use compressed::CompressedList;
