//! The container: a single contiguous, growable byte buffer owned by one
//! writer, holding a two-field header followed by packed entries.
//!
//! The buffer *is* the container.  There are no side structures: every
//! query decodes the image directly, every mutation rewrites it in place,
//! and the image round-trips through memcpy, file I/O, and the wire
//! unchanged.  [`PackList::from_bytes`] is the trust boundary — it walks
//! the whole image (recursively for nested containers) and rejects any
//! inconsistency as [`Error::Corrupt`]; everything built through the
//! mutation API stays valid by construction.

pub(crate) mod header;
mod mutate;
mod reduce;
mod traverse;

pub use mutate::MutationDelta;
pub use traverse::Iter;

use crate::entry;
use crate::error::{Error, Result};
use crate::value::TagClass;
use header::Header;

/// Which end of the container a [`PackList::push`] lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Head,
    Tail,
}

/// The pointer-free typed sequence container.
///
/// Entry positions are byte offsets into the image, re-derived by each
/// operation; they are invalidated by any mutation.  [`PackList::head`]
/// is the offset of the first entry and [`PackList::end`] the offset one
/// past the last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackList {
    pub(crate) buf: Vec<u8>,
}

impl Default for PackList {
    fn default() -> Self {
        PackList::new()
    }
}

impl PackList {
    /// The empty container: a one-byte total of 2 and a one-byte zero count.
    pub fn new() -> PackList {
        PackList { buf: vec![2, 0] }
    }

    /// Empty container with room for `cap` bytes of image.
    pub fn with_capacity(cap: usize) -> PackList {
        let mut buf = Vec::with_capacity(cap.max(2));
        buf.extend_from_slice(&[2, 0]);
        PackList { buf }
    }

    /// Adopt a serialized image, validating every invariant: header fields
    /// against the buffer, forward against reverse tags, the entry walk
    /// against the count, and nested containers recursively.
    pub fn from_bytes(buf: Vec<u8>) -> Result<PackList> {
        validate_image(&buf)?;
        Ok(PackList { buf })
    }

    /// Build a container from a run of values in one pass, sizing the
    /// header once instead of per push.
    pub fn from_values(values: &[crate::value::Value<'_>]) -> Result<PackList> {
        let mut data = Vec::new();
        for v in values {
            entry::append(&mut data, v)?;
        }
        from_parts(&data, values.len() as u64)
    }

    /// The persisted image.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Give up ownership of the image.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Physical byte length of the image (equals the total-bytes field).
    #[inline]
    pub fn total_bytes(&self) -> usize {
        self.buf.len()
    }

    /// Number of entries.
    #[inline]
    pub fn count(&self) -> u64 {
        self.header().count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Byte offset of the first entry.
    #[inline]
    pub fn head(&self) -> usize {
        self.header().width
    }

    /// Byte offset one past the last entry.
    #[inline]
    pub fn end(&self) -> usize {
        self.buf.len()
    }

    /// Fresh copy with its own buffer.
    pub fn duplicate(&self) -> PackList {
        self.clone()
    }

    /// Decode the header of an image this crate maintains.  Valid by
    /// construction; a failure here means memory corruption, so fall back
    /// to the empty shape rather than propagate.
    #[inline]
    pub(crate) fn header(&self) -> Header {
        match Header::read(&self.buf) {
            Ok(h) => h,
            Err(_) => {
                debug_assert!(false, "own image failed header decode");
                Header {
                    width: 2,
                    total: 2,
                    count: 0,
                }
            }
        }
    }

    /// Split into the entries before `mid` and the entries from `mid` on.
    ///
    /// `mid` must be the byte offset of entry ⌊count/2⌋ — the sorted-mode
    /// middle hint, when the caller holds one, makes this O(1) in entry
    /// walks; passing `None` recomputes the middle by walking.
    pub fn split(&self, mid: Option<usize>) -> Result<(PackList, PackList)> {
        let h = self.header();
        let left_count = h.count / 2;
        let mid = match mid {
            Some(m) => {
                if m < self.head() || m > self.end() {
                    return Err(Error::BadArgument);
                }
                m
            }
            None => {
                let mut pos = self.head();
                for _ in 0..left_count {
                    pos += entry::len_forward(&self.buf, pos)?;
                }
                pos
            }
        };
        let left = from_parts(&self.buf[self.head()..mid], left_count)?;
        let right = from_parts(&self.buf[mid..], h.count - left_count)?;
        Ok((left, right))
    }

    /// Concatenate, reusing the larger of the two buffers.
    pub fn merge(mut self, mut other: PackList) -> Result<PackList> {
        let (a, b) = (self.header(), other.header());
        if a.data_len() >= b.data_len() {
            let head = other.header().width;
            self.append_raw(&other.buf[head..], b.count as usize, Endpoint::Tail)?;
            Ok(self)
        } else {
            let head = self.header().width;
            other.append_raw(&self.buf[head..], a.count as usize, Endpoint::Head)?;
            Ok(other)
        }
    }
}

/// Assemble a container around a pre-packed run of entries.
pub(crate) fn from_parts(data: &[u8], count: u64) -> Result<PackList> {
    let (width, total) = header::resolve(data.len(), count);
    let mut buf = Vec::new();
    buf.try_reserve_exact(total).map_err(|_| Error::AllocFailure)?;
    buf.resize(width, 0);
    header::write(&mut buf, total as u64, count)?;
    buf.extend_from_slice(data);
    Ok(PackList { buf })
}

/// Full-image validation: the `from_bytes` trust boundary.
fn validate_image(buf: &[u8]) -> Result<()> {
    let h = Header::read(buf)?;
    if h.total != buf.len() as u64 {
        return Err(Error::Corrupt);
    }
    let mut pos = h.width;
    let mut walked: u64 = 0;
    while pos < buf.len() {
        let (shape, class) = entry::shape_forward(buf, pos)?;
        let len = shape.entry_len();
        if !shape.immediate {
            // Reverse tag: same length from the other direction, and the
            // exact forward tag bytes in reverse order.
            if entry::len_backward(buf, pos + len)? != len {
                return Err(Error::Corrupt);
            }
            let tw = shape.tag_width;
            for i in 0..tw {
                if buf[pos + i] != buf[pos + len - 1 - i] {
                    return Err(Error::Corrupt);
                }
            }
        }
        if let TagClass::Nested(_) = class {
            let at = pos + shape.payload_at();
            validate_image(&buf[at..at + shape.payload_len])?;
        }
        pos += len;
        walked += 1;
    }
    if pos != buf.len() || walked != h.count {
        return Err(Error::Corrupt);
    }
    Ok(())
}
