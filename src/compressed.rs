//! The compressed wrapper: the same two-field header, a third
//! compressed-length field, then an LZ4 *block* payload.
//!
//! ```text
//! [ total_bytes ] [ count ] [ compressed_len : split-full varint ] [ lz4 block ]
//! ```
//!
//! `total_bytes` and `count` are byte-identical to the uncompressed
//! container's header — `total_bytes` still describes the *uncompressed*
//! image, so a decoder can size the target buffer before touching the
//! payload, and header decoding is shared between both forms.  Only the
//! data region (everything after the two header fields) is compressed.
//!
//! The third varint's width is unknown until compression finishes, so the
//! writer reserves the common two-byte case, compresses, then slides the
//! payload by the width delta when the real varint differs.

use crate::config;
use crate::error::{Error, Result};
use crate::list::PackList;
use crate::varint;

/// A container in its compressed form.  Convert with
/// [`PackList::compress`] and [`CompressedList::decompress`]; both forms
/// own their buffer and survive memcpy and persistence unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedList {
    buf: Vec<u8>,
}

/// Decoded three-part header.
struct Parts {
    /// Width of the two shared header fields.
    prefix: usize,
    /// Uncompressed total, header included.
    total: usize,
    count: u64,
    /// Offset of the LZ4 payload.
    payload_at: usize,
    payload_len: usize,
}

fn parse(buf: &[u8]) -> Result<Parts> {
    let (total, w1) = varint::split_get(buf)?;
    let (count, w2) = varint::tagged_get(&buf[w1..])?;
    let (clen, w3) = varint::split_get(&buf[w1 + w2..])?;
    let prefix = w1 + w2;
    let total = usize::try_from(total).map_err(|_| Error::Corrupt)?;
    let payload_len = usize::try_from(clen).map_err(|_| Error::Corrupt)?;
    let payload_at = prefix + w3;
    if payload_at + payload_len != buf.len() || total <= prefix {
        return Err(Error::Corrupt);
    }
    Ok(Parts {
        prefix,
        total,
        count,
        payload_at,
        payload_len,
    })
}

impl PackList {
    /// Compress into the wrapped form.  Fails with
    /// [`Error::NotCompressible`] when the data region is smaller than
    /// [`config::MIN_COMPRESS_BYTES`] or when LZ4 cannot strictly shrink
    /// it; the container is a better representation in either case.
    pub fn compress(&self) -> Result<CompressedList> {
        let image = self.as_bytes();
        let prefix = self.head();
        let data = &image[prefix..];
        if data.len() < config::MIN_COMPRESS_BYTES {
            return Err(Error::NotCompressible);
        }
        let reserve = config::COMPRESSED_LEN_RESERVE;
        // Budget one byte under the uncompressed size: a wrapper that does
        // not shrink the data region is not worth producing.
        let budget = data.len() - 1;
        let mut out = vec![0u8; prefix + reserve + budget];
        out[..prefix].copy_from_slice(&image[..prefix]);
        let clen = lz4_flex::block::compress_into(data, &mut out[prefix + reserve..])
            .map_err(|_| Error::NotCompressible)?;
        let width = varint::split_len(clen as u64);
        if width != reserve {
            let need = prefix + width + clen;
            if need > out.len() {
                out.resize(need, 0);
            }
            out.copy_within(prefix + reserve..prefix + reserve + clen, prefix + width);
        }
        varint::split_put(&mut out[prefix..], clen as u64)?;
        out.truncate(prefix + width + clen);
        Ok(CompressedList { buf: out })
    }
}

impl CompressedList {
    /// Adopt a serialized compressed image, validating its three-part
    /// header and payload length.  The payload itself is only proven
    /// against the header on [`CompressedList::decompress`].
    pub fn from_bytes(buf: Vec<u8>) -> Result<CompressedList> {
        parse(&buf)?;
        Ok(CompressedList { buf })
    }

    /// The persisted compressed image.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Give up ownership of the compressed image.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Total byte length the container will have once decompressed.
    pub fn uncompressed_bytes(&self) -> Result<usize> {
        parse(&self.buf).map(|p| p.total)
    }

    /// Number of entries in the wrapped container.
    pub fn count(&self) -> Result<u64> {
        parse(&self.buf).map(|p| p.count)
    }

    /// Expand back into the container form.  Any disagreement between the
    /// header, the payload, and the decompressed image is
    /// [`Error::Corrupt`].
    pub fn decompress(&self) -> Result<PackList> {
        let p = parse(&self.buf)?;
        let mut out = Vec::new();
        out.try_reserve_exact(p.total).map_err(|_| Error::AllocFailure)?;
        out.resize(p.total, 0);
        out[..p.prefix].copy_from_slice(&self.buf[..p.prefix]);
        let payload = &self.buf[p.payload_at..p.payload_at + p.payload_len];
        let written = lz4_flex::block::decompress_into(payload, &mut out[p.prefix..])
            .map_err(|_| Error::Corrupt)?;
        if written != p.total - p.prefix {
            return Err(Error::Corrupt);
        }
        PackList::from_bytes(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::Endpoint;
    use crate::value::Value;

    fn sample(entries: usize) -> PackList {
        let mut c = PackList::new();
        for i in 0..entries {
            let body = format!("entry-{i:04}-padding-padding");
            c.push(&Value::from(body.as_str()), Endpoint::Tail).unwrap();
        }
        c
    }

    #[test]
    fn roundtrip_preserves_the_exact_image() {
        let c = sample(40);
        let z = c.compress().unwrap();
        assert!(z.as_bytes().len() < c.total_bytes());
        assert_eq!(z.uncompressed_bytes().unwrap(), c.total_bytes());
        assert_eq!(z.count().unwrap(), c.count());
        let back = z.decompress().unwrap();
        assert_eq!(back.as_bytes(), c.as_bytes());
    }

    #[test]
    fn shared_header_prefix_is_byte_identical() {
        let c = sample(40);
        let z = c.compress().unwrap();
        let prefix = c.head();
        assert_eq!(&z.as_bytes()[..prefix], &c.as_bytes()[..prefix]);
    }

    #[test]
    fn tiny_containers_are_not_compressible() {
        let mut c = PackList::new();
        c.push(&Value::from("small"), Endpoint::Tail).unwrap();
        assert_eq!(c.compress().err(), Some(Error::NotCompressible));
    }

    #[test]
    fn incompressible_data_is_refused() {
        // A data region with no repetition: LZ4 cannot shrink it within
        // the strict budget.
        let mut c = PackList::new();
        let noise: Vec<u8> = (0..255u32)
            .map(|i| (i.wrapping_mul(167).wrapping_add(i >> 3) & 0xff) as u8)
            .collect();
        c.push(&Value::Bytes(noise.into()), Endpoint::Tail).unwrap();
        assert_eq!(c.compress().err(), Some(Error::NotCompressible));
    }

    #[test]
    fn corrupt_images_are_rejected() {
        let c = sample(40);
        let z = c.compress().unwrap();
        // Total-bytes field claims one byte more than the payload expands
        // to: the decompressed length no longer matches.
        let mut bytes = z.as_bytes().to_vec();
        let (total, _) = varint::split_get(&bytes).unwrap();
        varint::split_put(&mut bytes, total + 1).unwrap();
        let tampered = CompressedList::from_bytes(bytes).unwrap();
        assert_eq!(tampered.decompress().err(), Some(Error::Corrupt));
        // Count field disagrees with the walk of the expanded image.
        let mut bytes = z.as_bytes().to_vec();
        let (_, w1) = varint::split_get(&bytes).unwrap();
        bytes[w1] = bytes[w1].wrapping_add(1);
        let tampered = CompressedList::from_bytes(bytes).unwrap();
        assert_eq!(tampered.decompress().err(), Some(Error::Corrupt));
        // Truncated image fails structural parsing outright.
        let mut short = z.as_bytes().to_vec();
        short.pop();
        assert_eq!(CompressedList::from_bytes(short).err(), Some(Error::Corrupt));
    }
}
