// config.rs — Compile-time configuration constants.

/// Smallest data region (bytes after the two header fields) that the
/// compressed wrapper will accept.  Below this, LZ4 block overhead
/// reliably exceeds any saving and `compress` reports `NotCompressible`.
pub const MIN_COMPRESS_BYTES: usize = 64;

/// Byte width reserved for the compressed-length varint before the actual
/// compressed size is known.  Two bytes covers payloads up to 16 447 bytes,
/// the common case; the payload is shifted by the width delta afterwards
/// when the real varint turns out narrower or wider.
pub const COMPRESSED_LEN_RESERVE: usize = 2;

/// Upper bound on iterations of the header-width fixed point.  The loop
/// settles in at most two passes for every reachable input; the cap turns a
/// logic regression into a loop exit instead of a hang.
pub const HEADER_FIXPOINT_CAP: usize = 4;
