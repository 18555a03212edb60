//! Error taxonomy shared by every container operation.
//!
//! All errors are returned to the immediate caller; nothing is caught or
//! retried internally.  `Corrupt` is unconditionally surfaced — the
//! container never attempts self-repair.  `AllocFailure` is fatal for the
//! operation but not for the container: the buffer is left in its pre-call
//! state.

use core::fmt;

/// Result alias used across the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned by container operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The allocator refused to grow the buffer; the container is unchanged.
    AllocFailure,
    /// A value cannot be encoded: zero passed to the no-zero varint, a
    /// 128-bit magnitude out of range, or a fold accumulator overflow.
    EncodingOverflow,
    /// A decoded image is inconsistent: total-bytes disagrees with the
    /// buffer length, the entry walk disagrees with the count field, a
    /// reverse tag disagrees with its forward tag, a tag byte falls in a
    /// reserved or unassigned range, or a compressed payload fails LZ4.
    Corrupt,
    /// Sorted-mode find or delete on a key that is not present.
    NotFound,
    /// A position that is not a valid entry start, a delete running past
    /// the end of the container, or mismatched sorted-mode arity.
    BadArgument,
    /// The data region is too small or too dense for the compressed
    /// wrapper to shrink it.
    NotCompressible,
}

impl Error {
    /// Stable textual name for this error.
    pub fn error_name(&self) -> &'static str {
        match self {
            Error::AllocFailure => "alloc_failure",
            Error::EncodingOverflow => "encoding_overflow",
            Error::Corrupt => "corrupt",
            Error::NotFound => "not_found",
            Error::BadArgument => "bad_argument",
            Error::NotCompressible => "not_compressible",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.error_name())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_error_name() {
        for e in [
            Error::AllocFailure,
            Error::EncodingOverflow,
            Error::Corrupt,
            Error::NotFound,
            Error::BadArgument,
            Error::NotCompressible,
        ] {
            assert_eq!(format!("{e}"), e.error_name());
        }
    }
}
