//! Errors shared by the codec and offset types.

use core::fmt;

/// Convenience alias for this crate's fallible operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors that can arise while decoding bytes out of the arena.
///
/// This is deliberately small: it sits below `db48x_object::ErrorKind` and
/// only describes malformed *encodings*, not RPL-level semantic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The buffer ended before a LEB128 value could be fully decoded.
    TruncatedLeb128,
    /// A LEB128 value decoded to more bits than the target integer holds.
    Leb128Overflow,
    /// The buffer was shorter than a declared object/payload size.
    BufferTooShort,
    /// An `Offset` arithmetic operation would exceed the arena's address space.
    OffsetOverflow,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::TruncatedLeb128 => "truncated LEB128 value",
            Error::Leb128Overflow => "LEB128 value overflows target type",
            Error::BufferTooShort => "buffer too short for declared size",
            Error::OffsetOverflow => "offset arithmetic overflowed",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
