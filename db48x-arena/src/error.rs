//! Errors the arena and collector can raise.

use core::fmt;

/// Alias for this crate's fallible operations.
pub type Result<T, E = ArenaError> = core::result::Result<T, E>;

/// Failures the arena or collector can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArenaError {
    /// Allocation did not fit even after a collection ran (spec.md §4.1).
    OutOfMemory,
    /// A handle was released out of nested order.
    HandleStackMismatch,
    /// The object model could not size the bytes at an offset.
    MalformedObject,
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ArenaError::OutOfMemory => "out of memory",
            ArenaError::HandleStackMismatch => "GC handle released out of nested order",
            ArenaError::MalformedObject => "object model could not size object bytes",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ArenaError {}

impl From<db48x_types::Error> for ArenaError {
    fn from(_: db48x_types::Error) -> Self {
        ArenaError::MalformedObject
    }
}
