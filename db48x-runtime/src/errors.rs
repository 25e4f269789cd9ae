//! The one failure mode this layer has that `db48x_object::ErrorKind`
//! doesn't already name: running past a stack's configured depth limit.
//! Everything else (divide by zero, wrong argument count, an undefined
//! name, ...) is surfaced as the shared [`db48x_object::ErrorKind`]
//! directly, per the cross-crate error-taxonomy convention established in
//! `db48x-numeric`/`db48x-container`.

use db48x_container::DirectoryError;
use db48x_object::ErrorKind;

/// A failure raised by the stacks, settings, error-handler, or library
/// tables in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeError {
    /// A lower-layer failure that already has a name in the shared
    /// taxonomy.
    Kind(ErrorKind),
    /// The data or return stack exceeded its configured depth limit.
    StackOverflow,
    /// The error-handler stack was popped while empty.
    NoActiveHandler,
    /// The undo ring holds no snapshot to restore.
    NothingToUndo,
}

impl core::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RuntimeError::Kind(kind) => kind.fmt(f),
            RuntimeError::StackOverflow => f.write_str("stack overflow"),
            RuntimeError::NoActiveHandler => f.write_str("no active error handler"),
            RuntimeError::NothingToUndo => f.write_str("nothing to undo"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RuntimeError {}

impl From<ErrorKind> for RuntimeError {
    fn from(kind: ErrorKind) -> Self {
        RuntimeError::Kind(kind)
    }
}

impl From<DirectoryError> for RuntimeError {
    fn from(error: DirectoryError) -> Self {
        RuntimeError::Kind(ErrorKind::from(error))
    }
}

impl From<RuntimeError> for ErrorKind {
    fn from(error: RuntimeError) -> Self {
        match error {
            RuntimeError::Kind(kind) => kind,
            RuntimeError::StackOverflow => ErrorKind::OutOfMemory,
            RuntimeError::NoActiveHandler => ErrorKind::InvalidInput,
            RuntimeError::NothingToUndo => ErrorKind::InvalidInput,
        }
    }
}
