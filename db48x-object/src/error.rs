//! `ErrorKind`: the closed error taxonomy raised by every layer above the
//! arena codec (spec.md §4.8).
//!
//! Names are normative — they are shown to the user verbatim and matched by
//! `iferr`/`errm`, so this enum may gain variants but never rename or
//! reorder existing ones. The message text is available with or without
//! `std` (a handheld calculator built with this crate never links libstd),
//! so `Display` is hand-written rather than derived from `thiserror`, which
//! `db48x-types::error` does for the same reason.

use core::fmt;

/// Convenience alias for operations that fail with an [`ErrorKind`].
pub type Result<T, E = ErrorKind> = core::result::Result<T, E>;

/// A single RPL-level error condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorKind {
    /// The parser could not make sense of the input at the current position.
    SyntaxError,
    /// An argument had the wrong object type for this operation.
    BadArgumentType,
    /// An argument had the right type but an unacceptable value.
    BadArgumentValue,
    /// The stack did not hold enough arguments for this operation.
    TooFewArguments,
    /// A name was not a valid identifier.
    InvalidName,
    /// A symbol had no binding in any directory on the search path.
    UndefinedName,
    /// Division, `mod`, or `rem` by an exact zero.
    DivideByZero,
    /// The argument lies outside the function's domain (e.g. `asin(2)`).
    ArgumentOutsideDomain,
    /// A decimal result exceeded the configured exponent range.
    NumericalOverflow,
    /// A decimal result underflowed towards zero on the positive side.
    PositiveNumericalUnderflow,
    /// A decimal result underflowed towards zero on the negative side.
    NegativeNumericalUnderflow,
    /// A computation lost more significant digits than policy allows.
    NumericalPrecisionLost,
    /// No operator/command handles this combination of operand kinds.
    UndefinedOperation,
    /// Array/matrix operands had incompatible shapes.
    InvalidDimension,
    /// A unit operation combined incompatible dimensions.
    InconsistentUnits,
    /// The text after `_` did not parse as a unit expression.
    InvalidUnitExpression,
    /// A variable name was expected where some other object was found.
    ExpectedVariableName,
    /// A quoted, bracketed, or delimited construct ran off the end of input.
    Unterminated,
    /// The solver exhausted its search without bracketing a root.
    NoSolution,
    /// `Isolate` found no applicable inverse for the outermost operator.
    UnableToIsolate,
    /// The solver could not isolate every requested variable.
    UnableToSolveForAllVariables,
    /// `∂` has no rule for this expression shape.
    UnknownDerivative,
    /// `∫` has no rule for this expression shape.
    UnknownPrimitive,
    /// A container index fell outside `1..=size`.
    IndexOutOfRange,
    /// A user function or N-ary operator was called with the wrong arity.
    WrongArgumentCount,
    /// `Purge`/`PgAll` targeted a directory on the active path.
    CannotPurgeActiveDirectory,
    /// A constant-table lookup found no matching name.
    InvalidOrUnknownConstant,
    /// An equation/xlib-table lookup found no matching name.
    InvalidOrUnknownLibraryEntry,
    /// Input failed a validity check not covered by a more specific kind.
    InvalidInput,
    /// Allocation failed even after a collection and a stack-truncation
    /// retry (spec.md §4.1).
    OutOfMemory,
    /// The UI observed a cancel request at a safepoint (spec.md §5).
    Interrupted,
}

impl ErrorKind {
    /// The normative message text shown to the user and matched by `errm`.
    pub const fn message(self) -> &'static str {
        match self {
            ErrorKind::SyntaxError => "Syntax error",
            ErrorKind::BadArgumentType => "Bad argument type",
            ErrorKind::BadArgumentValue => "Bad argument value",
            ErrorKind::TooFewArguments => "Too few arguments",
            ErrorKind::InvalidName => "Invalid name",
            ErrorKind::UndefinedName => "Undefined name",
            ErrorKind::DivideByZero => "Divide by zero",
            ErrorKind::ArgumentOutsideDomain => "Argument outside domain",
            ErrorKind::NumericalOverflow => "Numerical overflow",
            ErrorKind::PositiveNumericalUnderflow => "Positive numerical underflow",
            ErrorKind::NegativeNumericalUnderflow => "Negative numerical underflow",
            ErrorKind::NumericalPrecisionLost => "Numerical precision lost",
            ErrorKind::UndefinedOperation => "Undefined operation",
            ErrorKind::InvalidDimension => "Invalid dimension",
            ErrorKind::InconsistentUnits => "Inconsistent units",
            ErrorKind::InvalidUnitExpression => "Invalid unit expression",
            ErrorKind::ExpectedVariableName => "Expected variable name",
            ErrorKind::Unterminated => "Unterminated",
            ErrorKind::NoSolution => "No solution?",
            ErrorKind::UnableToIsolate => "Unable to isolate",
            ErrorKind::UnableToSolveForAllVariables => "Unable to solve for all variables",
            ErrorKind::UnknownDerivative => "Unknown derivative",
            ErrorKind::UnknownPrimitive => "Unknown primitive",
            ErrorKind::IndexOutOfRange => "Index out of range",
            ErrorKind::WrongArgumentCount => "Wrong argument count",
            ErrorKind::CannotPurgeActiveDirectory => "Cannot purge active directory",
            ErrorKind::InvalidOrUnknownConstant => "Invalid or unknown constant",
            ErrorKind::InvalidOrUnknownLibraryEntry => "Invalid or unknown library entry",
            ErrorKind::InvalidInput => "Invalid input",
            ErrorKind::OutOfMemory => "Out of memory",
            ErrorKind::Interrupted => "Interrupted",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ErrorKind {}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_kind_has_a_distinct_message() {
        let mut seen = Vec::new();
        for kind in ErrorKind::iter() {
            let msg = kind.message();
            assert!(!seen.contains(&msg), "duplicate message: {msg}");
            seen.push(msg);
        }
    }
}
