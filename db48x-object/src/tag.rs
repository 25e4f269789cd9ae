//! `ObjectTag`: the closed set of object variants every arena object begins
//! with (spec.md §3.1).
//!
//! The tag says nothing about payload bytes — those are interpreted by
//! whichever crate owns the family (numbers in `db48x-numeric`, aggregates
//! in `db48x-container`, commands by table lookup right here). Keeping the
//! tag fieldless except for `Command` and `SettingsArtifact` means the ~200
//! nominal object kinds of the original system collapse to one closed
//! dispatch key per family plus a `CommandId` sub-table for the built-ins,
//! rather than one enum variant per individual command.

use crate::command::CommandId;
use db48x_derive::Canonical;

/// The family and variant an arena object's leading byte(s) identify.
///
/// Declaration order is the LEB128 discriminant order that
/// `#[derive(Canonical)]` encodes; once an RPL-facing archive format exists
/// this order is load-bearing and variants may only be appended, never
/// reordered or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Canonical)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectTag {
    // --- Exact numbers (spec.md §4.3.1, §4.3.2) ---
    /// Positive exact integer, fits a machine word.
    Integer,
    /// Negative exact integer, fits a machine word.
    NegInteger,
    /// Positive exact integer wider than a machine word.
    Bignum,
    /// Negative exact integer wider than a machine word.
    NegBignum,
    /// Positive fraction in lowest terms, word-sized numerator/denominator.
    Fraction,
    /// Negative fraction in lowest terms, word-sized numerator/denominator.
    NegFraction,
    /// Positive fraction with bignum numerator and/or denominator.
    BigFraction,
    /// Negative fraction with bignum numerator and/or denominator.
    NegBigFraction,
    /// Integer tagged with an explicit radix (`16#FF`, `#101b`, …).
    BasedInteger,

    // --- Inexact numbers (spec.md §4.3.3, §4.3.5) ---
    /// Positive arbitrary-precision decimal.
    Decimal,
    /// Negative arbitrary-precision decimal.
    NegDecimal,
    /// IEEE-754 single precision float, used under `HardFP`.
    HwFloat,
    /// IEEE-754 double precision float, used under `HardFP`.
    HwDouble,

    // --- Complex (spec.md §4.3.6) ---
    /// `re + im·ⅈ`.
    Rectangular,
    /// `r∡θ`, angle carries its own unit.
    Polar,

    // --- Ranges (spec.md §4.3.7) ---
    /// `a…b`.
    Range,
    /// `a±d`.
    DRange,
    /// `a±p%`.
    PRange,
    /// `a±σ`.
    Uncertain,

    // --- Units (spec.md §4.3.8) ---
    /// Numeric value plus a symbolic unit expression.
    Unit,

    // --- Time / date (spec.md §4.3.9) ---
    /// Base-60 angle (degrees/minutes/seconds).
    Hms,
    /// Base-60 duration (hours/minutes/seconds).
    Dms,
    /// Calendar date, optionally carrying a fractional time of day.
    Date,

    // --- Symbolic (spec.md §4.7) ---
    /// A bare name.
    Symbol,
    /// An algebraic expression tree, flattened RPN.
    Expression,
    /// Packed monomial form.
    Polynomial,
    /// A local variable reference bound in the enclosing lexical frame.
    Local,

    // --- Aggregate ---
    /// UTF-8 text.
    Text,
    /// `{ … }`.
    List,
    /// `[ … ]`, 1-D vector or 2-D matrix depending on dimension metadata.
    Array,
    /// `« … »`.
    Program,
    /// `:label:obj`.
    Tag,
    /// `name=expr`.
    Assignment,

    // --- Raster ---
    /// 1 bit per pixel.
    Grob,
    /// Alpha-channel raster.
    Bitmap,
    /// RGB raster.
    Pixmap,

    /// A built-in operator or function. Carries no payload of its own; the
    /// `CommandId` names which one.
    Command(CommandId),

    /// A settings snapshot or a `Modes`-produced artifact: a label plus an
    /// inner object.
    SettingsArtifact,
}

#[cfg(test)]
mod tests {
    use super::*;
    use db48x_types::canonical::Canonical;

    #[test]
    fn fieldless_variant_round_trips() {
        let tag = ObjectTag::Fraction;
        let mut buf = Vec::new();
        tag.encode(&mut buf);
        assert_eq!(buf.len(), tag.encoded_size());
        let (decoded, consumed) = ObjectTag::decode(&buf).unwrap();
        assert_eq!(decoded, tag);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn command_variant_round_trips() {
        let tag = ObjectTag::Command(CommandId::Add);
        let mut buf = Vec::new();
        tag.encode(&mut buf);
        let (decoded, consumed) = ObjectTag::decode(&buf).unwrap();
        assert_eq!(decoded, tag);
        assert_eq!(consumed, buf.len());
    }

    #[test]
    fn unknown_discriminant_is_an_error() {
        let buf = vec![0xffu8, 0x01];
        assert!(ObjectTag::decode(&buf).is_err());
    }
}
