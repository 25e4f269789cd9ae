//! Numeric kernels for the DB48X RPL runtime (spec.md §4.3).
//!
//! Each module is an independent representation — exact integers, exact
//! fractions, arbitrary-precision decimals, hardware floats, complex pairs,
//! intervals, units, base-60 angles/times, calendar dates, and a seeded
//! PRNG — behind the shared [`db48x_object::ErrorKind`] taxonomy rather than
//! a crate-local error type, so a `DivideByZero` raised while reducing a
//! fraction and one raised while evaluating a program look identical to
//! everything above this crate.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

mod complex;
mod date;
mod decimal;
mod dms;
mod fraction;
mod hwfloat;
mod integer;
mod overflow;
mod range;
#[cfg(feature = "random")]
mod random;
mod unit;

pub use complex::{
    Angle,
    AngleUnit,
    Complex,
};
pub use date::{
    Date,
    DateTime,
};
pub use decimal::Decimal;
pub use dms::{
    Decomposed,
    Sexagesimal,
};
pub use fraction::Fraction;
pub use hwfloat::HwFloat;
pub use integer::{
    Integer,
    IntegerOrFraction,
};
pub use overflow::{
    check_division_by_zero,
    check_exponent,
    ExponentOutcome,
    Magnitude,
};
pub use range::{
    Range,
    RangeKind,
    Uncertain,
};
#[cfg(feature = "random")]
pub use random::Prng;
pub use unit::{
    Dimension,
    Unit,
};
