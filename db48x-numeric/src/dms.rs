//! Base-60 structured numbers: DMS (degrees/minutes/seconds) and HMS
//! (hours/minutes/seconds) share one representation (spec.md §4.3.9).
//!
//! Internally a value is kept as a single exact [`Fraction`] of whole
//! units (degrees or hours) — the Open Question decision recorded for
//! this module keeps the fraction exact regardless of display setting and
//! only truncates at render time, so `+`/`-`/`×`/`÷` never lose precision
//! even when the minutes/seconds carry does not divide evenly.

use crate::fraction::Fraction;
use crate::integer::Integer;
use db48x_object::ErrorKind;

/// A base-60 structured value: an exact number of whole units (degrees or
/// hours) plus sign, decomposable into integer minutes/seconds with an
/// exact fractional remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sexagesimal {
    total_units: Fraction,
}

/// The decomposed digit-by-digit view of a [`Sexagesimal`] value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposed {
    /// `-1` or `1`.
    pub sign: i32,
    /// Whole degrees/hours.
    pub units: Integer,
    /// Whole minutes, `0..60`.
    pub minutes: u8,
    /// Seconds, including an exact fractional remainder, `0..60`.
    pub seconds: Fraction,
}

impl Sexagesimal {
    /// Build from whole units, minutes, and an exact seconds value,
    /// carrying minutes/seconds overflow into the next place up.
    pub fn from_dms(sign: i32, units: Integer, minutes: u8, seconds: Fraction) -> Self {
        let sixty = Fraction::from_integer(Integer::from_i64(60));
        let total = Fraction::from_integer(units)
            .add(&Fraction::checked_new(Integer::from_i64(i64::from(minutes)), Integer::from_i64(1)).unwrap().div(&sixty).unwrap())
            .add(&seconds.div(&sixty).unwrap().div(&sixty).unwrap());
        let signed = if sign < 0 { total.neg() } else { total };
        Sexagesimal { total_units: signed }
    }

    /// Build directly from an exact total (already expressed in whole
    /// units).
    pub fn from_fraction(total_units: Fraction) -> Self {
        Sexagesimal { total_units }
    }

    /// The exact value expressed as a single fraction of whole units.
    pub fn total(&self) -> &Fraction {
        &self.total_units
    }

    /// Decompose into sign, whole units, whole minutes, and an exact
    /// seconds remainder — the digit-by-digit view used for rendering.
    pub fn decompose(&self) -> Decomposed {
        let sign = if self.total_units.numerator().signum() < 0 { -1 } else { 1 };
        let magnitude = if sign < 0 { self.total_units.neg() } else { self.total_units.clone() };
        let whole_units = magnitude.to_integer_floor();
        let remainder_units = magnitude.sub(&Fraction::from_integer(whole_units.clone()));
        let total_minutes = remainder_units.mul(&Fraction::from_integer(Integer::from_i64(60)));
        let whole_minutes = total_minutes.to_integer_floor();
        let remainder_minutes = total_minutes.sub(&Fraction::from_integer(whole_minutes.clone()));
        let seconds = remainder_minutes.mul(&Fraction::from_integer(Integer::from_i64(60)));
        Decomposed {
            sign,
            units: whole_units,
            minutes: whole_minutes.to_i64().unwrap_or(0) as u8,
            seconds,
        }
    }

    /// `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        Sexagesimal {
            total_units: self.total_units.add(&other.total_units),
        }
    }

    /// `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        Sexagesimal {
            total_units: self.total_units.sub(&other.total_units),
        }
    }

    /// `self * scalar`.
    pub fn mul(&self, scalar: &Fraction) -> Self {
        Sexagesimal {
            total_units: self.total_units.mul(scalar),
        }
    }

    /// `self / scalar`.
    pub fn div(&self, scalar: &Fraction) -> Result<Self, ErrorKind> {
        Ok(Sexagesimal {
            total_units: self.total_units.div(scalar)?,
        })
    }
}

impl Fraction {
    fn to_integer_floor(&self) -> Integer {
        let num = self.numerator();
        let den = self.denominator();
        let (q, r) = num_integer::Integer::div_mod_floor(num.as_bigint(), den.as_bigint());
        let _ = r;
        Integer::from_bigint(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carries_seconds_into_minutes_and_degrees() {
        let d = Sexagesimal::from_dms(
            1,
            Integer::from_i64(0),
            0,
            Fraction::checked_new(Integer::from_i64(7261 * 60), Integer::from_i64(1)).unwrap(),
        );
        // 7261 minutes == 121 degrees, 1 minute, 0 seconds.
        let decomposed = d.decompose();
        assert_eq!(decomposed.units, Integer::from_i64(121));
        assert_eq!(decomposed.minutes, 1);
    }

    #[test]
    fn addition_preserves_exactness() {
        let a = Sexagesimal::from_dms(1, Integer::from_i64(10), 30, Fraction::from_integer(Integer::from_i64(0)));
        let b = Sexagesimal::from_dms(1, Integer::from_i64(0), 45, Fraction::from_integer(Integer::from_i64(0)));
        let sum = a.add(&b);
        let decomposed = sum.decompose();
        assert_eq!(decomposed.units, Integer::from_i64(11));
        assert_eq!(decomposed.minutes, 15);
    }

    #[test]
    fn division_by_zero_scalar_is_an_error() {
        let a = Sexagesimal::from_dms(1, Integer::from_i64(1), 0, Fraction::from_integer(Integer::from_i64(0)));
        let zero = Fraction::from_integer(Integer::from_i64(0));
        assert_eq!(a.div(&zero), Err(ErrorKind::DivideByZero));
    }
}
