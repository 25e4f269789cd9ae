//! Arbitrary-precision decimals (spec.md §4.3.3).
//!
//! A decimal is `mantissa * 10^exponent` with an exact `BigInt` mantissa —
//! no binary floating-point is involved anywhere in this module, so the
//! only rounding that ever happens is the explicit round-half-even this
//! module performs itself at a caller-chosen working precision.

use crate::fraction::Fraction;
use alloc::string::ToString;
use db48x_object::ErrorKind;
use num_bigint::BigInt;
use num_integer::Integer as _;
use num_rational::BigRational;
use num_traits::{
    One,
    Signed,
    Zero,
};

/// An arbitrary-precision decimal number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decimal {
    mantissa: BigInt,
    exponent: i64,
}

impl Decimal {
    /// The decimal zero.
    pub fn zero() -> Self {
        Decimal {
            mantissa: BigInt::zero(),
            exponent: 0,
        }
    }

    /// Build a decimal directly from its mantissa and exponent.
    pub fn from_parts(mantissa: BigInt, exponent: i64) -> Self {
        Decimal { mantissa, exponent }
    }

    /// Build an exact decimal from an `i64`.
    pub fn from_i64(value: i64) -> Self {
        Decimal {
            mantissa: BigInt::from(value),
            exponent: 0,
        }
    }

    /// `true` when this decimal is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    /// The sign: `-1`, `0`, or `1`.
    pub fn signum(&self) -> i32 {
        self.mantissa.sign() as i32
    }

    fn as_rational(&self) -> BigRational {
        let ten = BigInt::from(10);
        if self.exponent >= 0 {
            BigRational::from_integer(&self.mantissa * ten.pow(self.exponent as u32))
        } else {
            BigRational::new(self.mantissa.clone(), ten.pow((-self.exponent) as u32))
        }
    }

    /// Round this value to `precision` significant digits, half-even at the
    /// boundary (spec.md §4.3.3).
    pub fn round(&self, precision: u32) -> Self {
        if self.is_zero() || precision == 0 {
            return self.clone();
        }
        let digits = self.mantissa.magnitude_digit_count();
        if digits <= precision as usize {
            return self.clone();
        }
        let drop = (digits - precision as usize) as u32;
        let scale = BigInt::from(10).pow(drop);
        let half = &scale / BigInt::from(2);
        let negative = self.mantissa.is_negative();
        let magnitude = if negative { -&self.mantissa } else { self.mantissa.clone() };
        let (mut quotient, remainder) = magnitude.div_mod_floor(&scale);
        let tie = &remainder * 2u32;
        if tie > scale || (tie == scale && quotient.is_odd()) {
            quotient += 1;
        }
        let mantissa = if negative { -quotient } else { quotient };
        Decimal {
            mantissa,
            exponent: self.exponent + drop as i64,
        }
    }

    /// `self + other`, rounded to `precision` significant digits.
    pub fn add(&self, other: &Self, precision: u32) -> Self {
        let (a, b) = align(self, other);
        Decimal {
            mantissa: a.mantissa + b.mantissa,
            exponent: a.exponent,
        }
        .round(precision)
    }

    /// `self - other`, rounded to `precision` significant digits.
    pub fn sub(&self, other: &Self, precision: u32) -> Self {
        self.add(&other.neg(), precision)
    }

    /// `-self`.
    pub fn neg(&self) -> Self {
        Decimal {
            mantissa: -&self.mantissa,
            exponent: self.exponent,
        }
    }

    /// `self * other`, rounded to `precision` significant digits.
    pub fn mul(&self, other: &Self, precision: u32) -> Self {
        Decimal {
            mantissa: &self.mantissa * &other.mantissa,
            exponent: self.exponent + other.exponent,
        }
        .round(precision)
    }

    /// `self / other`, rounded to `precision` significant digits.
    pub fn div(&self, other: &Self, precision: u32) -> Result<Self, ErrorKind> {
        if other.is_zero() {
            return Err(ErrorKind::DivideByZero);
        }
        // Scale the dividend up so the integer division below keeps
        // `precision` extra guard digits before the final rounding pass.
        let guard = precision as i64 + 2;
        let scale = BigInt::from(10).pow((guard + other.mantissa.magnitude_digit_count() as i64) as u32);
        let mantissa = (&self.mantissa * &scale) / &other.mantissa;
        let exponent = self.exponent - other.exponent - guard - other.mantissa.magnitude_digit_count() as i64;
        Ok(Decimal { mantissa, exponent }.round(precision))
    }

    /// `self ^ 0` special case aside, `0^0` resolves to `1` unless the
    /// caller reports the "zero-power-zero undefined" flag is set.
    pub fn zero_pow_zero(undefined_is_error: bool) -> Result<Self, ErrorKind> {
        if undefined_is_error {
            Err(ErrorKind::ArgumentOutsideDomain)
        } else {
            Ok(Decimal::from_i64(1))
        }
    }

    /// Coerce to decimal at the given working precision (`→Num`).
    pub fn to_num(&self, precision: u32) -> Self {
        self.round(precision)
    }

    /// Recover a fraction by continued-fraction truncation at a tolerance
    /// derived from this value's significant digits (`→Q`).
    pub fn to_fraction(&self, significant_digits: u32) -> Fraction {
        let value = self.as_rational();
        let tolerance = BigRational::new(BigInt::one(), BigInt::from(10).pow(significant_digits));
        let simplest = simplest_fraction_within(value, tolerance);
        Fraction::new(simplest.numer().clone(), simplest.denom().clone())
    }

    /// Lossy narrowing used only for display estimation and range-bound
    /// heuristics, never for arithmetic.
    pub fn to_f64_approx(&self) -> f64 {
        let r = self.as_rational();
        r.numer().to_string().parse::<f64>().unwrap_or(f64::NAN)
            / r.denom().to_string().parse::<f64>().unwrap_or(1.0)
    }
}

fn align(a: &Decimal, b: &Decimal) -> (Decimal, Decimal) {
    if a.exponent == b.exponent {
        return (a.clone(), b.clone());
    }
    if a.exponent < b.exponent {
        let scale = BigInt::from(10).pow((b.exponent - a.exponent) as u32);
        (
            a.clone(),
            Decimal {
                mantissa: &b.mantissa * scale,
                exponent: a.exponent,
            },
        )
    } else {
        let scale = BigInt::from(10).pow((a.exponent - b.exponent) as u32);
        (
            Decimal {
                mantissa: &a.mantissa * scale,
                exponent: b.exponent,
            },
            b.clone(),
        )
    }
}

/// The fraction with the smallest denominator lying within `tolerance` of
/// `value`, found by truncating the continued-fraction expansion of
/// `value` as soon as the accumulated convergent satisfies the tolerance.
fn simplest_fraction_within(value: BigRational, tolerance: BigRational) -> BigRational {
    if value.is_zero() {
        return value;
    }
    let negative = value.is_negative();
    let mut remainder = if negative { -value.clone() } else { value.clone() };
    let tol = tolerance.abs();

    let (mut h_prev, mut h_cur) = (BigInt::zero(), BigInt::one());
    let (mut k_prev, mut k_cur) = (BigInt::one(), BigInt::zero());

    for _ in 0..64 {
        let a = remainder.floor().to_integer();
        let h_next = &a * &h_cur + &h_prev;
        let k_next = &a * &k_cur + &k_prev;
        h_prev = h_cur;
        h_cur = h_next;
        k_prev = k_cur;
        k_cur = k_next.clone();

        let convergent = BigRational::new(h_cur.clone(), k_cur.clone());
        if (&convergent - (if negative { -value.clone() } else { value.clone() })).abs() <= tol {
            return if negative { -convergent } else { convergent };
        }

        let fractional = &remainder - BigRational::from_integer(a);
        if fractional.is_zero() {
            break;
        }
        remainder = fractional.recip();
    }

    let exact = BigRational::new(h_cur, k_cur);
    if negative {
        -exact
    } else {
        exact
    }
}

trait MagnitudeDigits {
    fn magnitude_digit_count(&self) -> usize;
}

impl MagnitudeDigits for BigInt {
    fn magnitude_digit_count(&self) -> usize {
        if self.is_zero() {
            1
        } else {
            self.to_string().trim_start_matches('-').len()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_to_even() {
        // 1.25 rounded to 2 significant digits: tie rounds to the even
        // neighbor, 1.2.
        let d = Decimal::from_parts(BigInt::from(125), -2);
        let rounded = d.round(2);
        assert_eq!(rounded, Decimal::from_parts(BigInt::from(12), -1));
    }

    #[test]
    fn addition_aligns_exponents() {
        let a = Decimal::from_parts(BigInt::from(1), 0); // 1
        let b = Decimal::from_parts(BigInt::from(5), -1); // 0.5
        let sum = a.add(&b, 24);
        assert_eq!(sum, Decimal::from_parts(BigInt::from(15), -1));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let a = Decimal::from_i64(1);
        let z = Decimal::zero();
        assert_eq!(a.div(&z, 24), Err(ErrorKind::DivideByZero));
    }

    #[test]
    fn zero_power_zero_is_one_by_default() {
        assert_eq!(Decimal::zero_pow_zero(false).unwrap(), Decimal::from_i64(1));
        assert_eq!(Decimal::zero_pow_zero(true), Err(ErrorKind::ArgumentOutsideDomain));
    }

    #[test]
    fn to_fraction_recovers_a_simple_repeating_decimal() {
        // 0.142857142857... truncated to 12 significant digits should
        // recover 1/7 once the continued fraction hits that tolerance.
        let d = Decimal::from_parts(BigInt::from(142857142857i64), -12);
        let f = d.to_fraction(10);
        assert_eq!(f.numerator(), crate::integer::Integer::from_i64(1));
        assert_eq!(f.denominator(), crate::integer::Integer::from_i64(7));
    }
}
