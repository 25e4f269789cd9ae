//! Exact integers and bignums (spec.md §4.3.1).
//!
//! Backed by [`num_bigint::BigInt`], which is itself sign-magnitude
//! internally, so this module is a thin policy layer over it: the division,
//! `mod`/`rem`, gcd, and power rules spec.md normative-izes rather than a
//! hand-rolled digit representation.

use crate::fraction::Fraction;
use alloc::string::{
    String,
    ToString,
};
use db48x_object::ErrorKind;
use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{
    ToPrimitive,
    Zero,
};

/// An arbitrary-precision signed integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(BigInt);

impl Integer {
    /// The integer zero.
    pub fn zero() -> Self {
        Integer(BigInt::zero())
    }

    /// Build an integer from a primitive `i64`.
    pub fn from_i64(value: i64) -> Self {
        Integer(BigInt::from(value))
    }

    /// `true` if this integer is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// The sign: `-1`, `0`, or `1`.
    pub fn signum(&self) -> i32 {
        self.0.sign() as i32
    }

    /// Render in base 10, the canonical textual form.
    pub fn to_decimal_string(&self) -> String {
        self.0.to_string()
    }

    /// Narrow to `i64` when the value fits, for indices and small loop
    /// counters that do not need arbitrary precision.
    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    /// Parse a base-10 integer literal of arbitrary magnitude, for the
    /// parser's numeric-literal grammar (spec.md §4.2).
    pub fn parse_decimal(digits: &str) -> Result<Self, ErrorKind> {
        digits.parse::<BigInt>().map(Integer).map_err(|_| ErrorKind::SyntaxError)
    }

    pub(crate) fn from_bigint(value: BigInt) -> Self {
        Integer(value)
    }

    pub(crate) fn as_bigint(&self) -> &BigInt {
        &self.0
    }

    /// `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        Integer(&self.0 + &other.0)
    }

    /// `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        Integer(&self.0 - &other.0)
    }

    /// `self * other`.
    pub fn mul(&self, other: &Self) -> Self {
        Integer(&self.0 * &other.0)
    }

    /// `-self`.
    pub fn neg(&self) -> Self {
        Integer(-&self.0)
    }

    /// Division policy (spec.md §4.3.1): exact quotient stays an
    /// [`Integer`], otherwise the result is returned as a fully reduced
    /// [`Fraction`] rather than losing precision by truncating.
    pub fn div(&self, other: &Self) -> Result<IntegerOrFraction, ErrorKind> {
        if other.is_zero() {
            return Err(ErrorKind::DivideByZero);
        }
        if (&self.0 % &other.0).is_zero() {
            Ok(IntegerOrFraction::Integer(Integer(&self.0 / &other.0)))
        } else {
            Ok(IntegerOrFraction::Fraction(Fraction::new(self.0.clone(), other.0.clone())))
        }
    }

    /// `mod`: result takes the sign of the divisor.
    pub fn modulo(&self, other: &Self) -> Result<Self, ErrorKind> {
        if other.is_zero() {
            return Err(ErrorKind::DivideByZero);
        }
        let r = &self.0 % &other.0;
        let r = if !r.is_zero() && (r.sign() != other.0.sign()) {
            r + &other.0
        } else {
            r
        };
        Ok(Integer(r))
    }

    /// `rem`: result takes the sign of the dividend (Rust/Euclid truncating
    /// remainder, which `BigInt`'s `%` already implements).
    pub fn rem(&self, other: &Self) -> Result<Self, ErrorKind> {
        if other.is_zero() {
            return Err(ErrorKind::DivideByZero);
        }
        Ok(Integer(&self.0 % &other.0))
    }

    /// Greatest common divisor, always non-negative.
    pub fn gcd(&self, other: &Self) -> Self {
        Integer(self.0.gcd(&other.0))
    }

    /// Least common multiple, always non-negative.
    pub fn lcm(&self, other: &Self) -> Self {
        Integer(self.0.lcm(&other.0))
    }

    /// `self ^ exponent` for a non-negative exponent.
    pub fn pow(&self, exponent: u32) -> Self {
        Integer(self.0.pow(exponent))
    }

    /// Integer `n`-th root by Newton iteration on the magnitude, restoring
    /// sign for odd roots of a negative value. Returns `ArgumentOutsideDomain`
    /// for an even root of a negative value.
    pub fn xroot(&self, n: u32) -> Result<Self, ErrorKind> {
        if n == 0 {
            return Err(ErrorKind::BadArgumentValue);
        }
        if self.0.sign() == num_bigint::Sign::Minus && n % 2 == 0 {
            return Err(ErrorKind::ArgumentOutsideDomain);
        }
        let negative = self.0.sign() == num_bigint::Sign::Minus;
        let magnitude = if negative { -&self.0 } else { self.0.clone() };
        let root = integer_nth_root(&magnitude, n);
        Ok(Integer(if negative { -root } else { root }))
    }
}

/// Either the exact integer quotient, or a reduced fraction when the
/// division was not exact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegerOrFraction {
    /// The division was exact.
    Integer(Integer),
    /// The division was not exact; the reduced fraction carries the result.
    Fraction(Fraction),
}

/// Newton's method for the integer part of `value.nth_root(n)`, `value >= 0`.
fn integer_nth_root(value: &BigInt, n: u32) -> BigInt {
    if value.is_zero() {
        return BigInt::zero();
    }
    let n_big = BigInt::from(n);
    let shift = (value.bits() / u64::from(n) + 1) as usize;
    let mut guess = BigInt::from(1u32) << shift;
    loop {
        let delta = &guess * (&n_big - 1u32);
        let next = (&delta + value / guess.pow(n - 1)) / &n_big;
        if next >= guess {
            break;
        }
        guess = next;
    }
    while &guess.pow(n) > value {
        guess -= 1;
    }
    guess
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_division_returns_an_integer() {
        let a = Integer::from_i64(12);
        let b = Integer::from_i64(4);
        assert_eq!(a.div(&b).unwrap(), IntegerOrFraction::Integer(Integer::from_i64(3)));
    }

    #[test]
    fn inexact_division_returns_a_reduced_fraction() {
        let a = Integer::from_i64(6);
        let b = Integer::from_i64(4);
        match a.div(&b).unwrap() {
            IntegerOrFraction::Fraction(f) => {
                assert_eq!(f.numerator(), Integer::from_i64(3));
                assert_eq!(f.denominator(), Integer::from_i64(2));
            }
            other => panic!("expected a fraction, got {other:?}"),
        }
    }

    #[test]
    fn division_by_zero_raises_divide_by_zero() {
        let a = Integer::from_i64(1);
        let z = Integer::zero();
        assert_eq!(a.div(&z), Err(ErrorKind::DivideByZero));
    }

    #[test]
    fn modulo_takes_the_sign_of_the_divisor() {
        let a = Integer::from_i64(-7);
        let b = Integer::from_i64(3);
        assert_eq!(a.modulo(&b).unwrap(), Integer::from_i64(2));

        let a = Integer::from_i64(7);
        let b = Integer::from_i64(-3);
        assert_eq!(a.modulo(&b).unwrap(), Integer::from_i64(-2));
    }

    #[test]
    fn rem_takes_the_sign_of_the_dividend() {
        let a = Integer::from_i64(-7);
        let b = Integer::from_i64(3);
        assert_eq!(a.rem(&b).unwrap(), Integer::from_i64(-1));
    }

    #[test]
    fn gcd_and_lcm_are_non_negative() {
        let a = Integer::from_i64(-12);
        let b = Integer::from_i64(18);
        assert_eq!(a.gcd(&b), Integer::from_i64(6));
        assert_eq!(a.lcm(&b), Integer::from_i64(36));
    }

    #[test]
    fn xroot_of_a_perfect_cube() {
        let a = Integer::from_i64(-27);
        assert_eq!(a.xroot(3).unwrap(), Integer::from_i64(-3));
    }

    #[test]
    fn even_root_of_negative_is_outside_domain() {
        let a = Integer::from_i64(-4);
        assert_eq!(a.xroot(2), Err(ErrorKind::ArgumentOutsideDomain));
    }
}
