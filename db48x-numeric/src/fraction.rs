//! Exact fractions in lowest terms (spec.md §4.3.2).

use crate::integer::Integer;
use alloc::string::ToString;
use db48x_object::ErrorKind;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

/// An exact rational number, always reduced to lowest terms with a
/// positive denominator — `BigRational::new` does both normalizations for
/// us, so this type is a thin wrapper rather than a reimplementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fraction(BigRational);

impl Fraction {
    /// Construct a fraction from a numerator and denominator, reducing to
    /// lowest terms and normalizing the sign onto the numerator.
    ///
    /// # Panics
    /// Panics if `denominator` is zero; callers that cannot statically rule
    /// this out should check first and raise [`ErrorKind::DivideByZero`].
    pub fn new(numerator: BigInt, denominator: BigInt) -> Self {
        Fraction(BigRational::new(numerator, denominator))
    }

    /// Build an exact fraction, checking for a zero denominator.
    pub fn checked_new(numerator: Integer, denominator: Integer) -> Result<Self, ErrorKind> {
        if denominator.is_zero() {
            return Err(ErrorKind::DivideByZero);
        }
        Ok(Fraction::new(numerator.as_bigint().clone(), denominator.as_bigint().clone()))
    }

    /// An exact fraction equal to a whole integer.
    pub fn from_integer(value: Integer) -> Self {
        Fraction(BigRational::from_integer(value.as_bigint().clone()))
    }

    /// The reduced numerator (carries the sign).
    pub fn numerator(&self) -> Integer {
        Integer::from_bigint(self.0.numer().clone())
    }

    /// The reduced denominator (always positive).
    pub fn denominator(&self) -> Integer {
        Integer::from_bigint(self.0.denom().clone())
    }

    /// `true` when this fraction is exactly zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        Fraction(&self.0 + &other.0)
    }

    /// `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        Fraction(&self.0 - &other.0)
    }

    /// `self * other`.
    pub fn mul(&self, other: &Self) -> Self {
        Fraction(&self.0 * &other.0)
    }

    /// `self / other`.
    pub fn div(&self, other: &Self) -> Result<Self, ErrorKind> {
        if other.is_zero() {
            return Err(ErrorKind::DivideByZero);
        }
        Ok(Fraction(&self.0 / &other.0))
    }

    /// `-self`.
    pub fn neg(&self) -> Self {
        Fraction(-&self.0)
    }

    /// Lossy narrowing to `f64`, used only when coercing to an inexact
    /// representation (spec.md §4.3.2's exact/inexact coercion rule).
    pub fn to_f64(&self) -> f64 {
        let (n, d) = (self.0.numer(), self.0.denom());
        n.to_string().parse::<f64>().unwrap_or(f64::NAN)
            / d.to_string().parse::<f64>().unwrap_or(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_to_lowest_terms() {
        let f = Fraction::new(BigInt::from(6), BigInt::from(4));
        assert_eq!(f.numerator(), Integer::from_bigint(BigInt::from(3)));
        assert_eq!(f.denominator(), Integer::from_bigint(BigInt::from(2)));
    }

    #[test]
    fn sign_normalizes_onto_the_numerator() {
        let f = Fraction::new(BigInt::from(3), BigInt::from(-4));
        assert_eq!(f.numerator(), Integer::from_bigint(BigInt::from(-3)));
        assert_eq!(f.denominator(), Integer::from_bigint(BigInt::from(4)));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let a = Fraction::new(BigInt::from(1), BigInt::from(2));
        let z = Fraction::new(BigInt::from(0), BigInt::from(1));
        assert_eq!(a.div(&z), Err(ErrorKind::DivideByZero));
    }
}
