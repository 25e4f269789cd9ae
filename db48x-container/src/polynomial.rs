//! Polynomials (spec.md §4.4, §6.3): a packed sparse monomial list, sorted
//! by descending exponent with zero coefficients never stored, so add and
//! multiply only ever touch terms that actually exist.

use alloc::vec::Vec;
use core::ops::{
    Add,
    Mul,
    Neg,
    Sub,
};
use db48x_object::ErrorKind;

/// A single `coefficient * x^exponent` term.
pub type Monomial<T> = (u32, T);

/// A univariate polynomial over `T`, stored as a sparse, descending-exponent
/// monomial list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial<T> {
    terms: Vec<Monomial<T>>,
}

impl<T> Polynomial<T> {
    /// The zero polynomial.
    pub fn zero() -> Self {
        Polynomial { terms: Vec::new() }
    }

    /// Build from a list of `(exponent, coefficient)` pairs, dropping any
    /// coefficient equal to `zero` and merging duplicate exponents by
    /// summing, then sorting descending by exponent.
    pub fn from_terms(mut terms: Vec<Monomial<T>>, zero: &T) -> Self
    where
        T: Clone + PartialEq + Add<Output = T>,
    {
        terms.sort_by(|a, b| b.0.cmp(&a.0));
        let mut packed: Vec<Monomial<T>> = Vec::with_capacity(terms.len());
        for (exp, coeff) in terms {
            if let Some(last) = packed.last_mut() {
                if last.0 == exp {
                    last.1 = last.1.clone() + coeff;
                    continue;
                }
            }
            packed.push((exp, coeff));
        }
        packed.retain(|(_, c)| c != zero);
        Polynomial { terms: packed }
    }

    /// The monomials, highest exponent first.
    pub fn terms(&self) -> &[Monomial<T>] {
        &self.terms
    }

    /// The polynomial's degree, `None` for the zero polynomial.
    pub fn degree(&self) -> Option<u32> {
        self.terms.first().map(|(exp, _)| *exp)
    }

    /// `true` when this is the zero polynomial.
    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Evaluate at `x` via Horner's method over the packed sparse terms.
    pub fn evaluate(&self, x: &T, zero: &T) -> T
    where
        T: Clone + Add<Output = T> + Mul<Output = T>,
    {
        let Some(&(degree, _)) = self.terms.first() else {
            return zero.clone();
        };
        let mut result = zero.clone();
        let mut next_index = 0usize;
        let mut exponent = degree as i64;
        while exponent >= 0 {
            result = result * x.clone();
            if next_index < self.terms.len() && self.terms[next_index].0 as i64 == exponent {
                result = result + self.terms[next_index].1.clone();
                next_index += 1;
            }
            exponent -= 1;
        }
        result
    }

    /// Add two polynomials.
    pub fn add(&self, other: &Polynomial<T>, zero: &T) -> Polynomial<T>
    where
        T: Clone + PartialEq + Add<Output = T>,
    {
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().cloned());
        Polynomial::from_terms(terms, zero)
    }

    /// Subtract `other` from `self`.
    pub fn sub(&self, other: &Polynomial<T>, zero: &T) -> Polynomial<T>
    where
        T: Clone + PartialEq + Add<Output = T> + Neg<Output = T>,
    {
        let mut terms = self.terms.clone();
        terms.extend(other.terms.iter().map(|(exp, c)| (*exp, -c.clone())));
        Polynomial::from_terms(terms, zero)
    }

    /// Multiply two polynomials by full cross-distribution of terms.
    pub fn mul(&self, other: &Polynomial<T>, zero: &T) -> Polynomial<T>
    where
        T: Clone + PartialEq + Add<Output = T> + Mul<Output = T>,
    {
        let mut terms = Vec::with_capacity(self.terms.len() * other.terms.len());
        for (exp_a, coeff_a) in &self.terms {
            for (exp_b, coeff_b) in &other.terms {
                terms.push((exp_a + exp_b, coeff_a.clone() * coeff_b.clone()));
            }
        }
        Polynomial::from_terms(terms, zero)
    }

    /// Polynomial long division, returning `(quotient, remainder)`.
    ///
    /// `inv` must return the multiplicative inverse of a nonzero
    /// coefficient; division fails with [`ErrorKind::DivideByZero`] when
    /// `divisor` is the zero polynomial.
    pub fn div_rem(
        &self,
        divisor: &Polynomial<T>,
        zero: &T,
        inv: impl Fn(&T) -> T,
    ) -> Result<(Polynomial<T>, Polynomial<T>), ErrorKind>
    where
        T: Clone + PartialEq + Add<Output = T> + Sub<Output = T> + Mul<Output = T> + Neg<Output = T>,
    {
        let Some(&(divisor_degree, ref divisor_lead)) = divisor.terms.first() else {
            return Err(ErrorKind::DivideByZero);
        };
        let lead_inv = inv(divisor_lead);
        let mut remainder = self.clone();
        let mut quotient_terms: Vec<Monomial<T>> = Vec::new();

        while let Some(&(rem_degree, ref rem_lead)) = remainder.terms.first() {
            if rem_degree < divisor_degree {
                break;
            }
            let factor = rem_lead.clone() * lead_inv.clone();
            let shift = rem_degree - divisor_degree;
            quotient_terms.push((shift, factor.clone()));

            let subtrahend: Vec<Monomial<T>> = divisor
                .terms
                .iter()
                .map(|(exp, coeff)| (exp + shift, coeff.clone() * factor.clone()))
                .collect();
            let subtrahend = Polynomial::from_terms(subtrahend, zero);
            remainder = remainder.sub(&subtrahend, zero);
        }

        Ok((Polynomial::from_terms(quotient_terms, zero), remainder))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn inv(c: &i64) -> i64 {
        // Only exercised with coefficients of ±1 in these tests.
        *c
    }

    #[test]
    fn from_terms_merges_duplicate_exponents_and_drops_zero_coefficients() {
        let p = Polynomial::from_terms(vec![(2, 3), (2, -3), (1, 5), (0, 0)], &0);
        assert_eq!(p.terms(), &[(1, 5)]);
    }

    #[test]
    fn evaluate_uses_horners_method() {
        // x^2 + 2x + 1 at x = 3 -> 16
        let p = Polynomial::from_terms(vec![(2, 1), (1, 2), (0, 1)], &0);
        assert_eq!(p.evaluate(&3, &0), 16);
    }

    #[test]
    fn add_and_sub_are_inverse() {
        let a = Polynomial::from_terms(vec![(2, 1), (0, 3)], &0);
        let b = Polynomial::from_terms(vec![(1, 2)], &0);
        let sum = a.add(&b, &0);
        let back = sum.sub(&b, &0);
        assert_eq!(back, a);
    }

    #[test]
    fn div_rem_divides_a_difference_of_squares_exactly() {
        // (x^2 - 1) / (x - 1) = x + 1, remainder 0
        let dividend = Polynomial::from_terms(vec![(2, 1), (0, -1)], &0);
        let divisor = Polynomial::from_terms(vec![(1, 1), (0, -1)], &0);
        let (quotient, remainder) = dividend.div_rem(&divisor, &0, inv).unwrap();
        assert_eq!(quotient, Polynomial::from_terms(vec![(1, 1), (0, 1)], &0));
        assert!(remainder.is_zero());
    }

    #[test]
    fn div_rem_by_the_zero_polynomial_is_divide_by_zero() {
        let dividend = Polynomial::from_terms(vec![(1, 1)], &0);
        let zero_poly: Polynomial<i64> = Polynomial::zero();
        assert_eq!(dividend.div_rem(&zero_poly, &0, inv), Err(ErrorKind::DivideByZero));
    }
}
