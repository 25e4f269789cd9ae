//! Hardware floats (spec.md §4.3.5): `float` (`f32`) and `double` (`f64`),
//! selectable via the `HardFP` setting for speed over the decimal kernel.
//! `libm` supplies the transcendental functions so this module works the
//! same with or without `std`.

use db48x_object::ErrorKind;

/// A hardware float or double, obeying the same overflow/underflow policy
/// as the decimal kernel (spec.md §4.3.4) with IEEE infinities coerced to
/// the signed-largest-representable convention at the boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HwFloat {
    /// IEEE single precision.
    Single(f32),
    /// IEEE double precision.
    Double(f64),
}

impl HwFloat {
    /// `self + other`; operands are promoted to the wider of the two.
    pub fn add(self, other: Self) -> Self {
        binary(self, other, |a, b| a + b, |a, b| a + b)
    }

    /// `self - other`.
    pub fn sub(self, other: Self) -> Self {
        binary(self, other, |a, b| a - b, |a, b| a - b)
    }

    /// `self * other`.
    pub fn mul(self, other: Self) -> Self {
        binary(self, other, |a, b| a * b, |a, b| a * b)
    }

    /// `self / other`; a zero divisor raises `Divide by zero` rather than
    /// silently producing an IEEE infinity, matching the decimal kernel's
    /// policy of routing zero-division through the error/infinity tree.
    pub fn div(self, other: Self) -> Result<Self, ErrorKind> {
        if other.is_zero() {
            return Err(ErrorKind::DivideByZero);
        }
        Ok(binary(self, other, |a, b| a / b, |a, b| a / b))
    }

    /// `true` when the value is exactly zero (either signed zero).
    pub fn is_zero(self) -> bool {
        match self {
            HwFloat::Single(v) => v == 0.0,
            HwFloat::Double(v) => v == 0.0,
        }
    }

    /// `true` when the value is an IEEE infinity.
    pub fn is_infinite(self) -> bool {
        match self {
            HwFloat::Single(v) => v.is_infinite(),
            HwFloat::Double(v) => v.is_infinite(),
        }
    }

    /// Widen to `f64` for interoperation with the decimal kernel's
    /// estimate-only conversions.
    pub fn to_f64(self) -> f64 {
        match self {
            HwFloat::Single(v) => v as f64,
            HwFloat::Double(v) => v,
        }
    }

    /// `sin`, computed via `libm` so the same code path works `no_std`.
    pub fn sin(self) -> Self {
        unary(self, libm::sinf, libm::sin)
    }

    /// `cos`, computed via `libm`.
    pub fn cos(self) -> Self {
        unary(self, libm::cosf, libm::cos)
    }

    /// `exp`, computed via `libm`.
    pub fn exp(self) -> Self {
        unary(self, libm::expf, libm::exp)
    }

    /// Natural log; the argument must be strictly positive.
    pub fn ln(self) -> Result<Self, ErrorKind> {
        if self.to_f64() <= 0.0 {
            return Err(ErrorKind::ArgumentOutsideDomain);
        }
        Ok(unary(self, libm::logf, libm::log))
    }

    /// Square root; the argument must be non-negative.
    pub fn sqrt(self) -> Result<Self, ErrorKind> {
        if self.to_f64() < 0.0 {
            return Err(ErrorKind::ArgumentOutsideDomain);
        }
        Ok(unary(self, libm::sqrtf, libm::sqrt))
    }

    /// Cube root; defined for negative arguments too.
    pub fn cbrt(self) -> Self {
        unary(self, libm::cbrtf, libm::cbrt)
    }

    /// `tan`.
    pub fn tan(self) -> Self {
        unary(self, libm::tanf, libm::tan)
    }

    /// `asin`; the argument must lie in `[-1, 1]`.
    pub fn asin(self) -> Result<Self, ErrorKind> {
        if libm::fabs(self.to_f64()) > 1.0 {
            return Err(ErrorKind::ArgumentOutsideDomain);
        }
        Ok(unary(self, libm::asinf, libm::asin))
    }

    /// `acos`; the argument must lie in `[-1, 1]`.
    pub fn acos(self) -> Result<Self, ErrorKind> {
        if libm::fabs(self.to_f64()) > 1.0 {
            return Err(ErrorKind::ArgumentOutsideDomain);
        }
        Ok(unary(self, libm::acosf, libm::acos))
    }

    /// `atan`.
    pub fn atan(self) -> Self {
        unary(self, libm::atanf, libm::atan)
    }

    /// `atan2(self, other)`.
    pub fn atan2(self, other: Self) -> Self {
        binary(self, other, libm::atan2f, libm::atan2)
    }

    /// `sinh`.
    pub fn sinh(self) -> Self {
        unary(self, libm::sinhf, libm::sinh)
    }

    /// `cosh`.
    pub fn cosh(self) -> Self {
        unary(self, libm::coshf, libm::cosh)
    }

    /// `tanh`.
    pub fn tanh(self) -> Self {
        unary(self, libm::tanhf, libm::tanh)
    }

    /// `asinh`.
    pub fn asinh(self) -> Self {
        unary(self, libm::asinhf, libm::asinh)
    }

    /// `acosh`; the argument must be at least `1`.
    pub fn acosh(self) -> Result<Self, ErrorKind> {
        if self.to_f64() < 1.0 {
            return Err(ErrorKind::ArgumentOutsideDomain);
        }
        Ok(unary(self, libm::acoshf, libm::acosh))
    }

    /// `atanh`; the argument must lie in `(-1, 1)`.
    pub fn atanh(self) -> Result<Self, ErrorKind> {
        if libm::fabs(self.to_f64()) >= 1.0 {
            return Err(ErrorKind::ArgumentOutsideDomain);
        }
        Ok(unary(self, libm::atanhf, libm::atanh))
    }

    /// Base-10 log; the argument must be strictly positive.
    pub fn log10(self) -> Result<Self, ErrorKind> {
        if self.to_f64() <= 0.0 {
            return Err(ErrorKind::ArgumentOutsideDomain);
        }
        Ok(unary(self, libm::log10f, libm::log10))
    }

    /// `10^self` (`ALOG`).
    pub fn exp10(self) -> Self {
        unary(self, |x| libm::powf(10.0, x), |x| libm::pow(10.0, x))
    }

    /// Base-2 log; the argument must be strictly positive.
    pub fn log2(self) -> Result<Self, ErrorKind> {
        if self.to_f64() <= 0.0 {
            return Err(ErrorKind::ArgumentOutsideDomain);
        }
        Ok(unary(self, libm::log2f, libm::log2))
    }

    /// `2^self`.
    pub fn exp2(self) -> Self {
        unary(self, libm::exp2f, libm::exp2)
    }

    /// `ln(1 + self)`, accurate for `self` close to zero.
    pub fn ln1p(self) -> Result<Self, ErrorKind> {
        if self.to_f64() <= -1.0 {
            return Err(ErrorKind::ArgumentOutsideDomain);
        }
        Ok(unary(self, libm::log1pf, libm::log1p))
    }

    /// `exp(self) - 1`, accurate for `self` close to zero.
    pub fn expm1(self) -> Self {
        unary(self, libm::expm1f, libm::expm1)
    }
}

fn binary(a: HwFloat, b: HwFloat, f32_op: impl Fn(f32, f32) -> f32, f64_op: impl Fn(f64, f64) -> f64) -> HwFloat {
    match (a, b) {
        (HwFloat::Single(x), HwFloat::Single(y)) => HwFloat::Single(f32_op(x, y)),
        (HwFloat::Double(_), _) | (_, HwFloat::Double(_)) => HwFloat::Double(f64_op(a.to_f64(), b.to_f64())),
    }
}

fn unary(a: HwFloat, f32_op: impl Fn(f32) -> f32, f64_op: impl Fn(f64) -> f64) -> HwFloat {
    match a {
        HwFloat::Single(x) => HwFloat::Single(f32_op(x)),
        HwFloat::Double(x) => HwFloat::Double(f64_op(x)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_precision_promotes_to_double() {
        let a = HwFloat::Single(1.5);
        let b = HwFloat::Double(2.5);
        assert_eq!(a.add(b), HwFloat::Double(4.0));
    }

    #[test]
    fn division_by_zero_raises_divide_by_zero() {
        let a = HwFloat::Double(1.0);
        let z = HwFloat::Double(0.0);
        assert_eq!(a.div(z), Err(ErrorKind::DivideByZero));
    }

    #[test]
    fn ln_of_nonpositive_is_outside_domain() {
        assert_eq!(HwFloat::Double(-1.0).ln(), Err(ErrorKind::ArgumentOutsideDomain));
    }

    #[test]
    fn sqrt_of_four_is_two() {
        assert_eq!(HwFloat::Double(4.0).sqrt().unwrap(), HwFloat::Double(2.0));
    }
}
