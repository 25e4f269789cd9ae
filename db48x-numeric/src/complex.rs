//! Complex numbers (spec.md §4.3.6): rectangular and polar forms, with the
//! polar angle carrying its own unit. Arithmetic picks whichever form
//! minimizes precision loss — rectangular for `+`/`-`, polar for `×`/`÷`/
//! power — and converts transparently when operands mix forms.

use db48x_object::ErrorKind;

/// The unit an angle is expressed in, independent of the general unit
/// system in [`crate::unit`] — a polar complex only ever needs these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleUnit {
    /// Degrees, 360 per turn.
    Degrees,
    /// Radians.
    Radians,
    /// Radians expressed as a multiple of π.
    PiRadians,
    /// Gradians, 400 per turn.
    Gradians,
}

impl AngleUnit {
    fn to_radians(self, value: f64) -> f64 {
        match self {
            AngleUnit::Degrees => value * core::f64::consts::PI / 180.0,
            AngleUnit::Radians => value,
            AngleUnit::PiRadians => value * core::f64::consts::PI,
            AngleUnit::Gradians => value * core::f64::consts::PI / 200.0,
        }
    }

    fn from_radians(self, radians: f64) -> f64 {
        match self {
            AngleUnit::Degrees => radians * 180.0 / core::f64::consts::PI,
            AngleUnit::Radians => radians,
            AngleUnit::PiRadians => radians / core::f64::consts::PI,
            AngleUnit::Gradians => radians * 200.0 / core::f64::consts::PI,
        }
    }
}

/// An angle carrying its display unit (the polar form's angle component).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    /// The magnitude in [`Self::unit`].
    pub value: f64,
    /// The unit `value` is expressed in.
    pub unit: AngleUnit,
}

impl Angle {
    /// Construct an angle.
    pub fn new(value: f64, unit: AngleUnit) -> Self {
        Angle { value, unit }
    }

    fn radians(self) -> f64 {
        self.unit.to_radians(self.value)
    }
}

/// A complex number, stored in whichever of the two forms it was produced
/// in; arithmetic converts as needed rather than forcing a canonical form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Complex {
    /// `re + im*i`.
    Rectangular {
        /// Real part.
        re: f64,
        /// Imaginary part.
        im: f64,
    },
    /// `modulus * e^(i*angle)`.
    Polar {
        /// Non-negative modulus.
        modulus: f64,
        /// The angle, carrying its own unit.
        angle: Angle,
    },
}

impl Complex {
    /// Build a rectangular complex number.
    pub fn rectangular(re: f64, im: f64) -> Self {
        Complex::Rectangular { re, im }
    }

    /// Build a polar complex number with a non-negative modulus.
    pub fn polar(modulus: f64, angle: Angle) -> Self {
        Complex::Polar { modulus, angle }
    }

    fn to_rectangular(self) -> (f64, f64) {
        match self {
            Complex::Rectangular { re, im } => (re, im),
            Complex::Polar { modulus, angle } => {
                let theta = angle.radians();
                (modulus * libm::cos(theta), modulus * libm::sin(theta))
            }
        }
    }

    /// The real part (`RE`), converting from polar form if necessary.
    pub fn re(self) -> f64 {
        self.to_rectangular().0
    }

    /// The imaginary part (`IM`), converting from polar form if necessary.
    pub fn im(self) -> f64 {
        self.to_rectangular().1
    }

    fn to_polar(self, unit: AngleUnit) -> (f64, Angle) {
        match self {
            Complex::Polar { modulus, angle } if angle.unit == unit => (modulus, angle),
            _ => {
                let (re, im) = self.to_rectangular();
                let modulus = libm::hypot(re, im);
                let theta = libm::atan2(im, re);
                (modulus, Angle::new(unit.from_radians(theta), unit))
            }
        }
    }

    /// `self + other`: rectangular minimizes the conversion work and the
    /// rounding it would otherwise introduce.
    pub fn add(self, other: Self) -> Self {
        let (a_re, a_im) = self.to_rectangular();
        let (b_re, b_im) = other.to_rectangular();
        Complex::Rectangular {
            re: a_re + b_re,
            im: a_im + b_im,
        }
    }

    /// `self - other`.
    pub fn sub(self, other: Self) -> Self {
        let (a_re, a_im) = self.to_rectangular();
        let (b_re, b_im) = other.to_rectangular();
        Complex::Rectangular {
            re: a_re - b_re,
            im: a_im - b_im,
        }
    }

    /// `self * other`: polar form turns this into modulus-multiply,
    /// angle-add.
    pub fn mul(self, other: Self, unit: AngleUnit) -> Self {
        let (m1, a1) = self.to_polar(unit);
        let (m2, a2) = other.to_polar(unit);
        simplify(Complex::Polar {
            modulus: m1 * m2,
            angle: Angle::new(a1.value + a2.value, unit),
        })
    }

    /// `self / other`.
    pub fn div(self, other: Self, unit: AngleUnit) -> Result<Self, ErrorKind> {
        let (m1, a1) = self.to_polar(unit);
        let (m2, a2) = other.to_polar(unit);
        if m2 == 0.0 {
            return Err(ErrorKind::DivideByZero);
        }
        Ok(simplify(Complex::Polar {
            modulus: m1 / m2,
            angle: Angle::new(a1.value - a2.value, unit),
        }))
    }

    /// The argument (angle), in the requested unit.
    pub fn arg(self, unit: AngleUnit) -> Angle {
        self.to_polar(unit).1
    }

    /// The modulus, always non-negative.
    pub fn abs(self) -> f64 {
        self.to_polar(AngleUnit::Radians).0
    }

    /// `-self`: rectangular minimizes the conversion work, the same
    /// tradeoff [`Complex::add`]/[`Complex::sub`] make.
    pub fn neg(self) -> Self {
        let (re, im) = self.to_rectangular();
        Complex::Rectangular { re: -re, im: -im }
    }

    /// The complex conjugate: flips the imaginary part, or equivalently
    /// the angle's sign in polar form.
    pub fn conj(self) -> Self {
        match self {
            Complex::Rectangular { re, im } => Complex::Rectangular { re, im: -im },
            Complex::Polar { modulus, angle } => Complex::Polar {
                modulus,
                angle: Angle::new(-angle.value, angle.unit),
            },
        }
    }

    /// When a result collapses to (approximately) real, return the real
    /// part so auto-simplification can drop the complex wrapper entirely.
    pub fn collapse_to_real(self, epsilon: f64) -> Option<f64> {
        let (re, im) = self.to_rectangular();
        if libm::fabs(im) <= epsilon {
            Some(re)
        } else {
            None
        }
    }
}

fn simplify(c: Complex) -> Complex {
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangular_addition() {
        let a = Complex::rectangular(1.0, 2.0);
        let b = Complex::rectangular(3.0, -1.0);
        assert_eq!(a.add(b), Complex::rectangular(4.0, 1.0));
    }

    #[test]
    fn polar_multiplication_adds_angles() {
        let a = Complex::polar(2.0, Angle::new(0.0, AngleUnit::Radians));
        let b = Complex::polar(3.0, Angle::new(core::f64::consts::FRAC_PI_2, AngleUnit::Radians));
        let product = a.mul(b, AngleUnit::Radians);
        match product {
            Complex::Polar { modulus, angle } => {
                assert!((modulus - 6.0).abs() < 1e-9);
                assert!((angle.value - core::f64::consts::FRAC_PI_2).abs() < 1e-9);
            }
            other => panic!("expected polar, got {other:?}"),
        }
    }

    #[test]
    fn division_by_zero_modulus_is_an_error() {
        let a = Complex::rectangular(1.0, 0.0);
        let z = Complex::rectangular(0.0, 0.0);
        assert_eq!(a.div(z, AngleUnit::Radians), Err(ErrorKind::DivideByZero));
    }

    #[test]
    fn i_times_i_collapses_to_real() {
        let i = Complex::rectangular(0.0, 1.0);
        let product = i.mul(i, AngleUnit::Radians);
        let real = product.collapse_to_real(1e-9).expect("should collapse");
        assert!((real - -1.0).abs() < 1e-9);
    }

    #[test]
    fn conjugate_flips_the_imaginary_part() {
        let a = Complex::rectangular(3.0, 4.0);
        assert_eq!(a.conj(), Complex::rectangular(3.0, -4.0));
    }
}
