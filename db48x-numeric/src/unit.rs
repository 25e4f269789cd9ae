//! Units (spec.md §4.3.8): a value tagged with a symbolic unit expression,
//! reduced at operation time to a canonical exponent vector over the base
//! dimensions so that `+`/`-` can check compatibility and `×`/`÷`/`↑` can
//! combine dimensions without re-parsing unit text each time.

use db48x_object::ErrorKind;

/// The base dimensions a unit expression is built from: length, mass,
/// time, electric current, thermodynamic temperature, amount of
/// substance, luminous intensity, and plane angle (kept separate from the
/// SI seven since angles are dimensionless in SI but meaningfully typed
/// here — converting an angle always goes through radians, never through
/// an unrelated base unit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimension {
    exponents: [i8; 8],
}

const LENGTH: usize = 0;
const MASS: usize = 1;
const TIME: usize = 2;
const CURRENT: usize = 3;
const TEMPERATURE: usize = 4;
const AMOUNT: usize = 5;
const LUMINOSITY: usize = 6;
const ANGLE: usize = 7;

impl Dimension {
    /// The dimensionless exponent vector (a plain scalar, e.g. a count).
    pub fn dimensionless() -> Self {
        Dimension::default()
    }

    /// A base dimension raised to the first power, by index
    /// (`0..8`, see the module-level constants).
    fn base(index: usize) -> Self {
        let mut exponents = [0i8; 8];
        exponents[index] = 1;
        Dimension { exponents }
    }

    /// Length (`m`).
    pub fn length() -> Self {
        Dimension::base(LENGTH)
    }

    /// Time (`s`).
    pub fn time() -> Self {
        Dimension::base(TIME)
    }

    /// Thermodynamic temperature (`K`).
    pub fn temperature() -> Self {
        Dimension::base(TEMPERATURE)
    }

    /// Plane angle (`rad`).
    pub fn angle() -> Self {
        Dimension::base(ANGLE)
    }

    /// `true` when this is exactly temperature to the first power and
    /// nothing else — the only shape an affine (Celsius/Fahrenheit) offset
    /// may legally apply to.
    pub fn is_pure_temperature(&self) -> bool {
        *self == Dimension::temperature()
    }

    /// The product dimension, exponents added component-wise.
    pub fn mul(self, other: Self) -> Self {
        let mut exponents = [0i8; 8];
        for i in 0..8 {
            exponents[i] = self.exponents[i] + other.exponents[i];
        }
        Dimension { exponents }
    }

    /// The quotient dimension, exponents subtracted component-wise.
    pub fn div(self, other: Self) -> Self {
        let mut exponents = [0i8; 8];
        for i in 0..8 {
            exponents[i] = self.exponents[i] - other.exponents[i];
        }
        Dimension { exponents }
    }

    /// This dimension raised to an integer power.
    pub fn pow(self, exponent: i8) -> Self {
        let mut exponents = [0i8; 8];
        for i in 0..8 {
            exponents[i] = self.exponents[i] * exponent;
        }
        Dimension { exponents }
    }
}

/// A value tagged with a unit: a multiplicative scale factor to the base
/// (SI) representation, an optional affine offset (legal only when
/// `dimension.is_pure_temperature()`), and the resulting dimension vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Unit {
    value: f64,
    dimension: Dimension,
    scale_to_base: f64,
    affine_offset: f64,
}

impl Unit {
    /// Build a unit value from a ratio-only (non-affine) conversion
    /// factor, as every unit except Celsius/Fahrenheit uses.
    pub fn ratio(value: f64, dimension: Dimension, scale_to_base: f64) -> Self {
        Unit {
            value,
            dimension,
            scale_to_base,
            affine_offset: 0.0,
        }
    }

    /// Build a pure-temperature value with an affine conversion, e.g.
    /// Celsius (`scale = 1`, `offset = 273.15`) or Fahrenheit
    /// (`scale = 5/9`, `offset = 255.372…`) relative to kelvin.
    pub fn affine_temperature(value: f64, scale_to_kelvin: f64, offset_to_kelvin: f64) -> Self {
        Unit {
            value,
            dimension: Dimension::temperature(),
            scale_to_base: scale_to_kelvin,
            affine_offset: offset_to_kelvin,
        }
    }

    /// The numeric value in this unit's own scale.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The dimension vector.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn to_base(&self) -> f64 {
        self.value * self.scale_to_base + self.affine_offset
    }

    /// `self + other`; both operands must share the same dimension, and at
    /// most one may carry a nonzero affine offset while not being a pure
    /// temperature on both sides (e.g. `_°C/s` additions are ratio-only).
    pub fn add(&self, other: &Self) -> Result<Self, ErrorKind> {
        if self.dimension != other.dimension {
            return Err(ErrorKind::InconsistentUnits);
        }
        if (self.affine_offset != 0.0 || other.affine_offset != 0.0) && !self.dimension.is_pure_temperature() {
            return Err(ErrorKind::InconsistentUnits);
        }
        let sum_base = self.to_base() + other.to_base();
        Ok(Unit {
            value: (sum_base - self.affine_offset) / self.scale_to_base,
            dimension: self.dimension,
            scale_to_base: self.scale_to_base,
            affine_offset: self.affine_offset,
        })
    }

    /// `self - other`.
    pub fn sub(&self, other: &Self) -> Result<Self, ErrorKind> {
        if self.dimension != other.dimension {
            return Err(ErrorKind::InconsistentUnits);
        }
        let negated = Unit {
            value: -other.value,
            dimension: other.dimension,
            scale_to_base: other.scale_to_base,
            affine_offset: 0.0,
        };
        self.add(&negated)
    }

    /// `self * other`: dimensions combine; affine units may only appear
    /// bare (never inside a product), since a product of two affine scales
    /// has no single sensible offset.
    pub fn mul(&self, other: &Self) -> Result<Self, ErrorKind> {
        if self.affine_offset != 0.0 || other.affine_offset != 0.0 {
            return Err(ErrorKind::InconsistentUnits);
        }
        Ok(Unit {
            value: self.value * other.value,
            dimension: self.dimension.mul(other.dimension),
            scale_to_base: self.scale_to_base * other.scale_to_base,
            affine_offset: 0.0,
        })
    }

    /// `self / other`.
    pub fn div(&self, other: &Self) -> Result<Self, ErrorKind> {
        if other.value == 0.0 {
            return Err(ErrorKind::DivideByZero);
        }
        if self.affine_offset != 0.0 || other.affine_offset != 0.0 {
            return Err(ErrorKind::InconsistentUnits);
        }
        Ok(Unit {
            value: self.value / other.value,
            dimension: self.dimension.div(other.dimension),
            scale_to_base: self.scale_to_base / other.scale_to_base,
            affine_offset: 0.0,
        })
    }

    /// Convert to another unit sharing the same dimension. Only genuinely
    /// pure-temperature conversions use the affine offset; every other
    /// conversion is a plain ratio of normalization factors.
    pub fn convert_to(&self, target_scale_to_base: f64, target_offset: f64, target_dimension: Dimension) -> Result<f64, ErrorKind> {
        if self.dimension != target_dimension {
            return Err(ErrorKind::InconsistentUnits);
        }
        if self.dimension.is_pure_temperature() {
            let base = self.to_base();
            Ok((base - target_offset) / target_scale_to_base)
        } else {
            if self.affine_offset != 0.0 || target_offset != 0.0 {
                return Err(ErrorKind::InconsistentUnits);
            }
            Ok(self.value * self.scale_to_base / target_scale_to_base)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incompatible_dimensions_reject_addition() {
        let meters = Unit::ratio(1.0, Dimension::length(), 1.0);
        let seconds = Unit::ratio(1.0, Dimension::time(), 1.0);
        assert_eq!(meters.add(&seconds), Err(ErrorKind::InconsistentUnits));
    }

    #[test]
    fn multiplication_combines_dimensions() {
        let meters = Unit::ratio(3.0, Dimension::length(), 1.0);
        let seconds = Unit::ratio(2.0, Dimension::time(), 1.0);
        let product = meters.mul(&seconds).unwrap();
        assert_eq!(product.value(), 6.0);
        assert_eq!(product.dimension(), Dimension::length().mul(Dimension::time()));
    }

    #[test]
    fn celsius_to_fahrenheit_uses_the_affine_conversion() {
        // 0 degC == 32 degF.
        let celsius = Unit::affine_temperature(0.0, 1.0, 273.15);
        let fahrenheit_scale = 5.0 / 9.0;
        let fahrenheit_offset = 273.15 - 32.0 * fahrenheit_scale;
        let in_fahrenheit = celsius
            .convert_to(fahrenheit_scale, fahrenheit_offset, Dimension::temperature())
            .unwrap();
        assert!((in_fahrenheit - 32.0).abs() < 1e-9);
    }

    #[test]
    fn division_by_a_zero_valued_unit_is_an_error() {
        let meters = Unit::ratio(1.0, Dimension::length(), 1.0);
        let zero_seconds = Unit::ratio(0.0, Dimension::time(), 1.0);
        assert_eq!(meters.div(&zero_seconds), Err(ErrorKind::DivideByZero));
    }
}
