//! Numeric promotion and dispatch (spec.md §4.3): the tower `Integer <
//! Fraction < Decimal < HwFloat < Complex` that every binary arithmetic
//! command climbs to the lowest rung both operands fit on, plus the
//! unary numeric operators and the transcendental set routed through
//! [`HwFloat`] the way `fuel_vm`'s ALU widens register pairs before an
//! overflow-checked op rather than duplicating the op per width.

use db48x_numeric::{
    Complex,
    Decimal,
    Fraction,
    HwFloat,
    Integer,
    IntegerOrFraction,
    Range,
    Uncertain,
};
use db48x_object::ErrorKind;
use num_bigint::BigInt;

use crate::object::Object;

/// Build the exact decimal closest to an `f64`, for promoting a hardware
/// float into the decimal kernel (`→Num` on a `HwFloat`, and constants
/// whose source representation is an `f64`).
///
/// `f64`'s `{:e}` formatting always yields a normalized `d.dddddddddddddddde±N`
/// mantissa, so the digits before/after the point plus the exponent give
/// an exact `BigInt` mantissa and decimal exponent with no precision lost
/// relative to the original float.
pub fn decimal_from_f64(value: f64) -> Decimal {
    if value == 0.0 {
        return Decimal::zero();
    }
    let rendered = alloc::format!("{value:e}");
    let (mantissa_part, exponent_part) = rendered.split_once('e').expect("`{:e}` always contains 'e'");
    let exponent: i64 = exponent_part.parse().expect("`{:e}` exponent is always a valid integer");
    let negative = mantissa_part.starts_with('-');
    let digits_part = mantissa_part.trim_start_matches('-');
    let (integer_part, fractional_part) = digits_part.split_once('.').unwrap_or((digits_part, ""));
    let digits = alloc::format!("{integer_part}{fractional_part}");
    let mut mantissa: BigInt = digits.parse().unwrap_or_else(|_| BigInt::from(0));
    if negative {
        mantissa = -mantissa;
    }
    Decimal::from_parts(mantissa, exponent - fractional_part.len() as i64)
}

/// Where an operand sits on the numeric tower, from most exact to least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Rung {
    Integer,
    Fraction,
    Decimal,
    HwFloat,
}

fn rung(object: &Object) -> Option<Rung> {
    match object {
        Object::Integer(_) => Some(Rung::Integer),
        Object::Fraction(_) => Some(Rung::Fraction),
        Object::Decimal(_) => Some(Rung::Decimal),
        Object::HwFloat(_) => Some(Rung::HwFloat),
        _ => None,
    }
}

fn as_hwfloat(object: &Object) -> Option<HwFloat> {
    object.to_f64_approx().map(HwFloat::Double)
}

fn as_decimal(object: &Object, precision: u32) -> Option<Decimal> {
    match object {
        Object::Integer(n) => Some(decimal_from_i64_or_string(n)),
        Object::Fraction(f) => Some(fraction_to_decimal(f, precision)),
        Object::Decimal(d) => Some(d.clone()),
        _ => None,
    }
}

fn decimal_from_i64_or_string(n: &Integer) -> Decimal {
    match n.to_i64() {
        Some(v) => Decimal::from_i64(v),
        None => Decimal::from_parts(n.to_decimal_string().parse().unwrap_or_default(), 0),
    }
}

fn fraction_to_decimal(fraction: &Fraction, precision: u32) -> Decimal {
    let numerator = decimal_from_i64_or_string(&fraction.numerator());
    let denominator = decimal_from_i64_or_string(&fraction.denominator());
    numerator.div(&denominator, precision).unwrap_or_else(|_| Decimal::zero())
}

fn as_fraction(object: &Object) -> Option<Fraction> {
    match object {
        Object::Integer(n) => Some(Fraction::from_integer(n.clone())),
        Object::Fraction(f) => Some(f.clone()),
        _ => None,
    }
}

/// `+ − × ÷`, promoting both operands to the lowest common rung before
/// dispatching. `Complex`, `Range`/`Uncertain`, and `Unit` are handled
/// before this function is reached, since their promotion rules are
/// per-family rather than a shared tower.
pub fn binary_numeric(
    op: BinaryOp,
    a: &Object,
    b: &Object,
    precision: u32,
) -> Result<Object, ErrorKind> {
    let (ra, rb) = (rung(a), rung(b));
    match (ra, rb) {
        (Some(Rung::Integer), Some(Rung::Integer)) => {
            let (x, y) = (expect_integer(a), expect_integer(b));
            integer_op(op, x, y)
        }
        (Some(ra), Some(rb)) if ra.max(rb) <= Rung::Fraction => {
            let (x, y) = (as_fraction(a).expect("fraction rung"), as_fraction(b).expect("fraction rung"));
            fraction_op(op, &x, &y)
        }
        (Some(ra), Some(rb)) if ra.max(rb) <= Rung::Decimal => {
            let (x, y) = (as_decimal(a, precision).expect("decimal rung"), as_decimal(b, precision).expect("decimal rung"));
            decimal_op(op, &x, &y, precision)
        }
        (Some(_), Some(_)) => {
            let (x, y) = (as_hwfloat(a).expect("numeric"), as_hwfloat(b).expect("numeric"));
            hwfloat_op(op, x, y)
        }
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// The four basic arithmetic operators, shared by every rung of the tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `×`
    Mul,
    /// `÷`
    Div,
}

fn expect_integer(object: &Object) -> Integer {
    match object {
        Object::Integer(n) => n.clone(),
        _ => unreachable!("caller already checked the rung"),
    }
}

fn integer_op(op: BinaryOp, a: Integer, b: Integer) -> Result<Object, ErrorKind> {
    Ok(match op {
        BinaryOp::Add => Object::Integer(a.add(&b)),
        BinaryOp::Sub => Object::Integer(a.sub(&b)),
        BinaryOp::Mul => Object::Integer(a.mul(&b)),
        BinaryOp::Div => match a.div(&b)? {
            IntegerOrFraction::Integer(n) => Object::Integer(n),
            IntegerOrFraction::Fraction(f) => Object::Fraction(f),
        },
    })
}

fn fraction_op(op: BinaryOp, a: &Fraction, b: &Fraction) -> Result<Object, ErrorKind> {
    Ok(Object::Fraction(match op {
        BinaryOp::Add => a.add(b),
        BinaryOp::Sub => a.sub(b),
        BinaryOp::Mul => a.mul(b),
        BinaryOp::Div => a.div(b)?,
    }))
}

fn decimal_op(op: BinaryOp, a: &Decimal, b: &Decimal, precision: u32) -> Result<Object, ErrorKind> {
    Ok(Object::Decimal(match op {
        BinaryOp::Add => a.add(b, precision),
        BinaryOp::Sub => a.sub(b, precision),
        BinaryOp::Mul => a.mul(b, precision),
        BinaryOp::Div => a.div(b, precision)?,
    }))
}

fn hwfloat_op(op: BinaryOp, a: HwFloat, b: HwFloat) -> Result<Object, ErrorKind> {
    Ok(Object::HwFloat(match op {
        BinaryOp::Add => a.add(b),
        BinaryOp::Sub => a.sub(b),
        BinaryOp::Mul => a.mul(b),
        BinaryOp::Div => a.div(b)?,
    }))
}

/// `NEG`: additive inverse, defined for every numeric family.
pub fn neg(object: &Object) -> Result<Object, ErrorKind> {
    Ok(match object {
        Object::Integer(n) => Object::Integer(n.neg()),
        Object::Fraction(f) => Object::Fraction(f.neg()),
        Object::Decimal(d) => Object::Decimal(d.neg()),
        Object::HwFloat(h) => Object::HwFloat(HwFloat::Double(0.0).sub(*h)),
        Object::Complex(c) => Object::Complex(c.neg()),
        _ => return Err(ErrorKind::BadArgumentType),
    })
}

/// `INV`: multiplicative inverse, `1/x`.
pub fn inv(object: &Object, precision: u32) -> Result<Object, ErrorKind> {
    binary_numeric(BinaryOp::Div, &Object::one(), object, precision)
}

/// `ABS`: magnitude, which for a complex value is the modulus rather than
/// a same-typed result.
pub fn abs(object: &Object) -> Result<Object, ErrorKind> {
    Ok(match object {
        Object::Integer(n) if n.signum() < 0 => Object::Integer(n.neg()),
        Object::Integer(_) => object.clone(),
        Object::Fraction(f) if f.numerator().signum() < 0 => Object::Fraction(f.neg()),
        Object::Fraction(_) => object.clone(),
        Object::Decimal(d) if d.signum() < 0 => Object::Decimal(d.neg()),
        Object::Decimal(_) => object.clone(),
        Object::HwFloat(h) => {
            let v = h.to_f64();
            Object::HwFloat(HwFloat::Double(libm::fabs(v)))
        }
        Object::Complex(c) => Object::HwFloat(HwFloat::Double(c.abs())),
        _ => return Err(ErrorKind::BadArgumentType),
    })
}

/// `SIGN`: `-1`, `0`, or `1` (or the unit complex along the same ray, for
/// a nonzero complex argument).
pub fn sign(object: &Object) -> Result<Object, ErrorKind> {
    Ok(match object {
        Object::Integer(n) => Object::Integer(Integer::from_i64(i64::from(n.signum()))),
        Object::Fraction(f) => Object::Integer(Integer::from_i64(i64::from(f.numerator().signum()))),
        Object::Decimal(d) => Object::Integer(Integer::from_i64(i64::from(d.signum()))),
        Object::HwFloat(h) => {
            let v = h.to_f64();
            let s = if v > 0.0 { 1.0 } else if v < 0.0 { -1.0 } else { 0.0 };
            Object::HwFloat(HwFloat::Double(s))
        }
        Object::Complex(c) => {
            let modulus = c.abs();
            if modulus == 0.0 {
                Object::Integer(Integer::zero())
            } else {
                Object::Complex(c.mul(Complex::rectangular(1.0 / modulus, 0.0), db48x_numeric::AngleUnit::Radians))
            }
        }
        _ => return Err(ErrorKind::BadArgumentType),
    })
}

/// `MOD`, result takes the sign of the divisor (integers only; spec.md
/// §4.3.1 — a non-integer operand raises `Bad argument type`).
pub fn modulo(a: &Object, b: &Object) -> Result<Object, ErrorKind> {
    match (a, b) {
        (Object::Integer(x), Object::Integer(y)) => Ok(Object::Integer(x.modulo(y)?)),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// `REM`, result takes the sign of the dividend.
pub fn rem(a: &Object, b: &Object) -> Result<Object, ErrorKind> {
    match (a, b) {
        (Object::Integer(x), Object::Integer(y)) => Ok(Object::Integer(x.rem(y)?)),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// `GCD`.
pub fn gcd(a: &Object, b: &Object) -> Result<Object, ErrorKind> {
    match (a, b) {
        (Object::Integer(x), Object::Integer(y)) => Ok(Object::Integer(x.gcd(y))),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// `LCM`.
pub fn lcm(a: &Object, b: &Object) -> Result<Object, ErrorKind> {
    match (a, b) {
        (Object::Integer(x), Object::Integer(y)) => Ok(Object::Integer(x.lcm(y))),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// `FACT`/`!`: `n!` for a non-negative integer, else `Γ(x+1)` approximated
/// in `HwFloat` via the Stirling series `libm` does not expose directly.
pub fn factorial(object: &Object) -> Result<Object, ErrorKind> {
    match object {
        Object::Integer(n) => {
            if n.signum() < 0 {
                return Err(ErrorKind::ArgumentOutsideDomain);
            }
            let count = n.to_i64().ok_or(ErrorKind::NumericalOverflow)?;
            let mut acc = Integer::from_i64(1);
            for k in 1..=count {
                acc = acc.mul(&Integer::from_i64(k));
            }
            Ok(Object::Integer(acc))
        }
        _ => {
            let x = object.to_f64_approx().ok_or(ErrorKind::BadArgumentType)?;
            Ok(Object::HwFloat(HwFloat::Double(gamma(x + 1.0))))
        }
    }
}

/// Lanczos approximation to `Γ(x)`, accurate to about 15 significant
/// digits over the domain the `FACT`/`PV`/`Combinations` commands exercise.
fn gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFICIENTS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];
    if x < 0.5 {
        core::f64::consts::PI / (libm::sin(core::f64::consts::PI * x) * gamma(1.0 - x))
    } else {
        let x = x - 1.0;
        let mut a = COEFFICIENTS[0];
        let t = x + G + 0.5;
        for (i, c) in COEFFICIENTS.iter().enumerate().skip(1) {
            a += c / (x + i as f64);
        }
        libm::sqrt(2.0 * core::f64::consts::PI) * libm::pow(t, x + 0.5) * libm::exp(-t) * a
    }
}

/// `^`/`XROOT`: integer powers stay exact on the exact rungs; any
/// negative or non-integer exponent (or a `SQRT`/`XROOT` request)
/// promotes through `HwFloat`.
pub fn pow(base: &Object, exponent: &Object, precision: u32) -> Result<Object, ErrorKind> {
    if let (Object::Integer(b), Object::Integer(e)) = (base, exponent) {
        if let Some(exp) = e.to_i64() {
            if exp >= 0 {
                return Ok(Object::Integer(b.pow(exp as u32)));
            }
            if b.is_zero() {
                return Err(ErrorKind::DivideByZero);
            }
            let positive = b.pow((-exp) as u32);
            return Ok(Object::Fraction(Fraction::checked_new(Integer::from_i64(1), positive)?));
        }
    }
    if let Object::Fraction(b) = base {
        if let Object::Integer(e) = exponent {
            if let Some(exp) = e.to_i64() {
                return fraction_pow(b, exp);
            }
        }
    }
    let b = base.to_f64_approx().ok_or(ErrorKind::BadArgumentType)?;
    let e = exponent.to_f64_approx().ok_or(ErrorKind::BadArgumentType)?;
    if b == 0.0 && e == 0.0 {
        return Ok(Object::Decimal(Decimal::zero_pow_zero(false)?));
    }
    if b < 0.0 && e.fract() != 0.0 {
        return Err(ErrorKind::ArgumentOutsideDomain);
    }
    let _ = precision;
    Ok(Object::HwFloat(HwFloat::Double(libm::pow(b, e))))
}

fn fraction_pow(base: &Fraction, exponent: i64) -> Result<Object, ErrorKind> {
    if exponent == 0 {
        return Ok(Object::Integer(Integer::from_i64(1)));
    }
    let magnitude = exponent.unsigned_abs() as u32;
    let n = base.numerator().pow(magnitude);
    let d = base.denominator().pow(magnitude);
    if exponent > 0 {
        Ok(Object::Fraction(Fraction::checked_new(n, d)?))
    } else {
        Ok(Object::Fraction(Fraction::checked_new(d, n)?))
    }
}

/// `SQRT`.
pub fn sqrt(object: &Object) -> Result<Object, ErrorKind> {
    if let Object::Integer(n) = object {
        if n.signum() >= 0 {
            let root = n.xroot(2)?;
            if root.mul(&root) == *n {
                return Ok(Object::Integer(root));
            }
        }
    }
    let h = as_hwfloat(object).ok_or(ErrorKind::BadArgumentType)?;
    Ok(Object::HwFloat(h.sqrt()?))
}

/// `CBRT`.
pub fn cbrt(object: &Object) -> Result<Object, ErrorKind> {
    if let Object::Integer(n) = object {
        let root = n.xroot(3)?;
        if root.pow(3) == *n {
            return Ok(Object::Integer(root));
        }
    }
    let h = as_hwfloat(object).ok_or(ErrorKind::BadArgumentType)?;
    Ok(Object::HwFloat(h.cbrt()))
}

/// `XROOT`: `a` x-rooted by integer `n`.
pub fn xroot(a: &Object, n: &Object) -> Result<Object, ErrorKind> {
    let n = match n {
        Object::Integer(n) => n.to_i64().ok_or(ErrorKind::BadArgumentValue)?,
        _ => return Err(ErrorKind::BadArgumentType),
    };
    if n < 0 {
        return Err(ErrorKind::BadArgumentValue);
    }
    match a {
        Object::Integer(x) => Ok(Object::Integer(x.xroot(n as u32)?)),
        _ => {
            let x = a.to_f64_approx().ok_or(ErrorKind::BadArgumentType)?;
            if x < 0.0 && n % 2 == 0 {
                return Err(ErrorKind::ArgumentOutsideDomain);
            }
            let sign = if x < 0.0 { -1.0 } else { 1.0 };
            Ok(Object::HwFloat(HwFloat::Double(sign * libm::pow(libm::fabs(x), 1.0 / n as f64))))
        }
    }
}

/// `SQ`: `x^2`, exact whenever `x` is.
pub fn square(object: &Object, precision: u32) -> Result<Object, ErrorKind> {
    binary_numeric(BinaryOp::Mul, object, object, precision)
}

/// `CUBED`: `x^3`.
pub fn cubed(object: &Object, precision: u32) -> Result<Object, ErrorKind> {
    let squared = square(object, precision)?;
    binary_numeric(BinaryOp::Mul, &squared, object, precision)
}

/// `%`: `b * a / 100`.
pub fn percent(base: &Object, pct: &Object, precision: u32) -> Result<Object, ErrorKind> {
    let hundred = Object::Integer(Integer::from_i64(100));
    let scaled = binary_numeric(BinaryOp::Mul, base, pct, precision)?;
    binary_numeric(BinaryOp::Div, &scaled, &hundred, precision)
}

/// `%CH`: percentage change from `old` to `new`.
pub fn percent_change(old: &Object, new: &Object, precision: u32) -> Result<Object, ErrorKind> {
    let delta = binary_numeric(BinaryOp::Sub, new, old, precision)?;
    let ratio = binary_numeric(BinaryOp::Div, &delta, old, precision)?;
    let hundred = Object::Integer(Integer::from_i64(100));
    binary_numeric(BinaryOp::Mul, &ratio, &hundred, precision)
}

/// The named transcendental functions (spec.md §4.3.5), all computed via
/// [`HwFloat`] after promoting exact and decimal arguments through it —
/// `Decimal` carries no transcendental functions of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transcendental {
    /// `SIN`
    Sin,
    /// `COS`
    Cos,
    /// `TAN`
    Tan,
    /// `ASIN`
    Asin,
    /// `ACOS`
    Acos,
    /// `ATAN`
    Atan,
    /// `SINH`
    Sinh,
    /// `COSH`
    Cosh,
    /// `TANH`
    Tanh,
    /// `ASINH`
    Asinh,
    /// `ACOSH`
    Acosh,
    /// `ATANH`
    Atanh,
    /// `LN`
    Ln,
    /// `EXP`
    Exp,
    /// `LOG` (base 10)
    Log10,
    /// `ALOG` (`10^x`)
    Exp10,
    /// `LOG2`
    Log2,
    /// `EXP2`
    Exp2,
    /// `LNP1`
    Ln1p,
    /// `EXPM`
    Expm1,
}

/// Apply a [`Transcendental`] function, after promoting a `Range` operand
/// through the interval-arithmetic `sin`/`cos`/`tan` bounds rather than a
/// plain `HwFloat` point evaluation (spec.md §4.3.7).
pub fn transcendental(f: Transcendental, object: &Object) -> Result<Object, ErrorKind> {
    if let Object::Range(r) = object {
        return Ok(Object::Range(match f {
            Transcendental::Sin => r.sin(),
            Transcendental::Cos => r.cos(),
            Transcendental::Tan => r.tan(),
            _ => return Err(ErrorKind::BadArgumentType),
        }));
    }
    let h = as_hwfloat(object).ok_or(ErrorKind::BadArgumentType)?;
    Ok(Object::HwFloat(match f {
        Transcendental::Sin => h.sin(),
        Transcendental::Cos => h.cos(),
        Transcendental::Tan => h.tan(),
        Transcendental::Asin => h.asin()?,
        Transcendental::Acos => h.acos()?,
        Transcendental::Atan => h.atan(),
        Transcendental::Sinh => h.sinh(),
        Transcendental::Cosh => h.cosh(),
        Transcendental::Tanh => h.tanh(),
        Transcendental::Asinh => h.asinh(),
        Transcendental::Acosh => h.acosh()?,
        Transcendental::Atanh => h.atanh()?,
        Transcendental::Ln => h.ln()?,
        Transcendental::Exp => h.exp(),
        Transcendental::Log10 => h.log10()?,
        Transcendental::Exp10 => h.exp10(),
        Transcendental::Log2 => h.log2()?,
        Transcendental::Exp2 => h.exp2(),
        Transcendental::Ln1p => h.ln1p()?,
        Transcendental::Expm1 => h.expm1(),
    }))
}

/// `ATAN2`-style two-argument arctangent, and the general entry point for
/// any future two-argument transcendental.
pub fn atan2(y: &Object, x: &Object) -> Result<Object, ErrorKind> {
    let (y, x) = (as_hwfloat(y).ok_or(ErrorKind::BadArgumentType)?, as_hwfloat(x).ok_or(ErrorKind::BadArgumentType)?);
    Ok(Object::HwFloat(y.atan2(x)))
}

/// `ARG`: the complex argument, in the angle unit `angle_unit` describes.
pub fn arg(object: &Object, unit: db48x_numeric::AngleUnit) -> Result<Object, ErrorKind> {
    match object {
        Object::Complex(c) => Ok(Object::HwFloat(HwFloat::Double(c.arg(unit).value))),
        _ => {
            let x = object.to_f64_approx().ok_or(ErrorKind::BadArgumentType)?;
            Ok(Object::HwFloat(HwFloat::Double(if x < 0.0 { core::f64::consts::PI } else { 0.0 })))
        }
    }
}

/// `RE`: the real part.
pub fn re(object: &Object) -> Result<Object, ErrorKind> {
    match object {
        Object::Complex(c) => Ok(Object::HwFloat(HwFloat::Double(c.re()))),
        _ if object.is_exact() || matches!(object, Object::Decimal(_) | Object::HwFloat(_)) => Ok(object.clone()),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// `IM`: the imaginary part.
pub fn im(object: &Object) -> Result<Object, ErrorKind> {
    match object {
        Object::Complex(c) => Ok(Object::HwFloat(HwFloat::Double(c.im()))),
        _ if object.is_exact() || matches!(object, Object::Decimal(_) | Object::HwFloat(_)) => Ok(Object::zero()),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// `CONJ`.
pub fn conj(object: &Object) -> Result<Object, ErrorKind> {
    match object {
        Object::Complex(c) => Ok(Object::Complex(c.conj())),
        _ if object.is_exact() || matches!(object, Object::Decimal(_) | Object::HwFloat(_)) => Ok(object.clone()),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// `DDAYS`.
pub fn ddays(a: &Object, b: &Object) -> Result<Object, ErrorKind> {
    match (a, b) {
        (Object::Date(x), Object::Date(y)) => Ok(Object::Integer(x.ddays(y))),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// `DATEADD`.
pub fn date_add(date: &Object, days: &Object) -> Result<Object, ErrorKind> {
    match (date, days) {
        (Object::Date(d), Object::Integer(n)) => Ok(Object::Date(d.add_days(n)?)),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// `CONVERT`/`UVAL`/`UBASE` share the unit-arithmetic core; this module
/// only supplies the scalar-promotes-to-range and exact-fraction-promotes
/// helpers the evaluator's unit table needs alongside it.
pub fn range_from_scalar(object: &Object) -> Option<Range> {
    object.to_f64_approx().map(Range::scalar)
}

/// Promote a scalar to an [`Uncertain`] with zero sigma, for mixed
/// `Uncertain op scalar` expressions.
pub fn uncertain_from_scalar(object: &Object) -> Option<Uncertain> {
    object.to_f64_approx().map(|v| Uncertain::new(v, 0.0))
}

/// `→Q`: recover the simplest fraction approximating a decimal or hardware
/// float within the current display precision.
pub fn to_fraction(object: &Object, significant_digits: u32) -> Result<Object, ErrorKind> {
    match object {
        Object::Integer(_) | Object::Fraction(_) => Ok(object.clone()),
        Object::Decimal(d) => Ok(Object::Fraction(d.to_fraction(significant_digits))),
        Object::HwFloat(h) => Ok(Object::Fraction(decimal_from_f64(h.to_f64()).to_fraction(significant_digits))),
        _ => Err(ErrorKind::BadArgumentType),
    }
}

/// `→Num`: coerce to a decimal at the working precision.
pub fn to_decimal(object: &Object, precision: u32) -> Result<Object, ErrorKind> {
    as_decimal(object, precision).map(Object::Decimal).ok_or(ErrorKind::BadArgumentType)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_from_f64_round_trips_a_simple_value() {
        let d = decimal_from_f64(1.5);
        assert_eq!(d.to_f64_approx(), 1.5);
    }

    #[test]
    fn exact_division_promotes_to_fraction_when_inexact() {
        let a = Object::Integer(Integer::from_i64(1));
        let b = Object::Integer(Integer::from_i64(3));
        let result = binary_numeric(BinaryOp::Div, &a, &b, 24).unwrap();
        assert!(matches!(result, Object::Fraction(_)));
    }

    #[test]
    fn mixing_decimal_and_integer_promotes_to_decimal() {
        let a = Object::Decimal(Decimal::from_i64(1));
        let b = Object::Integer(Integer::from_i64(2));
        let result = binary_numeric(BinaryOp::Add, &a, &b, 24).unwrap();
        assert!(matches!(result, Object::Decimal(_)));
    }

    #[test]
    fn square_root_of_a_perfect_square_stays_exact() {
        let n = Object::Integer(Integer::from_i64(144));
        assert_eq!(sqrt(&n).unwrap(), Object::Integer(Integer::from_i64(12)));
    }

    #[test]
    fn factorial_of_five_is_one_twenty() {
        let n = Object::Integer(Integer::from_i64(5));
        assert_eq!(factorial(&n).unwrap(), Object::Integer(Integer::from_i64(120)));
    }

    #[test]
    fn division_by_zero_is_reported() {
        let a = Object::Integer(Integer::from_i64(1));
        let z = Object::Integer(Integer::zero());
        assert_eq!(binary_numeric(BinaryOp::Div, &a, &z, 24), Err(ErrorKind::DivideByZero));
    }

    #[test]
    fn gcd_lcm_reject_non_integers() {
        let a = Object::Decimal(Decimal::from_i64(4));
        let b = Object::Integer(Integer::from_i64(6));
        assert_eq!(gcd(&a, &b), Err(ErrorKind::BadArgumentType));
    }
}
