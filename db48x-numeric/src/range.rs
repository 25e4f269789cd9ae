//! Ranges: intervals, delta, percent, and uncertain quantities (spec.md
//! §4.3.7). All four share the same interval-arithmetic core; they differ
//! only in how a pair of bounds is displayed and constructed.

use db48x_object::ErrorKind;

/// How a [`Range`]'s bounds were expressed, kept so the renderer can show
/// the form the value was created in rather than always the raw interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeKind {
    /// `a…b`, explicit bounds.
    Interval,
    /// `a±d`, center and absolute delta.
    Delta,
    /// `a±p%`, center and a percentage of the center.
    Percent,
}

/// An interval `[lo, hi]`, covering the `Range`/`DRange`/`PRange` object
/// families.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    lo: f64,
    hi: f64,
    kind: RangeKind,
}

impl Range {
    /// Build from explicit bounds (`a…b`).
    pub fn from_bounds(lo: f64, hi: f64) -> Self {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        Range { lo, hi, kind: RangeKind::Interval }
    }

    /// Build from a center and an absolute delta (`a±d`).
    pub fn from_center_delta(center: f64, delta: f64) -> Self {
        let delta = libm::fabs(delta);
        Range {
            lo: center - delta,
            hi: center + delta,
            kind: RangeKind::Delta,
        }
    }

    /// Build from a center and a percentage of the center (`a±p%`).
    pub fn from_center_percent(center: f64, percent: f64) -> Self {
        let delta = libm::fabs(center) * libm::fabs(percent) / 100.0;
        Range {
            lo: center - delta,
            hi: center + delta,
            kind: RangeKind::Percent,
        }
    }

    /// The lower bound.
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// The upper bound.
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// The display form this value was built with.
    pub fn kind(&self) -> RangeKind {
        self.kind
    }

    /// The center of the interval.
    pub fn center(&self) -> f64 {
        (self.lo + self.hi) / 2.0
    }

    /// `self + other`: endpoints add (promotion: scalar ∘ range = range
    /// with both endpoints combined applies by calling [`Range::scalar`]
    /// on the scalar operand first).
    pub fn add(self, other: Self) -> Self {
        Range::from_bounds(self.lo + other.lo, self.hi + other.hi)
    }

    /// `self - other`.
    pub fn sub(self, other: Self) -> Self {
        Range::from_bounds(self.lo - other.hi, self.hi - other.lo)
    }

    /// `self * other`, taking the hull of all four corner products.
    pub fn mul(self, other: Self) -> Self {
        let corners = [self.lo * other.lo, self.lo * other.hi, self.hi * other.lo, self.hi * other.hi];
        Range::from_bounds(min4(corners), max4(corners))
    }

    /// `self / other`; undefined (divide by zero) when `other` straddles
    /// zero, since the reciprocal interval would be unbounded on both
    /// sides without a clean hull.
    pub fn div(self, other: Self) -> Result<Self, ErrorKind> {
        if other.lo <= 0.0 && other.hi >= 0.0 {
            return Err(ErrorKind::DivideByZero);
        }
        let recip = Range::from_bounds(1.0 / other.hi, 1.0 / other.lo);
        Ok(self.mul(recip))
    }

    /// A degenerate range representing a plain scalar, for the
    /// scalar-promotes-to-range rule.
    pub fn scalar(value: f64) -> Self {
        Range::from_bounds(value, value)
    }

    /// `sin` over the interval: detects extrema at `π/2 + kπ` inside the
    /// interval and widens the bound to include them.
    pub fn sin(self) -> Self {
        monotone_trig_bound(self, libm::sin, core::f64::consts::FRAC_PI_2, core::f64::consts::PI)
    }

    /// `cos` over the interval: extrema at `kπ`.
    pub fn cos(self) -> Self {
        monotone_trig_bound(self, libm::cos, 0.0, core::f64::consts::PI)
    }

    /// `tan` over the interval: a vertical asymptote at `π/2 + kπ` inside
    /// the interval makes the result unbounded on both sides.
    pub fn tan(self) -> Self {
        let first_pole = nearest_multiple(self.lo, core::f64::consts::PI, core::f64::consts::FRAC_PI_2);
        if first_pole <= self.hi {
            Range::from_bounds(f64::NEG_INFINITY, f64::INFINITY)
        } else {
            let a = libm::tan(self.lo);
            let b = libm::tan(self.hi);
            Range::from_bounds(a.min(b), a.max(b))
        }
    }
}

fn min4(v: [f64; 4]) -> f64 {
    v.iter().copied().fold(f64::INFINITY, f64::min)
}

fn max4(v: [f64; 4]) -> f64 {
    v.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

/// The multiple of `period` closest to-but-not-below `phase` offset from
/// `start`, i.e. the smallest `phase + k*period >= start`.
fn nearest_multiple(start: f64, period: f64, phase: f64) -> f64 {
    let k = libm::ceil((start - phase) / period);
    phase + k * period
}

/// Bound `f` (`sin` or `cos`) over `[r.lo, r.hi]`. `max_phase` is the phase
/// of `f`'s first maximum at or after the origin (`π/2` for `sin`, `0` for
/// `cos`); critical points recur every `period` (`π`), alternating between
/// `+1` and `-1`. Any critical point inside the interval widens the
/// endpoint-only bound to include it.
fn monotone_trig_bound(r: Range, f: impl Fn(f64) -> f64, max_phase: f64, period: f64) -> Range {
    let a = f(r.lo);
    let b = f(r.hi);
    let mut lo = a.min(b);
    let mut hi = a.max(b);

    let mut k = libm::ceil((r.lo - max_phase) / period) as i64;
    loop {
        let candidate = max_phase + (k as f64) * period;
        if candidate > r.hi {
            break;
        }
        let extremum = if k.rem_euclid(2) == 0 { 1.0 } else { -1.0 };
        lo = lo.min(extremum);
        hi = hi.max(extremum);
        k += 1;
    }
    Range::from_bounds(lo, hi)
}

/// An uncertain measurement `center ± sigma` (`a±σ`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Uncertain {
    center: f64,
    sigma: f64,
}

impl Uncertain {
    /// Build from a center value and a (non-negative) standard uncertainty.
    pub fn new(center: f64, sigma: f64) -> Self {
        Uncertain {
            center,
            sigma: libm::fabs(sigma),
        }
    }

    /// The reported value.
    pub fn center(&self) -> f64 {
        self.center
    }

    /// The reported standard uncertainty.
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Interval-arithmetic bounds, for combining with the other range
    /// forms.
    pub fn as_range(self) -> Range {
        Range::from_center_delta(self.center, self.sigma)
    }

    /// `self + other`: centers add; uncertainties combine in quadrature
    /// for independent measurements.
    pub fn add(self, other: Self) -> Self {
        Uncertain::new(self.center + other.center, libm::sqrt(self.sigma * self.sigma + other.sigma * other.sigma))
    }

    /// `self - other`.
    pub fn sub(self, other: Self) -> Self {
        Uncertain::new(self.center - other.center, libm::sqrt(self.sigma * self.sigma + other.sigma * other.sigma))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_adds_both_endpoints() {
        let a = Range::from_bounds(1.0, 2.0);
        let b = Range::from_bounds(10.0, 20.0);
        let sum = a.add(b);
        assert_eq!(sum.lo(), 11.0);
        assert_eq!(sum.hi(), 22.0);
    }

    #[test]
    fn multiplication_takes_the_hull_of_corner_products() {
        let a = Range::from_bounds(-2.0, 3.0);
        let b = Range::from_bounds(-1.0, 4.0);
        let product = a.mul(b);
        assert_eq!(product.lo(), -8.0);
        assert_eq!(product.hi(), 12.0);
    }

    #[test]
    fn division_by_a_range_straddling_zero_is_an_error() {
        let a = Range::from_bounds(1.0, 2.0);
        let z = Range::from_bounds(-1.0, 1.0);
        assert_eq!(a.div(z), Err(ErrorKind::DivideByZero));
    }

    #[test]
    fn percent_range_computes_delta_from_center() {
        let r = Range::from_center_percent(200.0, 10.0);
        assert_eq!(r.lo(), 180.0);
        assert_eq!(r.hi(), 220.0);
    }

    #[test]
    fn tan_over_a_pole_is_unbounded() {
        let r = Range::from_bounds(1.0, 2.0); // straddles π/2
        let t = r.tan();
        assert_eq!(t.lo(), f64::NEG_INFINITY);
        assert_eq!(t.hi(), f64::INFINITY);
    }

    #[test]
    fn uncertain_addition_combines_in_quadrature() {
        let a = Uncertain::new(10.0, 3.0);
        let b = Uncertain::new(20.0, 4.0);
        let sum = a.add(b);
        assert_eq!(sum.center(), 30.0);
        assert!((sum.sigma() - 5.0).abs() < 1e-9);
    }
}
