//! The overflow/underflow/infinity decision tree (spec.md §4.3.4), shared
//! by every numeric kernel whose exponent can run off the configured
//! range: decimals directly, and anything (complex, range, unit) that
//! carries a decimal magnitude underneath.

use db48x_object::{
    ErrorKind,
    Flags,
    SystemFlag,
};

/// Which pole of the bounded exponent range a magnitude fell off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magnitude {
    /// The exponent exceeded the configured maximum (too large).
    Overflow,
    /// The exponent fell below the configured minimum on the positive
    /// side (too close to zero, from above).
    PositiveUnderflow,
    /// The exponent fell below the configured minimum on the negative
    /// side (too close to zero, from below).
    NegativeUnderflow,
}

/// A decimal result whose exponent range survived the check unmodified,
/// or the three decision-tree outcomes a caller must render instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExponentOutcome {
    /// The exponent was in range; nothing to do.
    InRange,
    /// Saturate to the largest/smallest representable decimal with the
    /// given sign, or treat as signed infinity, per flags.
    Saturated {
        /// `true` for a negative result.
        negative: bool,
        /// `true` when the caller should render `∞` instead of a
        /// saturated finite decimal.
        infinite: bool,
    },
}

/// Apply spec.md §4.3.4's decision tree to a magnitude that exceeded
/// `max_exponent` (overflow) or fell short of `-max_exponent` (underflow),
/// consulting and updating `flags` exactly as the kernel must: an error
/// raises and returns `Err`, otherwise the `-23..-26` report flags are set
/// to record which category fired and a saturation/infinity outcome is
/// returned.
pub fn check_exponent(exponent: i64, max_exponent: i64, negative: bool, flags: &mut Flags) -> Result<ExponentOutcome, ErrorKind> {
    if exponent <= max_exponent && exponent >= -max_exponent {
        return Ok(ExponentOutcome::InRange);
    }

    let magnitude = if exponent > max_exponent {
        Magnitude::Overflow
    } else if negative {
        Magnitude::NegativeUnderflow
    } else {
        Magnitude::PositiveUnderflow
    };

    clear_report_flags(flags);

    match magnitude {
        Magnitude::Overflow => {
            if flags.system_flag(SystemFlag::OverflowError) {
                return Err(ErrorKind::NumericalOverflow);
            }
            let infinite = flags.system_flag(SystemFlag::InfinityValue);
            if infinite {
                flags.set_system_flag(
                    if negative { SystemFlag::InfiniteResultNegative } else { SystemFlag::InfiniteResult },
                    true,
                );
            }
            Ok(ExponentOutcome::Saturated { negative, infinite })
        }
        Magnitude::PositiveUnderflow | Magnitude::NegativeUnderflow => {
            if flags.system_flag(SystemFlag::UnderflowError) {
                return Err(if matches!(magnitude, Magnitude::PositiveUnderflow) {
                    ErrorKind::PositiveNumericalUnderflow
                } else {
                    ErrorKind::NegativeNumericalUnderflow
                });
            }
            flags.set_system_flag(
                if matches!(magnitude, Magnitude::PositiveUnderflow) {
                    SystemFlag::PositiveUnderflowIndicator
                } else {
                    SystemFlag::NegativeUnderflowIndicator
                },
                true,
            );
            Ok(ExponentOutcome::Saturated { negative, infinite: false })
        }
    }
}

/// Division by zero routes through the same tree with `InfinityValue` (not
/// `OverflowError`) as the governing flag for the opposite pole.
pub fn check_division_by_zero(negative: bool, flags: &mut Flags) -> Result<ExponentOutcome, ErrorKind> {
    clear_report_flags(flags);
    if flags.system_flag(SystemFlag::InfinityValue) {
        flags.set_system_flag(
            if negative { SystemFlag::InfiniteResultNegative } else { SystemFlag::InfiniteResult },
            true,
        );
        Ok(ExponentOutcome::Saturated { negative, infinite: true })
    } else {
        Err(ErrorKind::DivideByZero)
    }
}

fn clear_report_flags(flags: &mut Flags) {
    flags.set_system_flag(SystemFlag::PositiveUnderflowIndicator, false);
    flags.set_system_flag(SystemFlag::NegativeUnderflowIndicator, false);
    flags.set_system_flag(SystemFlag::InfiniteResult, false);
    flags.set_system_flag(SystemFlag::InfiniteResultNegative, false);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overflow_raises_when_the_error_flag_is_set() {
        let mut flags = Flags::new();
        flags.set_system_flag(SystemFlag::OverflowError, true);
        assert_eq!(check_exponent(10_000_000, 5_000_000, false, &mut flags), Err(ErrorKind::NumericalOverflow));
    }

    #[test]
    fn overflow_yields_infinity_when_the_infinity_flag_is_set() {
        let mut flags = Flags::new();
        flags.set_system_flag(SystemFlag::InfinityValue, true);
        let outcome = check_exponent(10_000_000, 5_000_000, true, &mut flags).unwrap();
        assert_eq!(outcome, ExponentOutcome::Saturated { negative: true, infinite: true });
        assert!(flags.system_flag(SystemFlag::InfiniteResultNegative));
    }

    #[test]
    fn overflow_saturates_when_neither_flag_is_set() {
        let mut flags = Flags::new();
        let outcome = check_exponent(10_000_000, 5_000_000, false, &mut flags).unwrap();
        assert_eq!(outcome, ExponentOutcome::Saturated { negative: false, infinite: false });
    }

    #[test]
    fn underflow_sets_the_matching_indicator() {
        let mut flags = Flags::new();
        let outcome = check_exponent(-10_000_000, 5_000_000, false, &mut flags).unwrap();
        assert_eq!(outcome, ExponentOutcome::Saturated { negative: false, infinite: false });
        assert!(flags.system_flag(SystemFlag::PositiveUnderflowIndicator));
    }

    #[test]
    fn division_by_zero_without_infinity_policy_is_an_error() {
        let mut flags = Flags::new();
        assert_eq!(check_division_by_zero(false, &mut flags), Err(ErrorKind::DivideByZero));
    }
}
