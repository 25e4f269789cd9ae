//! Calendar dates (spec.md §4.3.9): a `(year, month, day)` triple with an
//! optional fractional time of day, backed by `chrono` for calendar
//! arithmetic (leap years, month lengths) rather than a hand-rolled
//! civil-calendar algorithm.

use crate::fraction::Fraction;
use crate::integer::Integer;
use chrono::{
    Datelike,
    Duration,
    NaiveDate,
};
use db48x_object::ErrorKind;

/// A calendar date with no time-of-day component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Date(NaiveDate);

impl Date {
    /// Build a date, rejecting an invalid `(y, m, d)` combination.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, ErrorKind> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(ErrorKind::BadArgumentValue)
    }

    /// The year.
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// The month, `1..=12`.
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// The day of month, `1..=31`.
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// `DDays`: the signed day difference `self - other`.
    pub fn ddays(&self, other: &Self) -> Integer {
        let days = (self.0 - other.0).num_days();
        Integer::from_i64(days)
    }

    /// `self + days`, normalizing across month/year boundaries.
    pub fn add_days(&self, days: &Integer) -> Result<Self, ErrorKind> {
        let delta = days.to_i64().ok_or(ErrorKind::BadArgumentValue)?;
        self.0
            .checked_add_signed(Duration::days(delta))
            .map(Date)
            .ok_or(ErrorKind::BadArgumentValue)
    }
}

/// A date with an exact fractional time of day (`0 <= fraction < 1`,
/// where `1` is a full day), so that hours/minutes/seconds recovered from
/// it via [`crate::dms::Sexagesimal`] are exact rather than
/// floating-point approximations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTime {
    date: Date,
    fractional_day: Fraction,
}

impl DateTime {
    /// Build from a date and a fractional time of day.
    pub fn new(date: Date, fractional_day: Fraction) -> Self {
        DateTime { date, fractional_day }
    }

    /// The date component.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The fractional time-of-day component.
    pub fn fractional_day(&self) -> &Fraction {
        &self.fractional_day
    }

    /// `self - other`, yielding a quantity in days including the
    /// fractional time-of-day difference.
    pub fn sub(&self, other: &Self) -> Fraction {
        let whole_days = self.date.ddays(&other.date);
        Fraction::from_integer(whole_days).add(&self.fractional_day.sub(&other.fractional_day))
    }

    /// `self + duration_in_days`, carrying whole-day overflow from the
    /// fractional part into the date so the result is always a valid,
    /// normalized date/time pair.
    pub fn add_duration(&self, duration_in_days: &Fraction) -> Result<Self, ErrorKind> {
        let total = self.fractional_day.add(duration_in_days);
        let whole_days = floor_div(&total);
        let remainder = total.sub(&Fraction::from_integer(whole_days.clone()));
        let new_date = self.date.add_days(&whole_days)?;
        Ok(DateTime {
            date: new_date,
            fractional_day: remainder,
        })
    }
}

fn floor_div(value: &Fraction) -> Integer {
    let num = value.numerator();
    let den = value.denominator();
    let (q, _) = num_integer::Integer::div_mod_floor(num.as_bigint(), den.as_bigint());
    Integer::from_bigint(q)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_an_invalid_calendar_date() {
        assert_eq!(Date::new(2026, 2, 30), Err(ErrorKind::BadArgumentValue));
    }

    #[test]
    fn ddays_is_the_signed_day_difference() {
        let a = Date::new(2026, 7, 26).unwrap();
        let b = Date::new(2026, 7, 1).unwrap();
        assert_eq!(a.ddays(&b), Integer::from_i64(25));
        assert_eq!(b.ddays(&a), Integer::from_i64(-25));
    }

    #[test]
    fn adding_days_normalizes_across_a_month_boundary() {
        let a = Date::new(2026, 1, 30).unwrap();
        let sum = a.add_days(&Integer::from_i64(5)).unwrap();
        assert_eq!((sum.year(), sum.month(), sum.day()), (2026, 2, 4));
    }

    #[test]
    fn datetime_subtraction_includes_the_fractional_day() {
        let d1 = Date::new(2026, 7, 2).unwrap();
        let d2 = Date::new(2026, 7, 1).unwrap();
        let half = Fraction::checked_new(Integer::from_i64(1), Integer::from_i64(2)).unwrap();
        let zero = Fraction::from_integer(Integer::from_i64(0));
        let dt1 = DateTime::new(d1, half.clone());
        let dt2 = DateTime::new(d2, zero);
        let diff = dt1.sub(&dt2);
        assert_eq!(diff, Fraction::checked_new(Integer::from_i64(3), Integer::from_i64(2)).unwrap());
    }
}
