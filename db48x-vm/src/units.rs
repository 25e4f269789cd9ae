//! The built-in unit table (spec.md §4.3.8, §4.9): symbolic unit names
//! resolved to a [`Dimension`] and a conversion factor/offset relative to
//! the SI base unit for that dimension. This is the data the parser's
//! `value_UnitExpr` literal and the `CONVERT`/`UBASE`/`UVAL` commands both
//! need, factored out the way `db48x-runtime::library`'s physical-constant
//! table is factored out from the evaluator that looks constants up.

use db48x_numeric::Dimension;
use db48x_object::ErrorKind;

use crate::object::{
    Object,
    UnitValue,
};

struct UnitEntry {
    name: &'static str,
    dimension: Dimension,
    scale_to_base: f64,
    affine_offset: f64,
}

fn table() -> [UnitEntry; 22] {
    [
        UnitEntry { name: "m", dimension: Dimension::length(), scale_to_base: 1.0, affine_offset: 0.0 },
        UnitEntry { name: "mm", dimension: Dimension::length(), scale_to_base: 1e-3, affine_offset: 0.0 },
        UnitEntry { name: "cm", dimension: Dimension::length(), scale_to_base: 1e-2, affine_offset: 0.0 },
        UnitEntry { name: "km", dimension: Dimension::length(), scale_to_base: 1e3, affine_offset: 0.0 },
        UnitEntry { name: "in", dimension: Dimension::length(), scale_to_base: 0.0254, affine_offset: 0.0 },
        UnitEntry { name: "ft", dimension: Dimension::length(), scale_to_base: 0.3048, affine_offset: 0.0 },
        UnitEntry { name: "yd", dimension: Dimension::length(), scale_to_base: 0.9144, affine_offset: 0.0 },
        UnitEntry { name: "mi", dimension: Dimension::length(), scale_to_base: 1609.344, affine_offset: 0.0 },
        UnitEntry { name: "s", dimension: Dimension::time(), scale_to_base: 1.0, affine_offset: 0.0 },
        UnitEntry { name: "ms", dimension: Dimension::time(), scale_to_base: 1e-3, affine_offset: 0.0 },
        UnitEntry { name: "min", dimension: Dimension::time(), scale_to_base: 60.0, affine_offset: 0.0 },
        UnitEntry { name: "h", dimension: Dimension::time(), scale_to_base: 3600.0, affine_offset: 0.0 },
        UnitEntry { name: "day", dimension: Dimension::time(), scale_to_base: 86_400.0, affine_offset: 0.0 },
        UnitEntry { name: "yr", dimension: Dimension::time(), scale_to_base: 31_557_600.0, affine_offset: 0.0 },
        UnitEntry { name: "K", dimension: Dimension::temperature(), scale_to_base: 1.0, affine_offset: 0.0 },
        UnitEntry { name: "degC", dimension: Dimension::temperature(), scale_to_base: 1.0, affine_offset: 273.15 },
        UnitEntry {
            name: "degF",
            dimension: Dimension::temperature(),
            scale_to_base: 5.0 / 9.0,
            affine_offset: 273.15 - 32.0 * (5.0 / 9.0),
        },
        UnitEntry { name: "rad", dimension: Dimension::angle(), scale_to_base: 1.0, affine_offset: 0.0 },
        UnitEntry {
            name: "deg",
            dimension: Dimension::angle(),
            scale_to_base: core::f64::consts::PI / 180.0,
            affine_offset: 0.0,
        },
        UnitEntry { name: "grad", dimension: Dimension::angle(), scale_to_base: core::f64::consts::PI / 200.0, affine_offset: 0.0 },
        UnitEntry {
            name: "turn",
            dimension: Dimension::angle(),
            scale_to_base: 2.0 * core::f64::consts::PI,
            affine_offset: 0.0,
        },
        UnitEntry { name: "1", dimension: Dimension::dimensionless(), scale_to_base: 1.0, affine_offset: 0.0 },
    ]
}

fn lookup(name: &str) -> Result<UnitEntry, ErrorKind> {
    table().into_iter().find(|entry| entry.name == name).ok_or(ErrorKind::UndefinedName)
}

/// Build a [`UnitValue`] for `number_` followed by the unit expression
/// `label`, supporting only a single named unit (no `×`/`÷`/`^` compound
/// expressions yet — see this crate's design ledger for the scope note).
pub fn with_label(number: Object, label: &str) -> Result<UnitValue, ErrorKind> {
    let entry = lookup(label)?;
    let value = number.to_f64_approx().ok_or(ErrorKind::BadArgumentType)?;
    let unit = if entry.affine_offset != 0.0 {
        db48x_numeric::Unit::affine_temperature(value, entry.scale_to_base, entry.affine_offset)
    } else {
        db48x_numeric::Unit::ratio(value, entry.dimension, entry.scale_to_base)
    };
    Ok(UnitValue { unit, label: label.into() })
}

/// `CONVERT`: re-express `value` in the unit named `target_label`.
pub fn convert(value: &UnitValue, target_label: &str) -> Result<UnitValue, ErrorKind> {
    let target = lookup(target_label)?;
    let converted = value.unit.convert_to(target.scale_to_base, target.affine_offset, target.dimension)?;
    let unit = if target.affine_offset != 0.0 {
        db48x_numeric::Unit::affine_temperature(converted, target.scale_to_base, target.affine_offset)
    } else {
        db48x_numeric::Unit::ratio(converted, target.dimension, target.scale_to_base)
    };
    Ok(UnitValue { unit, label: target_label.into() })
}

/// `UBASE`: re-express in the SI base unit for this dimension, stripping
/// any prefix or alternate unit.
pub fn ubase(value: &UnitValue) -> Result<UnitValue, ErrorKind> {
    let dimension = value.unit.dimension();
    let base_label = base_unit_label(dimension)?;
    convert(value, base_label)
}

/// `UVAL`: the bare numeric value, discarding the unit.
pub fn uval(value: &UnitValue) -> Object {
    Object::HwFloat(db48x_numeric::HwFloat::Double(value.unit.value()))
}

fn base_unit_label(dimension: Dimension) -> Result<&'static str, ErrorKind> {
    if dimension == Dimension::length() {
        Ok("m")
    } else if dimension == Dimension::time() {
        Ok("s")
    } else if dimension == Dimension::temperature() {
        Ok("K")
    } else if dimension == Dimension::angle() {
        Ok("rad")
    } else if dimension == Dimension::dimensionless() {
        Ok("1")
    } else {
        Err(ErrorKind::InconsistentUnits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use db48x_numeric::Integer;

    #[test]
    fn celsius_converts_to_fahrenheit() {
        let value = with_label(Object::Integer(Integer::from_i64(0)), "degC").unwrap();
        let converted = convert(&value, "degF").unwrap();
        assert!((converted.unit.value() - 32.0).abs() < 1e-9);
    }

    #[test]
    fn ubase_reduces_kilometers_to_meters() {
        let value = with_label(Object::Integer(Integer::from_i64(5)), "km").unwrap();
        let base = ubase(&value).unwrap();
        assert_eq!(base.unit.value(), 5000.0);
    }

    #[test]
    fn unknown_unit_name_is_undefined() {
        assert_eq!(lookup("bogus").err(), Some(ErrorKind::UndefinedName));
    }
}
