//! The concrete runtime value (spec.md §3.1, §4.2): a Rust enum unifying
//! every numeric kernel in `db48x-numeric` and every container in
//! `db48x-container` under one type, tagged by [`db48x_object::ObjectTag`].
//!
//! `db48x-arena`'s byte-level arena and mark-and-compact collector stay
//! available below this crate for a future archive/transfer format, but
//! the evaluator itself works this Rust-native tree directly — the same
//! relationship `fuel_tx::Transaction` has to the raw byte encoding
//! `fuel-asm` ultimately produces: one typed value the interpreter
//! manipulates, with a byte codec as a separable concern underneath it.

use alloc::{
    boxed::Box,
    string::String,
    vec::Vec,
};

use db48x_container::{
    Array,
    Directory,
    ExprNode,
    List,
    Polynomial,
    Program,
    Tag,
};
use db48x_numeric::{
    Complex,
    Date,
    DateTime,
    Decimal,
    Fraction,
    HwFloat,
    Integer,
    Range,
    Sexagesimal,
    Uncertain,
    Unit,
};
use db48x_object::{
    CommandId,
    ObjectTag,
};

/// A value assigned with `name=expr` (spec.md §4.5): preserved unevaluated
/// by default, or folded to its evaluated form under
/// `PushEvaluatedAssignment`.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// The bound name.
    pub name: String,
    /// The (possibly unevaluated) right-hand side.
    pub expr: Box<Object>,
}

/// A unit-carrying numeric value (spec.md §4.3.8): the numeric kernel's
/// `Unit` tracks value and dimension for arithmetic; `label` is the
/// symbolic unit expression the parser read and the renderer echoes back
/// (e.g. `"mm"`, `"m/s^2"`). Only single named-unit and named-unit-ratio
/// expressions are supported; a fuller multiply/divide/power sub-grammar
/// over compound unit expressions (spec.md §4.2's `UnitExpr`) is scoped
/// out here and tracked as an open item in this repository's design
/// ledger.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitValue {
    /// The value and its derived dimension/scale.
    pub unit: Unit,
    /// The unit expression as originally written, for display.
    pub label: String,
}

/// Which base-60 family a [`Sexagesimal`] payload belongs to — they share
/// one representation and arithmetic but render with different separators
/// (`°'"` for `Hms`, `:` for `Dms`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SexagesimalKind {
    /// An angle (degrees/minutes/seconds).
    Hms,
    /// A duration (hours/minutes/seconds).
    Dms,
}

/// Every RPL value the evaluator can push, store, or apply an operator to.
///
/// Large payloads are boxed so that the common numeric variants (the vast
/// majority of values that ever cross the data stack) stay small and the
/// enum itself does not balloon to its largest member's size.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    /// Exact integer or bignum (spec.md §4.3.1).
    Integer(Integer),
    /// Exact fraction in lowest terms (spec.md §4.3.2).
    Fraction(Fraction),
    /// Arbitrary-precision decimal (spec.md §4.3.3).
    Decimal(Decimal),
    /// IEEE hardware float or double (spec.md §4.3.5).
    HwFloat(HwFloat),
    /// Rectangular or polar complex (spec.md §4.3.6).
    Complex(Complex),
    /// An interval, delta, or percent range (spec.md §4.3.7).
    Range(Range),
    /// A measurement with standard uncertainty (spec.md §4.3.7).
    Uncertain(Uncertain),
    /// A value tagged with a unit expression (spec.md §4.3.8).
    Unit(Box<UnitValue>),
    /// A base-60 angle or duration (spec.md §4.3.9).
    Sexagesimal(SexagesimalKind, Sexagesimal),
    /// A calendar date, with or without a fractional time of day.
    Date(Date),
    /// A calendar date and fractional time of day.
    DateTime(Box<DateTime>),
    /// UTF-8 text.
    Text(db48x_container::Text),
    /// A bare name: pushed as-is when unbound, looked up and re-evaluated
    /// when a binding is found (spec.md §4.5).
    Symbol(String),
    /// A name bound in the innermost lexical frame rather than a
    /// directory (spec.md §4.5's `→` local binding).
    Local(String),
    /// `{ … }`.
    List(Box<List<Object>>),
    /// `[ … ]`, 1-D vector or 2-D matrix.
    Array(Box<Array<Object>>),
    /// `« … »`, a sequence of objects evaluated in stack-machine order.
    Program(Box<Program<Object>>),
    /// `' … '`, an algebraic expression tree.
    Expression(Box<ExprNode<Object>>),
    /// Packed monomial form (spec.md §4.3.10).
    Polynomial(Box<Polynomial<Object>>),
    /// `:label:obj`, possibly nested.
    Tag(Box<Tag<Object>>),
    /// `name=expr`.
    Assignment(Box<Assignment>),
    /// A built-in operator or function, carrying no payload beyond which
    /// one it is.
    Command(CommandId),
    /// A `Modes`-produced artifact or other settings snapshot: a label
    /// plus the inner object it describes.
    SettingsArtifact(Box<Tag<Object>>),
}

impl Object {
    /// The [`ObjectTag`] family this value belongs to, for `TVARS`,
    /// reserved-name checks, and error messages that name a type.
    pub fn tag(&self) -> ObjectTag {
        match self {
            Object::Integer(n) => {
                if n.signum() < 0 { ObjectTag::NegInteger } else { ObjectTag::Integer }
            }
            Object::Fraction(f) => {
                if f.numerator().signum() < 0 { ObjectTag::NegFraction } else { ObjectTag::Fraction }
            }
            Object::Decimal(d) => {
                if d.signum() < 0 { ObjectTag::NegDecimal } else { ObjectTag::Decimal }
            }
            Object::HwFloat(_) => ObjectTag::HwDouble,
            Object::Complex(Complex::Rectangular { .. }) => ObjectTag::Rectangular,
            Object::Complex(Complex::Polar { .. }) => ObjectTag::Polar,
            Object::Range(_) => ObjectTag::Range,
            Object::Uncertain(_) => ObjectTag::Uncertain,
            Object::Unit(_) => ObjectTag::Unit,
            Object::Sexagesimal(SexagesimalKind::Hms, _) => ObjectTag::Hms,
            Object::Sexagesimal(SexagesimalKind::Dms, _) => ObjectTag::Dms,
            Object::Date(_) | Object::DateTime(_) => ObjectTag::Date,
            Object::Text(_) => ObjectTag::Text,
            Object::Symbol(_) | Object::Local(_) => ObjectTag::Symbol,
            Object::List(_) => ObjectTag::List,
            Object::Array(_) => ObjectTag::Array,
            Object::Program(_) => ObjectTag::Program,
            Object::Expression(_) => ObjectTag::Expression,
            Object::Polynomial(_) => ObjectTag::Polynomial,
            Object::Tag(_) => ObjectTag::Tag,
            Object::Assignment(_) => ObjectTag::Assignment,
            Object::Command(id) => ObjectTag::Command(*id),
            Object::SettingsArtifact(_) => ObjectTag::SettingsArtifact,
        }
    }

    /// Whether this value evaluates to itself when pushed (numbers, text,
    /// commands carry no further reduction; everything else the evaluator
    /// treats specially — spec.md §4.5).
    pub fn is_self_evaluating(&self) -> bool {
        matches!(
            self,
            Object::Integer(_)
                | Object::Fraction(_)
                | Object::Decimal(_)
                | Object::HwFloat(_)
                | Object::Complex(_)
                | Object::Range(_)
                | Object::Uncertain(_)
                | Object::Unit(_)
                | Object::Sexagesimal(..)
                | Object::Date(_)
                | Object::DateTime(_)
                | Object::Text(_)
        )
    }

    /// `true` for the exact families (spec.md §4.3.2's exact/inexact
    /// coercion rule: combining exact with exact stays exact).
    pub fn is_exact(&self) -> bool {
        matches!(self, Object::Integer(_) | Object::Fraction(_))
    }

    /// A best-effort `f64` view, used by rendering, interval promotion,
    /// and the numeric solver. Returns `None` for non-numeric objects.
    pub fn to_f64_approx(&self) -> Option<f64> {
        match self {
            Object::Integer(n) => match n.to_i64() {
                Some(v) => Some(v as f64),
                None => n.to_decimal_string().parse::<f64>().ok(),
            },
            Object::Fraction(f) => Some(f.to_f64()),
            Object::Decimal(d) => Some(d.to_f64_approx()),
            Object::HwFloat(h) => Some(h.to_f64()),
            Object::Range(r) => Some(r.center()),
            Object::Uncertain(u) => Some(u.center()),
            Object::Unit(u) => Some(u.unit.value()),
            _ => None,
        }
    }

    /// A canonical short name for this value's family, used in error
    /// messages (`Bad argument type`) and `TVARS`'s semantic markers.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "integer",
            Object::Fraction(_) => "fraction",
            Object::Decimal(_) => "decimal",
            Object::HwFloat(_) => "real",
            Object::Complex(_) => "complex",
            Object::Range(_) => "range",
            Object::Uncertain(_) => "uncertain",
            Object::Unit(_) => "unit",
            Object::Sexagesimal(SexagesimalKind::Hms, _) => "hms",
            Object::Sexagesimal(SexagesimalKind::Dms, _) => "dms",
            Object::Date(_) => "date",
            Object::DateTime(_) => "date",
            Object::Text(_) => "text",
            Object::Symbol(_) => "symbol",
            Object::Local(_) => "local",
            Object::List(_) => "list",
            Object::Array(_) => "array",
            Object::Program(_) => "program",
            Object::Expression(_) => "expression",
            Object::Polynomial(_) => "polynomial",
            Object::Tag(_) => "tag",
            Object::Assignment(_) => "assignment",
            Object::Command(_) => "command",
            Object::SettingsArtifact(_) => "settings",
        }
    }

    /// Construct the integer `0`, the additive identity most callers reach
    /// for (auto-simplify, `Array::con`'s default fill, polynomial zero
    /// terms).
    pub fn zero() -> Self {
        Object::Integer(Integer::zero())
    }

    /// Construct the integer `1`, the multiplicative identity.
    pub fn one() -> Self {
        Object::Integer(Integer::from_i64(1))
    }

    /// `true` for an exact or inexact numeric zero, the shape
    /// auto-simplify's `X+0 → X`/`0·X → 0` rules key on.
    pub fn is_numeric_zero(&self) -> bool {
        match self {
            Object::Integer(n) => n.is_zero(),
            Object::Fraction(f) => f.is_zero(),
            Object::Decimal(d) => d.is_zero(),
            Object::HwFloat(h) => h.is_zero(),
            _ => false,
        }
    }

    /// `true` for the exact or inexact numeric `1`, the shape
    /// `1·X → X`/`X/1 → X` key on.
    pub fn is_numeric_one(&self) -> bool {
        match self {
            Object::Integer(n) => *n == Integer::from_i64(1),
            Object::Fraction(f) => f.numerator() == Integer::from_i64(1) && f.denominator() == Integer::from_i64(1),
            Object::Decimal(d) => *d == Decimal::from_i64(1),
            Object::HwFloat(h) => h.to_f64() == 1.0,
            _ => false,
        }
    }
}

/// The directory store keyed on [`Object`] values (spec.md §3.3, §4.6).
pub type ObjectDirectory = Directory<Object>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_tag_reflects_sign() {
        assert_eq!(Object::Integer(Integer::from_i64(5)).tag(), ObjectTag::Integer);
        assert_eq!(Object::Integer(Integer::from_i64(-5)).tag(), ObjectTag::NegInteger);
    }

    #[test]
    fn numbers_and_text_are_self_evaluating_but_symbols_are_not() {
        assert!(Object::Integer(Integer::zero()).is_self_evaluating());
        assert!(!Object::Symbol("x".into()).is_self_evaluating());
    }

    #[test]
    fn zero_and_one_round_trip_through_the_numeric_predicates() {
        assert!(Object::zero().is_numeric_zero());
        assert!(Object::one().is_numeric_one());
        assert!(!Object::one().is_numeric_zero());
    }
}
