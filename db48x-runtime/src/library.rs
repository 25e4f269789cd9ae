//! Library tables (spec.md §4.9): named physical/mathematical constants
//! (with their known uncertainty), named equations, and attachable
//! external command libraries (`xlibs`).

use alloc::string::{
    String,
    ToString,
};
use db48x_object::ErrorKind;
use hashbrown::HashMap;

/// A named constant and the uncertainty (if any) its defining measurement
/// carries, for uncertainty-aware display rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant<T> {
    /// The constant's value.
    pub value: T,
    /// The measurement uncertainty on `value`, if the constant is
    /// empirical rather than exact (e.g. the gravitational constant vs.
    /// the speed of light, which is exact by definition).
    pub uncertainty: Option<T>,
}

/// An attachable external command library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// The library's name, as `ATTACH`/`DETACH` address it.
    pub name: String,
    /// Whether the library's commands are currently reachable.
    pub active: bool,
}

/// The constants, equations, and attachable libraries known to the
/// runtime.
#[derive(Debug, Clone, Default)]
pub struct Library<T> {
    constants: HashMap<String, Constant<T>>,
    equations: HashMap<String, T>,
    xlibs: HashMap<String, Attachment>,
}

impl<T> Library<T> {
    /// An empty library table set.
    pub fn new() -> Self {
        Library {
            constants: HashMap::new(),
            equations: HashMap::new(),
            xlibs: HashMap::new(),
        }
    }

    /// Register a constant under `name`, overwriting any prior definition.
    pub fn define_constant(&mut self, name: &str, value: T, uncertainty: Option<T>) {
        self.constants.insert(name.to_string(), Constant { value, uncertainty });
    }

    /// Look up a constant by name.
    pub fn constant(&self, name: &str) -> Result<&Constant<T>, ErrorKind> {
        self.constants.get(name).ok_or(ErrorKind::InvalidOrUnknownConstant)
    }

    /// Register a named equation, overwriting any prior definition.
    pub fn define_equation(&mut self, name: &str, expression: T) {
        self.equations.insert(name.to_string(), expression);
    }

    /// Look up a named equation.
    pub fn equation(&self, name: &str) -> Result<&T, ErrorKind> {
        self.equations.get(name).ok_or(ErrorKind::InvalidOrUnknownLibraryEntry)
    }

    /// Register an attachable library, inactive until `attach`ed.
    pub fn register_xlib(&mut self, name: &str) {
        self.xlibs.insert(
            name.to_string(),
            Attachment {
                name: name.to_string(),
                active: false,
            },
        );
    }

    /// `ATTACH`: make a registered library's commands reachable.
    pub fn attach(&mut self, name: &str) -> Result<(), ErrorKind> {
        let entry = self.xlibs.get_mut(name).ok_or(ErrorKind::InvalidOrUnknownLibraryEntry)?;
        entry.active = true;
        Ok(())
    }

    /// `DETACH`: make a library's commands unreachable again.
    pub fn detach(&mut self, name: &str) -> Result<(), ErrorKind> {
        let entry = self.xlibs.get_mut(name).ok_or(ErrorKind::InvalidOrUnknownLibraryEntry)?;
        entry.active = false;
        Ok(())
    }

    /// Whether `name` is a registered, currently attached library.
    pub fn is_attached(&self, name: &str) -> bool {
        self.xlibs.get(name).is_some_and(|entry| entry.active)
    }
}

impl<T> Constant<T> {
    /// An exact constant with no measurement uncertainty.
    pub fn exact(value: T) -> Self {
        Constant { value, uncertainty: None }
    }
}

/// Round `value` to the number of significant decimal digits implied by
/// its uncertainty's leading digit, the convention used when displaying an
/// empirical physical constant (e.g. `6.674e-11 ± 0.000_15e-11` displays
/// as `6.674e-11`, not with spurious extra digits).
pub fn round_to_uncertainty(value: f64, uncertainty: f64) -> f64 {
    if uncertainty <= 0.0 || !uncertainty.is_finite() {
        return value;
    }
    let exponent = libm::floor(libm::log10(uncertainty));
    let scale = libm::pow(10.0, -exponent);
    libm::round(value * scale) / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_lookup_reports_invalid_or_unknown_constant() {
        let lib: Library<f64> = Library::new();
        assert_eq!(lib.constant("c"), Err(ErrorKind::InvalidOrUnknownConstant));
    }

    #[test]
    fn define_then_recall_a_constant() {
        let mut lib: Library<f64> = Library::new();
        lib.define_constant("c", 299_792_458.0, None);
        assert_eq!(lib.constant("c").unwrap().value, 299_792_458.0);
    }

    #[test]
    fn attach_then_detach_toggles_reachability() {
        let mut lib: Library<f64> = Library::new();
        lib.register_xlib("STATS");
        assert!(!lib.is_attached("STATS"));
        lib.attach("STATS").unwrap();
        assert!(lib.is_attached("STATS"));
        lib.detach("STATS").unwrap();
        assert!(!lib.is_attached("STATS"));
    }

    #[test]
    fn attach_of_an_unregistered_library_is_invalid_or_unknown() {
        let mut lib: Library<f64> = Library::new();
        assert_eq!(lib.attach("NOPE"), Err(ErrorKind::InvalidOrUnknownLibraryEntry));
    }

    #[test]
    fn round_to_uncertainty_matches_the_uncertaintys_precision() {
        let rounded = round_to_uncertainty(6.674_30, 0.000_15);
        assert!((rounded - 6.6743).abs() < 1e-9);
    }
}
