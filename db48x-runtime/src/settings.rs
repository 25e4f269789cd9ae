//! Display, numeric, and evaluation settings (spec.md §3.4, §6.2): every
//! setting is a first-class command that reads the stack to set itself or
//! recalls its current value, and `purge(name)` resets one setting back to
//! its documented default.

use alloc::{
    string::{
        String,
        ToString,
    },
    vec::Vec,
};
use db48x_numeric::AngleUnit;
use db48x_object::ErrorKind;

use crate::error_handler::ErrorAction;

/// How results are rendered on the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// `Std`: the shortest round-tripping representation.
    Standard,
    /// `Fix`: a fixed number of digits after the radix point.
    Fixed(u32),
    /// `Sci`: scientific notation with the given significant digits.
    Scientific(u32),
    /// `Eng`: engineering notation (exponent a multiple of 3).
    Engineering(u32),
}

/// How fractions are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum FractionDisplay {
    /// `p/q` with `p` possibly larger than `q`.
    #[strum(to_string = "ImproperFractions")]
    Improper,
    /// `n p/q` with `0 <= p < q`.
    #[strum(to_string = "MixedFractions")]
    Mixed,
    /// Mixed, preferring the smallest denominator that fits the display.
    #[strum(to_string = "SmallFractions")]
    Small,
    /// Mixed, preferring the largest denominator precision allows.
    #[strum(to_string = "BigFractions")]
    Big,
}

/// Which digit-group separator glyph is used on output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberSeparator {
    /// A thin space between digit groups.
    Spaces,
    /// A comma, with `.` reserved for the radix point.
    DotOrComma,
    /// A tick mark (`'`).
    Ticks,
    /// An underscore.
    Underscore,
}

/// Which character is the radix point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RadixCharacter {
    /// `.`
    Dot,
    /// `,`
    Comma,
}

/// Subscript- vs. suffix-style rendering of based numbers (`#1A3h` vs
/// `1A3₁₆`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasedNumberStyle {
    /// The classic HP `#...h`/`#...d`/... suffix form.
    Compatible,
    /// The subscript-base form.
    Modern,
}

/// The full set of display, numeric, and evaluation settings (spec.md
/// §6.2). Every field has a documented default; `purge` resets one field
/// at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `AngleUnits`.
    pub angle_units: AngleUnit,
    /// `SetAngleUnits`/`NoAngleUnits`.
    pub inverse_trig_tags_unit: bool,
    /// `Precision`.
    pub precision: u32,
    /// `SignificantDigits`/`Sig`, `None` defers to `precision`.
    pub significant_digits: Option<u32>,
    /// `Fix`/`Sci`/`Eng`/`Std`.
    pub display_mode: DisplayMode,
    /// `FractionDisplay` and its `...Fractions` toggle aliases.
    pub fraction_display: FractionDisplay,
    /// `MantissaSpacing`.
    pub mantissa_spacing: u32,
    /// `FractionSpacing`.
    pub fraction_spacing: u32,
    /// `BasedSpacing`.
    pub based_spacing: u32,
    /// `NumberSpaces`/`NumberDotOrComma`/`NumberTicks`/`NumberUnderscore`.
    pub number_separator: NumberSeparator,
    /// `DecimalDot`/`DecimalComma`.
    pub radix_character: RadixCharacter,
    /// `Base`.
    pub base: u32,
    /// `WordSize`/`STWS`.
    pub word_size: u32,
    /// `CompatibleBasedNumbers`/`ModernBasedNumbers`.
    pub based_number_style: BasedNumberStyle,
    /// `AutoSimplify`/`NoAutoSimplify`.
    pub auto_simplify: bool,
    /// `NumericalResults`/`SymbolicResults` (flag `-3`).
    pub numerical_results: bool,
    /// `NumericalConstants`/`SymbolicConstants` (flag `-2`).
    pub numerical_constants: bool,
    /// `InfinityValue`/`InfinityError` (flag `-22`).
    pub infinity_value: bool,
    /// `UnderflowError` (flag `-20`).
    pub underflow_error: bool,
    /// `OverflowError` (flag `-21`).
    pub overflow_error: bool,
    /// `MaximumDecimalExponent`.
    pub maximum_decimal_exponent: i64,
    /// `DebugOnError`/`KillOnError`.
    pub error_action: ErrorAction,
    /// `NumberedVariables`/`NoNumberedVariables`.
    pub numbered_variables: bool,
    /// `HardFP`/`SoftFP`.
    pub hard_fp: bool,
    /// `SingleLineResult`/`MultiLineResult`.
    pub single_line_result: bool,
    /// `HorizontalVectors`/`VerticalVectors`.
    pub horizontal_vectors: bool,
    /// `HorizontalLists`/`VerticalLists`.
    pub horizontal_lists: bool,
    /// `GraphicStackDisplay`.
    pub graphic_stack_display: bool,
    /// `GraphicResultDisplay`.
    pub graphic_result_display: bool,
    /// `PlotAxes`/`NoPlotAxes`.
    pub plot_axes: bool,
    /// `CurveFilling`/`NoCurveFilling`.
    pub curve_filling: bool,
    /// `FancyExponent`/`ClassicExponent`.
    pub fancy_exponent: bool,
    /// `TrailingDecimal`/`NoTrailingDecimal`.
    pub trailing_decimal: bool,
    /// `PushEvaluatedAssignment`.
    pub push_evaluated_assignment: bool,
    /// `ExplicitWildcards`.
    pub explicit_wildcards: bool,
    /// `FinalAlgebraResults`/`StepByStepAlgebraResults`.
    pub final_algebra_results: bool,
    /// `IntegrationImprecision`.
    pub integration_imprecision: u32,
    /// `IntegrationIterations`.
    pub integration_iterations: u32,
    /// `TruthLogicForIntegers`.
    pub truth_logic_for_integers: bool,
    /// `ZeroPowerZeroIsUndefined`/`ZeroPowerZeroIsOne`.
    pub zero_power_zero_is_one: bool,
    /// `UnitsSIPrefixCycle`.
    pub units_si_prefix_cycle: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            angle_units: AngleUnit::Degrees,
            inverse_trig_tags_unit: false,
            precision: 24,
            significant_digits: None,
            display_mode: DisplayMode::Standard,
            fraction_display: FractionDisplay::Mixed,
            mantissa_spacing: 3,
            fraction_spacing: 5,
            based_spacing: 4,
            number_separator: NumberSeparator::Spaces,
            radix_character: RadixCharacter::Dot,
            base: 16,
            word_size: 64,
            based_number_style: BasedNumberStyle::Modern,
            auto_simplify: true,
            numerical_results: true,
            numerical_constants: true,
            infinity_value: true,
            underflow_error: false,
            overflow_error: false,
            maximum_decimal_exponent: 499,
            error_action: ErrorAction::Report,
            numbered_variables: false,
            hard_fp: false,
            single_line_result: true,
            horizontal_vectors: true,
            horizontal_lists: true,
            graphic_stack_display: false,
            graphic_result_display: false,
            plot_axes: true,
            curve_filling: false,
            fancy_exponent: true,
            trailing_decimal: true,
            push_evaluated_assignment: false,
            explicit_wildcards: false,
            final_algebra_results: true,
            integration_imprecision: 6,
            integration_iterations: 20,
            truth_logic_for_integers: false,
            zero_power_zero_is_one: true,
            units_si_prefix_cycle: "pnum kMGT".to_string(),
        }
    }
}

impl Settings {
    /// `purge(name)`: reset the named setting to its documented default.
    pub fn purge(&mut self, name: &str) -> Result<(), ErrorKind> {
        let default = Settings::default();
        match name {
            "AngleUnits" => self.angle_units = default.angle_units,
            "SetAngleUnits" | "NoAngleUnits" => self.inverse_trig_tags_unit = default.inverse_trig_tags_unit,
            "Precision" => self.precision = default.precision,
            "SignificantDigits" | "Sig" => self.significant_digits = default.significant_digits,
            "Fix" | "Sci" | "Eng" | "Std" => self.display_mode = default.display_mode,
            "FractionDisplay" | "BigFractions" | "SmallFractions" | "MixedFractions" | "ImproperFractions" => {
                self.fraction_display = default.fraction_display
            }
            "MantissaSpacing" => self.mantissa_spacing = default.mantissa_spacing,
            "FractionSpacing" => self.fraction_spacing = default.fraction_spacing,
            "BasedSpacing" => self.based_spacing = default.based_spacing,
            "NumberSpaces" | "NumberDotOrComma" | "NumberTicks" | "NumberUnderscore" => {
                self.number_separator = default.number_separator
            }
            "DecimalDot" | "DecimalComma" => self.radix_character = default.radix_character,
            "Base" => self.base = default.base,
            "WordSize" | "STWS" => self.word_size = default.word_size,
            "CompatibleBasedNumbers" | "ModernBasedNumbers" => self.based_number_style = default.based_number_style,
            "AutoSimplify" | "NoAutoSimplify" => self.auto_simplify = default.auto_simplify,
            "NumericalResults" | "SymbolicResults" => self.numerical_results = default.numerical_results,
            "NumericalConstants" | "SymbolicConstants" => self.numerical_constants = default.numerical_constants,
            "InfinityValue" | "InfinityError" => self.infinity_value = default.infinity_value,
            "UnderflowError" => self.underflow_error = default.underflow_error,
            "OverflowError" => self.overflow_error = default.overflow_error,
            "MaximumDecimalExponent" => self.maximum_decimal_exponent = default.maximum_decimal_exponent,
            "DebugOnError" | "KillOnError" => self.error_action = default.error_action,
            "NumberedVariables" | "NoNumberedVariables" => self.numbered_variables = default.numbered_variables,
            "HardFP" | "SoftFP" => self.hard_fp = default.hard_fp,
            "SingleLineResult" | "MultiLineResult" => self.single_line_result = default.single_line_result,
            "HorizontalVectors" | "VerticalVectors" => self.horizontal_vectors = default.horizontal_vectors,
            "HorizontalLists" | "VerticalLists" => self.horizontal_lists = default.horizontal_lists,
            "GraphicStackDisplay" => self.graphic_stack_display = default.graphic_stack_display,
            "GraphicResultDisplay" => self.graphic_result_display = default.graphic_result_display,
            "PlotAxes" | "NoPlotAxes" => self.plot_axes = default.plot_axes,
            "CurveFilling" | "NoCurveFilling" => self.curve_filling = default.curve_filling,
            "FancyExponent" | "ClassicExponent" => self.fancy_exponent = default.fancy_exponent,
            "TrailingDecimal" | "NoTrailingDecimal" => self.trailing_decimal = default.trailing_decimal,
            "PushEvaluatedAssignment" => self.push_evaluated_assignment = default.push_evaluated_assignment,
            "ExplicitWildcards" => self.explicit_wildcards = default.explicit_wildcards,
            "FinalAlgebraResults" | "StepByStepAlgebraResults" => self.final_algebra_results = default.final_algebra_results,
            "IntegrationImprecision" => self.integration_imprecision = default.integration_imprecision,
            "IntegrationIterations" => self.integration_iterations = default.integration_iterations,
            "TruthLogicForIntegers" => self.truth_logic_for_integers = default.truth_logic_for_integers,
            "ZeroPowerZeroIsUndefined" | "ZeroPowerZeroIsOne" => self.zero_power_zero_is_one = default.zero_power_zero_is_one,
            "UnitsSIPrefixCycle" => self.units_si_prefix_cycle = default.units_si_prefix_cycle,
            _ => return Err(ErrorKind::InvalidName),
        }
        Ok(())
    }

    /// `Modes`: the command tokens that would reproduce every setting
    /// currently holding a non-default value, in field-declaration order.
    pub fn modes_program(&self) -> Vec<String> {
        let default = Settings::default();
        let mut tokens = Vec::new();
        if self.angle_units != default.angle_units {
            tokens.push(angle_units_token(self.angle_units).to_string());
        }
        if self.precision != default.precision {
            tokens.push(alloc::format!("{} Precision", self.precision));
        }
        if self.display_mode != default.display_mode {
            tokens.push(display_mode_token(self.display_mode));
        }
        if self.fraction_display != default.fraction_display {
            tokens.push(self.fraction_display.to_string());
        }
        if self.base != default.base {
            tokens.push(alloc::format!("{} Base", self.base));
        }
        if self.word_size != default.word_size {
            tokens.push(alloc::format!("{} WordSize", self.word_size));
        }
        if self.auto_simplify != default.auto_simplify {
            tokens.push(if self.auto_simplify { "AutoSimplify" } else { "NoAutoSimplify" }.to_string());
        }
        if self.numerical_results != default.numerical_results {
            tokens.push(if self.numerical_results { "NumericalResults" } else { "SymbolicResults" }.to_string());
        }
        tokens
    }
}

fn angle_units_token(unit: AngleUnit) -> &'static str {
    match unit {
        AngleUnit::Degrees => "Deg",
        AngleUnit::Radians => "Rad",
        AngleUnit::Gradians => "Grad",
        AngleUnit::PiRadians => "PiRadians",
    }
}

fn display_mode_token(mode: DisplayMode) -> String {
    match mode {
        DisplayMode::Standard => "Std".to_string(),
        DisplayMode::Fixed(n) => alloc::format!("{n} Fix"),
        DisplayMode::Scientific(n) => alloc::format!("{n} Sci"),
        DisplayMode::Engineering(n) => alloc::format!("{n} Eng"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_documented_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.precision, 24);
        assert!(settings.auto_simplify);
        assert_eq!(settings.angle_units, AngleUnit::Degrees);
    }

    #[test]
    fn purge_resets_a_changed_setting() {
        let mut settings = Settings::default();
        settings.precision = 10;
        settings.purge("Precision").unwrap();
        assert_eq!(settings.precision, 24);
    }

    #[test]
    fn purge_of_an_unknown_name_is_invalid_name() {
        let mut settings = Settings::default();
        assert_eq!(settings.purge("NotASetting"), Err(ErrorKind::InvalidName));
    }

    #[test]
    fn modes_program_is_empty_at_defaults() {
        assert!(Settings::default().modes_program().is_empty());
    }

    #[test]
    fn modes_program_reports_non_default_settings() {
        let mut settings = Settings::default();
        settings.precision = 12;
        settings.auto_simplify = false;
        let tokens = settings.modes_program();
        assert!(tokens.contains(&"12 Precision".to_string()));
        assert!(tokens.contains(&"NoAutoSimplify".to_string()));
    }
}
