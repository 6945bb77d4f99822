//! A number paired with the unit it is measured in

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Div, Mul, Neg};
use std::str::FromStr;

use crate::error::{Result, UnitError};
use crate::format::{format_number, FormatOptions};

use super::scale_by_power_of_ten;
use super::unit::PrefixedUnit;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitExpression {
    value: f64,
    unit: PrefixedUnit,
}

impl UnitExpression {
    pub fn new(value: f64, unit: PrefixedUnit) -> Self {
        Self { value, unit }
    }

    pub fn dimensionless(value: f64) -> Self {
        Self::new(value, PrefixedUnit::dimensionless())
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> &PrefixedUnit {
        &self.unit
    }

    pub fn is_nan(&self) -> bool {
        self.value.is_nan()
    }

    /// The same quantity expressed in `target`
    pub fn derive(&self, target: &PrefixedUnit) -> Result<UnitExpression> {
        Ok(Self::new(self.convert_value(target)?, target.clone()))
    }

    /// The value this quantity has when expressed in `target`
    pub fn convert_value(&self, target: &PrefixedUnit) -> Result<f64> {
        if !self.unit.is_compatible(target) {
            return Err(UnitError::incompatible(&self.unit, target));
        }
        Ok(self.rescaled(target))
    }

    fn rescaled(&self, target: &PrefixedUnit) -> f64 {
        scale_by_power_of_ten(
            self.value,
            self.unit.premultiplier_exponent() - target.premultiplier_exponent(),
        )
    }

    pub fn multiply(&self, other: &UnitExpression) -> UnitExpression {
        Self::new(
            self.value * other.value,
            self.unit.multiply(&other.unit).simplify(),
        )
    }

    pub fn divide(&self, other: &UnitExpression) -> UnitExpression {
        Self::new(
            self.value / other.value,
            self.unit.divide(&other.unit).simplify(),
        )
    }

    /// Sum in this expression's unit; `other` is converted first
    pub fn add(&self, other: &UnitExpression) -> Result<UnitExpression> {
        let rhs = other.convert_value(&self.unit)?;
        Ok(Self::new(self.value + rhs, self.unit.clone()))
    }

    /// Difference in this expression's unit; `other` is converted first
    pub fn subtract(&self, other: &UnitExpression) -> Result<UnitExpression> {
        let rhs = other.convert_value(&self.unit)?;
        Ok(Self::new(self.value - rhs, self.unit.clone()))
    }

    pub fn scale(&self, factor: f64) -> UnitExpression {
        Self::new(self.value * factor, self.unit.clone())
    }

    pub fn negate(&self) -> UnitExpression {
        Self::new(-self.value, self.unit.clone())
    }

    pub fn abs(&self) -> UnitExpression {
        Self::new(self.value.abs(), self.unit.clone())
    }

    pub fn powi(&self, n: i32) -> UnitExpression {
        Self::new(self.value.powi(n), self.unit.power(n).simplify())
    }

    /// Re-express in the compatible unit that reads most naturally,
    /// e.g. `5000 nN` becomes `5 µN`
    pub fn derive_simple_form(&self) -> UnitExpression {
        let preferred = self.unit.preferred_compatible_unit(self.value);
        if preferred == self.unit {
            return self.clone();
        }
        Self::new(self.rescaled(&preferred), preferred)
    }

    pub fn format_with(&self, options: &FormatOptions) -> String {
        let number = format_number(self.value, options.significant_digits);
        let unit = self.unit.render(options.pretty);
        if unit.is_empty() {
            number
        } else {
            format!("{number} {unit}")
        }
    }

    pub fn to_pretty_string(&self) -> String {
        self.format_with(&FormatOptions::pretty())
    }
}

/// NaN equals NaN here; units must match exactly
impl PartialEq for UnitExpression {
    fn eq(&self, other: &Self) -> bool {
        let same_value =
            self.value == other.value || (self.value.is_nan() && other.value.is_nan());
        same_value && self.unit == other.unit
    }
}

impl fmt::Display for UnitExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with(&FormatOptions::default()))
    }
}

impl FromStr for UnitExpression {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse_expression(s)
    }
}

impl Mul for UnitExpression {
    type Output = UnitExpression;

    fn mul(self, rhs: UnitExpression) -> UnitExpression {
        self.multiply(&rhs)
    }
}

impl Mul<f64> for UnitExpression {
    type Output = UnitExpression;

    fn mul(self, rhs: f64) -> UnitExpression {
        self.scale(rhs)
    }
}

impl Div for UnitExpression {
    type Output = UnitExpression;

    fn div(self, rhs: UnitExpression) -> UnitExpression {
        self.divide(&rhs)
    }
}

impl Neg for UnitExpression {
    type Output = UnitExpression;

    fn neg(self) -> UnitExpression {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix::SiPrefix;
    use pretty_assertions::assert_eq;

    fn expr(value: f64, name: &str, prefix: SiPrefix) -> UnitExpression {
        UnitExpression::new(value, PrefixedUnit::simple(name, prefix))
    }

    #[test]
    fn test_simple_form() {
        let force = expr(5000.0, "N", SiPrefix::Nano);
        let simple = force.derive_simple_form();
        assert_eq!(simple, expr(5.0, "N", SiPrefix::Micro));
        assert_eq!(simple.to_string(), "5 µN");

        let small = expr(0.002, "m", SiPrefix::Empty).derive_simple_form();
        assert_eq!(small.to_string(), "2 mm");
    }

    #[test]
    fn test_simple_form_boundaries() {
        for value in [0.0, f64::NAN, 1e-13, 5.0] {
            let e = expr(value, "N", SiPrefix::Nano);
            assert_eq!(e.derive_simple_form(), e);
        }
    }

    #[test]
    fn test_simple_form_time() {
        let duration = UnitExpression::new(7200.0, PrefixedUnit::second(SiPrefix::Empty));
        let simple = duration.derive_simple_form();
        assert_eq!(simple.unit(), &PrefixedUnit::hour());
        assert!((simple.value() - 2.0).abs() < 1e-12);
        assert_eq!(simple.to_string(), "2 h");
    }

    #[test]
    fn test_add_and_subtract() {
        let a = expr(3.0, "m", SiPrefix::Empty);
        let b = expr(2.0, "m", SiPrefix::Empty);
        assert_eq!(a.add(&b), Ok(expr(5.0, "m", SiPrefix::Empty)));
        assert_eq!(a.subtract(&b), Ok(expr(1.0, "m", SiPrefix::Empty)));

        let km = expr(1.0, "m", SiPrefix::Kilo);
        assert_eq!(km.add(&expr(500.0, "m", SiPrefix::Empty)), Ok(expr(1.5, "m", SiPrefix::Kilo)));
    }

    #[test]
    fn test_add_incompatible() {
        let a = expr(3.0, "m", SiPrefix::Empty);
        let s = UnitExpression::new(2.0, PrefixedUnit::second(SiPrefix::Empty));
        assert!(matches!(a.add(&s), Err(UnitError::IncompatibleUnits { .. })));
        assert!(matches!(a.subtract(&s), Err(UnitError::IncompatibleUnits { .. })));
    }

    #[test]
    fn test_multiply_divide() {
        let force = expr(10.0, "N", SiPrefix::Empty);
        let length = expr(2.0, "m", SiPrefix::Empty);
        let pressure = force.divide(&length);
        assert_eq!(pressure.value(), 5.0);
        assert_eq!(pressure.to_string(), "5 N/m");

        let area = length.clone() * length.clone();
        assert_eq!(area.to_string(), "4 m^2");
        assert_eq!(area.to_pretty_string(), "4 m²");

        let ratio = length.clone() / length;
        assert_eq!(ratio.to_string(), "1");
        assert!(ratio.unit().is_dimensionless());
    }

    #[test]
    fn test_derive_conversion() {
        let km = expr(1.5, "m", SiPrefix::Kilo);
        let metres = km.derive(&PrefixedUnit::simple("m", SiPrefix::Empty));
        assert_eq!(metres.map(|e| e.value()), Ok(1500.0));

        let err = km.derive(&PrefixedUnit::hour());
        assert!(matches!(err, Err(UnitError::IncompatibleUnits { .. })));

        let minutes = UnitExpression::new(90.0, PrefixedUnit::minute());
        let hours = minutes.convert_value(&PrefixedUnit::hour());
        assert!(hours.is_ok_and(|h| (h - 1.5).abs() < 1e-12));
    }

    #[test]
    fn test_nan_equality() {
        let a = expr(f64::NAN, "m", SiPrefix::Empty);
        let b = expr(f64::NAN, "m", SiPrefix::Empty);
        assert_eq!(a, b);
        assert!(a.is_nan());
        assert_ne!(a, expr(f64::NAN, "m", SiPrefix::Kilo));
    }

    #[test]
    fn test_unary_helpers() {
        let e = expr(-4.0, "V", SiPrefix::Milli);
        assert_eq!(e.abs().value(), 4.0);
        assert_eq!((-e.clone()).value(), 4.0);
        assert_eq!((e.clone() * 2.0).value(), -8.0);
        let squared = e.powi(2);
        assert_eq!(squared.value(), 16.0);
        assert_eq!(squared.unit().to_string(), "mV^2");
    }

    #[test]
    fn test_format_with() {
        let e = expr(1.0 / 3.0, "s", SiPrefix::Micro);
        assert_eq!(e.to_string(), "0.333333 µs");
        let opts = FormatOptions {
            significant_digits: 3,
            pretty: false,
        };
        assert_eq!(e.format_with(&opts), "0.333 µs");
        assert_eq!(UnitExpression::dimensionless(2.5).to_string(), "2.5");
    }
}
