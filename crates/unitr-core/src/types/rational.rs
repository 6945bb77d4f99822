//! Rational units: a numerator and a denominator kept apart for "A/B" display
//!
//! All algebra goes through the composite form `numerator · denominator⁻¹`;
//! results are split back into positive and negative exponent terms.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dimension::DimensionVector;
use crate::format::format_fraction;

use super::composite::CompositeUnit;
use super::term::UnitTerm;
use super::unit::PrefixedUnit;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RationalUnit {
    numerator: CompositeUnit,
    /// Stored with positive exponents
    denominator: CompositeUnit,
}

impl RationalUnit {
    pub fn new(numerator: CompositeUnit, denominator: CompositeUnit) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Numerator and denominator each simplified on their own
    pub fn from_terms(
        numerator: impl IntoIterator<Item = UnitTerm>,
        denominator: impl IntoIterator<Item = UnitTerm>,
    ) -> Self {
        Self::new(
            CompositeUnit::from_terms(numerator, true),
            CompositeUnit::from_terms(denominator, true),
        )
    }

    /// Split a composite into positive and negative exponent terms
    pub fn from_composite(unit: &CompositeUnit) -> Self {
        Self::new(unit.numerator(), unit.denominator())
    }

    pub fn numerator(&self) -> &CompositeUnit {
        &self.numerator
    }

    pub fn denominator(&self) -> &CompositeUnit {
        &self.denominator
    }

    /// `numerator · denominator⁻¹`, simplified
    pub fn to_composite(&self) -> CompositeUnit {
        self.numerator.divide(&self.denominator)
    }

    pub fn multiply(&self, other: &CompositeUnit) -> RationalUnit {
        Self::from_composite(&self.to_composite().multiply(other))
    }

    pub fn divide(&self, other: &CompositeUnit) -> RationalUnit {
        Self::from_composite(&self.to_composite().divide(other))
    }

    pub fn power(&self, n: i32) -> RationalUnit {
        Self::from_composite(&self.to_composite().power(n))
    }

    /// Simplify and degrade to the smallest variant: a single term becomes
    /// an atomic unit, an empty denominator a plain composite.
    pub fn simplify(&self) -> PrefixedUnit {
        let composite = self.to_composite();
        if let Some(term) = composite.single_term() {
            return PrefixedUnit::Atomic(term.clone());
        }
        if composite.denominator_terms().next().is_none() {
            return PrefixedUnit::Composite(composite);
        }
        PrefixedUnit::Rational(Self::from_composite(&composite))
    }

    pub fn dimension(&self) -> DimensionVector {
        self.numerator
            .dimension()
            .divide(&self.denominator.dimension())
    }

    pub fn premultiplier_exponent(&self) -> f64 {
        self.numerator.premultiplier_exponent() - self.denominator.premultiplier_exponent()
    }

    pub fn next(&self) -> Option<RationalUnit> {
        self.shifted(3)
    }

    pub fn previous(&self) -> Option<RationalUnit> {
        self.shifted(-3)
    }

    fn shifted(&self, delta: i32) -> Option<RationalUnit> {
        let composite = self.to_composite();
        composite
            .change_prefixes(delta, true)
            .or_else(|| composite.change_prefixes(delta, false))
            .map(|c| Self::from_composite(&c))
    }

    pub fn derive_units(&self, min_delta: i32, max_delta: i32) -> Vec<RationalUnit> {
        self.to_composite()
            .derive_units(min_delta, max_delta)
            .iter()
            .map(Self::from_composite)
            .collect()
    }

    pub fn preferred_compatible_unit(&self, value: f64) -> RationalUnit {
        Self::from_composite(&self.to_composite().preferred_compatible_unit(value))
    }

    pub fn render(&self, pretty: bool) -> String {
        let render_side = |side: &CompositeUnit| -> Vec<String> {
            side.terms()
                .map(|t| t.render(t.exponent(), pretty))
                .collect()
        };
        format_fraction(&render_side(&self.numerator), &render_side(&self.denominator))
    }

    pub fn to_pretty_string(&self) -> String {
        self.render(true)
    }
}

impl fmt::Display for RationalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefix::SiPrefix;
    use pretty_assertions::assert_eq;

    fn term(name: &str, prefix: SiPrefix) -> UnitTerm {
        UnitTerm::new(name, prefix)
    }

    fn rational(num: &[UnitTerm], den: &[UnitTerm]) -> RationalUnit {
        RationalUnit::from_terms(num.iter().cloned(), den.iter().cloned())
    }

    #[test]
    fn test_display() {
        let u = rational(&[term("m", SiPrefix::Micro)], &[term("V", SiPrefix::Empty)]);
        assert_eq!(u.to_string(), "µm/V");

        let u = rational(
            &[term("m", SiPrefix::Empty), term("N", SiPrefix::Empty)],
            &[term("s", SiPrefix::Empty)],
        );
        assert_eq!(u.to_string(), "(m N)/s");

        let u = rational(&[], &[term("s", SiPrefix::Empty)]);
        assert_eq!(u.to_string(), "1/s");
    }

    #[test]
    fn test_algebra_resplits() {
        let speed = rational(&[term("m", SiPrefix::Empty)], &[term("s", SiPrefix::Empty)]);
        let per_second = CompositeUnit::from_term(term("s", SiPrefix::Empty).power(-1));

        let acceleration = speed.multiply(&per_second);
        assert_eq!(acceleration.to_string(), "m/s^2");

        let distance = speed.multiply(&CompositeUnit::from_term(term("s", SiPrefix::Empty)));
        assert_eq!(distance.to_string(), "m");
        assert!(distance.denominator().is_identity());

        assert_eq!(speed.power(-1).to_string(), "s/m");
        assert_eq!(speed.power(2).to_string(), "m^2/s^2");
    }

    #[test]
    fn test_simplify_degrades_variants() {
        let single = rational(
            &[term("N", SiPrefix::Empty), term("m", SiPrefix::Empty)],
            &[term("m", SiPrefix::Empty)],
        );
        assert_eq!(single.simplify(), PrefixedUnit::Atomic(term("N", SiPrefix::Empty)));

        let plain = rational(&[term("N", SiPrefix::Empty), term("m", SiPrefix::Empty)], &[]);
        assert!(matches!(plain.simplify(), PrefixedUnit::Composite(_)));

        let stays = rational(&[term("N", SiPrefix::Empty)], &[term("m", SiPrefix::Empty)]);
        assert_eq!(stays.simplify(), PrefixedUnit::Rational(stays.clone()));
    }

    #[test]
    fn test_dimension_and_premultiplier() {
        let u = rational(&[term("m", SiPrefix::Kilo)], &[term("h", SiPrefix::Empty)]);
        let expected = DimensionVector::from_elements([
            crate::dimension::DimensionElement::new("m", 1),
            crate::dimension::DimensionElement::new("s", -1),
        ]);
        assert_eq!(u.dimension(), expected);
        assert!((u.premultiplier_exponent() - (3.0 - 3600f64.log10())).abs() < 1e-12);
    }

    #[test]
    fn test_navigation_prefers_numerator() {
        let u = rational(&[term("N", SiPrefix::Empty)], &[term("m", SiPrefix::Empty)]);
        assert_eq!(u.next().map(|r| r.to_string()), Some("kN/m".to_string()));
        assert_eq!(u.previous().map(|r| r.to_string()), Some("mN/m".to_string()));
    }

    #[test]
    fn test_preferred_compatible_unit() {
        let u = rational(&[term("m", SiPrefix::Micro)], &[term("V", SiPrefix::Empty)]);
        assert_eq!(u.preferred_compatible_unit(5000.0).to_string(), "mm/V");
        assert_eq!(u.preferred_compatible_unit(f64::NAN), u);
    }
}
