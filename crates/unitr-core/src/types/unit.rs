//! The closed set of unit shapes a value can carry
//!
//! Every operation pattern-matches on the variant; algebra that mixes
//! shapes goes through [`CompositeUnit`] and the result is put back into
//! the most specific shape with [`PrefixedUnit::simplify`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::dimension::DimensionVector;
use crate::error::{Direction, Result, UnitError};
use crate::prefix::SiPrefix;

use super::composite::CompositeUnit;
use super::power_of_ten;
use super::rational::RationalUnit;
use super::term::{SimpleUnit, UnitTerm};
use super::time::TimeUnit;

/// Step between natural prefixes, in total prefix exponent
const PREFIX_STEP: i32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PrefixedUnit {
    /// A single term: `nN`, `min`, `m^2`
    Atomic(UnitTerm),
    /// A product of terms: `(N m)`, `m/s^2`
    Composite(CompositeUnit),
    /// Numerator and denominator kept apart: `µm/V`
    Rational(RationalUnit),
}

impl PrefixedUnit {
    /// A simple (or time) unit by bare name, e.g. `simple("N", SiPrefix::Nano)`
    pub fn simple(name: &str, prefix: SiPrefix) -> Self {
        PrefixedUnit::Atomic(UnitTerm::new(name, prefix))
    }

    pub fn second(prefix: SiPrefix) -> Self {
        PrefixedUnit::Atomic(UnitTerm::Time(TimeUnit::second().derive_with_prefix(prefix)))
    }

    pub fn minute() -> Self {
        PrefixedUnit::Atomic(UnitTerm::Time(TimeUnit::minute()))
    }

    pub fn hour() -> Self {
        PrefixedUnit::Atomic(UnitTerm::Time(TimeUnit::hour()))
    }

    pub fn dimensionless() -> Self {
        PrefixedUnit::Composite(CompositeUnit::identity())
    }

    /// Rational unit from one numerator and one denominator unit
    pub fn ratio(numerator: &PrefixedUnit, denominator: &PrefixedUnit) -> Self {
        PrefixedUnit::Rational(RationalUnit::new(
            numerator.to_composite(),
            denominator.to_composite(),
        ))
    }

    /// The unit as a simplified product of terms
    pub fn to_composite(&self) -> CompositeUnit {
        match self {
            PrefixedUnit::Atomic(term) => CompositeUnit::from_term(term.clone()),
            PrefixedUnit::Composite(c) => c.simplify(),
            PrefixedUnit::Rational(r) => r.to_composite(),
        }
    }

    pub fn is_dimensionless(&self) -> bool {
        self.dimension().is_dimensionless()
    }

    /// Product of two units. A rational operand keeps the result rational;
    /// otherwise the product is a composite.
    pub fn multiply(&self, other: &PrefixedUnit) -> PrefixedUnit {
        let product = self.to_composite().multiply(&other.to_composite());
        self.wrap_binary(other, product)
    }

    pub fn divide(&self, other: &PrefixedUnit) -> PrefixedUnit {
        let quotient = self.to_composite().divide(&other.to_composite());
        self.wrap_binary(other, quotient)
    }

    fn wrap_binary(&self, other: &PrefixedUnit, result: CompositeUnit) -> PrefixedUnit {
        match (self, other) {
            (PrefixedUnit::Rational(_), _) | (_, PrefixedUnit::Rational(_)) => {
                PrefixedUnit::Rational(RationalUnit::from_composite(&result))
            }
            _ => PrefixedUnit::Composite(result),
        }
    }

    /// Raise to `n`; power 0 is dimensionless
    pub fn power(&self, n: i32) -> PrefixedUnit {
        if n == 0 {
            return Self::dimensionless();
        }
        match self {
            PrefixedUnit::Atomic(term) => PrefixedUnit::Atomic(term.power(n)),
            PrefixedUnit::Composite(c) => PrefixedUnit::Composite(c.power(n)),
            PrefixedUnit::Rational(r) => PrefixedUnit::Rational(r.power(n)),
        }
    }

    /// Canonical form in the most specific shape: a single term becomes
    /// atomic, a rational without denominator becomes composite.
    pub fn simplify(&self) -> PrefixedUnit {
        match self {
            PrefixedUnit::Atomic(term) if term.is_identity() => Self::dimensionless(),
            PrefixedUnit::Atomic(_) => self.clone(),
            PrefixedUnit::Composite(c) => {
                let simplified = c.simplify();
                match simplified.single_term() {
                    Some(term) => PrefixedUnit::Atomic(term.clone()),
                    None => PrefixedUnit::Composite(simplified),
                }
            }
            PrefixedUnit::Rational(r) => r.simplify(),
        }
    }

    pub fn dimension(&self) -> DimensionVector {
        match self {
            PrefixedUnit::Atomic(term) => term.dimension(),
            PrefixedUnit::Composite(c) => c.dimension(),
            PrefixedUnit::Rational(r) => r.dimension(),
        }
    }

    /// Same dimension vector, by bare name and exponent
    pub fn is_compatible(&self, other: &PrefixedUnit) -> bool {
        self.dimension() == other.dimension()
    }

    /// log10 of the factor to the unprefixed form of the same shape
    pub fn premultiplier_exponent(&self) -> f64 {
        match self {
            PrefixedUnit::Atomic(term) => term.premultiplier_exponent(),
            PrefixedUnit::Composite(c) => c.premultiplier_exponent(),
            PrefixedUnit::Rational(r) => r.premultiplier_exponent(),
        }
    }

    /// Factor converting a value in `self` into `other`; 1 when incompatible
    pub fn conversion_factor_to(&self, other: &PrefixedUnit) -> f64 {
        if !self.is_compatible(other) {
            return 1.0;
        }
        power_of_ten(self.premultiplier_exponent() - other.premultiplier_exponent())
    }

    /// The adjacent larger unit, `None` at a registry or family boundary
    pub fn next(&self) -> Option<PrefixedUnit> {
        match self {
            PrefixedUnit::Atomic(term) => term.next().map(PrefixedUnit::Atomic),
            PrefixedUnit::Composite(c) => shift_composite(c, PREFIX_STEP).map(from_composite),
            PrefixedUnit::Rational(r) => r.next().map(PrefixedUnit::Rational),
        }
    }

    /// The adjacent smaller unit, `None` at a registry or family boundary
    pub fn previous(&self) -> Option<PrefixedUnit> {
        match self {
            PrefixedUnit::Atomic(term) => term.previous().map(PrefixedUnit::Atomic),
            PrefixedUnit::Composite(c) => shift_composite(c, -PREFIX_STEP).map(from_composite),
            PrefixedUnit::Rational(r) => r.previous().map(PrefixedUnit::Rational),
        }
    }

    pub fn try_next(&self) -> Result<PrefixedUnit> {
        self.next().ok_or_else(|| UnitError::no_adjacent(self, Direction::Next))
    }

    pub fn try_previous(&self) -> Result<PrefixedUnit> {
        self.previous().ok_or_else(|| UnitError::no_adjacent(self, Direction::Previous))
    }

    /// Candidate units around this one, for pickers
    pub fn derive_units(&self, min_delta: i32, max_delta: i32) -> Vec<PrefixedUnit> {
        match self {
            PrefixedUnit::Atomic(term) => term
                .derive_units(min_delta, max_delta)
                .into_iter()
                .map(PrefixedUnit::Atomic)
                .collect(),
            PrefixedUnit::Composite(c) => c
                .derive_units(min_delta, max_delta)
                .into_iter()
                .map(from_composite)
                .collect(),
            PrefixedUnit::Rational(r) => r
                .derive_units(min_delta, max_delta)
                .into_iter()
                .map(PrefixedUnit::Rational)
                .collect(),
        }
    }

    /// The compatible unit in which `value` reads most naturally
    pub fn preferred_compatible_unit(&self, value: f64) -> PrefixedUnit {
        match self {
            PrefixedUnit::Atomic(UnitTerm::Time(t)) => {
                PrefixedUnit::Atomic(UnitTerm::Time(t.preferred_unit(value)))
            }
            PrefixedUnit::Atomic(term) => {
                let preferred =
                    CompositeUnit::from_term(term.clone()).preferred_compatible_unit(value);
                from_composite(preferred)
            }
            PrefixedUnit::Composite(c) => from_composite(c.preferred_compatible_unit(value)),
            PrefixedUnit::Rational(r) => PrefixedUnit::Rational(r.preferred_compatible_unit(value)),
        }
    }

    /// Render with ASCII (`m^2`) or superscript (`m²`) exponents
    pub fn render(&self, pretty: bool) -> String {
        match self {
            PrefixedUnit::Atomic(term) => term.render(term.exponent(), pretty),
            PrefixedUnit::Composite(c) => c.render(pretty),
            PrefixedUnit::Rational(r) => r.render(pretty),
        }
    }

    pub fn to_pretty_string(&self) -> String {
        self.render(true)
    }
}

/// A single-term product is atomic
fn from_composite(unit: CompositeUnit) -> PrefixedUnit {
    match unit.single_term() {
        Some(term) => PrefixedUnit::Atomic(term.clone()),
        None => PrefixedUnit::Composite(unit),
    }
}

fn shift_composite(unit: &CompositeUnit, delta: i32) -> Option<CompositeUnit> {
    unit.change_prefixes(delta, true)
        .or_else(|| unit.change_prefixes(delta, false))
}

impl Default for PrefixedUnit {
    fn default() -> Self {
        Self::dimensionless()
    }
}

impl fmt::Display for PrefixedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}

impl FromStr for PrefixedUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self> {
        crate::parser::parse_unit(s)
    }
}

impl From<UnitTerm> for PrefixedUnit {
    fn from(term: UnitTerm) -> Self {
        PrefixedUnit::Atomic(term)
    }
}

impl From<SimpleUnit> for PrefixedUnit {
    fn from(unit: SimpleUnit) -> Self {
        PrefixedUnit::Atomic(UnitTerm::Simple(unit))
    }
}

impl From<TimeUnit> for PrefixedUnit {
    fn from(unit: TimeUnit) -> Self {
        PrefixedUnit::Atomic(UnitTerm::Time(unit))
    }
}

impl From<CompositeUnit> for PrefixedUnit {
    fn from(unit: CompositeUnit) -> Self {
        PrefixedUnit::Composite(unit)
    }
}

impl From<RationalUnit> for PrefixedUnit {
    fn from(unit: RationalUnit) -> Self {
        PrefixedUnit::Rational(unit)
    }
}
