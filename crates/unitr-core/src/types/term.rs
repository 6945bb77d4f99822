//! Atomic unit terms: one bare name, one prefix, one exponent

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dimension::DimensionVector;
use crate::format::format_power;
use crate::prefix::SiPrefix;

use super::registry;
use super::time::TimeUnit;
use super::{clamp_exponent, power_of_ten, scale_exponent, SECOND_DIMENSION};

/// A decimally prefixed named unit, e.g. `km^2`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SimpleUnit {
    name: String,
    prefix: SiPrefix,
    exponent: i32,
}

impl SimpleUnit {
    /// Unit with exponent 1; known long names and aliases are normalized
    /// to their symbol ("Newton" becomes "N").
    pub fn new(name: &str, prefix: SiPrefix) -> Self {
        Self::with_symbol(registry::canonical_symbol(name), prefix, 1)
    }

    /// Unit from an already canonical symbol
    pub fn with_symbol(symbol: impl Into<String>, prefix: SiPrefix, exponent: i32) -> Self {
        Self {
            name: symbol.into(),
            prefix,
            exponent: clamp_exponent(exponent),
        }
    }

    pub fn bare_name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> SiPrefix {
        self.prefix
    }

    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    pub fn with_exponent(&self, exponent: i32) -> Self {
        Self {
            exponent: clamp_exponent(exponent),
            ..self.clone()
        }
    }

    pub fn power(&self, n: i32) -> Self {
        self.with_exponent(scale_exponent(self.exponent, n))
    }

    pub fn derive_with_prefix(&self, prefix: SiPrefix) -> Self {
        Self {
            prefix,
            ..self.clone()
        }
    }

    pub fn next(&self) -> Option<Self> {
        self.prefix.next().map(|p| self.derive_with_prefix(p))
    }

    pub fn previous(&self) -> Option<Self> {
        self.prefix.previous().map(|p| self.derive_with_prefix(p))
    }

    pub fn total_prefix_exponent(&self) -> i32 {
        self.exponent * self.prefix.exponent()
    }

    pub fn premultiplier_exponent(&self) -> f64 {
        self.total_prefix_exponent() as f64
    }

    pub fn dimension(&self) -> DimensionVector {
        DimensionVector::of(self.name.clone(), self.exponent)
    }

    pub fn is_compatible(&self, other: &SimpleUnit) -> bool {
        self.dimension() == other.dimension()
    }

    /// Factor converting a value in `self` into `other`; 1 when incompatible
    pub fn conversion_factor_to(&self, other: &SimpleUnit) -> f64 {
        if !self.is_compatible(other) {
            return 1.0;
        }
        power_of_ten(self.premultiplier_exponent() - other.premultiplier_exponent())
    }

    /// Same-named units with a natural prefix whose total prefix exponent
    /// differs from this one by a delta in `[min_delta, max_delta]`
    pub fn derive_units(&self, min_delta: i32, max_delta: i32) -> Vec<SimpleUnit> {
        let own = self.total_prefix_exponent();
        let mut units: Vec<SimpleUnit> = SiPrefix::natural()
            .chain(std::iter::once(self.prefix))
            .map(|p| self.derive_with_prefix(p))
            .filter(|u| (min_delta..=max_delta).contains(&(u.total_prefix_exponent() - own)))
            .collect();
        units.sort_by_key(SimpleUnit::total_prefix_exponent);
        units.dedup();
        units
    }

    /// Symbol without exponent ("km")
    pub fn unit_symbol(&self) -> String {
        format!("{}{}", self.prefix.symbol(), self.name)
    }
}

impl fmt::Display for SimpleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_power(&self.unit_symbol(), self.exponent, false))
    }
}

/// The indivisible building block of every unit
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitTerm {
    Simple(SimpleUnit),
    Time(TimeUnit),
}

impl UnitTerm {
    /// Term with exponent 1 for a bare name; "s", "min" and "h" (and their
    /// aliases) build time units.
    pub fn new(name: &str, prefix: SiPrefix) -> Self {
        registry::lookup(name)
            .and_then(|d| d.term(prefix))
            .unwrap_or_else(|| UnitTerm::Simple(SimpleUnit::new(name, prefix)))
    }

    /// Display name without prefix ("m", "min")
    pub fn bare_name(&self) -> &str {
        match self {
            UnitTerm::Simple(u) => u.bare_name(),
            UnitTerm::Time(t) => t.bare_name(),
        }
    }

    /// Name this term contributes to the dimension vector. All time
    /// units share "s".
    pub fn dimension_name(&self) -> &str {
        match self {
            UnitTerm::Simple(u) => u.bare_name(),
            UnitTerm::Time(_) => SECOND_DIMENSION,
        }
    }

    pub fn exponent(&self) -> i32 {
        match self {
            UnitTerm::Simple(u) => u.exponent(),
            UnitTerm::Time(t) => t.exponent(),
        }
    }

    pub fn with_exponent(&self, exponent: i32) -> Self {
        match self {
            UnitTerm::Simple(u) => UnitTerm::Simple(u.with_exponent(exponent)),
            UnitTerm::Time(t) => UnitTerm::Time(t.with_exponent(exponent)),
        }
    }

    pub fn power(&self, n: i32) -> Self {
        self.with_exponent(scale_exponent(self.exponent(), n))
    }

    /// Neutral element for multiplication
    pub fn is_identity(&self) -> bool {
        self.exponent() == 0
    }

    pub fn prefix(&self) -> Option<SiPrefix> {
        match self {
            UnitTerm::Simple(u) => Some(u.prefix()),
            UnitTerm::Time(t) => t.prefix(),
        }
    }

    pub fn derive_with_prefix(&self, prefix: SiPrefix) -> Self {
        match self {
            UnitTerm::Simple(u) => UnitTerm::Simple(u.derive_with_prefix(prefix)),
            UnitTerm::Time(t) => UnitTerm::Time(t.derive_with_prefix(prefix)),
        }
    }

    pub fn next(&self) -> Option<Self> {
        match self {
            UnitTerm::Simple(u) => u.next().map(UnitTerm::Simple),
            UnitTerm::Time(t) => t.next().map(UnitTerm::Time),
        }
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            UnitTerm::Simple(u) => u.previous().map(UnitTerm::Simple),
            UnitTerm::Time(t) => t.previous().map(UnitTerm::Time),
        }
    }

    /// `exponent * prefix exponent`; `None` for minutes and hours
    pub fn total_prefix_exponent(&self) -> Option<i32> {
        match self {
            UnitTerm::Simple(u) => Some(u.total_prefix_exponent()),
            UnitTerm::Time(t) => t.total_prefix_exponent(),
        }
    }

    pub fn premultiplier_exponent(&self) -> f64 {
        match self {
            UnitTerm::Simple(u) => u.premultiplier_exponent(),
            UnitTerm::Time(t) => t.premultiplier_exponent(),
        }
    }

    pub fn dimension(&self) -> DimensionVector {
        DimensionVector::of(self.dimension_name(), self.exponent())
    }

    pub fn is_compatible(&self, other: &UnitTerm) -> bool {
        self.dimension() == other.dimension()
    }

    /// Factor converting a value in `self` into `other`; 1 when incompatible
    pub fn conversion_factor_to(&self, other: &UnitTerm) -> f64 {
        if !self.is_compatible(other) {
            return 1.0;
        }
        power_of_ten(self.premultiplier_exponent() - other.premultiplier_exponent())
    }

    pub fn derive_units(&self, min_delta: i32, max_delta: i32) -> Vec<UnitTerm> {
        match self {
            UnitTerm::Simple(u) => u
                .derive_units(min_delta, max_delta)
                .into_iter()
                .map(UnitTerm::Simple)
                .collect(),
            UnitTerm::Time(t) => t
                .derive_units(min_delta, max_delta)
                .into_iter()
                .map(UnitTerm::Time)
                .collect(),
        }
    }

    /// Symbol without exponent
    pub fn unit_symbol(&self) -> String {
        match self {
            UnitTerm::Simple(u) => u.unit_symbol(),
            UnitTerm::Time(t) => t.unit_symbol(),
        }
    }

    /// Render with an explicit exponent (denominators print it negated)
    pub(crate) fn render(&self, exponent: i32, pretty: bool) -> String {
        format_power(&self.unit_symbol(), exponent, pretty)
    }
}

impl From<SimpleUnit> for UnitTerm {
    fn from(u: SimpleUnit) -> Self {
        UnitTerm::Simple(u)
    }
}

impl From<TimeUnit> for UnitTerm {
    fn from(t: TimeUnit) -> Self {
        UnitTerm::Time(t)
    }
}

impl fmt::Display for UnitTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(self.exponent(), false))
    }
}
