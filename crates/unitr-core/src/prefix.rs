//! SI magnitude prefixes (femto..tera)
//!
//! The registry is a fixed static table. To add a prefix, add the enum
//! variant in exponent order and a matching entry in PREFIXES.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, UnitError};

/// Smallest registered prefix exponent (femto)
pub const MIN_EXPONENT: i32 = -15;
/// Largest registered prefix exponent (tera)
pub const MAX_EXPONENT: i32 = 12;

/// Supported prefixes.
///
/// Variants are declared in ascending exponent order, so the derived
/// `Ord` is the order by exponent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SiPrefix {
    Femto,
    Pico,
    Nano,
    Micro,
    Milli,
    Centi,
    Deci,
    #[default]
    Empty,
    Deca,
    Hecto,
    Kilo,
    Mega,
    Giga,
    Tera,
}

/// Prefix metadata - single source of truth for each prefix
pub struct PrefixDef {
    pub prefix: SiPrefix,
    /// Base-10 exponent
    pub exponent: i32,
    /// Display symbol ("k", "µ", "" for none)
    pub symbol: &'static str,
    /// Long name ("kilo")
    pub name: &'static str,
    /// Extra symbols accepted when parsing (matched case-sensitively)
    pub aliases: &'static [&'static str],
}

/// Complete registry, sorted by exponent.
pub static PREFIXES: &[PrefixDef] = &[
    PrefixDef {
        prefix: SiPrefix::Femto,
        exponent: -15,
        symbol: "f",
        name: "femto",
        aliases: &[],
    },
    PrefixDef {
        prefix: SiPrefix::Pico,
        exponent: -12,
        symbol: "p",
        name: "pico",
        aliases: &[],
    },
    PrefixDef {
        prefix: SiPrefix::Nano,
        exponent: -9,
        symbol: "n",
        name: "nano",
        aliases: &[],
    },
    PrefixDef {
        prefix: SiPrefix::Micro,
        exponent: -6,
        symbol: "µ",
        name: "micro",
        // Greek small mu and the ASCII stand-in
        aliases: &["μ", "u"],
    },
    PrefixDef {
        prefix: SiPrefix::Milli,
        exponent: -3,
        symbol: "m",
        name: "milli",
        aliases: &[],
    },
    PrefixDef {
        prefix: SiPrefix::Centi,
        exponent: -2,
        symbol: "c",
        name: "centi",
        aliases: &[],
    },
    PrefixDef {
        prefix: SiPrefix::Deci,
        exponent: -1,
        symbol: "d",
        name: "deci",
        aliases: &[],
    },
    PrefixDef {
        prefix: SiPrefix::Empty,
        exponent: 0,
        symbol: "",
        name: "",
        aliases: &[],
    },
    PrefixDef {
        prefix: SiPrefix::Deca,
        exponent: 1,
        symbol: "da",
        name: "deca",
        aliases: &["deka"],
    },
    PrefixDef {
        prefix: SiPrefix::Hecto,
        exponent: 2,
        symbol: "h",
        name: "hecto",
        aliases: &[],
    },
    PrefixDef {
        prefix: SiPrefix::Kilo,
        exponent: 3,
        symbol: "k",
        name: "kilo",
        aliases: &[],
    },
    PrefixDef {
        prefix: SiPrefix::Mega,
        exponent: 6,
        symbol: "M",
        name: "mega",
        aliases: &[],
    },
    PrefixDef {
        prefix: SiPrefix::Giga,
        exponent: 9,
        symbol: "G",
        name: "giga",
        aliases: &[],
    },
    PrefixDef {
        prefix: SiPrefix::Tera,
        exponent: 12,
        symbol: "T",
        name: "tera",
        aliases: &[],
    },
];

impl SiPrefix {
    /// Get the prefix definition
    pub fn def(&self) -> &'static PrefixDef {
        // PREFIXES is indexed in declaration order
        &PREFIXES[*self as usize]
    }

    pub fn exponent(&self) -> i32 {
        self.def().exponent
    }

    pub fn symbol(&self) -> &'static str {
        self.def().symbol
    }

    pub fn name(&self) -> &'static str {
        self.def().name
    }

    /// Scale factor, 10^exponent
    pub fn factor(&self) -> f64 {
        10f64.powi(self.exponent())
    }

    /// Multiples of 3 are "natural" prefixes; c, d, da and h are not.
    pub fn is_natural(&self) -> bool {
        self.exponent() % 3 == 0
    }

    /// Look up a prefix by its exponent
    pub fn from_exponent(exponent: i32) -> Result<SiPrefix> {
        PREFIXES
            .iter()
            .find(|d| d.exponent == exponent)
            .map(|d| d.prefix)
            .ok_or(UnitError::UnknownPrefixExponent(exponent))
    }

    /// Look up a prefix by symbol (case-sensitive) or long name (case-insensitive).
    /// The empty string resolves to [`SiPrefix::Empty`].
    pub fn from_alias(text: &str) -> Result<SiPrefix> {
        PREFIXES
            .iter()
            .find(|d| {
                d.symbol == text
                    || d.aliases.contains(&text)
                    || (!d.name.is_empty() && d.name.eq_ignore_ascii_case(text))
            })
            .map(|d| d.prefix)
            .ok_or_else(|| UnitError::UnknownPrefixAlias(text.to_string()))
    }

    /// Every symbol accepted for this prefix, display symbol first
    pub fn symbols(&self) -> impl Iterator<Item = &'static str> {
        let def = self.def();
        std::iter::once(def.symbol).chain(def.aliases.iter().copied())
    }

    /// Iterator over all prefixes in exponent order
    pub fn all() -> impl Iterator<Item = SiPrefix> {
        PREFIXES.iter().map(|d| d.prefix)
    }

    /// Iterator over the natural (multiple of 3) prefixes in exponent order
    pub fn natural() -> impl Iterator<Item = SiPrefix> {
        Self::all().filter(SiPrefix::is_natural)
    }

    /// The next larger natural prefix.
    ///
    /// Natural prefixes step by exactly 3; c, d, da and h step to the
    /// nearest multiple of 3 above them. `None` past tera.
    pub fn next(&self) -> Option<SiPrefix> {
        let exponent = self.exponent();
        Self::natural().find(|p| p.exponent() > exponent)
    }

    /// The next smaller natural prefix, `None` past femto.
    pub fn previous(&self) -> Option<SiPrefix> {
        let exponent = self.exponent();
        PREFIXES
            .iter()
            .rev()
            .map(|d| d.prefix)
            .find(|p| p.is_natural() && p.exponent() < exponent)
    }

    /// All prefixes whose exponent lies in `[lo, hi]`, in exponent order
    pub fn range_between(lo: SiPrefix, hi: SiPrefix) -> Vec<SiPrefix> {
        Self::all().filter(|p| *p >= lo && *p <= hi).collect()
    }

    /// Prefix whose exponent is the sum of both exponents
    pub fn multiply(&self, other: SiPrefix) -> Result<SiPrefix> {
        Self::from_exponent(self.exponent() + other.exponent())
    }

    /// Prefix whose exponent is the difference of both exponents
    pub fn divide(&self, other: SiPrefix) -> Result<SiPrefix> {
        Self::from_exponent(self.exponent() - other.exponent())
    }
}

impl fmt::Display for SiPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for SiPrefix {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self> {
        SiPrefix::from_alias(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_indexed_by_variant() {
        for (i, def) in PREFIXES.iter().enumerate() {
            assert_eq!(def.prefix as usize, i);
        }
        assert_eq!(PREFIXES.first().map(|d| d.exponent), Some(MIN_EXPONENT));
        assert_eq!(PREFIXES.last().map(|d| d.exponent), Some(MAX_EXPONENT));
    }

    #[test]
    fn test_exponents_are_unique_and_sorted() {
        let exponents: Vec<i32> = PREFIXES.iter().map(|d| d.exponent).collect();
        let mut sorted = exponents.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(exponents, sorted);
    }

    #[test]
    fn test_lookup_by_exponent() {
        assert_eq!(SiPrefix::from_exponent(-6), Ok(SiPrefix::Micro));
        assert_eq!(SiPrefix::from_exponent(2), Ok(SiPrefix::Hecto));
        assert_eq!(
            SiPrefix::from_exponent(4),
            Err(UnitError::UnknownPrefixExponent(4))
        );
        assert!(SiPrefix::from_exponent(15).is_err());
    }

    #[test]
    fn test_lookup_by_alias() {
        assert_eq!(SiPrefix::from_alias("k"), Ok(SiPrefix::Kilo));
        assert_eq!(SiPrefix::from_alias("M"), Ok(SiPrefix::Mega));
        assert_eq!(SiPrefix::from_alias("m"), Ok(SiPrefix::Milli));
        assert_eq!(SiPrefix::from_alias("u"), Ok(SiPrefix::Micro));
        assert_eq!(SiPrefix::from_alias("μ"), Ok(SiPrefix::Micro));
        assert_eq!(SiPrefix::from_alias("Kilo"), Ok(SiPrefix::Kilo));
        assert_eq!(SiPrefix::from_alias("da"), Ok(SiPrefix::Deca));
        assert_eq!(SiPrefix::from_alias(""), Ok(SiPrefix::Empty));
        assert_eq!(
            SiPrefix::from_alias("K"),
            Err(UnitError::UnknownPrefixAlias("K".to_string()))
        );
    }

    #[test]
    fn test_navigation() {
        assert_eq!(SiPrefix::Empty.next(), Some(SiPrefix::Kilo));
        assert_eq!(SiPrefix::Kilo.previous(), Some(SiPrefix::Empty));
        assert_eq!(SiPrefix::Milli.previous(), Some(SiPrefix::Micro));
        assert_eq!(SiPrefix::Tera.next(), None);
        assert_eq!(SiPrefix::Femto.previous(), None);
        assert_eq!(SiPrefix::Centi.next(), Some(SiPrefix::Empty));
        assert_eq!(SiPrefix::Hecto.previous(), Some(SiPrefix::Empty));
        assert_eq!(SiPrefix::Deca.next(), Some(SiPrefix::Kilo));
    }

    #[test]
    fn test_stepping_never_reaches_unnatural_prefixes() {
        let mut seen = Vec::new();
        let mut current = Some(SiPrefix::Femto);
        while let Some(p) = current {
            seen.push(p);
            current = p.next();
        }
        assert!(seen.iter().all(SiPrefix::is_natural));
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(SiPrefix::Kilo.multiply(SiPrefix::Kilo), Ok(SiPrefix::Mega));
        assert_eq!(SiPrefix::Kilo.divide(SiPrefix::Milli), Ok(SiPrefix::Mega));
        assert_eq!(SiPrefix::Centi.multiply(SiPrefix::Kilo), Ok(SiPrefix::Deca));
        assert!(SiPrefix::Tera.multiply(SiPrefix::Kilo).is_err());
    }

    #[test]
    fn test_range_between() {
        assert_eq!(
            SiPrefix::range_between(SiPrefix::Milli, SiPrefix::Empty),
            vec![
                SiPrefix::Milli,
                SiPrefix::Centi,
                SiPrefix::Deci,
                SiPrefix::Empty
            ]
        );
        assert!(SiPrefix::range_between(SiPrefix::Kilo, SiPrefix::Milli).is_empty());
    }

    #[test]
    fn test_ordering_matches_exponent() {
        assert!(SiPrefix::Femto < SiPrefix::Centi);
        assert!(SiPrefix::Empty < SiPrefix::Deca);
        assert!(SiPrefix::Giga > SiPrefix::Mega);
    }
}
