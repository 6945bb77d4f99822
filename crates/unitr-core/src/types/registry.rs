//! Known bare unit names and their aliases
//!
//! To add a unit, add an entry to the UNITS array. Parsing and name
//! normalization pick it up automatically. Names not in the table are still
//! accepted as opaque symbols.

use crate::prefix::SiPrefix;

use super::term::{SimpleUnit, UnitTerm};
use super::time::TimeUnit;

/// Which atomic variant a bare name builds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Simple,
    Second,
    Minute,
    Hour,
}

/// Unit metadata - single source of truth for each known bare name
pub struct UnitDef {
    /// Canonical symbol ("m", "N")
    pub symbol: &'static str,
    /// Long name ("meter")
    pub name: &'static str,
    pub kind: UnitKind,
    /// Other accepted spellings, matched case-insensitively
    pub aliases: &'static [&'static str],
}

pub static UNITS: &[UnitDef] = &[
    // Base units
    UnitDef {
        symbol: "m",
        name: "meter",
        kind: UnitKind::Simple,
        aliases: &["meters", "metre", "metres"],
    },
    UnitDef {
        symbol: "g",
        name: "gram",
        kind: UnitKind::Simple,
        aliases: &["grams", "gramme", "grammes"],
    },
    UnitDef {
        symbol: "A",
        name: "ampere",
        kind: UnitKind::Simple,
        aliases: &["amperes", "amp", "amps"],
    },
    UnitDef {
        symbol: "K",
        name: "kelvin",
        kind: UnitKind::Simple,
        aliases: &["kelvins"],
    },
    UnitDef {
        symbol: "mol",
        name: "mole",
        kind: UnitKind::Simple,
        aliases: &["moles"],
    },
    UnitDef {
        symbol: "cd",
        name: "candela",
        kind: UnitKind::Simple,
        aliases: &["candelas"],
    },
    // Time
    UnitDef {
        symbol: "s",
        name: "second",
        kind: UnitKind::Second,
        aliases: &["seconds", "sec", "secs"],
    },
    UnitDef {
        symbol: "min",
        name: "minute",
        kind: UnitKind::Minute,
        aliases: &["minutes", "mins"],
    },
    UnitDef {
        symbol: "h",
        name: "hour",
        kind: UnitKind::Hour,
        aliases: &["hours", "hr", "hrs"],
    },
    // Derived units
    UnitDef {
        symbol: "N",
        name: "newton",
        kind: UnitKind::Simple,
        aliases: &["newtons"],
    },
    UnitDef {
        symbol: "Pa",
        name: "pascal",
        kind: UnitKind::Simple,
        aliases: &["pascals"],
    },
    UnitDef {
        symbol: "J",
        name: "joule",
        kind: UnitKind::Simple,
        aliases: &["joules"],
    },
    UnitDef {
        symbol: "W",
        name: "watt",
        kind: UnitKind::Simple,
        aliases: &["watts"],
    },
    UnitDef {
        symbol: "V",
        name: "volt",
        kind: UnitKind::Simple,
        aliases: &["volts"],
    },
    UnitDef {
        symbol: "C",
        name: "coulomb",
        kind: UnitKind::Simple,
        aliases: &["coulombs"],
    },
    UnitDef {
        symbol: "F",
        name: "farad",
        kind: UnitKind::Simple,
        aliases: &["farads"],
    },
    UnitDef {
        symbol: "Ω",
        name: "ohm",
        kind: UnitKind::Simple,
        aliases: &["ohms"],
    },
    UnitDef {
        symbol: "S",
        name: "siemens",
        kind: UnitKind::Simple,
        aliases: &[],
    },
    UnitDef {
        symbol: "H",
        name: "henry",
        kind: UnitKind::Simple,
        aliases: &["henries", "henrys"],
    },
    UnitDef {
        symbol: "T",
        name: "tesla",
        kind: UnitKind::Simple,
        aliases: &["teslas"],
    },
    UnitDef {
        symbol: "Wb",
        name: "weber",
        kind: UnitKind::Simple,
        aliases: &["webers"],
    },
    UnitDef {
        symbol: "Hz",
        name: "hertz",
        kind: UnitKind::Simple,
        aliases: &[],
    },
    UnitDef {
        symbol: "L",
        name: "liter",
        kind: UnitKind::Simple,
        aliases: &["l", "liters", "litre", "litres"],
    },
    UnitDef {
        symbol: "rad",
        name: "radian",
        kind: UnitKind::Simple,
        aliases: &["radians"],
    },
    UnitDef {
        symbol: "sr",
        name: "steradian",
        kind: UnitKind::Simple,
        aliases: &["steradians"],
    },
    UnitDef {
        symbol: "eV",
        name: "electronvolt",
        kind: UnitKind::Simple,
        aliases: &["electronvolts"],
    },
];

impl UnitDef {
    /// Build the atomic term for this unit with the given prefix and exponent 1.
    /// Minute and hour take no prefix.
    pub fn term(&self, prefix: SiPrefix) -> Option<UnitTerm> {
        match self.kind {
            UnitKind::Simple => Some(UnitTerm::Simple(SimpleUnit::with_symbol(
                self.symbol,
                prefix,
                1,
            ))),
            UnitKind::Second => Some(UnitTerm::Time(TimeUnit::Second { prefix, exponent: 1 })),
            UnitKind::Minute if prefix == SiPrefix::Empty => {
                Some(UnitTerm::Time(TimeUnit::Minute { exponent: 1 }))
            }
            UnitKind::Hour if prefix == SiPrefix::Empty => {
                Some(UnitTerm::Time(TimeUnit::Hour { exponent: 1 }))
            }
            _ => None,
        }
    }

    fn matches_name(&self, text: &str) -> bool {
        self.name.eq_ignore_ascii_case(text)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(text))
    }
}

/// Find a unit by exact symbol
pub fn lookup_symbol(text: &str) -> Option<&'static UnitDef> {
    UNITS.iter().find(|d| d.symbol == text)
}

/// Find a unit by long name or alias (case-insensitive)
pub fn lookup_name(text: &str) -> Option<&'static UnitDef> {
    UNITS.iter().find(|d| d.matches_name(text))
}

/// Find a unit by symbol first, then by name
pub fn lookup(text: &str) -> Option<&'static UnitDef> {
    lookup_symbol(text).or_else(|| lookup_name(text))
}

/// Canonical symbol for a bare name, or the name itself when unknown
pub fn canonical_symbol(text: &str) -> &str {
    lookup(text).map_or(text, |d| d.symbol)
}

/// Resolve `<prefix?><bareName>` text into an atomic term with exponent 1.
///
/// An exact bare-name match wins ("min", "cd", "T"); otherwise a prefix
/// symbol followed by a known symbol ("mm", "Ms") or a prefix name followed
/// by a known long name ("kilometre"). Anything else is an opaque unprefixed
/// name. Returns `None` only for empty text.
pub fn resolve(text: &str) -> Option<UnitTerm> {
    if text.is_empty() {
        return None;
    }
    if let Some(term) = lookup(text).and_then(|d| d.term(SiPrefix::Empty)) {
        return Some(term);
    }
    resolve_prefixed(text).or_else(|| {
        Some(UnitTerm::Simple(SimpleUnit::with_symbol(
            text,
            SiPrefix::Empty,
            1,
        )))
    })
}

fn resolve_prefixed(text: &str) -> Option<UnitTerm> {
    // Longest prefix symbols first so "da" is tried before "d"
    let mut symbols: Vec<(&'static str, SiPrefix)> = SiPrefix::all()
        .filter(|p| *p != SiPrefix::Empty)
        .flat_map(|p| p.symbols().map(move |s| (s, p)))
        .collect();
    symbols.sort_by_key(|(s, _)| std::cmp::Reverse(s.chars().count()));

    for (symbol, prefix) in &symbols {
        if let Some(rest) = text.strip_prefix(symbol) {
            if let Some(term) = lookup_symbol(rest).and_then(|d| d.term(*prefix)) {
                return Some(term);
            }
        }
    }

    let lower = text.to_lowercase();
    for prefix in SiPrefix::all().filter(|p| *p != SiPrefix::Empty) {
        let names = std::iter::once(prefix.name()).chain(
            prefix
                .def()
                .aliases
                .iter()
                .copied()
                .filter(|a| a.chars().count() > 2),
        );
        for name in names {
            if let Some(rest) = lower.strip_prefix(name) {
                if let Some(term) = lookup_name(rest).and_then(|d| d.term(prefix)) {
                    return Some(term);
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple(symbol: &str, prefix: SiPrefix) -> UnitTerm {
        UnitTerm::Simple(SimpleUnit::with_symbol(symbol, prefix, 1))
    }

    fn second(prefix: SiPrefix) -> UnitTerm {
        UnitTerm::Time(TimeUnit::Second {
            prefix,
            exponent: 1,
        })
    }

    #[test]
    fn test_symbols_are_unique() {
        for (i, a) in UNITS.iter().enumerate() {
            for b in &UNITS[i + 1..] {
                assert_ne!(a.symbol, b.symbol);
            }
        }
    }

    #[test]
    fn test_canonical_symbol() {
        assert_eq!(canonical_symbol("Newton"), "N");
        assert_eq!(canonical_symbol("metre"), "m");
        assert_eq!(canonical_symbol("Meter"), "m");
        assert_eq!(canonical_symbol("px"), "px");
    }

    #[test]
    fn test_resolve_plain() {
        assert_eq!(resolve("N"), Some(simple("N", SiPrefix::Empty)));
        assert_eq!(resolve("min"), Some(UnitTerm::Time(TimeUnit::Minute { exponent: 1 })));
        assert_eq!(resolve("h"), Some(UnitTerm::Time(TimeUnit::Hour { exponent: 1 })));
        assert_eq!(resolve("cd"), Some(simple("cd", SiPrefix::Empty)));
        assert_eq!(resolve("T"), Some(simple("T", SiPrefix::Empty)));
        assert_eq!(resolve(""), None);
    }

    #[test]
    fn test_resolve_prefixed() {
        assert_eq!(resolve("nN"), Some(simple("N", SiPrefix::Nano)));
        assert_eq!(resolve("µm"), Some(simple("m", SiPrefix::Micro)));
        assert_eq!(resolve("um"), Some(simple("m", SiPrefix::Micro)));
        assert_eq!(resolve("mm"), Some(simple("m", SiPrefix::Milli)));
        assert_eq!(resolve("dam"), Some(simple("m", SiPrefix::Deca)));
        assert_eq!(resolve("hPa"), Some(simple("Pa", SiPrefix::Hecto)));
        assert_eq!(resolve("ms"), Some(second(SiPrefix::Milli)));
        assert_eq!(resolve("Ms"), Some(second(SiPrefix::Mega)));
        assert_eq!(resolve("mS"), Some(simple("S", SiPrefix::Milli)));
    }

    #[test]
    fn test_resolve_prefixed_names() {
        assert_eq!(resolve("kilometre"), Some(simple("m", SiPrefix::Kilo)));
        assert_eq!(resolve("NanoNewton"), Some(simple("N", SiPrefix::Nano)));
        assert_eq!(resolve("milliseconds"), Some(second(SiPrefix::Milli)));
    }

    #[test]
    fn test_opaque_names() {
        assert_eq!(resolve("px"), Some(simple("px", SiPrefix::Empty)));
        // "kmin" is not kilo-minute
        assert_eq!(resolve("kmin"), Some(simple("kmin", SiPrefix::Empty)));
        assert_eq!(resolve("counts"), Some(simple("counts", SiPrefix::Empty)));
    }
}
