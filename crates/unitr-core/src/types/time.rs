//! Second, minute and hour
//!
//! Seconds take SI prefixes; minutes and hours do not. All three share the
//! dimension "s" and are ordered on one magnitude ladder:
//!
//! fs < ps < ns < µs < ms < s < min < h < Ms < Gs < Ts
//!
//! Navigation walks this ladder, so `h.next()` is `Ms` and `min.previous()`
//! is `s`. Prefixed seconds between s and h (das, hs, ks) are valid units
//! but are not rungs; stepping from them lands on the neighbouring rung.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dimension::DimensionVector;
use crate::format::format_power;
use crate::prefix::SiPrefix;

use super::{clamp_exponent, scale_exponent};

pub const SECOND_SYMBOL: &str = "s";
pub const MINUTE_SYMBOL: &str = "min";
pub const HOUR_SYMBOL: &str = "h";

/// log10(60)
pub const LOG10_SECONDS_PER_MINUTE: f64 = 1.778_151_250_383_643_6;
/// log10(3600)
pub const LOG10_SECONDS_PER_HOUR: f64 = 3.556_302_500_767_287_3;

const EPSILON: f64 = 1e-9;

/// A time unit raised to an integer exponent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeUnit {
    Second { prefix: SiPrefix, exponent: i32 },
    Minute { exponent: i32 },
    Hour { exponent: i32 },
}

impl TimeUnit {
    pub const fn second() -> Self {
        TimeUnit::Second {
            prefix: SiPrefix::Empty,
            exponent: 1,
        }
    }

    pub const fn minute() -> Self {
        TimeUnit::Minute { exponent: 1 }
    }

    pub const fn hour() -> Self {
        TimeUnit::Hour { exponent: 1 }
    }

    pub fn exponent(&self) -> i32 {
        match self {
            TimeUnit::Second { exponent, .. }
            | TimeUnit::Minute { exponent }
            | TimeUnit::Hour { exponent } => *exponent,
        }
    }

    pub fn with_exponent(&self, exponent: i32) -> Self {
        let exponent = clamp_exponent(exponent);
        match *self {
            TimeUnit::Second { prefix, .. } => TimeUnit::Second { prefix, exponent },
            TimeUnit::Minute { .. } => TimeUnit::Minute { exponent },
            TimeUnit::Hour { .. } => TimeUnit::Hour { exponent },
        }
    }

    pub fn power(&self, n: i32) -> Self {
        self.with_exponent(scale_exponent(self.exponent(), n))
    }

    /// Prefix of a second; minutes and hours have none
    pub fn prefix(&self) -> Option<SiPrefix> {
        match self {
            TimeUnit::Second { prefix, .. } => Some(*prefix),
            _ => None,
        }
    }

    /// The same exponent on a second carrying `prefix`
    pub fn derive_with_prefix(&self, prefix: SiPrefix) -> Self {
        TimeUnit::Second {
            prefix,
            exponent: self.exponent(),
        }
    }

    pub fn bare_name(&self) -> &'static str {
        match self {
            TimeUnit::Second { .. } => SECOND_SYMBOL,
            TimeUnit::Minute { .. } => MINUTE_SYMBOL,
            TimeUnit::Hour { .. } => HOUR_SYMBOL,
        }
    }

    /// Symbol without exponent ("ms", "min")
    pub fn unit_symbol(&self) -> String {
        match self {
            TimeUnit::Second { prefix, .. } => format!("{}{}", prefix.symbol(), SECOND_SYMBOL),
            other => other.bare_name().to_string(),
        }
    }

    /// log10 of the number of seconds in one unit, ignoring the exponent
    pub fn unit_magnitude(&self) -> f64 {
        match self {
            TimeUnit::Second { prefix, .. } => prefix.exponent() as f64,
            TimeUnit::Minute { .. } => LOG10_SECONDS_PER_MINUTE,
            TimeUnit::Hour { .. } => LOG10_SECONDS_PER_HOUR,
        }
    }

    pub fn premultiplier_exponent(&self) -> f64 {
        self.exponent() as f64 * self.unit_magnitude()
    }

    /// Integer prefix exponent total; only seconds have one
    pub fn total_prefix_exponent(&self) -> Option<i32> {
        match self {
            TimeUnit::Second { prefix, exponent } => Some(prefix.exponent() * exponent),
            _ => None,
        }
    }

    pub fn dimension(&self) -> DimensionVector {
        DimensionVector::of(SECOND_SYMBOL, self.exponent())
    }

    /// Every rung of the magnitude ladder, carrying `exponent`, smallest first
    pub fn ladder(exponent: i32) -> Vec<TimeUnit> {
        let mut rungs: Vec<TimeUnit> = SiPrefix::natural()
            .filter(|p| p.exponent() <= 0 || p.exponent() as f64 > LOG10_SECONDS_PER_HOUR)
            .map(|prefix| TimeUnit::Second { prefix, exponent })
            .chain([TimeUnit::Minute { exponent }, TimeUnit::Hour { exponent }])
            .collect();
        rungs.sort_by(|a, b| a.unit_magnitude().total_cmp(&b.unit_magnitude()));
        rungs
    }

    /// The next larger rung, `None` past Ts
    pub fn next(&self) -> Option<TimeUnit> {
        let magnitude = self.unit_magnitude();
        Self::ladder(self.exponent())
            .into_iter()
            .find(|r| r.unit_magnitude() > magnitude + EPSILON)
    }

    /// The next smaller rung, `None` past fs
    pub fn previous(&self) -> Option<TimeUnit> {
        let magnitude = self.unit_magnitude();
        Self::ladder(self.exponent())
            .into_iter()
            .rev()
            .find(|r| r.unit_magnitude() < magnitude - EPSILON)
    }

    /// Rungs whose premultiplier lies within `[own + min_delta, own + max_delta]`
    pub fn derive_units(&self, min_delta: i32, max_delta: i32) -> Vec<TimeUnit> {
        let own = self.premultiplier_exponent();
        let lo = own + min_delta as f64 - EPSILON;
        let hi = own + max_delta as f64 + EPSILON;
        let mut units: Vec<TimeUnit> = Self::ladder(self.exponent())
            .into_iter()
            .filter(|r| (lo..=hi).contains(&r.premultiplier_exponent()))
            .collect();
        units.sort_by(|a, b| {
            a.premultiplier_exponent()
                .total_cmp(&b.premultiplier_exponent())
        });
        units
    }

    /// The rung that displays `value` most naturally: the largest one for
    /// which the converted value still has magnitude of at least 1.
    pub fn preferred_unit(&self, value: f64) -> TimeUnit {
        if !value.is_finite() || value == 0.0 || value.abs() < super::MIN_PREFERRED_MAGNITUDE {
            return *self;
        }
        let target = self.premultiplier_exponent() + value.abs().log10();
        Self::ladder(self.exponent())
            .into_iter()
            .filter(|r| r.premultiplier_exponent() <= target + EPSILON)
            .max_by(|a, b| {
                a.premultiplier_exponent()
                    .total_cmp(&b.premultiplier_exponent())
            })
            .unwrap_or(*self)
    }

    pub(crate) fn render(&self, exponent: i32, pretty: bool) -> String {
        format_power(&self.unit_symbol(), exponent, pretty)
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(self.exponent(), false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn second(prefix: SiPrefix) -> TimeUnit {
        TimeUnit::Second {
            prefix,
            exponent: 1,
        }
    }

    #[test]
    fn test_constants() {
        assert!((LOG10_SECONDS_PER_MINUTE - 60f64.log10()).abs() < 1e-15);
        assert!((LOG10_SECONDS_PER_HOUR - 3600f64.log10()).abs() < 1e-15);
    }

    #[test]
    fn test_hour_and_minute_navigation() {
        assert_eq!(TimeUnit::hour().next(), Some(second(SiPrefix::Mega)));
        assert_eq!(TimeUnit::hour().previous(), Some(TimeUnit::minute()));
        assert_eq!(TimeUnit::minute().previous(), Some(TimeUnit::second()));
        assert_eq!(TimeUnit::minute().next(), Some(TimeUnit::hour()));
    }

    #[test]
    fn test_second_navigation() {
        assert_eq!(TimeUnit::second().next(), Some(TimeUnit::minute()));
        assert_eq!(TimeUnit::second().previous(), Some(second(SiPrefix::Milli)));
        assert_eq!(second(SiPrefix::Milli).next(), Some(TimeUnit::second()));
        assert_eq!(second(SiPrefix::Mega).previous(), Some(TimeUnit::hour()));
        assert_eq!(second(SiPrefix::Mega).next(), Some(second(SiPrefix::Giga)));
        assert_eq!(second(SiPrefix::Tera).next(), None);
        assert_eq!(second(SiPrefix::Femto).previous(), None);
    }

    #[test]
    fn test_off_ladder_seconds() {
        // 1 ks sits between min and h
        assert_eq!(second(SiPrefix::Kilo).next(), Some(TimeUnit::hour()));
        assert_eq!(second(SiPrefix::Kilo).previous(), Some(TimeUnit::minute()));
        assert_eq!(second(SiPrefix::Deca).previous(), Some(TimeUnit::second()));
    }

    #[test]
    fn test_navigation_keeps_exponent() {
        let per_hour = TimeUnit::Hour { exponent: -1 };
        assert_eq!(
            per_hour.next(),
            Some(TimeUnit::Second {
                prefix: SiPrefix::Mega,
                exponent: -1
            })
        );
    }

    #[test]
    fn test_premultiplier() {
        assert_eq!(TimeUnit::second().premultiplier_exponent(), 0.0);
        assert_eq!(second(SiPrefix::Milli).premultiplier_exponent(), -3.0);
        let hours_squared = TimeUnit::Hour { exponent: 2 };
        let expected = 2.0 * LOG10_SECONDS_PER_HOUR;
        assert!((hours_squared.premultiplier_exponent() - expected).abs() < 1e-12);
        assert_eq!(TimeUnit::minute().total_prefix_exponent(), None);
    }

    #[test]
    fn test_derive_units() {
        let units = TimeUnit::second().derive_units(-3, 3);
        assert_eq!(
            units,
            vec![second(SiPrefix::Milli), TimeUnit::second(), TimeUnit::minute()]
        );

        let around_hour = TimeUnit::hour().derive_units(-2, 3);
        assert_eq!(
            around_hour,
            vec![TimeUnit::minute(), TimeUnit::hour(), second(SiPrefix::Mega)]
        );
    }

    #[test]
    fn test_derive_units_only_natural_prefixes() {
        for unit in TimeUnit::second().derive_units(-15, 12) {
            if let Some(prefix) = unit.prefix() {
                assert!(prefix.is_natural());
            }
        }
    }

    #[test]
    fn test_preferred_unit() {
        assert_eq!(TimeUnit::second().preferred_unit(7200.0), TimeUnit::hour());
        assert_eq!(TimeUnit::second().preferred_unit(90.0), TimeUnit::minute());
        assert_eq!(TimeUnit::second().preferred_unit(60.0), TimeUnit::minute());
        assert_eq!(TimeUnit::second().preferred_unit(0.005), second(SiPrefix::Milli));
        assert_eq!(TimeUnit::hour().preferred_unit(0.5), TimeUnit::minute());
        assert_eq!(TimeUnit::second().preferred_unit(f64::NAN), TimeUnit::second());
        assert_eq!(TimeUnit::second().preferred_unit(0.0), TimeUnit::second());
    }

    #[test]
    fn test_display() {
        assert_eq!(second(SiPrefix::Micro).to_string(), "µs");
        assert_eq!(TimeUnit::Minute { exponent: -1 }.to_string(), "min^-1");
        assert_eq!(TimeUnit::Hour { exponent: 2 }.render(2, true), "h²");
    }
}
