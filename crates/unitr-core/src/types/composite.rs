//! Composite units: canonical products of atomic terms
//!
//! Terms are grouped by dimension name in first-seen order. Simplification
//! merges each group into a single prefixed term when one term can carry the
//! group's combined prefix exactly; otherwise the raw terms are kept so no
//! scale factor is lost (`km m` stays as written, `km/mm` keeps its 10⁶).

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, trace};

use crate::composition::CompositionGenerator;
use crate::dimension::{DimensionElement, DimensionVector};
use crate::format::format_fraction;
use crate::prefix::{SiPrefix, MAX_EXPONENT, MIN_EXPONENT};

use super::term::{SimpleUnit, UnitTerm};
use super::time::TimeUnit;
use super::{floor_to_multiple_of_3, power_of_ten, MIN_PREFERRED_MAGNITUDE};

const EPSILON: f64 = 1e-9;

/// All terms sharing one dimension name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct TermGroup {
    key: String,
    terms: Vec<UnitTerm>,
}

/// Product of atomic terms in canonical form. The empty product is the
/// dimensionless identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompositeUnit {
    groups: Vec<TermGroup>,
}

impl CompositeUnit {
    /// The multiplicative identity
    pub const fn identity() -> Self {
        Self { groups: Vec::new() }
    }

    /// Build from terms. Zero-exponent terms are always dropped; with
    /// `simplify` each group of same-named terms is merged where possible.
    pub fn from_terms(terms: impl IntoIterator<Item = UnitTerm>, simplify: bool) -> Self {
        let groups = group_terms(terms.into_iter().filter(|t| !t.is_identity()))
            .into_iter()
            .filter_map(|group| {
                let mut terms = if simplify {
                    merge_group(&group.key, group.terms)
                } else {
                    group.terms
                };
                terms.sort_by(term_order);
                (!terms.is_empty()).then_some(TermGroup {
                    key: group.key,
                    terms,
                })
            })
            .collect();
        Self { groups }
    }

    pub fn from_term(term: UnitTerm) -> Self {
        Self::from_terms([term], true)
    }

    /// All terms, group by group
    pub fn terms(&self) -> impl Iterator<Item = &UnitTerm> {
        self.groups.iter().flat_map(|g| g.terms.iter())
    }

    /// Terms with a positive exponent
    pub fn numerator_terms(&self) -> impl Iterator<Item = &UnitTerm> {
        self.terms().filter(|t| t.exponent() > 0)
    }

    /// Terms with a negative exponent
    pub fn denominator_terms(&self) -> impl Iterator<Item = &UnitTerm> {
        self.terms().filter(|t| t.exponent() < 0)
    }

    /// Numerator terms as their own composite
    pub fn numerator(&self) -> CompositeUnit {
        Self::from_terms(self.numerator_terms().cloned(), false)
    }

    /// Denominator terms with their exponents negated
    pub fn denominator(&self) -> CompositeUnit {
        Self::from_terms(self.denominator_terms().map(|t| t.power(-1)), false)
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.terms.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.is_empty()
    }

    /// The only term, when there is exactly one
    pub fn single_term(&self) -> Option<&UnitTerm> {
        match self.groups.as_slice() {
            [group] if group.terms.len() == 1 => group.terms.first(),
            _ => None,
        }
    }

    pub fn multiply(&self, other: &CompositeUnit) -> CompositeUnit {
        Self::from_terms(self.terms().chain(other.terms()).cloned(), true)
    }

    pub fn divide(&self, other: &CompositeUnit) -> CompositeUnit {
        Self::from_terms(
            self.terms()
                .cloned()
                .chain(other.terms().map(|t| t.power(-1))),
            true,
        )
    }

    /// Raise every term to `n`; power 0 yields the identity
    pub fn power(&self, n: i32) -> CompositeUnit {
        Self::from_terms(self.terms().map(|t| t.power(n)), true)
    }

    pub fn simplify(&self) -> CompositeUnit {
        Self::from_terms(self.terms().cloned(), true)
    }

    pub fn dimension(&self) -> DimensionVector {
        DimensionVector::from_elements(
            self.terms()
                .map(|t| DimensionElement::new(t.dimension_name(), t.exponent())),
        )
    }

    pub fn is_compatible(&self, other: &CompositeUnit) -> bool {
        self.dimension() == other.dimension()
    }

    pub fn premultiplier_exponent(&self) -> f64 {
        self.terms().map(UnitTerm::premultiplier_exponent).sum()
    }

    /// Factor converting a value in `self` into `other`; 1 when incompatible
    pub fn conversion_factor_to(&self, other: &CompositeUnit) -> f64 {
        if !self.is_compatible(other) {
            return 1.0;
        }
        power_of_ten(self.premultiplier_exponent() - other.premultiplier_exponent())
    }

    /// Find per-term shifts of the total prefix exponent that add up to
    /// `delta`.
    ///
    /// Each term may only move to a natural prefix inside the registry, in
    /// the direction of `delta`; minutes, hours and (with `only_numerator`)
    /// denominator terms stay put. Among all valid shift vectors the one
    /// with the smallest sum of resulting |prefix exponent| wins, ties going
    /// to the first in lexicographic order. Returns one shift per term, or
    /// an empty vector when no redistribution exists.
    pub fn prefix_shifts(&self, delta: i32, only_numerator: bool) -> Vec<i32> {
        let terms: Vec<&UnitTerm> = self.terms().collect();
        if delta == 0 {
            return vec![0; terms.len()];
        }
        let sign = delta.signum();

        // Per term: (|shift|, resulting prefix exponent), shift 0 first
        let options: Vec<Vec<(u32, i32)>> = terms
            .iter()
            .map(|term| shift_options(term, sign, only_numerator))
            .collect();
        let alphabets: Vec<Vec<u32>> = options
            .iter()
            .map(|o| o.iter().map(|(shift, _)| *shift).collect())
            .collect();

        let mut best: Option<(i32, Vec<u32>)> = None;
        CompositionGenerator::new(alphabets).for_each(delta.unsigned_abs(), |candidate| {
            let cost: i32 = candidate
                .iter()
                .zip(&options)
                .filter_map(|(shift, opts)| opts.iter().find(|(s, _)| s == shift))
                .map(|(_, exponent)| exponent.abs())
                .sum();
            trace!(?candidate, cost, "prefix redistribution candidate");
            if best.as_ref().map_or(true, |(c, _)| cost < *c) {
                best = Some((cost, candidate.to_vec()));
            }
        });

        match best {
            Some((_, shifts)) => shifts.into_iter().map(|s| sign * s as i32).collect(),
            None => Vec::new(),
        }
    }

    /// Re-prefix the terms so the total prefix exponent grows by `delta`,
    /// or `None` when no redistribution exists.
    pub fn change_prefixes(&self, delta: i32, only_numerator: bool) -> Option<CompositeUnit> {
        let shifts = self.prefix_shifts(delta, only_numerator);
        if delta != 0 && shifts.is_empty() {
            return None;
        }
        self.apply_shifts(&shifts)
    }

    fn apply_shifts(&self, shifts: &[i32]) -> Option<CompositeUnit> {
        let terms = self
            .terms()
            .zip(shifts)
            .map(|(term, &shift)| {
                if shift == 0 {
                    return Some(term.clone());
                }
                let current = term.prefix()?.exponent();
                let target = current + shift / term.exponent();
                SiPrefix::from_exponent(target)
                    .ok()
                    .map(|p| term.derive_with_prefix(p))
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self::from_terms(terms, true))
    }

    /// Candidate units whose total prefix exponent differs from this one by
    /// each delta in `[min_delta, max_delta]`, smallest delta first
    pub fn derive_units(&self, min_delta: i32, max_delta: i32) -> Vec<CompositeUnit> {
        let mut units: Vec<CompositeUnit> = Vec::new();
        for delta in min_delta..=max_delta {
            if let Some(unit) = self.change_prefixes(delta, false) {
                if !units.contains(&unit) {
                    units.push(unit);
                }
            }
        }
        units
    }

    /// The re-prefixed unit in which `value` reads most naturally, i.e.
    /// with a magnitude in [1, 1000). Numerator terms are tried first.
    /// NaN, zero, infinities and magnitudes below 1e-12 keep the unit.
    pub fn preferred_compatible_unit(&self, value: f64) -> CompositeUnit {
        if !value.is_finite() || value == 0.0 || value.abs() < MIN_PREFERRED_MAGNITUDE {
            return self.clone();
        }
        let delta = floor_to_multiple_of_3(value.abs().log10());
        if delta == 0 {
            return self.clone();
        }
        self.change_prefixes(delta, true)
            .or_else(|| self.change_prefixes(delta, false))
            .unwrap_or_else(|| {
                debug!(unit = %self, delta, "no prefix redistribution found");
                self.clone()
            })
    }

    /// Render with ASCII (`m^2`) or superscript (`m²`) exponents
    pub fn render(&self, pretty: bool) -> String {
        let numerator: Vec<String> = self
            .numerator_terms()
            .map(|t| t.render(t.exponent(), pretty))
            .collect();
        let denominator: Vec<String> = self
            .denominator_terms()
            .map(|t| t.render(-t.exponent(), pretty))
            .collect();
        format_fraction(&numerator, &denominator)
    }

    pub fn to_pretty_string(&self) -> String {
        self.render(true)
    }
}

/// Legal (|shift|, resulting prefix exponent) pairs for one term
fn shift_options(term: &UnitTerm, sign: i32, only_numerator: bool) -> Vec<(u32, i32)> {
    let current = term.prefix().map_or(0, |p| p.exponent());
    let mut options = vec![(0, current)];

    let movable =
        term.total_prefix_exponent().is_some() && (!only_numerator || term.exponent() > 0);
    if !movable {
        return options;
    }
    let exponent = term.exponent();
    for prefix in SiPrefix::natural() {
        let shift = exponent * (prefix.exponent() - current);
        if shift != 0 && shift.signum() == sign {
            options.push((shift.unsigned_abs(), prefix.exponent()));
        }
    }
    options
}

/// Order inside a group: higher exponent first, then larger unit magnitude,
/// so equal products compare equal whatever order they were written in
fn term_order(a: &UnitTerm, b: &UnitTerm) -> Ordering {
    b.exponent()
        .cmp(&a.exponent())
        .then_with(|| unit_magnitude(b).total_cmp(&unit_magnitude(a)))
}

/// log10 of one unit of the term, ignoring its exponent
fn unit_magnitude(term: &UnitTerm) -> f64 {
    match term.exponent() {
        0 => 0.0,
        exponent => term.premultiplier_exponent() / exponent as f64,
    }
}

/// Multimap from dimension name to its terms, in first-seen order
fn group_terms(terms: impl IntoIterator<Item = UnitTerm>) -> Vec<TermGroup> {
    let mut groups: Vec<TermGroup> = Vec::new();
    for term in terms {
        let key = term.dimension_name();
        match groups.iter_mut().find(|g| g.key == key) {
            Some(group) => group.terms.push(term),
            None => groups.push(TermGroup {
                key: key.to_string(),
                terms: vec![term],
            }),
        }
    }
    groups
}

/// Merge one group of same-named terms, or keep them raw when no single
/// term reproduces their combined scale
fn merge_group(key: &str, terms: Vec<UnitTerm>) -> Vec<UnitTerm> {
    if terms.len() <= 1 {
        return terms;
    }
    let total_exponent: i32 = terms.iter().map(UnitTerm::exponent).sum();
    let prefix_totals: Option<Vec<i32>> =
        terms.iter().map(UnitTerm::total_prefix_exponent).collect();

    match prefix_totals {
        Some(totals) => merge_decimal(key, terms, total_exponent, totals.iter().sum()),
        None => merge_time(key, terms, total_exponent),
    }
}

fn merge_decimal(
    key: &str,
    terms: Vec<UnitTerm>,
    total_exponent: i32,
    total_prefix: i32,
) -> Vec<UnitTerm> {
    if total_exponent == 0 {
        if total_prefix == 0 {
            return Vec::new();
        }
        // No scaled identity exists, so km/mm keeps its 10^6 as raw terms.
        // The dimension is still empty.
        debug!(key, total_prefix, "cancelled unit keeps a scale factor, terms left un-merged");
        return terms;
    }

    if total_prefix % total_exponent == 0 {
        if let Ok(prefix) = SiPrefix::from_exponent(total_prefix / total_exponent) {
            return vec![collapse(&terms, prefix, total_exponent)];
        }
    }

    let factor = total_prefix as f64 / total_exponent as f64;
    let rounded = ((factor / 3.0).round() as i32 * 3).clamp(MIN_EXPONENT, MAX_EXPONENT);
    if rounded * total_exponent == total_prefix {
        if let Ok(prefix) = SiPrefix::from_exponent(rounded) {
            return vec![collapse(&terms, prefix, total_exponent)];
        }
    }

    debug!(key, total_prefix, total_exponent, "no single prefix fits, terms left un-merged");
    terms
}

/// One decimally prefixed term standing for the whole group
fn collapse(terms: &[UnitTerm], prefix: SiPrefix, exponent: i32) -> UnitTerm {
    let is_time = terms.iter().any(|t| matches!(t, UnitTerm::Time(_)));
    match terms.first() {
        Some(UnitTerm::Simple(u)) if !is_time => {
            UnitTerm::Simple(SimpleUnit::with_symbol(u.bare_name(), prefix, exponent))
        }
        _ => UnitTerm::Time(TimeUnit::Second { prefix, exponent }),
    }
}

/// Groups mixing minutes or hours: collapse when one time unit carries the
/// combined magnitude exactly
fn merge_time(key: &str, terms: Vec<UnitTerm>, total_exponent: i32) -> Vec<UnitTerm> {
    let total: f64 = terms.iter().map(UnitTerm::premultiplier_exponent).sum();
    if total_exponent == 0 {
        if total.abs() < EPSILON {
            return Vec::new();
        }
        debug!(key, total, "cancelled time unit keeps a scale factor, terms left un-merged");
        return terms;
    }

    let per_unit = total / total_exponent as f64;
    let candidates = [TimeUnit::minute(), TimeUnit::hour()]
        .into_iter()
        .chain(SiPrefix::all().map(|prefix| TimeUnit::Second { prefix, exponent: 1 }));
    for candidate in candidates {
        if (candidate.unit_magnitude() - per_unit).abs() < EPSILON {
            return vec![UnitTerm::Time(candidate.with_exponent(total_exponent))];
        }
    }

    debug!(key, total, total_exponent, "mixed time units left un-merged");
    terms
}

impl PartialEq for CompositeUnit {
    fn eq(&self, other: &Self) -> bool {
        self.groups.len() == other.groups.len()
            && self
                .groups
                .iter()
                .all(|g| other.groups.iter().any(|o| o == g))
    }
}

impl From<UnitTerm> for CompositeUnit {
    fn from(term: UnitTerm) -> Self {
        Self::from_term(term)
    }
}

impl fmt::Display for CompositeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(false))
    }
}
