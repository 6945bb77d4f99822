//! Dimension vectors: the compatibility key of a unit
//!
//! A dimension is a product of bare unit names with integer exponents. Names
//! are opaque: "N" is its own dimension and is never expanded into kg·m·s⁻².
//! Two units are compatible exactly when their dimension vectors are equal.

use std::fmt;

/// A single `(bare name, exponent)` factor
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionElement {
    pub name: String,
    pub exponent: i32,
}

impl DimensionElement {
    pub fn new(name: impl Into<String>, exponent: i32) -> Self {
        Self {
            name: name.into(),
            exponent,
        }
    }
}

/// Canonical product of dimension elements.
///
/// Names are unique, no exponent is zero, and insertion order is kept for
/// rendering. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct DimensionVector {
    elements: Vec<DimensionElement>,
}

/// The dimensionless identity
pub const DIMENSIONLESS: DimensionVector = DimensionVector {
    elements: Vec::new(),
};

impl DimensionVector {
    /// Group by name, sum exponents and drop the zero sums
    pub fn from_elements(elements: impl IntoIterator<Item = DimensionElement>) -> Self {
        let mut merged: Vec<DimensionElement> = Vec::new();
        for element in elements {
            match merged.iter_mut().find(|e| e.name == element.name) {
                Some(existing) => {
                    existing.exponent = existing.exponent.saturating_add(element.exponent)
                }
                None => merged.push(element),
            }
        }
        merged.retain(|e| e.exponent != 0);
        if merged.is_empty() {
            return DIMENSIONLESS;
        }
        Self { elements: merged }
    }

    /// Single name with the given exponent
    pub fn of(name: impl Into<String>, exponent: i32) -> Self {
        Self::from_elements([DimensionElement::new(name, exponent)])
    }

    pub fn is_dimensionless(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn elements(&self) -> &[DimensionElement] {
        &self.elements
    }

    /// Net exponent of `name`, 0 when absent
    pub fn exponent_of(&self, name: &str) -> i32 {
        self.elements
            .iter()
            .find(|e| e.name == name)
            .map_or(0, |e| e.exponent)
    }

    pub fn power(&self, n: i32) -> Self {
        Self::from_elements(
            self.elements
                .iter()
                .map(|e| DimensionElement::new(e.name.clone(), e.exponent.saturating_mul(n))),
        )
    }

    pub fn multiply(&self, other: &DimensionVector) -> Self {
        Self::from_elements(self.elements.iter().chain(&other.elements).cloned())
    }

    pub fn divide(&self, other: &DimensionVector) -> Self {
        self.multiply(&other.power(-1))
    }
}

impl PartialEq for DimensionVector {
    fn eq(&self, other: &Self) -> bool {
        self.elements.len() == other.elements.len()
            && self
                .elements
                .iter()
                .all(|e| other.exponent_of(&e.name) == e.exponent)
    }
}

impl Eq for DimensionVector {}

impl fmt::Display for DimensionVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elements.is_empty() {
            return write!(f, "1");
        }
        let parts: Vec<String> = self
            .elements
            .iter()
            .map(|e| match e.exponent {
                1 => e.name.clone(),
                n => format!("{}^{}", e.name, n),
            })
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}
