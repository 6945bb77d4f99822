//! Unit and value types

pub mod composite;
pub mod rational;
pub mod registry;
pub mod term;
pub mod time;
mod unit;
mod value;

pub use composite::CompositeUnit;
pub use rational::RationalUnit;
pub use registry::{UnitDef, UnitKind, UNITS};
pub use term::{SimpleUnit, UnitTerm};
pub use time::TimeUnit;
pub use unit::PrefixedUnit;
pub use value::UnitExpression;

/// Dimension name shared by every time unit
pub(crate) const SECOND_DIMENSION: &str = time::SECOND_SYMBOL;

/// Values below this magnitude keep their unit when picking a display form
pub const MIN_PREFERRED_MAGNITUDE: f64 = 1e-12;

/// Largest exponent magnitude a single term carries; parsing rejects
/// anything beyond it and powers saturate at it
pub const MAX_TERM_EXPONENT: i32 = 1000;

const INTEGER_TOLERANCE: f64 = 1e-12;

/// Keep a term exponent inside `±MAX_TERM_EXPONENT`
pub(crate) fn clamp_exponent(exponent: i32) -> i32 {
    exponent.clamp(-MAX_TERM_EXPONENT, MAX_TERM_EXPONENT)
}

/// `exponent * n`, saturating at `±MAX_TERM_EXPONENT`
pub(crate) fn scale_exponent(exponent: i32, n: i32) -> i32 {
    clamp_exponent(exponent.saturating_mul(n))
}

/// 10^exponent, exact for integral exponents in either direction
pub(crate) fn power_of_ten(exponent: f64) -> f64 {
    let rounded = exponent.round();
    if (exponent - rounded).abs() < INTEGER_TOLERANCE {
        let k = rounded as i32;
        if k >= 0 {
            10f64.powi(k)
        } else {
            1.0 / 10f64.powi(-k)
        }
    } else {
        10f64.powf(exponent)
    }
}

/// value * 10^exponent, dividing for negative integral exponents
pub(crate) fn scale_by_power_of_ten(value: f64, exponent: f64) -> f64 {
    let rounded = exponent.round();
    if (exponent - rounded).abs() < INTEGER_TOLERANCE && rounded < 0.0 {
        value / 10f64.powi(-(rounded as i32))
    } else {
        value * power_of_ten(exponent)
    }
}

/// Largest multiple of 3 not above `x`
pub(crate) fn floor_to_multiple_of_3(x: f64) -> i32 {
    (x.floor() as i32).div_euclid(3) * 3
}
