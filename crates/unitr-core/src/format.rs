//! Display helpers: number rounding and exponent rendering

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Rendering options for value+unit pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    /// Significant digits kept when rounding the value
    pub significant_digits: u32,
    /// Render exponents as Unicode superscripts (m² instead of m^2)
    pub pretty: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            significant_digits: 6,
            pretty: false,
        }
    }
}

impl FormatOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

/// Magnitudes outside this window are printed in scientific notation
const PLAIN_MIN: f64 = 1e-9;
const PLAIN_MAX: f64 = 1e15;

/// Format a number to `digits` significant digits, trailing zeros removed
pub fn format_number(value: f64, digits: u32) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    let digits = digits.max(1);

    let magnitude = value.abs();
    if !(PLAIN_MIN..PLAIN_MAX).contains(&magnitude) {
        return format_scientific(value, digits);
    }

    Decimal::from_f64(value)
        .and_then(|d| d.round_sf(digits))
        .map(|d| d.normalize().to_string())
        .unwrap_or_else(|| format_scientific(value, digits))
}

fn format_scientific(value: f64, digits: u32) -> String {
    let formatted = format!("{:.*e}", (digits - 1) as usize, value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => {
            let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
            format!("{mantissa}e{exponent}")
        }
        _ => formatted,
    }
}

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];
const SUPERSCRIPT_MINUS: char = '⁻';

/// Render an integer with Unicode superscript characters
pub fn superscript(n: i32) -> String {
    let mut out = String::new();
    if n < 0 {
        out.push(SUPERSCRIPT_MINUS);
    }
    for c in n.unsigned_abs().to_string().chars() {
        if let Some(d) = c.to_digit(10) {
            out.push(SUPERSCRIPT_DIGITS[d as usize]);
        }
    }
    out
}

/// Parse a run of superscript characters back into an integer
pub fn parse_superscript(text: &str) -> Option<i32> {
    let (negative, digits) = match text.strip_prefix(SUPERSCRIPT_MINUS) {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() {
        return None;
    }
    let mut n: i32 = 0;
    for c in digits.chars() {
        let d = SUPERSCRIPT_DIGITS.iter().position(|s| *s == c)? as i32;
        n = n.checked_mul(10)?.checked_add(d)?;
    }
    Some(if negative { -n } else { n })
}

/// `symbol` raised to `exponent`; exponent 1 is left implicit
pub(crate) fn format_power(symbol: &str, exponent: i32, pretty: bool) -> String {
    match exponent {
        1 => symbol.to_string(),
        n if pretty => format!("{symbol}{}", superscript(n)),
        n => format!("{symbol}^{n}"),
    }
}

/// Join the factors of one side of a slash, parenthesized when there are several
pub(crate) fn format_side(factors: &[String]) -> String {
    match factors {
        [] => "1".to_string(),
        [single] => single.clone(),
        many => format!("({})", many.join(" ")),
    }
}

/// Render "num/den" from already formatted factors; no slash for an empty denominator
pub(crate) fn format_fraction(numerator: &[String], denominator: &[String]) -> String {
    if denominator.is_empty() {
        if numerator.is_empty() {
            return String::new();
        }
        return format_side(numerator);
    }
    format!("{}/{}", format_side(numerator), format_side(denominator))
}
