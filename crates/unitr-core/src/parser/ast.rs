//! Syntax tree for unit and value-with-unit strings

use pest::iterators::Pair;

use crate::format::parse_superscript;
use crate::types::MAX_TERM_EXPONENT;

use super::Rule;

/// One `symbol^exponent` factor as written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factor {
    pub symbol: String,
    pub exponent: i32,
}

/// A unit string: factors above the slash and, if present, below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitNode {
    pub numerator: Vec<Factor>,
    pub denominator: Option<Vec<Factor>>,
}

/// A number optionally followed by a unit
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionNode {
    pub value: f64,
    pub unit: Option<UnitNode>,
}

/// Parse a number with "." as decimal separator; accepts NaN and inf
pub fn parse_number_str(s: &str) -> Result<f64, String> {
    s.parse::<f64>().map_err(|e| format!("invalid number {s:?}: {e}"))
}

pub fn build_expression(pair: Pair<'_, Rule>) -> Result<ExpressionNode, String> {
    let mut value = None;
    let mut unit = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::number => value = Some(parse_number_str(inner.as_str())?),
            Rule::unit => unit = Some(build_unit(inner)?),
            _ => {}
        }
    }
    let value = value.ok_or("Expected number")?;
    Ok(ExpressionNode { value, unit })
}

pub fn build_unit(pair: Pair<'_, Rule>) -> Result<UnitNode, String> {
    let mut numerator = None;
    let mut denominator = None;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::numerator => numerator = Some(build_side(inner)?),
            Rule::denominator => denominator = Some(build_side(inner)?),
            _ => {}
        }
    }
    Ok(UnitNode {
        numerator: numerator.ok_or("Expected unit")?,
        denominator,
    })
}

/// Factors of one slash side; "1" is the empty product
fn build_side(pair: Pair<'_, Rule>) -> Result<Vec<Factor>, String> {
    let mut factors = Vec::new();
    for inner in pair.into_inner() {
        if inner.as_rule() == Rule::product {
            for factor in inner.into_inner() {
                factors.push(build_factor(factor)?);
            }
        }
    }
    Ok(factors)
}

fn build_factor(pair: Pair<'_, Rule>) -> Result<Factor, String> {
    let mut inner = pair.into_inner();
    let symbol = inner.next().ok_or("Expected unit symbol")?.as_str().to_string();
    let exponent = match inner.next() {
        Some(power) => build_power(power)?,
        None => 1,
    };
    Ok(Factor { symbol, exponent })
}

fn build_power(pair: Pair<'_, Rule>) -> Result<i32, String> {
    let inner = pair.into_inner().next().ok_or("Expected exponent")?;
    let exponent = match inner.as_rule() {
        Rule::integer => inner
            .as_str()
            .parse::<i32>()
            .map_err(|e| format!("invalid exponent {:?}: {e}", inner.as_str()))?,
        Rule::superscript => parse_superscript(inner.as_str())
            .ok_or_else(|| format!("invalid exponent {:?}", inner.as_str()))?,
        _ => return Err("Expected exponent".to_string()),
    };
    if exponent.unsigned_abs() > MAX_TERM_EXPONENT.unsigned_abs() {
        return Err(format!("exponent {exponent} is out of range ±{MAX_TERM_EXPONENT}"));
    }
    Ok(exponent)
}
