//! Unit and value-with-unit parser using pest

mod ast;

pub use ast::{ExpressionNode, Factor, UnitNode};

use pest::error::{Error as PestError, LineColLocation};
use pest::Parser;
use pest_derive::Parser;
use tracing::trace;

use crate::error::{Result, UnitError};
use crate::types::{registry, CompositeUnit, PrefixedUnit, RationalUnit, UnitExpression, UnitTerm};

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub struct UnitParser;

/// Parse a unit string such as `"nN"`, `"µm/V"` or `"(kg m)/s²"`.
///
/// A single factor gives an atomic unit, several factors a composite and a
/// slash a rational unit. Long names and aliases are normalized, so
/// `"Newton"` and `"N"` parse to the same unit.
pub fn parse_unit(input: &str) -> Result<PrefixedUnit> {
    let pair = UnitParser::parse(Rule::unit_string, input)
        .map_err(|e| UnitError::malformed_unit(input, describe(&e)))?
        .next()
        .and_then(|p| p.into_inner().find(|p| p.as_rule() == Rule::unit))
        .ok_or_else(|| UnitError::malformed_unit(input, "Expected unit"))?;
    let node = ast::build_unit(pair).map_err(|e| UnitError::malformed_unit(input, e))?;
    trace!(input, ?node, "parsed unit");
    fold_unit(&node).map_err(|e| UnitError::malformed_unit(input, e))
}

/// Parse `"<number> <unit>"`, e.g. `"5 nN"`; the unit may be omitted
pub fn parse_expression(input: &str) -> Result<UnitExpression> {
    let pair = UnitParser::parse(Rule::expression, input)
        .map_err(|e| UnitError::malformed_expression(input, describe(&e)))?
        .next()
        .ok_or_else(|| UnitError::malformed_expression(input, "Expected expression"))?;
    let node =
        ast::build_expression(pair).map_err(|e| UnitError::malformed_expression(input, e))?;
    trace!(input, ?node, "parsed expression");
    let unit = match &node.unit {
        Some(unit) => fold_unit(unit).map_err(|e| UnitError::malformed_expression(input, e))?,
        None => PrefixedUnit::dimensionless(),
    };
    Ok(UnitExpression::new(node.value, unit))
}

fn describe(error: &PestError<Rule>) -> String {
    let column = match error.line_col {
        LineColLocation::Pos((_, col)) | LineColLocation::Span((_, col), _) => col,
    };
    format!("at column {column}: {}", error.variant.message())
}

fn fold_unit(node: &UnitNode) -> std::result::Result<PrefixedUnit, String> {
    let numerator = resolve_factors(&node.numerator)?;
    match &node.denominator {
        Some(denominator) => {
            let denominator = resolve_factors(denominator)?;
            Ok(PrefixedUnit::Rational(RationalUnit::from_terms(numerator, denominator)))
        }
        None => match numerator.as_slice() {
            [] => Ok(PrefixedUnit::dimensionless()),
            [term] => Ok(PrefixedUnit::Atomic(term.clone()).simplify()),
            _ => Ok(PrefixedUnit::Composite(CompositeUnit::from_terms(numerator, true))),
        },
    }
}

fn resolve_factors(factors: &[Factor]) -> std::result::Result<Vec<UnitTerm>, String> {
    factors
        .iter()
        .map(|f| {
            registry::resolve(&f.symbol)
                .map(|term| term.power(f.exponent))
                .ok_or_else(|| format!("unknown unit {:?}", f.symbol))
        })
        .collect()
}
