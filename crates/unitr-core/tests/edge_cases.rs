use pretty_assertions::assert_eq;
use unitr_core::{
    parse_expression, parse_unit, CompositeUnit, PrefixedUnit, SiPrefix, UnitError,
    UnitExpression, UnitTerm, MAX_TERM_EXPONENT,
};

#[test]
fn test_nan_propagates_and_compares_equal() {
    let nan = UnitExpression::new(f64::NAN, PrefixedUnit::simple("m", SiPrefix::Empty));
    let one = UnitExpression::new(1.0, PrefixedUnit::simple("m", SiPrefix::Empty));
    let sum = nan.add(&one);
    assert!(sum.as_ref().is_ok_and(UnitExpression::is_nan));
    assert_eq!(sum, Ok(nan.clone()));
    assert_eq!(nan.derive_simple_form(), nan);
    assert_eq!(nan.to_string(), "NaN m");
}

#[test]
fn test_infinite_values_keep_their_unit() {
    let inf = UnitExpression::new(f64::INFINITY, PrefixedUnit::simple("N", SiPrefix::Nano));
    assert_eq!(inf.derive_simple_form(), inf);
    assert_eq!(inf.to_string(), "inf nN");
}

#[test]
fn test_division_by_zero_value() {
    let e = parse_expression("1 m").and_then(|a| Ok(a.divide(&parse_expression("0 s")?)));
    assert!(e.is_ok_and(|e| e.value().is_infinite()));
}

#[test]
fn test_negative_values_use_magnitude_for_prefix() {
    let e = parse_expression("-5000 nN").map(|e| e.derive_simple_form().to_string());
    assert_eq!(e, Ok("-5 µN".to_string()));
}

#[test]
fn test_registry_edges() {
    let tera = parse_unit("Tm").map(|u| u.next());
    assert_eq!(tera, Ok(None));

    // Beyond tera there is nothing to move to
    let huge = parse_expression("5e20 Tm").map(|e| e.derive_simple_form().to_string());
    assert_eq!(huge, Ok("5e20 Tm".to_string()));
}

#[test]
fn test_irregular_prefixes_navigate_to_natural_ones() {
    assert_eq!(
        PrefixedUnit::simple("m", SiPrefix::Centi).next(),
        Some(PrefixedUnit::simple("m", SiPrefix::Empty))
    );
    assert_eq!(
        PrefixedUnit::simple("m", SiPrefix::Centi).previous(),
        Some(PrefixedUnit::simple("m", SiPrefix::Milli))
    );
    assert_eq!(
        PrefixedUnit::simple("m", SiPrefix::Deca).next(),
        Some(PrefixedUnit::simple("m", SiPrefix::Kilo))
    );
}

#[test]
fn test_cancelling_group_keeps_scale() {
    let t = UnitTerm::new;
    let ratio = CompositeUnit::from_terms(
        [t("m", SiPrefix::Kilo), t("m", SiPrefix::Milli).power(-1)],
        true,
    );
    assert!(ratio.dimension().is_dimensionless());
    assert_eq!(ratio.premultiplier_exponent(), 6.0);
    assert_eq!(ratio.to_string(), "km/mm");

    let e = UnitExpression::new(2.0, PrefixedUnit::Composite(ratio));
    let plain = e.derive(&PrefixedUnit::dimensionless()).map(|e| e.value());
    assert_eq!(plain, Ok(2e6));
}

#[test]
fn test_unknown_prefix_lookups() {
    assert_eq!(SiPrefix::from_exponent(4), Err(UnitError::UnknownPrefixExponent(4)));
    assert_eq!(
        SiPrefix::from_alias("zz"),
        Err(UnitError::UnknownPrefixAlias("zz".to_string()))
    );
    assert!(matches!(
        SiPrefix::Tera.multiply(SiPrefix::Kilo),
        Err(UnitError::UnknownPrefixExponent(15))
    ));
}

#[test]
fn test_opaque_units_are_their_own_dimension() {
    let a = parse_unit("counts");
    let b = parse_unit("kcounts");
    assert!(a.is_ok_and(|a| b.is_ok_and(|b| !a.is_compatible(&b))));

    let force = parse_unit("N");
    let decomposed = parse_unit("kg m/s^2");
    assert!(force.is_ok_and(|f| decomposed.is_ok_and(|d| !f.is_compatible(&d))));
}

#[test]
fn test_whitespace_tolerance() {
    assert_eq!(parse_unit("  µm / V "), parse_unit("µm/V"));
    assert_eq!(parse_expression("\t5   nN"), parse_expression("5 nN"));
}

#[test]
fn test_out_of_range_exponents_are_rejected() {
    assert!(matches!(parse_unit("m^70000"), Err(UnitError::MalformedUnitString { .. })));
    assert!(matches!(
        parse_expression("5000 km^1000000000"),
        Err(UnitError::MalformedExpressionString { .. })
    ));
    assert!(parse_unit("m^99999999999").is_err());
    assert!(parse_unit(&format!("m^{MAX_TERM_EXPONENT}")).is_ok());
    assert!(parse_unit(&format!("m^-{MAX_TERM_EXPONENT}")).is_ok());
}

#[test]
fn test_large_powers_saturate() {
    let cube = parse_unit(&format!("km^{MAX_TERM_EXPONENT}"));
    let raised = cube.map(|u| u.power(70000).to_string());
    assert_eq!(raised, Ok(format!("km^{MAX_TERM_EXPONENT}")));

    let inverse = parse_unit("s").map(|u| u.power(i32::MIN).to_string());
    assert_eq!(inverse, Ok(format!("s^-{MAX_TERM_EXPONENT}")));

    let e = parse_expression(&format!("5000 km^{MAX_TERM_EXPONENT}"));
    let simple = e.map(|e| e.derive_simple_form().to_string());
    assert_eq!(simple, Ok(format!("5000 km^{MAX_TERM_EXPONENT}")));
}

#[test]
fn test_term_order_does_not_affect_equality() {
    assert_eq!(parse_unit("km m"), parse_unit("m km"));
    assert_eq!(parse_expression("2 km m"), parse_expression("2 m km"));
    let rendered = parse_unit("m km").map(|u| u.to_string());
    assert_eq!(rendered, Ok("(km m)".to_string()));
}

#[test]
fn test_redistributed_units_are_canonical() {
    let e = parse_expression("5000 km m").map(|e| e.derive_simple_form());
    assert!(e.as_ref().is_ok_and(|e| e.unit().simplify() == *e.unit()));
    assert_eq!(e.map(|e| e.to_string()), Ok("5 km^2".to_string()));
}
