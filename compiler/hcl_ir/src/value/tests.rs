#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;

#[test]
fn test_parse_integers_and_fractions() {
    assert_eq!(Number::parse("42").map(|n| n.as_f64()), Ok(42.0));
    assert_eq!(Number::parse("-7").map(|n| n.as_f64()), Ok(-7.0));
    assert_eq!(Number::parse("+3.25").map(|n| n.as_f64()), Ok(3.25));
    assert_eq!(Number::parse("1e3").map(|n| n.as_f64()), Ok(1000.0));
    assert_eq!(Number::parse("2.5E-1").map(|n| n.as_f64()), Ok(0.25));
}

#[test]
fn test_parse_rejects_malformed_text() {
    assert_eq!(Number::parse(""), Err(NumberError::Empty));
    for bad in ["abc", "1.", ".5", "1e", "0x10", "inf", "NaN", " 1", "1 ", "--1", "1.2.3"] {
        assert_eq!(Number::parse(bad), Err(NumberError::Invalid), "input {bad:?}");
    }
}

#[test]
fn test_parse_exponent_beyond_f64() {
    let big = Number::parse("1e400").unwrap();
    assert_eq!(big.to_string(), "1e400");
    assert_eq!(big.as_f64(), f64::INFINITY);
    assert_eq!(big.as_index(), None);

    let tiny = Number::parse("-2.5e-400").unwrap();
    assert_eq!(tiny.to_string(), "-2.5e-400");
    assert_eq!(tiny.as_f64(), 0.0);
}

#[test]
fn test_parse_keeps_large_integers_exact() {
    let n = Number::parse("9007199254740993").unwrap();
    assert_eq!(n.as_index(), Some(9_007_199_254_740_993));
    assert_eq!(n.to_string(), "9007199254740993");
    assert_ne!(n, Number::parse("9007199254740992").unwrap());
}

#[test]
fn test_parse_unrepresentable_exponent() {
    assert_eq!(Number::parse("1e99999999999"), Err(NumberError::OutOfRange));
}

#[test]
fn test_equal_values_compare_equal() {
    assert_eq!(Number::parse("1.50").unwrap(), Number::parse("15e-1").unwrap());
    assert_eq!(Number::parse("100").unwrap(), Number::parse("1e2").unwrap());
    assert_eq!(Number::parse("007").unwrap(), Number::from(7));
}

#[test]
fn test_display_forms() {
    let shown = |text: &str| Number::parse(text).unwrap().to_string();
    assert_eq!(shown("1.25"), "1.25");
    assert_eq!(shown("0.001"), "0.001");
    assert_eq!(shown("1e20"), "100000000000000000000");
    assert_eq!(shown("1e21"), "1e21");
    assert_eq!(shown("-0.0"), "0");
}

#[test]
fn test_from_f64() {
    assert_eq!(Number::from_f64(1.5), Ok(Number::parse("1.5").unwrap()));
    assert_eq!(Number::from_f64(f64::NAN), Err(NumberError::OutOfRange));
}

#[test]
fn test_negative_zero_is_zero() {
    let neg = Number::parse("-0").unwrap();
    let pos = Number::parse("0").unwrap();
    assert_eq!(neg, pos);
}

#[test]
fn test_as_index() {
    assert_eq!(Number::from(3).as_index(), Some(3));
    assert_eq!(Number::parse("1.5").unwrap().as_index(), None);
    assert_eq!(Number::parse("-1").unwrap().as_index(), None);
    assert_eq!(Number::parse("2e3").unwrap().as_index(), Some(2000));
    assert_eq!(Number::parse("1e20").unwrap().as_index(), None);
}

#[test]
fn test_to_number_coercion() {
    assert_eq!(
        Value::from("12").to_number(),
        Ok(Value::Number(Number::from(12)))
    );
    assert_eq!(
        Value::DYNAMIC.to_number(),
        Ok(Value::Unknown(ValueType::Number))
    );
    assert_eq!(Value::Bool(true).to_number(), Err(NumberError::Invalid));
    assert_eq!(Value::from("twelve").to_number(), Err(NumberError::Invalid));
}

#[test]
fn test_literal_and_conversion_agree() {
    let text = "6.02e23";
    let literal = Number::parse(text).unwrap();
    assert_eq!(Value::from(text).to_number(), Ok(Value::Number(literal)));
}

#[test]
fn test_value_display() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Number(Number::from(5)).to_string(), "5");
    assert_eq!(Value::from("hi").to_string(), "\"hi\"");
    assert_eq!(NumberError::Invalid.to_string(), "a number is required");
}
