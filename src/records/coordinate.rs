use serde_json::Value;

use super::record::Record;

pub const LATITUDE_FIELD: &str = "latitude";
pub const LONGITUDE_FIELD: &str = "longitude";

pub fn is_coordinate_field(field_name: &str) -> bool {
    field_name == LATITUDE_FIELD || field_name == LONGITUDE_FIELD
}

/// Check whether a latitude or longitude value is usable for a point geometry.
///
/// The value is rejected by the first matching rule, in order:
/// 1. absent (treated as the empty string),
/// 2. falsy: empty string, `null`, `false`, numeric zero, empty array or object,
/// 3. one of the zero literals `"0"`, `"0.0"`, `0`, `0.0`,
/// 4. not coercible to a finite number, e.g. `"abc"`, `"nan"`, `true`, arrays,
/// 5. coerces to zero, e.g. `"00"`, `" 0"`, `"-0"`.
pub fn is_valid_coordinate(value: Option<&Value>) -> bool {
    let absent = Value::String(String::new());
    let value = value.unwrap_or(&absent);

    if is_falsy(value) || is_zero_literal(value) {
        return false;
    }
    match coerce_coordinate(value) {
        Some(coordinate) => coordinate != 0.0,
        None => false,
    }
}

/// Both coordinates of the record must pass `is_valid_coordinate` independently.
pub fn has_valid_coordinates(record: &Record) -> bool {
    is_valid_coordinate(record.get(LATITUDE_FIELD))
        && is_valid_coordinate(record.get(LONGITUDE_FIELD))
}

/// Coerce a coordinate value to `f64`. Numbers pass through unchanged, strings are parsed after
/// trimming surrounding whitespace. Non-finite results are rejected.
pub fn coerce_coordinate(value: &Value) -> Option<f64> {
    let coordinate = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    coordinate.is_finite().then_some(coordinate)
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn is_zero_literal(value: &Value) -> bool {
    match value {
        Value::String(text) => text == "0" || text == "0.0",
        Value::Number(number) => number.as_f64() == Some(0.0),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::{json, Value};

    use super::{coerce_coordinate, has_valid_coordinates, is_valid_coordinate};
    use crate::records::record::Record;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(fields) => fields,
            other => panic!("Expected an object, got {}", other),
        }
    }

    #[rstest]
    #[case(json!("40.0"), true)]
    #[case(json!("-75.1652"), true)]
    #[case(json!(" 12.5 "), true)]
    #[case(json!("1e-3"), true)]
    #[case(json!(40), true)]
    #[case(json!(-75.5), true)]
    #[case(json!(""), false)]
    #[case(json!(null), false)]
    #[case(json!(false), false)]
    #[case(json!(0), false)]
    #[case(json!(0.0), false)]
    #[case(json!(-0.0), false)]
    #[case(json!("0"), false)]
    #[case(json!("0.0"), false)]
    #[case(json!("00"), false)] // Not a zero literal, caught after coercion.
    #[case(json!(" 0"), false)]
    #[case(json!("-0"), false)]
    #[case(json!("0e0"), false)]
    #[case(json!("north"), false)]
    #[case(json!("nan"), false)]
    #[case(json!("inf"), false)]
    #[case(json!(true), false)]
    #[case(json!([40.0]), false)]
    #[case(json!({"value": 40.0}), false)]
    fn test_is_valid_coordinate(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(is_valid_coordinate(Some(&value)), expected);
    }

    #[test]
    fn test_absent_coordinate_is_invalid() {
        assert!(!is_valid_coordinate(None));
    }

    #[rstest]
    #[case(json!({"latitude": "40.0", "longitude": "-75.0"}), true)]
    #[case(json!({"latitude": 40.0, "longitude": -75.0, "name": "X"}), true)]
    #[case(json!({"latitude": "40.0", "longitude": ""}), false)]
    #[case(json!({"latitude": 0, "longitude": -75.0}), false)]
    #[case(json!({"latitude": "40.0"}), false)]
    #[case(json!({"longitude": "-75.0"}), false)]
    #[case(json!({"Latitude": "40.0", "Longitude": "-75.0"}), false)]
    fn test_has_valid_coordinates(#[case] value: Value, #[case] expected: bool) {
        assert_eq!(has_valid_coordinates(&record(value)), expected);
    }

    #[rstest]
    #[case(json!("40.7128"), Some(40.7128))]
    #[case(json!("\t-74.006\n"), Some(-74.006))]
    #[case(json!(-74.006), Some(-74.006))]
    #[case(json!(12), Some(12.0))]
    #[case(json!("12,5"), None)]
    #[case(json!(true), None)]
    #[case(json!(null), None)]
    fn test_coerce_coordinate(#[case] value: Value, #[case] expected: Option<f64>) {
        assert_eq!(coerce_coordinate(&value), expected);
    }
}
