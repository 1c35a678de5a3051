//! Serializability check.
//!
//! The real boundary silently drops values it cannot encode. This module walks a
//! return value the same way the platform does and reports the first offending
//! member, using `root`, `root[0]`, `root.key` style paths.

use crate::error::UnsupportedKind;
use crate::value::Value;

/// The first non-serializable member found in a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unserializable {
    pub kind: UnsupportedKind,
    pub path: String,
}

/// Root path name used in reports
pub const ROOT_PATH: &str = "root";

/// Check whether `value` can cross the boundary unchanged.
pub fn check_serializable(value: &Value) -> Result<(), Unserializable> {
    walk(value, ROOT_PATH.to_string())
}

fn walk(value: &Value, path: String) -> Result<(), Unserializable> {
    match value {
        Value::Temporal(_) => Err(Unserializable {
            kind: UnsupportedKind::Temporal,
            path,
        }),
        Value::Number(n) if n.is_nan() => Err(Unserializable {
            kind: UnsupportedKind::NaN,
            path,
        }),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| walk(item, format!("{path}[{i}]"))),
        Value::Object(entries) => entries
            .iter()
            .try_for_each(|(key, item)| walk(item, format!("{path}.{key}"))),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Text(_) => Ok(()),
    }
}

/// Encode a value in its wire form.
///
/// Fails exactly when [`check_serializable`] does. Infinite numbers encode as
/// `null`, like the runtime's JSON encoder.
pub fn to_json(value: &Value) -> Result<serde_json::Value, Unserializable> {
    check_serializable(value)?;
    Ok(encode(value))
}

fn encode(value: &Value) -> serde_json::Value {
    match value {
        Value::Null | Value::Temporal(_) => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Text(s) => serde_json::Value::String(s.clone()),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(encode).collect()),
        Value::Object(entries) => serde_json::Value::Object(
            entries
                .iter()
                .map(|(k, v)| (k.clone(), encode(v)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetfake_core::Temporal;

    fn temporal() -> Value {
        Value::from(Temporal::from_fields(2026, 1, 27, 9, 0, 0))
    }

    #[test]
    fn test_scalars() {
        assert!(check_serializable(&Value::Null).is_ok());
        assert!(check_serializable(&Value::from("x")).is_ok());
        assert!(check_serializable(&Value::from(f64::INFINITY)).is_ok());
        assert_eq!(
            check_serializable(&temporal()),
            Err(Unserializable {
                kind: UnsupportedKind::Temporal,
                path: "root".into()
            })
        );
        assert_eq!(
            check_serializable(&Value::from(f64::NAN)).unwrap_err().kind,
            UnsupportedKind::NaN
        );
    }

    #[test]
    fn test_nested_paths() {
        let value = Value::object([
            ("ok", Value::from(true)),
            (
                "rows",
                Value::Array(vec![
                    Value::Array(vec![Value::from("a")]),
                    Value::Array(vec![Value::from("b"), temporal()]),
                ]),
            ),
        ]);
        assert_eq!(check_serializable(&value).unwrap_err().path, "root.rows[1][1]");

        let value = Value::Array(vec![Value::object([("total", Value::from(f64::NAN))])]);
        let err = check_serializable(&value).unwrap_err();
        assert_eq!(err.path, "root[0].total");
        assert_eq!(err.kind, UnsupportedKind::NaN);
    }

    #[test]
    fn test_reports_first_offender() {
        let value = Value::Array(vec![Value::from(f64::NAN), temporal()]);
        assert_eq!(check_serializable(&value).unwrap_err().path, "root[0]");
    }

    #[test]
    fn test_to_json() {
        let value = Value::object([("n", Value::from(2)), ("inf", Value::from(f64::INFINITY))]);
        assert_eq!(to_json(&value).unwrap(), serde_json::json!({"n": 2.0, "inf": null}));
        assert!(to_json(&temporal()).is_err());
    }
}
