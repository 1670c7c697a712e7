//! Helpers shared by the operation payload builders and the dispatcher.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::{Error, ValidationErrorKind};

/// Page size requested by every list operation.
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 300;

/// True for payloads that should be sent without a body (or query): null,
/// `false`, empty strings, empty arrays and empty objects.
///
/// Numbers, including `0`, and non-empty strings, including `"0"`, are always
/// sent. Only the JSON shapes that cannot carry a value are treated as empty.
pub(crate) fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Number(_) => false,
    }
}

/// Flatten an object payload into query string pairs.
///
/// Strings are used verbatim, numbers and booleans as their JSON text, nulls
/// are dropped, nested arrays and objects are JSON-encoded. Non-object
/// payloads produce no pairs.
pub(crate) fn query_pairs(payload: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = payload else {
        return Vec::new();
    };

    map.iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::Null => return None,
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            Some((key.clone(), value))
        })
        .collect()
}

/// Convert a loose input mapping into a typed request.
pub(crate) fn from_input<T: DeserializeOwned>(input: Value) -> Result<T, Error> {
    serde_json::from_value(input).map_err(Error::invalid_input)
}

/// Validate a path identifier and encode it as a single path segment.
pub(crate) fn path_segment(field: &'static str, value: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(ValidationErrorKind::MissingIdentifier(
            field,
        )));
    }
    Ok(urlencoding::encode(trimmed).into_owned())
}

/// `Some(value)` unless the value is absent or an empty string.
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// `Some(value)` unless the value is absent or zero.
pub(crate) fn non_zero(value: Option<i64>) -> Option<i64> {
    value.filter(|v| *v != 0)
}

/// Deserialize a form-style flag: `true`, non-zero numbers, non-empty strings
/// other than `"0"`, and non-empty collections are set; everything else is not.
pub(crate) fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    })
}

/// Deserialize an optional integer given either as a number or a numeric
/// string. Empty strings and nulls are `None`.
pub(crate) fn loose_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_i64()
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("expected an integer, got {n}"))),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, got {s:?}"))),
        other => Err(serde::de::Error::custom(format!(
            "expected an integer, got {other}"
        ))),
    }
}

/// Deserialize an optional text field where `null` stands for an empty string.
pub(crate) fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Deserialize an identifier given either as a string or a number.
pub(crate) fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected an id, got {other}"
        ))),
    }
}

/// Deserialize a list of ids given either as an array or a single string.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        Value::String(s) => Ok(vec![s]),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(s) => Ok(s),
                Value::Number(n) => Ok(n.to_string()),
                other => Err(serde::de::Error::custom(format!(
                    "expected an id, got {other}"
                ))),
            })
            .collect(),
        other => Err(serde::de::Error::custom(format!(
            "expected a list of ids, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainErrorKind;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Flags {
        #[serde(default, deserialize_with = "truthy")]
        flag: bool,
        #[serde(default, deserialize_with = "loose_i64")]
        number: Option<i64>,
        #[serde(default, deserialize_with = "string_list")]
        ids: Vec<String>,
        #[serde(default, deserialize_with = "nullable_string")]
        label: String,
    }

    fn flags(value: Value) -> Flags {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_empty_payloads() {
        assert!(is_empty_payload(&Value::Null));
        assert!(is_empty_payload(&json!(false)));
        assert!(is_empty_payload(&json!("")));
        assert!(is_empty_payload(&json!([])));
        assert!(is_empty_payload(&json!({})));
        assert!(!is_empty_payload(&json!({"a": 1})));
        assert!(!is_empty_payload(&json!(0)));
        assert!(!is_empty_payload(&json!("0")));
        assert!(!is_empty_payload(&json!(true)));
    }

    #[test]
    fn test_query_pairs_flatten_scalars() {
        let pairs = query_pairs(&json!({
            "page_size": 300,
            "status": "active",
            "include": true,
            "skip": null,
        }));

        assert!(pairs.contains(&("page_size".to_string(), "300".to_string())));
        assert!(pairs.contains(&("status".to_string(), "active".to_string())));
        assert!(pairs.contains(&("include".to_string(), "true".to_string())));
        assert_eq!(pairs.len(), 3);
    }

    #[test]
    fn test_query_pairs_encode_nested_values_as_json() {
        let pairs = query_pairs(&json!({"ids": [1, 2]}));
        assert_eq!(pairs, vec![("ids".to_string(), "[1,2]".to_string())]);
    }

    #[test]
    fn test_query_pairs_of_non_object_is_empty() {
        assert!(query_pairs(&Value::Null).is_empty());
        assert!(query_pairs(&json!([1])).is_empty());
    }

    #[test]
    fn test_path_segment_encodes_and_validates() {
        assert_eq!(path_segment("user_id", "u1").unwrap(), "u1");
        assert_eq!(
            path_segment("user_id", "jane@example.com").unwrap(),
            "jane%40example.com"
        );
        assert_eq!(path_segment("meeting_id", "../users").unwrap(), "..%2Fusers");

        let err = path_segment("meeting_id", "  ").unwrap_err();
        assert_eq!(
            err.error_kind,
            DomainErrorKind::Validation(ValidationErrorKind::MissingIdentifier("meeting_id"))
        );
    }

    #[test]
    fn test_non_empty_and_non_zero() {
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(Some("x")), Some("x"));
        assert_eq!(non_zero(Some(0)), None);
        assert_eq!(non_zero(Some(30)), Some(30));
    }

    #[test]
    fn test_truthy_flags() {
        assert!(flags(json!({"flag": true})).flag);
        assert!(flags(json!({"flag": "on"})).flag);
        assert!(flags(json!({"flag": 1})).flag);
        assert!(!flags(json!({"flag": "0"})).flag);
        assert!(!flags(json!({"flag": ""})).flag);
        assert!(!flags(json!({"flag": null})).flag);
        assert!(!flags(json!({})).flag);
    }

    #[test]
    fn test_loose_i64() {
        assert_eq!(flags(json!({"number": 45})).number, Some(45));
        assert_eq!(flags(json!({"number": "45"})).number, Some(45));
        assert_eq!(flags(json!({"number": ""})).number, None);
        assert!(serde_json::from_value::<Flags>(json!({"number": "soon"})).is_err());
    }

    #[test]
    fn test_loose_string_accepts_numeric_ids() {
        #[derive(Deserialize)]
        struct Id {
            #[serde(deserialize_with = "loose_string")]
            id: String,
        }

        let from_number: Id = serde_json::from_value(json!({"id": 85746065})).unwrap();
        let from_string: Id = serde_json::from_value(json!({"id": "m1"})).unwrap();
        assert_eq!(from_number.id, "85746065");
        assert_eq!(from_string.id, "m1");
        assert!(serde_json::from_value::<Id>(json!({"id": [1]})).is_err());
    }

    #[test]
    fn test_nullable_string() {
        assert_eq!(flags(json!({"label": "Europe/Helsinki"})).label, "Europe/Helsinki");
        assert_eq!(flags(json!({"label": null})).label, "");
        assert_eq!(flags(json!({})).label, "");
        assert!(serde_json::from_value::<Flags>(json!({"label": 5})).is_err());
    }

    #[test]
    fn test_string_list() {
        assert_eq!(flags(json!({"ids": ["a", "b"]})).ids, vec!["a", "b"]);
        assert_eq!(flags(json!({"ids": "a"})).ids, vec!["a"]);
        assert!(flags(json!({"ids": ""})).ids.is_empty());
        assert!(flags(json!({})).ids.is_empty());
    }
}
