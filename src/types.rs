//! YANG leaf type definitions, checks and RFC 7951 value casting

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde_json::Value;
use std::collections::HashMap;

/// Represents YANG data types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YangType {
    String,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Decimal64,
    Binary,
    Boolean,
    Empty,
    Identityref,
    Leafref,
    /// Enumeration with name-to-value mapping
    Enumeration(HashMap<String, i64>),
    /// Union of multiple types
    Union(Vec<YangType>),
    /// Unknown/unrecognized type, accepted without checks
    Unknown(String),
}

impl YangType {
    /// Parse a YANG type from a schema item's type field
    pub fn from_schema_type(type_value: &Value) -> Self {
        match type_value {
            Value::String(s) => Self::from_string(s),
            Value::Object(map) => {
                // Enumeration: {"value": "name", ...}
                let enum_map: HashMap<String, i64> = map
                    .iter()
                    .filter_map(|(k, v)| {
                        v.as_str()
                            .map(|name| (name.to_string(), k.parse().unwrap_or(0)))
                    })
                    .collect();
                YangType::Enumeration(enum_map)
            }
            Value::Array(arr) => {
                let types: Vec<YangType> = arr.iter().map(Self::from_schema_type).collect();
                YangType::Union(types)
            }
            _ => YangType::Unknown("invalid".to_string()),
        }
    }

    fn from_string(s: &str) -> Self {
        match s {
            "string" => YangType::String,
            "int8" => YangType::Int8,
            "int16" => YangType::Int16,
            "int32" => YangType::Int32,
            "int64" => YangType::Int64,
            "uint8" => YangType::Uint8,
            "uint16" => YangType::Uint16,
            "uint32" => YangType::Uint32,
            "uint64" => YangType::Uint64,
            "decimal64" => YangType::Decimal64,
            "binary" => YangType::Binary,
            "boolean" => YangType::Boolean,
            "empty" => YangType::Empty,
            "identityref" => YangType::Identityref,
            "leafref" => YangType::Leafref,
            other => YangType::Unknown(other.to_string()),
        }
    }

    /// Inclusive value range of the integer types
    fn int_range(&self) -> Option<(i128, i128)> {
        let range = match self {
            YangType::Int8 => (i8::MIN as i128, i8::MAX as i128),
            YangType::Int16 => (i16::MIN as i128, i16::MAX as i128),
            YangType::Int32 => (i32::MIN as i128, i32::MAX as i128),
            YangType::Int64 => (i64::MIN as i128, i64::MAX as i128),
            YangType::Uint8 => (0, u8::MAX as i128),
            YangType::Uint16 => (0, u16::MAX as i128),
            YangType::Uint32 => (0, u32::MAX as i128),
            YangType::Uint64 => (0, u64::MAX as i128),
            _ => return None,
        };
        Some(range)
    }

    /// Types RFC 7951 encodes as JSON strings
    fn is_string_encoded(&self) -> bool {
        matches!(
            self,
            YangType::Int64 | YangType::Uint64 | YangType::Decimal64
        )
    }
}

/// Check a canonical (internal) leaf value against its YANG type.
///
/// Returns a human readable reason on mismatch.
pub fn check_value(value: &Value, yang_type: &YangType) -> std::result::Result<(), String> {
    if let Some((min, max)) = yang_type.int_range() {
        let n = value
            .as_i64()
            .map(i128::from)
            .or_else(|| value.as_u64().map(i128::from))
            .ok_or_else(|| format!("expected integer, found {}", value))?;
        if n < min || n > max {
            return Err(format!("value {} out of range {}..{}", n, min, max));
        }
        return Ok(());
    }

    match yang_type {
        YangType::String | YangType::Identityref | YangType::Leafref => match value {
            Value::String(_) => Ok(()),
            other => Err(format!("expected string, found {}", other)),
        },

        YangType::Decimal64 => match value {
            Value::Number(_) => Ok(()),
            other => Err(format!("expected decimal64, found {}", other)),
        },

        YangType::Binary => {
            let s = value
                .as_str()
                .ok_or_else(|| format!("expected base64 string, found {}", value))?;
            BASE64
                .decode(s)
                .map(|_| ())
                .map_err(|e| format!("base64 decode: {}", e))
        }

        YangType::Boolean => match value {
            Value::Bool(_) => Ok(()),
            other => Err(format!("expected boolean, found {}", other)),
        },

        YangType::Empty => match value {
            Value::Array(arr) if arr.len() == 1 && arr[0].is_null() => Ok(()),
            other => Err(format!("expected [null], found {}", other)),
        },

        YangType::Enumeration(enum_map) => match value.as_str() {
            Some(name) if enum_map.contains_key(name) => Ok(()),
            _ => Err(format!("enumeration value not found: {}", value)),
        },

        YangType::Union(types) => {
            if types.iter().any(|t| check_value(value, t).is_ok()) {
                Ok(())
            } else {
                Err(format!("{} matches no member of the union", value))
            }
        }

        YangType::Unknown(_) => Ok(()),

        // integer types are handled by the range check above
        _ => Ok(()),
    }
}

/// Cast a canonical leaf value to its RFC 7951 representation
pub fn cast_to_rfc7951(value: &Value, yang_type: &YangType) -> Value {
    match yang_type {
        t if t.is_string_encoded() => match value {
            Value::Number(n) => Value::String(n.to_string()),
            other => other.clone(),
        },

        YangType::Union(types) => {
            // Encode using the first member type the value satisfies
            for t in types {
                if check_value(value, t).is_ok() {
                    return cast_to_rfc7951(value, t);
                }
            }
            value.clone()
        }

        _ => value.clone(),
    }
}

/// Cast an RFC 7951 leaf value back to its canonical representation.
///
/// Values that cannot be cast are returned unchanged so that validation can
/// report them against the schema path.
pub fn cast_from_rfc7951(value: &Value, yang_type: &YangType) -> Value {
    match yang_type {
        YangType::Int64 => match value {
            Value::String(s) => s
                .parse::<i64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or_else(|_| value.clone()),
            other => other.clone(),
        },

        YangType::Uint64 => match value {
            Value::String(s) => s
                .parse::<u64>()
                .map(|n| Value::Number(n.into()))
                .unwrap_or_else(|_| value.clone()),
            other => other.clone(),
        },

        YangType::Decimal64 => match value {
            Value::String(s) => s
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| value.clone()),
            other => other.clone(),
        },

        YangType::Union(types) => {
            for t in types {
                let cast = cast_from_rfc7951(value, t);
                if check_value(&cast, t).is_ok() {
                    return cast;
                }
            }
            value.clone()
        }

        _ => value.clone(),
    }
}

/// Render a key leaf value the way list entries are keyed
pub(crate) fn key_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yang_type_from_string() {
        assert_eq!(YangType::from_string("string"), YangType::String);
        assert_eq!(YangType::from_string("uint32"), YangType::Uint32);
        assert_eq!(YangType::from_string("boolean"), YangType::Boolean);
        assert_eq!(
            YangType::from_string("inet:uri"),
            YangType::Unknown("inet:uri".to_string())
        );
    }

    #[test]
    fn test_yang_type_from_enum_object() {
        let t = YangType::from_schema_type(&json!({"0": "up", "1": "down"}));
        match t {
            YangType::Enumeration(map) => {
                assert_eq!(map.get("up"), Some(&0));
                assert_eq!(map.get("down"), Some(&1));
            }
            other => panic!("expected enumeration, got {:?}", other),
        }
    }

    #[test]
    fn test_check_uint32_range() {
        assert!(check_value(&json!(0), &YangType::Uint32).is_ok());
        assert!(check_value(&json!(4294967295u64), &YangType::Uint32).is_ok());
        assert!(check_value(&json!(4294967296u64), &YangType::Uint32).is_err());
        assert!(check_value(&json!(-1), &YangType::Uint32).is_err());
        assert!(check_value(&json!("33"), &YangType::Uint32).is_err());
    }

    #[test]
    fn test_check_string_and_null() {
        assert!(check_value(&json!("Magellan"), &YangType::String).is_ok());
        assert!(check_value(&json!(""), &YangType::String).is_ok());
        assert!(check_value(&Value::Null, &YangType::String).is_err());
    }

    #[test]
    fn test_check_binary() {
        assert!(check_value(&json!("aGVsbG8="), &YangType::Binary).is_ok());
        assert!(check_value(&json!("not base64!"), &YangType::Binary).is_err());
    }

    #[test]
    fn test_check_empty_and_union() {
        assert!(check_value(&json!([null]), &YangType::Empty).is_ok());
        assert!(check_value(&json!(true), &YangType::Empty).is_err());

        let union = YangType::Union(vec![YangType::Uint8, YangType::String]);
        assert!(check_value(&json!(7), &union).is_ok());
        assert!(check_value(&json!("seven"), &union).is_ok());
        assert!(check_value(&json!(true), &union).is_err());
    }

    #[test]
    fn test_cast_64bit_as_string() {
        let v = cast_to_rfc7951(&json!(9007199254740993u64), &YangType::Uint64);
        assert_eq!(v, json!("9007199254740993"));
        let back = cast_from_rfc7951(&v, &YangType::Uint64);
        assert_eq!(back, json!(9007199254740993u64));
    }

    #[test]
    fn test_cast_leaves_32bit_alone() {
        assert_eq!(cast_to_rfc7951(&json!(33), &YangType::Uint32), json!(33));
        assert_eq!(cast_from_rfc7951(&json!("x"), &YangType::Int64), json!("x"));
    }
}
