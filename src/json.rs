//! JSON encoding and decoding of bound data trees
//!
//! Emission validates the tree first and renders it in one of two layouts:
//!
//! - [`JsonFormat::Rfc7951`]: lists as arrays of entries, 64-bit integers and
//!   decimal64 leaves as strings
//! - [`JsonFormat::Internal`]: lists as objects keyed by their key leaf
//!
//! Unmarshalling accepts either layout, qualified or unqualified member names,
//! and always produces a fresh, validated struct.
//!
//! # Example
//!
//! ```
//! use rust_yangdemo::employee::Device;
//! use rust_yangdemo::{EmitJsonConfig, emit_json, unmarshal};
//!
//! let mut device = Device::new();
//! device.new_employee("Augustus").unwrap().age = Some(33);
//!
//! let config = EmitJsonConfig::default().with_module_names(true);
//! let json = emit_json(&device, &config).unwrap();
//! assert!(json.contains("\"employee:employee\""));
//!
//! let decoded: Device = unmarshal(&json).unwrap();
//! assert_eq!(decoded, device);
//! ```

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, YangError};
use crate::schema::{NodeKind, ROOT_PATH, Schema, SchemaNode};
use crate::tree::YangStruct;
use crate::types::{cast_from_rfc7951, cast_to_rfc7951, key_string};

/// Layout of the emitted JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// RFC 7951 (JSON encoding of YANG data)
    #[default]
    Rfc7951,
    /// Lists keyed by their key leaf, numbers kept native
    Internal,
}

/// Formatting options for [`emit_json`].
///
/// Options only change the text, never the decoded value set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitJsonConfig {
    pub format: JsonFormat,
    /// Whitespace written per nesting level; empty emits compact JSON
    pub indent: String,
    /// Qualify top-level member names with their module, e.g. "person:person"
    pub append_module_name: bool,
}

impl Default for EmitJsonConfig {
    fn default() -> Self {
        Self {
            format: JsonFormat::Rfc7951,
            indent: "  ".to_string(),
            append_module_name: false,
        }
    }
}

impl EmitJsonConfig {
    /// Compact output on a single line
    #[must_use]
    pub fn compact() -> Self {
        Self::default().with_indent("")
    }

    #[must_use]
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    #[must_use]
    pub fn with_module_names(mut self, append: bool) -> Self {
        self.append_module_name = append;
        self
    }

    fn check(&self) -> Result<()> {
        if self
            .indent
            .chars()
            .all(|c| matches!(c, ' ' | '\t' | '\n' | '\r'))
        {
            Ok(())
        } else {
            Err(YangError::InvalidConfig(format!(
                "indent {:?} is not JSON whitespace",
                self.indent
            )))
        }
    }
}

/// Validate `node` and render it as JSON text
pub fn emit_json<T: YangStruct>(node: &T, config: &EmitJsonConfig) -> Result<String> {
    let value = construct_json(node, config)?;
    write_json(&value, &config.indent)
}

/// Validate `node` and render it as a JSON value
pub fn construct_json<T: YangStruct>(node: &T, config: &EmitJsonConfig) -> Result<Value> {
    config.check()?;
    let schema = T::schema()?;
    let tree = node.to_tree()?;
    schema.validate_at(T::SCHEMA_PATH, &tree)?;

    let Value::Object(members) = &tree else {
        return Err(YangError::Parse(format!(
            "{} does not serialize to an object",
            T::SCHEMA_PATH
        )));
    };
    let rendered = render_children(schema, T::SCHEMA_PATH, members, config)?;
    Ok(Value::Object(rendered))
}

/// Parse JSON text into a new, validated `T`
pub fn unmarshal<T: YangStruct>(json: &str) -> Result<T> {
    let value: Value = serde_json::from_str(json)?;
    unmarshal_value(&value)
}

/// Build a new, validated `T` from an already parsed JSON value
pub fn unmarshal_value<T: YangStruct>(value: &Value) -> Result<T> {
    let schema = T::schema()?;
    let tree = Value::Object(normalize_children(schema, T::SCHEMA_PATH, value)?);
    schema.validate_at(T::SCHEMA_PATH, &tree)?;
    T::from_tree(tree)
}

fn write_json(value: &Value, indent: &str) -> Result<String> {
    if indent.is_empty() {
        return Ok(serde_json::to_string(value)?);
    }

    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
}

fn render_children(
    schema: &Schema,
    parent: &str,
    members: &Map<String, Value>,
    config: &EmitJsonConfig,
) -> Result<Map<String, Value>> {
    let mut out = Map::new();

    for (name, value) in members {
        let node = schema
            .child(parent, name)
            .ok_or_else(|| YangError::NodeNotFound(schema.child_path(parent, name)))?;

        let member = if config.append_module_name && parent == ROOT_PATH {
            format!("{}:{}", schema.module_name, name)
        } else {
            name.clone()
        };

        let rendered = match node.kind {
            NodeKind::Leaf => match (&node.yang_type, config.format) {
                (Some(t), JsonFormat::Rfc7951) => cast_to_rfc7951(value, t),
                _ => value.clone(),
            },
            NodeKind::Container => {
                let members = as_object(node, value)?;
                Value::Object(render_children(schema, &node.identifier, members, config)?)
            }
            NodeKind::List => render_list(schema, node, as_object(node, value)?, config)?,
        };
        out.insert(member, rendered);
    }

    Ok(out)
}

fn render_list(
    schema: &Schema,
    node: &SchemaNode,
    entries: &Map<String, Value>,
    config: &EmitJsonConfig,
) -> Result<Value> {
    match config.format {
        JsonFormat::Rfc7951 => {
            let mut arr = Vec::with_capacity(entries.len());
            for entry in entries.values() {
                let rendered =
                    render_children(schema, &node.identifier, as_object(node, entry)?, config)?;
                arr.push(Value::Object(rendered));
            }
            Ok(Value::Array(arr))
        }
        JsonFormat::Internal => {
            let mut map = Map::new();
            for (key, entry) in entries {
                let rendered =
                    render_children(schema, &node.identifier, as_object(node, entry)?, config)?;
                map.insert(key.clone(), Value::Object(rendered));
            }
            Ok(Value::Object(map))
        }
    }
}

fn as_object<'v>(node: &SchemaNode, value: &'v Value) -> Result<&'v Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        YangError::Parse(format!(
            "{}: expected object, found {}",
            node.identifier, value
        ))
    })
}

/// Strip module qualifiers, fold list arrays into keyed maps and cast leaves
/// to their canonical representation.
fn normalize_children(
    schema: &Schema,
    parent: &str,
    value: &Value,
) -> Result<Map<String, Value>> {
    let Value::Object(members) = value else {
        return Err(YangError::Parse(format!(
            "{}: expected object, found {}",
            parent, value
        )));
    };

    let mut out = Map::new();
    for (member, v) in members {
        let name = match member.split_once(':') {
            Some((module, local)) if module == schema.module_name => local,
            Some((module, _)) => {
                return Err(YangError::Parse(format!(
                    "{}: unknown module '{}' in member '{}'",
                    parent, module, member
                )));
            }
            None => member.as_str(),
        };

        let node = schema.child(parent, name).ok_or_else(|| {
            YangError::Parse(format!("{}: unknown member '{}'", parent, member))
        })?;

        let normalized = match node.kind {
            NodeKind::Leaf => match &node.yang_type {
                Some(t) => cast_from_rfc7951(v, t),
                None => v.clone(),
            },
            NodeKind::Container => Value::Object(normalize_children(schema, &node.identifier, v)?),
            NodeKind::List => Value::Object(normalize_list(schema, node, v)?),
        };

        if out.insert(name.to_string(), normalized).is_some() {
            return Err(YangError::Parse(format!(
                "{}: member '{}' given more than once",
                parent, name
            )));
        }
    }

    Ok(out)
}

fn normalize_list(
    schema: &Schema,
    node: &SchemaNode,
    value: &Value,
) -> Result<Map<String, Value>> {
    let key_name = node.key.as_deref().unwrap_or_default();
    let mut out = Map::new();

    match value {
        Value::Array(entries) => {
            for entry in entries {
                let normalized = normalize_children(schema, &node.identifier, entry)?;
                let key = normalized.get(key_name).map(key_string).ok_or_else(|| {
                    YangError::Validation(vec![format!(
                        "{}: list entry missing key leaf {}",
                        node.identifier, key_name
                    )])
                })?;
                if out.contains_key(&key) {
                    return Err(YangError::Validation(vec![format!(
                        "{}: duplicate entry for key {}={}",
                        node.identifier, key_name, key
                    )]));
                }
                out.insert(key, Value::Object(normalized));
            }
        }
        Value::Object(entries) => {
            for (key, entry) in entries {
                let normalized = normalize_children(schema, &node.identifier, entry)?;
                out.insert(key.clone(), Value::Object(normalized));
            }
        }
        other => {
            return Err(YangError::Parse(format!(
                "{}: expected list, found {}",
                node.identifier, other
            )));
        }
    }

    Ok(out)
}
