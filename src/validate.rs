//! Schema validation of canonical data trees
//!
//! The canonical tree is a `serde_json::Value` with unqualified member names
//! and lists stored as objects keyed by their key leaf. Every violation is
//! collected so a single call reports all of them.

use serde_json::{Map, Value};

use crate::error::{Result, YangError};
use crate::schema::{NodeKind, ROOT_PATH, Schema, SchemaNode};
use crate::types::{check_value, key_string};

/// Validate `tree` against the schema node at `path`
pub(crate) fn validate_tree(schema: &Schema, path: &str, tree: &Value) -> Result<()> {
    let mut validator = Validator {
        schema,
        errors: Vec::new(),
    };

    if path == ROOT_PATH {
        validator.check_children(ROOT_PATH, ROOT_PATH, tree);
    } else {
        let node = schema
            .node(path)
            .ok_or_else(|| YangError::NodeNotFound(path.to_string()))?;
        match node.kind {
            NodeKind::Container | NodeKind::List => {
                validator.check_children(&node.identifier, &node.identifier, tree)
            }
            NodeKind::Leaf => validator.check_leaf(node, &node.identifier, tree),
        }
    }

    if validator.errors.is_empty() {
        Ok(())
    } else {
        Err(YangError::Validation(validator.errors))
    }
}

struct Validator<'a> {
    schema: &'a Schema,
    errors: Vec<String>,
}

impl Validator<'_> {
    fn report(&mut self, at: &str, msg: impl std::fmt::Display) {
        self.errors.push(format!("{}: {}", at, msg));
    }

    /// Check the members of a fakeroot, container or list entry.
    ///
    /// `schema_path` addresses the schema node, `at` is the instance path used
    /// in messages (they differ inside list entries).
    fn check_children(&mut self, schema_path: &str, at: &str, value: &Value) {
        let Value::Object(members) = value else {
            self.report(at, format_args!("expected object, found {}", value));
            return;
        };
        let schema = self.schema;

        for (name, child) in members {
            let child_at = if at == ROOT_PATH {
                format!("/{}", name)
            } else {
                format!("{}/{}", at, name)
            };

            let Some(node) = schema.child(schema_path, name) else {
                self.report(&child_at, "unknown node");
                continue;
            };

            match node.kind {
                NodeKind::Container => self.check_children(&node.identifier, &child_at, child),
                NodeKind::List => self.check_list(node, &child_at, child),
                NodeKind::Leaf => self.check_leaf(node, &child_at, child),
            }
        }

        self.check_mandatory(schema_path, at, members);
    }

    fn check_mandatory(&mut self, schema_path: &str, at: &str, members: &Map<String, Value>) {
        let key = self.schema.list_key(schema_path);
        let missing: Vec<String> = self
            .schema
            .children(schema_path)
            .filter(|n| n.mandatory || key == Some(n.name.as_str()))
            .filter(|n| !members.contains_key(&n.name))
            .map(|n| n.name.clone())
            .collect();

        for name in missing {
            self.report(at, format_args!("missing mandatory node {}", name));
        }
    }

    fn check_list(&mut self, node: &SchemaNode, at: &str, value: &Value) {
        let Value::Object(entries) = value else {
            self.report(at, format_args!("expected keyed list, found {}", value));
            return;
        };
        let key_name = node.key.as_deref().unwrap_or_default();

        for (key, entry) in entries {
            let entry_at = format!("{}[{}={}]", at, key_name, key);
            self.check_children(&node.identifier, &entry_at, entry);

            if let Some(leaf) = entry.get(key_name) {
                let actual = key_string(leaf);
                if actual != *key {
                    self.report(
                        &entry_at,
                        format_args!("key leaf {} is '{}', expected '{}'", key_name, actual, key),
                    );
                }
            }
        }
    }

    fn check_leaf(&mut self, node: &SchemaNode, at: &str, value: &Value) {
        if let Some(yang_type) = &node.yang_type
            && let Err(reason) = check_value(value, yang_type)
        {
            self.report(at, reason);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SAMPLE_SCHEMA: &str = r#"{
        "module-name": "example-1",
        "item": [
            {"identifier": "/example-1:greeting", "kind": "container"},
            {"identifier": "/example-1:greeting/author", "kind": "leaf", "type": "string", "mandatory": true},
            {"identifier": "/example-1:greeting/message", "kind": "leaf", "type": "string"},
            {"identifier": "/example-1:user", "kind": "list", "key": "name"},
            {"identifier": "/example-1:user/name", "kind": "leaf", "type": "string"},
            {"identifier": "/example-1:user/level", "kind": "leaf", "type": "uint8"}
        ]
    }"#;

    fn schema() -> Schema {
        SAMPLE_SCHEMA.parse().unwrap()
    }

    #[test]
    fn test_valid_tree() {
        let tree = json!({
            "greeting": {"author": "Obi", "message": "Hello there!"},
            "user": {"ben": {"name": "ben", "level": 3}}
        });
        assert!(schema().validate(&tree).is_ok());
    }

    #[test]
    fn test_empty_root_is_valid() {
        assert!(schema().validate(&json!({})).is_ok());
    }

    #[test]
    fn test_collects_all_violations() {
        let tree = json!({
            "greeting": {"message": 7},
            "user": {"ben": {"name": "ben", "level": 300}},
            "bogus": true
        });
        let err = schema().validate(&tree).unwrap_err();
        let violations = err.violations();

        assert_eq!(violations.len(), 4, "{:?}", violations);
        assert!(violations.iter().any(|v| v.contains("missing mandatory node author")));
        assert!(violations.iter().any(|v| v.starts_with("/greeting/message")));
        assert!(violations.iter().any(|v| v.contains("out of range")));
        assert!(violations.iter().any(|v| v.starts_with("/bogus: unknown node")));
    }

    #[test]
    fn test_list_key_mismatch() {
        let tree = json!({"user": {"ben": {"name": "obi"}}});
        let err = schema().validate(&tree).unwrap_err();
        assert_eq!(
            err.violations(),
            ["/user[name=ben]: key leaf name is 'obi', expected 'ben'"]
        );
    }

    #[test]
    fn test_list_key_missing() {
        let tree = json!({"user": {"ben": {"level": 1}}});
        let err = schema().validate(&tree).unwrap_err();
        assert_eq!(
            err.violations(),
            ["/user[name=ben]: missing mandatory node name"]
        );
    }

    #[test]
    fn test_validate_subtree() {
        let s = schema();
        assert!(s.validate_at("/example-1:greeting", &json!({"author": "Obi"})).is_ok());
        assert!(s.validate_at("/example-1:greeting", &json!({})).is_err());
        assert!(s.validate_at("/example-1:user", &json!({"name": "ben"})).is_ok());
        assert!(s.validate_at("/example-1:user/level", &json!(12)).is_ok());
        assert!(matches!(
            s.validate_at("/example-1:nothing", &json!({})),
            Err(YangError::NodeNotFound(_))
        ));
    }

    #[test]
    fn test_validation_is_idempotent() {
        let s = schema();
        let tree = json!({"greeting": {"author": "Obi"}});
        let before = tree.clone();
        assert!(s.validate(&tree).is_ok());
        assert!(s.validate(&tree).is_ok());
        assert_eq!(tree, before);
    }
}
