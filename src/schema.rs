//! Schema descriptions for bound data trees
//!
//! A schema file lists every data node of one YANG module by its absolute
//! identifier, in the same spirit as a SID file:
//!
//! ```json
//! {
//!   "module-name": "employee",
//!   "item": [
//!     {"identifier": "/employee:employee", "kind": "list", "key": "name"},
//!     {"identifier": "/employee:employee/name", "kind": "leaf", "type": "string"},
//!     {"identifier": "/employee:employee/age", "kind": "leaf", "type": "uint32"}
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, YangError};
use crate::types::YangType;
use crate::validate;

/// Schema path of the fakeroot
pub const ROOT_PATH: &str = "/";

/// Kind of a schema node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Container,
    List,
    Leaf,
}

/// A single data node of the schema tree
#[derive(Debug, Clone)]
pub struct SchemaNode {
    /// Absolute identifier, e.g. "/employee:employee/age"
    pub identifier: String,
    /// Local name without module prefix
    pub name: String,
    pub kind: NodeKind,
    /// Leaf type, `None` for containers and lists
    pub yang_type: Option<YangType>,
    /// Key leaf name for lists
    pub key: Option<String>,
    pub mandatory: bool,
}

/// Parsed schema of one YANG module
#[derive(Debug, Clone)]
pub struct Schema {
    /// Module name from the schema file
    pub module_name: String,
    /// Module revision
    pub module_revision: String,
    /// Formatted module name prefix (e.g., "/{module-name}:")
    pub module_prefix: String,
    /// Mapping from identifier path to node
    nodes: HashMap<String, SchemaNode>,
    /// Child identifiers per parent path, in file order
    children: HashMap<String, Vec<String>>,
}

/// Raw schema file structure for deserialization
#[derive(Debug, Deserialize)]
struct RawSchemaFile {
    #[serde(rename = "module-name")]
    module_name: String,
    #[serde(rename = "module-revision", default)]
    module_revision: String,
    #[serde(alias = "items")]
    item: Vec<RawSchemaItem>,
}

#[derive(Debug, Deserialize)]
struct RawSchemaItem {
    identifier: String,
    kind: NodeKind,
    #[serde(rename = "type")]
    item_type: Option<Value>,
    key: Option<String>,
    #[serde(default)]
    mandatory: bool,
}

impl Schema {
    /// Parse a schema file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse a schema from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: RawSchemaFile = serde_json::from_str(content)?;
        let module_prefix = format!("/{}:", raw.module_name);

        let mut nodes = HashMap::with_capacity(raw.item.len());
        let mut children: HashMap<String, Vec<String>> = HashMap::new();

        for item in raw.item {
            let (parent, name) = split_identifier(&item.identifier, &module_prefix)?;

            if parent != ROOT_PATH {
                match nodes.get(&parent) {
                    Some(SchemaNode {
                        kind: NodeKind::Leaf,
                        ..
                    }) => {
                        return Err(YangError::InvalidSchema(format!(
                            "{}: parent {} is a leaf",
                            item.identifier, parent
                        )));
                    }
                    Some(_) => {}
                    None => {
                        return Err(YangError::InvalidSchema(format!(
                            "{}: parent {} must be listed before its children",
                            item.identifier, parent
                        )));
                    }
                }
            }
            if nodes.contains_key(&item.identifier) {
                return Err(YangError::InvalidSchema(format!(
                    "duplicate identifier {}",
                    item.identifier
                )));
            }

            let yang_type = match (item.kind, item.item_type) {
                (NodeKind::Leaf, Some(t)) => Some(YangType::from_schema_type(&t)),
                (NodeKind::Leaf, None) => {
                    return Err(YangError::InvalidSchema(format!(
                        "leaf {} has no type",
                        item.identifier
                    )));
                }
                (_, _) => None,
            };

            if item.kind == NodeKind::List && item.key.is_none() {
                return Err(YangError::InvalidSchema(format!(
                    "list {} has no key",
                    item.identifier
                )));
            }

            children
                .entry(parent)
                .or_default()
                .push(item.identifier.clone());
            nodes.insert(
                item.identifier.clone(),
                SchemaNode {
                    identifier: item.identifier,
                    name,
                    kind: item.kind,
                    yang_type,
                    key: item.key,
                    mandatory: item.mandatory,
                },
            );
        }

        let schema = Schema {
            module_name: raw.module_name,
            module_revision: raw.module_revision,
            module_prefix,
            nodes,
            children,
        };
        schema.check_list_keys()?;
        Ok(schema)
    }

    /// Every list key must name a leaf child of the list
    fn check_list_keys(&self) -> Result<()> {
        for node in self.nodes.values() {
            if let Some(key) = &node.key {
                match self.child(&node.identifier, key) {
                    Some(child) if child.kind == NodeKind::Leaf => {}
                    _ => {
                        return Err(YangError::InvalidSchema(format!(
                            "list {} key {} is not a leaf child",
                            node.identifier, key
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// Get the node for an identifier path
    pub fn node(&self, identifier: &str) -> Option<&SchemaNode> {
        self.nodes.get(identifier)
    }

    /// Get the children of a node ("/" for the fakeroot)
    pub fn children<'a>(
        &'a self,
        parent: &str,
    ) -> impl Iterator<Item = &'a SchemaNode> + use<'a> {
        self.children
            .get(parent)
            .into_iter()
            .flatten()
            .filter_map(|id| self.nodes.get(id))
    }

    /// Get a child of a node by its local name
    pub fn child(&self, parent: &str, name: &str) -> Option<&SchemaNode> {
        self.nodes.get(&self.child_path(parent, name))
    }

    /// Build the identifier of a child node
    pub fn child_path(&self, parent: &str, name: &str) -> String {
        if parent == ROOT_PATH {
            // Top level: the module prefix qualifies the first segment
            format!("{}{}", self.module_prefix, name)
        } else {
            format!("{}/{}", parent, name)
        }
    }

    /// Key leaf name if `identifier` is a list
    pub fn list_key(&self, identifier: &str) -> Option<&str> {
        self.nodes.get(identifier).and_then(|n| n.key.as_deref())
    }

    /// Validate a whole tree rooted at the fakeroot
    pub fn validate(&self, tree: &Value) -> Result<()> {
        self.validate_at(ROOT_PATH, tree)
    }

    /// Validate a subtree whose schema node is `path`.
    ///
    /// For a list path, `tree` is a single entry.
    pub fn validate_at(&self, path: &str, tree: &Value) -> Result<()> {
        validate::validate_tree(self, path, tree)
    }

    /// Lazily parse an embedded schema into `cell`.
    ///
    /// A parse failure is kept and reported on every call.
    pub fn load_embedded(
        cell: &'static OnceLock<std::result::Result<Schema, String>>,
        content: &str,
    ) -> Result<&'static Schema> {
        cell.get_or_init(|| Schema::from_json_str(content).map_err(|e| e.to_string()))
            .as_ref()
            .map_err(|e| YangError::InvalidSchema(e.clone()))
    }
}

impl std::str::FromStr for Schema {
    type Err = YangError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json_str(s)
    }
}

/// Split an identifier into its parent path and local name
fn split_identifier(identifier: &str, module_prefix: &str) -> Result<(String, String)> {
    if !identifier.starts_with(module_prefix) {
        return Err(YangError::InvalidSchema(format!(
            "identifier {} is outside module prefix {}",
            identifier, module_prefix
        )));
    }

    match identifier.rsplit_once('/') {
        Some(("", top)) => {
            let name = top.split(':').next_back().unwrap_or(top);
            Ok((ROOT_PATH.to_string(), name.to_string()))
        }
        Some((parent, name)) if !name.is_empty() => Ok((parent.to_string(), name.to_string())),
        _ => Err(YangError::InvalidSchema(format!(
            "malformed identifier {}",
            identifier
        ))),
    }
}
