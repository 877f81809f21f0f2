//! Bound data tree nodes

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::Result;
use crate::schema::Schema;

/// A struct bound to a node of a YANG schema tree.
///
/// Implementors serialize to the canonical tree: unqualified member names,
/// absent leaves omitted, lists as maps keyed by their key leaf.
pub trait YangStruct: Serialize + DeserializeOwned {
    /// Schema path of the node this struct represents ("/" for the fakeroot)
    const SCHEMA_PATH: &'static str;

    /// Schema of the module the struct belongs to
    fn schema() -> Result<&'static Schema>;

    /// Build the canonical tree for this node
    fn to_tree(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Build a node from a canonical tree
    fn from_tree(tree: Value) -> Result<Self> {
        Ok(serde_json::from_value(tree)?)
    }

    /// Validate this node and all of its descendants
    fn validate(&self) -> Result<()> {
        Self::schema()?.validate_at(Self::SCHEMA_PATH, &self.to_tree()?)
    }
}
