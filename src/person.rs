//! Bindings for the `person` module

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{ROOT_PATH, Schema};
use crate::tree::YangStruct;

/// Module name used to qualify top-level members
pub const MODULE_NAME: &str = "person";

const SCHEMA_JSON: &str = include_str!("../yang/person.json");

fn schema() -> Result<&'static Schema> {
    static SCHEMA: OnceLock<std::result::Result<Schema, String>> = OnceLock::new();
    Schema::load_embedded(&SCHEMA, SCHEMA_JSON)
}

/// Root of the person schema tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Device {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
}

/// The `person` container
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

impl Device {
    /// Create an empty device
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_person(&self) -> Option<&Person> {
        self.person.as_ref()
    }

    /// Get the person container, creating an empty one when absent
    pub fn get_or_create_person(&mut self) -> &mut Person {
        self.person.get_or_insert_with(Person::default)
    }

    /// Remove the person container, returning the previous occupant
    pub fn delete_person(&mut self) -> Option<Person> {
        self.person.take()
    }
}

impl YangStruct for Device {
    const SCHEMA_PATH: &'static str = ROOT_PATH;

    fn schema() -> Result<&'static Schema> {
        schema()
    }
}

impl YangStruct for Person {
    const SCHEMA_PATH: &'static str = "/person:person";

    fn schema() -> Result<&'static Schema> {
        schema()
    }
}
