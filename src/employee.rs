//! Bindings for the `employee` module
//!
//! The fakeroot [`Device`] holds the `employee` list keyed by name.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{Result, YangError};
use crate::schema::{ROOT_PATH, Schema};
use crate::tree::YangStruct;

/// Module name used to qualify top-level members
pub const MODULE_NAME: &str = "employee";

const SCHEMA_JSON: &str = include_str!("../yang/employee.json");

/// Schema path of the employee list
const EMPLOYEE_PATH: &str = "/employee:employee";

fn schema() -> Result<&'static Schema> {
    static SCHEMA: OnceLock<std::result::Result<Schema, String>> = OnceLock::new();
    Schema::load_embedded(&SCHEMA, SCHEMA_JSON)
}

/// Root of the employee schema tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Device {
    /// Entries of the `employee` list, keyed by name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub employee: BTreeMap<String, Employee>,
}

/// An entry of the `employee` list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Employee {
    /// List key
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

    /// Create a new employee keyed by `name` and return it for population.
    ///
    /// Fails with [`YangError::DuplicateKey`] if the key is taken; the list
    /// is left untouched in that case.
    pub fn new_employee(&mut self, name: impl Into<String>) -> Result<&mut Employee> {
        let name = name.into();
        match self.employee.entry(name) {
            Entry::Occupied(e) => Err(YangError::DuplicateKey {
                list: EMPLOYEE_PATH.to_string(),
                key: e.key().clone(),
            }),
            Entry::Vacant(e) => {
                let name = e.key().clone();
                Ok(e.insert(Employee {
                    name: Some(name),
                    age: None,
                }))
            }
        }
    }

    /// Add an already built entry, keyed by its `name` leaf
    pub fn append_employee(&mut self, employee: Employee) -> Result<()> {
        let key = employee
            .name
            .clone()
            .ok_or_else(|| YangError::MissingKey(format!("{}/name", EMPLOYEE_PATH)))?;
        match self.employee.entry(key) {
            Entry::Occupied(e) => Err(YangError::DuplicateKey {
                list: EMPLOYEE_PATH.to_string(),
                key: e.key().clone(),
            }),
            Entry::Vacant(e) => {
                e.insert(employee);
                Ok(())
            }
        }
    }

    /// Get the employee keyed by `name`
    pub fn get_employee(&self, name: &str) -> Option<&Employee> {
        self.employee.get(name)
    }

    /// Get the employee keyed by `name` for modification
    pub fn get_employee_mut(&mut self, name: &str) -> Option<&mut Employee> {
        self.employee.get_mut(name)
    }

    /// Get the employee keyed by `name`, creating it when absent
    pub fn get_or_create_employee(&mut self, name: &str) -> &mut Employee {
        self.employee
            .entry(name.to_string())
            .or_insert_with(|| Employee {
                name: Some(name.to_string()),
                age: None,
            })
    }

    /// Remove the employee keyed by `name`
    pub fn delete_employee(&mut self, name: &str) -> Option<Employee> {
        self.employee.remove(name)
    }
}

impl YangStruct for Device {
    const SCHEMA_PATH: &'static str = ROOT_PATH;

    fn schema() -> Result<&'static Schema> {
        schema()
    }
}

impl YangStruct for Employee {
    const SCHEMA_PATH: &'static str = EMPLOYEE_PATH;

    fn schema() -> Result<&'static Schema> {
        schema()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_schema() {
        let schema = schema().unwrap();
        assert_eq!(schema.module_name, MODULE_NAME);
        assert_eq!(schema.list_key(EMPLOYEE_PATH), Some("name"));
    }

    #[test]
    fn test_new_employee_sets_key() {
        let mut d = Device::new();
        let emp = d.new_employee("Augustus").unwrap();
        assert_eq!(emp.name.as_deref(), Some("Augustus"));
        assert_eq!(emp.age, None);
    }

    #[test]
    fn test_new_employee_returns_owned_storage() {
        let mut d = Device::new();
        d.new_employee("Augustus").unwrap().age = Some(33);
        assert_eq!(d.get_employee("Augustus").unwrap().age, Some(33));
    }

    #[test]
    fn test_duplicate_employee() {
        let mut d = Device::new();
        d.new_employee("Augustus").unwrap().age = Some(33);

        let err = d.new_employee("Augustus").unwrap_err();
        assert!(matches!(err, YangError::DuplicateKey { ref key, .. } if key == "Augustus"));
        assert_eq!(d.employee.len(), 1);
        assert_eq!(d.get_employee("Augustus").unwrap().age, Some(33));
    }

    #[test]
    fn test_append_employee() {
        let mut d = Device::new();
        d.append_employee(Employee {
            name: Some("Caesar".into()),
            age: Some(40),
        })
        .unwrap();
        assert_eq!(d.get_employee("Caesar").unwrap().age, Some(40));

        let err = d.append_employee(Employee::default()).unwrap_err();
        assert!(matches!(err, YangError::MissingKey(_)));

        let err = d
            .append_employee(Employee {
                name: Some("Caesar".into()),
                age: None,
            })
            .unwrap_err();
        assert!(matches!(err, YangError::DuplicateKey { .. }));
        assert_eq!(d.get_employee("Caesar").unwrap().age, Some(40));
    }

    #[test]
    fn test_get_or_create_and_delete() {
        let mut d = Device::new();
        d.get_or_create_employee("Brutus").age = Some(41);
        d.get_or_create_employee("Brutus");
        assert_eq!(d.employee.len(), 1);
        assert_eq!(d.get_employee("Brutus").unwrap().age, Some(41));

        if let Some(emp) = d.get_employee_mut("Brutus") {
            emp.age = None;
        }
        assert_eq!(d.get_employee("Brutus").unwrap().age, None);

        let removed = d.delete_employee("Brutus").unwrap();
        assert_eq!(removed.name.as_deref(), Some("Brutus"));
        assert!(d.get_employee("Brutus").is_none());
        assert!(d.delete_employee("Brutus").is_none());
    }

    #[test]
    fn test_validate() {
        let mut d = Device::new();
        assert!(d.validate().is_ok());

        d.new_employee("Augustus").unwrap().age = Some(33);
        assert!(d.validate().is_ok());
        assert!(d.get_employee("Augustus").unwrap().validate().is_ok());
    }

    #[test]
    fn test_validate_key_mismatch() {
        let mut d = Device::new();
        d.new_employee("Augustus").unwrap().name = Some("Octavian".into());

        let err = d.validate().unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert!(err.violations()[0].contains("Octavian"));
    }

    #[test]
    fn test_validate_missing_key_leaf() {
        let mut d = Device::new();
        d.new_employee("Augustus").unwrap().name = None;
        assert!(matches!(d.validate(), Err(YangError::Validation(_))));
        assert!(Employee::default().validate().is_err());
    }
}
