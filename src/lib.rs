//! rust-yangdemo - Typed YANG data trees with validation and JSON encoding
//!
//! This library binds Rust structs to YANG schema trees, validates them
//! against the schema, and converts them to and from JSON (RFC 7951 or a
//! keyed internal layout). Two bound modules ship with the crate:
//! [`employee`] (a keyed list) and [`person`] (a single container).
//!
//! # Example
//!
//! ```
//! use rust_yangdemo::person::{Device, Person};
//! use rust_yangdemo::{EmitJsonConfig, YangStruct, emit_json, unmarshal};
//!
//! let mut device = Device::new();
//! device.person = Some(Person {
//!     name: Some("Magellan".to_string()),
//!     age: Some(33),
//! });
//! device.validate().unwrap();
//!
//! let json = emit_json(&device, &EmitJsonConfig::compact()).unwrap();
//! assert_eq!(json, r#"{"person":{"age":33,"name":"Magellan"}}"#);
//!
//! let decoded: Device = unmarshal(&json).unwrap();
//! assert_eq!(decoded, device);
//! ```

pub mod demo;
pub mod employee;
mod error;
pub mod json;
pub mod person;
pub mod schema;
mod tree;
mod types;
mod validate;

pub use error::{Result, YangError};
pub use json::{EmitJsonConfig, JsonFormat, construct_json, emit_json, unmarshal, unmarshal_value};
pub use schema::{NodeKind, Schema, SchemaNode};
pub use tree::YangStruct;
pub use types::YangType;
