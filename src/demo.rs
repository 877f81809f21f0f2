//! Demo flows: build a device, validate, emit, unmarshal, print
//!
//! Both flows write their report to any `io::Write` so that binaries can
//! print to stdout and tests can capture the output.

use std::io::Write;

use crate::error::{Result, YangError};
use crate::json::{EmitJsonConfig, emit_json, unmarshal};
use crate::tree::YangStruct;
use crate::{employee, person};

/// What to do when creating a list entry fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Report the failure and end the flow without error
    #[default]
    Stop,
    /// Return the failure to the caller
    Abort,
}

/// How a flow ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// Entry creation failed under [`FailurePolicy::Stop`]
    Stopped,
}

/// Demo configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub json: EmitJsonConfig,
    pub on_create_error: FailurePolicy,
    /// Employees to create, in order, as (name, age)
    pub employees: Vec<(String, u32)>,
    pub person_name: String,
    pub person_age: u32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            json: EmitJsonConfig::default().with_module_names(true),
            on_create_error: FailurePolicy::Stop,
            employees: vec![("Augustus".to_string(), 33), ("Caesar".to_string(), 40)],
            person_name: "Magellan".to_string(),
            person_age: 33,
        }
    }
}

/// Run the employee list flow
pub fn run_employee_demo(config: &DemoConfig, out: &mut impl Write) -> Result<Outcome> {
    let mut device = employee::Device::new();
    print_empty(&device, config, out)?;

    for (name, age) in &config.employees {
        match device.new_employee(name.as_str()) {
            Ok(emp) => emp.age = Some(*age),
            Err(e) => match config.on_create_error {
                FailurePolicy::Stop => {
                    writeln!(
                        out,
                        "Not able to create an entry for {} with error: {}",
                        name, e
                    )?;
                    return Ok(Outcome::Stopped);
                }
                FailurePolicy::Abort => return Err(e),
            },
        }
    }

    device.validate()?;

    let json = emit_json(&device, &config.json)?;
    writeln!(out, "{}", json)?;

    let decoded: employee::Device = unmarshal(&json)?;
    check_roundtrip(&device, &decoded)?;

    writeln!(out, "---After unmarshalling---")?;
    for (name, emp) in &decoded.employee {
        writeln!(out, "Name: {}", name)?;
        writeln!(out, "Age: {}", display_leaf(emp.age))?;
    }

    Ok(Outcome::Completed)
}

/// Run the person container flow
pub fn run_person_demo(config: &DemoConfig, out: &mut impl Write) -> Result<Outcome> {
    let mut device = person::Device::new();
    print_empty(&device, config, out)?;

    device.person = Some(person::Person {
        name: Some(config.person_name.clone()),
        age: Some(config.person_age),
    });

    if let Some(p) = device.get_person() {
        p.validate()?;
    }
    device.validate()?;

    let json = emit_json(&device, &config.json)?;
    writeln!(out, "{}", json)?;

    let decoded: person::Device = unmarshal(&json)?;
    check_roundtrip(&device, &decoded)?;

    writeln!(out, "---After unmarshalling---")?;
    let p = decoded.get_person().cloned().unwrap_or_default();
    writeln!(out, "Name: {}", display_leaf(p.name))?;
    writeln!(out, "Age: {}", display_leaf(p.age))?;

    Ok(Outcome::Completed)
}

fn print_empty<T: YangStruct>(
    device: &T,
    config: &DemoConfig,
    out: &mut impl Write,
) -> Result<()> {
    let json = emit_json(device, &config.json)?;
    writeln!(out, "Empty JSON: {}", json)?;
    Ok(())
}

fn check_roundtrip<T: YangStruct + PartialEq + std::fmt::Debug>(
    sent: &T,
    received: &T,
) -> Result<()> {
    if sent == received {
        Ok(())
    } else {
        Err(YangError::RoundTrip(format!(
            "encoded {:?}, decoded {:?}",
            sent, received
        )))
    }
}

fn display_leaf<T: std::fmt::Display>(leaf: Option<T>) -> String {
    leaf.map(|v| v.to_string())
        .unwrap_or_else(|| "<unset>".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_employee(config: &DemoConfig) -> (Result<Outcome>, String) {
        let mut out = Vec::new();
        let result = run_employee_demo(config, &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_employee_demo_output() {
        let (result, out) = run_employee(&DemoConfig::default());
        assert_eq!(result.unwrap(), Outcome::Completed);

        assert!(out.starts_with("Empty JSON: {}\n"));
        assert!(out.contains("\"employee:employee\": ["));
        assert!(out.ends_with(
            "---After unmarshalling---\nName: Augustus\nAge: 33\nName: Caesar\nAge: 40\n"
        ));
    }

    #[test]
    fn test_employee_demo_stop_on_duplicate() {
        let config = DemoConfig {
            employees: vec![("Augustus".into(), 33), ("Augustus".into(), 34)],
            ..DemoConfig::default()
        };
        let (result, out) = run_employee(&config);

        assert_eq!(result.unwrap(), Outcome::Stopped);
        assert!(out.contains("Not able to create an entry for Augustus with error:"));
        assert!(!out.contains("---After unmarshalling---"));
    }

    #[test]
    fn test_employee_demo_abort_on_duplicate() {
        let config = DemoConfig {
            employees: vec![("Augustus".into(), 33), ("Augustus".into(), 34)],
            on_create_error: FailurePolicy::Abort,
            ..DemoConfig::default()
        };
        let (result, _) = run_employee(&config);
        assert!(matches!(result, Err(YangError::DuplicateKey { .. })));
    }

    #[test]
    fn test_person_demo_output() {
        let mut out = Vec::new();
        let outcome = run_person_demo(&DemoConfig::default(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(outcome, Outcome::Completed);
        assert!(out.contains(
            "{\n  \"person:person\": {\n    \"age\": 33,\n    \"name\": \"Magellan\"\n  }\n}"
        ));
        assert!(out.ends_with("---After unmarshalling---\nName: Magellan\nAge: 33\n"));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let config = DemoConfig {
            json: EmitJsonConfig::default().with_indent("x"),
            ..DemoConfig::default()
        };
        let mut out = Vec::new();
        assert!(matches!(
            run_person_demo(&config, &mut out),
            Err(YangError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_display_leaf() {
        assert_eq!(display_leaf(Some(0u32)), "0");
        assert_eq!(display_leaf::<u32>(None), "<unset>");
    }
}
