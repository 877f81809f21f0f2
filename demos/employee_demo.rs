//! Employee list demo
//!
//! Run with: cargo run --example employee_demo -- --employee Augustus=33 --employee Caesar=40
//!
//! Builds a device holding a keyed list of employees, validates it, emits it
//! as JSON and reads it back.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rust_yangdemo::demo::{DemoConfig, FailurePolicy, run_employee_demo};
use rust_yangdemo::{EmitJsonConfig, JsonFormat};

#[derive(Parser, Debug)]
#[command(name = "employee-demo")]
#[command(about = "Populate, validate and round-trip an employee list")]
struct Args {
    /// Employee to create, as NAME=AGE (repeatable)
    #[arg(short, long = "employee", value_parser = parse_employee)]
    employees: Vec<(String, u32)>,

    /// Indentation per nesting level (empty for compact output)
    #[arg(long, default_value = "  ")]
    indent: String,

    /// Do not qualify top-level members with the module name
    #[arg(long)]
    no_module_names: bool,

    /// JSON layout
    #[arg(long, value_enum, default_value_t = Format::Rfc7951)]
    format: Format,

    /// Behaviour when an entry cannot be created
    #[arg(long, value_enum, default_value_t = OnError::Stop)]
    on_create_error: OnError,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Rfc7951,
    Internal,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OnError {
    Stop,
    Abort,
}

fn parse_employee(s: &str) -> Result<(String, u32), String> {
    let (name, age) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=AGE, got '{}'", s))?;
    let age = age
        .parse()
        .map_err(|e| format!("invalid age '{}': {}", age, e))?;
    Ok((name.to_string(), age))
}

fn main() -> ExitCode {
    let args = Args::parse();

    let mut config = DemoConfig {
        json: EmitJsonConfig::default()
            .with_indent(args.indent)
            .with_module_names(!args.no_module_names)
            .with_format(match args.format {
                Format::Rfc7951 => JsonFormat::Rfc7951,
                Format::Internal => JsonFormat::Internal,
            }),
        on_create_error: match args.on_create_error {
            OnError::Stop => FailurePolicy::Stop,
            OnError::Abort => FailurePolicy::Abort,
        },
        ..DemoConfig::default()
    };
    if !args.employees.is_empty() {
        config.employees = args.employees;
    }

    if args.verbose {
        eprintln!("[employee-demo] {:?}", config);
    }

    let mut stdout = std::io::stdout().lock();
    match run_employee_demo(&config, &mut stdout) {
        Ok(outcome) => {
            if args.verbose {
                eprintln!("[employee-demo] finished: {:?}", outcome);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("employee demo failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
