//! Person container demo
//!
//! Run with: cargo run --example person_demo -- --name Magellan --age 33
//!
//! Builds a device holding a single person, validates the person and the
//! device, emits the tree as JSON and reads it back.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use rust_yangdemo::demo::{DemoConfig, run_person_demo};
use rust_yangdemo::{EmitJsonConfig, JsonFormat};

#[derive(Parser, Debug)]
#[command(name = "person-demo")]
#[command(about = "Populate, validate and round-trip a person record")]
struct Args {
    /// Person name
    #[arg(short, long, default_value = "Magellan")]
    name: String,

    /// Person age
    #[arg(short, long, default_value = "33")]
    age: u32,

    /// Indentation per nesting level (empty for compact output)
    #[arg(long, default_value = "  ")]
    indent: String,

    /// Do not qualify top-level members with the module name
    #[arg(long)]
    no_module_names: bool,

    /// JSON layout
    #[arg(long, value_enum, default_value_t = Format::Rfc7951)]
    format: Format,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Rfc7951,
    Internal,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = DemoConfig {
        json: EmitJsonConfig::default()
            .with_indent(args.indent)
            .with_module_names(!args.no_module_names)
            .with_format(match args.format {
                Format::Rfc7951 => JsonFormat::Rfc7951,
                Format::Internal => JsonFormat::Internal,
            }),
        person_name: args.name,
        person_age: args.age,
        ..DemoConfig::default()
    };

    if args.verbose {
        eprintln!("[person-demo] {:?}", config);
    }

    let mut stdout = std::io::stdout().lock();
    match run_person_demo(&config, &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("person demo failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
