//! `mc-validate`: Loads a type catalog and validates every model against it.
//!
//! Object and process definitions are registered with two-phase loading;
//! each model document below `--models` is then checked for structure,
//! registered types, containment and participation.
//!
//! **Usage:**
//! ```text
//! mc-validate [--objects <dir>] [--processes <dir>] [--models <dir>] [--lenient] [--reference]
//! ```
//!
//! Exits non-zero if any definition is rejected or any model is invalid.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::Parser;
use multicell_clients::{init_logging, print_report};
use multicell_conformance::{run_all, validators, SchemaPaths};
use multicell_schema::CatalogConfig;
use tracing::info;

/// Validate model documents against a type catalog.
#[derive(Parser)]
#[command(
    name = "mc-validate",
    about = "Validate multicell model documents against object and process type definitions"
)]
struct Args {
    /// Directory of object type definitions.
    #[arg(long, default_value = "schema/object")]
    objects: PathBuf,

    /// Directory of process type definitions.
    #[arg(long, default_value = "schema/process")]
    processes: PathBuf,

    /// Directory of model documents.
    #[arg(long, default_value = "models")]
    models: PathBuf,

    /// Register definitions that fail the meta-schema check, reporting them as warnings.
    #[arg(long)]
    lenient: bool,

    /// Also run the built-in reference scenario.
    #[arg(long)]
    reference: bool,
}

fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();

    let config = if args.lenient {
        CatalogConfig::lenient()
    } else {
        CatalogConfig::default()
    };
    let paths = SchemaPaths {
        objects: args.objects,
        processes: args.processes,
        models: args.models,
    };

    info!(
        target: "multicell::cli",
        objects = %paths.objects.display(),
        processes = %paths.processes.display(),
        models = %paths.models.display(),
        lenient = args.lenient,
        "running conformance"
    );
    let mut report = run_all(&paths, config)?;
    if args.reference {
        report.extend(validators::reference::validate());
    }

    let failed = print_report(&mut std::io::stdout().lock(), "Multicell Conformance Report", &report)?;
    if failed > 0 {
        eprintln!("Validation FAILED: {} check(s) did not pass.", failed);
        process::exit(1);
    }

    println!("Validation PASSED.");
    Ok(())
}
