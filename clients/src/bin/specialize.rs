//! `mc-specialize`: Narrows one instance of a model to a registered subtype.
//!
//! The catalog is loaded from the definition directories, the instance's type
//! is replaced, and the specialized model is re-validated before it is written.
//!
//! **Usage:**
//! ```text
//! mc-specialize --model <file> (--object <name> | --process <name>) --to <type> [--out <file>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{ArgGroup, Parser};
use multicell_clients::{init_logging, print_report, read_model, write_output};
use multicell_conformance::load_catalog;
use multicell_schema::{specialize, validate, CatalogConfig, Kind};

/// Specialize an instance of a model to a subtype.
#[derive(Parser)]
#[command(
    name = "mc-specialize",
    about = "Replace an instance's type with a registered subtype",
    group(ArgGroup::new("target").required(true).args(["object", "process"]))
)]
struct Args {
    /// Directory of object type definitions.
    #[arg(long, default_value = "schema/object")]
    objects: PathBuf,

    /// Directory of process type definitions.
    #[arg(long, default_value = "schema/process")]
    processes: PathBuf,

    /// Model document to specialize.
    #[arg(long)]
    model: PathBuf,

    /// Name of the object instance to specialize.
    #[arg(long)]
    object: Option<String>,

    /// Name of the process instance to specialize.
    #[arg(long)]
    process: Option<String>,

    /// The new, more specific type.
    #[arg(long = "to")]
    new_type: String,

    /// Where to write the specialized model (default: stdout).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();

    let (catalog, report) = load_catalog(&args.objects, &args.processes, CatalogConfig::default())?;
    if !report.all_passed() {
        print_report(&mut std::io::stderr().lock(), "Catalog Load Report", &report)?;
        eprintln!("Catalog has rejected definitions; refusing to specialize.");
        process::exit(1);
    }

    let (kind, name) = match (args.object, args.process) {
        (Some(name), _) => (Kind::Object, name),
        (None, Some(name)) => (Kind::Process, name),
        (None, None) => bail!("one of --object or --process is required"),
    };

    let mut model = read_model(&args.model)?;
    specialize(&catalog, &mut model, kind, &name, &args.new_type)
        .with_context(|| format!("Failed to specialize {} '{}'", kind, name))?;

    if let Err(violations) = validate(&catalog, &model) {
        eprintln!("Specialized model has {} violation(s):", violations.len());
        for violation in &violations {
            eprintln!("       {}", violation);
        }
        process::exit(1);
    }

    let json = serde_json::to_string_pretty(&model).context("Failed to serialize model")?;
    write_output(args.out.as_deref(), &format!("{}\n", json))?;
    if let Some(out) = &args.out {
        eprintln!("Specialized {} '{}' to '{}': {}", kind, name, args.new_type, out.display());
    }
    Ok(())
}
