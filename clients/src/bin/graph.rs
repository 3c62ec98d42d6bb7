//! `mc-graph`: Renders a model document as a Graphviz DOT graph.
//!
//! Objects become circles, processes rectangles; containment edges are bold,
//! participation edges dashed.
//!
//! **Usage:**
//! ```text
//! mc-graph --model <file> [--out <file>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use multicell_clients::{init_logging, read_model, write_output};
use multicell_schema::serializer::dot;

/// Render a model as DOT.
#[derive(Parser)]
#[command(name = "mc-graph", about = "Render a multicell model document as a DOT graph")]
struct Args {
    /// Model document to render.
    #[arg(long)]
    model: PathBuf,

    /// Output file (default: stdout).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    init_logging()?;
    let args = Args::parse();

    let model = read_model(&args.model)?;
    write_output(args.out.as_deref(), &dot::to_dot(&model))?;
    if let Some(out) = &args.out {
        eprintln!("  Written: {}", out.display());
    }
    Ok(())
}
