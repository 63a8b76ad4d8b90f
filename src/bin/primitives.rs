//! Prints the full set of void and primitive types ordered by bit length.

use std::path::PathBuf;

use clap::Parser;
use dsdl_docs::render_primitive_types;

#[derive(Parser)]
#[command(name = "dsdl-primitives")]
#[command(about = "Render the list of void and primitive DSDL types")]
struct Cli {
    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let document = render_primitive_types();

    match cli.output {
        Some(path) => std::fs::write(&path, document)?,
        None => print!("{}", document),
    }
    Ok(())
}
