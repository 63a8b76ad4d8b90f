//! DSDL Render CLI
//!
//! Renders LaTeX documentation for the data types matching a full type name
//! pattern. The document is written to stdout (or `--output`); diagnostics
//! go to stderr.
//!
//! Usage:
//!   dsdl-render "uavcan.node.Heartbeat"
//!   dsdl-render --index-only "uavcan.*" -o uavcan-index.tex

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dsdl_docs::{
    CachedProvider, CommandProvider, DocsConfig, MetadataProvider, Renderer, SnapshotCache,
    SnapshotFileProvider, TypePattern,
};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dsdl-render")]
#[command(about = "Render LaTeX documentation for DSDL data types")]
struct Cli {
    /// Full type name glob, e.g., "uavcan.node.Heartbeat" or "uavcan.file.*"
    pattern: String,

    /// Render only the namespace index table
    #[arg(long)]
    index_only: bool,

    /// Do not use the parsed metadata cache
    #[arg(long)]
    no_cache: bool,

    /// Drop cached metadata before loading
    #[arg(long)]
    refresh: bool,

    /// Config file
    #[arg(short, long)]
    config: Option<String>,

    /// Directory containing the root namespaces
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Pre-parsed metadata snapshot (skips the parser)
    #[arg(short, long)]
    snapshot: Option<PathBuf>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = DocsConfig::load_from(cli.config.as_deref()).context("loading configuration")?;
    if let Some(root) = cli.root {
        config.source.root = root;
    }
    if let Some(snapshot) = cli.snapshot {
        config.source.snapshot = Some(snapshot);
    }
    if cli.index_only {
        config.render.index_only = true;
    }
    if cli.no_cache {
        config.cache.enabled = false;
    }

    let pattern = TypePattern::new(&cli.pattern)?;
    let provider = build_provider(&config, cli.refresh)?;
    let types = provider.load().context("loading type metadata")?;

    let renderer = Renderer::new(config.render_options());
    let document = renderer.render(&pattern, &types)?;

    match cli.output {
        Some(path) => {
            std::fs::write(&path, &document).with_context(|| format!("writing {:?}", path))?
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

fn build_provider(config: &DocsConfig, refresh: bool) -> anyhow::Result<Box<dyn MetadataProvider>> {
    if let Some(snapshot) = &config.source.snapshot {
        return Ok(Box::new(SnapshotFileProvider::new(snapshot)));
    }

    let parser = CommandProvider::new(config.parser.command.clone(), &config.source.root);
    if !config.cache.enabled {
        return Ok(Box::new(parser));
    }

    let Some(cache_dir) = config.cache_dir() else {
        warn!("no cache directory available, parsing without cache");
        return Ok(Box::new(parser));
    };
    let cache = SnapshotCache::new(cache_dir);
    if refresh {
        cache.clear().context("dropping cached metadata")?;
    }
    Ok(Box::new(CachedProvider::new(parser, cache, &config.source.root)))
}
