use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use flowcanvas::config::{ConfigError, EngineConfig};
use flowcanvas::engine::EngineCore;
use flowcanvas::render::PseudoCodeRenderer;
use flowcanvas::snapshot::SnapshotError;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

#[derive(Parser, Debug)]
#[command(name = "flowcanvas", about = "Inspect and convert flow canvas snapshots")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Summarize a snapshot: counts, dropped edges and flow timing per edge.
    Inspect { path: PathBuf },
    /// Print the pseudo-code export of a snapshot.
    Pseudo { path: PathBuf },
    /// Load a snapshot and print it back in canonical form.
    Normalize { path: PathBuf },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect { path } => inspect(&load(&path)?),
        Command::Pseudo { path } => print!("{}", load(&path)?.pseudo_code()),
        Command::Normalize { path } => println!("{}", load(&path)?.save_snapshot().to_json()?),
    }
    Ok(())
}

fn load(path: &Path) -> Result<EngineCore, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })?;
    let mut engine = EngineCore::with_config(EngineConfig::from_env()?);
    engine.load_snapshot(&text)?;
    eprintln!("loaded {}", path.display());
    Ok(engine)
}

fn inspect(engine: &EngineCore) {
    let scene = engine.scene(&PseudoCodeRenderer);
    let viewport = engine.committed_viewport();

    println!("nodes     {}", engine.nodes().len());
    println!("edges     {} ({} drawable)", engine.edges().len(), scene.edges.len());
    println!("viewport  x={} y={} zoom={}", viewport.x, viewport.y, viewport.zoom);
    println!("period    {}s", scene.flow_period_secs);

    for issue in &scene.issues {
        println!("dropped   {issue}");
    }
    for edge in &scene.edges {
        match &edge.timing {
            Some(t) => println!("edge {} depth={} delay={}s {}", edge.id, t.depth, t.delay_secs, edge.path),
            None => println!("edge {} {}", edge.id, edge.path),
        }
    }
}
