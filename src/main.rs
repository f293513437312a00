// patchview - Render grid patch snapshots as a colored mesh
//
// Usage: patchview <file1> [<file2> ...]
//
// Files are decoded in argument order, patches within a file in encounter
// order. The window opens once everything is loaded and validated; any
// bad file or patch aborts the run with a diagnostic naming it.

use anyhow::Context;
use clap::Parser;
use patchview::app;
use patchview::figure::Figure;
use patchview::patch::Patch;
use patchview::snapshot::Snapshot;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[command(name = "patchview")]
#[command(about = "Render grid patch snapshots as a colored mesh")]
struct Cli {
    /// Snapshot files to display, drawn in argument order
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "patchview=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut figure = Figure::new();
    for path in &cli.files {
        let snapshot = Snapshot::load(path)?;
        info!("{}: {} patches", path.display(), snapshot.primitive.len());
        for (index, record) in snapshot.primitive.into_iter().enumerate() {
            let patch = Patch::from_record(index, record)
                .with_context(|| path.display().to_string())?;
            figure.add_patch(&patch);
        }
    }

    app::show(figure).map_err(|e| anyhow::anyhow!("viewer failed: {e}"))?;
    Ok(())
}
