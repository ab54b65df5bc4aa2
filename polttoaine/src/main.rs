//! polttoaine command-line interface.
//!
//! Lists cities and stations with their fuel prices, and submits price
//! updates. Set `RUST_LOG=polttoaine=debug` to trace requests on stderr.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use polttoaine::cli::{Args, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = args.check() {
        e.exit();
    }

    run(args, std::io::stdout().lock()).await?;
    Ok(())
}
