use anyhow::Result;
use clap::Parser;
use srcbundle::cli::{init_tracing, run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&cli);
    tracing::info!("CLI arguments parsed, invoking run");

    let result = run(cli);
    match &result {
        Ok(_) => tracing::info!("CLI completed successfully"),
        Err(e) => tracing::error!(error = %e, "CLI exited with error"),
    }
    result.map(|_| ())
}
