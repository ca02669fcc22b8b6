use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    // Logs go to stderr so stdout stays parseable in json mode
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shardusers=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = cli.data_dir.as_path();
    let format = cli.format;
    tracing::debug!(data_dir = %data_dir.display(), "Running command");

    match &cli.command {
        Commands::Create(args) => commands::account::create(data_dir, args, format).await,
        Commands::Verify(args) => commands::account::verify(data_dir, args, format).await,
        Commands::Passwd(args) => commands::account::passwd(data_dir, args, format).await,
        Commands::Delete(args) => commands::account::delete(data_dir, args, format).await,
        Commands::Lookup(args) => commands::inspect::lookup(data_dir, args, format).await,
        Commands::List => commands::inspect::list(data_dir, format).await,
        Commands::Stats => commands::inspect::stats(data_dir, format).await,
    }
}
