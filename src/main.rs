use clap::Parser;
use tracing_subscriber::EnvFilter;

use meet_ai::cli::call::CallOptions;
use meet_ai::cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            meet_ai::cli::serve::execute(host.as_deref(), port).await?;
        }
        Commands::Link { name } => {
            meet_ai::cli::link::execute(name.as_deref());
        }
        Commands::Call {
            agent,
            instructions,
            seconds,
            insight,
            lookup_url,
        } => {
            meet_ai::cli::call::execute(CallOptions {
                agent,
                instructions,
                seconds,
                insight,
                lookup_url,
            })
            .await?;
        }
    }

    Ok(())
}
