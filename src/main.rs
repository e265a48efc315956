use anyhow::Result;
use clap::Parser;
use tracing::info;
use translate_es::{cli::Cli, config::Config, pipeline};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translate_es=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match pipeline::run_cli(&cli, &config).await? {
        Some(report) if report.has_errors() => {
            info!("Finished with {} batch error(s)", report.errors.len())
        }
        Some(_) => info!("✓ Done"),
        None => {}
    }

    Ok(())
}
