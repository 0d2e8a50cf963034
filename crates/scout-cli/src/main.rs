mod scrape;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::scrape::ScrapeArgs;

#[derive(Debug, Parser)]
#[command(name = "scout")]
#[command(about = "Find Amazon's Choice listings for a set of search keywords")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape every keyword and write the badge listings to CSV (default)
    Scrape(ScrapeArgs),
    /// Print the resolved configuration and exit
    Config(ScrapeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let base = scout_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(base.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Scrape(args)) => {
            let config = scrape::apply_overrides(base, &args)?;
            scrape::run_scrape(&config).await?;
        }
        Some(Commands::Config(args)) => {
            let config = scrape::apply_overrides(base, &args)?;
            println!("{config:#?}");
        }
        None => scrape::run_scrape(&base).await?,
    }

    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
