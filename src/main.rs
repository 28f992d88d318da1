use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use fundlens::catalog::FundRepository;
use fundlens::config::Config;
use fundlens::output::terminal;

/// fundlens: compare the holdings of two mutual funds.
///
/// Reads fund holding disclosures (CSV exports) from local or blob storage
/// and reports how much two funds overlap.
#[derive(Parser)]
#[command(name = "fundlens", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the JSON API server
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: PORT env var, then 5000)
        #[arg(long)]
        port: Option<u16>,

        /// Address to bind (default: BIND env var, then 127.0.0.1)
        #[arg(long)]
        bind: Option<String>,
    },

    /// List funds available in storage
    List,

    /// Show a fund's top holdings and sectors
    Summary {
        /// Fund id (file name without .csv, underscores as dashes)
        fund_id: String,
    },

    /// Compare two funds
    Compare {
        fund1_id: String,
        fund2_id: String,

        /// Print the analysis as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fundlens=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let storage = fundlens::storage::from_config(&config)?;
    let repo = Arc::new(FundRepository::new(storage));

    match cli.command {
        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let mut config = config;
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind = bind;
            }
            info!(
                storage = config.storage_backend.as_str(),
                "Starting fundlens server"
            );
            fundlens::web::run_server(config, repo).await?;
        }

        Commands::List => {
            let funds = repo.list_funds().await?;
            terminal::display_fund_list(&funds);
        }

        Commands::Summary { fund_id } => {
            let summary = repo.summary(&fund_id).await?;
            terminal::display_summary(&summary);
        }

        Commands::Compare {
            fund1_id,
            fund2_id,
            json,
        } => {
            if fund1_id == fund2_id {
                anyhow::bail!("Cannot compare a fund with itself");
            }
            let comparison = repo.compare(&fund1_id, &fund2_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&comparison)?);
            } else {
                terminal::display_overlap(&comparison.overlap);
            }
        }
    }

    Ok(())
}
