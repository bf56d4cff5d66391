mod app;
mod interactive;
mod print;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "parkfinder")]
#[command(about = "Find free parking near a destination")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rank facilities around a location (the configured default if omitted)
    Nearby {
        /// Latitude of the search center
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude of the search center
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Look up destination suggestions for free text
    Search {
        /// Destination text, e.g. a street or landmark
        text: String,
        /// Pick the n-th suggestion (1-based) and rank facilities around it
        #[arg(long)]
        pick: Option<usize>,
    },
    /// Drive the widget from stdin, one input per line
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = parkfinder_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Nearby { lat, lon } => {
            let location = match (lat, lon) {
                (Some(lat), Some(lon)) => Some(parkfinder_core::QueryLocation::new(lat, lon)?),
                _ => None,
            };
            app::run_nearby(&config, location).await?;
        }
        Commands::Search { text, pick } => app::run_search(&config, &text, pick).await?,
        Commands::Interactive => interactive::run_interactive(&config).await?,
    }

    Ok(())
}
