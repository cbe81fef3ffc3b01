//! Cellar CLI
//!
//! Command-line front-end for the beer catalog.
//!
//! # Usage
//!
//! ```bash
//! # Load the sample catalog into the JSON backend
//! cellar --storage json seed
//!
//! # Add a beer and list everything
//! cellar --storage json add-beer --name "Bath Ale" --brewery "Hall & Woodhouse" --abv 4.5
//! cellar --storage json beers
//!
//! # Review it and read the reviews back
//! cellar --storage json add-review --beer-id 5 --first-name Jane --last-name Doe --score 7
//! cellar --storage json reviews 5
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use cellar::constants::{APP_NAME, APP_VERSION};
use cellar::{new_storage, sample, Beer, Config, Review, Storage, StorageKind};

// =============================================================================
// CLI
// =============================================================================

/// Beer catalog with interchangeable storage backends
#[derive(Parser, Debug)]
#[command(name = APP_NAME)]
#[command(about = "Save and query beers and their reviews")]
#[command(version)]
struct Cli {
    /// Storage backend: memory or json (overrides CELLAR_STORAGE)
    #[arg(short, long)]
    storage: Option<StorageKind>,

    /// Data directory for the JSON backend (overrides CELLAR_DATA_DIR)
    #[arg(long)]
    data_dir: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add a beer
    AddBeer {
        #[arg(long)]
        name: String,
        #[arg(long)]
        brewery: String,
        /// Alcohol by volume
        #[arg(long)]
        abv: f32,
        /// Short description
        #[arg(long, default_value = "")]
        desc: String,
    },
    /// List all beers
    Beers,
    /// Show one beer and its reviews
    Beer {
        /// Beer ID
        id: u64,
    },
    /// Review a beer
    AddReview {
        #[arg(long)]
        beer_id: u64,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        score: u32,
        #[arg(long, default_value = "")]
        text: String,
    },
    /// List the reviews of a beer
    Reviews {
        /// Beer ID
        beer_id: u64,
    },
    /// Load the sample catalog
    Seed,
}

// =============================================================================
// Main
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("{} v{}", APP_NAME, APP_VERSION);

    let config = Config::from_env()
        .context("failed to load configuration")?
        .with_overrides(cli.storage, cli.data_dir.as_deref());

    if config.storage == StorageKind::Memory {
        tracing::info!("Using memory storage; nothing persists after exit");
    } else {
        tracing::info!("Data directory: {}", config.data_dir.display());
    }

    let storage = new_storage(&config.storage_config())
        .await
        .context("failed to open storage")?;

    run(cli.command, storage.as_ref()).await
}

async fn run(command: Commands, storage: &dyn Storage) -> anyhow::Result<()> {
    match command {
        Commands::AddBeer {
            name,
            brewery,
            abv,
            desc,
        } => {
            let saved = storage
                .save_beer(&[Beer::new(name, brewery, abv, desc)])
                .await?;
            print_json(&saved)?;
        }
        Commands::Beers => {
            print_json(&storage.find_beers().await?)?;
        }
        Commands::Beer { id } => {
            let beer = storage
                .find_beer(&Beer::with_id(id))
                .await?
                .into_iter()
                .next()
                .with_context(|| format!("beer {id} not found"))?;
            let reviews = storage.find_review(&Review::for_beer(id)).await?;
            print_json(&BeerDetail { beer, reviews })?;
        }
        Commands::AddReview {
            beer_id,
            first_name,
            last_name,
            score,
            text,
        } => {
            let saved = storage
                .save_review(&Review::new(beer_id, first_name, last_name, score, text))
                .await?;
            print_json(&saved)?;
        }
        Commands::Reviews { beer_id } => {
            print_json(&storage.find_review(&Review::for_beer(beer_id)).await?)?;
        }
        Commands::Seed => {
            let report = sample::seed(storage).await?;
            println!(
                "Added {} beers and {} reviews",
                report.beers_added, report.reviews_added
            );
        }
    }

    Ok(())
}

/// A beer with its reviews, for `cellar beer <id>`.
#[derive(Serialize)]
struct BeerDetail {
    beer: Beer,
    reviews: Vec<Review>,
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
