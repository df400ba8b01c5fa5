use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use drammatch::prelude::*;

/// Whisky feature pipeline and similarity recommender
#[derive(Parser, Debug)]
#[command(name = "drammatch")]
#[command(about = "Build whisky feature catalogs and recommend bottlings", long_about = None)]
struct Args {
    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a catalog and schema artifact from a scraped batch
    Build {
        /// Scraped details CSV
        #[arg(long)]
        details: PathBuf,

        /// Optional main-page CSV merged by URL (suffix, rating, counts)
        #[arg(long)]
        main_page: Option<PathBuf>,

        /// Output catalog CSV
        #[arg(long, default_value = "catalog.csv")]
        out: PathBuf,

        /// Output schema artifact
        #[arg(long, default_value = "schema.json")]
        schema: PathBuf,
    },

    /// Recommend a bottling for a selection of full names
    Recommend {
        /// Catalog CSV produced by `build`
        #[arg(long, default_value = "catalog.csv")]
        catalog: PathBuf,

        /// Schema artifact produced by `build`
        #[arg(long, default_value = "schema.json")]
        schema: PathBuf,

        /// Whisky full names the user already likes
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Record user feedback about a recommendation
    Feedback {
        /// Feedback directory
        #[arg(long, default_value = "feedback")]
        dir: PathBuf,

        /// The full names that were selected
        #[arg(long = "selection", required = true)]
        selections: Vec<String>,

        /// The recommendation that was shown
        #[arg(long)]
        recommended: String,

        /// Free-text feedback
        #[arg(long)]
        notes: String,

        /// Optional 1–5 rating
        #[arg(long)]
        rating: Option<u8>,

        /// Optional self-reported whisky experience level
        #[arg(long)]
        experience: Option<String>,

        /// Submission timestamp, e.g. 2024-05-17T19:03:12.345Z
        #[arg(long)]
        timestamp: String,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match args.command {
        Command::Build {
            details,
            main_page,
            out,
            schema,
        } => {
            info!("Building catalog from {:?}", details);
            let raws = read_raw_records(&details, main_page.as_deref())?;
            let catalog = build_catalog_from_raw(&raws)?;
            write_catalog(&catalog, &out)?;
            save_schema(catalog.schema(), &schema)?;
            info!(
                "Catalog built: {} entries, {} feature columns",
                catalog.len(),
                catalog.schema().len()
            );
        }

        Command::Recommend {
            catalog,
            schema,
            names,
        } => {
            let schema = load_schema(&schema)?;
            let catalog = read_catalog(&catalog, &schema)?;
            let recommender = Recommender::new(Arc::new(catalog));
            let response: RecommendationResponse = recommender.recommend(&names)?.into();
            println!("{}", serde_json::to_string_pretty(&response)?);
        }

        Command::Feedback {
            dir,
            selections,
            recommended,
            notes,
            rating,
            experience,
            timestamp,
        } => {
            let store = FeedbackStore::new(&dir)?;
            let path = store.save(&FeedbackRecord {
                selections,
                recommended,
                feedback: notes,
                rating,
                experience,
                timestamp,
            })?;
            info!("Feedback written to {:?}", path);
        }
    }

    Ok(())
}
