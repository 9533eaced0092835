use anyhow::{Context, Result};
use catalog::CatalogStore;
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{AntiRecommender, Disambiguation, RecommendOutcome, RecommendationBundle, Resolution};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Anti-Recs - Movie Anti-Recommendation Engine
#[derive(Parser)]
#[command(name = "anti-recs")]
#[command(about = "Recommends movies deliberately dissimilar to the one you name", long_about = None)]
struct Cli {
    /// Path to the clustered dataset CSV
    #[arg(long, default_value = "data/clustered_dataset.csv")]
    data_path: PathBuf,

    /// Path to the serialized cluster model artifact
    #[arg(long, default_value = "data/movies_kmeans.json")]
    model_path: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get anti-recommendations for a movie
    Recommend {
        /// Movie title to base anti-recommendations on
        #[arg(long)]
        title: String,

        /// Release year, for disambiguating titles with multiple releases
        #[arg(long)]
        year: Option<u16>,
    },

    /// Resolve a title to its catalog entry without recommending
    Resolve {
        /// Movie title to resolve
        #[arg(long)]
        title: String,

        /// Release year
        #[arg(long)]
        year: Option<u16>,
    },

    /// Show search-box suggestions for a query
    Suggest {
        /// Free-text query
        #[arg(long)]
        query: String,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load the catalog and model (this may take a moment)
    println!(
        "Loading catalog from {} and model from {}...",
        cli.data_path.display(),
        cli.model_path.display()
    );
    let start = Instant::now();
    let store = Arc::new(
        CatalogStore::load(&cli.data_path, &cli.model_path)
            .context("Failed to load catalog artifacts")?,
    );
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    let recommender = AntiRecommender::new(store.clone());

    match cli.command {
        Commands::Recommend { title, year } => handle_recommend(&recommender, &title, year)?,
        Commands::Resolve { title, year } => handle_resolve(&store, &recommender, &title, year),
        Commands::Suggest { query } => handle_suggest(&recommender, &query),
    }

    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(recommender: &AntiRecommender, title: &str, year: Option<u16>) -> Result<()> {
    match recommender.recommend(title, year)? {
        RecommendOutcome::Bundle(bundle) => print_bundle(&bundle),
        RecommendOutcome::Unresolved(disambiguation) => print_disambiguation(&disambiguation),
    }
    Ok(())
}

/// Handle the 'resolve' command
fn handle_resolve(
    store: &CatalogStore,
    recommender: &AntiRecommender,
    title: &str,
    year: Option<u16>,
) {
    match recommender.resolve_title(title, year) {
        Resolution::Resolved(rows) => {
            println!("{}", "Resolved:".bold().blue());
            for row_id in rows {
                if let Some(row) = store.row(row_id) {
                    println!(
                        "  {} ({}) - rating {:.2}, cluster {}",
                        row.standardized_title.bold(),
                        row.year,
                        row.rating,
                        row.cluster
                    );
                }
            }
        }
        Resolution::Unresolved(disambiguation) => print_disambiguation(&disambiguation),
    }
}

/// Handle the 'suggest' command
fn handle_suggest(recommender: &AntiRecommender, query: &str) {
    let suggestions = recommender.search_suggestions(query);
    println!("{}", format!("Suggestions for '{}':", query).bold().blue());
    for suggestion in suggestions {
        println!("  {} {}", "•".green(), suggestion);
    }
}

/// Print a recommendation bundle
fn print_bundle(bundle: &RecommendationBundle) {
    println!(
        "{}",
        format!(
            "Because you liked {} ({}) [rating {:.2}]:",
            bundle.query.title, bundle.query.year, bundle.query.rating
        )
        .bold()
        .blue()
    );

    if bundle.recommendations.is_empty() {
        println!("  (the farthest cluster has no movies in any rating band)");
        return;
    }

    println!("{}", "Try something completely different:".bold());
    for (i, rec) in bundle.recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) - rating {:.2} [cluster {}]",
            (i + 1).to_string().green(),
            rec.standardized_title,
            rec.year,
            rec.rating,
            rec.cluster
        );
    }
}

/// Print a disambiguation result
fn print_disambiguation(disambiguation: &Disambiguation) {
    println!("{} {}", "✗".red(), disambiguation.message.bold());
    if let Some(matches) = &disambiguation.possible_matches {
        for (title, year) in matches {
            println!("  {} {} ({})", "•".yellow(), title, year);
        }
    }
}
