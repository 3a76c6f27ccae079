//! Lyric Mood - command line entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lyric_mood::{
    classifier::EmotionClassifier, config::AppConfig, library, query, search, stats::LibraryStats,
    trajectory,
};

#[derive(Debug, Parser)]
#[command(name = "lyric-mood", version, about = "Emotion trajectories for song lyrics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Parse a free-text query into an emotion sequence.
    Parse { query: String },

    /// Label a text with the lexicon and context fallbacks.
    Classify { text: String },

    /// Find songs in a library whose trajectory follows the query.
    Search {
        query: String,
        /// JSON file holding an array of songs.
        #[arg(long)]
        library: PathBuf,
        /// Rank by similarity instead of boolean matching.
        #[arg(long)]
        ranked: bool,
        /// Minimum similarity when ranking.
        #[arg(long)]
        threshold: Option<f32>,
    },

    /// Overall emotion of a label sequence.
    Overall {
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// Label statistics for a library.
    Stats {
        #[arg(long)]
        library: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let cli = Cli::parse();

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config from environment: {e}, using defaults");
        AppConfig::default()
    });

    info!(
        model = %config.classifier.model,
        threshold = config.search.similarity_threshold,
        "Configuration loaded"
    );

    match cli.command {
        Command::Parse { query } => {
            let sequence = query::parse(&query);
            if sequence.is_empty() {
                println!("(no constraint)");
            } else {
                println!("{}", trajectory::format_path(&sequence));
            }
        }
        Command::Classify { text } => {
            let classifier = EmotionClassifier::new(config.classifier.clone());
            let result = classifier.classify_detailed(&text);
            println!("{} ({})", result.label, result.source);
        }
        Command::Search {
            query,
            library: path,
            ranked,
            threshold,
        } => {
            let songs = library::load_library(&path)
                .with_context(|| format!("Failed to load library {}", path.display()))?;

            if ranked || config.search.ranked {
                let threshold = threshold.unwrap_or(config.search.similarity_threshold);
                let results = search::search_ranked(&query, &songs, threshold);
                for result in &results {
                    println!("{:.2}  {}  {}", result.score, result.song.id, result.song.title);
                }
                info!(results = results.len(), "Ranked search done");
            } else {
                let results = search::search_matches(&query, &songs);
                for result in &results {
                    println!(
                        "{}  {}  [{}]",
                        result.song.id,
                        result.song.title,
                        trajectory::format_path(&result.song.trajectory())
                    );
                }
                info!(results = results.len(), "Search done");
            }
        }
        Command::Overall { labels } => {
            let summary = trajectory::summarize(&labels);
            println!("{}", summary.overall);
            println!("{}", summary.explanation());
        }
        Command::Stats { library: path } => {
            let songs = library::load_library(&path)
                .with_context(|| format!("Failed to load library {}", path.display()))?;
            let stats = LibraryStats::from_songs(&songs);
            let json =
                serde_json::to_string_pretty(&stats).context("Failed to serialize statistics")?;
            println!("{json}");
        }
    }

    Ok(())
}

/// Initialize the tracing subscriber for logging
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lyric_mood=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
