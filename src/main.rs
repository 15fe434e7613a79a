use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use topic_coherence::aggregate::{Summarizer, Weighter};
use topic_coherence::config::Config;
use topic_coherence::corpus::{ContextMode, CorpusAdapter, IndexBuilder};
use topic_coherence::db::SqliteIndex;
use topic_coherence::evaluate::Agreement;
use topic_coherence::measures::ConfirmationMeasure;
use topic_coherence::output::{self, ScoreRun};
use topic_coherence::subsets::SubsetStrategy;
use topic_coherence::{Coherence, Preset};

/// Topic coherence: how well do the top words of a topic belong together?
///
/// Scores word lists against co-occurrence statistics of a reference corpus,
/// using any combination of segmentation, confirmation measure and
/// aggregation.
#[derive(Parser)]
#[command(name = "topic-coherence", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a corpus index from a text file (one document per line)
    Index {
        /// Whitespace-tokenized corpus, one document per line
        #[arg(long)]
        corpus: PathBuf,

        /// Sliding window size; without it every document is one context
        #[arg(long)]
        window: Option<usize>,
    },

    /// Score wordsets (one per line, words separated by whitespace)
    Score {
        /// File with one wordset per line
        #[arg(long)]
        input: PathBuf,

        /// Preset to start from (C_V, C_P, C_UCI, C_NPMI, C_A, UMass)
        #[arg(long)]
        measure: Option<String>,

        /// Override the segmentation (e.g. one-one, one-pre, S_any^any)
        #[arg(long)]
        subsets: Option<String>,

        /// Override the confirmation measure (e.g. m_lr, m_cos(V_nlr(2)))
        #[arg(long)]
        confirmation: Option<String>,

        /// Override the summarizer (σ_a, σ_m, σ_min, σ_max)
        #[arg(long)]
        summarizer: Option<String>,

        /// Override the weighter (w_1, w_c)
        #[arg(long)]
        weighter: Option<String>,

        /// Label of the reference corpus in the configuration name
        #[arg(long, default_value = "corpus")]
        source: String,

        /// Load the whole index into memory before scoring
        #[arg(long)]
        in_memory: bool,

        /// Also write results as JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Also write a markdown report
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Correlate coherence scores with human ratings
    Evaluate {
        /// Scores: a JSON results file, or one number per line
        #[arg(long)]
        scores: PathBuf,

        /// Ratings: one number per line, same order as the scores
        #[arg(long)]
        ratings: PathBuf,
    },

    /// List the named presets
    Measures,

    /// Show index status (path, size, context model, vocabulary)
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("topic_coherence=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Index { corpus, window } => {
            let config = Config::load()?;
            let mode = match window {
                Some(size) => ContextMode::SlidingWindow(size),
                None => ContextMode::Document,
            };

            info!(corpus = %corpus.display(), mode = %mode, "Building index");
            let file = File::open(&corpus)
                .with_context(|| format!("Failed to open corpus {}", corpus.display()))?;
            let mut builder = IndexBuilder::new(mode)?;
            builder.add_reader(BufReader::new(file))?;
            let index = builder.finish();

            if index.total_contexts() == 0 {
                anyhow::bail!(
                    "Corpus {} produced no contexts. Is the file empty?",
                    corpus.display()
                );
            }

            SqliteIndex::create(&config.db_path, &index)?;

            println!("\n{}", "=== Index Built ===".bold());
            println!("  Path: {}", config.db_path);
            println!("  Context model: {} ({})", mode, mode.model_name());
            println!("  Documents: {}", index.document_count());
            println!("  Contexts: {}", index.total_contexts());
            println!("  Vocabulary: {} words", index.vocabulary_size());
        }

        Commands::Score {
            input,
            measure,
            subsets,
            confirmation,
            summarizer,
            weighter,
            source,
            in_memory,
            json,
            report,
        } => {
            let config = Config::load()?;
            config.require_index()?;
            configure_threads(&config)?;

            let preset = match measure {
                Some(name) => name.parse::<Preset>()?,
                None => config.measure,
            };

            let index = SqliteIndex::open(&config.db_path)?;
            let index_mode = index.context_mode();
            if preset.context_mode() != index_mode {
                warn!(
                    preset = preset.name(),
                    recommended = %preset.context_mode(),
                    index = %index_mode,
                    "Index context model differs from the preset's"
                );
            }
            let corpus: Arc<dyn CorpusAdapter> = if in_memory {
                Arc::new(index.to_memory()?)
            } else {
                Arc::new(index)
            };

            let strategy = match subsets {
                Some(name) => name.parse::<SubsetStrategy>()?,
                None => preset.strategy(),
            };
            let confirmation = match confirmation {
                Some(name) => name.parse::<ConfirmationMeasure>()?,
                None => preset.measure(),
            };
            let summarizer = match summarizer {
                Some(name) => name.parse::<Summarizer>()?,
                None => preset.summarizer(),
            };
            let weighter = match weighter {
                Some(name) => name.parse::<Weighter>()?,
                None => preset.weighter(),
            };

            let coherence = Coherence::new(
                corpus,
                strategy,
                confirmation.with_epsilon(config.epsilon),
                summarizer,
                weighter,
            )?
            .with_data_source(source);

            let wordsets = read_wordsets(&input)?;

            let pb = ProgressBar::new(wordsets.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("  Scoring [{bar:30}] {pos}/{len} ({eta})")?,
            );
            let scores = coherence.score_with_progress(&wordsets, || pb.inc(1))?;
            pb.finish_and_clear();

            let run = ScoreRun::new(coherence.configuration_name(), &wordsets, &scores);
            output::terminal::display_scores(&run);

            if let Some(path) = json {
                output::json::write_results(&path, &run)?;
                println!("\nResults written to {}", path.display());
            }
            if let Some(path) = report {
                output::markdown::write_report(&path, &run)?;
                println!("Report written to {}", path.display());
            }
        }

        Commands::Evaluate { scores, ratings } => {
            let scores = read_values(&scores)?;
            let ratings = read_values(&ratings)?;
            if scores.len() != ratings.len() {
                anyhow::bail!(
                    "Got {} scores but {} ratings; both files must list the same topics",
                    scores.len(),
                    ratings.len()
                );
            }
            let agreement = Agreement::between(&scores, &ratings)?;
            output::terminal::display_agreement(&agreement);
        }

        Commands::Measures => {
            let config = Config::load()?;
            output::terminal::display_presets(config.measure);
        }

        Commands::Status => {
            let config = Config::load()?;
            topic_coherence::status::show(&config.db_path)?;
        }
    }

    Ok(())
}

/// Size the global rayon pool from COHERENCE_THREADS, if set.
fn configure_threads(config: &Config) -> Result<()> {
    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure scoring threads")?;
        info!(threads, "Configured scoring threads");
    }
    Ok(())
}

/// One wordset per non-empty line. Lines starting with `#` are comments.
fn read_wordsets(path: &Path) -> Result<Vec<Vec<String>>> {
    let file =
        File::open(path).with_context(|| format!("Failed to open wordsets {}", path.display()))?;

    let mut wordsets = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", number + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        wordsets.push(trimmed.split_whitespace().map(str::to_string).collect());
    }
    Ok(wordsets)
}

/// Numbers from a JSON results file, or the first field of each line.
fn read_values(path: &Path) -> Result<Vec<f64>> {
    if path.extension().is_some_and(|ext| ext == "json") {
        let run = output::json::read_results(path)?;
        return Ok(run.results.iter().map(|r| r.score).collect());
    }

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut values = Vec::new();
    for (number, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let Some(field) = line.split_whitespace().next() else {
            continue;
        };
        if field.starts_with('#') {
            continue;
        }
        let value: f64 = field.parse().with_context(|| {
            format!("{}:{}: {field:?} is not a number", path.display(), number + 1)
        })?;
        values.push(value);
    }
    Ok(values)
}
