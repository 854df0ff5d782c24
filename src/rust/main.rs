use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use drugwatch::{
    ensure_logger_initialized, ArtifactStore, BundleHandle, ClassifierBundle, RuntimeConfig,
    DEFAULT_HOST, DEFAULT_PORT, SUSPICIOUS_THRESHOLD,
};
use log::info;

#[derive(Parser)]
#[command(author, version, about = "Detect drug-related chat messages", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fit the classifier on the built-in corpus and save it
    Train {
        /// Directory holding model.json (defaults to $DRUGWATCH_HOME/models or the user cache)
        #[arg(long, value_name = "DIR")]
        artifact_dir: Option<PathBuf>,
    },
    /// Score a single message with the saved classifier
    Predict {
        #[arg(long, value_name = "DIR")]
        artifact_dir: Option<PathBuf>,

        /// Confidence above which a message is suspicious
        #[arg(short = 't', long, default_value_t = SUSPICIOUS_THRESHOLD)]
        threshold: f64,

        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,

        /// Text to analyze (reads stdin if omitted)
        #[arg(value_name = "TEXT")]
        text: Option<String>,
    },
    /// Run the HTTP service
    Serve {
        #[arg(long, value_name = "DIR")]
        artifact_dir: Option<PathBuf>,

        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,

        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,

        #[arg(short = 't', long, default_value_t = SUSPICIOUS_THRESHOLD)]
        threshold: f64,

        /// Train and save a classifier first if none has been saved
        #[arg(long)]
        train_if_missing: bool,
    },
}

fn open_store(dir: Option<PathBuf>) -> Result<ArtifactStore> {
    let dir = dir.unwrap_or_else(ArtifactStore::get_default_dir);
    ArtifactStore::new(&dir).with_context(|| format!("Failed to open artifact directory {:?}", dir))
}

fn train(store: &ArtifactStore) -> Result<()> {
    let start_time = Instant::now();
    info!("Training classifier...");
    let bundle = ClassifierBundle::builder()
        .with_corpus()
        .build()
        .context("Training failed")?;
    let path = store.save(&bundle).context("Failed to save classifier")?;

    let summary = bundle.info();
    info!(
        "Trained {} features in {} iterations (took {:.2?})",
        summary.num_features,
        summary.iterations,
        start_time.elapsed()
    );
    println!("Saved classifier to {}", path.display());
    Ok(())
}

fn read_text(text: Option<String>) -> Result<String> {
    use std::io::Read;

    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer.trim_end().to_string())
        }
    }
}

fn predict(store: &ArtifactStore, text: &str, threshold: f64, json: bool) -> Result<()> {
    let bundle = store
        .load()
        .context("No usable classifier; run `drugwatch train` first")?;
    let prediction = bundle.classify(text, threshold)?;

    if json {
        println!("{}", serde_json::to_string(&prediction)?);
    } else {
        println!("{}", prediction);
    }
    Ok(())
}

async fn serve(config: RuntimeConfig) -> Result<()> {
    let store = ArtifactStore::new(&config.artifact_dir)
        .with_context(|| format!("Failed to open artifact directory {:?}", config.artifact_dir))?;

    if !store.exists() {
        if config.train_if_missing {
            info!("No saved classifier found, training one now");
            train(&store)?;
        } else {
            anyhow::bail!(
                "No classifier at {:?}; run `drugwatch train` or pass --train-if-missing",
                store.artifact_path()
            );
        }
    }

    let handle = BundleHandle::load(store).context("Failed to load classifier")?;
    let addr = config.socket_addr().context("Invalid listen address")?;
    drugwatch::server::serve(addr, Arc::new(handle), config.threshold)
        .await
        .context("Server error")
}

#[tokio::main]
async fn main() -> Result<()> {
    ensure_logger_initialized();
    let args = Args::parse();

    match args.command {
        Command::Train { artifact_dir } => train(&open_store(artifact_dir)?),
        Command::Predict {
            artifact_dir,
            threshold,
            json,
            text,
        } => {
            let store = open_store(artifact_dir)?;
            predict(&store, &read_text(text)?, threshold, json)
        }
        Command::Serve {
            artifact_dir,
            host,
            port,
            threshold,
            train_if_missing,
        } => {
            let config = RuntimeConfig {
                host,
                port,
                threshold,
                artifact_dir: artifact_dir.unwrap_or_else(ArtifactStore::get_default_dir),
                train_if_missing,
            };
            serve(config).await
        }
    }
}
