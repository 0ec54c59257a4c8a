use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use speedreader::{
    config::Config,
    reading::{self, ReadingStats},
    DocumentReference, Extractor,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "speedreader")]
#[command(about = "Extract readable text from notes, PDFs, DOCX and EPUB files for speed reading")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to config file (default: config/settings.toml or ~/.config/speedreader/settings.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the extracted text of a document
    #[command(name = "extract")]
    Extract {
        /// Document to read
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Print one reading chunk per line instead of the raw text
        #[arg(long)]
        chunked: bool,
        /// Words per chunk (overrides config)
        #[arg(long)]
        chunk_size: Option<usize>,
    },
    /// List supported documents under a directory
    #[command(name = "list")]
    List {
        /// Directory (vault) to scan
        #[arg(value_name = "DIR")]
        dir: PathBuf,
    },
    /// Word count and reading time of a document
    #[command(name = "stats")]
    Stats {
        /// Document to measure
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Words per minute (overrides config)
        #[arg(long)]
        wpm: Option<u32>,
        /// Words per chunk (overrides config)
        #[arg(long)]
        chunk_size: Option<usize>,
        /// Print stats as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load().unwrap_or_default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let extractor = Extractor::from_config(&config.extraction);

    match cli.command {
        Commands::Extract {
            file,
            chunked,
            chunk_size,
        } => {
            let text = extract_with_spinner(&extractor, &file).await?;
            if text.trim().is_empty() {
                eprintln!("No extractable text in {}", file.display());
                return Ok(());
            }

            if chunked {
                let chunk_size = chunk_size.unwrap_or(config.reader.normalized().chunk_size);
                let words = reading::tokenize(&text);
                for chunk in reading::chunk_words(&words, chunk_size) {
                    println!("{}", chunk);
                }
            } else {
                println!("{}", text);
            }
        }
        Commands::List { dir } => {
            let files = Extractor::supported_files(&dir);
            for path in &files {
                let extension = speedreader::utils::get_extension(path).unwrap_or_default();
                let display = path.strip_prefix(&dir).unwrap_or(path);
                println!("{} {}", Extractor::icon_for(&extension), display.display());
            }
            eprintln!("{} supported files", files.len());
        }
        Commands::Stats {
            file,
            wpm,
            chunk_size,
            json,
        } => {
            let mut reader = config.reader.clone();
            if let Some(wpm) = wpm {
                reader.words_per_minute = wpm;
            }
            if let Some(chunk_size) = chunk_size {
                reader.chunk_size = chunk_size;
            }

            let text = extract_with_spinner(&extractor, &file).await?;
            let stats = ReadingStats::compute(&text, &reader);

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else if stats.is_empty() {
                println!("No extractable text in {}", file.display());
            } else {
                println!("File: {}", file.display());
                println!("Words: {}", stats.words);
                println!("Chunks: {} ({} words each)", stats.chunks, stats.chunk_size);
                println!(
                    "Reading time: {} at {} wpm",
                    format_duration(stats.duration),
                    stats.words_per_minute
                );
                println!(
                    "Without chunking: {}",
                    format_duration(reading::estimated_duration(stats.words, stats.words_per_minute))
                );
            }
        }
    }

    Ok(())
}

async fn extract_with_spinner(extractor: &Extractor, file: &Path) -> Result<String> {
    if !file.is_file() {
        anyhow::bail!("Not a file: {}", file.display());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap(),
    );
    pb.set_message(format!("Extracting {}", file.display()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let doc = DocumentReference::from_path(file);
    let result = extractor
        .extract_text(&doc)
        .await
        .with_context(|| format!("Failed to read {}", file.display()));

    pb.finish_and_clear();
    result
}

fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, minutes, seconds) = (total / 3600, (total % 3600) / 60, total % 60);
    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else {
        format!("{}m {:02}s", minutes, seconds)
    }
}
