mod app;
mod commands;
mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use mindmesh_lib::flashcards::ReviewOutcome;

#[derive(Parser)]
#[command(name = "mindmesh-cli", about = "Cognitive maps and flashcards from plain text", version)]
struct Cli {
    /// Engine config file (default: <config dir>/mindmesh/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl From<Rating> for ReviewOutcome {
    fn from(rating: Rating) -> Self {
        match rating {
            Rating::Again => ReviewOutcome::Again,
            Rating::Hard => ReviewOutcome::Hard,
            Rating::Good => ReviewOutcome::Good,
            Rating::Easy => ReviewOutcome::Easy,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Show sentences, key phrases and entities found in a file
    Analyze {
        /// Text or markdown file
        file: PathBuf,
    },

    /// Build the cognitive map of a file
    Map {
        /// Text or markdown file
        file: PathBuf,
        /// Map title (defaults to the file name)
        #[arg(long)]
        title: Option<String>,
        #[arg(long, default_value = "1")]
        document_id: i64,
    },

    /// Generate flashcards from a file
    Cards {
        /// Text or markdown file
        file: PathBuf,
        #[arg(long, default_value = "1")]
        document_id: i64,
        /// Write the deck as JSON to this path
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// List due cards and deck statistics
    Due {
        /// Deck JSON file
        deck: PathBuf,
    },

    /// Record a review for one card and save the deck
    Review {
        /// Deck JSON file
        deck: PathBuf,
        /// Card number as listed by `due`
        card: usize,
        /// How well you recalled it
        rating: Rating,
    },

    /// Cosine similarity between the embeddings of two files
    Similarity {
        a: PathBuf,
        b: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && atty_check();
    let app = app::App::new(cli.config.as_deref())?;

    match cli.command {
        Command::Analyze { file } => {
            commands::analyze::run(&app, &file, &cli.format, use_color)?;
        }
        Command::Map { file, title, document_id } => {
            commands::map::run(&app, &file, title.as_deref(), document_id, &cli.format, use_color)?;
        }
        Command::Cards { file, document_id, out } => {
            commands::cards::run(&app, &file, document_id, out.as_deref(), &cli.format, use_color)?;
        }
        Command::Due { deck } => {
            commands::due::run(&app, &deck, &cli.format, use_color)?;
        }
        Command::Review { deck, card, rating } => {
            commands::review::run(&app, &deck, card, rating.into(), &cli.format, use_color)?;
        }
        Command::Similarity { a, b } => {
            commands::similarity::run(&app, &a, &b, &cli.format)?;
        }
    }

    Ok(())
}

/// Check if stdout is a terminal (for color support)
fn atty_check() -> bool {
    unsafe { libc_isatty(1) != 0 }
}

extern "C" {
    #[link_name = "isatty"]
    fn libc_isatty(fd: i32) -> i32;
}
