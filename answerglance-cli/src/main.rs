//! Answerglance CLI - command-line interface
//!
//! Feeds and inspects the shared answer store: play the producer role by
//! syncing a library file, or the display-surface role by printing the
//! snapshot answer and generated timelines.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use answerglance::config::{self, Settings};
use answerglance::logging;
use answerglance::service::{AnswerService, ServiceConfig};
use answerglance::store::FileStore;

use error::CliError;

#[derive(Parser)]
#[command(name = "answerglance")]
#[command(version = answerglance::VERSION)]
#[command(about = "Feed and inspect the shared answer store", long_about = None)]
struct Cli {
    /// Path to the INI config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the shared store directory
    #[arg(long, global = true)]
    store_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write a library JSON file into the shared store (the producer role)
    Sync {
        /// Path to a JSON file with id, name, and answers fields
        file: PathBuf,
    },
    /// Print the answer a display surface would show right now
    Show,
    /// Generate and print a timeline for a display-surface size
    Timeline {
        /// Display-surface size class: small, medium, or large
        #[arg(long, default_value = "medium")]
        size: String,

        /// Print at most this many entries
        #[arg(long, default_value = "10")]
        limit: usize,
    },
    /// Print the current library id, or select a new one
    Library {
        /// New current library id; prints the current one when omitted
        id: Option<String>,
    },
    /// Run instrumented reads and print the performance report
    Perf {
        /// Number of instrumented snapshot reads
        #[arg(long, default_value = "20")]
        samples: usize,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        err.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(config::default_config_path);
    let mut settings = Settings::load(&config_path)?;
    if let Some(dir) = cli.store_dir {
        settings.store.directory = dir;
    }

    let _logging = match logging::init_logging(&settings.logging.directory, &settings.logging.file)
    {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: logging disabled: {err}");
            None
        }
    };

    let store = Arc::new(FileStore::new(settings.store_path()));
    let (service, mut refresh_events) =
        AnswerService::with_config(store, ServiceConfig::from_settings(&settings));

    match cli.command {
        Command::Sync { file } => commands::sync::run(&service, &mut refresh_events, &file),
        Command::Show => commands::show::run(&service),
        Command::Timeline { size, limit } => commands::timeline::run(&service, &size, limit),
        Command::Library { id } => {
            commands::library::run(&service, id.as_deref(), &mut refresh_events)
        }
        Command::Perf { samples } => commands::perf::run(&service, samples),
    }
}
