//! CLI error handling with user-friendly messages.

use answerglance::config::ConfigError;
use answerglance::store::StoreError;
use std::process;
use thiserror::Error;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file problem
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Shared store read or write failed
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Library file could not be read
    #[error("failed to read library file '{path}': {source}")]
    LibraryFile {
        path: String,
        source: std::io::Error,
    },

    /// Library file is not a valid record
    #[error("library file '{path}' is not a valid library record: {source}")]
    LibraryFormat {
        path: String,
        source: serde_json::Error,
    },

    /// Bad command-line argument
    #[error("{0}")]
    InvalidArgument(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        if let CliError::LibraryFormat { .. } = self {
            eprintln!();
            eprintln!("A library file looks like:");
            eprintln!(
                "  {{\"id\": \"lib1\", \"name\": \"Lib One\", \"answers\": [\"yes\", \"no\"]}}"
            );
        }

        process::exit(1)
    }
}
