use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} API error ({status}): {message}")]
    Api {
        service: &'static str,
        status: StatusCode,
        message: String,
    },

    #[error("Failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("No trending products found for query '{0}'")]
    NoProducts(String),

    #[error("Search result is missing the '{0}' field")]
    MissingField(&'static str),

    #[error("Model returned no text")]
    EmptyGeneration,

    #[error("Prompt was blocked by the model: {0}")]
    Blocked(String),

    #[error("Model response contained no keywords")]
    NoKeywords,

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
