//! Crate-wide error type. Nothing here is retried: failures go straight back to the caller.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read stopwords from {path:?}: {source}")]
    Stopwords {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no stopword list available for language '{0}'")]
    UnsupportedLanguage(String),

    #[error("failed to read lexicon from {path:?}: {source}")]
    Lexicon {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lexicon line {line}: {reason}")]
    LexiconFormat { line: usize, reason: String },

    #[error("failed to read fixture {path:?}: {source}")]
    Fixture {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("news api error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("failed to decode news response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid query: {0}")]
    Query(String),

    #[error("scoring task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    /// True when the failure came from NewsAPI or the network rather than local resources.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. } | Self::Decode(_))
    }
}
