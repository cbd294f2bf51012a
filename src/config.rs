//! Pipeline configuration. Built once by the binary and passed explicitly into every run.

use std::path::PathBuf;

use url::Url;

use crate::error::{Error, Result};
use crate::newsapi::DEFAULT_BASE_URL;
use crate::tokenize::DEFAULT_LANGUAGE;

pub const ENV_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_BASE_URL: &str = "NEWS_API_BASE_URL";
pub const ENV_FIXTURE: &str = "NEWS_FIXTURE";
pub const ENV_LANGUAGE: &str = "NEWS_LANGUAGE";
pub const ENV_STOPWORDS_DIR: &str = "STOPWORDS_DIR";
pub const ENV_LEXICON: &str = "VADER_LEXICON";

/// Where headlines come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Call NewsAPI.
    Live { api_key: String, base_url: Url },
    /// Read a saved top-headlines JSON document instead of calling the API.
    Fixture(PathBuf),
}

impl DataSource {
    pub fn live(api_key: impl Into<String>) -> Result<Self> {
        Ok(DataSource::Live {
            api_key: api_key.into(),
            base_url: Url::parse(DEFAULT_BASE_URL)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub source: DataSource,
    /// Stopword language, e.g. "english".
    pub language: String,
    /// Directory of per-language stopword files; the bundled English list when unset.
    pub stopwords_dir: Option<PathBuf>,
    /// Lexicon file; the bundled subset when unset.
    pub lexicon_path: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            language: DEFAULT_LANGUAGE.to_string(),
            stopwords_dir: None,
            lexicon_path: None,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_stopwords_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.stopwords_dir = dir;
        self
    }

    pub fn with_lexicon(mut self, path: Option<PathBuf>) -> Self {
        self.lexicon_path = path;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if let DataSource::Live { api_key, .. } = &self.source {
            if api_key.trim().is_empty() {
                return Err(Error::Config(format!(
                    "a NewsAPI key is required ({} or --api-key)",
                    ENV_API_KEY
                )));
            }
        }
        if self.language.trim().is_empty() {
            return Err(Error::Config("language must not be empty".to_string()));
        }
        Ok(())
    }
}
