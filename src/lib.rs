//! GoodNewsFirst: fetch top headlines, score their sentiment, rank them best news first.

pub mod article;
pub mod config;
pub mod error;
pub mod logging;
pub mod newsapi;
pub mod pipeline;
pub mod query;
pub mod rank;
pub mod sentiment;
pub mod server;
pub mod tokenize;

pub use article::{Article, Headlines, NormalizedArticle};
pub use config::{DataSource, PipelineConfig};
pub use error::{Error, Result};
pub use query::{Category, Country, HeadlineQuery};
pub use sentiment::{Lexicon, PolarityScores, ScoredArticle, SentimentAnalyzer};
pub use tokenize::{Stopwords, TextCleaner};
