//! fetch -> normalize -> score -> rank.

use tracing::info;

use crate::article::{self, Headlines};
use crate::config::{DataSource, PipelineConfig};
use crate::error::Result;
use crate::newsapi::{self, NewsApiClient, TopHeadlines};
use crate::query::HeadlineQuery;
use crate::rank;
use crate::sentiment::{self, Lexicon, ScoredArticle, SentimentAnalyzer};
use crate::tokenize::{Stopwords, TextCleaner};

/// Get the raw query result from the configured source.
pub async fn fetch(config: &PipelineConfig, query: &HeadlineQuery) -> Result<TopHeadlines> {
    match &config.source {
        DataSource::Live { api_key, base_url } => {
            let client = NewsApiClient::with_base_url(api_key.clone(), base_url.clone())?;
            client.top_headlines(query).await
        }
        DataSource::Fixture(path) => newsapi::read_fixture(path).await,
    }
}

/// Normalize, score and rank a query result. Stopwords and lexicon are loaded fresh for each call.
pub fn process(config: &PipelineConfig, response: TopHeadlines) -> Result<Headlines<ScoredArticle>> {
    let stopwords = Stopwords::for_language(&config.language, config.stopwords_dir.as_deref())?;
    let lexicon = Lexicon::load(config.lexicon_path.as_deref())?;
    let cleaner = TextCleaner::new(stopwords);
    let analyzer = SentimentAnalyzer::new(lexicon);

    let normalized = article::normalize(response, &cleaner);
    let Headlines::Found(rows) = normalized else {
        info!("no headlines for this selection");
        return Ok(Headlines::NoResults);
    };
    info!(articles = rows.len(), "normalized articles");

    let ranked = rank::rank(sentiment::score_articles(&analyzer, rows));
    if let (Some(best), Some(worst)) = (ranked.first(), ranked.last()) {
        info!(
            best = best.final_sentiment,
            worst = worst.final_sentiment,
            "ranked articles"
        );
    }
    Ok(Headlines::Found(ranked))
}

/// The whole pipeline for one user request. Resource loading and scoring run on
/// the blocking pool so the caller's runtime threads stay free.
pub async fn run(config: &PipelineConfig, query: &HeadlineQuery) -> Result<Headlines<ScoredArticle>> {
    config.validate()?;
    info!(heading = %query.heading(), "running pipeline");
    let response = fetch(config, query).await?;
    let config = config.clone();
    tokio::task::spawn_blocking(move || process(&config, response)).await?
}
