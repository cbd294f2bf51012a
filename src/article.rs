//! Normalize a top-headlines response into article rows with tokenized text fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::newsapi::TopHeadlines;
use crate::tokenize::TextCleaner;

/// Either nothing matched the query, or the rows that did.
#[derive(Debug, Clone, PartialEq)]
pub enum Headlines<T> {
    NoResults,
    Found(Vec<T>),
}

impl<T> Headlines<T> {
    pub fn len(&self) -> usize {
        match self {
            Headlines::NoResults => 0,
            Headlines::Found(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One article as delivered by the news API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub source_id: Option<String>,
    pub source_name: String,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedArticle {
    #[serde(flatten)]
    pub article: Article,
    pub title_tokenized: String,
    pub description_tokenized: String,
    pub content_tokenized: String,
}

impl NormalizedArticle {
    pub fn new(article: Article, cleaner: &TextCleaner) -> Self {
        let title_tokenized = cleaner.sentence(Some(&article.title), false);
        let description_tokenized = cleaner.sentence(article.description.as_deref(), false);
        let content_tokenized = cleaner.sentence(article.content.as_deref(), false);
        Self {
            article,
            title_tokenized,
            description_tokenized,
            content_tokenized,
        }
    }
}

/// Map the raw response to normalized rows in API order. A zero `totalResults`
/// yields `NoResults` whatever `articles` holds.
pub fn normalize(response: TopHeadlines, cleaner: &TextCleaner) -> Headlines<NormalizedArticle> {
    if response.total_results == 0 {
        return Headlines::NoResults;
    }
    let rows = response
        .articles
        .into_iter()
        .map(|raw| NormalizedArticle::new(raw.into(), cleaner))
        .collect();
    Headlines::Found(rows)
}
