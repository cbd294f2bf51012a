//! NewsAPI top-headlines client, plus reading a saved response from disk.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};
use url::Url;

use crate::article::Article;
use crate::error::{Error, Result};
use crate::query::HeadlineQuery;

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";
const TOP_HEADLINES_PATH: &str = "/v2/top-headlines";
const USER_AGENT: &str = concat!("good-news-first/", env!("CARGO_PKG_VERSION"));

/// Response body of `GET /v2/top-headlines`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopHeadlines {
    #[serde(default)]
    pub status: String,
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<RawArticle>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub source: RawSource,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSource {
    pub id: Option<String>,
    pub name: String,
}

impl From<RawArticle> for Article {
    fn from(raw: RawArticle) -> Self {
        Article {
            source_id: raw.source.id,
            source_name: raw.source.name,
            author: raw.author,
            title: raw.title.unwrap_or_default(),
            description: raw.description,
            url: raw.url,
            published_at: raw.published_at,
            content: raw.content,
            image_url: raw.url_to_image,
        }
    }
}

/// Error body, e.g. `{"status":"error","code":"apiKeyInvalid","message":"..."}`.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: reqwest::Client,
    api_key: String,
    base_url: Url,
}

impl NewsApiClient {
    pub fn with_base_url(api_key: impl Into<String>, base_url: Url) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url,
        })
    }

    fn endpoint(&self) -> Result<Url> {
        Ok(self.base_url.join(TOP_HEADLINES_PATH)?)
    }

    /// One request, no retries. Any failure goes back to the caller.
    #[instrument(skip_all, fields(category = %query.category, country = ?query.country.code()))]
    pub async fn top_headlines(&self, query: &HeadlineQuery) -> Result<TopHeadlines> {
        let mut params = vec![("category", query.category.as_str())];
        if let Some(country) = query.country.code() {
            params.push(("country", country));
        }

        let response = self
            .client
            .get(self.endpoint()?)
            .header("X-Api-Key", &self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                error!("news api request failed: {}", e);
                Error::Http(e)
            })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let err = api_error(status.as_u16(), &body);
            error!("news api returned {}", err);
            return Err(err);
        }

        let headlines: TopHeadlines = serde_json::from_str(&body)?;
        if headlines.status == "error" {
            return Err(api_error(status.as_u16(), &body));
        }
        info!(
            total_results = headlines.total_results,
            returned = headlines.articles.len(),
            "fetched top headlines"
        );
        Ok(headlines)
    }
}

fn api_error(status: u16, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) => Error::Api {
            status,
            code: parsed.code,
            message: parsed.message,
        },
        Err(_) => Error::Api {
            status,
            code: "unknown".to_string(),
            message: body.trim().to_string(),
        },
    }
}

/// Read a previously saved top-headlines document.
pub async fn read_fixture(path: &Path) -> Result<TopHeadlines> {
    let json = tokio::fs::read_to_string(path).await.map_err(|source| Error::Fixture {
        path: path.to_path_buf(),
        source,
    })?;
    let headlines: TopHeadlines = serde_json::from_str(&json)?;
    info!(path = ?path, total_results = headlines.total_results, "loaded headlines fixture");
    Ok(headlines)
}
