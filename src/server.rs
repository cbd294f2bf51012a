//! JSON API over the pipeline (axum).

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::article::Headlines;
use crate::config::PipelineConfig;
use crate::error::Error;
use crate::pipeline;
use crate::query::{Category, Country, HeadlineQuery};
use crate::sentiment::ScoredArticle;

pub const NO_RESULTS_MESSAGE: &str = "No Headlines found for this Country in this News Category";

/// Shared app state: the pipeline configuration, read-only.
pub type AppState = Arc<PipelineConfig>;

/// Query params for GET /headlines?category=...&country=...
#[derive(Debug, Default, Deserialize)]
pub struct HeadlinesParams {
    pub category: Option<String>,
    pub country: Option<String>,
}

impl HeadlinesParams {
    pub fn to_query(&self) -> Result<HeadlineQuery, Error> {
        let category = match &self.category {
            Some(c) => c.parse()?,
            None => Category::default(),
        };
        let country = match &self.country {
            Some(c) => c.parse()?,
            None => Country::Global,
        };
        Ok(HeadlineQuery::new(category, country))
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HeadlinesResponse {
    NoResults {
        heading: String,
        message: &'static str,
    },
    Ok {
        heading: String,
        articles: Vec<ScoredArticle>,
    },
}

impl HeadlinesResponse {
    pub fn new(query: &HeadlineQuery, headlines: Headlines<ScoredArticle>) -> Self {
        let heading = query.heading();
        match headlines {
            Headlines::NoResults => HeadlinesResponse::NoResults {
                heading,
                message: NO_RESULTS_MESSAGE,
            },
            Headlines::Found(articles) => HeadlinesResponse::Ok { heading, articles },
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Query(_) => StatusCode::BAD_REQUEST,
            e if e.is_upstream() => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            error!("request failed: {}", self);
        } else {
            warn!("bad request: {}", self);
        }
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

/// GET /headlines -> ranked articles, most positive first.
pub async fn headlines_handler(
    State(config): State<AppState>,
    Query(params): Query<HeadlinesParams>,
) -> Result<Json<HeadlinesResponse>, Error> {
    let query = params.to_query()?;
    let headlines = pipeline::run(&config, &query).await?;
    Ok(Json(HeadlinesResponse::new(&query, headlines)))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/headlines", get(headlines_handler))
        .with_state(state)
}
