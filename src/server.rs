//! HTTP front end.
//!
//! `GET /?urls=https://a,https://b` scores the listed articles and answers
//! with a JSON array of results in the order the URLs were given. Caller
//! mistakes come back as `400` with an `{"error": "..."}` body.

use crate::error::PipelineError;
use crate::models::ArticleRequest;
use crate::pipeline::Analyzer;
use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::json;
use std::error::Error;
use std::time::Duration;
use thiserror::Error as ThisError;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

#[derive(Debug, Clone)]
pub struct AppState {
    pub analyzer: Analyzer,
    pub timeout: Duration,
    pub max_urls: usize,
}

#[derive(Debug, Deserialize)]
pub struct ScoreQuery {
    urls: Option<String>,
}

#[derive(Debug, ThisError)]
pub enum ApiError {
    #[error("there are no \"urls\" key in query string")]
    MissingUrls,

    #[error("too many urls in request, should be {max} or less")]
    TooManyUrls { max: usize },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error("failed to encode results: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingUrls | ApiError::TooManyUrls { .. } => StatusCode::BAD_REQUEST,
            ApiError::Pipeline(_) | ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, "Batch failed");
        }
        (status, axum::Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(score_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Split the comma-separated `urls` value, dropping empty entries.
pub fn parse_urls(raw: &str) -> Vec<ArticleRequest> {
    raw.split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(ArticleRequest::new)
        .collect()
}

#[instrument(level = "info", skip_all)]
async fn score_handler(
    State(state): State<AppState>,
    Query(query): Query<ScoreQuery>,
) -> Result<Response, ApiError> {
    let raw = query.urls.ok_or(ApiError::MissingUrls)?;
    let requests = parse_urls(&raw);
    if requests.len() > state.max_urls {
        return Err(ApiError::TooManyUrls {
            max: state.max_urls,
        });
    }

    info!(count = requests.len(), "Scoring request");
    let results = state
        .analyzer
        .process(&requests, Some(state.timeout))
        .await?;

    let body = serde_json::to_string_pretty(&results)?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: &str) -> Result<(), Box<dyn Error>> {
    let listener = TcpListener::bind(addr).await?;
    let local = listener.local_addr()?;
    info!(addr = %local, max_urls = state.max_urls, "Listening");

    axum::serve(listener, create_app(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;
    Ok(())
}
