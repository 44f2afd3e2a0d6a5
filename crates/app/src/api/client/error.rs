use common::error::SignError;
use reqwest::{StatusCode, Url};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),
    #[error("URL cannot be used as a base: {0}")]
    CannotBeABase(Url),
    #[error("signing failed: {0}")]
    Sign(#[from] SignError),
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),
    #[error("HTTP status {0}: {1}")]
    HttpStatus(StatusCode, String),
}
