use std::time::Duration;

use once_cell::sync::Lazy;
use reqwest::Client;
use thiserror::Error;

use crate::config::FeedFormat;
use crate::parsing::{csv, gviz};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed for {url}: {message}")]
    Http { url: String, message: String },
    #[error("non-success status {status} for {url}")]
    Status { url: String, status: u16 },
    #[error("unable to decode feed: {0}")]
    Decode(String),
}

static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(20))
        .user_agent("RinkBoard/0.1")
        .build()
        .unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to default http client");
            Client::new()
        })
});

/// Downloads the schedule feed and decodes it into raw rows.
pub async fn fetch_rows(url: &str, format: FeedFormat) -> Result<Vec<Vec<String>>, FeedError> {
    let body = fetch_text(url).await?;
    decode_rows(&body, format)
}

pub fn decode_rows(body: &str, format: FeedFormat) -> Result<Vec<Vec<String>>, FeedError> {
    match format {
        FeedFormat::Csv => Ok(csv::parse_csv(body)),
        FeedFormat::Gviz => gviz::parse_gviz(body),
    }
}

async fn fetch_text(url: &str) -> Result<String, FeedError> {
    let http_error = |err: reqwest::Error| FeedError::Http {
        url: url.to_string(),
        message: err.to_string(),
    };

    let response = CLIENT
        .get(url)
        .header(reqwest::header::CACHE_CONTROL, "no-store")
        .send()
        .await
        .map_err(http_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(http_error)
}
