use crate::models::Center;
use futures::{stream, StreamExt, TryStreamExt};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Default endpoint of the hemocentros data API
pub const DEFAULT_SOURCE_URL: &str = "https://lucassampaio.app.n8n.cloud/webhook/hemocentros";

/// Legacy pages requested at the same time
const MAX_CONCURRENT_PAGES: usize = 4;

/// Errors that can occur when fetching the center collection
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Failed to load page {page}: {status}")]
    PageFailed { page: u32, status: StatusCode },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Failure of a fetch shared by concurrent cache lookups
    #[error(transparent)]
    Shared(#[from] Arc<SourceError>),
}

/// Provider of the full center collection
pub trait RecordSource {
    /// Fetch every center; a partial failure fails the whole fetch
    fn fetch_all(&self) -> impl Future<Output = Result<Vec<Center>, SourceError>> + Send;
}

/// HTTP client for the data API
///
/// Understands both response shapes the API has served:
/// - a bare JSON array of centers
/// - the legacy paged envelope `{ "dados": [...], "pagina": 1, "total_paginas": n }`,
///   whose remaining pages are fetched concurrently (at most
///   `MAX_CONCURRENT_PAGES` at a time) with `?pagina=<n>`
pub struct HttpRecordSource {
    url: String,
    client: Client,
}

impl HttpRecordSource {
    /// Create a new client for `url`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn page_url(&self, page: u32) -> String {
        let separator = if self.url.contains('?') { '&' } else { '?' };
        format!("{}{}pagina={}", self.url, separator, page)
    }

    async fn get_json(&self, url: &str) -> Result<(StatusCode, Option<Value>), SourceError> {
        tracing::debug!("Fetching centers from: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Ok((status, None));
        }

        Ok((status, Some(response.json().await?)))
    }

    /// Fetch one page of the legacy envelope; pages without `dados` contribute nothing
    async fn fetch_page(&self, page: u32) -> Result<Vec<Center>, SourceError> {
        let (status, body) = self.get_json(&self.page_url(page)).await?;
        let body = body.ok_or(SourceError::PageFailed { page, status })?;

        match body.get("dados") {
            Some(Value::Array(items)) => parse_centers(items),
            _ => {
                tracing::debug!("Page {} has no dados array, skipping", page);
                Ok(Vec::new())
            }
        }
    }
}

impl RecordSource for HttpRecordSource {
    async fn fetch_all(&self) -> Result<Vec<Center>, SourceError> {
        let (status, body) = self.get_json(&self.url).await?;
        let body = body.ok_or_else(|| {
            SourceError::ApiError(format!("Failed to load centers: {}", status))
        })?;

        match body {
            Value::Array(items) => {
                let centers = parse_centers(&items)?;
                tracing::info!("Loaded {} centers", centers.len());
                Ok(centers)
            }
            Value::Object(ref envelope) => {
                let first = match envelope.get("dados") {
                    Some(Value::Array(items)) => parse_centers(items)?,
                    _ => {
                        return Err(SourceError::InvalidResponse(
                            "Expected an array or an object with a dados array".into(),
                        ))
                    }
                };

                tracing::warn!("Data API still serves the legacy paged format");

                let total_pages = match envelope.get("total_paginas").and_then(Value::as_u64) {
                    Some(total) => u32::try_from(total).map_err(|_| {
                        SourceError::InvalidResponse(format!(
                            "total_paginas out of range: {}",
                            total
                        ))
                    })?,
                    None => 1,
                }
                .max(1);

                let mut centers = first;
                if total_pages > 1 {
                    tracing::debug!("Fetching {} pages", total_pages);
                    // buffered keeps page order while bounding in-flight requests
                    let pages: Vec<Vec<Center>> = stream::iter(2..=total_pages)
                        .map(|page| self.fetch_page(page))
                        .buffered(MAX_CONCURRENT_PAGES)
                        .try_collect()
                        .await?;
                    centers.extend(pages.into_iter().flatten());
                }

                tracing::info!("Loaded {} centers from {} pages", centers.len(), total_pages);
                Ok(centers)
            }
            _ => Err(SourceError::InvalidResponse(
                "Expected an array or an object with a dados array".into(),
            )),
        }
    }
}

fn parse_centers(items: &[Value]) -> Result<Vec<Center>, SourceError> {
    items
        .iter()
        .map(|item| {
            serde_json::from_value(item.clone()).map_err(|e| {
                SourceError::InvalidResponse(format!("Failed to parse center: {}", e))
            })
        })
        .collect()
}
