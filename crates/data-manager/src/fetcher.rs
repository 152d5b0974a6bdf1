//! HTTP series fetcher

use async_trait::async_trait;
use pollchart_shared::{ChartError, ChartResult, Series};
use std::time::Duration;

use crate::parser::parse_series;

/// Anything that can produce a series for a URL
#[async_trait]
pub trait SeriesSource: Send + Sync {
    async fn fetch(&self, url: &str) -> ChartResult<Series>;
}

/// Fetches series with a plain GET request
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(timeout: Option<Duration>) -> ChartResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| ChartError::InvalidConfig {
            message: format!("Failed to build HTTP client: {e}"),
            field: None,
        })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SeriesSource for HttpSource {
    async fn fetch(&self, url: &str) -> ChartResult<Series> {
        let parsed = url::Url::parse(url)
            .map_err(|e| ChartError::network(url, format!("invalid URL: {e}")))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| ChartError::network(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChartError::network(url, format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ChartError::network(url, format!("failed to read body: {e}")))?;

        parse_series(&body)
    }
}
