//! HTTP session source for the timetable API.

use async_trait::async_trait;
use kaigi_core::config::ApiConfig;
use kaigi_core::error::{KaigiError, Result};
use kaigi_core::timetable::{SessionSource, Timetable};
use reqwest::Client;
use std::time::Duration;

use crate::dto::parse_timetable;

/// Fetches the timetable document with a single GET request.
///
/// No retries happen here; callers decide whether to refresh again.
#[derive(Debug, Clone)]
pub struct HttpSessionSource {
    client: Client,
    url: String,
}

impl HttpSessionSource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| KaigiError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: config.timetable_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SessionSource for HttpSessionSource {
    async fn fetch_snapshot(&self) -> Result<Timetable> {
        tracing::debug!("[HttpSessionSource] GET {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| KaigiError::network(format!("GET {} failed: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KaigiError::network(format!(
                "GET {} returned {}",
                self.url, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| KaigiError::network(format!("Failed to read response body: {}", e)))?;

        let timetable = parse_timetable(&body)?;
        tracing::info!(
            "[HttpSessionSource] Fetched {} sessions from {}",
            timetable.len(),
            self.url
        );
        Ok(timetable)
    }
}
