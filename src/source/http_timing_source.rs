use super::timing_source::{SourceStats, StatsCounter, TimingSource};
use crate::errors::{SourceError, TimingResult};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

/// Timing files served over HTTP under a common base URL
pub struct HttpTimingSource {
    base_url: String,
    client: Client,
    stats: StatsCounter,
}

impl HttpTimingSource {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: impl Into<String>) -> TimingResult<Self> {
        Self::with_timeout(base_url, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> TimingResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::new(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
            stats: StatsCounter::default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full URL of a timing document
    pub fn url_for(&self, location: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            location.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl TimingSource for HttpTimingSource {
    async fn fetch(&self, location: &str) -> TimingResult<Vec<u8>> {
        let url = self.url_for(location);
        debug!("GET {}", url);

        self.stats.record_request();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SourceError::new(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::new(format!(
                "Failed to fetch timing data: {}",
                response.status()
            ))
            .into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SourceError::new(e.to_string()))?;
        self.stats.record_bytes(body.len());

        Ok(body.to_vec())
    }

    fn stats(&self) -> SourceStats {
        self.stats.snapshot()
    }
}
