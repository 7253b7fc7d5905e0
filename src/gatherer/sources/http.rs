//! HTTP release listing source

use std::time::Duration;

use tracing::{debug, warn};

use crate::config::HttpConfig;
use crate::gatherer::error::GathererError;
use crate::gatherer::source::{Listing, TagSource};

/// Fetches release listings over HTTP(S)
pub struct HttpTagSource {
    client: reqwest::Client,
}

impl HttpTagSource {
    pub fn new(config: &HttpConfig) -> Result<Self, GathererError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl TagSource for HttpTagSource {
    async fn fetch(&self, location: &str) -> Result<Listing, GathererError> {
        debug!("Fetching release listing: {}", location);

        let response = self
            .client
            .get(location)
            .header("Accept", "application/json, text/plain;q=0.9")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GathererError::NotFound(location.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(GathererError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("Release listing returned status {}: {}", status, location);
            return Err(GathererError::UnexpectedStatus {
                status,
                location: location.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.text().await.inspect_err(|e| {
            warn!("Failed to read release listing response: {}", e);
        })?;

        Ok(Listing { content_type, body })
    }
}
