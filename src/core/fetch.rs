use reqwest::Client;
use std::time::Duration;

use crate::config::USER_AGENT;
use crate::utils::error::Result;

/// HTTP client that pauses for a fixed interval before every request so
/// consecutive calls stay spaced out. One request is in flight at a
/// time by construction; the pause is a plain scoped wait, not a token
/// bucket.
pub struct FetchClient {
    client: Client,
    delay: Duration,
}

impl FetchClient {
    pub fn new(delay: Duration, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self { client, delay })
    }

    pub async fn get(&self, url: &str) -> Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        tracing::debug!("Fetching page: {}", url);
        let response = self.client.get(url).send().await?;
        tracing::debug!("Response status: {}", response.status());

        let body = response.error_for_status()?.text().await?;
        tracing::debug!("Response length: {} characters", body.len());

        Ok(body)
    }
}
