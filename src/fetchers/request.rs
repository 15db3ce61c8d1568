use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::config::DEFAULT_USER_AGENT;
use crate::error::FetchError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Retrieves page markup with a browser identity. No retries.
#[derive(Debug, Clone)]
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        Self::with_user_agent(timeout, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(
        timeout: Option<Duration>,
        user_agent: &str,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client })
    }

    /// The underlying client, shared with image downloads
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        debug!("RequestFetcher: GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            debug!("RequestFetcher: {} answered {}", url, status);
            return Err(FetchError::Status(status));
        }

        Ok(response.text().await?)
    }
}
