use super::Fetcher;
use crate::error::ScraperError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Plain HTTP fetcher backed by reqwest.
pub struct RequestFetcher {
    client: Client,
}

impl RequestFetcher {
    pub fn new(timeout: Option<Duration>, user_agent: Option<&str>) -> Result<Self, ScraperError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for RequestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        debug!("RequestFetcher: GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let html = response.text().await?;
        if html.trim().is_empty() {
            return Err(ScraperError::ContentUnavailable(url.to_string()));
        }
        Ok(html)
    }
}
