mod request;

pub use request::{RequestFetcher, DEFAULT_USER_AGENT};

use crate::error::ScraperError;
use async_trait::async_trait;

/// Supplies the raw markup of a page.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch `url`, failing if the page cannot be loaded or is empty.
    async fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}
