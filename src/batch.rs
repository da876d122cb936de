use crate::config::ScraperConfig;
use crate::error::ScraperError;
use crate::fetchers::{Fetcher, RequestFetcher};
use crate::formatter::MarkdownFormatter;
use crate::parser::RecipeParser;
use crate::validate::is_valid_url;
use futures::future::join_all;
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of scraping one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeResult {
    pub url: String,
    pub success: bool,
    pub content: Option<String>,
    pub error: Option<String>,
}

impl RecipeResult {
    pub fn success(url: impl Into<String>, content: String) -> Self {
        Self {
            url: url.into(),
            success: true,
            content: Some(content),
            error: None,
        }
    }

    pub fn failure(url: impl Into<String>, error: impl ToString) -> Self {
        Self {
            url: url.into(),
            success: false,
            content: None,
            error: Some(error.to_string()),
        }
    }
}

/// Fetches pages and turns them into recipe documents.
///
/// Cloning is cheap; clones share the fetcher and parser.
#[derive(Clone)]
pub struct RecipeScraper {
    fetcher: Arc<dyn Fetcher>,
    parser: Arc<RecipeParser>,
}

impl RecipeScraper {
    pub fn new(fetcher: Arc<dyn Fetcher>, parser: RecipeParser) -> Self {
        Self {
            fetcher,
            parser: Arc::new(parser),
        }
    }

    /// Build a scraper with an HTTP fetcher and the configured vocabularies.
    pub fn from_config(config: &ScraperConfig) -> Result<Self, ScraperError> {
        let fetcher = RequestFetcher::new(Some(config.timeout()), Some(&config.user_agent))?;
        let parser = RecipeParser::new(
            config.vocabulary.clone(),
            MarkdownFormatter::new(config.tags.clone()),
        );
        Ok(Self::new(Arc::new(fetcher), parser))
    }

    /// Fetch `url` and render the recipe it contains.
    ///
    /// A page without recipe data still yields a (minimal) document; only an
    /// invalid URL or an unfetchable page is an error.
    pub async fn parse_recipe_from_url(&self, url: &str) -> Result<String, ScraperError> {
        if !is_valid_url(url) {
            return Err(ScraperError::InvalidUrl(url.to_string()));
        }

        let html = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|e| e.for_url(url))?;

        Ok(self.parser.parse(&html, url))
    }

    /// Like [`parse_recipe_from_url`](Self::parse_recipe_from_url), with the
    /// error captured in the result.
    pub async fn parse_recipe(&self, url: &str) -> RecipeResult {
        match self.parse_recipe_from_url(url).await {
            Ok(content) => {
                info!("Parsed recipe from {}", url);
                RecipeResult::success(url, content)
            }
            Err(e) => {
                warn!("Failed to parse {}: {}", url, e);
                RecipeResult::failure(url, e)
            }
        }
    }

    /// Scrape all `urls` concurrently, one task per URL.
    ///
    /// Results are in input order. A failing or panicking task only marks
    /// its own entry as failed.
    pub async fn parse_recipes<S: AsRef<str>>(&self, urls: &[S]) -> Vec<RecipeResult> {
        let handles: Vec<_> = urls
            .iter()
            .map(|url| {
                let scraper = self.clone();
                let url = url.as_ref().to_string();
                tokio::spawn(async move { scraper.parse_recipe(&url).await })
            })
            .collect();

        join_all(handles)
            .await
            .into_iter()
            .zip(urls)
            .map(|(joined, url)| {
                let url: &str = url.as_ref();
                match joined {
                    Ok(result) => result,
                    Err(e) => {
                        let error = ScraperError::TaskFailed(e.to_string());
                        warn!("Task for {} did not complete: {}", url, error);
                        RecipeResult::failure(url, error)
                    }
                }
            })
            .collect()
    }

    /// The rendered document, or `None` if scraping failed.
    pub async fn parse_recipe_simple(&self, url: &str) -> Option<String> {
        let result = self.parse_recipe(url).await;
        if result.success {
            result.content
        } else {
            None
        }
    }
}
