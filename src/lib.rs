//! Extract recipes from German-language recipe pages and render them as
//! markdown documents for retrieval by an LLM.
//!
//! Structured data (JSON-LD) is read first and the DOM is searched for
//! whatever is still missing. Pages are fetched concurrently, each URL
//! failing on its own.

pub mod batch;
pub mod config;
pub mod document;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod formatter;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod validate;
pub mod vocabulary;

pub use batch::{RecipeResult, RecipeScraper};
pub use crate::config::ScraperConfig;
pub use document::RecipeDocument;
pub use error::ScraperError;
pub use formatter::{MarkdownFormatter, TagRules};
pub use model::RecipeData;
pub use parser::RecipeParser;
pub use validate::is_valid_url;
pub use vocabulary::Vocabulary;

use log::warn;

/// Extract recipe data from page markup with the default German vocabulary.
pub fn extract(markup: &str) -> RecipeData {
    RecipeParser::default().extract(markup)
}

/// Render a recipe as a markdown document.
pub fn format(recipe: &RecipeData, source: &str) -> String {
    MarkdownFormatter::default().format(recipe, source)
}

fn default_scraper() -> Result<RecipeScraper, ScraperError> {
    let config = ScraperConfig::load().unwrap_or_else(|e| {
        warn!("Falling back to default configuration: {}", e);
        ScraperConfig::default()
    });
    RecipeScraper::from_config(&config)
}

/// Fetch one page and render its recipe.
pub async fn parse_recipe(url: &str) -> RecipeResult {
    match default_scraper() {
        Ok(scraper) => scraper.parse_recipe(url).await,
        Err(e) => RecipeResult::failure(url, e),
    }
}

/// Fetch several pages concurrently. Results keep the input order.
pub async fn parse_recipes<S: AsRef<str>>(urls: &[S]) -> Vec<RecipeResult> {
    match default_scraper() {
        Ok(scraper) => scraper.parse_recipes(urls).await,
        Err(e) => {
            let message = e.to_string();
            urls.iter()
                .map(|url| {
                    let url: &str = url.as_ref();
                    RecipeResult::failure(url, &message)
                })
                .collect()
        }
    }
}

/// The rendered document for `url`, or `None` on any failure.
pub async fn parse_recipe_simple(url: &str) -> Option<String> {
    let result = parse_recipe(url).await;
    if result.success {
        result.content
    } else {
        None
    }
}
