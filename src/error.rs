use thiserror::Error;

/// Errors that can occur while scraping a recipe page
///
/// Extraction and formatting never fail; these only come from the
/// boundaries around them (URL validation, fetching, configuration).
#[derive(Error, Debug)]
pub enum ScraperError {
    /// URL is malformed or not http(s)
    #[error("Invalid URL provided: {0}")]
    InvalidUrl(String),

    /// Failed to fetch recipe from URL
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    /// The fetch succeeded but returned no markup
    #[error("No content could be loaded from {0}")]
    ContentUnavailable(String),

    /// Any fetch-side failure, labelled with the URL it belongs to
    #[error("Failed to parse recipe from {url}: {message}")]
    ParseFailed { url: String, message: String },

    /// A per-URL task panicked or was cancelled
    #[error("Unexpected error: {0}")]
    TaskFailed(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ScraperError {
    /// Wrap this error with the URL it occurred for.
    ///
    /// Already-labelled errors and invalid URLs are returned unchanged.
    pub fn for_url(self, url: &str) -> Self {
        match self {
            ScraperError::InvalidUrl(_) | ScraperError::ParseFailed { .. } => self,
            other => ScraperError::ParseFailed {
                url: url.to_string(),
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_url_wraps_boundary_errors() {
        let err = ScraperError::ContentUnavailable("https://example.com/a".to_string())
            .for_url("https://example.com/a");
        assert_eq!(
            err.to_string(),
            "Failed to parse recipe from https://example.com/a: No content could be loaded from https://example.com/a"
        );
    }

    #[test]
    fn test_for_url_keeps_invalid_url() {
        let err = ScraperError::InvalidUrl("not_a_url".to_string()).for_url("not_a_url");
        assert!(matches!(err, ScraperError::InvalidUrl(_)));
        assert_eq!(err.to_string(), "Invalid URL provided: not_a_url");
    }
}
