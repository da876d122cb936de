use reqwest::Url;

/// True if `url` is an absolute http(s) URL with a host.
pub fn is_valid_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Keep only the valid URLs, preserving order.
pub fn validate_urls<S: AsRef<str>>(urls: &[S]) -> Vec<String> {
    urls.iter()
        .filter_map(|url| {
            let url: &str = url.as_ref();
            is_valid_url(url).then(|| url.to_string())
        })
        .collect()
}

/// Host part of `url`, or an empty string if it does not parse.
pub fn domain(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(str::to_string))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_urls() {
        for url in [
            "https://fooby.ch/de/rezepte/27566/sesam-chicken",
            "https://www.swissmilk.ch/de/rezepte/test",
            "http://example.com/recipe",
            "http://127.0.0.1:8080/recipe",
        ] {
            assert!(is_valid_url(url), "URL should be valid: {url}");
        }
    }

    #[test]
    fn test_invalid_urls() {
        for url in ["not_a_url", "ftp://example.com", "", "https://", "recipe.html"] {
            assert!(!is_valid_url(url), "URL should be invalid: {url}");
        }
    }

    #[test]
    fn test_validate_urls_keeps_order() {
        let urls = ["https://b.ch/1", "kaputt", "https://a.ch/2"];
        assert_eq!(validate_urls(&urls), vec!["https://b.ch/1", "https://a.ch/2"]);
    }

    #[test]
    fn test_domain() {
        assert_eq!(domain("https://fooby.ch/recipe"), "fooby.ch");
        assert_eq!(domain("invalid_url"), "");
    }
}
