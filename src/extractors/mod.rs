use crate::model::RecipeData;
use log::debug;
use scraper::{ElementRef, Html, Selector};

mod heuristics;
mod html;
mod json_ld;

pub use html::HtmlExtractor;
pub use json_ld::JsonLdExtractor;

/// One extraction pass over a parsed page.
///
/// Extractors fill whatever they can find into `recipe` and must leave
/// fields populated by an earlier pass untouched. They never fail: anything
/// they cannot interpret is skipped.
pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, document: &Html, recipe: &mut RecipeData);
}

/// Parse a CSS selector, treating an invalid one as matching nothing.
pub(crate) fn parse_selector(selector: &str) -> Option<Selector> {
    match Selector::parse(selector) {
        Ok(selector) => Some(selector),
        Err(e) => {
            debug!("Skipping invalid selector '{}': {:?}", selector, e);
            None
        }
    }
}

/// Visible text of an element with whitespace runs collapsed.
pub(crate) fn element_text(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Element text, falling back to the `content` or `datetime` attribute used
/// by microdata `<meta>` and `<time>` elements.
pub(crate) fn element_value(element: ElementRef) -> String {
    let text = element_text(element);
    if !text.is_empty() {
        return text;
    }
    ["content", "datetime"]
        .iter()
        .find_map(|attr| element.value().attr(attr))
        .map(|value| value.trim().to_string())
        .unwrap_or_default()
}
