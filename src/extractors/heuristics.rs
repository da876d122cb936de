use super::{element_text, parse_selector};
use crate::vocabulary::Vocabulary;
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::ElementRef;

static RE_NUMBERED_STEP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\.").unwrap());

type Strategy = fn(&Heuristics, ElementRef) -> Vec<String>;

/// Keyword-based list detection used when no explicit selector matched.
pub(crate) struct Heuristics {
    cooking_keywords: Vec<String>,
    ui_keywords: Vec<String>,
    ingredient_keywords: Vec<String>,
    quantity_pattern: Option<Regex>,
    min_instruction_length: usize,
    min_instruction_items: usize,
    min_ingredient_items: usize,
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

/// Matches a number followed by one of `units`, e.g. "200 g" or "1/2 TL".
fn quantity_pattern(units: &[String]) -> Option<Regex> {
    if units.is_empty() {
        return None;
    }
    let mut units: Vec<String> = units.iter().map(|u| regex::escape(u)).collect();
    units.sort_by_key(|u| std::cmp::Reverse(u.len()));
    let pattern = format!(r"(?i)\d+(?:[.,/]\d+)?\s*(?:{})\b", units.join("|"));
    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!("Unit tokens produce an invalid pattern, quantities ignored: {}", e);
            None
        }
    }
}

/// Texts of the `li` elements directly below a list.
fn list_items(list: ElementRef) -> Vec<String> {
    list.children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "li")
        .map(element_text)
        .collect()
}

impl Heuristics {
    pub(crate) fn new(vocabulary: &Vocabulary) -> Self {
        Self {
            cooking_keywords: lowercase_all(&vocabulary.cooking_keywords),
            ui_keywords: lowercase_all(&vocabulary.ui_keywords),
            ingredient_keywords: lowercase_all(&vocabulary.ingredient_keywords),
            quantity_pattern: quantity_pattern(&vocabulary.unit_tokens),
            min_instruction_length: vocabulary.min_instruction_length,
            min_instruction_items: vocabulary.min_instruction_items,
            min_ingredient_items: vocabulary.min_ingredient_items,
        }
    }

    fn is_long_enough(&self, text: &str) -> bool {
        text.chars().count() > self.min_instruction_length
    }

    fn mentions_cooking(&self, text: &str) -> bool {
        contains_any(&text.to_lowercase(), &self.cooking_keywords)
    }

    /// Long text describing a cooking action that is not page chrome.
    pub(crate) fn is_instruction(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.is_long_enough(text)
            && contains_any(&lower, &self.cooking_keywords)
            && !contains_any(&lower, &self.ui_keywords)
    }

    /// Text with a quantity and unit, or naming a staple ingredient.
    pub(crate) fn is_ingredient(&self, text: &str) -> bool {
        let has_quantity = self
            .quantity_pattern
            .as_ref()
            .is_some_and(|pattern| pattern.is_match(text));
        has_quantity || contains_any(&text.to_lowercase(), &self.ingredient_keywords)
    }

    fn lists<'a>(&self, container: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        match parse_selector("ul, ol") {
            Some(selector) => container.select(&selector).collect(),
            None => Vec::new(),
        }
    }

    fn paragraphs(&self, container: ElementRef) -> Vec<String> {
        match parse_selector("p") {
            Some(selector) => container.select(&selector).map(element_text).collect(),
            None => Vec::new(),
        }
    }

    /// Instruction candidates, trying list items, then numbered paragraphs,
    /// then any paragraph describing a cooking step.
    pub(crate) fn instructions(&self, container: ElementRef) -> Vec<String> {
        let strategies: [Strategy; 3] = [
            Self::instruction_list,
            Self::numbered_paragraphs,
            Self::cooking_paragraphs,
        ];
        strategies
            .iter()
            .map(|strategy| strategy(self, container))
            .find(|items| !items.is_empty())
            .unwrap_or_default()
    }

    fn instruction_list(&self, container: ElementRef) -> Vec<String> {
        for (index, list) in self.lists(container).into_iter().enumerate() {
            let items = list_items(list);
            if items.len() < 2 {
                continue;
            }
            let steps: Vec<String> = items
                .into_iter()
                .filter(|item| self.is_instruction(item))
                .collect();
            if steps.len() >= self.min_instruction_items {
                debug!("Heuristics: list {} holds {} instruction steps", index, steps.len());
                return steps;
            }
        }
        Vec::new()
    }

    fn numbered_paragraphs(&self, container: ElementRef) -> Vec<String> {
        self.paragraphs(container)
            .into_iter()
            .filter(|text| RE_NUMBERED_STEP.is_match(text))
            .collect()
    }

    fn cooking_paragraphs(&self, container: ElementRef) -> Vec<String> {
        self.paragraphs(container)
            .into_iter()
            .filter(|text| self.is_long_enough(text) && self.mentions_cooking(text))
            .collect()
    }

    /// Items of the first list with enough ingredient-like entries.
    pub(crate) fn ingredients(&self, container: ElementRef) -> Vec<String> {
        for (index, list) in self.lists(container).into_iter().enumerate() {
            let ingredients: Vec<String> = list_items(list)
                .into_iter()
                .filter(|item| self.is_ingredient(item))
                .collect();
            if ingredients.len() >= self.min_ingredient_items {
                debug!("Heuristics: list {} holds {} ingredients", index, ingredients.len());
                return ingredients;
            }
        }
        Vec::new()
    }
}
