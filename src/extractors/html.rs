use super::heuristics::Heuristics;
use super::{element_text, element_value, parse_selector, Extractor};
use crate::model::{ListField, RecipeData, TextField};
use crate::normalize::{normalize_duration, normalize_servings};
use crate::vocabulary::Vocabulary;
use log::debug;
use scraper::{ElementRef, Html};

type ListStrategy = fn(&HtmlExtractor, ElementRef, ListField) -> Vec<String>;

/// Fills the fields structured data left empty by scanning the page markup.
///
/// Explicit selectors from the vocabulary are tried in order against the
/// recipe container; list fields fall back to keyword heuristics when no
/// selector matches.
pub struct HtmlExtractor {
    vocabulary: Vocabulary,
    heuristics: Heuristics,
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new(Vocabulary::default())
    }
}

impl HtmlExtractor {
    pub fn new(vocabulary: Vocabulary) -> Self {
        let heuristics = Heuristics::new(&vocabulary);
        Self {
            vocabulary,
            heuristics,
        }
    }

    /// First element matched by a container selector, or the whole document.
    fn find_container<'a>(&self, document: &'a Html) -> ElementRef<'a> {
        for selector_str in &self.vocabulary.container_selectors {
            let Some(selector) = parse_selector(selector_str) else {
                continue;
            };
            if let Some(container) = document.select(&selector).next() {
                debug!("HtmlExtractor: Using container '{}'", selector_str);
                return container;
            }
        }
        debug!("HtmlExtractor: No recipe container, scanning whole document");
        document.root_element()
    }

    fn select_text(&self, container: ElementRef, field: TextField) -> Option<String> {
        for selector_str in self.vocabulary.fields.text(field) {
            let Some(selector) = parse_selector(selector_str) else {
                continue;
            };
            if let Some(text) = container
                .select(&selector)
                .map(element_value)
                .find(|text| !text.is_empty())
            {
                debug!("HtmlExtractor: Found {} using '{}'", field.name(), selector_str);
                return Some(text);
            }
        }
        None
    }

    fn select_list(&self, container: ElementRef, field: ListField) -> Vec<String> {
        for selector_str in self.vocabulary.fields.list(field) {
            let Some(selector) = parse_selector(selector_str) else {
                continue;
            };
            let items: Vec<String> = container
                .select(&selector)
                .map(element_value)
                .filter(|text| !text.is_empty())
                .collect();
            if !items.is_empty() {
                debug!(
                    "HtmlExtractor: Found {} {} using '{}'",
                    items.len(),
                    field.name(),
                    selector_str
                );
                return items;
            }
        }
        Vec::new()
    }

    fn heuristic_list(&self, container: ElementRef, field: ListField) -> Vec<String> {
        let items = match field {
            ListField::Ingredients => self.heuristics.ingredients(container),
            ListField::Instructions => self.heuristics.instructions(container),
        };
        if !items.is_empty() {
            debug!("HtmlExtractor: Heuristics found {} {}", items.len(), field.name());
        }
        items
    }
}

impl Extractor for HtmlExtractor {
    fn name(&self) -> &'static str {
        "html"
    }

    fn extract(&self, document: &Html, recipe: &mut RecipeData) {
        let container = self.find_container(document);

        for field in TextField::ALL {
            if recipe.has_text(field) {
                continue;
            }
            if let Some(text) = self.select_text(container, field) {
                let value = match field {
                    TextField::PrepTime | TextField::CookTime => normalize_duration(&text),
                    TextField::Servings => normalize_servings(&text),
                    TextField::Title | TextField::Description => text,
                };
                recipe.set_text(field, value);
            }
        }

        let strategies: [ListStrategy; 2] = [Self::select_list, Self::heuristic_list];
        for field in ListField::ALL {
            if recipe.has_list(field) {
                continue;
            }
            if let Some(items) = strategies
                .iter()
                .map(|strategy| strategy(self, container, field))
                .find(|items| !items.is_empty())
            {
                recipe.commit_list(field, items);
            }
        }

        // Fall back to the page heading for the title
        if !recipe.has_text(TextField::Title) {
            if let Some(heading) = parse_selector("h1")
                .and_then(|selector| document.select(&selector).next().map(element_text))
            {
                recipe.set_text(TextField::Title, heading);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(html: &str) -> RecipeData {
        let document = Html::parse_document(html);
        let mut recipe = RecipeData::new();
        HtmlExtractor::default().extract(&document, &mut recipe);
        recipe
    }

    #[test]
    fn test_german_class_names() {
        let recipe = extract(
            r#"
            <html><body>
            <div class="rezept">
                <h1 class="rezept-titel">Kartoffelgratin</h1>
                <p class="beschreibung">Cremig und goldbraun.</p>
                <span class="vorbereitungszeit">20 Minuten</span>
                <span class="backzeit">1 Stunde</span>
                <span class="portionen">für 4 Personen</span>
                <ul class="zutaten">
                    <li>1 kg Kartoffeln</li>
                    <li>2 dl Rahm</li>
                </ul>
                <ol class="anleitung">
                    <li>Kartoffeln in Scheiben schneiden.</li>
                    <li>Im Ofen backen.</li>
                </ol>
            </div>
            </body></html>
            "#,
        );

        assert_eq!(recipe.title, "Kartoffelgratin");
        assert_eq!(recipe.description, "Cremig und goldbraun.");
        assert_eq!(recipe.prep_time, "20 Min");
        assert_eq!(recipe.cook_time, "1 Std");
        assert_eq!(recipe.servings, "4 Personen");
        assert_eq!(recipe.ingredients, vec!["1 kg Kartoffeln", "2 dl Rahm"]);
        assert_eq!(
            recipe.instructions,
            vec!["Kartoffeln in Scheiben schneiden.", "Im Ofen backen."]
        );
    }

    #[test]
    fn test_microdata_meta_values() {
        let recipe = extract(
            r#"
            <html><body>
            <div itemscope itemtype="https://schema.org/Recipe">
                <h2 itemprop="name">Zürcher Geschnetzeltes</h2>
                <meta itemprop="prepTime" content="PT25M">
                <meta itemprop="cookTime" content="PT1H10M">
                <span itemprop="recipeYield">4 Portionen</span>
                <span itemprop="recipeIngredient">600 g Kalbfleisch</span>
                <span itemprop="recipeIngredient">250 g Champignons</span>
            </div>
            </body></html>
            "#,
        );

        assert_eq!(recipe.title, "Zürcher Geschnetzeltes");
        assert_eq!(recipe.prep_time, "25 Min");
        assert_eq!(recipe.cook_time, "1 Std 10 Min");
        assert_eq!(recipe.servings, "4 Portionen");
        assert_eq!(recipe.ingredients, vec!["600 g Kalbfleisch", "250 g Champignons"]);
    }

    #[test]
    fn test_existing_fields_are_not_overwritten() {
        let document = Html::parse_document(
            r#"<html><body><div class="recipe">
                <h1>Seitentitel</h1>
                <ul class="ingredients"><li>1 Ei</li></ul>
                <span class="servings">8 Stück</span>
            </div></body></html>"#,
        );
        let mut recipe = RecipeData::new();
        recipe.set_text(TextField::Title, "Aus JSON-LD");
        recipe.commit_list(ListField::Ingredients, vec!["200 g Mehl"]);

        HtmlExtractor::default().extract(&document, &mut recipe);

        assert_eq!(recipe.title, "Aus JSON-LD");
        assert_eq!(recipe.ingredients, vec!["200 g Mehl"]);
        assert_eq!(recipe.servings, "8 Stück");
    }

    #[test]
    fn test_title_falls_back_to_page_heading() {
        let recipe = extract(
            r#"<html><body>
                <h1>Omas Apfelkuchen</h1>
                <div class="recipe-ingredients"><ul><li>3 Äpfel</li></ul></div>
            </body></html>"#,
        );
        // The container is the ingredient block, so the heading is found
        // only by the page-level fallback.
        assert_eq!(recipe.title, "Omas Apfelkuchen");
    }

    #[test]
    fn test_invalid_selector_does_not_stop_the_list() {
        let mut vocabulary = Vocabulary::default();
        vocabulary.fields.ingredients = vec!["[[invalid".to_string(), ".zutat".to_string()];
        let document = Html::parse_document(
            r#"<html><body><span class="zutat">1 Prise Salz</span></body></html>"#,
        );
        let mut recipe = RecipeData::new();
        HtmlExtractor::new(vocabulary).extract(&document, &mut recipe);
        assert_eq!(recipe.ingredients, vec!["1 Prise Salz"]);
    }

    #[test]
    fn test_explicit_selector_beats_heuristics() {
        let recipe = extract(
            r#"<html><body>
                <ul>
                    <li>500 g Hackfleisch</li>
                    <li>1 Zwiebel</li>
                    <li>2 EL Öl</li>
                </ul>
                <ul class="zutaten">
                    <li>200 g Spaghetti</li>
                    <li>1 Dose Tomaten</li>
                </ul>
            </body></html>"#,
        );
        assert_eq!(recipe.ingredients, vec!["200 g Spaghetti", "1 Dose Tomaten"]);
    }

    #[test]
    fn test_empty_document() {
        let recipe = extract("");
        assert!(recipe.is_empty());
    }
}
