use crate::extractors::{Extractor, HtmlExtractor, JsonLdExtractor};
use crate::formatter::MarkdownFormatter;
use crate::model::RecipeData;
use crate::vocabulary::Vocabulary;
use log::debug;
use scraper::Html;

/// Runs the extractors over a page in priority order and renders the result.
///
/// Structured data is read first; the DOM pass only fills what is still
/// missing. Both passes write into the same record, and a populated field is
/// never overwritten.
pub struct RecipeParser {
    extractors: Vec<Box<dyn Extractor>>,
    formatter: MarkdownFormatter,
}

impl Default for RecipeParser {
    fn default() -> Self {
        Self::new(Vocabulary::default(), MarkdownFormatter::default())
    }
}

impl RecipeParser {
    pub fn new(vocabulary: Vocabulary, formatter: MarkdownFormatter) -> Self {
        let extractors: Vec<Box<dyn Extractor>> = vec![
            Box::new(JsonLdExtractor),
            Box::new(HtmlExtractor::new(vocabulary)),
        ];
        Self {
            extractors,
            formatter,
        }
    }

    /// Extract whatever recipe data the markup contains.
    ///
    /// Malformed markup degrades to a partial or empty record.
    pub fn extract(&self, markup: &str) -> RecipeData {
        let document = Html::parse_document(markup);
        let mut recipe = RecipeData::new();

        for extractor in &self.extractors {
            if recipe.is_complete() {
                debug!("RecipeParser: record complete, skipping {}", extractor.name());
                break;
            }
            extractor.extract(&document, &mut recipe);
            debug!(
                "RecipeParser: after {}: title={:?}, {} ingredients, {} instructions",
                extractor.name(),
                recipe.title,
                recipe.ingredients.len(),
                recipe.instructions.len()
            );
        }

        recipe
    }

    /// Render an extracted record as a markdown document.
    pub fn format(&self, recipe: &RecipeData, source: &str) -> String {
        self.formatter.format(recipe, source)
    }

    /// Extract and render in one step.
    pub fn parse(&self, markup: &str, source: &str) -> String {
        self.format(&self.extract(markup), source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_data_takes_priority_over_markup() {
        let html = r#"
        <html>
        <head>
            <script type="application/ld+json">
            {
                "@type": "Recipe",
                "name": "Aus JSON-LD",
                "recipeIngredient": ["100 g Zucker"],
                "prepTime": "PT10M"
            }
            </script>
        </head>
        <body>
            <div class="rezept">
                <h1>Aus HTML</h1>
                <p class="beschreibung">Nur im HTML vorhanden.</p>
                <ul class="zutaten"><li>1 kg Mehl</li></ul>
                <span class="vorbereitungszeit">2 Stunden</span>
                <span class="portionen">6 Portionen</span>
            </div>
        </body>
        </html>
        "#;

        let recipe = RecipeParser::default().extract(html);

        assert_eq!(recipe.title, "Aus JSON-LD");
        assert_eq!(recipe.ingredients, vec!["100 g Zucker"]);
        assert_eq!(recipe.prep_time, "10 Min");
        // gaps are filled from the markup
        assert_eq!(recipe.description, "Nur im HTML vorhanden.");
        assert_eq!(recipe.servings, "6 Portionen");
    }

    #[test]
    fn test_complete_structured_record_skips_markup_pass() {
        let html = r#"
        <script type="application/ld+json">
        {
            "@type": "Recipe",
            "name": "Vollständig",
            "description": "Alles aus den Metadaten",
            "recipeIngredient": ["1 Ei"],
            "recipeInstructions": ["Ei kochen"],
            "prepTime": "PT5M",
            "cookTime": "PT10M",
            "recipeYield": "1"
        }
        </script>
        <div class="rezept"><h1>Anders</h1><ul class="zutaten"><li>2 Eier</li></ul></div>
        "#;

        let recipe = RecipeParser::default().extract(html);

        assert!(recipe.is_complete());
        assert_eq!(recipe.title, "Vollständig");
        assert_eq!(recipe.ingredients, vec!["1 Ei"]);
    }

    #[test]
    fn test_garbage_markup_gives_empty_record() {
        let recipe = RecipeParser::default().extract("<<<not html at all>>>");
        assert!(recipe.is_empty());
    }

    #[test]
    fn test_parse_renders_document() {
        let document = RecipeParser::default().parse(
            "<html><body><h1>Birnbrot</h1></body></html>",
            "https://example.com/birnbrot",
        );
        assert!(document.contains("## Birnbrot"));
        assert!(document.contains("**Ursprung:** https://example.com/birnbrot"));
    }
}
