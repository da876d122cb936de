use crate::model::RecipeData;
use crate::normalize::{clean_inline_markup, space_measurements};
use serde::Deserialize;

const LOCALE_TAG: &str = "deutsch";
const DOCUMENT_TYPE_TAG: &str = "rezept";

/// Where a tag rule looks for its keywords
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagScope {
    #[default]
    Ingredients,
    Title,
    Both,
}

/// A tag added when any of its keywords occurs in the scoped text
#[derive(Debug, Clone, Deserialize)]
pub struct KeywordTag {
    pub tag: String,
    pub keywords: Vec<String>,
    #[serde(default)]
    pub scope: TagScope,
}

impl KeywordTag {
    fn new(tag: &str, keywords: &[&str], scope: TagScope) -> Self {
        Self {
            tag: tag.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            scope,
        }
    }

    fn matches(&self, ingredients: &str, title: &str) -> bool {
        let hit = |text: &str| {
            self.keywords
                .iter()
                .any(|keyword| text.contains(keyword.to_lowercase().as_str()))
        };
        match self.scope {
            TagScope::Ingredients => hit(ingredients),
            TagScope::Title => hit(title),
            TagScope::Both => hit(ingredients) || hit(title),
        }
    }
}

/// Rules for the semantic tags appended to every document.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TagRules {
    /// Always present
    pub baseline: Vec<String>,
    pub quick_tag: String,
    /// Looked up in the preparation time
    pub quick_keywords: Vec<String>,
    /// Meat and fish families; any match suppresses the vegetarian tag
    pub protein: Vec<KeywordTag>,
    /// Further meat words that suppress the vegetarian tag without a tag of their own
    pub meat_keywords: Vec<String>,
    pub vegetarian_tag: String,
    /// Cuisine and dish-type rules
    pub dishes: Vec<KeywordTag>,
}

impl Default for TagRules {
    fn default() -> Self {
        Self {
            baseline: vec![LOCALE_TAG.to_string(), DOCUMENT_TYPE_TAG.to_string()],
            quick_tag: "schnell".to_string(),
            quick_keywords: ["schnell", "minuten", "15", "10"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            protein: vec![
                KeywordTag::new("hähnchen", &["hähnchen", "huhn", "poulet"], TagScope::Ingredients),
                KeywordTag::new("schweinefleisch", &["schwein", "speck"], TagScope::Ingredients),
                KeywordTag::new("rindfleisch", &["rind", "beef"], TagScope::Ingredients),
                KeywordTag::new("fisch", &["fisch", "lachs", "crevetten"], TagScope::Ingredients),
            ],
            meat_keywords: vec!["fleisch".to_string()],
            vegetarian_tag: "vegetarisch".to_string(),
            dishes: vec![
                KeywordTag::new(
                    "italienisch",
                    &["pasta", "spaghetti", "parmesan"],
                    TagScope::Ingredients,
                ),
                KeywordTag::new("griechisch", &["feta", "oliven"], TagScope::Ingredients),
                KeywordTag::new("salat", &["salat"], TagScope::Both),
                KeywordTag::new("suppe", &["suppe", "eintopf"], TagScope::Ingredients),
                KeywordTag::new("dessert", &["kuchen", "tarte"], TagScope::Title),
            ],
        }
    }
}

/// Renders a recipe as German markdown with a metadata header, tuned for
/// retrieval by an LLM.
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormatter {
    tags: TagRules,
}

fn quote(value: &str) -> String {
    let value = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", value.replace(['\n', '\r'], " "))
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl MarkdownFormatter {
    pub fn new(tags: TagRules) -> Self {
        Self { tags }
    }

    /// Render `recipe`; sections without data are left out.
    pub fn format(&self, recipe: &RecipeData, source: &str) -> String {
        let mut parts: Vec<String> = Vec::new();

        parts.push("---".to_string());
        parts.push(format!("title: {}", quote(&recipe.title)));
        parts.push(format!("source: {}", quote(source)));
        parts.push(format!("prep_time: {}", quote(&recipe.prep_time)));
        parts.push(format!("cook_time: {}", quote(&recipe.cook_time)));
        parts.push(format!("servings: {}", quote(&recipe.servings)));
        parts.push(format!("cuisine: {}", quote(LOCALE_TAG)));
        parts.push(format!("type: {}", quote(DOCUMENT_TYPE_TAG)));
        parts.push("---".to_string());
        parts.push(String::new());

        parts.push("# Rezept".to_string());
        parts.push(String::new());

        if !recipe.title.is_empty() {
            parts.push(format!("## {}", recipe.title));
            parts.push(String::new());
        }

        parts.push("### 📋 Quellinformation".to_string());
        parts.push(format!("**Ursprung:** {source}"));
        parts.push(String::new());

        if !recipe.description.is_empty() {
            parts.push("### 📝 Beschreibung".to_string());
            parts.push(recipe.description.clone());
            parts.push(String::new());
        }

        let details = self.details(recipe);
        if !details.is_empty() {
            parts.push("### ⏱️ Rezept-Details".to_string());
            parts.extend(details);
            parts.push(String::new());
        }

        let ingredients: Vec<String> = recipe
            .ingredients
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty())
            .map(|i| format!("- {}", space_measurements(i)))
            .collect();
        if !ingredients.is_empty() {
            parts.push("### 🥘 Zutaten".to_string());
            parts.push(String::new());
            parts.extend(ingredients);
            parts.push(String::new());
        }

        let instructions: Vec<String> = recipe
            .instructions
            .iter()
            .map(|i| clean_inline_markup(i))
            .filter(|i| !i.is_empty())
            .collect();
        if !instructions.is_empty() {
            parts.push("### 👨‍🍳 Zubereitung".to_string());
            parts.push(String::new());
            for (i, instruction) in instructions.iter().enumerate() {
                parts.push(format!("**Schritt {}:** {}", i + 1, instruction));
                parts.push(String::new());
            }
        }

        let tags = self.tags(recipe);
        if !tags.is_empty() {
            parts.push("### 🏷️ Tags".to_string());
            parts.push(
                tags.iter()
                    .map(|tag| format!("`{tag}`"))
                    .collect::<Vec<_>>()
                    .join(" "),
            );
            parts.push(String::new());
        }

        if !recipe.nutrition.is_empty() {
            parts.push("### 🔢 Nährwerte".to_string());
            for (key, value) in &recipe.nutrition {
                parts.push(format!("- **{}:** {}", capitalize(key), value));
            }
            parts.push(String::new());
        }

        parts.join("\n")
    }

    fn details(&self, recipe: &RecipeData) -> Vec<String> {
        let mut details = Vec::new();
        if !recipe.prep_time.is_empty() {
            details.push(format!("⏰ **Vorbereitungszeit:** {}", recipe.prep_time));
        }
        if !recipe.cook_time.is_empty() {
            details.push(format!("🔥 **Kochzeit:** {}", recipe.cook_time));
        }
        if !recipe.servings.is_empty() {
            details.push(format!("👥 **Portionen:** {}", recipe.servings));
        }
        details
    }

    /// Semantic tags for `recipe`, de-duplicated in derivation order.
    ///
    /// A record with no data at all gets no tags.
    pub fn tags(&self, recipe: &RecipeData) -> Vec<String> {
        if recipe.is_empty() {
            return Vec::new();
        }

        let rules = &self.tags;
        let ingredients = recipe.ingredients.join(" ").to_lowercase();
        let title = recipe.title.to_lowercase();
        let mut tags: Vec<String> = rules.baseline.clone();

        let prep_time = recipe.prep_time.to_lowercase();
        if !prep_time.is_empty()
            && rules
                .quick_keywords
                .iter()
                .any(|k| prep_time.contains(k.to_lowercase().as_str()))
        {
            tags.push(rules.quick_tag.clone());
        }

        let mut has_meat = rules
            .meat_keywords
            .iter()
            .any(|k| ingredients.contains(k.to_lowercase().as_str()));
        for rule in &rules.protein {
            if rule.matches(&ingredients, &title) {
                tags.push(rule.tag.clone());
                has_meat = true;
            }
        }
        if !has_meat {
            tags.push(rules.vegetarian_tag.clone());
        }

        for rule in &rules.dishes {
            if rule.matches(&ingredients, &title) {
                tags.push(rule.tag.clone());
            }
        }

        let mut unique: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            if !tag.is_empty() && !unique.contains(&tag) {
                unique.push(tag);
            }
        }
        unique
    }
}
