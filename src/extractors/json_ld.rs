use super::{parse_selector, Extractor};
use crate::model::{ListField, RecipeData, TextField};
use crate::normalize::normalize_duration;
use html_escape::decode_html_entities;
use log::debug;
use scraper::Html;
use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::{Number, Value};
use std::collections::BTreeMap;

/// Reads schema.org `Recipe` objects from `application/ld+json` blocks.
pub struct JsonLdExtractor;

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: Option<TextValue>,
    description: Option<TextValue>,
    #[serde(rename = "recipeIngredient")]
    recipe_ingredient: Option<RecipeIngredients>,
    #[serde(rename = "recipeInstructions")]
    recipe_instructions: Option<RecipeInstructions>,
    #[serde(rename = "prepTime")]
    prep_time: Option<TextValue>,
    #[serde(rename = "cookTime")]
    cook_time: Option<TextValue>,
    #[serde(rename = "recipeYield")]
    recipe_yield: Option<RecipeYield>,
    nutrition: Option<NutritionInformation>,
}

#[derive(Debug, Deserialize)]
struct TextObject {
    text: String,
}

// Every shape enum ends in an `Other` catch-all so one odd field never
// discards the rest of the object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextValue {
    String(String),
    Number(Number),
    Object(TextObject),
    Other(IgnoredAny),
}

impl TextValue {
    fn into_text(self) -> Option<String> {
        match self {
            TextValue::String(s) => Some(s),
            TextValue::Number(n) => Some(n.to_string()),
            TextValue::Object(o) => Some(o.text),
            TextValue::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeIngredients {
    Text(String),
    Multiple(Vec<IngredientEntry>),
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
struct IngredientObject {
    name: String,
    amount: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum IngredientEntry {
    String(String),
    Number(Number),
    Object(IngredientObject),
    Other(IgnoredAny),
}

impl IngredientEntry {
    fn into_text(self) -> Option<String> {
        match self {
            IngredientEntry::String(s) => Some(s),
            IngredientEntry::Number(n) => Some(n.to_string()),
            IngredientEntry::Object(IngredientObject { name, amount }) => {
                match amount.as_deref().map(str::trim) {
                    Some(amount) if !amount.is_empty() => Some(format!("{amount} {name}")),
                    _ => Some(name),
                }
            }
            IngredientEntry::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeInstructions {
    Text(String),
    Steps(Vec<InstructionStep>),
    Other(IgnoredAny),
}

/// One entry of `recipeInstructions`: a plain string, a `HowToStep`, or a
/// `HowToSection` grouping further steps.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionStep {
    Text(String),
    Number(Number),
    Section(HowToSection),
    Step(HowToStep),
    Nested(Vec<InstructionStep>),
    Other(IgnoredAny),
}

#[derive(Debug, Deserialize)]
struct HowToSection {
    #[serde(rename = "itemListElement")]
    item_list_element: Vec<InstructionStep>,
}

#[derive(Debug, Deserialize)]
struct HowToStep {
    text: Option<String>,
    name: Option<String>,
}

impl InstructionStep {
    /// Flatten this entry into the step texts it contains, in order.
    fn collect_texts(self, out: &mut Vec<String>) {
        match self {
            InstructionStep::Text(text) => out.push(text),
            InstructionStep::Number(n) => out.push(n.to_string()),
            InstructionStep::Step(HowToStep { text, name }) => {
                // Prefer text over name
                if let Some(text) = text.filter(|t| !t.trim().is_empty()).or(name) {
                    out.push(text);
                }
            }
            InstructionStep::Section(section) => {
                for step in section.item_list_element {
                    step.collect_texts(out);
                }
            }
            InstructionStep::Nested(steps) => {
                for step in steps {
                    step.collect_texts(out);
                }
            }
            InstructionStep::Other(_) => {}
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RecipeYield {
    Number(Number),
    String(String),
    Multiple(Vec<Value>),
    Other(IgnoredAny),
}

impl RecipeYield {
    fn into_text(self) -> Option<String> {
        match self {
            RecipeYield::Number(n) => Some(n.to_string()),
            RecipeYield::String(s) => Some(s),
            RecipeYield::Multiple(values) => values.into_iter().next().map(stringify),
            RecipeYield::Other(_) => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NutritionInformation {
    Object(BTreeMap<String, Value>),
    Other(IgnoredAny),
}

fn stringify(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

fn is_recipe_type(value: &Value) -> bool {
    match value.get("@type") {
        Some(Value::String(type_str)) => type_str.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

/// The objects a block may hold: the root itself, array members and the
/// members of an `@graph`.
fn candidate_objects(block: &Value) -> Vec<&Value> {
    let items: Vec<&Value> = match block {
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    };
    items
        .into_iter()
        .flat_map(|item| {
            let mut found = vec![item];
            if let Some(Value::Array(graph)) = item.get("@graph") {
                found.extend(graph.iter());
            }
            found
        })
        .filter(|item| item.is_object())
        .collect()
}

/// Escape raw control characters inside string literals; pages often embed
/// unescaped line breaks in descriptions.
fn sanitize_json(raw: &str) -> String {
    let mut sanitized = String::with_capacity(raw.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in raw.chars() {
        if !in_string {
            if c == '"' {
                in_string = true;
            }
            sanitized.push(c);
            continue;
        }

        if escaped {
            escaped = false;
            sanitized.push(c);
            continue;
        }

        match c {
            '\\' => {
                escaped = true;
                sanitized.push(c);
            }
            '"' => {
                in_string = false;
                sanitized.push(c);
            }
            '\n' | '\r' | '\t' => sanitized.push(' '),
            c if c.is_control() => {}
            c => sanitized.push(c),
        }
    }
    sanitized
}

impl JsonLdExtractor {
    fn apply(&self, json_ld_recipe: JsonLdRecipe, recipe: &mut RecipeData) {
        if let Some(name) = json_ld_recipe.name.and_then(TextValue::into_text) {
            recipe.set_text(TextField::Title, decode_html_symbols(&name));
        }

        if let Some(description) = json_ld_recipe.description.and_then(TextValue::into_text) {
            recipe.set_text(TextField::Description, decode_html_symbols(&description));
        }

        let ingredients: Vec<String> = match json_ld_recipe.recipe_ingredient {
            Some(RecipeIngredients::Text(text)) => vec![text],
            Some(RecipeIngredients::Multiple(entries)) => entries
                .into_iter()
                .filter_map(IngredientEntry::into_text)
                .collect(),
            Some(RecipeIngredients::Other(_)) | None => Vec::new(),
        };
        recipe.commit_list(
            ListField::Ingredients,
            ingredients.iter().map(|i| decode_html_symbols(i)),
        );

        let mut instructions = Vec::new();
        match json_ld_recipe.recipe_instructions {
            Some(RecipeInstructions::Text(text)) => {
                instructions.extend(text.lines().map(str::to_string));
            }
            Some(RecipeInstructions::Steps(steps)) => {
                for step in steps {
                    step.collect_texts(&mut instructions);
                }
            }
            Some(RecipeInstructions::Other(_)) | None => {}
        }
        recipe.commit_list(
            ListField::Instructions,
            instructions.iter().map(|i| decode_html_symbols(i)),
        );

        if let Some(prep_time) = json_ld_recipe.prep_time.and_then(TextValue::into_text) {
            recipe.set_text(TextField::PrepTime, normalize_duration(&prep_time));
        }

        if let Some(cook_time) = json_ld_recipe.cook_time.and_then(TextValue::into_text) {
            recipe.set_text(TextField::CookTime, normalize_duration(&cook_time));
        }

        // Yield is kept as published; it is usually numeric already
        if let Some(servings) = json_ld_recipe.recipe_yield.and_then(RecipeYield::into_text) {
            recipe.set_text(TextField::Servings, servings);
        }

        if let Some(NutritionInformation::Object(values)) = json_ld_recipe.nutrition {
            let nutrition = values
                .into_iter()
                .filter(|(key, _)| !key.starts_with('@'))
                .filter(|(_, value)| value.is_string() || value.is_number())
                .map(|(key, value)| (key, decode_html_symbols(&stringify(value))))
                .collect();
            recipe.commit_nutrition(nutrition);
        }
    }
}

impl Extractor for JsonLdExtractor {
    fn name(&self) -> &'static str {
        "json_ld"
    }

    fn extract(&self, document: &Html, recipe: &mut RecipeData) {
        let Some(selector) = parse_selector("script[type='application/ld+json']") else {
            return;
        };

        let scripts: Vec<_> = document.select(&selector).collect();
        debug!("JsonLdExtractor: Found {} JSON-LD script tags", scripts.len());

        for (index, script) in scripts.iter().enumerate() {
            let raw_json = script.text().collect::<String>();
            let block = match serde_json::from_str::<Value>(&sanitize_json(&raw_json)) {
                Ok(block) => block,
                Err(e) => {
                    debug!("JsonLdExtractor: Skipping malformed block {}: {}", index, e);
                    continue;
                }
            };

            let Some(recipe_json) = candidate_objects(&block)
                .into_iter()
                .find(|item| is_recipe_type(item))
            else {
                debug!("JsonLdExtractor: No Recipe object in block {}", index);
                continue;
            };

            match serde_json::from_value::<JsonLdRecipe>(recipe_json.clone()) {
                Ok(json_ld_recipe) => {
                    debug!("JsonLdExtractor: Mapping Recipe from block {}", index);
                    self.apply(json_ld_recipe, recipe);
                    // The first Recipe found is authoritative; later blocks are ignored
                    return;
                }
                Err(e) => {
                    debug!("JsonLdExtractor: Recipe in block {} unreadable: {}", index, e);
                }
            }
        }
    }
}
