use crate::model::{ListField, TextField};
use serde::Deserialize;

/// Keyword and selector tables driving the DOM extractor.
///
/// The defaults target German recipe sites; every table can be replaced
/// from configuration to adapt the heuristics to another locale.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
    /// Selectors identifying the element enclosing the recipe, in priority order
    pub container_selectors: Vec<String>,
    /// Per-field selectors, in priority order
    pub fields: FieldSelectors,
    /// Words that mark a text as a cooking step (heat, temperature, verbs)
    pub cooking_keywords: Vec<String>,
    /// Words that mark a text as page chrome (print, share, navigation)
    pub ui_keywords: Vec<String>,
    /// Common ingredients that qualify a list item without a quantity
    pub ingredient_keywords: Vec<String>,
    /// Units that may follow a quantity in an ingredient line
    pub unit_tokens: Vec<String>,
    /// A heuristic instruction must be longer than this many characters
    pub min_instruction_length: usize,
    /// Qualifying items a list needs before it is accepted as instructions
    pub min_instruction_items: usize,
    /// Qualifying items a list needs before it is accepted as ingredients
    pub min_ingredient_items: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FieldSelectors {
    pub title: Vec<String>,
    pub description: Vec<String>,
    pub prep_time: Vec<String>,
    pub cook_time: Vec<String>,
    pub servings: Vec<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
}

impl FieldSelectors {
    pub fn text(&self, field: TextField) -> &[String] {
        match field {
            TextField::Title => &self.title,
            TextField::Description => &self.description,
            TextField::PrepTime => &self.prep_time,
            TextField::CookTime => &self.cook_time,
            TextField::Servings => &self.servings,
        }
    }

    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::Ingredients => &self.ingredients,
            ListField::Instructions => &self.instructions,
        }
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            container_selectors: strings(&[
                // structured markup
                "[itemtype*=\"Recipe\"]",
                "[typeof*=\"Recipe\"]",
                // generic class names
                ".recipe",
                ".recipe-card",
                ".recipe-content",
                ".recipe-instructions",
                ".recipe-ingredients",
                // German class names
                ".rezept",
                ".rezept-karte",
                ".rezept-inhalt",
                ".zutatenliste",
                ".zubereitung",
                ".anleitung",
                ".kochzeit",
                ".vorbereitungszeit",
            ]),
            fields: FieldSelectors::default(),
            cooking_keywords: strings(&[
                "°c",
                "grad",
                "ofen",
                "backofen",
                "hitze",
                "erhitzen",
                "vorheizen",
                "backen",
                "kochen",
                "köcheln",
                "braten",
                "anbraten",
                "dünsten",
                "garen",
                "rösten",
                "schmoren",
                "frittieren",
                "pfanne",
                "topf",
                "rühren",
                "mischen",
                "vermengen",
                "schneiden",
                "hacken",
                "würzen",
                "abschmecken",
                "servieren",
            ]),
            ui_keywords: strings(&[
                "drucken",
                "rezept teilen",
                "teilen auf",
                "merkliste",
                "speichern",
                "newsletter",
                "kommentar",
                "bewerten",
                "startseite",
                "navigation",
                "anmelden",
                "print",
                "share",
            ]),
            ingredient_keywords: strings(&[
                "salz",
                "pfeffer",
                "öl",
                "butter",
                "zwiebel",
                "knoblauch",
                "tomate",
            ]),
            unit_tokens: strings(&[
                "g",
                "kg",
                "ml",
                "l",
                "liter",
                "dl",
                "cl",
                "tl",
                "el",
                "teelöffel",
                "esslöffel",
                "stk",
                "stück",
                "prise",
                "bund",
            ]),
            min_instruction_length: 20,
            min_instruction_items: 2,
            min_ingredient_items: 3,
        }
    }
}

impl Default for FieldSelectors {
    fn default() -> Self {
        Self {
            title: strings(&[
                "[itemprop=\"name\"]",
                "h1",
                "h2",
                ".recipe-title",
                ".rezept-titel",
                ".title",
                ".titel",
                "[data-recipe-title]",
            ]),
            description: strings(&[
                "[itemprop=\"description\"]",
                ".recipe-description",
                ".rezept-beschreibung",
                ".description",
                ".beschreibung",
                ".intro",
            ]),
            prep_time: strings(&[
                "[itemprop=\"prepTime\"]",
                ".prep-time",
                ".vorbereitungszeit",
                ".zubereitungszeit",
                "[data-prep-time]",
            ]),
            cook_time: strings(&[
                "[itemprop=\"cookTime\"]",
                ".cook-time",
                ".kochzeit",
                ".backzeit",
                ".garzeit",
                "[data-cook-time]",
            ]),
            servings: strings(&[
                "[itemprop=\"recipeYield\"]",
                ".servings",
                ".portionen",
                ".personen",
                ".yield",
                "[data-servings]",
            ]),
            ingredients: strings(&[
                "[itemprop=\"recipeIngredient\"]",
                ".ingredient",
                ".zutat",
                ".ingredients li",
                ".zutaten li",
                ".zutatenliste li",
                ".recipe-ingredients li",
                ".rezept-zutaten li",
            ]),
            instructions: strings(&[
                "[itemprop=\"recipeInstructions\"]",
                "[itemprop=\"recipeInstruction\"]",
                ".instruction",
                ".step",
                ".schritt",
                ".instructions li",
                ".anleitung li",
                ".zubereitung li",
                ".recipe-instructions li",
                ".rezept-anleitung li",
                ".instructions p",
                ".anleitung p",
                ".zubereitung p",
            ]),
        }
    }
}
