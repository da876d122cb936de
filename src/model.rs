use serde::Serialize;
use std::collections::BTreeMap;

/// Recipe fields accumulated while extracting a single page.
///
/// Fields are only ever written through the setters below, which refuse to
/// overwrite a field that an earlier strategy already populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RecipeData {
    pub title: String,
    pub description: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub nutrition: BTreeMap<String, String>,
}

/// Single-valued text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Title,
    Description,
    PrepTime,
    CookTime,
    Servings,
}

impl TextField {
    pub const ALL: [TextField; 5] = [
        TextField::Title,
        TextField::Description,
        TextField::PrepTime,
        TextField::CookTime,
        TextField::Servings,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TextField::Title => "title",
            TextField::Description => "description",
            TextField::PrepTime => "prep_time",
            TextField::CookTime => "cook_time",
            TextField::Servings => "servings",
        }
    }
}

/// Ordered list fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Ingredients,
    Instructions,
}

impl ListField {
    pub const ALL: [ListField; 2] = [ListField::Ingredients, ListField::Instructions];

    pub fn name(self) -> &'static str {
        match self {
            ListField::Ingredients => "ingredients",
            ListField::Instructions => "instructions",
        }
    }
}

impl RecipeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Title => &self.title,
            TextField::Description => &self.description,
            TextField::PrepTime => &self.prep_time,
            TextField::CookTime => &self.cook_time,
            TextField::Servings => &self.servings,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Title => &mut self.title,
            TextField::Description => &mut self.description,
            TextField::PrepTime => &mut self.prep_time,
            TextField::CookTime => &mut self.cook_time,
            TextField::Servings => &mut self.servings,
        }
    }

    pub fn list(&self, field: ListField) -> &[String] {
        match field {
            ListField::Ingredients => &self.ingredients,
            ListField::Instructions => &self.instructions,
        }
    }

    fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Ingredients => &mut self.ingredients,
            ListField::Instructions => &mut self.instructions,
        }
    }

    pub fn has_text(&self, field: TextField) -> bool {
        !self.text(field).is_empty()
    }

    pub fn has_list(&self, field: ListField) -> bool {
        !self.list(field).is_empty()
    }

    /// Store `value` if the field is still empty and the value is not blank.
    ///
    /// Returns whether the value was committed.
    pub fn set_text(&mut self, field: TextField, value: impl Into<String>) -> bool {
        let value = value.into();
        let value = value.trim();
        if self.has_text(field) || value.is_empty() {
            return false;
        }
        *self.text_mut(field) = value.to_string();
        true
    }

    /// Commit a whole list at once if the field is still empty.
    ///
    /// Entries are trimmed and blank ones dropped; a list with nothing left
    /// is not committed.
    pub fn commit_list<I, S>(&mut self, field: ListField, items: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.has_list(field) {
            return false;
        }
        let items: Vec<String> = items
            .into_iter()
            .map(Into::into)
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect();
        if items.is_empty() {
            return false;
        }
        *self.list_mut(field) = items;
        true
    }

    /// Commit nutrition values if none were recorded yet.
    pub fn commit_nutrition(&mut self, nutrition: BTreeMap<String, String>) -> bool {
        if !self.nutrition.is_empty() {
            return false;
        }
        self.nutrition = nutrition
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty())
            .collect();
        !self.nutrition.is_empty()
    }

    /// True when every text and list field is populated.
    pub fn is_complete(&self) -> bool {
        TextField::ALL.iter().all(|f| self.has_text(*f))
            && ListField::ALL.iter().all(|f| self.has_list(*f))
    }

    /// True when nothing at all was extracted.
    pub fn is_empty(&self) -> bool {
        TextField::ALL.iter().all(|f| !self.has_text(*f))
            && ListField::ALL.iter().all(|f| !self.has_list(*f))
            && self.nutrition.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_is_empty() {
        let recipe = RecipeData::new();
        assert!(recipe.is_empty());
        assert!(!recipe.is_complete());
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.nutrition.is_empty());
    }

    #[test]
    fn test_set_text_first_value_wins() {
        let mut recipe = RecipeData::new();
        assert!(recipe.set_text(TextField::Title, "  Sesam Chicken "));
        assert!(!recipe.set_text(TextField::Title, "Other"));
        assert_eq!(recipe.title, "Sesam Chicken");
    }

    #[test]
    fn test_blank_text_does_not_lock_field() {
        let mut recipe = RecipeData::new();
        assert!(!recipe.set_text(TextField::Servings, "   "));
        assert!(recipe.set_text(TextField::Servings, "4"));
        assert_eq!(recipe.servings, "4");
    }

    #[test]
    fn test_commit_list_is_atomic() {
        let mut recipe = RecipeData::new();
        assert!(!recipe.commit_list(ListField::Ingredients, vec!["", "  "]));
        assert!(recipe.ingredients.is_empty());

        assert!(recipe.commit_list(ListField::Ingredients, vec![" 200 g Mehl", "", "1 Ei"]));
        assert_eq!(recipe.ingredients, vec!["200 g Mehl", "1 Ei"]);

        assert!(!recipe.commit_list(ListField::Ingredients, vec!["Salz"]));
        assert_eq!(recipe.ingredients.len(), 2);
    }

    #[test]
    fn test_commit_nutrition_once() {
        let mut recipe = RecipeData::new();
        let mut first = BTreeMap::new();
        first.insert("calories".to_string(), "320 kcal".to_string());
        assert!(recipe.commit_nutrition(first));

        let mut second = BTreeMap::new();
        second.insert("fatContent".to_string(), "12 g".to_string());
        assert!(!recipe.commit_nutrition(second));
        assert_eq!(recipe.nutrition.len(), 1);
    }
}
