use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

/// A rendered recipe document, split back into the fields a store indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDocument {
    pub title: String,
    pub source: String,
    pub cuisine: String,
    /// The complete markdown, header included
    pub content: String,
    /// Body of the ingredients section
    pub ingredients: String,
    /// Body of the preparation section
    pub instructions: String,
    pub prep_time: String,
    pub cook_time: String,
    pub servings: String,
    pub tags: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Ingredients,
    Instructions,
    Tags,
}

impl Section {
    fn from_heading(heading: &str) -> Option<Self> {
        let heading = heading.trim_start_matches('#').trim().to_lowercase();
        if heading.contains("zutat") || heading.contains("ingredient") {
            Some(Section::Ingredients)
        } else if heading.contains("zubereitung")
            || heading.contains("anleitung")
            || heading.contains("instruction")
        {
            Some(Section::Instructions)
        } else if heading.contains("tags") {
            Some(Section::Tags)
        } else {
            None
        }
    }
}

fn unquote(value: &str) -> String {
    let value = value.trim();
    let inner = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
        .unwrap_or(value);

    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Split a `---` delimited header from the body.
///
/// Returns the header's `key: value` pairs and the remaining body. Without a
/// closed header the map is empty and the body is the whole input.
pub fn parse_frontmatter(content: &str) -> (HashMap<String, String>, &str) {
    let mut fields = HashMap::new();

    let Some(rest) = content.strip_prefix("---") else {
        return (fields, content);
    };
    let Some((header, body)) = rest.split_once("\n---") else {
        return (fields, content);
    };

    for line in header.lines().map(str::trim) {
        if line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim().trim_matches(['"', '\'']);
            if !key.is_empty() {
                fields.insert(key.to_string(), unquote(value));
            }
        }
    }

    (fields, body.trim())
}

#[derive(Debug, Default, PartialEq)]
struct Sections {
    ingredients: String,
    instructions: String,
    tags: Vec<String>,
}

fn flush(section: Option<Section>, lines: &mut Vec<&str>, sections: &mut Sections) {
    let text = lines.join("\n").trim().to_string();
    lines.clear();
    match section {
        Some(Section::Ingredients) if !text.is_empty() => sections.ingredients = text,
        Some(Section::Instructions) if !text.is_empty() => sections.instructions = text,
        _ => {}
    }
}

fn extract_sections(body: &str) -> Sections {
    let mut sections = Sections::default();
    let mut current: Option<Section> = None;
    let mut lines: Vec<&str> = Vec::new();

    for line in body.lines() {
        if line.starts_with("##") {
            flush(current, &mut lines, &mut sections);
            current = Section::from_heading(line);
        } else if current == Some(Section::Tags) {
            sections
                .tags
                .extend(TAG_RE.captures_iter(line).map(|c| c[1].to_string()));
        } else if current.is_some() {
            lines.push(line);
        }
    }
    flush(current, &mut lines, &mut sections);

    sections
}

impl RecipeDocument {
    /// Read a rendered document back into its indexed fields.
    ///
    /// `fallback_title` is used when the header carries no title, typically
    /// the file stem the document was stored under.
    pub fn from_markdown(content: &str, fallback_title: &str) -> Self {
        let (header, body) = parse_frontmatter(content);
        let sections = extract_sections(body);
        let field = |key: &str| header.get(key).cloned().unwrap_or_default();

        let title = match header.get("title") {
            Some(title) if !title.is_empty() => title.clone(),
            _ => fallback_title.to_string(),
        };
        debug!("RecipeDocument: parsed {:?} with {} tags", title, sections.tags.len());

        Self {
            title,
            source: field("source"),
            cuisine: field("cuisine"),
            content: content.to_string(),
            ingredients: sections.ingredients,
            instructions: sections.instructions,
            prep_time: field("prep_time"),
            cook_time: field("cook_time"),
            servings: field("servings"),
            tags: sections.tags,
        }
    }
}
