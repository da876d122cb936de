//! Locale text normalisation for durations, servings and list entries.
//!
//! Every function here is total: input that cannot be interpreted is handed
//! back as close to unchanged as possible.

use once_cell::sync::Lazy;
use regex::Regex;

/// German word forms and their abbreviations, longest first so that
/// "minuten" is never split into "minute" + "n".
const TIME_REPLACEMENTS: &[(&str, &str)] = &[
    ("sekunden", "Sek"),
    ("stunden", "Std"),
    ("minuten", "Min"),
    ("sekunde", "Sek"),
    ("stunde", "Std"),
    ("minute", "Min"),
    ("std.", "Std"),
    ("min.", "Min"),
    ("sek.", "Sek"),
];

const PERSON_LABEL: &str = "Personen";
const PORTION_LABEL: &str = "Portionen";
const PIECE_LABEL: &str = "Stück";

static RE_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());
static RE_DIGIT_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*([a-zA-ZäöüÄÖÜß])").unwrap());
static RE_LOWER_CAPITAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([a-zäöüß])([A-ZÄÖÜ][a-zäöüß])").unwrap());
static RE_SPOON_UNIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*([EeTtDd][Ll])\s*([A-ZÄÖÜ])").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static RE_NAMED_ENTITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"&[a-zA-Z]+;").unwrap());

/// Normalise a duration into the "1 Std 30 Min" form.
///
/// ISO 8601 tokens (`PT1H30M`) are decomposed into hours and minutes; a token
/// where neither part parses is returned unmodified. Anything else is treated
/// as free text: German unit words are abbreviated and the result title-cased.
pub fn normalize_duration(raw: &str) -> String {
    if raw.trim().is_empty() {
        return String::new();
    }

    if let Some(iso) = raw.trim().strip_prefix("PT") {
        return format_iso_duration(iso).unwrap_or_else(|| raw.to_string());
    }

    let mut text = raw.trim().to_lowercase();
    for (word, abbreviation) in TIME_REPLACEMENTS {
        text = text.replace(word, abbreviation);
    }
    title_case(&text)
}

fn format_iso_duration(iso: &str) -> Option<String> {
    let (hours, rest) = match iso.find('H') {
        Some(h_pos) => (iso[..h_pos].parse::<u32>().ok(), &iso[h_pos + 1..]),
        None => (None, iso),
    };
    let minutes = rest
        .find('M')
        .and_then(|m_pos| rest[..m_pos].parse::<u32>().ok());

    match (hours.filter(|h| *h > 0), minutes.filter(|m| *m > 0)) {
        (Some(h), Some(m)) => Some(format!("{h} Std {m} Min")),
        (Some(h), None) => Some(format!("{h} Std")),
        (None, Some(m)) => Some(format!("{m} Min")),
        (None, None) => None,
    }
}

/// Uppercase the first letter of every letter run and lowercase the rest.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }
    result
}

/// Normalise a serving count into "{n} Personen|Portionen|Stück".
///
/// The first digit run is the count; text without digits is returned as is.
pub fn normalize_servings(raw: &str) -> String {
    let Some(count) = RE_DIGITS.find(raw) else {
        return raw.to_string();
    };

    let lower = raw.to_lowercase();
    let label = if lower.contains("person") {
        PERSON_LABEL
    } else if lower.contains("portion") {
        PORTION_LABEL
    } else if lower.contains("stück") {
        PIECE_LABEL
    } else {
        PORTION_LABEL
    };

    format!("{} {}", count.as_str(), label)
}

/// Strip HTML entities left in instruction text and close the sentence.
pub fn clean_inline_markup(text: &str) -> String {
    let text = text.replace("&#40;", "(").replace("&#41;", ")");
    let text = RE_NAMED_ENTITY.replace_all(&text, "");
    let mut text = text.trim().to_string();

    if !text.is_empty() && !text.ends_with(['.', '!', '?']) {
        text.push('.');
    }
    text
}

/// Separate quantities, units and ingredient names that were glued together,
/// e.g. "200gMehl" becomes "200 g Mehl".
pub fn space_measurements(text: &str) -> String {
    let text = RE_DIGIT_LETTER.replace_all(text, "${1} ${2}");
    let text = RE_LOWER_CAPITAL.replace_all(&text, "${1} ${2}");
    let text = RE_SPOON_UNIT.replace_all(&text, "${1} ${2} ${3}");
    RE_WHITESPACE.replace_all(&text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_durations() {
        assert_eq!(normalize_duration("PT1H30M"), "1 Std 30 Min");
        assert_eq!(normalize_duration("PT45M"), "45 Min");
        assert_eq!(normalize_duration("PT2H"), "2 Std");
        assert_eq!(normalize_duration("PT0H20M"), "20 Min");
        assert_eq!(normalize_duration(""), "");
    }

    #[test]
    fn test_iso_duration_without_markers_is_unchanged() {
        assert_eq!(normalize_duration("PT"), "PT");
        assert_eq!(normalize_duration("PT5400.0S"), "PT5400.0S");
        assert_eq!(normalize_duration("PTxyzM"), "PTxyzM");
    }

    #[test]
    fn test_free_text_durations() {
        assert_eq!(normalize_duration("15 minuten"), "15 Min");
        assert_eq!(normalize_duration("1 stunde 30 minuten"), "1 Std 30 Min");
        assert_eq!(normalize_duration("2 std 15 min"), "2 Std 15 Min");
        assert_eq!(normalize_duration("30 Min."), "30 Min");
        assert_eq!(normalize_duration("2 Stunden"), "2 Std");
        assert_eq!(normalize_duration("10 Sekunden"), "10 Sek");
    }

    #[test]
    fn test_servings() {
        assert_eq!(normalize_servings("4 Personen"), "4 Personen");
        assert_eq!(normalize_servings("6 Stück"), "6 Stück");
        assert_eq!(normalize_servings("keine Zahl"), "keine Zahl");
        assert_eq!(normalize_servings("4 portionen"), "4 Portionen");
        assert_eq!(normalize_servings("macht 8 portionen"), "8 Portionen");
        assert_eq!(normalize_servings("für 2"), "2 Portionen");
        assert_eq!(normalize_servings(""), "");
    }

    #[test]
    fn test_clean_inline_markup() {
        assert_eq!(
            clean_inline_markup("Zwiebel &#40;fein&#41; schneiden"),
            "Zwiebel (fein) schneiden."
        );
        assert_eq!(clean_inline_markup("Gut&nbsp;rühren."), "Gutrühren.");
        assert_eq!(clean_inline_markup("Fertig!"), "Fertig!");
        assert_eq!(clean_inline_markup("   "), "");
    }

    #[test]
    fn test_space_measurements() {
        assert_eq!(space_measurements("200gMehl"), "200 g Mehl");
        assert_eq!(space_measurements("2 ELZucker"), "2 EL Zucker");
        assert_eq!(space_measurements("1  Prise   Salz"), "1 Prise Salz");
        assert_eq!(space_measurements("500 g Tomaten"), "500 g Tomaten");
    }
}
