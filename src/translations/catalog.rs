//! Filtering and grouping of the translation catalog.

use crate::api::AvailableTranslation;
use crate::locale::{locale_compare, same_language};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationGroup {
    pub language: String,
    pub translations: Vec<AvailableTranslation>,
}

/// Tokenize and normalize search query
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Match strength of a single token against a field, 0 when absent.
fn token_score(field: &str, token: &str) -> i32 {
    let field_lower = field.to_lowercase();
    if field_lower == token {
        100
    } else if field_lower.starts_with(token) {
        80
    } else if field_lower
        .split(|c: char| !c.is_alphanumeric())
        .any(|word| word == token)
    {
        60
    } else if field_lower.contains(token) {
        40
    } else {
        0
    }
}

fn searchable_fields(translation: &AvailableTranslation) -> [&str; 3] {
    [
        translation.translated_name.name.as_str(),
        translation.author_name.as_str(),
        translation.language_name.as_str(),
    ]
}

fn matches_all_tokens(translation: &AvailableTranslation, tokens: &[String]) -> bool {
    let fields = searchable_fields(translation);
    tokens
        .iter()
        .all(|token| fields.iter().any(|field| token_score(field, token) > 0))
}

// Punctuation-only queries have no tokens but still narrow the list.
fn contains_literal(translation: &AvailableTranslation, needle: &str) -> bool {
    searchable_fields(translation)
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Keeps translations matching every token of `query`; a blank query keeps all.
pub fn filter_translations(
    translations: &[AvailableTranslation],
    query: &str,
) -> Vec<AvailableTranslation> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return translations.to_vec();
    }

    let tokens = tokenize(trimmed);
    if tokens.is_empty() {
        let needle = trimmed.to_lowercase();
        return translations
            .iter()
            .filter(|translation| contains_literal(translation, &needle))
            .cloned()
            .collect();
    }

    translations
        .iter()
        .filter(|translation| matches_all_tokens(translation, &tokens))
        .cloned()
        .collect()
}

/// Groups by language: the active language first, the rest by name. Each
/// group is ordered by author.
pub fn group_translations(
    translations: Vec<AvailableTranslation>,
    active_language: &str,
) -> Vec<TranslationGroup> {
    let mut by_language: HashMap<String, Vec<AvailableTranslation>> = HashMap::new();
    for translation in translations {
        by_language
            .entry(translation.language_name.clone())
            .or_default()
            .push(translation);
    }

    let mut groups: Vec<TranslationGroup> = by_language
        .into_iter()
        .map(|(language, mut translations)| {
            translations.sort_by(|a, b| locale_compare(&a.author_name, &b.author_name));
            TranslationGroup {
                language,
                translations,
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        let a_active = same_language(&a.language, active_language);
        let b_active = same_language(&b.language, active_language);
        b_active
            .cmp(&a_active)
            .then_with(|| locale_compare(&a.language, &b.language))
    });
    groups
}

/// What the panel renders for one catalog and query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CatalogView {
    pub query: String,
    pub groups: Vec<TranslationGroup>,
    pub match_count: usize,
}

impl CatalogView {
    pub fn build(catalog: &[AvailableTranslation], query: &str, active_language: &str) -> Self {
        let filtered = filter_translations(catalog, query);
        let match_count = filtered.len();
        Self {
            query: query.to_string(),
            groups: group_translations(filtered, active_language),
            match_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.match_count == 0
    }
}
