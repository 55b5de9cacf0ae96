use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TranslatedName {
    pub name: String,
    #[serde(default, alias = "languageName")]
    pub language_name: Option<String>,
}

/// A translation resource as listed by `/resources/translations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct AvailableTranslation {
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "authorName")]
    pub author_name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default, alias = "languageName")]
    pub language_name: String,
    #[serde(default, alias = "translatedName")]
    pub translated_name: TranslatedName,
}

impl AvailableTranslation {
    /// Label shown next to the checkbox.
    pub fn display_name(&self) -> &str {
        if !self.translated_name.name.trim().is_empty() {
            &self.translated_name.name
        } else if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            name
        } else {
            &self.author_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TranslationsResponse {
    #[serde(default)]
    pub translations: Vec<AvailableTranslation>,
}
