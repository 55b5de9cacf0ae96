use crate::api::models::*;
use crate::cache::keys;
use crate::cache_service;
use crate::error::ApiError;
use once_cell::sync::Lazy;

pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

pub const DEFAULT_API_BASE: &str = "https://api.quran.com/api/v4";

/// URL of the translation catalog for `locale`. Doubles as the cache key seed.
pub fn translations_url(base_url: &str, locale: &str) -> String {
    format!(
        "{}/resources/translations?language={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(locale)
    )
}

/// Keyed source of the translation catalog.
#[allow(async_fn_in_trait)]
pub trait TranslationSource {
    async fn fetch_translations(&self, locale: &str) -> Result<TranslationsResponse, ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuranClient {
    pub base_url: String,
}

impl QuranClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn translations_cache_key(&self, locale: &str) -> String {
        keys::api_response("resources/translations", &translations_url(&self.base_url, locale))
    }

    /// Catalog for `locale` if a fresh copy is cached; never hits the network.
    pub fn cached_translations(&self, locale: &str) -> Option<TranslationsResponse> {
        cache_service::get_json::<TranslationsResponse>(&self.translations_cache_key(locale))
    }
}

impl Default for QuranClient {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl TranslationSource for QuranClient {
    async fn fetch_translations(&self, locale: &str) -> Result<TranslationsResponse, ApiError> {
        if let Some(cached) = self.cached_translations(locale) {
            tracing::debug!(locale, count = cached.translations.len(), "translations served from cache");
            return Ok(cached);
        }

        let url = translations_url(&self.base_url, locale);
        let response = HTTP_CLIENT.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        let catalog: TranslationsResponse = serde_json::from_slice(&body)?;
        tracing::debug!(locale, count = catalog.translations.len(), "fetched translations");

        cache_service::put_json(self.translations_cache_key(locale), &catalog, None);
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://api.quran.com/api/v4", "en")]
    #[case("https://api.quran.com/api/v4/", "en")]
    fn builds_translations_url(#[case] base: &str, #[case] locale: &str) {
        assert_eq!(
            translations_url(base, locale),
            "https://api.quran.com/api/v4/resources/translations?language=en"
        );
    }

    #[test]
    fn encodes_locale_in_url() {
        let url = translations_url("http://localhost", "pt br");
        assert!(url.ends_with("language=pt%20br"));
    }

    #[test]
    fn distinct_locales_use_distinct_cache_keys() {
        let client = QuranClient::default();
        assert_ne!(
            client.translations_cache_key("en"),
            client.translations_cache_key("ar")
        );
        assert!(client.translations_cache_key("en").starts_with("api:"));
    }
}
