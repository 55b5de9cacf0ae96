use crate::api::DEFAULT_API_BASE;
use crate::error::DbError;
use crate::locale::{default_translations, system_locale};
use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{LocalStorage, Storage};

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "quranreader.settings";

pub const DEFAULT_AUTH_BASE: &str = "https://quran.com/api/auth";

/// Reader settings stored locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReaderSettings {
    pub locale: String,
    #[serde(default)]
    pub selected_translations: Vec<u32>,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_auth_base_url")]
    pub auth_base_url: String,
    /// Session token; `None` while signed out.
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
    #[serde(default = "default_cache_size_mb")]
    pub cache_size_mb: u32,
    #[serde(default = "default_cache_expiry_hours")]
    pub cache_expiry_hours: u32,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_auth_base_url() -> String {
    DEFAULT_AUTH_BASE.to_string()
}

fn default_true() -> bool {
    true
}

fn default_cache_size_mb() -> u32 {
    25
}

fn default_cache_expiry_hours() -> u32 {
    24
}

impl ReaderSettings {
    pub fn is_signed_in(&self) -> bool {
        self.auth_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }
}

impl Default for ReaderSettings {
    fn default() -> Self {
        let locale = system_locale();
        Self {
            selected_translations: default_translations(&locale),
            locale,
            api_base_url: default_api_base_url(),
            auth_base_url: default_auth_base_url(),
            auth_token: None,
            cache_enabled: true,
            cache_size_mb: default_cache_size_mb(),
            cache_expiry_hours: default_cache_expiry_hours(),
        }
    }
}

// Native builds keep settings in a sqlite key/value table.

#[cfg(not(target_arch = "wasm32"))]
pub async fn save_settings(settings: ReaderSettings) -> Result<(), DbError> {
    let conn = get_db_connection()?;
    let settings_json = serde_json::to_string(&settings)?;

    conn.execute(
        "INSERT OR REPLACE INTO settings (key, value) VALUES ('reader_settings', ?1)",
        [&settings_json],
    )?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn save_settings(settings: ReaderSettings) -> Result<(), DbError> {
    LocalStorage::set(SETTINGS_KEY, settings)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn load_settings() -> Result<ReaderSettings, DbError> {
    let conn = get_db_connection()?;

    let result: Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM settings WHERE key = 'reader_settings'",
        [],
        |row: &rusqlite::Row| row.get(0),
    );

    match result {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(ReaderSettings::default()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(target_arch = "wasm32")]
pub async fn load_settings() -> Result<ReaderSettings, DbError> {
    match LocalStorage::get(SETTINGS_KEY) {
        Ok(settings) => Ok(settings),
        Err(_) => Ok(ReaderSettings::default()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn initialize_database() -> Result<(), DbError> {
    let conn = get_db_connection()?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS settings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub async fn initialize_database() -> Result<(), DbError> {
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn get_db_connection() -> Result<rusqlite::Connection, DbError> {
    let data_dir = dirs::data_dir()
        .map(|dir| dir.join("quranreader"))
        .ok_or(DbError::NoDataDir)?;
    std::fs::create_dir_all(&data_dir).map_err(|_| DbError::NoDataDir)?;

    Ok(rusqlite::Connection::open(data_dir.join("quranreader.db"))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn older_settings_fill_in_defaults() {
        let settings: ReaderSettings =
            serde_json::from_str(r#"{ "locale": "fr", "selected_translations": [31] }"#).unwrap();

        assert_eq!(settings.locale, "fr");
        assert_eq!(settings.selected_translations, vec![31]);
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE);
        assert!(settings.cache_enabled);
        assert!(!settings.is_signed_in());
    }

    #[test]
    fn blank_token_is_signed_out() {
        let settings = ReaderSettings {
            auth_token: Some("  ".to_string()),
            ..ReaderSettings::default()
        };
        assert!(!settings.is_signed_in());

        let settings = ReaderSettings {
            auth_token: Some("abc".to_string()),
            ..settings
        };
        assert!(settings.is_signed_in());
    }

    #[test]
    fn defaults_select_locale_defaults() {
        let settings = ReaderSettings::default();
        assert_eq!(
            settings.selected_translations,
            default_translations(&settings.locale)
        );
    }
}
