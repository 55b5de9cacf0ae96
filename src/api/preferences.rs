// User preference endpoint of the authenticated API.
use crate::api::quran::HTTP_CLIENT;
use crate::error::ApiError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PreferenceGroup {
    Translations,
}

impl PreferenceGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Translations => "translations",
        }
    }
}

#[derive(Debug, Serialize)]
struct PreferencePayload<'a> {
    key: &'a str,
    value: &'a serde_json::Value,
    group: PreferenceGroup,
}

/// Remote store for signed-in users' preferences.
#[allow(async_fn_in_trait)]
pub trait PreferencesBackend {
    async fn save_preference(
        &self,
        key: &str,
        value: &serde_json::Value,
        group: PreferenceGroup,
    ) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreferencesClient {
    pub base_url: String,
    token: String,
}

impl PreferencesClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn preferences_url(&self) -> String {
        format!("{}/preferences", self.base_url)
    }
}

impl PreferencesBackend for PreferencesClient {
    async fn save_preference(
        &self,
        key: &str,
        value: &serde_json::Value,
        group: PreferenceGroup,
    ) -> Result<(), ApiError> {
        let url = self.preferences_url();
        let response = HTTP_CLIENT
            .post(&url)
            .bearer_auth(&self.token)
            .json(&PreferencePayload { key, value, group })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        tracing::debug!(key, group = group.as_str(), "preference saved remotely");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_uses_api_field_names() {
        let value = serde_json::json!([131, 20]);
        let payload = PreferencePayload {
            key: "selectedTranslations",
            value: &value,
            group: PreferenceGroup::Translations,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({
                "key": "selectedTranslations",
                "value": [131, 20],
                "group": "translations",
            })
        );
    }

    #[test]
    fn group_wire_name_matches_as_str() {
        let group = PreferenceGroup::Translations;
        assert_eq!(
            serde_json::to_value(group).unwrap(),
            serde_json::Value::String(group.as_str().to_string())
        );
    }

    #[test]
    fn trims_trailing_slash_from_base() {
        let client = PreferencesClient::new("https://api.example.com/auth/", "token");
        assert_eq!(client.preferences_url(), "https://api.example.com/auth/preferences");
    }
}
