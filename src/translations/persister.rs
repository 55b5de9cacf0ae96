//! Persists a settings change remotely for signed-in users before applying it.

use crate::api::{PreferenceGroup, PreferencesBackend};
use crate::error::PreferenceError;
use crate::translations::store::{TranslationsAction, TranslationsState, TranslationsStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceName {
    Translations,
}

impl SliceName {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Translations => "translations",
        }
    }
}

/// One proposed change to a preference-backed slice.
#[derive(Debug, Clone)]
pub struct SettingsChange<'a> {
    pub key: &'a str,
    pub value: serde_json::Value,
    pub action: TranslationsAction,
    pub current_state: &'a TranslationsState,
    pub undo_action: TranslationsAction,
    pub slice_name: SliceName,
    pub group: PreferenceGroup,
}

#[derive(Debug)]
pub enum PersistOutcome {
    /// Applied locally; nothing was sent.
    Applied,
    /// Saved remotely and applied. `undo` restores the previous value.
    Persisted { undo: TranslationsAction },
    /// Remote save failed; the store was left untouched.
    Failed { error: PreferenceError },
}

impl PersistOutcome {
    /// True when the proposed value never reached the store.
    pub fn left_store_unchanged(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone)]
pub struct PreferencePersister<B> {
    backend: Option<B>,
}

impl<B: PreferencesBackend> PreferencePersister<B> {
    pub fn signed_out() -> Self {
        Self { backend: None }
    }

    pub fn signed_in(backend: B) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub async fn on_settings_change<S: TranslationsStore>(
        &self,
        store: &mut S,
        change: SettingsChange<'_>,
    ) -> PersistOutcome {
        let Some(backend) = self.backend.as_ref() else {
            store.dispatch(change.action);
            return PersistOutcome::Applied;
        };

        let current = serde_json::to_value(change.current_state).map_err(|source| {
            PreferenceError::Encode {
                key: change.key.to_string(),
                source,
            }
        });
        let current = match current {
            Ok(current) => current,
            Err(error) => {
                tracing::warn!(%error, slice = change.slice_name.as_str(), "preference not saved");
                return PersistOutcome::Failed { error };
            }
        };

        if current.get(change.key) == Some(&change.value) {
            tracing::debug!(key = change.key, "preference unchanged, skipping remote save");
            store.dispatch(change.action);
            return PersistOutcome::Applied;
        }

        match backend
            .save_preference(change.key, &change.value, change.group)
            .await
        {
            Ok(()) => {
                store.dispatch(change.action);
                PersistOutcome::Persisted {
                    undo: change.undo_action,
                }
            }
            Err(err) => {
                let error = PreferenceError::from(err);
                tracing::warn!(
                    %error,
                    key = change.key,
                    slice = change.slice_name.as_str(),
                    "preference not saved"
                );
                PersistOutcome::Failed { error }
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use crate::error::ApiError;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, Default)]
    pub struct FakeBackend {
        pub fail: bool,
        pub calls: Rc<RefCell<Vec<(String, serde_json::Value, PreferenceGroup)>>>,
    }

    impl PreferencesBackend for FakeBackend {
        async fn save_preference(
            &self,
            key: &str,
            value: &serde_json::Value,
            group: PreferenceGroup,
        ) -> Result<(), ApiError> {
            self.calls
                .borrow_mut()
                .push((key.to_string(), value.clone(), group));
            if self.fail {
                Err(ApiError::Status {
                    status: 500,
                    url: "http://test/preferences".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }
}
