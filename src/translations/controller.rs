use crate::analytics::EventLogger;
use crate::api::{PreferenceGroup, PreferencesBackend};
use crate::query_param::{join_translation_ids, QueryParam, QueryParamWriter};
use crate::translations::persister::{
    PersistOutcome, PreferencePersister, SettingsChange, SliceName,
};
use crate::translations::selection::next_selection;
use crate::translations::store::{TranslationsAction, TranslationsStore};
use serde_json::json;

pub const SELECTED_TRANSLATIONS_KEY: &str = "selectedTranslations";

/// Applies checkbox changes from the translation picker.
pub struct TranslationSelection<S, B, Q, E> {
    store: S,
    persister: PreferencePersister<B>,
    router: Q,
    events: E,
    locale: String,
}

impl<S, B, Q, E> TranslationSelection<S, B, Q, E>
where
    S: TranslationsStore,
    B: PreferencesBackend,
    Q: QueryParamWriter,
    E: EventLogger,
{
    pub fn new(
        store: S,
        persister: PreferencePersister<B>,
        router: Q,
        events: E,
        locale: impl Into<String>,
    ) -> Self {
        Self {
            store,
            persister,
            router,
            events,
            locale: locale.into(),
        }
    }

    pub async fn on_translations_change(
        &mut self,
        translation_id: u32,
        is_checked: bool,
    ) -> PersistOutcome {
        let previous = self.store.select_translations().selected_translations;
        let next = next_selection(&previous, translation_id, is_checked);

        self.events
            .item_selection_change("translation", &translation_id.to_string(), is_checked);
        self.events
            .value_change("selected_translations", json!(previous), json!(next));

        let outcome = self
            .apply(
                TranslationsAction::set_selected(next.clone(), self.locale.clone()),
                TranslationsAction::set_selected(previous, self.locale.clone()),
            )
            .await;

        // An empty selection keeps whatever the URL already carries.
        if !next.is_empty() {
            self.router
                .set_query_param(QueryParam::Translations, join_translation_ids(&next));
        }

        outcome
    }

    /// Re-applies a previous selection offered after a remote save.
    pub async fn undo(&mut self, undo_action: TranslationsAction) -> PersistOutcome {
        let current = self.store.select_translations().selected_translations;
        let TranslationsAction::SetSelectedTranslations { translations, .. } = &undo_action;
        let restored = translations.clone();

        let outcome = self
            .apply(
                undo_action,
                TranslationsAction::set_selected(current, self.locale.clone()),
            )
            .await;

        if !restored.is_empty() {
            self.router
                .set_query_param(QueryParam::Translations, join_translation_ids(&restored));
        }
        outcome
    }

    async fn apply(
        &mut self,
        action: TranslationsAction,
        undo_action: TranslationsAction,
    ) -> PersistOutcome {
        let current_state = self.store.select_translations();
        let TranslationsAction::SetSelectedTranslations { translations, .. } = &action;
        let value = json!(translations);

        self.persister
            .on_settings_change(
                &mut self.store,
                SettingsChange {
                    key: SELECTED_TRANSLATIONS_KEY,
                    value,
                    action,
                    current_state: &current_state,
                    undo_action,
                    slice_name: SliceName::Translations,
                    group: PreferenceGroup::Translations,
                },
            )
            .await
    }
}
