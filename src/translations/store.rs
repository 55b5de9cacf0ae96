//! The translations slice of application state and the store seam around it.

use crate::locale::default_translations;
use dioxus::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationsState {
    pub selected_translations: Vec<u32>,
    pub is_using_default_translations: bool,
}

impl TranslationsState {
    pub fn for_locale(locale: &str) -> Self {
        Self {
            selected_translations: default_translations(locale),
            is_using_default_translations: true,
        }
    }

    pub fn from_selection(translations: Vec<u32>, locale: &str) -> Self {
        Self {
            is_using_default_translations: translations == default_translations(locale),
            selected_translations: translations,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranslationsAction {
    SetSelectedTranslations {
        translations: Vec<u32>,
        locale: String,
    },
}

impl TranslationsAction {
    pub fn set_selected(translations: Vec<u32>, locale: impl Into<String>) -> Self {
        Self::SetSelectedTranslations {
            translations,
            locale: locale.into(),
        }
    }

    pub fn reduce(&self, state: &mut TranslationsState) {
        match self {
            Self::SetSelectedTranslations {
                translations,
                locale,
            } => *state = TranslationsState::from_selection(translations.clone(), locale),
        }
    }
}

/// Read and dispatch access to the translations slice.
pub trait TranslationsStore {
    fn select_translations(&self) -> TranslationsState;
    fn dispatch(&mut self, action: TranslationsAction);
}

impl TranslationsStore for Signal<TranslationsState> {
    fn select_translations(&self) -> TranslationsState {
        self.peek().clone()
    }

    fn dispatch(&mut self, action: TranslationsAction) {
        tracing::debug!(?action, "dispatch");
        self.with_mut(|state| action.reduce(state));
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn reducer_tracks_defaults() {
        let mut state = TranslationsState::for_locale("en");
        assert!(state.is_using_default_translations);

        TranslationsAction::set_selected(vec![131, 20], "en").reduce(&mut state);
        assert_eq!(state.selected_translations, vec![131, 20]);
        assert!(!state.is_using_default_translations);

        TranslationsAction::set_selected(vec![131], "en").reduce(&mut state);
        assert!(state.is_using_default_translations);
    }

    #[test]
    fn memory_store_notifies_subscribers() {
        let mut store = MemoryStore::new(TranslationsState::for_locale("en"));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let subscription = store.subscribe(move |state| {
            sink.borrow_mut().push(state.selected_translations.clone());
        });

        store.dispatch(TranslationsAction::set_selected(vec![20], "en"));
        store.unsubscribe(subscription);
        store.dispatch(TranslationsAction::set_selected(vec![], "en"));

        assert_eq!(*seen.borrow(), vec![vec![20]]);
        assert!(store.select_translations().selected_translations.is_empty());
    }

    #[test]
    fn listener_can_dispatch_from_notification() {
        let mut store = MemoryStore::new(TranslationsState::for_locale("en"));
        let reentrant = store.clone();
        store.subscribe(move |state| {
            if state.selected_translations == vec![20] {
                reentrant
                    .clone()
                    .dispatch(TranslationsAction::set_selected(vec![20, 85], "en"));
            }
        });

        store.dispatch(TranslationsAction::set_selected(vec![20], "en"));

        assert_eq!(
            store.select_translations().selected_translations,
            vec![20, 85]
        );
    }

    #[test]
    fn slice_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(TranslationsState::for_locale("en")).unwrap();
        assert_eq!(value["selectedTranslations"], serde_json::json!([131]));
        assert_eq!(value["isUsingDefaultTranslations"], serde_json::json!(true));
    }
}
