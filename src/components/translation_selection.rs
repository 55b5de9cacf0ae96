use crate::analytics::{EmptySearchTracker, EventLogger, TracingEventLogger};
use crate::api::PreferencesClient;
use crate::components::{Icon, RouterQueryWriter, TranslationCatalog};
use crate::db::ReaderSettings;
use crate::locale::locale_name;
use crate::translations::{
    CatalogView, PersistOutcome, PreferencePersister, TranslationGroup, TranslationSelection,
    TranslationsAction, TranslationsState,
};
use dioxus::prelude::*;
use dioxus::router::Navigator;
use std::cell::RefCell;
use std::rc::Rc;

const EMPTY_SEARCH_SOURCE: &str = "settings_drawer_translation";

type Selection = TranslationSelection<
    Signal<TranslationsState>,
    PreferencesClient,
    RouterQueryWriter,
    TracingEventLogger,
>;

#[derive(Debug, Clone, PartialEq)]
enum SaveNotice {
    Saved { undo: TranslationsAction },
    Failed(String),
}

impl SaveNotice {
    fn from_outcome(outcome: PersistOutcome) -> Option<Self> {
        match outcome {
            PersistOutcome::Applied => None,
            PersistOutcome::Persisted { undo } => Some(Self::Saved { undo }),
            PersistOutcome::Failed { error } => Some(Self::Failed(error.to_string())),
        }
    }
}

fn persister_for(settings: &ReaderSettings) -> PreferencePersister<PreferencesClient> {
    match settings.auth_token.as_deref() {
        Some(token) if settings.is_signed_in() => PreferencePersister::signed_in(
            PreferencesClient::new(settings.auth_base_url.clone(), token),
        ),
        _ => PreferencePersister::signed_out(),
    }
}

fn selection_for(
    translations: Signal<TranslationsState>,
    settings: &ReaderSettings,
    navigator: Navigator,
) -> Selection {
    TranslationSelection::new(
        translations,
        persister_for(settings),
        RouterQueryWriter::new(navigator),
        TracingEventLogger,
        settings.locale.clone(),
    )
}

#[cfg(not(target_arch = "wasm32"))]
async fn notice_delay() {
    tokio::time::sleep(std::time::Duration::from_secs(6)).await;
}

#[cfg(target_arch = "wasm32")]
async fn notice_delay() {
    gloo_timers::future::TimeoutFuture::new(6000).await;
}

/// Key of a rendered group. A new epoch remounts its checkboxes so they
/// match the store again after a change was rejected.
fn group_key(language: &str, epoch: u32) -> String {
    format!("{language}#{epoch}")
}

fn settle(
    notice: Signal<Option<SaveNotice>>,
    mut checkbox_epoch: Signal<u32>,
    outcome: PersistOutcome,
) {
    if outcome.left_store_unchanged() {
        checkbox_epoch.with_mut(|epoch| *epoch = epoch.wrapping_add(1));
    }
    show_notice(notice, outcome);
}

fn show_notice(mut notice: Signal<Option<SaveNotice>>, outcome: PersistOutcome) {
    let next = SaveNotice::from_outcome(outcome);
    let shown = next.clone();
    notice.set(next);
    if shown.is_none() {
        return;
    }
    spawn(async move {
        notice_delay().await;
        if *notice.peek() == shown {
            notice.set(None);
        }
    });
}

#[component]
pub fn TranslationSelectionBody() -> Element {
    let settings = use_context::<Signal<ReaderSettings>>();
    let translations = use_context::<Signal<TranslationsState>>();
    let catalog = use_context::<TranslationCatalog>().0;
    let navigator = navigator();

    let mut search_query = use_signal(String::new);
    let notice = use_signal(|| None::<SaveNotice>);
    let checkbox_epoch = use_signal(|| 0u32);
    let locale = use_memo(move || settings().locale);

    let view = use_memo(move || {
        let catalog = catalog()?;
        let locale = locale();
        let active_language = locale_name(&locale).unwrap_or_default();
        Some(CatalogView::build(&catalog, &search_query(), active_language))
    });

    // One analytics event per query that matches nothing.
    let empty_tracker = use_hook(|| Rc::new(RefCell::new(EmptySearchTracker::default())));
    use_effect(move || {
        let Some(view) = view() else {
            return;
        };
        if empty_tracker
            .borrow_mut()
            .observe(&view.query, view.is_empty())
        {
            TracingEventLogger.empty_search_results(view.query.trim(), EMPTY_SEARCH_SOURCE);
        }
    });

    let on_toggle = move |(translation_id, is_checked): (u32, bool)| {
        let mut selection = selection_for(translations, &settings.peek(), navigator);
        spawn(async move {
            let outcome = selection
                .on_translations_change(translation_id, is_checked)
                .await;
            settle(notice, checkbox_epoch, outcome);
        });
    };

    let on_undo = move |undo: TranslationsAction| {
        let mut selection = selection_for(translations, &settings.peek(), navigator);
        spawn(async move {
            let outcome = selection.undo(undo).await;
            settle(notice, checkbox_epoch, outcome);
        });
    };

    let selected = translations().selected_translations;
    let epoch = checkbox_epoch();

    rsx! {
        div { class: "translation-picker",
            div { class: "search-input",
                Icon { name: "search".to_string(), class: "search-icon".to_string() }
                input {
                    id: "translations-search",
                    r#type: "search",
                    placeholder: "Search translations",
                    value: search_query,
                    oninput: move |e| search_query.set(e.value()),
                }
            }

            {match notice() {
                Some(SaveNotice::Saved { undo }) => rsx! {
                    div { class: "notice",
                        span { "Translations saved to your account." }
                        button {
                            class: "text-button",
                            onclick: move |_| on_undo(undo.clone()),
                            "Undo"
                        }
                    }
                },
                Some(SaveNotice::Failed(message)) => rsx! {
                    div { class: "notice notice-error", "Could not save translations: {message}" }
                },
                None => rsx! {},
            }}

            {match view() {
                None => rsx! {
                    div { class: "loading",
                        Icon { name: "loader".to_string(), class: "icon".to_string() }
                    }
                },
                Some(view) => rsx! {
                    for group in view.groups {
                        TranslationGroupList {
                            key: "{group_key(&group.language, epoch)}",
                            group: group.clone(),
                            selected: selected.clone(),
                            on_toggle,
                        }
                    }
                },
            }}
        }
    }
}

#[component]
fn TranslationGroupList(
    group: TranslationGroup,
    selected: Vec<u32>,
    on_toggle: EventHandler<(u32, bool)>,
) -> Element {
    let rows: Vec<(u32, String, bool)> = group
        .translations
        .iter()
        .map(|translation| {
            (
                translation.id,
                translation.display_name().to_string(),
                selected.contains(&translation.id),
            )
        })
        .collect();

    rsx! {
        div { class: "translation-group",
            div { class: "translation-language", "{group.language}" }
            for (id , name , is_checked) in rows {
                label { key: "{id}", class: "translation-item", r#for: "translation-{id}",
                    input {
                        id: "translation-{id}",
                        r#type: "checkbox",
                        checked: is_checked,
                        onchange: move |e: Event<FormData>| on_toggle.call((id, e.checked())),
                    }
                    span { "{name}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, PreferenceError};

    #[test]
    fn rejected_change_gets_a_fresh_group_key() {
        let failed = PersistOutcome::Failed {
            error: PreferenceError::Api(ApiError::Status {
                status: 500,
                url: "https://quran.com/api/auth/preferences".to_string(),
            }),
        };
        assert!(failed.left_store_unchanged());
        assert_ne!(group_key("English", 0), group_key("English", 1));
        assert!(matches!(
            SaveNotice::from_outcome(failed),
            Some(SaveNotice::Failed(_))
        ));
    }

    #[test]
    fn applied_change_keeps_group_key() {
        assert!(!PersistOutcome::Applied.left_store_unchanged());
        assert_eq!(SaveNotice::from_outcome(PersistOutcome::Applied), None);
    }
}
