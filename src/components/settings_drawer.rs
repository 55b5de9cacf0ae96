use crate::cache_service::{remove_by_prefix, stats as current_cache_stats};
use crate::components::{CatalogRefresh, Icon, TranslationSelectionBody};
use crate::db::{save_settings, ReaderSettings};
use crate::locale::supported_locales;
use crate::translations::TranslationsState;
use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq)]
pub struct DrawerController {
    open: Signal<bool>,
}

impl DrawerController {
    pub fn new(open: Signal<bool>) -> Self {
        Self { open }
    }

    pub fn open(&mut self) {
        self.open.set(true);
    }

    pub fn close(&mut self) {
        self.open.set(false);
    }

    pub fn is_open(&self) -> bool {
        (self.open)()
    }
}

#[component]
pub fn SettingsDrawer() -> Element {
    let mut drawer = use_context::<DrawerController>();
    let mut settings = use_context::<Signal<ReaderSettings>>();
    let mut translations = use_context::<Signal<TranslationsState>>();
    let mut catalog_generation = use_context::<CatalogRefresh>().0;

    // Closing unmounts the body, which drops its search query.
    if !drawer.is_open() {
        return rsx! {};
    }

    let current_locale = settings().locale;
    let cache_stats = current_cache_stats();
    let cache_kb = cache_stats.total_size_bytes / 1024;

    let on_locale_change = move |e: Event<FormData>| {
        let locale = e.value();
        let mut next = settings();
        if next.locale == locale {
            return;
        }
        next.locale = locale.clone();

        // Users still on defaults follow the new locale's defaults.
        if translations.peek().is_using_default_translations {
            let defaults = TranslationsState::for_locale(&locale);
            next.selected_translations = defaults.selected_translations.clone();
            translations.set(defaults);
        }

        settings.set(next.clone());
        spawn(async move {
            if let Err(err) = save_settings(next).await {
                tracing::warn!(%err, "failed to save locale");
            }
        });
    };

    let on_refresh_catalog = move |_| {
        let removed = remove_by_prefix("api:");
        tracing::debug!(removed, "cleared cached catalog responses");
        catalog_generation.with_mut(|value| *value = value.saturating_add(1));
    };

    rsx! {
        div { class: "drawer-backdrop", onclick: move |_| drawer.close() }
        aside { class: "drawer", role: "dialog", aria_label: "Settings",
            header { class: "drawer-header",
                h2 { "Settings" }
                button {
                    class: "icon-button",
                    aria_label: "Close settings",
                    onclick: move |_| drawer.close(),
                    Icon { name: "x".to_string(), class: "icon".to_string() }
                }
            }

            section { class: "drawer-section",
                h3 { class: "section-title",
                    Icon { name: "globe".to_string(), class: "icon-sm".to_string() }
                    "Language"
                }
                select {
                    class: "select",
                    value: "{current_locale}",
                    onchange: on_locale_change,
                    for (code , name) in supported_locales() {
                        option {
                            key: "{code}",
                            value: "{code}",
                            selected: code == current_locale,
                            "{name}"
                        }
                    }
                }
            }

            section { class: "drawer-section",
                h3 { class: "section-title", "Translations" }
                TranslationSelectionBody {}
            }

            footer { class: "drawer-footer",
                span { class: "muted", "{cache_stats.entry_count} cached responses, {cache_kb} KB" }
                button { class: "text-button", onclick: on_refresh_catalog,
                    Icon { name: "refresh".to_string(), class: "icon-sm".to_string() }
                    "Refresh catalog"
                }
            }
        }
    }
}
