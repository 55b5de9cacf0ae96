use crate::api::{AvailableTranslation, QuranClient, TranslationSource};
use crate::cache_service::apply_settings as apply_cache_settings;
use crate::components::{AppView, DrawerController, Icon, SettingsDrawer};
use crate::db::{initialize_database, load_settings, save_settings, ReaderSettings};
use crate::translations::TranslationsState;
use dioxus::prelude::*;

/// Bumped to make catalog resources fetch again.
#[derive(Clone, Copy, PartialEq)]
pub struct CatalogRefresh(pub Signal<u64>);

/// Translation catalog for the active locale, shared by the drawer and the
/// reader. `None` while loading.
#[derive(Clone, Copy, PartialEq)]
pub struct TranslationCatalog(pub Resource<Vec<AvailableTranslation>>);

async fn load_catalog(client: QuranClient, locale: String) -> Vec<AvailableTranslation> {
    match client.fetch_translations(&locale).await {
        Ok(response) => response.translations,
        Err(err) => {
            tracing::warn!(%err, %locale, "failed to load translations");
            Vec::new()
        }
    }
}

#[component]
pub fn AppShell() -> Element {
    let mut settings = use_signal(ReaderSettings::default);
    let mut translations =
        use_signal(|| TranslationsState::for_locale(&settings.peek().locale));
    let drawer_open = use_signal(|| false);
    let catalog_generation = use_signal(|| 0u64);
    let mut settings_loaded = use_signal(|| false);

    use_context_provider(|| settings);
    use_context_provider(|| translations);
    let mut drawer = use_context_provider(|| DrawerController::new(drawer_open));
    use_context_provider(|| CatalogRefresh(catalog_generation));

    let locale = use_memo(move || settings().locale);
    let api_base_url = use_memo(move || settings().api_base_url);
    let catalog = use_resource(move || {
        let client = QuranClient::new(api_base_url());
        let locale = locale();
        let _generation = catalog_generation();
        load_catalog(client, locale)
    });
    use_context_provider(|| TranslationCatalog(catalog));

    // Load saved settings on mount
    use_effect(move || {
        spawn(async move {
            if let Err(err) = initialize_database().await {
                tracing::warn!(%err, "failed to initialize settings storage");
                return;
            }

            match load_settings().await {
                Ok(loaded) => {
                    apply_cache_settings(&loaded);
                    translations.set(TranslationsState::from_selection(
                        loaded.selected_translations.clone(),
                        &loaded.locale,
                    ));
                    settings.set(loaded);
                }
                Err(err) => tracing::warn!(%err, "failed to load settings, using defaults"),
            }
            settings_loaded.set(true);
        });
    });

    // Mirror the selection into local settings
    use_effect(move || {
        let state = translations();
        if !settings_loaded() {
            return;
        }

        let mut next = settings.peek().clone();
        if next.selected_translations == state.selected_translations {
            return;
        }
        next.selected_translations = state.selected_translations;
        settings.set(next.clone());

        spawn(async move {
            if let Err(err) = save_settings(next).await {
                tracing::warn!(%err, "failed to save settings");
            }
        });
    });

    rsx! {
        div { class: "app-shell",
            header { class: "app-header",
                div { class: "brand",
                    Icon { name: "book".to_string(), class: "icon".to_string() }
                    span { "Quran Reader" }
                }
                button {
                    class: "icon-button",
                    aria_label: "Open settings",
                    onclick: move |_| drawer.open(),
                    Icon { name: "settings".to_string(), class: "icon".to_string() }
                }
            }
            main { class: "app-main", Outlet::<AppView> {} }
            SettingsDrawer {}
        }
    }
}
