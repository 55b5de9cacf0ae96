use crate::api::AvailableTranslation;
use crate::components::{DrawerController, Icon, TranslationCatalog};
use crate::query_param::effective_translations;
use crate::translations::TranslationsState;
use dioxus::prelude::*;

/// Reader page. The `translations` query parameter, when it names any ids,
/// takes precedence over the stored selection.
#[component]
pub fn Reader(translations: String) -> Element {
    let state = use_context::<Signal<TranslationsState>>();
    let catalog = use_context::<TranslationCatalog>().0;
    let mut drawer = use_context::<DrawerController>();

    let active = effective_translations(&translations, &state().selected_translations);
    let rows = active_rows(&catalog().unwrap_or_default(), &active);

    rsx! {
        section { class: "reader",
            div { class: "reader-header",
                h1 { "Active translations" }
                button {
                    class: "text-button",
                    onclick: move |_| drawer.open(),
                    Icon { name: "settings".to_string(), class: "icon-sm".to_string() }
                    "Choose translations"
                }
            }
            if rows.is_empty() {
                p { class: "muted", "No translations selected." }
            } else {
                ul { class: "reader-translations",
                    for (id , label) in rows {
                        li { key: "{id}", class: "reader-translation",
                            span { class: "reader-translation-id", "#{id}" }
                            span { "{label}" }
                        }
                    }
                }
            }
        }
    }
}

fn active_rows(catalog: &[AvailableTranslation], active: &[u32]) -> Vec<(u32, String)> {
    active
        .iter()
        .map(|id| (*id, translation_label(catalog, *id)))
        .collect()
}

fn translation_label(catalog: &[AvailableTranslation], id: u32) -> String {
    catalog
        .iter()
        .find(|translation| translation.id == id)
        .map(|translation| translation.display_name().to_string())
        .unwrap_or_else(|| format!("Translation {id}"))
}
