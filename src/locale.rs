//! Locale helpers: supported locales, their language names, defaults and
//! locale-aware string ordering.

use std::cmp::Ordering;
use unic_langid::LanguageIdentifier;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

pub const FALLBACK_LOCALE: &str = "en";

/// Locale code and the language name the API uses for it.
const SUPPORTED_LOCALES: &[(&str, &str)] = &[
    ("en", "English"),
    ("ar", "Arabic"),
    ("bn", "Bengali"),
    ("fa", "Persian"),
    ("fr", "French"),
    ("id", "Indonesian"),
    ("it", "Italian"),
    ("nl", "Dutch"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("sq", "Albanian"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("ur", "Urdu"),
    ("zh", "Chinese"),
    ("ms", "Malay"),
    ("es", "Spanish"),
    ("sw", "Swahili"),
    ("vi", "Vietnamese"),
];

const DEFAULT_TRANSLATIONS: &[(&str, u32)] = &[
    ("en", 131),
    ("bn", 161),
    ("es", 83),
    ("fr", 31),
    ("id", 33),
    ("ru", 79),
    ("tr", 77),
    ("ur", 97),
];

/// Reduce any BCP 47 tag (`en-US`, `pt_BR`) to a supported locale code.
pub fn normalize_locale(raw: &str) -> String {
    let tag = raw.trim().replace('_', "-");
    let language = tag
        .parse::<LanguageIdentifier>()
        .map(|id| id.language.as_str().to_ascii_lowercase())
        .unwrap_or_default();

    if locale_name(&language).is_some() {
        language
    } else {
        FALLBACK_LOCALE.to_string()
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn system_locale() -> String {
    sys_locale::get_locale()
        .map(|raw| normalize_locale(&raw))
        .unwrap_or_else(|| FALLBACK_LOCALE.to_string())
}

#[cfg(target_arch = "wasm32")]
pub fn system_locale() -> String {
    web_sys::window()
        .and_then(|win| win.navigator().language())
        .map(|raw| normalize_locale(&raw))
        .unwrap_or_else(|| FALLBACK_LOCALE.to_string())
}

pub fn locale_name(locale: &str) -> Option<&'static str> {
    SUPPORTED_LOCALES
        .iter()
        .find(|(code, _)| *code == locale)
        .map(|(_, name)| *name)
}

pub fn supported_locales() -> impl Iterator<Item = (&'static str, &'static str)> {
    SUPPORTED_LOCALES.iter().copied()
}

/// Translations selected for a user who never changed the setting.
pub fn default_translations(locale: &str) -> Vec<u32> {
    let id = DEFAULT_TRANSLATIONS
        .iter()
        .find(|(code, _)| *code == locale)
        .or_else(|| DEFAULT_TRANSLATIONS.first())
        .map(|(_, id)| *id);
    id.into_iter().collect()
}

/// Letters with no canonical decomposition, folded to their base spelling.
fn fold_undecomposable(ch: char) -> Option<&'static str> {
    Some(match ch {
        'ł' => "l",
        'đ' | 'ð' => "d",
        'ø' => "o",
        'ı' => "i",
        'ħ' => "h",
        'ŧ' => "t",
        'æ' => "ae",
        'œ' => "oe",
        'ß' => "ss",
        'þ' => "th",
        _ => return None,
    })
}

/// Primary-strength key: case and diacritics folded away.
fn collation_key(text: &str) -> String {
    let mut key = String::with_capacity(text.len());
    for ch in text.nfd().filter(|ch| !is_combining_mark(*ch)) {
        for lower in ch.to_lowercase().filter(|ch| !is_combining_mark(*ch)) {
            match fold_undecomposable(lower) {
                Some(folded) => key.push_str(folded),
                None => key.push(lower),
            }
        }
    }
    key
}

/// Case- and accent-insensitive ordering; ties fall back to the raw strings.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Whether two language names denote the same language.
pub fn same_language(a: &str, b: &str) -> bool {
    collation_key(a.trim()) == collation_key(b.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("en-US", "en")]
    #[case("pt_BR", "pt")]
    #[case("AR", "ar")]
    #[case("xx", "en")]
    #[case("", "en")]
    fn normalizes_locale_tags(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_locale(raw), expected);
    }

    #[test]
    fn names_supported_locales() {
        assert_eq!(locale_name("en"), Some("English"));
        assert_eq!(locale_name("ur"), Some("Urdu"));
        assert_eq!(locale_name("klingon"), None);
        assert!(supported_locales().any(|(code, _)| code == "fr"));
    }

    #[test]
    fn unknown_locales_get_english_defaults() {
        assert_eq!(default_translations("fr"), vec![31]);
        assert_eq!(default_translations("zh"), vec![131]);
    }

    #[rstest]
    #[case("abc", "ABD", Ordering::Less)]
    #[case("Émile", "Eric", Ordering::Less)]
    #[case("zeta", "Ångström", Ordering::Greater)]
    #[case("Straße", "strasse", Ordering::Less)]
    #[case("Diyanet İşleri", "Diyanet Ismail", Ordering::Less)]
    #[case("Łu", "Lz", Ordering::Less)]
    #[case("Đa", "Db", Ordering::Less)]
    #[case("Ősz", "Ot", Ordering::Less)]
    #[case("Œuvre", "Oz", Ordering::Less)]
    #[case("Ørsted", "Oz", Ordering::Less)]
    fn compares_like_a_collator(#[case] a: &str, #[case] b: &str, #[case] expected: Ordering) {
        assert_eq!(locale_compare(a, b), expected);
    }

    #[test]
    fn language_match_ignores_case() {
        assert!(same_language("english", "English"));
        assert!(!same_language("english", "French"));
        assert!(same_language("Türkçe", "turkce"));
    }
}
