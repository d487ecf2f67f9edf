//! Helpers for prefixing links with a language.
//!
//! Only same-site paths are rewritten. Fragment-only links (`#`, `#top`) and
//! anything containing `:` (`https://…`, `mailto:…`) are returned as given.

use crate::i18n::{LanguageRegistry, SplitPath};

/// Whether a URL is a same-site path that may be localized.
pub fn is_local_url(url: &str) -> bool {
    !url.starts_with('#') && !url.contains(':')
}

/// Prefix a link with the active language.
///
/// The default language is served without a prefix.
///
/// # Example
/// ```
/// use ams_locale::i18n::localize_url;
///
/// assert_eq!(localize_url("/about/", "mi", "en"), "/mi/about/");
/// assert_eq!(localize_url("/about/", "en", "en"), "/about/");
/// assert_eq!(localize_url("https://example.com", "mi", "en"), "https://example.com");
/// ```
pub fn localize_url(url: &str, active_lang: &str, default_lang: &str) -> String {
    if !is_local_url(url) {
        return url.to_string();
    }

    let suffix = url.trim_start_matches('/');
    if active_lang == default_lang {
        format!("/{}", suffix)
    } else {
        format!("/{}/{}", active_lang, suffix)
    }
}

/// Move a link into another language.
///
/// A recognized language prefix is removed first; the new prefix is added
/// unless `lang` is the default language. Query and fragment are kept.
pub fn change_url_locale(url: &str, lang: &str, registry: &LanguageRegistry) -> String {
    if !is_local_url(url) {
        return url.to_string();
    }

    let split = SplitPath::parse(url);
    let rest = match split.first_segment() {
        Some(prefix) if registry.is_recognized(prefix) => split.after_first_segment(),
        _ => split.path.trim_start_matches('/'),
    };

    let path = if lang == registry.default_code() {
        format!("/{}", rest)
    } else {
        format!("/{}/{}", lang, rest)
    };
    split.with_path(path).to_string()
}
