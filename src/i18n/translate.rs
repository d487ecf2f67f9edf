//! Locale URL translation.
//!
//! `UrlTranslator::translate_url` answers "what is this page called in
//! language X?" for language switchers. A dedicated route translation always
//! wins; otherwise the language prefix is swapped, and when even that is not
//! possible the target language's root is returned.

use crate::i18n::{LanguageRegistry, RouteTranslator, SplitPath};
use std::sync::Arc;
use tracing::debug;

/// Translates same-origin paths between recognized languages.
///
/// Cheap to share between request handlers: it only holds read-only
/// configuration.
#[derive(Clone)]
pub struct UrlTranslator {
    registry: Arc<LanguageRegistry>,
    routes: Arc<dyn RouteTranslator>,
}

impl UrlTranslator {
    pub fn new(registry: Arc<LanguageRegistry>, routes: Arc<dyn RouteTranslator>) -> Self {
        Self { registry, routes }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Get the equivalent of a path in `target_lang`.
    ///
    /// # Arguments
    /// * `current_path` - Full path of the current request including its
    ///   query string, if there is a request
    /// * `target_lang` - Language to translate into; need not be recognized
    /// * `path` - Explicit path to translate instead of the current one
    ///
    /// # Returns
    /// A path starting with `/`. Never fails: anything that cannot be
    /// translated yields the language root `/{target_lang}/`.
    pub fn translate_url(
        &self,
        current_path: Option<&str>,
        target_lang: &str,
        path: Option<&str>,
    ) -> String {
        let Some(path) = path.or(current_path) else {
            return language_root(target_lang);
        };

        let translated = self.routes.translate(path, target_lang);
        if translated != path {
            return translated;
        }

        if !self.registry.is_recognized(target_lang) {
            debug!(
                "No route translation for {} and '{}' is not a recognized language",
                path, target_lang
            );
            return language_root(target_lang);
        }

        let split = SplitPath::parse(path);
        match split.first_segment() {
            Some(prefix) if self.registry.is_recognized(prefix) => {
                split.with_first_segment(target_lang).to_string()
            }
            _ => {
                debug!(
                    "No language prefix on {}, falling back to /{}/",
                    path, target_lang
                );
                language_root(target_lang)
            }
        }
    }

    /// Translate the current path into every recognized language.
    ///
    /// Returns `(code, name, url)` in configured order.
    pub fn alternates(&self, current_path: Option<&str>) -> Vec<(&str, &str, String)> {
        self.registry
            .list()
            .iter()
            .map(|lang| {
                (
                    lang.code.as_str(),
                    lang.name.as_str(),
                    self.translate_url(current_path, &lang.code, None),
                )
            })
            .collect()
    }
}

/// The language-root fallback path.
pub fn language_root(lang: &str) -> String {
    format!("/{}/", lang)
}
