//! Language registry: the set of languages the site recognizes.
//!
//! The registry is built once from configuration and shared read-only
//! (typically behind an `Arc`) by everything that needs to know whether a
//! path segment is a language code.

use anyhow::{bail, Result};
use std::collections::HashSet;

/// Configuration for a recognized language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageConfig {
    /// Language code as it appears in URLs (e.g., "en", "mi")
    pub code: String,

    /// Display name of the language (e.g., "English", "Te Reo Māori")
    pub name: String,
}

impl LanguageConfig {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// Immutable registry of recognized languages.
///
/// Languages keep their configured order, which is the order alternates are
/// listed in language switchers.
#[derive(Debug, Clone)]
pub struct LanguageRegistry {
    languages: Vec<LanguageConfig>,
    codes: HashSet<String>,
    default_code: String,
}

impl LanguageRegistry {
    /// Build a registry from an ordered list of languages and a default code.
    ///
    /// # Errors
    /// Fails if the list is empty, a code is empty or duplicated, or the
    /// default code is not one of the configured languages.
    pub fn new(languages: Vec<LanguageConfig>, default_code: &str) -> Result<Self> {
        if languages.is_empty() {
            bail!("At least one language must be configured");
        }

        let mut codes = HashSet::with_capacity(languages.len());
        for lang in &languages {
            if lang.code.is_empty() {
                bail!("Language code must not be empty (name: '{}')", lang.name);
            }
            if !codes.insert(lang.code.clone()) {
                bail!("Duplicate language code: '{}'", lang.code);
            }
        }

        if !codes.contains(default_code) {
            bail!(
                "Default language '{}' is not one of the configured languages",
                default_code
            );
        }

        Ok(Self {
            languages,
            codes,
            default_code: default_code.to_string(),
        })
    }

    /// Parse a registry from a `code:Name,code:Name` list.
    ///
    /// The name part is optional; `"en,mi"` names each language after its code.
    ///
    /// # Example
    /// ```
    /// use ams_locale::i18n::LanguageRegistry;
    ///
    /// let registry = LanguageRegistry::parse("en:English,mi:Te Reo Māori", "en").unwrap();
    /// assert!(registry.is_recognized("mi"));
    /// assert_eq!(registry.get_by_code("mi").unwrap().name, "Te Reo Māori");
    /// ```
    pub fn parse(list: &str, default_code: &str) -> Result<Self> {
        let languages = list
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.split_once(':') {
                Some((code, name)) => LanguageConfig::new(code.trim(), name.trim()),
                None => LanguageConfig::new(entry, entry),
            })
            .collect();

        Self::new(languages, default_code)
    }

    /// Check whether a code is one of the recognized languages.
    pub fn is_recognized(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    /// Get a language configuration by its code.
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// All recognized languages in configured order.
    pub fn list(&self) -> &[LanguageConfig] {
        &self.languages
    }

    /// All recognized codes in configured order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.languages.iter().map(|lang| lang.code.as_str())
    }

    /// The default language, used for unprefixed URLs and root redirects.
    pub fn default_language(&self) -> &LanguageConfig {
        self.get_by_code(&self.default_code)
            .unwrap_or(&self.languages[0])
    }

    pub fn default_code(&self) -> &str {
        &self.default_code
    }
}

#[cfg(test)]
pub(crate) fn test_registry() -> LanguageRegistry {
    LanguageRegistry::new(
        vec![
            LanguageConfig::new("en", "English"),
            LanguageConfig::new("mi", "Te Reo Māori"),
        ],
        "en",
    )
    .expect("test registry is valid")
}
