//! Route tables that know how to translate a path into another language.
//!
//! Routes are registered without their language prefix (`"users/"`,
//! `"articles/<slug>/"`). Every route is served under each recognized
//! language prefix, and a route may use a different pattern per language
//! (`"about/"` in English, `"mo-matou/"` in Māori). Translating a path means
//! resolving it against the source language's patterns and reversing the
//! matched route in the target language.

use crate::i18n::{LanguageRegistry, SplitPath};
use std::collections::BTreeSet;
use std::sync::Arc;

/// A source of dedicated route translations.
///
/// Implementations return the input unchanged when they have no translation
/// for it.
pub trait RouteTranslator: Send + Sync {
    fn translate(&self, path: &str, lang: &str) -> String;
}

/// Route translator that knows no routes.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRoutes;

impl RouteTranslator for IdentityRoutes {
    fn translate(&self, path: &str, _lang: &str) -> String {
        path.to_string()
    }
}

/// A named route with an optional per-language pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    pattern: String,
    variants: Vec<(String, String)>,
}

impl Route {
    /// Create a route served with the same pattern in every language.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
            variants: Vec::new(),
        }
    }

    /// Use a different pattern for one language.
    pub fn translated(mut self, lang: impl Into<String>, pattern: impl Into<String>) -> Self {
        let lang = lang.into();
        let pattern = pattern.into();
        match self.variants.iter_mut().find(|(code, _)| *code == lang) {
            Some(existing) => existing.1 = pattern,
            None => self.variants.push((lang, pattern)),
        }
        self
    }

    /// The pattern this route is served under in `lang`.
    pub fn pattern_for(&self, lang: &str) -> &str {
        self.variants
            .iter()
            .find(|(code, _)| code == lang)
            .map(|(_, pattern)| pattern.as_str())
            .unwrap_or(&self.pattern)
    }

    fn all_patterns(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.pattern.as_str())
            .chain(self.variants.iter().map(|(_, pattern)| pattern.as_str()))
    }
}

/// Match a prefix-less path against a pattern, returning captured parameters.
///
/// `<name>` segments match exactly one non-empty segment.
fn match_pattern<'r, 'p>(pattern: &'r str, path: &'p str) -> Option<Vec<(&'r str, &'p str)>> {
    let pattern_segments: Vec<&str> = pattern.split('/').collect();
    let path_segments: Vec<&str> = path.split('/').collect();
    if pattern_segments.len() != path_segments.len() {
        return None;
    }

    let mut captures = Vec::new();
    for (expected, actual) in pattern_segments.into_iter().zip(path_segments) {
        match param_name(expected) {
            Some(name) if !actual.is_empty() => captures.push((name, actual)),
            Some(_) => return None,
            None if expected == actual => {}
            None => return None,
        }
    }
    Some(captures)
}

/// Fill a pattern's parameters from captures. `None` if one is missing.
fn reverse_pattern(pattern: &str, captures: &[(&str, &str)]) -> Option<String> {
    let segments = pattern
        .split('/')
        .map(|segment| match param_name(segment) {
            Some(name) => captures
                .iter()
                .find(|(captured, _)| *captured == name)
                .map(|(_, value)| *value),
            None => Some(segment),
        })
        .collect::<Option<Vec<_>>>()?;
    Some(segments.join("/"))
}

fn param_name(segment: &str) -> Option<&str> {
    segment
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .filter(|name| !name.is_empty())
}

/// Language-prefixed route table.
///
/// Only paths whose first segment is a recognized language are resolved, and
/// only recognized target languages are reversed into.
pub struct I18nRouteTable {
    registry: Arc<LanguageRegistry>,
    routes: Vec<Route>,
}

impl I18nRouteTable {
    pub fn new(registry: Arc<LanguageRegistry>, routes: Vec<Route>) -> Self {
        Self { registry, routes }
    }

    /// Find the route a language-prefixed path resolves to, with the
    /// parameters captured from the path.
    ///
    /// The remainder is matched against each route's pattern for the path's
    /// own language. First match wins.
    fn resolve<'s, 'p>(
        &'s self,
        split: &'p SplitPath,
    ) -> Option<(&'s Route, Vec<(&'s str, &'p str)>)> {
        let source = split.first_segment()?;
        if !self.registry.is_recognized(source) {
            return None;
        }
        let remainder = split.after_first_segment();
        self.routes.iter().find_map(|route| {
            match_pattern(route.pattern_for(source), remainder).map(|captures| (route, captures))
        })
    }

    /// Top-level segments owned by application routes.
    ///
    /// These must never be taken for language codes or CMS slugs. The admin
    /// URL and any extra configured segments are included.
    pub fn reserved_segments<'a>(
        &self,
        admin_url: &str,
        extra: impl IntoIterator<Item = &'a str>,
    ) -> BTreeSet<String> {
        let mut reserved = BTreeSet::new();

        for route in &self.routes {
            for pattern in route.all_patterns() {
                if let Some(first) = pattern.split('/').next() {
                    if !first.is_empty() && param_name(first).is_none() {
                        reserved.insert(first.to_string());
                    }
                }
            }
        }

        if let Some(admin) = admin_url.trim_matches('/').split('/').next() {
            if !admin.is_empty() {
                reserved.insert(admin.to_string());
            }
        }

        reserved.extend(
            extra
                .into_iter()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
        );

        reserved
    }
}

impl RouteTranslator for I18nRouteTable {
    fn translate(&self, path: &str, lang: &str) -> String {
        if !self.registry.is_recognized(lang) {
            return path.to_string();
        }

        let split = SplitPath::parse(path);
        let Some((route, captures)) = self.resolve(&split) else {
            return path.to_string();
        };

        match reverse_pattern(route.pattern_for(lang), &captures) {
            Some(reversed) => split.with_path(format!("/{}/{}", lang, reversed)).to_string(),
            None => path.to_string(),
        }
    }
}

/// The site's language-prefixed application routes.
///
/// CMS pages are served under the same prefixes but resolved by the page
/// tree, not this table.
pub fn default_routes() -> Vec<Route> {
    vec![
        Route::new("memberships", "users/memberships/"),
        Route::new("accounts", "accounts/"),
        Route::new("users", "users/"),
        Route::new("users:detail", "users/<username>/"),
        Route::new("home", ""),
    ]
}
