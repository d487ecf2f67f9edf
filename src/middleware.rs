//! Path-based locale detection.
//!
//! Requests arrive as `/{locale}/…`. The middleware records the locale,
//! remembers the original path for language switchers, and strips the prefix
//! so downstream routing sees `/…`. Reserved application segments are never
//! taken for locales, and `/{locale}/{reserved}/…` is left to the
//! application routes untouched.

use crate::i18n::{LanguageRegistry, SplitPath};
use crate::server::AppState;
use axum::{
    extract::{Request, State},
    http::{uri::PathAndQuery, Uri},
    middleware::Next,
    response::Response,
};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Locale selected by the request's path prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLocale(pub String);

/// Path and query of the request before the locale prefix was stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalPath(pub String);

/// Find the locale a path is served under, if its prefix should be stripped.
pub fn detect_locale<'a>(
    path: &'a str,
    registry: &LanguageRegistry,
    reserved: &BTreeSet<String>,
) -> Option<&'a str> {
    let split = SplitPath::parse(path);
    let first = split.first_segment()?;
    if reserved.contains(first) || !registry.is_recognized(first) {
        return None;
    }
    if split
        .second_segment()
        .is_some_and(|second| reserved.contains(second))
    {
        return None;
    }

    // Borrow from `path`, not from `split`.
    let start = path.find(first)?;
    Some(&path[start..start + first.len()])
}

/// Remove a leading `/{prefix}`, keeping a leading slash.
///
/// `/en/about/` becomes `/about/`; `/en` becomes `/`.
pub fn strip_locale_prefix(path: &str, prefix: &str) -> String {
    match path
        .strip_prefix('/')
        .and_then(|rest| rest.strip_prefix(prefix))
    {
        Some(rest) if rest.starts_with('/') => rest.to_string(),
        Some(rest) => format!("/{}", rest),
        None => path.to_string(),
    }
}

fn with_path(uri: &Uri, path: &str) -> Option<Uri> {
    let path_and_query = match uri.query() {
        Some(query) => format!("{}?{}", path, query),
        None => path.to_string(),
    };
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query).ok()?);
    Uri::from_parts(parts).ok()
}

pub async fn locale_prefix_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let original = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());
    request
        .extensions_mut()
        .insert(OriginalPath(original.clone()));

    let path = request.uri().path().to_string();
    let registry = state.translator.registry();
    if let Some(locale) = detect_locale(&path, registry, &state.reserved) {
        let stripped = strip_locale_prefix(&path, locale);
        match with_path(request.uri(), &stripped) {
            Some(uri) => {
                debug!("Locale {} for {} -> {}", locale, original, stripped);
                *request.uri_mut() = uri;
                request
                    .extensions_mut()
                    .insert(ActiveLocale(locale.to_string()));
            }
            None => warn!("Could not rewrite {} without its locale prefix", original),
        }
    }

    next.run(request).await
}
