//! HTTP surface: locale-prefixed pages and the language switcher.

use crate::config::Config;
use crate::i18n::{default_routes, language_root, I18nRouteTable, SplitPath, UrlTranslator};
use crate::middleware::{locale_prefix_middleware, ActiveLocale, OriginalPath};
use crate::theme::{derive_theme_variants, is_light_background, ThemeVariants};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, HeaderValue, StatusCode, Uri},
    middleware,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Extension, Json, Router,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::{Arc, OnceLock};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Top-level segments served outside the language prefixes.
const UNPREFIXED_ROUTES: [&str; 2] = ["health", "i18n"];

/// A language code as accepted by the switcher: one plain path segment.
static LANGUAGE_TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn language_token_regex() -> &'static Regex {
    LANGUAGE_TOKEN_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_-]+$").expect("Invalid language token regex")
    })
}

/// Shared, read-only state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub translator: UrlTranslator,
    pub reserved: Arc<BTreeSet<String>>,
    pub theme: Arc<ThemeInfo>,
}

/// Theme colors handed to every page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeInfo {
    pub color: String,
    /// "light" when the base color needs dark text, "dark" otherwise
    pub scheme: &'static str,
    pub bg_subtle: String,
    pub border_subtle: String,
    pub text_emphasis: String,
}

impl ThemeInfo {
    pub fn from_color(color: &str) -> Result<Self> {
        let ThemeVariants {
            bg_subtle,
            border_subtle,
            text_emphasis,
        } = derive_theme_variants(color)
            .with_context(|| format!("Cannot derive theme from {}", color))?;
        let scheme = if is_light_background(color)? { "light" } else { "dark" };

        Ok(Self {
            color: color.to_string(),
            scheme,
            bg_subtle,
            border_subtle,
            text_emphasis,
        })
    }
}

impl AppState {
    /// Build the application state from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let registry = Arc::new(config.language_registry()?);
        let routes = I18nRouteTable::new(registry.clone(), default_routes());

        let mut reserved = routes.reserved_segments(
            &config.admin_url,
            config.reserved_paths.iter().map(String::as_str),
        );
        reserved.extend(UNPREFIXED_ROUTES.iter().map(|s| s.to_string()));

        info!(
            "Languages: {} (default {}), reserved paths: {:?}",
            registry.codes().collect::<Vec<_>>().join(", "),
            registry.default_code(),
            reserved
        );

        Ok(Self {
            translator: UrlTranslator::new(registry, Arc::new(routes)),
            reserved: Arc::new(reserved),
            theme: Arc::new(ThemeInfo::from_color(&config.theme_color)?),
        })
    }
}

/// Build the application router.
///
/// The locale middleware wraps the inner router so it can strip the prefix
/// before routing happens.
pub fn create_app(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .route("/i18n/switch/:lang", get(switch_language))
        .fallback(page)
        .with_state(state.clone());

    Router::new()
        .fallback_service(routes)
        .layer(middleware::from_fn_with_state(state, locale_prefix_middleware))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Alternate {
    pub code: String,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageContext {
    pub locale: String,
    pub path: String,
    pub alternates: Vec<Alternate>,
}

#[derive(Serialize)]
struct PageResponse<'a> {
    #[serde(flatten)]
    page: PageContext,
    theme: &'a ThemeInfo,
}

/// Everything not routed elsewhere is a CMS page.
///
/// Unprefixed root requests are redirected to the default language root.
async fn page(
    State(state): State<AppState>,
    locale: Option<Extension<ActiveLocale>>,
    original: Option<Extension<OriginalPath>>,
    uri: Uri,
) -> Response {
    let registry = state.translator.registry();
    let original = original
        .map(|Extension(OriginalPath(path))| path)
        .unwrap_or_else(|| uri.to_string());

    let locale = match locale {
        Some(Extension(ActiveLocale(code))) => code,
        None if uri.path() == "/" => {
            return Redirect::to(&language_root(registry.default_code())).into_response();
        }
        None => SplitPath::parse(&original)
            .first_segment()
            .filter(|code| registry.is_recognized(code))
            .unwrap_or(registry.default_code())
            .to_string(),
    };

    let alternates = state
        .translator
        .alternates(Some(&original))
        .into_iter()
        .map(|(code, name, url)| Alternate {
            code: code.to_string(),
            name: name.to_string(),
            url,
        })
        .collect();

    Json(PageResponse {
        page: PageContext {
            locale,
            path: uri.path().to_string(),
            alternates,
        },
        theme: &state.theme,
    })
    .into_response()
}

#[derive(Debug, Deserialize)]
struct SwitchParams {
    next: Option<String>,
}

/// Whether a `next` parameter is a same-site path safe to redirect to.
pub fn is_safe_redirect(next: &str) -> bool {
    next.starts_with('/')
        && !next.starts_with("//")
        && !next.contains(&['\\', ':'][..])
        && !next.chars().any(char::is_control)
}

/// Whether a switcher language is a single plain segment (`mi`, `zh-hans`).
///
/// Unrecognized codes pass; they end up at their own language root.
pub fn is_language_token(lang: &str) -> bool {
    language_token_regex().is_match(lang)
}

/// `303 See Other` to `target`, or to `fallback` when `target` is not a
/// valid header value.
fn see_other(target: &str, fallback: &str) -> Response {
    let location = HeaderValue::try_from(target).unwrap_or_else(|_| {
        warn!("Redirect target {:?} is not a valid Location, using {}", target, fallback);
        HeaderValue::try_from(fallback).unwrap_or(HeaderValue::from_static("/"))
    });
    (StatusCode::SEE_OTHER, [(LOCATION, location)]).into_response()
}

/// Redirect to the `next` page in another language.
async fn switch_language(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    Query(params): Query<SwitchParams>,
) -> Response {
    let default_root = language_root(state.translator.registry().default_code());
    if !is_language_token(&lang) {
        warn!("Rejected switcher language {:?}", lang);
        return see_other(&default_root, "/");
    }

    let next = params.next.filter(|next| is_safe_redirect(next));
    let target = state.translator.translate_url(None, &lang, next.as_deref());
    see_other(&target, &language_root(&lang))
}
