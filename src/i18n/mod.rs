//! Internationalization (i18n) module for language-prefixed URLs.
//!
//! Every page of the site lives under a language prefix (`/en/…`, `/mi/…`).
//! This module knows which languages exist and how to move a URL from one
//! language to another.
//!
//! # Architecture
//!
//! - `registry`: The recognized languages, built once from configuration
//! - `path`: Structural path/query/fragment splitting
//! - `routes`: Route tables providing dedicated per-language routes
//! - `translate`: `translate_url`, the language switcher's URL resolver
//! - `localize`: Link helpers that leave external and anchor links alone
//!
//! # Example
//!
//! ```rust
//! use ams_locale::i18n::{I18nRouteTable, LanguageRegistry, Route, UrlTranslator};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(LanguageRegistry::parse("en:English,mi:Te Reo Māori", "en").unwrap());
//! let routes = I18nRouteTable::new(
//!     registry.clone(),
//!     vec![Route::new("about", "about/").translated("mi", "mo-matou/")],
//! );
//! let translator = UrlTranslator::new(registry, Arc::new(routes));
//!
//! assert_eq!(translator.translate_url(None, "mi", Some("/en/about/")), "/mi/mo-matou/");
//! assert_eq!(translator.translate_url(None, "mi", Some("/en/news/?p=2")), "/mi/news/?p=2");
//! assert_eq!(translator.translate_url(None, "mi", None), "/mi/");
//! ```

mod localize;
mod path;
mod registry;
mod routes;
mod translate;

pub use localize::{change_url_locale, is_local_url, localize_url};
pub use path::SplitPath;
pub use registry::{LanguageConfig, LanguageRegistry};
pub use routes::{default_routes, I18nRouteTable, IdentityRoutes, Route, RouteTranslator};
pub use translate::{language_root, UrlTranslator};
