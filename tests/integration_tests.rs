//! Integration tests for the AMS locale service
//!
//! These tests drive the full router (locale middleware included) in-process
//! and check the pages, redirects and language-switcher URLs it produces.

use axum::{
    body::Body,
    http::{header::LOCATION, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use ams_locale::{
    config::Config,
    server::{create_app, AppState},
};

// ==================== Test Helpers ====================

fn create_test_config() -> Config {
    Config {
        languages: "en:English,mi:Te Reo Māori".to_string(),
        default_language: "en".to_string(),
        admin_url: "admin/".to_string(),
        reserved_paths: vec!["billing".to_string(), "forum".to_string()],
        theme_color: "#1d3557".to_string(),
        port: 8080,
    }
}

fn create_test_app() -> Router {
    let state = AppState::from_config(&create_test_config()).expect("Failed to build state");
    create_app(state)
}

async fn get(uri: &str) -> axum::response::Response {
    create_test_app()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn get_json(uri: &str) -> Value {
    let response = get(uri).await;
    assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).expect("Response should be JSON")
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(LOCATION)
        .expect("Redirect should have a Location header")
        .to_str()
        .unwrap()
}

fn alternate_urls(page: &Value) -> Vec<(String, String)> {
    page["alternates"]
        .as_array()
        .expect("alternates should be an array")
        .iter()
        .map(|alt| {
            (
                alt["code"].as_str().unwrap().to_string(),
                alt["url"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}

// ==================== Health / Root Tests ====================

#[tokio::test]
async fn test_health() {
    let body = get_json("/health").await;
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_root_redirects_to_default_language() {
    let response = get("/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/en/");
}

// ==================== Page Tests ====================

#[tokio::test]
async fn test_language_root_page() {
    let page = get_json("/en/").await;
    assert_eq!(page["locale"], "en");
    assert_eq!(page["path"], "/");
    assert_eq!(
        alternate_urls(&page),
        pairs(&[("en", "/en/"), ("mi", "/mi/")])
    );
}

#[tokio::test]
async fn test_prefix_is_stripped_and_query_kept_in_alternates() {
    let page = get_json("/mi/news/2024/?page=2").await;
    assert_eq!(page["locale"], "mi");
    assert_eq!(page["path"], "/news/2024/");
    assert_eq!(
        alternate_urls(&page),
        pairs(&[
            ("en", "/en/news/2024/?page=2"),
            ("mi", "/mi/news/2024/?page=2"),
        ])
    );
}

#[tokio::test]
async fn test_alternate_names_are_listed() {
    let page = get_json("/mi/").await;
    let names: Vec<_> = page["alternates"]
        .as_array()
        .unwrap()
        .iter()
        .map(|alt| alt["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["English", "Te Reo Māori"]);
}

#[tokio::test]
async fn test_reserved_segment_after_locale_is_not_stripped() {
    let page = get_json("/en/users/aroha/").await;
    assert_eq!(page["locale"], "en");
    assert_eq!(page["path"], "/en/users/aroha/");
    assert_eq!(
        alternate_urls(&page),
        pairs(&[("en", "/en/users/aroha/"), ("mi", "/mi/users/aroha/")])
    );
}

#[tokio::test]
async fn test_unprefixed_application_path_falls_back_to_language_roots() {
    let page = get_json("/billing/invoices/").await;
    assert_eq!(page["locale"], "en");
    assert_eq!(page["path"], "/billing/invoices/");
    assert_eq!(
        alternate_urls(&page),
        pairs(&[("en", "/en/"), ("mi", "/mi/")])
    );
}

#[tokio::test]
async fn test_unrecognized_prefix_is_not_a_locale() {
    let page = get_json("/fr/page/").await;
    assert_eq!(page["locale"], "en");
    assert_eq!(page["path"], "/fr/page/");
    assert_eq!(
        alternate_urls(&page),
        pairs(&[("en", "/en/"), ("mi", "/mi/")])
    );
}

#[tokio::test]
async fn test_page_includes_theme() {
    let page = get_json("/en/about/").await;
    assert_eq!(page["theme"]["color"], "#1d3557");
    assert_eq!(page["theme"]["scheme"], "dark");
    assert!(page["theme"]["bg_subtle"].as_str().unwrap().starts_with('#'));
}

// ==================== Language Switcher Tests ====================

#[tokio::test]
async fn test_switch_language_translates_next() {
    let response = get("/i18n/switch/mi?next=/en/another/page/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/mi/another/page/");
}

#[tokio::test]
async fn test_switch_language_keeps_encoded_query() {
    let response = get("/i18n/switch/mi?next=/en/current/page/%3Fa%3D1%26b%3D2").await;
    assert_eq!(location(&response), "/mi/current/page/?a=1&b=2");
}

#[tokio::test]
async fn test_switch_language_uses_route_table() {
    let response = get("/i18n/switch/en?next=/mi/users/memberships/").await;
    assert_eq!(location(&response), "/en/users/memberships/");
}

#[tokio::test]
async fn test_switch_language_without_next() {
    let response = get("/i18n/switch/mi").await;
    assert_eq!(location(&response), "/mi/");
}

#[tokio::test]
async fn test_switch_language_rejects_external_next() {
    for next in ["https://evil.example.com/", "//evil.example.com/"] {
        let response = get(&format!("/i18n/switch/mi?next={}", next)).await;
        assert_eq!(location(&response), "/mi/", "next={}", next);
    }
}

#[tokio::test]
async fn test_switch_to_unrecognized_language() {
    let response = get("/i18n/switch/xx?next=/en/page/").await;
    assert_eq!(location(&response), "/xx/");
}

#[tokio::test]
async fn test_switch_from_unrecognized_prefix() {
    let response = get("/i18n/switch/en?next=/xx/page/").await;
    assert_eq!(location(&response), "/en/");
}

#[tokio::test]
async fn test_switch_rejects_language_that_is_not_a_segment() {
    for uri in [
        "/i18n/switch/%2F%2Fevil.com",
        "/i18n/switch/%5Cevil.com",
        "/i18n/switch/evil.com%2Fpath",
        "/i18n/switch/%2F%2Fevil.com?next=/en/page/",
    ] {
        let response = get(uri).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "GET {}", uri);
        assert_eq!(location(&response), "/en/", "GET {}", uri);
    }
}

#[tokio::test]
async fn test_switch_with_control_character_in_next() {
    let response = get("/i18n/switch/mi?next=/en/a%0Ab/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/mi/");

    let response = get("/i18n/switch/mi?next=/en/about/%0D%0ASet-Cookie:%20x=1").await;
    assert_eq!(location(&response), "/mi/");
}

#[tokio::test]
async fn test_switch_with_control_character_in_language() {
    let response = get("/i18n/switch/m%0Ai?next=/en/page/").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/en/");
}

// ==================== Configuration Tests ====================

#[test]
fn test_invalid_language_configuration_is_rejected() {
    let mut config = create_test_config();
    config.default_language = "de".to_string();
    assert!(AppState::from_config(&config).is_err());
}

#[test]
fn test_admin_url_is_reserved() {
    let mut config = create_test_config();
    config.admin_url = "/staff/".to_string();
    let state = AppState::from_config(&config).unwrap();
    assert!(state.reserved.contains("staff"));
    assert!(state.reserved.contains("billing"));
    assert!(state.reserved.contains("health"));
    assert!(!state.reserved.contains("en"));
}
