use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use cookie::Cookie;
use http_body_util::BodyExt;
use keenylog_web::{app, config::Config, AppState};
use tower::ServiceExt;

fn test_app() -> Router {
    let state = AppState::new(Config::default()).expect("catalogs load");
    app(Arc::new(state))
}

async fn get(uri: &str, headers: &[(&str, &str)]) -> (StatusCode, HeaderMap, String) {
    let mut builder = Request::builder().uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let response = test_app()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

fn locale_cookie(headers: &HeaderMap) -> Option<Cookie<'static>> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse(value.to_string()).ok())
        .find(|cookie| cookie.name() == "NEXT_LOCALE")
}

fn location(headers: &HeaderMap) -> &str {
    headers.get(header::LOCATION).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn korean_visitor_gets_korean_page_and_cookie() {
    let (status, headers, body) = get("/", &[("x-vercel-ip-country", "KR")]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<html lang="ko">"#));
    let cookie = locale_cookie(&headers).expect("locale cookie issued");
    assert_eq!(cookie.value(), "ko");
    assert_eq!(cookie.path(), Some("/"));
    assert_eq!(cookie.max_age(), Some(time::Duration::days(365)));
}

#[tokio::test]
async fn english_browser_without_country_is_sent_to_english() {
    let (status, headers, _) = get("/", &[("accept-language", "en-US,en;q=0.9")]).await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&headers), "/en");
    assert_eq!(locale_cookie(&headers).unwrap().value(), "en");
}

#[tokio::test]
async fn korean_browser_without_country_gets_korean() {
    let (status, headers, body) = get("/", &[("accept-language", "ko-KR,ko;q=0.9")]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<html lang="ko">"#));
    assert_eq!(locale_cookie(&headers).unwrap().value(), "ko");
}

#[tokio::test]
async fn foreign_country_overrides_korean_browser() {
    let (status, headers, _) = get(
        "/",
        &[("x-vercel-ip-country", "US"), ("accept-language", "ko-KR,ko;q=0.9")],
    )
    .await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&headers), "/en");
    assert_eq!(locale_cookie(&headers).unwrap().value(), "en");
}

#[tokio::test]
async fn no_hints_at_all_falls_back_to_english() {
    let (status, headers, _) = get("/", &[]).await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&headers), "/en");
    assert_eq!(locale_cookie(&headers).unwrap().value(), "en");
}

#[tokio::test]
async fn existing_cookie_is_sticky_and_not_reissued() {
    let (status, headers, _) = get(
        "/",
        &[("cookie", "NEXT_LOCALE=en"), ("x-vercel-ip-country", "KR")],
    )
    .await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&headers), "/en");
    assert!(locale_cookie(&headers).is_none());
}

#[tokio::test]
async fn english_prefix_renders_english() {
    let (status, headers, body) = get("/en", &[("cookie", "NEXT_LOCALE=en")]).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#"<html lang="en">"#));
    assert!(body.contains(r#"href="/api/locale/ko?next=/">KO</a>"#));
    assert!(locale_cookie(&headers).is_none());
    assert_eq!(
        headers.get(header::VARY).unwrap(),
        "Cookie, Accept-Language"
    );
}

#[tokio::test]
async fn default_locale_prefix_is_stripped_with_query() {
    let (status, headers, _) = get("/ko?utm_source=ad", &[("cookie", "NEXT_LOCALE=ko")]).await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&headers), "/?utm_source=ad");
}

#[tokio::test]
async fn unsupported_locale_segment_is_not_found() {
    for hints in [
        vec![("cookie", "NEXT_LOCALE=ko")],
        vec![("x-vercel-ip-country", "KR")],
        vec![("accept-language", "fr-FR")],
    ] {
        let (status, _, body) = get("/fr", &hints).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("<html lang="));
    }
}

#[tokio::test]
async fn invalid_cookie_value_is_replaced() {
    let (status, headers, _) = get(
        "/",
        &[("cookie", "NEXT_LOCALE=fr"), ("x-vercel-ip-country", "KR")],
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(locale_cookie(&headers).unwrap().value(), "ko");
}

#[tokio::test]
async fn unknown_page_is_localized_not_found() {
    let (status, _, body) = get("/en/missing-page", &[("cookie", "NEXT_LOCALE=en")]).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains(r#"<html lang="en">"#));
    assert!(body.contains("Page not found"));
}

#[tokio::test]
async fn locale_switch_overwrites_cookie() {
    let (status, headers, _) = get("/api/locale/ko?next=/en", &[("cookie", "NEXT_LOCALE=en")]).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/");
    assert_eq!(locale_cookie(&headers).unwrap().value(), "ko");
}

#[tokio::test]
async fn locale_switch_refuses_offsite_redirects() {
    let (status, headers, _) = get("/api/locale/en?next=//evil.example", &[]).await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location(&headers), "/en");
}

#[tokio::test]
async fn locale_switch_strips_prefix_without_leaving_site() {
    for next in ["/ko//evil.example", "/en//evil.example"] {
        let (status, headers, _) = get(&format!("/api/locale/ko?next={}", next), &[]).await;

        assert_eq!(status, StatusCode::SEE_OTHER);
        let target = location(&headers);
        assert!(target.starts_with('/') && !target.starts_with("//"), "{}", target);
        assert_eq!(target, "/evil.example");
    }
}

#[tokio::test]
async fn default_prefix_with_empty_segment_redirects_on_site() {
    let (status, headers, _) = get("/ko//evil%2Eexample", &[("cookie", "NEXT_LOCALE=ko")]).await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&headers), "/evil%2Eexample");
}

#[tokio::test]
async fn english_prefix_with_empty_segment_stays_on_site() {
    let (status, headers, body) = get("/en//host", &[("cookie", "NEXT_LOCALE=en")]).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(headers.get(header::LOCATION).is_none());
    assert!(body.contains(r#"<html lang="en">"#));
}

#[tokio::test]
async fn locale_switch_to_unsupported_locale_is_not_found() {
    let (status, headers, _) = get("/api/locale/fr", &[]).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(locale_cookie(&headers).is_none());
}

#[tokio::test]
async fn api_routes_skip_locale_resolution() {
    let (status, headers, body) = get("/api/health", &[]).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
    assert!(locale_cookie(&headers).is_none());
}
