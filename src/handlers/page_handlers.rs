use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::info;

use crate::handlers::locale_middleware::{attach_preference_cookie, ResolvedLocale};
use crate::models::locale::Locale;
use crate::pages::landing::{render_landing, render_not_found, PageContext};
use crate::utils::locale_routing::{localized_path, strip_locale_prefix};
use crate::AppState;

fn page_context<'a>(state: &'a AppState, locale: Locale, current_path: &str) -> PageContext<'a> {
    let config = &state.config.locale;
    let target = config.other_locale(locale);
    PageContext {
        locale,
        messages: state.catalogs.get(locale),
        switch_href: format!("/api/locale/{}?next={}", target, current_path),
        switch_label: target.switcher_label(),
        home_href: localized_path(config, locale, "/"),
    }
}

pub async fn landing_page(
    State(state): State<Arc<AppState>>,
    ResolvedLocale(locale): ResolvedLocale,
) -> Html<String> {
    Html(render_landing(&page_context(&state, locale, "/")))
}

pub async fn not_found_page(
    State(state): State<Arc<AppState>>,
    ResolvedLocale(locale): ResolvedLocale,
) -> Response {
    not_found_response(&state, locale)
}

pub fn not_found_response(state: &AppState, locale: Locale) -> Response {
    let html = render_not_found(&page_context(state, locale, "/"));
    (StatusCode::NOT_FOUND, Html(html)).into_response()
}

#[derive(Debug, Deserialize)]
pub struct SwitchLocaleParams {
    pub next: Option<String>,
}

/// Locale switcher target. Overwrites the preference cookie with the chosen
/// locale and sends the visitor to `next` under it.
pub async fn switch_locale(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
    Query(params): Query<SwitchLocaleParams>,
) -> Response {
    let config = &state.config.locale;
    let Some(locale) = config.parse_supported(&code) else {
        info!("Locale switch to unsupported locale: {}", code);
        return not_found_response(&state, config.default_locale);
    };

    let next = params
        .next
        .filter(|next| is_local_path(next))
        .unwrap_or_else(|| "/".to_string());
    let location = localized_path(config, locale, &strip_locale_prefix(config, &next));
    let location = if is_local_path(&location) {
        location
    } else {
        "/".to_string()
    };
    info!(locale = %locale, to = %location, "Switching locale");

    let mut response = Redirect::to(&location).into_response();
    attach_preference_cookie(&mut response, config, locale);
    response
}

// Rejects protocol-relative and absolute URLs so `next` can't leave the site.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_site_paths_are_accepted() {
        assert!(is_local_path("/"));
        assert!(is_local_path("/en/about-us"));
        assert!(!is_local_path("//evil.example"));
        assert!(!is_local_path("https://evil.example"));
        assert!(!is_local_path("/\\evil.example"));
        assert!(!is_local_path(""));
    }

    #[test]
    fn switch_target_never_leaves_the_site() {
        let config = crate::config::LocaleConfig::default();
        for next in ["/ko//evil.example", "/en//evil.example", "/ko/\\evil.example"] {
            let location = localized_path(&config, Locale::Ko, &strip_locale_prefix(&config, next));
            assert!(is_local_path(&location), "{} -> {}", next, location);
        }
    }
}
