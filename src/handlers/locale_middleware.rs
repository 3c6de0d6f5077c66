use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header, request::Parts, uri::PathAndQuery, HeaderValue, Request, Uri},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, error, info};

use crate::config::LocaleConfig;
use crate::handlers::page_handlers;
use crate::models::locale::Locale;
use crate::utils::locale_detection::{preference_cookie, resolve, RequestHints};
use crate::utils::locale_routing::{bypasses_resolver, route, RouteDecision};
use crate::AppState;

/// The locale a page request is rendered under. Set by [`resolve_locale`];
/// requests that never went through it get the default locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLocale(pub Locale);

impl FromRequestParts<Arc<AppState>> for ResolvedLocale {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<ResolvedLocale>()
            .copied()
            .unwrap_or(ResolvedLocale(state.config.locale.default_locale)))
    }
}

/// Picks the locale for a page request, routes it under that locale and
/// hands out a preference cookie when the locale had to be inferred.
///
/// Must wrap the page router as a service (not `Router::layer`) so the
/// rewritten URI is what the router matches on.
pub async fn resolve_locale(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if bypasses_resolver(&path) {
        return next.run(request).await;
    }

    let config = &state.config.locale;
    let hints = RequestHints::from_headers(request.headers(), config);
    let resolution = resolve(config, &hints);
    debug!(
        path = %path,
        locale = %resolution.locale,
        source = ?resolution.source,
        "Resolved request locale"
    );

    let query = request.uri().query().map(str::to_string);
    let mut response = match route(config, &path, resolution.locale) {
        RouteDecision::Rewrite { locale, path: inner } => {
            if let Err(e) = rewrite_path(&mut request, &inner, query.as_deref()) {
                error!("Failed to rewrite {} to {}: {}", path, inner, e);
            }
            request.extensions_mut().insert(ResolvedLocale(locale));
            next.run(request).await
        }
        RouteDecision::Redirect { location } => {
            let location = with_query(&location, query.as_deref());
            debug!(from = %path, to = %location, "Redirecting to locale path");
            Redirect::temporary(&location).into_response()
        }
        RouteDecision::NotFound => {
            info!(path = %path, "Request names an unsupported locale");
            page_handlers::not_found_response(&state, resolution.locale)
        }
    };

    if resolution.issues_signal() {
        attach_preference_cookie(&mut response, config, resolution.locale);
    }
    response
}

pub fn attach_preference_cookie(response: &mut Response, config: &LocaleConfig, locale: Locale) {
    let cookie = preference_cookie(config, locale);
    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
        Err(e) => error!("Failed to encode locale cookie: {}", e),
    }
}

fn with_query(path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{}?{}", path, query),
        _ => path.to_string(),
    }
}

fn rewrite_path(
    request: &mut Request<Body>,
    path: &str,
    query: Option<&str>,
) -> Result<(), axum::http::Error> {
    let mut parts = request.uri().clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(with_query(path, query))?);
    *request.uri_mut() = Uri::from_parts(parts)?;
    Ok(())
}
