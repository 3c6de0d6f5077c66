use axum::http::{header, HeaderMap};
use cookie::{Cookie, SameSite};
use tracing::debug;

use crate::config::LocaleConfig;
use crate::models::locale::Locale;

/// What a request tells us about the visitor's locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHints {
    /// Raw value of the preference cookie, if any.
    pub signal: Option<String>,
    pub country: Option<String>,
    pub accept_language: String,
}

impl RequestHints {
    pub fn from_headers(headers: &HeaderMap, config: &LocaleConfig) -> Self {
        let signal = headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| Cookie::split_parse(value.to_string()))
            .filter_map(Result::ok)
            .find(|cookie| cookie.name() == config.cookie_name)
            .map(|cookie| cookie.value().to_string());

        let country = headers
            .get(&config.country_header)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);

        let accept_language = headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("")
            .to_string();

        Self {
            signal,
            country,
            accept_language,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Signal,
    Country,
    AcceptLanguage,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub locale: Locale,
    pub source: ResolutionSource,
}

impl Resolution {
    /// A fresh preference cookie goes out whenever the locale was inferred.
    pub fn issues_signal(&self) -> bool {
        self.source != ResolutionSource::Signal
    }
}

/// Read-through over the preference cookie: a valid signal wins outright,
/// otherwise the locale is inferred from the geo and language hints.
pub fn resolve(config: &LocaleConfig, hints: &RequestHints) -> Resolution {
    if let Some(raw) = hints.signal.as_deref() {
        if let Some(locale) = config.parse_supported(raw) {
            return Resolution {
                locale,
                source: ResolutionSource::Signal,
            };
        }
        debug!(signal = raw, "Ignoring unsupported locale cookie");
    }
    detect(config, hints.country.as_deref(), &hints.accept_language)
}

/// Country match first. The language header is only consulted when the
/// country is unknown.
pub fn detect(config: &LocaleConfig, country: Option<&str>, accept_language: &str) -> Resolution {
    match country {
        Some(code) if code == config.home_country => Resolution {
            locale: config.home_locale,
            source: ResolutionSource::Country,
        },
        None if accept_language
            .to_lowercase()
            .starts_with(&config.home_language) =>
        {
            Resolution {
                locale: config.home_locale,
                source: ResolutionSource::AcceptLanguage,
            }
        }
        _ => Resolution {
            locale: config.fallback_locale,
            source: ResolutionSource::Fallback,
        },
    }
}

/// The `Set-Cookie` payload persisting `locale` as the visitor's preference.
pub fn preference_cookie(config: &LocaleConfig, locale: Locale) -> Cookie<'static> {
    Cookie::build((config.cookie_name.clone(), locale.as_str()))
        .path("/")
        .max_age(config.cookie_max_age)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .build()
}
