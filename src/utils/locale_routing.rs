//! "As-needed" locale prefixes: the default locale is served from unprefixed
//! paths, every other locale lives under `/<code>`.

use unic_langid::LanguageIdentifier;

use crate::config::LocaleConfig;
use crate::models::locale::Locale;

const PASSTHROUGH_PREFIXES: [&str; 4] = ["/api", "/_next", "/_vercel", "/static"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Serve `path` (locale segment stripped) under `locale`.
    Rewrite { locale: Locale, path: String },
    Redirect { location: String },
    NotFound,
}

/// API routes, static assets and anything that looks like a file skip locale handling.
pub fn bypasses_resolver(path: &str) -> bool {
    let under_prefix = PASSTHROUGH_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    });
    under_prefix || path.contains('.')
}

pub fn route(config: &LocaleConfig, path: &str, desired: Locale) -> RouteDecision {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let (first, rest) = match trimmed.split_once('/') {
        Some((first, rest)) => (first, ensure_leading_slash(rest)),
        None => (trimmed, "/".to_string()),
    };

    if let Some(locale) = config.parse_supported(first) {
        if locale == config.default_locale {
            return RouteDecision::Redirect { location: rest };
        }
        return RouteDecision::Rewrite { locale, path: rest };
    }

    if names_locale(first) {
        return RouteDecision::NotFound;
    }

    if desired == config.default_locale {
        RouteDecision::Rewrite {
            locale: desired,
            path: ensure_leading_slash(path),
        }
    } else {
        RouteDecision::Redirect {
            location: localized_path(config, desired, path),
        }
    }
}

/// Public URL of `path` under `locale`.
pub fn localized_path(config: &LocaleConfig, locale: Locale, path: &str) -> String {
    let path = ensure_leading_slash(path);
    if locale == config.default_locale {
        path
    } else if path == "/" {
        format!("/{}", locale)
    } else {
        format!("/{}{}", locale, path)
    }
}

/// `path` with a leading supported-locale segment removed.
pub fn strip_locale_prefix(config: &LocaleConfig, path: &str) -> String {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let (first, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
    if config.parse_supported(first).is_some() {
        ensure_leading_slash(rest)
    } else {
        ensure_leading_slash(path)
    }
}

/// A segment that reads like a language tag (`fr`, `de-AT`, `zh-Hant`).
fn names_locale(segment: &str) -> bool {
    if segment.is_empty() {
        return false;
    }
    segment
        .parse::<LanguageIdentifier>()
        .map(|langid| matches!(langid.language.as_str().len(), 2 | 3))
        .unwrap_or(false)
}

/// Exactly one leading `/`. A `//host` or `/\\host` location would be read by
/// browsers as another site.
fn ensure_leading_slash(path: &str) -> String {
    format!("/{}", path.trim_start_matches(['/', '\\']))
}
