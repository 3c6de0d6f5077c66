use std::net::IpAddr;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::locale::Locale;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid PORT: {0}")]
    InvalidPort(String),
    #[error("Invalid HOST: {0}")]
    InvalidHost(String),
    #[error("Invalid COUNTRY_HEADER: {0}")]
    InvalidHeaderName(String),
}

/// Locale table and detection rules. Built once at startup and shared
/// read-only through `AppState`.
#[derive(Debug, Clone)]
pub struct LocaleConfig {
    pub locales: Vec<Locale>,
    /// Served without a path prefix.
    pub default_locale: Locale,
    pub home_locale: Locale,
    pub home_country: String,
    pub home_language: String,
    pub fallback_locale: Locale,
    pub cookie_name: String,
    pub cookie_max_age: time::Duration,
    pub cookie_secure: bool,
    pub country_header: axum::http::HeaderName,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            locales: Locale::ALL.to_vec(),
            default_locale: Locale::Ko,
            home_locale: Locale::Ko,
            home_country: "KR".to_string(),
            home_language: "ko".to_string(),
            fallback_locale: Locale::En,
            cookie_name: "NEXT_LOCALE".to_string(),
            cookie_max_age: time::Duration::days(365),
            cookie_secure: false,
            country_header: axum::http::HeaderName::from_static("x-vercel-ip-country"),
        }
    }
}

impl LocaleConfig {
    pub fn is_supported(&self, locale: Locale) -> bool {
        self.locales.contains(&locale)
    }

    /// Parses a raw code, accepting only locales this site serves.
    pub fn parse_supported(&self, raw: &str) -> Option<Locale> {
        raw.parse::<Locale>()
            .ok()
            .filter(|locale| self.is_supported(*locale))
    }

    /// The locale the switcher offers from `current`.
    pub fn other_locale(&self, current: Locale) -> Locale {
        self.locales
            .iter()
            .copied()
            .find(|locale| *locale != current)
            .unwrap_or(self.default_locale)
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub environment: String,
    pub static_dir: PathBuf,
    pub locale: LocaleConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            environment: "development".to_string(),
            static_dir: PathBuf::from("static"),
            locale: LocaleConfig::default(),
        }
    }
}

impl Config {
    /// Reads configuration from the process environment. Call `dotenvy::dotenv()` first
    /// to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        if let Ok(raw) = std::env::var("PORT") {
            config.port = raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw))?;
        }
        if let Ok(raw) = std::env::var("HOST") {
            config.host = raw.parse::<IpAddr>().map_err(|_| ConfigError::InvalidHost(raw))?;
        }
        if let Ok(environment) = std::env::var("ENVIRONMENT") {
            config.environment = environment;
        }
        if let Ok(dir) = std::env::var("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Ok(raw) = std::env::var("COUNTRY_HEADER") {
            config.locale.country_header = axum::http::HeaderName::try_from(raw.to_ascii_lowercase())
                .map_err(|_| ConfigError::InvalidHeaderName(raw))?;
        }
        config.locale.cookie_secure = config.is_production();
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
