use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::locale::Locale;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid JSON in {locale} catalog: {source}")]
    Json {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },
    #[error("{locale} catalog must be a JSON object")]
    NotAnObject { locale: Locale },
    #[error("{locale} catalog key {key} must be a string or an object")]
    InvalidValue { locale: Locale, key: String },
}

fn embedded_source(locale: Locale) -> &'static str {
    match locale {
        Locale::Ko => include_str!("../../messages/ko.json"),
        Locale::En => include_str!("../../messages/en.json"),
    }
}

/// Flattened translation strings for one locale, keyed by dotted path
/// (`hero.title`).
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    locale: Locale,
    messages: BTreeMap<String, String>,
}

impl MessageCatalog {
    pub fn from_json(locale: Locale, source: &str) -> Result<Self, CatalogError> {
        let value: Value =
            serde_json::from_str(source).map_err(|source| CatalogError::Json { locale, source })?;
        let Value::Object(root) = value else {
            return Err(CatalogError::NotAnObject { locale });
        };

        let mut messages = BTreeMap::new();
        let mut stack: Vec<(String, Value)> = root.into_iter().collect();
        while let Some((key, value)) = stack.pop() {
            match value {
                Value::String(text) => {
                    messages.insert(key, text);
                }
                Value::Object(children) => {
                    stack.extend(
                        children
                            .into_iter()
                            .map(|(child, value)| (format!("{}.{}", key, child), value)),
                    );
                }
                _ => return Err(CatalogError::InvalidValue { locale, key }),
            }
        }

        Ok(Self { locale, messages })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Missing keys come back as the key itself so a page never fails to render.
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        match self.messages.get(key) {
            Some(text) => text.as_str(),
            None => {
                warn!(locale = %self.locale, key, "Missing translation");
                key
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// One catalog per served locale.
#[derive(Debug, Clone)]
pub struct Catalogs {
    catalogs: HashMap<Locale, MessageCatalog>,
    fallback: MessageCatalog,
}

impl Catalogs {
    /// Loads the catalogs compiled into the binary for every locale in `locales`.
    pub fn load(locales: &[Locale], fallback: Locale) -> Result<Self, CatalogError> {
        let fallback = MessageCatalog::from_json(fallback, embedded_source(fallback))?;
        let mut catalogs = HashMap::new();
        for locale in locales.iter().copied() {
            if locale == fallback.locale() {
                catalogs.insert(locale, fallback.clone());
            } else {
                catalogs.insert(locale, MessageCatalog::from_json(locale, embedded_source(locale))?);
            }
        }
        let catalogs = Self { catalogs, fallback };
        catalogs.warn_on_missing_keys();
        Ok(catalogs)
    }

    pub fn get(&self, locale: Locale) -> &MessageCatalog {
        self.catalogs.get(&locale).unwrap_or(&self.fallback)
    }

    /// Keys present in some catalog but absent from `locale`'s.
    pub fn missing_keys(&self, locale: Locale) -> Vec<String> {
        let Some(target) = self.catalogs.get(&locale) else {
            return Vec::new();
        };
        let mut missing: Vec<String> = self
            .catalogs
            .values()
            .flat_map(|catalog| catalog.keys())
            .filter(|key| !target.messages.contains_key(*key))
            .map(str::to_string)
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }

    fn warn_on_missing_keys(&self) {
        for locale in self.catalogs.keys() {
            for key in self.missing_keys(*locale) {
                warn!(locale = %locale, key = %key, "Catalog is missing a key");
            }
        }
    }
}
