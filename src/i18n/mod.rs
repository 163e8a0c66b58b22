//! Internationalization (i18n) module for StudyLog.
//!
//! Language resources are TOML tables embedded in the binary. Nested
//! tables are flattened into dot-separated keys.
//!
//! ```
//! use studylog::i18n::I18n;
//!
//! let i18n = I18n::builtin("en").unwrap();
//! assert_eq!(i18n.t("auth.email_not_found"), "Email does not exist.");
//! ```

use std::collections::HashMap;

use thiserror::Error;

/// Default locale.
pub const DEFAULT_LOCALE: &str = "ko";

const KO: &str = include_str!("ko.toml");
const EN: &str = include_str!("en.toml");

/// I18n-related errors.
#[derive(Error, Debug)]
pub enum I18nError {
    /// Failed to parse TOML.
    #[error("Failed to parse locale table: {0}")]
    Parse(#[from] toml::de::Error),

    /// Locale not found.
    #[error("Locale not found: {0}")]
    LocaleNotFound(String),
}

/// Result type for i18n operations.
pub type Result<T> = std::result::Result<T, I18nError>;

/// Flattened message table for one locale.
#[derive(Debug, Clone)]
pub struct I18n {
    locale: String,
    messages: HashMap<String, String>,
}

impl I18n {
    /// Load one of the embedded locales (`ko`, `en`).
    pub fn builtin(locale: &str) -> Result<Self> {
        let content = match locale {
            "ko" => KO,
            "en" => EN,
            other => return Err(I18nError::LocaleNotFound(other.to_string())),
        };
        Self::from_str(locale, content)
    }

    /// Load an embedded locale, falling back to the default one.
    pub fn builtin_or_default(locale: &str) -> Self {
        Self::builtin(locale)
            .or_else(|_| Self::builtin(DEFAULT_LOCALE))
            .unwrap_or_else(|_| Self::empty(DEFAULT_LOCALE))
    }

    /// Create an I18n instance from a TOML string.
    pub fn from_str(locale: &str, content: &str) -> Result<Self> {
        let table: toml::Table = toml::from_str(content)?;

        let mut messages = HashMap::new();
        flatten_toml("", &toml::Value::Table(table), &mut messages);

        Ok(Self {
            locale: locale.to_string(),
            messages,
        })
    }

    /// Create an empty instance; every lookup returns the key itself.
    pub fn empty(locale: &str) -> Self {
        Self {
            locale: locale.to_string(),
            messages: HashMap::new(),
        }
    }

    /// Get the current locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Get all loaded message keys.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.messages.keys()
    }

    /// Translate a key, returning the key itself if it is missing.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.messages.get(key).map(|s| s.as_str()).unwrap_or(key)
    }

    /// Translate a key and substitute `{{name}}` parameters.
    pub fn t_with(&self, key: &str, params: &[(&str, &str)]) -> String {
        let mut result = self.t(key).to_string();

        for (name, value) in params {
            let placeholder = format!("{{{{{name}}}}}");
            result = result.replace(&placeholder, value);
        }

        result
    }

    /// Check if a translation key exists.
    pub fn has_key(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }
}

impl Default for I18n {
    fn default() -> Self {
        Self::builtin_or_default(DEFAULT_LOCALE)
    }
}

fn flatten_toml(prefix: &str, value: &toml::Value, map: &mut HashMap<String, String>) {
    match value {
        toml::Value::Table(table) => {
            for (key, val) in table {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_toml(&new_prefix, val, map);
            }
        }
        toml::Value::String(s) => {
            map.insert(prefix.to_string(), s.clone());
        }
        toml::Value::Integer(i) => {
            map.insert(prefix.to_string(), i.to_string());
        }
        toml::Value::Float(f) => {
            map.insert(prefix.to_string(), f.to_string());
        }
        toml::Value::Boolean(b) => {
            map.insert(prefix.to_string(), b.to_string());
        }
        // Arrays are not supported for translations
        toml::Value::Array(_) => {}
        toml::Value::Datetime(dt) => {
            map.insert(prefix.to_string(), dt.to_string());
        }
    }
}
