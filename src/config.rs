//! Configuration module for StudyLog.

use serde::Deserialize;
use std::path::Path;

use crate::listing::ViewType;
use crate::{Result, StudylogError};

/// Backend endpoints and HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the application backend (boards, posts, comments).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Base URL of the mock user directory.
    #[serde(default = "default_user_base_url")]
    pub user_base_url: String,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8787".to_string()
}

fn default_user_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            user_base_url: default_user_base_url(),
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Session storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Path to the JSON file holding the session record.
    #[serde(default = "default_session_path")]
    pub path: String,
}

fn default_session_path() -> String {
    "data/session.json".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            path: default_session_path(),
        }
    }
}

/// Post listing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    /// Posts per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Number of page buttons in one page group.
    #[serde(default = "default_page_range")]
    pub page_range: u32,
    /// Distance (in rows) from the viewport bottom at which the last card counts as visible.
    #[serde(default = "default_prefetch_margin")]
    pub prefetch_margin: u32,
    /// Number of random board tags shown on the home and board pages.
    #[serde(default = "default_tag_count")]
    pub tag_count: usize,
    /// Presentation used by the board page.
    #[serde(default = "default_board_view")]
    pub board_view: ViewType,
    /// Presentation used by the home page.
    #[serde(default = "default_home_view")]
    pub home_view: ViewType,
}

fn default_page_size() -> u32 {
    10
}

fn default_page_range() -> u32 {
    5
}

fn default_prefetch_margin() -> u32 {
    150
}

fn default_tag_count() -> usize {
    5
}

fn default_board_view() -> ViewType {
    ViewType::Pagination
}

fn default_home_view() -> ViewType {
    ViewType::Infinite
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            page_range: default_page_range(),
            prefetch_margin: default_prefetch_margin(),
            tag_count: default_tag_count(),
            board_view: default_board_view(),
            home_view: default_home_view(),
        }
    }
}

/// Date display configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Timezone for displaying dates (e.g., "Asia/Seoul", "UTC").
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Format used for dates in lists.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            date_format: default_date_format(),
        }
    }
}

/// Locale configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LocaleConfig {
    /// Language code (ko / en).
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "ko".to_string()
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

/// Terminal configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TerminalConfig {
    /// Rows shown per scroll step in the card feed.
    #[serde(default = "default_terminal_height")]
    pub height: u32,
    /// Column width used for separators and previews.
    #[serde(default = "default_terminal_width")]
    pub width: usize,
}

fn default_terminal_height() -> u32 {
    24
}

fn default_terminal_width() -> usize {
    60
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            height: default_terminal_height(),
            width: default_terminal_width(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
    /// Mirror log output to stderr.
    #[serde(default)]
    pub console: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/studylog.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
            console: false,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Backend configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session storage.
    #[serde(default)]
    pub session: SessionConfig,
    /// Post listing.
    #[serde(default)]
    pub listing: ListingConfig,
    /// Date display.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Locale configuration.
    #[serde(default)]
    pub locale: LocaleConfig,
    /// Terminal configuration.
    #[serde(default)]
    pub terminal: TerminalConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(StudylogError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| StudylogError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `STUDYLOG_API_URL`: application backend base URL
    /// - `STUDYLOG_USER_API_URL`: user directory base URL
    /// - `STUDYLOG_SESSION_PATH`: session file path
    pub fn apply_env_overrides(&mut self) {
        let overrides: [(&str, &mut String); 3] = [
            ("STUDYLOG_API_URL", &mut self.api.base_url),
            ("STUDYLOG_USER_API_URL", &mut self.api.user_base_url),
            ("STUDYLOG_SESSION_PATH", &mut self.session.path),
        ];
        for (name, slot) in overrides {
            if let Ok(value) = std::env::var(name) {
                if !value.is_empty() {
                    *slot = value;
                }
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - a backend URL is not an absolute http(s) URL
    /// - the page size or page range is zero
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("api.base_url", &self.api.base_url),
            ("api.user_base_url", &self.api.user_base_url),
        ] {
            let parsed = url::Url::parse(value)
                .map_err(|e| StudylogError::Config(format!("{name} is not a valid URL: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(StudylogError::Config(format!(
                    "{name} must use http or https"
                )));
            }
        }
        if self.listing.page_size == 0 {
            return Err(StudylogError::Config(
                "listing.page_size must be positive".to_string(),
            ));
        }
        if self.listing.page_range == 0 {
            return Err(StudylogError::Config(
                "listing.page_range must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
