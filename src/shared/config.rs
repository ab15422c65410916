//! Application configuration. Credentials, destination, page URLs, browser knobs.
//!
//! Read once at startup and passed to components explicitly.

use crate::domain::{ChatId, DomainError};
use config::builder::DefaultState;
use config::ConfigBuilder;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default bound on waiting for the workout region to render.
pub const DEFAULT_PAGE_TIMEOUT_SECS: u64 = 30;

/// Gym homepage carrying the navigation bar with the daily-workout link.
pub const DEFAULT_WOD_SITE_URL: &str = "https://www.crossfitpanda.com/";

/// Bot API base used when TELEGRAM_API_URL is unset.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Environment as read by the `config` crate. Keys are the lowercased variable names.
#[derive(Debug, Deserialize, Default)]
struct RawConfig {
    telegram_token: Option<String>,
    telegram_chat_id: Option<String>,
    studio_url: Option<String>,
    bot_email: Option<String>,
    bot_password: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Optional knobs
    // ─────────────────────────────────────────────────────────────────────────
    /// WOD entry page. Read from WOD_SITE_URL; defaults to the gym homepage.
    wod_site_url: Option<String>,
    /// Read from WOD_TIMEOUT_SECS.
    wod_timeout_secs: Option<String>,
    /// Read from WOD_HEADLESS. "false" shows the browser window.
    wod_headless: Option<String>,
    /// Read from CHROME_EXECUTABLE.
    chrome_executable: Option<String>,
    /// Read from TELEGRAM_API_URL.
    telegram_api_url: Option<String>,
}

#[derive(Clone)]
pub struct AppConfig {
    pub telegram_token: String,
    pub chat_id: ChatId,
    pub studio_url: String,
    pub bot_email: String,
    pub bot_password: String,
    pub wod_site_url: String,
    pub page_timeout: Duration,
    pub headless: bool,
    pub chrome_executable: Option<PathBuf>,
    pub telegram_api_url: String,
}

impl AppConfig {
    /// Load from `.env` (if present) and the process environment.
    pub fn load() -> Result<Self, DomainError> {
        dotenv::dotenv().ok();
        let builder = config::Config::builder().add_source(config::Environment::default());
        Self::from_builder(builder)
    }

    /// Build from any prepared source stack. All missing required variables are reported at once.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, DomainError> {
        let raw: RawConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DomainError::Config(e.to_string()))?;

        let mut missing = Vec::new();
        let mut required = |value: Option<String>, name: &'static str| -> String {
            match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
                Some(v) => v,
                None => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let telegram_token = required(raw.telegram_token, "TELEGRAM_TOKEN");
        let chat_id = required(raw.telegram_chat_id, "TELEGRAM_CHAT_ID");
        let studio_url = required(raw.studio_url, "STUDIO_URL");
        let bot_email = required(raw.bot_email, "BOT_EMAIL");
        let bot_password = required(raw.bot_password, "BOT_PASSWORD");

        if !missing.is_empty() {
            return Err(DomainError::Config(format!(
                "missing required environment variable(s): {}",
                missing.join(", ")
            )));
        }

        validate_url("STUDIO_URL", &studio_url)?;
        let wod_site_url =
            non_empty(raw.wod_site_url).unwrap_or_else(|| DEFAULT_WOD_SITE_URL.to_string());
        validate_url("WOD_SITE_URL", &wod_site_url)?;

        let timeout_secs = match non_empty(raw.wod_timeout_secs) {
            Some(s) => s
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    DomainError::Config(format!(
                        "WOD_TIMEOUT_SECS must be a positive integer, got {:?}",
                        s
                    ))
                })?,
            None => DEFAULT_PAGE_TIMEOUT_SECS,
        };

        let headless = match non_empty(raw.wod_headless) {
            Some(s) => parse_bool(&s).ok_or_else(|| {
                DomainError::Config(format!("WOD_HEADLESS must be true or false, got {:?}", s))
            })?,
            None => true,
        };

        let telegram_api_url = non_empty(raw.telegram_api_url)
            .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string());
        validate_url("TELEGRAM_API_URL", &telegram_api_url)?;

        Ok(Self {
            telegram_token,
            chat_id: ChatId::new(chat_id),
            studio_url,
            bot_email,
            bot_password,
            wod_site_url,
            page_timeout: Duration::from_secs(timeout_secs),
            headless,
            chrome_executable: non_empty(raw.chrome_executable).map(PathBuf::from),
            telegram_api_url: telegram_api_url.trim_end_matches('/').to_string(),
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("telegram_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("studio_url", &self.studio_url)
            .field("bot_email", &self.bot_email)
            .field("bot_password", &"<redacted>")
            .field("wod_site_url", &self.wod_site_url)
            .field("page_timeout", &self.page_timeout)
            .field("headless", &self.headless)
            .field("chrome_executable", &self.chrome_executable)
            .field("telegram_api_url", &self.telegram_api_url)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn validate_url(name: &str, value: &str) -> Result<(), DomainError> {
    let parsed = url::Url::parse(value).map_err(|e| {
        DomainError::Config(format!("{} is not a valid URL ({}): {}", name, e, value))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(DomainError::Config(format!(
            "{} must use http or https, got {}",
            name, other
        ))),
    }
}
