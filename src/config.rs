//! Process configuration, read once from the environment (and `.env`).
//!
//! Missing credentials never fail loading: each collaborator degrades to a
//! no-op instead. Only malformed values are rejected.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use tracing::Level;

use crate::error::ConfigError;
use crate::provision::RetryPolicy;
use crate::schema::StatusKind;

const NOTION_API_URL: &str = "https://api.notion.com/v1";
const NOTION_VERSION: &str = "2022-06-28";
const SLACK_API_URL: &str = "https://slack.com/api";
const CALENDAR_API_URL: &str = "https://www.googleapis.com/calendar/v3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotionSettings {
    pub token: String,
    pub parent_page_id: String,
    pub api_url: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackSettings {
    pub api_url: String,
    pub bot_token: Option<String>,
    pub channel: String,
    pub webhook_url: Option<String>,
    pub error_webhook_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarSettings {
    pub api_url: String,
    pub token: Option<String>,
    pub calendar_id: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub notion_token: Option<String>,
    pub parent_page_id: Option<String>,
    pub notion_api_url: String,
    pub notion_version: String,
    pub slack: SlackSettings,
    pub calendar: CalendarSettings,
    pub default_person_id: Option<String>,
    /// Console filter directive
    pub log_level: String,
    /// Threshold for forwarding log events to chat
    pub chat_log_level: Level,
    pub status_kind: StatusKind,
    pub status_poll: RetryPolicy,
}

impl Config {
    /// Load `.env` from the working directory, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the process environment, falling back to the given env file
    pub fn from_env_file(path: &Path) -> Result<Self, ConfigError> {
        let env_file_error = |e: dotenvy::Error| ConfigError::EnvFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        };

        let mut file_vars = HashMap::new();
        for item in dotenvy::from_path_iter(path).map_err(env_file_error)? {
            let (key, value) = item.map_err(env_file_error)?;
            file_vars.insert(key, value);
        }

        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| file_vars.get(key).cloned()))
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Empty values count as unset
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let chat_log_level = parse(&get, "CHAT_LOG_LEVEL", Level::WARN)?;
        let status_kind = parse(&get, "STATUS_COLUMN_KIND", StatusKind::Status)?;
        let poll_attempts = parse(&get, "STATUS_POLL_ATTEMPTS", RetryPolicy::DEFAULT.max_attempts)?;
        let poll_delay_ms = parse(
            &get,
            "STATUS_POLL_DELAY_MS",
            RetryPolicy::DEFAULT.delay.as_millis() as u64,
        )?;

        Ok(Self {
            notion_token: get("NOTION_TOKEN"),
            parent_page_id: get("PARENT_PAGE_ID"),
            notion_api_url: get_or("NOTION_API_URL", NOTION_API_URL),
            notion_version: get_or("NOTION_VERSION", NOTION_VERSION),
            slack: SlackSettings {
                api_url: get_or("SLACK_API_URL", SLACK_API_URL),
                bot_token: get("SLACK_BOT_TOKEN"),
                channel: get_or("SLACK_CHANNEL", "#general"),
                webhook_url: get("SLACK_WEBHOOK_URL"),
                error_webhook_url: get("SLACK_ERROR_WEBHOOK_URL"),
            },
            calendar: CalendarSettings {
                api_url: get_or("GOOGLE_CALENDAR_API_URL", CALENDAR_API_URL),
                token: get("GOOGLE_CALENDAR_TOKEN"),
                calendar_id: get_or("GOOGLE_CALENDAR_ID", "primary"),
            },
            default_person_id: get("DEFAULT_PERSON_ID"),
            log_level: get_or("LOG_LEVEL", "info").to_lowercase(),
            chat_log_level,
            status_kind,
            status_poll: RetryPolicy::new(poll_attempts, Duration::from_millis(poll_delay_ms)),
        })
    }

    /// Store settings, present only when both the token and parent page are set
    pub fn notion(&self) -> Option<NotionSettings> {
        Some(NotionSettings {
            token: self.notion_token.clone()?,
            parent_page_id: self.parent_page_id.clone()?,
            api_url: self.notion_api_url.clone(),
            version: self.notion_version.clone(),
        })
    }
}

fn parse<T>(
    get: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}
