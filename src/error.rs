use thiserror::Error;

/// Failures talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notion API returned {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Malformed response from Notion: {0}")]
    MalformedResponse(String),
}

/// Failures turning one sample field into a property payload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Malformed date range '{value}' in column '{column}'")]
    MalformedDateRange { column: String, value: String },

    #[error("Column '{column}' is declared as {expected} but the value does not fit")]
    KindMismatch { column: String, expected: String },
}

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Calendar API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Invalid calendar URL: {0}")]
    Url(String),
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Slack API error: {0}")]
    Api(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("Failed to read env file {path}: {reason}")]
    EnvFile { path: String, reason: String },
}
