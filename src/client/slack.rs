use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::Chat;
use crate::config::SlackSettings;
use crate::error::ChatError;

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Slack bot + incoming-webhook client
#[derive(Clone)]
pub struct SlackClient {
    client: Client,
    api_url: String,
    bot_token: Option<String>,
    channel: String,
    webhook_url: Option<String>,
    error_webhook_url: Option<String>,
}

impl SlackClient {
    pub fn new(settings: &SlackSettings) -> Result<Self, ChatError> {
        let client = Client::builder().user_agent("notion-provision").build()?;
        Ok(Self {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            bot_token: settings.bot_token.clone(),
            channel: settings.channel.clone(),
            webhook_url: settings.webhook_url.clone(),
            error_webhook_url: settings.error_webhook_url.clone(),
        })
    }

    pub fn has_webhook(&self) -> bool {
        self.webhook_url.is_some()
    }

    /// Post plain text to an incoming webhook
    pub fn post_webhook(&self, url: &str, text: &str) -> Result<(), ChatError> {
        self.client
            .post(url)
            .json(&json!({ "text": text }))
            .send()?
            .error_for_status()?;
        Ok(())
    }

    /// Forward a log line; error lines also go to the error webhook
    pub fn forward_log(&self, text: &str, is_error: bool) -> Result<(), ChatError> {
        let Some(webhook) = &self.webhook_url else {
            return Ok(());
        };
        self.post_webhook(webhook, text)?;
        if is_error {
            if let Some(error_webhook) = &self.error_webhook_url {
                self.post_webhook(error_webhook, text)?;
            }
        }
        Ok(())
    }
}

/// Message body for a failure report
pub fn error_text(error: &anyhow::Error) -> String {
    format!("❗️ 오류 발생\n```{:?}```", error)
}

impl Chat for SlackClient {
    fn send_message(&self, text: &str, channel: Option<&str>) -> Result<(), ChatError> {
        let Some(token) = &self.bot_token else {
            debug!("Slack bot token not configured, skipping message");
            return Ok(());
        };
        let channel = channel.unwrap_or(&self.channel);

        let response: PostMessageResponse = self
            .client
            .post(format!("{}/chat.postMessage", self.api_url))
            .bearer_auth(token)
            .json(&json!({ "channel": channel, "text": text }))
            .send()?
            .error_for_status()?
            .json()?;

        if !response.ok {
            return Err(ChatError::Api(
                response.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        info!("Sent Slack message to {}", channel);
        Ok(())
    }

    fn send_error(&self, error: &anyhow::Error) -> Result<(), ChatError> {
        let Some(url) = self.error_webhook_url.as_ref().or(self.webhook_url.as_ref()) else {
            debug!("Slack webhook not configured, skipping error report");
            return Ok(());
        };
        self.post_webhook(url, &error_text(error))
    }
}
