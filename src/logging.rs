//! Tracing setup: console output plus an optional chat bridge.

use std::fmt::{self, Write as _};

use anyhow::{Context as _, Result};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt as fmt_layer, EnvFilter, Layer};

use crate::client::SlackClient;
use crate::config::Config;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `LOG_LEVEL`. When `chat` is given, events
/// from this crate at or above `CHAT_LOG_LEVEL` are forwarded to it.
pub fn init(config: &Config, chat: Option<SlackClient>) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("Invalid LOG_LEVEL '{}'", config.log_level))?,
    };

    let chat_layer = chat.map(|slack| {
        ChatLayer::new(slack).with_filter(LevelFilter::from_level(config.chat_log_level))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer::layer().with_writer(std::io::stderr))
        .with(chat_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}

/// Forwards log events to the chat webhooks
pub struct ChatLayer {
    slack: SlackClient,
    target_prefix: &'static str,
}

impl ChatLayer {
    pub fn new(slack: SlackClient) -> Self {
        Self {
            slack,
            target_prefix: env!("CARGO_CRATE_NAME"),
        }
    }
}

fn glyph(level: &Level) -> &'static str {
    match *level {
        Level::TRACE | Level::DEBUG => "🔍",
        Level::INFO => "✅",
        Level::WARN => "⚠️",
        Level::ERROR => "❌",
    }
}

/// Render an event as a single chat line
fn format_event(level: &Level, target: &str, message: &str) -> String {
    format!("{} [{}] {}: {}", glyph(level), level, target, message)
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{:?}", value);
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }
}

impl<S: Subscriber> Layer<S> for ChatLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let meta = event.metadata();
        // Only our own events; HTTP client internals would recurse
        if !meta.target().starts_with(self.target_prefix) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let text = format_event(
            meta.level(),
            meta.target(),
            &format!("{}{}", visitor.message, visitor.fields),
        );

        // Not through tracing: that would feed back into this layer
        if let Err(e) = self.slack.forward_log(&text, *meta.level() == Level::ERROR) {
            eprintln!("Chat log forwarding failed: {}", e);
        }
    }
}
