use reqwest::blocking::Client;
use reqwest::{Method, Url};
use serde_json::{json, Map, Value};
use tracing::{debug, info};

use super::{Calendar, CalendarEvent, EventPatch};
use crate::config::CalendarSettings;
use crate::error::CalendarError;

/// Google Calendar v3 client authenticated with a bearer access token
pub struct GoogleCalendar {
    client: Client,
    api_url: String,
    token: Option<String>,
    calendar_id: String,
}

impl GoogleCalendar {
    pub fn new(settings: &CalendarSettings) -> Result<Self, CalendarError> {
        let client = Client::builder().user_agent("notion-provision").build()?;
        if settings.token.is_none() {
            debug!("GOOGLE_CALENDAR_TOKEN not configured");
        }
        Ok(Self {
            client,
            api_url: settings.api_url.clone(),
            token: settings.token.clone(),
            calendar_id: settings.calendar_id.clone(),
        })
    }

    fn events_url(&self, event_id: Option<&str>) -> Result<Url, CalendarError> {
        let mut url = Url::parse(&self.api_url).map_err(|e| CalendarError::Url(e.to_string()))?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| CalendarError::Url(self.api_url.clone()))?;
            segments.pop_if_empty().extend(["calendars", self.calendar_id.as_str(), "events"]);
            if let Some(id) = event_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn send(&self, token: &str, method: Method, url: Url, body: &Value) -> Result<(), CalendarError> {
        let response = self
            .client
            .request(method, url)
            .bearer_auth(token)
            .json(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(CalendarError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(())
    }
}

/// Request body for a new all-day event
pub fn event_body(event: &CalendarEvent) -> Value {
    let mut body = json!({
        "summary": event.summary,
        "start": { "date": event.start },
        "end": { "date": event.end },
    });
    if !event.description.is_empty() {
        body["description"] = json!(event.description);
    }
    body
}

/// Request body carrying only the fields being changed
pub fn patch_body(patch: &EventPatch) -> Value {
    let mut body = Map::new();
    if let Some(summary) = &patch.summary {
        body.insert("summary".into(), json!(summary));
    }
    if let Some(start) = &patch.start {
        body.insert("start".into(), json!({ "date": start }));
    }
    if let Some(end) = &patch.end {
        body.insert("end".into(), json!({ "date": end }));
    }
    if let Some(description) = &patch.description {
        body.insert("description".into(), json!(description));
    }
    Value::Object(body)
}

impl Calendar for GoogleCalendar {
    fn create_event(&self, event: &CalendarEvent) -> Result<(), CalendarError> {
        let Some(token) = &self.token else {
            debug!("Google Calendar not configured, skipping event {}", event.summary);
            return Ok(());
        };

        self.send(token, Method::POST, self.events_url(None)?, &event_body(event))?;
        info!("Created calendar event {}", event.summary);
        Ok(())
    }

    fn update_event(&self, event_id: &str, patch: &EventPatch) -> Result<(), CalendarError> {
        let Some(token) = &self.token else {
            debug!("Google Calendar not configured, skipping update of {}", event_id);
            return Ok(());
        };

        self.send(token, Method::PATCH, self.events_url(Some(event_id))?, &patch_body(patch))?;
        info!("Updated calendar event {}", event_id);
        Ok(())
    }
}
