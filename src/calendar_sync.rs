use tracing::{info, warn};

use crate::client::{Calendar, CalendarEvent, DocumentStore};
use crate::codec::{date_start, plain_text};
use crate::error::StoreError;
use crate::schema::{CalendarMapping, TITLE_COLUMN};

/// Create one calendar event per row of an existing calendar table.
///
/// Rows without a start date are skipped. Returns the number of events created.
pub fn sync_calendar(
    store: &dyn DocumentStore,
    calendar: &dyn Calendar,
    table_id: &str,
    mapping: &CalendarMapping,
) -> Result<usize, StoreError> {
    let mut cursor: Option<String> = None;
    let mut created = 0;

    loop {
        let page = store.query_rows(table_id, cursor.as_deref())?;

        for row in &page.items {
            let props = &row.properties;
            let Some(start) = props.get(mapping.start).and_then(date_start) else {
                continue;
            };

            let title = props.get(TITLE_COLUMN).map(plain_text).unwrap_or_default();
            let event = CalendarEvent {
                summary: if title.is_empty() { "Untitled".to_string() } else { title },
                start: start.to_string(),
                end: props
                    .get(mapping.end)
                    .and_then(date_start)
                    .unwrap_or(start)
                    .to_string(),
                description: props
                    .get(mapping.description)
                    .map(plain_text)
                    .unwrap_or_default(),
            };

            match calendar.create_event(&event) {
                Ok(()) => created += 1,
                Err(e) => warn!("Failed to mirror row {} to calendar: {}", row.id, e),
            }
        }

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    info!("Mirrored {} rows of {} to the calendar", created, table_id);
    Ok(created)
}
