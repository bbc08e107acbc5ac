use tracing::{info, warn};

use super::tables::SchemaProvisioner;
use crate::client::{Calendar, CalendarEvent, DocumentStore};
use crate::codec::{encode_item, EncodeContext, RelatedRows};
use crate::error::StoreError;
use crate::schema::{
    sample_field, CalendarMapping, SampleItem, SampleValue, TableTemplate, STATUS_COLUMN,
    TITLE_COLUMN,
};

/// Inserts a template's sample rows into its created table
pub struct BulkLoader<'a> {
    store: &'a dyn DocumentStore,
    calendar: &'a dyn Calendar,
    provisioner: &'a SchemaProvisioner<'a>,
    default_person: Option<&'a str>,
}

impl<'a> BulkLoader<'a> {
    pub fn new(
        store: &'a dyn DocumentStore,
        calendar: &'a dyn Calendar,
        provisioner: &'a SchemaProvisioner<'a>,
        default_person: Option<&'a str>,
    ) -> Self {
        Self {
            store,
            calendar,
            provisioner,
            default_person,
        }
    }

    /// Create every sample row of `template` in `table_id`, in catalog order.
    ///
    /// `related` feeds `NextRelated` placeholders, one id per placeholder.
    /// Returns the ids of the rows actually created. A table whose status
    /// column is unusable receives no rows.
    pub fn load_samples(
        &self,
        table_id: &str,
        template: &TableTemplate,
        related: &[String],
    ) -> Result<Vec<String>, StoreError> {
        if let Err(e) = self.provisioner.ensure_status_column(table_id, &template.status) {
            warn!("Status column check failed on {}: {}", template.title, e);
        }

        let live = self.store.retrieve_table(table_id)?;
        if !self.provisioner.status_is_valid(&live) {
            warn!("Missing status column on {}, skipping sample rows", template.title);
            return Ok(Vec::new());
        }

        let live_options = live
            .column(STATUS_COLUMN)
            .map(|c| c.options.as_slice())
            .unwrap_or_default();
        let status_allowed = |status: &str| {
            if live_options.is_empty() {
                template.status.contains(status)
            } else {
                live_options.iter().any(|o| o == status)
            }
        };

        let mut ctx = EncodeContext::new(self.default_person, RelatedRows::new(related));
        let mut created = Vec::with_capacity(template.samples.len());

        for (idx, item) in template.samples.iter().enumerate() {
            let row = idx + 1;

            if let Some(status) = sample_field(item, STATUS_COLUMN).and_then(SampleValue::as_text) {
                if !status_allowed(status) {
                    warn!(
                        "Skipping row {} of {}: status '{}' is not an option",
                        row, template.title, status
                    );
                    continue;
                }
            }

            let properties = match encode_item(item, template, &live, &mut ctx) {
                Ok(properties) => properties,
                Err(e) => {
                    warn!("Skipping row {} of {}: {}", row, template.title, e);
                    continue;
                }
            };

            match self.store.create_row(table_id, &properties) {
                Ok(row_id) => {
                    created.push(row_id);
                    if let Some(mapping) = &template.calendar {
                        self.mirror_to_calendar(item, mapping);
                    }
                }
                Err(e) => warn!("Failed to create row {} of {}: {}", row, template.title, e),
            }
        }

        info!(
            "Inserted {} of {} sample rows into {}",
            created.len(),
            template.samples.len(),
            template.title
        );
        Ok(created)
    }

    fn mirror_to_calendar(&self, item: &SampleItem, mapping: &CalendarMapping) {
        let text = |column: &str| sample_field(item, column).and_then(SampleValue::as_text);

        let Some(start) = text(mapping.start) else {
            return;
        };
        let event = CalendarEvent {
            summary: text(TITLE_COLUMN).unwrap_or("Untitled").to_string(),
            start: start.to_string(),
            end: text(mapping.end).unwrap_or(start).to_string(),
            description: text(mapping.description).unwrap_or_default().to_string(),
        };

        if let Err(e) = self.calendar.create_event(&event) {
            warn!("Failed to create calendar event {}: {}", event.summary, e);
        }
    }
}
