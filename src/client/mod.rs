//! Remote collaborators: document store, calendar and chat.
//!
//! Each concern is a trait so the provisioning workflow can run against
//! in-memory fakes; the HTTP implementations live in the submodules.

pub mod calendar;
pub mod notion;
pub mod slack;

pub use calendar::*;
pub use notion::*;
pub use slack::*;

use serde_json::{Map, Value};

use crate::error::{CalendarError, ChatError, StoreError};
use crate::schema::LiveSchema;

/// One page of a cursor-paginated listing
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next_cursor: Option<String>,
}

/// Child block of a container page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildBlock {
    pub id: String,
    pub kind: String,
}

impl ChildBlock {
    pub fn is_table(&self) -> bool {
        self.kind == "child_database"
    }
}

/// Row as returned by a table query
#[derive(Debug, Clone, PartialEq)]
pub struct RowRecord {
    pub id: String,
    pub properties: Map<String, Value>,
}

pub trait DocumentStore: Send + Sync {
    fn create_table(
        &self,
        parent_id: &str,
        title: &str,
        icon: &str,
        columns: &Map<String, Value>,
    ) -> Result<String, StoreError>;

    fn retrieve_table(&self, table_id: &str) -> Result<LiveSchema, StoreError>;

    fn update_table(&self, table_id: &str, columns: &Map<String, Value>) -> Result<(), StoreError>;

    fn delete_block(&self, block_id: &str) -> Result<(), StoreError>;

    fn list_children(&self, parent_id: &str, cursor: Option<&str>) -> Result<Page<ChildBlock>, StoreError>;

    fn create_row(&self, table_id: &str, properties: &Map<String, Value>) -> Result<String, StoreError>;

    fn query_rows(&self, table_id: &str, cursor: Option<&str>) -> Result<Page<RowRecord>, StoreError>;
}

/// All-day event mirrored from a table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub summary: String,
    pub start: String,
    pub end: String,
    pub description: String,
}

/// Partial event update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventPatch {
    pub summary: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub description: Option<String>,
}

/// Calendar collaborator. Implementations no-op when unconfigured.
pub trait Calendar: Send + Sync {
    fn create_event(&self, event: &CalendarEvent) -> Result<(), CalendarError>;

    fn update_event(&self, event_id: &str, patch: &EventPatch) -> Result<(), CalendarError>;
}

/// Chat collaborator. Implementations no-op when unconfigured.
pub trait Chat: Send + Sync {
    /// Post to `channel`, or the configured default channel
    fn send_message(&self, text: &str, channel: Option<&str>) -> Result<(), ChatError>;

    /// Post a failure with its full cause chain to the error path
    fn send_error(&self, error: &anyhow::Error) -> Result<(), ChatError>;
}
