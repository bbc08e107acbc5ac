//! In-memory collaborators shared by the workflow tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{Map, Value};

use notion_provision::client::{
    Calendar, CalendarEvent, Chat, ChildBlock, DocumentStore, EventPatch, Page, RowRecord,
};
use notion_provision::error::{CalendarError, ChatError, StoreError};
use notion_provision::provision::Sleeper;
use notion_provision::schema::{LiveColumn, LiveSchema, PropertyKind, STATUS_COLUMN};

#[derive(Default)]
pub struct StoreState {
    next_id: usize,
    pub tables: HashMap<String, LiveSchema>,
    /// Title of each created table by id
    pub titles: HashMap<String, String>,
    /// (title, submitted columns) per create call
    pub created_tables: Vec<(String, Map<String, Value>)>,
    pub updates: Vec<(String, Map<String, Value>)>,
    pub retrieves: usize,
    /// (table id, properties) per successful row create
    pub rows: Vec<(String, Map<String, Value>)>,
    pub row_attempts: usize,
    pub deleted: Vec<String>,
    pub list_calls: Vec<Option<String>>,
    pub children: HashMap<Option<String>, Page<ChildBlock>>,
    pub query_pages: HashMap<Option<String>, Page<RowRecord>>,
    /// Retrieves remaining before a pending status change shows
    pending_status: HashMap<String, (usize, LiveColumn)>,
    pub created_status_kind: Option<PropertyKind>,
    pub status_lag: usize,
    pub ignore_status_updates: bool,
    pub fail_tables: HashSet<String>,
    pub fail_rows: HashSet<String>,
    /// Block ids whose deletion is refused
    pub fail_deletes: HashSet<String>,
    /// Titles of tables whose updates are refused
    pub fail_updates: HashSet<String>,
}

/// Document store backed by a mutex-guarded map of live schemas
#[derive(Default)]
pub struct FakeStore {
    pub state: Mutex<StoreState>,
}

fn api_error(message: &str) -> StoreError {
    StoreError::Api {
        status: 400,
        code: "validation_error".to_string(),
        message: message.to_string(),
    }
}

/// Parse a `{ kind: { options: [...] } }` definition into a live column
fn live_column(def: &Value) -> Option<LiveColumn> {
    let (kind, config) = def.as_object()?.iter().next()?;
    let options = config
        .get("options")
        .and_then(|o| o.as_array())
        .map(|opts| {
            opts.iter()
                .filter_map(|o| o.get("name").and_then(|n| n.as_str()))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    Some(LiveColumn {
        kind: PropertyKind::from_type(kind),
        options,
    })
}

/// Title text of a row payload
pub fn row_title(props: &Map<String, Value>) -> String {
    props["제목"]["title"][0]["text"]["content"]
        .as_str()
        .unwrap_or_default()
        .to_string()
}

impl FakeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(self, f: impl FnOnce(&mut StoreState)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn with_table(self, id: &str, schema: LiveSchema) -> Self {
        self.configure(|s| {
            s.tables.insert(id.to_string(), schema);
        })
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    pub fn table_id(&self, title: &str) -> Option<String> {
        self.state()
            .titles
            .iter()
            .find(|(_, t)| t.as_str() == title)
            .map(|(id, _)| id.clone())
    }

    pub fn rows_in(&self, table_id: &str) -> Vec<Map<String, Value>> {
        self.state()
            .rows
            .iter()
            .filter(|(id, _)| id == table_id)
            .map(|(_, props)| props.clone())
            .collect()
    }

    pub fn status_updates(&self) -> Vec<(String, Value)> {
        self.state()
            .updates
            .iter()
            .filter_map(|(id, patch)| patch.get(STATUS_COLUMN).map(|v| (id.clone(), v.clone())))
            .collect()
    }
}

impl DocumentStore for FakeStore {
    fn create_table(
        &self,
        _parent_id: &str,
        title: &str,
        _icon: &str,
        columns: &Map<String, Value>,
    ) -> Result<String, StoreError> {
        let mut s = self.state();
        s.created_tables.push((title.to_string(), columns.clone()));
        if s.fail_tables.contains(title) {
            return Err(api_error("creation refused"));
        }

        s.next_id += 1;
        let id = format!("db-{}", s.next_id);
        let mut schema = LiveSchema::default();
        for (name, def) in columns {
            if let Some(mut column) = live_column(def) {
                if name == STATUS_COLUMN {
                    match &s.created_status_kind {
                        Some(kind) => column.kind = kind.clone(),
                        None => {}
                    }
                }
                schema.columns.insert(name.clone(), column);
            }
        }
        s.tables.insert(id.clone(), schema);
        s.titles.insert(id.clone(), title.to_string());
        Ok(id)
    }

    fn retrieve_table(&self, table_id: &str) -> Result<LiveSchema, StoreError> {
        let mut s = self.state();
        s.retrieves += 1;

        if let Some((remaining, column)) = s.pending_status.remove(table_id) {
            if remaining == 0 {
                if let Some(table) = s.tables.get_mut(table_id) {
                    table.columns.insert(STATUS_COLUMN.to_string(), column);
                }
            } else {
                s.pending_status
                    .insert(table_id.to_string(), (remaining - 1, column));
            }
        }

        s.tables
            .get(table_id)
            .cloned()
            .ok_or_else(|| api_error("no such table"))
    }

    fn update_table(&self, table_id: &str, columns: &Map<String, Value>) -> Result<(), StoreError> {
        let mut s = self.state();
        s.updates.push((table_id.to_string(), columns.clone()));
        if !s.tables.contains_key(table_id) {
            return Err(api_error("no such table"));
        }
        if s.titles.get(table_id).is_some_and(|t| s.fail_updates.contains(t)) {
            return Err(api_error("update refused"));
        }

        for (name, def) in columns {
            let Some(column) = live_column(def) else {
                continue;
            };
            if name == STATUS_COLUMN {
                if s.ignore_status_updates {
                    continue;
                }
                if s.status_lag > 0 {
                    let lag = s.status_lag;
                    s.pending_status.insert(table_id.to_string(), (lag, column));
                    continue;
                }
            }
            if let Some(table) = s.tables.get_mut(table_id) {
                table.columns.insert(name.clone(), column);
            }
        }
        Ok(())
    }

    fn delete_block(&self, block_id: &str) -> Result<(), StoreError> {
        let mut s = self.state();
        if s.fail_deletes.contains(block_id) {
            return Err(api_error("delete refused"));
        }
        s.deleted.push(block_id.to_string());
        Ok(())
    }

    fn list_children(&self, _parent_id: &str, cursor: Option<&str>) -> Result<Page<ChildBlock>, StoreError> {
        let mut s = self.state();
        let key = cursor.map(str::to_string);
        s.list_calls.push(key.clone());
        Ok(s.children.get(&key).cloned().unwrap_or(Page {
            items: Vec::new(),
            next_cursor: None,
        }))
    }

    fn create_row(&self, table_id: &str, properties: &Map<String, Value>) -> Result<String, StoreError> {
        let mut s = self.state();
        s.row_attempts += 1;
        if s.fail_rows.contains(&row_title(properties)) {
            return Err(api_error("row refused"));
        }
        s.next_id += 1;
        let id = format!("row-{}", s.next_id);
        s.rows.push((table_id.to_string(), properties.clone()));
        Ok(id)
    }

    fn query_rows(&self, _table_id: &str, cursor: Option<&str>) -> Result<Page<RowRecord>, StoreError> {
        let s = self.state();
        Ok(s.query_pages
            .get(&cursor.map(str::to_string))
            .cloned()
            .unwrap_or(Page {
                items: Vec::new(),
                next_cursor: None,
            }))
    }
}

#[derive(Default)]
pub struct RecordingCalendar {
    pub events: Mutex<Vec<CalendarEvent>>,
    pub updates: Mutex<Vec<(String, EventPatch)>>,
}

impl Calendar for RecordingCalendar {
    fn create_event(&self, event: &CalendarEvent) -> Result<(), CalendarError> {
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    fn update_event(&self, event_id: &str, patch: &EventPatch) -> Result<(), CalendarError> {
        self.updates
            .lock()
            .unwrap()
            .push((event_id.to_string(), patch.clone()));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingChat {
    pub messages: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl Chat for RecordingChat {
    fn send_message(&self, text: &str, _channel: Option<&str>) -> Result<(), ChatError> {
        self.messages.lock().unwrap().push(text.to_string());
        Ok(())
    }

    fn send_error(&self, error: &anyhow::Error) -> Result<(), ChatError> {
        self.errors.lock().unwrap().push(format!("{:#}", error));
        Ok(())
    }
}

/// Records requested sleeps without blocking
#[derive(Default)]
pub struct NoSleep {
    pub sleeps: Mutex<Vec<Duration>>,
}

impl Sleeper for NoSleep {
    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
