use std::collections::HashMap;
use std::thread;

use serde_json::Map;
use tracing::{debug, error, info, warn};

use super::retry::{RetryPolicy, Sleeper};
use crate::client::DocumentStore;
use crate::error::StoreError;
use crate::schema::{LiveSchema, StatusKind, StatusOptions, TableTemplate, STATUS_COLUMN};

/// Template title to created table id; `None` when creation failed
pub type TableIds = HashMap<&'static str, Option<String>>;

/// Outcome of a status column check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCheck {
    /// Column already had the expected kind; nothing was sent
    AlreadyValid,
    /// Column was (re)created and the change became visible
    Repaired,
    /// Column was (re)created but never became visible while polling
    NotConverged,
}

/// Creates and tears down tables under one parent page
pub struct SchemaProvisioner<'a> {
    store: &'a dyn DocumentStore,
    parent_id: &'a str,
    status_kind: StatusKind,
    poll: RetryPolicy,
    sleeper: &'a dyn Sleeper,
}

impl<'a> SchemaProvisioner<'a> {
    pub fn new(store: &'a dyn DocumentStore, parent_id: &'a str, sleeper: &'a dyn Sleeper) -> Self {
        Self {
            store,
            parent_id,
            status_kind: StatusKind::default(),
            poll: RetryPolicy::default(),
            sleeper,
        }
    }

    pub fn with_status_kind(mut self, status_kind: StatusKind) -> Self {
        self.status_kind = status_kind;
        self
    }

    pub fn with_poll(mut self, poll: RetryPolicy) -> Self {
        self.poll = poll;
        self
    }

    /// Whether the live status column exists with the expected kind
    pub fn status_is_valid(&self, live: &LiveSchema) -> bool {
        live.kind_of(STATUS_COLUMN) == Some(&self.status_kind.property_kind())
    }

    /// Create one table from its template, then make sure its status column is usable.
    ///
    /// Deferred relation columns are left out; they are patched in once every
    /// table has an id.
    pub fn create_table(&self, template: &TableTemplate) -> Result<String, StoreError> {
        let mut columns = template.creation_properties();
        for (name, target) in template.deferred_relations() {
            debug!("Deferring relation {} on {} (target {})", name, template.title, target);
        }
        if columns.contains_key(STATUS_COLUMN) {
            columns.insert(
                STATUS_COLUMN.to_string(),
                self.status_kind.definition(&template.status),
            );
        }

        let table_id = self
            .store
            .create_table(self.parent_id, template.title, template.icon, &columns)?;
        info!("Created table {} ({})", template.title, table_id);

        match self.ensure_status_column(&table_id, &template.status) {
            Ok(StatusCheck::NotConverged) => {
                warn!("Status column on {} has not converged yet", template.title)
            }
            Ok(_) => {}
            Err(e) => warn!("Status column check failed on {}: {}", template.title, e),
        }

        Ok(table_id)
    }

    /// Create every template's table concurrently.
    ///
    /// Returns only once every creation attempt has finished. Failures are
    /// logged and recorded as `None`.
    pub fn create_all(&self, templates: &[&'static TableTemplate]) -> TableIds {
        thread::scope(|scope| {
            let handles: Vec<_> = templates
                .iter()
                .map(|template| (template.title, scope.spawn(move || self.create_table(template))))
                .collect();

            handles
                .into_iter()
                .map(|(title, handle)| {
                    let table_id = match handle.join() {
                        Ok(Ok(id)) => Some(id),
                        Ok(Err(e)) => {
                            error!("Failed to create table {}: {}", title, e);
                            None
                        }
                        Err(_) => {
                            error!("Table creation for {} panicked", title);
                            None
                        }
                    };
                    (title, table_id)
                })
                .collect()
        })
    }

    /// Check the status column and (re)create it when missing or of the wrong kind.
    ///
    /// A repair is followed by polling until the new kind is visible, so
    /// callers can read the schema as soon as this returns `Repaired`.
    pub fn ensure_status_column(
        &self,
        table_id: &str,
        options: &StatusOptions,
    ) -> Result<StatusCheck, StoreError> {
        let live = self.store.retrieve_table(table_id)?;
        if self.status_is_valid(&live) {
            debug!("Status column on {} already valid", table_id);
            return Ok(StatusCheck::AlreadyValid);
        }

        match live.kind_of(STATUS_COLUMN) {
            Some(kind) => info!(
                "Status column on {} is {}, recreating as {}",
                table_id,
                kind.as_str(),
                self.status_kind.property_kind().as_str()
            ),
            None => info!("Status column missing on {}, adding it", table_id),
        }

        let mut patch = Map::new();
        patch.insert(STATUS_COLUMN.to_string(), self.status_kind.definition(options));
        self.store.update_table(table_id, &patch)?;

        let converged = self.poll.poll(self.sleeper, |attempt| -> Result<_, StoreError> {
            let live = self.store.retrieve_table(table_id)?;
            if self.status_is_valid(&live) {
                Ok(Some(()))
            } else {
                debug!("Status column on {} not visible yet (attempt {})", table_id, attempt);
                Ok(None)
            }
        })?;

        Ok(match converged {
            Some(()) => StatusCheck::Repaired,
            None => StatusCheck::NotConverged,
        })
    }

    /// Delete every table under the parent page, following pagination to the end.
    ///
    /// Returns the number of tables deleted. A failed deletion is logged and
    /// skipped; a failed listing ends the teardown with an error.
    pub fn delete_all_tables(&self) -> Result<usize, StoreError> {
        let mut cursor: Option<String> = None;
        let mut deleted = 0;

        loop {
            let page = self.store.list_children(self.parent_id, cursor.as_deref())?;

            for block in page.items.iter().filter(|b| b.is_table()) {
                match self.store.delete_block(&block.id) {
                    Ok(()) => {
                        info!("Deleted old table {}", block.id);
                        deleted += 1;
                    }
                    Err(e) => error!("Failed to delete table {}: {}", block.id, e),
                }
            }

            match page.next_cursor {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        Ok(deleted)
    }
}
