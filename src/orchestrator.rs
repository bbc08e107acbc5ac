//! Run orchestration: teardown, create, link, load, report.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{error, info, warn};

use crate::client::{Calendar, Chat, DocumentStore};
use crate::provision::{
    BulkLoader, RelationReport, RelationResolver, RetryPolicy, SchemaProvisioner, Sleeper,
    TableIds, ThreadSleeper,
};
use crate::schema::{StatusKind, TableTemplate};

pub const COMPLETE_MESSAGE: &str = "✅ Notion automation complete";

/// Per-run inputs that are not collaborators
#[derive(Debug, Clone)]
pub struct RunSettings<'a> {
    pub parent_id: &'a str,
    pub default_person: Option<&'a str>,
    pub status_kind: StatusKind,
    pub status_poll: RetryPolicy,
}

/// Outcome of one provisioning run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub deleted: usize,
    pub tables: TableIds,
    pub relations: RelationReport,
    /// Created row ids per template title
    pub rows: HashMap<&'static str, Vec<String>>,
}

impl RunSummary {
    pub fn created_tables(&self) -> usize {
        self.tables.values().filter(|id| id.is_some()).count()
    }

    pub fn created_rows(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }
}

/// Send the completion message on success.
///
/// On failure the error is logged, sent to the error path, and returned.
pub fn report<T>(chat: &dyn Chat, outcome: Result<T>) -> Result<T> {
    match outcome {
        Ok(value) => {
            if let Err(e) = chat.send_message(COMPLETE_MESSAGE, None) {
                warn!("Failed to send completion message: {}", e);
            }
            Ok(value)
        }
        Err(e) => {
            error!("Unhandled error: {:#}", e);
            if let Err(chat_err) = chat.send_error(&e) {
                warn!("Failed to report error to chat: {}", chat_err);
            }
            Err(e)
        }
    }
}

pub struct Orchestrator<'a> {
    store: &'a dyn DocumentStore,
    calendar: &'a dyn Calendar,
    chat: &'a dyn Chat,
    settings: RunSettings<'a>,
    sleeper: &'a dyn Sleeper,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        store: &'a dyn DocumentStore,
        calendar: &'a dyn Calendar,
        chat: &'a dyn Chat,
        settings: RunSettings<'a>,
    ) -> Self {
        Self {
            store,
            calendar,
            chat,
            settings,
            sleeper: &ThreadSleeper,
        }
    }

    pub fn with_sleeper(mut self, sleeper: &'a dyn Sleeper) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Run the workflow and report the outcome to chat.
    pub fn run_and_report(&self, templates: &[&'static TableTemplate]) -> Result<RunSummary> {
        report(self.chat, self.run(templates))
    }

    /// Teardown, create every table, resolve relations, load samples
    pub fn run(&self, templates: &[&'static TableTemplate]) -> Result<RunSummary> {
        let provisioner = SchemaProvisioner::new(self.store, self.settings.parent_id, self.sleeper)
            .with_status_kind(self.settings.status_kind)
            .with_poll(self.settings.status_poll);

        info!("== Deleting existing tables ==");
        let deleted = match provisioner.delete_all_tables() {
            Ok(count) => count,
            Err(e) => {
                error!("Failed to list existing tables: {}", e);
                0
            }
        };

        info!("== Creating {} tables ==", templates.len());
        let tables = provisioner.create_all(templates);
        if !templates.is_empty() && tables.values().all(Option::is_none) {
            error!(
                "No tables could be created under parent {}",
                self.settings.parent_id
            );
        }

        info!("== Resolving relations ==");
        let relations = RelationResolver::new(self.store).resolve_relations(templates, &tables);

        info!("== Loading sample rows ==");
        let loader = BulkLoader::new(
            self.store,
            self.calendar,
            &provisioner,
            self.settings.default_person,
        );
        let mut rows: HashMap<&'static str, Vec<String>> = HashMap::new();

        for template in templates {
            let Some(table_id) = tables.get(template.title).and_then(|id| id.as_deref()) else {
                warn!("Skipping sample rows for {}: table was not created", template.title);
                continue;
            };
            let related = template
                .related_source
                .and_then(|source| rows.get(source))
                .map(Vec::as_slice)
                .unwrap_or_default();

            match loader.load_samples(table_id, template, related) {
                Ok(created) => {
                    rows.insert(template.title, created);
                }
                Err(e) => error!("Failed to load sample rows into {}: {}", template.title, e),
            }
        }

        let summary = RunSummary {
            deleted,
            tables,
            relations,
            rows,
        };
        info!(
            "== Done: {} tables, {} rows, {} relations linked ==",
            summary.created_tables(),
            summary.created_rows(),
            summary.relations.patched
        );
        Ok(summary)
    }
}
