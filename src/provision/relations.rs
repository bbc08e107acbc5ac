use serde_json::{json, Map, Value};
use tracing::{info, warn};

use super::tables::TableIds;
use crate::client::DocumentStore;
use crate::schema::TableTemplate;

/// Counts from one relation-resolution pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelationReport {
    pub patched: usize,
    /// Owner or target table was never created
    pub skipped: usize,
    pub failed: usize,
}

/// Relation definition pointing at `target_id`, one-sided
pub fn relation_definition(target_id: &str) -> Value {
    json!({
        "relation": {
            "database_id": target_id,
            "type": "single_property",
            "single_property": {},
        }
    })
}

/// Patches deferred relation columns once every table has an id
pub struct RelationResolver<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> RelationResolver<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Must run after every creation attempt in `ids` has finished.
    pub fn resolve_relations(&self, templates: &[&TableTemplate], ids: &TableIds) -> RelationReport {
        let mut report = RelationReport::default();

        for template in templates {
            let table_id = ids.get(template.title).and_then(|id| id.as_deref());

            for (column, target) in template.deferred_relations() {
                let Some(table_id) = table_id else {
                    warn!("Skipping relation {} on {}: table was not created", column, template.title);
                    report.skipped += 1;
                    continue;
                };
                let Some(target_id) = ids.get(target).and_then(|id| id.as_deref()) else {
                    warn!(
                        "Skipping relation {} on {}: target {} was not created",
                        column, template.title, target
                    );
                    report.skipped += 1;
                    continue;
                };

                let mut patch = Map::new();
                patch.insert(column.to_string(), relation_definition(target_id));

                match self.store.update_table(table_id, &patch) {
                    Ok(()) => {
                        info!("Linked {}.{} -> {}", template.title, column, target);
                        report.patched += 1;
                    }
                    Err(e) => {
                        warn!("Failed to link {}.{} -> {}: {}", template.title, column, target, e);
                        report.failed += 1;
                    }
                }
            }
        }

        report
    }
}
