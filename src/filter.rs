use crate::schema::{TableTemplate, TemplateSelector};
use anyhow::{anyhow, Result};
use tracing::info;

/// Resolves which templates to provision based on the include filter
pub fn resolve_templates(include: Option<Vec<String>>) -> Result<Vec<&'static TableTemplate>> {
    let selector = TemplateSelector::default();

    match include {
        Some(include_list) => {
            let refs: Vec<&str> = include_list.iter().map(|s| s.as_str()).collect();
            info!("Resolving dependencies for: {:?}", refs);
            let templates = selector.resolve_includes(&refs).map_err(|e| anyhow!(e))?;

            info!("Including {} templates:", templates.len());
            for t in &templates {
                info!("  - {}", t.title);
            }

            Ok(templates)
        }
        None => {
            let templates = selector.all();
            info!("Including all {} templates", templates.len());
            Ok(templates)
        }
    }
}
