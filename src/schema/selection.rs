use super::tables::ALL_TEMPLATES;
use super::types::TableTemplate;
use std::collections::{HashSet, VecDeque};

/// Resolves which templates a run must provision
pub struct TemplateSelector {
    templates: &'static [&'static TableTemplate],
}

impl TemplateSelector {
    pub fn new(templates: &'static [&'static TableTemplate]) -> Self {
        Self { templates }
    }

    fn get(&self, title: &str) -> Option<&'static TableTemplate> {
        self.templates.iter().find(|t| t.title == title).copied()
    }

    /// Given requested titles, add every template they depend on.
    /// Returns templates in catalog order.
    pub fn resolve_includes(&self, requested: &[&str]) -> Result<Vec<&'static TableTemplate>, String> {
        let mut included: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = requested.iter().copied().collect();

        while let Some(title) = queue.pop_front() {
            if included.contains(title) {
                continue;
            }

            let template = self
                .get(title)
                .ok_or_else(|| format!("Unknown template: {}", title))?;
            included.insert(template.title);

            for dep in template.dependencies() {
                if !included.contains(dep) {
                    queue.push_back(dep);
                }
            }
        }

        Ok(self
            .templates
            .iter()
            .filter(|t| included.contains(t.title))
            .copied()
            .collect())
    }

    pub fn all(&self) -> Vec<&'static TableTemplate> {
        self.templates.to_vec()
    }
}

impl Default for TemplateSelector {
    fn default() -> Self {
        Self::new(ALL_TEMPLATES)
    }
}
