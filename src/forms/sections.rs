//! Expand/collapse state of the sections of a long form

use std::collections::HashSet;

use super::schema::FormSchema;

/// Tracks which sections of one form instance are expanded.
///
/// Each known section is either collapsed or expanded; any number may be
/// expanded at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionController {
    /// Known section ids, in display order
    order: Vec<String>,
    known: HashSet<String>,
    expanded: HashSet<String>,
}

impl SectionController {
    /// Ids in `open_by_default` that are not known are ignored.
    pub fn new<I, S>(sections: I, open_by_default: &[&str]) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let order: Vec<String> = sections.into_iter().map(Into::into).collect();
        let known: HashSet<String> = order.iter().cloned().collect();
        let expanded = open_by_default
            .iter()
            .filter(|id| known.contains(**id))
            .map(|id| id.to_string())
            .collect();

        Self {
            order,
            known,
            expanded,
        }
    }

    /// Sections of `schema`, with its `default_open` sections expanded
    pub fn for_schema(schema: &FormSchema) -> Self {
        Self::new(schema.section_ids(), &schema.default_open)
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip `id` between collapsed and expanded. Unknown ids are ignored.
    pub fn toggle(&mut self, id: &str) {
        if !self.known.contains(id) {
            tracing::debug!(section = id, "Ignoring toggle of unknown section");
            return;
        }
        if !self.expanded.remove(id) {
            self.expanded.insert(id.to_string());
        }
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Percentage (0-100, rounded down) of known sections for which
    /// `is_complete` holds. A form without sections is complete.
    pub fn completion_percent<F>(&self, is_complete: F) -> u8
    where
        F: Fn(&str) -> bool,
    {
        if self.order.is_empty() {
            return 100;
        }
        let complete = self.order.iter().filter(|id| is_complete(id)).count();
        (complete * 100 / self.order.len()) as u8
    }
}
