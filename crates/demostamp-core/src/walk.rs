//! Document traversal: `projects[*].conversations[*]`, then `singles[*]`.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::patch::{patch_item, ItemPatch, PatchError};

/// Summary of one walk over a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchStats {
    /// Entries found in `conversations`/`singles`.
    pub visited: usize,
    /// Entries that were not objects or had no `id`.
    pub skipped: usize,
    pub href_filled: usize,
    pub gizmo_normalized: usize,
    pub create_written: usize,
    pub update_written: usize,
    pub pinned_written: usize,
}

impl PatchStats {
    pub fn patched(&self) -> usize {
        self.visited - self.skipped
    }

    fn record(&mut self, patch: Option<ItemPatch>) {
        self.visited += 1;
        let Some(p) = patch else {
            self.skipped += 1;
            return;
        };
        self.href_filled += usize::from(p.href_filled);
        self.gizmo_normalized += usize::from(p.gizmo_normalized);
        self.create_written += usize::from(p.create_written);
        self.update_written += usize::from(p.update_written);
        self.pinned_written += usize::from(p.pinned_written);
    }
}

/// Patch every item of a fixture document in place.
///
/// Missing `projects`, `singles` or `conversations` keys count as empty.
/// Present ones must be arrays; the root and every project must be objects.
/// Non-object entries inside an item list are skipped.
pub fn walk_document(
    doc: &mut Value,
    now: DateTime<Utc>,
    overwrite: bool,
) -> Result<PatchStats, PatchError> {
    let mut stats = PatchStats::default();
    let root = doc.as_object_mut().ok_or_else(|| PatchError::NotAnObject {
        what: "document root".to_string(),
    })?;

    if let Some(projects) = root.get_mut("projects") {
        let projects = as_array(projects, "projects")?;
        for (pi, project) in projects.iter_mut().enumerate() {
            let project = project
                .as_object_mut()
                .ok_or_else(|| PatchError::NotAnObject {
                    what: format!("projects[{pi}]"),
                })?;
            if let Some(conversations) = project.get_mut("conversations") {
                let items = as_array(conversations, &format!("projects[{pi}].conversations"))?;
                patch_items(items, now, overwrite, &mut stats)?;
            }
        }
    }

    if let Some(singles) = root.get_mut("singles") {
        let items = as_array(singles, "singles")?;
        patch_items(items, now, overwrite, &mut stats)?;
    }

    tracing::info!(
        visited = stats.visited,
        skipped = stats.skipped,
        overwrite,
        "patched document"
    );
    Ok(stats)
}

fn patch_items(
    items: &mut [Value],
    now: DateTime<Utc>,
    overwrite: bool,
    stats: &mut PatchStats,
) -> Result<(), PatchError> {
    for item in items.iter_mut() {
        let patch = match item.as_object_mut() {
            Some(obj) => patch_item(obj, now, overwrite)?,
            None => None,
        };
        if patch.is_none() {
            tracing::debug!(item = %short(item), "skipped item without id");
        }
        stats.record(patch);
    }
    Ok(())
}

fn as_array<'v>(value: &'v mut Value, what: &str) -> Result<&'v mut Vec<Value>, PatchError> {
    value.as_array_mut().ok_or_else(|| PatchError::NotAnArray {
        what: what.to_string(),
    })
}

fn short(item: &Value) -> String {
    let text = item.to_string();
    match text.char_indices().nth(60) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}
