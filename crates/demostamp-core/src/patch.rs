//! Per-item patching.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::synth::{IdShape, SynthError};

/// `href` template for items that lack one.
pub const HREF_PREFIX: &str = "https://chatgpt.com/c/";

#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("item id must be a string, got `{id}`")]
    NonStringId { id: String },
    #[error("{what} must be an object")]
    NotAnObject { what: String },
    #[error("{what} must be an array")]
    NotAnArray { what: String },
    #[error(transparent)]
    Synth(#[from] SynthError),
}

/// What [`patch_item`] changed on one item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub href_filled: bool,
    pub gizmo_normalized: bool,
    pub create_written: bool,
    pub update_written: bool,
    pub pinned_written: bool,
}

/// Patch one item in place.
///
/// Returns `Ok(None)` and leaves the item untouched when it has no `id`.
/// Otherwise:
/// - `href` is set to `HREF_PREFIX + id` when missing or falsy
/// - `gizmoId: ""` becomes `gizmoId: null`
/// - `createTime`/`updateTime`/`pinnedTime` are written when missing, or
///   always when `overwrite` is set; `pinnedTime` is always `null`
pub fn patch_item(
    item: &mut Map<String, Value>,
    now: DateTime<Utc>,
    overwrite: bool,
) -> Result<Option<ItemPatch>, PatchError> {
    let id = match item.get("id") {
        None => return Ok(None),
        Some(Value::String(id)) => id.clone(),
        Some(other) => {
            return Err(PatchError::NonStringId {
                id: other.to_string(),
            })
        }
    };

    let mut patch = ItemPatch::default();

    if item.get("href").map_or(true, is_falsy) {
        item.insert("href".to_string(), Value::String(format!("{HREF_PREFIX}{id}")));
        patch.href_filled = true;
    }

    if let Some(gizmo) = item.get_mut("gizmoId") {
        if gizmo.as_str() == Some("") {
            *gizmo = Value::Null;
            patch.gizmo_normalized = true;
        }
    }

    let shape = IdShape::classify(&id)?;
    let times = shape.times(&id, now)?;
    tracing::debug!(id = %id, shape = ?shape, "synthesized item times");

    if overwrite || !item.contains_key("createTime") {
        item.insert("createTime".to_string(), Value::String(times.create_iso()));
        patch.create_written = true;
    }
    if overwrite || !item.contains_key("updateTime") {
        item.insert("updateTime".to_string(), Value::String(times.update_iso()));
        patch.update_written = true;
    }
    if overwrite || !item.contains_key("pinnedTime") {
        item.insert("pinnedTime".to_string(), Value::Null);
        patch.pinned_written = true;
    }

    Ok(Some(patch))
}

/// Truthiness as the fixture tooling has always treated `href`: null, false,
/// zero and empty strings/arrays/objects count as missing.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}
