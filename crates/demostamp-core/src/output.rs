//! Output serialization.

use serde_json::Value;

/// Pretty JSON (2-space indent, non-ASCII kept literal) plus one trailing newline.
pub fn to_pretty_json(doc: &Value) -> Result<String, serde_json::Error> {
    let mut text = serde_json::to_string_pretty(doc)?;
    text.push('\n');
    Ok(text)
}
