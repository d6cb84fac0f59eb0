//! Loose-format loader for demo fixtures
//!
//! Fixtures come in two flavors:
//! - strict JSON (`demo.json`)
//! - a TS-like module holding one object literal
//!   (`export const DEMO = { projects: [...], singles: [...] };`)
//!
//! Strict JSON is tried first. If that fails, the text is pushed through a
//! fixed sequence of narrow regex rewrites and parsed as JSON again:
//!
//! 1. strip `/* ... */` and `// ...` comments
//! 2. unwrap `export const NAME = { ... };`
//! 3. drop one trailing `;`
//! 4. quote bare identifier keys (`foo:` -> `"foo":`) after `{`, `[` or `,`
//! 5. drop trailing commas before `}` / `]`
//!
//! This is not a JSON5 parser. The rewrites are text-level and know nothing
//! about string literals, so a `//` or `/*` inside a string value is treated as
//! a comment, and a `,name:` inside a string value gets quoted. Single-quoted
//! strings and non-identifier bare keys are rejected by the final JSON parse.
//! Those inputs are out of contract; keep the transform list as is.

use regex::Regex;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Both the strict parse and the object-literal parse failed. Carries the
    /// error of the second attempt.
    #[error("input is neither JSON nor a supported object literal: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Parse fixture text, strict JSON first, object literal second.
pub fn load_any(raw: &str) -> Result<Value, LoadError> {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return Ok(value);
    }

    let json_text = object_literal_to_json_text(raw);
    Ok(serde_json::from_str(&json_text)?)
}

/// Rewrite a TS-like object literal into (hopefully) strict JSON text.
///
/// Assumes keys are plain identifiers and values are double-quoted strings,
/// numbers, `true`/`false`/`null`, arrays and objects.
pub fn object_literal_to_json_text(src: &str) -> String {
    let s = strip_js_comments(src);
    let s = unwrap_export_const(s.trim());
    let s = strip_trailing_semicolon(&s);
    let s = quote_bare_keys(&s);
    strip_trailing_commas(&s)
}

/// Remove `/* ... */` (non-greedy, across lines) and `// ...` (to end of line).
pub fn strip_js_comments(s: &str) -> String {
    let block = Regex::new(r"(?s)/\*.*?\*/").unwrap();
    let line = Regex::new(r"(?m)//.*?$").unwrap();
    let s = block.replace_all(s, "");
    line.replace_all(&s, "").into_owned()
}

/// If the text holds `export const NAME = {...};`, keep only the `{...}`.
///
/// The match is unanchored at the start, so anything before `export` goes too.
pub fn unwrap_export_const(s: &str) -> String {
    let re = Regex::new(r"(?s)export\s+const\s+\w+\s*=\s*(\{.*\})\s*;?\s*$").unwrap();
    match re.captures(s) {
        Some(caps) => caps[1].to_string(),
        None => s.to_string(),
    }
}

pub fn strip_trailing_semicolon(s: &str) -> String {
    let re = Regex::new(r";\s*$").unwrap();
    re.replace_all(s, "").into_owned()
}

/// `{ foo: 1, bar: [ baz: ...` -> `{ "foo": 1, "bar": [ "baz": ...`
pub fn quote_bare_keys(s: &str) -> String {
    let re = Regex::new(r"([{\[,]\s*)([A-Za-z_][A-Za-z0-9_]*)\s*:").unwrap();
    re.replace_all(s, r#"${1}"${2}":"#).into_owned()
}

pub fn strip_trailing_commas(s: &str) -> String {
    let re = Regex::new(r",\s*([}\]])").unwrap();
    re.replace_all(s, "${1}").into_owned()
}
