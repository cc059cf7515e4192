//! Claim document loading.
//!
//! Files ending in `.yaml` or `.yml` are parsed as YAML, everything else as
//! JSON. Both end up as a `serde_json::Value` so the library sees one shape.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::{Map, Value as JsonValue};

/// Read and parse a JSON or YAML document.
pub fn load_document(path: &Path) -> Result<JsonValue> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    if is_yaml(path) {
        serde_yaml::from_str(&content).with_context(|| format!("parsing YAML: {}", path.display()))
    } else {
        serde_json::from_str(&content).with_context(|| format!("parsing JSON: {}", path.display()))
    }
}

/// Read a document whose top level must be a claim set object.
pub fn load_claims(path: &Path) -> Result<Map<String, JsonValue>> {
    match load_document(path)? {
        JsonValue::Object(claims) => Ok(claims),
        other => bail!(
            "{}: expected a claim set object, found {}",
            path.display(),
            kind(&other)
        ),
    }
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}

fn kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
