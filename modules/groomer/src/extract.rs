use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

/// The model reply held no recoverable verdict object.
#[derive(Debug, Error)]
#[error("no valid verdict found in model response")]
pub struct ExtractError {
    /// The unmodified reply, kept for diagnostics.
    pub raw: String,
}

static RE_FENCED_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").unwrap());
static RE_LOOSE_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)\{.*?"governanceFlag".*?\}"#).unwrap());

/// Recover a verdict object from a raw model reply.
///
/// Strategies run strictly in order, first success wins:
/// 1. direct parse of the trimmed reply
/// 2. body of the first fenced code block (optional `json` tag)
/// 3. loose scan for the smallest `{...}` span naming `governanceFlag`
pub fn extract_verdict(raw: &str) -> Result<serde_json::Value, ExtractError> {
    let trimmed = raw.trim();

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        if value.is_object() {
            return Ok(value);
        }
    }

    // A fence whose body does not parse falls through to the loose scan.
    if let Some(captures) = RE_FENCED_BLOCK.captures(trimmed) {
        if let Some(body) = captures.get(1) {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(body.as_str()) {
                if value.is_object() {
                    return Ok(value);
                }
            }
        }
    }

    if let Some(found) = RE_LOOSE_OBJECT.find(trimmed) {
        if let Ok(value) = serde_json::from_str::<serde_json::Value>(found.as_str()) {
            if value.is_object() {
                return Ok(value);
            }
        }
    }

    Err(ExtractError {
        raw: raw.to_string(),
    })
}
