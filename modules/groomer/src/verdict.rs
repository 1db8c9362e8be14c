use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Category recorded when a verdict names none.
pub const NO_CATEGORY: &str = "N/A";

/// The governance classification outcome for one ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub governance_flag: bool,
    pub reasoning: String,
    pub category: String,
}

impl Default for Verdict {
    fn default() -> Self {
        Self {
            governance_flag: false,
            reasoning: String::new(),
            category: NO_CATEGORY.to_string(),
        }
    }
}

impl Verdict {
    /// Synthetic verdict recorded when the model call itself failed.
    pub fn unable_to_analyze() -> Self {
        Self {
            reasoning: "Error: Unable to analyze".to_string(),
            ..Self::default()
        }
    }

    /// Total normalization of a recovered JSON object. Never fails:
    /// missing or oddly typed fields fall back to defaults.
    pub fn from_value(value: &serde_json::Value) -> Self {
        Self {
            governance_flag: value.get("governanceFlag").map(truthy).unwrap_or(false),
            reasoning: value
                .get("reasoning")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string(),
            category: value
                .get("category")
                .and_then(|v| v.as_str())
                .unwrap_or(NO_CATEGORY)
                .to_string(),
        }
    }
}

/// JavaScript-style truthiness for loosely typed model output.
fn truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_is_unflagged_with_sentinel_category() {
        let verdict = Verdict::default();
        assert!(!verdict.governance_flag);
        assert_eq!(verdict.reasoning, "");
        assert_eq!(verdict.category, "N/A");
    }

    #[test]
    fn empty_object_normalizes_to_default() {
        assert_eq!(Verdict::from_value(&json!({})), Verdict::default());
    }

    #[test]
    fn complete_verdict_passes_through_unchanged() {
        let value = json!({
            "governanceFlag": true,
            "reasoning": "x",
            "category": "Data Privacy and Security"
        });
        let verdict = Verdict::from_value(&value);
        assert!(verdict.governance_flag);
        assert_eq!(verdict.reasoning, "x");
        assert_eq!(verdict.category, "Data Privacy and Security");
    }

    #[test]
    fn flag_uses_loose_truthiness() {
        assert!(Verdict::from_value(&json!({"governanceFlag": true})).governance_flag);
        assert!(Verdict::from_value(&json!({"governanceFlag": 1})).governance_flag);
        assert!(Verdict::from_value(&json!({"governanceFlag": "yes"})).governance_flag);
        assert!(!Verdict::from_value(&json!({"governanceFlag": false})).governance_flag);
        assert!(!Verdict::from_value(&json!({"governanceFlag": 0})).governance_flag);
        assert!(!Verdict::from_value(&json!({"governanceFlag": ""})).governance_flag);
        assert!(!Verdict::from_value(&json!({"governanceFlag": null})).governance_flag);
    }

    #[test]
    fn non_string_category_defaults_rather_than_coerces() {
        let verdict = Verdict::from_value(&json!({"governanceFlag": true, "category": 7}));
        assert_eq!(verdict.category, "N/A");
    }

    #[test]
    fn unable_to_analyze_is_unflagged() {
        let verdict = Verdict::unable_to_analyze();
        assert!(!verdict.governance_flag);
        assert_eq!(verdict.reasoning, "Error: Unable to analyze");
        assert_eq!(verdict.category, "N/A");
    }

    #[test]
    fn wire_names_are_camel_case() {
        let json = serde_json::to_value(Verdict::default()).unwrap();
        assert!(json.get("governanceFlag").is_some());
        assert!(json.get("reasoning").is_some());
        assert!(json.get("category").is_some());
    }
}
