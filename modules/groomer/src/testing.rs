// Test mocks for the grooming pipeline.
//
// One mock matching the one trait boundary:
// - ScriptedClassifier (TicketClassifier) — HashMap-based description→reply
//   with failure injection
//
// Plus helpers for constructing tickets and raw model replies.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;

use llm_client::LlmError;

use crate::classifier::TicketClassifier;
use crate::ticket::Ticket;

// ---------------------------------------------------------------------------
// ScriptedClassifier
// ---------------------------------------------------------------------------

/// HashMap-based classifier. Returns the registered raw reply for a
/// description, a forced transport error for descriptions registered as
/// failing, and `Err` for anything unregistered (unless a default reply
/// is set). Builder pattern: `.on()`, `.failing_on()`, `.with_default()`.
pub struct ScriptedClassifier {
    replies: HashMap<String, String>,
    failures: HashSet<String>,
    default_reply: Option<String>,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            failures: HashSet::new(),
            default_reply: None,
        }
    }

    pub fn on(mut self, description: &str, reply: &str) -> Self {
        self.replies.insert(description.to_string(), reply.to_string());
        self
    }

    pub fn failing_on(mut self, description: &str) -> Self {
        self.failures.insert(description.to_string());
        self
    }

    pub fn with_default(mut self, reply: &str) -> Self {
        self.default_reply = Some(reply.to_string());
        self
    }
}

impl Default for ScriptedClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TicketClassifier for ScriptedClassifier {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn classify(&self, description: &str) -> Result<String, LlmError> {
        if self.failures.contains(description) {
            return Err(LlmError::Network(format!(
                "ScriptedClassifier: forced failure for {description}"
            )));
        }
        if let Some(reply) = self.replies.get(description) {
            return Ok(reply.clone());
        }
        if let Some(ref reply) = self.default_reply {
            return Ok(reply.clone());
        }
        Err(LlmError::Network(format!(
            "ScriptedClassifier: no reply registered for {description}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Build a ticket fixture.
pub fn ticket(issue_key: &str, description: &str) -> Ticket {
    Ticket {
        issue_key: issue_key.to_string(),
        description: description.to_string(),
    }
}

/// Render a raw model reply carrying the given verdict fields.
pub fn verdict_reply(flag: bool, reasoning: &str, category: &str) -> String {
    format!(
        r#"{{"governanceFlag": {flag}, "reasoning": "{reasoning}", "category": "{category}"}}"#
    )
}

/// Wrap a reply body in a fenced code block with a `json` tag.
pub fn fenced(body: &str) -> String {
    format!("```json\n{body}\n```")
}

// ---------------------------------------------------------------------------
// ScriptedClassifier self-tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registered_reply_is_returned() {
        let classifier = ScriptedClassifier::new().on("desc", "reply");
        assert_eq!(classifier.classify("desc").await.unwrap(), "reply");
    }

    #[tokio::test]
    async fn forced_failure_is_a_network_error() {
        let classifier = ScriptedClassifier::new().failing_on("desc");
        let err = classifier.classify("desc").await.unwrap_err();
        assert!(matches!(err, LlmError::Network(_)));
    }

    #[tokio::test]
    async fn unregistered_description_errors_without_default() {
        let classifier = ScriptedClassifier::new();
        assert!(classifier.classify("unknown").await.is_err());

        let classifier = ScriptedClassifier::new().with_default("fallback");
        assert_eq!(classifier.classify("unknown").await.unwrap(), "fallback");
    }
}
