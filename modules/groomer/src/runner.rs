use std::time::Duration;

use tracing::{info, warn};

use llm_client::LlmError;

use crate::classifier::TicketClassifier;
use crate::extract::extract_verdict;
use crate::ticket::{FlaggedRecord, Ticket};
use crate::verdict::Verdict;

/// Pause between model calls so a locally hosted server is not overwhelmed.
pub const PACING_DELAY: Duration = Duration::from_millis(500);

/// Counters from one grooming run.
#[derive(Debug, Default)]
pub struct RunStats {
    pub analyzed: u32,
    pub flagged: u32,
    pub call_failures: u32,
    pub unparseable: u32,
}

impl std::fmt::Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== Grooming Run Complete ===")?;
        writeln!(f, "Tickets analyzed:    {}", self.analyzed)?;
        writeln!(f, "Flagged for review:  {}", self.flagged)?;
        writeln!(f, "Call failures:       {}", self.call_failures)?;
        writeln!(f, "Unparseable replies: {}", self.unparseable)?;
        Ok(())
    }
}

/// Everything a run produced: the flagged subset in input order, plus stats.
pub struct BatchResult {
    pub flagged: Vec<FlaggedRecord>,
    pub stats: RunStats,
}

/// Sequential batch driver. One in-flight request at a time; a failed
/// ticket degrades to an unflagged verdict and the batch continues.
pub struct Runner {
    classifier: Box<dyn TicketClassifier>,
    delay: Duration,
}

impl Runner {
    pub fn new(classifier: Box<dyn TicketClassifier>) -> Self {
        Self {
            classifier,
            delay: PACING_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn preflight(&self) -> Result<(), LlmError> {
        self.classifier.preflight().await
    }

    pub async fn run(&self, tickets: &[Ticket]) -> BatchResult {
        let mut flagged = Vec::new();
        let mut stats = RunStats::default();
        let total = tickets.len();

        for (i, ticket) in tickets.iter().enumerate() {
            info!(
                ticket = i + 1,
                total,
                issue_key = %ticket.issue_key,
                "Analyzing ticket"
            );

            let verdict = match self.classifier.classify(&ticket.description).await {
                Ok(raw) => match extract_verdict(&raw) {
                    Ok(value) => Verdict::from_value(&value),
                    Err(e) => {
                        stats.unparseable += 1;
                        warn!(
                            issue_key = %ticket.issue_key,
                            raw = %e.raw,
                            "Failed to parse model response"
                        );
                        Verdict::default()
                    }
                },
                Err(e) => {
                    stats.call_failures += 1;
                    warn!(
                        issue_key = %ticket.issue_key,
                        backend = self.classifier.name(),
                        error = %e,
                        "Model call failed"
                    );
                    Verdict::unable_to_analyze()
                }
            };

            stats.analyzed += 1;
            if verdict.governance_flag {
                stats.flagged += 1;
                info!(
                    issue_key = %ticket.issue_key,
                    reason = %verdict.reasoning,
                    "Flagged for governance review"
                );
                flagged.push(FlaggedRecord::new(ticket, verdict));
            } else {
                info!(issue_key = %ticket.issue_key, "No governance impact detected");
            }

            if i + 1 < total {
                tokio::time::sleep(self.delay).await;
            }
        }

        BatchResult { flagged, stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ticket, verdict_reply, ScriptedClassifier};

    #[tokio::test]
    async fn flagged_subset_preserves_input_order() {
        let classifier = ScriptedClassifier::new()
            .on("first", &verdict_reply(true, "a", "Cat A"))
            .on("second", &verdict_reply(false, "", "N/A"))
            .on("third", &verdict_reply(true, "c", "Cat C"));
        let runner = Runner::new(Box::new(classifier)).with_delay(Duration::ZERO);

        let tickets = vec![
            ticket("T-1", "first"),
            ticket("T-2", "second"),
            ticket("T-3", "third"),
        ];
        let result = runner.run(&tickets).await;

        let keys: Vec<&str> = result.flagged.iter().map(|r| r.issue_key.as_str()).collect();
        assert_eq!(keys, ["T-1", "T-3"]);
        assert_eq!(result.stats.analyzed, 3);
        assert_eq!(result.stats.flagged, 2);
    }

    #[tokio::test]
    async fn transport_failure_degrades_and_continues() {
        let classifier = ScriptedClassifier::new()
            .failing_on("broken")
            .on("fine", &verdict_reply(true, "ok", "Cat"));
        let runner = Runner::new(Box::new(classifier)).with_delay(Duration::ZERO);

        let tickets = vec![ticket("T-1", "broken"), ticket("T-2", "fine")];
        let result = runner.run(&tickets).await;

        assert_eq!(result.stats.call_failures, 1);
        assert_eq!(result.stats.analyzed, 2);
        assert_eq!(result.flagged.len(), 1);
        assert_eq!(result.flagged[0].issue_key, "T-2");
    }

    #[tokio::test]
    async fn unparseable_reply_degrades_to_unflagged() {
        let classifier = ScriptedClassifier::new().on("garbled", "not json at all");
        let runner = Runner::new(Box::new(classifier)).with_delay(Duration::ZERO);

        let result = runner.run(&[ticket("T-1", "garbled")]).await;

        assert_eq!(result.stats.unparseable, 1);
        assert!(result.flagged.is_empty());
    }

    #[tokio::test]
    async fn empty_batch_produces_empty_result() {
        let runner = Runner::new(Box::new(ScriptedClassifier::new())).with_delay(Duration::ZERO);
        let result = runner.run(&[]).await;

        assert!(result.flagged.is_empty());
        assert_eq!(result.stats.analyzed, 0);
    }

    #[test]
    fn stats_display_is_a_summary_block() {
        let stats = RunStats {
            analyzed: 4,
            flagged: 2,
            call_failures: 1,
            unparseable: 1,
        };
        let rendered = stats.to_string();
        assert!(rendered.contains("=== Grooming Run Complete ==="));
        assert!(rendered.contains("Tickets analyzed:    4"));
        assert!(rendered.contains("Flagged for review:  2"));
    }
}
