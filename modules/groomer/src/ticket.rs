use serde::Serialize;

use crate::verdict::Verdict;

/// One row of the input tracker export.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub issue_key: String,
    pub description: String,
}

/// A ticket whose verdict calls for governance review, shaped for the
/// output CSV. Field order is the output column order.
#[derive(Debug, Clone, Serialize)]
pub struct FlaggedRecord {
    #[serde(rename = "Issue key")]
    pub issue_key: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Governance Flag")]
    pub governance_flag: bool,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Reasoning")]
    pub reasoning: String,
}

impl FlaggedRecord {
    pub fn new(ticket: &Ticket, verdict: Verdict) -> Self {
        Self {
            issue_key: ticket.issue_key.clone(),
            description: ticket.description.clone(),
            governance_flag: verdict.governance_flag,
            category: verdict.category,
            reasoning: verdict.reasoning,
        }
    }
}
