use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Submission;

/// Listing projection of a [`Submission`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub id: String,
    pub company_name: Option<String>,
    pub selection_year: Option<String>,
    pub timestamp: i64,
    pub submitted_at: DateTime<Utc>,
}

impl From<&Submission> for SummaryEntry {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id.clone(),
            company_name: submission.field_text("companyName"),
            selection_year: submission.field_text("selectionYear"),
            timestamp: submission.timestamp,
            submitted_at: submission.submitted_at,
        }
    }
}
