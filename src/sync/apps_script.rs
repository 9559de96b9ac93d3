use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::SyncConfig;
use crate::models::Submission;

use super::{SyncError, SyncOutcome, SyncTarget};

/// Client for a spreadsheet-backed Apps Script web app.
///
/// Creates POST the form fields plus `submissionId`; deletes POST
/// `{"action": "delete", "submissionId": ...}`. Both expect a
/// `{"success": bool, "message": string}` reply.
pub struct AppsScriptClient {
    client: reqwest::Client,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Reply {
    success: bool,
    #[serde(default)]
    message: String,
}

impl AppsScriptClient {
    pub fn new(config: &SyncConfig, timeout: Duration) -> Result<Self, SyncError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let url = match config {
            SyncConfig::Enabled { url } => Some(url.clone()),
            SyncConfig::Disabled => None,
        };
        Ok(Self { client, url })
    }

    async fn post(&self, url: &str, body: &Value) -> Result<Reply, SyncError> {
        let resp = self.client.post(url).json(body).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;

        serde_json::from_str(&text).map_err(|source| SyncError::Decode { status, source })
    }
}

pub fn create_payload(submission: &Submission) -> Value {
    let mut fields = submission.data.clone();
    fields.insert(
        "submissionId".to_string(),
        Value::String(submission.id.clone()),
    );
    Value::Object(fields)
}

pub fn delete_payload(submission_id: &str) -> Value {
    json!({
        "action": "delete",
        "submissionId": submission_id,
    })
}

#[async_trait]
impl SyncTarget for AppsScriptClient {
    fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    async fn sync_create(&self, submission: &Submission) -> Result<SyncOutcome, SyncError> {
        let Some(url) = &self.url else {
            return Ok(SyncOutcome::Skipped);
        };

        let reply = self.post(url, &create_payload(submission)).await?;
        if reply.success {
            Ok(SyncOutcome::Applied {
                message: reply.message,
            })
        } else {
            Ok(SyncOutcome::Rejected {
                message: reply.message,
            })
        }
    }

    async fn sync_delete(&self, submission_id: &str) -> Result<SyncOutcome, SyncError> {
        let Some(url) = &self.url else {
            return Ok(SyncOutcome::Skipped);
        };

        let reply = self.post(url, &delete_payload(submission_id)).await?;
        if reply.success {
            Ok(SyncOutcome::Applied {
                message: reply.message,
            })
        } else {
            Ok(SyncOutcome::AlreadyHandled {
                message: reply.message,
            })
        }
    }
}
