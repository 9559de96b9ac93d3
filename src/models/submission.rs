use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form field mapping as posted by the reporting form.
pub type FormData = Map<String, Value>;

const ID_SUFFIX_LEN: usize = 9;
const ID_MAX_LEN: usize = 128;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    /// Creation time in Unix milliseconds; the summary sort key.
    pub timestamp: i64,
    pub submitted_at: DateTime<Utc>,
    pub data: FormData,
}

impl Submission {
    pub fn new(data: FormData) -> Self {
        Self::at(data, Utc::now())
    }

    /// Build a submission stamped with the given creation time.
    pub fn at(data: FormData, now: DateTime<Utc>) -> Self {
        Self {
            id: generate_id(now),
            timestamp: now.timestamp_millis(),
            submitted_at: now,
            data,
        }
    }

    /// Text form of a scalar field. Numbers and booleans are stringified,
    /// empty strings and non-scalars count as missing.
    pub fn field_text(&self, key: &str) -> Option<String> {
        scalar_text(self.data.get(key)?)
    }
}

pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// `<unix-millis>_<9 base36 chars>`
pub fn generate_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect();
    format!("{}_{suffix}", now.timestamp_millis())
}

/// Whether an id taken from a request path can name a record file.
pub fn is_valid_id(id: &str) -> bool {
    !id.is_empty()
        && id.len() <= ID_MAX_LEN
        && id
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
