//! Shape checks for status API responses

use serde_json::{Map, Value};

use crate::WatchError;

/// One homework submission as reported by the status API.
///
/// Entries are kept as the API sent them. Only the newest one is ever
/// interpreted, so an odd older entry does not fail the cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRecord(Value);

impl SubmissionRecord {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// The entry's fields, or `None` when the entry is not an object
    pub fn fields(&self) -> Option<&Map<String, Value>> {
        self.0.as_object()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields().and_then(|fields| fields.get(field))
    }
}

/// Extract the submission list from a raw response, newest first.
pub fn validate(raw: &Value) -> crate::Result<Vec<SubmissionRecord>> {
    let body = raw.as_object().ok_or_else(|| {
        WatchError::MalformedResponse("response body is not a JSON object".to_string())
    })?;

    let homeworks = body.get("homeworks").ok_or_else(|| {
        WatchError::MalformedResponse("response has no 'homeworks' key".to_string())
    })?;

    let items = homeworks.as_array().ok_or_else(|| {
        WatchError::MalformedResponse("'homeworks' is not a list".to_string())
    })?;

    Ok(items.iter().cloned().map(SubmissionRecord::new).collect())
}

/// The server timestamp to use as the next cursor, if the response carries one
pub fn current_date(raw: &Value) -> Option<i64> {
    raw.get("current_date").and_then(Value::as_i64)
}
