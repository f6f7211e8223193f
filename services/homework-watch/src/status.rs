//! Review status interpretation

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::validator::SubmissionRecord;
use crate::WatchError;

/// The review states the status API is known to report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Human-readable verdict sent to the user
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Reviewed: the reviewer liked it. Success.",
            HomeworkStatus::Reviewing => "Taken up for review by the reviewer.",
            HomeworkStatus::Rejected => "Reviewed: the reviewer has remarks.",
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = WatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(WatchError::UnknownStatus(other.to_string())),
        }
    }
}

/// Compose the status message for the newest submission.
///
/// Returns `Ok(None)` when there is nothing to report. Only the first record
/// is looked at; the API orders submissions newest first.
pub fn interpret(records: &[SubmissionRecord]) -> crate::Result<Option<String>> {
    let Some(newest) = records.first() else {
        return Ok(None);
    };

    if newest.fields().is_none() {
        return Err(WatchError::MalformedResponse(
            "newest homework entry is not an object".to_string(),
        ));
    }

    let status: HomeworkStatus = match newest.get("status") {
        Some(Value::String(status)) => status.parse()?,
        Some(other) => return Err(WatchError::UnknownStatus(other.to_string())),
        None => return Err(WatchError::UnknownStatus("<missing>".to_string())),
    };

    let name = newest
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(WatchError::MissingField("homework_name"))?;

    Ok(Some(status_message(name, status)))
}

/// The notification text for a submission in the given state
pub fn status_message(name: &str, status: HomeworkStatus) -> String {
    format!(
        "Changed review status for \"{}\". {}",
        name,
        status.verdict()
    )
}
