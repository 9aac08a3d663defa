//! Log write payloads.

use crate::error::{BookkeepingError, Result};
use crate::wire;
use serde::Serialize;

/// Payload of `POST /logs`.
///
/// Without a parent the `parentLogId` key is left out entirely: its mere
/// presence attaches the log to a reply thread.
///
/// # Examples
///
/// ```
/// use bookkeeping_core::log::CreateLog;
///
/// let log = CreateLog::new("Run 80 started", "Cosmics").with_runs([80]);
/// assert_eq!(
///     serde_json::to_value(&log).unwrap(),
///     serde_json::json!({ "title": "Run 80 started", "text": "Cosmics", "runNumbers": "80" })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLog {
    pub title: String,
    pub text: String,
    #[serde(serialize_with = "wire::comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub run_numbers: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_log_id: Option<u64>,
}

impl CreateLog {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            run_numbers: Vec::new(),
            parent_log_id: None,
        }
    }

    pub fn with_runs(mut self, run_numbers: impl IntoIterator<Item = u64>) -> Self {
        self.run_numbers = run_numbers.into_iter().collect();
        self
    }

    pub fn reply_to(mut self, parent_log_id: u64) -> Self {
        self.parent_log_id = Some(parent_log_id);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(BookkeepingError::invalid_argument("log title must not be empty"));
        }
        if self.text.trim().is_empty() {
            return Err(BookkeepingError::invalid_argument("log text must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_no_parent_omits_field() {
        let payload = serde_json::to_value(CreateLog::new("Title", "Body").with_runs([80])).unwrap();
        assert!(payload.get("parentLogId").is_none());
        assert_eq!(payload["runNumbers"], "80");
    }

    #[test]
    fn test_parent_is_sent_as_given() {
        let zero = serde_json::to_value(CreateLog::new("Title", "Body").reply_to(0)).unwrap();
        let some = serde_json::to_value(CreateLog::new("Title", "Body").reply_to(42)).unwrap();

        assert_eq!(zero["parentLogId"], 0);
        assert_eq!(some["parentLogId"], 42);
    }

    #[test]
    fn test_runs_are_comma_separated_and_empty_is_omitted() {
        let many = serde_json::to_value(CreateLog::new("T", "B").with_runs([80, 81])).unwrap();
        let none = serde_json::to_value(CreateLog::new("T", "B")).unwrap();

        assert_eq!(many["runNumbers"], "80,81");
        assert_eq!(none, json!({ "title": "T", "text": "B" }));
    }

    #[test]
    fn test_validation() {
        assert!(CreateLog::new("", "Body").validate().is_err());
        assert!(CreateLog::new("Title", " ").validate().is_err());
        assert!(CreateLog::new("Title", "Body").validate().is_ok());
    }
}
