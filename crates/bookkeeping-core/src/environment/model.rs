//! Environment domain model.

use crate::time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status strings reported by ECS.
///
/// The service stores the status as free text, so any other value is accepted
/// as well; these are the ones ECS is known to send.
pub mod status {
    pub const STANDBY: &str = "STANDBY";
    pub const DEPLOYED: &str = "DEPLOYED";
    pub const CONFIGURED: &str = "CONFIGURED";
    pub const RUNNING: &str = "RUNNING";
    pub const STARTED: &str = "STARTED";
    pub const STOPPED: &str = "STOPPED";
    pub const ERROR: &str = "ERROR";
    pub const DESTROYED: &str = "DESTROYED";
    pub const DONE: &str = "DONE";

    /// Statuses after which ECS sends no further update.
    pub const TERMINAL: &[&str] = &[STOPPED, DESTROYED, DONE];
}

/// An environment as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    /// The ECS environment id (`envId` on creation)
    pub id: String,
    #[serde(default, with = "time::millis_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "time::millis_option")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, with = "time::millis_option")]
    pub toredown_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub status_message: Option<String>,
}

impl Environment {
    pub fn is_terminal(&self) -> bool {
        self.toredown_at.is_some()
            || self
                .status
                .as_deref()
                .is_some_and(|current| status::TERMINAL.contains(&current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_decodes_service_response() {
        let env: Environment = serde_json::from_value(serde_json::json!({
            "id": "KGIS12DS",
            "createdAt": 1647867600000i64,
            "updatedAt": 1647867600000i64,
            "toredownAt": null,
            "status": "RUNNING",
            "statusMessage": "All good",
            "runs": []
        }))
        .unwrap();

        assert_eq!(env.id, "KGIS12DS");
        assert_eq!(env.status.as_deref(), Some(status::RUNNING));
        assert!(!env.is_terminal());
    }

    #[test]
    fn test_terminal_status() {
        let env: Environment = serde_json::from_str(r#"{"id": "A", "status": "DONE"}"#).unwrap();
        assert!(env.is_terminal());
    }
}
