//! Environment write payloads.

use crate::error::{BookkeepingError, Result};
use crate::time;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Payload of `POST /environments`.
///
/// Without `created_at` the service stamps the creation time itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEnvironment {
    pub env_id: String,
    #[serde(with = "time::millis_option", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

impl CreateEnvironment {
    pub fn new(env_id: impl Into<String>) -> Self {
        Self {
            env_id: env_id.into(),
            created_at: None,
            status: None,
            status_message: None,
        }
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_status_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.env_id.trim().is_empty() {
            return Err(BookkeepingError::invalid_argument(
                "environment id must not be empty",
            ));
        }
        Ok(())
    }
}

/// Payload of `PUT /environments/{envId}`. Unset fields are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEnvironment {
    #[serde(with = "time::millis_option", skip_serializing_if = "Option::is_none")]
    pub toredown_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
}

impl UpdateEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toredown_at(mut self, at: DateTime<Utc>) -> Self {
        self.toredown_at = Some(at);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_status_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.toredown_at.is_none() && self.status.is_none() && self.status_message.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(BookkeepingError::invalid_argument(
                "environment update carries no field to change",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::status;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_create_environment_payload() {
        let at = Utc.timestamp_millis_opt(1_647_867_600_000).unwrap();
        let minimal = serde_json::to_value(CreateEnvironment::new("Dxi029djX")).unwrap();
        let full = serde_json::to_value(
            CreateEnvironment::new("Dxi029djX")
                .created_at(at)
                .with_status(status::STANDBY)
                .with_status_message("Deploying"),
        )
        .unwrap();

        assert_eq!(minimal, json!({ "envId": "Dxi029djX" }));
        assert_eq!(
            full,
            json!({
                "envId": "Dxi029djX",
                "createdAt": 1_647_867_600_000i64,
                "status": "STANDBY",
                "statusMessage": "Deploying",
            })
        );
        assert!(CreateEnvironment::new("").validate().is_err());
    }

    #[test]
    fn test_update_environment_is_sparse() {
        let payload = serde_json::to_value(UpdateEnvironment::new().with_status(status::DONE)).unwrap();
        assert_eq!(payload, json!({ "status": "DONE" }));
        assert!(UpdateEnvironment::new().validate().is_err());
    }
}
