//! FLP write payloads.

use crate::error::{BookkeepingError, Result};
use serde::Serialize;

/// Payload of `POST /flps`: registers an FLP for a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFlp {
    pub name: String,
    pub hostname: String,
    pub run_number: u64,
}

impl CreateFlp {
    pub fn new(name: impl Into<String>, hostname: impl Into<String>, run_number: u64) -> Self {
        Self {
            name: name.into(),
            hostname: hostname.into(),
            run_number,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(BookkeepingError::invalid_argument("FLP name must not be empty"));
        }
        if self.hostname.trim().is_empty() {
            return Err(BookkeepingError::invalid_argument(
                "FLP hostname must not be empty",
            ));
        }
        Ok(())
    }
}

/// Payload of `PATCH /flps/{name}/runs/{runNumber}`: updates counters.
///
/// The FLP is addressed by its `(name, run number)` pair, passed next to
/// this payload. Counters left unset are not sent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFlp {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_timeframes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_processed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_equipment_read_out: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_recording_read_out: Option<u64>,
    #[serde(rename = "bytesFairMQReadOut", skip_serializing_if = "Option::is_none")]
    pub bytes_fair_mq_read_out: Option<u64>,
}

impl UpdateFlp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeframes(mut self, n_timeframes: u64) -> Self {
        self.n_timeframes = Some(n_timeframes);
        self
    }

    pub fn with_bytes_processed(mut self, bytes: u64) -> Self {
        self.bytes_processed = Some(bytes);
        self
    }

    pub fn with_equipment_bytes(mut self, bytes: u64) -> Self {
        self.bytes_equipment_read_out = Some(bytes);
        self
    }

    pub fn with_recording_bytes(mut self, bytes: u64) -> Self {
        self.bytes_recording_read_out = Some(bytes);
        self
    }

    pub fn with_fair_mq_bytes(mut self, bytes: u64) -> Self {
        self.bytes_fair_mq_read_out = Some(bytes);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.n_timeframes.is_none()
            && self.bytes_processed.is_none()
            && self.bytes_equipment_read_out.is_none()
            && self.bytes_recording_read_out.is_none()
            && self.bytes_fair_mq_read_out.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(BookkeepingError::invalid_argument(
                "FLP update carries no counter to change",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_flp_payload() {
        let payload = serde_json::to_value(CreateFlp::new("flp-2", "localhost", 9003)).unwrap();
        assert_eq!(
            payload,
            json!({ "name": "flp-2", "hostname": "localhost", "runNumber": 9003 })
        );
        assert!(CreateFlp::new("", "localhost", 1).validate().is_err());
    }

    #[test]
    fn test_update_flp_sends_only_supplied_counters() {
        let update = UpdateFlp::new()
            .with_timeframes(123)
            .with_equipment_bytes(123408)
            .with_fair_mq_bytes(9192);
        let payload = serde_json::to_value(&update).unwrap();

        assert_eq!(
            payload,
            json!({
                "nTimeframes": 123,
                "bytesEquipmentReadOut": 123408,
                "bytesFairMQReadOut": 9192,
            })
        );
    }

    #[test]
    fn test_zero_counter_is_sent() {
        let payload = serde_json::to_value(UpdateFlp::new().with_recording_bytes(0)).unwrap();
        assert_eq!(payload, json!({ "bytesRecordingReadOut": 0 }));
        assert!(UpdateFlp::new().validate().is_err());
    }
}
