//! FLP domain model.

use crate::time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A readout node taking part in one run, with its accumulated counters.
///
/// Counters only grow while a run is ongoing, but nothing enforces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flp {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
    pub hostname: String,
    #[serde(default)]
    pub run_number: Option<u64>,
    /// Number of (sub)timeframes processed by this FLP
    #[serde(default)]
    pub n_timeframes: Option<u64>,
    #[serde(default)]
    pub bytes_processed: Option<u64>,
    #[serde(default)]
    pub bytes_equipment_read_out: Option<u64>,
    #[serde(default)]
    pub bytes_recording_read_out: Option<u64>,
    #[serde(default, rename = "bytesFairMQReadOut")]
    pub bytes_fair_mq_read_out: Option<u64>,
    #[serde(default, with = "time::millis_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "time::millis_option")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flp_decodes_service_response() {
        let flp: Flp = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "FLP-TPC-1",
            "hostname": "someserver.cern.ch",
            "nTimeframes": 123,
            "bytesProcessed": null,
            "bytesEquipmentReadOut": 123408,
            "bytesRecordingReadOut": 5834,
            "bytesFairMQReadOut": 9192,
            "createdAt": 1647867600000i64,
            "updatedAt": "2022-03-21 13:00:00"
        }))
        .unwrap();

        assert_eq!(flp.name, "FLP-TPC-1");
        assert_eq!(flp.bytes_fair_mq_read_out, Some(9192));
        assert_eq!(flp.bytes_processed, None);
        assert_eq!(flp.run_number, None);
        assert_eq!(flp.created_at, flp.updated_at);
    }
}
