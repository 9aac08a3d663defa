//! Run write payloads.
//!
//! Optional fields are `None` until a `with_*` method sets them, and a `None`
//! field is never serialized. That is what keeps an end-of-run update from
//! overwriting start fields on the service.

use super::model::{Detector, RunQuality, RunType};
use crate::error::{BookkeepingError, Result};
use crate::{time, wire};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Node counts announced when a run starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCounts {
    pub n_detectors: u32,
    pub n_epns: u32,
    pub n_flps: u32,
}

impl NodeCounts {
    pub fn new(n_detectors: u32, n_epns: u32, n_flps: u32) -> Self {
        Self {
            n_detectors,
            n_epns,
            n_flps,
        }
    }
}

/// Payload of `POST /runs`: starts a run.
///
/// # Examples
///
/// ```
/// use bookkeeping_core::run::{CreateRun, NodeCounts, RunType};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let run = CreateRun::new(80, "env-1", RunType::Cosmics, NodeCounts::new(5, 5, 1), now, now)
///     .with_dcs(true);
/// assert_eq!(run.run_number, 80);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRun {
    pub environment_id: String,
    #[serde(flatten)]
    pub counts: NodeCounts,
    pub run_number: u64,
    pub run_type: RunType,
    #[serde(with = "time::millis")]
    pub time_o2_start: DateTime<Utc>,
    #[serde(with = "time::millis")]
    pub time_trg_start: DateTime<Utc>,
    #[serde(rename = "dd_flp", skip_serializing_if = "Option::is_none")]
    pub dd_flp: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dcs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epn: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epn_topology: Option<String>,
    #[serde(serialize_with = "wire::comma_separated", skip_serializing_if = "Vec::is_empty")]
    pub detectors: Vec<Detector>,
}

impl CreateRun {
    pub fn new(
        run_number: u64,
        environment_id: impl Into<String>,
        run_type: RunType,
        counts: NodeCounts,
        time_o2_start: DateTime<Utc>,
        time_trg_start: DateTime<Utc>,
    ) -> Self {
        Self {
            environment_id: environment_id.into(),
            counts,
            run_number,
            run_type,
            time_o2_start,
            time_trg_start,
            dd_flp: None,
            dcs: None,
            epn: None,
            epn_topology: None,
            detectors: Vec::new(),
        }
    }

    pub fn with_dd_flp(mut self, enabled: bool) -> Self {
        self.dd_flp = Some(enabled);
        self
    }

    pub fn with_dcs(mut self, enabled: bool) -> Self {
        self.dcs = Some(enabled);
        self
    }

    pub fn with_epn(mut self, enabled: bool) -> Self {
        self.epn = Some(enabled);
        self
    }

    pub fn with_epn_topology(mut self, topology: impl Into<String>) -> Self {
        self.epn_topology = Some(topology.into());
        self
    }

    pub fn with_detectors(mut self, detectors: impl IntoIterator<Item = Detector>) -> Self {
        self.detectors = detectors.into_iter().collect();
        self
    }

    /// Checks the fields the service would reject without telling us which one.
    pub fn validate(&self) -> Result<()> {
        if self.environment_id.trim().is_empty() {
            return Err(BookkeepingError::invalid_argument(
                "environment id of a run must not be empty",
            ));
        }
        Ok(())
    }
}

/// Payload of `PATCH /runs/{runNumber}`: ends a run.
///
/// Only the fields that were explicitly set are sent.
///
/// # Examples
///
/// ```
/// use bookkeeping_core::run::{EndRun, RunQuality};
///
/// let update = EndRun::new().with_quality(RunQuality::Bad);
/// assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"runQuality":"BAD"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndRun {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_quality: Option<RunQuality>,
    #[serde(with = "time::millis_option", skip_serializing_if = "Option::is_none")]
    pub time_o2_end: Option<DateTime<Utc>>,
    #[serde(with = "time::millis_option", skip_serializing_if = "Option::is_none")]
    pub time_trg_end: Option<DateTime<Utc>>,
}

impl EndRun {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quality(mut self, quality: RunQuality) -> Self {
        self.run_quality = Some(quality);
        self
    }

    pub fn with_o2_end(mut self, at: DateTime<Utc>) -> Self {
        self.time_o2_end = Some(at);
        self
    }

    pub fn with_trg_end(mut self, at: DateTime<Utc>) -> Self {
        self.time_trg_end = Some(at);
        self
    }

    /// Sets both end times at once.
    pub fn ended_at(self, at: DateTime<Utc>) -> Self {
        self.with_o2_end(at).with_trg_end(at)
    }

    pub fn is_empty(&self) -> bool {
        self.run_quality.is_none() && self.time_o2_end.is_none() && self.time_trg_end.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(BookkeepingError::invalid_argument(
                "run update carries no field to change",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2022, 3, 21, 13, 0, 0).unwrap()
    }

    #[test]
    fn test_create_run_minimal_payload() {
        let run = CreateRun::new(80, "env-80", RunType::Cosmics, NodeCounts::new(5, 5, 1), start(), start());
        let payload = serde_json::to_value(&run).unwrap();

        assert_eq!(
            payload,
            json!({
                "environmentId": "env-80",
                "nDetectors": 5,
                "nEpns": 5,
                "nFlps": 1,
                "runNumber": 80,
                "runType": "COSMICS",
                "timeO2Start": 1647867600000i64,
                "timeTrgStart": 1647867600000i64,
            })
        );
    }

    #[test]
    fn test_create_run_full_payload() {
        let run = CreateRun::new(111, "2JIdys2N", RunType::None, NodeCounts::new(3, 10, 10), start(), start())
            .with_dd_flp(true)
            .with_dcs(true)
            .with_epn(false)
            .with_epn_topology("normal")
            .with_detectors([Detector::Cpv, Detector::Its]);
        let payload = serde_json::to_value(&run).unwrap();

        assert_eq!(payload["dd_flp"], true);
        assert_eq!(payload["dcs"], true);
        assert_eq!(payload["epn"], false);
        assert_eq!(payload["epnTopology"], "normal");
        assert_eq!(payload["detectors"], "CPV,ITS");
        assert_eq!(payload["runType"], "NONE");
    }

    #[test]
    fn test_create_run_rejects_empty_environment() {
        let run = CreateRun::new(1, "  ", RunType::Physics, NodeCounts::default(), start(), start());
        assert!(matches!(run.validate(), Err(BookkeepingError::InvalidArgument(_))));
    }

    #[test]
    fn test_end_run_contains_only_supplied_fields() {
        let quality_only = serde_json::to_value(EndRun::new().with_quality(RunQuality::Bad)).unwrap();
        assert_eq!(quality_only, json!({ "runQuality": "BAD" }));

        let end_only = serde_json::to_value(EndRun::new().with_o2_end(start())).unwrap();
        assert_eq!(end_only, json!({ "timeO2End": 1647867600000i64 }));

        let full = serde_json::to_value(EndRun::new().ended_at(start()).with_quality(RunQuality::Good)).unwrap();
        assert_eq!(
            full,
            json!({
                "runQuality": "GOOD",
                "timeO2End": 1647867600000i64,
                "timeTrgEnd": 1647867600000i64,
            })
        );
    }

    #[test]
    fn test_empty_end_run_is_rejected() {
        assert!(EndRun::new().is_empty());
        assert!(EndRun::new().validate().is_err());
        assert!(EndRun::new().with_quality(RunQuality::Test).validate().is_ok());
    }
}
