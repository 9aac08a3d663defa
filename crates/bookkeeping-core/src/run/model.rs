//! Run domain model.
//!
//! A run is one data-taking session, keyed by its run number. The run number
//! is always chosen by the caller (ECS), never generated by the service.

use crate::time;
use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Kind of data taking performed during a run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum RunType {
    None,
    Cosmics,
    Technical,
    Physics,
    Pulser,
    Pedestal,
    Laser,
    Synthetic,
    CalibrationIthrTuning,
    CalibrationVcasnTuning,
    CalibrationThrScan,
    CalibrationDigitalScan,
    CalibrationAnalogScan,
    CalibrationFhr,
    CalibrationAlpideScan,
}

// Newer service versions echo the run type as `{ "id": 3, "name": "PHYSICS" }`.
impl<'de> Deserialize<'de> for RunType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Name(String),
            Object { name: String },
        }

        let name = match Raw::deserialize(deserializer)? {
            Raw::Name(name) | Raw::Object { name } => name,
        };
        name.parse()
            .map_err(|_| de::Error::custom(format!("unknown run type '{}'", name)))
    }
}

/// Overall quality of the data of a run, set when the run ends.
///
/// The service itself answers with lowercase names, `none` included.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum RunQuality {
    Good,
    Bad,
    Test,
    None,
    Unknown,
}

impl<'de> Deserialize<'de> for RunQuality {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse()
            .map_err(|_| de::Error::custom(format!("unknown run quality '{}'", name)))
    }
}

/// Detectors known to the service. A detector set travels as `"CPV,ITS,TPC"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Detector {
    Cpv,
    Emc,
    Fdd,
    #[serde(rename = "FT0")]
    #[strum(serialize = "FT0")]
    Ft0,
    #[serde(rename = "FV0")]
    #[strum(serialize = "FV0")]
    Fv0,
    Hmp,
    Its,
    Mch,
    Mft,
    Mid,
    Phs,
    Tof,
    Tpc,
    Trd,
    Zdc,
    Tst,
}

/// Where a run is in its lifecycle: `Pending -> Started -> Ended`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Known to the service but no start time recorded yet.
    Pending,
    /// Started and not yet ended.
    Started,
    /// End time recorded. There is no way back from here.
    Ended,
}

/// A run as returned by the service.
///
/// Everything except the run number is optional: the service omits or nulls
/// fields that were never set, and older deployments return fewer fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Run {
    /// Internal database id
    #[serde(default)]
    pub id: Option<u64>,
    pub run_number: u64,
    /// ECS environment (activity) the run belongs to
    #[serde(default)]
    pub environment_id: Option<String>,
    #[serde(default)]
    pub n_detectors: Option<u32>,
    #[serde(default)]
    pub n_epns: Option<u32>,
    #[serde(default)]
    pub n_flps: Option<u32>,
    /// Run type name as sent by the service; see [`Run::run_type`]
    #[serde(default, rename = "runType", deserialize_with = "run_type_name")]
    pub run_type_name: Option<String>,
    #[serde(default)]
    pub run_quality: Option<RunQuality>,
    #[serde(default, with = "time::millis_option")]
    pub time_o2_start: Option<DateTime<Utc>>,
    #[serde(default, with = "time::millis_option")]
    pub time_o2_end: Option<DateTime<Utc>>,
    #[serde(default, with = "time::millis_option")]
    pub time_trg_start: Option<DateTime<Utc>>,
    #[serde(default, with = "time::millis_option")]
    pub time_trg_end: Option<DateTime<Utc>>,
    /// Data distribution FLP enabled
    #[serde(default, rename = "dd_flp")]
    pub dd_flp: Option<bool>,
    #[serde(default)]
    pub dcs: Option<bool>,
    #[serde(default)]
    pub epn: Option<bool>,
    #[serde(default)]
    pub epn_topology: Option<String>,
    /// Comma-separated detector list, kept as sent by the service
    #[serde(default)]
    pub detectors: Option<String>,
    #[serde(default)]
    pub n_subtimeframes: Option<u64>,
    #[serde(default)]
    pub bytes_read_out: Option<u64>,
}

// Same two shapes as `RunType`, but any name is kept: the service knows run
// types (e.g. STANDALONE) that this client has no variant for.
fn run_type_name<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Name(String),
        Object { name: String },
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Name(name) | Raw::Object { name } => name,
    }))
}

impl Run {
    /// Typed run type, `None` when absent or not one this client knows.
    pub fn run_type(&self) -> Option<RunType> {
        self.run_type_name.as_deref()?.parse().ok()
    }

    pub fn phase(&self) -> RunPhase {
        if self.time_o2_end.is_some() || self.time_trg_end.is_some() {
            RunPhase::Ended
        } else if self.time_o2_start.is_some() || self.time_trg_start.is_some() {
            RunPhase::Started
        } else {
            RunPhase::Pending
        }
    }

    /// Parsed detector list. Names this client does not know are skipped.
    pub fn detector_list(&self) -> Vec<Detector> {
        self.detectors
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter_map(|name| name.trim().parse().ok())
            .collect()
    }
}
