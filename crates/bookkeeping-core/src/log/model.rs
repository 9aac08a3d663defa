//! Log domain model.

use crate::time;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Who wrote the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogOrigin {
    Human,
    Process,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LogSubtype {
    Run,
    Subsystem,
    Announcement,
    Intervention,
    Comment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogAuthor {
    #[serde(default)]
    pub id: Option<u64>,
    pub name: String,
}

/// Reference to a run the log is attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogRun {
    #[serde(default)]
    pub id: Option<u64>,
    pub run_number: u64,
}

/// A log entry as returned by the service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub origin: Option<LogOrigin>,
    #[serde(default)]
    pub subtype: Option<LogSubtype>,
    #[serde(default)]
    pub author: Option<LogAuthor>,
    #[serde(default, with = "time::millis_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub runs: Vec<LogRun>,
    /// Log this entry replies to; `None` for a thread root
    #[serde(default)]
    pub parent_log_id: Option<u64>,
    #[serde(default)]
    pub root_log_id: Option<u64>,
    #[serde(default)]
    pub replies: Option<u32>,
}

impl Log {
    pub fn run_numbers(&self) -> Vec<u64> {
        self.runs.iter().map(|run| run.run_number).collect()
    }

    /// A log is a reply when it points at a parent other than itself.
    pub fn is_reply(&self) -> bool {
        self.parent_log_id.is_some_and(|parent| parent != self.id)
    }
}
