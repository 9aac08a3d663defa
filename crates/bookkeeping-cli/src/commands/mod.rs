pub mod env;
pub mod flp;
pub mod log;
pub mod run;

use anyhow::Result;
use bookkeeping_core::time::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How records are printed: one summary line each, or pretty JSON.
#[derive(Debug, Clone, Copy)]
pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn record<T: Serialize>(&self, record: &T, summary: impl FnOnce(&T) -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(record)?);
        } else {
            println!("{}", summary(record));
        }
        Ok(())
    }

    pub fn records<T: Serialize>(&self, records: &[T], summary: impl Fn(&T) -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(records)?);
        } else {
            for record in records {
                println!("{}", summary(record));
            }
            println!("{} record(s)", records.len());
        }
        Ok(())
    }
}

/// Argument parser for timestamps: epoch ms, RFC 3339 or `YYYY-MM-DD HH:MM:SS`.
pub fn timestamp(input: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(input).map_err(|e| e.to_string())
}

pub fn format_time(at: Option<DateTime<Utc>>) -> String {
    at.map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_argument() {
        let expected = Utc.with_ymd_and_hms(2022, 3, 21, 13, 0, 0).unwrap();
        assert_eq!(timestamp("1647867600000").unwrap(), expected);
        assert_eq!(timestamp("2022-03-21 13:00:00").unwrap(), expected);
        assert!(timestamp("noon").is_err());
    }

    #[test]
    fn test_format_time() {
        let at = Utc.with_ymd_and_hms(2022, 3, 21, 13, 0, 0).unwrap();
        assert_eq!(format_time(Some(at)), "2022-03-21 13:00:00");
        assert_eq!(format_time(None), "-");
    }
}
