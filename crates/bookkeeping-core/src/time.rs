//! Timestamp codecs.
//!
//! The service stores every timestamp as epoch milliseconds and echoes them
//! back as numbers, but older deployments and the seed data use date strings.
//! Outgoing values are always milliseconds; incoming values accept both.

use crate::error::{BookkeepingError, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const NAIVE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Parses a timestamp given as epoch milliseconds, RFC 3339, or
/// `YYYY-MM-DD HH:MM:SS` (interpreted as UTC).
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(millis) = input.parse::<i64>() {
        return from_millis(millis);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }

    Err(BookkeepingError::invalid_argument(format!(
        "'{}' is not a timestamp (expected epoch milliseconds, RFC 3339 or 'YYYY-MM-DD HH:MM:SS')",
        input
    )))
}

fn from_millis(millis: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis).single().ok_or_else(|| {
        BookkeepingError::invalid_argument(format!("{} ms is out of range", millis))
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Float(f64),
    Text(String),
}

impl RawTimestamp {
    fn into_datetime(self) -> Result<DateTime<Utc>> {
        match self {
            RawTimestamp::Millis(ms) => from_millis(ms),
            RawTimestamp::Float(ms) => from_millis(ms as i64),
            RawTimestamp::Text(text) => parse_timestamp(&text),
        }
    }
}

/// `#[serde(with = "...")]` for a required `DateTime<Utc>` field.
pub mod millis {
    use super::*;

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.timestamp_millis())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error> {
        RawTimestamp::deserialize(deserializer)?
            .into_datetime()
            .map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "...")]` for an optional `DateTime<Utc>` field.
///
/// Pair with `default` so that an absent field decodes to `None`.
pub mod millis_option {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&value.timestamp_millis()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<DateTime<Utc>>, D::Error> {
        Option::<RawTimestamp>::deserialize(deserializer)?
            .map(RawTimestamp::into_datetime)
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Stamped {
        #[serde(default, with = "millis_option", skip_serializing_if = "Option::is_none")]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_parse_accepted_formats() {
        let expected = Utc.with_ymd_and_hms(2022, 3, 21, 13, 0, 0).unwrap();

        assert_eq!(parse_timestamp("1647867600000").unwrap(), expected);
        assert_eq!(parse_timestamp("2022-03-21T13:00:00Z").unwrap(), expected);
        assert_eq!(parse_timestamp("2022-03-21T14:00:00+01:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2022-03-21 13:00:00").unwrap(), expected);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_option_field_decoding() {
        let from_number: Stamped = serde_json::from_str(r#"{"at": 1647867600000}"#).unwrap();
        let from_text: Stamped = serde_json::from_str(r#"{"at": "2022-03-21 13:00:00"}"#).unwrap();
        let from_null: Stamped = serde_json::from_str(r#"{"at": null}"#).unwrap();
        let absent: Stamped = serde_json::from_str("{}").unwrap();

        assert_eq!(from_number.at, from_text.at);
        assert!(from_null.at.is_none());
        assert!(absent.at.is_none());
    }

    #[test]
    fn test_option_field_encodes_millis_and_skips_none() {
        let at = Utc.timestamp_millis_opt(1_609_459_200_000).unwrap();
        let set = serde_json::to_value(Stamped { at: Some(at) }).unwrap();
        let unset = serde_json::to_value(Stamped { at: None }).unwrap();

        assert_eq!(set, serde_json::json!({ "at": 1_609_459_200_000i64 }));
        assert_eq!(unset, serde_json::json!({}));
    }
}
