//! Small serde helpers for the service's wire conventions.

use serde::Serializer;
use std::fmt::Display;

/// Serializes a list as one comma-separated string (`[80, 81]` -> `"80,81"`).
///
/// The service takes run-number and detector lists in this form.
pub fn comma_separated<S, T>(values: &[T], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Display,
{
    let joined = values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");
    serializer.serialize_str(&joined)
}
