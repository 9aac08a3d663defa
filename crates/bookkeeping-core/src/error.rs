//! Error types for the Bookkeeping client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One entry of the `errors` array returned by the Bookkeeping service.
///
/// The service answers every non-2xx request with a JSON:API style body:
/// `{"errors": [{"status": "404", "title": "...", "detail": "..."}]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiErrorObject {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub source: Option<ApiErrorSource>,
}

/// Points at the offending request field, e.g. `/data/attributes/body/title`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiErrorSource {
    #[serde(default)]
    pub pointer: Option<String>,
}

impl ApiErrorObject {
    /// Best human-readable message: detail, then title, then the status.
    pub fn message(&self) -> &str {
        self.detail
            .as_deref()
            .or(self.title.as_deref())
            .or(self.status.as_deref())
            .unwrap_or("unknown error")
    }
}

/// The error type shared by every Bookkeeping crate.
#[derive(Error, Debug, Clone)]
pub enum BookkeepingError {
    /// The request never produced an HTTP response (connect, TLS, timeout).
    #[error("HTTP transport error: {message}")]
    Http {
        message: String,
        timeout: bool,
        connect: bool,
    },

    /// The service answered with a non-success status.
    #[error("API error (status {status}): {}", summarize(.errors))]
    Api {
        status: u16,
        errors: Vec<ApiErrorObject>,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// The base URL is not an http(s) URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The caller broke an operation contract before anything was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The process-wide session was used before `init`.
    #[error("Bookkeeping session is not initialized; call facade::init first")]
    NotInitialized,

    /// `init` was called a second time.
    #[error("Bookkeeping session is already initialized")]
    AlreadyInitialized,
}

fn summarize(errors: &[ApiErrorObject]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(ApiErrorObject::message)
        .collect::<Vec<_>>()
        .join("; ")
}

impl BookkeepingError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an InvalidArgument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Api error from a status and a raw response body.
    ///
    /// Bodies in the service's `{"errors": [...]}` shape are decoded; anything
    /// else (proxy HTML pages, plain text) becomes a single entry whose detail
    /// is the raw body.
    pub fn from_response_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            errors: Vec<ApiErrorObject>,
        }

        let errors = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => parsed.errors,
            Err(_) => vec![ApiErrorObject {
                status: Some(status.to_string()),
                title: None,
                detail: Some(if body.trim().is_empty() {
                    "empty response body".to_string()
                } else {
                    body.trim().to_string()
                }),
                source: None,
            }],
        };

        Self::Api { status, errors }
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// HTTP status of an Api error, `None` for every other variant.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the service answered 404
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if the service answered 409 (e.g. duplicate run number)
    pub fn is_conflict(&self) -> bool {
        self.status() == Some(409)
    }

    /// Check if the request failed before any response arrived
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<reqwest::Error> for BookkeepingError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            };
        }
        if let Some(status) = err.status() {
            return Self::Api {
                status: status.as_u16(),
                errors: vec![ApiErrorObject {
                    status: Some(status.as_u16().to_string()),
                    detail: Some(err.to_string()),
                    ..Default::default()
                }],
            };
        }
        Self::Http {
            message: err.to_string(),
            timeout: err.is_timeout(),
            connect: err.is_connect(),
        }
    }
}

impl From<serde_json::Error> for BookkeepingError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for BookkeepingError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for BookkeepingError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(format!("{} (kind: {:?})", err, err.kind()))
    }
}

/// A type alias for `Result<T, BookkeepingError>`.
pub type Result<T> = std::result::Result<T, BookkeepingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_error_body_is_decoded() {
        let body = r#"{"errors":[{"status":"409","title":"Conflict","detail":"A run already exists with run number 111"}]}"#;
        let err = BookkeepingError::from_response_body(409, body);

        assert!(err.is_conflict());
        match &err {
            BookkeepingError::Api { errors, .. } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].message(), "A run already exists with run number 111");
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
        assert!(err.to_string().contains("409"));
        assert!(err.to_string().contains("run number 111"));
    }

    #[test]
    fn test_plain_text_body_is_kept_as_detail() {
        let err = BookkeepingError::from_response_body(502, "Bad Gateway\n");
        match err {
            BookkeepingError::Api { status, errors } => {
                assert_eq!(status, 502);
                assert_eq!(errors[0].detail.as_deref(), Some("Bad Gateway"));
            }
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn test_message_falls_back_to_title() {
        let entry = ApiErrorObject {
            status: Some("404".into()),
            title: Some("Run with this run number (9) could not be found".into()),
            ..Default::default()
        };
        assert_eq!(entry.message(), "Run with this run number (9) could not be found");
    }

    #[test]
    fn test_type_checks() {
        assert!(BookkeepingError::from_response_body(404, "").is_not_found());
        assert!(!BookkeepingError::NotInitialized.is_not_found());
        assert_eq!(BookkeepingError::config("x").status(), None);

        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(BookkeepingError::from(json_err).is_serialization());
    }
}
