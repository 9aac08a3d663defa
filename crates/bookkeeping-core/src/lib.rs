//! Domain types for the ALICE Bookkeeping API.
//!
//! This crate holds what the service exchanges on the wire (runs, FLPs, logs
//! and environments), the payloads used to create and update them, the
//! shared error type, and client configuration. It does no network I/O.

pub mod config;
pub mod envelope;
pub mod environment;
pub mod error;
pub mod flp;
pub mod log;
pub mod run;
pub mod time;
mod wire;

// Re-export common types
pub use config::ClientConfig;
pub use error::{ApiErrorObject, BookkeepingError, Result};
