//! Log domain module.
//!
//! Logs are free-text entries, optionally attached to runs and optionally
//! replying to a parent log. They are create-only.

mod model;
mod request;

pub use model::{Log, LogAuthor, LogOrigin, LogRun, LogSubtype};
pub use request::CreateLog;
