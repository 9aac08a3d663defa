//! Run domain module.
//!
//! - `model`: the run as returned by the service, with its enumerations
//! - `request`: start and end payloads

mod model;
mod request;

pub use model::{Detector, Run, RunPhase, RunQuality, RunType};
pub use request::{CreateRun, EndRun, NodeCounts};
