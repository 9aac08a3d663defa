//! Environment domain module.
//!
//! An environment is an ECS orchestration session, distinct from a run.
//! It is created once and then updated until a terminal status is reported.

mod model;
mod request;

pub use model::{Environment, status};
pub use request::{CreateEnvironment, UpdateEnvironment};
