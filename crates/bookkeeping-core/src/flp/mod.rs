//! FLP (First Level Processor) domain module.

mod model;
mod request;

pub use model::Flp;
pub use request::{CreateFlp, UpdateFlp};
