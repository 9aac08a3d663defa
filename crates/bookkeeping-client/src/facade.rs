//! Process-wide session.
//!
//! For programs that initialize the client once at startup and call the
//! service from anywhere afterwards. The session can be set exactly once;
//! code that needs several sessions should hold [`BookkeepingClient`]s instead.
//!
//! ```no_run
//! use bookkeeping_client::facade;
//! use bookkeeping_core::log::CreateLog;
//!
//! # async fn example() -> bookkeeping_core::Result<()> {
//! facade::init("http://localhost:4000/api", "my-token")?;
//! let log = facade::create_log(&CreateLog::new("Run 80", "Started").with_runs([80])).await?;
//! # Ok(())
//! # }
//! ```

use crate::client::BookkeepingClient;
use bookkeeping_core::config::ClientConfig;
use bookkeeping_core::environment::{CreateEnvironment, Environment, UpdateEnvironment};
use bookkeeping_core::flp::{CreateFlp, Flp, UpdateFlp};
use bookkeeping_core::log::{CreateLog, Log};
use bookkeeping_core::run::{CreateRun, EndRun, Run};
use bookkeeping_core::{BookkeepingError, Result};
use once_cell::sync::OnceCell;

static SESSION: OnceCell<BookkeepingClient> = OnceCell::new();

/// Sets up the process-wide session.
///
/// Neither the URL's reachability nor the token is checked here; the first
/// request reports those.
///
/// # Errors
///
/// `AlreadyInitialized` on a second call, `InvalidUrl` for a non-http(s) URL.
pub fn init(base_url: impl Into<String>, token: impl Into<String>) -> Result<()> {
    init_with(ClientConfig::new(base_url, token))
}

pub fn init_with(config: ClientConfig) -> Result<()> {
    if SESSION.get().is_some() {
        return Err(BookkeepingError::AlreadyInitialized);
    }
    let client = BookkeepingClient::from_config(config)?;
    SESSION
        .set(client)
        .map_err(|_| BookkeepingError::AlreadyInitialized)?;

    tracing::info!("Bookkeeping session initialized");
    Ok(())
}

/// The session set by [`init`].
pub fn session() -> Result<&'static BookkeepingClient> {
    SESSION.get().ok_or(BookkeepingError::NotInitialized)
}

pub fn is_initialized() -> bool {
    SESSION.get().is_some()
}

// ============================================================================
// Operations
// ============================================================================

pub async fn create_run(run: &CreateRun) -> Result<Run> {
    session()?.create_run(run).await
}

pub async fn end_run(run_number: u64, update: &EndRun) -> Result<Run> {
    session()?.end_run(run_number, update).await
}

pub async fn get_runs() -> Result<Vec<Run>> {
    session()?.list_runs().await
}

pub async fn create_flp(flp: &CreateFlp) -> Result<Flp> {
    session()?.create_flp(flp).await
}

pub async fn update_flp(name: &str, run_number: u64, update: &UpdateFlp) -> Result<Flp> {
    session()?.update_flp(name, run_number, update).await
}

pub async fn create_log(log: &CreateLog) -> Result<Log> {
    session()?.create_log(log).await
}

pub async fn get_logs() -> Result<Vec<Log>> {
    session()?.list_logs().await
}

pub async fn create_environment(environment: &CreateEnvironment) -> Result<Environment> {
    session()?.create_environment(environment).await
}

pub async fn update_environment(env_id: &str, update: &UpdateEnvironment) -> Result<Environment> {
    session()?.update_environment(env_id, update).await
}
