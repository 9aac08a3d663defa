//! Async Rust client for the ALICE Bookkeeping HTTP API.
//!
//! Wraps the Bookkeeping REST endpoints used by the experiment control
//! system: starting and ending runs, reporting FLP counters, writing logs and
//! tracking environments. Payload and response types live in `bookkeeping-core`.
//!
//! # Example
//!
//! ```no_run
//! use bookkeeping_client::BookkeepingClient;
//! use bookkeeping_core::run::{CreateRun, EndRun, NodeCounts, RunQuality, RunType};
//! use chrono::Utc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BookkeepingClient::new("http://localhost:4000/api", std::env::var("BOOKKEEPING_API_TOKEN")?)?;
//!
//! let now = Utc::now();
//! let run = CreateRun::new(80, "env-80", RunType::Cosmics, NodeCounts::new(5, 5, 1), now, now);
//! client.create_run(&run).await?;
//!
//! let ended = client
//!     .end_run(80, &EndRun::new().ended_at(Utc::now()).with_quality(RunQuality::Bad))
//!     .await?;
//! println!("Run {} ended as {:?}", ended.run_number, ended.run_quality);
//! # Ok(())
//! # }
//! ```
//!
//! # Listing
//!
//! `runs()`, `logs()`, `flps()` and `environments()` return lazy streams that
//! fetch one page at a time; `list_*` collects them.
//!
//! # Error Handling
//!
//! Every operation returns `Result<T, BookkeepingError>`:
//!
//! ```no_run
//! # use bookkeeping_client::BookkeepingClient;
//! # async fn example() -> bookkeeping_core::Result<()> {
//! # let client = BookkeepingClient::new("http://localhost:4000/api", "token")?;
//! match client.get_log(42).await {
//!     Ok(log) => println!("Found: {}", log.title),
//!     Err(e) if e.is_not_found() => println!("No such log"),
//!     Err(e) => println!("Error: {}", e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod environments;
pub mod facade;
mod flps;
mod logs;
mod pagination;
mod runs;

pub use bookkeeping_core::{BookkeepingError, ClientConfig, Result};
pub use client::BookkeepingClient;
pub use pagination::{DEFAULT_PAGE_SIZE, Page};
