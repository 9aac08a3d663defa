//! Log operations. Logs are created and read, never updated.

use crate::client::BookkeepingClient;
use crate::pagination::{self, DEFAULT_PAGE_SIZE, Page};
use bookkeeping_core::Result;
use bookkeeping_core::log::{CreateLog, Log};
use futures::TryStreamExt;
use futures::stream::BoxStream;
use reqwest::Method;

impl BookkeepingClient {
    /// Creates a log entry (`POST /logs`), optionally attached to runs or to a parent log.
    pub async fn create_log(&self, log: &CreateLog) -> Result<Log> {
        log.validate()?;
        let created: Log = self.send_data(Method::POST, "logs", log).await?;
        tracing::info!(
            log_id = created.id,
            parent_log_id = ?created.parent_log_id,
            "Log created"
        );
        Ok(created)
    }

    pub async fn get_log(&self, id: u64) -> Result<Log> {
        self.get_data(&format!("logs/{}", id)).await
    }

    /// All logs, fetched lazily page by page.
    pub fn logs(&self) -> BoxStream<'static, Result<Log>> {
        self.logs_paged(DEFAULT_PAGE_SIZE)
    }

    pub fn logs_paged(&self, page_size: u32) -> BoxStream<'static, Result<Log>> {
        pagination::paginate(self.clone(), "logs", page_size)
    }

    pub async fn logs_page(&self, offset: u64, limit: u32) -> Result<Page<Log>> {
        pagination::fetch_page(self, "logs", offset, limit).await
    }

    pub async fn list_logs(&self) -> Result<Vec<Log>> {
        self.logs().try_collect().await
    }
}
