//! Run operations.

use crate::client::BookkeepingClient;
use crate::pagination::{self, DEFAULT_PAGE_SIZE, Page};
use bookkeeping_core::Result;
use bookkeeping_core::envelope::ListEnvelope;
use bookkeeping_core::run::{CreateRun, EndRun, Run};
use futures::TryStreamExt;
use futures::stream::BoxStream;
use reqwest::Method;

impl BookkeepingClient {
    /// Starts a run (`POST /runs`) and returns the run echoed by the service.
    pub async fn create_run(&self, run: &CreateRun) -> Result<Run> {
        run.validate()?;
        let created: Run = self.send_data(Method::POST, "runs", run).await?;
        tracing::info!(
            run_number = created.run_number,
            environment_id = ?created.environment_id,
            "Run created"
        );
        Ok(created)
    }

    /// Sparse update of a run (`PATCH /runs/{runNumber}`).
    ///
    /// Only the fields set on `update` are sent, so start fields stay as they are.
    pub async fn end_run(&self, run_number: u64, update: &EndRun) -> Result<Run> {
        update.validate()?;
        let path = format!("runs/{}", run_number);
        let updated: Run = self.send_data(Method::PATCH, &path, update).await?;
        tracing::info!(
            run_number = updated.run_number,
            run_quality = ?updated.run_quality,
            "Run updated"
        );
        Ok(updated)
    }

    /// Alias of [`end_run`](Self::end_run); the service has a single run update route.
    pub async fn update_run(&self, run_number: u64, update: &EndRun) -> Result<Run> {
        self.end_run(run_number, update).await
    }

    /// Looks a run up by its number. `Ok(None)` when the service knows no such run.
    pub async fn find_run(&self, run_number: u64) -> Result<Option<Run>> {
        let query = [("filter[runNumbers]", run_number.to_string())];
        let envelope: ListEnvelope<Run> = self.get_query("runs", &query).await?;
        Ok(envelope
            .data
            .into_iter()
            .find(|run| run.run_number == run_number))
    }

    /// Every run known to the service, fetched page by page as the stream is polled.
    pub fn runs(&self) -> BoxStream<'static, Result<Run>> {
        self.runs_paged(DEFAULT_PAGE_SIZE)
    }

    pub fn runs_paged(&self, page_size: u32) -> BoxStream<'static, Result<Run>> {
        pagination::paginate(self.clone(), "runs", page_size)
    }

    /// One page of runs.
    pub async fn runs_page(&self, offset: u64, limit: u32) -> Result<Page<Run>> {
        pagination::fetch_page(self, "runs", offset, limit).await
    }

    /// Collects [`runs`](Self::runs) into a vector.
    pub async fn list_runs(&self) -> Result<Vec<Run>> {
        self.runs().try_collect().await
    }
}
