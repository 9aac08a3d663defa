//! FLP operations.
//!
//! Updates address an FLP by its `(name, run number)` pair, which the caller
//! already knows when counters are reported. Numeric ids are only used for reads.

use crate::client::{BookkeepingClient, segment};
use crate::pagination::{self, DEFAULT_PAGE_SIZE};
use bookkeeping_core::{BookkeepingError, Result};
use bookkeeping_core::flp::{CreateFlp, Flp, UpdateFlp};
use futures::TryStreamExt;
use futures::stream::BoxStream;
use reqwest::Method;

impl BookkeepingClient {
    /// Registers an FLP for a run (`POST /flps`).
    pub async fn create_flp(&self, flp: &CreateFlp) -> Result<Flp> {
        flp.validate()?;
        let created: Flp = self.send_data(Method::POST, "flps", flp).await?;
        tracing::info!(
            name = %created.name,
            run_number = ?created.run_number,
            "FLP created"
        );
        Ok(created)
    }

    /// Sparse counter update (`PATCH /flps/{name}/runs/{runNumber}`).
    pub async fn update_flp(&self, name: &str, run_number: u64, update: &UpdateFlp) -> Result<Flp> {
        if name.trim().is_empty() {
            return Err(BookkeepingError::invalid_argument("FLP name must not be empty"));
        }
        update.validate()?;

        let path = format!("flps/{}/runs/{}", segment(name), run_number);
        let updated: Flp = self.send_data(Method::PATCH, &path, update).await?;
        tracing::info!(name = %updated.name, run_number, "FLP updated");
        Ok(updated)
    }

    pub async fn get_flp(&self, id: u64) -> Result<Flp> {
        self.get_data(&format!("flps/{}", id)).await
    }

    pub fn flps(&self) -> BoxStream<'static, Result<Flp>> {
        self.flps_paged(DEFAULT_PAGE_SIZE)
    }

    pub fn flps_paged(&self, page_size: u32) -> BoxStream<'static, Result<Flp>> {
        pagination::paginate(self.clone(), "flps", page_size)
    }

    pub async fn list_flps(&self) -> Result<Vec<Flp>> {
        self.flps().try_collect().await
    }
}
