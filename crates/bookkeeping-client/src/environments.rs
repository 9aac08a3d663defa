//! Environment operations.

use crate::client::{BookkeepingClient, segment};
use crate::pagination::{self, DEFAULT_PAGE_SIZE};
use bookkeeping_core::environment::{CreateEnvironment, Environment, UpdateEnvironment};
use bookkeeping_core::{BookkeepingError, Result};
use futures::TryStreamExt;
use futures::stream::BoxStream;
use reqwest::Method;

impl BookkeepingClient {
    /// Registers an environment (`POST /environments`).
    pub async fn create_environment(&self, environment: &CreateEnvironment) -> Result<Environment> {
        environment.validate()?;
        let created: Environment = self
            .send_data(Method::POST, "environments", environment)
            .await?;
        tracing::info!(env_id = %created.id, status = ?created.status, "Environment created");
        Ok(created)
    }

    /// Sparse update of an environment (`PUT /environments/{envId}`).
    pub async fn update_environment(
        &self,
        env_id: &str,
        update: &UpdateEnvironment,
    ) -> Result<Environment> {
        if env_id.trim().is_empty() {
            return Err(BookkeepingError::invalid_argument(
                "environment id must not be empty",
            ));
        }
        update.validate()?;

        let path = format!("environments/{}", segment(env_id));
        let updated: Environment = self.send_data(Method::PUT, &path, update).await?;
        tracing::info!(env_id = %updated.id, status = ?updated.status, "Environment updated");
        Ok(updated)
    }

    pub fn environments(&self) -> BoxStream<'static, Result<Environment>> {
        self.environments_paged(DEFAULT_PAGE_SIZE)
    }

    pub fn environments_paged(&self, page_size: u32) -> BoxStream<'static, Result<Environment>> {
        pagination::paginate(self.clone(), "environments", page_size)
    }

    pub async fn list_environments(&self) -> Result<Vec<Environment>> {
        self.environments().try_collect().await
    }
}
