use super::{Output, format_time, timestamp};
use anyhow::{Context, Result};
use bookkeeping_client::BookkeepingClient;
use bookkeeping_core::environment::{CreateEnvironment, Environment, UpdateEnvironment};
use chrono::{DateTime, Utc};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum EnvAction {
    /// Register an environment
    Create {
        env_id: String,
        /// Creation time (default: stamped by the service)
        #[arg(long, value_parser = timestamp)]
        created_at: Option<DateTime<Utc>>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// Update an environment; only the given fields are sent
    Update {
        env_id: String,
        #[arg(long, value_parser = timestamp)]
        toredown_at: Option<DateTime<Utc>>,
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },
    /// List environments
    List,
}

pub async fn execute(client: &BookkeepingClient, action: EnvAction, output: Output) -> Result<()> {
    match action {
        EnvAction::Create {
            env_id,
            created_at,
            status,
            message,
        } => {
            let request = CreateEnvironment {
                env_id: env_id.clone(),
                created_at,
                status,
                status_message: message,
            };
            let env = client
                .create_environment(&request)
                .await
                .with_context(|| format!("Failed to create environment {}", env_id))?;
            output.record(&env, summary)
        }
        EnvAction::Update {
            env_id,
            toredown_at,
            status,
            message,
        } => {
            let update = UpdateEnvironment {
                toredown_at,
                status,
                status_message: message,
            };
            let env = client
                .update_environment(&env_id, &update)
                .await
                .with_context(|| format!("Failed to update environment {}", env_id))?;
            output.record(&env, summary)
        }
        EnvAction::List => {
            let envs = client
                .list_environments()
                .await
                .context("Failed to list environments")?;
            output.records(&envs, summary)
        }
    }
}

fn summary(env: &Environment) -> String {
    format!(
        "Environment {} status={} created={} toredown={}{}",
        env.id,
        env.status.as_deref().unwrap_or("-"),
        format_time(env.created_at),
        format_time(env.toredown_at),
        env.status_message
            .as_deref()
            .map(|m| format!(" ({})", m))
            .unwrap_or_default(),
    )
}
