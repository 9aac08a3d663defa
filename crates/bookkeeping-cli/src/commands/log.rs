use super::{Output, format_time};
use anyhow::{Context, Result};
use bookkeeping_client::BookkeepingClient;
use bookkeeping_core::log::{CreateLog, Log};
use clap::Subcommand;
use futures::{StreamExt, TryStreamExt};

#[derive(Subcommand)]
pub enum LogAction {
    /// Write a log entry
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        /// Comma-separated run numbers, e.g. 80,81
        #[arg(long, value_delimiter = ',')]
        runs: Vec<u64>,
        /// Reply to this log
        #[arg(long)]
        parent: Option<u64>,
    },
    /// List logs
    List {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one log by id
    Get { id: u64 },
}

pub async fn execute(client: &BookkeepingClient, action: LogAction, output: Output) -> Result<()> {
    match action {
        LogAction::Create {
            title,
            text,
            runs,
            parent,
        } => {
            let mut request = CreateLog::new(title, text).with_runs(runs);
            if let Some(parent) = parent {
                request = request.reply_to(parent);
            }
            let log = client
                .create_log(&request)
                .await
                .context("Failed to create log")?;
            output.record(&log, summary)
        }
        LogAction::List { limit } => {
            let logs: Vec<Log> = match limit {
                Some(limit) => client.logs().take(limit).try_collect().await,
                None => client.list_logs().await,
            }
            .context("Failed to list logs")?;
            output.records(&logs, summary)
        }
        LogAction::Get { id } => {
            let log = client
                .get_log(id)
                .await
                .with_context(|| format!("Failed to get log {}", id))?;
            output.record(&log, summary)
        }
    }
}

fn summary(log: &Log) -> String {
    let runs = log
        .run_numbers()
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",");
    let mut line = format!(
        "#{} {} ({}) runs=[{}]",
        log.id,
        log.title,
        format_time(log.created_at),
        runs
    );
    if let Some(parent) = log.parent_log_id.filter(|_| log.is_reply()) {
        line.push_str(&format!(" reply-to=#{}", parent));
    }
    line
}
