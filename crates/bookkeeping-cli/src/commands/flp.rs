use super::Output;
use anyhow::{Context, Result};
use bookkeeping_client::BookkeepingClient;
use bookkeeping_core::flp::{CreateFlp, Flp, UpdateFlp};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum FlpAction {
    /// Register an FLP for a run
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        hostname: String,
        #[arg(long)]
        run_number: u64,
    },
    /// Report counters; only the given counters are sent
    Update {
        #[arg(long)]
        name: String,
        #[arg(long)]
        run_number: u64,
        #[arg(long)]
        timeframes: Option<u64>,
        #[arg(long)]
        bytes_processed: Option<u64>,
        #[arg(long)]
        equipment_bytes: Option<u64>,
        #[arg(long)]
        recording_bytes: Option<u64>,
        #[arg(long)]
        fair_mq_bytes: Option<u64>,
    },
    /// List FLPs
    List,
    /// Show one FLP by id
    Get { id: u64 },
}

pub async fn execute(client: &BookkeepingClient, action: FlpAction, output: Output) -> Result<()> {
    match action {
        FlpAction::Create {
            name,
            hostname,
            run_number,
        } => {
            let flp = client
                .create_flp(&CreateFlp::new(name.as_str(), hostname, run_number))
                .await
                .with_context(|| format!("Failed to create FLP {} for run {}", name, run_number))?;
            output.record(&flp, summary)
        }
        FlpAction::Update {
            name,
            run_number,
            timeframes,
            bytes_processed,
            equipment_bytes,
            recording_bytes,
            fair_mq_bytes,
        } => {
            let update = UpdateFlp {
                n_timeframes: timeframes,
                bytes_processed,
                bytes_equipment_read_out: equipment_bytes,
                bytes_recording_read_out: recording_bytes,
                bytes_fair_mq_read_out: fair_mq_bytes,
            };
            let flp = client
                .update_flp(&name, run_number, &update)
                .await
                .with_context(|| format!("Failed to update FLP {} for run {}", name, run_number))?;
            output.record(&flp, summary)
        }
        FlpAction::List => {
            let flps = client.list_flps().await.context("Failed to list FLPs")?;
            output.records(&flps, summary)
        }
        FlpAction::Get { id } => {
            let flp = client
                .get_flp(id)
                .await
                .with_context(|| format!("Failed to get FLP {}", id))?;
            output.record(&flp, summary)
        }
    }
}

fn summary(flp: &Flp) -> String {
    let counter = |value: Option<u64>| value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
    format!(
        "FLP {} on {} run={} timeframes={} processed={} fairmq={}",
        flp.name,
        flp.hostname,
        counter(flp.run_number),
        counter(flp.n_timeframes),
        counter(flp.bytes_processed),
        counter(flp.bytes_fair_mq_read_out),
    )
}
