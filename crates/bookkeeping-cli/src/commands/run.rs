use super::{Output, format_time, timestamp};
use anyhow::{Context, Result};
use bookkeeping_client::BookkeepingClient;
use bookkeeping_core::run::{CreateRun, Detector, EndRun, NodeCounts, Run, RunQuality, RunType};
use chrono::{DateTime, Utc};
use clap::Subcommand;
use futures::{StreamExt, TryStreamExt};

#[derive(Subcommand)]
pub enum RunAction {
    /// Start a run
    Start {
        /// Run number chosen by ECS
        #[arg(long)]
        run_number: u64,
        /// Environment the run belongs to
        #[arg(long)]
        environment_id: String,
        #[arg(long)]
        run_type: RunType,
        #[arg(long, default_value_t = 0)]
        n_detectors: u32,
        #[arg(long, default_value_t = 0)]
        n_epns: u32,
        #[arg(long, default_value_t = 0)]
        n_flps: u32,
        /// O2 start time (default: now)
        #[arg(long, value_parser = timestamp)]
        o2_start: Option<DateTime<Utc>>,
        /// Trigger start time (default: the O2 start time)
        #[arg(long, value_parser = timestamp)]
        trg_start: Option<DateTime<Utc>>,
        #[arg(long)]
        dd_flp: Option<bool>,
        #[arg(long)]
        dcs: Option<bool>,
        #[arg(long)]
        epn: Option<bool>,
        #[arg(long)]
        epn_topology: Option<String>,
        /// Comma-separated detector list, e.g. CPV,ITS
        #[arg(long, value_delimiter = ',')]
        detectors: Vec<Detector>,
    },
    /// End a run; only the given fields are sent
    End {
        run_number: u64,
        #[arg(long)]
        quality: Option<RunQuality>,
        #[arg(long, value_parser = timestamp)]
        o2_end: Option<DateTime<Utc>>,
        #[arg(long, value_parser = timestamp)]
        trg_end: Option<DateTime<Utc>>,
        /// Set both end times to now
        #[arg(long, conflicts_with_all = ["o2_end", "trg_end"])]
        now: bool,
    },
    /// List runs
    List {
        /// Stop after this many runs
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Look up one run by number
    Find { run_number: u64 },
}

pub async fn execute(client: &BookkeepingClient, action: RunAction, output: Output) -> Result<()> {
    match action {
        RunAction::Start {
            run_number,
            environment_id,
            run_type,
            n_detectors,
            n_epns,
            n_flps,
            o2_start,
            trg_start,
            dd_flp,
            dcs,
            epn,
            epn_topology,
            detectors,
        } => {
            let o2_start = o2_start.unwrap_or_else(Utc::now);
            let mut request = CreateRun::new(
                run_number,
                environment_id,
                run_type,
                NodeCounts::new(n_detectors, n_epns, n_flps),
                o2_start,
                trg_start.unwrap_or(o2_start),
            )
            .with_detectors(detectors);
            request.dd_flp = dd_flp;
            request.dcs = dcs;
            request.epn = epn;
            request.epn_topology = epn_topology;

            let run = client
                .create_run(&request)
                .await
                .with_context(|| format!("Failed to start run {}", run_number))?;
            output.record(&run, summary)
        }
        RunAction::End {
            run_number,
            quality,
            o2_end,
            trg_end,
            now,
        } => {
            let mut update = EndRun::new();
            if now {
                update = update.ended_at(Utc::now());
            }
            update.run_quality = quality;
            update.time_o2_end = o2_end.or(update.time_o2_end);
            update.time_trg_end = trg_end.or(update.time_trg_end);

            let run = client
                .end_run(run_number, &update)
                .await
                .with_context(|| format!("Failed to end run {}", run_number))?;
            output.record(&run, summary)
        }
        RunAction::List { limit } => {
            let runs: Vec<Run> = match limit {
                Some(limit) => client.runs().take(limit).try_collect().await,
                None => client.list_runs().await,
            }
            .context("Failed to list runs")?;
            output.records(&runs, summary)
        }
        RunAction::Find { run_number } => {
            let run = client
                .find_run(run_number)
                .await
                .with_context(|| format!("Failed to look up run {}", run_number))?
                .with_context(|| format!("Run {} not found", run_number))?;
            output.record(&run, summary)
        }
    }
}

fn summary(run: &Run) -> String {
    format!(
        "Run {} [{}] env={} quality={} o2_start={} o2_end={}",
        run.run_number,
        run.run_type_name.as_deref().unwrap_or("-"),
        run.environment_id.as_deref().unwrap_or("-"),
        run.run_quality.map(|q| q.to_string()).unwrap_or_else(|| "-".to_string()),
        format_time(run.time_o2_start),
        format_time(run.time_o2_end),
    )
}
