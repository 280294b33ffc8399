//! podgangd — the podgang daemon.
//!
//! Runs the gang scheduling plugin against a cluster snapshot file:
//! - `check-config` validates plugin configuration and exits
//! - `cycle` runs one scheduling cycle for one job
//! - `watch` re-reads the snapshot on an interval and re-evaluates every job
//!
//! # Usage
//!
//! ```text
//! podgangd cycle --config podgang.toml --snapshot cluster.json --job pod0
//! podgangd watch --snapshot cluster.json --interval 5 --metrics
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tokio::sync::watch;
use tracing::info;

use podgang_core::PluginConfig;
use podgang_metrics::{MetricsCollector, render_prometheus};
use podgang_scheduler::{FanoutObserver, GangScheduler, TracingObserver, run_cycle};
use podgang_state::{ClusterSnapshot, SharedSnapshot};

mod report;
mod watcher;

#[derive(Parser)]
#[command(name = "podgangd", about = "Gang admission and node scoring daemon", version)]
struct Cli {
    /// Log output format.
    #[arg(long, value_enum, default_value = "text", global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a plugin config file.
    CheckConfig {
        /// Path to the TOML config file.
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Run one scheduling cycle for a job in the snapshot.
    Cycle {
        /// Path to the TOML config file (default mode when omitted).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Path to the cluster snapshot JSON.
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Name of the job to schedule.
        #[arg(short, long)]
        job: String,
        /// Output format.
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Re-evaluate every job in the snapshot until interrupted.
    Watch {
        /// Path to the TOML config file (default mode when omitted).
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Path to the cluster snapshot JSON, re-read every interval.
        #[arg(short, long)]
        snapshot: PathBuf,
        /// Seconds between cycles.
        #[arg(long, default_value = "5")]
        interval: u64,
        /// Print Prometheus metrics on shutdown.
        #[arg(long)]
        metrics: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    match cli.command {
        Command::CheckConfig { config } => check_config(&config),
        Command::Cycle {
            config,
            snapshot,
            job,
            format,
        } => cycle(config.as_deref(), &snapshot, &job, format),
        Command::Watch {
            config,
            snapshot,
            interval,
            metrics,
        } => run_watch(config.as_deref(), snapshot, interval, metrics).await,
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,podgang=debug"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

/// Load plugin config, falling back to the default mode without a file.
fn load_config(path: Option<&Path>) -> anyhow::Result<PluginConfig> {
    match path {
        Some(path) => PluginConfig::from_file(path)
            .with_context(|| format!("invalid plugin config {}", path.display())),
        None => Ok(PluginConfig::default()),
    }
}

fn check_config(path: &Path) -> anyhow::Result<()> {
    let config = load_config(Some(path))?;
    println!("config ok: mode = {}", config.mode);
    Ok(())
}

fn cycle(
    config: Option<&Path>,
    snapshot_path: &Path,
    job_name: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let snapshot = Arc::new(
        ClusterSnapshot::from_file(snapshot_path)
            .with_context(|| format!("failed to load snapshot {}", snapshot_path.display()))?,
    );
    let job = snapshot
        .job(job_name)
        .cloned()
        .with_context(|| format!("job {job_name} not found in snapshot"))?;
    let nodes: Vec<String> = snapshot.nodes().map(|n| n.name.clone()).collect();

    let plugin = GangScheduler::new(config, snapshot.clone(), snapshot);
    let outcome = run_cycle(&plugin, &job, nodes.as_slice())?;

    match format {
        OutputFormat::Text => print!("{}", report::render_text(&outcome)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }
    Ok(())
}

async fn run_watch(
    config: Option<&Path>,
    snapshot_path: PathBuf,
    interval: u64,
    print_metrics: bool,
) -> anyhow::Result<()> {
    let config = load_config(config)?;
    let initial = ClusterSnapshot::from_file(&snapshot_path)
        .with_context(|| format!("failed to load snapshot {}", snapshot_path.display()))?;
    let shared = Arc::new(SharedSnapshot::new(initial));

    let metrics = Arc::new(MetricsCollector::new());
    let observer = FanoutObserver::new()
        .with(Arc::new(TracingObserver))
        .with(metrics.clone());
    let plugin = GangScheduler::new(config, shared.clone(), shared.clone())
        .with_observer(Arc::new(observer));

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    let cycles = watcher::run(
        &plugin,
        &shared,
        &snapshot_path,
        Duration::from_secs(interval.max(1)),
        shutdown_rx,
    )
    .await;
    info!(cycles, "podgangd stopped");

    if print_metrics {
        print!("{}", render_prometheus(&metrics.snapshot()));
    }
    Ok(())
}
