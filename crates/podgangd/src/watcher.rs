//! Periodic re-evaluation of every job in the snapshot.
//!
//! Membership read from the snapshot may lag behind the cluster, so a job
//! rejected on one tick is simply tried again on the next one.

use std::path::Path;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use podgang_scheduler::{CycleOutcome, GangScheduler, run_cycle};
use podgang_state::{ClusterSnapshot, SharedSnapshot};

/// Reload the snapshot and run one cycle per job.
///
/// A snapshot that fails to load leaves the previous one in place.
pub fn tick(plugin: &GangScheduler, shared: &SharedSnapshot, path: &Path) -> Vec<CycleOutcome> {
    match ClusterSnapshot::from_file(path) {
        Ok(fresh) => {
            if let Err(e) = shared.replace(fresh) {
                warn!(error = %e, "could not install fresh snapshot");
            }
        }
        Err(e) => warn!(path = ?path, error = %e, "snapshot reload failed, keeping previous"),
    }

    let snapshot = match shared.current() {
        Ok(s) => s,
        Err(e) => {
            error!(error = %e, "no snapshot available");
            return Vec::new();
        }
    };
    let nodes: Vec<String> = snapshot.nodes().map(|n| n.name.clone()).collect();

    let mut outcomes = Vec::with_capacity(snapshot.jobs().len());
    for job in snapshot.jobs() {
        match run_cycle(plugin, job, nodes.as_slice()) {
            Ok(outcome) => {
                if let Some(best) = outcome.best_node() {
                    info!(job = %job.name, node = best, "best node selected");
                }
                outcomes.push(outcome);
            }
            Err(e) => error!(job = %job.name, error = %e, "scheduling cycle failed"),
        }
    }
    outcomes
}

/// Tick every `interval` until `shutdown` flips. Returns the number of ticks run.
pub async fn run(
    plugin: &GangScheduler,
    shared: &SharedSnapshot,
    path: &Path,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) -> usize {
    info!(interval_secs = interval.as_secs(), mode = %plugin.mode(), "watch loop started");
    let mut ticks = 0;
    let mut ticker = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let outcomes = tick(plugin, shared, path);
                ticks += 1;
                info!(tick = ticks, jobs = outcomes.len(), "cycle complete");
            }
            _ = shutdown.changed() => {
                info!("watch loop shutting down");
                break;
            }
        }
    }
    ticks
}
