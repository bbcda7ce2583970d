use crate::probe::probe;
use crate::types::{ScanConfig, ScanOutcome, ScanReport};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;

/// Scan every port in `1..=config.max_port` on each target using concurrent
/// TCP connect probes.
///
/// - Spawns one task per (target, port) pair; all pairs are dispatched before
///   any completion is awaited.
/// - Returns only after every dispatched probe has resolved, so the report
///   holds exactly (targets × max_port) outcomes.
/// - With `config.concurrency` unset the fan-out is unbounded. That matches
///   the reference behavior for a modest range but can exhaust ephemeral
///   ports or file descriptors on large expansions; set a cap to bound
///   simultaneous socket attempts without changing the outcome set.
pub async fn scan_hosts(targets: &[String], config: &ScanConfig) -> ScanReport {
    scan_internal(targets, config, None).await
}

/// Variant that additionally sends each outcome on `sink` the moment its
/// probe resolves. Emission order is arbitrary; completions interleave.
pub async fn scan_hosts_streaming(
    targets: &[String],
    config: &ScanConfig,
    sink: mpsc::UnboundedSender<ScanOutcome>,
) -> ScanReport {
    scan_internal(targets, config, Some(sink)).await
}

async fn scan_internal(
    targets: &[String],
    config: &ScanConfig,
    sink: Option<mpsc::UnboundedSender<ScanOutcome>>,
) -> ScanReport {
    let total = targets.len() as u64 * u64::from(config.max_port);
    let sem = config
        .concurrency
        .map(|n| Arc::new(Semaphore::new(n.max(1))));
    let mut set = JoinSet::new();

    for host in targets {
        for port in 1..=config.max_port {
            let host = host.clone();
            let timeout = config.timeout;
            let sem = sem.clone();
            let sink = sink.clone();

            set.spawn(async move {
                let _permit = match sem {
                    Some(s) => Some(s.acquire_owned().await.expect("semaphore in scope")),
                    None => None,
                };

                let outcome = probe(&host, port, timeout).await;
                if let Some(tx) = &sink {
                    // Receiver may have been dropped; the scan still completes.
                    let _ = tx.send(outcome.clone());
                }
                outcome
            });
        }
    }

    // Completion barrier: drain the JoinSet before reporting.
    let mut outcomes = Vec::with_capacity(total as usize);
    let mut open_count = 0u64;
    while let Some(res) = set.join_next().await {
        if let Ok(outcome) = res {
            if outcome.state.is_open() {
                open_count += 1;
            }
            outcomes.push(outcome);
        }
    }

    ScanReport {
        scanned_total: total,
        open_count,
        outcomes,
    }
}
