use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Transport identifier carried on every outcome. Only TCP probing is supported.
pub const PROTOCOL_TCP: &str = "tcp";

/// Default upper bound of the scan range; the scan covers ports 1..=max_port.
pub const DEFAULT_MAX_PORT: u16 = 444;

/// Default per-probe connect timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 500;

/// Reachability state of one probed port, consumable by any renderer.
///
/// A closed and a filtered/unreachable port are indistinguishable: any
/// connect failure collapses to `Closed`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PortState {
    Open,
    Closed,
}

impl PortState {
    pub fn is_open(self) -> bool {
        matches!(self, PortState::Open)
    }
}

impl fmt::Display for PortState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortState::Open => f.write_str("Open"),
            PortState::Closed => f.write_str("Closed"),
        }
    }
}

/// Result of a single probe against one (host, port) pair. Immutable once
/// created; exactly one is produced per pair dispatched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub host: String,
    pub port: u16,
    pub protocol: String,
    pub state: PortState,
}

/// Aggregate view returned once every dispatched probe has resolved.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ScanReport {
    pub scanned_total: u64,
    pub open_count: u64,
    pub outcomes: Vec<ScanOutcome>,
}

/// Scan parameters passed to the coordinator. Defaults match the reference
/// behavior: ports 1..=444, 500 ms per probe, unbounded fan-out.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Highest port probed; the range is the closed interval [1, max_port].
    pub max_port: u16,
    /// Connect timeout enforced independently by each probe.
    pub timeout: Duration,
    /// Cap on simultaneous connect attempts. `None` launches every probe at
    /// once, which can exhaust file descriptors on large ranges.
    pub concurrency: Option<usize>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_port: DEFAULT_MAX_PORT,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            concurrency: None,
        }
    }
}
