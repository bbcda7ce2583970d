use std::collections::BTreeSet;
use std::time::Duration;
use tcp_scan_rs::scanner::{scan_hosts, scan_hosts_streaming};
use tcp_scan_rs::types::{ScanConfig, ScanReport};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

fn small_config() -> ScanConfig {
    ScanConfig {
        max_port: 32,
        timeout: Duration::from_millis(500),
        concurrency: None,
    }
}

fn open_ports(report: &ScanReport) -> BTreeSet<u16> {
    report
        .outcomes
        .iter()
        .filter(|o| o.state.is_open())
        .map(|o| o.port)
        .collect()
}

#[tokio::test]
async fn one_outcome_per_port_no_gaps_or_duplicates() {
    let targets = vec!["127.0.0.1".to_string()];
    let report = scan_hosts(&targets, &small_config()).await;

    assert_eq!(report.scanned_total, 32);
    assert_eq!(report.outcomes.len(), 32);

    let ports: BTreeSet<u16> = report.outcomes.iter().map(|o| o.port).collect();
    assert_eq!(ports.len(), 32, "every port probed exactly once");
    assert!(ports.contains(&1) && ports.contains(&32), "range endpoints included");
    assert!(!ports.contains(&0) && !ports.contains(&33), "out-of-range ports never probed");
    assert!(report.outcomes.iter().all(|o| o.host == "127.0.0.1"));
    assert!(report.outcomes.iter().all(|o| o.protocol == "tcp"));
}

#[tokio::test]
async fn streaming_sink_sees_every_outcome_before_return() {
    let targets = vec!["127.0.0.1".to_string()];
    let (tx, mut rx) = mpsc::unbounded_channel();
    let report = scan_hosts_streaming(&targets, &small_config(), tx).await;

    // The scan only returns after the completion barrier, so every emission
    // is already buffered in the channel.
    let mut emitted = 0u64;
    while rx.try_recv().is_ok() {
        emitted += 1;
    }
    assert_eq!(emitted, report.scanned_total);
}

#[tokio::test]
async fn repeated_scans_agree_on_open_port_set() {
    let targets = vec!["127.0.0.1".to_string()];
    let config = small_config();

    let first = scan_hosts(&targets, &config).await;
    let second = scan_hosts(&targets, &config).await;

    assert_eq!(first.scanned_total, second.scanned_total);
    assert_eq!(open_ports(&first), open_ports(&second));
}

#[tokio::test]
async fn listener_inside_range_is_reported_open() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();

    // Stretch the range up to the ephemeral listener port; cap concurrency
    // so tens of thousands of simultaneous sockets don't exhaust fds.
    let config = ScanConfig {
        max_port: port,
        timeout: Duration::from_millis(500),
        concurrency: Some(512),
    };
    let targets = vec!["127.0.0.1".to_string()];
    let report = scan_hosts(&targets, &config).await;

    assert_eq!(report.scanned_total, u64::from(port));
    assert_eq!(report.outcomes.len(), usize::from(port));
    assert!(open_ports(&report).contains(&port));
    assert_eq!(report.open_count, open_ports(&report).len() as u64);
}

#[tokio::test]
async fn multiple_targets_expand_the_outcome_set() {
    let targets = vec!["127.0.0.1".to_string(), "127.0.0.2".to_string()];
    let config = ScanConfig {
        max_port: 8,
        timeout: Duration::from_millis(500),
        concurrency: None,
    };
    let report = scan_hosts(&targets, &config).await;

    assert_eq!(report.scanned_total, 16);
    assert_eq!(report.outcomes.len(), 16);
    for host in &targets {
        let per_host = report.outcomes.iter().filter(|o| &o.host == host).count();
        assert_eq!(per_host, 8);
    }
}
