use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tcp_scan_rs::resolve::resolve_host;
use tcp_scan_rs::scanner;
use tcp_scan_rs::types::{
    PortState, ScanConfig, ScanOutcome, DEFAULT_MAX_PORT, DEFAULT_TIMEOUT_MS,
};
use tokio::sync::mpsc;

/// tcp-scan-rs — concurrent TCP port reachability prober.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "tcp-scan-rs",
    version,
    about = "Concurrent TCP port reachability prober with bounded per-probe timeouts.",
    long_about = None
)]
struct Cli {
    /// Hostname or IP address to scan. Prompts interactively when omitted.
    host: Option<String>,

    /// Highest port to probe; the scan covers ports 1..=max-port.
    #[arg(long = "max-port", default_value_t = DEFAULT_MAX_PORT)]
    max_port: u16,

    /// Socket connect timeout per probe in milliseconds.
    #[arg(long = "timeout-ms", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Max concurrent connect attempts. Unlimited when omitted.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Print the final report as pretty JSON instead of per-port lines.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let host = match cli.host.clone() {
        Some(h) => h,
        None => prompt_for_host()?,
    };

    let addrs = match resolve_host(&host).await {
        Ok(addrs) => addrs,
        Err(e) => {
            eprintln!("Error resolving hostname: {e:#}");
            std::process::exit(1);
        }
    };
    // Only the first resolved address is scanned; secondary addresses of
    // dual-stack hosts are ignored.
    let target = addrs[0].to_string();

    let config = ScanConfig {
        max_port: cli.max_port,
        timeout: Duration::from_millis(cli.timeout_ms),
        concurrency: cli.concurrency,
    };
    let targets = vec![target];

    if cli.json {
        let report = scanner::scan_hosts(&targets, &config).await;
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Starting port scan...");

    let (tx, mut rx) = mpsc::unbounded_channel::<ScanOutcome>();
    let printer = tokio::spawn(async move {
        while let Some(outcome) = rx.recv().await {
            println!("{}", render_outcome(&outcome));
        }
    });

    let report = scanner::scan_hosts_streaming(&targets, &config, tx).await;
    // The scan dropped its sender, so the printer drains and exits.
    let _ = printer.await;

    println!(
        "\nOpen ports: {} (scanned: {})",
        report.open_count, report.scanned_total
    );
    Ok(())
}

fn prompt_for_host() -> Result<String> {
    print!("Enter the hostname or IP address to scan (leave blank for localhost): ");
    io::stdout().flush().context("failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read host from stdin")?;

    let host = line.trim();
    if host.is_empty() {
        Ok("localhost".to_string())
    } else {
        Ok(host.to_string())
    }
}

fn render_outcome(outcome: &ScanOutcome) -> String {
    let line = format!(
        "Port {} ({} on {}) is {}",
        outcome.port, outcome.protocol, outcome.host, outcome.state
    );
    match outcome.state {
        PortState::Open => line.green().to_string(),
        PortState::Closed => line.red().to_string(),
    }
}
