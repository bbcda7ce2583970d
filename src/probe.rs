use crate::types::{PortState, ScanOutcome, PROTOCOL_TCP};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time;

/// Attempt one bounded-time TCP connect against `host:port` and classify it.
///
/// - Uses `tokio::time::timeout` to bound connect time for the socket.
/// - A connection established within `timeout` means `Open`; the stream is
///   dropped immediately, no payload is ever sent or read.
/// - Any failure (refused, timed out, unreachable, name lookup) means
///   `Closed`. A single attempt is authoritative; there are no retries.
pub async fn probe(host: &str, port: u16, timeout: Duration) -> ScanOutcome {
    let state = match time::timeout(timeout, TcpStream::connect(target_addr(host, port))).await {
        Ok(Ok(stream)) => {
            drop(stream);
            PortState::Open
        }
        _ => PortState::Closed,
    };

    ScanOutcome {
        host: host.to_string(),
        port,
        protocol: PROTOCOL_TCP.to_string(),
        state,
    }
}

/// Format the connect target, bracketing IPv6 literals via `SocketAddr`.
fn target_addr(host: &str, port: u16) -> String {
    match host.parse::<IpAddr>() {
        Ok(ip) => SocketAddr::new(ip, port).to_string(),
        Err(_) => format!("{host}:{port}"),
    }
}
