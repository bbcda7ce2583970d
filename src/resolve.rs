use anyhow::{bail, Context, Result};
use std::net::IpAddr;
use tokio::net::lookup_host;

/// Resolve a hostname or IP literal to its addresses, deduplicated in
/// resolver order. A lookup failure or an empty answer is an error: the
/// caller must not start a scan against an unresolved host.
pub async fn resolve_host(host: &str) -> Result<Vec<IpAddr>> {
    let addrs = lookup_host((host, 0u16))
        .await
        .with_context(|| format!("failed to resolve hostname: {host}"))?;

    let mut out: Vec<IpAddr> = Vec::new();
    for addr in addrs {
        let ip = addr.ip();
        if !out.contains(&ip) {
            out.push(ip);
        }
    }

    if out.is_empty() {
        bail!("hostname resolved to no addresses: {host}");
    }
    Ok(out)
}
