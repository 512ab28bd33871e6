//! Listener binding, serving and startup network diagnostics.
//!
//! The API listens on `0.0.0.0` and `::` on one port. After binding, the
//! host's addresses and (if any) its overlay-network name are logged so an
//! operator on another machine knows which URL to call. Diagnostics are
//! best effort: every failure there is logged as a warning and ignored.

use std::collections::BTreeSet;
use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;

use axum::Router;
use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::server::allocation::ALLOCATION_PATH;

/// Upper bound for each DNS lookup made by the diagnostics.
pub const DNS_TIMEOUT: Duration = Duration::from_secs(3);

const LISTEN_BACKLOG: i32 = 1024;

/// Bind a non-blocking TCP listener on `addr`.
///
/// IPv6 sockets are `IPV6_V6ONLY` so an IPv4 listener can share the port.
pub fn bind_listener(addr: SocketAddr) -> io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    // SO_REUSEADDR - allow rebinding while old connections sit in TIME_WAIT
    socket.set_reuse_address(true)?;
    if addr.is_ipv6() {
        socket.set_only_v6(true)?;
    }
    socket.set_nodelay(true)?;
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;

    TcpListener::from_std(socket.into())
}

/// Bind `0.0.0.0:<port>` and `[::]:<port>`. Either failure is returned.
pub fn bind_dual_stack(port: u16) -> io::Result<Vec<TcpListener>> {
    let addrs = [
        SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port),
        SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), port),
    ];

    addrs
        .into_iter()
        .map(|addr| {
            bind_listener(addr).map_err(|e| io::Error::new(e.kind(), format!("{addr}: {e}")))
        })
        .collect()
}

/// Serve `app` on every listener until one fails or Ctrl-C is received.
pub async fn serve(listeners: Vec<TcpListener>, app: Router) -> io::Result<()> {
    let servers = listeners.into_iter().map(|listener| {
        let app = app.clone();
        async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(shutdown_signal())
                .await
        }
    });

    futures::future::try_join_all(servers).await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => {
            tracing::warn!("failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

/// URL of the allocation endpoint on `host:port`.
///
/// IPv6 literals are bracketed.
pub fn allocation_url(host: &str, port: u16) -> String {
    match host.parse::<Ipv6Addr>() {
        Ok(ip) => format!("http://{}{}", SocketAddr::from((ip, port)), ALLOCATION_PATH),
        Err(_) => format!("http://{}:{}{}", host, port, ALLOCATION_PATH),
    }
}

/// What the startup diagnostics found out about this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessReport {
    pub host_name: String,
    pub addresses: Vec<IpAddr>,
    /// Fully-qualified overlay-network name, if one was found.
    pub overlay_domain: Option<String>,
}

impl AccessReport {
    /// Log the URLs an operator can use to reach the allocation endpoint.
    pub fn log(&self, config: &ServerConfig) {
        let port = config.port;

        tracing::info!("network interfaces on '{}':", self.host_name);
        for addr in &self.addresses {
            tracing::info!("  -> {}", allocation_url(&addr.to_string(), port));
        }

        tracing::info!("API access URLs:");
        tracing::info!("  short hostname: {}", allocation_url(&self.host_name, port));
        match &self.overlay_domain {
            Some(domain) => {
                tracing::info!(
                    "  overlay domain: {} (recommended)",
                    allocation_url(domain, port)
                );
            }
            None => {
                let fallback = format!("{}.{}", self.host_name, config.overlay_tailnet);
                tracing::warn!(
                    "overlay domain not detected, try {}",
                    allocation_url(&fallback, port)
                );
                tracing::info!(
                    "the short hostname may not resolve on every machine; prefer the full overlay domain"
                );
            }
        }
        tracing::info!("the addresses listed above can be used directly as well");
    }
}

/// Gather and log the host's reachable addresses. Never fails.
pub async fn log_access_urls(config: &ServerConfig) {
    match collect_access_report(config).await {
        Ok(report) => report.log(config),
        Err(e) => tracing::warn!("could not enumerate network addresses: {}", e),
    }
}

/// Resolve the host name, its addresses and its overlay-network name.
///
/// Only a failure to read the host name is an error; lookup failures
/// shrink the report instead.
pub async fn collect_access_report(config: &ServerConfig) -> io::Result<AccessReport> {
    let host_name = hostname::get()?.to_string_lossy().into_owned();

    let addresses = match resolve(&host_name).await {
        Ok(addresses) => addresses,
        Err(e) => {
            tracing::warn!("could not resolve '{}': {}", host_name, e);
            Vec::new()
        }
    };

    let overlay_domain =
        discover_overlay_domain(&host_name, &config.overlay_suffix, &config.overlay_tailnet)
            .await;

    Ok(AccessReport {
        host_name,
        addresses,
        overlay_domain,
    })
}

/// Find an overlay-network name for `host_name`.
///
/// A host name that already contains `suffix` is returned unchanged.
/// Otherwise `<host_name>.<tailnet>` is returned if it resolves.
pub async fn discover_overlay_domain(
    host_name: &str,
    suffix: &str,
    tailnet: &str,
) -> Option<String> {
    if !suffix.is_empty() && host_name.contains(suffix) {
        return Some(host_name.to_string());
    }
    if tailnet.is_empty() {
        return None;
    }

    let candidate = format!("{}.{}", host_name, tailnet.trim_start_matches('.'));
    match resolve(&candidate).await {
        Ok(addresses) if !addresses.is_empty() => Some(candidate),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("overlay name '{}' did not resolve: {}", candidate, e);
            None
        }
    }
}

/// Resolve `host` to its distinct IP addresses, bounded by [`DNS_TIMEOUT`].
async fn resolve(host: &str) -> io::Result<Vec<IpAddr>> {
    let lookup = tokio::net::lookup_host((host, 0));
    let addrs = tokio::time::timeout(DNS_TIMEOUT, lookup)
        .await
        .map_err(|_| io::Error::new(io::ErrorKind::TimedOut, "DNS lookup timed out"))??;

    let unique: BTreeSet<IpAddr> = addrs.map(|addr| addr.ip()).collect();
    Ok(unique.into_iter().collect())
}
