//! WebSocket server the page shim connects to.
//!
//! # Connection Flow
//!
//! 1. Rust binds the server to `localhost:0` (random port)
//! 2. The page shim is served with the WebSocket URL
//! 3. The shim connects and sends `page.load`
//! 4. The connection's widget is created and starts answering with commands

// ============================================================================
// Imports
// ============================================================================

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::WidgetOptions;
use crate::error::{Error, Result};

use super::Connection;

// ============================================================================
// Constants
// ============================================================================

/// Timeout for waiting for a page to connect.
const CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// PendingServer
// ============================================================================

/// A WebSocket server that is bound and waiting for pages.
///
/// # Example
///
/// ```ignore
/// use std::net::{IpAddr, Ipv4Addr};
/// use product_overlay::{PendingServer, WidgetOptions};
///
/// let server = PendingServer::bind(IpAddr::V4(Ipv4Addr::LOCALHOST), 0).await?;
/// println!("shim url: {}", server.ws_url());
///
/// let connection = server.accept().await?;
/// connection.run(WidgetOptions::new()).await?;
/// ```
pub struct PendingServer {
    /// TCP listener for incoming connections.
    listener: TcpListener,
    /// Port the server is bound to.
    port: u16,
}

impl PendingServer {
    /// Binds the server to the specified address and port.
    ///
    /// Use port 0 to let the OS assign a random available port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if binding fails.
    pub async fn bind(ip: IpAddr, port: u16) -> Result<Self> {
        let addr = SocketAddr::new(ip, port);
        let listener = TcpListener::bind(addr).await?;
        let actual_port = listener.local_addr()?.port();

        debug!(port = actual_port, "WebSocket server bound");

        Ok(Self {
            listener,
            port: actual_port,
        })
    }

    /// Returns the port the server is bound to.
    #[inline]
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Returns the WebSocket URL for this server.
    ///
    /// Format: `ws://127.0.0.1:{port}`
    #[inline]
    #[must_use]
    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}", self.port)
    }

    /// Returns the local socket address.
    #[inline]
    #[must_use]
    pub fn local_addr(&self) -> SocketAddr {
        SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), self.port)
    }

    /// Accepts one page connection.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionTimeout`] if no page connects within 30s
    /// - [`Error::Connection`] if the WebSocket upgrade fails
    pub async fn accept(&self) -> Result<Connection> {
        let (stream, addr) = timeout(CONNECTION_TIMEOUT, self.listener.accept())
            .await
            .map_err(|_| Error::connection_timeout(CONNECTION_TIMEOUT.as_millis() as u64))??;

        debug!(?addr, "TCP connection accepted");

        let ws_stream = tokio_tungstenite::accept_async(stream)
            .await
            .map_err(|e| Error::connection(format!("WebSocket upgrade failed: {e}")))?;

        info!(port = self.port, peer = %addr, "Page connected");

        Ok(Connection::new(ws_stream, addr))
    }

    /// Serves pages until the listener fails, one task per page.
    ///
    /// Accept timeouts and failed upgrades are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the listener itself fails.
    pub async fn serve(self, options: WidgetOptions) -> Result<()> {
        loop {
            match self.accept().await {
                Ok(connection) => {
                    let options = options.clone();
                    tokio::spawn(async move {
                        let peer = connection.peer_addr();
                        if let Err(e) = connection.run(options).await {
                            warn!(%peer, error = %e, "Page connection ended with error");
                        }
                    });
                }
                Err(Error::Io(e)) => return Err(Error::Io(e)),
                Err(e) => debug!(error = %e, "Skipping failed accept"),
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
