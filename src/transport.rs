//! TCP transport helpers.
//!
//! The protocol core is transport-agnostic: [`Connection`](crate::Connection)
//! works over anything that reads and writes bytes. This module is the thin
//! TCP glue the demo programs (and most real deployments) use, wrapping
//! `tokio::net` so callers get crate-level errors.
//!
//! # Example
//!
//! ```ignore
//! use wirecall::transport::{connect, Listener};
//!
//! let listener = Listener::bind("127.0.0.1:11223").await?;
//! let (stream, peer) = listener.accept().await?;
//!
//! // elsewhere
//! let stream = connect("127.0.0.1:11223").await?;
//! ```

use std::net::SocketAddr;

use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};

use crate::error::Result;

/// TCP listener for accepting peer connections.
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind to the given address.
    pub async fn bind(addr: impl ToSocketAddrs) -> Result<Self> {
        let inner = TcpListener::bind(addr).await?;
        Ok(Self { inner })
    }

    /// Accept the next inbound connection.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr)> {
        let (stream, peer) = self.inner.accept().await?;
        tracing::debug!(%peer, "accepted connection");
        Ok((stream, peer))
    }

    /// The local address the listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.inner.local_addr()?)
    }
}

/// Connect to a listening peer.
pub async fn connect(addr: impl ToSocketAddrs) -> Result<TcpStream> {
    let stream = TcpStream::connect(addr).await?;
    tracing::debug!(peer = %stream.peer_addr()?, "connected");
    Ok(stream)
}
