//! HTTP server configuration object.

use std::net::SocketAddr;
use std::sync::Arc;

use storefront::domain::ports::DocumentStore;

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) store: Arc<dyn DocumentStore>,
}

impl ServerConfig {
    /// Construct a server configuration around a prepared store.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, store: Arc<dyn DocumentStore>) -> Self {
        Self { bind_addr, store }
    }
}
