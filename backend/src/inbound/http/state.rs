//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on the document store port and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::DocumentStore;
use crate::domain::{Resource, ResourceService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub store: Arc<dyn DocumentStore>,
}

impl HttpState {
    /// Construct state around a document store.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use storefront::inbound::http::state::HttpState;
    /// use storefront::outbound::memory::InMemoryDocumentStore;
    ///
    /// let state = HttpState::new(Arc::new(InMemoryDocumentStore::new()));
    /// # let _ = state;
    /// ```
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Resource service for `R` over the shared store.
    pub fn service<R: Resource>(&self) -> ResourceService<R> {
        ResourceService::new(Arc::clone(&self.store))
    }
}
