//! Storefront: generic CRUD and free-text search over users, products, and
//! orders.
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`]: records, schema descriptors, errors, and the generic
//!   resource service, plus the document store port.
//! - [`inbound`]: actix-web handlers exposing the REST surface.
//! - [`outbound`]: document store adapters (in-memory and PostgreSQL).
//! - [`client`]: HTTP resource client and the resource panel state machine.
//! - [`middleware`]: request trace correlation.

pub mod client;
pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
