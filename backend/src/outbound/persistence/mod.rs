//! PostgreSQL persistence adapter using Diesel.
//!
//! Provides the [`DieselDocumentStore`] implementation of the document store
//! port, backed by `diesel-async` with `bb8` pooling.
//!
//! # Architecture
//!
//! - **Thin adapter**: the store only translates between rows and domain
//!   documents and enforces the registered collection schemas.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Embedded migrations**: [`run_pending_migrations`] brings the schema up
//!   to date before the pool is built.
//!
//! # Example
//!
//! ```no_run
//! use storefront::outbound::persistence::{
//!     DbPool, DieselDocumentStore, PoolConfig, run_pending_migrations,
//! };
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/storefront";
//! run_pending_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let store = DieselDocumentStore::new(pool, "main");
//! # let _ = store;
//! # Ok(())
//! # }
//! ```

mod diesel_document_store;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_document_store::DieselDocumentStore;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
