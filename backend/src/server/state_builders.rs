//! Builders for the document store and the HTTP state that wraps it.

use std::sync::Arc;

use tracing::{info, warn};

use storefront::config::StorefrontSettings;
use storefront::domain::all_schemas;
use storefront::domain::ports::{DocumentStore, DocumentStoreError};
use storefront::inbound::http::state::HttpState;
use storefront::outbound::memory::InMemoryDocumentStore;
use storefront::outbound::persistence::{
    DbPool, DieselDocumentStore, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};

/// Failures raised while preparing the document store.
#[derive(Debug, thiserror::Error)]
pub enum StoreSetupError {
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error(transparent)]
    Pool(#[from] PoolError),
    #[error("failed to register collection schemas: {0}")]
    Schemas(#[from] DocumentStoreError),
}

/// Build the configured document store and register every collection schema.
///
/// A configured database URL selects PostgreSQL (migrations first, then the
/// pool); otherwise the in-memory store is used.
///
/// # Errors
/// Returns [`StoreSetupError`] when migrations, pool construction, or schema
/// registration fail.
pub async fn build_store(
    settings: &StorefrontSettings,
) -> Result<Arc<dyn DocumentStore>, StoreSetupError> {
    let store: Arc<dyn DocumentStore> = match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url).await?;
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.db_max_connections()),
            )
            .await?;
            info!(branch = settings.branch(), "using PostgreSQL document store");
            Arc::new(DieselDocumentStore::new(pool, settings.branch()))
        }
        None => {
            warn!("no database URL configured; documents are kept in memory only");
            Arc::new(InMemoryDocumentStore::new())
        }
    };
    store.register_schemas(&all_schemas()).await?;
    Ok(store)
}

/// Wrap a prepared store in the HTTP handler state.
pub fn build_http_state(store: Arc<dyn DocumentStore>) -> HttpState {
    HttpState::new(store)
}
