//! Live server harness for suites that speak HTTP over a real socket.
//!
//! The harness owns a single-threaded Tokio runtime plus a `LocalSet` because
//! Actix uses `spawn_local` internally. Dropping the harness stops the server
//! even if a test panics.

use std::future::Future;
use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpServer, web};
use storefront::Trace;
use storefront::domain::all_schemas;
use storefront::domain::ports::DocumentStore;
use storefront::inbound::http::configure;
use storefront::inbound::http::state::HttpState;
use storefront::outbound::memory::InMemoryDocumentStore;
use tokio::runtime::Runtime;
use tokio::task::LocalSet;

pub struct StorefrontServer {
    runtime: Runtime,
    local: LocalSet,
    base_url: String,
    handle: ServerHandle,
}

impl StorefrontServer {
    /// Serve a fresh in-memory store with every collection registered.
    pub fn with_memory_store() -> Result<Self, String> {
        Self::start(Arc::new(InMemoryDocumentStore::with_schemas(&all_schemas())))
    }

    /// Serve `store` on an ephemeral localhost port.
    pub fn start(store: Arc<dyn DocumentStore>) -> Result<Self, String> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|err| err.to_string())?;
        let local = LocalSet::new();

        let listener = TcpListener::bind("127.0.0.1:0").map_err(|err| err.to_string())?;
        let addr = listener.local_addr().map_err(|err| err.to_string())?;
        let http_state = web::Data::new(HttpState::new(store));

        let handle = local.block_on(&runtime, async move {
            let server = HttpServer::new(move || {
                App::new()
                    .app_data(http_state.clone())
                    .wrap(Trace)
                    .configure(configure)
            })
            .disable_signals()
            .workers(1)
            .listen(listener)
            .map_err(|err| err.to_string())?
            .run();

            let handle = server.handle();
            actix_web::rt::spawn(server);
            Ok::<_, String>(handle)
        })?;

        Ok(Self {
            runtime,
            local,
            base_url: format!("http://{addr}"),
            handle,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Drive `future` to completion alongside the server task.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.local.block_on(&self.runtime, future)
    }
}

impl Drop for StorefrontServer {
    fn drop(&mut self) {
        let handle = self.handle.clone();
        self.local.block_on(&self.runtime, async move {
            handle.stop(true).await;
        });
    }
}
