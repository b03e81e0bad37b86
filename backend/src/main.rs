//! Storefront entry-point: loads configuration, prepares the document store,
//! and serves the REST API with health probes and OpenAPI docs.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, build_store, create_server};
use storefront::config::StorefrontSettings;
use storefront::inbound::http::health::HealthState;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        StorefrontSettings::load().map_err(|err| std::io::Error::other(err.to_string()))?;
    let store = build_store(&settings)
        .await
        .map_err(std::io::Error::other)?;

    let health_state = web::Data::new(HealthState::new());
    let bind_addr = settings.bind_addr();
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, store))?;
    info!(%bind_addr, "storefront listening");

    let result = server.await;
    health_state.mark_unhealthy();
    info!("storefront stopped");
    result
}
