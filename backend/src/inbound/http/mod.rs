//! HTTP inbound adapter exposing the resource REST endpoints.
//!
//! [`configure`] installs the extractor error handlers and every resource's
//! routes; health probes and API docs are mounted by the server.

use actix_web::web;

mod endpoints;
pub mod error;
pub mod health;
pub mod orders;
pub mod products;
pub mod resources;
pub mod schemas;
pub mod state;
pub mod users;
pub mod validation;

pub use error::ApiResult;

use error::{json_error_handler, path_error_handler, query_error_handler};

/// Register extractor configuration and all resource routes.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::{App, web};
/// use storefront::inbound::http::{configure, state::HttpState};
/// use storefront::outbound::memory::InMemoryDocumentStore;
///
/// let state = HttpState::new(Arc::new(InMemoryDocumentStore::new()));
/// let _app = App::new()
///     .app_data(web::Data::new(state))
///     .configure(configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));
    users::configure(cfg);
    products::configure(cfg);
    orders::configure(cfg);
}
