//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every resource endpoint (users, products, orders) and the
//!   health probes
//! - **Schemas**: wrappers from [`crate::inbound::http::schemas`] that
//!   describe records and envelopes without coupling domain types to utoipa
//!
//! The generated specification is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    AddressSchema, ErrorSchema, OrderListResult, OrderResult, OrderSchema, ProductItemSchema,
    ProductListResult, ProductResult, ProductSchema, UserListResult, UserResult, UserSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront API",
        description = "CRUD and free-text search over users, products, and orders."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list,
        crate::inbound::http::users::create,
        crate::inbound::http::users::get,
        crate::inbound::http::users::replace,
        crate::inbound::http::users::delete,
        crate::inbound::http::users::search,
        crate::inbound::http::users::schema,
        crate::inbound::http::products::list,
        crate::inbound::http::products::create,
        crate::inbound::http::products::get,
        crate::inbound::http::products::replace,
        crate::inbound::http::products::delete,
        crate::inbound::http::products::search,
        crate::inbound::http::products::schema,
        crate::inbound::http::orders::list,
        crate::inbound::http::orders::create,
        crate::inbound::http::orders::get,
        crate::inbound::http::orders::replace,
        crate::inbound::http::orders::delete,
        crate::inbound::http::orders::search,
        crate::inbound::http::orders::schema,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        AddressSchema,
        UserSchema,
        ProductSchema,
        ProductItemSchema,
        OrderSchema,
        UserResult,
        UserListResult,
        ProductResult,
        ProductListResult,
        OrderResult,
        OrderListResult
    )),
    tags(
        (name = "users", description = "Registered customers"),
        (name = "products", description = "Catalogue items"),
        (name = "orders", description = "Orders placed by users"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
