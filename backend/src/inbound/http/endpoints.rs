//! Declarative generator for per-resource HTTP endpoints.
//!
//! Every resource exposes the same seven operations; only the paths, the
//! resource type, and the documented schemas differ. Expanding the handlers
//! from one template keeps the routing table and the OpenAPI annotations in
//! step across `users`, `products`, and `orders`.

/// Generate the annotated handlers and a `configure` function for one
/// resource.
///
/// The expansion registers `search` and `schema` ahead of the collection
/// path and installs a 405 fallback on every resource path.
macro_rules! resource_endpoints {
    (
        resource: $resource:ident,
        tag: $tag:literal,
        collection_path: $collection:literal,
        search_path: $search:literal,
        schema_path: $schema:literal,
        item_path: $item:literal,
        single: $single:ident,
        list: $list:ident $(,)?
    ) => {
        use actix_web::{HttpResponse, web};
        use serde_json::Value;

        use $crate::domain::$resource;
        use $crate::inbound::http::ApiResult;
        use $crate::inbound::http::resources::{self, method_not_allowed};
        use $crate::inbound::http::schemas::{ErrorSchema, $list, $single};
        use $crate::inbound::http::state::HttpState;
        use $crate::inbound::http::validation::{PageParams, SearchParams};

        #[doc = concat!("List ", $tag, " in store order, optionally paginated.")]
        #[utoipa::path(
            get,
            path = $collection,
            operation_id = concat!("list_", $tag),
            tags = [$tag],
            params(
                ("limit" = Option<u64>, Query, description = "Maximum number of records"),
                ("offset" = Option<u64>, Query, description = "Records to skip first")
            ),
            responses(
                (status = 200, description = "Records in store order", body = $list),
                (status = 400, description = "Malformed pagination", body = ErrorSchema),
                (status = 500, description = "Store failure", body = ErrorSchema)
            )
        )]
        pub async fn list(
            state: web::Data<HttpState>,
            page: web::Query<PageParams>,
        ) -> ApiResult<HttpResponse> {
            resources::list::<$resource>(&state, page.into_inner()).await
        }

        #[doc = concat!("Create one record in ", $tag, "; any supplied `id` is ignored.")]
        #[utoipa::path(
            post,
            path = $collection,
            operation_id = concat!("create_", $tag),
            tags = [$tag],
            request_body = Object,
            responses(
                (status = 200, description = "The stored record", body = $list),
                (status = 400, description = "Body is not a JSON object", body = ErrorSchema),
                (status = 500, description = "Store or schema failure", body = ErrorSchema)
            )
        )]
        pub async fn create(
            state: web::Data<HttpState>,
            body: web::Json<Value>,
        ) -> ApiResult<HttpResponse> {
            resources::create::<$resource>(&state, body.into_inner()).await
        }

        #[doc = concat!("Fetch one record from ", $tag, " by identifier.")]
        #[utoipa::path(
            get,
            path = $item,
            operation_id = concat!("get_", $tag),
            tags = [$tag],
            params(("id" = i64, Path, description = "Record identifier")),
            responses(
                (status = 200, description = "The record", body = $single),
                (status = 400, description = "Malformed identifier", body = ErrorSchema),
                (status = 404, description = "No such record", body = ErrorSchema),
                (status = 500, description = "Store failure", body = ErrorSchema)
            )
        )]
        pub async fn get(
            state: web::Data<HttpState>,
            id: web::Path<String>,
        ) -> ApiResult<HttpResponse> {
            resources::get::<$resource>(&state, &id).await
        }

        #[doc = concat!("Replace or create the record in ", $tag, " stored under `id`.")]
        #[utoipa::path(
            put,
            path = $item,
            operation_id = concat!("replace_", $tag),
            tags = [$tag],
            params(("id" = i64, Path, description = "Record identifier")),
            request_body = Object,
            responses(
                (status = 200, description = "The stored record", body = $single),
                (status = 400, description = "Malformed identifier or body", body = ErrorSchema),
                (status = 500, description = "Store or schema failure", body = ErrorSchema)
            )
        )]
        pub async fn replace(
            state: web::Data<HttpState>,
            id: web::Path<String>,
            body: web::Json<Value>,
        ) -> ApiResult<HttpResponse> {
            resources::replace::<$resource>(&state, &id, body.into_inner()).await
        }

        #[doc = concat!("Delete the record in ", $tag, " stored under `id`.")]
        #[utoipa::path(
            delete,
            path = $item,
            operation_id = concat!("delete_", $tag),
            tags = [$tag],
            params(("id" = i64, Path, description = "Record identifier")),
            responses(
                (status = 200, description = "Deleted; the body is an empty object", body = Object),
                (status = 400, description = "Malformed identifier", body = ErrorSchema),
                (status = 500, description = "Nothing deleted or store failure", body = ErrorSchema)
            )
        )]
        pub async fn delete(
            state: web::Data<HttpState>,
            id: web::Path<String>,
        ) -> ApiResult<HttpResponse> {
            resources::delete::<$resource>(&state, &id).await
        }

        #[doc = concat!("Free-text search over the string values of ", $tag, ".")]
        #[utoipa::path(
            get,
            path = $search,
            operation_id = concat!("search_", $tag),
            tags = [$tag],
            params(("q" = String, Query, description = "Words that must all occur")),
            responses(
                (status = 200, description = "Matching records", body = $list),
                (status = 400, description = "Missing or blank query", body = ErrorSchema),
                (status = 500, description = "Store failure", body = ErrorSchema)
            )
        )]
        pub async fn search(
            state: web::Data<HttpState>,
            params: web::Query<SearchParams>,
        ) -> ApiResult<HttpResponse> {
            resources::search::<$resource>(&state, params.into_inner()).await
        }

        #[doc = concat!("JSON schema describing ", $tag, " records.")]
        #[utoipa::path(
            get,
            path = $schema,
            operation_id = concat!("schema_", $tag),
            tags = [$tag],
            responses((status = 200, description = "JSON schema document", body = Object))
        )]
        pub async fn schema() -> HttpResponse {
            resources::schema::<$resource>()
        }

        /// Register this resource's routes.
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::resource($search)
                    .route(web::get().to(search))
                    .default_service(method_not_allowed(&["GET"])),
            )
            .service(
                web::resource($schema)
                    .route(web::get().to(schema))
                    .default_service(method_not_allowed(&["GET"])),
            )
            .service(
                web::resource($collection)
                    .route(web::get().to(list))
                    .route(web::post().to(create))
                    .default_service(method_not_allowed(&["GET", "POST"])),
            )
            .service(
                web::resource($item)
                    .route(web::get().to(get))
                    .route(web::put().to(replace))
                    .route(web::delete().to(delete))
                    .default_service(method_not_allowed(&["GET", "PUT", "DELETE"])),
            );
        }
    };
}

pub(crate) use resource_endpoints;
