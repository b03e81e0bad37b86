//! Generic request handling shared by every resource endpoint.
//!
//! The per-resource modules (`users`, `products`, `orders`) expose thin,
//! OpenAPI-annotated handlers that delegate here. Each handler decodes the
//! request, calls the matching [`ResourceService`] operation, and wraps the
//! outcome in the `{"result": ...}` envelope.
//!
//! [`ResourceService`]: crate::domain::ResourceService

use actix_web::http::header::{self, HeaderValue};
use actix_web::http::Method;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Route, web};
use serde::Serialize;
use serde_json::{Value, json};

use super::ApiResult;
use super::state::HttpState;
use super::validation::{PageParams, SearchParams, parse_record_id, require_object};
use crate::domain::{Error, Resource, SearchQuery};

/// Success envelope wrapping every resource payload.
#[derive(Debug, Serialize)]
pub struct ResultEnvelope<T> {
    pub result: T,
}

impl<T: Serialize> ResultEnvelope<T> {
    fn respond(result: T) -> HttpResponse {
        HttpResponse::Ok().json(Self { result })
    }
}

pub(crate) async fn list<R: Resource>(
    state: &HttpState,
    page: PageParams,
) -> ApiResult<HttpResponse> {
    let records = state.service::<R>().list(page.into()).await?;
    Ok(ResultEnvelope::respond(records))
}

pub(crate) async fn create<R: Resource>(
    state: &HttpState,
    body: Value,
) -> ApiResult<HttpResponse> {
    let document = require_object(body)?;
    let record = state.service::<R>().create(document).await?;
    Ok(ResultEnvelope::respond(vec![record]))
}

pub(crate) async fn get<R: Resource>(state: &HttpState, raw_id: &str) -> ApiResult<HttpResponse> {
    let id = parse_record_id(raw_id)?;
    let record = state.service::<R>().get(id).await?;
    Ok(ResultEnvelope::respond(record))
}

pub(crate) async fn replace<R: Resource>(
    state: &HttpState,
    raw_id: &str,
    body: Value,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(raw_id)?;
    let document = require_object(body)?;
    let record = state.service::<R>().replace(id, document).await?;
    Ok(ResultEnvelope::respond(record))
}

pub(crate) async fn delete<R: Resource>(
    state: &HttpState,
    raw_id: &str,
) -> ApiResult<HttpResponse> {
    let id = parse_record_id(raw_id)?;
    state.service::<R>().delete(id).await?;
    Ok(HttpResponse::Ok().json(json!({})))
}

pub(crate) async fn search<R: Resource>(
    state: &HttpState,
    params: SearchParams,
) -> ApiResult<HttpResponse> {
    let query = SearchQuery::parse(params.q)?;
    let records = state.service::<R>().search(&query).await?;
    Ok(ResultEnvelope::respond(records))
}

pub(crate) fn schema<R: Resource>() -> HttpResponse {
    HttpResponse::Ok().json(R::schema().to_json_schema())
}

/// Fallback route answering any unlisted method with 405 and an `Allow`
/// header naming `allowed`.
pub fn method_not_allowed(allowed: &'static [&'static str]) -> Route {
    web::to(move |req: HttpRequest| async move { not_allowed_response(req.method(), allowed) })
}

fn not_allowed_response(method: &Method, allowed: &[&str]) -> HttpResponse {
    let mut response =
        Error::method_not_allowed(format!("Method {method} Not Allowed")).error_response();
    match HeaderValue::from_str(&allowed.join(", ")) {
        Ok(value) => {
            response.headers_mut().insert(header::ALLOW, value);
        }
        Err(error) => tracing::error!(%error, "failed to encode Allow header"),
    }
    response
}
