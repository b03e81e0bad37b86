//! Request correlation middleware.
//!
//! Every request runs inside a fresh [`TraceId`] scope. When the inner
//! service finishes, the identifier is written to the `trace-id` response
//! header and one completion line is logged with the method, path, status,
//! and elapsed time. Server errors are logged at `warn`, everything else at
//! `debug`.

use std::task::{Context, Poll};
use std::time::Instant;

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use actix_web::http::{Method, StatusCode};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, warn};

use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Middleware factory; wrap an `App` with it to correlate requests.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use storefront::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { inner: service }))
    }
}

/// Service produced by [`Trace`].
pub struct TraceMiddleware<S> {
    inner: S,
}

struct Completion {
    trace_id: TraceId,
    method: Method,
    path: String,
    started: Instant,
}

impl Completion {
    fn log(&self, status: StatusCode) {
        let elapsed_ms = self.started.elapsed().as_millis();
        if status.is_server_error() {
            warn!(
                trace_id = %self.trace_id,
                method = %self.method,
                path = %self.path,
                status = status.as_u16(),
                elapsed_ms,
                "request failed"
            );
        } else {
            debug!(
                trace_id = %self.trace_id,
                method = %self.method,
                path = %self.path,
                status = status.as_u16(),
                elapsed_ms,
                "request completed"
            );
        }
    }
}

fn stamp(headers: &mut HeaderMap, trace_id: TraceId) {
    // A hyphenated UUID is always a valid header value.
    if let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) {
        headers.insert(HeaderName::from_static(TRACE_ID_HEADER), value);
    }
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let completion = Completion {
            trace_id: TraceId::generate(),
            method: req.method().clone(),
            path: req.path().to_owned(),
            started: Instant::now(),
        };
        let trace_id = completion.trace_id;
        let pending = trace_id.scope(self.inner.call(req));
        Box::pin(async move {
            let mut res = pending.await?;
            completion.log(res.status());
            stamp(res.headers_mut(), trace_id);
            Ok(res)
        })
    }
}
