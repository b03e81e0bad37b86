//! Shared validation helpers for inbound HTTP adapters.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::ports::FindOptions;
use crate::domain::{Document, Error, RecordId};

/// Pagination window accepted by list endpoints.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageParams {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl From<PageParams> for FindOptions {
    fn from(params: PageParams) -> Self {
        Self {
            limit: params.limit,
            offset: params.offset,
        }
    }
}

/// Raw `q` parameter accepted by search endpoints.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Parse a record identifier taken from the request path.
///
/// # Errors
/// Returns an invalid-request [`Error`] unless `raw` is a positive integer.
pub(crate) fn parse_record_id(raw: &str) -> Result<RecordId, Error> {
    raw.parse::<i64>()
        .ok()
        .and_then(|value| RecordId::new(value).ok())
        .ok_or_else(|| {
            Error::invalid_request(format!("invalid id '{raw}': expected a positive integer"))
        })
}

/// Accept a request body only when it is a JSON object.
///
/// # Errors
/// Returns an invalid-request [`Error`] for arrays, scalars, and `null`.
pub(crate) fn require_object(body: Value) -> Result<Document, Error> {
    match body {
        Value::Object(document) => Ok(document),
        _ => Err(Error::invalid_request("request body must be a JSON object")),
    }
}
