//! Resource API port and its reqwest-backed HTTP adapter.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::domain::ports::define_port_error;
use crate::domain::{Document, Order, Product, RecordId, Resource, User};

define_port_error! {
    /// Errors raised while talking to the resource API.
    pub enum ResourceApiError {
        /// The request never produced a response.
        Transport { message: String } => "request failed: {message}",
        /// The server answered with a non-success status.
        Status { status: u16, message: String } => "server responded {status}: {message}",
        /// The response body did not have the expected shape.
        Decode { message: String } => "malformed response: {message}",
    }
}

/// Operations the resource panel issues against one collection.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// First `limit` records in store order.
    async fn list(&self, limit: u64) -> Result<Vec<Document>, ResourceApiError>;

    /// Records matching `query`.
    async fn search(&self, query: &str) -> Result<Vec<Document>, ResourceApiError>;

    /// Create a record; the response lists the stored record.
    async fn create(&self, record: Document) -> Result<Vec<Document>, ResourceApiError>;

    /// Replace the record stored under `id`.
    async fn replace(&self, id: RecordId, record: Document) -> Result<Document, ResourceApiError>;

    /// Delete the record stored under `id`.
    async fn delete(&self, id: RecordId) -> Result<(), ResourceApiError>;
}

#[derive(Deserialize)]
struct ResultEnvelope<T> {
    result: T,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: String,
}

/// [`ResourceApi`] adapter speaking the storefront REST surface.
///
/// # Examples
/// ```
/// use storefront::client::HttpResourceClient;
/// use storefront::domain::Product;
///
/// let client = HttpResourceClient::for_resource::<Product>("http://localhost:8080/");
/// assert_eq!(client.collection_url(), "http://localhost:8080/api/products");
/// ```
#[derive(Debug, Clone)]
pub struct HttpResourceClient {
    http: Client,
    base_url: String,
    collection: String,
    item: String,
}

impl HttpResourceClient {
    /// Client for an arbitrary collection/item path pair.
    pub fn new(
        base_url: impl Into<String>,
        collection: impl Into<String>,
        item: impl Into<String>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            collection: collection.into(),
            item: item.into(),
        }
    }

    /// Client for the collection backing `R`.
    pub fn for_resource<R: Resource>(base_url: impl Into<String>) -> Self {
        Self::new(base_url, R::COLLECTION, R::ITEM)
    }

    /// Client for a collection named on the command line.
    ///
    /// Returns `None` for names other than `users`, `products`, and `orders`.
    pub fn for_collection(base_url: impl Into<String>, name: &str) -> Option<Self> {
        if name == User::COLLECTION {
            Some(Self::for_resource::<User>(base_url))
        } else if name == Product::COLLECTION {
            Some(Self::for_resource::<Product>(base_url))
        } else if name == Order::COLLECTION {
            Some(Self::for_resource::<Order>(base_url))
        } else {
            None
        }
    }

    /// URL of the collection endpoint.
    #[must_use]
    pub fn collection_url(&self) -> String {
        format!("{}/api/{}", self.base_url, self.collection)
    }

    fn item_url(&self, id: RecordId) -> String {
        format!("{}/api/{}/{id}", self.base_url, self.item)
    }

    async fn send(request: RequestBuilder) -> Result<reqwest::Response, ResourceApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ResourceApiError::transport(err.to_string()))?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "resource API responded");
        if status.is_success() {
            return Ok(response);
        }
        Err(status_error(status, response).await)
    }

    async fn read_result<T: DeserializeOwned>(
        request: RequestBuilder,
    ) -> Result<T, ResourceApiError> {
        let response = Self::send(request).await?;
        let envelope: ResultEnvelope<T> = response
            .json()
            .await
            .map_err(|err| ResourceApiError::decode(err.to_string()))?;
        Ok(envelope.result)
    }
}

async fn status_error(status: StatusCode, response: reqwest::Response) -> ResourceApiError {
    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorEnvelope>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    ResourceApiError::status(status.as_u16(), message)
}

#[async_trait]
impl ResourceApi for HttpResourceClient {
    async fn list(&self, limit: u64) -> Result<Vec<Document>, ResourceApiError> {
        let request = self
            .http
            .get(self.collection_url())
            .query(&[("limit", limit)]);
        Self::read_result(request).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Document>, ResourceApiError> {
        let request = self
            .http
            .get(format!("{}/search", self.collection_url()))
            .query(&[("q", query)]);
        Self::read_result(request).await
    }

    async fn create(&self, record: Document) -> Result<Vec<Document>, ResourceApiError> {
        let request = self.http.post(self.collection_url()).json(&record);
        Self::read_result(request).await
    }

    async fn replace(&self, id: RecordId, record: Document) -> Result<Document, ResourceApiError> {
        let request = self.http.put(self.item_url(id)).json(&record);
        Self::read_result(request).await
    }

    async fn delete(&self, id: RecordId) -> Result<(), ResourceApiError> {
        Self::send(self.http.delete(self.item_url(id))).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("users", "http://shop.test/api/users")]
    #[case("products", "http://shop.test/api/products")]
    #[case("orders", "http://shop.test/api/orders")]
    fn known_collections_resolve(#[case] name: &str, #[case] expected: &str) {
        let client = HttpResourceClient::for_collection("http://shop.test", name).expect("known");
        assert_eq!(client.collection_url(), expected);
    }

    #[rstest]
    fn unknown_collections_are_rejected() {
        assert!(HttpResourceClient::for_collection("http://shop.test", "invoices").is_none());
    }

    #[rstest]
    fn item_urls_use_singular_path() {
        let client = HttpResourceClient::for_resource::<Order>("http://shop.test/");
        let id = RecordId::new(9).expect("id");
        assert_eq!(client.item_url(id), "http://shop.test/api/order/9");
    }

    #[rstest]
    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let client = HttpResourceClient::for_resource::<Product>("http://127.0.0.1:1");
        let err = client.list(10).await.expect_err("nothing listens on port 1");
        assert!(matches!(err, ResourceApiError::Transport { .. }));
    }
}
