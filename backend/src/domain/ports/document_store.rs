//! Port abstraction for document store adapters and their errors.
//!
//! A document store keeps JSON documents in named collections, validates
//! writes against registered [`CollectionSchema`] descriptors, assigns
//! positive integer identifiers, and answers free-text searches. Stored
//! documents are always returned with their `id` field populated.

use async_trait::async_trait;

use crate::domain::{CollectionSchema, Document, RecordId, SearchQuery};

use super::define_port_error;

define_port_error! {
    /// Errors raised by document store adapters.
    pub enum DocumentStoreError {
        /// The store could not be reached.
        Connection { message: String } => "document store connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } => "document store query failed: {message}",
        /// The document does not conform to the collection schema.
        Validation { collection: String, message: String } => "invalid {collection} document: {message}",
        /// No schema has been registered for the collection.
        UnknownCollection { collection: String } => "collection '{collection}' is not registered",
    }
}

/// Pagination window for [`DocumentStore::find_many`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    /// Maximum number of documents to return; unbounded when `None`.
    pub limit: Option<u64>,
    /// Number of documents to skip before collecting results.
    pub offset: Option<u64>,
}

/// Outcome reported by [`DocumentStore::delete_one`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteStatus {
    /// A document was removed.
    Deleted,
    /// No document carried the identifier.
    NotFound,
}

/// Document store client.
///
/// Collections are ordered by ascending identifier for listing and search.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Register or update the schema for each collection.
    async fn register_schemas(&self, schemas: &[CollectionSchema]) -> Result<(), DocumentStoreError>;

    /// Return a page of documents from `collection`.
    async fn find_many(
        &self,
        collection: &str,
        options: FindOptions,
    ) -> Result<Vec<Document>, DocumentStoreError>;

    /// Fetch one document by identifier.
    async fn find_one(
        &self,
        collection: &str,
        id: RecordId,
    ) -> Result<Option<Document>, DocumentStoreError>;

    /// Insert a new document, assigning a fresh identifier.
    ///
    /// Any `id` field in `document` is ignored.
    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<Document, DocumentStoreError>;

    /// Replace the document stored under `id`, creating it when absent.
    ///
    /// Any `id` field in `document` is overridden by `id`.
    async fn insert_or_replace_one(
        &self,
        collection: &str,
        id: RecordId,
        document: Document,
    ) -> Result<Document, DocumentStoreError>;

    /// Remove the document stored under `id`.
    async fn delete_one(
        &self,
        collection: &str,
        id: RecordId,
    ) -> Result<DeleteStatus, DocumentStoreError>;

    /// Return every document in `collection` matching `query`.
    async fn search(
        &self,
        collection: &str,
        query: &SearchQuery,
    ) -> Result<Vec<Document>, DocumentStoreError>;
}
