//! CRUD and search use-cases shared by every resource.
//!
//! The service is a thin pass-through: each operation issues exactly one
//! document store call and relays the stored documents untouched. Each
//! document is checked against the typed resource on the way out but never
//! re-encoded from it, so integers and explicit `null`s survive a round trip.
//! Store failures become internal errors whose message is the store's own
//! description.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use super::ports::{DeleteStatus, DocumentStore, DocumentStoreError, FindOptions};
use super::record::{Document, ID_FIELD, RecordId};
use super::resource::Resource;
use super::search::SearchQuery;
use super::Error;

/// Message returned when a record cannot be found.
pub const NOT_FOUND_MESSAGE: &str = "Not found";

/// Generic resource service over a shared document store.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use storefront::domain::{Product, ResourceService};
/// use storefront::outbound::memory::InMemoryDocumentStore;
///
/// let store = Arc::new(InMemoryDocumentStore::new());
/// let products = ResourceService::<Product>::new(store);
/// # let _ = products;
/// ```
pub struct ResourceService<R> {
    store: Arc<dyn DocumentStore>,
    resource: PhantomData<fn() -> R>,
}

impl<R> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            resource: PhantomData,
        }
    }
}

impl<R: Resource> ResourceService<R> {
    /// Build a service for `R` backed by `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            resource: PhantomData,
        }
    }

    /// List records in store order, honouring the pagination window.
    ///
    /// # Errors
    /// Returns an internal [`Error`] when the store call fails.
    pub async fn list(&self, options: FindOptions) -> Result<Vec<Document>, Error> {
        let documents = self
            .store
            .find_many(R::COLLECTION, options)
            .await
            .map_err(store_error::<R>)?;
        check_all::<R>(documents)
    }

    /// Insert a new record. Any client-supplied identifier is discarded.
    ///
    /// # Errors
    /// Returns an internal [`Error`] when the store rejects the write.
    pub async fn create(&self, mut document: Document) -> Result<Document, Error> {
        document.remove(ID_FIELD);
        let stored = self
            .store
            .insert_one(R::COLLECTION, document)
            .await
            .map_err(store_error::<R>)?;
        debug!(collection = R::COLLECTION, id = ?stored.get(ID_FIELD), "record created");
        check::<R>(stored)
    }

    /// Fetch the record stored under `id`.
    ///
    /// # Errors
    /// Returns a not-found [`Error`] when no such record exists, or an
    /// internal [`Error`] when the store call fails.
    pub async fn get(&self, id: RecordId) -> Result<Document, Error> {
        let stored = self
            .store
            .find_one(R::COLLECTION, id)
            .await
            .map_err(store_error::<R>)?;
        match stored {
            Some(document) => check::<R>(document),
            None => Err(Error::not_found(NOT_FOUND_MESSAGE)),
        }
    }

    /// Replace the record stored under `id` wholesale, creating it if absent.
    ///
    /// The path identifier wins over any `id` carried in `document`.
    ///
    /// # Errors
    /// Returns an internal [`Error`] when the store rejects the write.
    pub async fn replace(&self, id: RecordId, document: Document) -> Result<Document, Error> {
        let stored = self
            .store
            .insert_or_replace_one(R::COLLECTION, id, document)
            .await
            .map_err(store_error::<R>)?;
        check::<R>(stored)
    }

    /// Delete the record stored under `id`.
    ///
    /// # Errors
    /// Returns an internal [`Error`] when the store call fails or reports
    /// that nothing was deleted.
    pub async fn delete(&self, id: RecordId) -> Result<(), Error> {
        let status = self
            .store
            .delete_one(R::COLLECTION, id)
            .await
            .map_err(store_error::<R>)?;
        match status {
            DeleteStatus::Deleted => Ok(()),
            DeleteStatus::NotFound => {
                warn!(collection = R::COLLECTION, %id, "delete matched no record");
                Err(Error::internal(format!("Failed to delete {id}")))
            }
        }
    }

    /// Return every record matching `query`.
    ///
    /// # Errors
    /// Returns an internal [`Error`] when the store call fails.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<Document>, Error> {
        let documents = self
            .store
            .search(R::COLLECTION, query)
            .await
            .map_err(store_error::<R>)?;
        check_all::<R>(documents)
    }
}

fn store_error<R: Resource>(error: DocumentStoreError) -> Error {
    warn!(collection = R::COLLECTION, %error, "document store call failed");
    Error::internal(error.to_string())
}

fn check<R: Resource>(document: Document) -> Result<Document, Error> {
    match serde_json::from_value::<R>(Value::Object(document.clone())) {
        Ok(_) => Ok(document),
        Err(err) => {
            warn!(collection = R::COLLECTION, error = %err, "stored document does not decode");
            Err(Error::internal(format!(
                "stored {} document is malformed: {err}",
                R::ITEM
            )))
        }
    }
}

fn check_all<R: Resource>(documents: Vec<Document>) -> Result<Vec<Document>, Error> {
    documents.into_iter().map(check::<R>).collect()
}
