//! Generic resource contract shared by every collection.
//!
//! A resource is a typed record stored as a JSON document in a named
//! collection. Implementors describe where they live and how they are shaped;
//! [`crate::domain::ResourceService`] provides the CRUD and search behaviour.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::record::RecordId;
use super::schema::CollectionSchema;

/// Typed record persisted in a document collection.
pub trait Resource: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, also the plural path segment (`/api/users`).
    const COLLECTION: &'static str;
    /// Singular path segment addressing one record (`/api/user/{id}`).
    const ITEM: &'static str;

    /// Declarative schema registered with the store.
    fn schema() -> CollectionSchema;

    /// Store-assigned identifier, absent before the first write.
    fn id(&self) -> Option<RecordId>;
}
