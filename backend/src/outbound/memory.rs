//! In-process document store.
//!
//! Used when no database URL is configured and throughout the test suites.
//! Collections keep documents in a `BTreeMap` keyed by identifier, which
//! gives the same ascending-id ordering as the PostgreSQL adapter.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{DeleteStatus, DocumentStore, DocumentStoreError, FindOptions};
use crate::domain::{
    CollectionSchema, Document, ID_FIELD, RecordId, SearchQuery, record::with_document_id,
};

struct Collection {
    schema: CollectionSchema,
    documents: BTreeMap<RecordId, Document>,
    // Wide enough to sit one past `i64::MAX` once that id is taken.
    next_id: u64,
}

impl Collection {
    fn new(schema: CollectionSchema) -> Self {
        Self {
            schema,
            documents: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn validate(&self, document: &Document) -> Result<(), DocumentStoreError> {
        self.schema
            .validate(document)
            .map_err(|err| DocumentStoreError::validation(self.schema.name(), err.to_string()))
    }

    fn allocate_id(&mut self) -> Result<RecordId, DocumentStoreError> {
        let raw = i64::try_from(self.next_id)
            .map_err(|_| DocumentStoreError::query("identifier space exhausted"))?;
        let id = RecordId::new(raw).map_err(|err| DocumentStoreError::query(err.to_string()))?;
        self.bump_past(id);
        Ok(id)
    }

    fn bump_past(&mut self, id: RecordId) {
        self.next_id = self.next_id.max(id.get().unsigned_abs() + 1);
    }
}

/// Document store kept entirely in memory.
///
/// # Examples
/// ```
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// use serde_json::json;
/// use storefront::domain::ports::DocumentStore;
/// use storefront::domain::{Product, Resource};
/// use storefront::outbound::memory::InMemoryDocumentStore;
///
/// let store = InMemoryDocumentStore::new();
/// store.register_schemas(&[Product::schema()]).await.expect("registered");
/// let document = json!({ "name": "Pen" }).as_object().cloned().expect("object");
/// let stored = store.insert_one("products", document).await.expect("stored");
/// assert_eq!(stored["id"], json!(1));
/// # });
/// ```
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Collection>>,
}

impl InMemoryDocumentStore {
    /// Create an empty store with no registered collections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with `schemas` already registered.
    #[must_use]
    pub fn with_schemas(schemas: &[CollectionSchema]) -> Self {
        let collections = schemas
            .iter()
            .map(|schema| (schema.name().to_owned(), Collection::new(schema.clone())))
            .collect();
        Self {
            collections: RwLock::new(collections),
        }
    }
}

fn unknown(collection: &str) -> DocumentStoreError {
    DocumentStoreError::unknown_collection(collection)
}

fn window(options: FindOptions) -> (usize, usize) {
    let offset = options
        .offset
        .map_or(0, |raw| usize::try_from(raw).unwrap_or(usize::MAX));
    let limit = options
        .limit
        .map_or(usize::MAX, |raw| usize::try_from(raw).unwrap_or(usize::MAX));
    (offset, limit)
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn register_schemas(&self, schemas: &[CollectionSchema]) -> Result<(), DocumentStoreError> {
        let mut collections = self.collections.write().await;
        for schema in schemas {
            match collections.get_mut(schema.name()) {
                Some(existing) => existing.schema = schema.clone(),
                None => {
                    collections.insert(schema.name().to_owned(), Collection::new(schema.clone()));
                }
            }
            debug!(collection = schema.name(), "schema registered");
        }
        Ok(())
    }

    async fn find_many(
        &self,
        collection: &str,
        options: FindOptions,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let collections = self.collections.read().await;
        let entry = collections.get(collection).ok_or_else(|| unknown(collection))?;
        let (offset, limit) = window(options);
        Ok(entry
            .documents
            .values()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn find_one(
        &self,
        collection: &str,
        id: RecordId,
    ) -> Result<Option<Document>, DocumentStoreError> {
        let collections = self.collections.read().await;
        let entry = collections.get(collection).ok_or_else(|| unknown(collection))?;
        Ok(entry.documents.get(&id).cloned())
    }

    async fn insert_one(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<Document, DocumentStoreError> {
        document.remove(ID_FIELD);
        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| unknown(collection))?;
        entry.validate(&document)?;
        let id = entry.allocate_id()?;
        let stored = with_document_id(document, id);
        entry.documents.insert(id, stored.clone());
        Ok(stored)
    }

    async fn insert_or_replace_one(
        &self,
        collection: &str,
        id: RecordId,
        mut document: Document,
    ) -> Result<Document, DocumentStoreError> {
        document.remove(ID_FIELD);
        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| unknown(collection))?;
        entry.validate(&document)?;
        entry.bump_past(id);
        let stored = with_document_id(document, id);
        entry.documents.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_one(
        &self,
        collection: &str,
        id: RecordId,
    ) -> Result<DeleteStatus, DocumentStoreError> {
        let mut collections = self.collections.write().await;
        let entry = collections
            .get_mut(collection)
            .ok_or_else(|| unknown(collection))?;
        Ok(match entry.documents.remove(&id) {
            Some(_) => DeleteStatus::Deleted,
            None => DeleteStatus::NotFound,
        })
    }

    async fn search(
        &self,
        collection: &str,
        query: &SearchQuery,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        let collections = self.collections.read().await;
        let entry = collections.get(collection).ok_or_else(|| unknown(collection))?;
        Ok(entry
            .documents
            .values()
            .filter(|document| query.matches(document))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{Product, Resource, User};
    use rstest::{fixture, rstest};
    use serde_json::{Value, json};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    fn id(raw: i64) -> RecordId {
        RecordId::new(raw).expect("positive id")
    }

    #[fixture]
    fn store() -> InMemoryDocumentStore {
        InMemoryDocumentStore::with_schemas(&[Product::schema(), User::schema()])
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_ignores_client_id(store: InMemoryDocumentStore) {
        let first = store
            .insert_one("products", doc(json!({ "id": 50, "name": "Pen" })))
            .await
            .expect("first");
        let second = store
            .insert_one("products", doc(json!({ "name": "Ink" })))
            .await
            .expect("second");
        assert_eq!(first["id"], json!(1));
        assert_eq!(second["id"], json!(2));
    }

    #[rstest]
    #[tokio::test]
    async fn largest_id_can_be_upserted_before_the_sequence_runs_out(
        store: InMemoryDocumentStore,
    ) {
        let stored = store
            .insert_or_replace_one("products", id(i64::MAX), doc(json!({ "name": "Pen" })))
            .await
            .expect("upserted");
        assert_eq!(stored["id"], json!(i64::MAX));

        let err = store
            .insert_one("products", doc(json!({ "name": "Ink" })))
            .await
            .expect_err("no ids left");
        assert_eq!(err, DocumentStoreError::query("identifier space exhausted"));
    }

    #[rstest]
    #[tokio::test]
    async fn writes_are_validated_against_the_schema(store: InMemoryDocumentStore) {
        let err = store
            .insert_one("products", doc(json!({ "price": 3 })))
            .await
            .expect_err("missing name");
        assert_eq!(
            err.to_string(),
            "invalid products document: field 'name' is required"
        );
    }

    #[rstest]
    #[tokio::test]
    async fn unregistered_collections_are_rejected(store: InMemoryDocumentStore) {
        let err = store
            .find_many("widgets", FindOptions::default())
            .await
            .expect_err("unknown");
        assert_eq!(err, DocumentStoreError::unknown_collection("widgets"));
    }

    #[rstest]
    #[tokio::test]
    async fn upsert_replaces_wholesale_and_advances_sequence(store: InMemoryDocumentStore) {
        store
            .insert_or_replace_one("products", id(7), doc(json!({ "name": "Pen", "price": 1.0 })))
            .await
            .expect("created");
        let replaced = store
            .insert_or_replace_one("products", id(7), doc(json!({ "id": 3, "name": "Quill" })))
            .await
            .expect("replaced");
        assert_eq!(replaced, doc(json!({ "id": 7, "name": "Quill" })));

        let fresh = store
            .insert_one("products", doc(json!({ "name": "Ink" })))
            .await
            .expect("inserted");
        assert_eq!(fresh["id"], json!(8));
    }

    #[rstest]
    #[case(FindOptions { limit: None, offset: None }, vec![1, 2, 3, 4])]
    #[case(FindOptions { limit: Some(2), offset: None }, vec![1, 2])]
    #[case(FindOptions { limit: Some(2), offset: Some(3) }, vec![4])]
    #[case(FindOptions { limit: None, offset: Some(10) }, vec![])]
    #[tokio::test]
    async fn find_many_pages_in_id_order(
        store: InMemoryDocumentStore,
        #[case] options: FindOptions,
        #[case] expected: Vec<i64>,
    ) {
        for name in ["a", "b", "c", "d"] {
            store
                .insert_one("products", doc(json!({ "name": name })))
                .await
                .expect("inserted");
        }
        let ids: Vec<i64> = store
            .find_many("products", options)
            .await
            .expect("listed")
            .iter()
            .filter_map(|document| document.get("id").and_then(Value::as_i64))
            .collect();
        assert_eq!(ids, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_reports_missing_records(store: InMemoryDocumentStore) {
        store
            .insert_one("products", doc(json!({ "name": "Pen" })))
            .await
            .expect("inserted");
        assert_eq!(
            store.delete_one("products", id(1)).await.expect("deleted"),
            DeleteStatus::Deleted
        );
        assert_eq!(
            store.delete_one("products", id(1)).await.expect("second delete"),
            DeleteStatus::NotFound
        );
        assert_eq!(store.find_one("products", id(1)).await.expect("read"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn search_matches_words_in_nested_strings(store: InMemoryDocumentStore) {
        store
            .insert_one(
                "users",
                doc(json!({ "name": "Ada", "address": { "city": "London" } })),
            )
            .await
            .expect("ada");
        store
            .insert_one("users", doc(json!({ "name": "Grace", "languages": ["COBOL"] })))
            .await
            .expect("grace");

        let query = SearchQuery::parse(Some("london".into())).expect("query");
        let found = store.search("users", &query).await.expect("search");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0]["name"], json!("Ada"));
    }

    #[rstest]
    #[tokio::test]
    async fn re_registering_keeps_documents(store: InMemoryDocumentStore) {
        store
            .insert_one("products", doc(json!({ "name": "Pen" })))
            .await
            .expect("inserted");
        store
            .register_schemas(&[Product::schema()])
            .await
            .expect("re-registered");
        let all = store
            .find_many("products", FindOptions::default())
            .await
            .expect("listed");
        assert_eq!(all.len(), 1);
    }
}
