//! PostgreSQL-backed document store adapter.
//!
//! Documents live in one `documents` table keyed by branch, collection and a
//! shared identifier sequence. Registered schemas are persisted in
//! `collections` and cached per process after the first lookup.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Jsonb, Text};
use diesel::upsert::excluded;
use diesel_async::RunQueryDsl;
use serde_json::Value;
use tracing::debug;

use crate::domain::ports::{DeleteStatus, DocumentStore, DocumentStoreError, FindOptions};
use crate::domain::{
    CollectionSchema, Document, ID_FIELD, RecordId, SearchQuery, record::with_document_id,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CollectionRow, DocumentRow, NewCollectionRow, NewDocumentRow};
use super::pool::DbPool;
use super::schema::{collections, documents};

const UPSERT_DOCUMENT_SQL: &str = r#"
INSERT INTO documents (branch, collection, id, body)
VALUES ($1, $2, $3, $4)
ON CONFLICT (branch, collection, id)
DO UPDATE SET
    body = EXCLUDED.body,
    updated_at = now()
RETURNING id, body
"#;

// Keep the shared sequence ahead of explicitly chosen identifiers.
const ADVANCE_SEQUENCE_SQL: &str = r#"
SELECT setval(
    pg_get_serial_sequence('documents', 'id'),
    GREATEST($1, (SELECT last_value FROM documents_id_seq))
)
"#;

const SEARCH_SQL: &str = r#"
SELECT id, body
FROM documents
WHERE branch = $1
  AND collection = $2
  AND jsonb_to_tsvector('simple'::regconfig, body, '["string"]'::jsonb)
      @@ plainto_tsquery('simple'::regconfig, $3)
ORDER BY id
"#;

/// Diesel-backed implementation of the [`DocumentStore`] port.
///
/// Every instance is bound to one branch; instances for different branches
/// can share a pool without seeing each other's documents.
#[derive(Clone)]
pub struct DieselDocumentStore {
    pool: DbPool,
    branch: String,
    schemas: Arc<RwLock<HashMap<String, CollectionSchema>>>,
}

impl DieselDocumentStore {
    /// Create a store for `branch` using the given connection pool.
    pub fn new(pool: DbPool, branch: impl Into<String>) -> Self {
        Self {
            pool,
            branch: branch.into(),
            schemas: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Branch the store reads and writes.
    #[must_use]
    pub fn branch(&self) -> &str {
        &self.branch
    }

    fn cached_schema(&self, collection: &str) -> Result<Option<CollectionSchema>, DocumentStoreError> {
        let guard = self
            .schemas
            .read()
            .map_err(|_| DocumentStoreError::query("schema cache lock poisoned"))?;
        Ok(guard.get(collection).cloned())
    }

    fn cache_schema(&self, schema: CollectionSchema) -> Result<(), DocumentStoreError> {
        let mut guard = self
            .schemas
            .write()
            .map_err(|_| DocumentStoreError::query("schema cache lock poisoned"))?;
        guard.insert(schema.name().to_owned(), schema);
        Ok(())
    }

    /// Resolve the schema for `collection`, loading it from the database on
    /// first use.
    async fn schema(&self, collection: &str) -> Result<CollectionSchema, DocumentStoreError> {
        if let Some(schema) = self.cached_schema(collection)? {
            return Ok(schema);
        }

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<CollectionRow> = collections::table
            .filter(collections::branch.eq(&self.branch))
            .filter(collections::name.eq(collection))
            .select(CollectionRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "load collection schema"))?;

        let Some(row) = row else {
            return Err(DocumentStoreError::unknown_collection(collection));
        };
        let schema: CollectionSchema = serde_json::from_value(row.descriptor).map_err(|err| {
            DocumentStoreError::query(format!("stored schema for {collection} is malformed: {err}"))
        })?;
        self.cache_schema(schema.clone())?;
        Ok(schema)
    }

    async fn validated_body(
        &self,
        collection: &str,
        mut document: Document,
    ) -> Result<Value, DocumentStoreError> {
        document.remove(ID_FIELD);
        let schema = self.schema(collection).await?;
        schema
            .validate(&document)
            .map_err(|err| DocumentStoreError::validation(collection, err.to_string()))?;
        Ok(Value::Object(document))
    }
}

fn to_document(row: DocumentRow) -> Result<Document, DocumentStoreError> {
    let id = RecordId::new(row.id).map_err(|err| DocumentStoreError::query(err.to_string()))?;
    match row.body {
        Value::Object(body) => Ok(with_document_id(body, id)),
        other => Err(DocumentStoreError::query(format!(
            "document {id} body is not an object: {other}"
        ))),
    }
}

fn to_documents(rows: Vec<DocumentRow>) -> Result<Vec<Document>, DocumentStoreError> {
    rows.into_iter().map(to_document).collect()
}

fn clamp(raw: u64) -> i64 {
    i64::try_from(raw).unwrap_or(i64::MAX)
}

#[async_trait]
impl DocumentStore for DieselDocumentStore {
    async fn register_schemas(&self, schemas: &[CollectionSchema]) -> Result<(), DocumentStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        for schema in schemas {
            let descriptor = serde_json::to_value(schema).map_err(|err| {
                DocumentStoreError::query(format!("failed to serialise {} schema: {err}", schema.name()))
            })?;
            let row = NewCollectionRow {
                branch: &self.branch,
                name: schema.name(),
                descriptor: &descriptor,
            };
            diesel::insert_into(collections::table)
                .values(&row)
                .on_conflict((collections::branch, collections::name))
                .do_update()
                .set(collections::descriptor.eq(excluded(collections::descriptor)))
                .execute(&mut conn)
                .await
                .map_err(|err| map_diesel_error(err, "register collection schema"))?;
            self.cache_schema(schema.clone())?;
            debug!(branch = %self.branch, collection = schema.name(), "schema registered");
        }
        Ok(())
    }

    async fn find_many(
        &self,
        collection: &str,
        options: FindOptions,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        self.schema(collection).await?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = documents::table
            .filter(documents::branch.eq(&self.branch))
            .filter(documents::collection.eq(collection))
            .order(documents::id.asc())
            .select(DocumentRow::as_select())
            .into_boxed();
        if let Some(limit) = options.limit {
            query = query.limit(clamp(limit));
        }
        if let Some(offset) = options.offset {
            query = query.offset(clamp(offset));
        }
        let rows: Vec<DocumentRow> = query
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "list documents"))?;
        to_documents(rows)
    }

    async fn find_one(
        &self,
        collection: &str,
        id: RecordId,
    ) -> Result<Option<Document>, DocumentStoreError> {
        self.schema(collection).await?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<DocumentRow> = documents::table
            .filter(documents::branch.eq(&self.branch))
            .filter(documents::collection.eq(collection))
            .filter(documents::id.eq(id.get()))
            .select(DocumentRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, "find document"))?;
        row.map(to_document).transpose()
    }

    async fn insert_one(
        &self,
        collection: &str,
        document: Document,
    ) -> Result<Document, DocumentStoreError> {
        let body = self.validated_body(collection, document).await?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewDocumentRow {
            branch: &self.branch,
            collection,
            body: &body,
        };
        let stored: DocumentRow = diesel::insert_into(documents::table)
            .values(&row)
            .returning(DocumentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "insert document"))?;
        to_document(stored)
    }

    async fn insert_or_replace_one(
        &self,
        collection: &str,
        id: RecordId,
        document: Document,
    ) -> Result<Document, DocumentStoreError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let body = self.validated_body(collection, document).await?;
        let branch = self.branch.as_str();
        let raw_id = id.get();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        // The sequence moves first so concurrent inserts draw ids past `raw_id`.
        let stored: DocumentRow = conn
            .transaction::<_, diesel::result::Error, _>(|conn| {
                let body = &body;
                async move {
                    sql_query(ADVANCE_SEQUENCE_SQL)
                        .bind::<BigInt, _>(raw_id)
                        .execute(conn)
                        .await?;
                    sql_query(UPSERT_DOCUMENT_SQL)
                        .bind::<Text, _>(branch)
                        .bind::<Text, _>(collection)
                        .bind::<BigInt, _>(raw_id)
                        .bind::<Jsonb, _>(body)
                        .get_result(conn)
                        .await
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, "upsert document"))?;
        to_document(stored)
    }

    async fn delete_one(
        &self,
        collection: &str,
        id: RecordId,
    ) -> Result<DeleteStatus, DocumentStoreError> {
        self.schema(collection).await?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(
            documents::table
                .filter(documents::branch.eq(&self.branch))
                .filter(documents::collection.eq(collection))
                .filter(documents::id.eq(id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, "delete document"))?;
        Ok(if deleted == 0 {
            DeleteStatus::NotFound
        } else {
            DeleteStatus::Deleted
        })
    }

    async fn search(
        &self,
        collection: &str,
        query: &SearchQuery,
    ) -> Result<Vec<Document>, DocumentStoreError> {
        self.schema(collection).await?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DocumentRow> = sql_query(SEARCH_SQL)
            .bind::<Text, _>(&self.branch)
            .bind::<Text, _>(collection)
            .bind::<Text, _>(query.as_str())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "search documents"))?;
        to_documents(rows)
    }
}
