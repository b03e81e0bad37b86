//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`.
//! Regenerate with `diesel print-schema` when the migrations change.

diesel::table! {
    /// Registered collection schemas.
    ///
    /// Keyed by branch and collection name so several isolated data sets can
    /// share one database.
    collections (branch, name) {
        /// Data set the collection belongs to.
        branch -> Text,
        /// Collection name, for example `users`.
        name -> Text,
        /// Serialised `CollectionSchema` descriptor.
        descriptor -> Jsonb,
        /// Registration timestamp.
        created_at -> Timestamptz,
        /// Last re-registration timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Stored documents.
    ///
    /// `body` never contains the `id` key; the column value is injected when
    /// documents are read back. A GIN index over the string values of `body`
    /// backs free-text search.
    documents (branch, collection, id) {
        /// Data set the document belongs to.
        branch -> Text,
        /// Owning collection name.
        collection -> Text,
        /// Store-assigned identifier drawn from `documents_id_seq`.
        id -> Int8,
        /// Document fields as a JSON object.
        body -> Jsonb,
        /// Insertion timestamp.
        created_at -> Timestamptz,
        /// Last replacement timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(collections, documents);
