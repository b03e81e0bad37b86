//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;
use serde_json::Value;

use super::schema::{collections, documents};

/// Row struct for reading registered collection descriptors.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = collections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CollectionRow {
    pub descriptor: Value,
}

/// Insertable struct for registering a collection descriptor.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = collections)]
pub(crate) struct NewCollectionRow<'a> {
    pub branch: &'a str,
    pub name: &'a str,
    pub descriptor: &'a Value,
}

/// Row struct for reading documents, from the query builder or raw SQL.
#[derive(Debug, Clone, Queryable, QueryableByName, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DocumentRow {
    pub id: i64,
    pub body: Value,
}

/// Insertable struct for creating documents with a sequence-assigned id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = documents)]
pub(crate) struct NewDocumentRow<'a> {
    pub branch: &'a str,
    pub collection: &'a str,
    pub body: &'a Value,
}
