//! Diesel and pool error mapping for the document store adapter.
//!
//! Messages are kept as PostgreSQL reports them; the HTTP edge relays store
//! failures to clients unchanged.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::DocumentStoreError;

use super::pool::PoolError;

/// Map pool checkout or build failures to connection errors.
pub fn map_pool_error(error: PoolError) -> DocumentStoreError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    DocumentStoreError::connection(message)
}

/// Map a Diesel failure for `operation` to a store error.
pub fn map_diesel_error(error: DieselError, operation: &'static str) -> DocumentStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), operation, "diesel operation failed");
        }
        _ => debug!(error = %error, operation, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            DocumentStoreError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => DocumentStoreError::query(info.message().to_owned()),
        other => DocumentStoreError::query(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, DocumentStoreError::connection("timed out"));
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        let err = map_diesel_error(DieselError::NotFound, "find document");
        assert_eq!(err, DocumentStoreError::query("Record not found"));
    }

    #[rstest]
    fn database_messages_are_kept_verbatim() {
        let info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync> =
            Box::new(String::from("relation \"documents\" does not exist"));
        let err = map_diesel_error(
            DieselError::DatabaseError(DatabaseErrorKind::Unknown, info),
            "list documents",
        );
        assert_eq!(
            err,
            DocumentStoreError::query("relation \"documents\" does not exist")
        );
    }

    #[rstest]
    fn closed_connections_are_connection_errors() {
        let info: Box<dyn diesel::result::DatabaseErrorInformation + Send + Sync> =
            Box::new(String::from("server closed the connection unexpectedly"));
        let err = map_diesel_error(
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info),
            "insert document",
        );
        assert!(matches!(err, DocumentStoreError::Connection { .. }));
    }
}
