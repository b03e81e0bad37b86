//! Record identifiers and raw document payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// JSON object stored in a collection.
pub type Document = Map<String, Value>;

/// Name of the primary key field injected into every stored document.
pub const ID_FIELD: &str = "id";

/// Store-assigned record identifier.
///
/// ## Invariants
/// - The wrapped value is strictly positive.
///
/// # Examples
/// ```
/// use storefront::domain::RecordId;
///
/// let id = RecordId::new(7).expect("positive id");
/// assert_eq!(id.get(), 7);
/// assert!(RecordId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RecordId(i64);

/// Validation failure for [`RecordId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("record id must be a positive integer, got {value}")]
pub struct RecordIdError {
    value: i64,
}

impl RecordId {
    /// Validate and wrap a raw identifier.
    ///
    /// # Errors
    /// Returns [`RecordIdError`] when `value` is zero or negative.
    pub const fn new(value: i64) -> Result<Self, RecordIdError> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(RecordIdError { value })
        }
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for RecordId {
    type Error = RecordIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RecordId> for i64 {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read the identifier embedded in a stored document, if any.
#[must_use]
pub fn document_id(document: &Document) -> Option<RecordId> {
    document
        .get(ID_FIELD)
        .and_then(Value::as_i64)
        .and_then(|raw| RecordId::new(raw).ok())
}

/// Return a copy of `document` with its identifier set to `id`.
#[must_use]
pub fn with_document_id(mut document: Document, id: RecordId) -> Document {
    document.insert(ID_FIELD.to_owned(), Value::from(id.get()));
    document
}
