//! Domain primitives, resources, and use-cases.
//!
//! Purpose: define the typed records served by the storefront, the declarative
//! schemas the document store validates against, and the generic CRUD and
//! search service shared by every resource. Nothing here depends on HTTP or
//! on a particular store.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failures.
//! - Resource / ResourceService: the generic collection contract.
//! - User / Product / Order: concrete resources.
//! - CollectionSchema: declarative schema descriptor.
//! - SearchQuery: validated free-text query.

pub mod error;
pub mod ports;
pub mod record;
pub mod resource;
pub mod resource_service;
pub mod resources;
pub mod schema;
pub mod search;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::record::{Document, ID_FIELD, RecordId, RecordIdError};
pub use self::resource::Resource;
pub use self::resource_service::{NOT_FOUND_MESSAGE, ResourceService};
pub use self::resources::{Address, Order, Product, ProductItem, User, all_schemas};
pub use self::schema::{CollectionSchema, FieldKind, FieldSchema, SchemaViolation};
pub use self::search::{MISSING_QUERY_MESSAGE, SearchQuery};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
