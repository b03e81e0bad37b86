//! Shared helper utilities for storefront integration tests.
//!
//! Integration tests compile as separate crates under `backend/tests/`, which
//! makes it awkward to share small helpers without copy/paste. Each suite
//! pulls in the pieces it needs from here.

pub mod cluster_skip;
pub mod server;

pub use cluster_skip::handle_cluster_setup_failure;

use serde_json::Value;
use storefront::domain::Document;

/// Convert a `json!` literal into a document, panicking on non-objects.
pub fn document(value: Value) -> Document {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
