//! Products available in the store.

use serde::{Deserialize, Serialize};

use crate::domain::record::RecordId;
use crate::domain::resource::Resource;
use crate::domain::schema::{CollectionSchema, FieldKind, FieldSchema};

/// Maximum length of a product name.
pub const PRODUCT_NAME_MAX_LENGTH: usize = 100;

/// Catalogue entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Product name, at most 100 characters.
    pub name: String,
    /// Unit price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Units in stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

impl Resource for Product {
    const COLLECTION: &'static str = "products";
    const ITEM: &'static str = "product";

    fn schema() -> CollectionSchema {
        CollectionSchema::new(
            Self::COLLECTION,
            "Collection of documents with details of products available",
        )
        .with_field(
            FieldSchema::new("name", FieldKind::bounded_string(PRODUCT_NAME_MAX_LENGTH))
                .described("Name of the product"),
        )
        .with_field(FieldSchema::new("price", FieldKind::Number).described("Price of the product"))
        .with_field(
            FieldSchema::new("quantity", FieldKind::Int64)
                .described("Number of products available in the store"),
        )
        .require("name")
    }

    fn id(&self) -> Option<RecordId> {
        self.id
    }
}
