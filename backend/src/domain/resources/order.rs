//! Orders placed by users.
//!
//! `user_id` and the product item identifiers are informal references; they
//! are not checked against the users or products collections.

use serde::{Deserialize, Serialize};

use crate::domain::record::RecordId;
use crate::domain::resource::Resource;
use crate::domain::schema::{CollectionSchema, FieldKind, FieldSchema};

/// One line of an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductItem {
    /// Product identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Ordered quantity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
}

/// Purchase record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Store-assigned identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    /// Identifier of the user placing the order.
    pub user_id: i64,
    /// Total cost.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_total: Option<f64>,
    /// Ordered products.
    #[serde(
        rename = "productItems",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_items: Option<Vec<ProductItem>>,
}

impl Resource for Order {
    const COLLECTION: &'static str = "orders";
    const ITEM: &'static str = "order";

    fn schema() -> CollectionSchema {
        CollectionSchema::new(Self::COLLECTION, "Collection of documents with details of an order")
            .with_field(
                FieldSchema::new("user_id", FieldKind::Int64)
                    .described("The identifier of the user that placed the order"),
            )
            .with_field(
                FieldSchema::new("order_total", FieldKind::Number)
                    .described("The total cost of the order"),
            )
            .with_field(
                FieldSchema::new(
                    "productItems",
                    FieldKind::array_of(FieldKind::object(vec![
                        FieldSchema::new("id", FieldKind::Int64)
                            .described("The product identifier"),
                        FieldSchema::new("quantity", FieldKind::Int64)
                            .described("The quantity of this product in this order"),
                    ])),
                )
                .described("The list of products that are part of this order"),
            )
            .require("user_id")
    }

    fn id(&self) -> Option<RecordId> {
        self.id
    }
}
